use log::info;
use serde_json::Value;

use super::{no_output, validated, FlowKind};
use crate::error::Result;
use crate::oracle::{generate_structured, Oracle};
use crate::prompts::{render_note_summary, SYSTEM_PROMPT_NOTE_SUMMARY};
use crate::schema::{NoteSummaryInput, NoteSummaryOutput};

const FLOW: FlowKind = FlowKind::NoteSummary;

pub async fn summarize_notes<O: Oracle + ?Sized>(
    oracle: &O,
    input: NoteSummaryInput,
) -> Result<NoteSummaryOutput> {
    info!(
        "Summarizing consultation notes ({} chars)",
        input.notes_to_summarize.len()
    );

    let prompt = render_note_summary(&input);
    generate_structured::<NoteSummaryOutput, _>(oracle, FLOW, SYSTEM_PROMPT_NOTE_SUMMARY, prompt)
        .await?
        .ok_or_else(|| no_output(FLOW, "a summary"))
}

pub async fn summarize_notes_payload<O: Oracle + ?Sized>(
    oracle: &O,
    payload: &Value,
) -> Result<NoteSummaryOutput> {
    let input = validated::<NoteSummaryInput>(FLOW, payload)?;
    summarize_notes(oracle, input).await
}
