use std::collections::HashSet;

use log::{debug, info, warn};
use serde_json::Value;

use super::{no_output, validated, FlowKind};
use crate::error::Result;
use crate::oracle::{generate_structured, Oracle};
use crate::prompts::{render_schedule_generation, SYSTEM_PROMPT_SCHEDULE_GENERATION};
use crate::schema::{ScheduleGenerationInput, ScheduleGenerationOutput};

const FLOW: FlowKind = FlowKind::ScheduleGeneration;

pub const EMPTY_ROSTER_NOTE: &str = "No staff provided; nothing to schedule.";

/// Drafts a Day/Night/Day Off roster for the given staff and date range.
///
/// An empty roster short-circuits to an empty schedule. A missing oracle answer
/// fails with `FlowFailed`.
pub async fn generate_schedule<O: Oracle + ?Sized>(
    oracle: &O,
    input: ScheduleGenerationInput,
) -> Result<ScheduleGenerationOutput> {
    info!(
        "Generating schedule for {} staff from {} to {}",
        input.staff.len(),
        input.start_date,
        input.end_date
    );

    if input.staff.is_empty() {
        debug!("Empty roster; skipping generation");
        return Ok(ScheduleGenerationOutput {
            schedule: Vec::new(),
            notes: Some(EMPTY_ROSTER_NOTE.to_string()),
        });
    }

    let prompt = render_schedule_generation(&input);
    let output = generate_structured::<ScheduleGenerationOutput, _>(
        oracle,
        FLOW,
        SYSTEM_PROMPT_SCHEDULE_GENERATION,
        prompt,
    )
    .await?
    .ok_or_else(|| no_output(FLOW, "a schedule"))?;

    let roster: HashSet<&str> = input.staff.iter().map(|s| s.staff_id.as_str()).collect();
    let unknown = output
        .schedule
        .iter()
        .filter(|a| !roster.contains(a.staff_id.as_str()))
        .count();
    if unknown > 0 {
        warn!("{} schedule entries reference staff outside the roster", unknown);
    }

    Ok(output)
}

pub async fn generate_schedule_payload<O: Oracle + ?Sized>(
    oracle: &O,
    payload: &Value,
) -> Result<ScheduleGenerationOutput> {
    let input = validated::<ScheduleGenerationInput>(FLOW, payload)?;
    generate_schedule(oracle, input).await
}
