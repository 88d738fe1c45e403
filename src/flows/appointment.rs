use log::info;
use serde_json::Value;

use super::{validated, FlowKind};
use crate::error::Result;
use crate::oracle::{generate_structured, Oracle};
use crate::prompts::{render_appointment_parse, SYSTEM_PROMPT_APPOINTMENT_PARSE};
use crate::schema::{AppointmentParseInput, AppointmentParseOutput};

const FLOW: FlowKind = FlowKind::AppointmentParse;

pub const NO_RESPONSE_NOTES: &str = "The AI model did not return a response. Please rephrase the instruction or enter the appointment details manually.";
pub const NO_RESPONSE_ERROR: &str = "AI processing error.";

/// Result returned in place of an error when the oracle produces nothing.
pub fn unparsed_output() -> AppointmentParseOutput {
    AppointmentParseOutput {
        patient_name: None,
        provider_name: None,
        appointment_date_string: None,
        time_slot_string: None,
        appointment_type: None,
        parsed_successfully: false,
        ai_confidence_notes: Some(NO_RESPONSE_NOTES.to_string()),
        error_message: Some(NO_RESPONSE_ERROR.to_string()),
    }
}

/// Turns a free-text booking request into appointment fields.
///
/// Unlike the other flows this never fails on a missing oracle answer; it
/// reports `parsed_successfully = false` instead. Transport errors and
/// malformed answers still propagate.
pub async fn parse_appointment<O: Oracle + ?Sized>(
    oracle: &O,
    input: AppointmentParseInput,
) -> Result<AppointmentParseOutput> {
    info!("Parsing appointment request (current date {})", input.current_date);

    let prompt = render_appointment_parse(&input);
    let output = generate_structured::<AppointmentParseOutput, _>(
        oracle,
        FLOW,
        SYSTEM_PROMPT_APPOINTMENT_PARSE,
        prompt,
    )
    .await?;

    Ok(output.unwrap_or_else(unparsed_output))
}

pub async fn parse_appointment_payload<O: Oracle + ?Sized>(
    oracle: &O,
    payload: &Value,
) -> Result<AppointmentParseOutput> {
    let input = validated::<AppointmentParseInput>(FLOW, payload)?;
    parse_appointment(oracle, input).await
}
