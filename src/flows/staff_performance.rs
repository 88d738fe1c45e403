use log::{debug, info};
use serde_json::Value;

use super::{no_output, validated, FlowKind};
use crate::error::Result;
use crate::oracle::{generate_structured, Oracle};
use crate::prompts::{render_staff_performance, SYSTEM_PROMPT_STAFF_PERFORMANCE};
use crate::schema::{PunctualityRating, StaffPerformanceInput, StaffPerformanceOutput};

const FLOW: FlowKind = FlowKind::StaffPerformance;

/// Fixed result for a period with no shift records. The oracle is not consulted.
pub fn no_data_output(input: &StaffPerformanceInput) -> StaffPerformanceOutput {
    StaffPerformanceOutput {
        overall_summary: format!(
            "No shift or attendance data available for {} during the period {} to {}. Unable to perform attendance analysis.",
            input.staff_name, input.date_range_start, input.date_range_end
        ),
        strengths: Some(Vec::new()),
        areas_for_improvement: Some(Vec::new()),
        punctuality_rating: Some(PunctualityRating::NotApplicable),
        schedule_adherence_notes: Some("No data to analyze.".to_string()),
        positive_patterns: Some(Vec::new()),
        negative_patterns: Some(Vec::new()),
    }
}

/// Summarises a staff member's attendance over a date range.
///
/// Fails with `FlowFailed` when the oracle produces no output.
pub async fn analyze_staff_performance<O: Oracle + ?Sized>(
    oracle: &O,
    input: StaffPerformanceInput,
) -> Result<StaffPerformanceOutput> {
    info!(
        "Analyzing attendance for staff {} ({} shifts, {} to {})",
        input.staff_id,
        input.shifts.len(),
        input.date_range_start,
        input.date_range_end
    );

    if input.shifts.is_empty() {
        debug!("No shift records for {}; skipping generation", input.staff_id);
        return Ok(no_data_output(&input));
    }

    let prompt = render_staff_performance(&input);
    generate_structured::<StaffPerformanceOutput, _>(
        oracle,
        FLOW,
        SYSTEM_PROMPT_STAFF_PERFORMANCE,
        prompt,
    )
    .await?
    .ok_or_else(|| no_output(FLOW, "a staff performance analysis"))
}

pub async fn analyze_staff_performance_payload<O: Oracle + ?Sized>(
    oracle: &O,
    payload: &Value,
) -> Result<StaffPerformanceOutput> {
    let input = validated::<StaffPerformanceInput>(FLOW, payload)?;
    analyze_staff_performance(oracle, input).await
}
