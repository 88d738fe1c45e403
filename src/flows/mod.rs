//! Flow orchestrators. Each flow validates its input, renders a prompt, asks
//! the [`Oracle`](crate::oracle::Oracle) for a structured answer and decides
//! what a missing answer means for its callers.

use std::fmt;

use log::warn;
use serde_json::Value;

use crate::error::{ClinicFlowError, Result};
use crate::validation::FromPayload;

pub mod appointment;
pub mod note_summary;
pub mod schedule;
pub mod staff_performance;

pub use appointment::{parse_appointment, parse_appointment_payload};
pub use note_summary::{summarize_notes, summarize_notes_payload};
pub use schedule::{generate_schedule, generate_schedule_payload};
pub use staff_performance::{analyze_staff_performance, analyze_staff_performance_payload};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FlowKind {
    StaffPerformance,
    AppointmentParse,
    NoteSummary,
    ScheduleGeneration,
}

impl FlowKind {
    pub fn name(&self) -> &'static str {
        match self {
            Self::StaffPerformance => "staff performance analysis",
            Self::AppointmentParse => "appointment parsing",
            Self::NoteSummary => "consultation note summary",
            Self::ScheduleGeneration => "shift schedule generation",
        }
    }
}

impl fmt::Display for FlowKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

fn validated<I: FromPayload>(flow: FlowKind, payload: &Value) -> Result<I> {
    I::from_payload(payload).map_err(|errors| {
        warn!("{}: rejected input ({})", flow, errors);
        ClinicFlowError::from(errors)
    })
}

fn no_output(flow: FlowKind, what: &str) -> ClinicFlowError {
    ClinicFlowError::FlowFailed {
        flow,
        message: format!("AI failed to generate {}.", what),
    }
}
