use std::fmt;
use std::str::FromStr;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, JsonSchema)]
pub enum ShiftCategory {
    #[schemars(description = "Daytime shift")]
    Day,

    #[schemars(description = "Overnight shift")]
    Night,

    #[serde(rename = "Day Off", alias = "Day-Off", alias = "Off")]
    #[schemars(description = "Not scheduled to work")]
    DayOff,
}

impl ShiftCategory {
    pub const NAMES: [&'static str; 3] = ["Day", "Night", "Day Off"];
    pub const WORKING_NAMES: [&'static str; 2] = ["Day", "Night"];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Day => "Day",
            Self::Night => "Night",
            Self::DayOff => "Day Off",
        }
    }
}

impl fmt::Display for ShiftCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ShiftCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Day" => Ok(Self::Day),
            "Night" => Ok(Self::Night),
            "Day Off" | "Day-Off" | "Off" => Ok(Self::DayOff),
            other => Err(format!("unknown shift category '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, JsonSchema)]
pub enum PunctualityRating {
    Excellent,
    Good,
    Fair,
    Poor,
    #[serde(rename = "N/A")]
    #[schemars(description = "Not enough attendance data to rate punctuality")]
    NotApplicable,
}

impl PunctualityRating {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Excellent => "Excellent",
            Self::Good => "Good",
            Self::Fair => "Fair",
            Self::Poor => "Poor",
            Self::NotApplicable => "N/A",
        }
    }
}

impl fmt::Display for PunctualityRating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One day's planned versus actual work period for a staff member.
///
/// Every time and status field is independently optional. A record for a shift
/// that has not happened yet typically carries scheduled times only.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ShiftAttendanceRecord {
    #[schemars(description = "Date of the shift in YYYY-MM-DD format")]
    pub date: String,

    pub scheduled_shift: ShiftCategory,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scheduled_start_time: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scheduled_end_time: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actual_start_time: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actual_end_time: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schemars(description = "Free-form attendance status: Scheduled, Clocked-In, Late, Clocked-Out or Absent")]
    pub status: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct StaffPerformanceInput {
    pub staff_id: String,
    pub staff_name: String,
    pub staff_role: String,
    pub date_range_start: String,
    pub date_range_end: String,
    /// Kept in caller order.
    pub shifts: Vec<ShiftAttendanceRecord>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct StaffPerformanceOutput {
    #[schemars(
        description = "A concise narrative (3-5 sentences) of the staff member's attendance and schedule adherence over the period"
    )]
    pub overall_summary: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schemars(description = "Observed strengths, e.g. consistently on time for night shifts")]
    pub strengths: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schemars(description = "Concrete areas where attendance or adherence could improve")]
    pub areas_for_improvement: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schemars(description = "Overall punctuality: Excellent, Good, Fair, Poor, or N/A when there is too little data")]
    pub punctuality_rating: Option<PunctualityRating>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schemars(description = "Notes on how closely actual times followed the schedule")]
    pub schedule_adherence_notes: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub positive_patterns: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub negative_patterns: Option<Vec<String>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentParseInput {
    /// Free-text scheduling request, e.g. "Book Bob with Dr. Smith next Tuesday at 3pm".
    pub instruction: String,
    /// `YYYY-MM-DD`, used to resolve relative dates like "tomorrow".
    pub current_date: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentParseOutput {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schemars(description = "Full name of the patient, if mentioned")]
    pub patient_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schemars(description = "Name of the doctor or provider, if mentioned")]
    pub provider_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schemars(
        description = "The appointment date, resolved against the current date where possible (e.g. 2024-06-04), otherwise as stated"
    )]
    pub appointment_date_string: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schemars(description = "The requested time or time slot, e.g. 15:00 or 'morning'")]
    pub time_slot_string: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schemars(description = "Kind of visit, e.g. Check-up, Consultation, Follow-up")]
    pub appointment_type: Option<String>,

    #[schemars(
        description = "True only if at least the patient name, provider name and some date or time indication were extracted"
    )]
    pub parsed_successfully: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schemars(description = "Ambiguities, assumptions made, or information that is missing")]
    pub ai_confidence_notes: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct NoteSummaryInput {
    pub notes_to_summarize: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct NoteSummaryOutput {
    #[schemars(description = "A 2-4 sentence summary of the consultation notes")]
    pub summary: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ShiftWindow {
    pub start_time: String,
    pub end_time: String,
}

impl ShiftWindow {
    pub fn new(start_time: impl Into<String>, end_time: impl Into<String>) -> Self {
        Self {
            start_time: start_time.into(),
            end_time: end_time.into(),
        }
    }

    fn default_day() -> Self {
        Self::new("08:00", "20:00")
    }

    fn default_night() -> Self {
        Self::new("20:00", "08:00")
    }
}

/// Clock times for the two working shift categories.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, JsonSchema)]
pub struct ShiftTimes {
    #[serde(default = "ShiftWindow::default_day")]
    pub day: ShiftWindow,

    #[serde(default = "ShiftWindow::default_night")]
    pub night: ShiftWindow,
}

impl Default for ShiftTimes {
    fn default() -> Self {
        Self {
            day: ShiftWindow::default_day(),
            night: ShiftWindow::default_night(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct StaffMember {
    pub staff_id: String,
    pub staff_name: String,
    pub staff_role: String,

    /// Dates (`YYYY-MM-DD`) this person cannot work.
    #[serde(default)]
    pub unavailable_dates: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preferred_shift: Option<ShiftCategory>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleGenerationInput {
    pub staff: Vec<StaffMember>,
    pub start_date: String,
    pub end_date: String,

    #[serde(default)]
    pub shift_times: ShiftTimes,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub additional_constraints: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ShiftAssignment {
    #[schemars(description = "Date in YYYY-MM-DD format")]
    pub date: String,

    #[schemars(description = "Must match a staffId from the input roster")]
    pub staff_id: String,

    pub staff_name: String,

    pub shift: ShiftCategory,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schemars(description = "Shift start time from the shift-time table; omit for Day Off")]
    pub start_time: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleGenerationOutput {
    #[schemars(description = "One entry per staff member per day in the requested range")]
    pub schedule: Vec<ShiftAssignment>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schemars(description = "Trade-offs made or constraints that could not be satisfied")]
    pub notes: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_schema_uses_wire_names() {
        let schema = serde_json::to_string(&schemars::schema_for!(StaffPerformanceOutput)).unwrap();
        assert!(schema.contains("overallSummary"));
        assert!(schema.contains("punctualityRating"));
        assert!(schema.contains("N/A"));
    }

    #[test]
    fn test_punctuality_rating_wire_value() {
        let json = serde_json::to_string(&PunctualityRating::NotApplicable).unwrap();
        assert_eq!(json, "\"N/A\"");
        let parsed: PunctualityRating = serde_json::from_str("\"Fair\"").unwrap();
        assert_eq!(parsed, PunctualityRating::Fair);
    }

    #[test]
    fn test_shift_category_accepts_aliases() {
        let parsed: ShiftCategory = serde_json::from_str("\"Off\"").unwrap();
        assert_eq!(parsed, ShiftCategory::DayOff);
        assert_eq!("Day-Off".parse::<ShiftCategory>(), Ok(ShiftCategory::DayOff));
        assert!("Evening".parse::<ShiftCategory>().is_err());
    }

    #[test]
    fn test_partial_shift_times_fill_defaults_on_deserialize() {
        let input: ScheduleGenerationInput = serde_json::from_str(
            r#"{
                "staff": [],
                "startDate": "2024-03-01",
                "endDate": "2024-03-02",
                "shiftTimes": { "day": { "startTime": "07:00", "endTime": "19:00" } }
            }"#,
        )
        .unwrap();
        assert_eq!(input.shift_times.day, ShiftWindow::new("07:00", "19:00"));
        assert_eq!(input.shift_times.night, ShiftWindow::new("20:00", "08:00"));
    }

    #[test]
    fn test_appointment_output_tolerates_nulls() {
        let parsed: AppointmentParseOutput = serde_json::from_str(
            r#"{"patientName": "Bob", "providerName": null, "parsedSuccessfully": false}"#,
        )
        .unwrap();
        assert_eq!(parsed.patient_name.as_deref(), Some("Bob"));
        assert_eq!(parsed.provider_name, None);
        assert!(!parsed.parsed_successfully);
    }
}
