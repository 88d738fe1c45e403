//! Payload validation for flow inputs.
//!
//! Every flow input can be built from an untyped JSON payload through
//! [`FromPayload`]. Validation never stops at the first problem: each violated
//! constraint is recorded under its field path (`shifts[2].date`) so the caller
//! can report all of them at once.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde_json::{Map, Value};

use crate::schema::{
    AppointmentParseInput, NoteSummaryInput, ScheduleGenerationInput, ShiftAttendanceRecord,
    ShiftCategory, ShiftTimes, ShiftWindow, StaffMember, StaffPerformanceInput,
};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Field path to reason mapping, ordered by path.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors(BTreeMap<String, String>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, path: impl Into<String>, reason: impl Into<String>) {
        self.0.entry(path.into()).or_insert_with(|| reason.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn get(&self, path: &str) -> Option<&str> {
        self.0.get(path).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Returns `value` when nothing was recorded, otherwise the collected errors.
    pub fn finish<T>(self, value: Option<T>) -> Result<T, ValidationErrors> {
        match value {
            Some(value) if self.is_empty() => Ok(value),
            Some(_) | None => {
                let mut errors = self;
                if errors.is_empty() {
                    errors.add("$", "payload could not be read");
                }
                Err(errors)
            }
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .0
            .iter()
            .map(|(path, reason)| format!("{}: {}", path, reason))
            .collect();
        write!(f, "{}", parts.join("; "))
    }
}

/// Build a typed value out of an untyped JSON payload.
pub trait FromPayload: Sized {
    fn from_payload(payload: &Value) -> Result<Self, ValidationErrors>;
}

/// Reads typed fields out of one JSON object, recording failures by path.
pub struct FieldReader<'a> {
    prefix: String,
    object: &'a Map<String, Value>,
}

impl<'a> FieldReader<'a> {
    pub fn root(value: &'a Value, errors: &mut ValidationErrors) -> Option<Self> {
        Self::nested(String::new(), value, errors)
    }

    pub fn nested(path: String, value: &'a Value, errors: &mut ValidationErrors) -> Option<Self> {
        match value.as_object() {
            Some(object) => Some(Self {
                prefix: path,
                object,
            }),
            None => {
                let at = if path.is_empty() { "$".to_string() } else { path };
                errors.add(at, format!("expected an object, got {}", kind_of(value)));
                None
            }
        }
    }

    pub fn path(&self, key: &str) -> String {
        if self.prefix.is_empty() {
            key.to_string()
        } else {
            format!("{}.{}", self.prefix, key)
        }
    }

    /// Absent and explicit `null` are treated alike.
    fn present(&self, key: &str) -> Option<&'a Value> {
        self.object.get(key).filter(|v| !v.is_null())
    }

    pub fn required_str(&self, key: &str, errors: &mut ValidationErrors) -> Option<String> {
        match self.present(key) {
            None => {
                errors.add(self.path(key), "is required");
                None
            }
            Some(value) => self.as_string(key, value, errors),
        }
    }

    pub fn optional_str(&self, key: &str, errors: &mut ValidationErrors) -> Option<String> {
        self.present(key)
            .and_then(|value| self.as_string(key, value, errors))
    }

    /// A required `YYYY-MM-DD` date, kept as the caller wrote it.
    pub fn required_date(&self, key: &str, errors: &mut ValidationErrors) -> Option<String> {
        let raw = self.required_str(key, errors)?;
        self.check_date(key, raw, errors)
    }

    pub fn required_enum<T: FromStr>(
        &self,
        key: &str,
        allowed: &[&str],
        errors: &mut ValidationErrors,
    ) -> Option<T> {
        let raw = self.required_str(key, errors)?;
        self.parse_enum(key, &raw, allowed, errors)
    }

    pub fn optional_enum<T: FromStr>(
        &self,
        key: &str,
        allowed: &[&str],
        errors: &mut ValidationErrors,
    ) -> Option<T> {
        let raw = self.optional_str(key, errors)?;
        self.parse_enum(key, &raw, allowed, errors)
    }

    /// Elements of a required array, each paired with its own path.
    pub fn required_array(
        &self,
        key: &str,
        errors: &mut ValidationErrors,
    ) -> Option<Vec<(String, &'a Value)>> {
        match self.present(key) {
            None => {
                errors.add(self.path(key), "is required");
                None
            }
            Some(value) => self.as_array(key, value, errors),
        }
    }

    pub fn optional_array(
        &self,
        key: &str,
        errors: &mut ValidationErrors,
    ) -> Option<Vec<(String, &'a Value)>> {
        self.present(key)
            .and_then(|value| self.as_array(key, value, errors))
    }

    /// Optional list of `YYYY-MM-DD` strings; absent yields an empty list.
    pub fn optional_date_list(&self, key: &str, errors: &mut ValidationErrors) -> Vec<String> {
        let Some(items) = self.optional_array(key, errors) else {
            return Vec::new();
        };
        let mut dates = Vec::with_capacity(items.len());
        for (path, item) in items {
            match item.as_str() {
                Some(raw) if NaiveDate::parse_from_str(raw, DATE_FORMAT).is_ok() => {
                    dates.push(raw.to_string())
                }
                Some(raw) => errors.add(path, format!("'{}' is not a YYYY-MM-DD date", raw)),
                None => errors.add(path, format!("expected a string, got {}", kind_of(item))),
            }
        }
        dates
    }

    pub fn optional_object(
        &self,
        key: &str,
        errors: &mut ValidationErrors,
    ) -> Option<FieldReader<'a>> {
        self.present(key)
            .and_then(|value| Self::nested(self.path(key), value, errors))
    }

    fn as_string(&self, key: &str, value: &Value, errors: &mut ValidationErrors) -> Option<String> {
        match value.as_str() {
            Some(s) => Some(s.to_string()),
            None => {
                errors.add(
                    self.path(key),
                    format!("expected a string, got {}", kind_of(value)),
                );
                None
            }
        }
    }

    fn as_array(
        &self,
        key: &str,
        value: &'a Value,
        errors: &mut ValidationErrors,
    ) -> Option<Vec<(String, &'a Value)>> {
        match value.as_array() {
            Some(items) => Some(
                items
                    .iter()
                    .enumerate()
                    .map(|(idx, item)| (format!("{}[{}]", self.path(key), idx), item))
                    .collect(),
            ),
            None => {
                errors.add(
                    self.path(key),
                    format!("expected an array, got {}", kind_of(value)),
                );
                None
            }
        }
    }

    fn check_date(&self, key: &str, raw: String, errors: &mut ValidationErrors) -> Option<String> {
        if NaiveDate::parse_from_str(&raw, DATE_FORMAT).is_ok() {
            Some(raw)
        } else {
            errors.add(
                self.path(key),
                format!("'{}' is not a YYYY-MM-DD date", raw),
            );
            None
        }
    }

    fn parse_enum<T: FromStr>(
        &self,
        key: &str,
        raw: &str,
        allowed: &[&str],
        errors: &mut ValidationErrors,
    ) -> Option<T> {
        match raw.parse::<T>() {
            Ok(value) => Some(value),
            Err(_) => {
                errors.add(
                    self.path(key),
                    format!("'{}' is not one of {}", raw, allowed.join(", ")),
                );
                None
            }
        }
    }
}

/// Only called on strings that already passed `check_date`.
fn parse_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw, DATE_FORMAT).ok()
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

fn read_shift_record(
    path: String,
    value: &Value,
    errors: &mut ValidationErrors,
) -> Option<ShiftAttendanceRecord> {
    let reader = FieldReader::nested(path, value, errors)?;

    let date = reader.required_date("date", errors);
    let scheduled_shift =
        reader.required_enum::<ShiftCategory>("scheduledShift", &ShiftCategory::NAMES, errors);
    let scheduled_start_time = reader.optional_str("scheduledStartTime", errors);
    let scheduled_end_time = reader.optional_str("scheduledEndTime", errors);
    let actual_start_time = reader.optional_str("actualStartTime", errors);
    let actual_end_time = reader.optional_str("actualEndTime", errors);
    let status = reader.optional_str("status", errors);
    let notes = reader.optional_str("notes", errors);

    Some(ShiftAttendanceRecord {
        date: date?,
        scheduled_shift: scheduled_shift?,
        scheduled_start_time,
        scheduled_end_time,
        actual_start_time,
        actual_end_time,
        status,
        notes,
    })
}

impl FromPayload for StaffPerformanceInput {
    fn from_payload(payload: &Value) -> Result<Self, ValidationErrors> {
        let mut errors = ValidationErrors::new();
        let Some(reader) = FieldReader::root(payload, &mut errors) else {
            return Err(errors);
        };

        let staff_id = reader.required_str("staffId", &mut errors);
        let staff_name = reader.required_str("staffName", &mut errors);
        let staff_role = reader.required_str("staffRole", &mut errors);
        let date_range_start = reader.required_date("dateRangeStart", &mut errors);
        let date_range_end = reader.required_date("dateRangeEnd", &mut errors);

        let mut shifts = Vec::new();
        if let Some(items) = reader.required_array("shifts", &mut errors) {
            for (path, item) in items {
                if let Some(record) = read_shift_record(path, item, &mut errors) {
                    shifts.push(record);
                }
            }
        }

        let input = (|| {
            Some(StaffPerformanceInput {
                staff_id: staff_id?,
                staff_name: staff_name?,
                staff_role: staff_role?,
                date_range_start: date_range_start?,
                date_range_end: date_range_end?,
                shifts,
            })
        })();
        errors.finish(input)
    }
}

impl FromPayload for AppointmentParseInput {
    fn from_payload(payload: &Value) -> Result<Self, ValidationErrors> {
        let mut errors = ValidationErrors::new();
        let Some(reader) = FieldReader::root(payload, &mut errors) else {
            return Err(errors);
        };

        let instruction = reader.required_str("instruction", &mut errors);
        let current_date = reader.required_date("currentDate", &mut errors);

        let input = instruction
            .zip(current_date)
            .map(|(instruction, current_date)| AppointmentParseInput {
                instruction,
                current_date,
            });
        errors.finish(input)
    }
}

impl FromPayload for NoteSummaryInput {
    fn from_payload(payload: &Value) -> Result<Self, ValidationErrors> {
        let mut errors = ValidationErrors::new();
        let Some(reader) = FieldReader::root(payload, &mut errors) else {
            return Err(errors);
        };

        let input = reader
            .required_str("notesToSummarize", &mut errors)
            .map(|notes_to_summarize| NoteSummaryInput { notes_to_summarize });
        errors.finish(input)
    }
}

fn read_shift_window(
    reader: Option<FieldReader<'_>>,
    fallback: ShiftWindow,
    errors: &mut ValidationErrors,
) -> ShiftWindow {
    let Some(reader) = reader else {
        return fallback;
    };
    let start_time = reader.required_str("startTime", errors);
    let end_time = reader.required_str("endTime", errors);
    match (start_time, end_time) {
        (Some(start_time), Some(end_time)) => ShiftWindow {
            start_time,
            end_time,
        },
        _ => fallback,
    }
}

/// Merges a partially supplied `shiftTimes` table over the defaults.
fn read_shift_times(reader: &FieldReader<'_>, errors: &mut ValidationErrors) -> ShiftTimes {
    let defaults = ShiftTimes::default();
    let Some(table) = reader.optional_object("shiftTimes", errors) else {
        return defaults;
    };

    let day = table.optional_object("day", errors);
    let night = table.optional_object("night", errors);
    ShiftTimes {
        day: read_shift_window(day, defaults.day, errors),
        night: read_shift_window(night, defaults.night, errors),
    }
}

fn read_staff_member(
    path: String,
    value: &Value,
    errors: &mut ValidationErrors,
) -> Option<StaffMember> {
    let reader = FieldReader::nested(path, value, errors)?;

    let staff_id = reader.required_str("staffId", errors);
    let staff_name = reader.required_str("staffName", errors);
    let staff_role = reader.required_str("staffRole", errors);
    let unavailable_dates = reader.optional_date_list("unavailableDates", errors);
    let preferred_shift = match reader.optional_enum::<ShiftCategory>(
        "preferredShift",
        &ShiftCategory::WORKING_NAMES,
        errors,
    ) {
        Some(ShiftCategory::DayOff) => {
            errors.add(
                reader.path("preferredShift"),
                format!(
                    "'{}' is not one of {}",
                    ShiftCategory::DayOff,
                    ShiftCategory::WORKING_NAMES.join(", ")
                ),
            );
            None
        }
        other => other,
    };

    Some(StaffMember {
        staff_id: staff_id?,
        staff_name: staff_name?,
        staff_role: staff_role?,
        unavailable_dates,
        preferred_shift,
    })
}

impl FromPayload for ScheduleGenerationInput {
    fn from_payload(payload: &Value) -> Result<Self, ValidationErrors> {
        let mut errors = ValidationErrors::new();
        let Some(reader) = FieldReader::root(payload, &mut errors) else {
            return Err(errors);
        };

        let mut staff = Vec::new();
        if let Some(items) = reader.required_array("staff", &mut errors) {
            for (path, item) in items {
                if let Some(member) = read_staff_member(path, item, &mut errors) {
                    staff.push(member);
                }
            }
        }

        let start_date = reader.required_date("startDate", &mut errors);
        let end_date = reader.required_date("endDate", &mut errors);
        if let (Some(start), Some(end)) = (&start_date, &end_date) {
            if parse_date(end) < parse_date(start) {
                errors.add(
                    reader.path("endDate"),
                    format!("must not be before startDate ({})", start),
                );
            }
        }

        let shift_times = read_shift_times(&reader, &mut errors);
        let additional_constraints = reader.optional_str("additionalConstraints", &mut errors);

        let input = start_date
            .zip(end_date)
            .map(|(start_date, end_date)| ScheduleGenerationInput {
                staff,
                start_date,
                end_date,
                shift_times,
                additional_constraints,
            });
        errors.finish(input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_staff_performance_payload_collects_every_error() {
        let payload = json!({
            "staffId": 42,
            "staffName": "J.Doe",
            "dateRangeStart": "2024-01-01",
            "dateRangeEnd": "01/07/2024",
            "shifts": [
                { "date": "2024-01-02", "scheduledShift": "Evening" },
                { "scheduledShift": "Day" }
            ]
        });

        let errors = StaffPerformanceInput::from_payload(&payload).unwrap_err();

        assert_eq!(errors.get("staffId"), Some("expected a string, got a number"));
        assert_eq!(errors.get("staffRole"), Some("is required"));
        assert_eq!(
            errors.get("dateRangeEnd"),
            Some("'01/07/2024' is not a YYYY-MM-DD date")
        );
        assert!(errors
            .get("shifts[0].scheduledShift")
            .unwrap()
            .contains("'Evening' is not one of"));
        assert_eq!(errors.get("shifts[1].date"), Some("is required"));
        assert_eq!(errors.len(), 5);
    }

    #[test]
    fn test_staff_performance_payload_accepts_nulls_for_optional_fields() {
        let payload = json!({
            "staffId": "S1",
            "staffName": "J.Doe",
            "staffRole": "Nurse",
            "dateRangeStart": "2024-01-01",
            "dateRangeEnd": "2024-01-07",
            "shifts": [{
                "date": "2024-01-02",
                "scheduledShift": "Night",
                "actualStartTime": null,
                "status": "Late"
            }]
        });

        let input = StaffPerformanceInput::from_payload(&payload).unwrap();
        assert_eq!(input.shifts.len(), 1);
        assert_eq!(input.shifts[0].scheduled_shift, ShiftCategory::Night);
        assert_eq!(input.shifts[0].actual_start_time, None);
        assert_eq!(input.shifts[0].status.as_deref(), Some("Late"));
    }

    #[test]
    fn test_non_object_payload_is_rejected_at_root() {
        let errors = NoteSummaryInput::from_payload(&json!("just text")).unwrap_err();
        assert_eq!(errors.get("$"), Some("expected an object, got a string"));
    }

    #[test]
    fn test_appointment_payload_requires_iso_current_date() {
        let errors = AppointmentParseInput::from_payload(&json!({
            "instruction": "Book Bob with Dr. Smith tomorrow at 3pm",
            "currentDate": "June 1st"
        }))
        .unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors.get("currentDate").is_some());
    }

    #[test]
    fn test_shift_times_default_when_absent() {
        let input = ScheduleGenerationInput::from_payload(&json!({
            "staff": [],
            "startDate": "2024-03-01",
            "endDate": "2024-03-07"
        }))
        .unwrap();
        assert_eq!(input.shift_times, ShiftTimes::default());
    }

    #[test]
    fn test_shift_times_merge_keeps_supplied_sub_key() {
        let input = ScheduleGenerationInput::from_payload(&json!({
            "staff": [{ "staffId": "S1", "staffName": "Ana", "staffRole": "Nurse" }],
            "startDate": "2024-03-01",
            "endDate": "2024-03-07",
            "shiftTimes": { "night": { "startTime": "19:00", "endTime": "07:00" } }
        }))
        .unwrap();

        assert_eq!(input.shift_times.day, ShiftTimes::default().day);
        assert_eq!(input.shift_times.night.start_time, "19:00");
        assert_eq!(input.shift_times.night.end_time, "07:00");
    }

    #[test]
    fn test_schedule_rejects_inverted_range() {
        let errors = ScheduleGenerationInput::from_payload(&json!({
            "staff": [],
            "startDate": "2024-03-07",
            "endDate": "2024-03-01"
        }))
        .unwrap_err();
        assert_eq!(
            errors.get("endDate"),
            Some("must not be before startDate (2024-03-07)")
        );
    }

    #[test]
    fn test_schedule_range_compares_calendar_dates() {
        let ascending = ScheduleGenerationInput::from_payload(&json!({
            "staff": [],
            "startDate": "2024-9-01",
            "endDate": "2024-10-01"
        }));
        assert!(ascending.is_ok());

        let errors = ScheduleGenerationInput::from_payload(&json!({
            "staff": [],
            "startDate": "2024-10-01",
            "endDate": "2024-9-30"
        }))
        .unwrap_err();
        assert_eq!(
            errors.get("endDate"),
            Some("must not be before startDate (2024-10-01)")
        );
    }

    #[test]
    fn test_preferred_shift_must_be_a_working_shift() {
        for value in ["Day Off", "Day-Off", "Off"] {
            let errors = ScheduleGenerationInput::from_payload(&json!({
                "staff": [{
                    "staffId": "S1",
                    "staffName": "Ana",
                    "staffRole": "Nurse",
                    "preferredShift": value
                }],
                "startDate": "2024-03-01",
                "endDate": "2024-03-02"
            }))
            .unwrap_err();
            assert_eq!(
                errors.get("staff[0].preferredShift"),
                Some("'Day Off' is not one of Day, Night")
            );
        }

        let input = ScheduleGenerationInput::from_payload(&json!({
            "staff": [{
                "staffId": "S1",
                "staffName": "Ana",
                "staffRole": "Nurse",
                "preferredShift": "Night"
            }],
            "startDate": "2024-03-01",
            "endDate": "2024-03-02"
        }))
        .unwrap();
        assert_eq!(input.staff[0].preferred_shift, Some(ShiftCategory::Night));
    }

    #[test]
    fn test_display_joins_paths_in_order() {
        let mut errors = ValidationErrors::new();
        errors.add("b", "second");
        errors.add("a", "first");
        assert_eq!(errors.to_string(), "a: first; b: second");
    }
}
