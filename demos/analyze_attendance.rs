use clinic_flows::{
    analyze_staff_performance, GeminiClient, ShiftAttendanceRecord, ShiftCategory,
    StaffPerformanceInput,
};
use dotenv::dotenv;
use std::error::Error;

fn record(
    date: &str,
    shift: ShiftCategory,
    actual: (Option<&str>, Option<&str>),
    status: Option<&str>,
) -> ShiftAttendanceRecord {
    let (scheduled_start, scheduled_end) = match shift {
        ShiftCategory::Day => (Some("08:00"), Some("20:00")),
        ShiftCategory::Night => (Some("20:00"), Some("08:00")),
        ShiftCategory::DayOff => (None, None),
    };
    ShiftAttendanceRecord {
        date: date.to_string(),
        scheduled_shift: shift,
        scheduled_start_time: scheduled_start.map(String::from),
        scheduled_end_time: scheduled_end.map(String::from),
        actual_start_time: actual.0.map(String::from),
        actual_end_time: actual.1.map(String::from),
        status: status.map(String::from),
        notes: None,
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    dotenv().ok();
    println!("🚀 Starting attendance analysis...");

    let oracle = GeminiClient::from_env()?;
    println!("🤖 Using model {}", oracle.model());

    let input = StaffPerformanceInput {
        staff_id: "S-104".to_string(),
        staff_name: "Maria Santos".to_string(),
        staff_role: "Registered Nurse".to_string(),
        date_range_start: "2024-05-06".to_string(),
        date_range_end: "2024-05-12".to_string(),
        shifts: vec![
            record("2024-05-06", ShiftCategory::Day, (Some("07:55"), Some("20:05")), Some("Clocked-Out")),
            record("2024-05-07", ShiftCategory::Day, (Some("08:25"), Some("20:00")), Some("Late")),
            record("2024-05-08", ShiftCategory::DayOff, (None, None), None),
            record("2024-05-09", ShiftCategory::Night, (Some("19:58"), None), Some("Clocked-In")),
            record("2024-05-10", ShiftCategory::Night, (None, Some("08:00")), None),
            record("2024-05-11", ShiftCategory::Night, (None, None), Some("Absent")),
        ],
    };

    let output = analyze_staff_performance(&oracle, input).await?;

    println!("✅ Analysis complete:\n");
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
