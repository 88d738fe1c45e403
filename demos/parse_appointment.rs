use clinic_flows::{parse_appointment, AppointmentParseInput, GeminiClient};
use dotenv::dotenv;
use std::error::Error;
use std::io::{self, Write};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    dotenv().ok();

    let oracle = GeminiClient::from_env()?;
    let today = chrono::Local::now().format("%Y-%m-%d").to_string();

    println!("📅 Appointment parser ready (today is {}). Type 'quit' to exit.", today);
    println!("------------------------------------------------------------------");

    loop {
        print!("> ");
        io::stdout().flush()?;

        let mut line = String::new();
        io::stdin().read_line(&mut line)?;
        let instruction = line.trim();

        if instruction.eq_ignore_ascii_case("quit") || instruction.eq_ignore_ascii_case("exit") {
            break;
        }
        if instruction.is_empty() {
            continue;
        }

        let input = AppointmentParseInput {
            instruction: instruction.to_string(),
            current_date: today.clone(),
        };

        match parse_appointment(&oracle, input).await {
            Ok(parsed) => println!("{}\n", serde_json::to_string_pretty(&parsed)?),
            Err(e) => eprintln!("❌ {}\n", e),
        }
    }

    Ok(())
}
