//! # Clinic Flows
//!
//! Typed request/response flows that turn semi-structured clinic data into
//! structured suggestions with the help of a generative text service.
//!
//! ## Core Concepts
//!
//! - **Flow**: validate input, render a prompt, ask the oracle, post-process.
//!   Four flows ship: staff attendance analysis, appointment parsing,
//!   consultation note summaries and shift schedule generation.
//! - **Oracle**: any [`Oracle`] implementation. The `gemini` feature provides
//!   [`GeminiClient`]; [`ScriptedOracle`] replays fixed answers offline.
//! - **Short-circuit**: degenerate input (no shift records, empty roster) is
//!   answered deterministically without calling the oracle.
//!
//! ## Example
//!
//! ```rust,ignore
//! use clinic_flows::*;
//!
//! let oracle = GeminiClient::from_env()?;
//! let summary = summarize_notes(
//!     &oracle,
//!     NoteSummaryInput {
//!         notes_to_summarize: "Pt reports mild headache for 3 days...".to_string(),
//!     },
//! )
//! .await?;
//! println!("{}", summary.summary);
//! ```

pub mod error;
pub mod flows;
pub mod oracle;
pub mod prompts;
pub mod schema;
pub mod validation;

#[cfg(feature = "gemini")]
pub mod gemini;

pub use error::{ClinicFlowError, Result};
pub use flows::*;
pub use oracle::{generate_structured, Oracle, OraclePrompt, ScriptedOracle};
pub use schema::*;
pub use validation::{FromPayload, ValidationErrors};

#[cfg(feature = "gemini")]
pub use gemini::{GeminiClient, GeminiConfig};
