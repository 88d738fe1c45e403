use thiserror::Error;

use crate::flows::FlowKind;
use crate::validation::ValidationErrors;

#[derive(Error, Debug)]
pub enum ClinicFlowError {
    #[error("Invalid input: {0}")]
    Validation(ValidationErrors),

    #[error("{flow}: {message}")]
    FlowFailed { flow: FlowKind, message: String },

    #[error("{flow}: AI output does not match the declared shape: {details}")]
    InvalidOracleOutput { flow: FlowKind, details: String },

    #[error("AI output is not valid JSON: {0}")]
    MalformedOracleOutput(String),

    #[error("No API key configured for the generative service")]
    MissingApiKey,

    #[error("Generative service error: {0}")]
    Oracle(String),

    #[error("HTTP error: {0}")]
    Http(String),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

impl ClinicFlowError {
    /// The caller sent a payload that failed validation.
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// The generative service could not be reached or refused the request.
    pub fn is_oracle_unavailable(&self) -> bool {
        matches!(self, Self::Oracle(_) | Self::MissingApiKey | Self::Http(_))
    }

    /// The service answered but produced nothing usable.
    pub fn is_oracle_declined(&self) -> bool {
        matches!(
            self,
            Self::FlowFailed { .. }
                | Self::InvalidOracleOutput { .. }
                | Self::MalformedOracleOutput(_)
        )
    }
}

impl From<ValidationErrors> for ClinicFlowError {
    fn from(errors: ValidationErrors) -> Self {
        Self::Validation(errors)
    }
}

pub type Result<T> = std::result::Result<T, ClinicFlowError>;
