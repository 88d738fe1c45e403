use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use log::{debug, warn};
use schemars::JsonSchema;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{ClinicFlowError, Result};
use crate::flows::FlowKind;

/// Everything the generative service needs for one request.
#[derive(Debug, Clone, PartialEq)]
pub struct OraclePrompt {
    pub system: String,
    pub user: String,
    /// JSON schema the structured answer must satisfy.
    pub output_schema: Value,
}

/// A text-generation service that answers a prompt with a structured value.
///
/// One request, one response. `Ok(None)` means the service answered but
/// produced no output; transport and service failures are `Err`. Implementations
/// do not retry.
#[async_trait]
pub trait Oracle: Send + Sync {
    async fn generate(&self, prompt: &OraclePrompt) -> Result<Option<Value>>;
}

/// Sends `user` under `system` with `T`'s schema attached, then checks the
/// answer against that schema.
pub async fn generate_structured<T, O>(
    oracle: &O,
    flow: FlowKind,
    system: &str,
    user: String,
) -> Result<Option<T>>
where
    T: DeserializeOwned + JsonSchema,
    O: Oracle + ?Sized,
{
    let output_schema = serde_json::to_value(schemars::schema_for!(T))?;
    let prompt = OraclePrompt {
        system: system.to_string(),
        user,
        output_schema,
    };
    debug!(
        "{}: sending prompt ({} chars system, {} chars user)",
        flow,
        prompt.system.len(),
        prompt.user.len()
    );

    match oracle.generate(&prompt).await? {
        None | Some(Value::Null) => {
            warn!("{}: generative service returned no output", flow);
            Ok(None)
        }
        Some(value) => serde_json::from_value::<T>(value)
            .map(Some)
            .map_err(|e| ClinicFlowError::InvalidOracleOutput {
                flow,
                details: e.to_string(),
            }),
    }
}

#[derive(Debug, Clone)]
enum ScriptedReply {
    Output(Value),
    Empty,
    Failure(String),
}

/// In-process oracle that replays a fixed reply and records every prompt.
///
/// Useful for tests and offline demos.
#[derive(Debug)]
pub struct ScriptedOracle {
    reply: ScriptedReply,
    calls: AtomicUsize,
    prompts: Mutex<Vec<OraclePrompt>>,
}

impl ScriptedOracle {
    fn with_reply(reply: ScriptedReply) -> Self {
        Self {
            reply,
            calls: AtomicUsize::new(0),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn returning(value: Value) -> Self {
        Self::with_reply(ScriptedReply::Output(value))
    }

    /// Answers every prompt with the "no output" signal.
    pub fn empty() -> Self {
        Self::with_reply(ScriptedReply::Empty)
    }

    pub fn failing(message: impl Into<String>) -> Self {
        Self::with_reply(ScriptedReply::Failure(message.into()))
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn prompts(&self) -> Vec<OraclePrompt> {
        self.prompts
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

#[async_trait]
impl Oracle for ScriptedOracle {
    async fn generate(&self, prompt: &OraclePrompt) -> Result<Option<Value>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.prompts
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(prompt.clone());

        match &self.reply {
            ScriptedReply::Output(value) => Ok(Some(value.clone())),
            ScriptedReply::Empty => Ok(None),
            ScriptedReply::Failure(message) => Err(ClinicFlowError::Oracle(message.clone())),
        }
    }
}
