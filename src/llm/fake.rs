//! In-memory model for tests.

use super::{ChatModel, LlmError};
use async_trait::async_trait;
use std::sync::Mutex;

/// Answers every call with the same reply and remembers what it was sent.
pub(crate) struct ScriptedModel {
    reply: String,
    calls: Mutex<Vec<(String, String)>>,
}

impl ScriptedModel {
    pub(crate) fn new(reply: impl Into<String>) -> Self {
        Self {
            reply: reply.into(),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// `(system_prompt, user_message)` pairs in call order.
    pub(crate) fn calls(&self) -> Vec<(String, String)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl ChatModel for ScriptedModel {
    async fn invoke(&self, system_prompt: &str, user_message: &str) -> Result<String, LlmError> {
        self.calls
            .lock()
            .unwrap()
            .push((system_prompt.to_string(), user_message.to_string()));
        Ok(self.reply.clone())
    }
}

/// Fails every call, standing in for an unreachable service.
pub(crate) struct FailingModel;

#[async_trait]
impl ChatModel for FailingModel {
    async fn invoke(&self, _system_prompt: &str, _user_message: &str) -> Result<String, LlmError> {
        Err(LlmError::Api {
            status: 401,
            message: "invalid x-api-key".to_string(),
        })
    }
}
