//! Scripted `ModelInvoker` for tests: replays queued replies in order and
//! records every prompt it was given.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;

use super::{InvokeOptions, LlmError, ModelInvoker};

#[derive(Default)]
pub struct ScriptedModel {
    replies: Mutex<VecDeque<Result<String, LlmError>>>,
    calls: Mutex<Vec<(String, InvokeOptions)>>,
}

impl ScriptedModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reply(self, text: impl Into<String>) -> Self {
        self.replies.lock().unwrap().push_back(Ok(text.into()));
        self
    }

    pub fn fail(self, err: LlmError) -> Self {
        self.replies.lock().unwrap().push_back(Err(err));
        self
    }

    pub fn prompts(&self) -> Vec<String> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .map(|(prompt, _)| prompt.clone())
            .collect()
    }

    pub fn options(&self) -> Vec<InvokeOptions> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .map(|(_, options)| options.clone())
            .collect()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl ModelInvoker for ScriptedModel {
    async fn invoke(&self, prompt: &str, options: &InvokeOptions) -> Result<String, LlmError> {
        self.calls
            .lock()
            .unwrap()
            .push((prompt.to_string(), options.clone()));
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Err(LlmError::EmptyContent))
    }
}

pub fn server_error() -> LlmError {
    LlmError::Api {
        status: 503,
        message: "service unavailable".into(),
    }
}
