//! Model stage: invoke, validate, and recover.
//!
//! Every engine runs its model call through `ModelStage::run`:
//! 1. transient invocation failures are retried with exponential backoff;
//! 2. output that fails validation is re-prompted with the rejection reason,
//!    up to `correction_attempts` times;
//! 3. whatever comes back is returned only after passing the validator.

use std::time::Duration;

use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::errors::AppError;
use crate::llm_client::{InvokeOptions, LlmError, ModelInvoker};
use crate::prompt::{self, TemplateId};
use crate::validation::{self, Schema, ValidationError};

/// Longest slice of a rejected answer echoed back in a correction prompt.
const MAX_ECHOED_RESPONSE: usize = 8_000;

#[derive(Debug, Clone, PartialEq)]
pub struct RetryPolicy {
    /// Total invocation attempts, including the first.
    pub max_attempts: u32,
    pub base_delay: Duration,
    pub max_delay: Duration,
    /// Re-prompts allowed after a validation failure.
    pub correction_attempts: u32,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_millis(1000),
            max_delay: Duration::from_millis(8000),
            correction_attempts: 1,
        }
    }
}

impl RetryPolicy {
    /// Single attempt, no re-prompt.
    pub fn none() -> Self {
        Self {
            max_attempts: 1,
            base_delay: Duration::ZERO,
            max_delay: Duration::ZERO,
            correction_attempts: 0,
        }
    }

    /// Exponential backoff: base, 2×base, 4×base … capped at `max_delay`.
    /// `retry` is 1 for the first retry.
    pub fn delay_for(&self, retry: u32) -> Duration {
        let factor = 1u32
            .checked_shl(retry.saturating_sub(1))
            .unwrap_or(u32::MAX);
        self.base_delay
            .checked_mul(factor)
            .unwrap_or(self.max_delay)
            .min(self.max_delay)
    }
}

pub struct ModelStage<'a> {
    model: &'a dyn ModelInvoker,
    retry: &'a RetryPolicy,
}

impl<'a> ModelStage<'a> {
    pub fn new(model: &'a dyn ModelInvoker, retry: &'a RetryPolicy) -> Self {
        Self { model, retry }
    }

    /// Sends `prompt` and returns the validated, typed document.
    pub async fn run<T: DeserializeOwned>(
        &self,
        prompt: &str,
        schema: &Schema,
        options: &InvokeOptions,
    ) -> Result<T, AppError> {
        let mut raw = self.invoke_with_retry(prompt, options).await?;
        let mut corrections = 0;

        loop {
            let error = match validation::parse_as::<T>(&raw, schema) {
                Ok(document) => return Ok(document),
                Err(e) => e,
            };

            if corrections >= self.retry.correction_attempts {
                return Err(error.into());
            }
            corrections += 1;
            warn!(
                schema = schema.name,
                attempt = corrections,
                error = %error,
                "model output rejected, re-prompting with correction"
            );

            let correction = correction_prompt(prompt, &raw, &error)?;
            raw = self.invoke_with_retry(&correction, options).await?;
        }
    }

    async fn invoke_with_retry(
        &self,
        prompt: &str,
        options: &InvokeOptions,
    ) -> Result<String, AppError> {
        let attempts = self.retry.max_attempts.max(1);
        let mut attempt = 1;

        loop {
            match self.model.invoke(prompt, options).await {
                Ok(text) => {
                    debug!(attempt, chars = text.len(), "model responded");
                    return Ok(text);
                }
                Err(e) if e.is_transient() && attempt < attempts => {
                    let delay = self.retry.delay_for(attempt);
                    warn!(
                        attempt,
                        delay_ms = delay.as_millis() as u64,
                        error = %e,
                        "model call failed, retrying"
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Err(e) => return Err(invocation_error(e, attempt)),
            }
        }
    }
}

fn correction_prompt(
    original: &str,
    previous: &str,
    error: &ValidationError,
) -> Result<String, AppError> {
    let previous = truncate_chars(previous, MAX_ECHOED_RESPONSE);
    let reason = error.to_string();
    Ok(prompt::build(
        TemplateId::Correction,
        &[
            ("original_prompt", original),
            ("previous_response", previous),
            ("error", reason.as_str()),
        ],
    )?)
}

fn truncate_chars(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

fn invocation_error(err: LlmError, attempts: u32) -> AppError {
    AppError::ModelInvocation(format!("{err} (after {attempts} attempt(s))"))
}
