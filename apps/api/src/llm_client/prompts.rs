// Shared prompt constants and prompt-building utilities.
// Each engine that needs LLM calls defines its own prompts.rs alongside it.
// This file contains cross-cutting prompt fragments.

use crate::prompt::PromptTemplate;

/// Default system prompt: enforces JSON-only output.
pub const JSON_ONLY_SYSTEM: &str = "You are a precise, structured assistant. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON value. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// System prompt for calls that reason over stored profiles.
pub const GROUNDED_JSON_SYSTEM: &str = "You are a precise, structured assistant. \
    You MUST respond with valid JSON only, with no text outside the JSON value and no code fences. \
    Base every statement strictly on the resume data provided. \
    Never invent experience, skills, employers, dates or qualifications that are not present; \
    if the data does not support a claim, leave it out.";

/// Re-prompt sent once a response failed validation. The model sees its own
/// previous answer and the reason it was rejected.
pub const RESPONSE_CORRECTION: PromptTemplate = PromptTemplate {
    id: "response-correction",
    params: &["original_prompt", "previous_response", "error"],
    body: r#"Your previous answer to the task below could not be used.

REASON IT WAS REJECTED:
<<error>>

YOUR PREVIOUS ANSWER:
<<previous_response>>

ORIGINAL TASK:
<<original_prompt>>

Answer the original task again. Return ONLY the corrected JSON, with every required field present and every enumerated field using one of the allowed values. No prose, no code fences."#,
};
