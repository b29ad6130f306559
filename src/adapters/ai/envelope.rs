//! Request envelopes and response payload extraction per API style.

use serde::{Deserialize, Serialize};

use super::descriptor::ApiStyle;
use crate::ports::{AIError, GenerationRequest};

/// Sampling temperature; high for varied stalling.
pub const GENERATION_TEMPERATURE: f32 = 1.0;

/// Builds the JSON request body for `style`.
pub fn request_body(
    style: ApiStyle,
    model: &str,
    request: &GenerationRequest,
) -> Result<serde_json::Value, AIError> {
    let body = match style {
        ApiStyle::Gemini => serde_json::to_value(GeminiRequest {
            contents: vec![GeminiContent {
                parts: vec![GeminiPart {
                    text: request.prompt.clone(),
                }],
            }],
            generation_config: GeminiGenerationConfig {
                response_mime_type: "application/json".to_string(),
                temperature: GENERATION_TEMPERATURE,
            },
        }),
        ApiStyle::OpenAiChat => serde_json::to_value(OpenAIRequest {
            model: model.to_string(),
            messages: vec![
                OpenAIMessage {
                    role: "system".to_string(),
                    content: request.instructions.clone(),
                },
                OpenAIMessage {
                    role: "user".to_string(),
                    content: format!("CONVERSATION LOG:\n{}", request.transcript),
                },
            ],
            temperature: GENERATION_TEMPERATURE,
            response_format: ResponseFormat {
                kind: "json_object".to_string(),
            },
        }),
    };

    body.map_err(|e| AIError::parse(format!("Failed to encode request: {}", e)))
}

/// Pulls the generated text out of a provider response envelope.
pub fn extract_payload(style: ApiStyle, body: &str) -> Result<String, AIError> {
    match style {
        ApiStyle::Gemini => {
            let response: GeminiResponse = serde_json::from_str(body)
                .map_err(|e| AIError::parse(format!("Failed to parse response: {}", e)))?;
            response
                .candidates
                .into_iter()
                .next()
                .and_then(|c| c.content)
                .and_then(|content| content.parts.into_iter().next())
                .and_then(|part| part.text)
                .ok_or_else(|| AIError::parse("No candidate text in response"))
        }
        ApiStyle::OpenAiChat => {
            let response: OpenAIResponse = serde_json::from_str(body)
                .map_err(|e| AIError::parse(format!("Failed to parse response: {}", e)))?;
            response
                .choices
                .into_iter()
                .next()
                .and_then(|choice| choice.message.content)
                .ok_or_else(|| AIError::parse("No choices in response"))
        }
    }
}

/// Removes a surrounding markdown code fence (```` ``` ```` or ```` ```json ````).
pub fn strip_code_fences(text: &str) -> &str {
    let trimmed = text.trim();

    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };

    // Drop the info string ("json", "JSON", ...) up to the first newline.
    let body = match rest.find('\n') {
        Some(newline) => &rest[newline + 1..],
        None => rest.trim_start_matches(|c: char| c.is_ascii_alphabetic()),
    };

    body.trim_end().strip_suffix("```").unwrap_or(body).trim()
}

/// Parses generated text as a JSON object.
pub fn parse_payload(text: &str) -> Result<serde_json::Value, AIError> {
    let value: serde_json::Value = serde_json::from_str(strip_code_fences(text))
        .map_err(|e| AIError::parse(format!("Generated text is not JSON: {}", e)))?;

    if value.is_object() {
        Ok(value)
    } else {
        Err(AIError::parse("Generated JSON is not an object"))
    }
}

// ----- Gemini API Types -----

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiRequest {
    contents: Vec<GeminiContent>,
    generation_config: GeminiGenerationConfig,
}

#[derive(Debug, Serialize, Deserialize)]
struct GeminiContent {
    parts: Vec<GeminiPart>,
}

#[derive(Debug, Serialize, Deserialize)]
struct GeminiPart {
    text: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiGenerationConfig {
    response_mime_type: String,
    temperature: f32,
}

#[derive(Debug, Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
}

#[derive(Debug, Deserialize)]
struct GeminiCandidate {
    content: Option<GeminiResponseContent>,
}

#[derive(Debug, Deserialize)]
struct GeminiResponseContent {
    #[serde(default)]
    parts: Vec<GeminiResponsePart>,
}

#[derive(Debug, Deserialize)]
struct GeminiResponsePart {
    text: Option<String>,
}

// ----- OpenAI API Types -----

#[derive(Debug, Serialize)]
struct OpenAIRequest {
    model: String,
    messages: Vec<OpenAIMessage>,
    temperature: f32,
    response_format: ResponseFormat,
}

#[derive(Debug, Serialize)]
struct OpenAIMessage {
    role: String,
    content: String,
}

#[derive(Debug, Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    kind: String,
}

#[derive(Debug, Deserialize)]
struct OpenAIResponse {
    #[serde(default)]
    choices: Vec<OpenAIChoice>,
}

#[derive(Debug, Deserialize)]
struct OpenAIChoice {
    message: OpenAIResponseMessage,
}

#[derive(Debug, Deserialize)]
struct OpenAIResponseMessage {
    content: Option<String>,
}
