//! GeminiClient - Direct REST API implementation of [`ModelClient`].
//!
//! Calls the Gemini `generateContent` endpoint without any SDK dependency.
//! Configuration comes from the environment or secret.json.

use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64_STANDARD;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use vidya_core::model::{GenerateRequest, ModelClient};
use vidya_core::ModelError;

use crate::config;

/// Model used for every stage of the lesson pipeline.
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.5-flash";
const BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// Client that talks to the Gemini HTTP API.
#[derive(Clone)]
pub struct GeminiClient {
    client: Client,
    api_key: String,
    model: String,
}

impl GeminiClient {
    /// Creates a new client with the provided API key and model.
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            model: model.into(),
        }
    }

    /// Loads configuration from the `GEMINI_API_KEY` environment variable,
    /// falling back to secret.json.
    ///
    /// Model name defaults to `gemini-2.5-flash` if not specified.
    pub fn try_from_env() -> Result<Self, String> {
        if let Ok(api_key) = std::env::var("GEMINI_API_KEY") {
            return Ok(Self::new(api_key, DEFAULT_GEMINI_MODEL));
        }

        let secret_config = config::load_secret_config()?;
        let gemini_config = secret_config
            .gemini
            .ok_or_else(|| "Gemini configuration not found in secret.json".to_string())?;
        let model = gemini_config
            .model_name
            .unwrap_or_else(|| DEFAULT_GEMINI_MODEL.to_string());

        Ok(Self::new(gemini_config.api_key, model))
    }

    /// Overrides the model after construction.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    async fn send_request(&self, body: &GenerateContentRequest) -> Result<String, ModelError> {
        let url = format!(
            "{}/{model}:generateContent?key={api_key}",
            BASE_URL,
            model = self.model,
            api_key = self.api_key
        );

        let response = self
            .client
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(|err| ModelError::transport(format!("Gemini API request failed: {err}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let body_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read Gemini error body".to_string());
            return Err(map_http_error(status, body_text));
        }

        let parsed: GenerateContentResponse = response.json().await.map_err(|err| {
            ModelError::transport(format!("Failed to decode Gemini response: {err}"))
        })?;

        extract_text_response(parsed)
    }
}

#[async_trait]
impl ModelClient for GeminiClient {
    async fn generate(&self, request: GenerateRequest) -> Result<String, ModelError> {
        let body = build_request_body(&request)?;
        tracing::debug!(
            model = %self.model,
            turns = body.contents.len(),
            structured = body.generation_config.is_some(),
            "sending generateContent request"
        );
        self.send_request(&body).await
    }
}

fn build_request_body(request: &GenerateRequest) -> Result<GenerateContentRequest, ModelError> {
    let mut contents: Vec<Content> = request
        .history
        .iter()
        .map(|turn| Content {
            role: turn.role.as_str().to_string(),
            parts: vec![Part::Text {
                text: turn.text.clone(),
            }],
        })
        .collect();

    let mut parts = Vec::new();
    if !request.prompt.trim().is_empty() {
        parts.push(Part::Text {
            text: request.prompt.clone(),
        });
    }
    if let Some(attachment) = &request.attachment {
        parts.push(Part::InlineData {
            inline_data: InlineDataPayload {
                mime_type: attachment.mime_type.clone(),
                data: BASE64_STANDARD.encode(&attachment.bytes),
            },
        });
    }
    if parts.is_empty() {
        return Err(ModelError::transport(
            "Gemini request must include prompt text or an attachment",
        ));
    }
    contents.push(Content {
        role: "user".to_string(),
        parts,
    });

    let system_instruction = request.system_instruction.as_ref().map(|text| Content {
        role: "system".to_string(),
        parts: vec![Part::Text {
            text: text.to_string(),
        }],
    });

    let generation_config = request
        .response_schema
        .as_ref()
        .map(|schema| GenerationConfig {
            response_mime_type: "application/json".to_string(),
            response_schema: schema.clone(),
        });

    Ok(GenerateContentRequest {
        contents,
        system_instruction,
        generation_config,
    })
}

#[derive(Debug, Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
    #[serde(rename = "systemInstruction", skip_serializing_if = "Option::is_none")]
    system_instruction: Option<Content>,
    #[serde(rename = "generationConfig", skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

#[derive(Debug, Serialize)]
struct Content {
    role: String,
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum Part {
    Text {
        text: String,
    },
    InlineData {
        #[serde(rename = "inlineData")]
        inline_data: InlineDataPayload,
    },
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct InlineDataPayload {
    mime_type: String,
    data: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_mime_type: String,
    response_schema: serde_json::Value,
}

#[derive(Deserialize)]
struct GenerateContentResponse {
    candidates: Option<Vec<Candidate>>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<ContentResponse>,
}

#[derive(Deserialize)]
struct ContentResponse {
    parts: Vec<PartResponse>,
}

#[derive(Deserialize)]
struct PartResponse {
    text: Option<String>,
}

#[derive(Deserialize)]
struct ErrorWrapper {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    #[allow(dead_code)]
    code: Option<i32>,
    message: Option<String>,
    status: Option<String>,
}

fn extract_text_response(response: GenerateContentResponse) -> Result<String, ModelError> {
    response
        .candidates
        .and_then(|mut candidates| candidates.pop())
        .and_then(|candidate| candidate.content)
        .and_then(|content| content.parts.into_iter().find_map(|part| part.text))
        .filter(|text| !text.trim().is_empty())
        .ok_or(ModelError::EmptyResponse)
}

fn map_http_error(status: StatusCode, body: String) -> ModelError {
    let message = serde_json::from_str::<ErrorWrapper>(&body)
        .map(|wrapper| {
            let status_text = wrapper.error.status.unwrap_or_default();
            let msg = wrapper.error.message.unwrap_or_else(|| body.clone());
            if status_text.is_empty() {
                msg
            } else {
                format!("{status_text}: {msg}")
            }
        })
        .unwrap_or_else(|_| body.clone());

    ModelError::transport_with_status(status.as_u16(), message)
}

#[cfg(test)]
mod tests {
    use super::*;
    use vidya_core::model::{ChatTurn, MediaAttachment};

    fn response_from(json: &str) -> GenerateContentResponse {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_build_body_with_history_and_schema() {
        let request = GenerateRequest::new("current question")
            .with_history(vec![ChatTurn::user("hi"), ChatTurn::model("hello")])
            .with_response_schema(serde_json::json!({"type": "STRING"}));

        let body = build_request_body(&request).unwrap();
        assert_eq!(body.contents.len(), 3);
        assert_eq!(body.contents[0].role, "user");
        assert_eq!(body.contents[1].role, "model");
        assert_eq!(body.contents[2].role, "user");

        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(
            json["generationConfig"]["responseMimeType"],
            "application/json"
        );
        assert_eq!(json["generationConfig"]["responseSchema"]["type"], "STRING");
    }

    #[test]
    fn test_build_body_encodes_attachment_inline() {
        let request = GenerateRequest::new("transcribe this")
            .with_attachment(MediaAttachment::new(vec![1, 2, 3], "video/mp4"));

        let body = build_request_body(&request).unwrap();
        let json = serde_json::to_value(&body).unwrap();
        let parts = &json["contents"][0]["parts"];
        assert_eq!(parts[0]["text"], "transcribe this");
        assert_eq!(parts[1]["inlineData"]["mimeType"], "video/mp4");
        assert_eq!(
            parts[1]["inlineData"]["data"],
            BASE64_STANDARD.encode([1u8, 2, 3])
        );
    }

    #[test]
    fn test_build_body_rejects_empty_payload() {
        let err = build_request_body(&GenerateRequest::new("   ")).unwrap_err();
        assert!(err.is_transport());
    }

    #[test]
    fn test_system_instruction_serialized_when_present() {
        let request = GenerateRequest::new("q").with_system_instruction("be a tutor");
        let body = build_request_body(&request).unwrap();
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["systemInstruction"]["parts"][0]["text"], "be a tutor");
    }

    #[test]
    fn test_extract_text_from_candidates() {
        let response = response_from(
            r#"{"candidates": [{"content": {"parts": [{"text": "generated text"}]}}]}"#,
        );
        assert_eq!(extract_text_response(response).unwrap(), "generated text");
    }

    #[test]
    fn test_missing_candidates_is_empty_response() {
        let response = response_from(r#"{"candidates": []}"#);
        assert_eq!(
            extract_text_response(response).unwrap_err(),
            ModelError::EmptyResponse
        );

        let blank = response_from(r#"{"candidates": [{"content": {"parts": [{"text": "  "}]}}]}"#);
        assert_eq!(
            extract_text_response(blank).unwrap_err(),
            ModelError::EmptyResponse
        );
    }

    #[test]
    fn test_map_http_error_parses_error_body() {
        let body = r#"{"error": {"code": 429, "message": "quota exceeded", "status": "RESOURCE_EXHAUSTED"}}"#;
        let err = map_http_error(StatusCode::TOO_MANY_REQUESTS, body.to_string());
        match err {
            ModelError::Transport {
                status_code,
                message,
            } => {
                assert_eq!(status_code, Some(429));
                assert!(message.contains("RESOURCE_EXHAUSTED"));
                assert!(message.contains("quota exceeded"));
            }
            other => panic!("expected transport error, got {other:?}"),
        }
    }

    #[test]
    fn test_map_http_error_with_unparseable_body() {
        let err = map_http_error(StatusCode::INTERNAL_SERVER_ERROR, "<html>oops</html>".into());
        match err {
            ModelError::Transport { message, .. } => assert!(message.contains("oops")),
            other => panic!("expected transport error, got {other:?}"),
        }
    }
}
