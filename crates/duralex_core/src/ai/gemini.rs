//! Gemini `generateContent` adapter.
//!
//! # Responsibility
//! - Map a `GenerationRequest` onto one HTTP POST.
//! - Map the response body onto text plus grounding sources.
//!
//! # Invariants
//! - Exactly one request per `submit`; no retry.
//! - The API key travels in a header, never in the URL or logs.
//! - Non-success bodies are truncated before they reach error text.

use crate::ai::service::{
    complete_sources, GenerationError, GenerationRequest, GenerationResponse,
    TextGenerationService,
};
use crate::config::GeminiConfig;
use async_trait::async_trait;
use log::{error, info};
use serde::{Deserialize, Serialize};
use std::time::Instant;

const API_KEY_HEADER: &str = "x-goog-api-key";
const ERROR_BODY_LIMIT: usize = 512;

/// HTTP client for the Gemini API.
pub struct GeminiClient {
    http: reqwest::Client,
    config: GeminiConfig,
}

impl GeminiClient {
    /// Builds a client with the configured timeout.
    pub fn new(config: GeminiConfig) -> Result<Self, GenerationError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|err| GenerationError::Transport(err.to_string()))?;
        Ok(Self { http, config })
    }

    pub fn config(&self) -> &GeminiConfig {
        &self.config
    }

    fn url(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.config.endpoint, self.config.model
        )
    }
}

#[async_trait]
impl TextGenerationService for GeminiClient {
    async fn submit(
        &self,
        request: &GenerationRequest,
    ) -> Result<GenerationResponse, GenerationError> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .ok_or(GenerationError::MissingApiKey)?;

        let started_at = Instant::now();
        let result = send(&self.http, &self.url(), api_key, request).await;
        match &result {
            Ok(response) => info!(
                "event=gemini_request module=ai status=ok model={} grounded={} prompt_len={} source_count={} duration_ms={}",
                self.config.model,
                request.use_grounded_search,
                request.prompt.chars().count(),
                response.sources.len(),
                started_at.elapsed().as_millis()
            ),
            Err(err) => error!(
                "event=gemini_request module=ai status=error model={} grounded={} prompt_len={} duration_ms={} error={}",
                self.config.model,
                request.use_grounded_search,
                request.prompt.chars().count(),
                started_at.elapsed().as_millis(),
                err
            ),
        }
        result
    }
}

async fn send(
    http: &reqwest::Client,
    url: &str,
    api_key: &str,
    request: &GenerationRequest,
) -> Result<GenerationResponse, GenerationError> {
    let response = http
        .post(url)
        .header(API_KEY_HEADER, api_key)
        .json(&GenerateContentRequest::from_request(request))
        .send()
        .await
        .map_err(|err| GenerationError::Transport(err.to_string()))?;

    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|err| GenerationError::Transport(err.to_string()))?;

    if !status.is_success() {
        return Err(GenerationError::Status {
            code: status.as_u16(),
            body: truncate(&body, ERROR_BODY_LIMIT),
        });
    }

    parse_generate_response(&body)
}

/// Decodes a `generateContent` success body.
///
/// Text parts of the first candidate are concatenated; grounding chunks
/// become sources when both uri and title are present.
pub fn parse_generate_response(body: &str) -> Result<GenerationResponse, GenerationError> {
    let decoded: GenerateContentResponse = serde_json::from_str(body)
        .map_err(|err| GenerationError::MalformedResponse(err.to_string()))?;

    let Some(candidate) = decoded.candidates.into_iter().next() else {
        return Err(GenerationError::EmptyResponse);
    };

    let text = candidate
        .content
        .map(|content| {
            content
                .parts
                .into_iter()
                .filter_map(|part| part.text)
                .collect::<String>()
        })
        .unwrap_or_default();
    if text.trim().is_empty() {
        return Err(GenerationError::EmptyResponse);
    }

    let sources = complete_sources(
        candidate
            .grounding_metadata
            .map(|metadata| metadata.grounding_chunks)
            .unwrap_or_default()
            .into_iter()
            .filter_map(|chunk| chunk.web)
            .map(|web| (web.uri, web.title)),
    );

    Ok(GenerationResponse { text, sources })
}

fn truncate(body: &str, limit: usize) -> String {
    if body.chars().count() <= limit {
        return body.to_string();
    }
    let mut cut = body.chars().take(limit).collect::<String>();
    cut.push_str("...");
    cut
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<Content<'a>>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    tools: Vec<Tool>,
}

impl<'a> GenerateContentRequest<'a> {
    fn from_request(request: &'a GenerationRequest) -> Self {
        let system_instruction = (!request.system_instruction.is_empty()).then(|| Content {
            role: None,
            parts: vec![Part {
                text: &request.system_instruction,
            }],
        });
        let tools = if request.use_grounded_search {
            vec![Tool {
                google_search: GoogleSearch {},
            }]
        } else {
            Vec::new()
        };
        Self {
            contents: vec![Content {
                role: Some("user"),
                parts: vec![Part {
                    text: &request.prompt,
                }],
            }],
            system_instruction,
            tools,
        }
    }
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<&'static str>,
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Tool {
    google_search: GoogleSearch,
}

#[derive(Debug, Serialize)]
struct GoogleSearch {}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<CandidateContent>,
    grounding_metadata: Option<GroundingMetadata>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GroundingMetadata {
    #[serde(default)]
    grounding_chunks: Vec<GroundingChunk>,
}

#[derive(Debug, Deserialize)]
struct GroundingChunk {
    web: Option<WebSource>,
}

#[derive(Debug, Deserialize)]
struct WebSource {
    uri: Option<String>,
    title: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::{parse_generate_response, truncate, GenerateContentRequest, GeminiClient};
    use crate::ai::service::{GenerationError, GenerationRequest, TextGenerationService};
    use crate::config::GeminiConfig;
    use mockito::{Matcher, Server};
    use serde_json::{json, Value};
    use std::time::Duration;

    fn client_for(endpoint: &str) -> GeminiClient {
        GeminiClient::new(GeminiConfig {
            api_key: Some("test-key".to_string()),
            model: "gemini-test".to_string(),
            endpoint: endpoint.to_string(),
            timeout: Duration::from_secs(5),
        })
        .unwrap()
    }

    fn request(grounded: bool, system: &str) -> GenerationRequest {
        GenerationRequest {
            prompt: "Summarize Marbury v. Madison".to_string(),
            system_instruction: system.to_string(),
            use_grounded_search: grounded,
        }
    }

    #[test]
    fn request_body_carries_search_tool_only_when_grounded() {
        let grounded = request(true, "Be brief.");
        let body = serde_json::to_value(GenerateContentRequest::from_request(&grounded)).unwrap();
        assert_eq!(
            body,
            json!({
                "contents": [{ "role": "user", "parts": [{ "text": "Summarize Marbury v. Madison" }] }],
                "systemInstruction": { "parts": [{ "text": "Be brief." }] },
                "tools": [{ "googleSearch": {} }]
            })
        );

        let plain = request(false, "");
        let body: Value =
            serde_json::to_value(GenerateContentRequest::from_request(&plain)).unwrap();
        assert!(body.get("tools").is_none());
        assert!(body.get("systemInstruction").is_none());
    }

    #[test]
    fn parse_joins_text_parts_and_keeps_complete_sources() {
        let body = json!({
            "candidates": [{
                "content": { "parts": [{ "text": "Judicial " }, { "text": "review." }] },
                "groundingMetadata": {
                    "groundingChunks": [
                        { "web": { "uri": "https://a.example", "title": "A" } },
                        { "web": { "uri": "https://b.example" } },
                        { "retrievedContext": {} },
                        { "web": { "uri": "https://a.example", "title": "A" } }
                    ]
                }
            }]
        })
        .to_string();

        let response = parse_generate_response(&body).unwrap();
        assert_eq!(response.text, "Judicial review.");
        assert_eq!(response.sources.len(), 2);
        assert_eq!(response.sources[0].title, "A");
    }

    #[test]
    fn parse_reports_empty_and_malformed_bodies() {
        assert_eq!(
            parse_generate_response(r#"{"candidates":[]}"#),
            Err(GenerationError::EmptyResponse)
        );
        assert_eq!(
            parse_generate_response(r#"{"candidates":[{"content":{"parts":[{"text":"  "}]}}]}"#),
            Err(GenerationError::EmptyResponse)
        );
        assert!(matches!(
            parse_generate_response("not json"),
            Err(GenerationError::MalformedResponse(_))
        ));
    }

    #[test]
    fn truncate_marks_cut_bodies() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("abcdefghij", 4), "abcd...");
    }

    #[tokio::test]
    async fn missing_key_fails_without_network() {
        let client = GeminiClient::new(GeminiConfig::default()).unwrap();
        let result = client.submit(&request(false, "")).await;
        assert_eq!(result, Err(GenerationError::MissingApiKey));
    }

    #[tokio::test]
    async fn grounded_request_posts_to_model_and_returns_sources() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/models/gemini-test:generateContent")
            .match_header("x-goog-api-key", "test-key")
            .match_body(Matcher::PartialJson(json!({
                "contents": [{ "parts": [{ "text": "Summarize Marbury v. Madison" }] }],
                "tools": [{ "googleSearch": {} }]
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                json!({
                    "candidates": [{
                        "content": { "parts": [{ "text": "Judicial review." }] },
                        "groundingMetadata": {
                            "groundingChunks": [
                                { "web": { "uri": "https://oyez.example", "title": "Oyez" } }
                            ]
                        }
                    }]
                })
                .to_string(),
            )
            .create_async()
            .await;

        let response = client_for(&server.url())
            .submit(&request(true, "Be brief."))
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(response.text, "Judicial review.");
        assert_eq!(response.sources.len(), 1);
        assert_eq!(response.sources[0].uri, "https://oyez.example");
        assert_eq!(response.sources[0].title, "Oyez");
    }

    #[tokio::test]
    async fn rate_limit_maps_to_status_with_truncated_body() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/models/gemini-test:generateContent")
            .match_header("x-goog-api-key", "test-key")
            .with_status(429)
            .with_body("q".repeat(600))
            .create_async()
            .await;

        let result = client_for(&server.url()).submit(&request(false, "")).await;

        mock.assert_async().await;
        match result {
            Err(GenerationError::Status { code, body }) => {
                assert_eq!(code, 429);
                assert!(body.ends_with("..."));
                assert_eq!(body.chars().count(), 515);
            }
            other => panic!("expected status error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn unreachable_endpoint_is_a_transport_error() {
        let result = client_for("http://127.0.0.1:1").submit(&request(false, "")).await;
        assert!(matches!(result, Err(GenerationError::Transport(_))));
    }
}
