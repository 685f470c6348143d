//! Text-generation service boundary.
//!
//! # Responsibility
//! - Define the single `submit` operation the orchestrator depends on.
//! - Define the one error kind the orchestrator has to handle.
//!
//! # Invariants
//! - `sources` is only populated for grounded requests, and every source has
//!   a non-empty uri and title.

use crate::model::modal::ModalSource;
use async_trait::async_trait;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::Arc;

/// One prompt submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    pub prompt: String,
    /// Empty means no system instruction is sent.
    pub system_instruction: String,
    /// Enables web-grounded answers that may carry citation sources.
    pub use_grounded_search: bool,
}

/// Generated answer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerationResponse {
    pub text: String,
    pub sources: Vec<ModalSource>,
}

/// Any failure of a generation round trip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerationError {
    /// No credentials are configured for the backend.
    MissingApiKey,
    /// Backend settings could not be resolved.
    Configuration(String),
    /// Network or client-side failure before a response arrived.
    Transport(String),
    /// Backend answered with a non-success status.
    Status { code: u16, body: String },
    /// Backend answered with a body that could not be decoded.
    MalformedResponse(String),
    /// Backend answered successfully but without any text.
    EmptyResponse,
}

impl Display for GenerationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingApiKey => write!(
                f,
                "no API key configured for the text-generation service; check your API key"
            ),
            Self::Configuration(message) => write!(
                f,
                "text-generation service is not configured: {message}"
            ),
            Self::Transport(message) => write!(
                f,
                "failed to reach the text-generation service; check your connection ({message})"
            ),
            Self::Status { code, body } => {
                write!(f, "text-generation service returned HTTP {code}: {body}")
            }
            Self::MalformedResponse(message) => write!(
                f,
                "text-generation service returned an unreadable response: {message}"
            ),
            Self::EmptyResponse => write!(f, "text-generation service returned no text"),
        }
    }
}

impl Error for GenerationError {}

/// Opaque asynchronous text generator.
#[async_trait]
pub trait TextGenerationService: Send + Sync {
    async fn submit(&self, request: &GenerationRequest)
        -> Result<GenerationResponse, GenerationError>;
}

#[async_trait]
impl<T: TextGenerationService + ?Sized> TextGenerationService for Arc<T> {
    async fn submit(
        &self,
        request: &GenerationRequest,
    ) -> Result<GenerationResponse, GenerationError> {
        (**self).submit(request).await
    }
}

/// Stand-in for a backend whose settings failed to resolve.
///
/// Every submission fails with [`GenerationError::Configuration`], so the
/// failure reaches the user through the modal like any other error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnconfiguredService {
    reason: String,
}

impl UnconfiguredService {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

#[async_trait]
impl TextGenerationService for UnconfiguredService {
    async fn submit(
        &self,
        _request: &GenerationRequest,
    ) -> Result<GenerationResponse, GenerationError> {
        Err(GenerationError::Configuration(self.reason.clone()))
    }
}

/// Keeps only citations that carry both a uri and a title, in input order.
///
/// Duplicates are kept.
pub fn complete_sources<I>(candidates: I) -> Vec<ModalSource>
where
    I: IntoIterator<Item = (Option<String>, Option<String>)>,
{
    candidates
        .into_iter()
        .filter_map(|(uri, title)| match (uri, title) {
            (Some(uri), Some(title)) if !uri.is_empty() && !title.is_empty() => {
                Some(ModalSource { uri, title })
            }
            _ => None,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{
        complete_sources, GenerationError, GenerationRequest, TextGenerationService,
        UnconfiguredService,
    };

    #[test]
    fn complete_sources_drops_partial_entries_and_keeps_duplicates() {
        let sources = complete_sources(vec![
            (Some("https://a".to_string()), Some("A".to_string())),
            (None, Some("missing uri".to_string())),
            (Some("https://b".to_string()), Some(String::new())),
            (Some("https://a".to_string()), Some("A".to_string())),
        ]);
        assert_eq!(sources.len(), 2);
        assert_eq!(sources[0], sources[1]);
        assert_eq!(sources[0].uri, "https://a");
    }

    #[tokio::test]
    async fn unconfigured_service_reports_reason() {
        let service = UnconfiguredService::new("timeout must be greater than zero");
        let request = GenerationRequest {
            prompt: "focus".to_string(),
            system_instruction: String::new(),
            use_grounded_search: false,
        };
        let err = service.submit(&request).await.unwrap_err();
        assert_eq!(
            err,
            GenerationError::Configuration("timeout must be greater than zero".to_string())
        );
        assert!(err.to_string().contains("not configured"));
    }
}
