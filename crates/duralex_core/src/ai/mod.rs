//! AI assistant layer.
//!
//! # Responsibility
//! - Build prompts for the four assistant intents.
//! - Drive the AI modal through one generation round trip per intent.
//! - Provide the Gemini HTTP adapter behind `TextGenerationService`.
//!
//! # See also
//! - `model::modal` for the modal state machine.

pub mod gemini;
pub mod intent;
pub mod orchestrator;
pub mod prompts;
pub mod service;

pub use gemini::GeminiClient;
pub use intent::AiIntent;
pub use orchestrator::{AiOrchestrator, GenerationOutcome, PendingGeneration};
pub use service::{
    GenerationError, GenerationRequest, GenerationResponse, TextGenerationService,
    UnconfiguredService,
};
