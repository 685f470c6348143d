//! Core domain logic for the Duralex law-student dashboard.
//! Hosts (FFI bridge, CLI) render what this crate projects and forward user
//! actions back into it.

pub mod ai;
pub mod config;
pub mod logging;
pub mod model;
pub mod seed;
pub mod store;
pub mod view;

pub use ai::{
    AiIntent, AiOrchestrator, GeminiClient, GenerationError, GenerationOutcome,
    GenerationRequest, GenerationResponse, PendingGeneration, TextGenerationService,
    UnconfiguredService,
};
pub use config::{ConfigError, GeminiConfig};
pub use logging::{
    default_log_level, init_logging, init_logging_from_env, logging_status, LoggingError,
};
pub use model::case::{Case, CaseId};
pub use model::event::{Event, EventId, EventKind};
pub use model::modal::{ModalSource, ModalState, RequestId};
pub use model::note::{Attachment, AttachmentKind, Note, NoteId};
pub use model::subject::{AppView, Subject, ViewIcon, ViewSelector, APP_VIEWS};
pub use model::task::{Task, TaskId};
pub use seed::{load_seed_file, SeedData, SeedError};
pub use store::{ActionOutcome, AppAction, AppState, SearchState};
pub use view::{project, tasks_view, DashboardView, SubjectView, TasksView, ViewProjection};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
