//! AI modal surface and its request guard.
//!
//! # Responsibility
//! - Hold the single visible AI output surface (`ModalState`).
//! - Track which generation request currently owns that surface.
//!
//! # Invariants
//! - While `is_loading` is true, `content` and `sources` are empty.
//! - A closed modal has empty title/content/sources and is not loading.
//! - Only the most recently issued request may settle the modal; results
//!   for older or closed requests are dropped.
//! - Request ids are strictly increasing for the lifetime of an `AiModal`.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// First line of the modal content when a generation fails.
pub const ERROR_CONTENT_PREFIX: &str = "Error: Unable to fetch AI response.";

/// Web citation attached to a grounded answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModalSource {
    pub uri: String,
    pub title: String,
}

/// Visible state of the AI modal.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ModalState {
    is_open: bool,
    title: String,
    content: String,
    sources: Vec<ModalSource>,
    is_loading: bool,
}

impl ModalState {
    pub fn is_open(&self) -> bool {
        self.is_open
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn sources(&self) -> &[ModalSource] {
        &self.sources
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    /// Opens (or re-opens) the modal in its loading state.
    pub fn open_loading(&mut self, title: impl Into<String>) {
        *self = Self {
            is_open: true,
            title: title.into(),
            content: String::new(),
            sources: Vec::new(),
            is_loading: true,
        };
    }

    /// Shows a generated answer. The title is kept.
    pub fn resolve(&mut self, content: impl Into<String>, sources: Vec<ModalSource>) {
        self.is_loading = false;
        self.content = content.into();
        self.sources = sources;
    }

    /// Shows a failure using the same surface as a loaded answer.
    pub fn fail(&mut self, message: &str) {
        self.is_loading = false;
        self.content = format!("{ERROR_CONTENT_PREFIX}\n{message}");
        self.sources.clear();
    }

    /// Resets to the initial hidden state.
    pub fn close(&mut self) {
        *self = Self::default();
    }
}

/// Sequence number of one generation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct RequestId(u64);

impl Display for RequestId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Final outcome handed to [`AiModal::settle`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModalOutcome {
    Loaded {
        text: String,
        sources: Vec<ModalSource>,
    },
    Failed {
        message: String,
    },
}

/// Modal surface plus the id of the request that currently owns it.
#[derive(Debug, Clone, Default)]
pub struct AiModal {
    state: ModalState,
    active_request: Option<RequestId>,
    last_issued: u64,
}

impl AiModal {
    pub fn state(&self) -> &ModalState {
        &self.state
    }

    /// Id of the request whose result would currently be shown.
    pub fn active_request(&self) -> Option<RequestId> {
        self.active_request
    }

    /// Opens the modal in loading state and hands ownership to a new request.
    ///
    /// Any request still in flight loses ownership.
    pub fn begin(&mut self, title: impl Into<String>) -> RequestId {
        self.last_issued += 1;
        let request_id = RequestId(self.last_issued);
        self.state.open_loading(title);
        self.active_request = Some(request_id);
        request_id
    }

    /// Applies an outcome if `request_id` still owns the modal.
    ///
    /// Returns `false` when the outcome was discarded as stale.
    pub fn settle(&mut self, request_id: RequestId, outcome: ModalOutcome) -> bool {
        if self.active_request != Some(request_id) {
            return false;
        }
        match outcome {
            ModalOutcome::Loaded { text, sources } => self.state.resolve(text, sources),
            ModalOutcome::Failed { message } => self.state.fail(&message),
        }
        self.active_request = None;
        true
    }

    /// Hides the modal; a request still in flight can no longer settle it.
    pub fn close(&mut self) {
        self.state.close();
        self.active_request = None;
    }
}
