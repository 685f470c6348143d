//! AI request orchestration.
//!
//! # Responsibility
//! - Turn an `AiIntent` into one generation round trip.
//! - Drive the modal through Loading -> (Loaded | Errored).
//!
//! # Invariants
//! - `start` is synchronous: the modal is open and loading before any await.
//! - No state borrow is held while the service call is awaited.
//! - Failures never escape; they become modal content.
//! - Only the latest started request may write its result (last requested
//!   wins); stale results are dropped.
//! - One `submit` per intent: no retry, cache or dedup.

use crate::ai::intent::AiIntent;
use crate::ai::service::{
    GenerationError, GenerationRequest, GenerationResponse, TextGenerationService,
};
use crate::model::modal::{ModalOutcome, RequestId};
use crate::store::AppState;
use chrono::NaiveDate;
use log::{debug, error, info};
use std::time::Instant;

/// Request issued by [`AiOrchestrator::start`], not yet sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingGeneration {
    request_id: RequestId,
    intent_kind: &'static str,
    request: GenerationRequest,
}

impl PendingGeneration {
    pub fn request_id(&self) -> RequestId {
        self.request_id
    }

    pub fn request(&self) -> &GenerationRequest {
        &self.request
    }

    /// Settles this request with `error` without contacting the service.
    pub fn fail(self, error: GenerationError) -> GenerationOutcome {
        GenerationOutcome {
            request_id: self.request_id,
            intent_kind: self.intent_kind,
            result: Err(error),
        }
    }
}

/// Result of one round trip, waiting to be applied to state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationOutcome {
    pub request_id: RequestId,
    pub intent_kind: &'static str,
    pub result: Result<GenerationResponse, GenerationError>,
}

/// Orchestrator over one text-generation service.
pub struct AiOrchestrator<S: TextGenerationService> {
    service: S,
}

impl<S: TextGenerationService> AiOrchestrator<S> {
    pub fn new(service: S) -> Self {
        Self { service }
    }

    pub fn service(&self) -> &S {
        &self.service
    }

    /// Opens the modal in loading state and prepares the request.
    ///
    /// Any request already in flight loses ownership of the modal.
    pub fn start(
        &self,
        state: &mut AppState,
        intent: &AiIntent,
        today: NaiveDate,
    ) -> PendingGeneration {
        let request = intent.build_request(state, today);
        let superseded = state.ai_modal().active_request();
        let request_id = state.ai_modal_mut().begin(intent.modal_title());

        info!(
            "event=ai_request module=ai status=start intent={} request_id={} grounded={} prompt_len={}",
            intent.kind(),
            request_id,
            request.use_grounded_search,
            request.prompt.chars().count()
        );
        if let Some(previous) = superseded {
            debug!(
                "event=ai_request module=ai status=superseded request_id={} by_request_id={}",
                previous, request_id
            );
        }

        PendingGeneration {
            request_id,
            intent_kind: intent.kind(),
            request,
        }
    }

    /// Performs the single service round trip for `pending`.
    pub async fn execute(&self, pending: PendingGeneration) -> GenerationOutcome {
        let started_at = Instant::now();
        let result = self.service.submit(&pending.request).await;
        match &result {
            Ok(response) => info!(
                "event=ai_request module=ai status=ok intent={} request_id={} duration_ms={} text_len={} source_count={}",
                pending.intent_kind,
                pending.request_id,
                started_at.elapsed().as_millis(),
                response.text.chars().count(),
                response.sources.len()
            ),
            Err(err) => error!(
                "event=ai_request module=ai status=error intent={} request_id={} duration_ms={} error={}",
                pending.intent_kind,
                pending.request_id,
                started_at.elapsed().as_millis(),
                err
            ),
        }

        GenerationOutcome {
            request_id: pending.request_id,
            intent_kind: pending.intent_kind,
            result,
        }
    }

    /// Writes `outcome` into the modal if its request still owns it.
    ///
    /// Returns `false` when the outcome was stale and dropped.
    pub fn apply(&self, state: &mut AppState, outcome: GenerationOutcome) -> bool {
        let request_id = outcome.request_id;
        let modal_outcome = match outcome.result {
            Ok(response) => ModalOutcome::Loaded {
                text: response.text,
                sources: response.sources,
            },
            Err(err) => ModalOutcome::Failed {
                message: err.to_string(),
            },
        };

        let applied = state.ai_modal_mut().settle(request_id, modal_outcome);
        if !applied {
            info!(
                "event=ai_request module=ai status=discarded intent={} request_id={} active_request_id={}",
                outcome.intent_kind,
                request_id,
                state
                    .ai_modal()
                    .active_request()
                    .map(|id| id.to_string())
                    .unwrap_or_else(|| "none".to_string())
            );
        }
        applied
    }

    /// Runs one intent end to end against `state`.
    ///
    /// Holds `state` for the whole call; hosts that must keep handling input
    /// while waiting use `start`, `execute` and `apply` separately.
    pub async fn run(&self, state: &mut AppState, intent: &AiIntent, today: NaiveDate) -> bool {
        let pending = self.start(state, intent, today);
        let outcome = self.execute(pending).await;
        self.apply(state, outcome)
    }
}
