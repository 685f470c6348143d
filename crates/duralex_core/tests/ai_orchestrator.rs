use async_trait::async_trait;
use chrono::NaiveDate;
use duralex_core::model::modal::ERROR_CONTENT_PREFIX;
use duralex_core::{
    AiIntent, AiOrchestrator, AppState, GenerationError, GenerationRequest, GenerationResponse,
    ModalSource, SeedData, TextGenerationService,
};
use std::sync::Mutex;

/// Replies with a fixed result and records every request it sees.
struct ScriptedService {
    reply: Result<GenerationResponse, GenerationError>,
    seen: Mutex<Vec<GenerationRequest>>,
}

impl ScriptedService {
    fn answering(text: &str, sources: Vec<ModalSource>) -> Self {
        Self {
            reply: Ok(GenerationResponse {
                text: text.to_string(),
                sources,
            }),
            seen: Mutex::new(Vec::new()),
        }
    }

    fn failing(err: GenerationError) -> Self {
        Self {
            reply: Err(err),
            seen: Mutex::new(Vec::new()),
        }
    }

    fn requests(&self) -> Vec<GenerationRequest> {
        self.seen.lock().unwrap().clone()
    }
}

#[async_trait]
impl TextGenerationService for ScriptedService {
    async fn submit(
        &self,
        request: &GenerationRequest,
    ) -> Result<GenerationResponse, GenerationError> {
        self.seen.lock().unwrap().push(request.clone());
        self.reply.clone()
    }
}

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 19).unwrap()
}

fn seeded_state() -> AppState {
    AppState::from_seed(SeedData::sample(today()))
}

fn source(uri: &str, title: &str) -> ModalSource {
    ModalSource {
        uri: uri.to_string(),
        title: title.to_string(),
    }
}

#[tokio::test]
async fn start_opens_loading_modal_before_any_answer() {
    let orchestrator = AiOrchestrator::new(ScriptedService::answering("Focus on torts.", vec![]));
    let mut state = seeded_state();

    let pending = orchestrator.start(&mut state, &AiIntent::DailyFocus, today());

    let modal = state.modal();
    assert!(modal.is_open());
    assert!(modal.is_loading());
    assert_eq!(modal.title(), "✨ Daily Focus");
    assert_eq!(modal.content(), "");
    assert!(modal.sources().is_empty());
    assert!(pending.request().prompt.contains("Upcoming Events: Torts Midterm"));
    assert!(orchestrator.service().requests().is_empty());
}

#[tokio::test]
async fn success_fills_content_and_sources() {
    let sources = vec![
        source("https://law.example/marbury", "Marbury v. Madison"),
        source("https://law.example/marbury", "Marbury v. Madison"),
    ];
    let orchestrator = AiOrchestrator::new(ScriptedService::answering(
        "Established judicial review.",
        sources.clone(),
    ));
    let mut state = seeded_state();
    let intent = AiIntent::case_brief(state.case(1).unwrap());

    assert!(orchestrator.run(&mut state, &intent, today()).await);

    let modal = state.modal();
    assert!(modal.is_open());
    assert!(!modal.is_loading());
    assert_eq!(modal.title(), "✨ Case Brief: Marbury v. Madison");
    assert_eq!(modal.content(), "Established judicial review.");
    assert_eq!(modal.sources(), sources.as_slice());

    let requests = orchestrator.service().requests();
    assert_eq!(requests.len(), 1);
    assert!(requests[0].use_grounded_search);
    assert!(requests[0].prompt.contains("Marbury v. Madison, 5 U.S. 137 (1803)"));
}

#[tokio::test]
async fn failure_becomes_error_content() {
    let orchestrator = AiOrchestrator::new(ScriptedService::failing(
        GenerationError::Transport("connection refused".to_string()),
    ));
    let mut state = seeded_state();
    let intent = AiIntent::study_plan(state.event(1).unwrap());

    assert!(orchestrator.run(&mut state, &intent, today()).await);

    let modal = state.modal();
    assert!(modal.is_open());
    assert!(!modal.is_loading());
    assert_eq!(modal.title(), "✨ Study Plan: Torts Midterm");
    assert!(modal.content().starts_with(ERROR_CONTENT_PREFIX));
    assert!(modal.content().contains("connection refused"));
    assert!(modal.sources().is_empty());
}

#[tokio::test]
async fn older_request_cannot_overwrite_newer_one() {
    let orchestrator = AiOrchestrator::new(ScriptedService::answering("answer", vec![]));
    let mut state = seeded_state();

    let first = orchestrator.start(&mut state, &AiIntent::DailyFocus, today());
    let summary = AiIntent::note_summary(state.note(5).unwrap());
    let second = orchestrator.start(&mut state, &summary, today());
    assert_ne!(first.request_id(), second.request_id());

    let first_outcome = orchestrator.execute(first).await;
    let second_outcome = orchestrator.execute(second).await;

    assert!(!orchestrator.apply(&mut state, first_outcome));
    assert!(state.modal().is_loading());
    assert_eq!(state.modal().title(), "✨ Summary: Piercing the Corporate Veil");

    assert!(orchestrator.apply(&mut state, second_outcome));
    assert!(!state.modal().is_loading());
    assert_eq!(state.modal().content(), "answer");
}

#[tokio::test]
async fn late_result_after_close_is_dropped() {
    let orchestrator = AiOrchestrator::new(ScriptedService::answering("too late", vec![]));
    let mut state = seeded_state();

    let pending = orchestrator.start(&mut state, &AiIntent::DailyFocus, today());
    state.close_modal();
    let outcome = orchestrator.execute(pending).await;

    assert!(!orchestrator.apply(&mut state, outcome));
    let modal = state.modal();
    assert!(!modal.is_open());
    assert!(!modal.is_loading());
    assert_eq!(modal.content(), "");
}

#[tokio::test]
async fn outcome_applies_once() {
    let orchestrator = AiOrchestrator::new(ScriptedService::answering("once", vec![]));
    let mut state = seeded_state();

    let pending = orchestrator.start(&mut state, &AiIntent::DailyFocus, today());
    let outcome = orchestrator.execute(pending).await;
    assert!(orchestrator.apply(&mut state, outcome.clone()));
    assert!(!orchestrator.apply(&mut state, outcome));
    assert_eq!(state.modal().content(), "once");
}

#[tokio::test]
async fn pending_request_can_fail_without_reaching_the_service() {
    let orchestrator = AiOrchestrator::new(ScriptedService::answering("unused", vec![]));
    let mut state = seeded_state();

    let pending = orchestrator.start(&mut state, &AiIntent::DailyFocus, today());
    let outcome = pending.fail(GenerationError::Configuration(
        "invalid value `0` for DURALEX_GEMINI_TIMEOUT_SECS".to_string(),
    ));

    assert!(orchestrator.apply(&mut state, outcome));
    let modal = state.modal();
    assert!(modal.is_open());
    assert!(!modal.is_loading());
    assert!(modal.content().starts_with(ERROR_CONTENT_PREFIX));
    assert!(modal.content().contains("DURALEX_GEMINI_TIMEOUT_SECS"));
    assert!(orchestrator.service().requests().is_empty());
}
