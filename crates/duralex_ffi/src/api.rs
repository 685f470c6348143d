//! FFI use-case API for Flutter-facing calls.
//!
//! # Responsibility
//! - Expose dashboard use cases to Dart via FRB over one process-wide session.
//! - Convert borrowed core projections into owned, FFI-friendly snapshots.
//!
//! # Invariants
//! - Exported functions must not panic across FFI boundary.
//! - The session lock is never held while an AI request is awaited.
//! - The session is seeded with sample data on first use, dated from the
//!   local calendar day.

use chrono::{Local, NaiveDate};
use duralex_core::model::subject::app_view_for;
use duralex_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, ping as ping_inner,
    project, tasks_view, AiIntent, AiOrchestrator, AppState, Attachment, Case, Event,
    GeminiClient, GeminiConfig, GenerationError, GenerationOutcome, ModalState, Note,
    PendingGeneration, SeedData, Task, TextGenerationService, UnconfiguredService,
    ViewProjection, ViewSelector, APP_VIEWS,
};
use log::{info, warn};
use std::sync::{Mutex, MutexGuard, OnceLock};
use tokio::runtime::Runtime;
use uuid::Uuid;

const EVENT_DATE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

static SESSION: OnceLock<Mutex<AppState>> = OnceLock::new();
static AI_RUNTIME: OnceLock<Runtime> = OnceLock::new();
static AI_ORCHESTRATOR: OnceLock<AiOrchestrator<GeminiClient>> = OnceLock::new();

/// Minimal health-check API for FRB smoke integration.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Input semantics:
/// - `level`: one of `trace|debug|info|warn|error` (case-insensitive).
/// - `log_dir`: absolute directory path where rolling logs are written.
///
/// # FFI contract
/// - Sync call; may perform small file-system setup work.
/// - Safe to call repeatedly with the same `level + log_dir` (idempotent).
/// - Never panics; returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err.to_string(),
    }
}

/// Navigation entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewItem {
    /// `Dashboard` or a subject display name; pass back to `set_view`.
    pub name: String,
    /// Icon tag such as `layout_dashboard`.
    pub icon: String,
    pub is_active: bool,
}

/// Note card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteItem {
    pub id: u64,
    pub title: String,
    pub subject: String,
    /// First attachments, at most three.
    pub attachments: Vec<AttachmentItem>,
    pub has_more_attachments: bool,
}

/// File chip on a note card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttachmentItem {
    pub name: String,
    /// `pdf`, `doc` or `img`; selects the icon.
    pub kind: String,
}

/// Case card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaseItem {
    pub id: u64,
    pub case_name: String,
    pub citation: String,
    pub subject: String,
}

/// Calendar row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventItem {
    pub id: u64,
    pub title: String,
    pub kind: String,
    /// Local wall-clock time, `YYYY-MM-DDTHH:MM:SS`.
    pub date: String,
    pub subject: Option<String>,
    pub supports_study_plan: bool,
}

/// Everything the active page renders.
///
/// On the dashboard `notes`/`cases` hold the three most recent items; on a
/// subject page they hold every matching item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardSnapshot {
    pub view_name: String,
    pub view_icon: String,
    pub is_dashboard: bool,
    pub total_notes: u32,
    pub total_cases: u32,
    pub upcoming_exam_count: u32,
    pub notes: Vec<NoteItem>,
    pub cases: Vec<CaseItem>,
    pub upcoming_events: Vec<EventItem>,
    pub notes_empty_text: String,
    pub cases_empty_text: String,
    pub events_empty_text: String,
}

/// Task row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskItem {
    /// UUID string; pass back to `toggle_task`.
    pub id: String,
    pub title: String,
    pub description: String,
    pub is_completed: bool,
}

/// Task list in creation order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TasksSnapshot {
    pub tasks: Vec<TaskItem>,
    pub pending: u32,
}

/// Citation link under an AI answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceItem {
    pub uri: String,
    pub title: String,
}

/// AI modal surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModalSnapshot {
    pub is_open: bool,
    pub title: String,
    pub content: String,
    pub is_loading: bool,
    pub sources: Vec<SourceItem>,
}

/// Generic action response envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionResponse {
    pub ok: bool,
    /// Affected task id for task actions.
    pub task_id: Option<String>,
    /// Human-readable response message for diagnostics/UI.
    pub message: String,
}

impl ActionResponse {
    fn success(message: impl Into<String>, task_id: Option<String>) -> Self {
        Self {
            ok: true,
            task_id,
            message: message.into(),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            task_id: None,
            message: message.into(),
        }
    }
}

/// AI action response: the final modal, or why no request was issued.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AiResponse {
    /// False only when the target record is unknown or ineligible. Backend
    /// and setup failures still show up as modal content with `ok = true`.
    pub ok: bool,
    pub message: String,
    pub modal: ModalSnapshot,
}

/// Lists navigation entries with the active one flagged.
#[flutter_rust_bridge::frb(sync)]
pub fn list_views() -> Vec<ViewItem> {
    with_session(|state| {
        let current = state.current_view();
        APP_VIEWS
            .iter()
            .map(|view| ViewItem {
                name: view.selector.as_str().to_string(),
                icon: view.icon.as_str().to_string(),
                is_active: view.selector == current,
            })
            .collect()
    })
}

/// Switches the active page by display name.
///
/// # FFI contract
/// - Unknown names are rejected and leave the current view unchanged.
#[flutter_rust_bridge::frb(sync)]
pub fn set_view(name: String) -> ActionResponse {
    match ViewSelector::parse(&name) {
        Ok(selector) => {
            with_session(|state| state.set_view(selector));
            ActionResponse::success(format!("Switched to {selector}."), None)
        }
        Err(err) => ActionResponse::failure(format!("set_view failed: {err}")),
    }
}

#[flutter_rust_bridge::frb(sync)]
pub fn set_note_query(query: String) {
    with_session(|state| state.set_note_query(query));
}

#[flutter_rust_bridge::frb(sync)]
pub fn set_case_query(query: String) {
    with_session(|state| state.set_case_query(query));
}

/// Projects the active page for the local calendar day.
#[flutter_rust_bridge::frb(sync)]
pub fn dashboard_snapshot() -> DashboardSnapshot {
    with_session(|state| snapshot_of(state, today()))
}

/// Appends a task.
///
/// # FFI contract
/// - Blank titles are rejected with `ok = false`; the list is unchanged.
#[flutter_rust_bridge::frb(sync)]
pub fn add_task(title: String, description: String) -> ActionResponse {
    match with_session(|state| state.add_task(&title, &description)) {
        Some(task_id) => ActionResponse::success("Task added.", Some(task_id.to_string())),
        None => ActionResponse::failure("add_task failed: title is blank"),
    }
}

/// Flips one task's completion.
#[flutter_rust_bridge::frb(sync)]
pub fn toggle_task(task_id: String) -> ActionResponse {
    let parsed = match Uuid::parse_str(task_id.trim()) {
        Ok(parsed) => parsed,
        Err(err) => return ActionResponse::failure(format!("toggle_task failed: {err}")),
    };
    if with_session(|state| state.toggle_task(parsed)) {
        ActionResponse::success("Task toggled.", Some(parsed.to_string()))
    } else {
        ActionResponse::failure(format!("toggle_task failed: unknown task `{parsed}`"))
    }
}

#[flutter_rust_bridge::frb(sync)]
pub fn list_tasks() -> TasksSnapshot {
    with_session(|state| {
        let view = tasks_view(state);
        TasksSnapshot {
            tasks: view.tasks.iter().map(task_item).collect(),
            pending: to_u32(view.pending),
        }
    })
}

#[flutter_rust_bridge::frb(sync)]
pub fn modal_snapshot() -> ModalSnapshot {
    with_session(|state| modal_item(state.modal()))
}

/// Hides the modal; a request still in flight will not reopen it.
#[flutter_rust_bridge::frb(sync)]
pub fn close_modal() -> ModalSnapshot {
    with_session(|state| {
        state.close_modal();
        modal_item(state.modal())
    })
}

/// Daily focus paragraph for today's schedule.
///
/// # FFI contract
/// - Async call on the bridge worker pool; blocks on the shared runtime.
pub fn ai_daily_focus() -> AiResponse {
    run_ai(|_| Ok(AiIntent::DailyFocus))
}

/// Grounded brief of one case.
pub fn ai_case_brief(case_id: u64) -> AiResponse {
    run_ai(move |state| {
        state
            .case(case_id)
            .map(AiIntent::case_brief)
            .ok_or_else(|| format!("unknown case id {case_id}"))
    })
}

/// Study plan for an exam or assignment.
pub fn ai_study_plan(event_id: u64) -> AiResponse {
    run_ai(move |state| match state.event(event_id) {
        Some(event) if event.supports_study_plan() => Ok(AiIntent::study_plan(event)),
        Some(event) => Err(format!(
            "study plans are only offered for exams and assignments, not {}",
            event.kind.as_str()
        )),
        None => Err(format!("unknown event id {event_id}")),
    })
}

/// Speculative summary of one note from its title and attachment names.
pub fn ai_summarize_note(note_id: u64) -> AiResponse {
    run_ai(move |state| {
        state
            .note(note_id)
            .map(AiIntent::note_summary)
            .ok_or_else(|| format!("unknown note id {note_id}"))
    })
}

fn run_ai(build: impl FnOnce(&AppState) -> Result<AiIntent, String>) -> AiResponse {
    let session = session();
    let today = today();
    let runtime = match ai_runtime() {
        Ok(runtime) => runtime,
        Err(reason) => return settle_without_runtime(session, today, build, reason),
    };
    match ai_orchestrator() {
        Ok(orchestrator) => runtime.block_on(drive_intent(orchestrator, session, today, build)),
        Err(reason) => {
            warn!(
                "event=ffi_ai_request module=ffi status=unconfigured reason={}",
                reason
            );
            let fallback = AiOrchestrator::new(UnconfiguredService::new(reason));
            runtime.block_on(drive_intent(&fallback, session, today, build))
        }
    }
}

/// Runs one intent against `session`, locking only around start and apply.
async fn drive_intent<S, F>(
    orchestrator: &AiOrchestrator<S>,
    session: &Mutex<AppState>,
    today: NaiveDate,
    build: F,
) -> AiResponse
where
    S: TextGenerationService,
    F: FnOnce(&AppState) -> Result<AiIntent, String>,
{
    let pending = match begin_intent(orchestrator, session, today, build) {
        Ok(pending) => pending,
        Err(rejected) => return rejected,
    };
    let outcome = orchestrator.execute(pending).await;
    finish_intent(orchestrator, session, outcome)
}

/// Opens the modal for `build`'s intent and settles it with an error at once.
fn settle_without_runtime<F>(
    session: &Mutex<AppState>,
    today: NaiveDate,
    build: F,
    reason: String,
) -> AiResponse
where
    F: FnOnce(&AppState) -> Result<AiIntent, String>,
{
    warn!(
        "event=ffi_ai_request module=ffi status=unavailable reason={}",
        reason
    );
    let orchestrator = AiOrchestrator::new(UnconfiguredService::new(reason.clone()));
    match begin_intent(&orchestrator, session, today, build) {
        Ok(pending) => {
            let outcome = pending.fail(GenerationError::Transport(reason));
            finish_intent(&orchestrator, session, outcome)
        }
        Err(rejected) => rejected,
    }
}

fn begin_intent<S, F>(
    orchestrator: &AiOrchestrator<S>,
    session: &Mutex<AppState>,
    today: NaiveDate,
    build: F,
) -> Result<PendingGeneration, AiResponse>
where
    S: TextGenerationService,
    F: FnOnce(&AppState) -> Result<AiIntent, String>,
{
    let mut state = lock(session);
    match build(&*state) {
        Ok(intent) => Ok(orchestrator.start(&mut *state, &intent, today)),
        Err(message) => {
            warn!(
                "event=ffi_ai_request module=ffi status=rejected reason={}",
                message
            );
            Err(AiResponse {
                ok: false,
                message,
                modal: modal_item(state.modal()),
            })
        }
    }
}

fn finish_intent<S: TextGenerationService>(
    orchestrator: &AiOrchestrator<S>,
    session: &Mutex<AppState>,
    outcome: GenerationOutcome,
) -> AiResponse {
    let mut state = lock(session);
    let applied = orchestrator.apply(&mut *state, outcome);
    AiResponse {
        ok: true,
        message: if applied {
            "Response ready.".to_string()
        } else {
            "Response discarded; a newer request or close superseded it.".to_string()
        },
        modal: modal_item(state.modal()),
    }
}

// Only successes are cached; a failed setup is retried on the next action.
fn ai_runtime() -> Result<&'static Runtime, String> {
    if let Some(runtime) = AI_RUNTIME.get() {
        return Ok(runtime);
    }
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .thread_name("duralex-ai")
        .build()
        .map_err(|err| format!("AI runtime init failed: {err}"))?;
    Ok(AI_RUNTIME.get_or_init(|| runtime))
}

fn ai_orchestrator() -> Result<&'static AiOrchestrator<GeminiClient>, String> {
    if let Some(orchestrator) = AI_ORCHESTRATOR.get() {
        return Ok(orchestrator);
    }
    let config = GeminiConfig::from_env().map_err(|err| format!("AI config invalid: {err}"))?;
    info!(
        "event=ffi_ai_init module=ffi status=ok model={} has_api_key={}",
        config.model,
        config.api_key.is_some()
    );
    let client = GeminiClient::new(config).map_err(|err| format!("AI client init failed: {err}"))?;
    Ok(AI_ORCHESTRATOR.get_or_init(|| AiOrchestrator::new(client)))
}

fn session() -> &'static Mutex<AppState> {
    SESSION.get_or_init(|| {
        let seed = SeedData::sample(today());
        info!(
            "event=ffi_session_init module=ffi status=ok notes={} cases={} events={}",
            seed.notes.len(),
            seed.cases.len(),
            seed.events.len()
        );
        Mutex::new(AppState::from_seed(seed))
    })
}

fn with_session<R>(f: impl FnOnce(&mut AppState) -> R) -> R {
    f(&mut *lock(session()))
}

// A poisoned lock still holds consistent state: every mutation is a single
// assignment or push.
fn lock(session: &Mutex<AppState>) -> MutexGuard<'_, AppState> {
    session.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

fn snapshot_of(state: &AppState, today: NaiveDate) -> DashboardSnapshot {
    let selector = state.current_view();
    let base = DashboardSnapshot {
        view_name: selector.as_str().to_string(),
        view_icon: app_view_for(selector).icon.as_str().to_string(),
        is_dashboard: selector.is_dashboard(),
        total_notes: 0,
        total_cases: 0,
        upcoming_exam_count: 0,
        notes: Vec::new(),
        cases: Vec::new(),
        upcoming_events: Vec::new(),
        notes_empty_text: String::new(),
        cases_empty_text: String::new(),
        events_empty_text: String::new(),
    };

    match project(state, today) {
        ViewProjection::Dashboard(dashboard) => DashboardSnapshot {
            total_notes: to_u32(dashboard.total_notes),
            total_cases: to_u32(dashboard.total_cases),
            upcoming_exam_count: to_u32(dashboard.upcoming_exam_count),
            notes: dashboard.recent_notes.into_iter().map(note_item).collect(),
            cases: dashboard.recent_cases.into_iter().map(case_item).collect(),
            upcoming_events: dashboard
                .upcoming_events
                .into_iter()
                .map(event_item)
                .collect(),
            notes_empty_text: dashboard.notes_empty_text.to_string(),
            cases_empty_text: dashboard.cases_empty_text.to_string(),
            events_empty_text: dashboard.events_empty_text.to_string(),
            ..base
        },
        ViewProjection::Subject(subject) => DashboardSnapshot {
            total_notes: to_u32(subject.notes.len()),
            total_cases: to_u32(subject.cases.len()),
            notes: subject.notes.into_iter().map(note_item).collect(),
            cases: subject.cases.into_iter().map(case_item).collect(),
            upcoming_events: subject.upcoming_events.into_iter().map(event_item).collect(),
            notes_empty_text: subject.notes_empty_text,
            cases_empty_text: subject.cases_empty_text,
            events_empty_text: subject.events_empty_text,
            ..base
        },
    }
}

fn note_item(note: &Note) -> NoteItem {
    let preview = note.attachment_preview();
    NoteItem {
        id: note.id,
        title: note.title.clone(),
        subject: note.subject.as_str().to_string(),
        attachments: preview.shown.iter().map(attachment_item).collect(),
        has_more_attachments: preview.has_more,
    }
}

fn attachment_item(attachment: &Attachment) -> AttachmentItem {
    AttachmentItem {
        name: attachment.name.clone(),
        kind: attachment.kind.as_str().to_string(),
    }
}

fn case_item(case: &Case) -> CaseItem {
    CaseItem {
        id: case.id,
        case_name: case.case_name.clone(),
        citation: case.citation.clone(),
        subject: case.subject.as_str().to_string(),
    }
}

fn event_item(event: &Event) -> EventItem {
    EventItem {
        id: event.id,
        title: event.title.clone(),
        kind: event.kind.as_str().to_string(),
        date: event.date.format(EVENT_DATE_FORMAT).to_string(),
        subject: event.subject.map(|subject| subject.as_str().to_string()),
        supports_study_plan: event.supports_study_plan(),
    }
}

fn task_item(task: &Task) -> TaskItem {
    TaskItem {
        id: task.id.to_string(),
        title: task.title.clone(),
        description: task.description.clone(),
        is_completed: task.is_completed,
    }
}

fn modal_item(modal: &ModalState) -> ModalSnapshot {
    ModalSnapshot {
        is_open: modal.is_open(),
        title: modal.title().to_string(),
        content: modal.content().to_string(),
        is_loading: modal.is_loading(),
        sources: modal
            .sources()
            .iter()
            .map(|source| SourceItem {
                uri: source.uri.clone(),
                title: source.title.clone(),
            })
            .collect(),
    }
}

fn to_u32(value: usize) -> u32 {
    u32::try_from(value).unwrap_or(u32::MAX)
}
