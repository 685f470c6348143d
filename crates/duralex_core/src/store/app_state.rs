//! `AppState` value and its reducer.

use crate::model::case::{Case, CaseId};
use crate::model::event::{Event, EventId};
use crate::model::modal::{AiModal, ModalState};
use crate::model::note::{Note, NoteId};
use crate::model::subject::ViewSelector;
use crate::model::task::{Task, TaskId};
use crate::seed::SeedData;
use log::debug;

/// Per-entity search strings. They survive view switches.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchState {
    /// Matched against note titles.
    pub note_query: String,
    /// Matched against case names and citations.
    pub case_query: String,
}

/// User-driven state transitions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppAction {
    SetView(ViewSelector),
    AddTask { title: String, description: String },
    ToggleTask(TaskId),
    SetNoteQuery(String),
    SetCaseQuery(String),
    CloseModal,
}

/// What a reducer step actually changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionOutcome {
    Applied,
    TaskAdded(TaskId),
    /// The action was valid input for the reducer but had no effect.
    Ignored,
}

/// Single source of mutable dashboard state.
#[derive(Debug, Clone, Default)]
pub struct AppState {
    notes: Vec<Note>,
    cases: Vec<Case>,
    events: Vec<Event>,
    tasks: Vec<Task>,
    current_view: ViewSelector,
    search: SearchState,
    modal: AiModal,
}

impl AppState {
    /// Creates a state on the dashboard view with no tasks.
    pub fn new(notes: Vec<Note>, cases: Vec<Case>, events: Vec<Event>) -> Self {
        Self {
            notes,
            cases,
            events,
            ..Self::default()
        }
    }

    pub fn from_seed(seed: SeedData) -> Self {
        Self::new(seed.notes, seed.cases, seed.events)
    }

    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub fn cases(&self) -> &[Case] {
        &self.cases
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Tasks in creation order.
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn current_view(&self) -> ViewSelector {
        self.current_view
    }

    pub fn search(&self) -> &SearchState {
        &self.search
    }

    pub fn modal(&self) -> &ModalState {
        self.modal.state()
    }

    pub(crate) fn ai_modal(&self) -> &AiModal {
        &self.modal
    }

    pub(crate) fn ai_modal_mut(&mut self) -> &mut AiModal {
        &mut self.modal
    }

    pub fn note(&self, id: NoteId) -> Option<&Note> {
        self.notes.iter().find(|note| note.id == id)
    }

    pub fn case(&self, id: CaseId) -> Option<&Case> {
        self.cases.iter().find(|case| case.id == id)
    }

    pub fn event(&self, id: EventId) -> Option<&Event> {
        self.events.iter().find(|event| event.id == id)
    }

    pub fn task(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id == id)
    }

    /// Applies one action.
    pub fn reduce(&mut self, action: AppAction) -> ActionOutcome {
        match action {
            AppAction::SetView(selector) => {
                self.set_view(selector);
                ActionOutcome::Applied
            }
            AppAction::AddTask { title, description } => {
                match self.add_task(&title, &description) {
                    Some(task_id) => ActionOutcome::TaskAdded(task_id),
                    None => ActionOutcome::Ignored,
                }
            }
            AppAction::ToggleTask(task_id) => {
                if self.toggle_task(task_id) {
                    ActionOutcome::Applied
                } else {
                    ActionOutcome::Ignored
                }
            }
            AppAction::SetNoteQuery(query) => {
                self.set_note_query(query);
                ActionOutcome::Applied
            }
            AppAction::SetCaseQuery(query) => {
                self.set_case_query(query);
                ActionOutcome::Applied
            }
            AppAction::CloseModal => {
                self.close_modal();
                ActionOutcome::Applied
            }
        }
    }

    pub fn set_view(&mut self, selector: ViewSelector) {
        debug!(
            "event=view_select module=store status=ok from={} to={}",
            self.current_view, selector
        );
        self.current_view = selector;
    }

    /// Appends an incomplete task.
    ///
    /// Returns `None` without touching state when the title is blank.
    pub fn add_task(&mut self, title: &str, description: &str) -> Option<TaskId> {
        let Some(task) = Task::new(title, description) else {
            debug!("event=task_add module=store status=ignored reason=blank_title");
            return None;
        };
        let task_id = task.id;
        self.tasks.push(task);
        debug!(
            "event=task_add module=store status=ok task_id={} task_count={}",
            task_id,
            self.tasks.len()
        );
        Some(task_id)
    }

    /// Flips completion of one task. Unknown ids are ignored.
    pub fn toggle_task(&mut self, task_id: TaskId) -> bool {
        match self.tasks.iter_mut().find(|task| task.id == task_id) {
            Some(task) => {
                task.toggle();
                debug!(
                    "event=task_toggle module=store status=ok task_id={} completed={}",
                    task_id, task.is_completed
                );
                true
            }
            None => {
                debug!(
                    "event=task_toggle module=store status=ignored reason=unknown_id task_id={}",
                    task_id
                );
                false
            }
        }
    }

    pub fn set_note_query(&mut self, query: impl Into<String>) {
        self.search.note_query = query.into();
    }

    pub fn set_case_query(&mut self, query: impl Into<String>) {
        self.search.case_query = query.into();
    }

    /// Hides the AI modal and orphans any request still in flight.
    pub fn close_modal(&mut self) {
        if let Some(request_id) = self.modal.active_request() {
            debug!(
                "event=modal_close module=store status=ok orphaned_request_id={}",
                request_id
            );
        }
        self.modal.close();
    }
}
