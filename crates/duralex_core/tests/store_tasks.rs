use chrono::NaiveDate;
use duralex_core::{ActionOutcome, AppAction, AppState, SeedData, Subject, ViewSelector};
use uuid::Uuid;

fn seeded_state() -> AppState {
    let today = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();
    AppState::from_seed(SeedData::sample(today))
}

#[test]
fn blank_title_leaves_task_list_untouched() {
    let mut state = seeded_state();

    assert_eq!(state.add_task("   ", "ignored description"), None);
    assert_eq!(
        state.reduce(AppAction::AddTask {
            title: "\t\n".to_string(),
            description: String::new(),
        }),
        ActionOutcome::Ignored
    );
    assert!(state.tasks().is_empty());
}

#[test]
fn add_task_trims_and_appends_incomplete() {
    let mut state = seeded_state();

    let first = state.add_task("  Read Palsgraf  ", " before Tuesday ").unwrap();
    let second = state.add_task("Outline Civ Pro", "").unwrap();
    assert_ne!(first, second);

    let tasks = state.tasks();
    assert_eq!(tasks.len(), 2);
    assert_eq!(tasks[0].title, "Read Palsgraf");
    assert_eq!(tasks[0].description, "before Tuesday");
    assert!(!tasks[0].is_completed);
    assert_eq!(tasks[1].id, second);
}

#[test]
fn toggle_twice_restores_completion_and_unknown_id_is_ignored() {
    let mut state = seeded_state();
    let task_id = state.add_task("Brief Marbury", "").unwrap();

    assert_eq!(
        state.reduce(AppAction::ToggleTask(task_id)),
        ActionOutcome::Applied
    );
    assert!(state.task(task_id).unwrap().is_completed);

    assert!(state.toggle_task(task_id));
    assert!(!state.task(task_id).unwrap().is_completed);

    assert_eq!(
        state.reduce(AppAction::ToggleTask(Uuid::new_v4())),
        ActionOutcome::Ignored
    );
    assert_eq!(state.tasks().len(), 1);
}

#[test]
fn view_and_queries_are_plain_overwrites() {
    let mut state = seeded_state();
    assert_eq!(state.current_view(), ViewSelector::Dashboard);

    state.reduce(AppAction::SetView(ViewSelector::Subject(Subject::LabourLaw)));
    state.reduce(AppAction::SetNoteQuery("veil".to_string()));
    state.reduce(AppAction::SetCaseQuery("Steel".to_string()));

    assert_eq!(
        state.current_view(),
        ViewSelector::Subject(Subject::LabourLaw)
    );
    assert_eq!(state.search().note_query, "veil");
    assert_eq!(state.search().case_query, "Steel");

    state.reduce(AppAction::SetView(ViewSelector::Dashboard));
    assert_eq!(state.search().note_query, "veil");
}
