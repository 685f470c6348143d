use chrono::{Days, NaiveDate, NaiveTime};
use duralex_core::view::{dashboard_view, subject_view};
use duralex_core::{
    project, tasks_view, AppState, Case, Event, EventKind, Note, SeedData, Subject,
    ViewProjection, ViewSelector,
};

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 19).unwrap()
}

fn seeded_state() -> AppState {
    AppState::from_seed(SeedData::sample(today()))
}

fn event(id: u64, kind: EventKind, offset: u64, subject: Option<Subject>) -> Event {
    Event {
        id,
        title: format!("event {id}"),
        kind,
        date: today()
            .checked_add_days(Days::new(offset))
            .unwrap()
            .and_time(NaiveTime::from_hms_opt(10, 0, 0).unwrap()),
        subject,
    }
}

fn note(id: u64, subject: Subject) -> Note {
    Note {
        id,
        title: format!("note {id}"),
        subject,
        attachments: Vec::new(),
    }
}

fn case(id: u64, case_name: &str, citation: &str, subject: Subject) -> Case {
    Case {
        id,
        case_name: case_name.to_string(),
        citation: citation.to_string(),
        subject,
    }
}

#[test]
fn dashboard_counts_exams_and_lists_three_soonest_events() {
    let state = seeded_state();
    let view = dashboard_view(&state, today());

    assert_eq!(view.total_notes, 8);
    assert_eq!(view.total_cases, 6);
    assert_eq!(view.upcoming_exam_count, 1);

    let ids = view
        .upcoming_events
        .iter()
        .map(|event| event.id)
        .collect::<Vec<_>>();
    assert_eq!(ids, vec![3, 6, 1]);
}

#[test]
fn exam_count_ignores_past_exams_and_display_limit() {
    let events = vec![
        event(1, EventKind::Exam, 1, Some(Subject::Torts)),
        event(2, EventKind::Exam, 2, None),
        event(3, EventKind::Meeting, 0, None),
        event(4, EventKind::Class, 0, None),
        event(5, EventKind::Exam, 30, Some(Subject::LabourLaw)),
        event(6, EventKind::Exam, 0, Some(Subject::Torts)),
    ];
    let mut state = AppState::new(Vec::new(), Vec::new(), events);
    let later = today().checked_add_days(Days::new(1)).unwrap();

    let view = dashboard_view(&state, later);
    assert_eq!(view.upcoming_exam_count, 3);
    assert_eq!(view.upcoming_events.len(), 3);
    assert_eq!(view.upcoming_events[0].id, 1);

    state.set_view(ViewSelector::Subject(Subject::Torts));
    assert!(matches!(project(&state, later), ViewProjection::Subject(_)));
}

#[test]
fn recent_items_are_highest_ids_first() {
    let state = seeded_state();
    let view = dashboard_view(&state, today());

    let note_ids = view.recent_notes.iter().map(|n| n.id).collect::<Vec<_>>();
    let case_ids = view.recent_cases.iter().map(|c| c.id).collect::<Vec<_>>();
    assert_eq!(note_ids, vec![8, 7, 6]);
    assert_eq!(case_ids, vec![6, 5, 4]);
}

#[test]
fn case_search_matches_name_or_citation_case_insensitively() {
    let mut state = seeded_state();

    state.set_case_query("madison");
    let view = dashboard_view(&state, today());
    assert_eq!(view.total_cases, 1);
    assert_eq!(view.recent_cases[0].case_name, "Marbury v. Madison");

    state.set_case_query("U.S.");
    assert_eq!(dashboard_view(&state, today()).total_cases, 3);

    state.set_case_query("no such case");
    let view = dashboard_view(&state, today());
    assert!(view.recent_cases.is_empty());
    assert_eq!(view.cases_empty_text, "No matching cases found.");
}

#[test]
fn note_search_filters_totals_and_switches_empty_text() {
    let mut state = seeded_state();
    let view = dashboard_view(&state, today());
    assert_eq!(view.notes_empty_text, "No notes yet. Start writing!");

    state.set_note_query("MOTIONS");
    let view = dashboard_view(&state, today());
    assert_eq!(view.total_notes, 1);
    assert_eq!(view.recent_notes[0].id, 8);
    assert_eq!(view.notes_empty_text, "No matching notes found.");
}

#[test]
fn subject_view_scopes_everything_and_hides_subjectless_events() {
    let state = seeded_state();
    let view = subject_view(&state, Subject::CivilProcedure, today());

    assert_eq!(
        view.notes.iter().map(|n| n.id).collect::<Vec<_>>(),
        vec![3, 8]
    );
    assert_eq!(view.cases.len(), 1);
    assert_eq!(view.cases[0].id, 3);
    assert_eq!(view.upcoming_events.len(), 1);
    assert_eq!(view.upcoming_events[0].title, "Study Group - Civ Pro");
    assert_eq!(view.events_empty_text, "No upcoming events for Civil Procedure.");
}

#[test]
fn subject_view_keeps_ten_soonest_events() {
    let events = (1..=12)
        .rev()
        .map(|id| event(id, EventKind::Assignment, id, Some(Subject::Torts)))
        .chain(std::iter::once(event(13, EventKind::Holiday, 0, None)))
        .collect::<Vec<_>>();
    let state = AppState::new(
        vec![note(1, Subject::Torts), note(2, Subject::LabourLaw)],
        vec![case(1, "Palsgraf", "248 N.Y. 339", Subject::Torts)],
        events,
    );

    let view = subject_view(&state, Subject::Torts, today());
    let ids = view.upcoming_events.iter().map(|e| e.id).collect::<Vec<_>>();
    assert_eq!(ids, (1..=10).collect::<Vec<_>>());
    assert_eq!(view.notes.len(), 1);
    assert_eq!(view.notes_empty_text, "No notes found for Torts.");
}

#[test]
fn tasks_view_counts_pending() {
    let mut state = seeded_state();
    let first = state.add_task("Read", "").unwrap();
    state.add_task("Write", "").unwrap();
    state.toggle_task(first);

    let view = tasks_view(&state);
    assert_eq!(view.tasks.len(), 2);
    assert_eq!(view.pending, 1);
}
