//! Filter, sort and slice primitives shared by every projection.
//!
//! # Invariants
//! - Functions never mutate their inputs.
//! - Sorts are stable: ties keep input order.
//! - An empty search query matches everything.

use crate::model::case::Case;
use crate::model::event::{Event, EventKind};
use crate::model::note::Note;
use crate::model::subject::ViewSelector;
use chrono::NaiveDate;

/// Upcoming events shown on the aggregate dashboard.
pub const DASHBOARD_EVENT_LIMIT: usize = 3;
/// Upcoming events shown on a subject page.
pub const SUBJECT_EVENT_LIMIT: usize = 10;
/// Recent notes/cases shown on the aggregate dashboard.
pub const RECENT_ITEM_LIMIT: usize = 3;

/// Events dated `today` or later, ascending by date.
pub fn upcoming_events<'a, I>(events: I, today: NaiveDate) -> Vec<&'a Event>
where
    I: IntoIterator<Item = &'a Event>,
{
    let mut upcoming = events
        .into_iter()
        .filter(|event| event.is_upcoming(today))
        .collect::<Vec<_>>();
    upcoming.sort_by_key(|event| event.date);
    upcoming
}

/// Number of upcoming exams, before any display slicing.
pub fn upcoming_exam_count<'a, I>(events: I, today: NaiveDate) -> usize
where
    I: IntoIterator<Item = &'a Event>,
{
    events
        .into_iter()
        .filter(|event| event.is_upcoming(today) && event.kind == EventKind::Exam)
        .count()
}

/// Notes visible under `selector`.
pub fn scope_notes(notes: &[Note], selector: ViewSelector) -> Vec<&Note> {
    match selector.subject() {
        None => notes.iter().collect(),
        Some(subject) => notes.iter().filter(|note| note.subject == subject).collect(),
    }
}

/// Cases visible under `selector`.
pub fn scope_cases(cases: &[Case], selector: ViewSelector) -> Vec<&Case> {
    match selector.subject() {
        None => cases.iter().collect(),
        Some(subject) => cases.iter().filter(|case| case.subject == subject).collect(),
    }
}

/// Events visible under `selector`. Subjectless events only show on the
/// dashboard.
pub fn scope_events(events: &[Event], selector: ViewSelector) -> Vec<&Event> {
    match selector.subject() {
        None => events.iter().collect(),
        Some(subject) => events
            .iter()
            .filter(|event| event.subject == Some(subject))
            .collect(),
    }
}

/// Case-insensitive substring match on the note title.
pub fn note_matches(note: &Note, query: &str) -> bool {
    contains_folded(&note.title, &query.to_lowercase())
}

/// Case-insensitive substring match on case name or citation.
pub fn case_matches(case: &Case, query: &str) -> bool {
    let folded = query.to_lowercase();
    contains_folded(&case.case_name, &folded) || contains_folded(&case.citation, &folded)
}

pub fn search_notes<'a, I>(notes: I, query: &str) -> Vec<&'a Note>
where
    I: IntoIterator<Item = &'a Note>,
{
    notes
        .into_iter()
        .filter(|note| note_matches(note, query))
        .collect()
}

pub fn search_cases<'a, I>(cases: I, query: &str) -> Vec<&'a Case>
where
    I: IntoIterator<Item = &'a Case>,
{
    cases
        .into_iter()
        .filter(|case| case_matches(case, query))
        .collect()
}

/// Highest ids first, truncated to `limit`.
pub fn most_recent<'a, T, F>(items: &[&'a T], id_of: F, limit: usize) -> Vec<&'a T>
where
    F: Fn(&T) -> u64,
{
    let mut sorted = items.to_vec();
    sorted.sort_by(|left, right| id_of(*right).cmp(&id_of(*left)));
    sorted.truncate(limit);
    sorted
}

fn contains_folded(haystack: &str, folded_needle: &str) -> bool {
    folded_needle.is_empty() || haystack.to_lowercase().contains(folded_needle)
}

#[cfg(test)]
mod tests {
    use super::{case_matches, most_recent, note_matches, upcoming_events};
    use crate::model::case::Case;
    use crate::model::event::{Event, EventKind};
    use crate::model::note::Note;
    use crate::model::subject::Subject;
    use chrono::NaiveDate;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 5, d).unwrap()
    }

    fn event(id: u64, d: u32) -> Event {
        Event {
            id,
            title: format!("event {id}"),
            kind: EventKind::Meeting,
            date: day(d).and_hms_opt(12, 0, 0).unwrap(),
            subject: None,
        }
    }

    #[test]
    fn upcoming_sort_keeps_input_order_on_ties() {
        let events = vec![event(1, 12), event(2, 11), event(3, 11), event(4, 9)];
        let ids = upcoming_events(&events, day(10))
            .iter()
            .map(|event| event.id)
            .collect::<Vec<_>>();
        assert_eq!(ids, vec![2, 3, 1]);
    }

    #[test]
    fn empty_query_matches_everything() {
        let note = Note {
            id: 1,
            title: "Anything".to_string(),
            subject: Subject::Torts,
            attachments: Vec::new(),
        };
        assert!(note_matches(&note, ""));
        assert!(note_matches(&note, "THING"));
        assert!(!note_matches(&note, "nothing"));
    }

    #[test]
    fn case_matches_name_or_citation() {
        let case = Case {
            id: 1,
            case_name: "Marbury v. Madison".to_string(),
            citation: "5 U.S. 137 (1803)".to_string(),
            subject: Subject::AdministrativeLaw,
        };
        assert!(case_matches(&case, "madison"));
        assert!(case_matches(&case, "u.s. 137"));
        assert!(!case_matches(&case, "palsgraf"));
    }

    #[test]
    fn most_recent_orders_by_id_descending() {
        let notes = (1..=5)
            .map(|id| Note {
                id,
                title: format!("n{id}"),
                subject: Subject::Torts,
                attachments: Vec::new(),
            })
            .collect::<Vec<_>>();
        let refs = notes.iter().collect::<Vec<_>>();
        let ids = most_recent(&refs, |note| note.id, 3)
            .iter()
            .map(|note| note.id)
            .collect::<Vec<_>>();
        assert_eq!(ids, vec![5, 4, 3]);
    }
}
