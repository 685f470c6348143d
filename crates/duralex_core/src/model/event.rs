//! Calendar event record.
//!
//! # Invariants
//! - `date` is a local wall-clock point in time; "upcoming" compares only
//!   its calendar day against the caller-supplied `today`.
//! - `subject = None` marks a general event that never appears in a
//!   subject-scoped view.

use crate::model::subject::Subject;
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Numeric event id.
pub type EventId = u64;

/// Event category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventKind {
    Exam,
    Assignment,
    Meeting,
    Holiday,
    Class,
}

impl EventKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Exam => "Exam",
            Self::Assignment => "Assignment",
            Self::Meeting => "Meeting",
            Self::Holiday => "Holiday",
            Self::Class => "Class",
        }
    }
}

/// Seeded calendar entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub id: EventId,
    pub title: String,
    #[serde(rename = "type")]
    pub kind: EventKind,
    pub date: NaiveDateTime,
    pub subject: Option<Subject>,
}

impl Event {
    /// True when the event falls on `today` or any later day.
    pub fn is_upcoming(&self, today: NaiveDate) -> bool {
        self.date.date() >= today
    }

    /// Exams and assignments offer the study-plan action.
    pub fn supports_study_plan(&self) -> bool {
        matches!(self.kind, EventKind::Exam | EventKind::Assignment)
    }
}
