//! Seed data supplied to the store at startup.
//!
//! # Responsibility
//! - Provide the built-in sample set, dated relative to a given day.
//! - Load a seed set from JSON and reject duplicate ids.
//!
//! # Invariants
//! - A returned `SeedData` has unique ids per entity kind.
//! - Core never writes seed files back.

use crate::model::case::Case;
use crate::model::event::{Event, EventKind};
use crate::model::note::{Attachment, AttachmentKind, Note};
use crate::model::subject::Subject;
use chrono::{Days, NaiveDate, NaiveDateTime, NaiveTime};
use log::{error, info};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::Path;

/// Initial immutable collections.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedData {
    #[serde(default)]
    pub notes: Vec<Note>,
    #[serde(default)]
    pub cases: Vec<Case>,
    #[serde(default)]
    pub events: Vec<Event>,
}

/// Seed loading failures.
#[derive(Debug)]
pub enum SeedError {
    Io(std::io::Error),
    Json(serde_json::Error),
    DuplicateId { entity: &'static str, id: u64 },
}

impl Display for SeedError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(err) => write!(f, "failed to read seed file: {err}"),
            Self::Json(err) => write!(f, "invalid seed JSON: {err}"),
            Self::DuplicateId { entity, id } => write!(f, "duplicate {entity} id in seed: {id}"),
        }
    }
}

impl Error for SeedError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Json(err) => Some(err),
            Self::DuplicateId { .. } => None,
        }
    }
}

impl From<std::io::Error> for SeedError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<serde_json::Error> for SeedError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

impl SeedData {
    /// Parses and validates a JSON seed document.
    pub fn from_json_str(raw: &str) -> Result<Self, SeedError> {
        let seed: SeedData = serde_json::from_str(raw)?;
        seed.validate()?;
        Ok(seed)
    }

    /// Rejects duplicate ids within each collection.
    pub fn validate(&self) -> Result<(), SeedError> {
        ensure_unique("note", self.notes.iter().map(|note| note.id))?;
        ensure_unique("case", self.cases.iter().map(|case| case.id))?;
        ensure_unique("event", self.events.iter().map(|event| event.id))?;
        Ok(())
    }

    /// Built-in sample set. Event dates are offsets from `today`.
    pub fn sample(today: NaiveDate) -> Self {
        Self {
            notes: sample_notes(),
            cases: sample_cases(),
            events: sample_events(today),
        }
    }
}

/// Reads and validates a JSON seed file.
pub fn load_seed_file(path: impl AsRef<Path>) -> Result<SeedData, SeedError> {
    let path = path.as_ref();
    let loaded = std::fs::read_to_string(path)
        .map_err(SeedError::from)
        .and_then(|raw| SeedData::from_json_str(&raw));
    match &loaded {
        Ok(seed) => info!(
            "event=seed_load module=seed status=ok notes={} cases={} events={}",
            seed.notes.len(),
            seed.cases.len(),
            seed.events.len()
        ),
        Err(err) => error!(
            "event=seed_load module=seed status=error path={} error={}",
            path.display(),
            err
        ),
    }
    loaded
}

fn ensure_unique(entity: &'static str, ids: impl Iterator<Item = u64>) -> Result<(), SeedError> {
    let mut seen = BTreeSet::new();
    for id in ids {
        if !seen.insert(id) {
            return Err(SeedError::DuplicateId { entity, id });
        }
    }
    Ok(())
}

fn attachment(id: u64, name: &str, kind: AttachmentKind) -> Attachment {
    Attachment {
        id,
        name: name.to_string(),
        kind,
    }
}

fn note(id: u64, title: &str, subject: Subject, attachments: Vec<Attachment>) -> Note {
    Note {
        id,
        title: title.to_string(),
        subject,
        attachments,
    }
}

fn sample_notes() -> Vec<Note> {
    vec![
        note(
            1,
            "Torts - Elements of Negligence",
            Subject::Torts,
            vec![
                attachment(1, "Negligence Case Law.pdf", AttachmentKind::Pdf),
                attachment(2, "Duty of Care outline.docx", AttachmentKind::Doc),
            ],
        ),
        note(
            2,
            "Contracts - Offer and Acceptance",
            Subject::CommercialTransactions,
            Vec::new(),
        ),
        note(
            3,
            "Subject Matter Jurisdiction",
            Subject::CivilProcedure,
            vec![attachment(3, "SMJ Flowchart.png", AttachmentKind::Img)],
        ),
        note(
            4,
            "First Amendment Speech",
            Subject::AdministrativeLaw,
            Vec::new(),
        ),
        note(
            5,
            "Piercing the Corporate Veil",
            Subject::CorporationLaw,
            vec![attachment(4, "Case v. Case.pdf", AttachmentKind::Pdf)],
        ),
        note(
            6,
            "Workplace Safety Standards",
            Subject::LabourLaw,
            Vec::new(),
        ),
        note(
            7,
            "Autopsy Procedures",
            Subject::MedicinaForensis,
            vec![attachment(5, "Coroner Report.pdf", AttachmentKind::Pdf)],
        ),
        note(8, "Rule 12(b)(6) Motions", Subject::CivilProcedure, Vec::new()),
    ]
}

fn case(id: u64, case_name: &str, citation: &str, subject: Subject) -> Case {
    Case {
        id,
        case_name: case_name.to_string(),
        citation: citation.to_string(),
        subject,
    }
}

fn sample_cases() -> Vec<Case> {
    vec![
        case(
            1,
            "Marbury v. Madison",
            "5 U.S. 137 (1803)",
            Subject::AdministrativeLaw,
        ),
        case(
            2,
            "Palsgraf v. Long Island Railroad Co.",
            "248 N.Y. 339 (1928)",
            Subject::Torts,
        ),
        case(
            3,
            "International Shoe Co. v. Washington",
            "326 U.S. 310 (1945)",
            Subject::CivilProcedure,
        ),
        case(
            4,
            "Salomon v. A Salomon & Co Ltd",
            "UKHL 1 (1896)",
            Subject::CorporationLaw,
        ),
        case(
            5,
            "NLRB v. Jones & Laughlin Steel Corp",
            "301 U.S. 1 (1937)",
            Subject::LabourLaw,
        ),
        case(
            6,
            "Uniform Commercial Code (UCC) Art. 2",
            "U.C.C. - Art. 2 (Sales)",
            Subject::CommercialTransactions,
        ),
    ]
}

// Offsets in days from `today`; negative values are in the past.
fn sample_events(today: NaiveDate) -> Vec<Event> {
    let entries: [(u64, &str, EventKind, i64, Option<Subject>); 7] = [
        (1, "Torts Midterm", EventKind::Exam, 2, Some(Subject::Torts)),
        (
            2,
            "Contracts Memo Due",
            EventKind::Assignment,
            5,
            Some(Subject::CommercialTransactions),
        ),
        (
            3,
            "Study Group - Civ Pro",
            EventKind::Meeting,
            0,
            Some(Subject::CivilProcedure),
        ),
        (4, "Spring Break Begins", EventKind::Holiday, 10, None),
        (5, "Legal Writing Class", EventKind::Class, -2, None),
        (
            6,
            "Admin Law Review",
            EventKind::Meeting,
            1,
            Some(Subject::AdministrativeLaw),
        ),
        (
            7,
            "Forensics Lab",
            EventKind::Class,
            3,
            Some(Subject::MedicinaForensis),
        ),
    ];

    entries
        .into_iter()
        .map(|(id, title, kind, offset, subject)| Event {
            id,
            title: title.to_string(),
            kind,
            date: offset_day(today, offset),
            subject,
        })
        .collect()
}

fn offset_day(today: NaiveDate, offset: i64) -> NaiveDateTime {
    let day = if offset >= 0 {
        today.checked_add_days(Days::new(offset.unsigned_abs()))
    } else {
        today.checked_sub_days(Days::new(offset.unsigned_abs()))
    };
    // Out-of-range offsets only happen at the calendar limits; keep `today`.
    day.unwrap_or(today).and_time(sample_event_time())
}

fn sample_event_time() -> NaiveTime {
    NaiveTime::from_hms_opt(9, 0, 0).unwrap_or(NaiveTime::MIN)
}
