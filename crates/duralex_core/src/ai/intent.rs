//! User-triggered assistant intents.

use crate::ai::prompts::{
    case_brief_request, daily_focus_request, note_summary_request, study_plan_request,
};
use crate::ai::service::GenerationRequest;
use crate::model::case::Case;
use crate::model::event::Event;
use crate::model::note::Note;
use crate::store::AppState;
use chrono::NaiveDate;

const MODAL_TITLE_MARK: &str = "✨";

/// One of the four actions that open the AI modal.
///
/// Intents capture what they need from a record at click time, so a later
/// state change cannot alter an already issued prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AiIntent {
    /// Reads all events and notes from state when the prompt is built.
    DailyFocus,
    CaseBrief {
        case_name: String,
        citation: String,
    },
    StudyPlan {
        event_title: String,
    },
    NoteSummary {
        note_title: String,
        attachment_names: Vec<String>,
    },
}

impl AiIntent {
    pub fn case_brief(case: &Case) -> Self {
        Self::CaseBrief {
            case_name: case.case_name.clone(),
            citation: case.citation.clone(),
        }
    }

    pub fn study_plan(event: &Event) -> Self {
        Self::StudyPlan {
            event_title: event.title.clone(),
        }
    }

    pub fn note_summary(note: &Note) -> Self {
        Self::NoteSummary {
            note_title: note.title.clone(),
            attachment_names: note
                .attachment_names()
                .into_iter()
                .map(str::to_string)
                .collect(),
        }
    }

    /// Stable label used in log events.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::DailyFocus => "daily_focus",
            Self::CaseBrief { .. } => "case_brief",
            Self::StudyPlan { .. } => "study_plan",
            Self::NoteSummary { .. } => "note_summary",
        }
    }

    /// Title shown while loading and after the answer arrives.
    pub fn modal_title(&self) -> String {
        match self {
            Self::DailyFocus => format!("{MODAL_TITLE_MARK} Daily Focus"),
            Self::CaseBrief { case_name, .. } => {
                format!("{MODAL_TITLE_MARK} Case Brief: {case_name}")
            }
            Self::StudyPlan { event_title } => {
                format!("{MODAL_TITLE_MARK} Study Plan: {event_title}")
            }
            Self::NoteSummary { note_title, .. } => {
                format!("{MODAL_TITLE_MARK} Summary: {note_title}")
            }
        }
    }

    /// Builds the prompt submission for this intent.
    pub fn build_request(&self, state: &AppState, today: NaiveDate) -> GenerationRequest {
        match self {
            Self::DailyFocus => daily_focus_request(state.events(), state.notes(), today),
            Self::CaseBrief {
                case_name,
                citation,
            } => case_brief_request(case_name, citation),
            Self::StudyPlan { event_title } => study_plan_request(event_title),
            Self::NoteSummary {
                note_title,
                attachment_names,
            } => note_summary_request(note_title, attachment_names),
        }
    }
}
