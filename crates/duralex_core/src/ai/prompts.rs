//! Prompt templates for the four assistant intents.
//!
//! Each builder returns a complete `GenerationRequest`. Only the case brief
//! asks for grounded search.

use crate::ai::service::GenerationRequest;
use crate::model::event::Event;
use crate::model::note::Note;
use chrono::NaiveDate;

const NONE_PLACEHOLDER: &str = "None";
const DAILY_FOCUS_NOTE_SUBJECTS: usize = 2;

const DAILY_FOCUS_SYSTEM: &str =
    "You are a friendly and encouraging law school tutor. Be concise and motivational.";
const CASE_BRIEF_SYSTEM: &str = "You are a helpful legal assistant. Provide a concise, \
easy-to-understand summary of the requested court case, focusing on the facts, the holding, \
and the legal principle it established.";
const STUDY_PLAN_SYSTEM: &str = "You are a helpful academic advisor. Create a concise, \
scannable, step-by-step study plan (as a bulleted list) for the user's upcoming legal exam or \
assignment. Keep it brief and focused.";
const NOTE_SUMMARY_SYSTEM: &str = "You are a helpful law study assistant. Given a note's title \
and its attached file names, provide a brief, insightful summary of the likely topic and its key \
components. You cannot read the files, so base your summary on the titles provided.";

/// Motivational paragraph from upcoming event titles and early note subjects.
///
/// Event titles keep store order and are not sorted; only the first two
/// notes contribute their subject.
pub fn daily_focus_request(
    events: &[Event],
    notes: &[Note],
    today: NaiveDate,
) -> GenerationRequest {
    let upcoming = events
        .iter()
        .filter(|event| event.is_upcoming(today))
        .map(|event| event.title.as_str())
        .collect::<Vec<_>>();
    let subjects = notes
        .iter()
        .take(DAILY_FOCUS_NOTE_SUBJECTS)
        .map(|note| note.subject.as_str())
        .collect::<Vec<_>>();

    let prompt = format!(
        "I'm a law student. Based on my upcoming schedule and recent study topics, give me a \
single, encouraging paragraph (max 3-4 sentences) suggesting what I should focus on today.\n\n\
Upcoming Events: {}\nRecent Note Subjects: {}",
        join_or_none(&upcoming),
        join_or_none(&subjects)
    );

    GenerationRequest {
        prompt,
        system_instruction: DAILY_FOCUS_SYSTEM.to_string(),
        use_grounded_search: false,
    }
}

/// Grounded 2-3 paragraph brief of one case.
pub fn case_brief_request(case_name: &str, citation: &str) -> GenerationRequest {
    GenerationRequest {
        prompt: format!(
            "Find and briefly summarize the legal case: {case_name}, {citation}. Explain its core \
legal principle and significance in U.S. law. Keep the summary to 2-3 paragraphs."
        ),
        system_instruction: CASE_BRIEF_SYSTEM.to_string(),
        use_grounded_search: true,
    }
}

/// Five-step plan for an exam or assignment.
pub fn study_plan_request(event_title: &str) -> GenerationRequest {
    GenerationRequest {
        prompt: format!(
            "Generate a 5-step, actionable study plan for my upcoming \"{event_title}\"."
        ),
        system_instruction: STUDY_PLAN_SYSTEM.to_string(),
        use_grounded_search: false,
    }
}

/// Speculative summary from a note title and attachment names only.
pub fn note_summary_request(note_title: &str, attachment_names: &[String]) -> GenerationRequest {
    let names = attachment_names.iter().map(String::as_str).collect::<Vec<_>>();
    GenerationRequest {
        prompt: format!(
            "I have a study note titled \"{note_title}\". It has the following files attached: \
{}. Please provide a 1-2 paragraph summary of what this note likely covers, based on its title \
and the attached file names. Speculate on the key concepts and connections.",
            join_or_none(&names)
        ),
        system_instruction: NOTE_SUMMARY_SYSTEM.to_string(),
        use_grounded_search: false,
    }
}

fn join_or_none(items: &[&str]) -> String {
    if items.is_empty() {
        NONE_PLACEHOLDER.to_string()
    } else {
        items.join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::{
        case_brief_request, daily_focus_request, note_summary_request, study_plan_request,
    };
    use crate::seed::SeedData;
    use chrono::NaiveDate;

    #[test]
    fn daily_focus_lists_upcoming_titles_in_store_order_and_two_subjects() {
        let today = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();
        let seed = SeedData::sample(today);
        let request = daily_focus_request(&seed.events, &seed.notes, today);

        assert!(request.prompt.contains(
            "Upcoming Events: Torts Midterm, Contracts Memo Due, Study Group - Civ Pro, \
Spring Break Begins, Admin Law Review, Forensics Lab"
        ));
        assert!(!request.prompt.contains("Legal Writing Class"));
        assert!(request
            .prompt
            .contains("Recent Note Subjects: Torts, Commercial Transactions"));
        assert!(!request.use_grounded_search);
    }

    #[test]
    fn daily_focus_uses_none_for_empty_inputs() {
        let today = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();
        let request = daily_focus_request(&[], &[], today);
        assert!(request.prompt.contains("Upcoming Events: None"));
        assert!(request.prompt.contains("Recent Note Subjects: None"));
    }

    #[test]
    fn only_case_brief_is_grounded() {
        assert!(case_brief_request("Marbury v. Madison", "5 U.S. 137 (1803)").use_grounded_search);
        assert!(!study_plan_request("Torts Midterm").use_grounded_search);
        assert!(!note_summary_request("Veil", &[]).use_grounded_search);
    }

    #[test]
    fn note_summary_lists_attachment_names() {
        let request = note_summary_request(
            "Torts - Elements of Negligence",
            &[
                "Negligence Case Law.pdf".to_string(),
                "Duty of Care outline.docx".to_string(),
            ],
        );
        assert!(request
            .prompt
            .contains("attached: Negligence Case Law.pdf, Duty of Care outline.docx."));

        let bare = note_summary_request("Rule 12(b)(6) Motions", &[]);
        assert!(bare.prompt.contains("attached: None."));
    }
}
