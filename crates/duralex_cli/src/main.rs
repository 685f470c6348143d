//! CLI probe for the dashboard core.
//!
//! # Responsibility
//! - Print the projected page for the sample (or a JSON) seed set.
//! - Run one AI intent against Gemini and print the resulting modal.

use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use duralex_core::view::{DashboardView, SubjectView};
use duralex_core::{
    init_logging_from_env, load_seed_file, project, AiIntent, AiOrchestrator, AppState, Case,
    Event, GeminiClient, GeminiConfig, ModalState, Note, SeedData, ViewProjection, ViewSelector,
};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Debug, Parser)]
#[command(name = "duralex", version, about = "Law-student dashboard probe")]
struct Cli {
    /// `Dashboard` or a subject name such as "Civil Procedure".
    #[arg(long, default_value = "Dashboard")]
    view: String,
    /// Note title filter.
    #[arg(long)]
    notes: Option<String>,
    /// Case name/citation filter.
    #[arg(long)]
    cases: Option<String>,
    /// JSON seed file; defaults to the built-in sample set.
    #[arg(long)]
    seed: Option<PathBuf>,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Ask the assistant and print the modal.
    Ai {
        #[command(subcommand)]
        intent: AiCommand,
    },
}

#[derive(Debug, Subcommand)]
enum AiCommand {
    DailyFocus,
    CaseBrief { id: u64 },
    StudyPlan { id: u64 },
    Summarize { id: u64 },
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    if let Err(err) = init_logging_from_env() {
        eprintln!("warning: logging disabled: {err}");
    }

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("error: {message}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<(), String> {
    let today = Local::now().date_naive();
    let seed = match &cli.seed {
        Some(path) => load_seed_file(path).map_err(|err| err.to_string())?,
        None => SeedData::sample(today),
    };
    let mut state = AppState::from_seed(seed);

    state.set_view(ViewSelector::parse(&cli.view).map_err(|err| err.to_string())?);
    if let Some(query) = cli.notes {
        state.set_note_query(query);
    }
    if let Some(query) = cli.cases {
        state.set_case_query(query);
    }

    match cli.command {
        None => {
            print_projection(&state, today);
            Ok(())
        }
        Some(Command::Ai { intent }) => {
            let intent = resolve_intent(&state, intent)?;
            let config = GeminiConfig::from_env().map_err(|err| err.to_string())?;
            let client = GeminiClient::new(config).map_err(|err| err.to_string())?;
            AiOrchestrator::new(client)
                .run(&mut state, &intent, today)
                .await;
            print_modal(state.modal());
            Ok(())
        }
    }
}

fn resolve_intent(state: &AppState, command: AiCommand) -> Result<AiIntent, String> {
    match command {
        AiCommand::DailyFocus => Ok(AiIntent::DailyFocus),
        AiCommand::CaseBrief { id } => state
            .case(id)
            .map(AiIntent::case_brief)
            .ok_or_else(|| format!("no case with id {id}")),
        AiCommand::StudyPlan { id } => match state.event(id) {
            Some(event) if event.supports_study_plan() => Ok(AiIntent::study_plan(event)),
            Some(event) => Err(format!(
                "event {id} is a {}; study plans need an exam or assignment",
                event.kind.as_str()
            )),
            None => Err(format!("no event with id {id}")),
        },
        AiCommand::Summarize { id } => state
            .note(id)
            .map(AiIntent::note_summary)
            .ok_or_else(|| format!("no note with id {id}")),
    }
}

fn print_projection(state: &AppState, today: NaiveDate) {
    match project(state, today) {
        ViewProjection::Dashboard(view) => print_dashboard(&view),
        ViewProjection::Subject(view) => print_subject(&view),
    }

    let pending = state.tasks().iter().filter(|task| !task.is_completed).count();
    println!("\nTasks: {pending} pending");
}

fn print_dashboard(view: &DashboardView<'_>) {
    println!("== Dashboard ==");
    println!(
        "Total Notes: {}  Total Cases: {}  Upcoming Exams: {}",
        view.total_notes, view.total_cases, view.upcoming_exam_count
    );

    println!("\nUpcoming Events");
    print_events(&view.upcoming_events, view.events_empty_text);
    println!("\nRecent Notes");
    print_notes(&view.recent_notes, view.notes_empty_text);
    println!("\nRecent Cases");
    print_cases(&view.recent_cases, view.cases_empty_text);
}

fn print_subject(view: &SubjectView<'_>) {
    println!("== {} ==", view.subject);
    println!("\nUpcoming Events");
    print_events(&view.upcoming_events, &view.events_empty_text);
    println!("\nNotes");
    print_notes(&view.notes, &view.notes_empty_text);
    println!("\nCases");
    print_cases(&view.cases, &view.cases_empty_text);
}

fn print_events(events: &[&Event], empty_text: &str) {
    if events.is_empty() {
        println!("  {empty_text}");
    }
    for event in events {
        println!(
            "  [{}] {} {} ({})",
            event.id,
            event.date.format("%a %b %d %H:%M"),
            event.title,
            event.kind.as_str()
        );
    }
}

fn print_notes(notes: &[&Note], empty_text: &str) {
    if notes.is_empty() {
        println!("  {empty_text}");
    }
    for note in notes {
        let preview = note.attachment_preview();
        let names = preview
            .shown
            .iter()
            .map(|attachment| attachment.name.as_str())
            .collect::<Vec<_>>();
        let more = if preview.has_more { ", ..." } else { "" };
        println!("  [{}] {} <{}>", note.id, note.title, note.subject);
        if !names.is_empty() {
            println!("      {}{more}", names.join(", "));
        }
    }
}

fn print_cases(cases: &[&Case], empty_text: &str) {
    if cases.is_empty() {
        println!("  {empty_text}");
    }
    for case in cases {
        println!("  [{}] {}, {} <{}>", case.id, case.case_name, case.citation, case.subject);
    }
}

fn print_modal(modal: &ModalState) {
    println!("== {} ==", modal.title());
    println!("{}", modal.content());
    if !modal.sources().is_empty() {
        println!("\nSources");
        for source in modal.sources() {
            println!("  {} - {}", source.title, source.uri);
        }
    }
}
