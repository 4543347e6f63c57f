//! Offline inspector for dumped school payloads.
//!
//! # Responsibility
//! - Load `menu.json` and journal detail files through `SyncService`.
//! - Print the catalogue tree or one journal's contents.

use clap::{Parser, Subcommand};
use edujournal_core::{
    default_log_level, init_logging, DirectoryPayloadSource, Entity, Journal, JournalId,
    LogConfig, SchoolGraph, SyncService,
};
use log::info;
use std::error::Error;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "edujournal")]
#[command(about = "Inspect school journal payload dumps", version)]
struct Cli {
    /// Directory holding `menu.json` and `journals/<id>.json`
    #[arg(long)]
    data_dir: PathBuf,

    /// trace|debug|info|warn|error
    #[arg(long, default_value = default_log_level())]
    log_level: String,

    /// Absolute directory for rotating log files (stderr when omitted)
    #[arg(long)]
    log_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print sections, their groups and the journals of each group
    Menu,
    /// Load one journal and print its students, lessons, controls and marks
    Journal {
        /// Journal identifier as listed in the menu
        id: JournalId,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    init_logging(&LogConfig {
        level: cli.log_level,
        log_dir: cli.log_dir,
    })?;

    info!(
        "event=cli_start module=cli data_dir={} version={}",
        cli.data_dir.display(),
        edujournal_core::core_version()
    );
    let mut service = SyncService::new(DirectoryPayloadSource::new(cli.data_dir));
    service.refresh_menu()?;

    match cli.command {
        Commands::Menu => print_menu(service.graph()),
        Commands::Journal { id } => {
            let journal = service.refresh_journal(id)?;
            print_journal(&journal.borrow());
        }
    }
    Ok(())
}

fn print_menu(graph: &SchoolGraph) {
    for section in graph.sections() {
        let section = section.borrow();
        println!("{} [{}]", section.name, section.id());
        for group in section.groups() {
            let group = group.borrow();
            println!("  {} [{}]", group.name, group.id());
            for journal in group.journals() {
                let journal = journal.borrow();
                println!(
                    "    journal {} ({})",
                    journal.id(),
                    journal.subject().borrow().name
                );
            }
        }
    }
    println!("cached entities: {}", graph.counts().total());
}

fn print_journal(journal: &Journal) {
    let group = match &journal.group() {
        Some(group) => group.borrow().name.clone(),
        None => "-".to_string(),
    };
    println!(
        "journal {}: {} / {}",
        journal.id(),
        group,
        journal.subject().borrow().name
    );

    println!("students:");
    for student in journal.students() {
        let student = student.borrow();
        println!("  [{}] {}", student.id(), student.name);
    }

    println!("lessons:");
    for lesson in journal.lessons() {
        let lesson = lesson.borrow();
        let period = match &journal.periods().get(|period| period.contains(lesson.date)) {
            Some(period) => period.borrow().id().to_string(),
            None => "-".to_string(),
        };
        println!(
            "  #{} {} period={} {}",
            lesson.number,
            lesson.date,
            period,
            lesson.theme.as_deref().unwrap_or("")
        );
    }

    println!("controls:");
    for control in journal.controls() {
        let control = control.borrow();
        println!(
            "  [{}] {} ({}) lesson={} {}",
            control.id(),
            control.name(),
            control.shortname(),
            control.lesson().borrow().number,
            control.text
        );
    }

    println!("marks:");
    for mark in journal.marks() {
        let mark = mark.borrow();
        println!(
            "  {} on control {}: {} ({})",
            mark.student().borrow().name,
            mark.control().borrow().id(),
            mark.text,
            mark.name()
        );
    }
}
