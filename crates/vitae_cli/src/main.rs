//! `vitae` command-line entry point.
//!
//! # Responsibility
//! - Parse flags, bootstrap logging and load the document once.
//! - Run one-shot commands, the generator export, or the interactive loop.
//!
//! # Invariants
//! - A document that fails to load is fatal: the error goes to stderr and the
//!   process exits with status 1.

use clap::Parser;
use log::{error, info};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use vitae_core::{
    default_log_level, export_document, init_logging, load_document, CommandOutput,
    GeneratorSink, JsonFileSink, OutputStatus, Session, SessionConfig,
};

const PROMPT: &str = "vitae> ";

/// Browse a resume document from the terminal and export it for the generator.
#[derive(Parser, Debug)]
#[command(name = "vitae")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Source document (JSON)
    document: PathBuf,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "VITAE_LOG_LEVEL")]
    log_level: Option<String>,

    /// Absolute directory for rolling log files; logging is off when unset
    #[arg(long, env = "VITAE_LOG_DIR")]
    log_dir: Option<PathBuf>,

    /// Write the projected generator document to this path
    #[arg(long, value_name = "PATH")]
    export: Option<PathBuf>,

    /// Run a command line and exit (repeatable)
    #[arg(short, long = "command", value_name = "LINE")]
    commands: Vec<String>,

    /// Maximum project entries shown on the timeline
    #[arg(long)]
    project_limit: Option<usize>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Some(log_dir) = cli.log_dir.as_deref() {
        let level = cli.log_level.as_deref().unwrap_or_else(|| default_log_level());
        if let Err(err) = init_logging(level, log_dir) {
            eprintln!("warning: file logging disabled: {err}");
        }
    }

    let document = match load_document(&cli.document) {
        Ok(document) => document,
        Err(err) => {
            eprintln!("{err}");
            return ExitCode::FAILURE;
        }
    };

    let mut config = SessionConfig::default();
    if let Some(limit) = cli.project_limit {
        config.timeline_project_limit = limit;
    }
    let session = Session::new(document, config);

    if let Some(path) = cli.export.as_ref() {
        if let Err(err) = export(&session, path.clone()) {
            eprintln!("export failed: {err}");
            return ExitCode::FAILURE;
        }
    }

    if !cli.commands.is_empty() {
        for line in &cli.commands {
            print_output(&session.execute(line));
        }
        return ExitCode::SUCCESS;
    }
    if cli.export.is_some() {
        return ExitCode::SUCCESS;
    }

    match run_interactive(&session) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("event=repl_exit module=cli status=error error={err}");
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}

fn export(session: &Session, path: PathBuf) -> Result<(), vitae_core::ExportError> {
    let (generated, summary) = export_document(session.document())?;
    let mut sink = JsonFileSink::new(path);
    sink.accept(&generated)?;

    println!(
        "exported {} entries to {}",
        summary.kept_entries(),
        sink.path().display()
    );
    let omitted = summary.omitted_collections();
    if !omitted.is_empty() {
        println!("omitted empty collections: {}", omitted.join(", "));
    }
    Ok(())
}

fn run_interactive(session: &Session) -> io::Result<()> {
    let name = &session.document().identity.name;
    println!("{name}. Type `help` for commands, `exit` to leave.");
    info!("event=repl_start module=cli status=ok");

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut line = String::new();
    loop {
        write!(stdout, "{PROMPT}")?;
        stdout.flush()?;

        line.clear();
        if stdin.lock().read_line(&mut line)? == 0 {
            println!();
            break;
        }
        match line.trim() {
            "exit" | "quit" => break,
            trimmed => print_output(&session.execute(trimmed)),
        }
    }

    info!("event=repl_exit module=cli status=ok");
    Ok(())
}

fn print_output(output: &CommandOutput) {
    if output.status == OutputStatus::Empty {
        return;
    }
    for line in &output.block.lines {
        println!("{line}");
    }
    if !output.block.links.is_empty() {
        println!();
        for link in &output.block.links {
            println!("[{}] {}", link.index, link.url);
        }
    }
}
