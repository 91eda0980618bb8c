use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use nimbus_core::{welcome_message, FileTaskStore, Session, DEFAULT_DATA_FILE};
use tracing_subscriber::EnvFilter;

const SEPARATOR: &str = "____________________________________________________________";

#[derive(Parser)]
#[command(name = "nimbus")]
#[command(about = "A line-oriented task tracker", long_about = None)]
struct Cli {
    /// Path to the task data file
    #[arg(long, default_value = DEFAULT_DATA_FILE)]
    file: PathBuf,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let store = FileTaskStore::new(&cli.file);
    let mut session = Session::new(store)
        .with_context(|| format!("could not load tasks from {}", cli.file.display()))?;

    print_framed(welcome_message());

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    while let Some(line) = lines.next() {
        let line = line.context("failed to read from stdin")?;

        // Clearing is irreversible, so the text UI confirms it first.
        if line.trim().eq_ignore_ascii_case("clear") && !confirm_clear(&mut lines)? {
            print_framed("Task clearing cancelled.");
            continue;
        }

        let reply = session.handle(&line);
        print_framed(&reply.text);
        if reply.exit {
            break;
        }
    }

    Ok(())
}

fn confirm_clear(lines: &mut impl Iterator<Item = io::Result<String>>) -> Result<bool> {
    print_framed("WARNING: This will delete ALL tasks permanently.\nAre you sure you want to proceed? (y/n)");
    io::stdout().flush().ok();
    match lines.next() {
        Some(answer) => {
            let answer = answer.context("failed to read from stdin")?;
            Ok(answer.trim().eq_ignore_ascii_case("y"))
        }
        None => Ok(false),
    }
}

fn print_framed(text: &str) {
    println!("{SEPARATOR}");
    println!("{text}");
    println!("{SEPARATOR}");
}
