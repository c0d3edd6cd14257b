//! The console loop.
//!
//! Interactive sessions use `rustyline` for line editing and history.
//! Scripted sessions (`--command`, `--script`) feed lines through the same
//! dispatcher without a prompt.

use std::fs;
use std::io::{self, Read, Write};

use anyhow::{anyhow, Context, Result};
use hbnb_console::{Dispatcher, Flow};
use hbnb_store::{FileStorage, Storage};
use tracing::debug;

use crate::cli::Cli;

pub const PROMPT: &str = "(hbnb) ";

pub fn run(cli: &Cli) -> Result<()> {
    let (store, report) = FileStorage::open(&cli.file)
        .with_context(|| format!("failed to load {}", cli.file.display()))?;
    debug!(
        path = %cli.file.display(),
        loaded = report.loaded,
        skipped = report.skipped,
        "store opened"
    );

    let mut dispatcher = Dispatcher::new(store, io::stdout());
    if cli.is_scripted() {
        let lines = script_lines(cli)?;
        run_script(&mut dispatcher, &lines)
    } else {
        run_interactive(&mut dispatcher)
    }
}

/// Collect lines from `--script` followed by each `--command`.
fn script_lines(cli: &Cli) -> Result<Vec<String>> {
    let mut lines = Vec::new();
    if let Some(path) = &cli.script {
        let text = if path.as_os_str() == "-" {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            buf
        } else {
            fs::read_to_string(path)
                .with_context(|| format!("failed to read script {}", path.display()))?
        };
        lines.extend(text.lines().map(str::to_string));
    }
    lines.extend(cli.commands.iter().cloned());
    Ok(lines)
}

/// Run lines in order until one of them exits the console.
pub fn run_script<S: Storage, W: Write>(
    dispatcher: &mut Dispatcher<S, W>,
    lines: &[String],
) -> Result<()> {
    for line in lines {
        if dispatcher.run_line(line)? == Flow::Exit {
            break;
        }
    }
    Ok(())
}

fn run_interactive<S: Storage, W: Write>(dispatcher: &mut Dispatcher<S, W>) -> Result<()> {
    use rustyline::error::ReadlineError;
    use rustyline::DefaultEditor;

    let mut rl = DefaultEditor::new().map_err(|e| anyhow!("failed to init rustyline: {e}"))?;

    loop {
        let line = match rl.readline(PROMPT) {
            Ok(line) => line,
            // Ctrl-D behaves like the EOF command.
            Err(ReadlineError::Eof) => "EOF".to_string(),
            Err(ReadlineError::Interrupted) => continue,
            Err(e) => return Err(anyhow!("readline error: {e}")),
        };

        if !line.trim().is_empty() {
            rl.add_history_entry(line.as_str())
                .map_err(|e| anyhow!("failed to record history: {e}"))?;
        }

        if dispatcher.run_line(&line)? == Flow::Exit {
            break;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use hbnb_store::InMemoryStorage;

    fn lines(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn script_runs_every_line() {
        let mut d = Dispatcher::new(InMemoryStorage::new(), Vec::new());
        run_script(&mut d, &lines(&["create User", "create User", "count User"])).unwrap();
        let out = String::from_utf8(d.output().clone()).unwrap();
        assert_eq!(out.lines().last(), Some("2"));
    }

    #[test]
    fn script_stops_at_quit() {
        let mut d = Dispatcher::new(InMemoryStorage::new(), Vec::new());
        run_script(&mut d, &lines(&["create User", "quit", "create User"])).unwrap();
        assert_eq!(d.store().len(), 1);
    }

    #[test]
    fn script_continues_past_errors() {
        let mut d = Dispatcher::new(InMemoryStorage::new(), Vec::new());
        run_script(&mut d, &lines(&["create Nope", "", "create City"])).unwrap();
        let out = String::from_utf8(d.output().clone()).unwrap();
        assert!(out.starts_with("** class doesn't exist **\n"));
        assert_eq!(d.store().len(), 1);
    }

    #[test]
    fn script_lines_reads_file_then_commands() {
        let dir = tempfile::tempdir().unwrap();
        let script = dir.path().join("setup.hbnb");
        fs::write(&script, "create State\nall\n").unwrap();
        let cli = Cli {
            file: dir.path().join("file.json"),
            verbose: false,
            commands: vec!["count State".into()],
            script: Some(script),
        };
        assert_eq!(
            script_lines(&cli).unwrap(),
            vec!["create State", "all", "count State"]
        );
    }

    #[test]
    fn run_persists_between_sessions() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("file.json");
        let first = Cli {
            file: file.clone(),
            verbose: false,
            commands: vec!["create Place".into(), "create Place".into()],
            script: None,
        };
        run(&first).unwrap();

        let (store, report) = FileStorage::open(&file).unwrap();
        assert_eq!(report.loaded, 2);
        assert_eq!(store.all().len(), 2);
    }

    #[test]
    fn run_fails_on_malformed_store() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("file.json");
        fs::write(&file, "[]").unwrap();
        let cli = Cli {
            file: file.clone(),
            verbose: false,
            commands: vec!["all".into()],
            script: None,
        };
        let err = run(&cli).unwrap_err();
        assert!(err.to_string().contains("failed to load"));
        assert_eq!(fs::read_to_string(&file).unwrap(), "[]");
    }
}
