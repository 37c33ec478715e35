//! Interactive shell inside an activated environment

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;

use super::run::run_command;
use crate::environment::EnvVars;
use crate::error::Result;

/// Prompt shown before each line
pub fn prompt(env_name: &str) -> String {
    format!("[{env_name}]: ")
}

/// Banner printed when the shell starts
pub fn intro() -> String {
    format!("### conda-shell v{}", env!("CARGO_PKG_VERSION"))
}

/// Where line history is kept between sessions
pub fn history_path() -> Option<PathBuf> {
    dirs::data_dir().map(|dir| dir.join("conda-shell").join("history.txt"))
}

/// Run one input line; blank lines do nothing
pub fn execute_line(line: &str, env: &EnvVars) -> Result<()> {
    if line.trim().is_empty() {
        return Ok(());
    }
    run_command(line.trim_end(), &[], env)
}

/// Read and run lines until end of input
///
/// A failing line is reported and the loop goes on. Ctrl-C drops the current
/// line.
pub fn run_repl(env_name: &str, env: &EnvVars) -> Result<()> {
    let mut editor = DefaultEditor::new()?;
    let history = history_path();
    load_history(&mut editor, history.as_deref());

    println!("{}", intro());
    let prompt = prompt(env_name);

    loop {
        match editor.readline(&prompt) {
            Ok(line) => {
                if !line.trim().is_empty() {
                    if let Err(e) = editor.add_history_entry(line.as_str()) {
                        tracing::warn!("Failed to add history entry: {}", e);
                    }
                }
                if let Err(e) = execute_line(&line, env) {
                    eprintln!("Error: {e}");
                }
            }
            Err(ReadlineError::Interrupted) => {}
            Err(ReadlineError::Eof) => {
                println!("\nExiting conda-shell...");
                break;
            }
            Err(e) => {
                save_history(&mut editor, history.as_deref());
                return Err(e.into());
            }
        }
    }

    save_history(&mut editor, history.as_deref());
    Ok(())
}

fn load_history(editor: &mut DefaultEditor, path: Option<&Path>) {
    let Some(path) = path else {
        return;
    };
    if let Err(e) = editor.load_history(path) {
        let not_found = matches!(&e, ReadlineError::Io(io) if io.kind() == ErrorKind::NotFound);
        if !not_found {
            tracing::warn!("Failed to load history: {}", e);
        }
    }
}

fn save_history(editor: &mut DefaultEditor, path: Option<&Path>) {
    let Some(path) = path else {
        return;
    };
    if let Some(parent) = path.parent() {
        if let Err(e) = std::fs::create_dir_all(parent) {
            tracing::warn!("Failed to create history directory: {}", e);
            return;
        }
    }
    if let Err(e) = editor.save_history(path) {
        tracing::warn!("Failed to save history: {}", e);
    }
}
