use anyhow::Result;
use colored::Colorize;
use rustyline::Editor;
use rustyline::error::ReadlineError;
use rustyline::history::DefaultHistory;
use strokerisk_core::form::FieldErrorMap;

use super::helper::ReplHelper;

pub type ReplEditor = Editor<ReplHelper, DefaultHistory>;

/// Reads one answer. `None` means the user cancelled (Ctrl-C / Ctrl-D).
pub fn ask(rl: &mut ReplEditor, prompt: &str) -> Result<Option<String>> {
    match rl.readline(&format!("{} ", prompt.bright_white())) {
        Ok(line) => Ok(Some(line.trim().to_string())),
        Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => {
            println!("{}", "Cancelled.".yellow());
            Ok(None)
        }
        Err(err) => Err(err.into()),
    }
}

/// Reads a secret with the typed characters masked. The answer is not
/// trimmed.
pub fn ask_secret(rl: &mut ReplEditor, prompt: &str) -> Result<Option<String>> {
    set_masking(rl, true);
    let answer = rl.readline(&format!("{} ", prompt.bright_white()));
    set_masking(rl, false);

    match answer {
        Ok(line) => Ok(Some(line)),
        Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => {
            println!("{}", "Cancelled.".yellow());
            Ok(None)
        }
        Err(err) => Err(err.into()),
    }
}

fn set_masking(rl: &mut ReplEditor, masking: bool) {
    if let Some(helper) = rl.helper_mut() {
        helper.set_masking(masking);
    }
}

pub fn print_field_errors(errors: &FieldErrorMap) {
    for (field, error) in errors {
        println!("  {} {}", format!("{}:", field).bold().red(), error.message.red());
    }
}
