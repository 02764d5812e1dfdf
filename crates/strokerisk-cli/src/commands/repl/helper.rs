use std::borrow::Cow::{self, Borrowed, Owned};

use colored::Colorize;
use rustyline::completion::{Completer, Pair};
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::validate::Validator;
use rustyline::{Context, Helper};
use strokerisk_core::auth::FederatedProvider;
use strokerisk_core::scan::RiskFilter;
use strum::IntoEnumIterator;

pub const COMMANDS: [&str; 14] = [
    "/login",
    "/signup",
    "/oauth",
    "/logout",
    "/profile",
    "/scan",
    "/results",
    "/history",
    "/analytics",
    "/hospitals",
    "/emergency",
    "/whoami",
    "/help",
    "/quit",
];

/// Completion, highlighting and hints for slash commands and their
/// arguments.
#[derive(Clone)]
pub struct ReplHelper {
    commands: Vec<String>,
    filters: Vec<String>,
    providers: Vec<String>,
    /// Set while a secret is being typed: input renders as `*` and no
    /// completions or hints are offered.
    masking: bool,
}

impl ReplHelper {
    pub fn new() -> Self {
        Self {
            commands: COMMANDS.iter().map(|c| c.to_string()).collect(),
            filters: RiskFilter::iter().map(|f| f.to_string()).collect(),
            providers: FederatedProvider::iter().map(|p| p.to_string()).collect(),
            masking: false,
        }
    }

    pub fn set_masking(&mut self, masking: bool) {
        self.masking = masking;
    }

    fn arguments_for(&self, command: &str) -> &[String] {
        match command {
            "/history" => &self.filters,
            "/oauth" => &self.providers,
            _ => &[],
        }
    }
}

impl Helper for ReplHelper {}

impl Completer for ReplHelper {
    type Candidate = Pair;

    fn complete(&self, line: &str, pos: usize, _ctx: &Context<'_>) -> rustyline::Result<(usize, Vec<Pair>)> {
        let line = &line[..pos];
        if self.masking || !line.starts_with('/') {
            return Ok((0, vec![]));
        }

        let (start, prefix, pool) = match line.split_once(' ') {
            Some((command, arg)) => (command.len() + 1, arg, self.arguments_for(command)),
            None => (0, line, self.commands.as_slice()),
        };
        let candidates = pool
            .iter()
            .filter(|c| c.starts_with(prefix))
            .map(|c| Pair {
                display: c.clone(),
                replacement: c.clone(),
            })
            .collect();
        Ok((start, candidates))
    }
}

impl Highlighter for ReplHelper {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        if self.masking {
            Owned("*".repeat(line.chars().count()))
        } else if line.starts_with('/') {
            Owned(line.bright_cyan().to_string())
        } else {
            Borrowed(line)
        }
    }

    fn highlight_char(&self, _line: &str, _pos: usize, _forced: bool) -> bool {
        true
    }
}

impl Hinter for ReplHelper {
    type Hint = String;

    fn hint(&self, line: &str, pos: usize, _ctx: &Context<'_>) -> Option<String> {
        let line = &line[..pos];
        if !self.masking && line.starts_with('/') && !line.contains(' ') {
            self.commands
                .iter()
                .find(|cmd| cmd.starts_with(line) && cmd.len() > line.len())
                .map(|cmd| cmd[line.len()..].to_string())
        } else {
            None
        }
    }
}

impl Validator for ReplHelper {}
