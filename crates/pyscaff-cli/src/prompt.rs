//! Terminal implementation of the `Operator` port.
//!
//! Verification errors go to stderr; the "continue editing?" question is
//! asked with `dialoguer` when stdin is a terminal. Without a terminal (or
//! without the `interactive` feature) the answer is always "no", so a
//! scripted run never blocks.

use std::io::{self, IsTerminal};

use console::Term;
use owo_colors::OwoColorize;
use tracing::{debug, warn};

use pyscaff_core::{
    application::{ApplicationError, ports::Operator},
    domain::LocatedError,
    error::PyscaffResult,
};

/// Talks to the person running `pyscaff new`.
#[derive(Debug, Clone)]
pub struct TerminalOperator {
    non_interactive: bool,
    no_color: bool,
    term: Term,
}

impl TerminalOperator {
    pub fn new(no_color: bool) -> Self {
        Self {
            non_interactive: !io::stdin().is_terminal(),
            no_color,
            term: Term::stderr(),
        }
    }

    /// Never ask; every confirmation is answered "no".
    pub fn non_interactive(mut self) -> Self {
        self.non_interactive = true;
        self
    }

    fn format_error(&self, error: &LocatedError) -> String {
        let location = match error.line() {
            Some(line) => format!("line {line}"),
            None => "document".to_owned(),
        };
        if self.no_color {
            format!("\u{2717} {location}: {}", error.detail())
        } else {
            format!(
                "{} {}: {}",
                "\u{2717}".red().bold(),
                location.bold(),
                error.detail().red()
            )
        }
    }
}

impl Operator for TerminalOperator {
    fn report(&self, error: &LocatedError) {
        if let Err(e) = self.term.write_line(&self.format_error(error)) {
            warn!(error = %e, "Could not write to the terminal");
        }
    }

    fn confirm(&self, question: &str, default: bool) -> PyscaffResult<bool> {
        if self.non_interactive {
            debug!(question, "No terminal; declining");
            return Ok(false);
        }
        ask(question, default)
    }
}

#[cfg(feature = "interactive")]
fn ask(question: &str, default: bool) -> PyscaffResult<bool> {
    dialoguer::Confirm::new()
        .with_prompt(question)
        .default(default)
        .interact_opt()
        .map(|answer| answer.unwrap_or(false))
        .map_err(|e| {
            ApplicationError::PromptFailed {
                reason: e.to_string(),
            }
            .into()
        })
}

#[cfg(not(feature = "interactive"))]
fn ask(question: &str, _default: bool) -> PyscaffResult<bool> {
    Err(ApplicationError::PromptFailed {
        reason: format!("cannot ask '{question}': built without the 'interactive' feature"),
    }
    .into())
}
