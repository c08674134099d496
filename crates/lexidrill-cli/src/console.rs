//! Terminal responder for drill sessions.

use std::io::{BufRead, Write};

use anyhow::Result;

use lexidrill_core::error::DrillError;
use lexidrill_core::scorer::Rating;
use lexidrill_core::session::{Card, Responder, SessionEntry};

use crate::prompt::Prompter;

/// Presents cards and reads guesses and ratings, one line each.
pub struct ConsoleResponder<R, W> {
    prompter: Prompter<R, W>,
}

impl<R: BufRead, W: Write> ConsoleResponder<R, W> {
    pub fn new(prompter: Prompter<R, W>) -> Self {
        Self { prompter }
    }

    fn rating_scale() -> String {
        Rating::scale()
            .map(|r| format!("{}: {}", r, r.label()))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl<R: BufRead, W: Write> Responder for ConsoleResponder<R, W> {
    fn guess(&mut self, card: &Card) -> Result<String> {
        self.prompter.say_line("")?;
        self.prompter.say_line(&format!(
            "#{}/{}: {} : ",
            card.ordinal, card.total, card.prompt
        ))?;
        self.prompter.read_line()
    }

    fn rate(&mut self, card: &Card, guess: &str) -> Result<String> {
        self.prompter.say_line(&format!(
            "Your answer: {guess}. Solution: {}.",
            card.answer
        ))?;
        self.prompter
            .say_line(&format!("How hard was it? ({})", Self::rating_scale()))?;
        self.prompter.read_line()
    }

    fn rating_rejected(&mut self, _card: &Card, _error: &DrillError) -> Result<()> {
        self.prompter.say_line("Try again with 0, 1, 2 or 3")
    }

    fn rated(&mut self, _entry: &SessionEntry) -> Result<()> {
        self.prompter.say_line("Understood. Danke!")
    }
}
