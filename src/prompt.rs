//! The input seam for interactive flows.
//!
//! Every interactive step (selecting from a list, confirming, entering text)
//! suspends on a [`Prompter`] and resumes with exactly one answer. The CLI
//! implements it on a terminal; tests implement it with a script.

use std::io;

/// Errors raised while waiting for user input.
#[derive(Debug, thiserror::Error)]
pub enum PromptError {
    /// Reading from or writing to the terminal failed.
    #[error("failed to interact with terminal: {0}")]
    Io(#[from] io::Error),

    /// The prompt backend failed for another reason.
    #[error("prompt failed: {0}")]
    Backend(String),
}

/// A source of answers to interactive questions.
pub trait Prompter {
    /// Offer `options` under `title` and return the chosen index.
    ///
    /// `None` means the user backed out without choosing.
    ///
    /// # Errors
    ///
    /// Returns an error if input could not be read.
    fn select(&mut self, title: &str, options: &[String]) -> Result<Option<usize>, PromptError>;

    /// Ask a yes/no question.
    ///
    /// # Errors
    ///
    /// Returns an error if input could not be read.
    fn confirm(&mut self, question: &str, default: bool) -> Result<bool, PromptError>;

    /// Ask for a line of text, pre-filled with `initial`.
    ///
    /// # Errors
    ///
    /// Returns an error if input could not be read.
    fn input(&mut self, title: &str, initial: &str) -> Result<String, PromptError>;

    /// Show an informational message. No answer is expected.
    fn notify(&mut self, message: &str);
}
