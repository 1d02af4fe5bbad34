//! Terminal capability detection and interactive prompts

use std::time::Duration;

use dialoguer::{Confirm, Input, Select, theme::ColorfulTheme};
use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::{OwoColorize, colors::css};
use reqd::{
    prompt::{PromptError, Prompter},
    review::{Candidate, ParentProposal, ReviewError, Reviewer, Validation},
};

/// Detects whether colored output should be enabled
pub fn supports_color() -> bool {
    supports_color::on(supports_color::Stream::Stdout).is_some()
}

/// Extension trait for colorizing output
pub trait Colorize {
    /// Color as success (green)
    fn success(&self) -> String;
    /// Color as warning (amber)
    fn warning(&self) -> String;
    /// Color as info (blue)
    fn info(&self) -> String;
    /// Dim the text
    fn dim(&self) -> String;
}

impl Colorize for str {
    fn success(&self) -> String {
        if supports_color() {
            self.fg::<css::Green>().to_string()
        } else {
            self.to_string()
        }
    }

    fn warning(&self) -> String {
        if supports_color() {
            self.fg::<css::Orange>().to_string()
        } else {
            self.to_string()
        }
    }

    fn info(&self) -> String {
        if supports_color() {
            self.fg::<css::LightBlue>().to_string()
        } else {
            self.to_string()
        }
    }

    fn dim(&self) -> String {
        if supports_color() {
            self.dimmed().to_string()
        } else {
            self.to_string()
        }
    }
}

impl Colorize for String {
    fn success(&self) -> String {
        self.as_str().success()
    }

    fn warning(&self) -> String {
        self.as_str().warning()
    }

    fn info(&self) -> String {
        self.as_str().info()
    }

    fn dim(&self) -> String {
        self.as_str().dim()
    }
}

fn backend(error: dialoguer::Error) -> PromptError {
    PromptError::Backend(error.to_string())
}

/// Answers prompts on the controlling terminal.
#[derive(Debug, Default)]
pub struct TerminalPrompter;

impl Prompter for TerminalPrompter {
    fn select(&mut self, title: &str, options: &[String]) -> Result<Option<usize>, PromptError> {
        Select::with_theme(&ColorfulTheme::default())
            .with_prompt(title)
            .items(options)
            .default(0)
            .interact_opt()
            .map_err(backend)
    }

    fn confirm(&mut self, question: &str, default: bool) -> Result<bool, PromptError> {
        Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt(question)
            .default(default)
            .interact()
            .map_err(backend)
    }

    fn input(&mut self, title: &str, initial: &str) -> Result<String, PromptError> {
        Input::<String>::with_theme(&ColorfulTheme::default())
            .with_prompt(title)
            .with_initial_text(initial)
            .allow_empty(true)
            .interact_text()
            .map_err(backend)
    }

    fn notify(&mut self, message: &str) {
        println!("{}", message.info());
    }
}

/// Shows a spinner while the wrapped reviewer is waiting on the network.
pub struct WithSpinner<R>(pub R);

impl<R> WithSpinner<R> {
    fn spin<T>(message: &'static str, call: impl FnOnce() -> T) -> T {
        let spinner = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::with_template("{spinner} {msg}") {
            spinner.set_style(style);
        }
        spinner.set_message(message);
        spinner.enable_steady_tick(Duration::from_millis(100));

        let result = call();
        spinner.finish_and_clear();
        result
    }
}

impl<R: Reviewer> Reviewer for WithSpinner<R> {
    fn validate(&self, text: &str) -> Result<Validation, ReviewError> {
        Self::spin("Waiting for review", || self.0.validate(text))
    }

    fn propose_parent(
        &self,
        text: &str,
        candidates: &[Candidate],
    ) -> Result<ParentProposal, ReviewError> {
        Self::spin("Looking for a parent", || {
            self.0.propose_parent(text, candidates)
        })
    }
}
