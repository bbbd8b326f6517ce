// src/app.rs
//! Command flow: input resolution, result rendering and the config report.

#![deny(missing_docs)]

use crate::clipboard::Clipboard;
use crate::config::{Config, RECOMMENDED_MODELS, is_recommended_model};
use crate::correction::{Correction, ERROR_PREFIX, Mode};
use crate::error::TypofixResult;
use crate::rewrite;
use anyhow::Context;
use colored::Colorize;
use std::io::{BufRead, Read, Write};
use std::process::ExitCode;
use tracing::warn;

/// Printed when there is neither positional text nor piped input.
pub const NO_TEXT_MESSAGE: &str = "No text provided. Please provide text as an argument or via stdin.";
/// Printed when the resolved text is blank.
pub const EMPTY_TEXT_MESSAGE: &str = "Empty text provided.";

/// How an invocation ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// Exit 0.
    Success,
    /// Exit 1.
    Failure,
}

impl From<Status> for ExitCode {
    fn from(status: Status) -> Self {
        match status {
            Status::Success => ExitCode::SUCCESS,
            Status::Failure => ExitCode::FAILURE,
        }
    }
}

/// Where the text to correct came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    /// Usable text.
    Text(String),
    /// No arguments and stdin is a terminal.
    Missing,
    /// Arguments or stdin were blank.
    Empty,
}

impl Input {
    /// Positional `args` joined by spaces, else all of `stdin` (trimmed) unless
    /// it is a terminal.
    pub fn resolve<R: Read>(
        args: &[String],
        stdin_is_terminal: bool,
        mut stdin: R,
    ) -> TypofixResult<Self> {
        let mut text = args.join(" ");
        if text.is_empty() {
            if stdin_is_terminal {
                return Ok(Input::Missing);
            }
            let mut buf = String::new();
            stdin.read_to_string(&mut buf).context("reading stdin")?;
            text = buf.trim().to_string();
        }
        if text.trim().is_empty() {
            Ok(Input::Empty)
        } else {
            Ok(Input::Text(text))
        }
    }
}

/// The three streams an invocation talks to.
pub struct Console<R, O, E> {
    /// Answers to interactive prompts.
    pub input: R,
    /// Results, reports and prompts.
    pub out: O,
    /// Confirmations and warnings.
    pub err: E,
}

impl<R: BufRead, O: Write, E: Write> Console<R, O, E> {
    /// Bundle the streams.
    pub fn new(input: R, out: O, err: E) -> Self {
        Self { input, out, err }
    }

    /// Report a missing or blank input and fail.
    pub fn reject_input(&mut self, input: &Input) -> TypofixResult<Status> {
        let msg = match input {
            Input::Missing => NO_TEXT_MESSAGE,
            Input::Empty | Input::Text(_) => EMPTY_TEXT_MESSAGE,
        };
        writeln!(self.out, "{msg}")?;
        Ok(Status::Failure)
    }

    /// Print `correction` the way `mode` wants it, copying to `clipboard` where needed.
    pub fn render(
        &mut self,
        mode: Mode,
        correction: Correction,
        clipboard: &mut dyn Clipboard,
    ) -> TypofixResult<Status> {
        let text = match correction {
            Correction::ConfigNeeded(msg) => {
                writeln!(self.out, "{msg}")?;
                return Ok(Status::Success);
            }
            Correction::Failed(detail) => {
                writeln!(self.out, "{ERROR_PREFIX} {detail}")?;
                return Ok(Status::Failure);
            }
            Correction::Text(text) => text,
        };

        writeln!(self.out, "{text}")?;
        match mode {
            Mode::Fix => {
                self.copy(clipboard, &text, "Copied to clipboard!")?;
                Ok(Status::Success)
            }
            Mode::Suggest => Ok(Status::Success),
            Mode::Rewrite => self.choose_rewrite(&text, clipboard),
        }
    }

    fn choose_rewrite(&mut self, text: &str, clipboard: &mut dyn Clipboard) -> TypofixResult<Status> {
        let options = rewrite::parse_options(text);
        if options.is_empty() {
            writeln!(self.out, "Could not parse options for selection.")?;
            return Ok(Status::Success);
        }

        let Some(choice) = rewrite::prompt_selection(&mut self.input, &mut self.out, options.len())?
        else {
            writeln!(self.err, "Aborted!")?;
            return Ok(Status::Failure);
        };
        match rewrite::select(&options, choice) {
            Some(selected) => {
                self.copy(clipboard, selected, &format!("Option {choice} copied to clipboard!"))?;
            }
            None => writeln!(self.out, "Invalid selection.")?,
        }
        Ok(Status::Success)
    }

    fn copy(&mut self, clipboard: &mut dyn Clipboard, text: &str, confirmation: &str) -> TypofixResult<()> {
        match clipboard.copy(text) {
            Ok(()) => writeln!(self.err, "{confirmation}")?,
            Err(e) => {
                warn!("clipboard copy failed: {e:#}");
                writeln!(self.err, "Could not copy to clipboard: {e:#}")?;
            }
        }
        Ok(())
    }

    /// Print the config report, or apply `api_key`/`model` to `config`.
    ///
    /// Returns `true` when `config` changed and must be saved.
    pub fn configure(
        &mut self,
        config: &mut Config,
        api_key: Option<String>,
        model: Option<String>,
    ) -> TypofixResult<bool> {
        let api_key = api_key.filter(|k| !k.is_empty());
        let model = model.filter(|m| !m.is_empty());

        if api_key.is_none() && model.is_none() {
            writeln!(self.out, "Current Configuration:")?;
            writeln!(self.out, "API Key: {}", config.masked_api_key())?;
            writeln!(self.out, "Model: {}", config.model)?;
            writeln!(self.out, "\nRecommended Models:")?;
            for m in RECOMMENDED_MODELS {
                writeln!(self.out, "- {m}")?;
            }
            return Ok(false);
        }

        if let Some(key) = api_key {
            config.api_key = Some(key);
            writeln!(self.out, "API key updated.")?;
        }
        if let Some(model) = model {
            if !is_recommended_model(&model) {
                writeln!(
                    self.out,
                    "{} {model} is not in the recommended list: {}",
                    "Warning:".yellow(),
                    RECOMMENDED_MODELS.join(", ")
                )?;
            }
            writeln!(self.out, "Model updated to {model}.")?;
            config.model = model;
        }
        Ok(true)
    }
}
