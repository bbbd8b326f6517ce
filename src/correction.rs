// src/correction.rs
//! Correction service: one prompt-templated model call per invocation.

#![deny(missing_docs)]

use crate::config::Config;
use crate::prompts;
use crate::remote::{ChatBackend, ChatRequest, OpenAiClient};
use std::fmt;
use tracing::{debug, info};

/// Prefix marking a result that asks the user to configure the tool.
pub const CONFIG_NEEDED_PREFIX: &str = "[CONFIG_NEEDED]";
/// Prefix marking a failed remote call.
pub const ERROR_PREFIX: &str = "Error:";

/// Instruction returned when no API key is configured.
pub const CONFIG_NEEDED_MESSAGE: &str =
    "API key not configured. Run `typofix config --api-key YOUR_KEY` to set it.";

/// Stub reply for suggest mode under `--test`.
pub const STUB_SUGGESTION: &str = "Suggestion: This is a test suggestion.";
/// Stub reply for rewrite mode under `--test`.
pub const STUB_REWRITE: &str =
    "1. This is a test rewrite option 1.\n2. This is a test rewrite option 2.";

/// What to do with the input text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Fix grammar and typos only.
    #[default]
    Fix,
    /// Offer a few corrected alternatives.
    Suggest,
    /// Offer a few rewritten alternatives and let the user pick one.
    Rewrite,
}

impl Mode {
    /// Resolve the mode from flags: rewrite wins over suggest, which wins over fix.
    pub fn from_flags(suggest: bool, rewrite: bool) -> Self {
        if rewrite {
            Mode::Rewrite
        } else if suggest {
            Mode::Suggest
        } else {
            Mode::Fix
        }
    }

    /// Sampling temperature. Fix mode stays conservative.
    pub fn temperature(self) -> f32 {
        match self {
            Mode::Fix => 0.3,
            Mode::Suggest | Mode::Rewrite => 0.7,
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Mode::Fix => "fix",
            Mode::Suggest => "suggest",
            Mode::Rewrite => "rewrite",
        })
    }
}

/// Outcome of a correction request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Correction {
    /// Corrected, suggested or rewritten text.
    Text(String),
    /// The tool must be configured first; carries the instruction to show.
    ConfigNeeded(String),
    /// The remote call failed; carries the failure detail.
    Failed(String),
}

impl Correction {
    /// Decode the sentinel-prefixed string form produced by `Display`.
    ///
    /// `"[CONFIG_NEEDED] m"` becomes [`Correction::ConfigNeeded`], `"Error: d"`
    /// becomes [`Correction::Failed`], anything else is [`Correction::Text`].
    pub fn from_sentinel(s: &str) -> Self {
        if let Some(rest) = s.strip_prefix(CONFIG_NEEDED_PREFIX) {
            Correction::ConfigNeeded(rest.trim_start().to_string())
        } else if let Some(rest) = s.strip_prefix(ERROR_PREFIX) {
            Correction::Failed(rest.trim_start().to_string())
        } else {
            Correction::Text(s.to_string())
        }
    }
}

/// Sentinel-prefixed string form.
impl fmt::Display for Correction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Correction::Text(t) => f.write_str(t),
            Correction::ConfigNeeded(m) => write!(f, "{CONFIG_NEEDED_PREFIX} {m}"),
            Correction::Failed(d) => write!(f, "{ERROR_PREFIX} {d}"),
        }
    }
}

/// Deterministic reply used by `--test`.
pub fn stub_response(text: &str, mode: Mode) -> String {
    match mode {
        Mode::Suggest => STUB_SUGGESTION.to_string(),
        Mode::Rewrite => STUB_REWRITE.to_string(),
        Mode::Fix => text.to_string(),
    }
}

/// Fix, suggest or rewrite `text`.
///
/// With `test` set, no request is made and a stub is returned. Otherwise the
/// configured model is called once; a missing key or any failure of the call
/// comes back as [`Correction::ConfigNeeded`] or [`Correction::Failed`].
pub fn fix_text(text: &str, mode: Mode, test: bool, config: &Config) -> Correction {
    if test {
        debug!(%mode, "returning stub response");
        return Correction::Text(stub_response(text, mode));
    }

    let Some(api_key) = config.api_key() else {
        return Correction::ConfigNeeded(CONFIG_NEEDED_MESSAGE.to_string());
    };

    match OpenAiClient::new(api_key) {
        Ok(client) => correct_with(&client, &config.model, text, mode),
        Err(e) => Correction::Failed(format!("{e:#}")),
    }
}

/// Run the remote step of [`fix_text`] against `backend`.
pub fn correct_with(backend: &dyn ChatBackend, model: &str, text: &str, mode: Mode) -> Correction {
    let request = ChatRequest::new(
        model,
        prompts::system_prompt(mode, text),
        text,
        mode.temperature(),
    );
    info!(%mode, model, temperature = request.temperature, "calling model");
    match backend.complete(&request) {
        Ok(reply) => Correction::Text(reply.trim().to_string()),
        Err(e) => Correction::Failed(format!("{e:#}")),
    }
}
