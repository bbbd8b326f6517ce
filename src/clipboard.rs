// src/clipboard.rs
//! Write-only clipboard access.

#![deny(missing_docs)]

use crate::error::TypofixResult;
use anyhow::{Context, anyhow, bail};
use std::env;
use std::io::Write;
use std::process::{Command, Stdio};
use tracing::debug;

/// Environment variable naming a shell command that receives the text on stdin
/// in place of the desktop clipboard.
pub const CLIPBOARD_CMD_ENV: &str = "TYPOFIX_CLIPBOARD_CMD";

/// Destination for copied text.
pub trait Clipboard {
    /// Replace the clipboard contents with `text`.
    fn copy(&mut self, text: &str) -> TypofixResult<()>;
}

/// The desktop clipboard, or the command named by `$TYPOFIX_CLIPBOARD_CMD`.
#[derive(Debug, Default)]
pub struct SystemClipboard {
    command: Option<String>,
}

impl SystemClipboard {
    /// Honour `$TYPOFIX_CLIPBOARD_CMD` when it is set.
    pub fn from_env() -> Self {
        Self {
            command: env::var(CLIPBOARD_CMD_ENV)
                .ok()
                .filter(|c| !c.trim().is_empty()),
        }
    }

    /// Always use the desktop clipboard.
    pub fn native() -> Self {
        Self { command: None }
    }
}

impl Clipboard for SystemClipboard {
    fn copy(&mut self, text: &str) -> TypofixResult<()> {
        match &self.command {
            Some(cmd) => {
                debug!(%cmd, "copying with configured command");
                pipe_into(shell(cmd), text)
            }
            None => cli_clipboard::set_contents(text.to_owned())
                .map_err(|e| anyhow!("clipboard unavailable: {e}")),
        }
    }
}

fn shell(cmd: &str) -> Command {
    if cfg!(windows) {
        let mut c = Command::new("cmd");
        c.args(["/C", cmd]);
        c
    } else {
        let mut c = Command::new("sh");
        c.args(["-c", cmd]);
        c
    }
}

fn pipe_into(mut command: Command, text: &str) -> TypofixResult<()> {
    let mut child = command
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .context("failed to spawn clipboard command")?;
    let written = match child.stdin.take() {
        Some(mut stdin) => stdin.write_all(text.as_bytes()),
        None => Ok(()),
    };
    // stdin is closed here; always reap the child before reporting.
    let status = child.wait()?;
    written.context("writing to clipboard command")?;
    if !status.success() {
        bail!("clipboard command exited with {status}");
    }
    Ok(())
}
