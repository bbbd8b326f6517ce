// src/bin/typofix.rs
//! Typofix CLI binary.

#![deny(missing_docs)]

use clap::Parser;
use std::io::{self, IsTerminal};
use std::process::ExitCode;
use tracing::info;

use typofix::app::{Console, Input, Status};
use typofix::cli;
use typofix::clipboard::SystemClipboard;
use typofix::config::Config;
use typofix::correction::fix_text;
use typofix::error::TypofixResult;
use typofix::logging;

fn main() -> TypofixResult<ExitCode> {
    let args = cli::Cli::parse();
    logging::init(args.verbose, args.quiet);

    let stdin = io::stdin();
    let mut console = Console::new(stdin.lock(), io::stdout().lock(), io::stderr().lock());

    let status = match args.command {
        // config: report or update the stored API key and model.
        Some(cli::Commands::Config { api_key, model }) => {
            let mut config = Config::load();
            if console.configure(&mut config, api_key, model)? {
                let path = config.save()?;
                info!(path = %path.display(), "configuration saved");
            }
            Status::Success
        }
        // default: correct the given text.
        None => {
            let mode = args.fix.mode();
            let stdin_is_terminal = io::stdin().is_terminal();
            match Input::resolve(&args.fix.text, stdin_is_terminal, &mut console.input)? {
                Input::Text(text) => {
                    let config = Config::load();
                    let correction = fix_text(&text, mode, args.fix.test, &config);
                    console.render(mode, correction, &mut SystemClipboard::from_env())?
                }
                rejected => console.reject_input(&rejected)?,
            }
        }
    };

    Ok(status.into())
}
