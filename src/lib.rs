// src/lib.rs
//! Typofix library.

#![deny(missing_docs)]

pub mod app;
pub mod cli;
pub mod clipboard;
pub mod config;
pub mod correction;
pub mod error;
pub mod logging;
pub mod prompts;
pub mod remote;
pub mod rewrite;
