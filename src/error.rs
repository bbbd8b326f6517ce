// src/error.rs
//! Error handling for typofix.

#![deny(missing_docs)]

/// TypofixResult is alias for anyhow
pub type TypofixResult<T> = anyhow::Result<T>;
