//! Error types for the fallible edges around the pipeline.
//!
//! Extraction and normalization never fail; these cover settings actions
//! and registry lookups. Host I/O reports through `anyhow`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum BarError {
    #[error("Unknown setting: {0}")]
    UnknownSetting(String),

    #[error("Invalid value for {field}: {reason}")]
    InvalidSetting { field: String, reason: String },

    #[error("Unknown source: {0}")]
    UnknownSource(String),

    #[error("Unknown displayer: {0}")]
    UnknownDisplayer(String),
}

pub type BarResult<T> = Result<T, BarError>;
