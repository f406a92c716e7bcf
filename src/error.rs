// SPDX-License-Identifier: MPL-2.0
//! Crate error type.
//!
//! Errors only arise while loading configuration or exporting telemetry.
//! Manager operations themselves never fail.

use thiserror::Error;

use crate::domain::error::PolicyError;

#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("config serialize error: {0}")]
    ConfigSerialize(#[from] toml::ser::Error),

    #[error("invalid toast policy: {0}")]
    Policy(#[from] PolicyError),

    #[error("telemetry export error: {0}")]
    Export(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
