use std::io;
use thiserror::Error;

/// Errors surfaced to drivers.
///
/// Precondition refusals (empty selection, empty clipboard, undo on an empty
/// history) are not errors; commands report them as "no mutation" instead.
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("unknown event channel '{channel}'")]
    UnknownChannel { channel: String },

    #[error("unknown {kind} '{value}' (expected one of: {expected})")]
    UnknownVariant {
        kind: String,
        value: String,
        expected: String,
    },

    #[error("Please open a file first.")]
    NoOpenFile,

    #[error("{what} iterator is exhausted")]
    Exhausted { what: String },

    #[error("invalid configuration: {message}")]
    Config { message: String },
}

impl CatalogError {
    pub fn unknown_channel(channel: impl Into<String>) -> Self {
        Self::UnknownChannel {
            channel: channel.into(),
        }
    }

    pub fn unknown_variant(kind: impl Into<String>, value: impl Into<String>, expected: &[&str]) -> Self {
        Self::UnknownVariant {
            kind: kind.into(),
            value: value.into(),
            expected: expected.join(", "),
        }
    }

    pub fn exhausted(what: impl Into<String>) -> Self {
        Self::Exhausted { what: what.into() }
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }
}

impl From<toml::de::Error> for CatalogError {
    fn from(err: toml::de::Error) -> Self {
        CatalogError::config(err.to_string())
    }
}

impl From<io::Error> for CatalogError {
    fn from(err: io::Error) -> Self {
        CatalogError::config(format!("failed to read config: {err}"))
    }
}

pub type Result<T> = std::result::Result<T, CatalogError>;
