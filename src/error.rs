//! Error types for emojify operations.

use thiserror::Error;

/// Errors that can occur while loading emoji data or rewriting a tree.
///
/// Failed lookups are not errors: text that matches nothing is left as is.
#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("emoji table JSON error: {0}")]
    Table(#[from] serde_json::Error),

    #[error("invalid emoji table entry: {0}")]
    InvalidEntry(String),

    #[error("custom replacement for :{shortcode}: failed: {message}")]
    Replacement { shortcode: String, message: String },

    #[error("UTF-8 decoding error: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

pub type Result<T> = std::result::Result<T, Error>;
