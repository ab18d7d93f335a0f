use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] csnotes_core::Error),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),
    #[error("Note ID cannot be empty")]
    EmptyNoteId,
    #[error("Note not found: {0}")]
    NoteNotFound(String),
    #[error("Note was not saved")]
    Rejected,
    #[error("The server could not complete the request")]
    RequestFailed,
    #[error("Could not reach the notes server")]
    Unreachable,
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("Not signed in. Run `csnotes login --username NAME --password PASSWORD` first.")]
    NotSignedIn,
}
