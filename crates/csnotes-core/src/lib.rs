//! csnotes-core - Core library for csnotes
//!
//! This crate contains the note models, the HTTP client for the csnotes note
//! service, and the panel controllers (list, viewer, editor, delete) shared by
//! every csnotes front-end.

pub mod api;
pub mod app;
pub mod auth;
pub mod config;
pub mod delete;
pub mod detail;
pub mod editor;
pub mod error;
pub mod list;
pub mod models;
pub mod surface;
pub mod view;

#[cfg(test)]
mod test_support;

pub use api::{ApiResponse, FieldError, FieldErrors, FormField, NoteApi, NoteApiClient};
pub use app::{ActionOutcome, NotesApp};
pub use auth::{AuthContext, AuthProvider, LoginClient, LoginNavigator};
pub use config::ClientConfig;
pub use error::{Error, Result};
pub use models::{Note, NoteContent, NoteDraft, NoteId};
pub use surface::{EditorForm, Notice, NoteRow, PanelSurface, RowAction, RowActionKind, SubmitLabel};
pub use view::{PanelTicket, ViewState};
