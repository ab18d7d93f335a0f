//! Data models for csnotes

mod note;

pub use note::{Note, NoteContent, NoteDraft, NoteId};
