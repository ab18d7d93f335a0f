//! Rendering seam between the controllers and a concrete front-end.
//!
//! Controllers describe what to show; a front-end (terminal, web view, test
//! recorder) decides how. Panel visibility is only ever changed through
//! [`crate::view::ViewStateController`].

use crate::api::FieldError;
use crate::models::{Note, NoteId};
use crate::view::ViewState;

/// Which action a row control triggers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RowActionKind {
    Show,
    Edit,
    Delete,
}

impl RowActionKind {
    pub const ALL: [Self; 3] = [Self::Show, Self::Edit, Self::Delete];

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Show => "Show",
            Self::Edit => "Edit",
            Self::Delete => "Delete",
        }
    }
}

/// An action bound to one note by one list rebuild.
///
/// Actions carry the generation of the rebuild that produced them, so an
/// action from rows that have since been replaced can be recognized and
/// dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowAction {
    pub kind: RowActionKind,
    pub note_id: NoteId,
    pub(crate) generation: u64,
}

impl RowAction {
    #[must_use]
    pub const fn generation(&self) -> u64 {
        self.generation
    }
}

/// One rendered list entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteRow {
    pub id: NoteId,
    pub title: String,
    pub date: String,
    pub actions: [RowAction; 3],
}

impl NoteRow {
    pub(crate) fn bind(note: &Note, generation: u64) -> Self {
        let actions = RowActionKind::ALL.map(|kind| RowAction {
            kind,
            note_id: note.id.clone(),
            generation,
        });
        Self {
            id: note.id.clone(),
            title: note.title.clone(),
            date: note.date.clone(),
            actions,
        }
    }

    /// `id / title / date`
    #[must_use]
    pub fn label(&self) -> String {
        format!("{} / {} / {}", self.id, self.title, self.date)
    }

    #[must_use]
    pub fn action(&self, kind: RowActionKind) -> &RowAction {
        match kind {
            RowActionKind::Show => &self.actions[0],
            RowActionKind::Edit => &self.actions[1],
            RowActionKind::Delete => &self.actions[2],
        }
    }
}

/// Label on the editor's submit control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitLabel {
    Create,
    Update,
}

impl SubmitLabel {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Create => "Create",
            Self::Update => "Update",
        }
    }
}

/// Editor form contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorForm {
    pub title: String,
    pub content: String,
    pub submit_label: SubmitLabel,
}

impl EditorForm {
    #[must_use]
    pub const fn blank(submit_label: SubmitLabel) -> Self {
        Self {
            title: String::new(),
            content: String::new(),
            submit_label,
        }
    }
}

/// Explicit placeholder states for outcomes the panels would otherwise
/// leave blank.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    /// The requested note does not exist.
    NotFound,
    /// The request never completed.
    Unreachable,
}

impl Notice {
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::NotFound => "Note not found.",
            Self::Unreachable => "Could not reach the notes server.",
        }
    }
}

pub trait PanelSurface: Send + Sync + 'static {
    /// Toggle one panel. Called only by the view-state controller.
    fn set_visible(&self, panel: ViewState, visible: bool);

    /// Replace every list row; previous rows and their actions are gone.
    fn replace_rows(&self, rows: &[NoteRow]);

    fn clear_viewer(&self);

    fn show_note(&self, note: &Note);

    fn fill_editor(&self, form: &EditorForm);

    /// Show `error` beneath its control and hide all other field messages;
    /// `None` hides them all.
    fn show_field_error(&self, error: Option<&FieldError>);

    fn show_notice(&self, panel: ViewState, notice: Notice);

    /// Blocking confirmation before a note is deleted.
    fn confirm_delete(&self, id: &NoteId) -> bool;
}
