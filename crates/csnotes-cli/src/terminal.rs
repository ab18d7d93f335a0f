//! Line-oriented [`PanelSurface`] for the terminal.
//!
//! Only the visible panel prints. Rows and the editor form are kept so the
//! shell can resolve row actions and prefill prompts.

use std::io::{self, Write};
use std::sync::{Mutex, PoisonError};

use csnotes_core::{
    EditorForm, FieldError, Note, NoteId, NoteRow, Notice, PanelSurface, RowActionKind, ViewState,
};

#[derive(Default)]
struct TerminalState {
    visible: Option<ViewState>,
    rows: Vec<NoteRow>,
    form: Option<EditorForm>,
}

pub struct TerminalSurface {
    state: Mutex<TerminalState>,
    assume_yes: bool,
}

impl TerminalSurface {
    pub fn new(assume_yes: bool) -> Self {
        Self {
            state: Mutex::new(TerminalState::default()),
            assume_yes,
        }
    }

    pub fn rows(&self) -> Vec<NoteRow> {
        self.lock().rows.clone()
    }

    pub fn row(&self, id: &NoteId) -> Option<NoteRow> {
        self.lock().rows.iter().find(|row| row.id == *id).cloned()
    }

    pub fn editor_form(&self) -> Option<EditorForm> {
        self.lock().form.clone()
    }

    fn is_visible(&self, panel: ViewState) -> bool {
        self.lock().visible == Some(panel)
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, TerminalState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl PanelSurface for TerminalSurface {
    fn set_visible(&self, panel: ViewState, visible: bool) {
        let mut state = self.lock();
        if visible {
            state.visible = Some(panel);
        } else if state.visible == Some(panel) {
            state.visible = None;
        }
    }

    fn replace_rows(&self, rows: &[NoteRow]) {
        self.lock().rows = rows.to_vec();
        if !self.is_visible(ViewState::List) {
            return;
        }
        if rows.is_empty() {
            println!("(no notes)");
        }
        for row in rows {
            println!("{}", format_row(row));
        }
    }

    fn clear_viewer(&self) {}

    fn show_note(&self, note: &Note) {
        if self.is_visible(ViewState::Viewer) {
            for line in format_note(note) {
                println!("{line}");
            }
        }
    }

    fn fill_editor(&self, form: &EditorForm) {
        self.lock().form = Some(form.clone());
    }

    fn show_field_error(&self, error: Option<&FieldError>) {
        if let Some(error) = error {
            eprintln!("{}", format_field_error(error));
        }
    }

    fn show_notice(&self, panel: ViewState, notice: Notice) {
        if self.is_visible(panel) {
            eprintln!("! {}", notice.message());
        }
    }

    fn confirm_delete(&self, id: &NoteId) -> bool {
        if self.assume_yes {
            return true;
        }
        print!("Delete note {id}? [y/N] ");
        if let Err(error) = io::stdout().flush() {
            tracing::warn!("Failed to flush confirmation prompt: {}", error);
        }
        let mut answer = String::new();
        match io::stdin().read_line(&mut answer) {
            Ok(_) => parse_confirmation(&answer),
            Err(error) => {
                tracing::warn!("Failed to read confirmation: {}", error);
                false
            }
        }
    }
}

pub fn format_row(row: &NoteRow) -> String {
    let actions = RowActionKind::ALL
        .iter()
        .map(|kind| kind.label().to_lowercase())
        .collect::<Vec<_>>()
        .join("|");
    format!("{}  [{actions}]", row.label())
}

pub fn format_note(note: &Note) -> Vec<String> {
    vec![
        format!("id:      {}", note.id),
        format!("title:   {}", note.title),
        format!("date:    {}", note.date),
        format!("content: {}", note.content.display_text()),
    ]
}

pub fn format_field_error(error: &FieldError) -> String {
    format!("{}: {}", error.field, error.message)
}

/// Only an explicit yes confirms.
pub fn parse_confirmation(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}
