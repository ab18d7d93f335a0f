//! Editor panel state machine.
//!
//! The editor is `Closed` or open in one [`EditorMode`]. Entering a mode
//! replaces the previous session outright, so `submit` always dispatches on
//! the mode of the most recent entry and never on a stale one.

use std::sync::{Arc, Mutex, PoisonError};

use crate::api::{ApiResponse, FieldErrors, NoteApi};
use crate::list::{NoteListSynchronizer, RefreshOutcome};
use crate::models::{Note, NoteDraft, NoteId};
use crate::surface::{EditorForm, Notice, PanelSurface, SubmitLabel};
use crate::view::{PanelTicket, ViewState, ViewStateController};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorMode {
    Create,
    Update(NoteId),
}

impl EditorMode {
    const fn submit_label(&self) -> SubmitLabel {
        match self {
            Self::Create => SubmitLabel::Create,
            Self::Update(_) => SubmitLabel::Update,
        }
    }
}

/// Result of populating the editor for an existing note.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    Loaded(Note),
    NotFound,
    Failed,
    Unreachable,
    Discarded,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Saved; the list was refreshed with this outcome.
    Saved(RefreshOutcome),
    /// Validation failed; the editor stays open.
    Rejected(FieldErrors),
    /// The server reported errors; the editor stays open.
    Failed,
    Unreachable,
    /// No open editor session; nothing was sent.
    Ignored,
}

#[derive(Debug, Clone)]
struct Session {
    mode: EditorMode,
    ticket: PanelTicket,
}

pub struct NoteEditorController<A, S> {
    api: Arc<A>,
    surface: Arc<S>,
    view: Arc<ViewStateController<S>>,
    list: Arc<NoteListSynchronizer<A, S>>,
    session: Mutex<Option<Session>>,
}

impl<A: NoteApi, S: PanelSurface> NoteEditorController<A, S> {
    pub const fn new(
        api: Arc<A>,
        surface: Arc<S>,
        view: Arc<ViewStateController<S>>,
        list: Arc<NoteListSynchronizer<A, S>>,
    ) -> Self {
        Self {
            api,
            surface,
            view,
            list,
            session: Mutex::new(None),
        }
    }

    /// Mode of the open editor, or `None` when closed.
    pub fn mode(&self) -> Option<EditorMode> {
        self.active_session().map(|session| session.mode)
    }

    pub fn begin_create(&self) {
        self.enter(EditorMode::Create);
    }

    /// Opens the editor immediately, then fills it once the note arrives.
    pub async fn begin_update(&self, id: &NoteId) -> LoadOutcome {
        let ticket = self.enter(EditorMode::Update(id.clone()));

        let result = self.api.get(id).await;
        if !self.is_session(&ticket) {
            tracing::debug!("Discarding note {id} response; editor session ended");
            return LoadOutcome::Discarded;
        }

        match result {
            Ok(ApiResponse::Models(notes)) => match notes.into_iter().next() {
                Some(note) => {
                    self.surface.fill_editor(&EditorForm {
                        title: note.title.clone(),
                        content: note.content.display_text().to_string(),
                        submit_label: SubmitLabel::Update,
                    });
                    LoadOutcome::Loaded(note)
                }
                None => {
                    self.surface.show_notice(ViewState::Editor, Notice::NotFound);
                    LoadOutcome::NotFound
                }
            },
            Ok(ApiResponse::Errors(errors)) => {
                for error in &errors {
                    tracing::error!("Failed to load note {id} for editing: {}", error);
                }
                LoadOutcome::Failed
            }
            Ok(ApiResponse::Fields(fields)) => {
                for (field, message) in fields.iter() {
                    tracing::error!("Unexpected field error loading note {id}: {field}: {message}");
                }
                LoadOutcome::Failed
            }
            Err(error) => {
                tracing::error!("Note {id} request failed: {}", error);
                self.surface
                    .show_notice(ViewState::Editor, Notice::Unreachable);
                LoadOutcome::Unreachable
            }
        }
    }

    /// Send `draft` with the verb the current mode calls for.
    pub async fn submit(&self, draft: NoteDraft) -> SubmitOutcome {
        let Some(Session { mode, ticket }) = self.active_session() else {
            tracing::debug!("Ignoring submit; editor is not open");
            return SubmitOutcome::Ignored;
        };

        let result = match &mode {
            EditorMode::Create => self.api.create(&draft).await,
            EditorMode::Update(id) => self.api.update(id, &draft).await,
        };

        match result {
            Ok(ApiResponse::Models(_)) => {
                let still_open = self.is_session(&ticket);
                self.end_session(&ticket);
                if still_open {
                    self.view.show(ViewState::List);
                }
                SubmitOutcome::Saved(self.list.refresh().await)
            }
            Ok(ApiResponse::Fields(fields)) => {
                if self.is_session(&ticket) {
                    self.surface
                        .show_field_error(fields.first_displayed().as_ref());
                }
                SubmitOutcome::Rejected(fields)
            }
            Ok(ApiResponse::Errors(errors)) => {
                for error in &errors {
                    tracing::error!("Failed to save note: {}", error);
                }
                SubmitOutcome::Failed
            }
            Err(error) => {
                tracing::error!("Save request failed: {}", error);
                if self.is_session(&ticket) {
                    self.surface
                        .show_notice(ViewState::Editor, Notice::Unreachable);
                }
                SubmitOutcome::Unreachable
            }
        }
    }

    pub fn close(&self) {
        *self.lock_session() = None;
    }

    fn enter(&self, mode: EditorMode) -> PanelTicket {
        let ticket = self.view.show(ViewState::Editor);
        let label = mode.submit_label();
        *self.lock_session() = Some(Session { mode, ticket });
        self.surface.show_field_error(None);
        self.surface.fill_editor(&EditorForm::blank(label));
        ticket
    }

    /// The stored session, if its panel is still the active one.
    fn active_session(&self) -> Option<Session> {
        let session = self.lock_session().clone()?;
        self.view.is_current(&session.ticket).then_some(session)
    }

    fn is_session(&self, ticket: &PanelTicket) -> bool {
        self.active_session()
            .is_some_and(|session| session.ticket == *ticket)
    }

    fn end_session(&self, ticket: &PanelTicket) {
        let mut session = self.lock_session();
        if session.as_ref().is_some_and(|open| open.ticket == *ticket) {
            *session = None;
        }
    }

    fn lock_session(&self) -> std::sync::MutexGuard<'_, Option<Session>> {
        self.session.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
