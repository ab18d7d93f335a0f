//! Viewer panel loading.

use std::sync::Arc;

use crate::api::{ApiResponse, NoteApi};
use crate::models::{Note, NoteId};
use crate::surface::{Notice, PanelSurface};
use crate::view::{ViewState, ViewStateController};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DetailOutcome {
    Shown(Note),
    NotFound,
    /// The server reported errors; the viewer stays blank.
    Failed,
    Unreachable,
    /// The viewer session ended before the response arrived.
    Discarded,
}

pub struct NoteDetailLoader<A, S> {
    api: Arc<A>,
    surface: Arc<S>,
    view: Arc<ViewStateController<S>>,
}

impl<A: NoteApi, S: PanelSurface> NoteDetailLoader<A, S> {
    pub const fn new(api: Arc<A>, surface: Arc<S>, view: Arc<ViewStateController<S>>) -> Self {
        Self { api, surface, view }
    }

    pub async fn open(&self, id: &NoteId) -> DetailOutcome {
        let ticket = self.view.show(ViewState::Viewer);
        self.surface.clear_viewer();

        let result = self.api.get(id).await;
        if !self.view.is_current(&ticket) {
            tracing::debug!("Discarding note {id} response; viewer is no longer active");
            return DetailOutcome::Discarded;
        }

        match result {
            Ok(ApiResponse::Models(notes)) => match notes.into_iter().next() {
                Some(note) => {
                    self.surface.show_note(&note);
                    DetailOutcome::Shown(note)
                }
                None => {
                    self.surface.show_notice(ViewState::Viewer, Notice::NotFound);
                    DetailOutcome::NotFound
                }
            },
            Ok(ApiResponse::Errors(errors)) => {
                for error in &errors {
                    tracing::error!("Failed to load note {id}: {}", error);
                }
                DetailOutcome::Failed
            }
            Ok(ApiResponse::Fields(fields)) => {
                for (field, message) in fields.iter() {
                    tracing::error!("Unexpected field error loading note {id}: {field}: {message}");
                }
                DetailOutcome::Failed
            }
            Err(error) => {
                tracing::error!("Note {id} request failed: {}", error);
                self.surface
                    .show_notice(ViewState::Viewer, Notice::Unreachable);
                DetailOutcome::Unreachable
            }
        }
    }
}
