use std::sync::Arc;

use crate::api::{ApiResponse, NoteApi};
use crate::list::{NoteListSynchronizer, RefreshOutcome};
use crate::models::NoteId;
use crate::surface::{Notice, PanelSurface};
use crate::view::ViewState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// The user declined; nothing was sent.
    Declined,
    Deleted(RefreshOutcome),
    Failed,
    Unreachable,
}

pub struct NoteDeleteFlow<A, S> {
    api: Arc<A>,
    surface: Arc<S>,
    list: Arc<NoteListSynchronizer<A, S>>,
}

impl<A: NoteApi, S: PanelSurface> NoteDeleteFlow<A, S> {
    pub const fn new(api: Arc<A>, surface: Arc<S>, list: Arc<NoteListSynchronizer<A, S>>) -> Self {
        Self { api, surface, list }
    }

    /// Confirm, delete, then refresh the list on success.
    pub async fn delete_note(&self, id: &NoteId) -> DeleteOutcome {
        if !self.surface.confirm_delete(id) {
            tracing::debug!("Delete of note {id} declined");
            return DeleteOutcome::Declined;
        }

        match self.api.remove(id).await {
            Ok(ApiResponse::Models(_)) => {
                tracing::info!("Deleted note {id}");
                DeleteOutcome::Deleted(self.list.refresh().await)
            }
            Ok(ApiResponse::Errors(errors)) => {
                for error in &errors {
                    tracing::error!("Failed to delete note {id}: {}", error);
                }
                DeleteOutcome::Failed
            }
            Ok(ApiResponse::Fields(fields)) => {
                for (field, message) in fields.iter() {
                    tracing::error!("Unexpected field error deleting note {id}: {field}: {message}");
                }
                DeleteOutcome::Failed
            }
            Err(error) => {
                tracing::error!("Delete request for note {id} failed: {}", error);
                self.surface.show_notice(ViewState::List, Notice::Unreachable);
                DeleteOutcome::Unreachable
            }
        }
    }
}
