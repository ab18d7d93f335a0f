//! List panel synchronization.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use crate::api::{ApiResponse, NoteApi};
use crate::surface::{Notice, NoteRow, PanelSurface, RowAction};
use crate::view::ViewState;

/// What a [`NoteListSynchronizer::refresh`] did to the list panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// Rows were rebuilt with this many entries.
    Rendered(usize),
    /// The server reported errors; the list was emptied.
    Failed,
    /// The request never completed; rows were left alone.
    Unreachable,
    /// A newer refresh was issued while this one was in flight.
    Superseded,
}

pub struct NoteListSynchronizer<A, S> {
    api: Arc<A>,
    surface: Arc<S>,
    /// Generation of the rows currently on screen.
    generation: AtomicU64,
    /// Sequence number of the most recently issued refresh.
    latest_request: AtomicU64,
}

impl<A: NoteApi, S: PanelSurface> NoteListSynchronizer<A, S> {
    pub const fn new(api: Arc<A>, surface: Arc<S>) -> Self {
        Self {
            api,
            surface,
            generation: AtomicU64::new(0),
            latest_request: AtomicU64::new(0),
        }
    }

    pub async fn refresh(&self) -> RefreshOutcome {
        let request = self.latest_request.fetch_add(1, Ordering::SeqCst) + 1;
        let result = self.api.list().await;

        if self.latest_request.load(Ordering::SeqCst) != request {
            tracing::debug!("Dropping note list response {request}; a newer refresh is pending");
            return RefreshOutcome::Superseded;
        }

        match result {
            Ok(ApiResponse::Models(notes)) => {
                let generation = self.next_generation();
                let rows = notes
                    .iter()
                    .map(|note| NoteRow::bind(note, generation))
                    .collect::<Vec<_>>();
                self.surface.replace_rows(&rows);
                RefreshOutcome::Rendered(rows.len())
            }
            Ok(ApiResponse::Errors(errors)) => {
                for error in &errors {
                    tracing::error!("Failed to list notes: {}", error);
                }
                self.next_generation();
                self.surface.replace_rows(&[]);
                RefreshOutcome::Failed
            }
            Ok(ApiResponse::Fields(fields)) => {
                for (field, message) in fields.iter() {
                    tracing::error!("Unexpected field error listing notes: {field}: {message}");
                }
                self.next_generation();
                self.surface.replace_rows(&[]);
                RefreshOutcome::Failed
            }
            Err(error) => {
                tracing::error!("Note list request failed: {}", error);
                self.surface.show_notice(ViewState::List, Notice::Unreachable);
                RefreshOutcome::Unreachable
            }
        }
    }

    /// Whether `action` belongs to the rows currently rendered.
    pub fn is_live(&self, action: &RowAction) -> bool {
        action.generation == self.generation.load(Ordering::SeqCst)
    }

    fn next_generation(&self) -> u64 {
        self.generation.fetch_add(1, Ordering::SeqCst) + 1
    }
}
