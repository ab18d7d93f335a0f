//! Composition root for the three-panel notes client.
//!
//! [`NotesApp`] owns one of each controller and routes user intents to them.
//! Front-ends construct it with a [`NoteApi`], a [`PanelSurface`] and the
//! same [`AuthProvider`] the API client was built with.

use std::sync::Arc;

use crate::api::NoteApi;
use crate::auth::AuthProvider;
use crate::delete::{DeleteOutcome, NoteDeleteFlow};
use crate::detail::{DetailOutcome, NoteDetailLoader};
use crate::editor::{LoadOutcome, NoteEditorController, SubmitOutcome};
use crate::list::{NoteListSynchronizer, RefreshOutcome};
use crate::models::NoteDraft;
use crate::surface::{PanelSurface, RowAction, RowActionKind};
use crate::view::{ViewState, ViewStateController};

/// Result of dispatching a row action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionOutcome {
    /// The action came from rows that have since been rebuilt.
    Stale,
    Shown(DetailOutcome),
    Editing(LoadOutcome),
    Delete(DeleteOutcome),
}

pub struct NotesApp<A, S> {
    auth: Arc<dyn AuthProvider>,
    view: Arc<ViewStateController<S>>,
    list: Arc<NoteListSynchronizer<A, S>>,
    detail: NoteDetailLoader<A, S>,
    editor: NoteEditorController<A, S>,
    delete: NoteDeleteFlow<A, S>,
}

impl<A: NoteApi, S: PanelSurface> NotesApp<A, S> {
    pub fn new(api: Arc<A>, surface: Arc<S>, auth: Arc<dyn AuthProvider>) -> Self {
        let view = Arc::new(ViewStateController::new(Arc::clone(&surface)));
        let list = Arc::new(NoteListSynchronizer::new(
            Arc::clone(&api),
            Arc::clone(&surface),
        ));
        let detail =
            NoteDetailLoader::new(Arc::clone(&api), Arc::clone(&surface), Arc::clone(&view));
        let editor = NoteEditorController::new(
            Arc::clone(&api),
            Arc::clone(&surface),
            Arc::clone(&view),
            Arc::clone(&list),
        );
        let delete = NoteDeleteFlow::new(api, surface, Arc::clone(&list));

        Self {
            auth,
            view,
            list,
            detail,
            editor,
            delete,
        }
    }

    pub async fn start(&self) -> RefreshOutcome {
        self.view.show(ViewState::List);
        self.list.refresh().await
    }

    pub async fn dispatch(&self, action: &RowAction) -> ActionOutcome {
        if !self.list.is_live(action) {
            tracing::debug!(
                "Ignoring {} action for note {} from replaced rows",
                action.kind.label(),
                action.note_id
            );
            return ActionOutcome::Stale;
        }

        match action.kind {
            RowActionKind::Show => ActionOutcome::Shown(self.detail.open(&action.note_id).await),
            RowActionKind::Edit => {
                ActionOutcome::Editing(self.editor.begin_update(&action.note_id).await)
            }
            RowActionKind::Delete => {
                ActionOutcome::Delete(self.delete.delete_note(&action.note_id).await)
            }
        }
    }

    pub fn new_note(&self) {
        self.editor.begin_create();
    }

    pub async fn submit(&self, draft: NoteDraft) -> SubmitOutcome {
        self.editor.submit(draft).await
    }

    pub fn back_to_list(&self) {
        self.editor.close();
        self.view.show(ViewState::List);
    }

    pub async fn refresh(&self) -> RefreshOutcome {
        self.list.refresh().await
    }

    /// Clears the session token; the navigator takes the user to login.
    pub fn logout(&self) {
        self.editor.close();
        self.auth.clear();
    }

    pub fn current_view(&self) -> ViewState {
        self.view.current()
    }

    pub const fn editor(&self) -> &NoteEditorController<A, S> {
        &self.editor
    }

    pub const fn detail(&self) -> &NoteDetailLoader<A, S> {
        &self.detail
    }

    pub const fn deletion(&self) -> &NoteDeleteFlow<A, S> {
        &self.delete
    }
}
