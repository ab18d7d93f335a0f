use std::sync::Arc;

use csnotes_core::delete::DeleteOutcome;
use csnotes_core::detail::DetailOutcome;
use csnotes_core::editor::{LoadOutcome, SubmitOutcome};
use csnotes_core::list::RefreshOutcome;
use csnotes_core::{AuthContext, AuthProvider, ClientConfig, NoteApiClient, NoteId, NotesApp};

use crate::auth::{KeychainLoginNavigator, TokenStore};
use crate::config::load_client_config;
use crate::error::CliError;
use crate::terminal::TerminalSurface;

pub type TerminalApp = NotesApp<NoteApiClient, TerminalSurface>;

/// A signed-in client wired to the terminal.
pub struct Session {
    pub app: TerminalApp,
    pub api: Arc<NoteApiClient>,
    pub surface: Arc<TerminalSurface>,
    pub auth: Arc<AuthContext>,
    pub config: ClientConfig,
    pub store: TokenStore,
}

pub fn connect(api_url: Option<String>, assume_yes: bool) -> Result<Session, CliError> {
    let config = load_client_config(api_url)?;
    let store = TokenStore::open()?;
    let token = store.load()?.ok_or(CliError::NotSignedIn)?;
    let auth = Arc::new(AuthContext::with_token(
        token,
        KeychainLoginNavigator::new(store.clone()),
    ));
    let provider: Arc<dyn AuthProvider> = auth.clone();

    let api = Arc::new(NoteApiClient::new(&config, Arc::clone(&provider))?);
    tracing::debug!("Connected to {}", api.base_url());
    let surface = Arc::new(TerminalSurface::new(assume_yes));
    let app = NotesApp::new(Arc::clone(&api), Arc::clone(&surface), provider);
    Ok(Session {
        app,
        api,
        surface,
        auth,
        config,
        store,
    })
}

pub fn normalize_note_identifier(id: &str) -> Result<NoteId, CliError> {
    let id = id.trim();
    if id.is_empty() {
        return Err(CliError::EmptyNoteId);
    }
    Ok(NoteId::new(id))
}

pub const fn refresh_result(outcome: RefreshOutcome) -> Result<(), CliError> {
    match outcome {
        RefreshOutcome::Rendered(_) | RefreshOutcome::Superseded => Ok(()),
        RefreshOutcome::Failed => Err(CliError::RequestFailed),
        RefreshOutcome::Unreachable => Err(CliError::Unreachable),
    }
}

pub fn detail_result(id: &NoteId, outcome: DetailOutcome) -> Result<(), CliError> {
    match outcome {
        DetailOutcome::Shown(_) | DetailOutcome::Discarded => Ok(()),
        DetailOutcome::NotFound => Err(CliError::NoteNotFound(id.to_string())),
        DetailOutcome::Failed => Err(CliError::RequestFailed),
        DetailOutcome::Unreachable => Err(CliError::Unreachable),
    }
}

pub fn load_result(id: &NoteId, outcome: LoadOutcome) -> Result<csnotes_core::Note, CliError> {
    match outcome {
        LoadOutcome::Loaded(note) => Ok(note),
        LoadOutcome::NotFound | LoadOutcome::Discarded => {
            Err(CliError::NoteNotFound(id.to_string()))
        }
        LoadOutcome::Failed => Err(CliError::RequestFailed),
        LoadOutcome::Unreachable => Err(CliError::Unreachable),
    }
}

pub const fn submit_result(outcome: &SubmitOutcome) -> Result<(), CliError> {
    match outcome {
        SubmitOutcome::Saved(_) => Ok(()),
        SubmitOutcome::Rejected(_) | SubmitOutcome::Ignored => Err(CliError::Rejected),
        SubmitOutcome::Failed => Err(CliError::RequestFailed),
        SubmitOutcome::Unreachable => Err(CliError::Unreachable),
    }
}

pub const fn delete_result(outcome: DeleteOutcome) -> Result<(), CliError> {
    match outcome {
        DeleteOutcome::Declined | DeleteOutcome::Deleted(_) => Ok(()),
        DeleteOutcome::Failed => Err(CliError::RequestFailed),
        DeleteOutcome::Unreachable => Err(CliError::Unreachable),
    }
}
