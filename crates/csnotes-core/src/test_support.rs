//! Test doubles shared by the controller tests.

use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use tokio::sync::{oneshot, Notify};

use crate::api::{ApiResponse, FieldError, NoteApi};
use crate::auth::LoginNavigator;
use crate::error::{Error, Result};
use crate::models::{Note, NoteContent, NoteDraft, NoteId};
use crate::surface::{EditorForm, Notice, NoteRow, PanelSurface};
use crate::view::ViewState;

pub fn note(id: &str, title: &str, date: &str, content: &str) -> Note {
    Note {
        id: NoteId::from(id),
        title: title.to_string(),
        date: date.to_string(),
        content: NoteContent::text(content),
    }
}

pub fn transport_error() -> Error {
    Error::Io(std::io::Error::new(
        std::io::ErrorKind::ConnectionRefused,
        "connection refused",
    ))
}

pub struct NoopNavigator;

impl LoginNavigator for NoopNavigator {
    fn navigate_to_login(&self) {}
}

/// Serve `router` on an ephemeral local port and return its base URL.
pub async fn spawn_server(router: axum::Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Op {
    List,
    Get,
    Create,
    Update,
    Remove,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    List,
    Get(NoteId),
    Create(NoteDraft),
    Update(NoteId, NoteDraft),
    Remove(NoteId),
}

/// Holds the next call of one operation in flight until released.
pub struct Gate {
    started: Arc<Notify>,
    release: Mutex<Option<oneshot::Sender<()>>>,
}

impl Gate {
    /// Resolves once the held call has been issued.
    pub async fn started(&self) {
        self.started.notified().await;
    }

    pub fn release(&self) {
        if let Some(sender) = self.release.lock().unwrap().take() {
            let _ = sender.send(());
        }
    }
}

struct HeldCall {
    started: Arc<Notify>,
    release: oneshot::Receiver<()>,
}

/// Scripted [`NoteApi`]: responses are queued per operation and every call
/// is recorded. An unscripted call answers with empty models.
#[derive(Default)]
pub struct FakeApi {
    responses: Mutex<HashMap<Op, VecDeque<Result<ApiResponse>>>>,
    held: Mutex<HashMap<Op, VecDeque<HeldCall>>>,
    calls: Mutex<Vec<Call>>,
}

impl FakeApi {
    pub fn push(&self, op: Op, response: Result<ApiResponse>) {
        self.responses
            .lock()
            .unwrap()
            .entry(op)
            .or_default()
            .push_back(response);
    }

    pub fn push_list(&self, response: Result<ApiResponse>) {
        self.push(Op::List, response);
    }

    pub fn push_get(&self, response: Result<ApiResponse>) {
        self.push(Op::Get, response);
    }

    pub fn push_create(&self, response: Result<ApiResponse>) {
        self.push(Op::Create, response);
    }

    pub fn push_update(&self, response: Result<ApiResponse>) {
        self.push(Op::Update, response);
    }

    pub fn push_remove(&self, response: Result<ApiResponse>) {
        self.push(Op::Remove, response);
    }

    pub fn gate_next(&self, op: Op) -> Gate {
        let started = Arc::new(Notify::new());
        let (sender, receiver) = oneshot::channel();
        self.held
            .lock()
            .unwrap()
            .entry(op)
            .or_default()
            .push_back(HeldCall {
                started: Arc::clone(&started),
                release: receiver,
            });
        Gate {
            started,
            release: Mutex::new(Some(sender)),
        }
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn count(&self, op: Op) -> usize {
        self.calls()
            .iter()
            .filter(|call| {
                matches!(
                    (op, call),
                    (Op::List, Call::List)
                        | (Op::Get, Call::Get(_))
                        | (Op::Create, Call::Create(_))
                        | (Op::Update, Call::Update(..))
                        | (Op::Remove, Call::Remove(_))
                )
            })
            .count()
    }

    async fn respond(&self, op: Op, call: Call) -> Result<ApiResponse> {
        self.calls.lock().unwrap().push(call);
        let held = self
            .held
            .lock()
            .unwrap()
            .get_mut(&op)
            .and_then(VecDeque::pop_front);
        let response = self
            .responses
            .lock()
            .unwrap()
            .get_mut(&op)
            .and_then(VecDeque::pop_front)
            .unwrap_or_else(|| Ok(ApiResponse::Models(Vec::new())));
        if let Some(held) = held {
            held.started.notify_one();
            let _ = held.release.await;
        }
        response
    }
}

impl NoteApi for FakeApi {
    async fn list(&self) -> Result<ApiResponse> {
        self.respond(Op::List, Call::List).await
    }

    async fn get(&self, id: &NoteId) -> Result<ApiResponse> {
        self.respond(Op::Get, Call::Get(id.clone())).await
    }

    async fn create(&self, draft: &NoteDraft) -> Result<ApiResponse> {
        self.respond(Op::Create, Call::Create(draft.clone())).await
    }

    async fn update(&self, id: &NoteId, draft: &NoteDraft) -> Result<ApiResponse> {
        self.respond(Op::Update, Call::Update(id.clone(), draft.clone()))
            .await
    }

    async fn remove(&self, id: &NoteId) -> Result<ApiResponse> {
        self.respond(Op::Remove, Call::Remove(id.clone())).await
    }
}

#[derive(Default)]
struct SurfaceState {
    visible: HashMap<ViewState, bool>,
    rows: Vec<NoteRow>,
    viewer: Option<Note>,
    editor: Option<EditorForm>,
    field_error: Option<FieldError>,
    notices: Vec<(ViewState, Notice)>,
}

/// [`PanelSurface`] that records what was rendered.
#[derive(Default)]
pub struct RecordingSurface {
    state: Mutex<SurfaceState>,
    confirm_answer: AtomicBool,
    confirmations: AtomicUsize,
}

impl RecordingSurface {
    pub fn answer_confirmations(&self, answer: bool) {
        self.confirm_answer.store(answer, Ordering::SeqCst);
    }

    pub fn confirmations(&self) -> usize {
        self.confirmations.load(Ordering::SeqCst)
    }

    pub fn visible_panels(&self) -> Vec<ViewState> {
        let state = self.state.lock().unwrap();
        ViewState::ALL
            .into_iter()
            .filter(|panel| state.visible.get(panel).copied().unwrap_or(false))
            .collect()
    }

    pub fn rows(&self) -> Vec<NoteRow> {
        self.state.lock().unwrap().rows.clone()
    }

    pub fn viewer(&self) -> Option<Note> {
        self.state.lock().unwrap().viewer.clone()
    }

    pub fn editor(&self) -> Option<EditorForm> {
        self.state.lock().unwrap().editor.clone()
    }

    pub fn field_error(&self) -> Option<FieldError> {
        self.state.lock().unwrap().field_error.clone()
    }

    pub fn notices(&self) -> Vec<(ViewState, Notice)> {
        self.state.lock().unwrap().notices.clone()
    }
}

impl PanelSurface for RecordingSurface {
    fn set_visible(&self, panel: ViewState, visible: bool) {
        self.state.lock().unwrap().visible.insert(panel, visible);
    }

    fn replace_rows(&self, rows: &[NoteRow]) {
        self.state.lock().unwrap().rows = rows.to_vec();
    }

    fn clear_viewer(&self) {
        self.state.lock().unwrap().viewer = None;
    }

    fn show_note(&self, note: &Note) {
        self.state.lock().unwrap().viewer = Some(note.clone());
    }

    fn fill_editor(&self, form: &EditorForm) {
        self.state.lock().unwrap().editor = Some(form.clone());
    }

    fn show_field_error(&self, error: Option<&FieldError>) {
        self.state.lock().unwrap().field_error = error.cloned();
    }

    fn show_notice(&self, panel: ViewState, notice: Notice) {
        self.state.lock().unwrap().notices.push((panel, notice));
    }

    fn confirm_delete(&self, _id: &NoteId) -> bool {
        self.confirmations.fetch_add(1, Ordering::SeqCst);
        self.confirm_answer.load(Ordering::SeqCst)
    }
}
