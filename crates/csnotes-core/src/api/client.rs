//! HTTP implementation of [`NoteApi`].

use std::sync::Arc;

use reqwest::header::{ACCEPT, AUTHORIZATION};
use reqwest::{Client, RequestBuilder};

use super::{ApiResponse, NoteApi};
use crate::auth::AuthProvider;
use crate::config::{normalize_base_url, ClientConfig};
use crate::error::Result;
use crate::models::{NoteDraft, NoteId};

const NOTE_COLLECTION_PATH: &str = "/api/note";

/// REST client for `/api/note`.
#[derive(Clone)]
pub struct NoteApiClient {
    base_url: String,
    client: Client,
    auth: Arc<dyn AuthProvider>,
}

impl NoteApiClient {
    pub fn new(config: &ClientConfig, auth: Arc<dyn AuthProvider>) -> Result<Self> {
        let base_url = normalize_base_url(&config.resolved_base_url()?)?;
        let client = Client::builder().timeout(config.request_timeout()).build()?;
        Ok(Self {
            base_url,
            client,
            auth,
        })
    }

    /// Returns the base URL this client was configured with.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn collection_url(&self) -> String {
        format!("{}{NOTE_COLLECTION_PATH}", self.base_url)
    }

    fn note_url(&self, id: &NoteId) -> String {
        format!("{}{NOTE_COLLECTION_PATH}/{id}", self.base_url)
    }

    async fn send(&self, request: RequestBuilder) -> Result<ApiResponse> {
        let response = request
            .header(AUTHORIZATION, self.auth.auth_header())
            .header(ACCEPT, "application/json")
            .send()
            .await?;
        let status = response.status();
        let body = response.text().await?;
        ApiResponse::from_body(status, &body)
    }
}

impl NoteApi for NoteApiClient {
    async fn list(&self) -> Result<ApiResponse> {
        self.send(self.client.get(self.collection_url())).await
    }

    async fn get(&self, id: &NoteId) -> Result<ApiResponse> {
        self.send(self.client.get(self.note_url(id))).await
    }

    async fn create(&self, draft: &NoteDraft) -> Result<ApiResponse> {
        self.send(self.client.post(self.collection_url()).form(draft))
            .await
    }

    async fn update(&self, id: &NoteId, draft: &NoteDraft) -> Result<ApiResponse> {
        self.send(self.client.put(self.note_url(id)).form(draft))
            .await
    }

    async fn remove(&self, id: &NoteId) -> Result<ApiResponse> {
        self.send(self.client.delete(self.note_url(id))).await
    }
}
