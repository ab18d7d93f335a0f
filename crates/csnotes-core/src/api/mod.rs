//! Note API contract and response classification.
//!
//! Every response body is classified exactly once, here, into an
//! [`ApiResponse`]. Controllers match on the result and never inspect raw
//! JSON.

mod client;

use std::collections::BTreeMap;
use std::fmt;
use std::future::Future;

use reqwest::StatusCode;
use serde::Deserialize;

use crate::error::{Error, Result};
use crate::models::{Note, NoteDraft, NoteId};

pub use client::NoteApiClient;

/// Form controls that can carry a validation message, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormField {
    Title,
    Content,
}

impl FormField {
    /// Display precedence: earlier entries win when several fields fail.
    pub const ALL: [Self; 2] = [Self::Title, Self::Content];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::Content => "content",
        }
    }
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single message to display beneath a form control.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: FormField,
    pub message: String,
}

/// Per-field validation failures keyed by wire field name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<String, String>);

impl FieldErrors {
    #[must_use]
    pub fn get(&self, field: FormField) -> Option<&str> {
        self.0.get(field.as_str()).map(String::as_str)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The one message the editor shows: first match in [`FormField::ALL`].
    #[must_use]
    pub fn first_displayed(&self) -> Option<FieldError> {
        FormField::ALL.into_iter().find_map(|field| {
            self.get(field).map(|message| FieldError {
                field,
                message: message.to_string(),
            })
        })
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(key, value)| (key.as_str(), value.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for FieldErrors {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        )
    }
}

const EXCERPT_MAX_CHARS: usize = 180;

/// First line of a non-JSON response body, capped for error messages.
///
/// Plain-text failures from the server (missing token, bad login) are a
/// single line followed by a newline.
pub(crate) fn response_excerpt(body: &str) -> String {
    body.trim()
        .lines()
        .next()
        .unwrap_or_default()
        .chars()
        .take(EXCERPT_MAX_CHARS)
        .collect()
}

/// Classified server response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiResponse {
    /// Success; may be empty (delete, not-found).
    Models(Vec<Note>),
    /// Collection-level failures.
    Errors(Vec<String>),
    /// Validation failures on a write.
    Fields(FieldErrors),
}

impl ApiResponse {
    /// Classify a raw response body.
    ///
    /// The server reports failures inside the JSON body with a non-2xx status,
    /// so the body wins over the status whenever it parses.
    pub fn from_body(status: StatusCode, body: &str) -> Result<Self> {
        match serde_json::from_str::<ResponseBody>(body) {
            Ok(parsed) => Ok(parsed.into()),
            Err(_) if !status.is_success() => Err(Error::UnexpectedStatus {
                status: status.as_u16(),
                body: response_excerpt(body),
            }),
            Err(error) => Err(Error::Serialization(error)),
        }
    }

    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Models(_))
    }
}

#[derive(Debug, Default, Deserialize)]
struct ResponseBody {
    #[serde(default)]
    models: Option<Vec<Note>>,
    #[serde(default)]
    errors: Option<Vec<String>>,
    #[serde(default)]
    fields: Option<BTreeMap<String, String>>,
}

impl From<ResponseBody> for ApiResponse {
    fn from(body: ResponseBody) -> Self {
        let fields = body.fields.unwrap_or_default();
        if !fields.is_empty() {
            return Self::Fields(FieldErrors(fields));
        }
        let errors = body.errors.unwrap_or_default();
        if !errors.is_empty() {
            return Self::Errors(errors);
        }
        Self::Models(body.models.unwrap_or_default())
    }
}

/// The five note operations, as seen by the controllers.
///
/// [`NoteApiClient`] is the HTTP implementation; tests substitute a scripted
/// fake.
pub trait NoteApi: Send + Sync + 'static {
    /// `GET /api/note`
    fn list(&self) -> impl Future<Output = Result<ApiResponse>> + Send;

    /// `GET /api/note/{id}`
    fn get(&self, id: &NoteId) -> impl Future<Output = Result<ApiResponse>> + Send;

    /// `POST /api/note`
    fn create(&self, draft: &NoteDraft) -> impl Future<Output = Result<ApiResponse>> + Send;

    /// `PUT /api/note/{id}`
    fn update(
        &self,
        id: &NoteId,
        draft: &NoteDraft,
    ) -> impl Future<Output = Result<ApiResponse>> + Send;

    /// `DELETE /api/note/{id}`
    fn remove(&self, id: &NoteId) -> impl Future<Output = Result<ApiResponse>> + Send;
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn classify(body: &str) -> ApiResponse {
        ApiResponse::from_body(StatusCode::OK, body).unwrap()
    }

    #[test]
    fn models_response_is_success() {
        let response = classify(
            r#"{"models":[{"id":"1","title":"Groceries","date":"2024-01-01","content":"milk"}]}"#,
        );
        let ApiResponse::Models(models) = response else {
            panic!("expected models");
        };
        assert_eq!(models.len(), 1);
        assert_eq!(models[0].title, "Groceries");
    }

    #[test]
    fn server_envelope_with_all_members_classifies_by_content() {
        let response = classify(r#"{"models":[],"fields":{},"errors":[]}"#);
        assert_eq!(response, ApiResponse::Models(Vec::new()));
    }

    #[test]
    fn null_members_are_empty() {
        let response = classify(r#"{"models":null,"fields":null,"errors":null}"#);
        assert_eq!(response, ApiResponse::Models(Vec::new()));
    }

    #[test]
    fn fields_take_precedence_over_errors() {
        let response = classify(r#"{"errors":["bad"],"fields":{"title":"required"}}"#);
        let ApiResponse::Fields(fields) = response else {
            panic!("expected fields");
        };
        assert_eq!(fields.get(FormField::Title), Some("required"));
    }

    #[test]
    fn errors_classify_when_no_fields() {
        let response = classify(r#"{"models":[],"errors":["Could not save note."]}"#);
        assert_eq!(
            response,
            ApiResponse::Errors(vec!["Could not save note.".to_string()])
        );
    }

    #[test]
    fn error_body_with_failure_status_still_classifies() {
        let response =
            ApiResponse::from_body(StatusCode::FORBIDDEN, r#"{"errors":["forbidden"]}"#).unwrap();
        assert_eq!(response, ApiResponse::Errors(vec!["forbidden".to_string()]));
    }

    #[test]
    fn non_json_failure_is_unexpected_status() {
        let error = ApiResponse::from_body(
            StatusCode::UNAUTHORIZED,
            "Required authorization token not found\n",
        )
        .unwrap_err();
        match error {
            Error::UnexpectedStatus { status, body } => {
                assert_eq!(status, 401);
                assert_eq!(body, "Required authorization token not found");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn excerpt_keeps_first_line_of_plain_text_failure() {
        assert_eq!(
            response_excerpt("Could not authenticate user.\n"),
            "Could not authenticate user."
        );
        assert_eq!(
            response_excerpt("<html>\n<body>502 Bad Gateway</body>\n</html>"),
            "<html>"
        );
        assert_eq!(response_excerpt(&"x".repeat(500)).len(), EXCERPT_MAX_CHARS);
        assert_eq!(response_excerpt(""), "");
    }

    #[test]
    fn non_json_success_is_serialization_error() {
        let error = ApiResponse::from_body(StatusCode::OK, "logged in").unwrap_err();
        assert!(matches!(error, Error::Serialization(_)));
    }

    #[test]
    fn title_error_is_displayed_before_content_error() {
        let fields: FieldErrors = [("content", "too long"), ("title", "required")]
            .into_iter()
            .collect();
        assert_eq!(
            fields.first_displayed(),
            Some(FieldError {
                field: FormField::Title,
                message: "required".to_string(),
            })
        );
    }

    #[test]
    fn unknown_field_keys_are_not_displayed() {
        let fields: FieldErrors = [("user_id", "Improper user ID.")].into_iter().collect();
        assert!(!fields.is_empty());
        assert_eq!(fields.first_displayed(), None);
    }
}
