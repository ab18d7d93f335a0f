//! Note model

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Opaque note identifier assigned by the server.
///
/// The server emits integer ids; the client never interprets them and keeps
/// the textual form so it can be placed back into request paths verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NoteId(String);

impl NoteId {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NoteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for NoteId {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.trim().to_string()))
    }
}

impl From<&str> for NoteId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<i64> for NoteId {
    fn from(value: i64) -> Self {
        Self(value.to_string())
    }
}

impl Serialize for NoteId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for NoteId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Int(i64),
            Text(String),
        }

        Ok(match RawId::deserialize(deserializer)? {
            RawId::Int(value) => Self::from(value),
            RawId::Text(value) => Self(value),
        })
    }
}

/// Optional note body.
///
/// `None` is "no content", which the server distinguishes from an empty
/// string by sending a nullable-string object with `Valid: false`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoteContent(Option<String>);

impl NoteContent {
    #[must_use]
    pub const fn absent() -> Self {
        Self(None)
    }

    #[must_use]
    pub fn text(value: impl Into<String>) -> Self {
        Self(Some(value.into()))
    }

    #[must_use]
    pub fn as_deref(&self) -> Option<&str> {
        self.0.as_deref()
    }

    #[must_use]
    pub const fn is_absent(&self) -> bool {
        self.0.is_none()
    }

    /// Text to place in a form control; absent content renders empty.
    #[must_use]
    pub fn display_text(&self) -> &str {
        self.0.as_deref().unwrap_or("")
    }
}

impl Serialize for NoteContent {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.0.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for NoteContent {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(Self(deserialize_nullable_text(deserializer)?))
    }
}

/// Wire forms accepted for nullable text: a plain string or the
/// `{"String": ..., "Valid": ...}` object.
#[derive(Deserialize)]
#[serde(untagged)]
enum NullableText {
    Wrapped {
        #[serde(rename = "String", default)]
        string: String,
        #[serde(rename = "Valid", default)]
        valid: bool,
    },
    Plain(String),
}

impl NullableText {
    fn into_option(self) -> Option<String> {
        match self {
            Self::Wrapped { string, valid } => valid.then_some(string),
            Self::Plain(value) => Some(value),
        }
    }
}

fn deserialize_nullable_text<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<String>, D::Error> {
    let raw = Option::<NullableText>::deserialize(deserializer)?;
    Ok(raw.and_then(NullableText::into_option))
}

fn deserialize_date<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(deserialize_nullable_text(deserializer)?.unwrap_or_default())
}

/// A note as returned by the API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    #[serde(alias = "ID")]
    pub id: NoteId,
    #[serde(alias = "Title", default)]
    pub title: String,
    /// Server-formatted date; shown verbatim
    #[serde(
        alias = "Time",
        alias = "time",
        default,
        deserialize_with = "deserialize_date"
    )]
    pub date: String,
    #[serde(alias = "Content", default)]
    pub content: NoteContent,
}

/// Title and content submitted by the editor.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct NoteDraft {
    pub title: String,
    pub content: String,
}

impl NoteDraft {
    #[must_use]
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
        }
    }
}

impl From<&Note> for NoteDraft {
    fn from(note: &Note) -> Self {
        Self::new(note.title.clone(), note.content.display_text())
    }
}
