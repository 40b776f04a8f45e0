//! Document types exchanged with the backend.

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};

/// Kind of project document.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, AsRefStr, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum DocType {
    /// Design document.
    Design,
    /// Free-form note.
    Note,
    /// Retrospective.
    Retro,
    /// Anything else.
    Other,
}

/// Lifecycle status of a document.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, AsRefStr, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum DocStatus {
    /// Visible in listings and search.
    Active,
    /// Retained but hidden from default views.
    Archived,
}

/// A document's identity as known at listing time.
///
/// This is the slim `{id, title}` snapshot kept in conversation memory and
/// echoed back to the agent in diagnostics. It is never mutated after the
/// listing that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentSummary {
    /// The document ID.
    pub id: String,
    /// The document title.
    #[serde(default)]
    pub title: String,
}

impl DocumentSummary {
    /// Creates a new summary.
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
        }
    }
}

impl From<&DocumentMeta> for DocumentSummary {
    fn from(meta: &DocumentMeta) -> Self {
        Self {
            id: meta.id.clone(),
            title: meta.title.clone(),
        }
    }
}

/// Document metadata as returned by the listing endpoint (no content).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentMeta {
    /// The document ID.
    pub id: String,
    /// The document title.
    #[serde(default)]
    pub title: String,
    /// Kind of document.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doc_type: Option<DocType>,
    /// Lifecycle status.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<DocStatus>,
}

/// A full document as returned by the fetch-by-id endpoint.
///
/// The backend envelope may grow fields over time, so unknown keys are
/// retained in `extra` rather than rejected. `id` is optional: some envelope
/// shapes nest identity one level down, in which case the resolver falls
/// back to the candidate it asked for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentPayload {
    /// The document ID, when the envelope carries one at the top level.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// The document title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Kind of document.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doc_type: Option<DocType>,
    /// Lifecycle status.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<DocStatus>,
    /// The stored content body.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<serde_json::Value>,
    /// Any additional envelope fields.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl DocumentPayload {
    /// Returns the effective document id, falling back to `candidate` when
    /// the envelope omits one.
    pub fn resolved_id(&self, candidate: &str) -> String {
        self.id
            .as_deref()
            .filter(|id| !id.trim().is_empty())
            .unwrap_or(candidate)
            .to_string()
    }
}
