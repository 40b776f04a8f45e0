//! Provider traits for the project-management backend.
//!
//! These traits are the seam between the agent tool layer and whatever
//! transport reaches the backend. `opsdeck-reqwest` implements them over
//! HTTP; tests substitute in-memory fakes. Each call is scoped by a
//! [`ProjectContext`] carrying the correlation identifiers.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::Result;
use crate::types::{
    DocumentMeta, DocumentPayload, Issue, IssueReplacement, KnowledgeQuery, KnowledgeResponse,
    NewIssue, ProjectContext, ProjectInfo,
};

/// Outcome classifier for a single document lookup.
///
/// `NotFound` is the only retryable variant: the resolver moves on to its
/// next candidate. Every other variant aborts the resolution loop. The enum
/// serializes as an internally tagged object so it can be embedded verbatim
/// in diagnostic output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, thiserror::Error)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LookupError {
    /// The backend has no document with the requested id.
    #[error("document not found: {id}")]
    NotFound {
        /// The id that was looked up.
        id: String,
    },
    /// The request hit the per-call timeout ceiling.
    #[error("request timed out")]
    Timeout,
    /// The request never produced a response.
    #[error("transport error: {message}")]
    Transport {
        /// Human-readable description.
        message: String,
    },
    /// The backend answered with a non-404 error status.
    #[error("unexpected status {status}: {message}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Message extracted from the error body.
        message: String,
    },
    /// The response body could not be decoded.
    #[error("invalid response payload: {message}")]
    InvalidPayload {
        /// Human-readable description.
        message: String,
    },
}

impl LookupError {
    /// Creates a not-found error for the given id.
    pub fn not_found(id: impl Into<String>) -> Self {
        Self::NotFound { id: id.into() }
    }

    /// Creates a transport error.
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    /// Creates a status error.
    pub fn status(status: u16, message: impl Into<String>) -> Self {
        Self::Status {
            status,
            message: message.into(),
        }
    }

    /// Creates an invalid-payload error.
    pub fn invalid_payload(message: impl Into<String>) -> Self {
        Self::InvalidPayload {
            message: message.into(),
        }
    }

    /// Returns true if the resolver may try its next candidate.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

/// Access to project documents.
#[async_trait]
pub trait DocumentProvider: Send + Sync {
    /// Lists document metadata for the project.
    async fn list_documents(&self, ctx: &ProjectContext) -> Result<Vec<DocumentMeta>>;

    /// Fetches a single document by id.
    ///
    /// The error variant distinguishes "not found" from every other failure
    /// so callers can apply a retry policy per candidate.
    async fn fetch_document(
        &self,
        ctx: &ProjectContext,
        doc_id: &str,
    ) -> std::result::Result<DocumentPayload, LookupError>;
}

/// Access to project issues.
#[async_trait]
pub trait IssueProvider: Send + Sync {
    /// Lists all issues for the project.
    async fn list_issues(&self, ctx: &ProjectContext) -> Result<Vec<Issue>>;

    /// Fetches a single issue with its full description.
    async fn get_issue(&self, ctx: &ProjectContext, issue_id: &str) -> Result<Issue>;

    /// Creates a new issue.
    async fn create_issue(&self, ctx: &ProjectContext, issue: &NewIssue) -> Result<Issue>;

    /// Replaces an issue wholesale.
    async fn update_issue(
        &self,
        ctx: &ProjectContext,
        issue_id: &str,
        replacement: &IssueReplacement,
    ) -> Result<Issue>;
}

/// Hybrid semantic + keyword search over project knowledge.
#[async_trait]
pub trait KnowledgeProvider: Send + Sync {
    /// Runs a knowledge query.
    async fn search(
        &self,
        ctx: &ProjectContext,
        query: &KnowledgeQuery,
    ) -> Result<KnowledgeResponse>;
}

/// Access to project metadata.
#[async_trait]
pub trait ProjectProvider: Send + Sync {
    /// Fetches metadata for the current project.
    async fn project_info(&self, ctx: &ProjectContext) -> Result<ProjectInfo>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_not_found_is_retryable() {
        assert!(LookupError::not_found("d1").is_retryable());
        assert!(!LookupError::Timeout.is_retryable());
        assert!(!LookupError::transport("connection refused").is_retryable());
        assert!(!LookupError::status(500, "boom").is_retryable());
        assert!(!LookupError::invalid_payload("not json").is_retryable());
    }

    #[test]
    fn lookup_error_serializes_tagged() {
        let json = serde_json::to_value(LookupError::status(502, "bad gateway")).unwrap();
        assert_eq!(json["kind"], "status");
        assert_eq!(json["status"], 502);

        let json = serde_json::to_value(LookupError::Timeout).unwrap();
        assert_eq!(json["kind"], "timeout");
    }
}
