//! Common data types for the opsdeck ecosystem.
//!
//! This module provides the wire-level types exchanged with the
//! project-management backend and the correlation context that scopes every
//! call:
//!
//! - **Documents**: listing summaries, listing metadata, and full payloads
//! - **Issues**: issue records plus create/replace request bodies
//! - **Projects**: project metadata
//! - **Knowledge search**: hybrid search request/response types
//! - **Context**: the `projectId`/`userId` correlation pair
//!
//! All wire types serialize with the backend's camelCase field names.

mod context;
mod document;
mod issue;
mod project;
mod search;

pub use context::ProjectContext;
pub use document::{DocStatus, DocType, DocumentMeta, DocumentPayload, DocumentSummary};
pub use issue::{Issue, IssuePriority, IssueReplacement, IssueStatus, NewIssue};
pub use project::ProjectInfo;
pub use search::{
    KnowledgeHit, KnowledgeQuery, KnowledgeResponse, RetrievalMethod, SearchConfig, SearchFilters,
    SearchMetadata,
};
