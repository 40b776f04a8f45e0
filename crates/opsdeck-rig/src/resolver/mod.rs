//! Document-reference resolution.
//!
//! Resolution turns a free-form reference into a confirmed document by
//! generating candidate ids (see [`generate_candidates`]) and trying them
//! in order against the remote store. "Not found" is the only failure that
//! moves the driver to its next candidate; any other failure aborts the
//! loop. Callers always get back either a document payload or a structured
//! diagnostic the agent can act on conversationally.

mod candidates;

use std::sync::Arc;

pub use candidates::generate_candidates;
use opsdeck_core::types::{DocumentPayload, DocumentSummary, ProjectContext};
use opsdeck_core::{DocumentProvider, LookupError};
use serde::Serialize;

use crate::session::ConversationMemory;

/// Tracing target for resolver operations.
pub const TRACING_TARGET: &str = "opsdeck_rig::resolver";

/// Error string on an exhausted resolution.
pub const NOT_FOUND_ERROR: &str = "Document not found for this project.";

/// Remediation hint on an exhausted resolution.
pub const NOT_FOUND_HINT: &str =
    "Use document_list and pass an exact doc id to document_read.";

/// Cap on the documents echoed back in a failed resolution.
const MAX_AVAILABLE_DOCS: usize = 10;

/// Diagnostic record for a resolution that found no document.
///
/// Serialized with the backend's camelCase field names so the calling agent
/// sees a stable shape it can reason about.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolutionFailure {
    /// Fixed, human-readable error string.
    pub error: String,
    /// The reference as originally requested (trimmed).
    pub requested_doc_id: String,
    /// Every candidate id that was tried, in order.
    pub attempted_doc_ids: Vec<String>,
    /// Up to ten known documents the agent can offer the user.
    pub available_docs: Vec<DocumentSummary>,
    /// Fixed remediation hint.
    pub hint: String,
    /// The last failure encountered, if any candidate was tried.
    pub details: Option<LookupError>,
}

/// Outcome of a resolution attempt.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum Resolution {
    /// A candidate was confirmed by the remote store.
    Resolved(DocumentPayload),
    /// No candidate was confirmed.
    NotFound(Box<ResolutionFailure>),
}

impl Resolution {
    /// Returns true if a document was found.
    pub fn is_resolved(&self) -> bool {
        matches!(self, Self::Resolved(_))
    }
}

/// Resolves ambiguous document references against a remote store.
///
/// The provider is consulted twice per resolution: once (leniently) for the
/// document listing that seeds candidate generation, then once per
/// candidate until one is confirmed.
#[derive(Debug, Clone)]
pub struct DocumentResolver<P> {
    provider: Arc<P>,
}

impl<P> DocumentResolver<P> {
    /// Creates a new resolver.
    pub fn new(provider: P) -> Self {
        Self {
            provider: Arc::new(provider),
        }
    }

    /// Creates a new resolver from a shared provider.
    pub fn from_arc(provider: Arc<P>) -> Self {
        Self { provider }
    }
}

impl<P: DocumentProvider> DocumentResolver<P> {
    /// Resolves `reference` to a document, consulting and updating `memory`.
    ///
    /// Candidates are tried strictly in order, one remote call at a time,
    /// short-circuiting on the first success. A successful resolution
    /// records the confirmed id into `memory`; the listing (when it
    /// succeeds with at least one document) is recorded as well.
    pub async fn resolve(
        &self,
        ctx: &ProjectContext,
        reference: &str,
        memory: &mut ConversationMemory,
    ) -> Resolution {
        // The listing is best-effort: without it, candidate generation
        // degrades to raw/UUID pass-through and memory.
        let known: Vec<DocumentSummary> = match self.provider.list_documents(ctx).await {
            Ok(metas) => metas.iter().map(DocumentSummary::from).collect(),
            Err(error) => {
                tracing::debug!(
                    target: TRACING_TARGET,
                    error = %error,
                    "Document listing unavailable, resolving without it"
                );
                Vec::new()
            }
        };

        memory.record_listing(&known);

        let candidates = generate_candidates(reference, &known, memory);
        let mut attempted: Vec<String> = Vec::with_capacity(candidates.len());
        let mut last_failure: Option<LookupError> = None;

        for candidate in candidates {
            attempted.push(candidate.clone());

            match self.provider.fetch_document(ctx, &candidate).await {
                Ok(payload) => {
                    let resolved_id = payload.resolved_id(&candidate);
                    memory.record_resolved(&resolved_id);

                    tracing::debug!(
                        target: TRACING_TARGET,
                        doc_id = %resolved_id,
                        attempts = attempted.len(),
                        "Resolved document reference"
                    );
                    return Resolution::Resolved(payload);
                }
                Err(error) => {
                    let retryable = error.is_retryable();
                    last_failure = Some(error);
                    // Only a miss on this specific candidate justifies
                    // trying the next one.
                    if !retryable {
                        break;
                    }
                }
            }
        }

        tracing::debug!(
            target: TRACING_TARGET,
            reference = %reference,
            attempts = attempted.len(),
            "Document reference did not resolve"
        );

        Resolution::NotFound(Box::new(ResolutionFailure {
            error: NOT_FOUND_ERROR.to_string(),
            requested_doc_id: reference.trim().to_string(),
            attempted_doc_ids: attempted,
            available_docs: known.into_iter().take(MAX_AVAILABLE_DOCS).collect(),
            hint: NOT_FOUND_HINT.to_string(),
            details: last_failure,
        }))
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::Mutex;

    use async_trait::async_trait;
    use opsdeck_core::Result;
    use opsdeck_core::types::DocumentMeta;

    use super::*;

    /// In-memory document store with scripted failures.
    #[derive(Default)]
    struct FakeStore {
        docs: Vec<DocumentMeta>,
        payloads: HashMap<String, DocumentPayload>,
        listing_fails: bool,
        fetch_failure: Option<LookupError>,
        fetched: Mutex<Vec<String>>,
    }

    impl FakeStore {
        fn with_docs(docs: &[(&str, &str)]) -> Self {
            Self {
                docs: docs
                    .iter()
                    .map(|(id, title)| {
                        serde_json::from_value(serde_json::json!({"id": id, "title": title}))
                            .unwrap()
                    })
                    .collect(),
                ..Default::default()
            }
        }

        fn with_payload(mut self, id: &str) -> Self {
            let payload =
                serde_json::from_value(serde_json::json!({"id": id, "content": "body"})).unwrap();
            self.payloads.insert(id.to_string(), payload);
            self
        }

        fn fetched(&self) -> Vec<String> {
            self.fetched.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl DocumentProvider for FakeStore {
        async fn list_documents(&self, _ctx: &ProjectContext) -> Result<Vec<DocumentMeta>> {
            if self.listing_fails {
                return Err(opsdeck_core::Error::network_error()
                    .with_message("listing unavailable"));
            }
            Ok(self.docs.clone())
        }

        async fn fetch_document(
            &self,
            _ctx: &ProjectContext,
            doc_id: &str,
        ) -> std::result::Result<DocumentPayload, LookupError> {
            self.fetched.lock().unwrap().push(doc_id.to_string());

            if let Some(failure) = &self.fetch_failure {
                return Err(failure.clone());
            }
            self.payloads
                .get(doc_id)
                .cloned()
                .ok_or_else(|| LookupError::not_found(doc_id))
        }
    }

    fn ctx() -> ProjectContext {
        ProjectContext::new("p1", "u1").unwrap()
    }

    fn resolver(store: FakeStore) -> (DocumentResolver<FakeStore>, Arc<FakeStore>) {
        let store = Arc::new(store);
        (DocumentResolver::from_arc(store.clone()), store)
    }

    #[tokio::test]
    async fn resolves_by_exact_title() {
        let (resolver, store) =
            resolver(FakeStore::with_docs(&[("a1", "Release Notes")]).with_payload("a1"));
        let mut memory = ConversationMemory::new();

        let resolution = resolver.resolve(&ctx(), "release notes", &mut memory).await;

        assert!(resolution.is_resolved());
        assert_eq!(store.fetched(), vec!["a1"]);
        assert_eq!(memory.last_doc_id(), Some("a1"));
    }

    #[tokio::test]
    async fn back_reference_resolves_after_sole_listing() {
        let (resolver, store) =
            resolver(FakeStore::with_docs(&[("d7", "Plan")]).with_payload("d7"));
        let mut memory = ConversationMemory::new();

        // The sole-entry listing recorded during resolution pins d7, so the
        // back-reference lands on it without an explicit id.
        let resolution = resolver.resolve(&ctx(), "that document", &mut memory).await;

        assert!(resolution.is_resolved());
        assert_eq!(store.fetched(), vec!["d7"]);
    }

    #[tokio::test]
    async fn back_reference_uses_memory_when_listing_fails() {
        let mut store = FakeStore::default().with_payload("a9");
        store.listing_fails = true;
        let (resolver, store) = resolver(store);

        let mut memory = ConversationMemory::new();
        memory.record_resolved("a9");

        let resolution = resolver.resolve(&ctx(), "the doc", &mut memory).await;

        assert!(resolution.is_resolved());
        assert_eq!(store.fetched(), vec!["a9"]);
    }

    #[tokio::test]
    async fn exhaustion_reports_available_docs_and_hint() {
        let (resolver, store) = resolver(FakeStore::with_docs(&[
            ("a1", "Spec"),
            ("a2", "Roadmap"),
        ]));
        let mut memory = ConversationMemory::new();

        let resolution = resolver.resolve(&ctx(), "xyz", &mut memory).await;

        let Resolution::NotFound(failure) = resolution else {
            panic!("expected a not-found resolution");
        };
        assert_eq!(failure.error, NOT_FOUND_ERROR);
        assert_eq!(failure.requested_doc_id, "xyz");
        assert_eq!(failure.available_docs.len(), 2);
        assert_eq!(failure.hint, NOT_FOUND_HINT);
        // Nothing matched, so no candidate was ever fetched.
        assert!(store.fetched().is_empty());
        assert!(failure.details.is_none());
    }

    #[tokio::test]
    async fn misses_are_recorded_as_attempts() {
        let (resolver, store) = resolver(FakeStore::default());
        let mut memory = ConversationMemory::new();

        let resolution = resolver.resolve(&ctx(), "ghost-id", &mut memory).await;

        let Resolution::NotFound(failure) = resolution else {
            panic!("expected a not-found resolution");
        };
        assert_eq!(failure.attempted_doc_ids, vec!["ghost-id"]);
        assert_eq!(store.fetched(), vec!["ghost-id"]);
        assert_eq!(
            failure.details,
            Some(LookupError::not_found("ghost-id"))
        );
        assert!(memory.last_doc_id().is_none());
    }

    #[tokio::test]
    async fn non_retryable_failure_stops_the_loop() {
        // Two docs with the same title produce two candidates.
        let mut store = FakeStore::with_docs(&[("a1", "Spec"), ("a2", "Spec")]);
        store.fetch_failure = Some(LookupError::status(500, "boom"));
        let (resolver, store) = resolver(store);
        let mut memory = ConversationMemory::new();

        let resolution = resolver.resolve(&ctx(), "spec", &mut memory).await;

        let Resolution::NotFound(failure) = resolution else {
            panic!("expected a not-found resolution");
        };
        // The server error on the first candidate aborts the loop.
        assert_eq!(store.fetched(), vec!["a1"]);
        assert_eq!(failure.attempted_doc_ids, vec!["a1"]);
        assert_eq!(failure.details, Some(LookupError::status(500, "boom")));
    }

    #[tokio::test]
    async fn payload_without_id_falls_back_to_candidate() {
        let mut store = FakeStore::with_docs(&[("a1", "Spec")]);
        let payload: DocumentPayload =
            serde_json::from_value(serde_json::json!({"content": "body"})).unwrap();
        store.payloads.insert("a1".to_string(), payload);
        let (resolver, _) = resolver(store);
        let mut memory = ConversationMemory::new();

        let resolution = resolver.resolve(&ctx(), "spec", &mut memory).await;

        assert!(resolution.is_resolved());
        assert_eq!(memory.last_doc_id(), Some("a1"));
    }

    #[tokio::test]
    async fn available_docs_are_capped_at_ten() {
        let docs: Vec<(String, String)> = (0..15)
            .map(|i| (format!("d{i}"), format!("Doc {i}")))
            .collect();
        let doc_refs: Vec<(&str, &str)> = docs
            .iter()
            .map(|(id, title)| (id.as_str(), title.as_str()))
            .collect();
        let (resolver, _) = resolver(FakeStore::with_docs(&doc_refs));
        let mut memory = ConversationMemory::new();

        let resolution = resolver.resolve(&ctx(), "nothing matches", &mut memory).await;

        let Resolution::NotFound(failure) = resolution else {
            panic!("expected a not-found resolution");
        };
        assert_eq!(failure.available_docs.len(), 10);
    }

    #[tokio::test]
    async fn failure_serializes_with_camel_case_fields() {
        let (resolver, _) = resolver(FakeStore::default());
        let mut memory = ConversationMemory::new();

        let resolution = resolver.resolve(&ctx(), "ghost", &mut memory).await;
        let json = serde_json::to_value(&resolution).unwrap();

        assert_eq!(json["requestedDocId"], "ghost");
        assert_eq!(json["attemptedDocIds"][0], "ghost");
        assert!(json["availableDocs"].as_array().unwrap().is_empty());
        assert_eq!(json["details"]["kind"], "not_found");
        assert!(json["hint"].as_str().unwrap().contains("document_list"));
    }
}
