//! Document listing tool.

use std::sync::Arc;

use opsdeck_core::DocumentProvider;
use opsdeck_core::types::{DocumentMeta, DocumentSummary};
use rig::completion::ToolDefinition;
use rig::tool::Tool;
use serde::Deserialize;

use crate::session::SharedSession;

/// Error type for document listing.
#[derive(Debug, thiserror::Error)]
pub enum DocumentListError {
    #[error("missing session context: {0}")]
    MissingContext(String),
    #[error("listing failed: {0}")]
    List(String),
}

/// Arguments for document listing (none).
#[derive(Debug, Default, Deserialize)]
pub struct DocumentListArgs {}

/// Tool for listing project document metadata.
///
/// Listings are recorded into the session's conversation memory so that a
/// follow-up reference by title (or "that doc", after a single-document
/// listing) resolves without another round trip from the user.
pub struct DocumentListTool<P> {
    provider: Arc<P>,
    session: SharedSession,
}

impl<P> DocumentListTool<P> {
    /// Creates a new document listing tool.
    pub fn new(provider: Arc<P>, session: SharedSession) -> Self {
        Self { provider, session }
    }
}

impl<P: DocumentProvider + 'static> Tool for DocumentListTool<P> {
    type Args = DocumentListArgs;
    type Error = DocumentListError;
    type Output = Vec<DocumentMeta>;

    const NAME: &'static str = "document_list";

    async fn definition(&self, _prompt: String) -> ToolDefinition {
        ToolDefinition {
            name: Self::NAME.to_string(),
            description: "List all documents in the project (metadata only, no content). Use document_read to fetch a specific document's content.".to_string(),
            parameters: serde_json::json!({
                "type": "object",
                "properties": {}
            }),
        }
    }

    #[tracing::instrument(skip_all, fields(tool = Self::NAME))]
    async fn call(&self, _args: Self::Args) -> Result<Self::Output, Self::Error> {
        let ctx = self
            .session
            .context()
            .map_err(|e| DocumentListError::MissingContext(e.to_string()))?;

        let metas = self
            .provider
            .list_documents(&ctx)
            .await
            .map_err(|e| DocumentListError::List(e.to_string()))?;

        let summaries: Vec<DocumentSummary> = metas.iter().map(DocumentSummary::from).collect();
        self.session
            .update(|state| state.memory_mut().record_listing(&summaries));

        tracing::debug!(doc_count = metas.len(), "document_list completed");
        Ok(metas)
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use opsdeck_core::types::{DocumentPayload, ProjectContext};
    use opsdeck_core::{LookupError, Result};

    use super::*;

    struct ListingStore(Vec<DocumentMeta>);

    #[async_trait]
    impl DocumentProvider for ListingStore {
        async fn list_documents(&self, _ctx: &ProjectContext) -> Result<Vec<DocumentMeta>> {
            Ok(self.0.clone())
        }

        async fn fetch_document(
            &self,
            _ctx: &ProjectContext,
            doc_id: &str,
        ) -> std::result::Result<DocumentPayload, LookupError> {
            Err(LookupError::not_found(doc_id))
        }
    }

    #[tokio::test]
    async fn sole_listing_pins_memory() {
        let meta: DocumentMeta =
            serde_json::from_value(serde_json::json!({"id": "d1", "title": "Spec"})).unwrap();
        let session = SharedSession::with_context("p1", "u1");
        let tool = DocumentListTool::new(Arc::new(ListingStore(vec![meta])), session.clone());

        let listed = tool.call(DocumentListArgs::default()).await.unwrap();

        assert_eq!(listed.len(), 1);
        assert_eq!(session.memory().last_doc_id(), Some("d1"));
        assert_eq!(session.memory().last_listed_docs()[0].title, "Spec");
    }
}
