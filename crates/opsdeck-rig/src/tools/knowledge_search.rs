//! Knowledge search tool for hybrid retrieval over project docs.

use std::sync::Arc;

use opsdeck_core::KnowledgeProvider;
use opsdeck_core::types::{DocType, KnowledgeQuery, KnowledgeResponse};
use rig::completion::ToolDefinition;
use rig::tool::Tool;
use serde::Deserialize;

use crate::session::SharedSession;

/// Error type for knowledge search operations.
#[derive(Debug, thiserror::Error)]
pub enum KnowledgeSearchError {
    #[error("missing session context: {0}")]
    MissingContext(String),
    #[error("search failed: {0}")]
    Search(String),
}

/// Arguments for knowledge search.
#[derive(Debug, Deserialize)]
pub struct KnowledgeSearchArgs {
    /// The natural-language query.
    pub query: String,
    /// Restrict results to these document types.
    #[serde(default)]
    pub doc_types: Option<Vec<DocType>>,
    /// Maximum number of results.
    #[serde(default = "default_limit")]
    pub limit: usize,
}

fn default_limit() -> usize {
    10
}

/// Tool for hybrid semantic + keyword search over project knowledge.
pub struct KnowledgeSearchTool<P> {
    provider: Arc<P>,
    session: SharedSession,
}

impl<P> KnowledgeSearchTool<P> {
    /// Creates a new knowledge search tool.
    pub fn new(provider: Arc<P>, session: SharedSession) -> Self {
        Self { provider, session }
    }
}

impl<P: KnowledgeProvider + 'static> Tool for KnowledgeSearchTool<P> {
    type Args = KnowledgeSearchArgs;
    type Error = KnowledgeSearchError;
    type Output = KnowledgeResponse;

    const NAME: &'static str = "knowledge_search";

    async fn definition(&self, _prompt: String) -> ToolDefinition {
        ToolDefinition {
            name: Self::NAME.to_string(),
            description: "Semantic + keyword search across project documents. Use this for any question about technical details, architecture, design decisions, or how things work. Returns scored text chunks with their source documents.".to_string(),
            parameters: serde_json::json!({
                "type": "object",
                "properties": {
                    "query": {
                        "type": "string",
                        "description": "The search query"
                    },
                    "doc_types": {
                        "type": "array",
                        "items": {
                            "type": "string",
                            "enum": ["design", "note", "retro", "other"]
                        },
                        "description": "Optional document type filter"
                    },
                    "limit": {
                        "type": "integer",
                        "description": "Maximum number of results (default: 10)",
                        "default": 10
                    }
                },
                "required": ["query"]
            }),
        }
    }

    #[tracing::instrument(skip(self), fields(tool = Self::NAME, query_len = args.query.len(), limit = args.limit))]
    async fn call(&self, args: Self::Args) -> Result<Self::Output, Self::Error> {
        let ctx = self
            .session
            .context()
            .map_err(|e| KnowledgeSearchError::MissingContext(e.to_string()))?;

        let mut query = KnowledgeQuery::new(ctx.project_id(), &args.query).with_limit(args.limit);
        if let Some(doc_types) = args.doc_types {
            query = query.with_doc_types(doc_types);
        }

        let response = self
            .provider
            .search(&ctx, &query)
            .await
            .map_err(|e| KnowledgeSearchError::Search(e.to_string()))?;

        tracing::debug!(
            result_count = response.results.len(),
            "knowledge_search completed"
        );
        Ok(response)
    }
}
