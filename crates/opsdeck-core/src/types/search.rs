//! Knowledge-search request and response types.
//!
//! The backend runs a hybrid retrieval pipeline: `hybrid_weight` blends
//! keyword scoring (0.0) with vector similarity (1.0).

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display};

use super::DocType;

/// Default number of results returned per query.
pub const DEFAULT_SEARCH_LIMIT: usize = 10;

/// Default keyword/vector blend.
pub const DEFAULT_HYBRID_WEIGHT: f64 = 0.5;

/// A knowledge-search request.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KnowledgeQuery {
    /// The project to search in.
    pub project_id: String,
    /// The natural-language query.
    pub query: String,
    /// Optional result filters.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filters: Option<SearchFilters>,
    /// Retrieval configuration.
    pub config: SearchConfig,
}

impl KnowledgeQuery {
    /// Creates a query with default retrieval configuration.
    pub fn new(project_id: impl Into<String>, query: impl Into<String>) -> Self {
        Self {
            project_id: project_id.into(),
            query: query.into(),
            filters: None,
            config: SearchConfig::default(),
        }
    }

    /// Restricts results to the given document types.
    pub fn with_doc_types(mut self, doc_types: Vec<DocType>) -> Self {
        self.filters = Some(SearchFilters { doc_types });
        self
    }

    /// Overrides the result limit.
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.config.limit = limit;
        self
    }
}

/// Filters narrowing a knowledge search.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchFilters {
    /// Only return chunks from documents of these types.
    pub doc_types: Vec<DocType>,
}

/// Retrieval configuration for a knowledge search.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchConfig {
    /// Maximum number of results.
    pub limit: usize,
    /// Keyword/vector blend, 0.0 = pure keyword, 1.0 = pure vector.
    pub hybrid_weight: f64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            limit: DEFAULT_SEARCH_LIMIT,
            hybrid_weight: DEFAULT_HYBRID_WEIGHT,
        }
    }
}

/// How a chunk was retrieved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, AsRefStr)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum RetrievalMethod {
    /// Vector similarity.
    Vector,
    /// Keyword match.
    Keyword,
    /// Blended score.
    Hybrid,
}

/// A single scored chunk from a knowledge search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KnowledgeHit {
    /// The chunk ID.
    pub chunk_id: String,
    /// The document the chunk belongs to.
    pub doc_id: String,
    /// Title of that document.
    pub doc_title: String,
    /// The chunk text.
    pub text_content: String,
    /// Relevance score.
    pub score: f64,
    /// How the chunk was retrieved.
    pub retrieval_method: RetrievalMethod,
}

/// Aggregate metadata for a knowledge-search response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchMetadata {
    /// Total number of results before the limit was applied.
    pub total_results: usize,
    /// Query latency in milliseconds.
    pub query_time: f64,
}

/// A knowledge-search response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KnowledgeResponse {
    /// Scored chunks, best first.
    pub results: Vec<KnowledgeHit>,
    /// Aggregate metadata.
    pub metadata: SearchMetadata,
}
