//! Document read tool backed by reference resolution.

use std::sync::Arc;

use opsdeck_core::DocumentProvider;
use opsdeck_core::types::DocumentPayload;
use rig::completion::ToolDefinition;
use rig::tool::Tool;
use serde::{Deserialize, Serialize};

use crate::resolver::{DocumentResolver, Resolution, ResolutionFailure};
use crate::session::SharedSession;

/// Error type for document read operations.
#[derive(Debug, thiserror::Error)]
pub enum DocumentReadError {
    #[error("missing session context: {0}")]
    MissingContext(String),
}

/// Arguments for document read.
#[derive(Debug, Deserialize)]
pub struct DocumentReadArgs {
    /// The document to read: an id, a title, or a back-reference.
    pub doc_id: String,
}

/// Result of a document read.
///
/// Serializes either as the document payload itself or as the resolution
/// diagnostic, matching what the agent prompt documents.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum DocumentReadOutput {
    /// The resolved document.
    Document(DocumentPayload),
    /// Nothing resolved; a structured diagnostic for the agent.
    NotFound(Box<ResolutionFailure>),
}

impl From<Resolution> for DocumentReadOutput {
    fn from(resolution: Resolution) -> Self {
        match resolution {
            Resolution::Resolved(payload) => Self::Document(payload),
            Resolution::NotFound(failure) => Self::NotFound(failure),
        }
    }
}

/// Tool for reading full document content.
///
/// The reference is resolved through [`DocumentResolver`], so the agent can
/// pass whatever the user said (an exact id, a pasted UUID, a title, or
/// "that doc"), and exhaustion comes back as a structured diagnostic rather
/// than an error.
pub struct DocumentReadTool<P> {
    resolver: DocumentResolver<P>,
    session: SharedSession,
}

impl<P> DocumentReadTool<P> {
    /// Creates a new document read tool.
    pub fn new(provider: Arc<P>, session: SharedSession) -> Self {
        Self {
            resolver: DocumentResolver::from_arc(provider),
            session,
        }
    }
}

impl<P: DocumentProvider + 'static> Tool for DocumentReadTool<P> {
    type Args = DocumentReadArgs;
    type Error = DocumentReadError;
    type Output = DocumentReadOutput;

    const NAME: &'static str = "document_read";

    async fn definition(&self, _prompt: String) -> ToolDefinition {
        ToolDefinition {
            name: Self::NAME.to_string(),
            description: "Read the full content of a project document. Accepts an exact document id, a document title, or a conversational reference like 'that doc'. If nothing matches, returns a diagnostic listing the available documents.".to_string(),
            parameters: serde_json::json!({
                "type": "object",
                "properties": {
                    "doc_id": {
                        "type": "string",
                        "description": "Document id, title, or back-reference to read"
                    }
                },
                "required": ["doc_id"]
            }),
        }
    }

    #[tracing::instrument(skip(self), fields(tool = Self::NAME))]
    async fn call(&self, args: Self::Args) -> Result<Self::Output, Self::Error> {
        let ctx = self
            .session
            .context()
            .map_err(|e| DocumentReadError::MissingContext(e.to_string()))?;

        // Snapshot the memory, resolve, write the result back; the session
        // lock is never held across the remote calls.
        let mut memory = self.session.memory();
        let resolution = self.resolver.resolve(&ctx, &args.doc_id, &mut memory).await;
        self.session.set_memory(memory);

        Ok(resolution.into())
    }
}
