//! Project metadata tool.

use std::sync::Arc;

use opsdeck_core::ProjectProvider;
use opsdeck_core::types::ProjectInfo;
use rig::completion::ToolDefinition;
use rig::tool::Tool;
use serde::Deserialize;

use crate::session::SharedSession;

/// Error type for project info operations.
#[derive(Debug, thiserror::Error)]
pub enum ProjectInfoError {
    #[error("missing session context: {0}")]
    MissingContext(String),
    #[error("backend call failed: {0}")]
    Backend(String),
}

/// Arguments for project info (none).
#[derive(Debug, Default, Deserialize)]
pub struct ProjectInfoArgs {}

/// Tool for fetching metadata about the current project.
pub struct ProjectInfoTool<P> {
    provider: Arc<P>,
    session: SharedSession,
}

impl<P> ProjectInfoTool<P> {
    /// Creates a new project info tool.
    pub fn new(provider: Arc<P>, session: SharedSession) -> Self {
        Self { provider, session }
    }
}

impl<P: ProjectProvider + 'static> Tool for ProjectInfoTool<P> {
    type Args = ProjectInfoArgs;
    type Error = ProjectInfoError;
    type Output = ProjectInfo;

    const NAME: &'static str = "project_info";

    async fn definition(&self, _prompt: String) -> ToolDefinition {
        ToolDefinition {
            name: Self::NAME.to_string(),
            description: "Get metadata about the current project (name and description).".to_string(),
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
            .map_err(|e| ProjectInfoError::MissingContext(e.to_string()))?;

        self.provider
            .project_info(&ctx)
            .await
            .map_err(|e| ProjectInfoError::Backend(e.to_string()))
    }
}
