//! Issue management tools.
//!
//! Four tools over the backend's issue endpoints. The update tool does a
//! read-modify-write: the backend's PUT replaces the whole issue, so the
//! current state is fetched first and only the requested fields change.

use std::sync::Arc;

use opsdeck_core::IssueProvider;
use opsdeck_core::types::{Issue, IssuePriority, IssueReplacement, IssueStatus, NewIssue};
use rig::completion::ToolDefinition;
use rig::tool::Tool;
use serde::Deserialize;

use crate::session::SharedSession;

/// Error type shared by the issue tools.
#[derive(Debug, thiserror::Error)]
pub enum IssueToolError {
    #[error("missing session context: {0}")]
    MissingContext(String),
    #[error("backend call failed: {0}")]
    Backend(String),
}

fn context(session: &SharedSession) -> Result<opsdeck_core::types::ProjectContext, IssueToolError> {
    session
        .context()
        .map_err(|e| IssueToolError::MissingContext(e.to_string()))
}

/// Arguments for listing issues.
#[derive(Debug, Default, Deserialize)]
pub struct IssueListArgs {
    /// Only return issues with this status.
    #[serde(default)]
    pub status: Option<IssueStatus>,
}

/// Tool for listing project issues.
pub struct IssueListTool<P> {
    provider: Arc<P>,
    session: SharedSession,
}

impl<P> IssueListTool<P> {
    /// Creates a new issue listing tool.
    pub fn new(provider: Arc<P>, session: SharedSession) -> Self {
        Self { provider, session }
    }
}

impl<P: IssueProvider + 'static> Tool for IssueListTool<P> {
    type Args = IssueListArgs;
    type Error = IssueToolError;
    type Output = Vec<Issue>;

    const NAME: &'static str = "issue_list";

    async fn definition(&self, _prompt: String) -> ToolDefinition {
        ToolDefinition {
            name: Self::NAME.to_string(),
            description: "List the project's issues. Optionally filter by status to find open tasks or work in progress.".to_string(),
            parameters: serde_json::json!({
                "type": "object",
                "properties": {
                    "status": {
                        "type": "string",
                        "enum": ["open", "in_progress", "done"],
                        "description": "Only return issues with this status"
                    }
                }
            }),
        }
    }

    #[tracing::instrument(skip(self), fields(tool = Self::NAME, status = ?args.status))]
    async fn call(&self, args: Self::Args) -> Result<Self::Output, Self::Error> {
        let ctx = context(&self.session)?;

        let issues = self
            .provider
            .list_issues(&ctx)
            .await
            .map_err(|e| IssueToolError::Backend(e.to_string()))?;

        // The backend has no status query param; filter here.
        let issues: Vec<Issue> = match args.status {
            Some(status) => issues.into_iter().filter(|i| i.status == status).collect(),
            None => issues,
        };

        tracing::debug!(issue_count = issues.len(), "issue_list completed");
        Ok(issues)
    }
}

/// Arguments for reading a single issue.
#[derive(Debug, Deserialize)]
pub struct IssueReadArgs {
    /// The issue id.
    pub issue_id: String,
}

/// Tool for reading a single issue with its full description.
pub struct IssueReadTool<P> {
    provider: Arc<P>,
    session: SharedSession,
}

impl<P> IssueReadTool<P> {
    /// Creates a new issue read tool.
    pub fn new(provider: Arc<P>, session: SharedSession) -> Self {
        Self { provider, session }
    }
}

impl<P: IssueProvider + 'static> Tool for IssueReadTool<P> {
    type Args = IssueReadArgs;
    type Error = IssueToolError;
    type Output = Issue;

    const NAME: &'static str = "issue_read";

    async fn definition(&self, _prompt: String) -> ToolDefinition {
        ToolDefinition {
            name: Self::NAME.to_string(),
            description: "Get a single issue with its full description.".to_string(),
            parameters: serde_json::json!({
                "type": "object",
                "properties": {
                    "issue_id": {
                        "type": "string",
                        "description": "The issue id"
                    }
                },
                "required": ["issue_id"]
            }),
        }
    }

    #[tracing::instrument(skip(self), fields(tool = Self::NAME, issue_id = %args.issue_id))]
    async fn call(&self, args: Self::Args) -> Result<Self::Output, Self::Error> {
        let ctx = context(&self.session)?;
        self.provider
            .get_issue(&ctx, &args.issue_id)
            .await
            .map_err(|e| IssueToolError::Backend(e.to_string()))
    }
}

/// Arguments for creating an issue.
#[derive(Debug, Deserialize)]
pub struct IssueCreateArgs {
    /// The issue title.
    pub title: String,
    /// Full description.
    pub description: String,
    /// Priority, defaulting to medium.
    #[serde(default)]
    pub priority: Option<IssuePriority>,
}

/// Tool for creating a new issue.
pub struct IssueCreateTool<P> {
    provider: Arc<P>,
    session: SharedSession,
}

impl<P> IssueCreateTool<P> {
    /// Creates a new issue creation tool.
    pub fn new(provider: Arc<P>, session: SharedSession) -> Self {
        Self { provider, session }
    }
}

impl<P: IssueProvider + 'static> Tool for IssueCreateTool<P> {
    type Args = IssueCreateArgs;
    type Error = IssueToolError;
    type Output = Issue;

    const NAME: &'static str = "issue_create";

    async fn definition(&self, _prompt: String) -> ToolDefinition {
        ToolDefinition {
            name: Self::NAME.to_string(),
            description: "Create a new issue in the project backlog. Infer the priority from context when the user doesn't state one.".to_string(),
            parameters: serde_json::json!({
                "type": "object",
                "properties": {
                    "title": {
                        "type": "string",
                        "description": "Short issue title"
                    },
                    "description": {
                        "type": "string",
                        "description": "Detailed description of the work"
                    },
                    "priority": {
                        "type": "string",
                        "enum": ["low", "medium", "high"],
                        "description": "Issue priority (default: medium)"
                    }
                },
                "required": ["title", "description"]
            }),
        }
    }

    #[tracing::instrument(skip(self), fields(tool = Self::NAME))]
    async fn call(&self, args: Self::Args) -> Result<Self::Output, Self::Error> {
        let ctx = context(&self.session)?;

        let mut issue = NewIssue::new(args.title, args.description);
        if let Some(priority) = args.priority {
            issue = issue.with_priority(priority);
        }

        self.provider
            .create_issue(&ctx, &issue)
            .await
            .map_err(|e| IssueToolError::Backend(e.to_string()))
    }
}

/// Arguments for updating an issue.
#[derive(Debug, Deserialize)]
pub struct IssueUpdateArgs {
    /// The issue id.
    pub issue_id: String,
    /// New workflow status.
    pub status: IssueStatus,
    /// New priority, kept unchanged when omitted.
    #[serde(default)]
    pub priority: Option<IssuePriority>,
}

/// Tool for updating an issue's status and priority.
pub struct IssueUpdateTool<P> {
    provider: Arc<P>,
    session: SharedSession,
}

impl<P> IssueUpdateTool<P> {
    /// Creates a new issue update tool.
    pub fn new(provider: Arc<P>, session: SharedSession) -> Self {
        Self { provider, session }
    }
}

impl<P: IssueProvider + 'static> Tool for IssueUpdateTool<P> {
    type Args = IssueUpdateArgs;
    type Error = IssueToolError;
    type Output = Issue;

    const NAME: &'static str = "issue_update";

    async fn definition(&self, _prompt: String) -> ToolDefinition {
        ToolDefinition {
            name: Self::NAME.to_string(),
            description: "Update an issue's status (and optionally its priority). Use this to mark tasks as in progress or done.".to_string(),
            parameters: serde_json::json!({
                "type": "object",
                "properties": {
                    "issue_id": {
                        "type": "string",
                        "description": "The issue id"
                    },
                    "status": {
                        "type": "string",
                        "enum": ["open", "in_progress", "done"],
                        "description": "New workflow status"
                    },
                    "priority": {
                        "type": "string",
                        "enum": ["low", "medium", "high"],
                        "description": "New priority (unchanged when omitted)"
                    }
                },
                "required": ["issue_id", "status"]
            }),
        }
    }

    #[tracing::instrument(skip(self), fields(tool = Self::NAME, issue_id = %args.issue_id))]
    async fn call(&self, args: Self::Args) -> Result<Self::Output, Self::Error> {
        let ctx = context(&self.session)?;

        // PUT replaces the object, so fetch the current state first.
        let current = self
            .provider
            .get_issue(&ctx, &args.issue_id)
            .await
            .map_err(|e| IssueToolError::Backend(e.to_string()))?;

        let mut replacement = IssueReplacement::from_current(&current).with_status(args.status);
        if let Some(priority) = args.priority {
            replacement = replacement.with_priority(priority);
        }

        self.provider
            .update_issue(&ctx, &args.issue_id, &replacement)
            .await
            .map_err(|e| IssueToolError::Backend(e.to_string()))
    }
}
