//! Tools module for agent function calling capabilities.
//!
//! This module provides the tools an agent uses to work with the
//! project-management backend:
//!
//! - [`KnowledgeSearchTool`] - Hybrid search over project knowledge
//! - [`DocumentListTool`] - List document metadata
//! - [`DocumentReadTool`] - Read document content (resolver-backed)
//! - [`IssueListTool`] / [`IssueReadTool`] / [`IssueCreateTool`] /
//!   [`IssueUpdateTool`] - Issue management
//! - [`ProjectInfoTool`] - Project metadata
//!
//! [`ProjectToolset`] wires one provider and one session into all of them.

mod document_list;
mod document_read;
mod issue;
mod knowledge_search;
mod project_info;

use std::sync::Arc;

pub use document_list::{DocumentListArgs, DocumentListError, DocumentListTool};
pub use document_read::{
    DocumentReadArgs, DocumentReadError, DocumentReadOutput, DocumentReadTool,
};
pub use issue::{
    IssueCreateArgs, IssueCreateTool, IssueListArgs, IssueListTool, IssueReadArgs, IssueReadTool,
    IssueToolError, IssueUpdateArgs, IssueUpdateTool,
};
pub use knowledge_search::{KnowledgeSearchArgs, KnowledgeSearchError, KnowledgeSearchTool};
use opsdeck_core::{DocumentProvider, IssueProvider, KnowledgeProvider, ProjectProvider};
pub use project_info::{ProjectInfoArgs, ProjectInfoError, ProjectInfoTool};

use crate::session::SharedSession;

/// Factory wiring one backend provider and one session into every tool.
///
/// The provider is shared; each tool gets its own handle. Register the
/// tools with the agent builder of the externally supplied runtime.
#[derive(Debug)]
pub struct ProjectToolset<P> {
    provider: Arc<P>,
    session: SharedSession,
}

impl<P> ProjectToolset<P> {
    /// Creates a toolset over a shared provider and session.
    pub fn new(provider: Arc<P>, session: SharedSession) -> Self {
        Self { provider, session }
    }

    /// Returns the session handle the tools share.
    pub fn session(&self) -> &SharedSession {
        &self.session
    }
}

impl<P> ProjectToolset<P> {
    /// Creates the knowledge search tool.
    pub fn knowledge_search(&self) -> KnowledgeSearchTool<P>
    where
        P: KnowledgeProvider,
    {
        KnowledgeSearchTool::new(self.provider.clone(), self.session.clone())
    }

    /// Creates the document listing tool.
    pub fn document_list(&self) -> DocumentListTool<P>
    where
        P: DocumentProvider,
    {
        DocumentListTool::new(self.provider.clone(), self.session.clone())
    }

    /// Creates the document read tool.
    pub fn document_read(&self) -> DocumentReadTool<P>
    where
        P: DocumentProvider,
    {
        DocumentReadTool::new(self.provider.clone(), self.session.clone())
    }

    /// Creates the issue listing tool.
    pub fn issue_list(&self) -> IssueListTool<P>
    where
        P: IssueProvider,
    {
        IssueListTool::new(self.provider.clone(), self.session.clone())
    }

    /// Creates the issue read tool.
    pub fn issue_read(&self) -> IssueReadTool<P>
    where
        P: IssueProvider,
    {
        IssueReadTool::new(self.provider.clone(), self.session.clone())
    }

    /// Creates the issue creation tool.
    pub fn issue_create(&self) -> IssueCreateTool<P>
    where
        P: IssueProvider,
    {
        IssueCreateTool::new(self.provider.clone(), self.session.clone())
    }

    /// Creates the issue update tool.
    pub fn issue_update(&self) -> IssueUpdateTool<P>
    where
        P: IssueProvider,
    {
        IssueUpdateTool::new(self.provider.clone(), self.session.clone())
    }

    /// Creates the project info tool.
    pub fn project_info(&self) -> ProjectInfoTool<P>
    where
        P: ProjectProvider,
    {
        ProjectInfoTool::new(self.provider.clone(), self.session.clone())
    }
}
