//! Correlation context for backend calls.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// The pair of opaque correlation identifiers that scopes every backend call.
///
/// Both values are injected from the session by the caller; the tool layer
/// never invents them. Constructing a context with a missing or blank value
/// is a precondition failure, reported before any remote call is attempted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectContext {
    /// The project the agent is operating on.
    pub project_id: String,
    /// The user the agent is acting for.
    pub user_id: String,
}

impl ProjectContext {
    /// Creates a new context, validating that both identifiers are present.
    ///
    /// # Errors
    ///
    /// Returns a missing-context error if either value is empty or
    /// whitespace-only.
    pub fn new(project_id: impl Into<String>, user_id: impl Into<String>) -> Result<Self> {
        let project_id = project_id.into();
        let user_id = user_id.into();

        if project_id.trim().is_empty() || user_id.trim().is_empty() {
            return Err(Error::missing_context()
                .with_message("missing project_id or user_id in session state"));
        }

        Ok(Self {
            project_id,
            user_id,
        })
    }

    /// Returns the project identifier.
    pub fn project_id(&self) -> &str {
        &self.project_id
    }

    /// Returns the user identifier.
    pub fn user_id(&self) -> &str {
        &self.user_id
    }
}
