//! Issue types exchanged with the backend.

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};

/// Workflow status of an issue.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, AsRefStr, EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum IssueStatus {
    /// Not started.
    Open,
    /// Being worked on.
    InProgress,
    /// Finished.
    Done,
}

/// Priority of an issue.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, AsRefStr, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum IssuePriority {
    /// Low priority.
    Low,
    /// Default priority.
    Medium,
    /// High priority.
    High,
}

impl Default for IssuePriority {
    fn default() -> Self {
        Self::Medium
    }
}

/// An issue as returned by the backend.
///
/// The listing endpoint omits `description`; the detail endpoint includes it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Issue {
    /// The issue ID.
    pub id: String,
    /// The issue title.
    pub title: String,
    /// Workflow status.
    pub status: IssueStatus,
    /// Priority.
    pub priority: IssuePriority,
    /// Full description (detail endpoint only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Request body for creating an issue.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewIssue {
    /// The issue title.
    pub title: String,
    /// Full description.
    pub description: String,
    /// Priority, defaulting to medium.
    #[serde(default)]
    pub priority: IssuePriority,
}

impl NewIssue {
    /// Creates a new issue request with the default priority.
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            priority: IssuePriority::default(),
        }
    }

    /// Sets the priority.
    pub fn with_priority(mut self, priority: IssuePriority) -> Self {
        self.priority = priority;
        self
    }
}

/// Full replacement body for the issue update endpoint.
///
/// The backend's PUT replaces the whole object, so updates are built from
/// the current issue with the changed fields swapped in.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IssueReplacement {
    /// The issue title.
    pub title: String,
    /// Full description.
    pub description: String,
    /// Workflow status.
    pub status: IssueStatus,
    /// Priority.
    pub priority: IssuePriority,
}

impl IssueReplacement {
    /// Builds a replacement from the current issue state.
    pub fn from_current(current: &Issue) -> Self {
        Self {
            title: current.title.clone(),
            description: current.description.clone().unwrap_or_default(),
            status: current.status,
            priority: current.priority,
        }
    }

    /// Swaps in a new status.
    pub fn with_status(mut self, status: IssueStatus) -> Self {
        self.status = status;
        self
    }

    /// Swaps in a new priority.
    pub fn with_priority(mut self, priority: IssuePriority) -> Self {
        self.priority = priority;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_serializes_snake_case() {
        let json = serde_json::to_string(&IssueStatus::InProgress).unwrap();
        assert_eq!(json, "\"in_progress\"");
    }

    #[test]
    fn replacement_preserves_unchanged_fields() {
        let current = Issue {
            id: "i1".into(),
            title: "Fix login".into(),
            status: IssueStatus::Open,
            priority: IssuePriority::High,
            description: Some("Users cannot log in".into()),
        };

        let replacement = IssueReplacement::from_current(&current).with_status(IssueStatus::Done);

        assert_eq!(replacement.title, "Fix login");
        assert_eq!(replacement.description, "Users cannot log in");
        assert_eq!(replacement.status, IssueStatus::Done);
        assert_eq!(replacement.priority, IssuePriority::High);
    }

    #[test]
    fn replacement_defaults_missing_description() {
        let current = Issue {
            id: "i1".into(),
            title: "Fix login".into(),
            status: IssueStatus::Open,
            priority: IssuePriority::Medium,
            description: None,
        };

        assert_eq!(IssueReplacement::from_current(&current).description, "");
    }
}
