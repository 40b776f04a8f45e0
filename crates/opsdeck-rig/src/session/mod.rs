//! Session state for agent tool invocations.
//!
//! A session is owned by an external store; this module only defines the
//! state the tool layer reads and writes: the correlation identifiers
//! injected at session creation and the [`ConversationMemory`] consulted by
//! the document-reference resolver.

mod memory;

use std::sync::{Arc, RwLock};

use jiff::Timestamp;
pub use memory::ConversationMemory;
use opsdeck_core::types::ProjectContext;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Per-session state visible to the tool layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionState {
    /// Unique session ID.
    id: Uuid,

    /// Project the session operates on.
    project_id: Option<String>,

    /// User the session acts for.
    user_id: Option<String>,

    /// Conversation memory for document references.
    memory: ConversationMemory,

    /// When the session was created.
    created_at: Timestamp,

    /// Last activity time.
    last_activity_at: Timestamp,
}

impl SessionState {
    /// Creates a session with no correlation identifiers.
    ///
    /// Tools invoked on such a session fail their precondition check until
    /// both identifiers are set.
    pub fn new() -> Self {
        let now = Timestamp::now();
        Self {
            id: Uuid::now_v7(),
            project_id: None,
            user_id: None,
            memory: ConversationMemory::new(),
            created_at: now,
            last_activity_at: now,
        }
    }

    /// Creates a session scoped to the given project and user.
    pub fn with_context(project_id: impl Into<String>, user_id: impl Into<String>) -> Self {
        let mut state = Self::new();
        state.project_id = Some(project_id.into());
        state.user_id = Some(user_id.into());
        state
    }

    /// Returns the session ID.
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Returns the project identifier, if set.
    pub fn project_id(&self) -> Option<&str> {
        self.project_id.as_deref()
    }

    /// Returns the user identifier, if set.
    pub fn user_id(&self) -> Option<&str> {
        self.user_id.as_deref()
    }

    /// Returns the correlation context for backend calls.
    ///
    /// # Errors
    ///
    /// Returns a missing-context error when either identifier is absent.
    /// This is a precondition failure: no remote call is attempted.
    pub fn context(&self) -> opsdeck_core::Result<ProjectContext> {
        ProjectContext::new(
            self.project_id.clone().unwrap_or_default(),
            self.user_id.clone().unwrap_or_default(),
        )
    }

    /// Returns the conversation memory.
    pub fn memory(&self) -> &ConversationMemory {
        &self.memory
    }

    /// Returns the conversation memory for mutation.
    pub fn memory_mut(&mut self) -> &mut ConversationMemory {
        self.last_activity_at = Timestamp::now();
        &mut self.memory
    }

    /// Returns the creation time.
    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }

    /// Returns the last activity time.
    pub fn last_activity_at(&self) -> Timestamp {
        self.last_activity_at
    }

    /// Touches the session to update last activity time.
    pub fn touch(&mut self) {
        self.last_activity_at = Timestamp::now();
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new()
    }
}

/// Cheaply clonable handle to a session's state.
///
/// The external session store owns the authoritative copy; this handle is
/// how tools within one agent turn share it. Individual reads and updates
/// are atomic, but the lock is never held across a remote call: callers
/// snapshot the memory, resolve, and write the result back.
#[derive(Debug, Clone)]
pub struct SharedSession {
    inner: Arc<RwLock<SessionState>>,
}

impl SharedSession {
    /// Wraps the given state in a shared handle.
    pub fn new(state: SessionState) -> Self {
        Self {
            inner: Arc::new(RwLock::new(state)),
        }
    }

    /// Creates a session handle scoped to the given project and user.
    pub fn with_context(project_id: impl Into<String>, user_id: impl Into<String>) -> Self {
        Self::new(SessionState::with_context(project_id, user_id))
    }

    /// Runs a closure over the current state.
    pub fn with<R>(&self, f: impl FnOnce(&SessionState) -> R) -> R {
        let state = self
            .inner
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        f(&state)
    }

    /// Runs a closure over the state, allowing mutation.
    pub fn update<R>(&self, f: impl FnOnce(&mut SessionState) -> R) -> R {
        let mut state = self
            .inner
            .write()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        f(&mut state)
    }

    /// Returns the correlation context for backend calls.
    pub fn context(&self) -> opsdeck_core::Result<ProjectContext> {
        self.with(|state| state.context())
    }

    /// Returns a snapshot of the conversation memory.
    pub fn memory(&self) -> ConversationMemory {
        self.with(|state| state.memory().clone())
    }

    /// Overwrites the conversation memory.
    pub fn set_memory(&self, memory: ConversationMemory) {
        self.update(|state| *state.memory_mut() = memory);
    }
}

impl Default for SharedSession {
    fn default() -> Self {
        Self::new(SessionState::new())
    }
}
