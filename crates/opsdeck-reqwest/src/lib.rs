//! Reqwest-based HTTP client for the opsdeck backend API.
//!
//! This crate provides [`ProjectApiClient`], the reqwest-based
//! implementation of the `opsdeck-core` provider traits.
//!
//! # Example
//!
//! ```rust,ignore
//! use opsdeck_core::DocumentProvider;
//! use opsdeck_core::types::ProjectContext;
//! use opsdeck_reqwest::{ApiClientConfig, ProjectApiClient};
//!
//! // Create a client from the environment
//! let client = ProjectApiClient::from_env()?;
//!
//! // Scope calls with the session's correlation identifiers
//! let ctx = ProjectContext::new(project_id, user_id)?;
//! let docs = client.list_documents(&ctx).await?;
//! ```

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod client;
mod config;
mod error;

pub use crate::client::{ProjectApiClient, TRACING_TARGET};
pub use crate::config::{ApiClientConfig, DEFAULT_BASE_URL, DEFAULT_TIMEOUT};
pub use crate::error::{Error, Result};
