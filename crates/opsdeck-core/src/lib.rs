#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

//! # Opsdeck Core
//!
//! This crate provides the foundational abstractions for the opsdeck agent
//! tool layer. It defines the wire types for the project-management backend,
//! the provider traits through which that backend is reached, and the shared
//! structured error type, without depending on any concrete implementation.

mod error;
pub mod provider;
pub mod types;

// Re-export key types for convenience
pub use error::{BoxedError, Error, ErrorKind, Result};
pub use provider::{
    DocumentProvider, IssueProvider, KnowledgeProvider, LookupError, ProjectProvider,
};
