#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

pub mod resolver;
pub mod session;
pub mod tools;

pub use resolver::{DocumentResolver, Resolution, ResolutionFailure};
pub use session::{ConversationMemory, SessionState, SharedSession};
pub use tools::ProjectToolset;

/// Tracing target for the main library.
pub const TRACING_TARGET: &str = "opsdeck_rig";
