//! Domain models for hierarchical requirements.
//!
//! This module contains the requirement tree, the lookup and mutation
//! operations over it, positional ID allocation, and configuration.

/// Requirement nodes.
pub mod requirement;
pub use requirement::Requirement;

mod project;
pub use project::{Project, id_prefix};

/// Recursive lookup and mutation over a requirement forest.
pub mod tree;
pub use tree::TreeError;

mod allocator;
pub use allocator::{ParentPolicy, allocate_id};

mod config;
pub use config::{Config, Features};
