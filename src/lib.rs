//! Hierarchical Product Requirements Documents
//!
//! Requirements form a tree. Each one carries a dotted positional identifier
//! (`2.3.1`) that is assigned when it is created and never renumbered.

pub mod domain;
pub use domain::{Config, Features, ParentPolicy, Project, Requirement, TreeError};

/// YAML persistence for projects.
pub mod storage;
pub use storage::{LoadError, Persist, SaveError, Store};

pub mod authoring;
pub mod navigation;
pub mod prompt;
pub mod render;
pub mod review;
