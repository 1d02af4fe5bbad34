use tracing::debug;

use crate::domain::{Project, TreeError, tree};

/// What to do when an ID is requested under a parent that does not exist.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ParentPolicy {
    /// Fail with [`TreeError::NotFound`].
    #[default]
    Strict,
    /// Allocate the next top-level ID instead.
    ///
    /// With this policy [`allocate_id`] never fails. The caller must then
    /// insert the new requirement at the top level, or the ID will not match
    /// its position.
    FallbackToTopLevel,
}

/// Compute the positional ID for a new requirement.
///
/// - With no parent (or an empty parent ID), this is one past the current
///   number of top-level requirements: `"1"`, `"2"`, ...
/// - With a parent `P` that has `m` children, this is `"P.(m+1)"`.
///
/// Existing IDs are never consulted or changed; the result depends only on
/// sibling counts at the time of the call.
///
/// # Errors
///
/// With [`ParentPolicy::Strict`], returns [`TreeError::NotFound`] if the
/// parent does not exist.
pub fn allocate_id(
    project: &Project,
    parent: Option<&str>,
    policy: ParentPolicy,
) -> Result<String, TreeError> {
    let top_level = || (project.requirements().len() + 1).to_string();

    let Some(parent_id) = parent.filter(|id| !id.is_empty()) else {
        return Ok(top_level());
    };

    match tree::find(project.requirements(), parent_id) {
        Some(parent) => Ok(format!("{parent_id}.{}", parent.children().len() + 1)),
        None => match policy {
            ParentPolicy::Strict => Err(TreeError::NotFound(parent_id.to_string())),
            ParentPolicy::FallbackToTopLevel => {
                debug!(parent = parent_id, "parent not found, allocating a top-level id");
                Ok(top_level())
            }
        },
    }
}
