//! Recursive lookup and mutation over a forest of requirements.
//!
//! A forest is the ordered top-level sequence owned by a
//! [`Project`](crate::Project). All searches are depth-first and pre-order:
//! a node is visited before its children, and its children before its next
//! sibling. IDs are unique in well-formed documents, but hand-edited input
//! may contain duplicates, in which case the first match in pre-order wins.

use thiserror::Error;

use crate::domain::Requirement;

/// Errors raised by lookups and mutations over the tree.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TreeError {
    /// No requirement with the given ID exists.
    #[error("requirement '{0}' not found")]
    NotFound(String),
}

/// Find the first requirement with the given ID.
#[must_use]
pub fn find<'a>(forest: &'a [Requirement], id: &str) -> Option<&'a Requirement> {
    locate(forest, None, id).map(|(found, _)| found)
}

/// Mutable counterpart of [`find`], with the same visiting order.
pub(crate) fn find_mut<'a>(forest: &'a mut [Requirement], id: &str) -> Option<&'a mut Requirement> {
    for req in forest {
        if req.id() == id {
            return Some(req);
        }
        if let Some(found) = find_mut(req.children_mut(), id) {
            return Some(found);
        }
    }
    None
}

/// Find the parent of the requirement that [`find`] would return.
///
/// Returns `None` both for top-level requirements and for IDs that are not
/// in the tree; use [`find`] to tell the two apart.
#[must_use]
pub fn find_parent<'a>(forest: &'a [Requirement], id: &str) -> Option<&'a Requirement> {
    locate(forest, None, id).and_then(|(_, parent)| parent)
}

/// Pre-order search yielding the first match together with its parent.
fn locate<'a>(
    siblings: &'a [Requirement],
    parent: Option<&'a Requirement>,
    id: &str,
) -> Option<(&'a Requirement, Option<&'a Requirement>)> {
    siblings.iter().find_map(|req| {
        if req.id() == id {
            Some((req, parent))
        } else {
            locate(req.children(), Some(req), id)
        }
    })
}

/// Append `child` to the children of `parent_id`.
///
/// Only the target node's children are touched. If the parent does not
/// exist the forest is left unchanged.
///
/// # Errors
///
/// Returns [`TreeError::NotFound`] if `parent_id` is not in the forest.
pub fn add_child<'a>(
    forest: &'a mut [Requirement],
    parent_id: &str,
    child: Requirement,
) -> Result<&'a Requirement, TreeError> {
    let parent =
        find_mut(forest, parent_id).ok_or_else(|| TreeError::NotFound(parent_id.to_string()))?;
    let children = parent.children_mut();
    children.push(child);
    Ok(&children[children.len() - 1])
}

/// Every requirement with at least one child, at any depth, in pre-order.
///
/// A branch is listed before any branches nested beneath it.
#[must_use]
pub fn branches(forest: &[Requirement]) -> Vec<&Requirement> {
    let mut found = Vec::new();
    collect_branches(forest, &mut found);
    found
}

fn collect_branches<'a>(forest: &'a [Requirement], found: &mut Vec<&'a Requirement>) {
    for req in forest.iter().filter(|req| req.is_branch()) {
        found.push(req);
        collect_branches(req.children(), found);
    }
}
