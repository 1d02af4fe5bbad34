use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::domain::{ParentPolicy, Requirement, TreeError, allocate_id, tree};

/// A Product Requirements Document.
///
/// The project is the implicit root of the requirement tree: it owns the
/// ordered sequence of top-level requirements, each of which owns its
/// children.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    id_prefix: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    requirements: Vec<Requirement>,
}

impl Project {
    /// Construct an empty project.
    #[must_use]
    pub fn new(name: impl Into<String>, id_prefix: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            id_prefix: id_prefix.into(),
            requirements: Vec::new(),
        }
    }

    /// The project name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The short label used to refer to this project, e.g. `PRD`.
    ///
    /// May be empty.
    #[must_use]
    pub fn id_prefix(&self) -> &str {
        &self.id_prefix
    }

    /// Name and prefix together, e.g. `Checkout [CHK]`.
    #[must_use]
    pub fn label(&self) -> String {
        if self.id_prefix.is_empty() {
            self.name.clone()
        } else {
            format!("{} [{}]", self.name, self.id_prefix)
        }
    }

    /// The top-level requirements, in insertion order.
    #[must_use]
    pub fn requirements(&self) -> &[Requirement] {
        &self.requirements
    }

    #[cfg(test)]
    pub(crate) fn requirements_mut(&mut self) -> &mut Vec<Requirement> {
        &mut self.requirements
    }

    /// Append a requirement to the top level as-is.
    ///
    /// The ID is not checked against the requirement's position. Use
    /// [`Project::add_requirement`] to allocate an ID.
    pub fn push(&mut self, requirement: Requirement) {
        self.requirements.push(requirement);
    }

    /// See [`tree::find`].
    #[must_use]
    pub fn find(&self, id: &str) -> Option<&Requirement> {
        tree::find(&self.requirements, id)
    }

    /// See [`tree::find_parent`].
    #[must_use]
    pub fn find_parent(&self, id: &str) -> Option<&Requirement> {
        tree::find_parent(&self.requirements, id)
    }

    /// See [`tree::add_child`].
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::NotFound`] if the parent does not exist.
    pub fn add_child(
        &mut self,
        parent_id: &str,
        child: Requirement,
    ) -> Result<&Requirement, TreeError> {
        tree::add_child(&mut self.requirements, parent_id, child)
    }

    /// See [`tree::branches`].
    #[must_use]
    pub fn branches(&self) -> Vec<&Requirement> {
        tree::branches(&self.requirements)
    }

    /// Allocate an ID for `title`, then insert it at the top level or under
    /// `parent`.
    ///
    /// Either the requirement is inserted, or the project is unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::NotFound`] if `parent` is given but not present.
    #[instrument(level = "debug", skip(self))]
    pub fn add_requirement(
        &mut self,
        title: &str,
        parent: Option<&str>,
    ) -> Result<&Requirement, TreeError> {
        let parent = parent.filter(|id| !id.is_empty());
        let id = allocate_id(self, parent, ParentPolicy::Strict)?;
        debug!(%id, "allocated requirement id");

        let requirement = Requirement::new(id, title);
        match parent {
            Some(parent_id) => self.add_child(parent_id, requirement),
            None => {
                self.requirements.push(requirement);
                let index = self.requirements.len() - 1;
                Ok(&self.requirements[index])
            }
        }
    }

    /// Replace the title of requirement `id`.
    ///
    /// Returns `true` if the title changed. A blank title, or one equal to
    /// the current title, is not applied. Surrounding whitespace is trimmed.
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::NotFound`] if `id` is not present.
    pub fn retitle(&mut self, id: &str, title: &str) -> Result<bool, TreeError> {
        let requirement = tree::find_mut(&mut self.requirements, id)
            .ok_or_else(|| TreeError::NotFound(id.to_string()))?;

        let title = title.trim();
        if title.is_empty() || title == requirement.title() {
            return Ok(false);
        }
        requirement.set_title(title);
        Ok(true)
    }
}

/// Derive a short ID prefix from a project name.
///
/// Multi-word names become an acronym of the words that start with a letter
/// (`"Product Requirements Document"` → `"PRD"`). Single words are truncated
/// to four characters (`"application"` → `"APPL"`). Words are separated by
/// spaces, hyphens, underscores or dots.
#[must_use]
pub fn id_prefix(name: &str) -> String {
    let name = name.trim();
    let truncated = || name.chars().take(4).collect::<String>().to_uppercase();

    let words: Vec<&str> = name
        .split([' ', '-', '_', '.'])
        .filter(|word| !word.is_empty())
        .collect();

    if words.len() <= 1 {
        return truncated();
    }

    let acronym: String = words
        .iter()
        .filter_map(|word| word.chars().next())
        .filter(|c| c.is_alphabetic())
        .flat_map(char::to_uppercase)
        .collect();

    if acronym.is_empty() {
        truncated()
    } else {
        acronym
    }
}
