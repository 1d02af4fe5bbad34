use serde::{Deserialize, Serialize};

/// A single requirement in a Product Requirements Document.
///
/// Requirements form a tree. The `id` is a dotted positional path (`2.3.1`)
/// assigned when the requirement is created. It is never recomputed when
/// siblings change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Requirement {
    id: String,
    title: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    children: Vec<Requirement>,
}

impl Requirement {
    /// Construct a new leaf requirement.
    #[must_use]
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            children: Vec::new(),
        }
    }

    /// Replace the children of this requirement.
    ///
    /// Intended for building fixtures and documents by hand; the IDs of the
    /// children are taken as given.
    #[must_use]
    pub fn with_children(mut self, children: Vec<Self>) -> Self {
        self.children = children;
        self
    }

    /// The positional identifier.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// The human-authored text of the requirement.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Replace the title.
    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    /// The direct children, in insertion order.
    #[must_use]
    pub fn children(&self) -> &[Self] {
        &self.children
    }

    pub(crate) const fn children_mut(&mut self) -> &mut Vec<Self> {
        &mut self.children
    }

    /// Whether this requirement has at least one child.
    #[must_use]
    pub fn is_branch(&self) -> bool {
        !self.children.is_empty()
    }

    /// One-line `id: title` form, used in prompts and candidate lists.
    #[must_use]
    pub fn display_format(&self) -> String {
        format!("{}: {}", self.id, self.title)
    }
}

#[cfg(test)]
mod tests {
    use super::Requirement;

    #[test]
    fn equality_is_structural() {
        let a = Requirement::new("1", "A").with_children(vec![Requirement::new("1.1", "B")]);
        let b = Requirement::new("1", "A").with_children(vec![Requirement::new("1.1", "B")]);
        let c = Requirement::new("1", "A").with_children(vec![Requirement::new("1.1", "C")]);

        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn empty_children_are_omitted() {
        let yaml = serde_yaml::to_string(&Requirement::new("1", "Leaf")).unwrap();
        assert!(!yaml.contains("children"));
    }

    #[test]
    fn children_default_to_empty() {
        let req: Requirement = serde_yaml::from_str("id: '3'\ntitle: Leaf\n").unwrap();
        assert_eq!(req.id(), "3");
        assert!(req.children().is_empty());
        assert!(!req.is_branch());
    }

    #[test]
    fn nested_children_are_read_in_order() {
        let yaml = "\
id: '2'
title: Parent
children:
  - id: '2.1'
    title: First
  - id: '2.2'
    title: Second
";
        let req: Requirement = serde_yaml::from_str(yaml).unwrap();
        let ids: Vec<_> = req.children().iter().map(Requirement::id).collect();
        assert_eq!(ids, ["2.1", "2.2"]);
    }

    #[test]
    fn display_format_joins_id_and_title() {
        assert_eq!(
            Requirement::new("1.2", "Rate limiting").display_format(),
            "1.2: Rate limiting"
        );
    }
}
