//! Plain-text rendering of a requirement tree.

use crate::Requirement;

/// Render `requirements` as a box-drawing tree under `heading`.
///
/// ```text
/// Shop [SHP]
/// ├── 1: Accounts
/// │   ├── 1.1: Sign up
/// │   └── 1.2: Sign in
/// └── 2: Search
/// ```
#[must_use]
pub fn render_tree(heading: &str, requirements: &[Requirement]) -> String {
    let mut output = String::new();
    output.push_str(heading);
    output.push('\n');
    render_children(&mut output, requirements, "");
    output
}

fn render_children(output: &mut String, children: &[Requirement], prefix: &str) {
    for (i, child) in children.iter().enumerate() {
        let is_last = i == children.len() - 1;
        let branch = if is_last { "└── " } else { "├── " };
        output.push_str(prefix);
        output.push_str(branch);
        output.push_str(&child.display_format());
        output.push('\n');

        let continuation = if is_last { "    " } else { "│   " };
        render_children(output, child.children(), &format!("{prefix}{continuation}"));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_forest() {
        assert_eq!(render_tree("Shop", &[]), "Shop\n");
    }

    #[test]
    fn flat_forest() {
        let requirements = [Requirement::new("1", "Accounts"), Requirement::new("2", "Search")];

        assert_eq!(
            render_tree("Shop", &requirements),
            "Shop\n├── 1: Accounts\n└── 2: Search\n"
        );
    }

    #[test]
    fn nested_forest() {
        let requirements = [
            Requirement::new("1", "Accounts").with_children(vec![
                Requirement::new("1.1", "Sign up")
                    .with_children(vec![Requirement::new("1.1.1", "Email")]),
                Requirement::new("1.2", "Sign in"),
            ]),
            Requirement::new("2", "Search")
                .with_children(vec![Requirement::new("2.1", "Filters")]),
        ];

        let expected = "\
Shop [SHP]
├── 1: Accounts
│   ├── 1.1: Sign up
│   │   └── 1.1.1: Email
│   └── 1.2: Sign in
└── 2: Search
    └── 2.1: Filters
";
        assert_eq!(render_tree("Shop [SHP]", &requirements), expected);
    }
}
