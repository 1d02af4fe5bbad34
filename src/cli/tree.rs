use std::path::Path;

use clap::Parser;
use reqd::{Project, Store, render::render_tree};
use tracing::instrument;

#[derive(Debug, Parser)]
#[command(about = "Print the requirement tree")]
pub struct Tree {
    /// Print only the subtree below this requirement
    id: Option<String>,
}

impl Tree {
    #[instrument(level = "debug", skip(self))]
    pub fn run(self, root: &Path) -> anyhow::Result<()> {
        let project = Store::in_dir(root).load()?;
        print!("{}", self.render(&project)?);
        Ok(())
    }

    fn render(&self, project: &Project) -> anyhow::Result<String> {
        match &self.id {
            None => Ok(render_tree(&project.label(), project.requirements())),
            Some(id) => {
                let Some(requirement) = project.find(id) else {
                    anyhow::bail!("Requirement '{id}' not found");
                };
                Ok(render_tree(
                    &requirement.display_format(),
                    requirement.children(),
                ))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn project() -> Project {
        let mut project = Project::new("Shop", "SHP");
        project.add_requirement("Accounts", None).unwrap();
        project.add_requirement("Sign up", Some("1")).unwrap();
        project.add_requirement("Search", None).unwrap();
        project
    }

    #[test]
    fn whole_tree() {
        let output = Tree { id: None }.render(&project()).unwrap();
        assert_eq!(
            output,
            "Shop [SHP]\n├── 1: Accounts\n│   └── 1.1: Sign up\n└── 2: Search\n"
        );
    }

    #[test]
    fn subtree() {
        let output = Tree {
            id: Some("1".to_string()),
        }
        .render(&project())
        .unwrap();
        assert_eq!(output, "1: Accounts\n└── 1.1: Sign up\n");
    }

    #[test]
    fn unknown_subtree() {
        let err = Tree {
            id: Some("7".to_string()),
        }
        .render(&project())
        .unwrap_err();
        assert_eq!(err.to_string(), "Requirement '7' not found");
    }
}
