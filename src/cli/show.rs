use std::path::Path;

use clap::Parser;
use reqd::{
    Store,
    navigation::{Outcome, Session},
};
use tracing::instrument;

use super::terminal::{Colorize, TerminalPrompter};

#[derive(Debug, Parser)]
#[command(about = "Browse requirements interactively")]
pub struct Show {
    /// Start at the children of this requirement
    id: Option<String>,
}

impl Show {
    #[instrument(level = "debug", skip(self))]
    pub fn run(self, root: &Path) -> anyhow::Result<()> {
        let store = Store::in_dir(root);
        let mut project = store.load()?;

        let session = match self.id {
            Some(id) => {
                if project.find(&id).is_none() {
                    anyhow::bail!("Requirement '{id}' not found");
                }
                Session::starting_at(id)
            }
            None => Session::at_root(),
        };

        match session.run(&mut project, &mut TerminalPrompter, &store)? {
            Outcome::Quit => {}
            Outcome::NoRequirements { title } => {
                println!("{}", format!("No requirements found for {title}").dim());
            }
            Outcome::Updated { id, title } => {
                println!(
                    "{}",
                    format!("Updated requirement {id}: {title}").success()
                );
            }
            Outcome::Unchanged { id } => {
                println!("{}", format!("{id} unchanged").dim());
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use reqd::Project;
    use tempfile::tempdir;

    use super::*;

    #[test]
    fn unknown_start_fails() {
        let tmp = tempdir().unwrap();
        Store::in_dir(tmp.path())
            .save(&Project::new("Shop", "SHP"))
            .unwrap();

        let err = Show {
            id: Some("3".to_string()),
        }
        .run(tmp.path())
        .unwrap_err();

        assert_eq!(err.to_string(), "Requirement '3' not found");
    }

    #[test]
    fn empty_project_needs_no_input() {
        let tmp = tempdir().unwrap();
        Store::in_dir(tmp.path())
            .save(&Project::new("Shop", "SHP"))
            .unwrap();

        Show { id: None }.run(tmp.path()).unwrap();
    }

    #[test]
    fn missing_document_fails() {
        let tmp = tempdir().unwrap();

        assert!(Show { id: None }.run(tmp.path()).is_err());
    }
}
