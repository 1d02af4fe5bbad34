use std::path::Path;

use clap::Parser;
use reqd::{
    Features, Store,
    authoring::{self, AddRequest},
    review::{OpenAiReviewer, Reviewer},
};
use tracing::{debug, instrument};

use super::terminal::{Colorize, TerminalPrompter, WithSpinner};

#[derive(Debug, Parser)]
#[command(about = "Document a new requirement")]
pub struct Require {
    /// The requirement text
    title: String,

    /// ID of the parent requirement
    #[arg(long, short)]
    parent: Option<String>,

    /// Skip review of the requirement text
    #[arg(long, short = 'V')]
    no_validate: bool,

    /// Skip proposing a parent for this requirement
    #[arg(long, short = 'P')]
    no_parent_proposal: bool,
}

impl Require {
    #[instrument(level = "debug", skip(self))]
    pub fn run(self, root: &Path) -> anyhow::Result<()> {
        let store = Store::in_dir(root);
        let mut project = store.load()?;
        let config = super::load_config(root);

        let mut features = config
            .features()
            .without_validation(self.no_validate)
            .without_parent_suggestion(self.no_parent_proposal);

        let api_key = std::env::var(&config.api_key_env)
            .ok()
            .filter(|key| !key.is_empty());
        if api_key.is_none() && features.any() {
            debug!("{} is not set, skipping review", config.api_key_env);
            features = Features::none();
        }

        let reviewer = api_key
            .filter(|_| features.any())
            .map(|key| WithSpinner(OpenAiReviewer::from_config(&config, key)));

        let added = authoring::add_requirement(
            &mut project,
            AddRequest::new(self.title, self.parent),
            features,
            reviewer.as_ref().map(|r| r as &dyn Reviewer),
            &mut TerminalPrompter,
        )?;
        let line = added.display_format();

        store.save(&project)?;

        println!("\n{}", line.success());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use reqd::{Project, Requirement};
    use tempfile::tempdir;

    use super::*;

    fn require(title: &str, parent: Option<&str>) -> Require {
        Require {
            title: title.to_string(),
            parent: parent.map(str::to_string),
            no_validate: true,
            no_parent_proposal: true,
        }
    }

    fn setup() -> (tempfile::TempDir, Store) {
        let tmp = tempdir().unwrap();
        let store = Store::in_dir(tmp.path());
        store.save(&Project::new("Shop", "SHP")).unwrap();
        (tmp, store)
    }

    #[test]
    fn adds_and_saves() {
        let (tmp, store) = setup();
        let root = tmp.path().to_path_buf();

        require("Login flow", None).run(&root).unwrap();
        require("OAuth support", Some("1")).run(&root).unwrap();
        require("Rate limiting", None).run(&root).unwrap();

        let project = store.load().unwrap();
        assert_eq!(
            project.requirements(),
            [
                Requirement::new("1", "Login flow")
                    .with_children(vec![Requirement::new("1.1", "OAuth support")]),
                Requirement::new("2", "Rate limiting"),
            ]
        );
    }

    #[test]
    fn unknown_parent_fails_without_saving() {
        let (tmp, store) = setup();
        let before = store.load().unwrap();

        let err = require("Orphan", Some("4.2"))
            .run(tmp.path())
            .unwrap_err();

        assert!(err.to_string().contains("4.2"));
        assert_eq!(store.load().unwrap(), before);
    }

    #[test]
    fn missing_document_fails() {
        let tmp = tempdir().unwrap();

        let err = require("Login flow", None)
            .run(tmp.path())
            .unwrap_err();

        assert!(err.to_string().contains("reqd init"));
    }
}
