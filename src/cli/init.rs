use std::{fs, path::Path};

use anyhow::Context;
use clap::Parser;
use reqd::{Config, Project, Store, domain::id_prefix, prompt::Prompter};
use tracing::instrument;

use super::terminal::{Colorize, TerminalPrompter};

#[derive(Debug, Parser)]
#[command(about = "Initialize a new requirements document")]
pub struct Init {
    /// Project name (defaults to the name of the root directory)
    #[arg(long, short)]
    name: Option<String>,

    /// Short label for the project (defaults to one derived from the name)
    #[arg(long)]
    prefix: Option<String>,

    /// Accept defaults instead of asking for missing values
    #[arg(long, short)]
    yes: bool,
}

impl Init {
    #[instrument(level = "debug", skip(self))]
    pub fn run(self, root: &Path) -> anyhow::Result<()> {
        self.run_with(root, &mut TerminalPrompter)
    }

    fn run_with(self, root: &Path, prompter: &mut dyn Prompter) -> anyhow::Result<()> {
        let store = Store::in_dir(root);
        if store.exists() {
            println!(
                "{}",
                format!("{} already exists", store.path().display()).warning()
            );
            return Ok(());
        }

        let default_name = fs::canonicalize(root)
            .ok()
            .and_then(|path| path.file_name().map(|n| n.to_string_lossy().into_owned()))
            .unwrap_or_else(|| "requirements".to_string());

        let name = match self.name {
            Some(name) => name,
            None if self.yes => default_name,
            None => prompter.input("Project Name", &default_name)?,
        };
        let name = name.trim().to_string();
        if name.is_empty() {
            anyhow::bail!("project name must not be empty");
        }

        let generated = id_prefix(&name);
        let prefix = match self.prefix {
            Some(prefix) => prefix,
            None if self.yes => generated,
            None => prompter.input("ID Prefix", &generated)?,
        };

        let project = Project::new(&name, prefix.trim());
        store.save(&project)?;

        let config_path = super::config_path(root);
        if !config_path.exists() {
            if let Some(dir) = config_path.parent() {
                fs::create_dir_all(dir)
                    .with_context(|| format!("failed to create {}", dir.display()))?;
            }
            Config::default()
                .save(&config_path)
                .map_err(|e| anyhow::anyhow!("Failed to create config.toml: {e}"))?;
        }

        println!("{}", format!("'{name}' is ready for requirements").success());
        println!("{}", "Next: reqd require \"Your first requirement\"".dim());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use tempfile::tempdir;

    use super::*;

    fn init(name: Option<&str>, prefix: Option<&str>) -> Init {
        Init {
            name: name.map(str::to_string),
            prefix: prefix.map(str::to_string),
            yes: true,
        }
    }

    #[test]
    fn creates_document_and_config() {
        let tmp = tempdir().unwrap();
        let root = tmp.path().to_path_buf();

        init(Some("Product Requirements Document"), None)
            .run(&root)
            .unwrap();

        let project = Store::in_dir(&root).load().unwrap();
        assert_eq!(project.name(), "Product Requirements Document");
        assert_eq!(project.id_prefix(), "PRD");
        assert!(project.requirements().is_empty());
        assert_eq!(
            Config::load(&super::super::config_path(&root)).unwrap(),
            Config::default()
        );
    }

    #[test]
    fn explicit_prefix() {
        let tmp = tempdir().unwrap();
        let root = tmp.path().to_path_buf();

        init(Some("Checkout"), Some("CO")).run(&root).unwrap();

        assert_eq!(Store::in_dir(&root).load().unwrap().id_prefix(), "CO");
    }

    #[test]
    fn defaults_to_directory_name() {
        let tmp = tempdir().unwrap();
        let root = tmp.path().join("web-shop");
        fs::create_dir(&root).unwrap();

        init(None, None).run(&root).unwrap();

        let project = Store::in_dir(&root).load().unwrap();
        assert_eq!(project.name(), "web-shop");
        assert_eq!(project.id_prefix(), "WS");
    }

    #[test]
    fn existing_document_is_left_alone() {
        let tmp = tempdir().unwrap();
        let root = tmp.path().to_path_buf();
        let store = Store::in_dir(&root);
        let mut existing = Project::new("Existing", "EX");
        existing.add_requirement("Keep me", None).unwrap();
        store.save(&existing).unwrap();

        init(Some("Other"), None).run(&root).unwrap();

        assert_eq!(store.load().unwrap(), existing);
    }

    #[test]
    fn blank_name_is_rejected() {
        let tmp = tempdir().unwrap();
        let root = tmp.path().to_path_buf();

        assert!(init(Some("  "), None).run(&root).is_err());
        assert!(!Store::in_dir(&root).exists());
    }
}
