use std::path::{Path, PathBuf};

mod init;
mod require;
mod show;
mod terminal;
mod tree;

use clap::ArgAction;
use init::Init;
use reqd::Config;
use require::Require;
use show::Show;
use tracing::{debug, warn};
use tree::Tree;

/// Directory inside the root holding per-project settings.
const CONFIG_DIR: &str = ".reqd";

/// File name of the settings file inside [`CONFIG_DIR`].
const CONFIG_FILE: &str = "config.toml";

#[derive(Debug, clap::Parser)]
#[command(version, about)]
pub struct Cli {
    /// Verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// The directory containing requirements.yaml
    #[arg(short, long, default_value = ".", global = true)]
    root: PathBuf,

    #[command(subcommand)]
    command: Command,
}

impl Cli {
    pub fn run(self) -> anyhow::Result<()> {
        Self::setup_logging(self.verbose);
        self.command.run(&self.root)
    }

    fn setup_logging(verbosity: u8) {
        use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

        let level = match verbosity {
            0 => tracing::Level::WARN,
            1 => tracing::Level::INFO,
            2 => tracing::Level::DEBUG,
            _ => tracing::Level::TRACE,
        };

        let filter = tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into());

        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_target(false)
            .with_thread_names(false)
            .with_line_number(false)
            .with_writer(std::io::stderr);

        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer)
            .init();
    }
}

#[derive(Debug, clap::Parser)]
pub enum Command {
    /// Initialize a new requirements document
    Init(Init),

    /// Document a new requirement
    ///
    /// The requirement gets the next free ID at the top level, or under
    /// the given parent.
    #[command(alias = "r")]
    Require(Require),

    /// Browse requirements interactively, and edit leaf titles
    #[command(alias = "s")]
    Show(Show),

    /// Print the requirement tree
    Tree(Tree),
}

impl Command {
    fn run(self, root: &Path) -> anyhow::Result<()> {
        match self {
            Self::Init(command) => command.run(root)?,
            Self::Require(command) => command.run(root)?,
            Self::Show(command) => command.run(root)?,
            Self::Tree(command) => command.run(root)?,
        }
        Ok(())
    }
}

fn config_path(root: &Path) -> PathBuf {
    root.join(CONFIG_DIR).join(CONFIG_FILE)
}

/// Load the project settings, falling back to defaults.
fn load_config(root: &Path) -> Config {
    let path = config_path(root);
    if !path.exists() {
        debug!("no config at {}, using defaults", path.display());
        return Config::default();
    }

    Config::load(&path).unwrap_or_else(|e| {
        warn!("{e}; using default settings");
        Config::default()
    })
}
