//! A single YAML document holding a whole [`Project`].
//!
//! The whole tree is read on load and written back on every save. There is
//! no locking: one process owns the document for the duration of a command.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use tracing::{debug, instrument};

use crate::Project;

/// File name of the requirements document inside a project root.
pub const DOCUMENT_NAME: &str = "requirements.yaml";

/// Errors that can occur when loading a project.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// The document does not exist.
    #[error("no requirements document at {}, run 'reqd init' first", .0.display())]
    NotFound(PathBuf),

    /// The document exists but could not be read.
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        /// Location of the document.
        path: PathBuf,
        /// Underlying IO error.
        source: io::Error,
    },

    /// The document could not be parsed.
    #[error("failed to parse {}: {source}", .path.display())]
    Parse {
        /// Location of the document.
        path: PathBuf,
        /// Underlying YAML error.
        source: serde_yaml::Error,
    },
}

/// Errors that can occur when saving a project.
#[derive(Debug, thiserror::Error)]
pub enum SaveError {
    /// The project could not be serialized. The document was not touched.
    #[error("failed to serialize project: {0}")]
    Serialize(#[from] serde_yaml::Error),

    /// The document could not be written.
    #[error("failed to write {}: {source}", .path.display())]
    Io {
        /// Location of the document.
        path: PathBuf,
        /// Underlying IO error.
        source: io::Error,
    },
}

/// Something a mutated project can be written back to.
pub trait Persist {
    /// Write the whole project.
    ///
    /// # Errors
    ///
    /// Returns an error if the project could not be written.
    fn persist(&self, project: &Project) -> Result<(), SaveError>;
}

/// A requirements document on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Store {
    path: PathBuf,
}

impl Store {
    /// A store backed by the document at `path`.
    #[must_use]
    pub const fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// A store backed by [`DOCUMENT_NAME`] inside `root`.
    #[must_use]
    pub fn in_dir(root: &Path) -> Self {
        Self::new(root.join(DOCUMENT_NAME))
    }

    /// Location of the document.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether the document exists.
    #[must_use]
    pub fn exists(&self) -> bool {
        self.path.is_file()
    }

    /// Read the project.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::NotFound`] if the document does not exist, or an
    /// error if it cannot be read or parsed.
    #[instrument(level = "debug", skip(self), fields(path = %self.path.display()))]
    pub fn load(&self) -> Result<Project, LoadError> {
        let content = fs::read_to_string(&self.path).map_err(|source| match source.kind() {
            io::ErrorKind::NotFound => LoadError::NotFound(self.path.clone()),
            _ => LoadError::Io {
                path: self.path.clone(),
                source,
            },
        })?;

        let project: Project =
            serde_yaml::from_str(&content).map_err(|source| LoadError::Parse {
                path: self.path.clone(),
                source,
            })?;
        debug!(
            requirements = project.requirements().len(),
            "loaded project '{}'",
            project.name()
        );
        Ok(project)
    }

    /// Write the project, replacing the document.
    ///
    /// The project is serialized before the file is opened, so a
    /// serialization failure leaves the existing document untouched.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the write fails.
    #[instrument(level = "debug", skip(self, project), fields(path = %self.path.display()))]
    pub fn save(&self, project: &Project) -> Result<(), SaveError> {
        let content = serde_yaml::to_string(project)?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| SaveError::Io {
                path: self.path.clone(),
                source,
            })?;
        }

        fs::write(&self.path, content).map_err(|source| SaveError::Io {
            path: self.path.clone(),
            source,
        })?;
        debug!("saved project '{}'", project.name());
        Ok(())
    }
}

impl Persist for Store {
    fn persist(&self, project: &Project) -> Result<(), SaveError> {
        self.save(project)
    }
}
