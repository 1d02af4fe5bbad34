//! Interactive browsing and editing of a requirement tree.
//!
//! A [`Session`] is a small state machine:
//!
//! - [`State::Viewing`] lists the top level (or a node's children). Picking a
//!   branch descends into it, `..` ascends one level, picking a leaf moves to
//!   [`State::EditingPrompt`], and `quit` ends the session.
//! - [`State::EditingPrompt`] asks whether to edit the leaf. Declining
//!   returns to the level that led there.
//! - [`State::Editing`] collects a replacement title, applies it if it is
//!   non-blank and different, and ends the session.
//!
//! The session holds requirement IDs, never references. Nodes are looked up
//! again on every step, and the level above a parent is recomputed with
//! [`Project::find_parent`] when ascending.

use tracing::{debug, info, instrument};

use crate::{
    Persist, Project, Requirement, SaveError, TreeError,
    prompt::{PromptError, Prompter},
};

/// Label of the option that ascends one level.
pub const BACK: &str = "..";

/// Label of the option that ends the session.
pub const QUIT: &str = "quit";

/// Errors that end a navigation session abnormally.
#[derive(Debug, thiserror::Error)]
pub enum NavigationError {
    /// A requirement the session refers to is no longer in the tree.
    #[error(transparent)]
    NotFound(#[from] TreeError),

    /// Reading the user's answer failed.
    #[error(transparent)]
    Prompt(#[from] PromptError),

    /// Saving an edit failed.
    #[error(transparent)]
    Save(#[from] SaveError),

    /// The requested transition is not available in the current state.
    #[error("cannot {action} while {state}")]
    InvalidTransition {
        /// What was attempted.
        action: &'static str,
        /// Description of the current state.
        state: &'static str,
    },
}

/// A level of the tree being viewed.
///
/// `node` is `None` for the top level. `parent` is the level to return to on
/// `..`, or `None` to return to the top level.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Level {
    node: Option<String>,
    parent: Option<String>,
}

impl Level {
    /// The top-level list.
    #[must_use]
    pub const fn root() -> Self {
        Self {
            node: None,
            parent: None,
        }
    }

    /// The children of `node`, returning to `parent` on `..`.
    #[must_use]
    pub fn of(node: impl Into<String>, parent: Option<String>) -> Self {
        Self {
            node: Some(node.into()),
            parent,
        }
    }

    /// The requirement whose children are listed, if any.
    #[must_use]
    pub fn node(&self) -> Option<&str> {
        self.node.as_deref()
    }

    /// The requirement to return to on `..`, if any.
    #[must_use]
    pub fn parent(&self) -> Option<&str> {
        self.parent.as_deref()
    }

    /// What this level shows.
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::NotFound`] if the viewed node is not in the tree.
    pub fn listing<'p>(&self, project: &'p Project) -> Result<Listing<'p>, TreeError> {
        match &self.node {
            None => Ok(Listing {
                title: project.label(),
                requirements: project.requirements(),
                can_go_back: false,
            }),
            Some(id) => {
                let node = project
                    .find(id)
                    .ok_or_else(|| TreeError::NotFound(id.clone()))?;
                Ok(Listing {
                    title: node.display_format(),
                    requirements: node.children(),
                    can_go_back: true,
                })
            }
        }
    }

    fn ascend(&self, project: &Project) -> Self {
        match &self.parent {
            Some(parent) => Self {
                node: Some(parent.clone()),
                parent: project
                    .find_parent(parent)
                    .map(|grandparent| grandparent.id().to_string()),
            },
            None => Self::root(),
        }
    }
}

/// The requirements shown at one level, and the options offered for them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Listing<'p> {
    /// Heading for the level.
    pub title: String,
    /// The requirements at this level, in order.
    pub requirements: &'p [Requirement],
    /// Whether `..` is offered.
    pub can_go_back: bool,
}

impl Listing<'_> {
    /// Option labels, in the order they are offered.
    ///
    /// `..` comes first when available and `quit` last. Branches are marked
    /// with `+`.
    #[must_use]
    pub fn options(&self) -> Vec<String> {
        let back = self.can_go_back.then(|| BACK.to_string());
        let entries = self.requirements.iter().map(|req| {
            if req.is_branch() {
                format!("{}: + {}", req.id(), req.title())
            } else {
                req.display_format()
            }
        });

        back.into_iter()
            .chain(entries)
            .chain(std::iter::once(QUIT.to_string()))
            .collect()
    }

    /// Interpret an index into [`Listing::options`].
    #[must_use]
    pub fn choice(&self, index: usize) -> Option<Choice> {
        let offset = usize::from(self.can_go_back);
        if self.can_go_back && index == 0 {
            Some(Choice::Back)
        } else if index == offset + self.requirements.len() {
            Some(Choice::Quit)
        } else {
            index
                .checked_sub(offset)
                .filter(|i| *i < self.requirements.len())
                .map(Choice::Child)
        }
    }
}

/// An option picked while viewing a level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Choice {
    /// Ascend one level.
    Back,
    /// End the session.
    Quit,
    /// The requirement at this position in the listing.
    Child(usize),
}

/// How a session ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The user quit.
    Quit,
    /// The level had nothing to show.
    NoRequirements {
        /// Heading of the empty level.
        title: String,
    },
    /// A title was changed and saved.
    Updated {
        /// The edited requirement.
        id: String,
        /// Its new title.
        title: String,
    },
    /// An edit was entered but left the title as it was, or blank.
    Unchanged {
        /// The requirement that was opened for editing.
        id: String,
    },
}

/// Where a session is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum State {
    /// Listing a level.
    Viewing(Level),
    /// Offering to edit a leaf.
    EditingPrompt {
        /// The selected leaf.
        leaf: String,
        /// The level to return to if the edit is declined.
        from: Level,
    },
    /// Collecting a new title for a leaf.
    Editing {
        /// The leaf being edited.
        leaf: String,
    },
    /// The session is over.
    Finished(Outcome),
}

impl State {
    const fn describe(&self) -> &'static str {
        match self {
            Self::Viewing(_) => "viewing a level",
            Self::EditingPrompt { .. } => "offering an edit",
            Self::Editing { .. } => "editing",
            Self::Finished(_) => "finished",
        }
    }
}

/// An interactive browse/edit session over one project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    state: State,
}

impl Session {
    /// Start at the top-level list.
    #[must_use]
    pub const fn at_root() -> Self {
        Self {
            state: State::Viewing(Level::root()),
        }
    }

    /// Start at the children of `id`.
    ///
    /// The real parent of `id` is not looked up: `..` from here goes
    /// straight to the top level.
    #[must_use]
    pub fn starting_at(id: impl Into<String>) -> Self {
        Self {
            state: State::Viewing(Level::of(id, None)),
        }
    }

    /// The current state.
    #[must_use]
    pub const fn state(&self) -> &State {
        &self.state
    }

    /// The listing for the current level.
    ///
    /// If the level is empty the session finishes with
    /// [`Outcome::NoRequirements`] and `None` is returned. `None` is also
    /// returned when the session is not viewing a level.
    ///
    /// # Errors
    ///
    /// Returns an error if the viewed node is not in the tree.
    pub fn view<'p>(&mut self, project: &'p Project) -> Result<Option<Listing<'p>>, NavigationError> {
        let State::Viewing(level) = &self.state else {
            return Ok(None);
        };

        let listing = level.listing(project)?;
        if listing.requirements.is_empty() {
            debug!(title = %listing.title, "nothing to show");
            self.state = State::Finished(Outcome::NoRequirements {
                title: listing.title,
            });
            return Ok(None);
        }
        Ok(Some(listing))
    }

    /// Apply a choice made while viewing a level.
    ///
    /// # Errors
    ///
    /// Returns an error if the session is not viewing a level, if `..` is
    /// chosen at the top level, if the index is out of range, or if the
    /// viewed node is no longer in the tree.
    pub fn choose(&mut self, project: &Project, choice: Choice) -> Result<(), NavigationError> {
        let State::Viewing(level) = &self.state else {
            return Err(self.invalid("choose a requirement"));
        };

        let next = match choice {
            Choice::Quit => State::Finished(Outcome::Quit),
            Choice::Back if level.node.is_none() => {
                return Err(self.invalid("go back"));
            }
            Choice::Back => State::Viewing(level.ascend(project)),
            Choice::Child(index) => {
                let listing = level.listing(project)?;
                let Some(child) = listing.requirements.get(index) else {
                    return Err(self.invalid("choose a requirement out of range"));
                };
                if child.is_branch() {
                    State::Viewing(Level {
                        node: Some(child.id().to_string()),
                        parent: level.node.clone(),
                    })
                } else {
                    State::EditingPrompt {
                        leaf: child.id().to_string(),
                        from: level.clone(),
                    }
                }
            }
        };

        debug!(?next, "navigated");
        self.state = next;
        Ok(())
    }

    /// Accept or decline editing the selected leaf.
    ///
    /// # Errors
    ///
    /// Returns an error if no edit is being offered.
    pub fn answer_edit(&mut self, accept: bool) -> Result<(), NavigationError> {
        let State::EditingPrompt { leaf, from } = &self.state else {
            return Err(self.invalid("answer an edit prompt"));
        };

        self.state = if accept {
            State::Editing { leaf: leaf.clone() }
        } else {
            State::Viewing(from.clone())
        };
        Ok(())
    }

    /// Apply a replacement title to the leaf being edited and finish.
    ///
    /// Returns `true` if the project changed and should be saved.
    ///
    /// # Errors
    ///
    /// Returns an error if nothing is being edited or the leaf is gone.
    pub fn commit(&mut self, project: &mut Project, title: &str) -> Result<bool, NavigationError> {
        let State::Editing { leaf } = &self.state else {
            return Err(self.invalid("commit an edit"));
        };
        let id = leaf.clone();

        let changed = project.retitle(&id, title)?;
        self.state = State::Finished(if changed {
            let title = project
                .find(&id)
                .map(|req| req.title().to_string())
                .unwrap_or_default();
            info!(%id, %title, "updated requirement");
            Outcome::Updated { id, title }
        } else {
            debug!(%id, "edit discarded");
            Outcome::Unchanged { id }
        });
        Ok(changed)
    }

    /// Drive the session to completion.
    ///
    /// Each step waits on `prompter` for one answer. A changed title is
    /// written with `store` before the session finishes.
    ///
    /// # Errors
    ///
    /// Returns an error if input cannot be read, the save fails, or a
    /// requirement the session refers to has disappeared.
    #[instrument(level = "debug", skip_all)]
    pub fn run(
        mut self,
        project: &mut Project,
        prompter: &mut dyn Prompter,
        store: &dyn Persist,
    ) -> Result<Outcome, NavigationError> {
        loop {
            match &self.state {
                State::Finished(outcome) => return Ok(outcome.clone()),
                State::Viewing(_) => {
                    let Some(listing) = self.view(project)? else {
                        continue;
                    };
                    let choice = prompter
                        .select(&listing.title, &listing.options())?
                        .and_then(|index| listing.choice(index))
                        .unwrap_or(Choice::Quit);
                    self.choose(project, choice)?;
                }
                State::EditingPrompt { leaf, .. } => {
                    let requirement = project
                        .find(leaf)
                        .ok_or_else(|| TreeError::NotFound(leaf.clone()))?;
                    let question = format!("Edit {}?", requirement.display_format());
                    let accept = prompter.confirm(&question, true)?;
                    self.answer_edit(accept)?;
                }
                State::Editing { leaf } => {
                    let current = project
                        .find(leaf)
                        .ok_or_else(|| TreeError::NotFound(leaf.clone()))?
                        .title()
                        .to_string();
                    let title = prompter.input(&format!("Editing {leaf}"), &current)?;
                    if self.commit(project, &title)? {
                        store.persist(project)?;
                    }
                }
            }
        }
    }

    const fn invalid(&self, action: &'static str) -> NavigationError {
        NavigationError::InvalidTransition {
            action,
            state: self.state.describe(),
        }
    }
}
