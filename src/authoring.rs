//! Adding a requirement, with optional review.
//!
//! The flow is:
//!
//! 1. Check that an explicit parent exists. Nothing else runs if it doesn't.
//! 2. If validation is enabled, send the text for review and offer the
//!    recommended rewrite.
//! 3. If no parent was given and parent suggestion is enabled, offer a parent
//!    picked from the existing branches.
//! 4. Allocate an ID and insert the requirement.
//!
//! Review failures are logged and skipped. The tree is only touched in the
//! last step.

use tracing::{info, instrument, warn};

use crate::{
    Features, Project, Requirement, TreeError,
    prompt::{PromptError, Prompter},
    review::{Candidate, Reviewer},
};

/// Errors that abort adding a requirement.
#[derive(Debug, thiserror::Error)]
pub enum AuthoringError {
    /// The explicit parent does not exist.
    #[error(transparent)]
    NotFound(#[from] TreeError),

    /// Reading the user's answer failed.
    #[error(transparent)]
    Prompt(#[from] PromptError),
}

/// A requirement to be added.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddRequest {
    /// The requirement text.
    pub title: String,
    /// Where to insert it. `None` or empty means the top level, subject to a
    /// parent proposal.
    pub parent: Option<String>,
}

impl AddRequest {
    /// A top-level request, or one under `parent`.
    #[must_use]
    pub fn new(title: impl Into<String>, parent: Option<String>) -> Self {
        Self {
            title: title.into(),
            parent,
        }
    }
}

/// Add a requirement to `project`, consulting `reviewer` for the steps
/// enabled in `features`.
///
/// With no reviewer, or with every feature disabled, the requirement is
/// added as given and `prompter` is never used.
///
/// # Errors
///
/// Returns [`AuthoringError::NotFound`] if an explicit parent does not exist,
/// or [`AuthoringError::Prompt`] if an answer could not be read. In both cases
/// the project is unchanged.
#[instrument(level = "debug", skip(project, reviewer, prompter))]
pub fn add_requirement<'p>(
    project: &'p mut Project,
    request: AddRequest,
    features: Features,
    reviewer: Option<&dyn Reviewer>,
    prompter: &mut dyn Prompter,
) -> Result<&'p Requirement, AuthoringError> {
    let explicit_parent = request.parent.filter(|id| !id.is_empty());
    if let Some(id) = explicit_parent.as_ref().filter(|id| project.find(id).is_none()) {
        return Err(TreeError::NotFound(id.clone()).into());
    }

    let mut title = request.title;
    let mut parent = explicit_parent;

    if let Some(reviewer) = reviewer {
        if features.validation_enabled {
            title = review_text(reviewer, prompter, title)?;
        }
        if parent.is_none() && features.parent_suggestion_enabled {
            parent = choose_parent(project, reviewer, prompter, &title)?;
        }
    }

    let added = project.add_requirement(&title, parent.as_deref())?;
    info!(id = %added.id(), "added requirement");
    Ok(added)
}

fn review_text(
    reviewer: &dyn Reviewer,
    prompter: &mut dyn Prompter,
    text: String,
) -> Result<String, PromptError> {
    prompter.notify("Reviewing...");

    let validation = match reviewer.validate(&text) {
        Ok(validation) => validation,
        Err(error) => {
            warn!(%error, "review failed");
            prompter.notify(&format!(
                "Review failed: {error}\nProceeding with original requirement..."
            ));
            return Ok(text);
        }
    };

    if !validation.problems.is_empty() {
        let issues: Vec<String> = validation
            .problems
            .iter()
            .map(|problem| format!("- {problem}"))
            .collect();
        prompter.notify(&format!("Issues:\n{}", issues.join("\n")));
    }
    prompter.notify(&format!("Recommended:\n{}", validation.recommended));

    let recommended = validation.recommended.trim();
    if recommended.is_empty() || recommended == text.trim() {
        return Ok(text);
    }

    if prompter.confirm("Accept recommended changes?", true)? {
        Ok(recommended.to_string())
    } else {
        Ok(text)
    }
}

fn choose_parent(
    project: &Project,
    reviewer: &dyn Reviewer,
    prompter: &mut dyn Prompter,
    text: &str,
) -> Result<Option<String>, PromptError> {
    if !prompter.confirm("Would you like a parent proposed for this requirement?", true)? {
        return Ok(None);
    }

    let candidates: Vec<Candidate> = project.branches().into_iter().map(Candidate::from).collect();
    if candidates.is_empty() {
        prompter.notify("No existing requirements with children found to use as parents.");
        return Ok(None);
    }

    let proposal = match reviewer.propose_parent(text, &candidates) {
        Ok(proposal) => proposal,
        Err(error) => {
            warn!(%error, "parent proposal failed");
            prompter.notify(&format!("Parent proposal failed: {error}"));
            return Ok(None);
        }
    };

    let proposed = proposal
        .proposed_parent
        .filter(|id| !id.is_empty())
        .and_then(|id| project.find(&id));
    let Some(proposed) = proposed else {
        prompter.notify("No suitable parent found.");
        return Ok(None);
    };

    prompter.notify(&format!("Suggested parent: {}", proposed.display_format()));
    if prompter.confirm("Accept suggested parent?", true)? {
        Ok(Some(proposed.id().to_string()))
    } else {
        Ok(None)
    }
}
