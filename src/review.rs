//! The optional review service.
//!
//! Before a requirement is added, its text can be sent for review and a
//! parent can be proposed for it. Both calls block, and both happen before
//! the tree is touched. Failures are the caller's to recover from: the add
//! operation falls back to the original text or skips the proposal.

use serde::Deserialize;

use crate::Requirement;

mod openai;
pub use openai::OpenAiReviewer;

mod prompts;

/// Errors from the review service.
#[derive(Debug, thiserror::Error)]
pub enum ReviewError {
    /// The request could not be sent or the connection failed.
    #[error("review request failed: {0}")]
    Transport(Box<ureq::Error>),

    /// The service answered with an error status.
    #[error("review service returned status {status}: {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Response body, if it could be read.
        body: String,
    },

    /// The response body could not be read or decoded.
    #[error("failed to read review response: {0}")]
    Io(#[from] std::io::Error),

    /// The response carried no answer.
    #[error("review response contained no choices")]
    EmptyResponse,

    /// The answer was not the expected JSON object.
    #[error("failed to parse review answer: {0}")]
    Malformed(#[from] serde_json::Error),
}

impl From<ureq::Error> for ReviewError {
    fn from(error: ureq::Error) -> Self {
        match error {
            ureq::Error::Status(status, response) => Self::Status {
                status,
                body: response.into_string().unwrap_or_default(),
            },
            other => Self::Transport(Box::new(other)),
        }
    }
}

/// The result of reviewing a requirement's text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Validation {
    /// Issues found in the text. Informational only.
    #[serde(default)]
    pub problems: Vec<String>,

    /// A rewrite of the text addressing the problems.
    pub recommended: String,
}

/// The result of asking for a parent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ParentProposal {
    /// ID of the proposed parent, if a suitable one was found.
    #[serde(default)]
    pub proposed_parent: Option<String>,
}

/// A requirement offered as a possible parent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    /// Requirement ID.
    pub id: String,
    /// `id: title`, as shown to the reviewer.
    pub display_text: String,
}

impl From<&Requirement> for Candidate {
    fn from(requirement: &Requirement) -> Self {
        Self {
            id: requirement.id().to_string(),
            display_text: requirement.display_format(),
        }
    }
}

/// A service that reviews requirement text and proposes parents.
pub trait Reviewer {
    /// Review `text` and recommend a rewrite.
    ///
    /// # Errors
    ///
    /// Returns an error if the service could not be reached or answered
    /// with something unusable.
    fn validate(&self, text: &str) -> Result<Validation, ReviewError>;

    /// Pick the best parent for `text` among `candidates`.
    ///
    /// # Errors
    ///
    /// Returns an error if the service could not be reached or answered
    /// with something unusable.
    fn propose_parent(
        &self,
        text: &str,
        candidates: &[Candidate],
    ) -> Result<ParentProposal, ReviewError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_without_problems() {
        let validation: Validation =
            serde_json::from_str(r#"{"input": "x", "recommended": "The system MUST x."}"#)
                .unwrap();

        assert!(validation.problems.is_empty());
        assert_eq!(validation.recommended, "The system MUST x.");
    }

    #[test]
    fn proposal_with_null_parent() {
        let proposal: ParentProposal =
            serde_json::from_str(r#"{"proposed_parent": null}"#).unwrap();
        assert_eq!(proposal.proposed_parent, None);

        let proposal: ParentProposal = serde_json::from_str("{}").unwrap();
        assert_eq!(proposal.proposed_parent, None);
    }

    #[test]
    fn candidate_from_requirement() {
        let requirement = Requirement::new("2.1", "Refunds");
        assert_eq!(
            Candidate::from(&requirement),
            Candidate {
                id: "2.1".to_string(),
                display_text: "2.1: Refunds".to_string(),
            }
        );
    }
}
