//! Blocking client for an OpenAI-compatible chat-completions endpoint.

use std::{fmt, time::Duration};

use serde::{Deserialize, Serialize, de::DeserializeOwned};
use tracing::{debug, instrument};

use super::{Candidate, ParentProposal, ReviewError, Reviewer, Validation, prompts};
use crate::Config;

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [Message<'a>; 1],
    response_format: ResponseFormat,
    temperature: f32,
}

#[derive(Serialize)]
struct Message<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    kind: &'static str,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: Reply,
}

#[derive(Deserialize)]
struct Reply {
    #[serde(default)]
    content: Option<String>,
}

/// A [`Reviewer`] backed by a chat-completions API.
#[derive(Clone)]
pub struct OpenAiReviewer {
    agent: ureq::Agent,
    endpoint: String,
    model: String,
    api_key: String,
}

impl fmt::Debug for OpenAiReviewer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OpenAiReviewer")
            .field("endpoint", &self.endpoint)
            .field("model", &self.model)
            .finish_non_exhaustive()
    }
}

impl OpenAiReviewer {
    /// Create a client for `endpoint`, authenticating with `api_key`.
    #[must_use]
    pub fn new(
        endpoint: impl Into<String>,
        model: impl Into<String>,
        api_key: impl Into<String>,
        timeout: Duration,
    ) -> Self {
        Self {
            agent: ureq::AgentBuilder::new().timeout(timeout).build(),
            endpoint: endpoint.into(),
            model: model.into(),
            api_key: api_key.into(),
        }
    }

    /// Create a client using the endpoint, model and timeout in `config`.
    #[must_use]
    pub fn from_config(config: &Config, api_key: impl Into<String>) -> Self {
        Self::new(
            &config.endpoint,
            &config.model,
            api_key,
            Duration::from_secs(config.timeout_secs),
        )
    }

    #[instrument(level = "debug", skip_all, fields(endpoint = %self.endpoint, model = %self.model))]
    fn complete<T: DeserializeOwned>(&self, prompt: &str) -> Result<T, ReviewError> {
        let request = ChatRequest {
            model: &self.model,
            messages: [Message {
                role: "user",
                content: prompt,
            }],
            response_format: ResponseFormat {
                kind: "json_object",
            },
            temperature: 0.0,
        };

        let response: ChatResponse = self
            .agent
            .post(&self.endpoint)
            .set("Authorization", &format!("Bearer {}", self.api_key))
            .send_json(&request)?
            .into_json()?;
        debug!(choices = response.choices.len(), "received completion");

        parse_answer(response)
    }
}

/// Decode the first choice's content as `T`.
fn parse_answer<T: DeserializeOwned>(response: ChatResponse) -> Result<T, ReviewError> {
    let content = response
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .ok_or(ReviewError::EmptyResponse)?;

    Ok(serde_json::from_str(&content)?)
}

impl Reviewer for OpenAiReviewer {
    fn validate(&self, text: &str) -> Result<Validation, ReviewError> {
        self.complete(&prompts::validate(text))
    }

    fn propose_parent(
        &self,
        text: &str,
        candidates: &[Candidate],
    ) -> Result<ParentProposal, ReviewError> {
        self.complete(&prompts::propose_parent(text, candidates))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(json: &str) -> ChatResponse {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn decodes_validation_answer() {
        let response = response(
            r#"{
                "id": "chatcmpl-1",
                "choices": [{
                    "index": 0,
                    "message": {
                        "role": "assistant",
                        "content": "{\"input\":\"login\",\"problems\":[\"no RFC 2119 keyword\"],\"recommended\":\"Users MUST log in.\"}"
                    }
                }]
            }"#,
        );

        let validation: Validation = parse_answer(response).unwrap();

        assert_eq!(validation.problems, ["no RFC 2119 keyword"]);
        assert_eq!(validation.recommended, "Users MUST log in.");
    }

    #[test]
    fn decodes_parent_answer() {
        let response = response(
            r#"{"choices": [{"message": {"content": "{\"proposed_parent\": \"1.2\"}"}}]}"#,
        );

        let proposal: ParentProposal = parse_answer(response).unwrap();

        assert_eq!(proposal.proposed_parent.as_deref(), Some("1.2"));
    }

    #[test]
    fn no_choices_is_an_error() {
        let result: Result<Validation, _> = parse_answer(response(r#"{"choices": []}"#));
        assert!(matches!(result, Err(ReviewError::EmptyResponse)));

        let result: Result<Validation, _> =
            parse_answer(response(r#"{"choices": [{"message": {"content": null}}]}"#));
        assert!(matches!(result, Err(ReviewError::EmptyResponse)));
    }

    #[test]
    fn non_json_content_is_an_error() {
        let response = response(r#"{"choices": [{"message": {"content": "Sure! Here you go."}}]}"#);

        let result: Result<Validation, _> = parse_answer(response);

        assert!(matches!(result, Err(ReviewError::Malformed(_))));
    }

    #[test]
    fn debug_hides_api_key() {
        let reviewer = OpenAiReviewer::from_config(&Config::default(), "sk-secret");
        let debug = format!("{reviewer:?}");

        assert!(debug.contains("gpt-4o"));
        assert!(!debug.contains("sk-secret"));
    }
}
