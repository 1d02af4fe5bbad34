//! Prompt templates sent to the review service.

use super::Candidate;

const VALIDATE: &str = r#"
You are a Technical Requirements Validator and Editor.

Analyze the software requirement statement below and:

- Identify ambiguous or unclear wording.
- Ensure the requirement contains exactly one RFC 2119 keyword (MUST, SHOULD, or MAY).
- Rewrite the requirement to comply with ASD-STE100 (active voice, present tense, short sentences).
- Keep the meaning of the original requirement.

If the requirement is already clear and compliant, do not change it, but still return a valid JSON object with an empty list of problems.

Return your analysis strictly as a JSON object matching this schema:

{
  "input": "<the original requirement>",
  "problems": ["<specific issues such as ambiguity, missing RFC 2119 keyword, passive voice, long sentences>"],
  "recommended": "<the rewritten requirement>"
}

Requirement statement:

"{input}"
"#;

const PROPOSE_PARENT: &str = r#"
You are organizing a hierarchical Product Requirements Document.

Below is a list of existing requirements that already group other requirements, one per line as "<id>: <title>":

{parents}
Choose the single requirement from the list that is the most suitable parent for the new requirement. If none of them is a good fit, do not choose one.

Return your answer strictly as a JSON object matching this schema:

{
  "proposed_parent": "<id of the chosen requirement, or null>"
}

New requirement:

"{requirement}"
"#;

/// Substitute each `{name}` placeholder in `template` in a single pass.
///
/// Inserted values are copied verbatim and never scanned for placeholders.
fn fill(template: &str, values: &[(&str, &str)]) -> String {
    let mut output = String::with_capacity(template.len());
    let mut rest = template;

    while let Some((at, placeholder, value)) = values
        .iter()
        .filter_map(|(placeholder, value)| {
            rest.find(placeholder).map(|at| (at, *placeholder, *value))
        })
        .min_by_key(|(at, ..)| *at)
    {
        output.push_str(&rest[..at]);
        output.push_str(value);
        rest = &rest[at + placeholder.len()..];
    }

    output.push_str(rest);
    output
}

pub fn validate(input: &str) -> String {
    fill(VALIDATE, &[("{input}", input)])
}

pub fn propose_parent(requirement: &str, candidates: &[Candidate]) -> String {
    let parents: String = candidates
        .iter()
        .map(|candidate| format!("{}\n", candidate.display_text))
        .collect();

    fill(
        PROPOSE_PARENT,
        &[("{parents}", &parents), ("{requirement}", requirement)],
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_embeds_input() {
        let prompt = validate("users can log in");
        assert!(prompt.contains("\"users can log in\""));
        assert!(!prompt.contains("{input}"));
    }

    #[test]
    fn propose_parent_lists_candidates() {
        let candidates = [
            Candidate {
                id: "1".to_string(),
                display_text: "1: Accounts".to_string(),
            },
            Candidate {
                id: "1.2".to_string(),
                display_text: "1.2: Sessions".to_string(),
            },
        ];

        let prompt = propose_parent("Sessions expire", &candidates);

        assert!(prompt.contains("1: Accounts\n1.2: Sessions\n"));
        assert!(prompt.contains("\"Sessions expire\""));
        assert!(!prompt.contains("{parents}"));
    }

    #[test]
    fn inserted_titles_are_not_expanded() {
        let candidates = [Candidate {
            id: "1".to_string(),
            display_text: "1: Document the {requirement} syntax".to_string(),
        }];

        let prompt = propose_parent("Sessions expire", &candidates);

        assert!(prompt.contains("1: Document the {requirement} syntax\n"));
        assert!(prompt.contains("\"Sessions expire\""));
        assert_eq!(prompt.matches("Sessions expire").count(), 1);
    }

    #[test]
    fn inserted_input_is_not_expanded() {
        let prompt = propose_parent("Support {parents} in templates", &[]);

        assert!(prompt.contains("\"Support {parents} in templates\""));
    }

    #[test]
    fn fill_replaces_every_occurrence() {
        assert_eq!(fill("{a}-{b}-{a}", &[("{a}", "x"), ("{b}", "{a}")]), "x-{a}-x");
        assert_eq!(fill("no placeholders", &[("{a}", "x")]), "no placeholders");
    }
}
