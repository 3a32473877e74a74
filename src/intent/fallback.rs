//! Heuristic fallback extraction.
//!
//! Used only when the oracle is unreachable or returns nothing usable.
//! The heuristics trade precision for availability and are limited to the
//! safe outcomes: a create guess, or a request for clarification. Delete
//! and completion are never inferred here from ambiguous text.
//!
//! Output is emitted in the structured response grammar itself, so a guess
//! flows through the same parse → classify → execute path as oracle text.

use regex::Regex;

/// Pattern-based best-effort intent guesser.
pub struct FallbackExtractor {
    create: Regex,
    create_name: Regex,
}

impl FallbackExtractor {
    pub fn new() -> Self {
        Self {
            // A create verb anywhere near the word "task", either order.
            create: Regex::new(
                r"(?i)\b(?:add|create|new)\b.*\btask\b|\btask\b.*\b(?:add|create|new)\b",
            )
            .expect("create pattern is valid"),
            // Best-effort name: whatever follows "task [called|named|for|to]",
            // minus a trailing "with ..." qualifier.
            create_name: Regex::new(
                r#"(?i)\btask\b(?:\s+(?:called|named|for|to))?[\s:"']*(.+?)(?:\s+with\b.*)?["']?\s*$"#,
            )
            .expect("name pattern is valid"),
        }
    }

    /// Produce a structured response guessed from the raw prompt.
    pub fn extract(&self, prompt: &str) -> String {
        let prompt = prompt.trim();

        if self.create.is_match(prompt) {
            let name = self
                .create_name
                .captures(prompt)
                .map(|caps| caps[1].trim().trim_matches(['"', '\'']).trim().to_string())
                .filter(|name| !name.is_empty());

            return match name {
                Some(name) => format!("**Task Name:** {name}\n**Action:** Create"),
                None => "**Action:** Create".to_string(),
            };
        }

        "**Action:** unclear\n**Notes:** The assistant could not be reached and the request \
         was not recognized. Please try rephrasing."
            .to_string()
    }
}

impl Default for FallbackExtractor {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::intent::classifier::{classify, Intent};
    use crate::intent::grammar::{Field, ResponseGrammar};

    fn extract(prompt: &str) -> (Intent, Option<String>) {
        let text = FallbackExtractor::new().extract(prompt);
        let parsed = ResponseGrammar::new().parse(&text);
        let name = parsed.get(Field::TaskName).map(str::to_string);
        (classify(&parsed), name)
    }

    #[test]
    fn test_create_with_called_name() {
        let (intent, name) = extract("create a task called Call mom");
        assert_eq!(intent, Intent::Create);
        assert_eq!(name.as_deref(), Some("Call mom"));
    }

    #[test]
    fn test_add_new_task() {
        let (intent, name) = extract("please add a new task buy milk");
        assert_eq!(intent, Intent::Create);
        assert_eq!(name.as_deref(), Some("buy milk"));
    }

    #[test]
    fn test_with_qualifier_is_stripped() {
        let (intent, name) = extract("add a task named pay rent with high priority");
        assert_eq!(intent, Intent::Create);
        assert_eq!(name.as_deref(), Some("pay rent"));
    }

    #[test]
    fn test_quoted_name() {
        let (intent, name) = extract("create a task called \"water the plants\"");
        assert_eq!(intent, Intent::Create);
        assert_eq!(name.as_deref(), Some("water the plants"));
    }

    #[test]
    fn test_create_without_name() {
        let (intent, name) = extract("create a new task");
        assert_eq!(intent, Intent::Create);
        assert_eq!(name, None);
    }

    #[test]
    fn test_unrecognized_prompt_is_unclear() {
        let (intent, _) = extract("what is the weather like today");
        assert_eq!(intent, Intent::Unclear);
    }

    #[test]
    fn test_destructive_requests_are_never_guessed() {
        // Deleting or completing must not happen off a heuristic guess.
        let (intent, _) = extract("delete the milk task");
        assert_eq!(intent, Intent::Unclear);

        let (intent, _) = extract("mark buy milk as done");
        assert_eq!(intent, Intent::Unclear);
    }

    #[test]
    fn test_unclear_carries_a_note() {
        let text = FallbackExtractor::new().extract("gibberish");
        let parsed = ResponseGrammar::new().parse(&text);
        assert_eq!(classify(&parsed), Intent::Unclear);
        assert!(parsed.get(Field::Notes).is_some());
    }
}
