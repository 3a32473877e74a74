//! Structured response grammar.
//!
//! The oracle is instructed to answer in a fixed key-value line format
//! (`**Task Name:** Buy milk`). This module extracts those fields without
//! trusting the structure: any line may be missing, reordered, or wrapped
//! in markdown emphasis, and unrecognized lines are ignored. Extraction
//! never fails; absence of a field is represented, not raised.

use std::collections::HashMap;

use regex::Regex;

/// A recognized field of the structured response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    TaskName,
    OldTaskName,
    NewTaskName,
    Priority,
    CompletionStatus,
    Action,
    Filter,
    Notes,
}

/// Field labels as the oracle writes them.
const FIELD_LABELS: &[(Field, &str)] = &[
    (Field::TaskName, "task name"),
    (Field::OldTaskName, "old task name"),
    (Field::NewTaskName, "new task name"),
    (Field::Priority, "priority"),
    (Field::CompletionStatus, "completion status"),
    (Field::Action, "action"),
    (Field::Filter, "filter"),
    (Field::Notes, "notes"),
];

/// Compiled field table mapping each label to its line pattern.
///
/// Compile once and reuse; parsing itself is allocation-light.
pub struct ResponseGrammar {
    patterns: Vec<(Field, Regex)>,
}

impl ResponseGrammar {
    pub fn new() -> Self {
        let patterns = FIELD_LABELS
            .iter()
            .map(|(field, label)| {
                // Anchored at line start so "task name" never matches inside
                // "old task name". Emphasis markers may surround the label
                // and the colon; the value is the remainder of the line.
                // The gap classes must not cross newlines, or an empty
                // field would swallow the following line.
                let pattern = format!(
                    r"(?mi)^[ \t*_]*{}[ \t*_]*:[ \t*_]*(.+)$",
                    regex::escape(label)
                );
                let regex = Regex::new(&pattern).expect("field pattern is valid");
                (*field, regex)
            })
            .collect();
        Self { patterns }
    }

    /// Extract every recognized field from a block of oracle text. The
    /// first matching line wins for each field.
    pub fn parse(&self, text: &str) -> ParsedResponse {
        let mut fields = HashMap::new();
        for (field, pattern) in &self.patterns {
            if let Some(caps) = pattern.captures(text) {
                let value = caps[1]
                    .trim()
                    .trim_matches(|c| c == '*' || c == '_')
                    .trim()
                    .to_string();
                if !value.is_empty() {
                    fields.insert(*field, value);
                }
            }
        }
        ParsedResponse { fields }
    }
}

impl Default for ResponseGrammar {
    fn default() -> Self {
        Self::new()
    }
}

/// Fields extracted from one oracle response.
#[derive(Debug, Clone, Default)]
pub struct ParsedResponse {
    fields: HashMap<Field, String>,
}

impl ParsedResponse {
    pub fn get(&self, field: Field) -> Option<&str> {
        self.fields.get(&field).map(String::as_str)
    }

    pub fn has(&self, field: Field) -> bool {
        self.fields.contains_key(&field)
    }

    /// True when no recognized field was present at all.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(text: &str) -> ParsedResponse {
        ResponseGrammar::new().parse(text)
    }

    #[test]
    fn test_extracts_plain_field() {
        let parsed = parse("Task Name: Buy milk");
        assert_eq!(parsed.get(Field::TaskName), Some("Buy milk"));
    }

    #[test]
    fn test_tolerates_emphasis_markers() {
        let parsed = parse("**Task Name:** Buy milk");
        assert_eq!(parsed.get(Field::TaskName), Some("Buy milk"));

        let parsed = parse("*Task Name*: Buy milk");
        assert_eq!(parsed.get(Field::TaskName), Some("Buy milk"));

        let parsed = parse("__Task Name:__ Buy milk");
        assert_eq!(parsed.get(Field::TaskName), Some("Buy milk"));

        let parsed = parse("**Task Name:** **Buy milk**");
        assert_eq!(parsed.get(Field::TaskName), Some("Buy milk"));
    }

    #[test]
    fn test_case_insensitive() {
        let parsed = parse("TASK NAME: Buy milk\naction: CREATE");
        assert_eq!(parsed.get(Field::TaskName), Some("Buy milk"));
        assert_eq!(parsed.get(Field::Action), Some("CREATE"));
    }

    #[test]
    fn test_value_is_trimmed() {
        let parsed = parse("Task Name:    Buy milk   ");
        assert_eq!(parsed.get(Field::TaskName), Some("Buy milk"));
    }

    #[test]
    fn test_old_task_name_does_not_bleed() {
        let parsed = parse("**Old Task Name:** Buy milk\n**New Task Name:** Buy oat milk");
        assert_eq!(parsed.get(Field::OldTaskName), Some("Buy milk"));
        assert_eq!(parsed.get(Field::NewTaskName), Some("Buy oat milk"));
        assert_eq!(parsed.get(Field::TaskName), None);
    }

    #[test]
    fn test_order_independent() {
        let parsed = parse("**Action:** Create\n**Priority:** high\n**Task Name:** Call mom");
        assert_eq!(parsed.get(Field::Action), Some("Create"));
        assert_eq!(parsed.get(Field::Priority), Some("high"));
        assert_eq!(parsed.get(Field::TaskName), Some("Call mom"));
    }

    #[test]
    fn test_absent_fields_are_none() {
        let parsed = parse("**Task Name:** Buy milk");
        assert_eq!(parsed.get(Field::Priority), None);
        assert_eq!(parsed.get(Field::Action), None);
        assert!(!parsed.has(Field::CompletionStatus));
    }

    #[test]
    fn test_unrecognized_lines_are_ignored() {
        let parsed = parse(
            "Sure, here is the structured response:\n\
             **Task Name:** Buy milk\n\
             **Confidence:** high\n\
             Let me know if you need anything else!",
        );
        assert_eq!(parsed.get(Field::TaskName), Some("Buy milk"));
        assert_eq!(parsed.get(Field::Priority), None);
    }

    #[test]
    fn test_empty_value_counts_as_absent() {
        let parsed = parse("Task Name:\nTask Name: **");
        assert_eq!(parsed.get(Field::TaskName), None);
    }

    #[test]
    fn test_empty_text_parses_to_nothing() {
        assert!(parse("").is_empty());
        assert!(parse("complete gibberish with no fields").is_empty());
    }

    #[test]
    fn test_full_response_block() {
        let parsed = parse(
            "**Task Name:** Finish the report\n\
             **Priority:** High\n\
             **Completion Status:** Pending\n\
             **Action:** Create\n\
             **Notes:** Due tomorrow",
        );
        assert_eq!(parsed.get(Field::TaskName), Some("Finish the report"));
        assert_eq!(parsed.get(Field::Priority), Some("High"));
        assert_eq!(parsed.get(Field::CompletionStatus), Some("Pending"));
        assert_eq!(parsed.get(Field::Action), Some("Create"));
        assert_eq!(parsed.get(Field::Notes), Some("Due tomorrow"));
    }
}
