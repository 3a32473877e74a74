//! Intent classification.

use super::grammar::{Field, ParsedResponse};

/// The single action kind derived from an oracle response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    Create,
    Update,
    Delete,
    List,
    Complete,
    Unclear,
}

impl std::fmt::Display for Intent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Create => write!(f, "create"),
            Self::Update => write!(f, "update"),
            Self::Delete => write!(f, "delete"),
            Self::List => write!(f, "list"),
            Self::Complete => write!(f, "complete"),
            Self::Unclear => write!(f, "unclear"),
        }
    }
}

/// Determine exactly one intent from a parsed response.
///
/// Explicit `Action:` declarations win, checked in order. Completion is
/// also inferred from the mere presence of a `Completion Status:` field,
/// because models routinely omit the Action line on completion requests.
/// A pure function of the parsed text: no store access, never fails.
pub fn classify(parsed: &ParsedResponse) -> Intent {
    let action = parsed
        .get(Field::Action)
        .map(str::to_lowercase)
        .unwrap_or_default();

    if action.contains("create") {
        Intent::Create
    } else if action.contains("update") {
        Intent::Update
    } else if action.contains("delete") {
        Intent::Delete
    } else if action.contains("list") {
        Intent::List
    } else if action.contains("mark completion") || parsed.has(Field::CompletionStatus) {
        Intent::Complete
    } else {
        Intent::Unclear
    }
}
