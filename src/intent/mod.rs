//! Intent pipeline: natural-language request → at most one task operation.
//!
//! Flow: the raw request goes to the oracle with formatting instructions;
//! the reply is parsed by the structured response grammar, classified into
//! exactly one intent, and handed to the matching action executor. When
//! the oracle fails or returns nothing parseable, a heuristic fallback
//! produces either a create guess or a clarification — never a destructive
//! action.

mod classifier;
mod error;
mod executor;
mod fallback;
mod grammar;
mod prompt;

pub use classifier::{classify, Intent};
pub use error::IntentError;
pub use executor::{ActionExecutor, ActionOutcome};
pub use fallback::FallbackExtractor;
pub use grammar::{Field, ParsedResponse, ResponseGrammar};

use std::sync::Arc;

use crate::llm::{GenerateOptions, LlmClient};
use crate::tasks::{normalize_owner, TaskStore};

/// End-to-end handler for one natural-language request.
pub struct IntentPipeline {
    oracle: Arc<dyn LlmClient>,
    grammar: ResponseGrammar,
    fallback: FallbackExtractor,
    executor: ActionExecutor,
    options: GenerateOptions,
}

impl IntentPipeline {
    pub fn new(oracle: Arc<dyn LlmClient>, store: Arc<dyn TaskStore>) -> Self {
        Self {
            oracle,
            grammar: ResponseGrammar::new(),
            fallback: FallbackExtractor::new(),
            executor: ActionExecutor::new(store),
            options: GenerateOptions::default(),
        }
    }

    /// Process one request for the given owner email.
    ///
    /// Exactly one store operation runs per call. An unclear intent is a
    /// successful outcome carrying a clarification, not an error.
    pub async fn process(
        &self,
        prompt: &str,
        owner_email: &str,
    ) -> Result<ActionOutcome, IntentError> {
        let prompt = prompt.trim();
        if prompt.is_empty() {
            return Err(IntentError::Validation("prompt is required".to_string()));
        }
        let owner = normalize_owner(owner_email);
        if owner.is_empty() || !owner.contains('@') {
            return Err(IntentError::Validation(
                "a valid user email is required".to_string(),
            ));
        }

        let oracle_text = match self
            .oracle
            .generate(&prompt::build_prompt(prompt, &owner), &self.options)
            .await
        {
            Ok(text) => Some(text),
            Err(e) => {
                tracing::warn!(error = %e, "oracle call failed, falling back to heuristics");
                None
            }
        };

        // Fall back when the oracle errored, returned nothing, or returned
        // text the grammar cannot extract a single field from.
        let parsed = match oracle_text
            .as_deref()
            .map(|text| self.grammar.parse(text))
            .filter(|parsed| !parsed.is_empty())
        {
            Some(parsed) => parsed,
            None => {
                if oracle_text.is_some() {
                    tracing::warn!("oracle response had no recognizable fields, falling back");
                }
                let guess = self.fallback.extract(prompt);
                let parsed = self.grammar.parse(&guess);
                if parsed.is_empty() {
                    return Err(IntentError::AiUnavailable(
                        "no interpretable response could be produced for this request"
                            .to_string(),
                    ));
                }
                parsed
            }
        };

        let intent = classify(&parsed);
        tracing::debug!(%intent, %owner, "classified request");
        self.executor.execute(intent, &parsed, &owner).await
    }
}
