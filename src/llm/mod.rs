//! Oracle client module.
//!
//! This module provides a trait-based abstraction over the external
//! text-generation service, with Gemini as the concrete implementation.
//! The oracle's output carries no format guarantee; everything downstream
//! must tolerate partial or malformed text.

mod error;
mod gemini;

pub use error::{classify_http_status, LlmError, LlmErrorKind};
pub use gemini::GeminiClient;

use async_trait::async_trait;

/// Generation parameters for a single oracle call.
///
/// The defaults match the production prompt: low temperature for format
/// adherence, bounded output length.
#[derive(Debug, Clone)]
pub struct GenerateOptions {
    /// Sampling temperature (0 = deterministic).
    pub temperature: f64,
    /// Top-p nucleus sampling.
    pub top_p: f64,
    /// Maximum output tokens to generate.
    pub max_output_tokens: u32,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            temperature: 0.5,
            top_p: 0.95,
            max_output_tokens: 2000,
        }
    }
}

/// Trait for oracle clients: one prompt in, generated text out.
#[async_trait]
pub trait LlmClient: Send + Sync {
    /// Send a single generation request.
    ///
    /// Implementations must bound the call with a timeout and must not
    /// retry: on failure the caller falls back to heuristic extraction
    /// instead, and a fresh user request is required for another attempt.
    async fn generate(&self, prompt: &str, options: &GenerateOptions)
        -> Result<String, LlmError>;
}
