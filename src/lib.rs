//! # SmartTasker
//!
//! An AI-powered task manager: free-form natural-language requests
//! ("add a task to call mom tomorrow", "mark 'buy milk' done") are
//! translated into structured task operations against a per-user store.
//!
//! ## Request flow
//!
//! ```text
//!   prompt ──► oracle (Gemini) ──► structured response grammar
//!                   │                        │
//!                   ▼ (failure)              ▼
//!           fallback extractor ──► intent classifier ──► one executor
//!                                                             │
//!                                                             ▼
//!                                                         task store
//! ```
//!
//! Every request results in at most one store operation. When the oracle is
//! unreachable, the fallback extractor guesses an intent from the raw prompt,
//! limited to the safe outcomes (create a task, or ask for clarification).
//!
//! ## Modules
//! - `intent`: grammar, classifier, executors, fallback — the pipeline core
//! - `llm`: oracle client abstraction and the Gemini implementation
//! - `tasks`: task records, invariants, and the store contract
//! - `api`: HTTP plumbing (assistant endpoint, sessions, admin listing)

pub mod api;
pub mod config;
pub mod intent;
pub mod llm;
pub mod tasks;

pub use config::Config;
