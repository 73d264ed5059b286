//! Reasoning strategies
//!
//! [`ReasoningStrategy`] has two implementations: [`RuleBasedReasoning`]
//! and [`BackendReasoning`], which wraps an external [`ReasoningBackend`]
//! and falls back to rules per call.
//!
//! [`ReasoningBackend`]: crate::ports::reasoning_backend::ReasoningBackend

pub mod backend;
pub mod strategy;

pub use backend::BackendReasoning;
pub use strategy::{ReasoningStrategy, RuleBasedReasoning, Synthesis};
