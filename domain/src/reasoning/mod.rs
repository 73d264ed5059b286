//! Reasoning domain
//!
//! Intent/urgency classification of an inbound message and free-text
//! synthesis. The rule-based classifier here is total and deterministic;
//! the application layer wraps it behind the polymorphic reasoning strategy
//! and uses it as the fallback for the external backend.

pub mod parsing;
pub mod rules;
pub mod value_objects;

pub use parsing::parse_classification;
pub use rules::{classify_by_rules, synthesize_by_rules};
pub use value_objects::{Intent, ReasoningResult, Signals, SynthesisContext, Urgency};
