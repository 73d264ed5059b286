//! Tracking domain module
//!
//! Typed items extracted from message text (action items, risks, issues,
//! decisions) and the heuristics that extract them.

pub mod cues;
pub mod extraction;
pub mod items;

pub use extraction::extract;
pub use items::{
    ActionItem, Decision, DecisionStatus, ExtractionKind, ExtractionList, GapFlag, GapFlags, Issue,
    IssueStatus, Level, Risk, Severity,
};
