//! Rendering of orchestration runs

pub mod console;
pub mod formatter;
