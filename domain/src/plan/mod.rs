//! Plan domain module
//!
//! Tasks, intent templates and the checked task graph produced by the L1
//! planner.

pub mod entities;
pub mod graph;
pub mod planner;
pub mod template;

pub use entities::{Task, TaskId};
pub use graph::{PlanError, TaskGraph};
pub use planner::Planner;
pub use template::{PlanTemplate, TemplateStep};
