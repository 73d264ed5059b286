//! Use cases for the application layer

pub mod execute_plan;
pub mod run_orchestration;
