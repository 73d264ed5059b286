//! Progress reporting for orchestration runs

pub mod reporter;
