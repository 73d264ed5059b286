//! Project facts returned by the project-fact store

use serde::{Deserialize, Serialize};

/// Fixed-shape record describing a project's schedule and staffing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectFacts {
    pub release_date: String,
    pub code_freeze: String,
    pub days_remaining: u32,
    pub progress_percent: u8,
    pub capacity_percent: u8,
    pub engineering_manager: String,
    pub tech_lead: String,
}

impl ProjectFacts {
    /// Human-readable fact lines, most important first.
    pub fn fact_lines(&self, project: &str) -> Vec<String> {
        vec![
            format!("Project: {}", project),
            format!("Current Release Date: {}", self.release_date),
            format!("Days Remaining: {}", self.days_remaining),
            format!("Code Freeze: {}", self.code_freeze),
            format!("Current Progress: {}%", self.progress_percent),
            format!("Team Capacity: {}% utilized", self.capacity_percent),
            format!("Engineering Manager: {}", self.engineering_manager),
            format!("Tech Lead: {}", self.tech_lead),
        ]
    }
}
