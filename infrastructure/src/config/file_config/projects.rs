//! Project facts from TOML (`[projects.<ID>]` tables)

use super::ConfigValidationError;
use nion_domain::ProjectFacts;
use serde::{Deserialize, Serialize};

/// One project record, keyed by project identifier in the parent table
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileProjectConfig {
    pub release_date: String,
    pub code_freeze: String,
    pub days_remaining: u32,
    /// Percent complete
    pub progress: u8,
    /// Percent of team capacity in use
    pub capacity: u8,
    pub eng_manager: String,
    pub tech_lead: String,
}

impl FileProjectConfig {
    pub fn validate(&self, id: &str) -> Result<(), ConfigValidationError> {
        for (field, value) in [("progress", self.progress), ("capacity", self.capacity)] {
            if value > 100 {
                return Err(ConfigValidationError::PercentOutOfRange {
                    project: id.to_string(),
                    field,
                    value,
                });
            }
        }
        Ok(())
    }

    pub fn to_facts(&self) -> ProjectFacts {
        ProjectFacts {
            release_date: self.release_date.clone(),
            code_freeze: self.code_freeze.clone(),
            days_remaining: self.days_remaining,
            progress_percent: self.progress,
            capacity_percent: self.capacity,
            engineering_manager: self.eng_manager.clone(),
            tech_lead: self.tech_lead.clone(),
        }
    }
}
