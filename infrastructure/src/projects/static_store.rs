//! In-memory project-fact store

use nion_application::ports::project_store::ProjectFactStore;
use nion_domain::ProjectFacts;
use std::collections::BTreeMap;

type SampleRow = (&'static str, &'static str, &'static str, u32, u8, u8, &'static str, &'static str);

/// id, release, code freeze, days remaining, progress, capacity, manager, tech lead
const SAMPLE: [SampleRow; 4] = [
    ("PRJ-ALPHA", "Dec 15, 2025", "Dec 10, 2025", 9, 70, 85, "Alex Kim", "David Park"),
    ("PRJ-BETA", "Jan 10, 2026", "Jan 5, 2026", 35, 65, 80, "Sarah Johnson", "Emily Zhang"),
    ("PRJ-GAMMA", "Jan 20, 2026", "Jan 15, 2026", 45, 55, 75, "Mike Chen", "Robert Liu"),
    ("PRJ-DELTA", "Feb 1, 2026", "Jan 25, 2026", 57, 40, 70, "Lisa Wong", "James Park"),
];

/// Read-only project facts held in memory.
///
/// Identifiers are matched case-insensitively. Built once at startup and
/// shared across runs.
#[derive(Debug, Clone, Default)]
pub struct StaticProjectStore {
    projects: BTreeMap<String, ProjectFacts>,
}

impl StaticProjectStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// The four sample projects used for demos and tests.
    pub fn sample() -> Self {
        SAMPLE.iter().fold(
            Self::new(),
            |store, (id, release, freeze, days, progress, capacity, manager, lead)| {
                store.with_project(
                    id,
                    facts(release, freeze, *days, *progress, *capacity, manager, lead),
                )
            },
        )
    }

    /// Add or replace a project.
    pub fn with_project(mut self, id: impl AsRef<str>, facts: ProjectFacts) -> Self {
        self.projects.insert(normalize(id.as_ref()), facts);
        self
    }

    /// Merge `projects` over the current entries.
    pub fn with_projects(self, projects: impl IntoIterator<Item = (String, ProjectFacts)>) -> Self {
        projects
            .into_iter()
            .fold(self, |store, (id, facts)| store.with_project(id, facts))
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.projects.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.projects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.projects.is_empty()
    }
}

impl ProjectFactStore for StaticProjectStore {
    fn lookup(&self, project: &str) -> Option<ProjectFacts> {
        self.projects.get(&normalize(project)).cloned()
    }
}

fn normalize(id: &str) -> String {
    id.trim().to_ascii_uppercase()
}

fn facts(
    release_date: &str,
    code_freeze: &str,
    days_remaining: u32,
    progress_percent: u8,
    capacity_percent: u8,
    engineering_manager: &str,
    tech_lead: &str,
) -> ProjectFacts {
    ProjectFacts {
        release_date: release_date.to_string(),
        code_freeze: code_freeze.to_string(),
        days_remaining,
        progress_percent,
        capacity_percent,
        engineering_manager: engineering_manager.to_string(),
        tech_lead: tech_lead.to_string(),
    }
}
