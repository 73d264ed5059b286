//! Project-fact store port

use nion_domain::ProjectFacts;

/// Read-only lookup of project facts by identifier.
///
/// A miss is `None`, never an error. Implementations are shared across runs
/// without synchronization, so they must not mutate on lookup.
pub trait ProjectFactStore: Send + Sync {
    fn lookup(&self, project: &str) -> Option<ProjectFacts>;
}
