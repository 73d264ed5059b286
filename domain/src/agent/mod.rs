//! Agent domain module
//!
//! The static agent catalog and the visibility model that governs which
//! layer may delegate to which target.

pub mod catalog;
pub mod registry;

pub use catalog::{AgentDescriptor, AgentName, DomainName, Layer};
pub use registry::{AgentRegistry, Requester, Resolution, Target, VisibilityError};
