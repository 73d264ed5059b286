//! Inbound message domain
//!
//! A single message from chat, email or a meeting transcript, optionally
//! tied to a project. Messages are immutable once constructed.

pub mod entities;

pub use entities::{InputMessage, Sender, SourceChannel};
