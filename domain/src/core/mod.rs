//! Core domain concepts shared by every module

pub mod error;
