//! Ambient plumbing: errors, configuration, search root

pub mod config;
pub mod error;
pub mod project;
