//! fieldtrace - keyword provenance through Java field types
//!
//! Finds keywords in the field names of model classes, either declared
//! directly on a class or reachable through the types of its fields, and
//! reports the chain of types that led to each match.

pub mod cli;
pub mod core;
pub mod output;
pub mod parse;
pub mod trace;

pub use core::config::Config;
pub use core::error::{Error, Result};
pub use core::project::Project;
