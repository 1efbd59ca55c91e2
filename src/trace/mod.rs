//! fieldtrace Trace - Keyword Provenance Through Field Types
//!
//! This module answers "does a keyword appear in a field name reachable
//! from this file?":
//! - Normalization (comments, literals, imports stripped)
//! - Type model extraction (class name, fields, unwrapped field types)
//! - Type location (type name -> declaring file, cached per run)
//! - Keyword matching (case-insensitive containment)
//! - Reference graph walk (visited set, path traces, findings)
//!
//! @module trace

pub mod extract;
pub mod locate;
pub mod matcher;
pub mod normalize;
pub mod source;
pub mod types;
pub mod walker;

// =============================================================================
// RE-EXPORTS
// =============================================================================

pub use extract::{effective_type, extract};
pub use locate::{LocationStats, TypeLocationIndex};
pub use matcher::KeywordMatcher;
pub use normalize::normalize;
pub use source::{FsSource, SourceReader};
pub use types::{
    Diagnostic, DiagnosticKind, Field, Finding, PathTrace, TraceReport, TraceStats, TypeModel,
    TypeName,
};
pub use walker::{ReferenceGraphWalker, TraceContext};
