//! Core Data Structures
//!
//! Types produced and consumed by the reference-graph trace:
//! - `TypeModel`: declared class name plus its ordered fields
//! - `PathTrace`: chain of type names from a root to the current node
//! - `Finding`: a keyword hit with the chain that led to it
//! - `Diagnostic`: a per-file soft failure
//! - `TraceReport`: everything one run produced
//!
//! @module trace/types

use std::fmt;
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use compact_str::CompactString;
use serde::Serialize;
use smallvec::SmallVec;

use crate::core::error::Error;

/// Interned-size name of a declared type
pub type TypeName = CompactString;

// =============================================================================
// TYPE MODEL
// =============================================================================

/// A single field declaration, with its effective (unwrapped) type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    pub name: CompactString,
    pub declared_type: TypeName,
}

/// Structural model of one source file: its class name and fields
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeModel {
    pub name: TypeName,
    /// Fields in order of first appearance
    pub fields: Vec<Field>,
}

impl TypeModel {
    pub fn new(name: impl Into<TypeName>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
        }
    }

    /// Insert a field; a repeated name keeps its first position but takes the new type
    pub fn insert_field(&mut self, name: &str, declared_type: &str) {
        if let Some(existing) = self.fields.iter_mut().find(|f| f.name.as_str() == name) {
            existing.declared_type = declared_type.into();
        } else {
            self.fields.push(Field {
                name: name.into(),
                declared_type: declared_type.into(),
            });
        }
    }

    /// Effective type of a field, if declared
    pub fn field_type(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|f| f.name.as_str() == name)
            .map(|f| f.declared_type.as_str())
    }
}

// =============================================================================
// PATH TRACE
// =============================================================================

/// Ordered chain of type names from a root type to the current type.
///
/// Each branch owns its copy; extending never affects siblings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct PathTrace(SmallVec<[TypeName; 8]>);

impl PathTrace {
    pub fn new() -> Self {
        Self(SmallVec::new())
    }

    /// A copy of this trace with `name` appended
    pub fn extended(&self, name: TypeName) -> Self {
        let mut next = self.clone();
        next.0.push(name);
        next
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of references followed from the root (0 = the root itself)
    pub fn depth(&self) -> usize {
        self.0.len().saturating_sub(1)
    }

    pub fn root(&self) -> Option<&str> {
        self.0.first().map(|n| n.as_str())
    }
}

impl fmt::Display for PathTrace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, name) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(" -> ")?;
            }
            f.write_str(name)?;
        }
        Ok(())
    }
}

impl<S: Into<TypeName>> FromIterator<S> for PathTrace {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

// =============================================================================
// FINDING
// =============================================================================

/// A keyword found in a field name, and how the trace got there
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Finding {
    pub keyword: String,
    pub field_name: String,
    pub matched_type: String,
    /// File that declares `matched_type`
    pub file: PathBuf,
    /// Root type first, `matched_type` last
    pub path_trace: PathTrace,
}

impl Finding {
    /// Found on the root type itself
    pub fn is_direct(&self) -> bool {
        self.path_trace.len() <= 1
    }

    pub fn depth(&self) -> usize {
        self.path_trace.depth()
    }
}

// =============================================================================
// DIAGNOSTICS
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticKind {
    MissingFile,
    UnreadableFile,
}

/// A file that could not be read; reported, never fatal
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub path: PathBuf,
    pub message: String,
}

impl Diagnostic {
    /// Convert a soft error into a diagnostic; other errors yield `None`
    pub fn from_error(error: &Error) -> Option<Self> {
        let (kind, path) = match error {
            Error::MissingFile { path } => (DiagnosticKind::MissingFile, path),
            Error::UnreadableFile { path, .. } => (DiagnosticKind::UnreadableFile, path),
            _ => return None,
        };
        Some(Self {
            kind,
            path: path.clone(),
            message: error.to_string(),
        })
    }
}

// =============================================================================
// REPORT
// =============================================================================

/// Counters for one run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TraceStats {
    pub roots: usize,
    pub files_read: usize,
    pub types_visited: usize,
    /// Files read that declared no class
    pub no_type_declared: usize,
    pub location_hits: usize,
    pub location_misses: usize,
}

impl fmt::Display for TraceStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} roots, {} files read, {} types visited",
            self.roots, self.files_read, self.types_visited
        )
    }
}

/// Everything produced by tracing a set of root files
#[derive(Debug, Clone, Serialize)]
pub struct TraceReport {
    pub generated_at: DateTime<Utc>,
    pub keywords: Vec<String>,
    pub findings: Vec<Finding>,
    pub diagnostics: Vec<Diagnostic>,
    pub stats: TraceStats,
}
