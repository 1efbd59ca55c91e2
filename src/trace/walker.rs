//! Reference Graph Walker
//!
//! Depth-first traversal from each root file through field types:
//! - a type is marked visited before its fields are expanded, and the
//!   visited set lives for the whole run, so every type is expanded at most
//!   once even across roots (a diamond `A->B->D`, `A->C->D` reaches D only via B)
//! - a keyword hit on a node stops expansion of that node only
//! - unreadable files become diagnostics; unresolvable types are skipped
//!
//! The traversal uses an explicit frame stack, so graph depth is bounded by
//! memory rather than the call stack.
//!
//! @module trace/walker

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use chrono::Utc;
use tracing::{debug, error, info, warn};

use super::extract::extract;
use super::locate::TypeLocationIndex;
use super::matcher::KeywordMatcher;
use super::normalize::normalize;
use super::source::SourceReader;
use super::types::{
    Diagnostic, Finding, PathTrace, TraceReport, TraceStats, TypeModel, TypeName,
};

// =============================================================================
// RUN CONTEXT
// =============================================================================

/// State shared by every traversal in one run
pub struct TraceContext {
    visited: HashSet<TypeName>,
    locations: TypeLocationIndex,
    diagnostics: Vec<Diagnostic>,
    stats: TraceStats,
}

impl TraceContext {
    pub fn new(locations: TypeLocationIndex) -> Self {
        Self {
            visited: HashSet::new(),
            locations,
            diagnostics: Vec::new(),
            stats: TraceStats::default(),
        }
    }

    pub fn is_visited(&self, type_name: &str) -> bool {
        self.visited.contains(type_name)
    }

    pub fn visited_count(&self) -> usize {
        self.visited.len()
    }

    /// Counters accumulated by this context so far
    pub fn stats(&self) -> TraceStats {
        let locations = self.locations.stats();
        TraceStats {
            types_visited: self.visited.len(),
            location_hits: locations.hits,
            location_misses: locations.misses,
            ..self.stats
        }
    }
}

// =============================================================================
// WALKER
// =============================================================================

/// A pending node: the file to visit and the trace of its parent
struct Frame {
    path: PathBuf,
    parent_trace: PathTrace,
}

/// Walks field-type references looking for keyword hits in field names
pub struct ReferenceGraphWalker<R> {
    reader: R,
    matcher: KeywordMatcher,
    primitives: HashSet<String>,
}

impl<R: SourceReader> ReferenceGraphWalker<R> {
    pub fn new<I, S>(reader: R, matcher: KeywordMatcher, primitives: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            reader,
            matcher,
            primitives: primitives.into_iter().map(Into::into).collect(),
        }
    }

    /// Trace every root in order, sharing `ctx` across all of them
    pub fn run(&self, roots: &[PathBuf], ctx: &mut TraceContext) -> TraceReport {
        info!(
            roots = roots.len(),
            keywords = ?self.matcher.keywords(),
            "Tracing keywords through field types"
        );

        let mut findings = Vec::new();
        for root in roots {
            ctx.stats.roots += 1;
            findings.extend(self.walk(root, ctx, PathTrace::new()));
        }

        let stats = ctx.stats();
        info!(%stats, findings = findings.len(), "Trace complete");

        TraceReport {
            generated_at: Utc::now(),
            keywords: self.matcher.keywords(),
            findings,
            diagnostics: std::mem::take(&mut ctx.diagnostics),
            stats,
        }
    }

    /// Trace one file and everything reachable from it.
    ///
    /// `trace` is the chain leading to `file` (empty for a root).
    pub fn walk(&self, file: &Path, ctx: &mut TraceContext, trace: PathTrace) -> Vec<Finding> {
        let mut findings = Vec::new();
        let mut stack = vec![Frame {
            path: file.to_path_buf(),
            parent_trace: trace,
        }];

        while let Some(frame) = stack.pop() {
            let Some(model) = self.load(&frame.path, ctx) else {
                continue;
            };

            if !ctx.visited.insert(model.name.clone()) {
                debug!(type_name = %model.name, "Already visited");
                continue;
            }

            let trace = frame.parent_trace.extended(model.name.clone());

            if let Some(finding) = self.match_fields(&model, &frame.path, &trace) {
                info!(
                    keyword = %finding.keyword,
                    field = %finding.field_name,
                    type_name = %finding.matched_type,
                    depth = finding.depth(),
                    "Keyword found"
                );
                findings.push(finding);
                continue;
            }

            let children = self.resolve_children(&model, ctx);
            // Reverse so the first declared field is explored first
            stack.extend(children.into_iter().rev().map(|path| Frame {
                path,
                parent_trace: trace.clone(),
            }));
        }

        findings
    }

    /// Read, normalize and extract; soft failures are recorded and yield `None`
    fn load(&self, path: &Path, ctx: &mut TraceContext) -> Option<TypeModel> {
        let source = match self.reader.read_source(path) {
            Ok(source) => source,
            Err(e) if e.is_soft() => {
                warn!(file = %path.display(), error = %e, "Skipping unreadable file");
                ctx.diagnostics.extend(Diagnostic::from_error(&e));
                return None;
            }
            Err(e) => {
                error!(file = %path.display(), error = %e, "Source reader failed");
                return None;
            }
        };
        ctx.stats.files_read += 1;

        match extract(&normalize(&source)) {
            Some(model) => {
                debug!(
                    file = %path.display(),
                    type_name = %model.name,
                    fields = model.fields.len(),
                    "Extracted"
                );
                Some(model)
            }
            None => {
                debug!(file = %path.display(), "No class declared");
                ctx.stats.no_type_declared += 1;
                None
            }
        }
    }

    /// First field, in declaration order, whose name contains a keyword
    fn match_fields(&self, model: &TypeModel, file: &Path, trace: &PathTrace) -> Option<Finding> {
        model.fields.iter().find_map(|field| {
            self.matcher.find(&field.name).map(|keyword| Finding {
                keyword: keyword.to_string(),
                field_name: field.name.to_string(),
                matched_type: model.name.to_string(),
                file: file.to_path_buf(),
                path_trace: trace.clone(),
            })
        })
    }

    /// Files declaring the user-defined field types of `model`, in field order
    fn resolve_children(&self, model: &TypeModel, ctx: &mut TraceContext) -> Vec<PathBuf> {
        model
            .fields
            .iter()
            .map(|f| f.declared_type.as_str())
            .filter(|t| *t != model.name.as_str() && self.is_user_type(t))
            .filter_map(|t| ctx.locations.resolve(t))
            .collect()
    }

    /// Not a primitive/boxed/string type, and starts uppercase
    fn is_user_type(&self, type_name: &str) -> bool {
        !self.primitives.contains(type_name)
            && type_name
                .chars()
                .next()
                .map(|c| c.is_uppercase())
                .unwrap_or(false)
    }
}

// =============================================================================
// TESTS
// =============================================================================
