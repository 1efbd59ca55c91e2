//! Type Location Index
//!
//! Resolves a declared type name to the file that declares it, by file stem
//! (`OrderDetail` -> `.../OrderDetail.java`). The stem table is built once
//! from the whole candidate universe on first use; every lookup outcome,
//! including "not found", is cached for the rest of the run.
//!
//! @module trace/locate

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use tracing::debug;

use super::types::TypeName;
use crate::parse::is_test_artifact;

/// Lookup counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LocationStats {
    /// Lookups answered from the cache
    pub hits: usize,
    /// Lookups that consulted the stem table
    pub misses: usize,
}

/// Run-scoped map from type name to declaring file
pub struct TypeLocationIndex {
    universe: Vec<PathBuf>,
    test_marker: Option<String>,
    /// Built on first lookup
    by_stem: Option<HashMap<String, PathBuf>>,
    resolved: HashMap<TypeName, Option<PathBuf>>,
    stats: LocationStats,
}

impl TypeLocationIndex {
    /// `universe` is every candidate file known to the run, in priority order
    pub fn new(universe: Vec<PathBuf>, test_marker: Option<String>) -> Self {
        Self {
            universe,
            test_marker: test_marker.filter(|m| !m.is_empty()),
            by_stem: None,
            resolved: HashMap::new(),
            stats: LocationStats::default(),
        }
    }

    /// File declaring `type_name`, or `None` if no candidate file has that stem
    pub fn resolve(&mut self, type_name: &str) -> Option<PathBuf> {
        if let Some(cached) = self.resolved.get(type_name) {
            self.stats.hits += 1;
            return cached.clone();
        }

        self.stats.misses += 1;
        let found = self.stem_table().get(type_name).cloned();
        debug!(
            type_name,
            found = ?found,
            "Resolved type location"
        );
        self.resolved.insert(TypeName::from(type_name), found.clone());
        found
    }

    pub fn stats(&self) -> LocationStats {
        self.stats
    }

    fn stem_table(&mut self) -> &HashMap<String, PathBuf> {
        if self.by_stem.is_none() {
            let table = build_stem_table(&self.universe, self.test_marker.as_deref());
            debug!(
                files = self.universe.len(),
                types = table.len(),
                "Built type location table"
            );
            self.by_stem = Some(table);
        }
        self.by_stem.get_or_insert_with(HashMap::new)
    }
}

/// First file wins when two files share a stem
fn build_stem_table(universe: &[PathBuf], test_marker: Option<&str>) -> HashMap<String, PathBuf> {
    let mut table: HashMap<String, PathBuf> = HashMap::with_capacity(universe.len());

    for path in universe {
        if let Some(marker) = test_marker {
            if is_test_artifact(path, marker) {
                continue;
            }
        }
        let Some(stem) = file_stem(path) else {
            continue;
        };
        if let Some(existing) = table.get(&stem) {
            debug!(
                type_name = %stem,
                kept = %existing.display(),
                ignored = %path.display(),
                "Duplicate type file"
            );
            continue;
        }
        table.insert(stem, path.clone());
    }

    table
}

fn file_stem(path: &Path) -> Option<String> {
    path.file_stem().map(|s| s.to_string_lossy().into_owned())
}
