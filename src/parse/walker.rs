use crate::core::config::ScanConfig;
use crate::core::error::{Error, Result};
use ignore::WalkBuilder;
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Decides whether a path is a candidate source file.
///
/// A pure function of the path string plus a file-type check, so it can run
/// on many paths in parallel.
#[derive(Debug, Clone)]
pub struct CandidateFilter {
    extensions: Vec<String>,
    test_marker: Option<String>,
}

impl CandidateFilter {
    pub fn new(extensions: Vec<String>, test_marker: Option<String>) -> Self {
        Self {
            extensions: extensions
                .into_iter()
                .map(|e| e.trim_start_matches('.').to_lowercase())
                .collect(),
            test_marker: test_marker.filter(|m| !m.is_empty()),
        }
    }

    pub fn from_config(scan: &ScanConfig) -> Self {
        let marker = scan.exclude_tests.then(|| scan.test_marker.clone());
        Self::new(scan.extensions.clone(), marker)
    }

    /// Extension matches, the name is not a test artifact, and it is a regular file
    pub fn is_candidate(&self, path: &Path) -> bool {
        self.matches_name(path) && path.is_file()
    }

    fn matches_name(&self, path: &Path) -> bool {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();
        if !self.extensions.iter().any(|e| *e == ext) {
            return false;
        }
        match &self.test_marker {
            Some(marker) => !is_test_artifact(path, marker),
            None => true,
        }
    }
}

/// True when the file name contains the test marker (e.g. `OrderTest.java`)
pub fn is_test_artifact(path: &Path, marker: &str) -> bool {
    path.file_name()
        .map(|n| n.to_string_lossy().contains(marker))
        .unwrap_or(false)
}

/// Walks a search root and collects candidate source files
pub struct FileWalker {
    root: PathBuf,
    filter: CandidateFilter,
    max_file_size: u64,
    workers: usize,
    respect_gitignore: bool,
}

impl FileWalker {
    pub fn new(root: &Path, scan: &ScanConfig) -> Self {
        Self {
            root: root.to_path_buf(),
            filter: CandidateFilter::from_config(scan),
            max_file_size: scan.max_file_size,
            workers: scan.workers.max(1),
            respect_gitignore: scan.respect_gitignore,
        }
    }

    /// Walk all candidate files under the root, sorted by path
    pub fn walk(&self) -> Result<Vec<PathBuf>> {
        let mut all_files = Vec::new();

        let walker = WalkBuilder::new(&self.root)
            .hidden(true) // Skip hidden files
            .git_ignore(self.respect_gitignore)
            .git_global(self.respect_gitignore)
            .git_exclude(self.respect_gitignore)
            .require_git(false) // Work even without .git
            .build();

        for entry in walker.flatten() {
            let path = entry.path();

            if path.is_dir() {
                continue;
            }

            if let Ok(meta) = path.metadata() {
                if meta.len() > self.max_file_size {
                    debug!(file = %path.display(), size = meta.len(), "Skipping large file");
                    continue;
                }
            }

            all_files.push(path.to_path_buf());
        }

        let mut files = self.classify(&all_files)?;
        files.sort();

        info!(
            root = %self.root.display(),
            scanned = all_files.len(),
            candidates = files.len(),
            "Discovered candidate files"
        );

        Ok(files)
    }

    /// Classify paths on a bounded worker pool
    fn classify(&self, paths: &[PathBuf]) -> Result<Vec<PathBuf>> {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.workers)
            .build()
            .map_err(|e| Error::WorkerPool {
                message: e.to_string(),
            })?;

        let filter = &self.filter;
        Ok(pool.install(|| {
            paths
                .par_iter()
                .filter(|p| filter.is_candidate(p))
                .cloned()
                .collect()
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn touch(root: &Path, rel: &str) {
        let path = root.join(rel);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, "class X {}").unwrap();
    }

    #[test]
    fn test_filter_extension_and_test_marker() {
        let filter = CandidateFilter::new(vec!["java".into()], Some("Test".into()));
        assert!(filter.matches_name(Path::new("src/Order.java")));
        assert!(filter.matches_name(Path::new("src/Order.JAVA")));
        assert!(!filter.matches_name(Path::new("src/OrderTest.java")));
        assert!(!filter.matches_name(Path::new("src/TestUtils.java")));
        assert!(!filter.matches_name(Path::new("src/Order.kt")));
    }

    #[test]
    fn test_filter_without_marker_keeps_tests() {
        let filter = CandidateFilter::new(vec![".java".into()], None);
        assert!(filter.matches_name(Path::new("OrderTest.java")));
    }

    #[test]
    fn test_walk_collects_sorted_candidates() {
        let temp = TempDir::new().unwrap();
        touch(temp.path(), "b/Order.java");
        touch(temp.path(), "a/Detail.java");
        touch(temp.path(), "a/DetailTest.java");
        touch(temp.path(), "a/notes.txt");

        let walker = FileWalker::new(temp.path(), &ScanConfig::default());
        let files = walker.walk().unwrap();

        let names: Vec<_> = files
            .iter()
            .map(|p| p.strip_prefix(temp.path()).unwrap().to_path_buf())
            .collect();
        assert_eq!(
            names,
            vec![PathBuf::from("a/Detail.java"), PathBuf::from("b/Order.java")]
        );
    }

    #[test]
    fn test_walk_skips_large_files() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("Big.java"), "x".repeat(64)).unwrap();
        touch(temp.path(), "Small.java");

        let scan = ScanConfig {
            max_file_size: 32,
            ..ScanConfig::default()
        };
        let files = FileWalker::new(temp.path(), &scan).walk().unwrap();
        assert_eq!(files.len(), 1);
        assert!(files[0].ends_with("Small.java"));
    }
}
