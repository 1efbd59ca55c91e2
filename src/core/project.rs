//! Search root resolution

use crate::core::error::{Error, Result};
use std::path::{Path, PathBuf};

/// A resolved search root
#[derive(Debug, Clone)]
pub struct Project {
    /// Absolute path to the search root
    pub root: PathBuf,
    /// Build system detected at the root, if any
    pub build_system: BuildSystem,
    /// Name of the project (directory name)
    pub name: String,
}

/// Build system based on detected marker
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildSystem {
    Maven,
    Gradle,
    Ant,
    Unknown,
}

impl BuildSystem {
    pub fn as_str(&self) -> &'static str {
        match self {
            BuildSystem::Maven => "maven",
            BuildSystem::Gradle => "gradle",
            BuildSystem::Ant => "ant",
            BuildSystem::Unknown => "unknown",
        }
    }
}

impl Project {
    /// Create project from explicit path (must be an existing directory)
    pub fn from_path(path: &Path) -> Result<Self> {
        let root = path.canonicalize().map_err(|_| Error::RootNotFound {
            path: path.to_path_buf(),
        })?;

        if !root.is_dir() {
            return Err(Error::RootNotFound { path: root });
        }

        let build_system = detect_build_system(&root);
        let name = root
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| "unknown".to_string());

        Ok(Self {
            root,
            build_system,
            name,
        })
    }
}

/// Detect build system from root directory
fn detect_build_system(root: &Path) -> BuildSystem {
    for (marker, build_system) in [
        ("pom.xml", BuildSystem::Maven),
        ("build.gradle", BuildSystem::Gradle),
        ("build.gradle.kts", BuildSystem::Gradle),
        ("settings.gradle", BuildSystem::Gradle),
        ("build.xml", BuildSystem::Ant),
    ] {
        if root.join(marker).exists() {
            return build_system;
        }
    }

    BuildSystem::Unknown
}
