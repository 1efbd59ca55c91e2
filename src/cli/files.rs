//! Files command implementation

use crate::cli::{load_config, resolve_root, FilesArgs};
use crate::core::error::Result;
use crate::core::project::Project;
use crate::parse::FileWalker;

/// List candidate files, one per line
pub fn run(args: FilesArgs) -> Result<()> {
    let mut config = load_config(args.config.as_deref())?;
    if args.include_tests {
        config.scan.exclude_tests = false;
    }

    let project = Project::from_path(&resolve_root(args.root, false)?)?;
    let files = FileWalker::new(&project.root, &config.scan).walk()?;

    if files.is_empty() {
        println!("No candidate files found in {}", project.root.display());
        return Ok(());
    }

    for file in &files {
        let shown = file.strip_prefix(&project.root).unwrap_or(file);
        println!("{}", shown.display());
    }
    eprintln!("{} candidate files ({})", files.len(), project.build_system.as_str());
    Ok(())
}
