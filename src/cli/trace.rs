//! Trace command implementation

use crate::cli::{load_config, resolve_root, TraceArgs};
use crate::core::config::Config;
use crate::core::error::{Error, Result};
use crate::core::project::Project;
use crate::output::{format_report, human, OutputFormat};
use crate::parse::FileWalker;
use crate::trace::{
    FsSource, KeywordMatcher, ReferenceGraphWalker, TraceContext, TraceReport, TypeLocationIndex,
};
use std::path::Path;
use tracing::info;

/// Run the trace command
pub fn run(args: TraceArgs) -> Result<()> {
    let mut config = load_config(args.config.as_deref())?;
    apply_overrides(&mut config, &args);

    let root = resolve_root(args.root, true)?;
    let project = Project::from_path(&root)?;
    info!(
        project = %project.name,
        build_system = project.build_system.as_str(),
        root = %project.root.display(),
        "Tracing project"
    );

    let Some(report) = trace_project(&project.root, &config)? else {
        println!("No candidate files found in {}", project.root.display());
        return Ok(());
    };

    eprint!("{}", human::format_diagnostics(&report));
    print!("{}", format_report(&report, config.general.format));
    Ok(())
}

fn apply_overrides(config: &mut Config, args: &TraceArgs) {
    if !args.keywords.is_empty() {
        config.general.keywords = args.keywords.clone();
    }
    if let Some(workers) = args.workers {
        config.scan.workers = workers.max(1);
    }
    if args.include_tests {
        config.scan.exclude_tests = false;
    }
    if args.json {
        config.general.format = OutputFormat::Json;
    }
}

/// Discover candidate files under `root` and trace each of them in path order.
///
/// Returns `None` when the root holds no candidate files.
pub fn trace_project(root: &Path, config: &Config) -> Result<Option<TraceReport>> {
    let matcher = KeywordMatcher::new(&config.general.keywords);
    if matcher.is_empty() {
        return Err(Error::ConfigError {
            message: "no keywords to search for".to_string(),
        });
    }

    let files = FileWalker::new(root, &config.scan).walk()?;
    if files.is_empty() {
        return Ok(None);
    }

    let test_marker = config
        .scan
        .exclude_tests
        .then(|| config.scan.test_marker.clone());
    let locations = TypeLocationIndex::new(files.clone(), test_marker);
    let walker =
        ReferenceGraphWalker::new(FsSource, matcher, config.types.primitives.iter().cloned());
    let mut ctx = TraceContext::new(locations);

    Ok(Some(walker.run(&files, &mut ctx)))
}
