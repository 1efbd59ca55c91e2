mod walker;

pub use walker::{is_test_artifact, CandidateFilter, FileWalker};
