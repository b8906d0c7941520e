use std::ops::AddAssign;
use std::path::PathBuf;

use tracing::{error, info, warn};

use crate::domain::models::{Decision, MediaFile};
use crate::workflows::matcher::DuplicateKey;

/// Rename counts. Collisions and failed renames are errors; the other
/// non-renamed outcomes are skips.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Tally {
    pub renamed: usize,
    pub errors: usize,
    pub skipped: usize,
}

impl Tally {
    pub fn record(&mut self, decision: &Decision) {
        match decision {
            Decision::Renamed { .. } => self.renamed += 1,
            Decision::Collision { .. } | Decision::RenameFailed { .. } => self.errors += 1,
            Decision::NoKey | Decision::NoMatch { .. } | Decision::AlreadyNamed => {
                self.skipped += 1
            }
        }
    }
}

impl AddAssign for Tally {
    fn add_assign(&mut self, other: Self) {
        self.renamed += other.renamed;
        self.errors += other.errors;
        self.skipped += other.skipped;
    }
}

#[derive(Debug)]
pub struct FileOutcome {
    pub filename: String,
    pub decision: Decision,
}

/// Everything that happened in one directory.
#[derive(Debug)]
pub struct DirectoryReport {
    pub dir: PathBuf,
    pub video_keys: usize,
    pub duplicates: Vec<DuplicateKey>,
    pub outcomes: Vec<FileOutcome>,
    pub tally: Tally,
}

impl DirectoryReport {
    pub fn new(dir: PathBuf, video_keys: usize, duplicates: Vec<DuplicateKey>) -> Self {
        Self {
            dir,
            video_keys,
            duplicates,
            outcomes: Vec::new(),
            tally: Tally::default(),
        }
    }

    pub fn record(&mut self, filename: String, decision: Decision) {
        self.tally.record(&decision);
        self.outcomes.push(FileOutcome { filename, decision });
    }

    #[cfg(test)]
    pub fn decision_for(&self, filename: &str) -> Option<&Decision> {
        self.outcomes
            .iter()
            .find(|o| o.filename == filename)
            .map(|o| &o.decision)
    }

    pub fn log_summary(&self) {
        info!(
            "  {:?}: {} video keys ({} duplicated), {} renamed, {} skipped, {} errors/warnings",
            self.dir,
            self.video_keys,
            self.duplicates.len(),
            self.tally.renamed,
            self.tally.skipped,
            self.tally.errors
        );

        let unresolved: Vec<&str> = self
            .outcomes
            .iter()
            .filter(|o| {
                matches!(
                    o.decision,
                    Decision::Collision { .. } | Decision::RenameFailed { .. }
                )
            })
            .map(|o| o.filename.as_str())
            .collect();
        if !unresolved.is_empty() {
            warn!("  left unrenamed: {}", unresolved.join(", "));
        }
    }
}

pub fn log_decision(file: &MediaFile, decision: &Decision) {
    let name = &file.filename;
    match decision {
        Decision::NoKey => {
            info!("  [skip] {name}: no usable SxxEyy marker in the filename");
        }
        Decision::NoMatch { key } => {
            info!("  [skip] {name}: no video with key {key} in this directory");
        }
        Decision::AlreadyNamed => {
            info!("  [ok] {name}: already matches its video");
        }
        Decision::Collision { target } => {
            warn!("  [collision] {name}: {target} already exists, not renaming");
        }
        Decision::Renamed { key, target } => {
            info!("  [renamed] {name} -> {target} (matched {key})");
        }
        Decision::RenameFailed { target, error } => {
            error!("  [error] {name} -> {target}: {error}");
        }
    }
}

pub fn log_duplicate(duplicate: &DuplicateKey) {
    warn!(
        "  [duplicate] key {} is shared by videos {:?} and {:?}; using {:?}",
        duplicate.key, duplicate.previous, duplicate.replacement, duplicate.replacement
    );
}

pub fn log_totals(total: &Tally) {
    info!("All directories processed.");
    info!("  renamed subtitle files: {}", total.renamed);
    info!("  skipped subtitle files: {}", total.skipped);
    info!("  errors/warnings: {}", total.errors);
}
