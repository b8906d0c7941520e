use std::collections::HashMap;
use std::path::Path;

use tracing::info;

use crate::config::Settings;
use crate::domain::key::EpisodeKey;
use crate::domain::models::{Decision, MediaFile};
use crate::error::RenameError;
use crate::infra::fs::FileSystem;
use crate::infra::walk::walk;
use crate::workflows::renamer;
use crate::workflows::report::{self, DirectoryReport, Tally};

/// Two videos in one directory that normalize to the same key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DuplicateKey {
    pub key: EpisodeKey,
    pub previous: String,
    pub replacement: String,
}

/// Key -> video stem for a single directory.
#[derive(Debug, Default)]
pub struct VideoLookup {
    stems: HashMap<EpisodeKey, String>,
    duplicates: Vec<DuplicateKey>,
}

impl VideoLookup {
    /// Later videos replace earlier ones with the same key; every replacement
    /// is recorded as a duplicate.
    pub fn build<'a>(videos: impl IntoIterator<Item = &'a MediaFile>) -> Self {
        let mut lookup = Self::default();
        for video in videos {
            let Some(key) = video.key else {
                continue;
            };
            if let Some(previous) = lookup.stems.insert(key, video.stem.clone()) {
                let duplicate = DuplicateKey {
                    key,
                    previous,
                    replacement: video.stem.clone(),
                };
                report::log_duplicate(&duplicate);
                lookup.duplicates.push(duplicate);
            }
        }
        lookup
    }

    pub fn get(&self, key: &EpisodeKey) -> Option<&str> {
        self.stems.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.stems.len()
    }

    pub fn duplicates(&self) -> &[DuplicateKey] {
        &self.duplicates
    }
}

pub struct DirectoryMatcher<'a, F: FileSystem> {
    fs: &'a F,
    settings: &'a Settings,
}

impl<'a, F: FileSystem> DirectoryMatcher<'a, F> {
    pub fn new(fs: &'a F, settings: &'a Settings) -> Self {
        Self { fs, settings }
    }

    /// Renames the subtitle files of `dir` after their videos.
    ///
    /// All videos are indexed before the first subtitle is looked at, and
    /// subtitles are handled in `filenames` order. A failure on one file
    /// never stops the others.
    pub fn process(&self, dir: &Path, filenames: &[String]) -> DirectoryReport {
        info!("Directory: {:?} ({} files)", dir, filenames.len());

        let files: Vec<MediaFile> = filenames.iter().map(|n| MediaFile::parse(n)).collect();
        let lookup = VideoLookup::build(
            files
                .iter()
                .filter(|f| f.has_extension(&self.settings.video_extension)),
        );
        info!("  video keys: {}", lookup.len());

        let mut report =
            DirectoryReport::new(dir.to_path_buf(), lookup.len(), lookup.duplicates().to_vec());

        for subtitle in files
            .iter()
            .filter(|f| f.has_extension(&self.settings.subtitle_extension))
        {
            let decision = self.resolve(dir, &lookup, subtitle);
            report::log_decision(subtitle, &decision);
            report.record(subtitle.filename.clone(), decision);
        }

        report.log_summary();
        report
    }

    pub fn resolve(&self, dir: &Path, lookup: &VideoLookup, subtitle: &MediaFile) -> Decision {
        let Some(key) = subtitle.key else {
            return Decision::NoKey;
        };
        let Some(video_stem) = lookup.get(&key) else {
            return Decision::NoMatch { key };
        };

        let extension = subtitle.extension.as_deref().unwrap_or_default();
        let target = renamer::target_filename(video_stem, extension);
        if subtitle.filename == target {
            return Decision::AlreadyNamed;
        }

        let old_path = dir.join(&subtitle.filename);
        let new_path = dir.join(&target);
        match renamer::rename_file(self.fs, &old_path, &new_path) {
            Ok(()) => Decision::Renamed { key, target },
            Err(RenameError::TargetExists(_)) => Decision::Collision { target },
            Err(error) => Decision::RenameFailed { target, error },
        }
    }
}

/// Runs the matcher over every non-hidden directory under `root`.
pub fn rename_tree<F: FileSystem>(root: &Path, settings: &Settings, fs: &F) -> Tally {
    let matcher = DirectoryMatcher::new(fs, settings);
    let mut total = Tally::default();
    for listing in walk(root) {
        total += matcher.process(&listing.dir, &listing.filenames).tally;
    }
    total
}
