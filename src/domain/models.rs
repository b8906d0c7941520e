use std::path::Path;

use super::key::EpisodeKey;
use crate::error::RenameError;

/// A filename from one directory listing, split the way the matcher needs it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaFile {
    pub filename: String,
    pub stem: String,
    pub extension: Option<String>,
    pub key: Option<EpisodeKey>,
}

impl MediaFile {
    pub fn parse(filename: &str) -> Self {
        let path = Path::new(filename);
        let stem = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or(filename)
            .to_string();
        let extension = path
            .extension()
            .and_then(|s| s.to_str())
            .map(str::to_string);
        let key = EpisodeKey::extract(&stem);

        Self {
            filename: filename.to_string(),
            stem,
            extension,
            key,
        }
    }

    /// `wanted` must already be lower case.
    pub fn has_extension(&self, wanted: &str) -> bool {
        self.extension
            .as_deref()
            .is_some_and(|ext| ext.to_lowercase() == wanted)
    }
}

/// What happened to one subtitle file.
#[derive(Debug)]
pub enum Decision {
    NoKey,
    NoMatch { key: EpisodeKey },
    AlreadyNamed,
    Collision { target: String },
    Renamed { key: EpisodeKey, target: String },
    RenameFailed { target: String, error: RenameError },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_splits_final_extension() {
        let file = MediaFile::parse("Show.S01E01.chs.ass");
        assert_eq!(file.stem, "Show.S01E01.chs");
        assert_eq!(file.extension.as_deref(), Some("ass"));
        assert_eq!(file.key.map(|k| k.to_string()).as_deref(), Some("S01E01"));
    }

    #[test]
    fn test_dotfile_has_no_extension() {
        let file = MediaFile::parse(".ass");
        assert_eq!(file.stem, ".ass");
        assert_eq!(file.extension, None);
        assert!(!file.has_extension("ass"));
    }

    #[test]
    fn test_has_extension_ignores_case() {
        assert!(MediaFile::parse("Show.S01E01.MKV").has_extension("mkv"));
        assert!(MediaFile::parse("Show.S01E01.Ass").has_extension("ass"));
        assert!(!MediaFile::parse("Show.S01E01.mkv.bak").has_extension("mkv"));
    }
}
