use anyhow::Result;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// The plain files of one directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Listing {
    pub dir: PathBuf,
    pub filenames: Vec<String>,
}

/// Top-down walk that yields every directory under `root` (root first),
/// never entering subdirectories whose name starts with a dot.
///
/// Entries are sorted by name. Directories that cannot be read are logged and
/// skipped; symlinked directories are listed nowhere and not followed.
pub struct Walk {
    pending: Vec<PathBuf>,
}

pub fn walk(root: &Path) -> Walk {
    Walk {
        pending: vec![root.to_path_buf()],
    }
}

impl Iterator for Walk {
    type Item = Listing;

    fn next(&mut self) -> Option<Listing> {
        while let Some(dir) = self.pending.pop() {
            match read_listing(&dir) {
                Ok((listing, subdirs)) => {
                    // Reversed so the stack pops them in name order.
                    self.pending.extend(subdirs.into_iter().rev());
                    return Some(listing);
                }
                Err(e) => {
                    warn!("Cannot read directory {:?}: {:#}", dir, e);
                }
            }
        }
        None
    }
}

fn read_listing(dir: &Path) -> Result<(Listing, Vec<PathBuf>)> {
    let mut filenames = Vec::new();
    let mut subdirs = Vec::new();

    for entry in fs::read_dir(dir)? {
        let Some(entry) = readable(dir, entry) else {
            continue;
        };
        let name = entry.file_name();
        let Some(name) = name.to_str() else {
            debug!("Skipping non UTF-8 name {:?} in {:?}", entry.file_name(), dir);
            continue;
        };

        let Some(file_type) = readable(dir, entry.file_type()) else {
            continue;
        };
        if file_type.is_dir() {
            if name.starts_with('.') {
                debug!("Skipping hidden directory {:?}", entry.path());
            } else {
                subdirs.push(entry.path());
            }
        } else if file_type.is_symlink() {
            if !entry.path().is_dir() {
                filenames.push(name.to_string());
            }
        } else {
            filenames.push(name.to_string());
        }
    }

    filenames.sort();
    subdirs.sort();

    Ok((
        Listing {
            dir: dir.to_path_buf(),
            filenames,
        },
        subdirs,
    ))
}

// One bad entry only costs that entry, not the rest of the directory.
fn readable<T>(dir: &Path, result: io::Result<T>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(e) => {
            warn!("Skipping unreadable entry in {:?}: {}", dir, e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::{self, File};
    use tempfile::TempDir;

    #[test]
    fn test_walk_is_top_down_and_sorted() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        fs::create_dir_all(root.join("b/inner")).unwrap();
        fs::create_dir(root.join("a")).unwrap();
        File::create(root.join("z.mkv")).unwrap();
        File::create(root.join("a.ass")).unwrap();
        File::create(root.join("b/inner/x.ass")).unwrap();

        let listings: Vec<Listing> = walk(root).collect();
        let dirs: Vec<PathBuf> = listings.iter().map(|l| l.dir.clone()).collect();
        assert_eq!(
            dirs,
            vec![
                root.to_path_buf(),
                root.join("a"),
                root.join("b"),
                root.join("b/inner"),
            ]
        );
        assert_eq!(listings[0].filenames, vec!["a.ass", "z.mkv"]);
        assert!(listings[1].filenames.is_empty());
        assert_eq!(listings[3].filenames, vec!["x.ass"]);
    }

    #[test]
    fn test_walk_skips_hidden_directories() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        fs::create_dir_all(root.join(".git/objects")).unwrap();
        fs::create_dir(root.join("Season 1")).unwrap();
        File::create(root.join(".git/S01E01.ass")).unwrap();
        File::create(root.join(".hidden.ass")).unwrap();

        let listings: Vec<Listing> = walk(root).collect();
        assert_eq!(listings.len(), 2);
        assert_eq!(listings[0].filenames, vec![".hidden.ass"]);
        assert_eq!(listings[1].dir, root.join("Season 1"));
    }

    #[test]
    fn test_unreadable_entry_is_skipped() {
        let temp_dir = TempDir::new().unwrap();
        let err = io::Error::new(io::ErrorKind::PermissionDenied, "denied");
        assert_eq!(readable::<u8>(temp_dir.path(), Err(err)), None);
        assert_eq!(readable(temp_dir.path(), Ok(7)), Some(7));
    }

    #[test]
    fn test_walk_of_missing_root_yields_nothing() {
        let temp_dir = TempDir::new().unwrap();
        assert_eq!(walk(&temp_dir.path().join("missing")).count(), 0);
    }
}
