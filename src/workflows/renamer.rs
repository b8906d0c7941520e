use std::path::Path;

use crate::error::RenameError;
use crate::infra::fs::FileSystem;

/// The name a subtitle should carry: the video's stem with the subtitle's
/// own extension in lower case.
pub fn target_filename(video_stem: &str, subtitle_extension: &str) -> String {
    format!("{video_stem}.{}", subtitle_extension.to_lowercase())
}

/// Renames `old_path` to `new_path` unless some other file already sits at
/// `new_path`. Existing files are never overwritten.
pub fn rename_file<F: FileSystem + ?Sized>(
    fs: &F,
    old_path: &Path,
    new_path: &Path,
) -> Result<(), RenameError> {
    if fs.exists(new_path) && new_path != old_path {
        return Err(RenameError::TargetExists(new_path.to_path_buf()));
    }

    fs.rename(old_path, new_path).map_err(|source| RenameError::Io {
        from: old_path.to_path_buf(),
        to: new_path.to_path_buf(),
        source,
    })
}
