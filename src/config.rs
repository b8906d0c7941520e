use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

const VIDEO_EXT_VAR: &str = "SUB_RENAMER_VIDEO_EXT";
const SUBTITLE_EXT_VAR: &str = "SUB_RENAMER_SUBTITLE_EXT";
const DEFAULT_VIDEO_EXT: &str = "mkv";
const DEFAULT_SUBTITLE_EXT: &str = "ass";

#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    video_extension: Option<String>,
    subtitle_extension: Option<String>,
}

/// Extensions are stored lower case without the leading dot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub video_extension: String,
    pub subtitle_extension: String,
}

/// Resolves settings from, in order of precedence: command-line flags,
/// environment variables, `$XDG_CONFIG_HOME/sub-renamer/config.toml`, defaults.
pub fn load_settings(video_flag: Option<String>, subtitle_flag: Option<String>) -> Result<Settings> {
    let config_path = get_config_path();
    debug!("Using config path: {}", config_path.display());
    let file = read_config_file(&config_path)?;

    let video = video_flag
        .or_else(|| env::var(VIDEO_EXT_VAR).ok())
        .or(file.video_extension)
        .unwrap_or_else(|| DEFAULT_VIDEO_EXT.to_string());
    let subtitle = subtitle_flag
        .or_else(|| env::var(SUBTITLE_EXT_VAR).ok())
        .or(file.subtitle_extension)
        .unwrap_or_else(|| DEFAULT_SUBTITLE_EXT.to_string());

    Ok(Settings {
        video_extension: normalize_extension(&video).context("invalid video extension")?,
        subtitle_extension: normalize_extension(&subtitle)
            .context("invalid subtitle extension")?,
    })
}

fn read_config_file(path: &Path) -> Result<ConfigFile> {
    if !path.exists() {
        return Ok(ConfigFile::default());
    }
    let content = fs::read_to_string(path)
        .with_context(|| format!("failed to read config file {}", path.display()))?;
    toml::from_str(&content)
        .with_context(|| format!("failed to parse config file {}", path.display()))
}

fn normalize_extension(raw: &str) -> Result<String> {
    let ext = raw.trim().trim_start_matches('.').to_lowercase();
    if ext.is_empty() {
        bail!("extension {raw:?} is empty");
    }
    if ext.contains(['/', '\\']) {
        bail!("extension {raw:?} contains a path separator");
    }
    if ext.contains('.') {
        bail!("extension {raw:?} has more than one part; only the final extension is matched");
    }
    Ok(ext)
}

fn get_config_dir_path() -> PathBuf {
    xdir::config()
        .map(|path| path.join("sub-renamer"))
        // If the standard path could not be found (e.g.`$HOME` is not set),
        // default to the current directory.
        .unwrap_or_default()
}

fn get_config_path() -> PathBuf {
    get_config_dir_path().join("config.toml")
}
