use clap::{ArgAction, Parser};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "sub-renamer")]
#[command(about = "Rename subtitle files after the video files they share an SxxEyy marker with")]
pub struct Cli {
    /// Directory to start from; subdirectories are processed too, hidden ones excepted
    #[arg(default_value = ".")]
    pub root: PathBuf,

    /// Video file extension (default: mkv)
    #[arg(long = "video-ext")]
    pub video_ext: Option<String>,

    /// Subtitle file extension (default: ass)
    #[arg(long = "subtitle-ext")]
    pub subtitle_ext: Option<String>,

    /// Report what would be renamed without touching any file
    #[arg(long)]
    pub dry_run: bool,

    /// More log output (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}
