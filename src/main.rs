mod cli;
mod config;
mod domain;
mod error;
mod infra;
mod workflows;

use anyhow::{bail, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use cli::Cli;
use infra::fs::{DryRunFs, LocalFs};
use workflows::{matcher, report};

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    if !cli.root.is_dir() {
        bail!(
            "Start directory does not exist or is not a directory: {:?}",
            cli.root
        );
    }

    let settings = config::load_settings(cli.video_ext, cli.subtitle_ext)?;
    info!(
        "Renaming .{} files after .{} files under {:?}{}",
        settings.subtitle_extension,
        settings.video_extension,
        cli.root,
        if cli.dry_run { " (dry run)" } else { "" }
    );

    let total = if cli.dry_run {
        matcher::rename_tree(&cli.root, &settings, &DryRunFs::default())
    } else {
        matcher::rename_tree(&cli.root, &settings, &LocalFs)
    };

    report::log_totals(&total);
    Ok(())
}

fn init_logging(verbose: u8) {
    let default_filter = match verbose {
        0 => "sub_renamer=info",
        1 => "sub_renamer=debug",
        _ => "sub_renamer=trace",
    };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into()))
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();
}
