//! editor-panel - A terminal host for the editor panel module.
//!
//! # Usage
//!
//! ```bash
//! editor-panel
//! editor-panel --settings notes.json --dark
//! editor-panel --theme-marker ~/.theme --save
//! ```

use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use editor_panel::config::{
    ConfigFlags, clear_config_flags, default_settings_path, global_config_path, load_config_flags,
    local_override_path, parse_flag_tokens, save_config_flags,
};
use editor_panel::host::Host;

/// A terminal host for the editor panel module
#[derive(Parser, Debug)]
#[command(name = "editor-panel", version, about, long_about = None)]
struct Cli {
    /// JSON file holding the module settings
    #[arg(long, value_name = "PATH")]
    settings: Option<PathBuf>,

    /// Start with the dark marker set
    #[arg(long)]
    dark: bool,

    /// File whose content ("dark" or anything else) drives the dark marker
    #[arg(long, value_name = "PATH")]
    theme_marker: Option<PathBuf>,

    /// Write log output to a file (RUST_LOG selects the level)
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,

    /// Save current command-line flags as defaults
    #[arg(long)]
    save: bool,

    /// Clear saved defaults
    #[arg(long)]
    clear: bool,
}

/// The terminal belongs to the UI, so logs only go to a file.
fn init_logging(log_file: Option<&Path>) -> Result<()> {
    let Some(path) = log_file else {
        return Ok(());
    };
    let file = File::create(path)
        .with_context(|| format!("Failed to create log file {}", path.display()))?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(tracing::Level::WARN.into())
                .from_env_lossy(),
        )
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();
    Ok(())
}

fn main() -> Result<()> {
    let raw_args = std::env::args().collect::<Vec<_>>();
    let cli = Cli::parse();
    let global_path = global_config_path();
    let local_path = local_override_path();
    let cli_flags = parse_flag_tokens(&raw_args);

    if cli.clear {
        clear_config_flags(&global_path)?;
    }
    if cli.save {
        save_config_flags(&global_path, &cli_flags)?;
    }

    let file_flags = if cli.clear {
        ConfigFlags::default()
    } else {
        let global_flags = load_config_flags(&global_path)?;
        let local_flags = load_config_flags(&local_path)?;
        global_flags.union(&local_flags)
    };
    let effective = file_flags.union(&cli_flags);

    init_logging(effective.log_file.as_deref())?;
    tracing::debug!(?effective, "effective configuration");

    let settings_path = effective.settings.unwrap_or_else(default_settings_path);
    Host::new(settings_path)
        .with_dark(effective.dark)
        .with_theme_marker(effective.theme_marker)
        .run()
        .context("Application error")
}
