use anyhow::{bail, Context, Result};
use colored::Colorize;
use std::path::{Path, PathBuf};

use crate::commands::resolve_folder;
use crate::core::probe::FfprobeProbe;
use crate::core::store::{CHANNELS_FILE, LIBRARY_FILE};
use crate::core::Config;
use crate::ui::{success, warn};

pub fn handle_set(matches: &clap::ArgMatches) -> Result<()> {
    match matches.subcommand() {
        Some(("data", sub_matches)) => set_data_dir(required_path(sub_matches)?),
        Some(("ffprobe", sub_matches)) => set_ffprobe(required_path(sub_matches)?),
        _ => {
            println!("Use 'vtv set --help' for more information.");
            Ok(())
        }
    }
}

pub fn handle_get(matches: &clap::ArgMatches) -> Result<()> {
    match matches.subcommand() {
        Some(("data", _)) => show_data_dir(),
        Some(("ffprobe", _)) => show_ffprobe(),
        _ => {
            println!("Use 'vtv get --help' for more information.");
            Ok(())
        }
    }
}

fn required_path(matches: &clap::ArgMatches) -> Result<&str> {
    let path = matches
        .get_one::<String>("path")
        .context("Path argument is required")?;

    if path.trim().is_empty() || path.contains('\0') {
        bail!("Invalid path: '{}'", path);
    }

    Ok(path)
}

/// Channels and library live here; the folder is created on first save
fn set_data_dir(path: &str) -> Result<()> {
    let resolved = resolve_folder(path);

    let mut config = Config::load()?;
    config.set_data_dir(resolved.clone());
    config.save()?;

    success(&format!("Data directory set to {}", resolved));
    Ok(())
}

/// Accepts a file path or a bare program name found on PATH
fn set_ffprobe(path: &str) -> Result<()> {
    let binary = match which::which(path) {
        Ok(found) => found.canonicalize().unwrap_or(found),
        Err(_) => {
            warn(&format!("'{}' is not an executable ffprobe; scans will skip every file until it is", path));
            PathBuf::from(path)
        }
    };
    let binary = binary.to_string_lossy().to_string();

    let mut config = Config::load()?;
    config.set_ffprobe_path(binary.clone());
    config.save()?;

    success(&format!("ffprobe set to {}", binary));
    Ok(())
}

fn show_data_dir() -> Result<()> {
    let config = Config::load()?;
    let data_dir = config.resolve_data_dir()?;

    let label = if config.get_data_dir().is_some() {
        "Data directory:"
    } else {
        "Data directory (default):"
    };
    println!("{}", label.white());
    println!("{}", data_dir.to_string_lossy().cyan().bold());

    for file in [CHANNELS_FILE, LIBRARY_FILE] {
        let state = if data_dir.join(file).exists() {
            "present".green()
        } else {
            "not created yet".dimmed()
        };
        println!("  {} {}", file, state);
    }

    Ok(())
}

fn show_ffprobe() -> Result<()> {
    let config = Config::load()?;
    let probe = FfprobeProbe::from_config(&config);

    match config.get_ffprobe_path() {
        Some(path) => {
            println!("{}", "ffprobe (configured):".white());
            println!("{}", path.cyan().bold());
            if !Path::new(path).is_file() {
                warn("the configured binary does not exist");
            }
        }
        None if probe.binary().is_absolute() => {
            println!("{}", "ffprobe (found on PATH):".white());
            println!("{}", probe.binary().to_string_lossy().cyan().bold());
        }
        None => {
            warn("ffprobe is not configured and was not found on PATH; scans will skip every file");
            println!();
            println!("{}", "Install ffmpeg, or point vtv at a binary:".white());
            println!("  {}", "vtv set ffprobe /usr/local/bin/ffprobe".cyan().bold());
        }
    }

    println!(
        "{} {}s",
        "Per-file timeout:".dimmed(),
        probe.timeout().as_secs()
    );

    Ok(())
}
