use anyhow::{bail, Context, Result};
use colored::Colorize;
use std::fs;

use crate::commands::{open_station, resolve_folder, runtime, scan::print_summary};
use crate::core::{Channel, Station};
use crate::ui::{confirm, success};

pub fn execute(matches: &clap::ArgMatches) -> Result<()> {
    match matches.subcommand() {
        Some(("list", sub_matches)) => list_channels(sub_matches),
        Some(("add", sub_matches)) => add_channel(sub_matches),
        Some(("remove", sub_matches)) => remove_channel(sub_matches),
        Some(("import", sub_matches)) => import_channels(sub_matches),
        _ => {
            println!("Use 'vtv channels --help' for more information.");
            Ok(())
        }
    }
}

fn list_channels(matches: &clap::ArgMatches) -> Result<()> {
    let (station, _config) = open_station(matches)?;
    let channels = station.list_channels();

    if channels.is_empty() {
        println!(
            "{}",
            "No channels found. Use 'vtv channels add' to create one.".yellow()
        );
        return Ok(());
    }

    println!(
        "{} {}",
        "Channels:".white().bold(),
        format!("({} total)", channels.len()).dimmed()
    );
    println!();

    for channel in channels {
        println!(
            "  {} {} {}",
            "📺".to_string().blue().bold(),
            channel.name.cyan().bold(),
            format!("({})", channel.id).dimmed()
        );
        for show in &channel.shows {
            println!("     {}", show.dimmed());
        }
    }

    Ok(())
}

fn add_channel(matches: &clap::ArgMatches) -> Result<()> {
    let id = matches
        .get_one::<String>("id")
        .context("Channel id is required")?;
    let name = matches
        .get_one::<String>("name")
        .context("Channel name is required")?;
    let shows: Vec<String> = matches
        .get_many::<String>("show")
        .map(|values| values.map(|s| resolve_folder(s)).collect())
        .unwrap_or_default();

    let (station, _config) = open_station(matches)?;
    let mut channels = station.list_channels();

    if channels.iter().any(|c| &c.id == id) {
        bail!("A channel with id '{}' already exists", id);
    }

    channels.push(Channel::new(id.clone(), name.clone(), shows));
    println!("{} {}", "✓ Added channel".green(), name.cyan().bold());

    save_and_scan(&station, channels)
}

fn remove_channel(matches: &clap::ArgMatches) -> Result<()> {
    let id = matches
        .get_one::<String>("id")
        .context("Channel id is required")?;

    let (station, _config) = open_station(matches)?;
    let mut channels = station.list_channels();
    let before = channels.len();
    channels.retain(|c| &c.id != id);

    if channels.len() == before {
        println!("{}", format!("No channel with id '{}'", id).yellow());
        return Ok(());
    }

    success(&format!("Removed channel {}", id));
    save_and_scan(&station, channels)
}

fn import_channels(matches: &clap::ArgMatches) -> Result<()> {
    let file = matches
        .get_one::<String>("file")
        .context("File argument is required")?;

    let data = fs::read_to_string(file)
        .with_context(|| format!("Failed to read channel file: {}", file))?;
    let channels: Vec<Channel> = serde_json::from_str(&data)
        .with_context(|| format!("Invalid channel list in {}", file))?;

    let (station, _config) = open_station(matches)?;
    let existing = station.list_channels().len();

    if existing > 0 && !matches.get_flag("yes") {
        let prompt = format!("Replace {} existing channel(s)?", existing);
        if !confirm(&prompt)? {
            println!("{}", "Import cancelled.".yellow());
            return Ok(());
        }
    }

    success(&format!("Imported {} channel(s)", channels.len()));

    save_and_scan(&station, channels)
}

/// Persist the channel list, then wait for the rescan it triggers
fn save_and_scan(station: &Station, channels: Vec<Channel>) -> Result<()> {
    println!("{}", "Rescanning show folders...".cyan());

    let rt = runtime()?;
    let status = rt.block_on(async {
        station.set_channels(channels)?;
        Ok::<_, anyhow::Error>(station.wait_for_scans().await)
    })?;

    print_summary(&status);
    Ok(())
}
