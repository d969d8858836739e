use anyhow::{Context, Result};
use colored::Colorize;

use crate::commands::open_station;
use crate::core::scheduler::wall_clock_secs;
use crate::core::PlayingStatus;
use crate::ui::{format_clock, format_instant, render_progress_bar};

pub fn execute(matches: &clap::ArgMatches) -> Result<()> {
    let (station, _config) = open_station(matches)?;

    let now = matches
        .get_one::<f64>("at")
        .copied()
        .unwrap_or_else(wall_clock_secs);
    let as_json = matches.get_flag("json");

    match matches.get_one::<String>("channel") {
        Some(channel_id) => {
            let status = station.compute_playing_at(channel_id, now);

            if as_json {
                let json = serde_json::to_string_pretty(&status)
                    .context("Failed to serialize status")?;
                println!("{}", json);
                return Ok(());
            }

            print_header(now);
            match status {
                Some(status) => print_status(channel_id, &status),
                None => print_off_air(channel_id),
            }
        }
        None => {
            let statuses = station.compute_all_playing_at(now);

            if as_json {
                let json = serde_json::to_string_pretty(&statuses)
                    .context("Failed to serialize statuses")?;
                println!("{}", json);
                return Ok(());
            }

            if statuses.is_empty() {
                println!(
                    "{}",
                    "No channels configured. Use 'vtv channels add' to create one.".yellow()
                );
                return Ok(());
            }

            print_header(now);
            for (channel_id, status) in &statuses {
                match status {
                    Some(status) => print_status(channel_id, status),
                    None => print_off_air(channel_id),
                }
            }
        }
    }

    Ok(())
}

fn print_header(now: f64) {
    println!(
        "{} {}",
        "On air at".white().bold(),
        format_instant(now).dimmed()
    );
    println!();
}

fn print_status(channel_id: &str, status: &PlayingStatus) {
    println!(
        "  {} {} {}",
        "📺".to_string().blue().bold(),
        status.channel.cyan().bold(),
        format!("({})", channel_id).dimmed()
    );
    println!(
        "     {} {}",
        status.episode.name.white().bold(),
        format!("· {}", status.episode.show).dimmed()
    );
    println!(
        "     {} {} / {}  {} {}",
        render_progress_bar(status.elapsed, status.total),
        format_clock(status.elapsed).yellow(),
        format_clock(status.total),
        "next in".dimmed(),
        format_clock(status.next_in).green()
    );
    println!();
}

fn print_off_air(channel_id: &str) {
    println!(
        "  {} {} {}",
        "📺".to_string().dimmed(),
        channel_id.dimmed(),
        "off air (unknown channel or nothing scanned yet)".yellow()
    );
    println!();
}
