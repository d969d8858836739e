use anyhow::Result;
use colored::Colorize;
use std::collections::BTreeMap;

use crate::commands::open_station;
use crate::core::Episode;
use crate::ui::format_clock;

pub fn execute(matches: &clap::ArgMatches) -> Result<()> {
    let (station, _config) = open_station(matches)?;
    let library = station.library();
    let show_filter = matches.get_one::<String>("show");

    if library.is_empty() {
        println!(
            "{}",
            "Library is empty. Use 'vtv scan' to scan your show folders.".yellow()
        );
        return Ok(());
    }

    let mut by_show: BTreeMap<&str, Vec<&Episode>> = BTreeMap::new();
    for episode in &library.episodes {
        if show_filter.is_some_and(|filter| !episode.show.eq_ignore_ascii_case(filter)) {
            continue;
        }
        by_show.entry(episode.show.as_str()).or_default().push(episode);
    }

    if by_show.is_empty() {
        println!("{}", "No episodes match that show.".yellow());
        return Ok(());
    }

    let total_secs: f64 = by_show.values().flatten().map(|ep| ep.airtime()).sum();
    let total_count: usize = by_show.values().map(Vec::len).sum();

    println!(
        "{} {}",
        "Library:".white().bold(),
        format!("({} episodes, {})", total_count, format_clock(total_secs)).dimmed()
    );
    println!();

    for (show, episodes) in by_show {
        println!(
            "  {} {} {}",
            "📂".to_string().blue().bold(),
            show.cyan().bold(),
            format!("({})", episodes.len()).dimmed()
        );
        for episode in episodes {
            println!(
                "     {:>9}  {}",
                format_clock(episode.duration).yellow(),
                episode.name
            );
        }
        println!();
    }

    Ok(())
}
