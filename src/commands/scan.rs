use anyhow::Result;
use colored::Colorize;

use crate::commands::{open_station, resolve_folder, runtime};
use crate::core::station::ScanStatus;
use crate::ui::format_time;

pub fn execute(matches: &clap::ArgMatches) -> Result<()> {
    let (station, _config) = open_station(matches)?;

    let roots: Vec<String> = matches
        .get_many::<String>("roots")
        .map(|values| values.map(|root| resolve_folder(root)).collect())
        .unwrap_or_default();

    if roots.is_empty() && station.list_channels().is_empty() {
        println!(
            "{}",
            "No channels configured and no folders given; nothing to scan.".yellow()
        );
        return Ok(());
    }

    println!("{}", "Scanning library...".cyan());

    let rt = runtime()?;
    let status = rt.block_on(async {
        let ticket = if roots.is_empty() {
            station.rescan_all()?
        } else {
            station.scan(roots)?
        };
        log::debug!("Scan request: {:?}", ticket);
        Ok::<_, anyhow::Error>(station.wait_for_scans().await)
    })?;

    print_summary(&status);
    Ok(())
}

/// Print the outcome of the most recent scan
pub(crate) fn print_summary(status: &ScanStatus) {
    let Some(last) = &status.last else {
        println!("{}", "No scan has completed.".yellow());
        return;
    };

    println!();
    if let Some(error) = &last.error {
        println!("{} {}", "Scan failed to save:".red().bold(), error.red());
        return;
    }

    println!(
        "{} {} from {}",
        "✓ Library updated:".green().bold(),
        format!("{} episode(s)", last.episodes).yellow().bold(),
        format!("{} folder(s)", last.roots).cyan()
    );

    if last.skipped > 0 {
        println!(
            "{} {}",
            "Skipped:".yellow().bold(),
            format!("{} file(s) could not be probed (run with -v for details)", last.skipped).yellow()
        );
    }

    println!("{} {}", "Finished:".dimmed(), format_time(last.finished_at).dimmed());
}
