use anyhow::Result;
use clap::{Arg, Command};

use virtual_tv::commands;
use virtual_tv::commands::config::{handle_get, handle_set};

fn data_dir_arg() -> Arg {
    Arg::new("data-dir")
        .long("data-dir")
        .value_name("DIR")
        .help("Directory holding channels.json and library.json (overrides config)")
        .global(true)
}

fn main() -> Result<()> {
    let matches = Command::new("vtv")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Always-on virtual TV channels from your local shows")
        .disable_version_flag(true)
        .arg(
            Arg::new("version")
                .short('V')
                .long("version")
                .help("Print version information")
                .action(clap::ArgAction::SetTrue)
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Show debug logging")
                .action(clap::ArgAction::SetTrue)
                .global(true)
        )
        .arg(data_dir_arg())
        .subcommand(
            Command::new("version")
                .about("Shows version information")
        )
        .subcommand(
            Command::new("status")
                .about("Show what is on air now")
                .arg(
                    Arg::new("channel")
                        .help("Channel id (defaults to every channel)")
                        .index(1)
                )
                .arg(
                    Arg::new("at")
                        .long("at")
                        .value_name("EPOCH_SECS")
                        .help("Compute the schedule at this Unix time instead of now")
                        .value_parser(clap::value_parser!(f64))
                        .allow_negative_numbers(true)
                )
                .arg(
                    Arg::new("json")
                        .long("json")
                        .help("Print the status as JSON")
                        .action(clap::ArgAction::SetTrue)
                )
        )
        .subcommand(
            Command::new("channels")
                .about("Manage channels (use 'vtv channels --help' for subcommands)")
                .subcommand_required(true)
                .arg_required_else_help(true)
                .subcommand(
                    Command::new("list")
                        .about("List all configured channels")
                )
                .subcommand(
                    Command::new("add")
                        .about("Add a channel and rescan its shows")
                        .arg(
                            Arg::new("id")
                                .help("Unique channel id")
                                .required(true)
                                .index(1)
                        )
                        .arg(
                            Arg::new("name")
                                .help("Display name")
                                .required(true)
                                .index(2)
                        )
                        .arg(
                            Arg::new("show")
                                .short('s')
                                .long("show")
                                .value_name("FOLDER")
                                .help("Show root folder (repeatable)")
                                .action(clap::ArgAction::Append)
                        )
                )
                .subcommand(
                    Command::new("remove")
                        .about("Remove a channel and rescan")
                        .arg(
                            Arg::new("id")
                                .help("Channel id to remove")
                                .required(true)
                                .index(1)
                        )
                )
                .subcommand(
                    Command::new("import")
                        .about("Replace all channels from a JSON file and rescan")
                        .arg(
                            Arg::new("file")
                                .help("JSON array of {id, name, shows}")
                                .required(true)
                                .index(1)
                        )
                        .arg(
                            Arg::new("yes")
                                .short('y')
                                .long("yes")
                                .help("Replace existing channels without asking")
                                .action(clap::ArgAction::SetTrue)
                        )
                )
        )
        .subcommand(
            Command::new("scan")
                .about("Rescan show folders and replace the library")
                .arg(
                    Arg::new("roots")
                        .help("Folders to scan (defaults to every channel's shows)")
                        .num_args(0..)
                        .index(1)
                )
        )
        .subcommand(
            Command::new("library")
                .about("List scanned episodes")
                .arg(
                    Arg::new("show")
                        .short('s')
                        .long("show")
                        .value_name("NAME")
                        .help("Only list episodes of this show")
                )
        )
        .subcommand(
            Command::new("set")
                .about("Set configuration values (use 'vtv set --help' for subcommands)")
                .subcommand_required(true)
                .arg_required_else_help(true)
                .subcommand(
                    Command::new("data")
                        .about("Set the data directory")
                        .arg(
                            Arg::new("path")
                                .help("Path to the data directory")
                                .required(true)
                                .index(1)
                        )
                )
                .subcommand(
                    Command::new("ffprobe")
                        .about("Set the ffprobe binary")
                        .arg(
                            Arg::new("path")
                                .help("Path to ffprobe")
                                .required(true)
                                .index(1)
                        )
                )
        )
        .subcommand(
            Command::new("get")
                .about("Get configuration values (use 'vtv get --help' for subcommands)")
                .subcommand_required(true)
                .arg_required_else_help(true)
                .subcommand(
                    Command::new("data")
                        .about("Get the data directory")
                )
                .subcommand(
                    Command::new("ffprobe")
                        .about("Get the ffprobe binary")
                )
        )
        .get_matches();

    if matches.get_flag("version") {
        return commands::version();
    }

    virtual_tv::init_logging(matches.get_flag("verbose"));

    match matches.subcommand() {
        Some(("version", _)) => commands::version()?,
        Some(("status", sub_matches)) => commands::status(sub_matches)?,
        Some(("channels", sub_matches)) => commands::channels::execute(sub_matches)?,
        Some(("scan", sub_matches)) => commands::scan(sub_matches)?,
        Some(("library", sub_matches)) => commands::library(sub_matches)?,
        Some(("set", sub_matches)) => handle_set(sub_matches)?,
        Some(("get", sub_matches)) => handle_get(sub_matches)?,
        _ => {
            println!("Welcome to Virtual TV!");
            println!("Use 'vtv --help' for more information.");
        }
    }

    Ok(())
}
