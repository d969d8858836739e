// Console messages and confirmation prompts

use colored::Colorize;
use std::io::{self, Write};

/// Ask a yes/no question; anything but "y"/"yes" declines
pub fn confirm(message: &str) -> io::Result<bool> {
    print!("{} {} ", message.white().bold(), "[y/N]".dimmed());
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;

    let response = input.trim().to_lowercase();
    Ok(response == "y" || response == "yes")
}

pub fn warn(message: &str) {
    println!("{}", format!("⚠️  Warning: {}", message).yellow());
}

pub fn success(message: &str) {
    println!("{}", format!("✓ {}", message).green());
}
