// Progress bar rendering for episode playback position

use colored::Colorize;

const BAR_LENGTH: usize = 30;

/// Render a progress bar for `elapsed` out of `total`
///
/// # Arguments
/// * `elapsed` - Seconds already played
/// * `total` - Full length in seconds
pub fn render_progress_bar(elapsed: f64, total: f64) -> String {
    let ratio = if total > 0.0 && elapsed.is_finite() {
        (elapsed / total).clamp(0.0, 1.0)
    } else {
        0.0
    };

    let filled = (ratio * BAR_LENGTH as f64) as usize;
    let empty = BAR_LENGTH.saturating_sub(filled);
    let percentage = (ratio * 100.0) as usize;

    format!(
        "[{}{}] {}%",
        "=".repeat(filled).green(),
        " ".repeat(empty),
        percentage
    )
}
