// Terminal output helpers

pub mod formatters;
pub mod progress;
pub mod prompts;

pub use formatters::{format_clock, format_instant, format_time};
pub use progress::render_progress_bar;
pub use prompts::{confirm, success, warn};
