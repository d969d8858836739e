// Core business logic module

pub mod config;
pub mod model;
pub mod path_matcher;
pub mod probe;
pub mod scanner;
pub mod scheduler;
pub mod station;
pub mod store;

// Re-export commonly used items
pub use config::Config;
pub use model::{Channel, Episode, Library, PlayingStatus};
pub use path_matcher::MatchMode;
pub use probe::{DurationProbe, FfprobeProbe};
pub use scanner::{LibraryScanner, ScanReport};
pub use station::{ScanStatus, ScanTicket, Station};
pub use store::{ChannelStore, JsonChannelStore, JsonLibraryStore, LibraryStore};
