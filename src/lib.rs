//! Extract the PolyTracker version from the `POLYTRACKER_VERSION_*` macros in
//! `include/polytracker/polytracker.h`.

pub mod cli;
pub mod config;
pub mod extract;
pub mod header;
pub mod logging;
pub mod record;
pub mod version;

/// Re-export commonly used items
pub use extract::{
    extract_from_file, extract_from_str, extract_version, version_string, Extraction, VersionError,
};
pub use record::VersionRecord;
pub use version::VERSION;
