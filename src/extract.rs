use once_cell::sync::OnceCell;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};

use crate::header::{self, MacroName, ScanWarning};
use crate::record::VersionRecord;

#[derive(Error, Debug)]
pub enum VersionError {
    #[error("Error loading polytracker.h!\nIt was expected to be here:\n{}", .path.display())]
    HeaderNotFound { path: PathBuf },
    #[error("Error: #define POLYTRACKER_VERSION_{name} not found in {}", .path.display())]
    MissingMacro { name: MacroName, path: PathBuf },
    #[error("Error: POLYTRACKER_VERSION_{name} in {} is not an integer!", .path.display())]
    NotAnInteger { name: MacroName, value: String, path: PathBuf },
    #[error(
        "Error: POLYTRACKER_VERSION_{name} in {} is out of range (maximum {})!",
        .path.display(),
        u64::MAX
    )]
    OutOfRange { name: MacroName, value: String, path: PathBuf },
    #[error("Error reading {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// A successful extraction plus whatever the scan complained about.
#[derive(Debug, Clone)]
pub struct Extraction {
    pub record: VersionRecord,
    pub warnings: Vec<ScanWarning>,
}

impl Extraction {
    pub fn version_string(&self) -> String {
        self.record.render()
    }
}

/// Scan and validate header text already in memory.
pub fn extract_from_str(contents: &str, path: &Path) -> Result<Extraction, VersionError> {
    let report = header::scan_macros(contents);
    debug!("Found {} version macro(s) in {}", report.table.len(), path.display());
    let record = VersionRecord::from_table(&report.table, path)?;
    Ok(Extraction { record, warnings: report.warnings })
}

/// Read a header file and extract its version. Warnings are logged.
pub fn extract_from_file(path: &Path) -> Result<Extraction, VersionError> {
    header::ensure_header_exists(path)?;
    let contents = std::fs::read_to_string(path).map_err(|source| VersionError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let extraction = extract_from_str(&contents, path)?;
    for warning in &extraction.warnings {
        warn!("{} of {}", warning, path.display());
    }
    Ok(extraction)
}

/// Locate the header under `package_root` and extract its version.
pub fn extract_version(package_root: &Path) -> Result<Extraction, VersionError> {
    let path = header::locate_header(package_root)?;
    extract_from_file(&path)
}

static VERSION_STRING: OnceCell<Result<String, VersionError>> = OnceCell::new();

/// The version string for this process, computed on first use from the
/// package root resolved out of the environment. The first outcome sticks.
pub fn version_string() -> Result<&'static str, &'static VersionError> {
    VERSION_STRING
        .get_or_init(|| {
            let root = crate::config::resolve_package_root(None);
            extract_version(&root).map(|extraction| extraction.version_string())
        })
        .as_deref()
}
