pub mod scan;

use std::path::{Path, PathBuf};
use tracing::debug;

use crate::extract::VersionError;
pub use scan::{scan_macros, MacroName, RawMacroTable, ScanReport, ScanWarning};

/// Location of the header relative to the package root.
pub const HEADER_SUBPATH: [&str; 3] = ["include", "polytracker", "polytracker.h"];

/// Build `<package_root>/include/polytracker/polytracker.h`.
pub fn header_path(package_root: &Path) -> PathBuf {
    HEADER_SUBPATH.iter().fold(package_root.to_path_buf(), |acc, part| acc.join(part))
}

/// Resolve the header under `package_root`, failing if it is not a file.
pub fn locate_header(package_root: &Path) -> Result<PathBuf, VersionError> {
    let path = header_path(package_root);
    ensure_header_exists(&path)?;
    Ok(path)
}

pub(crate) fn ensure_header_exists(path: &Path) -> Result<(), VersionError> {
    if !path.is_file() {
        return Err(VersionError::HeaderNotFound { path: path.to_path_buf() });
    }
    debug!("Using header {}", path.display());
    Ok(())
}
