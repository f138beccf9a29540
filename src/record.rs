use serde::Serialize;
use std::fmt;
use std::num::IntErrorKind;
use std::path::Path;

use crate::extract::VersionError;
use crate::header::{MacroName, RawMacroTable};

/// A validated PolyTracker version.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VersionRecord {
    pub major: u64,
    pub minor: u64,
    pub revision: u64,
    pub suffix: Option<String>,
}

impl VersionRecord {
    /// Validate the required fields and normalize the suffix.
    ///
    /// `path` only appears in error messages.
    pub fn from_table(table: &RawMacroTable, path: &Path) -> Result<Self, VersionError> {
        let mut required = [0u64; 3];
        for (slot, name) in required.iter_mut().zip(MacroName::REQUIRED) {
            *slot = required_field(table, name, path)?;
        }
        let [major, minor, revision] = required;

        Ok(Self {
            major,
            minor,
            revision,
            suffix: table.get(MacroName::Suffix).and_then(normalize_suffix),
        })
    }

    /// `major.minor.revision`, followed directly by the suffix if any.
    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for VersionRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.revision)?;
        if let Some(suffix) = &self.suffix {
            f.write_str(suffix)?;
        }
        Ok(())
    }
}

fn required_field(
    table: &RawMacroTable,
    name: MacroName,
    path: &Path,
) -> Result<u64, VersionError> {
    let raw = table.get(name).ok_or_else(|| VersionError::MissingMacro {
        name,
        path: path.to_path_buf(),
    })?;
    raw.trim().parse::<u64>().map_err(|err| match err.kind() {
        IntErrorKind::PosOverflow => VersionError::OutOfRange {
            name,
            value: raw.to_string(),
            path: path.to_path_buf(),
        },
        _ => VersionError::NotAnInteger {
            name,
            value: raw.to_string(),
            path: path.to_path_buf(),
        },
    })
}

/// Strip whitespace and one pair of surrounding double quotes.
/// Empty and quote-only values mean "no suffix".
pub fn normalize_suffix(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    let unquoted = if trimmed == "\"" {
        ""
    } else if trimmed.len() >= 2 && trimmed.starts_with('"') && trimmed.ends_with('"') {
        &trimmed[1..trimmed.len() - 1]
    } else {
        trimmed
    };

    if unquoted.is_empty() {
        None
    } else {
        Some(unquoted.to_string())
    }
}
