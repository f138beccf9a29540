use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;
use std::fmt;

/// Prefix shared by every version macro in polytracker.h.
pub const MACRO_PREFIX: &str = "POLYTRACKER_VERSION_";

static DEFINE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*#define\s+POLYTRACKER_VERSION_([A-Za-z_0-9]+)\s+(\S+)\s*$").unwrap()
});

// `\r\n`, lone `\r` and `\n` all end a line.
static LINE_BREAK_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\r\n|\r|\n").unwrap());

/// The macro names the extractor understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MacroName {
    Major,
    Minor,
    Revision,
    Suffix,
}

impl MacroName {
    /// Required fields, in the order they are validated.
    pub const REQUIRED: [MacroName; 3] = [MacroName::Major, MacroName::Minor, MacroName::Revision];

    /// Map the text after `POLYTRACKER_VERSION_` to a known name.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "MAJOR" => Some(MacroName::Major),
            "MINOR" => Some(MacroName::Minor),
            "REVISION" => Some(MacroName::Revision),
            "SUFFIX" => Some(MacroName::Suffix),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MacroName::Major => "MAJOR",
            MacroName::Minor => "MINOR",
            MacroName::Revision => "REVISION",
            MacroName::Suffix => "SUFFIX",
        }
    }
}

impl fmt::Display for MacroName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raw macro values keyed by name, as found in the header.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawMacroTable {
    values: HashMap<MacroName, String>,
}

impl RawMacroTable {
    pub fn get(&self, name: MacroName) -> Option<&str> {
        self.values.get(&name).map(String::as_str)
    }

    /// Store a value. Returns true if the name was already present.
    pub fn insert(&mut self, name: MacroName, value: impl Into<String>) -> bool {
        self.values.insert(name, value.into()).is_some()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// A non-fatal finding from a scan. Line numbers are 1-based.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanWarning {
    UnrecognizedMacro { name: String, line: usize },
    DuplicateMacro { name: MacroName, line: usize },
}

impl ScanWarning {
    pub fn line(&self) -> usize {
        match self {
            ScanWarning::UnrecognizedMacro { line, .. }
            | ScanWarning::DuplicateMacro { line, .. } => *line,
        }
    }
}

impl fmt::Display for ScanWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScanWarning::UnrecognizedMacro { name, line } => write!(
                f,
                "Ignoring unexpected #define for \"{}{}\" on line {}",
                MACRO_PREFIX, name, line
            ),
            ScanWarning::DuplicateMacro { name, line } => write!(
                f,
                "#define {}{} on line {} overrides an earlier definition",
                MACRO_PREFIX, name, line
            ),
        }
    }
}

/// Result of scanning one header.
#[derive(Debug, Clone, Default)]
pub struct ScanReport {
    pub table: RawMacroTable,
    pub warnings: Vec<ScanWarning>,
}

/// Scan header text for `#define POLYTRACKER_VERSION_*` lines.
///
/// Non-matching lines are skipped. A repeated name keeps the last value.
pub fn scan_macros(contents: &str) -> ScanReport {
    let mut report = ScanReport::default();

    for (idx, line) in LINE_BREAK_RE.split(contents).enumerate() {
        let line_no = idx + 1;
        let Some(caps) = DEFINE_RE.captures(line) else {
            continue;
        };

        let raw_name = &caps[1];
        let value = &caps[2];

        match MacroName::parse(raw_name) {
            Some(name) => {
                if report.table.insert(name, value) {
                    report.warnings.push(ScanWarning::DuplicateMacro { name, line: line_no });
                }
            }
            None => report.warnings.push(ScanWarning::UnrecognizedMacro {
                name: raw_name.to_string(),
                line: line_no,
            }),
        }
    }

    report
}
