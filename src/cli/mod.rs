use clap::{Parser, Subcommand};
use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;
use thiserror::Error;

use crate::config::ExtractorConfig;
use crate::extract::{extract_from_file, extract_version, Extraction, VersionError};
use crate::logging::init_logging;

#[derive(Parser, Debug)]
#[command(
    name = "polytracker-version",
    version,
    about = "Print the PolyTracker version declared in polytracker.h"
)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Directory containing include/polytracker/polytracker.h
    #[arg(long, global = true, value_name = "DIR")]
    pub package_root: Option<PathBuf>,

    /// Read this header instead of the one under the package root
    #[arg(long, global = true, value_name = "FILE", conflicts_with = "package_root")]
    pub header: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    /// Print the version string (default)
    Show,
    /// Print the individual version components
    Components {
        /// Emit JSON instead of key/value lines
        #[arg(long)]
        json: bool,
    },
    /// Validate the header without printing anything
    Check,
    /// Show version information for this tool
    Version,
}

#[derive(Error, Debug)]
pub enum CliError {
    #[error(transparent)]
    Version(#[from] VersionError),
    #[error("failed to encode JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("failed to write output: {0}")]
    Io(#[from] std::io::Error),
}

/// Run the CLI application.
pub fn run() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let stdout = std::io::stdout();
    match execute(&cli, &mut stdout.lock()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{}\n", err);
            ExitCode::FAILURE
        }
    }
}

/// Execute a parsed command line, writing results to `out`.
pub fn execute(cli: &Cli, out: &mut impl Write) -> Result<(), CliError> {
    match cli.command.as_ref().unwrap_or(&Commands::Show) {
        Commands::Version => {
            writeln!(out, "polytracker-version {}", crate::VERSION)?;
        }
        Commands::Show => {
            let extraction = load(cli)?;
            writeln!(out, "{}", extraction.record)?;
        }
        Commands::Components { json } => {
            let record = load(cli)?.record;
            if *json {
                writeln!(out, "{}", serde_json::to_string_pretty(&record)?)?;
            } else {
                writeln!(out, "major={}", record.major)?;
                writeln!(out, "minor={}", record.minor)?;
                writeln!(out, "revision={}", record.revision)?;
                writeln!(out, "suffix={}", record.suffix.as_deref().unwrap_or(""))?;
            }
        }
        Commands::Check => {
            load(cli)?;
        }
    }
    Ok(())
}

fn load(cli: &Cli) -> Result<Extraction, VersionError> {
    match &cli.header {
        Some(header) => extract_from_file(header),
        None => {
            let config = ExtractorConfig::resolve(cli.package_root.as_deref());
            extract_version(&config.package_root)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn package(contents: &str) -> TempDir {
        let dir = TempDir::new().unwrap();
        let path = crate::header::header_path(dir.path());
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, contents).unwrap();
        dir
    }

    fn parse(args: &[&str]) -> Result<Cli, clap::Error> {
        Cli::try_parse_from(std::iter::once("polytracker-version").chain(args.iter().copied()))
    }

    fn run_with(args: &[&str]) -> Result<String, CliError> {
        let cli = parse(args).unwrap();
        let mut out = Vec::new();
        execute(&cli, &mut out)?;
        Ok(String::from_utf8(out).unwrap())
    }

    const HEADER: &str = "#define POLYTRACKER_VERSION_MAJOR 4\n\
                          #define POLYTRACKER_VERSION_MINOR 0\n\
                          #define POLYTRACKER_VERSION_REVISION 2\n\
                          #define POLYTRACKER_VERSION_SUFFIX \"-rc1\"\n";

    #[test]
    fn defaults_to_show() {
        let cli = parse(&[]).unwrap();
        assert!(cli.command.is_none());
        assert!(!cli.verbose);
    }

    #[test]
    fn parses_global_flags_after_subcommand() {
        let cli = parse(&["components", "--json", "--package-root", "/opt/pt", "-v"]).unwrap();
        assert_eq!(cli.command, Some(Commands::Components { json: true }));
        assert_eq!(cli.package_root, Some(PathBuf::from("/opt/pt")));
        assert!(cli.verbose);
    }

    #[test]
    fn header_and_package_root_conflict() {
        let result = parse(&["--header", "a.h", "--package-root", "/opt"]);
        assert!(result.is_err());
    }

    #[test]
    fn show_prints_version_string() {
        let dir = package(HEADER);
        let root = dir.path().to_str().unwrap();
        assert_eq!(run_with(&["--package-root", root]).unwrap(), "4.0.2-rc1\n");
        assert_eq!(run_with(&["show", "--package-root", root]).unwrap(), "4.0.2-rc1\n");
    }

    #[test]
    fn header_flag_reads_file_directly() {
        let dir = TempDir::new().unwrap();
        let header = dir.path().join("custom.h");
        std::fs::write(&header, HEADER).unwrap();
        let out = run_with(&["--header", header.to_str().unwrap()]).unwrap();
        assert_eq!(out, "4.0.2-rc1\n");
    }

    #[test]
    fn components_as_lines_and_json() {
        let dir = package(HEADER);
        let root = dir.path().to_str().unwrap();

        let lines = run_with(&["components", "--package-root", root]).unwrap();
        assert_eq!(lines, "major=4\nminor=0\nrevision=2\nsuffix=-rc1\n");

        let json = run_with(&["components", "--json", "--package-root", root]).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["major"], 4);
        assert_eq!(value["suffix"], "-rc1");
    }

    #[test]
    fn check_is_silent_on_success() {
        let dir = package(HEADER);
        let root = dir.path().to_str().unwrap();
        let out = run_with(&["check", "--package-root", root]).unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn check_fails_on_missing_header() {
        let dir = TempDir::new().unwrap();
        let root = dir.path().to_str().unwrap();
        let err = run_with(&["check", "--package-root", root]).unwrap_err();
        assert!(matches!(err, CliError::Version(VersionError::HeaderNotFound { .. })));
        assert!(err.to_string().starts_with("Error loading polytracker.h!"));
    }

    #[test]
    fn version_subcommand_does_not_need_header() {
        let out = run_with(&["version", "--package-root", "/nonexistent"]).unwrap();
        assert_eq!(out, format!("polytracker-version {}\n", crate::VERSION));
    }
}
