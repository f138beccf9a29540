use std::path::{Path, PathBuf};

use crate::header::header_path;

/// Environment variable that overrides the package root.
pub const PACKAGE_ROOT_ENV: &str = "POLYTRACKER_PACKAGE_ROOT";

/// Where to look for the PolyTracker header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractorConfig {
    pub package_root: PathBuf,
}

impl ExtractorConfig {
    /// Build a config from an optional command-line root, falling back to the environment.
    pub fn resolve(cli_root: Option<&Path>) -> Self {
        Self { package_root: resolve_package_root(cli_root) }
    }

    pub fn header_path(&self) -> PathBuf {
        header_path(&self.package_root)
    }
}

/// Resolve the package root: explicit argument, then `POLYTRACKER_PACKAGE_ROOT`,
/// then the directory the executable is installed in.
pub fn resolve_package_root(cli_root: Option<&Path>) -> PathBuf {
    let env_root = std::env::var(PACKAGE_ROOT_ENV).ok();
    package_root_from(cli_root, env_root.as_deref())
}

fn package_root_from(cli_root: Option<&Path>, env_root: Option<&str>) -> PathBuf {
    if let Some(root) = cli_root {
        return root.to_path_buf();
    }
    if let Some(raw) = env_root {
        let trimmed = raw.trim();
        if !trimmed.is_empty() {
            return resolve_user_path(trimmed);
        }
    }
    install_root()
}

/// Directory containing the running executable. Independent of the caller's cwd.
pub fn install_root() -> PathBuf {
    std::env::current_exe()
        .ok()
        .map(|exe| exe.canonicalize().unwrap_or(exe))
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
        .unwrap_or_else(current_dir)
}

/// Resolve a user path. A bare `~` or a leading `~/` expands to the home directory.
pub fn resolve_user_path(input: &str) -> PathBuf {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return PathBuf::new();
    }
    if trimmed == "~" || trimmed.starts_with("~/") {
        let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
        let rest = trimmed[1..].trim_start_matches('/');
        return if rest.is_empty() { home } else { home.join(rest) };
    }
    let path = Path::new(trimmed);
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        current_dir().join(path)
    }
}

fn current_dir() -> PathBuf {
    std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
}
