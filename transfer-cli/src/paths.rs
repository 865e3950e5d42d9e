//! Platform-specific directory paths.
//!
//! Uses XDG on Linux, standard locations on macOS/Windows.

use std::fs;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;

const QUALIFIER: &str = "dev";
const ORGANIZATION: &str = "norpie";
const APPLICATION: &str = "transfer";

/// Get project directories, or None if home directory cannot be determined.
fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from(QUALIFIER, ORGANIZATION, APPLICATION)
}

/// Get the cache directory for logs.
///
/// - Linux: `$XDG_CACHE_HOME/transfer` or `~/.cache/transfer`
/// - macOS: `~/Library/Caches/dev.norpie.transfer`
/// - Windows: `C:\Users\<User>\AppData\Local\norpie\transfer\cache`
pub fn cache_dir() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.cache_dir().to_path_buf())
}

/// Get the config directory.
///
/// - Linux: `$XDG_CONFIG_HOME/transfer` or `~/.config/transfer`
/// - macOS: `~/Library/Application Support/dev.norpie.transfer`
/// - Windows: `C:\Users\<User>\AppData\Roaming\norpie\transfer\config`
pub fn config_dir() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the default config file.
pub fn config_file() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join("config.json"))
}

/// Get the path to the latest log file.
pub fn log_file() -> Option<PathBuf> {
    cache_dir().map(|dir| dir.join("latest.log"))
}

/// Archived logs kept next to `latest.log`.
const MAX_OLD_LOGS: usize = 10;

const ARCHIVE_PREFIX: &str = "replay-";

/// Archive the previous run's log and prune old archives.
///
/// Call before opening the new log file.
pub fn rotate_logs() {
    if let Some(cache) = cache_dir() {
        let stamp = chrono::Local::now().format("%Y%m%d_%H%M%S").to_string();
        rotate_logs_in(&cache, &stamp);
    }
}

/// Rename `latest.log` in `dir` to `replay-<stamp>.log`, then prune.
fn rotate_logs_in(dir: &Path, stamp: &str) {
    let latest = dir.join("latest.log");
    if latest.exists() {
        let _ = fs::rename(&latest, dir.join(format!("{ARCHIVE_PREFIX}{stamp}.log")));
    }
    prune_archives(dir, MAX_OLD_LOGS);
}

/// Delete all but the `keep` newest archived logs in `dir`.
///
/// Archive names sort by timestamp.
fn prune_archives(dir: &Path, keep: usize) {
    let Ok(entries) = fs::read_dir(dir) else { return };

    let mut archives: Vec<PathBuf> = entries
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|path| {
            path.file_name()
                .and_then(|name| name.to_str())
                .is_some_and(|name| name.starts_with(ARCHIVE_PREFIX) && name.ends_with(".log"))
        })
        .collect();
    archives.sort();

    let excess = archives.len().saturating_sub(keep);
    for path in &archives[..excess] {
        let _ = fs::remove_file(path);
    }
}
