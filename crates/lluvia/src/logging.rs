//! File logging. The terminal belongs to the scene, so records go to
//! `lluvia.log` in the cache directory.

use std::fs::{self, File};
use std::path::PathBuf;

use directories::ProjectDirs;
use env_logger::{Env, Target};

const FILTER_ENV: &str = "LLUVIA_LOG";
const DEFAULT_FILTER: &str = "warn";

pub fn log_path() -> Option<PathBuf> {
    ProjectDirs::from("", "", "lluvia").map(|dirs| dirs.cache_dir().join("lluvia.log"))
}

/// Install the logger. Returns the log file path, or `None` if logging is off
/// because the file could not be opened.
pub fn init() -> Option<PathBuf> {
    let path = log_path()?;
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir).ok()?;
    }
    let file = File::create(&path).ok()?;

    env_logger::Builder::from_env(Env::default().filter_or(FILTER_ENV, DEFAULT_FILTER))
        .target(Target::Pipe(Box::new(file)))
        .format_timestamp_millis()
        .try_init()
        .ok()?;
    Some(path)
}
