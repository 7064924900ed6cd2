//! `.env` loading
//!
//! Priority order (highest to lowest):
//! 1. Environment variables already set
//! 2. Current directory .env
//! 3. ~/.recipeshare/.env
//!
//! dotenvy never overwrites a variable that is already set, so loading
//! the files in this order gives exactly that precedence.

use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

/// Where configuration was loaded from, for logging once tracing is up
#[derive(Debug, Default)]
pub struct EnvSources {
    pub loaded: Vec<PathBuf>,
    pub failed: Vec<(PathBuf, String)>,
}

/// Load `.env` files into the process environment.
pub fn load_dotenv() -> EnvSources {
    let mut sources = EnvSources::default();

    match dotenvy::dotenv() {
        Ok(path) => sources.loaded.push(path),
        Err(e) if e.not_found() => {}
        Err(e) => sources.failed.push((PathBuf::from(".env"), e.to_string())),
    }

    if let Some(env_file) = config_dir().map(|dir| dir.join(".env")) {
        load_file(&env_file, &mut sources);
    }

    sources
}

fn load_file(path: &Path, sources: &mut EnvSources) {
    if !path.exists() {
        return;
    }
    match dotenvy::from_path(path) {
        Ok(()) => sources.loaded.push(path.to_path_buf()),
        Err(e) => sources.failed.push((path.to_path_buf(), e.to_string())),
    }
}

/// Get the recipeshare config directory path (~/.recipeshare)
pub fn config_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".recipeshare"))
}

/// Report what `load_dotenv` found.
pub fn log_sources(sources: &EnvSources) {
    for (path, error) in &sources.failed {
        warn!(path = %path.display(), %error, "failed to parse .env file");
    }

    if sources.loaded.is_empty() {
        debug!("No .env files found (current dir or ~/.recipeshare)");
        info!("Using environment variables only (no .env file found)");
    } else {
        let paths: Vec<String> = sources
            .loaded
            .iter()
            .map(|p| p.display().to_string())
            .collect();
        info!("Loaded configuration from: {}", paths.join(", "));
    }
}
