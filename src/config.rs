use std::path::PathBuf;
use std::time::Duration;

use crate::device::Position;

pub const DEFAULT_API_BASE: &str = "http://localhost:8000/api";

#[derive(Debug, Clone)]
pub struct Config {
    pub api_base: String,
    pub session_file: PathBuf,
    pub timeout_secs: Option<u64>,
    pub fixed_position: Option<Position>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            session_file: default_session_file(),
            timeout_secs: None,
            fixed_position: None,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(base) = std::env::var("API_BASE") {
            if !base.trim().is_empty() {
                config.api_base = base;
            }
        }

        if let Ok(path) = std::env::var("PANGAN_SESSION_FILE") {
            config.session_file = PathBuf::from(path);
        }

        if let Ok(secs) = std::env::var("PANGAN_TIMEOUT_SECS") {
            if let Ok(s) = secs.parse() {
                config.timeout_secs = Some(s);
            }
        }

        let lat = std::env::var("PANGAN_LAT").ok().and_then(|v| v.parse().ok());
        let long = std::env::var("PANGAN_LONG").ok().and_then(|v| v.parse().ok());
        if let (Some(latitude), Some(longitude)) = (lat, long) {
            config.fixed_position = Some(Position {
                latitude,
                longitude,
            });
        }

        config
    }

    /// Base URL senza slash finale
    pub fn base_url(&self) -> &str {
        self.api_base.trim_end_matches('/')
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

fn default_session_file() -> PathBuf {
    let root = std::env::var_os("HOME")
        .map(PathBuf::from)
        .unwrap_or_else(std::env::temp_dir);
    root.join(".pangan").join("session.json")
}
