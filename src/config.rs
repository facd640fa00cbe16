//! Configuration for corkboard
//!
//! Centralized configuration with sensible defaults.

use std::path::PathBuf;
use std::time::Duration;

/// Main configuration for a corkboard instance
#[derive(Debug, Clone)]
pub struct Config {
    // -------------------------------------------------------------------------
    // Storage Configuration
    // -------------------------------------------------------------------------
    /// Root directory for all record files
    /// Internal structure:
    ///   {db_dir}/
    ///     ├── board/    (1.json, 2.json, ..., lastId.txt)
    ///     ├── article/
    ///     └── member/
    pub db_dir: PathBuf,

    // -------------------------------------------------------------------------
    // Site Configuration
    // -------------------------------------------------------------------------
    /// Directory holding the page templates and static assets
    pub template_dir: PathBuf,

    /// Root of the generated static site
    pub site_dir: PathBuf,

    // -------------------------------------------------------------------------
    // Scheduler Configuration
    // -------------------------------------------------------------------------
    /// Pause between automatic rebuilds of the site
    pub rebuild_interval: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            db_dir: PathBuf::from("./db"),
            template_dir: PathBuf::from("./site_template"),
            site_dir: PathBuf::from("./site"),
            rebuild_interval: Duration::from_secs(10),
        }
    }
}

impl Config {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the database root directory
    pub fn db_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.db_dir = path.into();
        self
    }

    /// Set the template directory
    pub fn template_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.template_dir = path.into();
        self
    }

    /// Set the generated site root
    pub fn site_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.site_dir = path.into();
        self
    }

    /// Set the pause between automatic rebuilds
    pub fn rebuild_interval(mut self, interval: Duration) -> Self {
        self.config.rebuild_interval = interval;
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}
