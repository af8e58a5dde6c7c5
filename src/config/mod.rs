pub mod cache;
pub mod toml_config;

use crate::domain::ports::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{validate_path, validate_positive_number, validate_url, Validate};
use std::path::{Path, PathBuf};

#[cfg(feature = "cli")]
use clap::{Parser, Subcommand};

pub const DEFAULT_ENDPOINT: &str = "https://api.ssodnet.imcce.fr/quaero/1/sso";

/// Effective settings for a run: defaults, layered with the optional TOML
/// file, layered with command line flags.
#[derive(Debug, Clone)]
pub struct Settings {
    pub endpoint: String,
    /// Explicit index document URL; defaults to `<endpoint>/index`.
    pub index_url: Option<String>,
    pub cache_dir: PathBuf,
    pub timeout_seconds: u64,
    pub retry_attempts: u32,
    pub try_local_first: bool,
    pub show_progress: bool,
    pub return_id: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            index_url: None,
            cache_dir: cache::default_cache_dir(),
            timeout_seconds: 30,
            retry_attempts: 2,
            try_local_first: true,
            show_progress: false,
            return_id: false,
        }
    }
}

impl Settings {
    #[cfg(feature = "cli")]
    pub fn from_cli(cli: &CliConfig) -> Result<Self> {
        let mut settings = Settings::default();

        if let Some(path) = &cli.config {
            toml_config::TomlConfig::from_file(path)?.apply(&mut settings);
        }

        // 命令列優先於設定檔
        if let Some(endpoint) = &cli.endpoint {
            settings.endpoint = endpoint.clone();
        }
        if let Some(cache_dir) = &cli.cache_dir {
            settings.cache_dir = PathBuf::from(cache_dir);
        }

        Ok(settings)
    }
}

impl ConfigProvider for Settings {
    fn service_endpoint(&self) -> &str {
        &self.endpoint
    }

    fn index_url(&self) -> String {
        self.index_url
            .clone()
            .unwrap_or_else(|| format!("{}/index", self.endpoint.trim_end_matches('/')))
    }

    fn cache_dir(&self) -> &Path {
        &self.cache_dir
    }

    fn timeout_seconds(&self) -> u64 {
        self.timeout_seconds
    }

    fn retry_attempts(&self) -> u32 {
        self.retry_attempts
    }

    fn try_local_first(&self) -> bool {
        self.try_local_first
    }

    fn show_progress(&self) -> bool {
        self.show_progress
    }

    fn return_id(&self) -> bool {
        self.return_id
    }
}

impl Validate for Settings {
    fn validate(&self) -> Result<()> {
        validate_url("endpoint", &self.endpoint)?;
        if let Some(index_url) = &self.index_url {
            validate_url("cache.index_url", index_url)?;
        }
        validate_path("cache_dir", &self.cache_dir.to_string_lossy())?;
        validate_positive_number("timeout_seconds", self.timeout_seconds as usize, 1)?;
        Ok(())
    }
}

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "rocks-id")]
#[command(version)]
#[command(about = "Resolve minor body names, numbers and designations")]
pub struct CliConfig {
    #[command(subcommand)]
    pub command: Command,

    /// Remote resolution service endpoint
    #[arg(long, global = true)]
    pub endpoint: Option<String>,

    /// Cache directory holding the name/number index
    #[arg(long, global = true)]
    pub cache_dir: Option<String>,

    /// Optional TOML settings file
    #[arg(long, global = true)]
    pub config: Option<String>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    pub log_json: bool,

    /// Log resource usage of the run
    #[arg(long, global = true)]
    pub monitor: bool,
}

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Resolve identifiers and echo "(number) name" per input
    Id {
        /// Names, numbers or designations
        #[arg(required = true)]
        identifiers: Vec<String>,

        /// Include the external catalogue id
        #[arg(long)]
        ids: bool,

        /// Skip the local index, always query the remote service
        #[arg(long)]
        remote_only: bool,

        /// Show per-identifier progress
        #[arg(long)]
        progress: bool,

        /// Write the results to a CSV file
        #[arg(long)]
        output: Option<String>,
    },

    /// Show the cache inventory
    Status,

    /// Download a fresh name/number index into the cache
    Update {
        /// Index document URL, defaults to <endpoint>/index
        #[arg(long)]
        index_url: Option<String>,
    },
}
