//! Configuration system for the `Taskboard` server.
//!
//! Supports layered configuration with the following priority (highest first):
//! 1. CLI arguments
//! 2. Environment variables (via clap `env` attribute)
//! 3. TOML config file (`~/.config/taskboard/config.toml`)
//! 4. Compiled defaults

use std::path::PathBuf;
use std::time::Duration;

use taskboard_proto::schedule::CadenceKeywords;

use crate::pages::Page;
use crate::render::dates::DisplayZone;

/// Default source of the tasks document.
pub const DEFAULT_TASKS_URL: &str =
    "https://raw.githubusercontent.com/sprajapati024/clawd/master/TASKS.json";

/// Default source of the schedules document.
pub const DEFAULT_SCHEDULES_URL: &str =
    "https://raw.githubusercontent.com/sprajapati024/clawd/master/CRON.json";

/// Errors that can occur when loading server configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file.
    #[error("failed to read config file {path}: {source}")]
    ReadFile {
        /// Path that was attempted.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// Failed to parse the TOML configuration.
    #[error("failed to parse config file: {0}")]
    ParseToml(#[from] toml::de::Error),

    /// A source URL is not an absolute URL.
    #[error("invalid {page} source url {url:?}: {source}")]
    InvalidUrl {
        /// Page the URL feeds.
        page: Page,
        /// The rejected value.
        url: String,
        /// Parser error.
        source: url::ParseError,
    },
}

// ---------------------------------------------------------------------------
// TOML file structs (all fields Option for partial overrides)
// ---------------------------------------------------------------------------

/// Top-level TOML config file structure.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
struct DashboardConfigFile {
    server: ServerFileConfig,
    sources: SourcesFileConfig,
    display: DisplayFileConfig,
    cadence: Option<CadenceKeywords>,
}

/// `[server]` section of the config file.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
struct ServerFileConfig {
    bind_addr: Option<String>,
}

/// `[sources]` section of the config file.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
struct SourcesFileConfig {
    tasks_url: Option<String>,
    schedules_url: Option<String>,
    revalidate_secs: Option<u64>,
    timeout_secs: Option<u64>,
}

/// `[display]` section of the config file.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
struct DisplayFileConfig {
    title: Option<String>,
    heading: Option<String>,
    timezone: Option<DisplayZone>,
}

// ---------------------------------------------------------------------------
// CLI arguments
// ---------------------------------------------------------------------------

/// CLI arguments for the dashboard server.
#[derive(clap::Parser, Debug, Default)]
#[command(version, about = "Taskboard dashboard server")]
pub struct DashboardCliArgs {
    /// Address to bind the HTTP server to.
    #[arg(short, long, env = "TASKBOARD_ADDR")]
    pub bind: Option<String>,

    /// Path to config file (default: `~/.config/taskboard/config.toml`).
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// URL of the tasks JSON document.
    #[arg(long, env = "TASKBOARD_TASKS_URL")]
    pub tasks_url: Option<String>,

    /// URL of the schedules JSON document.
    #[arg(long, env = "TASKBOARD_SCHEDULES_URL")]
    pub schedules_url: Option<String>,

    /// Seconds a fetched document is served before it is refreshed (0 disables caching).
    #[arg(long)]
    pub revalidate_secs: Option<u64>,

    /// Per-request timeout for source fetches, in seconds.
    #[arg(long)]
    pub timeout_secs: Option<u64>,

    /// Log level filter (trace, debug, info, warn, error).
    #[arg(long, default_value = "info", env = "TASKBOARD_LOG")]
    pub log_level: String,
}

// ---------------------------------------------------------------------------
// Resolved configuration
// ---------------------------------------------------------------------------

/// Where each page's document is fetched from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceUrls {
    pub tasks: String,
    pub schedules: String,
}

impl Default for SourceUrls {
    fn default() -> Self {
        Self {
            tasks: DEFAULT_TASKS_URL.to_string(),
            schedules: DEFAULT_SCHEDULES_URL.to_string(),
        }
    }
}

impl SourceUrls {
    /// Returns the source URL backing a page.
    #[must_use]
    pub fn for_page(&self, page: Page) -> &str {
        match page {
            Page::Tasks => &self.tasks,
            Page::Schedules => &self.schedules,
        }
    }
}

/// Presentation settings shared by both pages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayConfig {
    /// Document `<title>`.
    pub title: String,
    /// Heading shown above the navigation.
    pub heading: String,
    /// Zone dates and timestamps are shown in.
    pub zone: DisplayZone,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            title: "Clarke's Task Board".to_string(),
            heading: "👓 Clarke's Dashboard".to_string(),
            zone: DisplayZone::Local,
        }
    }
}

/// Fully resolved dashboard configuration.
#[derive(Debug, Clone)]
pub struct DashboardConfig {
    /// Address to bind the server to (e.g., `0.0.0.0:3000`).
    pub bind_addr: String,
    pub sources: SourceUrls,
    /// Age after which a cached document is refreshed.
    pub revalidate: Duration,
    /// Timeout applied to each source fetch.
    pub request_timeout: Duration,
    pub display: DisplayConfig,
    pub cadence: CadenceKeywords,
    /// Log level filter string.
    pub log_level: String,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:3000".to_string(),
            sources: SourceUrls::default(),
            revalidate: Duration::from_secs(60),
            request_timeout: Duration::from_secs(10),
            display: DisplayConfig::default(),
            cadence: CadenceKeywords::default(),
            log_level: "info".to_string(),
        }
    }
}

impl DashboardConfig {
    /// Load configuration by merging CLI args, env vars, and a TOML file.
    ///
    /// If `--config` is given and the file does not exist, returns an error.
    /// If no `--config` is given, the default path is tried and missing file
    /// is treated as empty config.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the explicit config file cannot be read
    /// or parsed, or if a source URL is malformed.
    pub fn load(cli: &DashboardCliArgs) -> Result<Self, ConfigError> {
        let file = load_config_file(cli.config.as_deref())?;
        Self::resolve(cli, file)
    }

    /// Resolve a `DashboardConfig` from CLI args and a parsed config file.
    ///
    /// Priority: CLI > file > default.
    fn resolve(cli: &DashboardCliArgs, file: DashboardConfigFile) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let sources = SourceUrls {
            tasks: cli
                .tasks_url
                .clone()
                .or(file.sources.tasks_url)
                .unwrap_or(defaults.sources.tasks),
            schedules: cli
                .schedules_url
                .clone()
                .or(file.sources.schedules_url)
                .unwrap_or(defaults.sources.schedules),
        };
        validate_url(Page::Tasks, &sources.tasks)?;
        validate_url(Page::Schedules, &sources.schedules)?;

        Ok(Self {
            bind_addr: cli
                .bind
                .clone()
                .or(file.server.bind_addr)
                .unwrap_or(defaults.bind_addr),
            sources,
            revalidate: cli
                .revalidate_secs
                .or(file.sources.revalidate_secs)
                .map_or(defaults.revalidate, Duration::from_secs),
            request_timeout: cli
                .timeout_secs
                .or(file.sources.timeout_secs)
                .map_or(defaults.request_timeout, Duration::from_secs),
            display: DisplayConfig {
                title: file.display.title.unwrap_or(defaults.display.title),
                heading: file.display.heading.unwrap_or(defaults.display.heading),
                zone: file.display.timezone.unwrap_or(defaults.display.zone),
            },
            cadence: file.cadence.unwrap_or(defaults.cadence),
            log_level: cli.log_level.clone(),
        })
    }
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

fn validate_url(page: Page, raw: &str) -> Result<(), ConfigError> {
    url::Url::parse(raw)
        .map(|_| ())
        .map_err(|source| ConfigError::InvalidUrl {
            page,
            url: raw.to_string(),
            source,
        })
}

/// Load and parse a TOML config file for the dashboard.
fn load_config_file(
    explicit_path: Option<&std::path::Path>,
) -> Result<DashboardConfigFile, ConfigError> {
    let path = if let Some(p) = explicit_path {
        let contents = std::fs::read_to_string(p).map_err(|e| ConfigError::ReadFile {
            path: p.to_path_buf(),
            source: e,
        })?;
        return Ok(toml::from_str(&contents)?);
    } else {
        let Some(config_dir) = dirs::config_dir() else {
            return Ok(DashboardConfigFile::default());
        };
        config_dir.join("taskboard").join("config.toml")
    };

    match std::fs::read_to_string(&path) {
        Ok(contents) => Ok(toml::from_str(&contents)?),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(DashboardConfigFile::default()),
        Err(e) => Err(ConfigError::ReadFile { path, source: e }),
    }
}
