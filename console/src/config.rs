use std::path::Path;

use config::{builder::DefaultState, Config, ConfigBuilder, ConfigError, File, FileFormat};
use serde::Deserialize;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8082/api";
pub const DEFAULT_CONFIG_FILE: &str = "escola-console.toml";

#[derive(Debug, Clone, Deserialize)]
pub struct Api {
    pub base_url: String,
}

impl Default for Api {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.into(),
        }
    }
}

/// How responses that resolve out of order reach the panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DisplayPolicy {
    /// Render every response; whichever resolves last stays on screen.
    #[default]
    LastResolved,
    /// Render a response only if no newer request was issued after it.
    DropStale,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Display {
    pub policy: DisplayPolicy,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub api: Api,
    pub display: Display,
    pub log_level: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api: Api::default(),
            display: Display::default(),
            log_level: "info".into(),
        }
    }
}

impl Settings {
    /// Defaults, then `path` if given (must exist), else `escola-console.toml`
    /// in the working directory if present. The process environment is not
    /// consulted.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let builder = match path {
            Some(path) => defaults()?.add_source(File::from(path).format(FileFormat::Toml)),
            None => defaults()?
                .add_source(File::new(DEFAULT_CONFIG_FILE, FileFormat::Toml).required(false)),
        };
        builder.build()?.try_deserialize()
    }

    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        defaults()?
            .add_source(File::from_str(contents, FileFormat::Toml))
            .build()?
            .try_deserialize()
    }
}

fn defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    Config::builder()
        .set_default("api.base_url", DEFAULT_BASE_URL)?
        .set_default("display.policy", "last_resolved")?
        .set_default("log_level", "info")
}
