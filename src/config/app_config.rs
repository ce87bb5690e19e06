use config::{Config, Environment, File};
use error_stack::{report, ResultExt};
use serde::{de::IntoDeserializer, Deserialize};
use serde_path_to_error::{Deserializer as PathDeserializer, Segment, Track};
use thiserror::Error;

use super::{
    google_config::GoogleConfig, layout_config::LayoutConfig, logging_config::LoggingConfig,
    playlist_config::PlaylistConfig,
};

pub const DEFAULT_CONFIG_PATH: &str = "QuizKit";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read configuration sources")]
    ReadError,
    #[error("invalid configuration at '{path}'")]
    InvalidField { path: String },
}

#[derive(Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct AppConfig {
    pub google: GoogleConfig,
    pub layout: LayoutConfig,
    pub playlist: PlaylistConfig,
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Reads the file named by `CONFIG_PATH` (if present) and `QUIZ_KIT__*`
    /// variables on top of the built-in defaults.
    pub fn load() -> error_stack::Result<Self, ConfigError> {
        let config_path =
            std::env::var("CONFIG_PATH").unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
        Self::load_from(&config_path)
    }

    pub fn load_from(config_path: &str) -> error_stack::Result<Self, ConfigError> {
        let value = Config::builder()
            .add_source(File::with_name(config_path).required(false))
            .add_source(
                Environment::with_prefix("QUIZ_KIT")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .and_then(|config| config.try_deserialize::<serde_json::Value>())
            .change_context(ConfigError::ReadError)
            .attach_printable_lazy(|| format!("Config file: {}", config_path))?;

        let mut track = Track::new();
        let path_de = PathDeserializer::new(value.into_deserializer(), &mut track);
        AppConfig::deserialize(path_de).map_err(|e| {
            let path = field_path(track);
            report!(ConfigError::InvalidField { path })
                .attach_printable(e.to_string())
                .attach_printable(format!("Config file: {}", config_path))
        })
    }
}

fn field_path(track: Track) -> String {
    track
        .path()
        .iter()
        .map(|seg| match seg {
            Segment::Seq { index } => format!("[{}]", index),
            Segment::Map { key } => format!(".{}", key),
            Segment::Enum { variant } => format!("::{}", variant),
            Segment::Unknown => String::from("<?>"),
        })
        .collect::<String>()
        .trim_start_matches('.')
        .to_string()
}
