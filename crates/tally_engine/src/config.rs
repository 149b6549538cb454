use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tally_core::{Classifier, RuleError, TallyConfig};
use tally_logging::{tally_debug, tally_info};
use thiserror::Error;

/// Conventional config file name looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = "review_tally.ron";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse config: {0}")]
    Parse(String),
    #[error("failed to serialize config: {0}")]
    Serialize(String),
    #[error(transparent)]
    Rule(#[from] RuleError),
}

/// Loads a RON config file. A missing file yields the defaults.
pub fn load_config(path: &Path) -> Result<TallyConfig, ConfigError> {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            tally_debug!("no config at {:?}; using defaults", path);
            return Ok(TallyConfig::default());
        }
        Err(source) => {
            return Err(ConfigError::Io {
                path: path.to_path_buf(),
                source,
            })
        }
    };

    let config = parse_config(&text)?;
    tally_info!("Loaded config from {:?}", path);
    Ok(config)
}

/// Parses RON text and checks that every classifier pattern compiles.
pub fn parse_config(text: &str) -> Result<TallyConfig, ConfigError> {
    let config: TallyConfig =
        ron::from_str(text).map_err(|err| ConfigError::Parse(err.to_string()))?;
    Classifier::from_rules(&config.classifier_rules)?;
    Ok(config)
}

pub fn render_config(config: &TallyConfig) -> Result<String, ConfigError> {
    let pretty = ron::ser::PrettyConfig::new();
    ron::ser::to_string_pretty(config, pretty).map_err(|err| ConfigError::Serialize(err.to_string()))
}
