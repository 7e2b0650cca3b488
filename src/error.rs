//! Error type shared by every acquisition stage

use std::num::ParseFloatError;
use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to read CPU temperature from {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse CPU temperature {content:?}")]
    Parse {
        content: String,
        #[source]
        source: ParseFloatError,
    },

    #[error("failed to read BME280 data: {0}")]
    Sensor(String),

    #[error("failed to convert to JSON")]
    Serialization(#[from] serde_json::Error),

    #[error("invalid configuration: {0}")]
    Config(String),
}
