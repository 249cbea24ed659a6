use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors that end a game session.
#[derive(Debug, Error)]
pub enum GameError {
    #[error("terminal I/O failed: {0}")]
    Io(#[from] io::Error),
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Problems reading or validating the optional config file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid config file: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("unknown color '{0}'")]
    InvalidColor(String),
    #[error(
        "grid {width}x{height} at ({x}, {y}) does not fit a terminal: \
         both sides must be at least 4 and the far edges within 65535"
    )]
    InvalidGrid {
        x: i32,
        y: i32,
        width: i32,
        height: i32,
    },
}

/// Failures reported by a [`PlayerStore`](crate::player::PlayerStore).
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("player store operation '{0}' is not implemented")]
    Unimplemented(&'static str),
}
