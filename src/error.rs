//! Error types

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised by the sound-emission collaborator
#[derive(Debug, Error)]
pub enum AudioError {
    #[error("failed to read bell sound {path}: {source}")]
    Asset {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to decode bell sound {path}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: rodio::decoder::DecoderError,
    },

    #[error("audio output unavailable: {0}")]
    Output(String),

    #[error("failed to spawn audio thread: {0}")]
    Thread(#[source] std::io::Error),

    #[error("audio thread is no longer running")]
    Disconnected,
}
