//! Typed errors for everything in this crate that is a representable,
//! recoverable failure. `Segmenter::segment` itself stays infallible — see
//! the crate-level docs for why.

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to read dictionary file {path}: {source}")]
    DictionaryUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to load config file {path}: {source}")]
    ConfigUnavailable {
        path: PathBuf,
        #[source]
        source: ConfigLoadError,
    },
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigLoadError {
    #[error("could not read file: {0}")]
    Io(#[from] std::io::Error),
    #[error("could not parse TOML: {0}")]
    Parse(#[from] toml::de::Error),
}
