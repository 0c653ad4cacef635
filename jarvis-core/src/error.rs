//! Error handling shared by the configuration and I/O layers.
//!
//! The tokenizer and the Markov chain are total and never produce errors.

use std::path::PathBuf;

use thiserror::Error;

/// Convenient result type used throughout the crate.
pub type Result<T, E = ChatError> = std::result::Result<T, E>;

/// Failures raised while loading configuration or training data.
#[derive(Debug, Error)]
pub enum ChatError {
	/// Configuration failed validation.
	#[error("invalid configuration: {0}")]
	InvalidConfig(String),
	/// Filesystem error with the offending path.
	#[error("io error while reading {path:?}: {source}")]
	Io {
		/// Underlying error returned by the standard library.
		source: std::io::Error,
		/// File being read.
		path: PathBuf,
	},
	/// The configuration file is not valid TOML for `ChatConfig`.
	#[error("failed to parse configuration: {0}")]
	Config(#[from] toml::de::Error),
}

impl ChatError {
	/// Wraps an I/O error together with the path it happened on.
	pub fn io(source: std::io::Error, path: impl Into<PathBuf>) -> Self {
		Self::Io { source, path: path.into() }
	}
}
