//! Error type for extraction runs.

use thiserror::Error;

use spk_internal::prelude::SpkError;

/// Errors that can stop an extraction run or a single entry.
#[derive(Debug, Error)]
pub enum ExtractError {
	/// Malformed container, index table or metadata
	#[error(transparent)]
	Format(#[from] SpkError),

	/// PNG encoding failed
	#[error("Image encoding failed: {0}")]
	Image(#[from] image::ImageError),

	/// JSON document could not be written
	#[error("JSON serialization failed: {0}")]
	Json(#[from] serde_json::Error),

	/// Settings could not be loaded
	#[error("Configuration error: {0}")]
	Config(#[from] config::ConfigError),

	/// Fill pattern setting is not valid hex
	#[error("Invalid fill pattern: {0}")]
	Hex(#[from] hex::FromHexError),

	/// IO error
	#[error(transparent)]
	Io(#[from] std::io::Error),
}
