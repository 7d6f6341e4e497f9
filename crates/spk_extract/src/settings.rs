//! Extraction settings.
//!
//! Settings are layered: built-in defaults, then an optional TOML file, then
//! `SPK_*` environment variables (for example `SPK_FRAME_DELAY_MS=120`).
//!
//! ```toml
//! copy_fill_pattern = "011"
//! fill = "ff"
//! pixel_format = "rgb565"
//! frame_delay_ms = 100
//! anchor_offset_x = 27
//! anchor_offset_y = 10
//! raw_size = 4096
//! ```

use std::path::Path;

use config::{Config, Environment, FileFormat};
use serde::{Deserialize, Serialize};

use spk_internal::prelude::{CodecConfig, CopyFillPattern, FillPattern, PixelFormat};

use crate::ExtractError;

mod constants {
	/// Environment variable prefix
	pub const ENV_PREFIX: &str = "SPK";

	/// Milliseconds per duration factor
	pub const FRAME_DELAY_MS: u32 = 100;

	/// Horizontal anchor correction
	pub const ANCHOR_OFFSET_X: i32 = 27;

	/// Vertical anchor correction
	pub const ANCHOR_OFFSET_Y: i32 = 10;
}

/// Settings shared by every extraction mode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractConfig {
	/// Copy/fill pattern as a bit string, `'1'` = copy (`"01"` SPK, `"011"` ISPK)
	pub copy_fill_pattern: String,

	/// Fill pattern for raw blobs, hex encoded
	pub fill: String,

	/// Sprite pixel format
	pub pixel_format: PixelFormat,

	/// Milliseconds per animation duration factor
	pub frame_delay_ms: u32,

	/// Added to the negated horizontal frame origin
	pub anchor_offset_x: i32,

	/// Added to the negated vertical frame origin
	pub anchor_offset_y: i32,

	/// Declared decode size for raw blobs, unbounded when absent
	pub raw_size: Option<usize>,
}

impl Default for ExtractConfig {
	fn default() -> Self {
		Self {
			copy_fill_pattern: CopyFillPattern::spk().to_string(),
			fill: hex::encode(FillPattern::default().bytes()),
			pixel_format: PixelFormat::default(),
			frame_delay_ms: constants::FRAME_DELAY_MS,
			anchor_offset_x: constants::ANCHOR_OFFSET_X,
			anchor_offset_y: constants::ANCHOR_OFFSET_Y,
			raw_size: None,
		}
	}
}

impl ExtractConfig {
	/// Loads settings from an optional TOML file and the environment.
	///
	/// A missing file is not an error.
	pub fn load(path: Option<&Path>) -> Result<Self, ExtractError> {
		Self::load_layered(path, Environment::with_prefix(constants::ENV_PREFIX))
	}

	fn load_layered(path: Option<&Path>, environment: Environment) -> Result<Self, ExtractError> {
		let mut builder = Config::builder();
		if let Some(path) = path {
			builder = builder.add_source(config::File::from(path).format(FileFormat::Toml).required(false));
		}
		let settings = builder.add_source(environment).build()?;
		Ok(settings.try_deserialize()?)
	}

	/// Parses settings from TOML text, without consulting the environment.
	pub fn from_toml_str(text: &str) -> Result<Self, ExtractError> {
		let settings = Config::builder().add_source(config::File::from_str(text, FileFormat::Toml)).build()?;
		Ok(settings.try_deserialize()?)
	}

	/// Builds the codec convention described by these settings.
	pub fn codec_config(&self) -> Result<CodecConfig, ExtractError> {
		let copy_fill: CopyFillPattern = self.copy_fill_pattern.parse()?;
		let fill = FillPattern::new(hex::decode(self.fill.trim())?)?;
		Ok(CodecConfig::new(copy_fill, fill))
	}
}
