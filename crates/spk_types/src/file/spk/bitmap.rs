//! Pixel formats and the synthesized legacy bitmap header.

use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::file::SpkError;

/// Bitmap header constants.
pub mod constants {
	/// Size of the file header (`BITMAPFILEHEADER`)
	pub const FILE_HEADER_SIZE: usize = 14;

	/// Size of the info header (`BITMAPINFOHEADER`)
	pub const INFO_HEADER_SIZE: usize = 40;

	/// Size of the four channel masks following the info header
	pub const MASKS_SIZE: usize = 16;

	/// Total header size, also the offset of the pixel data
	pub const HEADER_SIZE: usize = FILE_HEADER_SIZE + INFO_HEADER_SIZE + MASKS_SIZE;

	/// File signature
	pub const SIGNATURE: [u8; 2] = *b"BM";

	/// Every sprite is 16 bits per pixel
	pub const BITS_PER_PIXEL: u16 = 16;

	/// `BI_BITFIELDS`
	pub const COMPRESSION_BITFIELDS: u32 = 3;

	/// Resolution shared by every sprite, in pixels per meter
	pub const PIXELS_PER_METER: i32 = 2834;
}

/// 16-bit pixel channel layout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PixelFormat {
	/// 5 bits red, 6 bits green, 5 bits blue
	#[default]
	Rgb565,
	/// 5 bits per channel, top bit unused
	Rgb555,
}

impl PixelFormat {
	/// Red, green, blue and alpha channel masks as written to the bitmap header.
	pub fn masks(&self) -> [u32; 4] {
		match self {
			Self::Rgb565 => [0xF800, 0x07E0, 0x001F, 0],
			Self::Rgb555 => [0x7C00, 0x03E0, 0x001F, 0],
		}
	}

	/// Recognizes a format from its channel masks (alpha mask ignored).
	pub fn from_masks(masks: [u32; 4]) -> Option<Self> {
		[Self::Rgb565, Self::Rgb555].into_iter().find(|f| f.masks()[..3] == masks[..3])
	}

	/// Expands a pixel to 8-bit channels by bit replication, so a full channel
	/// maps to `0xFF`.
	#[inline]
	pub fn to_rgb8(&self, pixel: u16) -> [u8; 3] {
		let (r5, g, b5) = match self {
			Self::Rgb565 => {
				let g6 = ((pixel >> 5) & 0x3F) as u8;
				(((pixel >> 11) & 0x1F) as u8, (g6 << 2) | (g6 >> 4), (pixel & 0x1F) as u8)
			}
			Self::Rgb555 => {
				let g5 = ((pixel >> 5) & 0x1F) as u8;
				(((pixel >> 10) & 0x1F) as u8, (g5 << 3) | (g5 >> 2), (pixel & 0x1F) as u8)
			}
		};
		[(r5 << 3) | (r5 >> 2), g, (b5 << 3) | (b5 >> 2)]
	}
}

impl Display for PixelFormat {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Self::Rgb565 => write!(f, "rgb565"),
			Self::Rgb555 => write!(f, "rgb555"),
		}
	}
}

impl FromStr for PixelFormat {
	type Err = SpkError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.trim().to_ascii_lowercase().as_str() {
			"rgb565" | "565" => Ok(Self::Rgb565),
			"rgb555" | "555" => Ok(Self::Rgb555),
			other => Err(SpkError::InvalidPattern(format!("unknown pixel format \"{other}\""))),
		}
	}
}

/// The 70-byte header placed in front of a decoded sprite: file header,
/// info header and channel masks.
///
/// # Structure
///
/// ```text
/// Offset  Size  Field            Value
/// ------  ----  ---------------  ---------------------------------------
/// 0x00    2     signature        "BM"
/// 0x02    4     file_size        header + pixel data
/// 0x06    4     reserved         0
/// 0x0A    4     data_offset      70
/// 0x0E    4     info_size        40
/// 0x12    4     width            declared width
/// 0x16    4     height           negated height (top-down rows)
/// 0x1A    2     planes           1
/// 0x1C    2     bits_per_pixel   16
/// 0x1E    4     compression      3 (BI_BITFIELDS)
/// 0x22    4     image_size       even width x height x 2
/// 0x26    8     resolution       2834 x 2834 pixels per meter
/// 0x2E    8     colors           0, 0
/// 0x36    16    masks            red, green, blue, alpha
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BitmapHeader {
	/// Total file size in bytes
	pub file_size: u32,

	/// Offset of the pixel data
	pub data_offset: u32,

	/// Image width
	pub width: i32,

	/// Image height, negative for top-down row order
	pub height: i32,

	/// Pixel data size in bytes
	pub image_size: u32,

	/// Horizontal resolution
	pub x_pixels_per_meter: i32,

	/// Vertical resolution
	pub y_pixels_per_meter: i32,

	/// Red, green, blue and alpha masks
	pub masks: [u32; 4],
}

impl BitmapHeader {
	/// Builds the header for a top-down sprite of the given size.
	pub fn for_sprite(width: u16, height: u16, format: PixelFormat) -> Self {
		let image_size = row_stride(width) as u32 * u32::from(height);
		Self {
			file_size: constants::HEADER_SIZE as u32 + image_size,
			data_offset: constants::HEADER_SIZE as u32,
			width: i32::from(width),
			height: -i32::from(height),
			image_size,
			x_pixels_per_meter: constants::PIXELS_PER_METER,
			y_pixels_per_meter: constants::PIXELS_PER_METER,
			masks: format.masks(),
		}
	}

	/// Returns `true` when rows are stored top to bottom.
	pub fn is_top_down(&self) -> bool {
		self.height < 0
	}

	/// Absolute width and height.
	pub fn dimensions(&self) -> (u32, u32) {
		(self.width.unsigned_abs(), self.height.unsigned_abs())
	}

	/// Pixel format implied by the channel masks.
	pub fn pixel_format(&self) -> Option<PixelFormat> {
		PixelFormat::from_masks(self.masks)
	}

	/// Serializes the header.
	pub fn to_bytes(&self) -> [u8; constants::HEADER_SIZE] {
		let mut out = [0u8; constants::HEADER_SIZE];
		out[0x00..0x02].copy_from_slice(&constants::SIGNATURE);
		out[0x02..0x06].copy_from_slice(&self.file_size.to_le_bytes());
		out[0x0A..0x0E].copy_from_slice(&self.data_offset.to_le_bytes());
		out[0x0E..0x12].copy_from_slice(&(constants::INFO_HEADER_SIZE as u32).to_le_bytes());
		out[0x12..0x16].copy_from_slice(&self.width.to_le_bytes());
		out[0x16..0x1A].copy_from_slice(&self.height.to_le_bytes());
		out[0x1A..0x1C].copy_from_slice(&1u16.to_le_bytes());
		out[0x1C..0x1E].copy_from_slice(&constants::BITS_PER_PIXEL.to_le_bytes());
		out[0x1E..0x22].copy_from_slice(&constants::COMPRESSION_BITFIELDS.to_le_bytes());
		out[0x22..0x26].copy_from_slice(&self.image_size.to_le_bytes());
		out[0x26..0x2A].copy_from_slice(&self.x_pixels_per_meter.to_le_bytes());
		out[0x2A..0x2E].copy_from_slice(&self.y_pixels_per_meter.to_le_bytes());
		for (i, mask) in self.masks.iter().enumerate() {
			let at = 0x36 + i * 4;
			out[at..at + 4].copy_from_slice(&mask.to_le_bytes());
		}
		out
	}

	/// Parses a header written by [`BitmapHeader::to_bytes`].
	///
	/// # Errors
	///
	/// Returns [`SpkError::InvalidBitmap`] if the data is too short or is not a
	/// 16-bit bit-field bitmap.
	pub fn from_bytes(data: &[u8]) -> Result<Self, SpkError> {
		if data.len() < constants::HEADER_SIZE {
			return Err(SpkError::InvalidBitmap(format!(
				"header needs {} bytes, got {}",
				constants::HEADER_SIZE,
				data.len()
			)));
		}
		if data[0x00..0x02] != constants::SIGNATURE {
			return Err(SpkError::InvalidBitmap("missing BM signature".to_string()));
		}

		let u16_at = |at: usize| u16::from_le_bytes([data[at], data[at + 1]]);
		let u32_at = |at: usize| u32::from_le_bytes([data[at], data[at + 1], data[at + 2], data[at + 3]]);
		let i32_at = |at: usize| u32_at(at) as i32;

		let info_size = u32_at(0x0E) as usize;
		if info_size != constants::INFO_HEADER_SIZE {
			return Err(SpkError::InvalidBitmap(format!("unsupported info header size {info_size}")));
		}
		let bits_per_pixel = u16_at(0x1C);
		let compression = u32_at(0x1E);
		if bits_per_pixel != constants::BITS_PER_PIXEL || compression != constants::COMPRESSION_BITFIELDS {
			return Err(SpkError::InvalidBitmap(format!(
				"expected 16-bit BI_BITFIELDS, got {bits_per_pixel}-bit compression {compression}"
			)));
		}

		Ok(Self {
			file_size: u32_at(0x02),
			data_offset: u32_at(0x0A),
			width: i32_at(0x12),
			height: i32_at(0x16),
			image_size: u32_at(0x22),
			x_pixels_per_meter: i32_at(0x26),
			y_pixels_per_meter: i32_at(0x2A),
			masks: [u32_at(0x36), u32_at(0x3A), u32_at(0x3E), u32_at(0x42)],
		})
	}
}

/// Bytes per stored row: width rounded up to an even pixel count, two bytes per pixel.
#[inline]
pub(crate) fn row_stride(width: u16) -> usize {
	(width as usize).next_multiple_of(2) * 2
}
