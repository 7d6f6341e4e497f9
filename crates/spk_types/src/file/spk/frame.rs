//! Decoded sprite frames and the scanline decoder that produces them.

use std::{
	fmt,
	io::{self, Read},
};

use image::{Rgba, RgbaImage};
use log::trace;

use crate::file::{
	FileType, SpkError,
	io::ReadLeExt,
	pk::{CodecConfig, CopyFillPattern, FillPattern, PkStream},
};

use super::bitmap::{BitmapHeader, PixelFormat, constants as bmp, row_stride};

/// Byte used for blank scanlines, padding and sprite fill runs (opaque white).
const SPRITE_FILL: u8 = 0xFF;

/// One decoded sprite: 16-bit pixels in top-down rows, each row padded to an
/// even pixel count.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct DecodedFrame {
	width: u16,
	height: u16,
	format: PixelFormat,
	pixels: Vec<u16>,
}

impl DecodedFrame {
	/// Decodes one sprite block from `reader`, which must be positioned at the
	/// block's dimension words.
	///
	/// Returns `Ok(None)` when the declared width or height is not positive.
	///
	/// # Errors
	///
	/// Returns [`SpkError::UnexpectedEof`] if the stream ends inside the
	/// dimensions or a scanline header. A scanline whose payload is cut short
	/// is padded rather than rejected.
	pub fn decode<R: Read>(
		reader: &mut R,
		copy_fill: &CopyFillPattern,
		format: PixelFormat,
	) -> Result<Option<Self>, SpkError> {
		let width = reader
			.read_i16_le()
			.map_err(|e| SpkError::from_io(e, FileType::Sprite, "sprite dimensions"))?;
		let height = reader
			.read_i16_le()
			.map_err(|e| SpkError::from_io(e, FileType::Sprite, "sprite dimensions"))?;

		if width <= 0 || height <= 0 {
			trace!("Sprite declares {width}x{height}, no image");
			return Ok(None);
		}
		let (width, height) = (width as u16, height as u16);

		let config = CodecConfig::new(copy_fill.clone(), FillPattern::byte(SPRITE_FILL));
		let stride = row_stride(width);
		let mut pixels = Vec::new();

		for _ in 0..height {
			let mut row = decode_scanline(reader, &config, stride)?;
			row.resize(stride, SPRITE_FILL);
			pixels.extend(row.chunks_exact(2).map(|p| u16::from_le_bytes([p[0], p[1]])));
		}

		Ok(Some(Self {
			width,
			height,
			format,
			pixels,
		}))
	}

	/// Reads back a bitmap produced by [`DecodedFrame::to_bitmap`].
	pub fn from_bitmap(data: &[u8]) -> Result<Self, SpkError> {
		let header = BitmapHeader::from_bytes(data)?;
		let format = header
			.pixel_format()
			.ok_or_else(|| SpkError::InvalidBitmap(format!("unknown channel masks {:X?}", header.masks)))?;
		if !header.is_top_down() {
			return Err(SpkError::InvalidBitmap("bottom-up row order is not supported".to_string()));
		}

		let (width, height) = header.dimensions();
		let (Ok(width), Ok(height)) = (u16::try_from(width), u16::try_from(height)) else {
			return Err(SpkError::InvalidBitmap(format!("dimensions {width}x{height} out of range")));
		};

		let start = header.data_offset as usize;
		let len = row_stride(width) * height as usize;
		let body = data.get(start..start + len).ok_or_else(|| {
			SpkError::InvalidBitmap(format!("pixel data needs {len} bytes at offset {start}"))
		})?;

		Ok(Self {
			width,
			height,
			format,
			pixels: body.chunks_exact(2).map(|p| u16::from_le_bytes([p[0], p[1]])).collect(),
		})
	}

	/// Declared width.
	#[inline]
	pub fn width(&self) -> u16 {
		self.width
	}

	/// Declared height.
	#[inline]
	pub fn height(&self) -> u16 {
		self.height
	}

	/// Width rounded up to an even pixel count, the stored row length.
	#[inline]
	pub fn padded_width(&self) -> usize {
		row_stride(self.width) / 2
	}

	/// Channel layout of the pixels.
	pub fn format(&self) -> PixelFormat {
		self.format
	}

	/// All stored pixels, including the padding column of odd-width sprites.
	pub fn pixels(&self) -> &[u16] {
		&self.pixels
	}

	/// Returns the pixel at `(x, y)` within the declared size.
	pub fn pixel(&self, x: u16, y: u16) -> Option<u16> {
		if x >= self.width || y >= self.height {
			return None;
		}
		self.pixels.get(y as usize * self.padded_width() + x as usize).copied()
	}

	/// Iterates over rows, each cropped to the declared width.
	pub fn rows(&self) -> impl Iterator<Item = &[u16]> + '_ {
		self.pixels.chunks_exact(self.padded_width()).map(|row| &row[..self.width as usize])
	}

	/// Expands to RGBA, keying pure white to full transparency.
	pub fn to_rgba(&self) -> RgbaImage {
		let padded_width = self.padded_width();
		RgbaImage::from_fn(u32::from(self.width), u32::from(self.height), |x, y| {
			let pixel = self.pixels[y as usize * padded_width + x as usize];
			let [r, g, b] = self.format.to_rgb8(pixel);
			let alpha = if [r, g, b] == [0xFF; 3] { 0x00 } else { 0xFF };
			Rgba([r, g, b, alpha])
		})
	}

	/// Builds the complete legacy bitmap file: header, masks and rows.
	pub fn to_bitmap(&self) -> Vec<u8> {
		let header = BitmapHeader::for_sprite(self.width, self.height, self.format);
		let mut out = Vec::with_capacity(bmp::HEADER_SIZE + self.pixels.len() * 2);
		out.extend_from_slice(&header.to_bytes());
		for pixel in &self.pixels {
			out.extend_from_slice(&pixel.to_le_bytes());
		}
		out
	}
}

impl fmt::Debug for DecodedFrame {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("DecodedFrame")
			.field("width", &self.width)
			.field("height", &self.height)
			.field("format", &self.format)
			.field("pixels", &self.pixels.len())
			.finish()
	}
}

impl fmt::Display for DecodedFrame {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}x{} {}", self.width, self.height, self.format)
	}
}

/// Decodes at most `stride` bytes of one scanline, leaving `reader` just past
/// its declared chunk.
fn decode_scanline<R: Read>(reader: &mut R, config: &CodecConfig, stride: usize) -> Result<Vec<u8>, SpkError> {
	let chunk_words = reader
		.read_u16_le()
		.map_err(|e| SpkError::from_io(e, FileType::Sprite, "scanline header"))?;
	let filled = reader
		.read_u16_le()
		.map_err(|e| SpkError::from_io(e, FileType::Sprite, "scanline header"))?
		!= 0;

	if !filled {
		return Ok(vec![SPRITE_FILL; (chunk_words as usize * 2).min(stride)]);
	}

	// The chunk size counts the flag word
	let payload = u64::from(chunk_words.saturating_sub(1)) * 2;
	let mut limited = reader.take(payload);
	let mut row = Vec::with_capacity(stride);
	PkStream::new(&mut limited, config.clone()).take(stride as u64).read_to_end(&mut row)?;

	let skipped = io::copy(&mut limited, &mut io::sink())?;
	if skipped > 0 {
		trace!("Skipped {skipped} undecoded bytes at end of scanline");
	}
	Ok(row)
}
