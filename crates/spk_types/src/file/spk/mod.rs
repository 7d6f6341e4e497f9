//! Sprite container (`.spk` / `.ispk`) and compressed blob container (`.pk`) support.
//!
//! A container is a plain concatenation of compressed blocks. It has no
//! directory of its own: the matching index table ([`crate::file::spki`])
//! lists the byte offset of every block.
//!
//! # Sprite Block Structure
//!
//! ```text
//! Offset  Size  Field    Description
//! ------  ----  -------  ------------------------------------------
//! 0x00    2     width    Width in pixels (i16, non-positive = no image)
//! 0x02    2     height   Height in pixels (i16, non-positive = no image)
//! 0x04    ...   lines    `height` scanlines
//! ```
//!
//! ## Scanline
//!
//! ```text
//! Offset  Size                Field   Description
//! ------  ------------------  ------  -------------------------------------
//! +0x00   2                   words   Chunk size in words, flag included
//! +0x02   2                   flag    Non-zero when pixel data follows
//! +0x04   (words - 1) x 2     data    Run-length compressed pixels (filled only)
//! ```
//!
//! A blank scanline (flag zero) carries no data and stands for `words` white
//! pixels. Decoded rows are padded with white up to an even pixel count.
//!
//! # Examples
//!
//! ```no_run
//! use spk_types::file::{pk::CodecConfig, spki, spk::File};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let index = spki::File::open("Creature.spki")?;
//! let mut spk = File::open("Creature.spk", CodecConfig::spk())?;
//!
//! for (i, offset) in index.iter() {
//!     match spk.decode_sprite(offset)? {
//!         Some(frame) => println!("#{i}: {frame}"),
//!         None => println!("#{i}: no image"),
//!     }
//! }
//! # Ok(())
//! # }
//! ```

use std::{
	collections::BTreeSet,
	io::{BufReader, Read, Seek, SeekFrom},
};

use image::RgbaImage;
use log::debug;

use crate::file::{
	FileType, SpkError,
	pk::{CodecConfig, PkStream},
	placeholder,
	sheet::SpriteSheet,
	spki,
};

pub mod bitmap;
pub mod frame;

pub use bitmap::{BitmapHeader, PixelFormat};
pub use frame::DecodedFrame;

/// Seekable container handle.
///
/// Decodes are strictly sequential: every call seeks the shared reader to its
/// block before decoding.
#[derive(Debug)]
pub struct File<R> {
	reader: R,
	config: CodecConfig,
	pixel_format: PixelFormat,
}

impl File<BufReader<std::fs::File>> {
	/// Opens a container from the specified path.
	pub fn open(path: impl AsRef<std::path::Path>, config: CodecConfig) -> Result<Self, SpkError> {
		let file = std::fs::File::open(path)?;
		Ok(Self::from_reader(BufReader::new(file), config))
	}
}

impl<R: Read + Seek> File<R> {
	/// Wraps a seekable reader. Sprites decode as [`PixelFormat::Rgb565`]
	/// unless changed with [`File::with_pixel_format`].
	pub fn from_reader(reader: R, config: CodecConfig) -> Self {
		Self {
			reader,
			config,
			pixel_format: PixelFormat::default(),
		}
	}

	/// Sets the pixel format used for sprites.
	pub fn with_pixel_format(mut self, pixel_format: PixelFormat) -> Self {
		self.pixel_format = pixel_format;
		self
	}

	/// Total container size in bytes.
	pub fn size(&mut self) -> Result<u64, SpkError> {
		let current = self.reader.stream_position()?;
		let end = self.reader.seek(SeekFrom::End(0))?;
		self.reader.seek(SeekFrom::Start(current))?;
		Ok(end)
	}

	/// Decodes the sprite block at `offset`.
	///
	/// Returns `Ok(None)` for a block declaring a non-positive size.
	/// Sprite fill runs always emit white; only the copy/fill pattern of the
	/// container configuration applies.
	pub fn decode_sprite(&mut self, offset: u64) -> Result<Option<DecodedFrame>, SpkError> {
		self.reader.seek(SeekFrom::Start(offset))?;
		DecodedFrame::decode(&mut self.reader, &self.config.copy_fill, self.pixel_format)
	}

	/// Decodes the sprite referenced by position `sprite_index` of `index`.
	pub fn decode_indexed(
		&mut self,
		index: &spki::File,
		sprite_index: usize,
	) -> Result<Option<DecodedFrame>, SpkError> {
		let offset = index.offset_of(sprite_index)?;
		self.decode_sprite(offset)
	}

	/// Decodes the blob at `offset` with the container's fill pattern.
	///
	/// With `declared_size` the output is exactly that long, padded with the
	/// fill pattern if the block runs dry. Without it, decoding continues to
	/// the end of the container.
	pub fn extract_raw(&mut self, offset: u64, declared_size: Option<usize>) -> Result<Vec<u8>, SpkError> {
		self.reader.seek(SeekFrom::Start(offset))?;
		let mut stream = PkStream::new(&mut self.reader, self.config.clone());
		let data = match declared_size {
			Some(size) => stream.decode_exact(size),
			None => stream.decode_to_end(),
		}
		.map_err(|e| SpkError::from_io(e, FileType::Pack, "compressed blob"))?;
		debug!("Decoded {} bytes from blob at 0x{offset:08X} in {} operations", data.len(), stream.operation_index());
		Ok(data)
	}

	/// Decodes every sprite in `needed` (ascending) and packs them into one sheet.
	///
	/// Returns `Ok(None)` when none of them decodes to an image.
	///
	/// # Errors
	///
	/// Returns [`SpkError::SpriteIndexOutOfRange`] if an index has no offset,
	/// or any decode error of the sprites themselves.
	pub fn pack_sheet(
		&mut self,
		index: &spki::File,
		needed: &BTreeSet<u16>,
	) -> Result<Option<SpriteSheet>, SpkError> {
		let mut frames = Vec::with_capacity(needed.len());
		for &sprite_index in needed {
			let image = self.decode_indexed(index, sprite_index as usize)?.map(|frame| frame.to_rgba());
			frames.push((sprite_index, image));
		}
		Ok(SpriteSheet::pack(frames))
	}

	/// Decodes the sprite at `offset`, substituting the "NULL IMAGE"
	/// placeholder when it has no image.
	pub fn render_sprite(&mut self, offset: u64) -> Result<RgbaImage, SpkError> {
		Ok(self.decode_sprite(offset)?.map(|frame| frame.to_rgba()).unwrap_or_else(placeholder::null_image))
	}
}
