//! Benchmark helper utilities for spk-rs
//!
//! This module provides generators for synthetic containers and common
//! benchmark helpers. Every generator targets the SPK copy/fill pattern
//! (`01`: fill, copy, fill, copy, ...).

/// Encodes one PK operation: signed word count followed by its payload.
fn push_operation(out: &mut Vec<u8>, payload: &[u8]) {
	out.extend_from_slice(&((payload.len() / 2) as i16).to_le_bytes());
	out.extend_from_slice(payload);
}

/// Generates a PK blob that decodes to roughly `len` bytes.
///
/// Operations alternate between fills of `run` words and copies of `run`
/// words, which is the shape of typical sprite data.
pub fn generate_pk_blob(len: usize, run: usize) -> Vec<u8> {
	let run = run.max(1);
	let mut blob = Vec::new();
	let mut produced = 0;
	let mut counter = 0u8;

	while produced < len {
		// Fill
		blob.extend_from_slice(&(run as i16).to_le_bytes());
		produced += run * 2;

		// Copy
		let payload: Vec<u8> = (0..run * 2)
			.map(|_| {
				counter = counter.wrapping_add(7);
				counter
			})
			.collect();
		push_operation(&mut blob, &payload);
		produced += run * 2;
	}

	blob
}

/// Generates a sprite block of the given dimensions.
///
/// Each scanline starts with a transparent run of a quarter of the width,
/// followed by a colour gradient. Every eighth scanline is blank.
pub fn generate_sprite(width: u16, height: u16) -> Vec<u8> {
	let mut data = Vec::new();
	data.extend_from_slice(&(width as i16).to_le_bytes());
	data.extend_from_slice(&(height as i16).to_le_bytes());

	let transparent = width / 4;
	for y in 0..height {
		if y % 8 == 7 {
			// Blank scanline: one chunk word per pixel, flag zero
			data.extend_from_slice(&width.to_le_bytes());
			data.extend_from_slice(&0u16.to_le_bytes());
			continue;
		}

		let mut payload = Vec::new();
		payload.extend_from_slice(&(transparent as i16).to_le_bytes());
		let pixels: Vec<u8> = (transparent..width)
			.flat_map(|x| (x.wrapping_mul(31) ^ y.wrapping_mul(2047)).to_le_bytes())
			.collect();
		push_operation(&mut payload, &pixels);

		data.extend_from_slice(&((payload.len() / 2 + 1) as u16).to_le_bytes());
		data.extend_from_slice(&1u16.to_le_bytes());
		data.extend_from_slice(&payload);
	}

	data
}

/// Generates a container of `count` sprites together with their offsets.
pub fn generate_container(count: usize, (width, height): (u16, u16)) -> (Vec<u8>, Vec<u64>) {
	let mut data = Vec::new();
	let mut offsets = Vec::with_capacity(count);
	for _ in 0..count {
		offsets.push(data.len() as u64);
		data.extend_from_slice(&generate_sprite(width, height));
	}
	(data, offsets)
}

/// Generates animation metadata with `artifacts` artifacts of eight
/// perspectives, each holding `frames` placements where every other
/// placement repeats its predecessor.
pub fn generate_metadata(artifacts: u16, frames: u16) -> Vec<u8> {
	let mut data = Vec::new();
	data.extend_from_slice(&artifacts.to_le_bytes());
	for _ in 0..artifacts {
		// One animation of eight perspectives
		data.push(1);
		data.push(8);
		for p in 0..8u16 {
			data.extend_from_slice(&frames.to_le_bytes());
			for f in 0..frames {
				let sprite = p * frames + f / 2;
				data.extend_from_slice(&sprite.to_le_bytes());
				data.extend_from_slice(&(-((f / 2) as i16)).to_le_bytes());
				data.extend_from_slice(&(-40i16).to_le_bytes());
			}
		}
	}
	data
}

/// Common benchmark sizes for synthetic sprites
pub mod sizes {
	/// Tiny sprite: 16x16 (256 pixels) - item icon
	pub const TINY: (u16, u16) = (16, 16);
	/// Small sprite: 64x96 (6,144 pixels) - typical creature frame
	pub const SMALL: (u16, u16) = (64, 96);
	/// Medium sprite: 128x128 (16,384 pixels)
	pub const MEDIUM: (u16, u16) = (128, 128);
	/// Large sprite: 320x240 (76,800 pixels) - large effect
	pub const LARGE: (u16, u16) = (320, 240);
}

#[cfg(test)]
mod tests {
	use super::*;
	use spk_types::file::{CfpkFile, CodecConfig, PixelFormat, PkStream, SpkFile, SpkiFile};
	use std::io::Cursor;

	#[test]
	fn test_generate_pk_blob() {
		let blob = generate_pk_blob(64, 4);
		let decoded = PkStream::new(blob.as_slice(), CodecConfig::spk()).decode_to_end().unwrap();

		assert_eq!(decoded.len(), 64);
		assert_eq!(&decoded[..8], &[0xFF; 8]);
	}

	#[test]
	fn test_generate_sprite() {
		let (width, height) = sizes::SMALL;
		let (data, offsets) = generate_container(2, (width, height));
		let mut spk = SpkFile::from_reader(Cursor::new(data), CodecConfig::spk());

		let frame = spk.decode_indexed(&SpkiFile::new(offsets), 1).unwrap().unwrap();
		assert_eq!((frame.width(), frame.height()), (width, height));
		assert_eq!(frame.format(), PixelFormat::Rgb565);
		// Transparent lead-in
		assert_eq!(frame.pixel(0, 0), Some(0xFFFF));
	}

	#[test]
	fn test_generate_metadata() {
		let metadata = CfpkFile::from_bytes(&generate_metadata(3, 6)).unwrap();

		assert_eq!(metadata.len(), 3);
		let perspective = &metadata.artifacts()[0].animations[0].perspectives[0];
		// Repeated placements fold in pairs
		assert_eq!(perspective.frames.len(), 3);
		assert_eq!(perspective.frames[0].duration_factor, 2);
	}

	#[test]
	fn test_sizes_constants() {
		assert_eq!(sizes::TINY, (16, 16));
		assert_eq!(sizes::LARGE, (320, 240));
	}
}
