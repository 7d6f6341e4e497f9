//! Synthetic containers written to a temporary directory

use std::path::{Path, PathBuf};

use spk_rs::prelude::SpkiFile;

/// Sprite block whose scanlines copy `width` copies of `pixel`.
pub fn sprite_block(width: i16, height: i16, pixel: u16) -> Vec<u8> {
	let mut data = Vec::new();
	data.extend_from_slice(&width.to_le_bytes());
	data.extend_from_slice(&height.to_le_bytes());
	for _ in 0..height.max(0) {
		let mut payload = Vec::new();
		payload.extend_from_slice(&0i16.to_le_bytes());
		payload.extend_from_slice(&width.to_le_bytes());
		for _ in 0..width {
			payload.extend_from_slice(&pixel.to_le_bytes());
		}
		data.extend_from_slice(&((payload.len() / 2 + 1) as u16).to_le_bytes());
		data.extend_from_slice(&1u16.to_le_bytes());
		data.extend_from_slice(&payload);
	}
	data
}

/// Placement triple as stored in the metadata.
pub type Placement = (u16, i16, i16);

/// Metadata with one artifact holding the given animations of perspectives.
pub fn metadata(animations: &[&[&[Placement]]]) -> Vec<u8> {
	let mut data = 1u16.to_le_bytes().to_vec();
	data.push(animations.len() as u8);
	for perspectives in animations {
		data.push(perspectives.len() as u8);
		for frames in *perspectives {
			data.extend_from_slice(&(frames.len() as u16).to_le_bytes());
			for (sprite, x, y) in *frames {
				data.extend_from_slice(&sprite.to_le_bytes());
				data.extend_from_slice(&x.to_le_bytes());
				data.extend_from_slice(&y.to_le_bytes());
			}
		}
	}
	data
}

/// Container and index files on disk.
pub struct Fixture {
	/// Keeps the directory alive
	pub dir: tempfile::TempDir,
	pub container: PathBuf,
	pub index: PathBuf,
	pub output: PathBuf,
}

impl Fixture {
	/// Writes `blocks` back to back and an index pointing at each of them.
	pub fn new(blocks: &[Vec<u8>]) -> Self {
		let dir = tempfile::tempdir().unwrap();
		let mut data = Vec::new();
		let mut offsets = Vec::new();
		for block in blocks {
			offsets.push(data.len() as u64);
			data.extend_from_slice(block);
		}

		let container = dir.path().join("Creature.spk");
		let index = dir.path().join("Creature.spki");
		let output = dir.path().join("out");
		std::fs::write(&container, data).unwrap();
		std::fs::write(&index, SpkiFile::new(offsets).to_bytes().unwrap()).unwrap();

		Self {
			dir,
			container,
			index,
			output,
		}
	}

	/// Writes a metadata file next to the container.
	pub fn with_metadata(&self, data: &[u8]) -> PathBuf {
		let path = self.dir.path().join("Creature.cfpk");
		std::fs::write(&path, data).unwrap();
		path
	}

	/// Path relative to the output directory.
	pub fn out(&self, relative: impl AsRef<Path>) -> PathBuf {
		self.output.join(relative)
	}
}
