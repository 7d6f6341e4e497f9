//! Artifact animation metadata (`.cfpk`) support.
//!
//! The metadata file describes every artifact as a tree of animations,
//! perspectives (viewing directions) and frames. Frames reference sprites by
//! their position in the matching index table.
//!
//! # File Structure
//!
//! ```text
//! artifacts       u16   number of artifacts
//!   animations    u8    number of animations of this artifact
//!     perspectives i8   number of perspectives of this animation (negative = invalid)
//!       frames    u16   number of frames of this perspective
//!         sprite  u16   sprite index
//!         x       i16   origin x
//!         y       i16   origin y
//! ```
//!
//! All values are little-endian.
//!
//! # Frame Folding
//!
//! Consecutive frames of one perspective that repeat the same sprite at the
//! same origin are folded into a single [`AnimationFrame`] whose
//! `duration_factor` counts the repeats. Folding never crosses perspectives.
//!
//! # Examples
//!
//! ```
//! use spk_types::file::cfpk::File;
//!
//! let data = [
//! 	0x01, 0x00, // 1 artifact
//! 	0x01,       // 1 animation
//! 	0x01,       // 1 perspective
//! 	0x02, 0x00, // 2 frames
//! 	0x05, 0x00, 0x00, 0x00, 0x00, 0x00,
//! 	0x05, 0x00, 0x00, 0x00, 0x00, 0x00,
//! ];
//! let metadata = File::from_bytes(&data).unwrap();
//! let frame = &metadata.artifacts()[0].animations[0].perspectives[0].frames[0];
//!
//! assert_eq!(frame.placement.sprite_index, 5);
//! assert_eq!(frame.duration_factor, 2);
//! ```

use std::{
	collections::BTreeSet,
	fmt::Display,
	io::{Cursor, Read},
};

use log::debug;
use serde::Serialize;

use crate::file::{FileType, SpkError, io::ReadLeExt};

/// Where one raw frame draws: sprite and origin.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct FramePlacement {
	/// Position in the index table
	pub sprite_index: u16,
	/// Horizontal origin
	pub origin_x: i16,
	/// Vertical origin
	pub origin_y: i16,
}

/// A folded frame: a placement held for `duration_factor` ticks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct AnimationFrame {
	/// Sprite and origin
	#[serde(flatten)]
	pub placement: FramePlacement,
	/// Number of consecutive raw frames folded into this one, at least 1
	pub duration_factor: u32,
}

impl AnimationFrame {
	/// A single-tick frame.
	pub fn new(placement: FramePlacement) -> Self {
		Self {
			placement,
			duration_factor: 1,
		}
	}
}

/// Frames of one viewing direction.
#[derive(Debug, Default, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Perspective {
	/// Folded frames in play order
	pub frames: Vec<AnimationFrame>,
}

impl Perspective {
	/// Builds a perspective from raw frames, folding consecutive repeats.
	pub fn from_placements(placements: impl IntoIterator<Item = FramePlacement>) -> Self {
		let mut frames: Vec<AnimationFrame> = Vec::new();
		for placement in placements {
			match frames.last_mut() {
				Some(last) if last.placement == placement => last.duration_factor += 1,
				_ => frames.push(AnimationFrame::new(placement)),
			}
		}
		Self {
			frames,
		}
	}

	/// Total ticks, the sum of all duration factors.
	pub fn total_duration(&self) -> u32 {
		self.frames.iter().map(|f| f.duration_factor).sum()
	}
}

/// One animation, one perspective per direction.
#[derive(Debug, Default, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Animation {
	/// Perspectives in file order
	pub perspectives: Vec<Perspective>,
}

impl Animation {
	/// Distinct sprite indices referenced by any frame, ascending.
	pub fn sprite_indices(&self) -> BTreeSet<u16> {
		self.perspectives
			.iter()
			.flat_map(|p| p.frames.iter().map(|f| f.placement.sprite_index))
			.collect()
	}

	/// Total number of folded frames over all perspectives.
	pub fn frame_count(&self) -> usize {
		self.perspectives.iter().map(|p| p.frames.len()).sum()
	}
}

/// One in-game visual entity.
#[derive(Debug, Default, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Artifact {
	/// Animations in file order
	pub animations: Vec<Animation>,
}

/// Parsed animation metadata.
#[derive(Debug, Default, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct File {
	artifacts: Vec<Artifact>,
}

impl File {
	/// Opens and parses a metadata file from the specified path.
	pub fn open(path: impl AsRef<std::path::Path>) -> Result<Self, SpkError> {
		let data = std::fs::read(path)?;
		Self::from_bytes(&data)
	}

	/// Parses metadata from a byte slice. Trailing bytes are ignored.
	///
	/// # Errors
	///
	/// - [`SpkError::TruncatedCount`] if the artifact count is missing
	/// - [`SpkError::InvalidCount`] for a negative perspective count
	/// - [`SpkError::UnexpectedEof`] if the data ends inside the tree
	pub fn from_bytes(data: &[u8]) -> Result<Self, SpkError> {
		let mut cursor = Cursor::new(data);
		let file = Self::from_reader(&mut cursor)?;

		let trailing = data.len() as u64 - cursor.position();
		if trailing > 0 {
			debug!("Ignoring {trailing} trailing bytes after animation metadata");
		}
		Ok(file)
	}

	/// Parses metadata from any reader, consuming exactly the declared tree.
	pub fn from_reader<R: Read>(reader: &mut R) -> Result<Self, SpkError> {
		let mut count_buf = [0u8; 2];
		let read = reader.read_full(&mut count_buf)?;
		if read < count_buf.len() {
			return Err(SpkError::truncated_count(FileType::Metadata, count_buf.len(), read));
		}

		let count = u16::from_le_bytes(count_buf);
		let artifacts = (0..count).map(|_| read_artifact(reader)).collect::<Result<Vec<_>, _>>()?;

		Ok(Self {
			artifacts,
		})
	}

	/// Artifacts in file order.
	pub fn artifacts(&self) -> &[Artifact] {
		&self.artifacts
	}

	/// Number of artifacts.
	pub fn len(&self) -> usize {
		self.artifacts.len()
	}

	/// Returns `true` when no artifact is declared.
	pub fn is_empty(&self) -> bool {
		self.artifacts.is_empty()
	}
}

impl Display for File {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		let animations: usize = self.artifacts.iter().map(|a| a.animations.len()).sum();
		write!(f, "Animation metadata: {} artifacts, {} animations", self.artifacts.len(), animations)
	}
}

fn read_artifact<R: Read>(reader: &mut R) -> Result<Artifact, SpkError> {
	let count = reader.read_u8().map_err(|e| SpkError::from_io(e, FileType::Metadata, "animation count"))?;
	let animations = (0..count).map(|_| read_animation(reader)).collect::<Result<Vec<_>, _>>()?;
	Ok(Artifact {
		animations,
	})
}

fn read_animation<R: Read>(reader: &mut R) -> Result<Animation, SpkError> {
	let count =
		reader.read_i8().map_err(|e| SpkError::from_io(e, FileType::Metadata, "perspective count"))?;
	if count < 0 {
		return Err(SpkError::InvalidCount {
			file_type: FileType::Metadata,
			what: "perspective",
			count: i64::from(count),
		});
	}
	let perspectives = (0..count).map(|_| read_perspective(reader)).collect::<Result<Vec<_>, _>>()?;
	Ok(Animation {
		perspectives,
	})
}

fn read_perspective<R: Read>(reader: &mut R) -> Result<Perspective, SpkError> {
	let count = reader.read_u16_le().map_err(|e| SpkError::from_io(e, FileType::Metadata, "frame count"))?;
	let placements = (0..count).map(|_| read_placement(reader)).collect::<Result<Vec<_>, _>>()?;
	Ok(Perspective::from_placements(placements))
}

fn read_placement<R: Read>(reader: &mut R) -> Result<FramePlacement, SpkError> {
	let mut read = || -> std::io::Result<FramePlacement> {
		Ok(FramePlacement {
			sprite_index: reader.read_u16_le()?,
			origin_x: reader.read_i16_le()?,
			origin_y: reader.read_i16_le()?,
		})
	};
	read().map_err(|e| SpkError::from_io(e, FileType::Metadata, "frame"))
}
