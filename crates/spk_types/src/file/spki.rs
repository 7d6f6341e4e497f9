//! Offset table (`.spki` / `.ispki` / `.pki`) support.
//!
//! An index file lists the byte offset of every compressed block stored in
//! the matching container. Offsets are addressed by position: sprite index `n`
//! in the animation metadata refers to the `n`-th offset of this table.
//!
//! # File Structure
//!
//! ```text
//! Offset  Size         Field    Description
//! ------  -----------  -------  ---------------------------------------
//! 0x00    2            count    Number of offsets (u16, little-endian)
//! 0x02    count x 4    offsets  Byte offsets into the container (u32, little-endian)
//! ```
//!
//! Offsets are unsigned and may exceed `i32::MAX`, so they are widened to
//! `u64` on load.
//!
//! # Examples
//!
//! ```
//! use spk_types::file::spki::File;
//!
//! let data = [0x02, 0x00, 0x00, 0x10, 0x00, 0x00, 0x00, 0x20, 0x00, 0x00];
//! let index = File::from_bytes(&data).unwrap();
//!
//! assert_eq!(index.offsets(), &[0x1000, 0x2000]);
//! ```

use std::io::{Cursor, Read};

use crate::file::{FileType, SpkError, io::ReadLeExt};

mod constants {
	/// Size of the count prefix
	pub const COUNT_SIZE: usize = 2;

	/// Size of a single offset entry
	pub const ENTRY_SIZE: usize = 4;
}

/// Parsed offset table.
#[derive(Debug, Default, Clone, PartialEq, Eq, Hash)]
pub struct File {
	offsets: Vec<u64>,
}

impl File {
	/// Creates an index table from already known offsets.
	pub fn new(offsets: Vec<u64>) -> Self {
		Self {
			offsets,
		}
	}

	/// Opens and parses an index file from the specified path.
	pub fn open(path: impl AsRef<std::path::Path>) -> Result<Self, SpkError> {
		let data = std::fs::read(path)?;
		Self::from_bytes(&data)
	}

	/// Parses an index table from a byte slice.
	///
	/// A zero count yields an empty table, which callers treat as
	/// "nothing to extract".
	///
	/// # Errors
	///
	/// - [`SpkError::TruncatedCount`] if fewer than two bytes are available
	/// - [`SpkError::TruncatedEntries`] if the data ends before `count` offsets
	pub fn from_bytes(data: &[u8]) -> Result<Self, SpkError> {
		Self::from_reader(&mut Cursor::new(data))
	}

	/// Parses an index table from any reader, consuming exactly the bytes it declares.
	pub fn from_reader<R: Read>(reader: &mut R) -> Result<Self, SpkError> {
		let mut count_buf = [0u8; constants::COUNT_SIZE];
		let read = reader.read_full(&mut count_buf)?;
		if read < constants::COUNT_SIZE {
			return Err(SpkError::truncated_count(FileType::Index, constants::COUNT_SIZE, read));
		}

		let count = u16::from_le_bytes(count_buf) as usize;
		let mut offsets = Vec::with_capacity(count);
		let mut entry = [0u8; constants::ENTRY_SIZE];
		for _ in 0..count {
			if reader.read_full(&mut entry)? < constants::ENTRY_SIZE {
				return Err(SpkError::TruncatedEntries {
					file_type: FileType::Index,
					declared: count,
					read: offsets.len(),
				});
			}
			offsets.push(u64::from(u32::from_le_bytes(entry)));
		}

		Ok(Self {
			offsets,
		})
	}

	/// Serializes the table back to its on-disk form.
	///
	/// # Errors
	///
	/// Returns [`SpkError::InvalidCount`] for more than `u16::MAX` entries and
	/// [`SpkError::OffsetOutOfRange`] for an offset beyond `u32::MAX`.
	pub fn to_bytes(&self) -> Result<Vec<u8>, SpkError> {
		let count = u16::try_from(self.offsets.len()).map_err(|_| SpkError::InvalidCount {
			file_type: FileType::Index,
			what: "offset",
			count: self.offsets.len() as i64,
		})?;

		let mut bytes =
			Vec::with_capacity(constants::COUNT_SIZE + self.offsets.len() * constants::ENTRY_SIZE);
		bytes.extend_from_slice(&count.to_le_bytes());
		for &offset in &self.offsets {
			let offset = u32::try_from(offset).map_err(|_| SpkError::OffsetOutOfRange {
				file_type: FileType::Index,
				offset,
			})?;
			bytes.extend_from_slice(&offset.to_le_bytes());
		}
		Ok(bytes)
	}

	/// Returns all offsets in file order.
	pub fn offsets(&self) -> &[u64] {
		&self.offsets
	}

	/// Returns the offset stored at `index`, if any.
	pub fn get(&self, index: usize) -> Option<u64> {
		self.offsets.get(index).copied()
	}

	/// Returns the offset stored at `index`, or [`SpkError::SpriteIndexOutOfRange`].
	pub fn offset_of(&self, index: usize) -> Result<u64, SpkError> {
		self.get(index).ok_or(SpkError::SpriteIndexOutOfRange {
			index,
			count: self.offsets.len(),
		})
	}

	/// Number of offsets in the table.
	pub fn len(&self) -> usize {
		self.offsets.len()
	}

	/// Returns `true` when the table holds no offsets.
	pub fn is_empty(&self) -> bool {
		self.offsets.is_empty()
	}

	/// Iterates over `(index, offset)` pairs in file order.
	pub fn iter(&self) -> impl Iterator<Item = (usize, u64)> + '_ {
		self.offsets.iter().copied().enumerate()
	}
}

impl std::fmt::Display for File {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "Index table: {} offsets", self.offsets.len())
	}
}

impl TryFrom<&[u8]> for File {
	type Error = SpkError;

	fn try_from(value: &[u8]) -> Result<Self, Self::Error> {
		Self::from_bytes(value)
	}
}
