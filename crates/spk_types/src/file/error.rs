//! Error types for container, index and metadata parsing.

use std::fmt::Display;

use thiserror::Error;

/// Kinds of files handled by `spk-rs`, used to tag errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileType {
	/// Offset table (`.spki`, `.ispki`, `.pki`)
	Index,
	/// Compressed sprite blocks inside a sprite container (`.spk`, `.ispk`)
	Sprite,
	/// Artifact animation metadata (`.cfpk`)
	Metadata,
	/// Generic compressed blob container (`.pk`)
	Pack,
}

impl Display for FileType {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			FileType::Index => write!(f, "index table"),
			FileType::Sprite => write!(f, "sprite block"),
			FileType::Metadata => write!(f, "animation metadata"),
			FileType::Pack => write!(f, "compressed blob"),
		}
	}
}

/// Errors that can occur when decoding containers, index tables or metadata.
///
/// A sprite that declares a non-positive size, or an animation whose frames
/// all decode to nothing, is not an error: those outcomes are reported as
/// `Ok(None)` by the decoding functions.
#[derive(Debug, Error)]
pub enum SpkError {
	/// The stream ended before a count prefix could be read
	#[error("{file_type} truncated before count: expected {expected} bytes, got {actual} bytes")]
	TruncatedCount {
		/// File type being parsed
		file_type: FileType,
		/// Number of bytes the count prefix needs
		expected: usize,
		/// Number of bytes available
		actual: usize,
	},

	/// The stream ended part way through a counted array
	#[error("{file_type} truncated mid-array: {declared} entries declared, only {read} read")]
	TruncatedEntries {
		/// File type being parsed
		file_type: FileType,
		/// Number of entries declared by the count prefix
		declared: usize,
		/// Number of entries fully read before the stream ended
		read: usize,
	},

	/// A declared count was negative or out of range
	#[error("{file_type}: invalid {what} count {count}")]
	InvalidCount {
		/// File type being parsed
		file_type: FileType,
		/// Which array the count belongs to
		what: &'static str,
		/// Raw declared value
		count: i64,
	},

	/// The stream ended inside a fixed-size record
	#[error("{file_type}: unexpected end of stream while reading {context}")]
	UnexpectedEof {
		/// File type being parsed
		file_type: FileType,
		/// Record that was being read
		context: &'static str,
	},

	/// A copy/fill or fill pattern could not be used
	#[error("Invalid pattern: {0}")]
	InvalidPattern(String),

	/// A synthesized bitmap could not be read back
	#[error("Invalid bitmap: {0}")]
	InvalidBitmap(String),

	/// A sprite index has no entry in the index table
	#[error("Sprite index {index} out of range (index table holds {count} offsets)")]
	SpriteIndexOutOfRange {
		/// Requested sprite index
		index: usize,
		/// Number of offsets in the index table
		count: usize,
	},

	/// An offset does not fit the 32-bit on-disk field
	#[error("{file_type}: offset 0x{offset:X} does not fit in 32 bits")]
	OffsetOutOfRange {
		/// File type being written
		file_type: FileType,
		/// Offending offset
		offset: u64,
	},

	/// IO error
	#[error(transparent)]
	Io(#[from] std::io::Error),
}

impl SpkError {
	/// Creates a [`SpkError::TruncatedCount`] error
	pub fn truncated_count(file_type: FileType, expected: usize, actual: usize) -> Self {
		Self::TruncatedCount {
			file_type,
			expected,
			actual,
		}
	}

	/// Creates a [`SpkError::UnexpectedEof`] error
	pub fn unexpected_eof(file_type: FileType, context: &'static str) -> Self {
		Self::UnexpectedEof {
			file_type,
			context,
		}
	}

	/// Maps an `UnexpectedEof` IO error to [`SpkError::UnexpectedEof`], keeping
	/// every other IO error as is.
	pub fn from_io(err: std::io::Error, file_type: FileType, context: &'static str) -> Self {
		if err.kind() == std::io::ErrorKind::UnexpectedEof {
			Self::unexpected_eof(file_type, context)
		} else {
			Self::Io(err)
		}
	}

	/// Returns `true` when the error describes malformed input rather than an IO fault.
	pub fn is_format_error(&self) -> bool {
		!matches!(self, Self::Io(_))
	}
}
