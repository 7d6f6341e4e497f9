//! Copy/fill operation patterns and codec configuration.

use std::{fmt::Display, str::FromStr, sync::Arc};

use crate::file::SpkError;

/// A single decoded run, tagged by what fills it.
///
/// Lengths are stored in 16-bit words as they appear in the stream; the byte
/// length is always twice the word count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CompressionOperation {
	/// Bytes are copied verbatim from the source stream
	Copy(u16),
	/// Bytes are taken from the repeating fill pattern
	Fill(u16),
}

impl CompressionOperation {
	/// Length of the run in 16-bit words.
	pub fn word_count(&self) -> u16 {
		match self {
			Self::Copy(words) | Self::Fill(words) => *words,
		}
	}

	/// Length of the run in bytes.
	pub fn byte_len(&self) -> usize {
		self.word_count() as usize * 2
	}

	/// Returns `true` for a copy run.
	pub fn is_copy(&self) -> bool {
		matches!(self, Self::Copy(_))
	}
}

/// Repeating sequence deciding whether the n-th operation copies or fills.
///
/// Written as a bit string on the command line: `'1'` is a copy and `'0'`
/// a fill, so `"01"` (plain sprite containers) starts with a fill run and
/// alternates, while `"011"` (indexed sprite containers) follows each fill
/// with two copies.
///
/// # Examples
///
/// ```
/// use spk_types::file::pk::{CompressionOperation, CopyFillPattern};
///
/// let pattern: CopyFillPattern = "01".parse().unwrap();
/// assert!(!pattern.is_copy(0));
/// assert!(pattern.is_copy(1));
/// assert!(!pattern.is_copy(2));
/// assert_eq!(pattern.operation(1, 3), CompressionOperation::Copy(3));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CopyFillPattern {
	steps: Arc<[bool]>,
}

impl CopyFillPattern {
	/// Creates a pattern from explicit steps (`true` = copy).
	///
	/// # Errors
	///
	/// Returns [`SpkError::InvalidPattern`] if `steps` is empty.
	pub fn new(steps: impl Into<Vec<bool>>) -> Result<Self, SpkError> {
		let steps: Vec<bool> = steps.into();
		if steps.is_empty() {
			return Err(SpkError::InvalidPattern(
				"copy/fill pattern must contain at least one element".to_string(),
			));
		}
		Ok(Self {
			steps: steps.into(),
		})
	}

	/// Pattern used by plain sprite containers (`"01"`).
	pub fn spk() -> Self {
		Self {
			steps: Arc::from([false, true]),
		}
	}

	/// Pattern used by indexed sprite containers (`"011"`).
	pub fn ispk() -> Self {
		Self {
			steps: Arc::from([false, true, true]),
		}
	}

	/// Returns `true` if the operation at `operation_index` is a copy.
	pub fn is_copy(&self, operation_index: usize) -> bool {
		self.steps[operation_index % self.steps.len()]
	}

	/// Tags the operation at `operation_index` with the magnitude of its
	/// stored (signed) word count.
	pub fn operation(&self, operation_index: usize, stored_words: i16) -> CompressionOperation {
		let words = stored_words.unsigned_abs();
		if self.is_copy(operation_index) {
			CompressionOperation::Copy(words)
		} else {
			CompressionOperation::Fill(words)
		}
	}

	/// Number of steps before the pattern repeats.
	pub fn len(&self) -> usize {
		self.steps.len()
	}

	/// Always `false`, a pattern cannot be empty.
	pub fn is_empty(&self) -> bool {
		self.steps.is_empty()
	}

	/// Returns the pattern steps.
	pub fn steps(&self) -> &[bool] {
		&self.steps
	}
}

impl Default for CopyFillPattern {
	fn default() -> Self {
		Self::spk()
	}
}

impl FromStr for CopyFillPattern {
	type Err = SpkError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		let steps = s
			.trim()
			.chars()
			.map(|c| match c {
				'1' => Ok(true),
				'0' => Ok(false),
				other => Err(SpkError::InvalidPattern(format!(
					"unexpected character '{other}' in copy/fill pattern \"{s}\""
				))),
			})
			.collect::<Result<Vec<_>, _>>()?;
		Self::new(steps)
	}
}

impl Display for CopyFillPattern {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		for &step in self.steps.iter() {
			write!(f, "{}", if step { '1' } else { '0' })?;
		}
		Ok(())
	}
}

/// Repeating byte pattern emitted by fill runs.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FillPattern {
	bytes: Arc<[u8]>,
}

impl FillPattern {
	/// Creates a fill pattern.
	///
	/// # Errors
	///
	/// Returns [`SpkError::InvalidPattern`] if `bytes` is empty.
	pub fn new(bytes: impl Into<Vec<u8>>) -> Result<Self, SpkError> {
		let bytes: Vec<u8> = bytes.into();
		if bytes.is_empty() {
			return Err(SpkError::InvalidPattern("fill pattern must not be empty".to_string()));
		}
		Ok(Self {
			bytes: bytes.into(),
		})
	}

	/// Single-byte fill pattern.
	pub fn byte(value: u8) -> Self {
		Self {
			bytes: Arc::from([value]),
		}
	}

	/// Returns byte `i` of a run made of this pattern.
	#[inline]
	pub fn byte_at(&self, i: usize) -> u8 {
		self.bytes[i % self.bytes.len()]
	}

	/// Returns the raw pattern bytes.
	pub fn bytes(&self) -> &[u8] {
		&self.bytes
	}
}

impl Default for FillPattern {
	/// Opaque white (`0xFF`), the transparency key of sprite containers.
	fn default() -> Self {
		Self::byte(0xFF)
	}
}

/// Immutable container-wide codec convention.
///
/// The same convention applies to every block of one container, so a single
/// configuration is built per run and cloned into each decode session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct CodecConfig {
	/// Copy/fill operation pattern
	pub copy_fill: CopyFillPattern,
	/// Bytes emitted by fill runs
	pub fill: FillPattern,
}

impl CodecConfig {
	/// Creates a configuration from its parts.
	pub fn new(copy_fill: CopyFillPattern, fill: FillPattern) -> Self {
		Self {
			copy_fill,
			fill,
		}
	}

	/// Plain sprite container convention (`"01"`, white fill).
	pub fn spk() -> Self {
		Self::new(CopyFillPattern::spk(), FillPattern::default())
	}

	/// Indexed sprite container convention (`"011"`, white fill).
	pub fn ispk() -> Self {
		Self::new(CopyFillPattern::ispk(), FillPattern::default())
	}
}
