//! Pull-based run-length decoder.

use std::io::{self, Read};

use log::trace;

use crate::file::io::ReadLeExt;

use super::pattern::CodecConfig;

/// Progress through the run currently being emitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Run {
	/// No run in progress, the next read pulls a word count
	Idle,
	/// Copying `remaining` more bytes from the source
	Copy {
		remaining: usize,
	},
	/// Emitting `remaining` more fill bytes, `emitted` already written
	Fill {
		emitted: usize,
		remaining: usize,
	},
}

/// One decode session over a compressed source.
///
/// The session owns its source and its operation counter: the counter keeps
/// advancing across every `read` call on the same session and is never shared
/// with other sessions. Decoded bytes are produced lazily by the [`Read`]
/// implementation; the session ends when the source is exhausted, including
/// when it ends inside a word count or inside a copy run.
///
/// # Examples
///
/// ```
/// use spk_types::file::pk::{CodecConfig, CopyFillPattern, FillPattern, PkStream};
///
/// let config = CodecConfig::new(
/// 	CopyFillPattern::new([true, false]).unwrap(),
/// 	FillPattern::byte(0xFF),
/// );
/// let source: &[u8] = &[0x02, 0x00, 0xAA, 0xBB, 0xCC, 0xDD, 0x01, 0x00];
/// let decoded = PkStream::new(source, config).decode_to_end().unwrap();
///
/// assert_eq!(decoded, vec![0xAA, 0xBB, 0xCC, 0xDD, 0xFF, 0xFF]);
/// ```
#[derive(Debug)]
pub struct PkStream<R> {
	source: R,
	config: CodecConfig,
	operation_index: usize,
	run: Run,
	exhausted: bool,
}

impl<R: Read> PkStream<R> {
	/// Starts a decode session positioned at the start of a compressed block.
	pub fn new(source: R, config: CodecConfig) -> Self {
		Self {
			source,
			config,
			operation_index: 0,
			run: Run::Idle,
			exhausted: false,
		}
	}

	/// Number of operations read so far.
	pub fn operation_index(&self) -> usize {
		self.operation_index
	}

	/// Returns `true` once the source has run dry.
	pub fn is_exhausted(&self) -> bool {
		self.exhausted
	}

	/// Decodes until the source is exhausted.
	pub fn decode_to_end(&mut self) -> io::Result<Vec<u8>> {
		let mut out = Vec::new();
		self.read_to_end(&mut out)?;
		Ok(out)
	}

	/// Decodes exactly `len` bytes.
	///
	/// Decoding stops once `len` bytes are produced. If the source runs dry
	/// first, the shortfall is padded with the fill pattern.
	pub fn decode_exact(&mut self, len: usize) -> io::Result<Vec<u8>> {
		let mut out = Vec::with_capacity(len);
		self.by_ref().take(len as u64).read_to_end(&mut out)?;

		let produced = out.len();
		if produced < len {
			trace!("Decoded {produced} of {len} declared bytes, padding with fill pattern");
			out.extend((0..len - produced).map(|i| self.config.fill.byte_at(i)));
		}
		Ok(out)
	}

	/// Pulls the next operation header. Returns `false` at end of source.
	fn next_operation(&mut self) -> io::Result<bool> {
		if self.exhausted {
			return Ok(false);
		}

		let Some(stored_words) = self.source.try_read_i16_le()? else {
			self.exhausted = true;
			return Ok(false);
		};

		let operation = self.config.copy_fill.operation(self.operation_index, stored_words);
		self.operation_index += 1;

		let len = operation.byte_len();
		self.run = if operation.is_copy() {
			Run::Copy {
				remaining: len,
			}
		} else {
			Run::Fill {
				emitted: 0,
				remaining: len,
			}
		};
		Ok(true)
	}
}

impl<R: Read> Read for PkStream<R> {
	fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
		let mut written = 0;

		while written < buf.len() {
			match self.run {
				Run::Idle => {
					if !self.next_operation()? {
						break;
					}
				}
				Run::Copy {
					remaining,
				} => {
					if remaining == 0 {
						self.run = Run::Idle;
						continue;
					}
					let want = remaining.min(buf.len() - written);
					let got = self.source.read_full(&mut buf[written..written + want])?;
					written += got;
					if got < want {
						trace!("Source ended inside a copy run, {} bytes short", remaining - got);
						self.exhausted = true;
						self.run = Run::Idle;
						break;
					}
					self.run = Run::Copy {
						remaining: remaining - got,
					};
				}
				Run::Fill {
					emitted,
					remaining,
				} => {
					if remaining == 0 {
						self.run = Run::Idle;
						continue;
					}
					let count = remaining.min(buf.len() - written);
					for (i, byte) in buf[written..written + count].iter_mut().enumerate() {
						*byte = self.config.fill.byte_at(emitted + i);
					}
					written += count;
					self.run = Run::Fill {
						emitted: emitted + count,
						remaining: remaining - count,
					};
				}
			}
		}

		Ok(written)
	}
}
