//! Little-endian primitive readers shared by every parser in this crate.

use std::io::{self, Read};

/// Little-endian integer reads on top of any [`Read`].
///
/// The `read_*` methods fail with [`io::ErrorKind::UnexpectedEof`] when the
/// stream ends early. [`ReadLeExt::read_full`] and [`ReadLeExt::try_read_i16_le`]
/// instead report how far they got, for callers that treat a short stream as
/// a normal end of input.
pub trait ReadLeExt: Read {
	/// Reads a single unsigned byte.
	fn read_u8(&mut self) -> io::Result<u8> {
		let mut buf = [0u8; 1];
		self.read_exact(&mut buf)?;
		Ok(buf[0])
	}

	/// Reads a single signed byte.
	fn read_i8(&mut self) -> io::Result<i8> {
		Ok(self.read_u8()? as i8)
	}

	/// Reads an unsigned 16-bit little-endian integer.
	fn read_u16_le(&mut self) -> io::Result<u16> {
		let mut buf = [0u8; 2];
		self.read_exact(&mut buf)?;
		Ok(u16::from_le_bytes(buf))
	}

	/// Reads a signed 16-bit little-endian integer.
	fn read_i16_le(&mut self) -> io::Result<i16> {
		let mut buf = [0u8; 2];
		self.read_exact(&mut buf)?;
		Ok(i16::from_le_bytes(buf))
	}

	/// Reads an unsigned 32-bit little-endian integer.
	fn read_u32_le(&mut self) -> io::Result<u32> {
		let mut buf = [0u8; 4];
		self.read_exact(&mut buf)?;
		Ok(u32::from_le_bytes(buf))
	}

	/// Fills as much of `buf` as the stream allows and returns the number of
	/// bytes read. Only returns fewer than `buf.len()` bytes at end of stream.
	fn read_full(&mut self, buf: &mut [u8]) -> io::Result<usize> {
		let mut total = 0;
		while total < buf.len() {
			match self.read(&mut buf[total..]) {
				Ok(0) => break,
				Ok(n) => total += n,
				Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
				Err(e) => return Err(e),
			}
		}
		Ok(total)
	}

	/// Reads a signed 16-bit little-endian integer, returning `None` if the
	/// stream ends before both bytes are available.
	fn try_read_i16_le(&mut self) -> io::Result<Option<i16>> {
		let mut buf = [0u8; 2];
		if self.read_full(&mut buf)? < buf.len() {
			return Ok(None);
		}
		Ok(Some(i16::from_le_bytes(buf)))
	}
}

impl<R: Read + ?Sized> ReadLeExt for R {}
