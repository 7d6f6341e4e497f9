//! Run-length codec shared by every compressed block in the game archives.
//!
//! Sprite containers (`.spk`, `.ispk`) and generic blob containers (`.pk`)
//! store their payloads as a sequence of operations. Each operation starts
//! with a signed 16-bit little-endian word count; the magnitude times two is
//! the byte length of the run. Whether a run copies bytes from the stream or
//! repeats a fill pattern is not stored in the data: it is decided by the
//! position of the operation within its block, through a repeating
//! [`CopyFillPattern`].
//!
//! # Operation Layout
//!
//! ```text
//! Offset  Size        Field   Description
//! ------  ----------  ------  --------------------------------------------
//! +0x00   2           words   Run length in 16-bit words (i16, magnitude used)
//! +0x02   words x 2   data    Present only for copy runs
//! ```
//!
//! # Examples
//!
//! ```
//! use spk_types::file::pk::{CodecConfig, PkStream};
//!
//! // "01": fill first, then copy
//! let block: &[u8] = &[0x01, 0x00, 0x01, 0x00, 0x12, 0x34];
//! let decoded = PkStream::new(block, CodecConfig::spk()).decode_to_end().unwrap();
//!
//! assert_eq!(decoded, vec![0xFF, 0xFF, 0x12, 0x34]);
//! ```

mod pattern;
mod stream;


pub use pattern::{CodecConfig, CompressionOperation, CopyFillPattern, FillPattern};
pub use stream::PkStream;
