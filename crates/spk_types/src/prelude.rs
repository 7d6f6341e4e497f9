//! Prelude module for `spk_types`.
//!
//! This module provides a convenient way to import commonly used types and traits.
//!
//! # Examples
//!
//! ```no_run
//! use spk_types::prelude::*;
//!
//! let config = CodecConfig::ispk();
//! let index = SpkiFile::from_bytes(&[0x00, 0x00]).unwrap();
//! assert!(index.is_empty());
//! ```

// File module types
#[doc(inline)]
pub use crate::file::{
	// Metadata types
	Animation,
	AnimationFrame,
	Artifact,
	// Sprite types
	BitmapHeader,
	CfpkFile,
	// Codec types
	CodecConfig,
	CompressionOperation,
	CopyFillPattern,
	DecodedFrame,
	FileType,
	FillPattern,
	FramePlacement,
	Perspective,
	PixelFormat,
	PkStream,
	// Sheet types
	Region,
	RgbaImage,
	SpkError,
	SpkFile,
	// Index types
	SpkiFile,
	SpriteSheet,
};

#[doc(inline)]
pub use crate::file::io::ReadLeExt;

// Re-export the file module for advanced usage
#[doc(inline)]
pub use crate::file;
