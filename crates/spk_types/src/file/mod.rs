//! File type support for `spk-rs` project.

mod error;
pub mod io;

pub mod cfpk;
pub mod pk;
pub mod placeholder;
pub mod sheet;
pub mod spk;
pub mod spki;

// Re-export unified error type
pub use error::{FileType, SpkError};

// Image buffer produced by sprite conversion and sheet packing
pub use image::RgbaImage;

// Re-export main file types
pub use cfpk::{
	Animation, AnimationFrame, Artifact, File as CfpkFile, FramePlacement, Perspective,
};
pub use pk::{CodecConfig, CompressionOperation, CopyFillPattern, FillPattern, PkStream};
pub use sheet::{Region, SpriteSheet};
pub use spk::{BitmapHeader, DecodedFrame, File as SpkFile, PixelFormat};
pub use spki::File as SpkiFile;
