//! This crate provides the decoding stack for the `spk-rs` project.
//!
//! # File Formats
//!
//! - **SPKI**: Offset tables listing where each compressed block of a container starts
//! - **SPK / ISPK**: Sprite containers of run-length compressed 16-bit scanlines
//! - **PK**: Generic containers of run-length compressed blobs
//! - **CFPK**: Artifact animation metadata (animations, perspectives, frames)
//!
//! # Examples
//!
//! Using the prelude (recommended):
//!
//! ```no_run
//! use spk_types::prelude::*;
//!
//! # fn main() -> Result<(), SpkError> {
//! let index = SpkiFile::open("Creature.spki")?;
//! let metadata = CfpkFile::open("Creature.cfpk")?;
//! let mut spk = SpkFile::open("Creature.spk", CodecConfig::spk())?;
//!
//! for artifact in metadata.artifacts() {
//!     for animation in &artifact.animations {
//!         if let Some(sheet) = spk.pack_sheet(&index, &animation.sprite_indices())? {
//!             println!("{}x{} sheet", sheet.width(), sheet.height());
//!         }
//!     }
//! }
//! # Ok(())
//! # }
//! ```
//!
//! Or use explicit paths:
//!
//! ```no_run
//! use spk_types::file::{pk::CodecConfig, spk::File};
//!
//! # fn main() -> Result<(), spk_types::file::SpkError> {
//! let mut spk = File::open("Items.ispk", CodecConfig::ispk())?;
//! let frame = spk.decode_sprite(0)?;
//! # Ok(())
//! # }
//! ```

pub mod file;

/// `use spk_types::prelude::*;` to import commonly used items.
pub mod prelude;
