//! Extraction driver for the `spk-rs` project.
//!
//! Walks an index table (and, for animations, the artifact metadata) and hands
//! decoded sprites, sheets and blobs to PNG, JSON and raw writers.
//!
//! # Examples
//!
//! ```no_run
//! use spk_extract::{ExtractConfig, ExtractionMode, Extractor};
//! use std::path::Path;
//!
//! # fn main() -> Result<(), spk_extract::ExtractError> {
//! let extractor = Extractor::new(ExtractConfig::load(Some(Path::new("spk.toml")))?)?;
//! let report = extractor.run(
//!     &ExtractionMode::Sprites,
//!     Path::new("Creature.spk"),
//!     Path::new("Creature.spki"),
//!     Path::new("out/"),
//! )?;
//! println!("{report}");
//! # Ok(())
//! # }
//! ```

mod error;
pub mod export;
mod mode;
mod settings;

pub use error::ExtractError;
pub use export::{AnimationDocument, TextureDocument};
pub use mode::{ExtractReport, ExtractionMode, Extractor};
pub use settings::ExtractConfig;
