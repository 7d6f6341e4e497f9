//! Prelude module for `spk_internal`.
//!
//! This module provides a convenient way to import commonly used types and traits.
//!
//! # Examples
//!
//! ```rust
//! use spk_internal::prelude::*;
//!
//! // Now you can use all common types directly
//! let pattern: CopyFillPattern = "011".parse().unwrap();
//! let config = CodecConfig::new(pattern, FillPattern::byte(0xFF));
//! assert_eq!(config, CodecConfig::ispk());
//!
//! let sheet = SpriteSheet::pack(vec![(0, Some(RgbaImage::new(2, 2)))]).unwrap();
//! assert_eq!(sheet.region(0).width, 2);
//! ```

// Re-export everything from spk_types::prelude
#[doc(inline)]
pub use spk_types::prelude::*;

// Re-export the entire spk_types module for advanced usage
#[doc(inline)]
pub use spk_types;
