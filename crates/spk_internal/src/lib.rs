//! This module is separated into its own crate so the facade and the extraction crate share one re-export surface, and should not be used directly.

/// `use spk_rs::prelude::*;` to import commonly used items.
pub mod prelude;

// Re-export spk_types for convenience
pub use spk_types;

// Re-export commonly used types at crate root
pub use spk_types::file::{CfpkFile, CodecConfig, SpkError, SpkFile, SpkiFile};
