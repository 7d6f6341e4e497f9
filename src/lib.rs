#![cfg_attr(docsrs, feature(doc_auto_cfg))]

//! `spk-rs` decodes Dark Eden sprite containers, their offset tables and the
//! artifact animation metadata that ties them together.
//!
//! The decoding stack lives in [`spk_types`]; [`extract`] drives whole-container
//! extraction to PNG, JSON and raw files.
//!
pub use spk_internal::*;

/// Extraction driver, re-exported from `spk_extract`.
pub use spk_extract as extract;
