//! Horizontal sprite sheet packing.
//!
//! Frames are laid left to right on a single row in ascending sprite index
//! order. Every requested index gets a [`Region`]; indices whose sprite decoded
//! to nothing keep a zero region and contribute no pixels.

use std::collections::BTreeMap;

use image::{RgbaImage, imageops};
use log::debug;
use serde::Serialize;

/// Placement of one frame inside a sheet.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Region {
	/// Left edge
	pub x: u32,
	/// Top edge
	pub y: u32,
	/// Width in pixels
	pub width: u32,
	/// Height in pixels
	pub height: u32,
}

impl Region {
	/// Returns `true` for the zero region recorded for absent frames.
	pub fn is_empty(&self) -> bool {
		self.width == 0 || self.height == 0
	}
}

/// Composited atlas plus the region of every requested sprite index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpriteSheet {
	image: RgbaImage,
	regions: BTreeMap<u16, Region>,
}

impl SpriteSheet {
	/// Packs frames in iteration order.
	///
	/// Returns `None` when no frame carries pixels, the caller then has
	/// nothing to export.
	///
	/// # Examples
	///
	/// ```
	/// use image::RgbaImage;
	/// use spk_types::file::sheet::SpriteSheet;
	///
	/// let frames = vec![(1, Some(RgbaImage::new(4, 2))), (2, None), (5, Some(RgbaImage::new(3, 6)))];
	/// let sheet = SpriteSheet::pack(frames).unwrap();
	///
	/// assert_eq!((sheet.width(), sheet.height()), (7, 6));
	/// assert_eq!(sheet.region(5).x, 4);
	/// assert!(sheet.region(2).is_empty());
	/// ```
	pub fn pack<I>(frames: I) -> Option<Self>
	where
		I: IntoIterator<Item = (u16, Option<RgbaImage>)>,
	{
		let mut regions = BTreeMap::new();
		let mut placed = Vec::new();
		let (mut cursor, mut height) = (0u32, 0u32);

		for (index, frame) in frames {
			let region = match frame {
				Some(frame) => {
					let region = Region {
						x: cursor,
						y: 0,
						width: frame.width(),
						height: frame.height(),
					};
					cursor += frame.width();
					height = height.max(frame.height());
					placed.push((region, frame));
					region
				}
				None => Region::default(),
			};
			regions.insert(index, region);
		}

		if placed.is_empty() {
			debug!("No frame of {} decoded to an image, sheet is absent", regions.len());
			return None;
		}

		let mut image = RgbaImage::new(cursor, height);
		for (region, frame) in &placed {
			imageops::replace(&mut image, frame, i64::from(region.x), i64::from(region.y));
		}

		Some(Self {
			image,
			regions,
		})
	}

	/// Sheet width, the sum of placed frame widths.
	pub fn width(&self) -> u32 {
		self.image.width()
	}

	/// Sheet height, the tallest placed frame.
	pub fn height(&self) -> u32 {
		self.image.height()
	}

	/// The composited pixels.
	pub fn image(&self) -> &RgbaImage {
		&self.image
	}

	/// Region of `sprite_index`; zero when the index was absent or never requested.
	pub fn region(&self, sprite_index: u16) -> Region {
		self.regions.get(&sprite_index).copied().unwrap_or_default()
	}

	/// All regions keyed by sprite index.
	pub fn regions(&self) -> &BTreeMap<u16, Region> {
		&self.regions
	}
}
