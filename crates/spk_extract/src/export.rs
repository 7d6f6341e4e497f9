//! PNG and JSON writers plus the animation documents they serialize.

use std::{fs, path::Path};

use image::RgbaImage;
use log::trace;
use serde::Serialize;

use spk_internal::prelude::{Animation, Region, SpriteSheet};

use crate::{ExtractConfig, ExtractError};

/// Perspective names, in file order.
pub const DIRECTIONS: [&str; 8] = ["sw", "s", "se", "e", "ne", "n", "nw", "w"];

/// Texture reference written next to each animation (`texture.sgf`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TextureDocument {
	/// Path of the sheet, relative to the document
	pub texture: String,
}

impl TextureDocument {
	/// Reference to the sheet of animation `name`.
	pub fn for_animation(name: &str) -> Self {
		Self {
			texture: format!("../../texture/{name}/texture.png"),
		}
	}
}

/// Frame timing and placement document (`animation.jsf`).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnimationDocument {
	/// Render scale
	pub scale: f64,
	/// Texture reference document
	pub texture: String,
	/// Name of the direction shown by default
	pub default_animation: String,
	/// One entry per perspective
	pub animations: Vec<DirectionDocument>,
}

/// Frames of one direction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DirectionDocument {
	/// Direction name
	pub name: String,
	/// Frames in play order
	pub frames: Vec<FrameDocument>,
}

/// One folded frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FrameDocument {
	/// Draw anchor
	pub anchor: Anchor,
	/// Region inside the sheet
	pub region: Region,
	/// Display time in milliseconds
	pub delay: u32,
}

/// Draw anchor of a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Anchor {
	/// Horizontal anchor
	pub x: i32,
	/// Vertical anchor
	pub y: i32,
}

impl AnimationDocument {
	/// Describes every perspective of `animation` against its packed sheet.
	pub fn new(animation: &Animation, sheet: &SpriteSheet, settings: &ExtractConfig) -> Self {
		let animations = animation
			.perspectives
			.iter()
			.enumerate()
			.map(|(i, perspective)| DirectionDocument {
				name: direction_name(i),
				frames: perspective
					.frames
					.iter()
					.map(|frame| {
						let region = sheet.region(frame.placement.sprite_index);
						let odd = |n: u32| i32::from(n % 2 == 1);
						FrameDocument {
							anchor: Anchor {
								x: -(i32::from(frame.placement.origin_x) + odd(region.width))
									+ settings.anchor_offset_x,
								y: -(i32::from(frame.placement.origin_y) + odd(region.height))
									+ settings.anchor_offset_y,
							},
							region,
							delay: frame.duration_factor.saturating_mul(settings.frame_delay_ms),
						}
					})
					.collect(),
			})
			.collect();

		Self {
			scale: 1.0,
			texture: "texture.sgf".to_string(),
			default_animation: DIRECTIONS[0].to_string(),
			animations,
		}
	}
}

/// Name of perspective `index`; perspectives past the eighth use their index.
pub fn direction_name(index: usize) -> String {
	DIRECTIONS.get(index).map_or_else(|| index.to_string(), |name| (*name).to_string())
}

/// Encodes `image` as PNG at `path`, creating parent directories.
pub fn save_png(image: &RgbaImage, path: &Path) -> Result<(), ExtractError> {
	create_parent(path)?;
	image.save(path)?;
	trace!("Wrote {}x{} PNG to {}", image.width(), image.height(), path.display());
	Ok(())
}

/// Writes `value` as pretty-printed JSON at `path`, creating parent directories.
pub fn write_json<T: Serialize>(value: &T, path: &Path) -> Result<(), ExtractError> {
	create_parent(path)?;
	let json = serde_json::to_string_pretty(value)?;
	fs::write(path, json)?;
	Ok(())
}

/// Writes raw bytes at `path`, creating parent directories.
pub fn write_bytes(data: &[u8], path: &Path) -> Result<(), ExtractError> {
	create_parent(path)?;
	fs::write(path, data)?;
	Ok(())
}

fn create_parent(path: &Path) -> Result<(), ExtractError> {
	if let Some(parent) = path.parent() {
		fs::create_dir_all(parent)?;
	}
	Ok(())
}
