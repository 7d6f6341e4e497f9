//! The "NULL IMAGE" placeholder substituted for sprites without pixels.

use image::{Rgba, RgbaImage};

mod constants {
	/// Placeholder canvas width
	pub const WIDTH: u32 = 200;

	/// Placeholder canvas height
	pub const HEIGHT: u32 = 60;

	/// Left edge of the label
	pub const TEXT_X: u32 = 10;

	/// Baseline of the label
	pub const TEXT_BASELINE: u32 = 10;

	/// Label text
	pub const TEXT: &str = "NULL IMAGE";

	/// Label color
	pub const COLOR: [u8; 4] = [0xFF, 0x00, 0x00, 0xFF];

	/// Glyph cell width
	pub const GLYPH_WIDTH: u32 = 5;

	/// Glyph cell height
	pub const GLYPH_HEIGHT: u32 = 7;

	/// Horizontal advance between glyphs
	pub const GLYPH_ADVANCE: u32 = 6;
}

/// Red "NULL IMAGE" label on a transparent 200x60 canvas.
pub fn null_image() -> RgbaImage {
	let mut image = RgbaImage::new(constants::WIDTH, constants::HEIGHT);
	let top = constants::TEXT_BASELINE - constants::GLYPH_HEIGHT;
	draw_text(&mut image, constants::TEXT_X, top, constants::TEXT, Rgba(constants::COLOR));
	image
}

fn draw_text(image: &mut RgbaImage, x: u32, y: u32, text: &str, color: Rgba<u8>) {
	for (n, c) in text.chars().enumerate() {
		let origin_x = x + n as u32 * constants::GLYPH_ADVANCE;
		for (row, bits) in glyph_rows(c).iter().enumerate() {
			for col in 0..constants::GLYPH_WIDTH {
				let (px, py) = (origin_x + col, y + row as u32);
				if (bits >> (constants::GLYPH_WIDTH - 1 - col)) & 1 != 0
					&& px < image.width()
					&& py < image.height()
				{
					image.put_pixel(px, py, color);
				}
			}
		}
	}
}

/// 5x7 glyph rows, most significant of the low five bits is the leftmost column.
fn glyph_rows(c: char) -> [u8; constants::GLYPH_HEIGHT as usize] {
	match c {
		'A' => [0b01110, 0b10001, 0b10001, 0b11111, 0b10001, 0b10001, 0b10001],
		'E' => [0b11111, 0b10000, 0b10000, 0b11110, 0b10000, 0b10000, 0b11111],
		'G' => [0b01110, 0b10001, 0b10000, 0b10111, 0b10001, 0b10001, 0b01111],
		'I' => [0b01110, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100, 0b01110],
		'L' => [0b10000, 0b10000, 0b10000, 0b10000, 0b10000, 0b10000, 0b11111],
		'M' => [0b10001, 0b11011, 0b10101, 0b10101, 0b10001, 0b10001, 0b10001],
		'N' => [0b10001, 0b11001, 0b10101, 0b10011, 0b10001, 0b10001, 0b10001],
		'U' => [0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b01110],
		_ => [0; constants::GLYPH_HEIGHT as usize],
	}
}
