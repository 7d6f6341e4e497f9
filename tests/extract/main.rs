//! End-to-end extraction tests for `spk-rs`

mod cli;
mod fixtures;

use fixtures::{Fixture, metadata, sprite_block};
use spk_rs::extract::{ExtractConfig, ExtractReport, ExtractionMode, Extractor};

fn extractor() -> Extractor {
	Extractor::new(ExtractConfig::default()).unwrap()
}

#[test_log::test]
fn test_sprites_to_png() {
	let fixture = Fixture::new(&[sprite_block(2, 2, 0x001F), sprite_block(-3, 5, 0)]);

	let report = extractor().run(&ExtractionMode::Sprites, &fixture.container, &fixture.index, &fixture.output).unwrap();
	assert_eq!(report.written, 2);

	let image = image::open(fixture.out("texture_0_00000000.png")).unwrap().to_rgba8();
	assert_eq!(image.dimensions(), (2, 2));
	assert_eq!(image.get_pixel(1, 1).0, [0, 0, 255, 255]);

	// Non-positive dimensions are rendered as the placeholder
	let offset = sprite_block(2, 2, 0x001F).len();
	let placeholder = image::open(fixture.out(format!("texture_1_{offset:08X}.png"))).unwrap();
	assert_eq!((placeholder.width(), placeholder.height()), (200, 60));
}

#[test_log::test]
fn test_white_pixels_are_transparent() {
	let fixture = Fixture::new(&[sprite_block(1, 1, 0xFFFF)]);

	extractor().run(&ExtractionMode::Sprites, &fixture.container, &fixture.index, &fixture.output).unwrap();

	let image = image::open(fixture.out("texture_0_00000000.png")).unwrap().to_rgba8();
	assert_eq!(image.get_pixel(0, 0).0[3], 0);
}

#[test_log::test]
fn test_animations_to_sheet_and_documents() {
	let fixture = Fixture::new(&[
		sprite_block(2, 2, 0xF800),
		sprite_block(0, 0, 0),
		sprite_block(3, 1, 0x07E0),
	]);
	let metadata_path = fixture.with_metadata(&metadata(&[
		&[&[(0, -10, -20), (0, -10, -20), (2, 0, 0)], &[(0, 0, 0)]],
		&[&[(1, 0, 0)]],
	]));

	let mode = ExtractionMode::Animations {
		metadata: metadata_path,
	};
	let report = extractor().run(&mode, &fixture.container, &fixture.index, &fixture.output).unwrap();
	assert_eq!(
		report,
		ExtractReport {
			processed: 1,
			written: 3,
			skipped: 1,
			failed: 0,
		}
	);

	let sheet = image::open(fixture.out("artifact0/texture/0/texture.png")).unwrap().to_rgba8();
	assert_eq!(sheet.dimensions(), (5, 2));
	assert_eq!(sheet.get_pixel(0, 0).0, [255, 0, 0, 255]);
	assert_eq!(sheet.get_pixel(2, 0).0, [0, 255, 0, 255]);
	assert_eq!(sheet.get_pixel(2, 1).0[3], 0);

	let texture: serde_json::Value =
		serde_json::from_slice(&std::fs::read(fixture.out("artifact0/default/0/texture.sgf")).unwrap()).unwrap();
	assert_eq!(texture["texture"], "../../texture/0/texture.png");

	let animation: serde_json::Value =
		serde_json::from_slice(&std::fs::read(fixture.out("artifact0/default/0/animation.jsf")).unwrap()).unwrap();
	assert_eq!(animation["defaultAnimation"], "sw");
	assert_eq!(animation["texture"], "texture.sgf");

	let southwest = &animation["animations"][0];
	assert_eq!(southwest["name"], "sw");
	assert_eq!(southwest["frames"].as_array().unwrap().len(), 2);
	assert_eq!(southwest["frames"][0]["delay"], 200);
	assert_eq!(southwest["frames"][0]["anchor"]["x"], 37);
	assert_eq!(southwest["frames"][0]["anchor"]["y"], 30);
	assert_eq!(southwest["frames"][1]["anchor"]["x"], 26);
	assert_eq!(southwest["frames"][1]["anchor"]["y"], 9);
	assert_eq!(southwest["frames"][1]["region"]["x"], 2);
	assert_eq!(southwest["frames"][1]["region"]["width"], 3);

	assert_eq!(animation["animations"][1]["name"], "s");

	// Animation 1 only references the empty sprite
	assert!(!fixture.out("artifact0/texture/1").exists());
}

#[test_log::test]
fn test_raw_blobs_with_declared_size() {
	let mut blob = Vec::new();
	blob.extend_from_slice(&2i16.to_le_bytes());
	blob.extend_from_slice(&1i16.to_le_bytes());
	blob.extend_from_slice(&[0xAB, 0xCD]);
	let fixture = Fixture::new(&[blob]);

	let settings = ExtractConfig {
		fill: "00".to_string(),
		..Default::default()
	};
	let mode = ExtractionMode::Raw {
		declared_size: Some(8),
	};
	Extractor::new(settings).unwrap().run(&mode, &fixture.container, &fixture.index, &fixture.output).unwrap();

	let data = std::fs::read(fixture.out("artifact_0_00000000.raw")).unwrap();
	assert_eq!(data, vec![0x00, 0x00, 0x00, 0x00, 0xAB, 0xCD, 0x00, 0x00]);
}

#[test_log::test]
fn test_empty_index_writes_nothing() {
	let fixture = Fixture::new(&[]);

	let report = extractor().run(&ExtractionMode::Sprites, &fixture.container, &fixture.index, &fixture.output).unwrap();
	assert_eq!(report, ExtractReport::default());
	assert!(!fixture.output.exists());
}

#[test_log::test]
fn test_unreadable_index_fails_run() {
	let fixture = Fixture::new(&[sprite_block(1, 1, 0)]);
	std::fs::write(&fixture.index, [0x01]).unwrap();

	let result = extractor().run(&ExtractionMode::Sprites, &fixture.container, &fixture.index, &fixture.output);
	assert!(result.is_err());
}

#[test_log::test]
fn test_ispk_pattern_from_settings_file() {
	// fill(0), copy(1), copy(1); the SPK pattern would fill the third operation
	let mut sprite = Vec::new();
	sprite.extend_from_slice(&2i16.to_le_bytes());
	sprite.extend_from_slice(&1i16.to_le_bytes());
	sprite.extend_from_slice(&6u16.to_le_bytes());
	sprite.extend_from_slice(&1u16.to_le_bytes());
	for word in [0u16, 1, 0x001F, 1, 0x07E0] {
		sprite.extend_from_slice(&word.to_le_bytes());
	}
	let fixture = Fixture::new(&[sprite]);

	let settings_path = fixture.dir.path().join("spk.toml");
	std::fs::write(&settings_path, "copy_fill_pattern = \"011\"\n").unwrap();
	let settings = ExtractConfig::load(Some(&settings_path)).unwrap();

	Extractor::new(settings)
		.unwrap()
		.run(&ExtractionMode::Sprites, &fixture.container, &fixture.index, &fixture.output)
		.unwrap();

	let image = image::open(fixture.out("texture_0_00000000.png")).unwrap().to_rgba8();
	assert_eq!(image.get_pixel(0, 0).0, [0, 0, 255, 255]);
	assert_eq!(image.get_pixel(1, 0).0, [0, 255, 0, 255]);
}
