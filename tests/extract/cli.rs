//! Runs of the `spk_utils` binary

use std::process::{Command, Output};

use crate::fixtures::{Fixture, sprite_block};

fn spk_utils(args: &[&std::ffi::OsStr]) -> Output {
	Command::new(env!("CARGO_BIN_EXE_spk_utils"))
		.args(args)
		.env_remove("SPK_CONFIG")
		.env("RUST_LOG", "warn")
		.output()
		.unwrap()
}

#[test]
fn test_empty_index_leaves_no_output_directory() {
	let fixture = Fixture::new(&[]);

	let output = spk_utils(&[
		"sprites".as_ref(),
		fixture.container.as_os_str(),
		fixture.index.as_os_str(),
		"-o".as_ref(),
		fixture.output.as_os_str(),
	]);
	assert!(output.status.success());
	assert!(!fixture.output.exists());
}

#[test]
fn test_sprites_command_creates_output_directory() {
	let fixture = Fixture::new(&[sprite_block(2, 2, 0x001F)]);
	let nested = fixture.output.join("nested");

	let output = spk_utils(&[
		"sprites".as_ref(),
		fixture.container.as_os_str(),
		fixture.index.as_os_str(),
		"-o".as_ref(),
		nested.as_os_str(),
	]);
	assert!(output.status.success());
	assert!(nested.join("texture_0_00000000.png").exists());
}

#[test]
fn test_info_command_lists_offsets() {
	let fixture = Fixture::new(&[sprite_block(1, 1, 0), sprite_block(1, 1, 0)]);

	let output = spk_utils(&["info".as_ref(), fixture.index.as_os_str()]);
	assert!(output.status.success());

	let stdout = String::from_utf8_lossy(&output.stdout);
	assert!(stdout.contains("Entries: 2"));
	assert!(stdout.contains("0x00000000"));
}
