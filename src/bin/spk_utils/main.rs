//! SPK CLI Utility
//!
//! A command-line tool for extracting sprites, animations and raw blobs from
//! Dark Eden containers.
//!
//! # Features
//!
//! - **sprites**: Decode every indexed sprite to a PNG image
//! - **animations**: Pack the sprites of every artifact animation into sheets with JSON metadata
//! - **raw**: Decompress every indexed blob to a `.raw` file
//! - **info**: Display information about an index table, metadata file or container
//!
//! # Copy/Fill Patterns
//!
//! Containers do not record which operations copy and which fill. Pass the
//! pattern of the container family with `--pattern`: `01` for `.spk`, `011`
//! for `.ispk`.
//!
//! # Usage
//!
//! ```bash
//! # Extract sprites of an SPK container
//! spk_utils sprites Creature.spk Creature.spki -o sprites/
//!
//! # Extract sprites of an ISPK container
//! spk_utils sprites Item.ispk Item.ispki --pattern 011
//!
//! # Extract artifact animations
//! spk_utils animations Creature.spk Creature.spki Creature.cfpk -o animations/
//!
//! # Decompress raw blobs with a declared size
//! spk_utils raw Data.pk Data.pki --fill 00 --size 4096
//!
//! # Show index and metadata information
//! spk_utils info Creature.spki --metadata Creature.cfpk --container Creature.spk
//! ```

use std::{
	fs::File,
	io::{BufReader, Read, Seek, SeekFrom},
	path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use log::info;
use spk_rs::{
	extract::{ExtractConfig, ExtractionMode, Extractor},
	prelude::{CfpkFile, PixelFormat, SpkiFile},
};

#[derive(Parser)]
#[command(name = "spk_utils")]
#[command(author = "spk-rs project")]
#[command(version = "1.0")]
#[command(about = "SPK container utility - extract sprites, animations and raw blobs", long_about = None)]
struct Cli {
	#[command(subcommand)]
	command: Commands,
}

#[derive(Subcommand)]
enum Commands {
	/// Decode every sprite of a container to PNG images
	Sprites {
		/// Input container path (.spk / .ispk)
		#[arg(value_name = "CONTAINER")]
		container: PathBuf,

		/// Index table path (.spki / .ispki)
		#[arg(value_name = "INDEX")]
		index: PathBuf,

		/// Output directory path (optional, defaults to `<container>_sprites/`)
		#[arg(short, long, value_name = "OUTPUT_DIR")]
		output: Option<PathBuf>,

		#[command(flatten)]
		codec: CodecArgs,
	},

	/// Pack artifact animations into sprite sheets with JSON metadata
	Animations {
		/// Input container path (.spk / .ispk)
		#[arg(value_name = "CONTAINER")]
		container: PathBuf,

		/// Index table path (.spki / .ispki)
		#[arg(value_name = "INDEX")]
		index: PathBuf,

		/// Animation metadata path (.cfpk)
		#[arg(value_name = "METADATA")]
		metadata: PathBuf,

		/// Output directory path (optional, defaults to `<container>_animations/`)
		#[arg(short, long, value_name = "OUTPUT_DIR")]
		output: Option<PathBuf>,

		/// Milliseconds per duration factor
		#[arg(long, value_name = "MS")]
		frame_delay: Option<u32>,

		#[command(flatten)]
		codec: CodecArgs,
	},

	/// Decompress every blob of a container to raw files
	Raw {
		/// Input container path (.pk)
		#[arg(value_name = "CONTAINER")]
		container: PathBuf,

		/// Index table path (.pki)
		#[arg(value_name = "INDEX")]
		index: PathBuf,

		/// Output directory path (optional, defaults to `<container>_raw/`)
		#[arg(short, long, value_name = "OUTPUT_DIR")]
		output: Option<PathBuf>,

		/// Exact size of every decoded blob, padded with the fill pattern
		#[arg(short, long, value_name = "BYTES")]
		size: Option<usize>,

		#[command(flatten)]
		codec: CodecArgs,
	},

	/// Display information about an index table
	Info {
		/// Index table path
		#[arg(value_name = "INDEX")]
		index: PathBuf,

		/// Animation metadata to summarize
		#[arg(short, long, value_name = "METADATA")]
		metadata: Option<PathBuf>,

		/// Container to peek into at each offset
		#[arg(short, long, value_name = "CONTAINER")]
		container: Option<PathBuf>,

		/// Number of entries to list
		#[arg(short, long, default_value_t = 16)]
		limit: usize,
	},
}

/// Codec options shared by the extraction commands; they override the settings file.
#[derive(Args)]
struct CodecArgs {
	/// Settings file (TOML)
	#[arg(long, value_name = "FILE", env = "SPK_CONFIG")]
	config: Option<PathBuf>,

	/// Copy/fill pattern, '1' = copy (01 for spk, 011 for ispk)
	#[arg(short, long, value_name = "PATTERN")]
	pattern: Option<String>,

	/// Fill pattern as hex bytes
	#[arg(short, long, value_name = "HEX")]
	fill: Option<String>,

	/// Sprite pixel format (rgb565, rgb555)
	#[arg(long, value_name = "FORMAT")]
	pixel_format: Option<PixelFormat>,
}

impl CodecArgs {
	/// Loads the settings file and applies command-line overrides.
	fn settings(&self) -> Result<ExtractConfig> {
		let mut settings = ExtractConfig::load(self.config.as_deref()).context("Failed to load settings")?;
		if let Some(pattern) = &self.pattern {
			settings.copy_fill_pattern.clone_from(pattern);
		}
		if let Some(fill) = &self.fill {
			settings.fill.clone_from(fill);
		}
		if let Some(pixel_format) = self.pixel_format {
			settings.pixel_format = pixel_format;
		}
		Ok(settings)
	}
}

fn main() -> Result<()> {
	// Initialize logger with default level set to info if RUST_LOG is not set
	env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

	let cli = Cli::parse();

	match cli.command {
		Commands::Sprites {
			container,
			index,
			output,
			codec,
		} => {
			let output = output_dir(output, &container, "sprites");
			extract(codec.settings()?, &ExtractionMode::Sprites, &container, &index, &output)
		}
		Commands::Animations {
			container,
			index,
			metadata,
			output,
			frame_delay,
			codec,
		} => {
			let mut settings = codec.settings()?;
			if let Some(frame_delay) = frame_delay {
				settings.frame_delay_ms = frame_delay;
			}
			let output = output_dir(output, &container, "animations");
			extract(
				settings,
				&ExtractionMode::Animations {
					metadata,
				},
				&container,
				&index,
				&output,
			)
		}
		Commands::Raw {
			container,
			index,
			output,
			size,
			codec,
		} => {
			let output = output_dir(output, &container, "raw");
			extract(
				codec.settings()?,
				&ExtractionMode::Raw {
					declared_size: size,
				},
				&container,
				&index,
				&output,
			)
		}
		Commands::Info {
			index,
			metadata,
			container,
			limit,
		} => handle_info(&index, metadata.as_deref(), container.as_deref(), limit),
	}
}

/// Default output directory: `<container stem>_<suffix>` next to the container.
fn output_dir(output: Option<PathBuf>, container: &Path, suffix: &str) -> PathBuf {
	output.unwrap_or_else(|| {
		let stem = container.file_stem().map_or_else(|| "output".into(), |s| s.to_string_lossy());
		container.with_file_name(format!("{stem}_{suffix}"))
	})
}

/// Runs one extraction mode.
fn extract(
	settings: ExtractConfig,
	mode: &ExtractionMode,
	container: &Path,
	index: &Path,
	output: &Path,
) -> Result<()> {
	info!("Extracting {mode} from {}", container.display());
	info!("   Output: {}", output.display());

	let extractor = Extractor::new(settings).context("Invalid codec settings")?;
	let report = extractor
		.run(mode, container, index, output)
		.with_context(|| format!("Extraction from {} failed", container.display()))?;

	if report.failed > 0 {
		log::warn!("{} entries failed, see the log above", report.failed);
	}
	Ok(())
}

/// Handle info command
fn handle_info(index_path: &Path, metadata: Option<&Path>, container: Option<&Path>, limit: usize) -> Result<()> {
	let index = SpkiFile::open(index_path)
		.with_context(|| format!("Failed to read index table {}", index_path.display()))?;

	println!("Index Table Information");
	println!("   File:    {}", index_path.display());
	println!("   Entries: {}", index.len());

	let mut peek = match container {
		Some(path) => Some(BufReader::new(
			File::open(path).with_context(|| format!("Failed to open container {}", path.display()))?,
		)),
		None => None,
	};

	for (i, offset) in index.iter().take(limit) {
		match peek.as_mut() {
			Some(reader) => {
				let head = peek_bytes(reader, offset, 8)?;
				println!("   [{i:5}] 0x{offset:08X}  {}", hex::encode(head));
			}
			None => println!("   [{i:5}] 0x{offset:08X}"),
		}
	}
	if index.len() > limit {
		println!("   ... {} more", index.len() - limit);
	}

	if let Some(path) = metadata {
		let metadata =
			CfpkFile::open(path).with_context(|| format!("Failed to read metadata {}", path.display()))?;

		println!("\n{metadata}");
		for (i, artifact) in metadata.artifacts().iter().enumerate().take(limit) {
			println!("   Artifact {i}: {} animations", artifact.animations.len());
			for (a, animation) in artifact.animations.iter().enumerate() {
				let sprites = animation.sprite_indices();
				println!(
					"      Animation {a}: {} perspectives, {} frames, {} sprites {:?}",
					animation.perspectives.len(),
					animation.frame_count(),
					sprites.len(),
					sprites
				);
			}
		}
	}

	Ok(())
}

/// Reads up to `len` bytes at `offset`.
fn peek_bytes<R: Read + Seek>(reader: &mut R, offset: u64, len: usize) -> Result<Vec<u8>> {
	reader.seek(SeekFrom::Start(offset))?;
	let mut head = Vec::with_capacity(len);
	reader.take(len as u64).read_to_end(&mut head)?;
	Ok(head)
}
