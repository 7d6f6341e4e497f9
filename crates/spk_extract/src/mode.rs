//! Extraction modes and the driver that walks an index table.

use std::{
	fmt::Display,
	io::{Read, Seek},
	path::{Path, PathBuf},
};

use log::{debug, error, info, warn};

use spk_internal::prelude::{Artifact, CfpkFile, CodecConfig, SpkFile, SpkiFile};

use crate::{
	ExtractConfig, ExtractError,
	export::{self, AnimationDocument, TextureDocument},
};

/// What to produce from a container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtractionMode {
	/// Decompressed blobs, one `.raw` file per index entry
	Raw {
		/// Exact output size per blob, unbounded when absent
		declared_size: Option<usize>,
	},
	/// One PNG per sprite, placeholders for sprites without an image
	Sprites,
	/// Sprite sheets and animation documents for every artifact
	Animations {
		/// Animation metadata file
		metadata: PathBuf,
	},
}

impl Display for ExtractionMode {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Self::Raw {
				..
			} => write!(f, "raw"),
			Self::Sprites => write!(f, "sprites"),
			Self::Animations {
				..
			} => write!(f, "animations"),
		}
	}
}

/// Outcome counters of one run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ExtractReport {
	/// Entries visited (index entries, or artifacts in animation mode)
	pub processed: usize,
	/// Files written
	pub written: usize,
	/// Entries with nothing to export (culled animations)
	pub skipped: usize,
	/// Entries that failed and were skipped
	pub failed: usize,
}

impl Display for ExtractReport {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(
			f,
			"{} processed, {} files written, {} skipped, {} failed",
			self.processed, self.written, self.skipped, self.failed
		)
	}
}

/// Runs extractions with one set of settings.
#[derive(Debug, Clone)]
pub struct Extractor {
	settings: ExtractConfig,
	codec: CodecConfig,
}

impl Extractor {
	/// Validates `settings` and builds the codec convention once for the run.
	pub fn new(settings: ExtractConfig) -> Result<Self, ExtractError> {
		let codec = settings.codec_config()?;
		Ok(Self {
			settings,
			codec,
		})
	}

	/// Settings of this extractor.
	pub fn settings(&self) -> &ExtractConfig {
		&self.settings
	}

	/// Opens `container` and `index` from disk and runs `mode` into `output`.
	///
	/// An unreadable index table or metadata file fails the whole run.
	/// Individual entries that fail are logged and skipped.
	pub fn run(
		&self,
		mode: &ExtractionMode,
		container: &Path,
		index: &Path,
		output: &Path,
	) -> Result<ExtractReport, ExtractError> {
		info!("Gathering indices from {}...", index.display());
		let index = SpkiFile::open(index)?;
		if index.is_empty() {
			info!("No indices associated to {}. There is nothing to extract.", container.display());
			return Ok(ExtractReport::default());
		}

		let mut spk = SpkFile::open(container, self.codec.clone())?.with_pixel_format(self.settings.pixel_format);
		let report = match mode {
			ExtractionMode::Raw {
				declared_size,
			} => self.extract_raw(&mut spk, &index, declared_size.or(self.settings.raw_size), output),
			ExtractionMode::Sprites => self.extract_sprites(&mut spk, &index, output),
			ExtractionMode::Animations {
				metadata,
			} => {
				info!("Gathering artifact metadata from {}...", metadata.display());
				let metadata = CfpkFile::open(metadata)?;
				self.extract_animations(&mut spk, &index, &metadata, output)
			}
		};

		info!("Done ({mode}): {report}");
		Ok(report)
	}

	/// Writes every blob as `artifact_{index}_{offset:08X}.raw`.
	pub fn extract_raw<R: Read + Seek>(
		&self,
		spk: &mut SpkFile<R>,
		index: &SpkiFile,
		declared_size: Option<usize>,
		output: &Path,
	) -> ExtractReport {
		let mut report = ExtractReport::default();
		for (i, offset) in index.iter() {
			report.processed += 1;
			let path = output.join(format!("artifact_{i}_{offset:08X}.raw"));
			let result = spk.extract_raw(offset, declared_size).map_err(ExtractError::from).and_then(|data| {
				debug!("Blob {i} at 0x{offset:08X}: {} bytes", data.len());
				export::write_bytes(&data, &path)
			});
			match result {
				Ok(()) => report.written += 1,
				Err(e) => {
					error!("Unable to extract blob at index {i} at offset 0x{offset:08X}: {e}. Skipping.");
					report.failed += 1;
				}
			}
		}
		report
	}

	/// Writes every sprite as `texture_{index}_{offset:08X}.png`, substituting
	/// the placeholder for sprites without an image.
	pub fn extract_sprites<R: Read + Seek>(
		&self,
		spk: &mut SpkFile<R>,
		index: &SpkiFile,
		output: &Path,
	) -> ExtractReport {
		let mut report = ExtractReport::default();
		for (i, offset) in index.iter() {
			report.processed += 1;
			let path = output.join(format!("texture_{i}_{offset:08X}.png"));
			let result = spk.render_sprite(offset).map_err(ExtractError::from).and_then(|image| {
				debug!("Sprite {i} at 0x{offset:08X}: {}x{}", image.width(), image.height());
				export::save_png(&image, &path)
			});
			match result {
				Ok(()) => report.written += 1,
				Err(e) => {
					error!("Unable to extract sprite at index {i} at offset 0x{offset:08X}: {e}. Skipping.");
					report.failed += 1;
				}
			}
		}
		report
	}

	/// Exports every artifact to `artifact{i}/`, reporting progress after each.
	pub fn extract_animations<R: Read + Seek>(
		&self,
		spk: &mut SpkFile<R>,
		index: &SpkiFile,
		metadata: &CfpkFile,
		output: &Path,
	) -> ExtractReport {
		let mut report = ExtractReport::default();
		let total = metadata.len();

		for (i, artifact) in metadata.artifacts().iter().enumerate() {
			report.processed += 1;
			let directory = output.join(format!("artifact{i}"));
			match self.export_artifact(spk, index, artifact, &directory) {
				Ok((written, skipped)) => {
					report.written += written;
					report.skipped += skipped;
				}
				Err(e) => {
					error!("Unable to export artifact {i}: {e}. Skipping artifact.");
					report.failed += 1;
				}
			}
			info!(
				"Processed {} of {} artifacts. {:.2}% completed.",
				i + 1,
				total,
				(i + 1) as f32 / total as f32 * 100.0
			);
		}
		report
	}

	/// Exports one artifact; returns the number of files written and of
	/// animations skipped for having no image.
	fn export_artifact<R: Read + Seek>(
		&self,
		spk: &mut SpkFile<R>,
		index: &SpkiFile,
		artifact: &Artifact,
		directory: &Path,
	) -> Result<(usize, usize), ExtractError> {
		let (mut written, mut skipped) = (0, 0);

		for (a, animation) in artifact.animations.iter().enumerate() {
			let name = a.to_string();
			let Some(sheet) = spk.pack_sheet(index, &animation.sprite_indices())? else {
				warn!("Animation {name} of {} has no renderable frames, ignoring it", directory.display());
				skipped += 1;
				continue;
			};

			let texture_dir = directory.join("texture").join(&name);
			let default_dir = directory.join("default").join(&name);

			export::save_png(sheet.image(), &texture_dir.join("texture.png"))?;
			export::write_json(&TextureDocument::for_animation(&name), &default_dir.join("texture.sgf"))?;
			export::write_json(
				&AnimationDocument::new(animation, &sheet, &self.settings),
				&default_dir.join("animation.jsf"),
			)?;
			written += 3;
		}

		Ok((written, skipped))
	}
}
