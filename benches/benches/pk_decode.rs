//! Benchmark suite for PK stream and sprite decoding
//!
//! This benchmark measures the copy/fill codec, scanline reconstruction and
//! sheet packing on synthetic containers.
//!
//! Run with: cargo bench --manifest-path benches/Cargo.toml
//!
//! For flamegraph profiling:
//! cargo bench --manifest-path benches/Cargo.toml -- --profile-time=5

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use spk_benches::{generate_container, generate_metadata, generate_pk_blob, generate_sprite, sizes};
use spk_types::file::{
	CfpkFile, CodecConfig, CopyFillPattern, DecodedFrame, PixelFormat, PkStream, SpkFile, SpkiFile,
};
use std::{collections::BTreeSet, hint::black_box, io::Cursor};

/// Benchmark raw PK stream decoding with short and long runs
fn bench_pk_stream(c: &mut Criterion) {
	let mut group = c.benchmark_group("pk_stream");

	for (name, run) in [("short_runs", 2), ("long_runs", 64)] {
		let blob = generate_pk_blob(256 * 1024, run);
		group.throughput(Throughput::Bytes(256 * 1024));
		group.bench_with_input(BenchmarkId::new("decode_to_end", name), &blob, |b, blob| {
			b.iter(|| {
				let result = PkStream::new(black_box(blob.as_slice()), CodecConfig::spk()).decode_to_end();
				black_box(result)
			});
		});
	}

	let blob = generate_pk_blob(64 * 1024, 8);
	group.bench_function("decode_exact_padded", |b| {
		b.iter(|| {
			let result = PkStream::new(black_box(blob.as_slice()), CodecConfig::spk()).decode_exact(128 * 1024);
			black_box(result)
		});
	});

	group.finish();
}

/// Benchmark sprite block decoding at several sizes
fn bench_sprite_decode(c: &mut Criterion) {
	let mut group = c.benchmark_group("sprite_decode");
	let pattern = CopyFillPattern::spk();

	for (name, (width, height)) in
		[("tiny", sizes::TINY), ("small", sizes::SMALL), ("medium", sizes::MEDIUM), ("large", sizes::LARGE)]
	{
		let data = generate_sprite(width, height);
		group.throughput(Throughput::Elements(u64::from(width) * u64::from(height)));
		group.bench_with_input(BenchmarkId::new("decode", name), &data, |b, data| {
			b.iter(|| {
				let result = DecodedFrame::decode(&mut black_box(data).as_slice(), &pattern, PixelFormat::Rgb565);
				black_box(result)
			});
		});
	}

	group.finish();
}

/// Benchmark the conversions applied to a decoded sprite
fn bench_sprite_convert(c: &mut Criterion) {
	let mut group = c.benchmark_group("sprite_convert");

	let (width, height) = sizes::LARGE;
	let data = generate_sprite(width, height);
	let frame = match DecodedFrame::decode(&mut data.as_slice(), &CopyFillPattern::spk(), PixelFormat::Rgb565) {
		Ok(Some(frame)) => frame,
		_ => {
			eprintln!("Warning: Could not decode synthetic sprite");
			return;
		}
	};

	group.throughput(Throughput::Elements(u64::from(width) * u64::from(height)));
	group.bench_function("to_rgba", |b| b.iter(|| black_box(black_box(&frame).to_rgba())));
	group.bench_function("to_bitmap", |b| b.iter(|| black_box(black_box(&frame).to_bitmap())));

	group.finish();
}

/// Benchmark sheet packing of a full animation
fn bench_pack_sheet(c: &mut Criterion) {
	let mut group = c.benchmark_group("sheet_pack");

	let (data, offsets) = generate_container(64, sizes::SMALL);
	let index = SpkiFile::new(offsets);
	let needed: BTreeSet<u16> = (0..64).collect();

	group.sample_size(50);
	group.bench_function("pack_64_sprites", |b| {
		b.iter(|| {
			let mut spk = SpkFile::from_reader(Cursor::new(black_box(&data).as_slice()), CodecConfig::spk());
			let result = spk.pack_sheet(&index, &needed);
			black_box(result)
		});
	});

	group.finish();
}

/// Benchmark index and metadata parsing
fn bench_tables(c: &mut Criterion) {
	let mut group = c.benchmark_group("tables");

	let (_, offsets) = generate_container(1, sizes::TINY);
	let index = SpkiFile::new((0..4096).map(|i| i * 1024).chain(offsets).collect()).to_bytes().unwrap();
	group.bench_function("parse_index", |b| {
		b.iter(|| black_box(SpkiFile::from_bytes(black_box(&index))));
	});

	let metadata = generate_metadata(256, 16);
	group.throughput(Throughput::Bytes(metadata.len() as u64));
	group.bench_function("parse_metadata", |b| {
		b.iter(|| black_box(CfpkFile::from_bytes(black_box(&metadata))));
	});

	group.finish();
}

criterion_group!(benches, bench_pk_stream, bench_sprite_decode, bench_sprite_convert, bench_pack_sheet, bench_tables);

criterion_main!(benches);
