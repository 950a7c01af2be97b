//! Benchmarks for colorspace conversion and chroma resampling.
//!
//! Run with:
//!   cargo bench -- colorspace

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use refract::converters::{FrameConverter, PixelFormat};

/// Common resolutions to benchmark
const RESOLUTIONS: &[(u32, u32, &str)] = &[
    (640, 480, "VGA"),
    (1280, 720, "720p"),
    (1920, 1080, "1080p"),
    (3840, 2160, "4K"),
];

fn bench_rgba_to_i420(c: &mut Criterion) {
    let mut group = c.benchmark_group("rgba_to_i420");

    for &(width, height, name) in RESOLUTIONS {
        let input_size = PixelFormat::Rgba.frame_size(width, height);
        let output_size = PixelFormat::I420.frame_size(width, height);

        group.throughput(Throughput::Bytes(input_size as u64));

        // Gradient pattern so the chroma pass sees varying samples
        let mut input = vec![0u8; input_size];
        for (i, px) in input.chunks_exact_mut(4).enumerate() {
            px[0] = (i % 256) as u8;
            px[1] = (i / 256 % 256) as u8;
            px[2] = (255 - i % 256) as u8;
            px[3] = 255;
        }

        let mut output = vec![0u8; output_size];
        let converter = FrameConverter::new(PixelFormat::Rgba, PixelFormat::I420, width, height)
            .expect("Failed to create converter");

        group.bench_with_input(BenchmarkId::new("convert", name), &input, |b, input| {
            b.iter(|| {
                converter.convert(input, &mut output).unwrap();
                std::hint::black_box(&output);
            });
        });
    }

    group.finish();
}

fn bench_yuyv_to_i420(c: &mut Criterion) {
    let mut group = c.benchmark_group("yuyv_to_i420");

    for &(width, height, name) in RESOLUTIONS {
        let input_size = PixelFormat::Yuyv.frame_size(width, height);
        let output_size = PixelFormat::I420.frame_size(width, height);

        group.throughput(Throughput::Bytes(input_size as u64));

        let mut input = vec![0u8; input_size];
        for (i, group4) in input.chunks_exact_mut(4).enumerate() {
            group4[0] = (i % 256) as u8; // Y0
            group4[1] = 100; // Cb
            group4[2] = ((i + 1) % 256) as u8; // Y1
            group4[3] = 160; // Cr
        }

        let mut output = vec![0u8; output_size];
        let converter = FrameConverter::new(PixelFormat::Yuyv, PixelFormat::I420, width, height)
            .expect("Failed to create converter");

        group.bench_with_input(BenchmarkId::new("convert", name), &input, |b, input| {
            b.iter(|| {
                converter.convert(input, &mut output).unwrap();
                std::hint::black_box(&output);
            });
        });
    }

    group.finish();
}

fn bench_nv12_to_i420(c: &mut Criterion) {
    let mut group = c.benchmark_group("nv12_to_i420");

    for &(width, height, name) in RESOLUTIONS {
        let input_size = PixelFormat::Nv12.frame_size(width, height);
        let output_size = PixelFormat::I420.frame_size(width, height);

        group.throughput(Throughput::Bytes(input_size as u64));

        let y_size = (width * height) as usize;
        let mut input = vec![0u8; input_size];
        for i in 0..y_size {
            input[i] = ((i * 255) / y_size) as u8;
        }
        for b in &mut input[y_size..] {
            *b = 128;
        }

        let mut output = vec![0u8; output_size];
        let converter = FrameConverter::new(PixelFormat::Nv12, PixelFormat::I420, width, height)
            .expect("Failed to create converter");

        group.bench_with_input(BenchmarkId::new("convert", name), &input, |b, input| {
            b.iter(|| {
                converter.convert(input, &mut output).unwrap();
                std::hint::black_box(&output);
            });
        });
    }

    group.finish();
}

fn bench_i444_to_rgba(c: &mut Criterion) {
    let mut group = c.benchmark_group("i444_to_rgba");

    for &(width, height, name) in RESOLUTIONS {
        let input_size = PixelFormat::I444.frame_size(width, height);
        let output_size = PixelFormat::Rgba.frame_size(width, height);

        group.throughput(Throughput::Bytes(input_size as u64));

        let y_size = (width * height) as usize;
        let mut input = vec![0u8; input_size];
        for i in 0..y_size {
            input[i] = ((i * 255) / y_size) as u8;
        }
        for b in &mut input[y_size..] {
            *b = 128;
        }

        let mut output = vec![0u8; output_size];
        let converter = FrameConverter::new(PixelFormat::I444, PixelFormat::Rgba, width, height)
            .expect("Failed to create converter");

        group.bench_with_input(BenchmarkId::new("convert", name), &input, |b, input| {
            b.iter(|| {
                converter.convert(input, &mut output).unwrap();
                std::hint::black_box(&output);
            });
        });
    }

    group.finish();
}

fn bench_i444_to_i420(c: &mut Criterion) {
    let mut group = c.benchmark_group("i444_to_i420");

    for &(width, height, name) in RESOLUTIONS {
        let input_size = PixelFormat::I444.frame_size(width, height);
        let output_size = PixelFormat::I420.frame_size(width, height);

        group.throughput(Throughput::Bytes(input_size as u64));

        let input = vec![128u8; input_size];
        let mut output = vec![0u8; output_size];
        let converter = FrameConverter::new(PixelFormat::I444, PixelFormat::I420, width, height)
            .expect("Failed to create converter");

        group.bench_with_input(BenchmarkId::new("convert", name), &input, |b, input| {
            b.iter(|| {
                converter.convert(input, &mut output).unwrap();
                std::hint::black_box(&output);
            });
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_rgba_to_i420,
    bench_yuyv_to_i420,
    bench_nv12_to_i420,
    bench_i444_to_rgba,
    bench_i444_to_i420,
);

criterion_main!(benches);
