use boardsight_classify::{
    PieceClassifierStrategy, Preprocessing, ReferenceImage, ReferenceLibrary, SsimClassifier,
};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use image::{DynamicImage, Rgb, RgbImage};

fn synthetic(seed: u32, size: u32) -> DynamicImage {
    DynamicImage::ImageRgb8(RgbImage::from_fn(size, size, |x, y| {
        let v = ((x * (seed + 1) + y * (seed + 3)) % 256) as u8;
        Rgb([v, 255 - v, v / 2])
    }))
}

fn library(n: u32) -> ReferenceLibrary {
    ReferenceLibrary::from_entries(
        (0..n)
            .map(|i| ReferenceImage {
                label: format!("ref{i:02}"),
                path: None,
                pixels: synthetic(i, 90),
            })
            .collect(),
    )
}

fn bench_classify(c: &mut Criterion) {
    let cell = synthetic(5, 75);
    let lib = library(13);

    let mut group = c.benchmark_group("classify_13_refs");
    for pre in [
        Preprocessing::Grayscale,
        Preprocessing::Color,
        Preprocessing::Edges,
    ] {
        let classifier = SsimClassifier::new(pre);
        group.bench_with_input(BenchmarkId::from_parameter(format!("{pre:?}")), &pre, |b, _| {
            b.iter(|| classifier.classify(black_box(&cell), black_box(&lib)))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_classify);
criterion_main!(benches);
