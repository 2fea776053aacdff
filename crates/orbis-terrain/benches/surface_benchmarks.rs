use criterion::{Criterion, black_box, criterion_group, criterion_main};
use orbis_terrain::*;

fn bench_gradient_noise(c: &mut Criterion) {
    let x = black_box(12.345);
    let y = black_box(-6.789);
    c.bench_function("gradient_noise", |bencher| {
        bencher.iter(|| black_box(gradient_noise(x, y, 42)))
    });
}

fn bench_fbm_three_octaves(c: &mut Criterion) {
    let field = NoiseField::new(42);
    let params = SurfaceParams::default();
    c.bench_function("fbm_three_octaves", |bencher| {
        bencher.iter(|| black_box(field.fbm(black_box(31.0), black_box(17.0), &params.octaves)))
    });
}

fn bench_synthesize_planet(c: &mut Criterion) {
    let synth = SurfaceSynthesizer::default();
    c.bench_function("synthesize_planet_64", |bencher| {
        bencher.iter(|| {
            let mut rng = DeterministicRandom::from_name("Tellus");
            black_box(synth.synthesize(BodyKind::Planet, &mut rng))
        })
    });
}

fn bench_stamp_feature(c: &mut Criterion) {
    let mut grid = SurfaceGrid::new(DEFAULT_RESOLUTION);
    let feature = SurfaceFeature {
        center_x: 32,
        center_y: 32,
        size: MAX_FEATURE_SIZE - 1.0,
        kind: FeatureKind::Crater,
        intensity: 0.7,
    };
    c.bench_function("stamp_feature", |bencher| {
        bencher.iter(|| stamp_feature(&mut grid, black_box(&feature)))
    });
}

criterion_group!(
    benches,
    bench_gradient_noise,
    bench_fbm_three_octaves,
    bench_synthesize_planet,
    bench_stamp_feature
);
criterion_main!(benches);
