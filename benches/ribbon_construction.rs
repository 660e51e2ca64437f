use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::{rngs::StdRng, SeedableRng};
use ribbon_sketch::math::{CatmullRomCurve, CurveType, FrameSet};
use ribbon_sketch::ribbon::{
    build_ribbon, control_points, grid_indices, FixedPerturbations, RandomPerturbations,
    RibbonParams,
};

fn jittered_offsets(count: usize) -> Vec<f32> {
    (0..count).map(|i| 0.25 * ((i as f32 * 1.7).sin())).collect()
}

/// Benchmark: full ribbon at the default size
fn bench_default_ribbon(c: &mut Criterion) {
    let params = RibbonParams::default();

    c.bench_function("build_ribbon_default", |b| {
        b.iter(|| {
            let mut source = RandomPerturbations::new(StdRng::seed_from_u64(7), 0.5);
            black_box(build_ribbon(black_box(&params), &mut source))
        })
    });
}

/// Benchmark: ribbon construction as the sample count grows
fn bench_ribbon_samples(c: &mut Criterion) {
    let mut group = c.benchmark_group("build_ribbon_samples");

    for samples in [100, 1000, 10_000] {
        let params = RibbonParams {
            samples,
            ..Default::default()
        };
        group.bench_with_input(BenchmarkId::from_parameter(samples), &params, |b, params| {
            b.iter(|| {
                let mut source = FixedPerturbations::new(jittered_offsets(params.control_points));
                black_box(build_ribbon(params, &mut source))
            })
        });
    }

    group.finish();
}

/// Benchmark: frame propagation alone, per curve type
fn bench_frames(c: &mut Criterion) {
    let mut group = c.benchmark_group("frames_along_curve");
    let points = control_points(7, &mut FixedPerturbations::new(jittered_offsets(7))).unwrap();

    for (name, curve_type) in [
        ("catmull_rom", CurveType::CatmullRom { tension: 0.7 }),
        ("centripetal", CurveType::Centripetal),
        ("chordal", CurveType::Chordal),
    ] {
        let curve = CatmullRomCurve::closed(points.clone(), curve_type).unwrap();
        let table = curve.arc_length_table(200);
        group.bench_function(name, |b| {
            b.iter(|| black_box(FrameSet::along_curve(&curve, &table, black_box(1000))))
        });
    }

    group.finish();
}

/// Benchmark: index buffer for both material groups
fn bench_grid_indices(c: &mut Criterion) {
    c.bench_function("grid_indices_1000", |b| {
        b.iter(|| black_box(grid_indices(black_box(1000))))
    });
}

criterion_group!(
    benches,
    bench_default_ribbon,
    bench_ribbon_samples,
    bench_frames,
    bench_grid_indices
);
criterion_main!(benches);
