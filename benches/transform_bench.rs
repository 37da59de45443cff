use criterion::{black_box, criterion_group, criterion_main, Criterion};

use proj4_bind::{CoordinatePair, Engine, Projection};

fn make_points(n: usize) -> (Vec<f64>, Vec<f64>) {
    // Spread across UTM zone 10N around San Francisco.
    let xs = (0..n).map(|i| -124.0 + 2.0 * (i % 100) as f64 / 100.0).collect();
    let ys = (0..n).map(|i| 36.0 + 3.0 * (i / 100 % 100) as f64 / 100.0).collect();
    (xs, ys)
}

fn make_projections() -> (Projection, Projection) {
    let src = Projection::from_proj_string("+proj=longlat +datum=WGS84").unwrap();
    let dst = Projection::from_proj_string("+proj=utm +zone=10 +datum=WGS84").unwrap();
    (src, dst)
}

fn bench_batch_transform(c: &mut Criterion) {
    let (src, dst) = make_projections();
    let engine = Engine::default();
    for &n in &[1, 100, 10_000, 100_000] {
        let (xs, ys) = make_points(n);
        c.bench_function(&format!("batch_transform_{n}"), |b| {
            b.iter(|| black_box(engine.transform(&src, &dst, &xs, &ys, None).unwrap()))
        });
    }
}

fn bench_point_at_a_time(c: &mut Criterion) {
    let (src, dst) = make_projections();
    let engine = Engine::default();
    let (xs, ys) = make_points(10_000);
    c.bench_function("transform_one_x10000", |b| {
        b.iter(|| {
            for (&x, &y) in xs.iter().zip(&ys) {
                black_box(
                    engine
                        .transform_one(&src, &dst, CoordinatePair::new(x, y))
                        .unwrap(),
                );
            }
        })
    });
}

fn bench_forward(c: &mut Criterion) {
    let (_, dst) = make_projections();
    let engine = Engine::default();
    c.bench_function("forward_single_point", |b| {
        b.iter(|| {
            black_box(
                engine
                    .forward(&dst, CoordinatePair::new(-122.42, 37.77))
                    .unwrap(),
            )
        })
    });
}

criterion_group!(
    benches,
    bench_batch_transform,
    bench_point_at_a_time,
    bench_forward
);
criterion_main!(benches);
