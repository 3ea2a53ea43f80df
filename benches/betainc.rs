use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;

use betagrad::special::{
    betainc_batch, betainc_grad_batch, betainc_grad_with, betainc_with, BetaIncGrad,
    BetaIncSettings,
};
use betagrad::stats::{student_t_cdf_batch, DifferentiableCdf, StudentT, StudentTCdfGrad};

// ---------------------------------------------------------------------------
// Scalar evaluation
// ---------------------------------------------------------------------------

fn scalar(c: &mut Criterion) {
    let default = BetaIncSettings::<f64>::default();
    let fast = BetaIncSettings::<f64>::fast();

    let mut g = c.benchmark_group("betainc_scalar");
    for &(name, a, b, x) in &[
        ("small_shapes", 0.5, 2.5, 0.3),
        ("moderate", 5.0, 7.0, 0.4),
        ("large_near_mean", 200.0, 300.0, 0.4),
    ] {
        g.bench_function(format!("value/{name}"), |bch| {
            bch.iter(|| betainc_with(black_box(a), black_box(b), black_box(x), &default))
        });
        g.bench_function(format!("value_fast/{name}"), |bch| {
            bch.iter(|| betainc_with(black_box(a), black_box(b), black_box(x), &fast))
        });
        g.bench_function(format!("grad/{name}"), |bch| {
            bch.iter(|| betainc_grad_with(black_box(a), black_box(b), black_box(x), &default))
        });
    }
    g.finish();
}

// ---------------------------------------------------------------------------
// Batches
// ---------------------------------------------------------------------------

fn batch(c: &mut Criterion) {
    let s = BetaIncSettings::<f64>::default();
    let n = 4096;
    let x: Vec<f64> = (0..n).map(|i| (i as f64 + 0.5) / n as f64).collect();
    let a: Vec<f64> = (0..n).map(|i| 0.5 + (i % 64) as f64).collect();

    let mut g = c.benchmark_group("betainc_batch_4096");
    g.bench_function("value", |bch| {
        let mut out = vec![0.0; n];
        bch.iter(|| betainc_batch(&a, 3.0_f64, &x, &s, black_box(&mut out)))
    });
    g.bench_function("grad", |bch| {
        let blank = BetaIncGrad {
            value: 0.0,
            d_a: 0.0,
            d_b: 0.0,
            d_x: 0.0,
            iterations: 0,
            converged: true,
            reflected: false,
        };
        let mut out = vec![blank; n];
        bch.iter(|| betainc_grad_batch(&a, 3.0_f64, &x, &s, black_box(&mut out)))
    });
    g.finish();
}

// ---------------------------------------------------------------------------
// Student's t
// ---------------------------------------------------------------------------

fn student_t(c: &mut Criterion) {
    let t = StudentT::with_loc_scale(5.0_f64, 0.5, 1.2).unwrap();
    let n = 4096;
    let x: Vec<f64> = (0..n).map(|i| -10.0 + 20.0 * i as f64 / n as f64).collect();

    let mut g = c.benchmark_group("student_t");
    g.bench_function("cdf_grad", |bch| bch.iter(|| t.cdf_grad(black_box(1.5))));
    g.bench_function("cdf_batch_4096", |bch| {
        let blank = StudentTCdfGrad {
            value: 0.0,
            d_x: 0.0,
            d_df: 0.0,
            d_loc: 0.0,
            d_scale: 0.0,
            iterations: 0,
            converged: true,
        };
        let mut out = vec![blank; n];
        let s = BetaIncSettings::default();
        bch.iter(|| student_t_cdf_batch(&x, 5.0_f64, 0.5_f64, 1.2_f64, &s, black_box(&mut out)))
    });
    g.finish();
}

criterion_group!(benches, scalar, batch, student_t);
criterion_main!(benches);
