// Compare analytic gradients against central finite differences.

use betagrad::special::{betainc, betainc_grad};
use betagrad::stats::{ContinuousDistribution, DifferentiableCdf, StudentT};

const H: f64 = 1e-6;

fn central(f: impl Fn(f64) -> f64, at: f64) -> f64 {
    (f(at + H) - f(at - H)) / (2.0 * H)
}

fn main() {
    env_logger::init();

    println!("incomplete beta");
    for &(a, b, x) in &[(2.0, 3.0, 0.5), (0.5, 2.5, 0.1), (30.0, 5.0, 0.9)] {
        let g = betainc_grad(a, b, x).expect("valid arguments");
        let fa = central(|a| betainc(a, b, x).expect("valid"), a);
        let fb = central(|b| betainc(a, b, x).expect("valid"), b);
        let fx = central(|x| betainc(a, b, x).expect("valid"), x);
        println!(
            "  ({a}, {b}, {x}): Δa = {:.2e}  Δb = {:.2e}  Δx = {:.2e}",
            (g.d_a - fa).abs(),
            (g.d_b - fb).abs(),
            (g.d_x - fx).abs()
        );
    }

    println!("student t");
    let (df, loc, scale, x) = (5.0, 0.5, 1.2, 1.5);
    let g = StudentT::with_loc_scale(df, loc, scale).expect("valid").cdf_grad(x);
    let cdf = |df: f64, loc: f64, scale: f64| {
        StudentT::with_loc_scale(df, loc, scale).expect("valid").cdf(x)
    };
    println!("  Δν = {:.2e}", (g.d_df - central(|v| cdf(v, loc, scale), df)).abs());
    println!("  Δμ = {:.2e}", (g.d_loc - central(|m| cdf(df, m, scale), loc)).abs());
    println!("  Δσ = {:.2e}", (g.d_scale - central(|s| cdf(df, loc, s), scale)).abs());
}
