// Effect of the continued-fraction settings on accuracy and work.
// I_{0.4}(5, 7) has the exact binomial form used as the reference.

use betagrad::special::{betainc_vec, betainc_with, BetaIncSettings};

fn reference() -> f64 {
    // Σ_{j=5}^{11} C(11, j) 0.4^j 0.6^{11−j}
    let mut sum = 0.0;
    let mut c = 1.0;
    for j in 0..=11 {
        if j >= 5 {
            sum += c * 0.4_f64.powi(j) * 0.6_f64.powi(11 - j);
        }
        c = c * (11 - j) as f64 / (j + 1) as f64;
    }
    sum
}

fn main() {
    env_logger::init();
    let exact = reference();

    println!("{:>10} {:>10} {:>6} {:>10} {:>12}", "max_approx", "converged", "terms", "reflected", "|error|");
    for &max_approx in &[2, 4, 8, 16, 32, 64] {
        let s = BetaIncSettings { epsilon: 1e-15, min_approx: 1, max_approx };
        let r = betainc_with(5.0_f64, 7.0, 0.4, &s).expect("valid settings");
        println!(
            "{max_approx:>10} {:>10} {:>6} {:>10} {:>12.3e}",
            r.converged,
            r.iterations,
            r.reflected,
            (r.value - exact).abs()
        );
    }

    println!();
    for (name, s) in [("default", BetaIncSettings::default()), ("fast", BetaIncSettings::fast())] {
        let r = betainc_with(200.0_f64, 300.0, 0.4, &s).expect("valid settings");
        println!("{name:>8}: I = {:.15} after {} terms", r.value, r.iterations);
    }

    let x: Vec<f64> = (1..10).map(|i| i as f64 / 10.0).collect();
    let curve = betainc_vec(2.0_f64, 3.0_f64, &x, &BetaIncSettings::fast()).expect("valid batch");
    println!();
    println!("I_x(2, 3) on a grid: {curve:.6?}");
}
