#[cfg(test)]
mod tests {
    use super::super::*;

    fn approx_eq(a: f64, b: f64, tol: f64) {
        assert!(
            (a - b).abs() < tol,
            "approx_eq failed: {a} vs {b}, diff = {}, tol = {tol}",
            (a - b).abs()
        );
    }

    fn approx_eq_f32(a: f32, b: f32, tol: f32) {
        assert!(
            (a - b).abs() < tol,
            "approx_eq_f32 failed: {a} vs {b}, diff = {}, tol = {tol}",
            (a - b).abs()
        );
    }

    /// I_x(a, b) for integer a, b as a binomial tail:
    /// Σ_{j=a}^{n} C(n, j) x^j (1−x)^{n−j} with n = a + b − 1.
    fn binomial_reference(a: u32, b: u32, x: f64) -> f64 {
        let n = a + b - 1;
        let mut sum = 0.0;
        for j in a..=n {
            let mut c = 1.0;
            for i in 0..j {
                c = c * (n - i) as f64 / (i + 1) as f64;
            }
            sum += c * x.powi(j as i32) * (1.0 - x).powi((n - j) as i32);
        }
        sum
    }

    /// I_x(a, b) and ∂I/∂a for integer b and real a:
    /// I = x^a Σ_{j<b} c_j (1−x)^j with c_j = a(a+1)…(a+j−1) / j!.
    fn integer_b_reference(a: f64, b: u32, x: f64) -> (f64, f64) {
        let (mut sum, mut d_sum) = (0.0, 0.0);
        let (mut c, mut dc) = (1.0, 0.0);
        for j in 0..b {
            let w = (1.0 - x).powi(j as i32);
            sum += c * w;
            d_sum += dc * w;
            let k = f64::from(j);
            dc = (dc * (a + k) + c) / (k + 1.0);
            c = c * (a + k) / (k + 1.0);
        }
        let xa = x.powf(a);
        (xa * sum, x.ln() * xa * sum + xa * d_sum)
    }

    fn beta_density(a: f64, b: f64, x: f64) -> f64 {
        ((a - 1.0) * x.ln() + (b - 1.0) * (1.0 - x).ln() - lbeta(a, b)).exp()
    }

    /// Central differences of I in each argument.
    fn finite_diff(a: f64, b: f64, x: f64, h: f64) -> [f64; 3] {
        let f = |a: f64, b: f64, x: f64| betainc(a, b, x).unwrap();
        [
            (f(a + h, b, x) - f(a - h, b, x)) / (2.0 * h),
            (f(a, b + h, x) - f(a, b - h, x)) / (2.0 * h),
            (f(a, b, x + h) - f(a, b, x - h)) / (2.0 * h),
        ]
    }

    const GRID: [(f64, f64, f64); 10] = [
        (2.0, 3.0, 0.5),
        (0.5, 0.5, 0.3),
        (0.5, 2.5, 0.1),
        (5.0, 1.5, 0.8),
        (1.0, 1.0, 0.42),
        (10.0, 20.0, 0.35),
        (3.5, 0.7, 0.95),
        (0.2, 4.0, 0.02),
        (30.0, 5.0, 0.9),
        (2.5, 2.5, 0.5),
    ];

    // =====================================================================
    // lgamma
    // =====================================================================

    #[test]
    fn lgamma_known_values() {
        approx_eq(lgamma(1.0_f64), 0.0, 1e-14);
        approx_eq(lgamma(2.0_f64), 0.0, 1e-14);
        // ln Γ(1/2) = ln √π
        approx_eq(lgamma(0.5_f64), 0.5723649429247001, 1e-14);
        // ln 9!
        approx_eq(lgamma(10.0_f64), 12.801827480081469, 1e-12);
    }

    #[test]
    fn lgamma_recurrence() {
        // ln Γ(x+1) = ln Γ(x) + ln x
        for &x in &[0.3_f64, 1.7, 4.2, 25.0, 140.5] {
            approx_eq(lgamma(x + 1.0), lgamma(x) + x.ln(), 1e-11 * (1.0 + lgamma(x).abs()));
        }
    }

    #[test]
    fn lgamma_poles_and_nan() {
        assert!(lgamma(0.0_f64).is_infinite());
        assert!(lgamma(-2.0_f64).is_infinite());
        assert!(lgamma(f64::NAN).is_nan());
    }

    // =====================================================================
    // digamma
    // =====================================================================

    #[test]
    fn digamma_known_values() {
        // ψ(1) = −γ
        approx_eq(digamma(1.0_f64), -0.5772156649015329, 1e-14);
        // ψ(1/2) = −γ − 2 ln 2
        approx_eq(digamma(0.5_f64), -1.9635100260214235, 1e-13);
        // ψ(10) = H_9 − γ
        let h9: f64 = (1..10).map(|k| 1.0 / k as f64).sum();
        approx_eq(digamma(10.0_f64), h9 - 0.5772156649015329, 1e-13);
    }

    #[test]
    fn digamma_recurrence() {
        // ψ(x+1) = ψ(x) + 1/x
        for &x in &[0.01_f64, 0.25, 1.3, 5.9, 80.0] {
            approx_eq(digamma(x + 1.0), digamma(x) + 1.0 / x, 1e-11);
        }
    }

    #[test]
    fn digamma_matches_lgamma_slope() {
        let h = 1e-5;
        for &x in &[0.7_f64, 2.0, 11.5] {
            let fd = (lgamma(x + h) - lgamma(x - h)) / (2.0 * h);
            approx_eq(digamma(x), fd, 1e-8);
        }
    }

    #[test]
    fn digamma_outside_domain() {
        assert!(digamma(0.0_f64).is_nan());
        assert!(digamma(-1.5_f64).is_nan());
        assert!(digamma(f64::NAN).is_nan());
        assert_eq!(digamma(f64::INFINITY), f64::INFINITY);
    }

    // =====================================================================
    // beta / lbeta
    // =====================================================================

    #[test]
    fn beta_known_values() {
        approx_eq(beta(2.0_f64, 3.0), 1.0 / 12.0, 1e-15);
        approx_eq(beta(1.0_f64, 7.0), 1.0 / 7.0, 1e-15);
        approx_eq(lbeta(0.5_f64, 0.5), core::f64::consts::PI.ln(), 1e-14);
    }

    #[test]
    fn beta_symmetric() {
        approx_eq(lbeta(2.7_f64, 0.4), lbeta(0.4, 2.7), 1e-14);
    }

    // =====================================================================
    // betainc: values
    // =====================================================================

    #[test]
    fn betainc_endpoints() {
        for &(a, b) in &[(0.5_f64, 0.5), (2.0, 3.0), (100.0, 0.1)] {
            assert_eq!(betainc(a, b, 0.0).unwrap(), 0.0);
            assert_eq!(betainc(a, b, 1.0).unwrap(), 1.0);
            let r = betainc_with(a, b, 0.0, &BetaIncSettings::default()).unwrap();
            assert_eq!(r.iterations, 0);
            assert!(r.converged);
        }
    }

    #[test]
    fn betainc_known_value() {
        approx_eq(betainc(2.0_f64, 3.0, 0.5).unwrap(), 0.6875, 1e-14);
    }

    #[test]
    fn betainc_closed_forms() {
        for &x in &[0.01_f64, 0.2, 0.5, 0.77, 0.999] {
            // I_x(1, b) = 1 − (1−x)^b
            approx_eq(betainc(1.0, 3.5, x).unwrap(), 1.0 - (1.0 - x).powf(3.5), 1e-13);
            // I_x(a, 1) = x^a
            approx_eq(betainc(2.5, 1.0, x).unwrap(), x.powf(2.5), 1e-13);
            // I_x(1/2, 1/2) = (2/π) asin √x
            let arcsine = 2.0 / core::f64::consts::PI * x.sqrt().asin();
            approx_eq(betainc(0.5, 0.5, x).unwrap(), arcsine, 1e-13);
        }
    }

    #[test]
    fn betainc_integer_shapes() {
        for &(a, b) in &[(2_u32, 3_u32), (5, 7), (1, 12), (9, 2), (15, 15)] {
            for &x in &[0.05_f64, 0.3, 0.5, 0.6, 0.95] {
                approx_eq(
                    betainc(a as f64, b as f64, x).unwrap(),
                    binomial_reference(a, b, x),
                    1e-12,
                );
            }
        }
    }

    #[test]
    fn betainc_symmetry() {
        for &(a, b, x) in &GRID {
            let lhs = betainc(a, b, x).unwrap();
            let rhs = betainc(b, a, 1.0 - x).unwrap();
            approx_eq(lhs + rhs, 1.0, 1e-13);
        }
    }

    #[test]
    fn betainc_monotone_in_x() {
        let mut prev = 0.0_f64;
        for i in 1..100 {
            let v = betainc(3.0, 4.5, i as f64 / 100.0).unwrap();
            assert!(v >= prev, "not monotone at x = {}", i as f64 / 100.0);
            prev = v;
        }
    }

    #[test]
    fn betainc_large_shapes() {
        // I_{1/2}(a, a) = 1/2
        approx_eq(betainc(1000.0_f64, 1000.0, 0.5).unwrap(), 0.5, 1e-8);
        let r = betainc_with(1000.0_f64, 1000.0, 0.5, &BetaIncSettings::default()).unwrap();
        assert!(r.converged);
    }

    #[test]
    fn betainc_reflection_flag() {
        let s = BetaIncSettings::default();
        // switch point (a+1)/(a+b+2) = 3/7
        assert!(!betainc_with(2.0_f64, 3.0, 0.4, &s).unwrap().reflected);
        assert!(betainc_with(2.0_f64, 3.0, 0.45, &s).unwrap().reflected);
        assert!(betainc_with(2.0_f64, 3.0, 0.9, &s).unwrap().reflected);
    }

    #[test]
    fn betainc_continuous_across_switch() {
        let switch = 3.0_f64 / 7.0;
        let below = betainc(2.0, 3.0, switch - 1e-12).unwrap();
        let above = betainc(2.0, 3.0, switch + 1e-12).unwrap();
        approx_eq(below, above, 1e-11);
    }

    #[test]
    fn betainc_tiny_x() {
        // I_x(a, b) ≈ x^a / (a B(a, b)) for x → 0
        let x = 1e-30_f64;
        let expected = (2.0 * x.ln() - 2.0_f64.ln() - lbeta(2.0, 3.0)).exp();
        let v = betainc(2.0, 3.0, x).unwrap();
        assert!(((v - expected) / expected).abs() < 1e-12);
    }

    #[test]
    fn betainc_f32() {
        approx_eq_f32(betainc(2.0_f32, 3.0, 0.5).unwrap(), 0.6875, 1e-6);
        let g = betainc_grad(2.0_f32, 3.0, 0.5).unwrap();
        // density of Beta(2, 3) at 1/2 = 12 · 0.5 · 0.25
        approx_eq_f32(g.d_x, 1.5, 1e-4);
        assert!(g.d_a.is_finite() && g.d_b.is_finite());
    }

    // =====================================================================
    // betainc: gradient
    // =====================================================================

    #[test]
    fn grad_value_matches_value_pass() {
        let settings = [BetaIncSettings::default(), BetaIncSettings::fast()];
        for s in &settings {
            for &(a, b, x) in &GRID {
                let r = betainc_with(a, b, x, s).unwrap();
                let g = betainc_grad_with(a, b, x, s).unwrap();
                assert_eq!(r.value.to_bits(), g.value.to_bits(), "a={a} b={b} x={x}");
                assert!(g.iterations >= r.iterations);
                assert_eq!(r.reflected, g.reflected);
            }
        }
    }

    #[test]
    fn grad_x_is_density() {
        for &(a, b, x) in &GRID {
            let g = betainc_grad(a, b, x).unwrap();
            let pdf = beta_density(a, b, x);
            approx_eq(g.d_x, pdf, 1e-9 * (1.0 + pdf));
        }
    }

    #[test]
    fn grad_matches_finite_differences() {
        for &(a, b, x) in &GRID {
            let g = betainc_grad(a, b, x).unwrap();
            let fd = finite_diff(a, b, x, 1e-6);
            let tol = |v: f64| 1e-6 * (1.0 + v.abs());
            approx_eq(g.d_a, fd[0], tol(fd[0]));
            approx_eq(g.d_b, fd[1], tol(fd[1]));
            approx_eq(g.d_x, fd[2], tol(fd[2]));
        }
    }

    #[test]
    fn grad_uniform_shape_partials() {
        // I_x(a, 1) = x^a and I_x(1, b) = 1 − (1−x)^b
        let x = 0.42_f64;
        let g = betainc_grad(1.0, 1.0, x).unwrap();
        approx_eq(g.value, x, 1e-14);
        approx_eq(g.d_a, x * x.ln(), 1e-10);
        approx_eq(g.d_b, -(1.0 - x) * (1.0 - x).ln(), 1e-10);
        approx_eq(g.d_x, 1.0, 1e-12);
        assert!(g.converged);
    }

    #[test]
    fn grad_a_integer_b_closed_form() {
        let (_, d_a) = integer_b_reference(2.0, 3, 0.5);
        approx_eq(d_a, -0.195_288_686_634_962_4, 1e-15);
        let g = betainc_grad(2.0, 3.0, 0.5).unwrap();
        approx_eq(g.d_a, d_a, 1e-10);

        for &a in &[0.5, 2.0, 9.5] {
            for b in 1..=5u32 {
                for &x in &[0.1, 0.42, 0.84, 0.97] {
                    let (v, d_a) = integer_b_reference(a, b, x);
                    let g = betainc_grad(a, f64::from(b), x).unwrap();
                    approx_eq(g.value, v, 1e-13);
                    approx_eq(g.d_a, d_a, 1e-9 * (1.0 + d_a.abs()));
                }
            }
        }
    }

    #[test]
    fn grad_integer_shapes_match_finite_differences() {
        let tol = |v: f64| 1e-6 * (1.0 + v.abs());
        for &a in &[0.5, 2.0, 9.5] {
            for b in 1..=5u32 {
                for &x in &[0.1, 0.42, 0.84] {
                    let b = f64::from(b);
                    let g = betainc_grad(a, b, x).unwrap();
                    let fd = finite_diff(a, b, x, 1e-6);
                    approx_eq(g.d_a, fd[0], tol(fd[0]));
                    approx_eq(g.d_b, fd[1], tol(fd[1]));
                    approx_eq(g.d_x, fd[2], tol(fd[2]));
                    // and with the integer in the first slot, which the
                    // symmetry flip moves to the second
                    let g = betainc_grad(b, a, x).unwrap();
                    let fd = finite_diff(b, a, x, 1e-6);
                    approx_eq(g.d_a, fd[0], tol(fd[0]));
                    approx_eq(g.d_b, fd[1], tol(fd[1]));
                }
            }
        }
    }

    #[test]
    fn grad_integer_shape_needs_more_terms() {
        let r = betainc_with(1.0_f64, 1.0, 0.42, &BetaIncSettings::default()).unwrap();
        let g = betainc_grad(1.0_f64, 1.0, 0.42).unwrap();
        assert_eq!(r.value.to_bits(), g.value.to_bits());
        assert!(g.iterations > r.iterations);
    }

    #[test]
    fn grad_signs() {
        // Larger a pushes mass right, larger b pushes it left.
        for &(a, b, x) in &GRID {
            let g = betainc_grad(a, b, x).unwrap();
            assert!(g.d_a < 0.0, "d_a >= 0 at a={a} b={b} x={x}");
            assert!(g.d_b > 0.0, "d_b <= 0 at a={a} b={b} x={x}");
        }
    }

    #[test]
    fn grad_shape_symmetry() {
        // ∂I_x(a,b)/∂a = −∂I_{1−x}(b,a)/∂b
        let g = betainc_grad(2.0_f64, 5.0, 0.3).unwrap();
        let h = betainc_grad(5.0_f64, 2.0, 0.7).unwrap();
        approx_eq(g.d_a, -h.d_b, 1e-12);
        approx_eq(g.d_b, -h.d_a, 1e-12);
        approx_eq(g.d_x, h.d_x, 1e-12);
    }

    #[test]
    fn grad_at_x_zero() {
        let g = betainc_grad(0.5_f64, 2.0, 0.0).unwrap();
        assert_eq!(g.value, 0.0);
        assert_eq!(g.d_x, f64::INFINITY);
        assert_eq!(g.d_a, 0.0);
        assert_eq!(g.d_b, 0.0);

        assert_eq!(betainc_grad(1.0_f64, 3.0, 0.0).unwrap().d_x, 3.0);
        assert_eq!(betainc_grad(2.0_f64, 3.0, 0.0).unwrap().d_x, 0.0);
    }

    #[test]
    fn grad_at_x_one() {
        let g = betainc_grad(2.0_f64, 0.5, 1.0).unwrap();
        assert_eq!(g.value, 1.0);
        assert_eq!(g.d_x, f64::INFINITY);
        assert_eq!(g.d_a, 0.0);
        assert_eq!(g.d_b, 0.0);

        assert_eq!(betainc_grad(4.0_f64, 1.0, 1.0).unwrap().d_x, 4.0);
        assert_eq!(betainc_grad(4.0_f64, 2.0, 1.0).unwrap().d_x, 0.0);
    }

    // =====================================================================
    // settings and convergence
    // =====================================================================

    #[test]
    fn settings_defaults() {
        let s = BetaIncSettings::<f64>::default();
        assert_eq!(s.epsilon, 1e-14);
        assert_eq!(s.min_approx, 3);
        assert_eq!(s.max_approx, 500);
        assert!(s.validate().is_ok());

        // f32 cannot resolve 1e-14; the tolerance floors at 16 ulp.
        let s32 = BetaIncSettings::<f32>::default();
        assert_eq!(s32.epsilon, 16.0 * f32::EPSILON);

        let fast = BetaIncSettings::<f64>::fast();
        assert_eq!(fast.epsilon, 1e-12);
        assert_eq!(fast.max_approx, 200);
    }

    #[test]
    fn settings_invalid() {
        let base = BetaIncSettings::<f64>::default();
        let bad = [
            BetaIncSettings { epsilon: 0.0, ..base },
            BetaIncSettings { epsilon: -1e-10, ..base },
            BetaIncSettings { epsilon: f64::NAN, ..base },
            BetaIncSettings { epsilon: f64::INFINITY, ..base },
            BetaIncSettings { max_approx: 0, min_approx: 0, ..base },
            BetaIncSettings { min_approx: 10, max_approx: 5, ..base },
        ];
        for s in &bad {
            assert_eq!(s.validate(), Err(SpecialError::InvalidSettings));
            assert_eq!(
                betainc_with(2.0, 3.0, 0.5, s),
                Err(SpecialError::InvalidSettings)
            );
            assert_eq!(
                betainc_grad_with(2.0, 3.0, 0.5, s),
                Err(SpecialError::InvalidSettings)
            );
        }
    }

    #[test]
    fn domain_errors() {
        let bad = [
            (0.0_f64, 1.0, 0.5),
            (-1.0, 1.0, 0.5),
            (1.0, 0.0, 0.5),
            (1.0, f64::INFINITY, 0.5),
            (f64::NAN, 1.0, 0.5),
            (1.0, 1.0, -0.1),
            (1.0, 1.0, 1.1),
            (1.0, 1.0, f64::NAN),
        ];
        for &(a, b, x) in &bad {
            assert_eq!(betainc(a, b, x), Err(SpecialError::DomainError));
            assert_eq!(betainc_grad(a, b, x), Err(SpecialError::DomainError));
        }
    }

    #[test]
    fn truncation_reported() {
        let s = BetaIncSettings { epsilon: 1e-14, min_approx: 1, max_approx: 2 };
        let r = betainc_with(5.0_f64, 7.0, 0.4, &s).unwrap();
        assert!(!r.converged);
        assert_eq!(r.iterations, 2);
        assert!(r.value.is_finite());

        let g = betainc_grad_with(5.0_f64, 7.0, 0.4, &s).unwrap();
        assert!(!g.converged);
        assert_eq!(g.value, r.value);
    }

    #[test]
    fn more_terms_reduce_error() {
        let exact = binomial_reference(5, 7, 0.4);
        let err = |max_approx: usize| {
            let s = BetaIncSettings { epsilon: 1e-15, min_approx: 1, max_approx };
            (betainc_with(5.0_f64, 7.0, 0.4, &s).unwrap().value - exact).abs()
        };
        assert!(err(64) < err(2));
        assert!(err(64) < 1e-13);
    }

    #[test]
    fn min_approx_forces_terms() {
        // d_1 is O(x), so a single term already looks converged.
        let loose = BetaIncSettings { epsilon: 1e-14, min_approx: 1, max_approx: 500 };
        let strict = BetaIncSettings { min_approx: 3, ..loose };
        let r1 = betainc_with(2.0_f64, 3.0, 1e-20, &loose).unwrap();
        let r3 = betainc_with(2.0_f64, 3.0, 1e-20, &strict).unwrap();
        assert_eq!(r1.iterations, 1);
        assert!(r3.iterations >= 3);
        assert!(((r1.value - r3.value) / r3.value).abs() < 1e-15);
    }

    #[test]
    fn looser_epsilon_uses_fewer_terms() {
        let default = betainc_with(20.0_f64, 30.0, 0.4, &BetaIncSettings::default()).unwrap();
        let fast = betainc_with(20.0_f64, 30.0, 0.4, &BetaIncSettings::fast()).unwrap();
        assert!(fast.iterations <= default.iterations);
        approx_eq(fast.value, default.value, 1e-10);
    }

    // =====================================================================
    // batch
    // =====================================================================

    #[test]
    fn batch_matches_scalar() {
        let s = BetaIncSettings::default();
        let a = [0.5_f64, 2.0, 10.0, 3.5];
        let x = [0.3_f64, 0.5, 0.35, 0.95];
        let mut out = [0.0; 4];
        let report = betainc_batch(&a, 2.5_f64, &x, &s, &mut out).unwrap();
        assert_eq!(report.len, 4);
        assert_eq!(report.non_converged, 0);
        for i in 0..4 {
            let r = betainc_with(a[i], 2.5, x[i], &s).unwrap();
            assert_eq!(out[i].to_bits(), r.value.to_bits());
            assert!(report.max_iterations >= r.iterations);
        }
    }

    #[test]
    fn batch_grad_matches_scalar() {
        let s = BetaIncSettings::default();
        let x = [0.0_f64, 0.1, 0.5, 0.9, 1.0];
        let mut out = [BetaIncGrad::exact(0.0, 0.0); 5];
        betainc_grad_batch(2.0_f64, 3.0_f64, &x, &s, &mut out).unwrap();
        for i in 0..5 {
            assert_eq!(out[i], betainc_grad_with(2.0, 3.0, x[i], &s).unwrap());
        }
    }

    #[test]
    fn batch_order_independent() {
        let s = BetaIncSettings::default();
        let x = [0.2_f64, 0.9, 0.6];
        let rev = [0.6_f64, 0.9, 0.2];
        let mut out = [0.0; 3];
        let mut out_rev = [0.0; 3];
        betainc_batch(4.0_f64, 1.5_f64, &x, &s, &mut out).unwrap();
        betainc_batch(4.0_f64, 1.5_f64, &rev, &s, &mut out_rev).unwrap();
        assert_eq!(out[0], out_rev[2]);
        assert_eq!(out[1], out_rev[1]);
        assert_eq!(out[2], out_rev[0]);
    }

    #[test]
    fn batch_all_scalars() {
        let mut out = [0.0_f64; 1];
        let report =
            betainc_batch(2.0_f64, 3.0_f64, 0.5_f64, &BetaIncSettings::default(), &mut out)
                .unwrap();
        assert_eq!(report.len, 1);
        approx_eq(out[0], 0.6875, 1e-14);
    }

    #[test]
    fn batch_empty() {
        let empty: [f64; 0] = [];
        let mut out: [f64; 0] = [];
        let report = betainc_batch(&empty, 1.0_f64, 0.5_f64, &BetaIncSettings::default(), &mut out)
            .unwrap();
        assert_eq!(report, BatchReport::default());
    }

    #[test]
    fn batch_shape_mismatch() {
        let s = BetaIncSettings::default();
        let a = [1.0_f64, 2.0, 3.0];
        let x = [0.1_f64, 0.2];
        let mut out = [0.0; 3];
        assert_eq!(
            betainc_batch(&a, 1.0_f64, &x, &s, &mut out),
            Err(SpecialError::ShapeMismatch)
        );
        let mut short = [0.0; 2];
        assert_eq!(
            betainc_batch(&a, 1.0_f64, 0.5_f64, &s, &mut short),
            Err(SpecialError::ShapeMismatch)
        );
    }

    #[test]
    fn batch_error_leaves_output_untouched() {
        let s = BetaIncSettings::default();
        let x = [0.1_f64, 0.5, 1.5, 0.7];
        let mut out = [-7.0_f64; 4];
        assert_eq!(
            betainc_batch(2.0_f64, 3.0_f64, &x, &s, &mut out),
            Err(SpecialError::DomainError)
        );
        assert!(out.iter().all(|&v| v == -7.0));

        let bad = BetaIncSettings { max_approx: 0, ..s };
        let ok = [0.1_f64, 0.5, 0.6, 0.7];
        assert_eq!(
            betainc_batch(2.0_f64, 3.0_f64, &ok, &bad, &mut out),
            Err(SpecialError::InvalidSettings)
        );
        assert!(out.iter().all(|&v| v == -7.0));
    }

    #[test]
    fn batch_reports_truncation() {
        let s = BetaIncSettings { epsilon: 1e-14, min_approx: 1, max_approx: 2 };
        let x = [0.3_f64, 0.4, 1.0];
        let mut out = [0.0; 3];
        let report = betainc_batch(5.0_f64, 7.0_f64, &x, &s, &mut out).unwrap();
        // x = 1 is exact and never truncates
        assert_eq!(report.non_converged, 2);
        assert_eq!(report.max_iterations, 2);
    }

    #[cfg(feature = "alloc")]
    #[test]
    fn batch_vec() {
        let a = alloc::vec![1.0_f64, 2.0, 3.0];
        let v = betainc_vec(&a, &a, 0.5_f64, &BetaIncSettings::default()).unwrap();
        assert_eq!(v.len(), 3);
        for p in &v {
            approx_eq(*p, 0.5, 1e-13);
        }

        let g = betainc_grad_vec(2.0_f64, 3.0_f64, &a, &BetaIncSettings::default());
        assert_eq!(g, Err(SpecialError::DomainError));
    }
}
