//! Batched Student's t CDF with gradients.

#[cfg(feature = "alloc")]
use alloc::vec::Vec;

use crate::FloatScalar;
use crate::special::{batch_len, run, Arg, BatchReport, BetaIncSettings};
use super::{DifferentiableCdf, StatsError, StudentT, StudentTCdfGrad};

/// Elementwise t CDF P(X ≤ x) for X ~ t(ν, μ, σ), with gradients, into `out`.
///
/// Operands broadcast like [`crate::special::betainc_batch`]: scalars adapt
/// to the common slice length. Every parameter triple is validated before
/// any element is evaluated; on error `out` is untouched.
///
/// # Errors
///
/// [`StatsError::ShapeMismatch`] for inconsistent lengths,
/// [`StatsError::InvalidParameter`] for an invalid (ν, μ, σ) element or
/// invalid settings.
///
/// # Example
///
/// ```
/// use betagrad::special::BetaIncSettings;
/// use betagrad::stats::{student_t_cdf_batch, StudentTCdfGrad};
///
/// let x = [-2.0_f64, -1.0, 0.0, 1.0, 2.0];
/// let mut out = [StudentTCdfGrad {
///     value: 0.0, d_x: 0.0, d_df: 0.0, d_loc: 0.0, d_scale: 0.0, iterations: 0, converged: true,
/// }; 5];
/// student_t_cdf_batch(&x, 10.0, 0.0, 1.0, &BetaIncSettings::default(), &mut out).unwrap();
/// assert_eq!(out[2].value, 0.5);
/// assert!((out[0].value + out[4].value - 1.0).abs() < 1e-14);
/// ```
pub fn student_t_cdf_batch<'a, T: FloatScalar>(
    x: impl Into<Arg<'a, T>>,
    df: impl Into<Arg<'a, T>>,
    loc: impl Into<Arg<'a, T>>,
    scale: impl Into<Arg<'a, T>>,
    settings: &BetaIncSettings<T>,
    out: &mut [StudentTCdfGrad<T>],
) -> Result<BatchReport, StatsError> {
    let (x, df, loc, scale) = (x.into(), df.into(), loc.into(), scale.into());
    let n = batch_len(&[x.len(), df.len(), loc.len(), scale.len()])
        .map_err(|_| StatsError::ShapeMismatch)?;
    if out.len() != n {
        return Err(StatsError::ShapeMismatch);
    }
    settings
        .validate()
        .map_err(|_| StatsError::InvalidParameter)?;
    for i in 0..n {
        StudentT::with_loc_scale(df.get(i), loc.get(i), scale.get(i))?;
    }

    Ok(run(out, |i| {
        let t = StudentT::from_validated(df.get(i), loc.get(i), scale.get(i), *settings);
        let g = t.cdf_grad(x.get(i));
        (g, BatchReport::single(g.iterations, g.converged))
    }))
}

/// Elementwise t CDF with gradients, allocating the output.
#[cfg(feature = "alloc")]
pub fn student_t_cdf_vec<'a, T: FloatScalar>(
    x: impl Into<Arg<'a, T>>,
    df: impl Into<Arg<'a, T>>,
    loc: impl Into<Arg<'a, T>>,
    scale: impl Into<Arg<'a, T>>,
    settings: &BetaIncSettings<T>,
) -> Result<Vec<StudentTCdfGrad<T>>, StatsError> {
    let (x, df, loc, scale) = (x.into(), df.into(), loc.into(), scale.into());
    let n = batch_len(&[x.len(), df.len(), loc.len(), scale.len()])
        .map_err(|_| StatsError::ShapeMismatch)?;
    let zero = T::zero();
    let blank = StudentTCdfGrad {
        value: zero,
        d_x: zero,
        d_df: zero,
        d_loc: zero,
        d_scale: zero,
        iterations: 0,
        converged: true,
    };
    let mut out = alloc::vec![blank; n];
    student_t_cdf_batch(x, df, loc, scale, settings, &mut out)?;
    Ok(out)
}
