//! Elementwise evaluation over batches of (a, b, x).
//!
//! Every element is independent: there is no shared state, and the result
//! of an element never depends on its position or its neighbours. With the
//! `parallel` feature the elements are spread over the rayon thread pool
//! and produce the same bits as the sequential path.
//!
//! Out-of-domain input fails the whole call. All operands are validated
//! before the first element is evaluated, so on error the output buffer is
//! left exactly as it was.

#[cfg(feature = "alloc")]
use alloc::vec::Vec;

use crate::FloatScalar;
use super::SpecialError;
use super::betainc::{check_domain, evaluate, evaluate_grad, BetaIncGrad, BetaIncSettings};

/// One operand of a batched call: a scalar broadcast to every element, or a
/// slice with one entry per element.
///
/// All slice operands of one call must have the same length. Scalars adapt
/// to that length; a call made only of scalars has length 1.
#[derive(Debug, Clone, Copy)]
pub enum Arg<'a, T> {
    Scalar(T),
    Slice(&'a [T]),
}

impl<'a, T: Copy> Arg<'a, T> {
    /// Length of a slice operand, `None` for a scalar.
    pub fn len(&self) -> Option<usize> {
        match self {
            Arg::Scalar(_) => None,
            Arg::Slice(s) => Some(s.len()),
        }
    }

    #[inline]
    pub(crate) fn get(&self, i: usize) -> T {
        match self {
            Arg::Scalar(v) => *v,
            Arg::Slice(s) => s[i],
        }
    }
}

impl<'a, T: FloatScalar> From<T> for Arg<'a, T> {
    fn from(v: T) -> Self {
        Arg::Scalar(v)
    }
}

impl<'a, T> From<&'a [T]> for Arg<'a, T> {
    fn from(s: &'a [T]) -> Self {
        Arg::Slice(s)
    }
}

impl<'a, T, const N: usize> From<&'a [T; N]> for Arg<'a, T> {
    fn from(s: &'a [T; N]) -> Self {
        Arg::Slice(s.as_slice())
    }
}

#[cfg(feature = "alloc")]
impl<'a, T> From<&'a Vec<T>> for Arg<'a, T> {
    fn from(s: &'a Vec<T>) -> Self {
        Arg::Slice(s.as_slice())
    }
}

/// Common length of a set of operand lengths (`None` = broadcast scalar).
pub(crate) fn batch_len(lens: &[Option<usize>]) -> Result<usize, SpecialError> {
    let mut n = None;
    for len in lens.iter().flatten() {
        match n {
            None => n = Some(*len),
            Some(m) if m != *len => return Err(SpecialError::ShapeMismatch),
            Some(_) => {}
        }
    }
    Ok(n.unwrap_or(1))
}

/// Convergence summary of a batched call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BatchReport {
    /// Number of elements evaluated.
    pub len: usize,
    /// Elements that hit `max_approx` before meeting `epsilon`.
    pub non_converged: usize,
    /// Largest number of continued-fraction terms used by any element.
    pub max_iterations: usize,
}

impl BatchReport {
    pub(crate) fn single(iterations: usize, converged: bool) -> Self {
        Self {
            len: 1,
            non_converged: usize::from(!converged),
            max_iterations: iterations,
        }
    }

    pub(crate) fn merge(self, other: Self) -> Self {
        Self {
            len: self.len + other.len,
            non_converged: self.non_converged + other.non_converged,
            max_iterations: self.max_iterations.max(other.max_iterations),
        }
    }
}

/// Fill `out[i]` from `eval(i)` and fold the per-element diagnostics.
pub(crate) fn run<R, F>(out: &mut [R], eval: F) -> BatchReport
where
    R: Send,
    F: Fn(usize) -> (R, BatchReport) + Sync + Send,
{
    #[cfg(feature = "parallel")]
    let report = {
        use rayon::prelude::*;
        out.par_iter_mut()
            .enumerate()
            .map(|(i, slot)| {
                let (r, report) = eval(i);
                *slot = r;
                report
            })
            .reduce(BatchReport::default, BatchReport::merge)
    };

    #[cfg(not(feature = "parallel"))]
    let report = out
        .iter_mut()
        .enumerate()
        .map(|(i, slot)| {
            let (r, report) = eval(i);
            *slot = r;
            report
        })
        .fold(BatchReport::default(), BatchReport::merge);

    log::trace!(
        "batch of {}: {} element(s) not converged, max {} terms",
        report.len,
        report.non_converged,
        report.max_iterations
    );
    report
}

fn validate<T: FloatScalar>(
    a: &Arg<'_, T>,
    b: &Arg<'_, T>,
    x: &Arg<'_, T>,
    settings: &BetaIncSettings<T>,
    out_len: usize,
) -> Result<usize, SpecialError> {
    let n = batch_len(&[a.len(), b.len(), x.len()])?;
    if out_len != n {
        return Err(SpecialError::ShapeMismatch);
    }
    settings.validate()?;
    for i in 0..n {
        check_domain(a.get(i), b.get(i), x.get(i))?;
    }
    Ok(n)
}

/// Elementwise I_x(a, b) into `out`.
///
/// # Errors
///
/// [`SpecialError::ShapeMismatch`] if slice operands differ in length or
/// `out` does not match the batch length; [`SpecialError::DomainError`] if
/// any element is outside the domain; [`SpecialError::InvalidSettings`].
/// `out` is untouched on error.
///
/// # Example
///
/// ```
/// use betagrad::special::{betainc_batch, BetaIncSettings};
///
/// let x = [0.1_f64, 0.5, 0.9];
/// let mut out = [0.0; 3];
/// let report = betainc_batch(2.0, 3.0, &x, &BetaIncSettings::default(), &mut out).unwrap();
/// assert_eq!(report.non_converged, 0);
/// assert!((out[1] - 0.6875).abs() < 1e-12);
/// ```
pub fn betainc_batch<'a, T: FloatScalar>(
    a: impl Into<Arg<'a, T>>,
    b: impl Into<Arg<'a, T>>,
    x: impl Into<Arg<'a, T>>,
    settings: &BetaIncSettings<T>,
    out: &mut [T],
) -> Result<BatchReport, SpecialError> {
    let (a, b, x) = (a.into(), b.into(), x.into());
    validate(&a, &b, &x, settings, out.len())?;
    Ok(run(out, |i| {
        let r = evaluate(a.get(i), b.get(i), x.get(i), settings);
        (r.value, BatchReport::single(r.iterations, r.converged))
    }))
}

/// Elementwise I_x(a, b) with gradients into `out`.
///
/// # Errors
///
/// Same as [`betainc_batch`].
pub fn betainc_grad_batch<'a, T: FloatScalar>(
    a: impl Into<Arg<'a, T>>,
    b: impl Into<Arg<'a, T>>,
    x: impl Into<Arg<'a, T>>,
    settings: &BetaIncSettings<T>,
    out: &mut [BetaIncGrad<T>],
) -> Result<BatchReport, SpecialError> {
    let (a, b, x) = (a.into(), b.into(), x.into());
    validate(&a, &b, &x, settings, out.len())?;
    Ok(run(out, |i| {
        let g = evaluate_grad(a.get(i), b.get(i), x.get(i), settings);
        (g, BatchReport::single(g.iterations, g.converged))
    }))
}

/// Elementwise I_x(a, b), allocating the output.
///
/// # Example
///
/// ```
/// use betagrad::special::{betainc_vec, BetaIncSettings};
///
/// let a = vec![1.0_f64, 2.0, 3.0];
/// let v = betainc_vec(&a, &a, 0.5, &BetaIncSettings::default()).unwrap();
/// // I_{1/2}(a, a) = 1/2 by symmetry
/// assert!(v.iter().all(|p| (p - 0.5).abs() < 1e-13));
/// ```
#[cfg(feature = "alloc")]
pub fn betainc_vec<'a, T: FloatScalar>(
    a: impl Into<Arg<'a, T>>,
    b: impl Into<Arg<'a, T>>,
    x: impl Into<Arg<'a, T>>,
    settings: &BetaIncSettings<T>,
) -> Result<Vec<T>, SpecialError> {
    let (a, b, x) = (a.into(), b.into(), x.into());
    let n = batch_len(&[a.len(), b.len(), x.len()])?;
    let mut out = alloc::vec![T::zero(); n];
    betainc_batch(a, b, x, settings, &mut out)?;
    Ok(out)
}

/// Elementwise I_x(a, b) with gradients, allocating the output.
#[cfg(feature = "alloc")]
pub fn betainc_grad_vec<'a, T: FloatScalar>(
    a: impl Into<Arg<'a, T>>,
    b: impl Into<Arg<'a, T>>,
    x: impl Into<Arg<'a, T>>,
    settings: &BetaIncSettings<T>,
) -> Result<Vec<BetaIncGrad<T>>, SpecialError> {
    let (a, b, x) = (a.into(), b.into(), x.into());
    let n = batch_len(&[a.len(), b.len(), x.len()])?;
    let mut out = alloc::vec![BetaIncGrad::exact(T::zero(), T::zero()); n];
    betainc_grad_batch(a, b, x, settings, &mut out)?;
    Ok(out)
}
