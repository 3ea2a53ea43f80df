use core::fmt::Debug;
use num_traits::Float;

/// Trait for floating-point element types accepted by every function in the crate.
///
/// Blanket-implemented for all types satisfying the bounds, which in
/// practice means `f32` and `f64`. `Send + Sync` lets batched evaluation
/// fan out across threads when the `parallel` feature is enabled.
pub trait FloatScalar: Float + Debug + Send + Sync + 'static {}

impl<T: Float + Debug + Send + Sync + 'static> FloatScalar for T {}
