//! Storage element types for timestream samples.
//!
//! Detector data is commonly kept in single precision. All running sums in
//! this crate are accumulated in `f64` regardless of the storage type, so
//! the trait only needs lossless widening and a narrowing conversion back.

/// A real-valued sample that can be stored in the timestream matrix.
pub trait Sample: Copy + Send + Sync + 'static {
    /// Widen to `f64` for accumulation.
    fn to_f64(self) -> f64;

    /// Narrow an `f64` result back to the storage type.
    fn from_f64(value: f64) -> Self;
}

impl Sample for f32 {
    #[inline]
    fn to_f64(self) -> f64 {
        self as f64
    }

    #[inline]
    fn from_f64(value: f64) -> Self {
        value as f32
    }
}

impl Sample for f64 {
    #[inline]
    fn to_f64(self) -> f64 {
        self
    }

    #[inline]
    fn from_f64(value: f64) -> Self {
        value
    }
}
