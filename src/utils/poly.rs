use num::Zero;
use std::ops::{Add, Mul};

/// Evaluates the polynomial `coeffs[0] + coeffs[1]·x + coeffs[2]·x² + …` at `x`.
///
/// Uses Horner's scheme. An empty coefficient list is the zero polynomial.
#[inline]
pub fn poly_eval<T>(coeffs: &[T], x: T) -> T
where
    T: Copy + Zero + Add<Output = T> + Mul<Output = T>,
{
    coeffs
        .iter()
        .rev()
        .fold(T::zero(), |acc, coeff| acc * x + *coeff)
}
