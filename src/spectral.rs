//! Spectral post-processing over complex buffers.
//!
//! These helpers iterate plain complex slices and are independent of any
//! [`crate::rfft::RfftPlan`]; they apply equally to a half-spectrum or any
//! other complex buffer. Lengths are validated before anything is written.

use crate::fft::FftError;
use crate::num::{Complex, Float};

/// Euclidean norm of each complex element.
pub fn magnitude<T: Float>(input: &[Complex<T>], output: &mut [T]) -> Result<(), FftError> {
    if input.len() != output.len() {
        return Err(FftError::MismatchedLengths);
    }
    for (out, c) in output.iter_mut().zip(input.iter()) {
        *out = c.norm();
    }
    Ok(())
}

/// Argument of each complex element, in `(-pi, pi]`.
pub fn phase<T: Float>(input: &[Complex<T>], output: &mut [T]) -> Result<(), FftError> {
    if input.len() != output.len() {
        return Err(FftError::MismatchedLengths);
    }
    for (out, c) in output.iter_mut().zip(input.iter()) {
        *out = c.arg();
    }
    Ok(())
}

/// Magnitude and argument of each element in a single pass.
///
/// Equivalent to calling [`magnitude`] and [`phase`] but reads the input
/// only once.
pub fn cartesian_to_polar<T: Float>(
    input: &[Complex<T>],
    magnitude: &mut [T],
    phase: &mut [T],
) -> Result<(), FftError> {
    if input.len() != magnitude.len() || input.len() != phase.len() {
        return Err(FftError::MismatchedLengths);
    }
    for (i, c) in input.iter().enumerate() {
        magnitude[i] = c.norm();
        phase[i] = c.arg();
    }
    Ok(())
}
