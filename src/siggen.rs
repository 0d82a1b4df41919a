//! Test-signal generators.
//!
//! Closed-form sample producers used for fixtures and synthetic input:
//! sinusoid, linear chirp, linearly spaced ramp, and a uniform random
//! sample. Frequencies are in cycles per sample, phases in radians.

use core::f32::consts::PI;

use alloc::vec::Vec;
use rand::Rng;

use crate::fft::FftError;
#[allow(unused_imports)]
use crate::num::Float;

/// Fill `output` with `magnitude * cos(2*pi*frequency*n + phase)`.
pub fn sine_inplace(output: &mut [f32], frequency: f32, phase: f32, magnitude: f32) {
    for (n, sample) in output.iter_mut().enumerate() {
        *sample = magnitude * (2.0 * PI * frequency * n as f32 + phase).cos();
    }
}

/// Generate a sinusoid of length `len`.
pub fn sine(len: usize, frequency: f32, phase: f32, magnitude: f32) -> Vec<f32> {
    let mut out = alloc::vec![0.0f32; len];
    sine_inplace(&mut out, frequency, phase, magnitude);
    out
}

/// Fill `output` with a linear chirp.
///
/// The instantaneous frequency ramps from `start_freq` at sample 0 to
/// `end_freq` at the end of the buffer; the phase accumulates as
/// `2*pi*(start_freq + n*df)*n + start_phase` with
/// `df = (end_freq - start_freq)/len`.
pub fn chirp_inplace(
    output: &mut [f32],
    start_freq: f32,
    end_freq: f32,
    start_phase: f32,
    magnitude: f32,
) {
    let freq_per_sample = (end_freq - start_freq) / output.len() as f32;
    for (n, sample) in output.iter_mut().enumerate() {
        let samp = n as f32;
        *sample =
            magnitude * (2.0 * PI * (start_freq + samp * freq_per_sample) * samp + start_phase).cos();
    }
}

/// Generate a linear chirp of length `len`.
pub fn chirp(len: usize, start_freq: f32, end_freq: f32, start_phase: f32, magnitude: f32) -> Vec<f32> {
    let mut out = alloc::vec![0.0f32; len];
    chirp_inplace(&mut out, start_freq, end_freq, start_phase, magnitude);
    out
}

/// Fill `output` with `output.len()` evenly spaced values from `start` to
/// `finish` inclusive.
///
/// The buffer must hold at least two values, otherwise
/// [`FftError::InvalidValue`] is returned and nothing is written.
pub fn linspace_inplace(output: &mut [f32], start: f32, finish: f32) -> Result<(), FftError> {
    if output.len() < 2 {
        return Err(FftError::InvalidValue);
    }
    let increment = (finish - start) / (output.len() - 1) as f32;
    for (n, v) in output.iter_mut().enumerate() {
        *v = start + n as f32 * increment;
    }
    Ok(())
}

/// Generate `len >= 2` evenly spaced values from `start` to `finish`
/// inclusive.
pub fn linspace(start: f32, finish: f32, len: usize) -> Result<Vec<f32>, FftError> {
    let mut out = alloc::vec![0.0f32; len];
    linspace_inplace(&mut out, start, finish)?;
    Ok(out)
}

/// Draw one sample from a uniform distribution over `[min_val, max_val]`.
///
/// Requires `max_val > min_val`, otherwise [`FftError::InvalidValue`].
pub fn uniform_random<R: Rng + ?Sized>(
    rng: &mut R,
    min_val: f32,
    max_val: f32,
) -> Result<f32, FftError> {
    if !(max_val > min_val) {
        return Err(FftError::InvalidValue);
    }
    Ok(rng.gen_range(min_val..=max_val))
}
