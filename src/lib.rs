//! # sigvec - real FFT and vector kernels for audio DSP
//!
//! A small signal-processing kernel library: a real-input FFT/IFFT pair over
//! power-of-two buffers, spectral post-processing (magnitude, phase, polar
//! decomposition), elementwise vector arithmetic, and test-signal
//! generators.
//!
//! ## Features
//!
//! - **Plan-based real FFT**: build a [`RfftPlan`] once per transform
//!   length, reuse it for repeated forward/inverse calls with zero runtime
//!   allocation
//! - **Half-spectrum layout**: `N` real samples in, `N/2 + 1` complex bins
//!   out, DC and Nyquist purely real
//! - **Typed errors everywhere**: contract violations surface as
//!   [`FftError`] values before any output is written, never as aborts
//! - **`no_std` + `alloc`**: math goes through `libm` when the `std`
//!   feature is disabled
//!
//! ## Cargo Features
//!
//! - `std` (default): use the standard library's float math and enable
//!   `rand`'s thread-local generators
//! - `verbose-logging`: emit `log` records from plan construction and cache
//!   maintenance
//!
//! ## Example
//!
//! ```
//! use sigvec::{Complex32, RfftPlan};
//!
//! let mut plan = RfftPlan::<f32>::new(8).unwrap();
//! let input = sigvec::siggen::sine(8, 0.125, 0.0, 1.0);
//! let mut spectrum = vec![Complex32::zero(); plan.output_size()];
//! plan.forward(&input, &mut spectrum).unwrap();
//!
//! let mut mags = vec![0.0f32; spectrum.len()];
//! sigvec::spectral::magnitude(&spectrum, &mut mags).unwrap();
//! ```
//!
//! ## License
//!
//! Licensed under either of Apache License, Version 2.0 or MIT license at
//! your option.

#![no_std]
extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

/// Complex FFT backend: error type, backend trait, and the scalar
/// Stockham implementation.
pub mod fft;

/// Real-input FFT engine: transform plans bound to one length, plus a
/// planner that caches twiddle tables.
pub mod rfft;

pub mod num;

/// Spectral post-processing over complex buffers: magnitude, phase, and
/// combined polar decomposition.
pub mod spectral;

/// Elementwise arithmetic, thresholding, and copy/zero over real buffers.
pub mod vector;

/// Periodic window functions.
pub mod window;

/// Test-signal generators: sine, chirp, linspace, uniform random.
pub mod siggen;

pub use fft::{FftError, FftImpl, FftPlanner, ScalarFftImpl};
pub use num::{Complex, Complex32, Complex64, Float};
pub use rfft::{RfftPlan, RfftPlanner};

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    /// End-to-end: generate, window, transform, post-process.
    #[test]
    fn windowed_sine_peaks_at_expected_bin() {
        let n = 64;
        let mut signal = siggen::sine(n, 4.0 / n as f32, 0.0, 1.0);
        let win = window::hamming(n);
        vector::mul_inplace(&win, &mut signal).unwrap();

        let mut plan = RfftPlan::<f32>::new(n).unwrap();
        let mut spectrum = vec![Complex32::zero(); plan.output_size()];
        plan.forward(&signal, &mut spectrum).unwrap();

        let mut mags = vec![0.0f32; spectrum.len()];
        spectral::magnitude(&spectrum, &mut mags).unwrap();

        let peak = mags
            .iter()
            .enumerate()
            .max_by(|a, b| a.1.partial_cmp(b.1).unwrap())
            .map(|(i, _)| i)
            .unwrap();
        assert_eq!(peak, 4);
    }
}
