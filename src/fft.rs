//! Complex FFT backend.
//!
//! The real-input engine in [`crate::rfft`] only talks to the backend through
//! the [`FftImpl`] trait: given a buffer in the agreed layout, produce the
//! numerically correct transform. [`ScalarFftImpl`] is the provided
//! implementation, an iterative Stockham radix-2 FFT over a double buffer
//! with small direct kernels for the shortest lengths. A [`FftPlanner`]
//! caches twiddle tables and the Stockham scratch buffer for reuse across
//! calls.
//!
//! Only power-of-two lengths are supported.

use alloc::sync::Arc;
use alloc::vec::Vec;
use core::cell::RefCell;

use hashbrown::HashMap;

use crate::num::{Complex, Float};

pub use crate::num::{Complex32, Complex64};

/// Error type shared by every fallible operation in the crate.
///
/// Contract violations are reported through these variants before any output
/// buffer is touched; no operation aborts the process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FftError {
    /// An operand buffer was empty.
    EmptyInput,
    /// The transform length is not a power of two.
    NonPowerOfTwo,
    /// Operand buffer lengths disagree with each other or with the plan.
    MismatchedLengths,
    /// A numeric parameter violated its contract (non-positive threshold,
    /// inverted range, length too short).
    InvalidValue,
}

impl core::fmt::Display for FftError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::EmptyInput => "input buffer is empty".fmt(f),
            Self::NonPowerOfTwo => "transform length is not a power of two".fmt(f),
            Self::MismatchedLengths => "operand buffer lengths do not match".fmt(f),
            Self::InvalidValue => "parameter violates its contract".fmt(f),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for FftError {}

/// Backend contract for the raw complex transform.
///
/// Implementations may precompute per-length state in [`FftImpl::prepare`];
/// the default is a no-op.
pub trait FftImpl<T: Float> {
    /// In-place forward transform. Unnormalized.
    fn fft(&self, input: &mut [Complex<T>]) -> Result<(), FftError>;
    /// In-place inverse transform, scaled by `1/len`.
    fn ifft(&self, input: &mut [Complex<T>]) -> Result<(), FftError>;
    /// Warm any cached state for transforms of length `n`.
    fn prepare(&self, n: usize) {
        let _ = n;
    }
}

/// Caches twiddle tables by transform length plus a reusable scratch buffer
/// for the Stockham passes.
pub struct FftPlanner<T: Float> {
    cache: HashMap<usize, Arc<[Complex<T>]>>,
    scratch: Vec<Complex<T>>,
}

impl<T: Float> Default for FftPlanner<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Float> FftPlanner<T> {
    pub fn new() -> Self {
        Self {
            cache: HashMap::new(),
            scratch: Vec::new(),
        }
    }

    /// Retrieve or build the table of `n/2` twiddle factors
    /// `exp(-2*pi*i*j/n)` for a length-`n` transform.
    pub fn get_twiddles(&mut self, n: usize) -> Arc<[Complex<T>]> {
        if !self.cache.contains_key(&n) {
            let half = n / 2;
            let theta = -(T::pi() + T::pi()) / T::from_f32(n as f32);
            let (sin_step, cos_step) = theta.sin_cos();
            let mut table = Vec::with_capacity(half);
            let mut w_re = T::one();
            let mut w_im = T::zero();
            for _ in 0..half {
                table.push(Complex::new(w_re, w_im));
                let tmp = w_re;
                w_re = w_re.mul_add(cos_step, -(w_im * sin_step));
                w_im = w_im.mul_add(cos_step, tmp * sin_step);
            }
            self.cache.insert(n, Arc::from(table));
        }
        Arc::clone(self.cache.get(&n).unwrap())
    }

    /// Pre-build the twiddle table and scratch buffer for length `n`.
    pub fn warm(&mut self, n: usize) {
        if n > 4 {
            self.get_twiddles(n);
        }
        if self.scratch.len() < n {
            self.scratch.resize(n, Complex::zero());
        }
    }
}

/// Scalar Stockham radix-2 FFT.
///
/// The planner lives behind a [`RefCell`] so transforms can run through a
/// shared reference; the type is consequently not `Sync` and a single
/// instance must not be used from multiple threads without external
/// synchronization.
pub struct ScalarFftImpl<T: Float> {
    planner: RefCell<FftPlanner<T>>,
}

impl<T: Float> Default for ScalarFftImpl<T> {
    fn default() -> Self {
        Self {
            planner: RefCell::new(FftPlanner::new()),
        }
    }
}

impl<T: Float> ScalarFftImpl<T> {
    pub fn with_planner(planner: FftPlanner<T>) -> Self {
        Self {
            planner: RefCell::new(planner),
        }
    }

    fn stockham_fft(&self, input: &mut [Complex<T>]) -> Result<(), FftError> {
        let n = input.len();

        // Stockham auto-sort FFT using a double-buffered approach.
        let (twiddles, mut scratch) = {
            let mut planner = self.planner.borrow_mut();
            let twiddles = planner.get_twiddles(n);
            let scratch = core::mem::take(&mut planner.scratch);
            (twiddles, scratch)
        };

        if scratch.len() < n {
            scratch.resize(n, Complex::zero());
        }

        // Track which buffer holds the current data so the result can be
        // copied back if the final pass lands in scratch.
        let mut in_input = true;
        {
            let mut src: &mut [Complex<T>] = &mut input[..];
            let mut dst: &mut [Complex<T>] = &mut scratch[..n];

            // n1 = number of groups, n2 = size of each group in this pass.
            let mut n1 = 1usize;
            let mut n2 = n;
            while n1 < n {
                n2 >>= 1;
                for k in 0..n1 {
                    // Twiddle for this group: exp(-2*pi*i*k/(2*n1)) = table[k*n2]
                    let w = twiddles[k * n2];
                    let base0 = 2 * k * n2;
                    let base1 = base0 + n2;
                    let dst0 = k * n2;
                    let dst1 = (k + n1) * n2;
                    for j in 0..n2 {
                        let u = src[base0 + j];
                        let v = src[base1 + j].mul(w);
                        dst[dst0 + j] = u.add(v);
                        dst[dst1 + j] = u.sub(v);
                    }
                }
                core::mem::swap(&mut src, &mut dst);
                in_input = !in_input;
                n1 <<= 1;
            }
        }

        if !in_input {
            input.copy_from_slice(&scratch[..n]);
        }

        // Return scratch to planner for reuse.
        self.planner.borrow_mut().scratch = scratch;
        Ok(())
    }
}

impl<T: Float> FftImpl<T> for ScalarFftImpl<T> {
    fn fft(&self, input: &mut [Complex<T>]) -> Result<(), FftError> {
        let n = input.len();
        if n == 0 {
            return Err(FftError::EmptyInput);
        }
        if !n.is_power_of_two() {
            return Err(FftError::NonPowerOfTwo);
        }
        match n {
            1 => Ok(()),
            2 => {
                fft2(input);
                Ok(())
            }
            4 => {
                fft4(input);
                Ok(())
            }
            _ => self.stockham_fft(input),
        }
    }

    fn ifft(&self, input: &mut [Complex<T>]) -> Result<(), FftError> {
        let n = input.len();
        if n == 0 {
            return Err(FftError::EmptyInput);
        }
        if !n.is_power_of_two() {
            return Err(FftError::NonPowerOfTwo);
        }
        if n == 1 {
            return Ok(());
        }
        for c in input.iter_mut() {
            c.im = -c.im;
        }
        self.fft(input)?;
        let scale = T::one() / T::from_f32(n as f32);
        for c in input.iter_mut() {
            c.im = -c.im;
            c.re = c.re * scale;
            c.im = c.im * scale;
        }
        Ok(())
    }

    fn prepare(&self, n: usize) {
        self.planner.borrow_mut().warm(n);
    }
}

#[inline(always)]
fn fft2<T: Float>(input: &mut [Complex<T>]) {
    let a = input[0];
    let b = input[1];
    input[0] = a.add(b);
    input[1] = a.sub(b);
}

#[inline(always)]
fn fft4<T: Float>(input: &mut [Complex<T>]) {
    let (a, b, c, d) = (input[0], input[1], input[2], input[3]);
    let t0 = a.add(c);
    let t1 = a.sub(c);
    let t2 = b.add(d);
    let t3 = b.sub(d);
    // -i * t3
    let t3j = Complex::new(t3.im, -t3.re);
    input[0] = t0.add(t2);
    input[1] = t1.add(t3j);
    input[2] = t0.sub(t2);
    input[3] = t1.sub(t3j);
}
