//! Real-input FFT engine.
//!
//! A [`RfftPlan`] binds one power-of-two transform length to its precomputed
//! state: the post-processing twiddle table, the complex FFT backend for the
//! half-length transform, and a scratch workspace reused across calls. The
//! plan exposes [`RfftPlan::forward`] (real time-domain buffer to
//! half-spectrum) and [`RfftPlan::inverse`] (half-spectrum back to real
//! samples). Everything the plan owns is allocated at construction and freed
//! together when the plan is dropped.
//!
//! The forward transform is the unnormalized DFT; the `1/N` scale rides on
//! the inverse, so `inverse(forward(x)) == x` up to floating-point error.
//!
//! [`RfftPlanner`] is an optional factory that caches twiddle tables by
//! length, so plans of recurring sizes share one table allocation.

use alloc::collections::VecDeque;
use alloc::sync::Arc;
use alloc::vec::Vec;

use hashbrown::HashMap;

use crate::fft::{FftError, FftImpl, ScalarFftImpl};
use crate::num::{Complex, Float};

/// Smallest supported transform length.
pub const MIN_LEN: usize = 2;

/// Maximum number of cached twiddle tables retained by [`RfftPlanner`].
pub const MAX_CACHE_ENTRIES: usize = 64;

/// Validate a transform length and return the half length `size/2`.
fn checked_half(size: usize) -> Result<usize, FftError> {
    if size == 0 {
        return Err(FftError::EmptyInput);
    }
    if size < MIN_LEN {
        return Err(FftError::InvalidValue);
    }
    if !size.is_power_of_two() {
        return Err(FftError::NonPowerOfTwo);
    }
    Ok(size / 2)
}

/// Build the table of `m` post-processing twiddle factors `exp(-i*pi*k/m)`.
///
/// Returns an error if `m` is zero or cannot be represented in `T`,
/// preventing invalid angles or excessive allocations.
fn build_twiddle_table<T: Float>(m: usize) -> Result<Vec<Complex<T>>, FftError> {
    if m == 0 {
        return Err(FftError::InvalidValue);
    }
    let m_t = T::from_usize(m).ok_or(FftError::InvalidValue)?;
    let angle = -T::pi() / m_t;
    let (sin_step, cos_step) = angle.sin_cos();
    let w = Complex::new(cos_step, sin_step);
    let mut table = Vec::with_capacity(m);
    let mut current = Complex::new(T::one(), T::zero());
    for _ in 0..m {
        table.push(current);
        current = current.mul(w);
    }
    Ok(table)
}

/// One immutable binding of the real FFT engine to a transform length.
///
/// The plan owns its twiddle table, the half-length complex backend, and a
/// scratch workspace of `size/2` complex values. The workspace is mutated on
/// every [`forward`](Self::forward)/[`inverse`](Self::inverse) call and
/// reused across calls, which is why both take `&mut self`: sharing a plan
/// between threads requires external synchronization, while distinct plans
/// are fully independent.
pub struct RfftPlan<T: Float, F: FftImpl<T> = ScalarFftImpl<T>> {
    size: usize,
    log2_size: usize,
    output_size: usize,
    twiddles: Arc<[Complex<T>]>,
    fft: F,
    scratch: Vec<Complex<T>>,
}

impl<T: Float, F: FftImpl<T> + Default> RfftPlan<T, F> {
    /// Create a plan for `size` real samples.
    ///
    /// `size` must be a power of two and at least [`MIN_LEN`]; zero yields
    /// [`FftError::EmptyInput`], one [`FftError::InvalidValue`], any other
    /// non-power-of-two [`FftError::NonPowerOfTwo`]. All allocations happen
    /// here; the returned plan performs none during execution.
    pub fn new(size: usize) -> Result<Self, FftError> {
        let m = checked_half(size)?;
        let table = build_twiddle_table::<T>(m)?;
        Self::with_twiddles(size, Arc::from(table))
    }

    pub(crate) fn with_twiddles(size: usize, twiddles: Arc<[Complex<T>]>) -> Result<Self, FftError> {
        let m = checked_half(size)?;
        if twiddles.len() != m {
            return Err(FftError::MismatchedLengths);
        }
        let mut log2_size = 0usize;
        let mut s = size;
        while s > 1 {
            s >>= 1;
            log2_size += 1;
        }
        let fft = F::default();
        fft.prepare(m);
        #[cfg(feature = "verbose-logging")]
        log::debug!(
            "rfft plan created: size={} log2={} bins={}",
            size,
            log2_size,
            m + 1
        );
        Ok(Self {
            size,
            log2_size,
            output_size: m + 1,
            twiddles,
            fft,
            scratch: alloc::vec![Complex::zero(); m],
        })
    }
}

impl<T: Float, F: FftImpl<T>> core::fmt::Debug for RfftPlan<T, F> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("RfftPlan")
            .field("size", &self.size)
            .field("log2_size", &self.log2_size)
            .field("output_size", &self.output_size)
            .finish_non_exhaustive()
    }
}

impl<T: Float, F: FftImpl<T>> RfftPlan<T, F> {
    /// Create a plan that executes through a caller-supplied backend.
    pub fn with_backend(size: usize, fft: F) -> Result<Self, FftError> {
        let m = checked_half(size)?;
        let table = build_twiddle_table::<T>(m)?;
        let mut log2_size = 0usize;
        let mut s = size;
        while s > 1 {
            s >>= 1;
            log2_size += 1;
        }
        fft.prepare(m);
        Ok(Self {
            size,
            log2_size,
            output_size: m + 1,
            twiddles: Arc::from(table),
            fft,
            scratch: alloc::vec![Complex::zero(); m],
        })
    }

    /// Time-domain length the plan is bound to.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Base-2 logarithm of [`size`](Self::size).
    pub fn log2_size(&self) -> usize {
        self.log2_size
    }

    /// Number of complex frequency bins produced by the forward transform,
    /// `size/2 + 1`.
    pub fn output_size(&self) -> usize {
        self.output_size
    }

    /// Forward transform: `size` real samples to `size/2 + 1` complex bins.
    ///
    /// `input` must hold exactly `size` samples (any zero-padding is the
    /// caller's job beforehand) and `output` exactly
    /// [`output_size`](Self::output_size) bins, otherwise
    /// [`FftError::MismatchedLengths`] is returned before anything is
    /// written. Not in-place: input and output are distinct buffers by
    /// construction.
    ///
    /// `output[0]` is the DC term and `output[output_size-1]` the Nyquist
    /// term; both carry an exactly zero imaginary part.
    pub fn forward(&mut self, input: &[T], output: &mut [Complex<T>]) -> Result<(), FftError> {
        if input.len() != self.size || output.len() != self.output_size {
            return Err(FftError::MismatchedLengths);
        }
        let m = self.size / 2;
        // Pack adjacent real pairs into a half-length complex buffer.
        for i in 0..m {
            output[i] = Complex::new(input[2 * i], input[2 * i + 1]);
        }
        self.fft.fft(&mut output[..m])?;
        // Copy FFT results so the symmetric post-processing can read both
        // ends of the buffer while writing it.
        self.scratch[..m].copy_from_slice(&output[..m]);
        let y0 = self.scratch[0];
        output[0] = Complex::new(y0.re + y0.im, T::zero());
        output[m] = Complex::new(y0.re - y0.im, T::zero());
        let half = T::from_f32(0.5);
        for k in 1..m {
            let a = self.scratch[k];
            let b = self.scratch[m - k].conj();
            let sum = a.add(b);
            let diff = a.sub(b);
            let t = self.twiddles[k].mul(diff);
            let temp = sum.add(Complex::new(t.im, -t.re));
            output[k] = Complex::new(temp.re * half, temp.im * half);
        }
        Ok(())
    }

    /// Inverse transform: `size/2 + 1` complex bins back to `size` real
    /// samples.
    ///
    /// The first and last input bins are treated as purely real (DC and
    /// Nyquist); their imaginary parts are ignored. Carries the `1/size`
    /// normalization, so a forward/inverse pair reproduces the input.
    pub fn inverse(&mut self, input: &[Complex<T>], output: &mut [T]) -> Result<(), FftError> {
        if input.len() != self.output_size || output.len() != self.size {
            return Err(FftError::MismatchedLengths);
        }
        let m = self.size / 2;
        let half = T::from_f32(0.5);
        self.scratch[0] = Complex::new(
            (input[0].re + input[m].re) * half,
            (input[0].re - input[m].re) * half,
        );
        for k in 1..m {
            let a = input[k];
            let b = input[m - k].conj();
            let sum = a.add(b);
            let diff = a.sub(b);
            let w = self.twiddles[k].conj();
            let t = w.mul(diff);
            let temp = sum.sub(Complex::new(t.im, -t.re));
            self.scratch[k] = Complex::new(temp.re * half, temp.im * half);
        }
        self.fft.ifft(&mut self.scratch[..m])?;
        for i in 0..m {
            output[2 * i] = self.scratch[i].re;
            output[2 * i + 1] = self.scratch[i].im;
        }
        Ok(())
    }
}

/// Factory that caches post-processing twiddle tables by half-length.
///
/// Plans minted through [`plan`](Self::plan) share one `Arc` table per
/// length. Cached tables are evicted in least-recently-used order once more
/// than [`MAX_CACHE_ENTRIES`] are retained, preventing unbounded growth.
pub struct RfftPlanner<T: Float> {
    cache: HashMap<usize, Arc<[Complex<T>]>>,
    cache_order: VecDeque<usize>,
}

impl<T: Float> Default for RfftPlanner<T> {
    fn default() -> Self {
        // Precomputed lengths are well-defined; unwrap is safe here.
        Self::new().expect("valid precomputed lengths")
    }
}

impl<T: Float> RfftPlanner<T> {
    /// Half-lengths precomputed during construction, covering transform
    /// sizes 2 through 256. These are the sizes that recur in audio and DSP
    /// work and give a sensible baseline without runtime table building.
    const PRECOMPUTED: &'static [usize] = &[1, 2, 4, 8, 16, 32, 64, 128];

    /// Create a new [`RfftPlanner`].
    pub fn new() -> Result<Self, FftError> {
        let mut cache: HashMap<usize, Arc<[Complex<T>]>> = HashMap::new();
        let mut cache_order = VecDeque::new();
        for &m in Self::PRECOMPUTED {
            let table = build_twiddle_table::<T>(m)?;
            cache.insert(m, Arc::from(table));
            cache_order.push_back(m);
        }
        Ok(Self { cache, cache_order })
    }

    /// Retrieve or build the twiddle table for half-length `m`.
    pub fn get_twiddles(&mut self, m: usize) -> Result<Arc<[Complex<T>]>, FftError> {
        if !self.cache.contains_key(&m) {
            let table = build_twiddle_table::<T>(m)?;
            if self.cache.len() == MAX_CACHE_ENTRIES {
                if let Some(old) = self.cache_order.pop_front() {
                    #[cfg(feature = "verbose-logging")]
                    log::trace!("rfft planner: evicting twiddle table m={}", old);
                    self.cache.remove(&old);
                }
            }
            self.cache.insert(m, Arc::from(table));
        }
        self.cache_order.retain(|&x| x != m);
        self.cache_order.push_back(m);
        Ok(Arc::clone(self.cache.get(&m).unwrap()))
    }

    /// Number of twiddle tables currently cached.
    pub fn cache_len(&self) -> usize {
        self.cache.len()
    }

    /// Create a [`RfftPlan`] for `size`, sharing the cached twiddle table.
    pub fn plan(&mut self, size: usize) -> Result<RfftPlan<T>, FftError> {
        let m = checked_half(size)?;
        let twiddles = self.get_twiddles(m)?;
        RfftPlan::with_twiddles(size, twiddles)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::num::Complex32;
    use alloc::vec;
    use alloc::vec::Vec;
    use proptest::prelude::*;

    fn zero_complex(len: usize) -> Vec<Complex32> {
        vec![Complex32::zero(); len]
    }

    #[test]
    fn lifecycle_rejects_bad_sizes() {
        assert_eq!(
            RfftPlan::<f32>::new(0).unwrap_err(),
            FftError::EmptyInput
        );
        assert_eq!(
            RfftPlan::<f32>::new(1).unwrap_err(),
            FftError::InvalidValue
        );
        assert_eq!(
            RfftPlan::<f32>::new(12).unwrap_err(),
            FftError::NonPowerOfTwo
        );
    }

    #[test]
    fn derived_sizes() {
        let plan = RfftPlan::<f32>::new(1024).unwrap();
        assert_eq!(plan.size(), 1024);
        assert_eq!(plan.log2_size(), 10);
        assert_eq!(plan.output_size(), 513);
    }

    #[test]
    fn handles_min_length() {
        let mut plan = RfftPlan::<f32>::new(2).unwrap();
        let input = [1.0f32, -1.0];
        let mut spectrum = zero_complex(plan.output_size());
        plan.forward(&input, &mut spectrum).unwrap();
        assert!((spectrum[0].re - 0.0).abs() < 1e-6);
        assert!((spectrum[1].re - 2.0).abs() < 1e-6);
        let mut time = [0.0f32; 2];
        plan.inverse(&spectrum, &mut time).unwrap();
        for (a, b) in input.iter().zip(time.iter()) {
            assert!((a - b).abs() < 1e-6);
        }
    }

    #[test]
    fn forward_rejects_mismatched_buffers() {
        let mut plan = RfftPlan::<f32>::new(8).unwrap();
        let input = [0.0f32; 8];
        let mut short = zero_complex(4);
        assert_eq!(
            plan.forward(&input, &mut short).unwrap_err(),
            FftError::MismatchedLengths
        );
        let wrong_input = [0.0f32; 6];
        let mut spectrum = zero_complex(5);
        assert_eq!(
            plan.forward(&wrong_input, &mut spectrum).unwrap_err(),
            FftError::MismatchedLengths
        );
        let mut time = [0.0f32; 7];
        assert_eq!(
            plan.inverse(&spectrum, &mut time).unwrap_err(),
            FftError::MismatchedLengths
        );
    }

    #[test]
    fn planner_shares_tables_between_plans() {
        let mut planner = RfftPlanner::<f32>::new().unwrap();
        let a = planner.plan(64).unwrap();
        let b = planner.plan(64).unwrap();
        assert!(Arc::ptr_eq(&a.twiddles, &b.twiddles));
    }

    #[test]
    fn planner_cache_eviction() {
        let mut planner = RfftPlanner::<f32>::new().unwrap();
        for i in 1..(MAX_CACHE_ENTRIES + 10) {
            planner.get_twiddles(i).unwrap();
        }
        assert!(planner.cache_len() <= MAX_CACHE_ENTRIES);
    }

    proptest! {
        #[test]
        fn prop_roundtrip_reproduces_input(
            log2 in 1usize..9,
            ref signal in proptest::collection::vec(-100.0f32..100.0, 256),
        ) {
            let n = 1usize << log2;
            let mut plan = RfftPlan::<f32>::new(n).unwrap();
            let input: Vec<f32> = signal.iter().take(n).copied().collect();
            let mut spectrum = zero_complex(plan.output_size());
            plan.forward(&input, &mut spectrum).unwrap();
            let mut time = vec![0.0f32; n];
            plan.inverse(&spectrum, &mut time).unwrap();
            for (a, b) in input.iter().zip(time.iter()) {
                prop_assert!((a - b).abs() < 1e-2);
            }
        }
    }
}
