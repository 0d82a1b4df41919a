//! Generator output shapes: exact linspace values, periodic windows, chirp
//! frequency ramp, random-sample bounds.

use core::f32::consts::PI;
use rand::rngs::StdRng;
use rand::SeedableRng;
use sigvec::siggen;
use sigvec::window;
use sigvec::FftError;

#[test]
fn linspace_exact_quarters() {
    let v = siggen::linspace(0.0, 1.0, 5).unwrap();
    assert_eq!(v, vec![0.0, 0.25, 0.5, 0.75, 1.0]);
}

#[test]
fn linspace_descending_and_negative() {
    let v = siggen::linspace(1.0, -1.0, 5).unwrap();
    assert_eq!(v, vec![1.0, 0.5, 0.0, -0.5, -1.0]);
}

#[test]
fn linspace_rejects_short_buffers() {
    assert_eq!(siggen::linspace(0.0, 1.0, 0).unwrap_err(), FftError::InvalidValue);
    assert_eq!(siggen::linspace(0.0, 1.0, 1).unwrap_err(), FftError::InvalidValue);
    let mut one = [0.0f32; 1];
    assert_eq!(
        siggen::linspace_inplace(&mut one, 0.0, 1.0).unwrap_err(),
        FftError::InvalidValue
    );
}

#[test]
fn sine_matches_closed_form() {
    let freq = 0.05;
    let phase = 0.3;
    let mag = 1.5;
    let s = siggen::sine(32, freq, phase, mag);
    for (n, &v) in s.iter().enumerate() {
        let want = mag * (2.0 * PI * freq * n as f32 + phase).cos();
        assert!((v - want).abs() < 1e-6);
    }
}

#[test]
fn chirp_phase_accumulates_linearly() {
    let s = siggen::chirp(64, 0.01, 0.2, 0.0, 1.0);
    let df = (0.2 - 0.01) / 64.0;
    for (n, &v) in s.iter().enumerate() {
        let samp = n as f32;
        let want = (2.0 * PI * (0.01 + samp * df) * samp).cos();
        assert!((v - want).abs() < 1e-4, "n={}", n);
    }
}

#[test]
fn hamming_length_four_follows_periodic_formula() {
    let w = window::hamming(4);
    let expected = [0.08f32, 0.54, 1.0, 0.54];
    for (got, want) in w.iter().zip(expected.iter()) {
        assert!((got - want).abs() < 1e-6);
    }
    // A symmetric Hamming window of length 4 would end where it started;
    // the periodic convention does not.
    assert!((w[0] - w[3]).abs() > 0.1);
}

#[test]
fn uniform_random_covers_range_and_validates() {
    let mut rng = StdRng::seed_from_u64(1234);
    let mut min_seen = f32::MAX;
    let mut max_seen = f32::MIN;
    for _ in 0..10_000 {
        let x = siggen::uniform_random(&mut rng, 2.0, 3.0).unwrap();
        assert!((2.0..=3.0).contains(&x));
        min_seen = min_seen.min(x);
        max_seen = max_seen.max(x);
    }
    // A healthy uniform source should get close to both ends.
    assert!(min_seen < 2.05);
    assert!(max_seen > 2.95);

    assert_eq!(
        siggen::uniform_random(&mut rng, 3.0, 2.0).unwrap_err(),
        FftError::InvalidValue
    );
}
