use std::f64::consts::PI;

use super::*;

#[test]
fn progress_starts_mid_band_and_stays_in_unit_range() {
    assert_eq!(progress_at(0.0), 0.5);
    for i in 0..10_000 {
        let t = f64::from(i) * 0.037 - 50.0;
        let p = progress_at(t);
        assert!((0.0..=1.0).contains(&p), "t={t} p={p}");
    }
}

#[test]
fn progress_peaks_and_troughs() {
    assert!((progress_at(PI) - 1.0).abs() < 1e-12);
    assert!((progress_at(3.0 * PI)).abs() < 1e-12);
}

#[test]
fn progress_is_periodic() {
    let period = progress_period_secs();
    assert!((period - 4.0 * PI).abs() < 1e-12);
    for i in 0..200 {
        let t = f64::from(i) * 0.173;
        assert!((progress_at(t) - progress_at(t + period)).abs() < 1e-9);
        // Twice the fundamental period, `4π / 0.5`, is a period as well.
        assert!((progress_at(t) - progress_at(t + 4.0 * PI / 0.5)).abs() < 1e-9);
    }
}

#[test]
fn clock_advances_and_ignores_bad_deltas() {
    let mut c = FrameClock::new();
    c.advance(0.25);
    c.advance(-1.0);
    c.advance(f64::NAN);
    c.advance(0.25);
    assert_eq!(c.elapsed_secs(), 0.5);
    assert_eq!(c.progress(), progress_at(0.5));
}

#[test]
fn clock_at_frame_uses_fps() {
    let fps = Fps::new(30, 1).unwrap();
    let c = FrameClock::at_frame(fps, FrameIndex(60));
    assert!((c.elapsed_secs() - 2.0).abs() < 1e-12);
    assert_eq!(FrameClock::at_secs(3.5).elapsed_secs(), 3.5);
}
