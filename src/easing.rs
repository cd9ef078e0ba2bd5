//! Easing curves for the timed hand-off animations
//!
//! `t` is clamped to [0, 1] in every curve.

/// Cubic ease-in: slow start, fast finish (body returning to orbit)
#[inline]
pub fn ease_in_cubic(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    t * t * t
}

/// Cubic ease-out: fast start, slow finish (overlay slides)
#[inline]
pub fn ease_out_cubic(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    1.0 - (1.0 - t).powi(3)
}

/// Cubic ease-in-out: slow start, fast middle, slow finish (body leaving orbit)
#[inline]
pub fn ease_in_out_cubic(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
    }
}

/// Opacity of a body fading out on its way back: opaque until 90%, then linear to zero
#[inline]
pub fn late_fade_out(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    if t <= 0.9 { 1.0 } else { (1.0 - t) / 0.1 }
}

/// Fraction of `duration` covered by `elapsed`; zero-length spans count as complete
#[inline]
pub fn progress(elapsed: f32, duration: f32) -> f32 {
    if duration <= 0.0 {
        1.0
    } else {
        (elapsed / duration).clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_curve_endpoints() {
        for curve in [ease_in_cubic, ease_out_cubic, ease_in_out_cubic] {
            assert_eq!(curve(0.0), 0.0);
            assert!((curve(1.0) - 1.0).abs() < 1e-6);
            assert_eq!(curve(-1.0), 0.0);
        }
    }

    #[test]
    fn test_ease_in_out_midpoint() {
        assert!((ease_in_out_cubic(0.5) - 0.5).abs() < 1e-6);
        assert!(ease_in_out_cubic(0.25) < 0.25);
        assert!(ease_in_out_cubic(0.75) > 0.75);
    }

    #[test]
    fn test_late_fade_out() {
        assert_eq!(late_fade_out(0.0), 1.0);
        assert_eq!(late_fade_out(0.9), 1.0);
        assert!((late_fade_out(0.95) - 0.5).abs() < 1e-4);
        assert_eq!(late_fade_out(1.0), 0.0);
    }

    #[test]
    fn test_progress_zero_duration() {
        assert_eq!(progress(0.0, 0.0), 1.0);
        assert_eq!(progress(150.0, 300.0), 0.5);
        assert_eq!(progress(900.0, 300.0), 1.0);
    }
}
