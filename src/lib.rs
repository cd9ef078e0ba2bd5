//! Orbit Folio - orbital kinematics and focus choreography for a solar-system portfolio
//!
//! Core modules:
//! - `kinematics`: Pure orbit math (progress -> transform, keyframes, body catalog)
//! - `choreo`: Deterministic focus-transition controller and scene output
//! - `layout`: Geometry queries the controller makes against the page
//! - `settings`: User preferences and choreography timings

pub mod choreo;
pub mod easing;
pub mod error;
pub mod kinematics;
pub mod layout;
pub mod settings;

pub use error::{FolioError, Result};
pub use settings::Settings;

/// Page-wide constants
pub mod consts {
    /// Perspective distance of the solar-system container (px)
    pub const PERSPECTIVE: f32 = 1200.0;
    /// Fraction of the orbit radius used as depth amplitude
    pub const DEPTH_FACTOR: f32 = 0.4;
    /// Keyframes sampled per orbit (21 frames, 5% apart)
    pub const KEYFRAME_STEPS: u32 = 20;

    /// Viewports narrower than this use the compact (scroll) layout
    pub const COMPACT_BREAKPOINT: f32 = 1024.0;
    /// Viewports at least this wide scale the solar system up
    pub const WIDE_BREAKPOINT: f32 = 1920.0;

    /// Padding around the live body in the projection guide (px)
    pub const ORIGIN_BOX_PADDING: f32 = 16.0;
    /// Padding around the pinned body in the projection guide (px)
    pub const FOCUS_BOX_PADDING: f32 = 20.0;
}

/// Round to two decimal places (matches the precision the page emits)
#[inline]
pub fn round2(value: f32) -> f32 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round2() {
        assert_eq!(round2(1.234_56), 1.23);
        assert_eq!(round2(-0.005_1), -0.01);
        assert_eq!(round2(116.0), 116.0);
    }
}
