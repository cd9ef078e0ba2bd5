//! Static configuration of orbiting bodies and their moons

use serde::{Deserialize, Serialize};

use super::keyframes::{Keyframe, StackRange, keyframes_css, sample_keyframes};
use super::orbit::{DepthConfig, DepthRange, GLOBAL_DEPTH_RANGE, OrbitConfig, OrbitTransform, transform_at};
use crate::consts::DEPTH_FACTOR;

/// Three-stop colour gradient of a body's surface
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Gradient {
    pub from: String,
    pub via: String,
    pub to: String,
}

impl Gradient {
    pub fn new(from: &str, via: &str, to: &str) -> Self {
        Self {
            from: from.to_string(),
            via: via.to_string(),
            to: to.to_string(),
        }
    }
}

/// Planetary ring
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rings {
    /// Tilt around the view axis (degrees)
    pub tilt_angle: f32,
    /// Ring radius (px); defaults to 2.5x the body size
    #[serde(default)]
    pub radius: Option<f32>,
}

/// Surface texture overlay
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Texture {
    pub name: String,
    /// Seconds per full texture rotation
    pub rotation_secs: f32,
    /// Starting rotation (degrees)
    #[serde(default)]
    pub rotation_angle: f32,
}

/// A moon orbiting its parent in the parent's local space
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoonConfig {
    pub size: f32,
    pub orbit_radius: f32,
    pub orbit_duration: f32,
    pub initial_angle: f32,
    #[serde(default)]
    pub tilt_angle: f32,
    #[serde(default)]
    pub gradient: Option<Gradient>,
    #[serde(default)]
    pub glow_color: Option<String>,
}

impl MoonConfig {
    pub fn orbit(&self) -> OrbitConfig {
        OrbitConfig {
            orbit_radius: self.orbit_radius,
            orbit_duration: self.orbit_duration,
            initial_angle: self.initial_angle,
            offset_y: 0.0,
            tilt_angle: self.tilt_angle,
        }
    }

    pub fn depth(&self) -> DepthConfig {
        DepthConfig {
            depth_scale: self.orbit_radius * DEPTH_FACTOR,
        }
    }

    pub fn transform_at(&self, progress: f32) -> OrbitTransform {
        transform_at(progress, &self.orbit(), &self.depth())
    }

    /// Moons only need to stack consistently against themselves
    pub fn keyframes(&self, steps: u32) -> Vec<Keyframe> {
        let range = StackRange::Pinned(DepthRange::symmetric(self.depth().depth_scale));
        sample_keyframes(steps, range, |p| self.transform_at(p))
    }
}

/// An orbiting body representing one content section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrbitalBody {
    pub label: String,
    /// Rendered diameter at scale 1 (px)
    pub size: f32,
    pub gradient: Gradient,
    pub glow_color: String,
    #[serde(flatten)]
    pub orbit: OrbitConfig,
    /// Depth amplitude; defaults to 0.4x the orbit radius
    #[serde(default)]
    pub depth_scale: Option<f32>,
    #[serde(default)]
    pub rings: Option<Rings>,
    #[serde(default)]
    pub moons: Vec<MoonConfig>,
    #[serde(default)]
    pub texture: Option<Texture>,
}

impl OrbitalBody {
    pub fn depth(&self) -> DepthConfig {
        DepthConfig {
            depth_scale: self
                .depth_scale
                .unwrap_or(self.orbit.orbit_radius * DEPTH_FACTOR),
        }
    }

    /// Fraction of the current revolution after `elapsed_secs`, in [0, 1)
    pub fn progress_at(&self, elapsed_secs: f64) -> f32 {
        if self.orbit.orbit_duration <= 0.0 {
            return 0.0;
        }
        let p = (elapsed_secs / self.orbit.orbit_duration as f64).rem_euclid(1.0) as f32;
        if p >= 1.0 { 0.0 } else { p }
    }

    pub fn transform_at(&self, progress: f32) -> OrbitTransform {
        transform_at(progress, &self.orbit, &self.depth())
    }

    /// Where the body is after `elapsed_secs` of continuous orbiting
    pub fn transform_at_time(&self, elapsed_secs: f64) -> OrbitTransform {
        self.transform_at(self.progress_at(elapsed_secs))
    }

    /// Planets stack against the shared global range
    pub fn keyframes(&self, steps: u32) -> Vec<Keyframe> {
        sample_keyframes(steps, StackRange::Pinned(GLOBAL_DEPTH_RANGE), |p| {
            self.transform_at(p)
        })
    }

    /// CSS animation name, e.g. `orbit-about-me`
    pub fn animation_name(&self) -> String {
        let slug: String = self
            .label
            .trim()
            .to_lowercase()
            .split_whitespace()
            .collect::<Vec<_>>()
            .join("-");
        format!("orbit-{slug}")
    }

    pub fn moon_animation_name(&self, moon: usize) -> String {
        format!("{}-moon-{moon}", self.animation_name())
    }

    pub fn ring_radius(&self) -> Option<f32> {
        self.rings
            .map(|rings| rings.radius.unwrap_or(self.size * 2.5))
    }

    /// `@keyframes` rules for the body and all of its moons
    pub fn stylesheet(&self, steps: u32) -> String {
        let mut css = keyframes_css(&self.animation_name(), &self.keyframes(steps));
        for (i, moon) in self.moons.iter().enumerate() {
            css.push_str(&keyframes_css(&self.moon_animation_name(i), &moon.keyframes(steps)));
        }
        css
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body() -> OrbitalBody {
        OrbitalBody {
            label: "About Me".to_string(),
            size: 38.0,
            gradient: Gradient::new("rgb(15, 23, 42)", "rgb(30, 58, 138)", "rgb(59, 130, 246)"),
            glow_color: "rgba(59,130,246,0.4)".to_string(),
            orbit: OrbitConfig {
                orbit_radius: 410.0,
                orbit_duration: 60.0,
                initial_angle: 230.0,
                offset_y: -14.0,
                tilt_angle: 49.0,
            },
            depth_scale: None,
            rings: None,
            moons: vec![MoonConfig {
                size: 3.0,
                orbit_radius: 22.0,
                orbit_duration: 5.0,
                initial_angle: 80.0,
                tilt_angle: 60.0,
                gradient: None,
                glow_color: None,
            }],
            texture: None,
        }
    }

    #[test]
    fn test_default_depth_scale() {
        assert!((body().depth().depth_scale - 164.0).abs() < 1e-4);
    }

    #[test]
    fn test_progress_wraps() {
        let b = body();
        assert_eq!(b.progress_at(0.0), 0.0);
        assert!((b.progress_at(15.0) - 0.25).abs() < 1e-6);
        assert!((b.progress_at(75.0) - 0.25).abs() < 1e-6);
        assert!((b.progress_at(-15.0) - 0.75).abs() < 1e-6);
    }

    #[test]
    fn test_transform_at_time_matches_progress() {
        let b = body();
        assert_eq!(b.transform_at_time(30.0), b.transform_at(0.5));
    }

    #[test]
    fn test_animation_names() {
        let b = body();
        assert_eq!(b.animation_name(), "orbit-about-me");
        assert_eq!(b.moon_animation_name(0), "orbit-about-me-moon-0");
    }

    #[test]
    fn test_ring_radius_default() {
        let mut b = body();
        assert_eq!(b.ring_radius(), None);
        b.rings = Some(Rings {
            tilt_angle: -60.0,
            radius: None,
        });
        assert_eq!(b.ring_radius(), Some(95.0));
        b.rings = Some(Rings {
            tilt_angle: -60.0,
            radius: Some(80.0),
        });
        assert_eq!(b.ring_radius(), Some(80.0));
    }

    #[test]
    fn test_stylesheet_includes_moons() {
        let css = body().stylesheet(20);
        assert!(css.contains("@keyframes orbit-about-me {"));
        assert!(css.contains("@keyframes orbit-about-me-moon-0 {"));
        assert_eq!(css.matches("@keyframes").count(), 2);
    }

    #[test]
    fn test_moon_uses_own_range() {
        let moon = &body().moons[0];
        let frames = moon.keyframes(20);
        assert_eq!(frames.len(), 21);
        // The moon's own ±8.8px range stretches across the full index range
        assert!(frames.iter().any(|f| f.stack_index >= 990));
        assert!(frames.iter().any(|f| f.stack_index <= 10));
    }
}
