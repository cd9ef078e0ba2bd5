//! The ordered set of bodies on the page
//!
//! Treated as static input: nothing in the controller mutates it.

use serde::{Deserialize, Serialize};

use super::body::{Gradient, MoonConfig, OrbitalBody, Rings, Texture};
use super::orbit::OrbitConfig;
use crate::consts::{COMPACT_BREAKPOINT, WIDE_BREAKPOINT};
use crate::error::{FolioError, Result};

/// Viewport size class
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ViewportTier {
    /// Narrow screens: sections stack and the focus choreography is off
    Compact,
    #[default]
    Regular,
    /// Very wide screens: the solar system is drawn larger
    Wide,
}

impl ViewportTier {
    pub fn from_width(width: f32) -> Self {
        if width < COMPACT_BREAKPOINT {
            ViewportTier::Compact
        } else if width >= WIDE_BREAKPOINT {
            ViewportTier::Wide
        } else {
            ViewportTier::Regular
        }
    }

    pub fn is_compact(&self) -> bool {
        *self == ViewportTier::Compact
    }

    /// Scale applied to the whole solar system
    pub fn solar_scale(&self) -> f32 {
        match self {
            ViewportTier::Compact => 0.5,
            ViewportTier::Regular => 1.0,
            ViewportTier::Wide => 1.5,
        }
    }
}

/// Ordered catalog of orbiting bodies
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolarSystem {
    bodies: Vec<OrbitalBody>,
}

impl SolarSystem {
    pub fn new(bodies: Vec<OrbitalBody>) -> Self {
        Self { bodies }
    }

    /// Parse a JSON array of bodies
    pub fn from_json(json: &str) -> Result<Self> {
        let bodies: Vec<OrbitalBody> = serde_json::from_str(json)?;
        log::info!("Loaded {} bodies from catalog", bodies.len());
        Ok(Self { bodies })
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.bodies)?)
    }

    pub fn bodies(&self) -> &[OrbitalBody] {
        &self.bodies
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&OrbitalBody> {
        self.bodies.get(index)
    }

    /// Index of the body with `label` (case-insensitive)
    pub fn index_of(&self, label: &str) -> Result<usize> {
        self.bodies
            .iter()
            .position(|b| b.label.eq_ignore_ascii_case(label.trim()))
            .ok_or_else(|| FolioError::UnknownBody(label.to_string()))
    }

    /// `@keyframes` rules for every body and moon
    pub fn stylesheet(&self, steps: u32) -> String {
        self.bodies
            .iter()
            .map(|b| b.stylesheet(steps))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// The five section planets of the site
    pub fn builtin() -> Self {
        let moon = |size: f32, orbit_radius: f32, orbit_duration: f32, initial_angle: f32| MoonConfig {
            size,
            orbit_radius,
            orbit_duration,
            initial_angle,
            tilt_angle: 60.0,
            gradient: None,
            glow_color: None,
        };
        let texture = |name: &str, rotation_secs: f32| {
            Some(Texture {
                name: name.to_string(),
                rotation_secs,
                rotation_angle: 0.0,
            })
        };

        Self::new(vec![
            OrbitalBody {
                label: "Experience".to_string(),
                size: 38.0,
                gradient: Gradient::new("rgb(251, 146, 60)", "rgb(239, 68, 68)", "rgb(225, 29, 72)"),
                glow_color: "rgba(251,146,60,0.4)".to_string(),
                orbit: OrbitConfig {
                    orbit_radius: 290.0,
                    orbit_duration: 44.0,
                    initial_angle: 330.0,
                    offset_y: -16.0,
                    tilt_angle: 80.0,
                },
                depth_scale: None,
                rings: None,
                moons: vec![
                    moon(5.0, 50.0, 11.0, 0.0),
                    moon(7.0, 63.0, 15.0, 120.0),
                    moon(3.0, 35.0, 7.0, 240.0),
                    moon(2.0, 26.0, 5.0, 300.0),
                ],
                texture: texture("experience", 12.0),
            },
            OrbitalBody {
                label: "Projects".to_string(),
                size: 23.0,
                gradient: Gradient::new("rgb(34, 211, 238)", "rgb(59, 130, 246)", "rgb(20, 184, 166)"),
                glow_color: "rgba(34,211,238,0.4)".to_string(),
                orbit: OrbitConfig {
                    orbit_radius: 110.0,
                    orbit_duration: 18.0,
                    initial_angle: 210.0,
                    offset_y: -12.0,
                    tilt_angle: 62.0,
                },
                depth_scale: None,
                rings: None,
                moons: vec![moon(3.0, 22.0, 5.0, 80.0)],
                texture: texture("projects", 3.0),
            },
            OrbitalBody {
                label: "Education".to_string(),
                size: 32.0,
                gradient: Gradient::new("rgb(34, 197, 94)", "rgb(16, 185, 129)", "rgb(5, 150, 105)"),
                glow_color: "rgba(34,197,94,0.4)".to_string(),
                orbit: OrbitConfig {
                    orbit_radius: 190.0,
                    orbit_duration: 26.0,
                    initial_angle: 60.0,
                    offset_y: -14.0,
                    tilt_angle: 60.0,
                },
                depth_scale: None,
                rings: None,
                moons: vec![moon(3.0, 40.0, 14.0, 0.0), moon(5.0, 29.0, 11.0, 180.0)],
                texture: texture("education", 15.0),
            },
            OrbitalBody {
                label: "Testimonials".to_string(),
                size: 24.0,
                gradient: Gradient::new("rgb(192, 132, 252)", "rgb(236, 72, 153)", "rgb(192, 38, 211)"),
                glow_color: "rgba(192,132,252,0.4)".to_string(),
                orbit: OrbitConfig {
                    orbit_radius: 380.0,
                    orbit_duration: 60.0,
                    initial_angle: 90.0,
                    offset_y: -10.0,
                    tilt_angle: 54.0,
                },
                depth_scale: None,
                rings: Some(Rings {
                    tilt_angle: -60.0,
                    radius: Some(80.0),
                }),
                moons: Vec::new(),
                texture: Some(Texture {
                    name: "testimonials".to_string(),
                    rotation_secs: 13.0,
                    rotation_angle: -24.0,
                }),
            },
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
                moons: Vec::new(),
                texture: texture("aboutme", 18.0),
            },
        ])
    }
}

impl Default for SolarSystem {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kinematics::orbit::{GLOBAL_DEPTH_RANGE, angle_at};

    #[test]
    fn test_builtin_order() {
        let system = SolarSystem::builtin();
        assert_eq!(system.len(), 5);
        assert_eq!(system.index_of("Experience").ok(), Some(0));
        assert_eq!(system.index_of("about me").ok(), Some(4));
        assert!(matches!(
            system.index_of("Blog"),
            Err(FolioError::UnknownBody(label)) if label == "Blog"
        ));
    }

    #[test]
    fn test_experience_example() {
        let system = SolarSystem::builtin();
        let experience = system.get(0).unwrap();
        assert_eq!(experience.orbit.orbit_radius, 290.0);
        assert_eq!(angle_at(0.0, experience.orbit.initial_angle, 1.0), 330.0);
        assert_eq!(experience.transform_at(0.0).orbit_rotation(), Some(330.0));
    }

    #[test]
    fn test_depths_fit_global_range() {
        for body in SolarSystem::builtin().bodies() {
            let amplitude = body.depth().depth_scale;
            assert!(amplitude <= GLOBAL_DEPTH_RANGE.max, "{} exceeds range", body.label);
        }
    }

    #[test]
    fn test_json_roundtrip_keeps_order() {
        let system = SolarSystem::builtin();
        let json = system.to_json().unwrap();
        assert!(json.contains("\"orbitRadius\": 290.0"));
        let loaded = SolarSystem::from_json(&json).unwrap();
        assert_eq!(loaded, system);
    }

    #[test]
    fn test_from_json_minimal_body() {
        let json = r#"[{
            "label": "Blog",
            "size": 20,
            "gradient": { "from": "red", "via": "green", "to": "blue" },
            "glowColor": "white",
            "orbitRadius": 150,
            "orbitDuration": 30,
            "initialAngle": 45
        }]"#;
        let system = SolarSystem::from_json(json).unwrap();
        let blog = system.get(0).unwrap();
        assert_eq!(blog.orbit.tilt_angle, 0.0);
        assert!(blog.moons.is_empty());
        assert!((blog.depth().depth_scale - 60.0).abs() < 1e-4);
    }

    #[test]
    fn test_from_json_rejects_garbage() {
        assert!(matches!(
            SolarSystem::from_json("{not json"),
            Err(FolioError::Catalog(_))
        ));
    }

    #[test]
    fn test_viewport_tiers() {
        assert_eq!(ViewportTier::from_width(800.0), ViewportTier::Compact);
        assert_eq!(ViewportTier::from_width(1024.0), ViewportTier::Regular);
        assert_eq!(ViewportTier::from_width(1920.0), ViewportTier::Wide);
        assert_eq!(ViewportTier::Wide.solar_scale(), 1.5);
        assert!(ViewportTier::Compact.is_compact());
    }
}
