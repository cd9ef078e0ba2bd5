//! Geometry the controller reads from the page
//!
//! All coordinates are relative to the page container's top-left corner.
//! Implementations must report final, post-transition geometry: a placeholder
//! that is still fading in is measured where it will end up.

use std::collections::HashMap;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::choreo::Section;

/// Axis-aligned rectangle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    /// Top-left corner
    pub origin: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            origin: Vec2::new(x, y),
            size: Vec2::new(width, height),
        }
    }

    /// Square of side `side` centred on `center`
    pub fn square(center: Vec2, side: f32) -> Self {
        Self {
            origin: center - Vec2::splat(side / 2.0),
            size: Vec2::splat(side),
        }
    }

    pub fn center(&self) -> Vec2 {
        self.origin + self.size / 2.0
    }

    /// Shorter side; a focused body fills the placeholder's largest square
    pub fn min_side(&self) -> f32 {
        self.size.x.min(self.size.y)
    }

    /// Corners in order: top-left, top-right, bottom-left, bottom-right
    pub fn corners(&self) -> [Vec2; 4] {
        let max = self.origin + self.size;
        [
            self.origin,
            Vec2::new(max.x, self.origin.y),
            Vec2::new(self.origin.x, max.y),
            max,
        ]
    }
}

/// Source of layout geometry
pub trait LayoutProbe {
    /// Rectangle of a section's placeholder, or `None` if it is not laid out
    fn placeholder(&self, section: Section) -> Option<Rect>;

    /// Current centre of the orbit system (tracks the container as it moves)
    fn orbit_center(&self) -> Vec2;
}

/// Fixed geometry, for tests and offline use
#[derive(Debug, Clone, Default)]
pub struct StaticLayout {
    placeholders: HashMap<Section, Rect>,
    orbit_center: Vec2,
}

impl StaticLayout {
    pub fn new(orbit_center: Vec2) -> Self {
        Self {
            placeholders: HashMap::new(),
            orbit_center,
        }
    }

    /// Builder-style placeholder registration
    pub fn with_placeholder(mut self, section: Section, rect: Rect) -> Self {
        self.placeholders.insert(section, rect);
        self
    }

    pub fn set_placeholder(&mut self, section: Section, rect: Rect) {
        self.placeholders.insert(section, rect);
    }

    pub fn remove_placeholder(&mut self, section: Section) {
        self.placeholders.remove(&section);
    }
}

impl LayoutProbe for StaticLayout {
    fn placeholder(&self, section: Section) -> Option<Rect> {
        self.placeholders.get(&section).copied()
    }

    fn orbit_center(&self) -> Vec2 {
        self.orbit_center
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_geometry() {
        let rect = Rect::new(100.0, 50.0, 300.0, 200.0);
        assert_eq!(rect.center(), Vec2::new(250.0, 150.0));
        assert_eq!(rect.min_side(), 200.0);
        assert_eq!(rect.corners()[3], Vec2::new(400.0, 250.0));
    }

    #[test]
    fn test_square_is_centred() {
        let sq = Rect::square(Vec2::new(10.0, 10.0), 4.0);
        assert_eq!(sq.origin, Vec2::new(8.0, 8.0));
        assert_eq!(sq.center(), Vec2::new(10.0, 10.0));
    }

    #[test]
    fn test_static_layout() {
        let mut layout = StaticLayout::new(Vec2::new(640.0, 400.0))
            .with_placeholder(Section::Projects, Rect::new(0.0, 0.0, 10.0, 10.0));
        assert!(layout.placeholder(Section::Projects).is_some());
        assert!(layout.placeholder(Section::Education).is_none());
        layout.remove_placeholder(Section::Projects);
        assert!(layout.placeholder(Section::Projects).is_none());
        assert_eq!(layout.orbit_center(), Vec2::new(640.0, 400.0));
    }
}
