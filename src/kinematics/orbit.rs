//! Orbit math for a tilted, perspective-viewed circular orbit
//!
//! A body's motion is a pure function of a normalized progress value:
//! - angle grows linearly with progress (0° = "up")
//! - depth follows sin(angle), giving the near/far half of the ellipse
//! - scale and stacking order are linear maps of depth
//!
//! The composed transform is kept as an ordered list of steps so it can be
//! emitted as a CSS transform or evaluated as a matrix.

use glam::{Mat4, Vec2, Vec3};
use serde::{Deserialize, Serialize};

use crate::round2;

/// Scale of a body at the far edge of its depth range
pub const MIN_SCALE: f32 = 0.7;
/// Scale of a body at the near edge of its depth range
pub const MAX_SCALE: f32 = 1.3;
/// Highest stacking index (nearest body)
pub const MAX_STACK_INDEX: u32 = 1000;

/// Depth range shared by every planet so independently animated bodies stack
/// consistently against each other. The widest orbit (410px * 0.4 = 164px)
/// fits inside it.
pub const GLOBAL_DEPTH_RANGE: DepthRange = DepthRange {
    min: -200.0,
    max: 200.0,
};

/// Closed interval of depth values
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DepthRange {
    pub min: f32,
    pub max: f32,
}

impl DepthRange {
    pub fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// Range `[-amplitude, amplitude]`
    pub fn symmetric(amplitude: f32) -> Self {
        Self {
            min: -amplitude,
            max: amplitude,
        }
    }

    pub fn span(&self) -> f32 {
        self.max - self.min
    }

    /// Position of `depth` within the range (0 at min, 1 at max)
    #[inline]
    fn normalize(&self, depth: f32) -> f32 {
        (depth - self.min) / self.span()
    }
}

/// Orbit parameters of one body
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrbitConfig {
    /// Distance from the orbit centre (px)
    pub orbit_radius: f32,
    /// Seconds per revolution
    pub orbit_duration: f32,
    /// Angle at progress 0 (degrees)
    pub initial_angle: f32,
    /// Vertical nudge applied after moving out along the orbit (px)
    #[serde(default)]
    pub offset_y: f32,
    /// Tilt of the orbital plane around the x axis (degrees)
    #[serde(default)]
    pub tilt_angle: f32,
}

/// Depth amplitude of one body
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DepthConfig {
    pub depth_scale: f32,
}

impl DepthConfig {
    /// The body's own depth range, used for its scale
    pub fn range(&self) -> DepthRange {
        DepthRange::symmetric(self.depth_scale)
    }
}

/// Orbital angle in degrees at `progress`
///
/// Not wrapped: animation loops by restarting progress, and every consumer is
/// periodic in the angle.
#[inline]
pub fn angle_at(progress: f32, initial_angle: f32, orbits_per_cycle: f32) -> f32 {
    initial_angle + progress * orbits_per_cycle * 360.0
}

/// Signed depth at `angle`, rounded to 2 decimals so repeated frames agree exactly
#[inline]
pub fn depth_at(angle: f32, depth_scale: f32) -> f32 {
    round2(angle.to_radians().sin() * depth_scale)
}

/// Perspective scale for `depth`: [min, max] maps linearly onto [0.7, 1.3]
///
/// Out-of-range depths extrapolate; callers keep depth inside the range.
#[inline]
pub fn scale_at(depth: f32, range: DepthRange) -> f32 {
    round2(MIN_SCALE + range.normalize(depth) * (MAX_SCALE - MIN_SCALE))
}

/// Paint order for `depth`: [min, max] maps onto [0, 1000], nearer draws on top
#[inline]
pub fn stack_index_at(depth: f32, range: DepthRange) -> u32 {
    (range.normalize(depth) * MAX_STACK_INDEX as f32)
        .round()
        .clamp(0.0, MAX_STACK_INDEX as f32) as u32
}

/// One step of the composed orbit transform
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum TransformStep {
    /// Centre the element box on its anchor
    Recenter,
    /// Rotate around the x axis (degrees)
    RotateX(f32),
    /// Rotate in the screen plane (degrees)
    Rotate(f32),
    TranslateX(f32),
    TranslateY(f32),
    TranslateZ(f32),
    /// Uniform scale
    Scale(f32),
}

impl TransformStep {
    /// CSS transform function for this step
    pub fn css(&self) -> String {
        match *self {
            TransformStep::Recenter => "translate(-50%, -50%)".to_string(),
            TransformStep::RotateX(deg) => format!("rotateX({deg}deg)"),
            TransformStep::Rotate(deg) => format!("rotate({deg}deg)"),
            TransformStep::TranslateX(px) => format!("translateX({px}px)"),
            TransformStep::TranslateY(px) => format!("translateY({px}px)"),
            TransformStep::TranslateZ(px) => format!("translateZ({px}px)"),
            TransformStep::Scale(s) => format!("scale3d({s}, {s}, {s})"),
        }
    }

    /// Matrix acting on the element's centre point (screen axes, y down)
    ///
    /// `Recenter` only shifts the element box around its centre, so it leaves
    /// the centre point where it is.
    pub fn matrix(&self) -> Mat4 {
        match *self {
            TransformStep::Recenter => Mat4::IDENTITY,
            TransformStep::RotateX(deg) => Mat4::from_rotation_x(deg.to_radians()),
            TransformStep::Rotate(deg) => Mat4::from_rotation_z(deg.to_radians()),
            TransformStep::TranslateX(px) => Mat4::from_translation(Vec3::new(px, 0.0, 0.0)),
            TransformStep::TranslateY(px) => Mat4::from_translation(Vec3::new(0.0, px, 0.0)),
            TransformStep::TranslateZ(px) => Mat4::from_translation(Vec3::new(0.0, 0.0, px)),
            TransformStep::Scale(s) => Mat4::from_scale(Vec3::splat(s)),
        }
    }
}

/// Instantaneous orbital state of a body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrbitTransform {
    pub progress: f32,
    /// Orbital angle (degrees, unwrapped)
    pub angle: f32,
    /// Signed depth toward the viewer
    pub depth: f32,
    /// Perspective scale
    pub scale: f32,
    /// Ordered transform steps, applied left to right
    pub steps: Vec<TransformStep>,
}

impl OrbitTransform {
    /// CSS transform string
    pub fn css(&self) -> String {
        self.steps
            .iter()
            .map(TransformStep::css)
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Composed matrix (CSS order: leftmost step is outermost)
    pub fn matrix(&self) -> Mat4 {
        self.steps
            .iter()
            .fold(Mat4::IDENTITY, |acc, step| acc * step.matrix())
    }

    /// Body centre in the orbit's 3D space, relative to the orbit centre
    pub fn position(&self) -> Vec3 {
        self.matrix().transform_point3(Vec3::ZERO)
    }

    /// Body centre as seen through a perspective of `perspective` px,
    /// as a screen offset from the orbit centre
    pub fn projected_offset(&self, perspective: f32) -> Vec2 {
        let p = self.position();
        let k = perspective / (perspective - p.z).max(f32::EPSILON);
        Vec2::new(p.x * k, p.y * k)
    }

    /// The in-plane rotation applied before the body moves out along its orbit
    pub fn orbit_rotation(&self) -> Option<f32> {
        self.steps.iter().find_map(|step| match *step {
            TransformStep::Rotate(deg) => Some(deg),
            _ => None,
        })
    }
}

/// Compose the full orbit transform at `progress`
///
/// Order: recenter, tilt the plane, rotate to the orbital angle, move out by
/// the radius, apply the vertical offset, push along depth, undo the rotation,
/// undo the tilt, scale. The two undo steps keep the body upright while it
/// travels the ellipse.
pub fn transform_at(progress: f32, orbit: &OrbitConfig, depth: &DepthConfig) -> OrbitTransform {
    let angle = angle_at(progress, orbit.initial_angle, 1.0);
    let z = depth_at(angle, depth.depth_scale);
    let scale = scale_at(z, depth.range());

    let steps = vec![
        TransformStep::Recenter,
        TransformStep::RotateX(orbit.tilt_angle),
        TransformStep::Rotate(angle),
        TransformStep::TranslateX(orbit.orbit_radius),
        TransformStep::TranslateY(orbit.offset_y),
        TransformStep::TranslateZ(z),
        TransformStep::Rotate(-angle),
        TransformStep::RotateX(-orbit.tilt_angle),
        TransformStep::Scale(scale),
    ];

    OrbitTransform {
        progress,
        angle,
        depth: z,
        scale,
        steps,
    }
}
