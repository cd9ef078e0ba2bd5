//! Orbital kinematics
//!
//! Pure functions only: no timers, no layout, no logging in the hot path.
//! A body's on-screen position at any moment is derived from the elapsed
//! time, so nothing ever needs to read it back from the page.

pub mod body;
pub mod catalog;
pub mod keyframes;
pub mod orbit;

pub use body::{Gradient, MoonConfig, OrbitalBody, Rings, Texture};
pub use catalog::{SolarSystem, ViewportTier};
pub use keyframes::{Keyframe, MIDDLE_STACK_INDEX, StackRange, keyframes_css, sample_keyframes};
pub use orbit::{
    DepthConfig, DepthRange, GLOBAL_DEPTH_RANGE, MAX_SCALE, MAX_STACK_INDEX, MIN_SCALE,
    OrbitConfig, OrbitTransform, TransformStep, angle_at, depth_at, scale_at, stack_index_at,
    transform_at,
};
