//! Loopable keyframe timelines sampled from an orbit transform

use serde::{Deserialize, Serialize};

use super::orbit::{DepthRange, OrbitTransform, stack_index_at};

/// Stacking index used when every sample sits at the same depth
pub const MIDDLE_STACK_INDEX: u32 = 500;

/// How sampled depths are mapped to stacking indices
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum StackRange {
    /// Use the depth range the samples actually reach
    Observed,
    /// Use a fixed range (e.g. the global range shared by all planets)
    Pinned(DepthRange),
}

/// One sampled frame of a timeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Keyframe {
    /// Position in the timeline, 0..=100
    pub percentage: f32,
    pub transform: OrbitTransform,
    pub stack_index: u32,
}

/// Sample `steps + 1` evenly spaced frames from 0% to 100% inclusive
///
/// Stacking is resolved in a second pass so an `Observed` range always
/// matches the motion's real amplitude. `steps == 0` yields the single 0%
/// frame.
pub fn sample_keyframes<F>(steps: u32, range: StackRange, transform_fn: F) -> Vec<Keyframe>
where
    F: Fn(f32) -> OrbitTransform,
{
    let samples: Vec<(f32, OrbitTransform)> = (0..=steps)
        .map(|i| {
            let progress = if steps == 0 { 0.0 } else { i as f32 / steps as f32 };
            let percentage = if steps == 0 {
                0.0
            } else {
                i as f32 * 100.0 / steps as f32
            };
            (percentage, transform_fn(progress))
        })
        .collect();

    let range = match range {
        StackRange::Pinned(range) => Some(range),
        StackRange::Observed => {
            let (min, max) = samples.iter().fold(
                (f32::INFINITY, f32::NEG_INFINITY),
                |(min, max), (_, t)| (min.min(t.depth), max.max(t.depth)),
            );
            (max > min).then(|| DepthRange::new(min, max))
        }
    };

    samples
        .into_iter()
        .map(|(percentage, transform)| {
            let stack_index = match range {
                Some(range) => stack_index_at(transform.depth, range),
                None => MIDDLE_STACK_INDEX,
            };
            Keyframe {
                percentage,
                transform,
                stack_index,
            }
        })
        .collect()
}

/// Render a timeline as a CSS `@keyframes` rule
pub fn keyframes_css(name: &str, frames: &[Keyframe]) -> String {
    let mut css = format!("@keyframes {name} {{\n");
    for frame in frames {
        css.push_str(&format!(
            "  {}% {{ transform: {}; z-index: {}; }}\n",
            frame.percentage,
            frame.transform.css(),
            frame.stack_index
        ));
    }
    css.push_str("}\n");
    css
}
