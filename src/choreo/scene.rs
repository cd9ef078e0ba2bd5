//! What the page should look like right now
//!
//! A `Scene` is a pure read of the controller at its current clock. The
//! rendering layer applies it every frame; nothing in it is fed back.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::section::Visibility;
use super::state::{ContactPhase, Controller, ForwardStage, Phase, ReturnStage};
use crate::consts::{FOCUS_BOX_PADDING, ORIGIN_BOX_PADDING};
use crate::easing::{ease_in_cubic, ease_in_out_cubic, ease_out_cubic, late_fade_out, progress};
use crate::layout::{LayoutProbe, Rect};

/// The duplicate body that flies between the orbit and the section
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FocusedBody {
    /// Index into the solar system's bodies
    pub body: usize,
    pub center: Vec2,
    /// Diameter in pixels
    pub size: f32,
    pub opacity: f32,
    /// Sitting on the placeholder (follows it on resize)
    pub pinned: bool,
}

impl FocusedBody {
    pub fn rect(&self) -> Rect {
        Rect::square(self.center, self.size)
    }
}

/// Guide lines from the body's orbit box to the pinned duplicate's box
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Projection {
    pub origin: Rect,
    pub focus: Rect,
}

impl Projection {
    /// Corner-to-corner segments (top-left to top-left and so on)
    pub fn lines(&self) -> [(Vec2, Vec2); 4] {
        let from = self.origin.corners();
        let to = self.focus.corners();
        [0, 1, 2, 3].map(|i| (from[i], to[i]))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Scene {
    pub visibility: Visibility,
    /// The section's target square is shown
    pub placeholder_visible: bool,
    pub hero_content_visible: bool,
    /// Solar-system container in its raised position
    pub system_raised: bool,
    /// Starfield streaks stretched (Contact is showing)
    pub sky_elongated: bool,
    pub focused: Option<FocusedBody>,
    /// Body in the orbit that the duplicate stands in for
    pub original_hidden: Option<usize>,
    pub projection: Option<Projection>,
    /// Contact overlay offset in `[0, 1]`, 1 being fully below the viewport
    pub contact_offset: Option<f32>,
    pub intro_complete: bool,
}

impl Scene {
    pub fn capture(controller: &Controller, layout: &dyn LayoutProbe) -> Self {
        let t = controller.timings();
        let phase = *controller.phase();
        let contact = controller.contact();

        let mut scene = Scene {
            visibility: controller.visibility(),
            hero_content_visible: phase == Phase::Idle && !contact.is_mounted(),
            sky_elongated: contact.is_shown(),
            contact_offset: contact_offset(contact, t.contact_delay_ms, t.contact_slide_ms),
            intro_complete: controller.intro_complete(),
            ..Default::default()
        };

        match phase {
            Phase::Idle => {}
            Phase::Forward { focus, stage } => {
                scene.placeholder_visible = true;
                scene.system_raised = true;
                scene.original_hidden = Some(focus.body);
                let (center, size, pinned) = match stage {
                    ForwardStage::Measuring { .. } => (focus.start, focus.natural_size, false),
                    ForwardStage::Flying { end, elapsed } => {
                        let e = ease_in_out_cubic(progress(elapsed, t.forward_ms));
                        (
                            focus.start.lerp(end.center(), e),
                            lerp(focus.natural_size, end.min_side(), e),
                            false,
                        )
                    }
                    ForwardStage::Landing { end, .. } => (end.center(), end.min_side(), true),
                };
                scene.focused = Some(FocusedBody {
                    body: focus.body,
                    center,
                    size,
                    opacity: 1.0,
                    pinned,
                });
            }
            Phase::Settled { focus, end } => {
                scene.placeholder_visible = true;
                scene.system_raised = true;
                scene.original_hidden = Some(focus.body);
                scene.focused = Some(FocusedBody {
                    body: focus.body,
                    center: end.center(),
                    size: end.min_side(),
                    opacity: 1.0,
                    pinned: true,
                });

                let live = controller.body_position(focus.body, layout);
                let padded = controller
                    .system()
                    .get(focus.body)
                    .map_or(0.0, |b| (b.size + ORIGIN_BOX_PADDING) * controller.tier().solar_scale());
                scene.projection = Some(Projection {
                    origin: Rect::square(live, padded),
                    focus: Rect::square(end.center(), end.min_side() + FOCUS_BOX_PADDING),
                });
            }
            Phase::Reverse { focus, end, stage } => match stage {
                ReturnStage::Body { elapsed } => {
                    scene.system_raised = true;
                    scene.original_hidden = Some(focus.body);
                    let p = progress(elapsed, t.return_body_ms);
                    let e = ease_in_cubic(p);
                    // Chase the body where it is now, not where it was
                    let live = controller.body_position(focus.body, layout);
                    scene.focused = Some(FocusedBody {
                        body: focus.body,
                        center: end.center().lerp(live, e),
                        size: lerp(end.min_side(), focus.natural_size, e),
                        opacity: late_fade_out(p),
                        pinned: false,
                    });
                }
                ReturnStage::Gap { .. } => scene.system_raised = true,
                ReturnStage::System { .. } => {}
            },
        }

        // Contact lifts the system the same way a section does
        if contact.is_shown() {
            scene.system_raised = true;
        }
        scene
    }
}

fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

fn contact_offset(contact: ContactPhase, delay_ms: f32, slide_ms: f32) -> Option<f32> {
    match contact {
        ContactPhase::Closed => None,
        ContactPhase::Opening { elapsed } => {
            let p = progress((elapsed - delay_ms).max(0.0), slide_ms);
            // Zero-length slide with the delay still running stays below
            if elapsed < delay_ms {
                Some(1.0)
            } else {
                Some(1.0 - ease_out_cubic(p))
            }
        }
        ContactPhase::Open => Some(0.0),
        ContactPhase::Closing { elapsed } => Some(ease_in_cubic(progress(elapsed, slide_ms))),
    }
}
