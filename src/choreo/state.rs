//! Focus controller state
//!
//! The whole choreography is one tagged phase plus the independent Contact
//! overlay. Section visibility is derived from the phase, never stored, so a
//! section flag cannot be left on after an aborted transition.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::section::{Section, Stop, Visibility};
use super::timing::Timings;
use crate::consts::PERSPECTIVE;
use crate::kinematics::{SolarSystem, ViewportTier};
use crate::layout::{LayoutProbe, Rect};

/// The body being focused and where it was picked up
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Focus {
    pub section: Section,
    /// Index into the solar system's bodies
    pub body: usize,
    /// Body centre when the transition started
    pub start: Vec2,
    /// On-screen size of the body in orbit
    pub natural_size: f32,
}

/// Sub-stages of a forward transition
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ForwardStage {
    /// Section shown; waiting for layout before measuring the placeholder
    Measuring { frames_left: u32 },
    /// Duplicate body flying to the placeholder
    Flying { end: Rect, elapsed: f32 },
    /// Landed; waiting out the settle buffer
    Landing { end: Rect, elapsed: f32 },
}

/// Sub-stages of a reverse transition
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ReturnStage {
    /// Duplicate shrinks back onto the live orbit and fades out
    Body { elapsed: f32 },
    /// Original body visible again; container still raised
    Gap { elapsed: f32 },
    /// Container slides back to its resting position
    System { elapsed: f32 },
}

/// Focus phase
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub enum Phase {
    /// Hero view, nothing focused
    #[default]
    Idle,
    Forward { focus: Focus, stage: ForwardStage },
    /// Section on screen, duplicate pinned over the placeholder
    Settled { focus: Focus, end: Rect },
    Reverse {
        focus: Focus,
        end: Rect,
        stage: ReturnStage,
    },
}

impl Phase {
    pub fn focus(&self) -> Option<&Focus> {
        match self {
            Phase::Idle => None,
            Phase::Forward { focus, .. }
            | Phase::Settled { focus, .. }
            | Phase::Reverse { focus, .. } => Some(focus),
        }
    }

    /// A forward or reverse transition is running
    pub fn in_flight(&self) -> bool {
        matches!(self, Phase::Forward { .. } | Phase::Reverse { .. })
    }

    pub fn name(&self) -> &'static str {
        match self {
            Phase::Idle => "idle",
            Phase::Forward { .. } => "forward",
            Phase::Settled { .. } => "settled",
            Phase::Reverse { .. } => "reverse",
        }
    }
}

/// Contact overlay lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub enum ContactPhase {
    #[default]
    Closed,
    Opening { elapsed: f32 },
    /// In place; scroll-up closes it
    Open,
    Closing { elapsed: f32 },
}

impl ContactPhase {
    /// The overlay counts as the current page
    pub fn is_shown(&self) -> bool {
        matches!(self, ContactPhase::Opening { .. } | ContactPhase::Open)
    }

    /// The overlay is in the page at all (including while sliding out)
    pub fn is_mounted(&self) -> bool {
        !matches!(self, ContactPhase::Closed)
    }
}

/// One-shot instruction for the page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Directive {
    /// Compact layout: scroll the section into view instead of animating
    ScrollToSection(Section),
    /// Compact layout: scroll to the contact footer
    ScrollToContact,
}

/// The focus controller
#[derive(Debug, Clone)]
pub struct Controller {
    pub(crate) system: SolarSystem,
    pub(crate) timings: Timings,
    pub(crate) perspective: f32,
    pub(crate) tier: ViewportTier,
    pub(crate) phase: Phase,
    pub(crate) contact: ContactPhase,
    /// Remaining lockout (ms)
    pub(crate) lock_ms: f32,
    /// Remaining debounce of a pending resize (ms)
    pub(crate) pending_resize: Option<f32>,
    /// Time since the page started (ms); drives every orbit
    pub(crate) clock_ms: f64,
    pub(crate) directives: Vec<Directive>,
}

impl Controller {
    pub fn new(system: SolarSystem, timings: Timings) -> Self {
        Self {
            system,
            timings,
            perspective: PERSPECTIVE,
            tier: ViewportTier::default(),
            phase: Phase::Idle,
            contact: ContactPhase::Closed,
            lock_ms: 0.0,
            pending_resize: None,
            clock_ms: 0.0,
            directives: Vec::new(),
        }
    }

    pub fn with_perspective(mut self, perspective: f32) -> Self {
        self.perspective = perspective;
        self
    }

    pub fn system(&self) -> &SolarSystem {
        &self.system
    }

    pub fn timings(&self) -> &Timings {
        &self.timings
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn contact(&self) -> ContactPhase {
        self.contact
    }

    pub fn tier(&self) -> ViewportTier {
        self.tier
    }

    pub fn is_locked(&self) -> bool {
        self.lock_ms > 0.0
    }

    /// A focus transition or a Contact slide is running
    pub fn is_transitioning(&self) -> bool {
        self.phase.in_flight()
            || matches!(
                self.contact,
                ContactPhase::Opening { .. } | ContactPhase::Closing { .. }
            )
    }

    pub fn clock_secs(&self) -> f64 {
        self.clock_ms / 1000.0
    }

    pub fn intro_complete(&self) -> bool {
        self.clock_ms >= self.timings.intro.total_ms() as f64
    }

    /// Which section is on screen
    pub fn visibility(&self) -> Visibility {
        let contact = self.contact.is_shown();
        let section = match self.phase {
            _ if contact => None,
            Phase::Forward { focus, .. } | Phase::Settled { focus, .. } => Some(focus.section),
            Phase::Idle | Phase::Reverse { .. } => None,
        };
        Visibility { section, contact }
    }

    /// Where the page is in the section ring
    pub fn current_stop(&self) -> Stop {
        match self.visibility().section {
            Some(section) => Stop::Section(section),
            None => Stop::Hero,
        }
    }

    /// Drain queued one-shot directives
    pub fn take_directives(&mut self) -> Vec<Directive> {
        std::mem::take(&mut self.directives)
    }

    /// Live centre of a body, derived from the clock rather than read back from the page
    pub fn body_position(&self, body: usize, layout: &dyn LayoutProbe) -> Vec2 {
        let Some(b) = self.system.get(body) else {
            return layout.orbit_center();
        };
        let offset = b
            .transform_at_time(self.clock_secs())
            .projected_offset(self.perspective);
        layout.orbit_center() + offset * self.tier.solar_scale()
    }

    /// On-screen diameter of a body in orbit
    pub fn body_size(&self, body: usize) -> f32 {
        self.system
            .get(body)
            .map_or(0.0, |b| b.size * self.tier.solar_scale())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::StaticLayout;

    #[test]
    fn test_new_controller_is_idle() {
        let c = Controller::new(SolarSystem::builtin(), Timings::default());
        assert_eq!(*c.phase(), Phase::Idle);
        assert_eq!(c.visibility(), Visibility::default());
        assert!(!c.is_locked());
        assert!(!c.is_transitioning());
        assert!(!c.intro_complete());
    }

    #[test]
    fn test_body_position_tracks_clock() {
        let layout = StaticLayout::new(Vec2::new(600.0, 400.0));
        let mut c = Controller::new(SolarSystem::builtin(), Timings::default());
        let before = c.body_position(1, &layout);
        // Projects takes 18s per revolution
        c.clock_ms = 4500.0;
        let quarter = c.body_position(1, &layout);
        c.clock_ms = 18_000.0;
        let full = c.body_position(1, &layout);
        assert!((before - quarter).length() > 1.0);
        assert!((before - full).length() < 1e-2);
    }

    #[test]
    fn test_body_position_scales_with_tier() {
        let center = Vec2::new(600.0, 400.0);
        let layout = StaticLayout::new(center);
        let mut c = Controller::new(SolarSystem::builtin(), Timings::default());
        let regular = c.body_position(0, &layout) - center;
        c.tier = ViewportTier::Wide;
        let wide = c.body_position(0, &layout) - center;
        assert!((wide - regular * 1.5).length() < 1e-3);
        assert_eq!(c.body_size(0), 57.0);
    }

    #[test]
    fn test_contact_hides_sections() {
        let mut c = Controller::new(SolarSystem::builtin(), Timings::default());
        c.phase = Phase::Settled {
            focus: Focus {
                section: Section::Projects,
                body: 1,
                start: Vec2::ZERO,
                natural_size: 23.0,
            },
            end: Rect::new(0.0, 0.0, 300.0, 300.0),
        };
        assert_eq!(c.visibility().section, Some(Section::Projects));
        assert_eq!(c.current_stop(), Stop::Section(Section::Projects));
        c.contact = ContactPhase::Open;
        assert_eq!(c.visibility().section, None);
        assert!(c.visibility().contact);
    }
}
