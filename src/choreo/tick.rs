//! Event handlers and the fixed-order tick that advances the choreography
//!
//! Every handler checks the phase first and refuses rather than queueing:
//! there is no mid-flight cancellation, only "not now".

use serde::{Deserialize, Serialize};

use super::section::{Section, Stop};
use super::state::{ContactPhase, Controller, Directive, Focus, ForwardStage, Phase, ReturnStage};
use crate::error::{FolioError, Result};
use crate::kinematics::ViewportTier;
use crate::layout::{LayoutProbe, Rect};

/// Label of the Contact entry, which opens the overlay instead of a section
pub const CONTACT_LABEL: &str = "Contact";

/// Upper bound on stage hand-offs in one tick (zero-length stages chain)
const MAX_STAGE_HOPS: usize = 8;

/// Why a request was not acted on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Refusal {
    /// A forward or reverse transition is running
    InFlight,
    /// The post-transition lockout has not expired
    Locked,
    /// The section is already on screen
    AlreadyActive,
    /// The Contact overlay is covering the page
    ContactShown,
    /// Back was requested with nothing to go back from
    NothingToReturn,
    /// Scroll-up only closes a fully open Contact overlay
    NotReady,
}

/// Result of a user request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    Started,
    /// Compact layout: a scroll directive was queued instead
    Scrolled,
    Ignored(Refusal),
}

/// Direction through the section ring
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Step {
    Next,
    Previous,
}

/// Requests collected between ticks
#[derive(Debug, Clone, Default)]
pub struct ChoreoInput {
    /// Label of a clicked body (or `"Contact"`)
    pub select: Option<String>,
    /// Back control pressed
    pub back: bool,
    /// Wheel scrolled upward
    pub scroll_up: bool,
    /// Keyboard move along the section ring
    pub step: Option<Step>,
    /// Window resized
    pub resize: bool,
    /// New viewport class, if it changed
    pub viewport: Option<ViewportTier>,
}

impl Controller {
    /// Handle a click on the body labelled `label`
    pub fn select(&mut self, label: &str, layout: &dyn LayoutProbe) -> Result<Outcome> {
        if label.trim().eq_ignore_ascii_case(CONTACT_LABEL) {
            return Ok(self.select_contact());
        }
        let section =
            Section::from_label(label).ok_or_else(|| FolioError::UnknownBody(label.to_string()))?;
        self.select_section(section, layout)
    }

    /// Start focusing `section`'s body
    pub fn select_section(&mut self, section: Section, layout: &dyn LayoutProbe) -> Result<Outcome> {
        let body = self.system.index_of(section.label())?;

        if self.tier.is_compact() {
            self.directives.push(Directive::ScrollToSection(section));
            return Ok(Outcome::Scrolled);
        }
        if let Some(refusal) = self.select_refusal(section) {
            log::debug!("Ignoring {section} selection: {refusal:?}");
            return Ok(Outcome::Ignored(refusal));
        }

        // Snapshot before the previous section hides so the start point is
        // where the body is right now
        let focus = Focus {
            section,
            body,
            start: self.body_position(body, layout),
            natural_size: self.body_size(body),
        };
        if let Some(previous) = self.phase.focus() {
            log::info!("Switching focus {} -> {section}", previous.section);
        } else {
            log::info!("Focusing {section}");
        }
        self.phase = Phase::Forward {
            focus,
            stage: ForwardStage::Measuring {
                frames_left: self.timings.measure_frames,
            },
        };
        Ok(Outcome::Started)
    }

    fn select_refusal(&self, section: Section) -> Option<Refusal> {
        if self.contact.is_mounted() {
            return Some(Refusal::ContactShown);
        }
        if self.phase.in_flight() {
            return Some(Refusal::InFlight);
        }
        if self.is_locked() {
            return Some(Refusal::Locked);
        }
        match self.phase {
            Phase::Settled { focus, .. } if focus.section == section => Some(Refusal::AlreadyActive),
            _ => None,
        }
    }

    /// Open the Contact overlay
    pub fn select_contact(&mut self) -> Outcome {
        if self.tier.is_compact() {
            self.directives.push(Directive::ScrollToContact);
            return Outcome::Scrolled;
        }
        if self.phase.in_flight() {
            return Outcome::Ignored(Refusal::InFlight);
        }
        if self.contact.is_mounted() {
            return Outcome::Ignored(Refusal::AlreadyActive);
        }
        if let Phase::Settled { focus, .. } = self.phase {
            log::info!("Contact replaces {}", focus.section);
        }
        // Contact and sections are mutually exclusive
        self.phase = Phase::Idle;
        self.contact = ContactPhase::Opening { elapsed: 0.0 };
        log::info!("Opening contact overlay");
        Outcome::Started
    }

    /// Back control: close Contact, or return the focused body to its orbit
    pub fn go_back(&mut self, layout: &dyn LayoutProbe) -> Outcome {
        match self.contact {
            ContactPhase::Opening { .. } | ContactPhase::Open => {
                self.contact = ContactPhase::Closing { elapsed: 0.0 };
                log::info!("Closing contact overlay");
                return Outcome::Started;
            }
            ContactPhase::Closing { .. } => return Outcome::Ignored(Refusal::InFlight),
            ContactPhase::Closed => {}
        }

        match self.phase {
            Phase::Settled { focus, end } => {
                let focus = Focus {
                    start: self.body_position(focus.body, layout),
                    ..focus
                };
                log::info!("Returning {} to orbit", focus.section);
                self.phase = Phase::Reverse {
                    focus,
                    end,
                    stage: ReturnStage::Body { elapsed: 0.0 },
                };
                Outcome::Started
            }
            Phase::Forward { .. } | Phase::Reverse { .. } => Outcome::Ignored(Refusal::InFlight),
            Phase::Idle => Outcome::Ignored(Refusal::NothingToReturn),
        }
    }

    /// Move one stop along the ring: the hero stop returns, a section stop focuses
    pub fn navigate(&mut self, step: Step, layout: &dyn LayoutProbe) -> Result<Outcome> {
        let current = self.current_stop();
        let target = match step {
            Step::Next => current.next(),
            Step::Previous => current.previous(),
        };
        match target {
            Stop::Hero => Ok(self.go_back(layout)),
            Stop::Section(section) => self.select_section(section, layout),
        }
    }

    /// Upward wheel: closes a fully open Contact overlay
    pub fn scroll_up(&mut self, layout: &dyn LayoutProbe) -> Outcome {
        if self.tier.is_compact() || self.contact != ContactPhase::Open {
            return Outcome::Ignored(Refusal::NotReady);
        }
        self.go_back(layout)
    }

    /// Window resized; re-pinning is debounced
    pub fn request_resize(&mut self) {
        self.pending_resize = Some(self.timings.resize_debounce_ms);
    }

    /// Viewport class changed
    pub fn set_viewport(&mut self, tier: ViewportTier) {
        if tier == self.tier {
            return;
        }
        log::info!("Viewport {:?} -> {:?}", self.tier, tier);
        self.tier = tier;
        if tier.is_compact() {
            // Sections stack in the compact layout; drop the choreography
            if self.phase != Phase::Idle {
                log::info!("Compact viewport: leaving {} phase", self.phase.name());
            }
            self.phase = Phase::Idle;
            self.contact = ContactPhase::Closed;
            self.lock_ms = 0.0;
        } else {
            self.request_resize();
        }
    }

    /// Advance all timers by `dt_ms`
    pub fn advance(&mut self, dt_ms: f32, layout: &dyn LayoutProbe) {
        let dt_ms = dt_ms.max(0.0);
        self.clock_ms += dt_ms as f64;
        self.lock_ms = (self.lock_ms - dt_ms).max(0.0);

        let mut carry = Some(dt_ms);
        for _ in 0..MAX_STAGE_HOPS {
            match carry {
                Some(dt) => carry = self.advance_phase(dt, layout),
                None => break,
            }
        }

        let mut carry = Some(dt_ms);
        for _ in 0..MAX_STAGE_HOPS {
            match carry {
                Some(dt) => carry = self.advance_contact(dt),
                None => break,
            }
        }

        self.advance_resize(dt_ms, layout);
    }

    /// Advance the focus phase; returns leftover time when a stage ended
    fn advance_phase(&mut self, dt: f32, layout: &dyn LayoutProbe) -> Option<f32> {
        let t = self.timings;
        let (next, leftover) = match self.phase {
            Phase::Idle | Phase::Settled { .. } => return None,

            Phase::Forward {
                focus,
                stage: ForwardStage::Measuring { frames_left },
            } => {
                // One frame per tick; measuring never chains within a tick
                if frames_left > 1 {
                    self.phase = Phase::Forward {
                        focus,
                        stage: ForwardStage::Measuring {
                            frames_left: frames_left - 1,
                        },
                    };
                    return None;
                }
                match self.measure(focus.section, layout) {
                    Ok(end) => {
                        self.phase = Phase::Forward {
                            focus,
                            stage: ForwardStage::Flying { end, elapsed: 0.0 },
                        };
                    }
                    Err(err) => {
                        log::warn!("Aborting focus transition: {err}");
                        self.phase = Phase::Idle;
                    }
                }
                return None;
            }

            Phase::Forward {
                focus,
                stage: ForwardStage::Flying { end, elapsed },
            } => stage_step(elapsed, dt, t.forward_ms, |elapsed| Phase::Forward {
                focus,
                stage: ForwardStage::Flying { end, elapsed },
            })
            .unwrap_or_else(|left| {
                (
                    Phase::Forward {
                        focus,
                        stage: ForwardStage::Landing { end, elapsed: 0.0 },
                    },
                    Some(left),
                )
            }),

            Phase::Forward {
                focus,
                stage: ForwardStage::Landing { end, elapsed },
            } => stage_step(elapsed, dt, t.settle_ms, |elapsed| Phase::Forward {
                focus,
                stage: ForwardStage::Landing { end, elapsed },
            })
            .unwrap_or_else(|left| {
                log::info!("{} settled", focus.section);
                self.lock_ms = (t.lock_after_forward_ms - left).max(0.0);
                (Phase::Settled { focus, end }, None)
            }),

            Phase::Reverse {
                focus,
                end,
                stage: ReturnStage::Body { elapsed },
            } => stage_step(elapsed, dt, t.return_body_ms, |elapsed| Phase::Reverse {
                focus,
                end,
                stage: ReturnStage::Body { elapsed },
            })
            .unwrap_or_else(|left| {
                (
                    Phase::Reverse {
                        focus,
                        end,
                        stage: ReturnStage::Gap { elapsed: 0.0 },
                    },
                    Some(left),
                )
            }),

            Phase::Reverse {
                focus,
                end,
                stage: ReturnStage::Gap { elapsed },
            } => stage_step(elapsed, dt, t.return_gap_ms, |elapsed| Phase::Reverse {
                focus,
                end,
                stage: ReturnStage::Gap { elapsed },
            })
            .unwrap_or_else(|left| {
                (
                    Phase::Reverse {
                        focus,
                        end,
                        stage: ReturnStage::System { elapsed: 0.0 },
                    },
                    Some(left),
                )
            }),

            Phase::Reverse {
                focus,
                end,
                stage: ReturnStage::System { elapsed },
            } => stage_step(elapsed, dt, t.return_system_ms, |elapsed| Phase::Reverse {
                focus,
                end,
                stage: ReturnStage::System { elapsed },
            })
            .unwrap_or_else(|left| {
                log::info!("{} returned to orbit", focus.section);
                self.lock_ms = (t.lock_after_return_ms - left).max(0.0);
                (Phase::Idle, None)
            }),
        };
        self.phase = next;
        leftover
    }

    fn advance_contact(&mut self, dt: f32) -> Option<f32> {
        match self.contact {
            ContactPhase::Opening { elapsed } => {
                let elapsed = elapsed + dt;
                let ready = self.timings.contact_ready_ms();
                if elapsed >= ready {
                    self.contact = ContactPhase::Open;
                    log::debug!("Contact overlay open");
                } else {
                    self.contact = ContactPhase::Opening { elapsed };
                }
                None
            }
            ContactPhase::Closing { elapsed } => {
                let elapsed = elapsed + dt;
                if elapsed >= self.timings.contact_slide_ms {
                    self.contact = ContactPhase::Closed;
                    log::debug!("Contact overlay closed");
                } else {
                    self.contact = ContactPhase::Closing { elapsed };
                }
                None
            }
            ContactPhase::Closed | ContactPhase::Open => None,
        }
    }

    fn advance_resize(&mut self, dt: f32, layout: &dyn LayoutProbe) {
        let Some(remaining) = self.pending_resize else {
            return;
        };
        let remaining = remaining - dt;
        if remaining > 0.0 {
            self.pending_resize = Some(remaining);
            return;
        }
        // Held until the transition lands, then the landed body is re-pinned
        if self.phase.in_flight() {
            self.pending_resize = Some(0.0);
            return;
        }
        self.pending_resize = None;

        if let Phase::Settled { focus, end } = self.phase {
            match self.measure(focus.section, layout) {
                Ok(rect) if rect != end => {
                    log::debug!("Re-pinning {} after resize", focus.section);
                    self.phase = Phase::Settled { focus, end: rect };
                }
                Ok(_) => {}
                Err(err) => log::debug!("Keeping previous pin: {err}"),
            }
        }
    }

    /// Final geometry of a section's placeholder
    pub fn measure(&self, section: Section, layout: &dyn LayoutProbe) -> Result<Rect> {
        layout
            .placeholder(section)
            .ok_or(FolioError::MissingPlaceholder(section))
    }
}

/// Add `dt` to a stage's elapsed time. `Ok` carries the continued stage,
/// `Err` carries the time left over once `duration` is reached.
fn stage_step<F>(elapsed: f32, dt: f32, duration: f32, continued: F) -> std::result::Result<(Phase, Option<f32>), f32>
where
    F: FnOnce(f32) -> Phase,
{
    let elapsed = elapsed + dt;
    if elapsed >= duration {
        Err(elapsed - duration)
    } else {
        Ok((continued(elapsed), None))
    }
}

/// Apply one frame of input, then advance timers by `dt_ms`
pub fn tick(controller: &mut Controller, input: &ChoreoInput, dt_ms: f32, layout: &dyn LayoutProbe) {
    if let Some(tier) = input.viewport {
        controller.set_viewport(tier);
    }
    if input.resize {
        controller.request_resize();
    }
    if let Some(label) = &input.select {
        if let Err(err) = controller.select(label, layout) {
            log::warn!("Selection ignored: {err}");
        }
    }
    if let Some(step) = input.step {
        if let Err(err) = controller.navigate(step, layout) {
            log::warn!("Navigation ignored: {err}");
        }
    }
    if input.back {
        controller.go_back(layout);
    }
    if input.scroll_up {
        controller.scroll_up(layout);
    }
    controller.advance(dt_ms, layout);
}

#[cfg(test)]
mod tests {
    use glam::Vec2;

    use super::*;
    use crate::kinematics::SolarSystem;
    use crate::layout::StaticLayout;
    use crate::choreo::Timings;

    const FRAME: f32 = 16.0;

    fn layout() -> StaticLayout {
        StaticLayout::new(Vec2::new(700.0, 450.0))
            .with_placeholder(Section::Projects, Rect::new(100.0, 200.0, 320.0, 280.0))
            .with_placeholder(Section::Experience, Rect::new(80.0, 150.0, 360.0, 360.0))
    }

    fn controller() -> Controller {
        Controller::new(SolarSystem::builtin(), Timings::default())
    }

    /// Select and run until settled, then wait out the lock
    fn settle(c: &mut Controller, section: Section, layout: &StaticLayout) {
        assert_eq!(c.select_section(section, layout).unwrap(), Outcome::Started);
        c.advance(FRAME, layout);
        c.advance(FRAME, layout);
        let total = c.timings().forward_total_ms();
        c.advance(total, layout);
        assert!(matches!(c.phase(), Phase::Settled { .. }));
        let lock = c.timings().lock_after_forward_ms;
        c.advance(lock, layout);
        assert!(!c.is_locked());
    }

    #[test]
    fn test_round_trip_returns_to_idle() {
        let layout = layout();
        let mut c = controller();

        assert_eq!(c.select("Projects", &layout).unwrap(), Outcome::Started);
        assert!(matches!(
            c.phase(),
            Phase::Forward {
                stage: ForwardStage::Measuring { .. },
                ..
            }
        ));
        c.advance(FRAME, &layout);
        c.advance(FRAME, &layout);
        assert!(matches!(
            c.phase(),
            Phase::Forward {
                stage: ForwardStage::Flying { .. },
                ..
            }
        ));

        c.advance(c.timings().forward_total_ms(), &layout);
        assert!(matches!(c.phase(), Phase::Settled { .. }));
        assert!(c.is_locked());

        // Return is not held back by the lock
        assert_eq!(c.go_back(&layout), Outcome::Started);
        c.advance(c.timings().return_total_ms(), &layout);
        assert_eq!(*c.phase(), Phase::Idle);
        assert_eq!(c.visibility().section, None);

        assert!(c.is_locked());
        assert_eq!(
            c.select("Projects", &layout).unwrap(),
            Outcome::Ignored(Refusal::Locked)
        );
        c.advance(c.timings().lock_after_return_ms, &layout);
        assert!(!c.is_locked());
    }

    #[test]
    fn test_reselect_while_settled_is_ignored() {
        let layout = layout();
        let mut c = controller();
        settle(&mut c, Section::Projects, &layout);
        let before = *c.phase();
        assert_eq!(
            c.select("projects", &layout).unwrap(),
            Outcome::Ignored(Refusal::AlreadyActive)
        );
        assert_eq!(*c.phase(), before);
    }

    #[test]
    fn test_switching_sections_shows_one_at_a_time() {
        let layout = layout();
        let mut c = controller();
        settle(&mut c, Section::Experience, &layout);
        assert!(c.visibility().is_shown(Section::Experience));

        assert_eq!(c.select("Projects", &layout).unwrap(), Outcome::Started);
        let vis = c.visibility();
        assert!(vis.is_shown(Section::Projects));
        assert!(!vis.is_shown(Section::Experience));

        for _ in 0..100 {
            c.advance(FRAME, &layout);
            let shown = c.visibility().flags().iter().filter(|(_, on)| *on).count();
            assert!(shown <= 1);
        }
        assert!(matches!(c.phase(), Phase::Settled { focus, .. } if focus.section == Section::Projects));
    }

    #[test]
    fn test_selection_refused_while_in_flight() {
        let layout = layout();
        let mut c = controller();
        c.select("Projects", &layout).unwrap();
        assert_eq!(
            c.select("Experience", &layout).unwrap(),
            Outcome::Ignored(Refusal::InFlight)
        );
        assert_eq!(c.select_contact(), Outcome::Ignored(Refusal::InFlight));
        assert_eq!(c.go_back(&layout), Outcome::Ignored(Refusal::InFlight));
    }

    #[test]
    fn test_lock_refuses_then_releases() {
        let layout = layout();
        let mut c = controller();
        c.select("Experience", &layout).unwrap();
        c.advance(FRAME, &layout);
        c.advance(FRAME, &layout);
        c.advance(c.timings().forward_total_ms(), &layout);

        assert_eq!(
            c.select("Projects", &layout).unwrap(),
            Outcome::Ignored(Refusal::Locked)
        );
        c.advance(c.timings().lock_after_forward_ms, &layout);
        assert_eq!(c.select("Projects", &layout).unwrap(), Outcome::Started);
    }

    #[test]
    fn test_missing_placeholder_aborts_to_idle() {
        let layout = layout();
        let mut c = controller();
        assert_eq!(c.select("Education", &layout).unwrap(), Outcome::Started);
        assert!(c.visibility().is_shown(Section::Education));
        c.advance(FRAME, &layout);
        c.advance(FRAME, &layout);
        assert_eq!(*c.phase(), Phase::Idle);
        assert!(!c.visibility().any_section());
        assert!(!c.is_locked());
    }

    #[test]
    fn test_unknown_label_is_an_error() {
        let layout = layout();
        let mut c = controller();
        assert!(matches!(
            c.select("Blog", &layout),
            Err(FolioError::UnknownBody(label)) if label == "Blog"
        ));
        assert_eq!(*c.phase(), Phase::Idle);
    }

    #[test]
    fn test_contact_flow() {
        let layout = layout();
        let mut c = controller();
        settle(&mut c, Section::Projects, &layout);

        assert_eq!(c.select("Contact", &layout).unwrap(), Outcome::Started);
        assert_eq!(*c.phase(), Phase::Idle);
        let vis = c.visibility();
        assert!(vis.contact);
        assert!(!vis.any_section());

        assert_eq!(
            c.select("Projects", &layout).unwrap(),
            Outcome::Ignored(Refusal::ContactShown)
        );
        assert_eq!(c.select_contact(), Outcome::Ignored(Refusal::AlreadyActive));

        // Not ready until the delay and slide have both played
        assert_eq!(c.scroll_up(&layout), Outcome::Ignored(Refusal::NotReady));
        c.advance(c.timings().contact_ready_ms(), &layout);
        assert_eq!(c.contact(), ContactPhase::Open);

        assert_eq!(c.scroll_up(&layout), Outcome::Started);
        assert!(matches!(c.contact(), ContactPhase::Closing { .. }));
        assert!(!c.visibility().contact);
        c.advance(c.timings().contact_slide_ms, &layout);
        assert_eq!(c.contact(), ContactPhase::Closed);
        assert_eq!(c.select("Projects", &layout).unwrap(), Outcome::Started);
    }

    #[test]
    fn test_back_with_nothing_to_return() {
        let layout = layout();
        let mut c = controller();
        assert_eq!(
            c.go_back(&layout),
            Outcome::Ignored(Refusal::NothingToReturn)
        );
    }

    #[test]
    fn test_resize_repins_after_debounce() {
        let mut layout = layout();
        let mut c = controller();
        settle(&mut c, Section::Projects, &layout);

        let moved = Rect::new(40.0, 120.0, 300.0, 300.0);
        layout.set_placeholder(Section::Projects, moved);
        c.request_resize();
        c.advance(50.0, &layout);
        assert!(matches!(c.phase(), Phase::Settled { end, .. } if *end != moved));
        c.request_resize();
        c.advance(60.0, &layout);
        assert!(matches!(c.phase(), Phase::Settled { end, .. } if *end != moved));
        c.advance(60.0, &layout);
        assert!(matches!(c.phase(), Phase::Settled { end, .. } if *end == moved));

        // Placeholder gone: keep the last pin
        layout.remove_placeholder(Section::Projects);
        c.request_resize();
        c.advance(c.timings().resize_debounce_ms, &layout);
        assert!(matches!(c.phase(), Phase::Settled { end, .. } if *end == moved));
    }

    #[test]
    fn test_resize_during_flight_repins_on_landing() {
        let mut layout = layout();
        let mut c = controller();
        c.select("Projects", &layout).unwrap();
        c.advance(FRAME, &layout);
        c.advance(FRAME, &layout);

        let moved = Rect::new(40.0, 120.0, 200.0, 200.0);
        layout.set_placeholder(Section::Projects, moved);
        c.request_resize();
        for _ in 0..200 {
            c.advance(FRAME, &layout);
        }
        assert!(matches!(c.phase(), Phase::Settled { end, .. } if *end == moved));
    }

    #[test]
    fn test_lock_counts_from_the_landing() {
        let layout = layout();
        let mut c = controller();
        c.select("Projects", &layout).unwrap();
        c.advance(FRAME, &layout);
        c.advance(FRAME, &layout);

        // Landed 200ms into this step
        c.advance(c.timings().forward_total_ms() + 200.0, &layout);
        assert!(matches!(c.phase(), Phase::Settled { .. }));
        c.advance(999.0, &layout);
        assert!(c.is_locked());
        c.advance(1.0, &layout);
        assert!(!c.is_locked());

        c.go_back(&layout);
        c.advance(c.timings().return_total_ms() + 300.0, &layout);
        assert_eq!(*c.phase(), Phase::Idle);
        c.advance(499.0, &layout);
        assert!(c.is_locked());
        c.advance(1.0, &layout);
        assert!(!c.is_locked());
    }

    #[test]
    fn test_navigate_walks_the_ring() {
        let layout = layout()
            .with_placeholder(Section::Education, Rect::new(120.0, 160.0, 300.0, 300.0));
        let mut c = controller();

        assert_eq!(c.navigate(Step::Previous, &layout).unwrap(), Outcome::Started);
        assert!(c.visibility().is_shown(Section::Education));
        c.advance(FRAME, &layout);
        c.advance(FRAME, &layout);
        c.advance(c.timings().forward_total_ms(), &layout);
        assert_eq!(
            c.navigate(Step::Previous, &layout).unwrap(),
            Outcome::Ignored(Refusal::Locked)
        );
        c.advance(c.timings().lock_after_forward_ms, &layout);

        assert_eq!(c.navigate(Step::Previous, &layout).unwrap(), Outcome::Started);
        assert!(c.visibility().is_shown(Section::Testimonials));

        // Testimonials has no placeholder here, so the flight aborts
        c.advance(FRAME, &layout);
        c.advance(FRAME, &layout);
        assert_eq!(*c.phase(), Phase::Idle);

        settle(&mut c, Section::Education, &layout);
        assert_eq!(c.navigate(Step::Next, &layout).unwrap(), Outcome::Started);
        assert!(matches!(c.phase(), Phase::Reverse { .. }));
    }

    #[test]
    fn test_compact_viewport_scrolls_instead() {
        let layout = layout();
        let mut c = controller();
        c.set_viewport(ViewportTier::Compact);

        assert_eq!(c.select("Projects", &layout).unwrap(), Outcome::Scrolled);
        assert_eq!(c.select_contact(), Outcome::Scrolled);
        assert_eq!(*c.phase(), Phase::Idle);
        assert_eq!(
            c.take_directives(),
            vec![
                Directive::ScrollToSection(Section::Projects),
                Directive::ScrollToContact
            ]
        );
        assert!(c.take_directives().is_empty());
    }

    #[test]
    fn test_switch_to_compact_drops_session() {
        let layout = layout();
        let mut c = controller();
        settle(&mut c, Section::Projects, &layout);
        c.set_viewport(ViewportTier::Compact);
        assert_eq!(*c.phase(), Phase::Idle);
        assert!(!c.visibility().any_section());
    }

    #[test]
    fn test_reduced_timings_keep_phase_order() {
        let layout = layout();
        let mut c = Controller::new(SolarSystem::builtin(), Timings::reduced());
        c.select("Projects", &layout).unwrap();
        c.advance(FRAME, &layout);
        assert!(matches!(
            c.phase(),
            Phase::Forward {
                stage: ForwardStage::Measuring { .. },
                ..
            }
        ));
        c.advance(FRAME, &layout);
        c.advance(FRAME, &layout);
        assert!(matches!(c.phase(), Phase::Settled { .. }));

        c.go_back(&layout);
        c.advance(FRAME, &layout);
        assert_eq!(*c.phase(), Phase::Idle);
        assert!(!c.is_locked());
    }

    #[test]
    fn test_tick_applies_input() {
        let layout = layout();
        let mut c = controller();
        let input = ChoreoInput {
            select: Some("Projects".to_string()),
            ..Default::default()
        };
        tick(&mut c, &input, FRAME, &layout);
        assert!(c.visibility().is_shown(Section::Projects));

        tick(&mut c, &ChoreoInput::default(), FRAME, &layout);
        assert!(matches!(
            c.phase(),
            Phase::Forward {
                stage: ForwardStage::Flying { .. },
                ..
            }
        ));
        assert!(c.clock_secs() > 0.03);
    }

    #[test]
    fn test_intro_completes() {
        let layout = layout();
        let mut c = controller();
        c.advance(3000.0, &layout);
        assert!(!c.intro_complete());
        c.advance(600.0, &layout);
        assert!(c.intro_complete());
    }
}
