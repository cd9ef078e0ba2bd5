//! Named durations of the focus choreography
//!
//! The controller's timers and the CSS transitions the page runs read the
//! same values, so a phase can never end before its animation does.

use serde::{Deserialize, Serialize};

/// Page-load intro sequence
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IntroTimings {
    /// Star streaks before the solar system appears
    pub lightspeed_ms: f32,
    /// Delay before the solar system starts scaling in
    pub solar_delay_ms: f32,
    /// Solar system scale-in
    pub solar_ms: f32,
    /// Hero copy fade-in
    pub content_ms: f32,
}

impl Default for IntroTimings {
    fn default() -> Self {
        Self {
            lightspeed_ms: 2000.0,
            solar_delay_ms: 800.0,
            solar_ms: 1400.0,
            content_ms: 800.0,
        }
    }
}

impl IntroTimings {
    /// When the intro counts as finished
    pub fn total_ms(&self) -> f32 {
        self.solar_delay_ms + self.lightspeed_ms + self.content_ms
    }
}

/// Durations of every choreography stage (ms)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Timings {
    /// Frames to wait after showing a section before measuring its placeholder
    pub measure_frames: u32,
    /// Body flies from its orbit to the placeholder
    pub forward_ms: f32,
    /// Buffer after the flight before the section counts as settled
    pub settle_ms: f32,
    /// New selections refused after settling
    pub lock_after_forward_ms: f32,

    /// Reverse phase A: the body shrinks back onto its orbit
    pub return_body_ms: f32,
    /// Gap between the body landing and the container moving
    pub return_gap_ms: f32,
    /// Reverse phase B: the solar-system container slides back down
    pub return_system_ms: f32,
    /// New selections refused after returning to the hero
    pub lock_after_return_ms: f32,

    /// Delay before the Contact overlay slides in (sky elongation plays first)
    pub contact_delay_ms: f32,
    /// Contact overlay slide in/out
    pub contact_slide_ms: f32,

    /// Resize events closer together than this are coalesced
    pub resize_debounce_ms: f32,

    /// Section and hero copy cross-fade
    pub section_fade_ms: f32,

    pub intro: IntroTimings,
}

impl Default for Timings {
    fn default() -> Self {
        Self {
            measure_frames: 2,
            forward_ms: 1000.0,
            settle_ms: 100.0,
            lock_after_forward_ms: 1200.0,

            return_body_ms: 300.0,
            return_gap_ms: 250.0,
            return_system_ms: 1000.0,
            lock_after_return_ms: 800.0,

            contact_delay_ms: 300.0,
            contact_slide_ms: 900.0,

            resize_debounce_ms: 100.0,

            section_fade_ms: 1000.0,

            intro: IntroTimings::default(),
        }
    }
}

impl Timings {
    /// Every animation collapsed to zero; the phase sequence is unchanged
    pub fn reduced() -> Self {
        Self {
            measure_frames: 2,
            forward_ms: 0.0,
            settle_ms: 0.0,
            lock_after_forward_ms: 0.0,
            return_body_ms: 0.0,
            return_gap_ms: 0.0,
            return_system_ms: 0.0,
            lock_after_return_ms: 0.0,
            contact_delay_ms: 0.0,
            contact_slide_ms: 0.0,
            resize_debounce_ms: 100.0,
            section_fade_ms: 0.0,
            intro: IntroTimings {
                lightspeed_ms: 0.0,
                solar_delay_ms: 0.0,
                solar_ms: 0.0,
                content_ms: 0.0,
            },
        }
    }

    /// Select to settled, excluding the measurement frames
    pub fn forward_total_ms(&self) -> f32 {
        self.forward_ms + self.settle_ms
    }

    /// Return action to idle
    pub fn return_total_ms(&self) -> f32 {
        self.return_body_ms + self.return_gap_ms + self.return_system_ms
    }

    /// Contact overlay fully in place (scroll-up closes it from here on)
    pub fn contact_ready_ms(&self) -> f32 {
        self.contact_delay_ms + self.contact_slide_ms
    }

    /// CSS custom properties so page transitions run on the same clock
    pub fn css_variables(&self) -> String {
        let vars = [
            ("forward", self.forward_ms),
            ("return-body", self.return_body_ms),
            ("return-system", self.return_system_ms),
            ("contact-delay", self.contact_delay_ms),
            ("contact-slide", self.contact_slide_ms),
            ("section-fade", self.section_fade_ms),
            ("lightspeed", self.intro.lightspeed_ms),
            ("solar-delay", self.intro.solar_delay_ms),
            ("solar", self.intro.solar_ms),
            ("content", self.intro.content_ms),
        ];
        let mut css = String::from(":root {\n");
        for (name, ms) in vars {
            css.push_str(&format!("  --{name}-duration: {ms}ms;\n"));
        }
        css.push_str("}\n");
        css
    }
}
