//! Focus transition controller
//!
//! Flies a planet from its orbit onto its section's placeholder and back,
//! and keeps the section flags and the Contact overlay mutually exclusive.

pub mod scene;
pub mod section;
pub mod state;
pub mod tick;
pub mod timing;

pub use scene::{FocusedBody, Projection, Scene};
pub use section::{Section, Stop, Visibility};
pub use state::{ContactPhase, Controller, Directive, Focus, ForwardStage, Phase, ReturnStage};
pub use tick::{CONTACT_LABEL, ChoreoInput, Outcome, Refusal, Step, tick};
pub use timing::{IntroTimings, Timings};
