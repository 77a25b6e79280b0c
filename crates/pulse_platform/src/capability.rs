//! Host capability probing

use pulse_core::MotionPreference;

/// What the host can do, probed once at construction
///
/// Feature branching happens exactly once, when components are built:
/// a missing intersection observer selects the polling reveal path, and
/// reduced motion selects immediate terminal states everywhere.
#[derive(Clone, Copy, Debug)]
pub struct Capabilities {
    /// Host provides native visibility-crossing notifications
    pub intersection_observer: bool,
    /// User prefers reduced motion
    pub reduced_motion: bool,
}

impl Capabilities {
    /// The motion preference implied by these capabilities
    pub fn motion_preference(&self) -> MotionPreference {
        if self.reduced_motion {
            MotionPreference::Reduced
        } else {
            MotionPreference::Full
        }
    }
}

impl Default for Capabilities {
    fn default() -> Self {
        Self {
            intersection_observer: true,
            reduced_motion: false,
        }
    }
}
