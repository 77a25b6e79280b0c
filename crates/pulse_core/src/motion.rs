//! Motion preference
//!
//! The user's reduced-motion setting, threaded into every animator at
//! construction. When reduced, terminal visual states are applied
//! immediately with no intermediate frames.

/// User/platform motion preference
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum MotionPreference {
    /// Full animations
    #[default]
    Full,
    /// Skip animations, jump to terminal states
    Reduced,
}

impl MotionPreference {
    pub fn is_reduced(&self) -> bool {
        matches!(self, MotionPreference::Reduced)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_full() {
        assert_eq!(MotionPreference::default(), MotionPreference::Full);
        assert!(!MotionPreference::Full.is_reduced());
        assert!(MotionPreference::Reduced.is_reduced());
    }
}
