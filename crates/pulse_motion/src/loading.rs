//! Loading-screen sequencing
//!
//! While the document is still loading, a status line cycles through a
//! message list on a fixed interval. Completion fades the screen out,
//! marks it hidden, and only then is the page considered ready, so
//! readiness listeners never fire behind the overlay.

use pulse_platform::{DocumentSurface, NodeId};

/// Class added once the fade-out has finished
pub const HIDDEN_CLASS: &str = "hidden";

const DEFAULT_MESSAGES: [&str; 3] = [
    "Initializing...",
    "Loading assets...",
    "Almost ready...",
];

/// Loading-screen cadence
#[derive(Clone, Copy, Debug)]
pub struct LoadingConfig {
    /// Interval between status messages
    pub message_ms: f32,
    /// Fade-out duration after completion
    pub fade_ms: f32,
}

impl Default for LoadingConfig {
    fn default() -> Self {
        Self {
            message_ms: 1500.0,
            fade_ms: 600.0,
        }
    }
}

enum State {
    Cycling,
    FadingOut { remaining_ms: f32 },
    Hidden,
}

/// The loading overlay and its status-message cycle
pub struct LoadingScreen {
    screen: NodeId,
    text: Option<NodeId>,
    messages: Vec<String>,
    config: LoadingConfig,
    index: usize,
    until_next_ms: f32,
    state: State,
}

impl LoadingScreen {
    pub fn new(screen: NodeId, text: Option<NodeId>, config: LoadingConfig) -> Self {
        // Message interval must be positive or catch-up never terminates
        let config = LoadingConfig {
            message_ms: config.message_ms.max(1.0),
            fade_ms: config.fade_ms.max(0.0),
        };
        Self {
            screen,
            text,
            messages: DEFAULT_MESSAGES.iter().map(|s| s.to_string()).collect(),
            until_next_ms: config.message_ms,
            config,
            index: 0,
            state: State::Cycling,
        }
    }

    /// Begin the fade-out; further messages stop immediately
    pub fn complete(&mut self, surface: &mut dyn DocumentSurface) {
        if matches!(self.state, State::Cycling) {
            surface.set_style(self.screen, "opacity", 0.0);
            self.state = State::FadingOut {
                remaining_ms: self.config.fade_ms,
            };
        }
    }

    pub fn is_hidden(&self) -> bool {
        matches!(self.state, State::Hidden)
    }

    /// Advance the sequence by one frame
    ///
    /// Returns `true` on the frame the fade-out finishes, exactly once.
    pub fn tick(&mut self, dt_ms: f32, surface: &mut dyn DocumentSurface) -> bool {
        match &mut self.state {
            State::Cycling => {
                self.until_next_ms -= dt_ms;
                while self.until_next_ms <= 0.0 {
                    self.until_next_ms += self.config.message_ms;
                    if let Some(text) = self.text {
                        surface.set_text(text, &self.messages[self.index]);
                    }
                    self.index = (self.index + 1) % self.messages.len();
                }
                false
            }
            State::FadingOut { remaining_ms } => {
                *remaining_ms -= dt_ms;
                if *remaining_ms <= 0.0 {
                    surface.add_class(self.screen, HIDDEN_CLASS);
                    self.state = State::Hidden;
                    true
                } else {
                    false
                }
            }
            State::Hidden => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pulse_platform::{MemoryDocument, NodeSpec};

    fn build() -> (MemoryDocument, LoadingScreen, NodeId, NodeId) {
        let mut doc = MemoryDocument::new(800.0, 600.0);
        let screen = doc.insert(NodeSpec::new().class("loading-screen"));
        let text = doc.insert(NodeSpec::new().class("loading-text"));
        let loading = LoadingScreen::new(screen, Some(text), LoadingConfig::default());
        (doc, loading, screen, text)
    }

    #[test]
    fn test_messages_cycle_on_interval() {
        let (mut doc, mut loading, _screen, text) = build();

        assert!(!loading.tick(1500.0, &mut doc));
        assert_eq!(doc.text(text).unwrap(), "Initializing...");

        loading.tick(1500.0, &mut doc);
        assert_eq!(doc.text(text).unwrap(), "Loading assets...");

        // Wraps around the list
        loading.tick(1500.0, &mut doc);
        loading.tick(1500.0, &mut doc);
        assert_eq!(doc.text(text).unwrap(), "Initializing...");
    }

    #[test]
    fn test_complete_fades_then_hides_once() {
        let (mut doc, mut loading, screen, text) = build();

        loading.complete(&mut doc);
        assert_eq!(doc.style(screen, "opacity"), Some(0.0));
        assert!(!doc.has_class(screen, HIDDEN_CLASS));

        // Messages stop after completion
        assert!(!loading.tick(500.0, &mut doc));
        assert_eq!(doc.text(text).unwrap(), "");

        // Fade elapses: hidden, reported exactly once
        assert!(loading.tick(100.0, &mut doc));
        assert!(doc.has_class(screen, HIDDEN_CLASS));
        assert!(loading.is_hidden());
        assert!(!loading.tick(1000.0, &mut doc));
    }

    #[test]
    fn test_double_complete_is_idempotent() {
        let (mut doc, mut loading, _screen, _text) = build();

        loading.complete(&mut doc);
        loading.tick(600.0, &mut doc);
        assert!(loading.is_hidden());

        // A second completion must not restart the fade
        loading.complete(&mut doc);
        assert!(loading.is_hidden());
        assert!(!loading.tick(1000.0, &mut doc));
    }

    #[test]
    fn test_missing_text_node_still_completes() {
        let mut doc = MemoryDocument::new(800.0, 600.0);
        let screen = doc.insert(NodeSpec::new().class("loading-screen"));
        let mut loading = LoadingScreen::new(screen, None, LoadingConfig::default());

        loading.tick(3000.0, &mut doc);
        loading.complete(&mut doc);
        assert!(loading.tick(600.0, &mut doc));
    }

    #[test]
    fn test_zero_interval_is_clamped() {
        let mut doc = MemoryDocument::new(800.0, 600.0);
        let screen = doc.insert(NodeSpec::new().class("loading-screen"));
        let config = LoadingConfig {
            message_ms: 0.0,
            fade_ms: 0.0,
        };
        let mut loading = LoadingScreen::new(screen, None, config);
        // Must terminate
        loading.tick(100.0, &mut doc);
        loading.complete(&mut doc);
        assert!(loading.tick(0.0, &mut doc));
    }
}
