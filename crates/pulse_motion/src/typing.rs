//! Typing-effect state machine
//!
//! Cycles through a list of strings, typing characters in, holding the
//! full string, deleting characters out, then advancing to the next
//! string modulo the list length. The loop is infinite and only stops at
//! page teardown. The displayed text is always a prefix of the active
//! string followed by a cursor glyph.

use pulse_platform::{DocumentSurface, NodeId};

/// Typing cadence
#[derive(Clone, Copy, Debug)]
pub struct TypingConfig {
    /// Interval between typed characters
    pub type_ms: f32,
    /// Interval between deleted characters (faster than typing)
    pub delete_ms: f32,
    /// Hold at the full string before deleting
    pub hold_ms: f32,
    /// Cursor glyph appended after the visible prefix
    pub cursor: char,
}

impl Default for TypingConfig {
    fn default() -> Self {
        Self {
            type_ms: 100.0,
            delete_ms: 50.0,
            hold_ms: 2000.0,
            cursor: '|',
        }
    }
}

/// Animation phase
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Phase {
    Typing,
    HoldingFull,
    Deleting,
}

/// The typing-effect animator
pub struct TypingEffect {
    target: NodeId,
    strings: Vec<String>,
    config: TypingConfig,
    index: usize,
    /// Visible prefix length in characters (not bytes)
    shown: usize,
    phase: Phase,
    /// Time until the next step fires
    until_next_ms: f32,
}

impl TypingEffect {
    pub fn new(target: NodeId, strings: Vec<String>, config: TypingConfig) -> Self {
        // Stepping intervals must be positive or catch-up never terminates
        let config = TypingConfig {
            type_ms: config.type_ms.max(1.0),
            delete_ms: config.delete_ms.max(1.0),
            hold_ms: config.hold_ms.max(0.0),
            ..config
        };
        Self {
            target,
            strings,
            until_next_ms: config.type_ms,
            config,
            index: 0,
            shown: 0,
            phase: Phase::Typing,
        }
    }

    /// Index of the string currently being cycled
    pub fn string_index(&self) -> usize {
        self.index
    }

    /// Number of characters currently shown
    pub fn shown_len(&self) -> usize {
        self.shown
    }

    /// The visible prefix without the cursor glyph
    pub fn visible_text(&self) -> &str {
        let Some(current) = self.strings.get(self.index) else {
            return "";
        };
        match current.char_indices().nth(self.shown) {
            Some((byte_index, _)) => &current[..byte_index],
            None => current,
        }
    }

    /// Advance the state machine by one frame
    ///
    /// Large frame gaps process multiple steps, so timing drift never
    /// desynchronizes the phase sequence.
    pub fn tick(&mut self, dt_ms: f32, surface: &mut dyn DocumentSurface) {
        if self.strings.is_empty() {
            return;
        }

        self.until_next_ms -= dt_ms;
        let mut stepped = false;
        while self.until_next_ms <= 0.0 {
            self.until_next_ms += self.step();
            stepped = true;
        }
        if stepped {
            self.render(surface);
        }
    }

    /// Execute one transition, returning the delay before the next
    fn step(&mut self) -> f32 {
        let current_len = self.strings[self.index].chars().count();
        match self.phase {
            Phase::Typing => {
                if self.shown < current_len {
                    self.shown += 1;
                }
                if self.shown == current_len {
                    self.phase = Phase::HoldingFull;
                    self.config.hold_ms
                } else {
                    self.config.type_ms
                }
            }
            Phase::HoldingFull => {
                self.phase = Phase::Deleting;
                self.config.delete_ms
            }
            Phase::Deleting => {
                self.shown = self.shown.saturating_sub(1);
                if self.shown == 0 {
                    // Wrap to the next string; zero-length pause
                    self.index = (self.index + 1) % self.strings.len();
                    self.phase = Phase::Typing;
                    self.config.type_ms
                } else {
                    self.config.delete_ms
                }
            }
        }
    }

    fn render(&self, surface: &mut dyn DocumentSurface) {
        if !surface.contains(self.target) {
            tracing::debug!("typing target missing, skipping render");
            return;
        }
        let mut text = self.visible_text().to_string();
        text.push(self.config.cursor);
        surface.set_text(self.target, &text);
    }
}
