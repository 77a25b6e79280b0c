//! Counter and skill-bar animators
//!
//! Both drive a value from 0 to a parsed target with a cubic ease-out
//! tween, triggered once when the element first crosses half-visibility,
//! then permanently disarmed. Counters render a floored integer plus the
//! non-numeric suffix of the original text ("42+", "95%"); skill bars
//! write a percentage to a custom style property.

use crate::scheduler::{AnimatedTween, SchedulerHandle};
use crate::visibility::{watcher_for, VisibilityWatcher};
use pulse_core::{Easing, MotionPreference};
use pulse_platform::{Capabilities, DocumentSurface, NodeId, SurfaceError, VisibilityRecord};
use std::time::Instant;

/// Style property written by skill bars (a percentage)
pub const SKILL_WIDTH_PROPERTY: &str = "skill-width";

/// Counter animation knobs
#[derive(Clone, Copy, Debug)]
pub struct CounterConfig {
    pub duration_ms: f32,
    /// Visibility fraction required to trigger
    pub threshold: f32,
}

impl Default for CounterConfig {
    fn default() -> Self {
        Self {
            duration_ms: 2000.0,
            threshold: 0.5,
        }
    }
}

/// Skill-bar animation knobs
#[derive(Clone, Copy, Debug)]
pub struct SkillBarConfig {
    pub duration_ms: f32,
    pub threshold: f32,
}

impl Default for SkillBarConfig {
    fn default() -> Self {
        Self {
            duration_ms: 1500.0,
            threshold: 0.5,
        }
    }
}

/// Split element text into a numeric target and its non-digit suffix
///
/// Mirrors the "first digit run" rule: `"42+"` parses to `(42.0, "+")`,
/// `"over 9000!"` to `(9000.0, "over !")`.
fn parse_target(text: &str) -> pulse_platform::Result<(f32, String)> {
    let start = text
        .find(|c: char| c.is_ascii_digit())
        .ok_or_else(|| SurfaceError::MalformedInput(format!("no digits in {text:?}")))?;
    let end = text[start..]
        .find(|c: char| !c.is_ascii_digit())
        .map(|offset| start + offset)
        .unwrap_or(text.len());
    let target: f32 = text[start..end]
        .parse()
        .map_err(|_| SurfaceError::MalformedInput(format!("bad number in {text:?}")))?;
    let suffix = format!("{}{}", &text[..start], &text[end..]);
    Ok((target, suffix))
}

struct CounterEntry {
    node: NodeId,
    target: f32,
    suffix: String,
    tween: Option<AnimatedTween>,
    done: bool,
}

/// One-shot number animators for stat elements
pub struct CounterSet {
    entries: Vec<CounterEntry>,
    watcher: Box<dyn VisibilityWatcher>,
    handle: SchedulerHandle,
    preference: MotionPreference,
    config: CounterConfig,
}

impl CounterSet {
    pub fn new(
        caps: Capabilities,
        config: CounterConfig,
        handle: SchedulerHandle,
        surface: &dyn DocumentSurface,
        targets: &[NodeId],
    ) -> Self {
        let mut watcher = watcher_for(caps, config.threshold, 0.0);
        let mut entries = Vec::new();
        for node in targets {
            let Some(text) = surface.text(*node) else {
                continue;
            };
            match parse_target(text.trim()) {
                Ok((target, suffix)) => {
                    watcher.observe(*node);
                    entries.push(CounterEntry {
                        node: *node,
                        target,
                        suffix,
                        tween: None,
                        done: false,
                    });
                }
                Err(error) => {
                    tracing::warn!(%error, "skipping counter");
                }
            }
        }
        Self {
            entries,
            watcher,
            handle,
            preference: caps.motion_preference(),
            config,
        }
    }

    pub fn handle_visibility(&mut self, record: VisibilityRecord) {
        self.watcher.notify(record);
    }

    /// Arm triggers and render in-flight values
    ///
    /// The scheduler must have been ticked for this frame already.
    pub fn tick(&mut self, surface: &mut dyn DocumentSurface, now: Instant) {
        let crossings = self.watcher.take_crossings(surface, now);
        for node in crossings {
            self.watcher.unobserve(node);
            let Some(entry) = self
                .entries
                .iter_mut()
                .find(|entry| entry.node == node && !entry.done && entry.tween.is_none())
            else {
                continue;
            };
            if self.preference.is_reduced() {
                write_counter(surface, entry.node, entry.target, &entry.suffix);
                entry.done = true;
                continue;
            }
            let mut tween = AnimatedTween::new(
                self.handle.clone(),
                0.0,
                entry.target,
                self.config.duration_ms,
                Easing::EaseOut,
            );
            tween.start();
            entry.tween = Some(tween);
        }

        for entry in &mut self.entries {
            let Some(tween) = entry.tween.as_ref() else {
                continue;
            };
            if tween.is_finished() {
                // Exact target at the end, no floor residue
                write_counter(surface, entry.node, entry.target, &entry.suffix);
                entry.tween = None;
                entry.done = true;
            } else {
                write_counter(surface, entry.node, tween.get().floor(), &entry.suffix);
            }
        }
    }

    pub fn teardown(&mut self) {
        self.watcher.disconnect();
        // Dropping tweens deregisters them from the scheduler
        for entry in &mut self.entries {
            entry.tween = None;
        }
    }
}

fn write_counter(surface: &mut dyn DocumentSurface, node: NodeId, value: f32, suffix: &str) {
    surface.set_text(node, &format!("{}{}", value as i64, suffix));
}

struct SkillBarEntry {
    node: NodeId,
    level: f32,
    tween: Option<AnimatedTween>,
    done: bool,
}

/// One-shot percentage animators for skill bars
///
/// The target level comes from the element's `level` data attribute.
pub struct SkillBarSet {
    entries: Vec<SkillBarEntry>,
    watcher: Box<dyn VisibilityWatcher>,
    handle: SchedulerHandle,
    preference: MotionPreference,
    config: SkillBarConfig,
}

impl SkillBarSet {
    pub fn new(
        caps: Capabilities,
        config: SkillBarConfig,
        handle: SchedulerHandle,
        surface: &dyn DocumentSurface,
        targets: &[NodeId],
    ) -> Self {
        let mut watcher = watcher_for(caps, config.threshold, 0.0);
        let mut entries = Vec::new();
        for node in targets {
            let level = surface
                .data_attr(*node, "level")
                .ok_or_else(|| SurfaceError::MalformedInput("missing level attribute".into()))
                .and_then(|raw| {
                    raw.trim().parse::<f32>().map_err(|_| {
                        SurfaceError::MalformedInput(format!("bad level {raw:?}"))
                    })
                });
            match level {
                Ok(level) => {
                    watcher.observe(*node);
                    entries.push(SkillBarEntry {
                        node: *node,
                        level,
                        tween: None,
                        done: false,
                    });
                }
                Err(error) => {
                    tracing::warn!(%error, "skipping skill bar");
                }
            }
        }
        Self {
            entries,
            watcher,
            handle,
            preference: caps.motion_preference(),
            config,
        }
    }

    pub fn handle_visibility(&mut self, record: VisibilityRecord) {
        self.watcher.notify(record);
    }

    pub fn tick(&mut self, surface: &mut dyn DocumentSurface, now: Instant) {
        let crossings = self.watcher.take_crossings(surface, now);
        for node in crossings {
            self.watcher.unobserve(node);
            let Some(entry) = self
                .entries
                .iter_mut()
                .find(|entry| entry.node == node && !entry.done && entry.tween.is_none())
            else {
                continue;
            };
            if self.preference.is_reduced() {
                surface.set_style(entry.node, SKILL_WIDTH_PROPERTY, entry.level);
                entry.done = true;
                continue;
            }
            let mut tween = AnimatedTween::new(
                self.handle.clone(),
                0.0,
                entry.level,
                self.config.duration_ms,
                Easing::EaseOut,
            );
            tween.start();
            entry.tween = Some(tween);
        }

        for entry in &mut self.entries {
            let Some(tween) = entry.tween.as_ref() else {
                continue;
            };
            surface.set_style(entry.node, SKILL_WIDTH_PROPERTY, tween.get());
            if tween.is_finished() {
                entry.tween = None;
                entry.done = true;
            }
        }
    }

    pub fn teardown(&mut self) {
        self.watcher.disconnect();
        for entry in &mut self.entries {
            entry.tween = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheduler::MotionScheduler;
    use pulse_core::Rect;
    use pulse_platform::{MemoryDocument, NodeSpec};

    fn stat_doc(text: &str) -> (MemoryDocument, NodeId) {
        let mut doc = MemoryDocument::new(1280.0, 800.0);
        let node = doc.insert(
            NodeSpec::new()
                .class("stat-number")
                .text(text)
                .rect(Rect::new(0.0, 100.0, 100.0, 50.0)),
        );
        (doc, node)
    }

    fn visible(node: NodeId) -> VisibilityRecord {
        VisibilityRecord {
            node,
            visible: true,
        }
    }

    #[test]
    fn test_parse_target() {
        assert_eq!(parse_target("42+").unwrap(), (42.0, "+".to_string()));
        assert_eq!(parse_target("95%").unwrap(), (95.0, "%".to_string()));
        assert_eq!(parse_target("100").unwrap(), (100.0, String::new()));
        assert_eq!(
            parse_target("over 9000!").unwrap(),
            (9000.0, "over !".to_string())
        );
        assert!(parse_target("n/a").is_err());
        assert!(parse_target("").is_err());
    }

    #[test]
    fn test_counter_reaches_exact_target() {
        let (mut doc, node) = stat_doc("42+");
        let scheduler = MotionScheduler::new();
        let mut counters = CounterSet::new(
            Capabilities::default(),
            CounterConfig::default(),
            scheduler.handle(),
            &doc,
            &[node],
        );
        let now = Instant::now();

        counters.handle_visibility(visible(node));
        counters.tick(&mut doc, now);
        assert_eq!(doc.text(node).unwrap(), "0+");

        // Run well past the duration
        for _ in 0..150 {
            scheduler.tick(1000.0 / 60.0);
            counters.tick(&mut doc, now);
        }
        assert_eq!(doc.text(node).unwrap(), "42+");
    }

    #[test]
    fn test_counter_monotone_non_decreasing() {
        let (mut doc, node) = stat_doc("1000");
        let scheduler = MotionScheduler::new();
        let mut counters = CounterSet::new(
            Capabilities::default(),
            CounterConfig::default(),
            scheduler.handle(),
            &doc,
            &[node],
        );
        let now = Instant::now();

        counters.handle_visibility(visible(node));
        counters.tick(&mut doc, now);

        let mut prev = 0i64;
        for _ in 0..150 {
            scheduler.tick(1000.0 / 60.0);
            counters.tick(&mut doc, now);
            let text = doc.text(node).unwrap();
            let value: i64 = text.parse().unwrap();
            assert!(value >= prev, "counter went backwards: {prev} -> {value}");
            prev = value;
        }
        assert_eq!(prev, 1000);
    }

    #[test]
    fn test_counter_triggers_only_once() {
        let (mut doc, node) = stat_doc("10");
        let scheduler = MotionScheduler::new();
        let mut counters = CounterSet::new(
            Capabilities::default(),
            CounterConfig::default(),
            scheduler.handle(),
            &doc,
            &[node],
        );
        let now = Instant::now();

        counters.handle_visibility(visible(node));
        for _ in 0..150 {
            scheduler.tick(1000.0 / 60.0);
            counters.tick(&mut doc, now);
        }
        assert_eq!(doc.text(node).unwrap(), "10");

        // A later crossing must not restart the animation
        counters.handle_visibility(visible(node));
        counters.tick(&mut doc, now);
        assert_eq!(doc.text(node).unwrap(), "10");
        assert_eq!(scheduler.tween_count(), 0);
    }

    #[test]
    fn test_reduced_motion_writes_target_immediately() {
        let (mut doc, node) = stat_doc("42");
        let scheduler = MotionScheduler::new();
        let caps = Capabilities {
            reduced_motion: true,
            ..Capabilities::default()
        };
        let mut counters = CounterSet::new(
            caps,
            CounterConfig::default(),
            scheduler.handle(),
            &doc,
            &[node],
        );

        counters.handle_visibility(visible(node));
        counters.tick(&mut doc, Instant::now());
        assert_eq!(doc.text(node).unwrap(), "42");
        assert_eq!(scheduler.tween_count(), 0);
    }

    #[test]
    fn test_malformed_text_is_skipped() {
        let (mut doc, node) = stat_doc("n/a");
        let scheduler = MotionScheduler::new();
        let mut counters = CounterSet::new(
            Capabilities::default(),
            CounterConfig::default(),
            scheduler.handle(),
            &doc,
            &[node],
        );
        counters.handle_visibility(visible(node));
        counters.tick(&mut doc, Instant::now());
        // Text untouched
        assert_eq!(doc.text(node).unwrap(), "n/a");
    }

    #[test]
    fn test_skill_bar_fills_to_level() {
        let mut doc = MemoryDocument::new(1280.0, 800.0);
        let node = doc.insert(
            NodeSpec::new()
                .class("skill-bar")
                .data("level", "85")
                .rect(Rect::new(0.0, 100.0, 200.0, 20.0)),
        );
        let scheduler = MotionScheduler::new();
        let mut bars = SkillBarSet::new(
            Capabilities::default(),
            SkillBarConfig::default(),
            scheduler.handle(),
            &doc,
            &[node],
        );
        let now = Instant::now();

        bars.handle_visibility(visible(node));
        bars.tick(&mut doc, now);
        assert_eq!(doc.style(node, SKILL_WIDTH_PROPERTY), Some(0.0));

        for _ in 0..120 {
            scheduler.tick(1000.0 / 60.0);
            bars.tick(&mut doc, now);
        }
        assert_eq!(doc.style(node, SKILL_WIDTH_PROPERTY), Some(85.0));
    }

    #[test]
    fn test_skill_bar_without_level_is_skipped() {
        let mut doc = MemoryDocument::new(1280.0, 800.0);
        let node = doc.insert(NodeSpec::new().class("skill-bar"));
        let scheduler = MotionScheduler::new();
        let mut bars = SkillBarSet::new(
            Capabilities::default(),
            SkillBarConfig::default(),
            scheduler.handle(),
            &doc,
            &[node],
        );
        bars.handle_visibility(visible(node));
        bars.tick(&mut doc, Instant::now());
        assert_eq!(doc.style(node, SKILL_WIDTH_PROPERTY), None);
    }
}
