//! Page composition root
//!
//! `Page` builds every motion component explicitly from the document's
//! class-marked nodes, owns them for its whole lifetime, routes host
//! events to them, and tears them all down on unload. There is no global
//! registration; dropping the page cancels everything it scheduled.
//!
//! Component failures never propagate to the host: a missing target node
//! disables that one component with a log line and the rest of the page
//! keeps running.

use crate::counter::{CounterConfig, CounterSet, SkillBarConfig, SkillBarSet};
use crate::follower::{FollowerConfig, PointerFollower};
use crate::loading::{LoadingConfig, LoadingScreen};
use crate::progress::{CrossFade, EnergyField};
use crate::reveal::{RevealConfig, ScrollReveal};
use crate::scheduler::MotionScheduler;
use crate::typing::{TypingConfig, TypingEffect};
use pulse_core::{Debouncer, EventDispatcher};
use pulse_platform::{
    Capabilities, ControlFlow, DocumentSurface, Event, InputEvent, LifecycleEvent, NodeId,
};
use std::time::{Duration, Instant};

/// Emitted once per node when its reveal class is applied
pub const EVENT_ELEMENT_ANIMATED: &str = "element-animated";

/// Emitted when the page receives its ready lifecycle event
pub const EVENT_PAGE_READY: &str = "page-ready";

/// Class toggled on the navbar past the scroll threshold
pub const NAVBAR_SCROLLED_CLASS: &str = "scrolled";

const NAVBAR_SCROLL_THRESHOLD: f32 = 50.0;

/// Quiet period before resize-driven layout re-reads
const RESIZE_DEBOUNCE: Duration = Duration::from_millis(200);

/// Detail payload for page-level custom events
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct EventDetail {
    /// The node concerned, when the event is about one
    pub node: Option<NodeId>,
}

/// The page and every motion component it owns
pub struct Page {
    scheduler: MotionScheduler,
    events: EventDispatcher<EventDetail>,
    reveal: Option<ScrollReveal>,
    fade: Option<CrossFade>,
    typing: Option<TypingEffect>,
    counters: Option<CounterSet>,
    skill_bars: Option<SkillBarSet>,
    follower: Option<PointerFollower>,
    loading: Option<LoadingScreen>,
    energy: Option<EnergyField>,
    navbar: Option<NodeId>,
    resize_debounce: Debouncer,
    torn_down: bool,
}

impl Page {
    /// Build every component present in the document
    ///
    /// Components whose target nodes are absent are skipped, not errors:
    /// the page works on documents carrying any subset of the markup.
    pub fn new(caps: Capabilities, surface: &mut dyn DocumentSurface) -> Self {
        let scheduler = MotionScheduler::new();

        let mut reveal_targets = surface.nodes_with_class("animate-on-scroll");
        reveal_targets.extend(surface.nodes_with_class("animate-fade-up"));
        let reveal = if reveal_targets.is_empty() {
            tracing::debug!("no reveal targets, scroll reveal disabled");
            None
        } else {
            Some(ScrollReveal::new(
                caps,
                RevealConfig::default(),
                &reveal_targets,
            ))
        };

        let fade = build_cross_fade(surface);
        let typing = build_typing(surface);

        let counter_targets = surface.nodes_with_class("stat-number");
        let counters = (!counter_targets.is_empty()).then(|| {
            CounterSet::new(
                caps,
                CounterConfig::default(),
                scheduler.handle(),
                surface,
                &counter_targets,
            )
        });

        let bar_targets = surface.nodes_with_class("skill-bar");
        let skill_bars = (!bar_targets.is_empty()).then(|| {
            SkillBarSet::new(
                caps,
                SkillBarConfig::default(),
                scheduler.handle(),
                surface,
                &bar_targets,
            )
        });

        // Reduced motion snaps the dot to the pointer instead of trailing
        let follower_config = if caps.motion_preference().is_reduced() {
            FollowerConfig {
                smoothing: 1.0,
                ..FollowerConfig::default()
            }
        } else {
            FollowerConfig::default()
        };
        let follower = Some(PointerFollower::new(follower_config, surface));

        let navbar = surface.nodes_with_class("navbar").first().copied();
        if navbar.is_none() {
            tracing::debug!("no navbar node, scroll state toggle disabled");
        }

        let loading = surface
            .nodes_with_class("loading-screen")
            .first()
            .copied()
            .map(|screen| {
                let text = surface.nodes_with_class("loading-text").first().copied();
                LoadingScreen::new(screen, text, LoadingConfig::default())
            });

        // The backdrop pulse is pure decoration; reduced motion drops it
        let energy = if caps.motion_preference().is_reduced() {
            None
        } else {
            surface
                .nodes_with_class("energy-field")
                .first()
                .copied()
                .map(EnergyField::new)
        };

        Self {
            scheduler,
            events: EventDispatcher::new(),
            reveal,
            fade,
            typing,
            counters,
            skill_bars,
            follower,
            loading,
            energy,
            navbar,
            resize_debounce: Debouncer::new(RESIZE_DEBOUNCE),
            torn_down: false,
        }
    }

    /// Custom-event dispatcher for host listeners
    pub fn events_mut(&mut self) -> &mut EventDispatcher<EventDetail> {
        &mut self.events
    }

    /// Whether any animation still wants frames
    pub fn has_active_animations(&self) -> bool {
        self.scheduler.has_active()
    }

    /// Route one host event through every component
    pub fn handle_event(
        &mut self,
        event: &Event,
        surface: &mut dyn DocumentSurface,
        now: Instant,
    ) -> ControlFlow {
        if self.torn_down {
            return ControlFlow::Exit;
        }
        match event {
            Event::Frame { dt_ms } => self.frame(*dt_ms, surface, now),
            Event::Input(input) => self.input(*input, surface, now),
            Event::Visibility(record) => {
                if let Some(reveal) = &mut self.reveal {
                    reveal.handle_visibility(*record);
                }
                if let Some(counters) = &mut self.counters {
                    counters.handle_visibility(*record);
                }
                if let Some(bars) = &mut self.skill_bars {
                    bars.handle_visibility(*record);
                }
            }
            Event::Lifecycle(LifecycleEvent::Ready) => {
                // With a loading screen, readiness waits for its fade-out
                match &mut self.loading {
                    Some(loading) if !loading.is_hidden() => loading.complete(surface),
                    _ => self
                        .events
                        .emit(EVENT_PAGE_READY, &EventDetail::default()),
                }
            }
            Event::Lifecycle(LifecycleEvent::Unload) => {
                self.teardown(surface);
                return ControlFlow::Exit;
            }
        }
        ControlFlow::Continue
    }

    fn frame(&mut self, dt_ms: f32, surface: &mut dyn DocumentSurface, now: Instant) {
        // Tweens advance before components read their values
        self.scheduler.tick(dt_ms);

        // Resize bursts settle before geometry is re-read
        if self.resize_debounce.poll(now) {
            if let Some(fade) = &mut self.fade {
                fade.on_scroll();
            }
        }

        if let Some(loading) = &mut self.loading {
            if loading.tick(dt_ms, surface) {
                self.events
                    .emit(EVENT_PAGE_READY, &EventDetail::default());
            }
        }

        if let Some(reveal) = &mut self.reveal {
            for node in reveal.tick(dt_ms, surface, now) {
                self.events
                    .emit(EVENT_ELEMENT_ANIMATED, &EventDetail { node: Some(node) });
            }
        }
        if let Some(fade) = &mut self.fade {
            // Swallowed: a vanished section disables the effect, not the page
            if let Err(error) = fade.tick(surface) {
                tracing::debug!(%error, "cross-fade skipped this frame");
            }
        }
        if let Some(typing) = &mut self.typing {
            typing.tick(dt_ms, surface);
        }
        if let Some(counters) = &mut self.counters {
            counters.tick(surface, now);
        }
        if let Some(bars) = &mut self.skill_bars {
            bars.tick(surface, now);
        }
        if let Some(follower) = &mut self.follower {
            follower.tick(dt_ms, surface);
        }
    }

    fn input(&mut self, input: InputEvent, surface: &mut dyn DocumentSurface, now: Instant) {
        match input {
            InputEvent::Scroll { offset_y } => {
                if let Some(fade) = &mut self.fade {
                    fade.on_scroll();
                }
                if let Some(energy) = &mut self.energy {
                    energy.on_scroll(surface, now);
                }
                self.update_navbar(offset_y, surface);
            }
            InputEvent::Resized { .. } => {
                self.resize_debounce.trigger(now);
            }
            InputEvent::Pointer(pointer) => {
                if let Some(follower) = &mut self.follower {
                    follower.handle_pointer(pointer, surface);
                }
            }
        }
    }

    /// The one intentionally reversible class write in the system
    fn update_navbar(&mut self, offset_y: f32, surface: &mut dyn DocumentSurface) {
        let Some(navbar) = self.navbar else {
            return;
        };
        if offset_y > NAVBAR_SCROLL_THRESHOLD {
            surface.add_class(navbar, NAVBAR_SCROLLED_CLASS);
        } else {
            surface.remove_class(navbar, NAVBAR_SCROLLED_CLASS);
        }
    }

    /// Release every subscription, timer, and spawned node
    pub fn teardown(&mut self, surface: &mut dyn DocumentSurface) {
        if self.torn_down {
            return;
        }
        self.torn_down = true;
        if let Some(reveal) = &mut self.reveal {
            reveal.teardown();
        }
        if let Some(counters) = &mut self.counters {
            counters.teardown();
        }
        if let Some(bars) = &mut self.skill_bars {
            bars.teardown();
        }
        if let Some(follower) = &mut self.follower {
            follower.teardown(surface);
        }
        self.typing = None;
        self.fade = None;
        self.loading = None;
        self.energy = None;
        self.resize_debounce.cancel();
        self.events.clear();
        tracing::debug!("page torn down");
    }
}

fn build_cross_fade(surface: &dyn DocumentSurface) -> Option<CrossFade> {
    let section = surface.nodes_with_class("about").first().copied();
    let layer_out = surface.nodes_with_class("profile-human").first().copied();
    let layer_in = surface.nodes_with_class("profile-robot").first().copied();
    match (section, layer_out, layer_in) {
        (Some(section), Some(out), Some(into)) => Some(CrossFade::new(section, out, into)),
        _ => {
            tracing::debug!("cross-fade markup incomplete, effect disabled");
            None
        }
    }
}

fn build_typing(surface: &dyn DocumentSurface) -> Option<TypingEffect> {
    let target = surface.nodes_with_class("typed-text").first().copied()?;
    let strings: Vec<String> = surface
        .data_attr(target, "typed-items")
        .map(|raw| {
            raw.split(',')
                .map(|item| item.trim().to_string())
                .filter(|item| !item.is_empty())
                .collect()
        })
        .unwrap_or_default();
    if strings.is_empty() {
        tracing::debug!("typed-text node has no items, typing effect disabled");
        return None;
    }
    Some(TypingEffect::new(target, strings, TypingConfig::default()))
}
