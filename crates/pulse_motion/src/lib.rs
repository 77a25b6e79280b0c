//! Pulse Motion Engine
//!
//! Scroll-driven page motion: reveals, cross-fades, typing effects,
//! counters, and a pointer follower, composed by a single page root.
//!
//! # Features
//!
//! - **Scroll Reveal**: one-shot class application on first visibility,
//!   with per-sibling stagger and an observer/polling capability split
//! - **Progress Cross-Fade**: scroll position scrubbed into a two-layer
//!   opacity fade inside a bounded section
//! - **Typing Effect**: type/hold/delete cycle over a string list
//! - **Counters & Skill Bars**: eased 0-to-target animations triggered
//!   at half visibility, once
//! - **Pointer Follower**: exponentially smoothed trailing dot with
//!   click ripples
//! - **Loading Screen**: status-message cycle and completion fade that
//!   gates page readiness
//! - **Energy Field**: page-scroll intensity mapped into a backdrop
//!   opacity band
//! - **Scheduler**: frame-driven tween registry with drop-deregistration
//! - **Page**: composition root owning every component, with
//!   deterministic teardown and custom-event dispatch
//!
//! The host delivers [`pulse_platform::Event`]s; the engine only reads
//! layout and writes visual state through a
//! [`pulse_platform::DocumentSurface`].

pub mod counter;
pub mod follower;
pub mod form;
pub mod loading;
pub mod page;
pub mod progress;
pub mod reveal;
pub mod scheduler;
pub mod tween;
pub mod typing;
pub mod visibility;

pub use counter::{CounterConfig, CounterSet, SkillBarConfig, SkillBarSet, SKILL_WIDTH_PROPERTY};
pub use follower::{FollowerConfig, PointerFollower, FOLLOWER_CLASS, RIPPLE_CLASS};
pub use form::{ContactForm, Feedback, FormError};
pub use page::{
    EventDetail, Page, EVENT_ELEMENT_ANIMATED, EVENT_PAGE_READY, NAVBAR_SCROLLED_CLASS,
};
pub use loading::{LoadingConfig, LoadingScreen, HIDDEN_CLASS};
pub use progress::{section_progress, CrossFade, EnergyField};
pub use reveal::{RevealConfig, ScrollReveal, REVEALED_CLASS};
pub use scheduler::{AnimatedTween, MotionScheduler, SchedulerHandle, TweenId};
pub use tween::Tween;
pub use typing::{TypingConfig, TypingEffect};
pub use visibility::{
    is_in_view, watcher_for, ObserverWatcher, PollingWatcher, VisibilityWatcher,
};
