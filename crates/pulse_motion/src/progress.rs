//! Progress-driven cross-fade
//!
//! Maps the scroll position of a bounded section to a progress ratio in
//! [0, 1] and drives a two-layer cross-fade: layer A fades out as layer B
//! fades in, opacities always summing to 1. Scroll events only mark the
//! transition dirty; geometry is re-read at most once per frame.

use pulse_core::{map_range, Throttler};
use pulse_platform::{DocumentSurface, NodeId, SurfaceError};
use std::time::{Duration, Instant};

/// Normalized scroll progress through a section
///
/// `top` is the section's viewport-relative top edge, `height` its full
/// height. The ratio is 0 until the section reaches the viewport top,
/// then scrubs to 1 as the section scrolls through, saturating once the
/// bottom edge passes the viewport top.
pub fn section_progress(top: f32, height: f32, viewport_height: f32) -> f32 {
    let bottom = top + height;
    if bottom < 0.0 {
        return 1.0;
    }
    if top > 0.0 {
        return 0.0;
    }
    let scrollable = height - viewport_height;
    if scrollable <= 0.0 {
        // Section shorter than the viewport: nothing to scrub through
        return 1.0;
    }
    (top.abs() / scrollable).clamp(0.0, 1.0)
}

/// A scroll-scrubbed cross-fade between two layers inside a section
pub struct CrossFade {
    section: NodeId,
    layer_out: NodeId,
    layer_in: NodeId,
    dirty: bool,
    progress: f32,
}

impl CrossFade {
    pub fn new(section: NodeId, layer_out: NodeId, layer_in: NodeId) -> Self {
        Self {
            section,
            layer_out,
            layer_in,
            // Take an initial reading on the first frame
            dirty: true,
            progress: 0.0,
        }
    }

    /// Note a scroll; the recompute is deferred to the next frame
    pub fn on_scroll(&mut self) {
        self.dirty = true;
    }

    /// Recompute and apply opacities if a scroll occurred since last frame
    pub fn tick(&mut self, surface: &mut dyn DocumentSurface) -> pulse_platform::Result<()> {
        if !self.dirty {
            return Ok(());
        }
        self.dirty = false;

        let rect = surface
            .bounds(self.section)
            .ok_or_else(|| SurfaceError::MissingTarget("cross-fade section".into()))?;
        self.progress = section_progress(rect.top(), rect.height, surface.viewport().height);

        let fade_in = self.progress.clamp(0.0, 1.0);
        let fade_out = 1.0 - fade_in;
        surface.set_style(self.layer_out, "opacity", fade_out);
        surface.set_style(self.layer_in, "opacity", fade_in);
        Ok(())
    }

    /// Last computed progress ratio
    pub fn progress(&self) -> f32 {
        self.progress
    }
}

/// Scroll-intensity pulse on a backdrop layer
///
/// Maps overall page scroll progress into an opacity band, so the layer
/// glows brighter the further down the page the visitor is. Updates are
/// throttled; scroll streams are far denser than the effect needs.
pub struct EnergyField {
    target: NodeId,
    throttler: Throttler,
    min_opacity: f32,
    max_opacity: f32,
}

impl EnergyField {
    pub fn new(target: NodeId) -> Self {
        Self {
            target,
            throttler: Throttler::new(Duration::from_millis(50)),
            min_opacity: 0.3,
            max_opacity: 0.8,
        }
    }

    /// Recompute intensity from the current scroll position
    pub fn on_scroll(&mut self, surface: &mut dyn DocumentSurface, now: Instant) {
        if !self.throttler.allow(now) {
            return;
        }
        let scrollable = surface.document_height() - surface.viewport().height;
        let progress = if scrollable <= 0.0 {
            0.0
        } else {
            (surface.scroll_y() / scrollable).clamp(0.0, 1.0)
        };
        let intensity = map_range(progress, 0.0, 1.0, self.min_opacity, self.max_opacity);
        surface.set_style(self.target, "opacity", intensity);
    }
}
