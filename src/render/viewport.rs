//! Pan/zoom transform.
//!
//! A uniform scale plus translation mapping tree space to screen space.
//! Gesture handling stays in the host; it forwards wheel/pinch deltas as
//! zoom changes and drag deltas as pans.

use serde::{Deserialize, Serialize};

use crate::layout::Bounds;

/// Zoom clamp range. The default matches handheld hardware limits; hosts may
/// widen it for higher account tiers.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ZoomLimits {
    pub min: f32,
    pub max: f32,
}

impl ZoomLimits {
    pub fn clamp(&self, level: f32) -> f32 {
        level.clamp(self.min, self.max)
    }
}

impl Default for ZoomLimits {
    fn default() -> Self {
        Self { min: 0.1, max: 3.0 }
    }
}

/// Fraction of the remaining distance covered per animation step.
const ZOOM_EASE: f32 = 0.25;
/// Scale delta under which an animation snaps to its target.
const ZOOM_SNAP: f32 = 0.001;

#[derive(Debug, Clone, Copy)]
pub struct ViewTransform {
    pub scale: f32,
    pub offset_x: f32,
    pub offset_y: f32,
    limits: ZoomLimits,
    zoom_target: Option<f32>,
}

impl ViewTransform {
    pub fn new(limits: ZoomLimits) -> Self {
        Self {
            scale: limits.clamp(1.0),
            offset_x: 0.0,
            offset_y: 0.0,
            limits,
            zoom_target: None,
        }
    }

    pub fn limits(&self) -> ZoomLimits {
        self.limits
    }

    /// Tree space -> screen space.
    pub fn to_screen(&self, x: f32, y: f32) -> (f32, f32) {
        (x * self.scale + self.offset_x, y * self.scale + self.offset_y)
    }

    /// Screen space -> tree space (inverse transform).
    pub fn to_tree(&self, sx: f32, sy: f32) -> (f32, f32) {
        ((sx - self.offset_x) / self.scale, (sy - self.offset_y) / self.scale)
    }

    /// Set the zoom level, clamped to the configured range. With `animate`
    /// the change is eased over subsequent [`step_animation`] calls; without
    /// it the scale snaps immediately.
    ///
    /// [`step_animation`]: Self::step_animation
    pub fn set_zoom(&mut self, level: f32, animate: bool) {
        let target = self.limits.clamp(level);
        if animate {
            self.zoom_target = Some(target);
        } else {
            self.zoom_target = None;
            self.scale = target;
        }
    }

    pub fn zoom_in(&mut self) {
        let base = self.zoom_target.unwrap_or(self.scale);
        self.set_zoom(base * 1.2, true);
    }

    pub fn zoom_out(&mut self) {
        let base = self.zoom_target.unwrap_or(self.scale);
        self.set_zoom(base / 1.2, true);
    }

    /// Advance the zoom animation one frame. Returns true while still
    /// animating so the host keeps scheduling redraws.
    pub fn step_animation(&mut self) -> bool {
        let Some(target) = self.zoom_target else {
            return false;
        };
        let delta = target - self.scale;
        if delta.abs() < ZOOM_SNAP {
            self.scale = target;
            self.zoom_target = None;
            return false;
        }
        self.scale += delta * ZOOM_EASE;
        true
    }

    pub fn pan(&mut self, dx: f32, dy: f32) {
        self.offset_x += dx;
        self.offset_y += dy;
    }

    /// Translate so the bounds centre lands on the viewport centre, keeping
    /// the current scale.
    pub fn center_on(&mut self, bounds: Bounds, viewport_width: f32, viewport_height: f32) {
        let (cx, cy) = bounds.center();
        self.offset_x = viewport_width / 2.0 - cx * self.scale;
        self.offset_y = viewport_height / 2.0 - cy * self.scale;
    }

    /// Scale and translate so the whole bounds fits the viewport with some
    /// breathing room. The fitted scale still respects the zoom limits.
    pub fn fit_to_view(&mut self, bounds: Bounds, viewport_width: f32, viewport_height: f32) {
        if bounds.width() <= 0.0 || bounds.height() <= 0.0 {
            return;
        }
        let fit = (viewport_width / bounds.width())
            .min(viewport_height / bounds.height())
            * 0.9;
        self.zoom_target = None;
        self.scale = self.limits.clamp(fit);
        self.center_on(bounds, viewport_width, viewport_height);
    }
}

impl Default for ViewTransform {
    fn default() -> Self {
        Self::new(ZoomLimits::default())
    }
}
