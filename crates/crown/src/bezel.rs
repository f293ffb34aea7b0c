//! Virtual bezel: a rotary input made out of touches along the screen edge.
//!
//! A gesture only counts when it starts in the outer ring of the screen. Once
//! captured, the finger may drift inward down to the sticky radius before the
//! gesture lets go, and the angle swept around the centre is quantized into
//! detents.

use crate::detent::DetentQuantizer;
use crate::geom::{Point, Size};
use crate::router::{PointerEvent, PointerId, PointerPhase};
use serde::{Deserialize, Serialize};
use std::f64::consts::{PI, TAU};

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct BezelConfig {
    pub enabled: bool,
    /// Thickness of the activation ring, as a fraction of the screen radius.
    pub edge_threshold_fraction: f64,
    /// How far inward a captured finger may drift, as a fraction of the radius.
    pub sticky_inner_fraction: f64,
    pub detent_degrees: f64,
}

impl Default for BezelConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            edge_threshold_fraction: 0.30,
            sticky_inner_fraction: 0.60,
            detent_degrees: 15.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BezelGeometry {
    pub center: Point,
    pub max_radius: f64,
    pub activation_radius: f64,
    pub sticky_radius: f64,
}

impl BezelGeometry {
    pub fn new(size: Size, config: &BezelConfig) -> Self {
        let max_radius = size.inner_radius();
        Self {
            center: size.center(),
            max_radius,
            activation_radius: max_radius * (1.0 - config.edge_threshold_fraction),
            sticky_radius: max_radius * config.sticky_inner_fraction,
        }
    }

    pub fn radius_of(&self, p: Point) -> f64 {
        (p - self.center).length()
    }

    pub fn accepts(&self, down: Point) -> bool {
        self.radius_of(down) >= self.activation_radius
    }
}

/// Shortest signed difference between two angles, in `[-PI, PI]`.
pub fn wrap_angle_delta(cur: f64, prev: f64) -> f64 {
    let mut d = cur - prev;
    if d > PI {
        d -= TAU;
    }
    if d < -PI {
        d += TAU;
    }
    d
}

/// Follows a pointer around a centre and reports unwrapped angle changes.
#[derive(Debug, Clone)]
pub struct AngleTracker {
    center: Point,
    prev_angle: f64,
}

impl AngleTracker {
    pub fn new(center: Point, start: Point) -> Self {
        Self {
            center,
            prev_angle: start.angle_from(center),
        }
    }

    pub fn advance(&mut self, pos: Point) -> f64 {
        let cur = pos.angle_from(self.center);
        let diff = wrap_angle_delta(cur, self.prev_angle);
        self.prev_angle = cur;
        diff
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BezelEvent {
    Captured,
    Detents(i32),
    Released,
}

#[derive(Debug)]
struct AngularGesture {
    pointer: PointerId,
    tracker: AngleTracker,
    quantizer: DetentQuantizer,
}

#[derive(Debug)]
pub struct VirtualBezel {
    config: BezelConfig,
    geometry: BezelGeometry,
    gesture: Option<AngularGesture>,
}

impl VirtualBezel {
    pub fn new(config: BezelConfig, size: Size) -> Self {
        let geometry = BezelGeometry::new(size, &config);
        Self {
            config,
            geometry,
            gesture: None,
        }
    }

    pub fn config(&self) -> &BezelConfig {
        &self.config
    }

    pub fn geometry(&self) -> &BezelGeometry {
        &self.geometry
    }

    pub fn is_captured(&self) -> bool {
        self.gesture.is_some()
    }

    /// Takes effect from the next gesture on; a captured gesture keeps its
    /// detent size.
    pub fn reconfigure(&mut self, config: BezelConfig) {
        self.geometry = BezelGeometry::new(self.size_hint(), &config);
        self.config = config;
    }

    pub fn resize(&mut self, size: Size) {
        self.geometry = BezelGeometry::new(size, &self.config);
    }

    fn size_hint(&self) -> Size {
        Size::new(self.geometry.center.x * 2.0, self.geometry.center.y * 2.0)
    }

    pub fn handle(&mut self, event: &PointerEvent) -> Option<BezelEvent> {
        match event.phase {
            PointerPhase::Down => self.pointer_down(event.pointer, event.position),
            PointerPhase::Move => self.pointer_move(event.pointer, event.position),
            PointerPhase::Up => self.pointer_up(event.pointer),
        }
    }

    pub fn pointer_down(&mut self, pointer: PointerId, pos: Point) -> Option<BezelEvent> {
        if !self.config.enabled || self.gesture.is_some() {
            return None;
        }
        if !self.geometry.accepts(pos) {
            return None;
        }

        log::debug!(
            "bezel captured at r={:.1} (activation {:.1})",
            self.geometry.radius_of(pos),
            self.geometry.activation_radius
        );
        self.gesture = Some(AngularGesture {
            pointer,
            tracker: AngleTracker::new(self.geometry.center, pos),
            quantizer: DetentQuantizer::new(self.config.detent_degrees),
        });
        Some(BezelEvent::Captured)
    }

    pub fn pointer_move(&mut self, pointer: PointerId, pos: Point) -> Option<BezelEvent> {
        let gesture = self.gesture.as_mut().filter(|g| g.pointer == pointer)?;

        if self.geometry.radius_of(pos) < self.geometry.sticky_radius {
            log::debug!("bezel released: drifted inside sticky radius");
            self.gesture = None;
            return Some(BezelEvent::Released);
        }

        let diff = gesture.tracker.advance(pos);
        match gesture.quantizer.feed(diff) {
            0 => None,
            steps => Some(BezelEvent::Detents(steps)),
        }
    }

    pub fn pointer_up(&mut self, pointer: PointerId) -> Option<BezelEvent> {
        self.gesture
            .take_if(|g| g.pointer == pointer)
            .map(|_| BezelEvent::Released)
    }

    /// Drops a captured gesture without waiting for its pointer to lift.
    pub fn cancel(&mut self) -> Option<BezelEvent> {
        self.gesture.take().map(|_| BezelEvent::Released)
    }
}
