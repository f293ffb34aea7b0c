use crate::geom::Point;
use crate::spring::{SpringSpec, SpringValue};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ZoomConfig {
    /// Ascending scale factors the rotary and double tap step through.
    pub levels: Vec<f64>,
    pub min_scale: f64,
    pub max_scale: f64,
    pub initial_index: usize,
}

impl Default for ZoomConfig {
    fn default() -> Self {
        Self {
            levels: vec![0.5, 0.7, 1.0, 1.4, 1.9, 2.5],
            min_scale: 0.4,
            max_scale: 2.5,
            initial_index: 2,
        }
    }
}

impl ZoomConfig {
    fn level(&self, index: usize) -> f64 {
        self.levels.get(index).copied().unwrap_or(1.0)
    }

    fn last_index(&self) -> usize {
        self.levels.len().saturating_sub(1)
    }

    fn nearest_index(&self, scale: f64) -> usize {
        self.levels
            .iter()
            .enumerate()
            .min_by(|(_, a), (_, b)| (*a - scale).abs().total_cmp(&(*b - scale).abs()))
            .map(|(i, _)| i)
            .unwrap_or(0)
    }
}

/// Pan and zoom of the bubble canvas. Content is scaled about the surface
/// centre, then translated by `pan`.
#[derive(Debug, Clone)]
pub struct Viewport {
    config: ZoomConfig,
    center: Point,
    pan: Point,
    scale: SpringValue,
    zoom_index: usize,
}

impl Viewport {
    pub fn new(config: ZoomConfig, center: Point) -> Self {
        let zoom_index = config.initial_index.min(config.last_index());
        let scale = SpringValue::new(config.level(zoom_index), SpringSpec::medium_bouncy_low());
        Self {
            config,
            center,
            pan: Point::ZERO,
            scale,
            zoom_index,
        }
    }

    pub fn reconfigure(&mut self, config: ZoomConfig) {
        self.zoom_index = self.zoom_index.min(config.last_index());
        self.scale.animate_to(config.level(self.zoom_index));
        self.config = config;
    }

    pub fn set_center(&mut self, center: Point) {
        self.center = center;
    }

    pub fn center(&self) -> Point {
        self.center
    }

    pub fn pan(&self) -> Point {
        self.pan
    }

    pub fn scale(&self) -> f64 {
        self.scale.value()
    }

    pub fn zoom_index(&self) -> usize {
        self.zoom_index
    }

    pub fn level_count(&self) -> usize {
        self.config.levels.len()
    }

    pub fn screen_to_content(&self, p: Point) -> Point {
        let s = self.scale.value();
        Point::new(
            (p.x - self.pan.x - self.center.x) / s + self.center.x,
            (p.y - self.pan.y - self.center.y) / s + self.center.y,
        )
    }

    pub fn content_to_screen(&self, p: Point) -> Point {
        let s = self.scale.value();
        Point::new(
            (p.x - self.center.x) * s + self.center.x + self.pan.x,
            (p.y - self.center.y) * s + self.center.y + self.pan.y,
        )
    }

    pub fn zoom_to_index(&mut self, index: usize) {
        let index = index.min(self.config.last_index());
        if index == self.zoom_index && self.scale.target() == self.config.level(index) {
            return;
        }
        self.zoom_index = index;
        self.scale.animate_to(self.config.level(index));
    }

    pub fn pan_by(&mut self, delta: Point) {
        self.pan += delta;
    }

    /// Keeps the content under `anchor` in place while the scale changes.
    fn reanchor(&mut self, anchor: Point, scale_change: f64) {
        let a = anchor - self.center;
        self.pan = Point::new(
            self.pan.x * scale_change + a.x * (1.0 - scale_change),
            self.pan.y * scale_change + a.y * (1.0 - scale_change),
        );
    }

    /// Two finger transform: pan by `pan`, then zoom by `zoom` about `centroid`.
    /// Returns the new scale.
    pub fn pinch(&mut self, centroid: Point, pan: Point, zoom: f64) -> f64 {
        self.pan_by(pan);
        if zoom != 1.0 && zoom.is_finite() && zoom > 0.0 {
            let old = self.scale.value();
            let new = (old * zoom).clamp(self.config.min_scale, self.config.max_scale);
            self.reanchor(centroid, new / old);
            self.scale.snap_to(new);
            self.zoom_index = self.config.nearest_index(new);
        }
        self.scale.value()
    }

    /// Steps to the next zoom level, wrapping to the smallest after the largest.
    pub fn cycle_zoom(&mut self, tap: Point) -> usize {
        let count = self.config.levels.len();
        if count == 0 {
            return 0;
        }
        let old = self.scale.value();
        self.zoom_index = (self.zoom_index + 1) % count;
        let new = self.config.level(self.zoom_index);
        self.reanchor(tap, new / old);
        self.scale.animate_to(new);
        self.zoom_index
    }

    pub fn is_settled(&self) -> bool {
        self.scale.is_settled()
    }

    pub fn tick(&mut self, dt: f64) -> bool {
        self.scale.step(dt)
    }
}
