//! Classifies touches on the bubble surface.
//!
//! A press that lands on a bubble becomes a tap, a long press or a drag of
//! that bubble. A press that lands on empty canvas pans it, and two quick taps
//! on the canvas cycle the zoom level. Pinches arrive separately as transform
//! events and are ignored while a bubble is being dragged.

use crate::geom::Point;
use crate::item::ItemKey;
use crate::physics::BubbleEngine;
use crate::viewport::Viewport;
use serde::{Deserialize, Serialize};
use serde_with::DeserializeFromStr;
use strum::{Display as StrumDisplay, EnumIter, EnumString};

pub type PointerId = u32;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerPhase {
    Down,
    Move,
    Up,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    pub pointer: PointerId,
    pub phase: PointerPhase,
    pub position: Point,
    pub time_ms: u64,
}

impl PointerEvent {
    pub fn new(pointer: PointerId, phase: PointerPhase, position: Point, time_ms: u64) -> Self {
        Self {
            pointer,
            phase,
            position,
            time_ms,
        }
    }

    pub fn down(position: Point, time_ms: u64) -> Self {
        Self::new(0, PointerPhase::Down, position, time_ms)
    }

    pub fn moved(position: Point, time_ms: u64) -> Self {
        Self::new(0, PointerPhase::Move, position, time_ms)
    }

    pub fn up(position: Point, time_ms: u64) -> Self {
        Self::new(0, PointerPhase::Up, position, time_ms)
    }
}

/// Incremental two finger transform, as reported by the platform.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransformEvent {
    pub centroid: Point,
    pub pan: Point,
    /// Scale change since the previous transform event.
    pub zoom: f64,
}

/// Which gesture opens an item's secondary action.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    DeserializeFromStr,
    EnumString,
    EnumIter,
    StrumDisplay,
)]
#[strum(ascii_case_insensitive)]
#[serde(rename_all = "kebab-case")]
pub enum OptionsGesture {
    #[default]
    #[strum(serialize = "LongPress", serialize = "long-press", serialize = "long")]
    LongPress,
    #[strum(serialize = "DoubleTap", serialize = "double-tap", serialize = "double")]
    DoubleTap,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct RouterConfig {
    pub touch_slop: f64,
    pub long_press_timeout_ms: u64,
    pub double_tap_timeout_ms: u64,
    pub options_gesture: OptionsGesture,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            touch_slop: 8.0,
            long_press_timeout_ms: 400,
            double_tap_timeout_ms: 300,
            options_gesture: OptionsGesture::LongPress,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Press {
    Pending,
    LongPressed,
    Dragging,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PressChange {
    LongPress,
    DragStart,
}

/// Slop and long-press bookkeeping for one pressed pointer.
#[derive(Debug, Clone)]
pub struct PressTracker {
    origin: Point,
    last: Point,
    down_ms: u64,
    long_pressed: bool,
    dragging: bool,
}

impl PressTracker {
    pub fn new(origin: Point, down_ms: u64) -> Self {
        Self {
            origin,
            last: origin,
            down_ms,
            long_pressed: false,
            dragging: false,
        }
    }

    pub fn state(&self) -> Press {
        if self.dragging {
            Press::Dragging
        } else if self.long_pressed {
            Press::LongPressed
        } else {
            Press::Pending
        }
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// Neither dragged nor long pressed: releasing now is a tap.
    pub fn is_tap(&self) -> bool {
        !self.dragging && !self.long_pressed
    }

    pub fn last(&self) -> Point {
        self.last
    }

    /// Feeds the latest position (or just the clock, with `None`).
    pub fn update(
        &mut self,
        position: Option<Point>,
        now_ms: u64,
        config: &RouterConfig,
    ) -> Option<PressChange> {
        if let Some(p) = position {
            self.last = p;
        }
        let moved = self.last.distance(self.origin);
        let elapsed = now_ms.saturating_sub(self.down_ms);

        if !self.long_pressed
            && !self.dragging
            && elapsed > config.long_press_timeout_ms
            && moved < config.touch_slop
        {
            self.long_pressed = true;
            return Some(PressChange::LongPress);
        }
        if !self.dragging && moved > config.touch_slop {
            self.dragging = true;
            return Some(PressChange::DragStart);
        }
        None
    }
}

/// Remembers the last tap so a second one inside the window reads as a double tap.
#[derive(Debug, Clone)]
pub struct TapHistory<K> {
    last: Option<(K, u64)>,
}

impl<K> Default for TapHistory<K> {
    fn default() -> Self {
        Self { last: None }
    }
}

impl<K: PartialEq> TapHistory<K> {
    /// Returns true when this tap completes a double tap.
    pub fn register(&mut self, key: K, now_ms: u64, window_ms: u64) -> bool {
        let double = self
            .last
            .as_ref()
            .is_some_and(|(k, t)| *k == key && now_ms.saturating_sub(*t) < window_ms);
        self.last = if double { None } else { Some((key, now_ms)) };
        double
    }

    pub fn clear(&mut self) {
        self.last = None;
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum GestureOutcome {
    Primary(ItemKey),
    Secondary(ItemKey),
    DragStarted(ItemKey),
    DragEnded(ItemKey),
    Pan(Point),
    Zoom(f64),
    ZoomCycled(usize),
}

#[derive(Debug)]
enum Active {
    Node {
        pointer: u32,
        key: ItemKey,
        press: PressTracker,
        anchor: Point,
    },
    Background {
        pointer: u32,
        press: PressTracker,
    },
}

#[derive(Debug, Default)]
pub struct GestureRouter {
    config: RouterConfig,
    active: Option<Active>,
    dragged: Option<ItemKey>,
    /// Tap waiting out the double-tap window before it counts as primary.
    pending_tap: Option<(ItemKey, u64)>,
    background_taps: TapHistory<()>,
}

impl GestureRouter {
    pub fn new(config: RouterConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub fn reconfigure(&mut self, config: RouterConfig) {
        self.config = config;
    }

    pub fn dragged(&self) -> Option<&ItemKey> {
        self.dragged.as_ref()
    }

    pub fn is_busy(&self) -> bool {
        self.active.is_some() || self.pending_tap.is_some()
    }

    pub fn pointer(
        &mut self,
        event: &PointerEvent,
        engine: &mut BubbleEngine,
        viewport: &mut Viewport,
    ) -> Vec<GestureOutcome> {
        match event.phase {
            PointerPhase::Down => self.down(event, engine, viewport),
            PointerPhase::Move => self.moved(event, engine, viewport),
            PointerPhase::Up => self.up(event, engine, viewport),
        }
    }

    /// Pinch or two finger pan on the canvas.
    pub fn transform(
        &mut self,
        event: &TransformEvent,
        viewport: &mut Viewport,
    ) -> Option<GestureOutcome> {
        if self.dragged.is_some() {
            return None;
        }
        // A second finger turns a background press into a pinch, never a tap.
        if let Some(Active::Background { press, .. }) = self.active.as_mut() {
            press.dragging = true;
        }
        let scale = viewport.pinch(event.centroid, event.pan, event.zoom);
        Some(GestureOutcome::Zoom(scale))
    }

    /// Clock-driven checks: long presses on a still finger and expiry of a
    /// deferred single tap.
    pub fn poll(&mut self, now_ms: u64) -> Vec<GestureOutcome> {
        let mut out = Vec::new();
        if let Some(Active::Node { key, press, .. }) = self.active.as_mut()
            && press.update(None, now_ms, &self.config) == Some(PressChange::LongPress)
            && self.config.options_gesture == OptionsGesture::LongPress
        {
            log::debug!("long press on {key}");
            out.push(GestureOutcome::Secondary(key.clone()));
        }
        if let Some((key, t)) = &self.pending_tap
            && now_ms.saturating_sub(*t) >= self.config.double_tap_timeout_ms
        {
            out.push(GestureOutcome::Primary(key.clone()));
            self.pending_tap = None;
        }
        out
    }

    /// Abandons whatever press is in flight, along with any deferred tap.
    /// A held bubble is released back to the simulation.
    pub fn cancel(&mut self, engine: &mut BubbleEngine) -> Vec<GestureOutcome> {
        let mut out = Vec::new();
        self.pending_tap = None;
        self.background_taps.clear();
        if let Some(Active::Node { key, press, .. }) = self.active.take()
            && press.is_dragging()
        {
            if let Some(id) = engine.id_of(&key) {
                engine.end_drag(id);
            }
            log::debug!("drag on {key} cancelled");
            out.push(GestureOutcome::DragEnded(key));
        }
        self.dragged = None;
        out
    }

    fn flush_pending_tap(&mut self, out: &mut Vec<GestureOutcome>) {
        if let Some((key, _)) = self.pending_tap.take() {
            out.push(GestureOutcome::Primary(key));
        }
    }

    fn down(
        &mut self,
        event: &PointerEvent,
        engine: &mut BubbleEngine,
        viewport: &mut Viewport,
    ) -> Vec<GestureOutcome> {
        let mut out = Vec::new();
        if self.active.is_some() {
            return out;
        }

        let content = viewport.screen_to_content(event.position);
        let hit = engine
            .hit_test(content, engine.node_radius())
            .and_then(|id| engine.node(id))
            .map(|node| (node.key.clone(), node.position - content));

        if self
            .pending_tap
            .as_ref()
            .is_some_and(|(pending, _)| hit.as_ref().is_none_or(|(k, _)| k != pending))
        {
            self.flush_pending_tap(&mut out);
        }

        let press = PressTracker::new(event.position, event.time_ms);
        self.active = Some(match hit {
            Some((key, anchor)) => {
                log::debug!("press on bubble {key}");
                Active::Node {
                    pointer: event.pointer,
                    key,
                    press,
                    anchor,
                }
            }
            None => Active::Background {
                pointer: event.pointer,
                press,
            },
        });
        out
    }

    fn moved(
        &mut self,
        event: &PointerEvent,
        engine: &mut BubbleEngine,
        viewport: &mut Viewport,
    ) -> Vec<GestureOutcome> {
        let mut out = Vec::new();
        match self.active.as_mut() {
            Some(Active::Node {
                pointer,
                key,
                press,
                anchor,
            }) if *pointer == event.pointer => {
                let content = viewport.screen_to_content(event.position);
                let Some(id) = engine.id_of(key) else {
                    return out;
                };
                match press.update(Some(event.position), event.time_ms, &self.config) {
                    Some(PressChange::LongPress)
                        if self.config.options_gesture == OptionsGesture::LongPress =>
                    {
                        out.push(GestureOutcome::Secondary(key.clone()));
                    }
                    Some(PressChange::DragStart) => {
                        if let Some(node) = engine.node(id) {
                            *anchor = node.position - content;
                        }
                        engine.begin_drag(id);
                        self.dragged = Some(key.clone());
                        log::debug!("dragging bubble {key}");
                        out.push(GestureOutcome::DragStarted(key.clone()));
                        if let Some((pending, _)) = self.pending_tap.take() {
                            out.insert(0, GestureOutcome::Primary(pending));
                        }
                    }
                    _ => {}
                }
                if press.is_dragging() {
                    engine.drag_to(id, content + *anchor);
                }
            }
            Some(Active::Background { pointer, press }) if *pointer == event.pointer => {
                if self.dragged.is_some() {
                    return out;
                }
                let previous = press.last();
                press.update(Some(event.position), event.time_ms, &self.config);
                if press.is_dragging() {
                    let delta = event.position - previous;
                    viewport.pan_by(delta);
                    out.push(GestureOutcome::Pan(delta));
                }
            }
            _ => {}
        }
        out
    }

    fn up(
        &mut self,
        event: &PointerEvent,
        engine: &mut BubbleEngine,
        viewport: &mut Viewport,
    ) -> Vec<GestureOutcome> {
        let mut out = Vec::new();
        let owns = match &self.active {
            Some(Active::Node { pointer, .. } | Active::Background { pointer, .. }) => {
                *pointer == event.pointer
            }
            None => false,
        };
        if !owns {
            return out;
        }

        match self.active.take() {
            Some(Active::Node { key, press, .. }) => {
                if press.is_dragging() {
                    if let Some(id) = engine.id_of(&key) {
                        engine.end_drag(id);
                    }
                    self.dragged = None;
                    out.push(GestureOutcome::DragEnded(key));
                } else if press.is_tap() {
                    self.tap_item(key, event.time_ms, &mut out);
                }
            }
            Some(Active::Background { mut press, .. }) => {
                press.update(Some(event.position), event.time_ms, &self.config);
                if press.is_tap()
                    && self.background_taps.register(
                        (),
                        event.time_ms,
                        self.config.double_tap_timeout_ms,
                    )
                {
                    let index = viewport.cycle_zoom(event.position);
                    log::debug!("background double tap, zoom level {index}");
                    out.push(GestureOutcome::ZoomCycled(index));
                }
            }
            None => {}
        }
        out
    }

    fn tap_item(&mut self, key: ItemKey, now_ms: u64, out: &mut Vec<GestureOutcome>) {
        match self.config.options_gesture {
            OptionsGesture::LongPress => out.push(GestureOutcome::Primary(key)),
            OptionsGesture::DoubleTap => match self.pending_tap.take() {
                Some((pending, t))
                    if pending == key
                        && now_ms.saturating_sub(t) < self.config.double_tap_timeout_ms =>
                {
                    out.push(GestureOutcome::Secondary(key));
                }
                stale => {
                    if let Some((pending, _)) = stale {
                        out.push(GestureOutcome::Primary(pending));
                    }
                    self.pending_tap = Some((key, now_ms));
                }
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::PhysicsConfig;
    use crate::viewport::ZoomConfig;

    const CENTER: Point = Point { x: 200.0, y: 200.0 };

    struct Harness {
        router: GestureRouter,
        engine: BubbleEngine,
        viewport: Viewport,
    }

    impl Harness {
        fn new(options_gesture: OptionsGesture) -> Self {
            let mut engine = BubbleEngine::new(PhysicsConfig::default(), 70.0);
            engine.sync_items(
                &[ItemKey::from("mail"), ItemKey::from("maps")],
                CENTER,
            );
            Self {
                router: GestureRouter::new(RouterConfig {
                    options_gesture,
                    ..RouterConfig::default()
                }),
                engine,
                viewport: Viewport::new(ZoomConfig::default(), CENTER),
            }
        }

        fn send(&mut self, event: PointerEvent) -> Vec<GestureOutcome> {
            self.router
                .pointer(&event, &mut self.engine, &mut self.viewport)
        }

        fn position_of(&self, key: &str) -> Point {
            let id = self.engine.id_of(&ItemKey::from(key)).unwrap();
            self.engine.node(id).unwrap().position
        }
    }

    #[test]
    fn test_options_gesture_deserialization() {
        let cases = vec![
            ("\"long-press\"", OptionsGesture::LongPress),
            ("\"LongPress\"", OptionsGesture::LongPress),
            ("\"double\"", OptionsGesture::DoubleTap),
            ("\"DOUBLE-TAP\"", OptionsGesture::DoubleTap),
        ];
        for (json, expected) in cases {
            let deserialized: OptionsGesture = serde_json::from_str(json).unwrap();
            assert_eq!(deserialized, expected);
        }
    }

    #[test]
    fn test_press_tracker_classification() {
        let config = RouterConfig::default();
        let mut press = PressTracker::new(Point::ZERO, 0);
        assert_eq!(press.update(Some(Point::new(3.0, 0.0)), 100, &config), None);
        assert_eq!(
            press.update(None, 401, &config),
            Some(PressChange::LongPress)
        );
        assert_eq!(press.state(), Press::LongPressed);
        assert_eq!(
            press.update(Some(Point::new(20.0, 0.0)), 450, &config),
            Some(PressChange::DragStart)
        );
        assert_eq!(press.state(), Press::Dragging);
    }

    #[test]
    fn test_tap_history_window() {
        let mut taps = TapHistory::default();
        assert!(!taps.register("a", 0, 300));
        assert!(taps.register("a", 200, 300));
        assert!(!taps.register("a", 250, 300));
        assert!(!taps.register("b", 300, 300));
        assert!(!taps.register("b", 700, 300));
    }

    #[test]
    fn test_tap_on_bubble_is_primary() {
        let mut h = Harness::new(OptionsGesture::LongPress);
        let at = h.position_of("mail");
        assert!(h.send(PointerEvent::down(at, 0)).is_empty());
        assert!(h.send(PointerEvent::moved(at + Point::new(2.0, 1.0), 50)).is_empty());
        assert_eq!(
            h.send(PointerEvent::up(at, 80)),
            vec![GestureOutcome::Primary(ItemKey::from("mail"))]
        );
    }

    #[test]
    fn test_long_press_fires_from_poll() {
        let mut h = Harness::new(OptionsGesture::LongPress);
        let at = h.position_of("maps");
        h.send(PointerEvent::down(at, 1000));
        assert!(h.router.poll(1200).is_empty());
        assert_eq!(
            h.router.poll(1401),
            vec![GestureOutcome::Secondary(ItemKey::from("maps"))]
        );
        assert!(h.router.poll(1500).is_empty());
        assert!(h.send(PointerEvent::up(at, 1600)).is_empty());
    }

    #[test]
    fn test_double_tap_mode_defers_primary() {
        let mut h = Harness::new(OptionsGesture::DoubleTap);
        let at = h.position_of("mail");
        let key = ItemKey::from("mail");

        h.send(PointerEvent::down(at, 0));
        assert!(h.send(PointerEvent::up(at, 50)).is_empty());
        h.send(PointerEvent::down(at, 150));
        assert_eq!(
            h.send(PointerEvent::up(at, 200)),
            vec![GestureOutcome::Secondary(key.clone())]
        );
        assert!(h.router.poll(1000).is_empty());

        h.send(PointerEvent::down(at, 2000));
        h.send(PointerEvent::up(at, 2050));
        assert!(h.router.poll(2200).is_empty());
        assert_eq!(h.router.poll(2350), vec![GestureOutcome::Primary(key)]);
    }

    #[test]
    fn test_double_tap_mode_ignores_long_press() {
        let mut h = Harness::new(OptionsGesture::DoubleTap);
        let at = h.position_of("mail");
        h.send(PointerEvent::down(at, 0));
        assert!(h.router.poll(900).is_empty());
        assert!(h.send(PointerEvent::up(at, 950)).is_empty());
    }

    #[test]
    fn test_drag_moves_only_the_pressed_bubble() {
        let mut h = Harness::new(OptionsGesture::LongPress);
        let start = h.position_of("mail");
        let other = h.position_of("maps");
        let key = ItemKey::from("mail");

        h.send(PointerEvent::down(start + Point::new(5.0, 0.0), 0));
        assert_eq!(
            h.send(PointerEvent::moved(start + Point::new(25.0, 0.0), 30)),
            vec![GestureOutcome::DragStarted(key.clone())]
        );
        assert_eq!(h.router.dragged(), Some(&key));
        for i in 1..=10 {
            let out = h.send(PointerEvent::moved(
                start + Point::new(25.0, 20.0 * i as f64),
                30 + i,
            ));
            assert!(out.is_empty());
        }
        let moved = h.position_of("mail");
        assert!((moved - (start + Point::new(0.0, 200.0))).length() < 1e-9);
        assert_eq!(h.position_of("maps"), other);

        assert_eq!(
            h.send(PointerEvent::up(start, 100)),
            vec![GestureOutcome::DragEnded(key)]
        );
        assert_eq!(h.router.dragged(), None);
        h.engine.tick();
        let id = h.engine.id_of(&ItemKey::from("mail")).unwrap();
        assert!(h.engine.node(id).unwrap().speed() > 0.0);
    }

    #[test]
    fn test_cancel_releases_held_bubble() {
        let mut h = Harness::new(OptionsGesture::LongPress);
        let at = h.position_of("mail");
        let key = ItemKey::from("mail");
        h.send(PointerEvent::down(at, 0));
        h.send(PointerEvent::moved(at + Point::new(30.0, 0.0), 10));
        assert_eq!(h.router.dragged(), Some(&key));

        assert_eq!(
            h.router.cancel(&mut h.engine),
            vec![GestureOutcome::DragEnded(key.clone())]
        );
        assert_eq!(h.router.dragged(), None);
        assert!(!h.router.is_busy());
        let id = h.engine.id_of(&key).unwrap();
        assert!(!h.engine.node(id).unwrap().dragging);

        // The stale pointer's release no longer reaches the router.
        assert!(h.send(PointerEvent::up(at, 20)).is_empty());
        let now = h.position_of("mail");
        h.send(PointerEvent::down(now, 1000));
        assert_eq!(
            h.send(PointerEvent::up(now, 1040)),
            vec![GestureOutcome::Primary(key)]
        );
    }

    #[test]
    fn test_cancel_drops_deferred_tap() {
        let mut h = Harness::new(OptionsGesture::DoubleTap);
        let at = h.position_of("mail");
        h.send(PointerEvent::down(at, 0));
        h.send(PointerEvent::up(at, 40));
        assert!(h.router.is_busy());
        assert!(h.router.cancel(&mut h.engine).is_empty());
        assert!(h.router.poll(1000).is_empty());
    }

    #[test]
    fn test_drag_follows_pointer_under_zoom() {
        let mut h = Harness::new(OptionsGesture::LongPress);
        h.viewport.pinch(CENTER, Point::new(10.0, 0.0), 2.0);
        let start = h.viewport.content_to_screen(h.position_of("mail"));

        h.send(PointerEvent::down(start, 0));
        h.send(PointerEvent::moved(start + Point::new(0.0, 40.0), 10));
        h.send(PointerEvent::moved(start + Point::new(0.0, 100.0), 20));
        // The bubble keeps its offset from the finger as of drag start.
        let on_screen = h.viewport.content_to_screen(h.position_of("mail"));
        assert!((on_screen - (start + Point::new(0.0, 60.0))).length() < 1e-9);
    }

    #[test]
    fn test_pinch_is_ignored_while_dragging() {
        let mut h = Harness::new(OptionsGesture::LongPress);
        let at = h.position_of("mail");
        h.send(PointerEvent::down(at, 0));
        h.send(PointerEvent::moved(at + Point::new(30.0, 0.0), 10));

        let pinch = TransformEvent {
            centroid: CENTER,
            pan: Point::ZERO,
            zoom: 1.5,
        };
        assert_eq!(h.router.transform(&pinch, &mut h.viewport), None);
        assert_eq!(h.viewport.scale(), 1.0);

        h.send(PointerEvent::up(at, 20));
        assert_eq!(
            h.router.transform(&pinch, &mut h.viewport),
            Some(GestureOutcome::Zoom(1.5))
        );
    }

    #[test]
    fn test_background_drag_pans() {
        let mut h = Harness::new(OptionsGesture::LongPress);
        let empty = Point::new(10.0, 10.0);
        h.send(PointerEvent::down(empty, 0));
        assert!(h.send(PointerEvent::moved(empty + Point::new(3.0, 0.0), 5)).is_empty());
        assert_eq!(
            h.send(PointerEvent::moved(empty + Point::new(20.0, 0.0), 10)),
            vec![GestureOutcome::Pan(Point::new(17.0, 0.0))]
        );
        assert_eq!(h.viewport.pan(), Point::new(17.0, 0.0));
        assert!(h.send(PointerEvent::up(empty, 20)).is_empty());
    }

    #[test]
    fn test_background_double_tap_cycles_zoom() {
        let mut h = Harness::new(OptionsGesture::LongPress);
        let empty = Point::new(10.0, 390.0);
        h.send(PointerEvent::down(empty, 0));
        assert!(h.send(PointerEvent::up(empty, 40)).is_empty());
        h.send(PointerEvent::down(empty, 120));
        assert_eq!(
            h.send(PointerEvent::up(empty, 160)),
            vec![GestureOutcome::ZoomCycled(3)]
        );
    }

    #[test]
    fn test_other_pointers_are_ignored() {
        let mut h = Harness::new(OptionsGesture::LongPress);
        let at = h.position_of("mail");
        h.send(PointerEvent::down(at, 0));
        let stray = PointerEvent::new(7, PointerPhase::Move, at + Point::new(90.0, 0.0), 5);
        assert!(h.send(stray).is_empty());
        let stray_up = PointerEvent::new(7, PointerPhase::Up, at, 6);
        assert!(h.send(stray_up).is_empty());
        assert_eq!(
            h.send(PointerEvent::up(at, 10)),
            vec![GestureOutcome::Primary(ItemKey::from("mail"))]
        );
    }
}
