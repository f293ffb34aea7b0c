//! The bubble surface as a single owner: physics, gestures and the viewport
//! are only touched through [`CloudCommand`]s.

use crate::geom::{Point, Size};
use crate::item::ItemKey;
use crate::mapper::{MapTarget, ScrollAction};
use crate::physics::{BubbleEngine, PhysicsConfig};
use crate::router::{GestureOutcome, GestureRouter, PointerEvent, RouterConfig, TransformEvent};
use crate::viewport::{Viewport, ZoomConfig};
use crate::FRAME_DT;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct BubbleSettings {
    /// Bubble diameter in content pixels.
    pub item_size: f64,
    pub physics: PhysicsConfig,
    pub zoom: ZoomConfig,
    pub router: RouterConfig,
}

impl Default for BubbleSettings {
    fn default() -> Self {
        Self {
            item_size: 70.0,
            physics: PhysicsConfig::default(),
            zoom: ZoomConfig::default(),
            router: RouterConfig::default(),
        }
    }
}

#[derive(Debug, Clone)]
pub enum CloudCommand {
    SetItems(Vec<ItemKey>),
    Resize(Size),
    Pointer(PointerEvent),
    Transform(TransformEvent),
    /// A mapped rotary action; only zoom actions apply here.
    Detents(ScrollAction),
    Frame { time_ms: u64 },
    Reconfigure(BubbleSettings),
    /// Drops the gesture in flight, e.g. when the surface is hidden mid-drag.
    Cancel,
}

/// What the renderer needs for one bubble.
#[derive(Debug, Clone, PartialEq)]
pub struct BubbleSprite<'a> {
    pub key: &'a ItemKey,
    pub center: Point,
    pub radius: f64,
    pub dragging: bool,
}

#[derive(Debug)]
pub struct BubbleCloud {
    engine: BubbleEngine,
    router: GestureRouter,
    viewport: Viewport,
    size: Size,
    keys: Vec<ItemKey>,
}

impl BubbleCloud {
    pub fn new(settings: BubbleSettings, size: Size) -> Self {
        Self {
            engine: BubbleEngine::new(settings.physics, settings.item_size),
            router: GestureRouter::new(settings.router),
            viewport: Viewport::new(settings.zoom, size.center()),
            size,
            keys: Vec::new(),
        }
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn len(&self) -> usize {
        self.engine.len()
    }

    pub fn is_empty(&self) -> bool {
        self.engine.is_empty()
    }

    pub fn scale(&self) -> f64 {
        self.viewport.scale()
    }

    pub fn zoom_index(&self) -> usize {
        self.viewport.zoom_index()
    }

    /// Rotary target describing the current zoom.
    pub fn map_target(&self) -> MapTarget {
        MapTarget::Zoom {
            index: self.viewport.zoom_index(),
            level_count: self.viewport.level_count(),
        }
    }

    /// Whether another frame would change anything on screen.
    pub fn needs_frame(&self) -> bool {
        self.engine.is_active() || self.router.is_busy() || !self.viewport.is_settled()
    }

    pub fn handle(&mut self, command: CloudCommand) -> Vec<GestureOutcome> {
        match command {
            CloudCommand::SetItems(keys) => {
                self.engine.sync_items(&keys, self.size.center());
                self.keys = keys;
                Vec::new()
            }
            CloudCommand::Resize(size) => {
                log::debug!("bubble surface resized to {}x{}", size.width, size.height);
                self.size = size;
                self.viewport.set_center(size.center());
                // New items seed around the new centre; existing homes stay put.
                self.engine.sync_items(&self.keys, size.center());
                Vec::new()
            }
            CloudCommand::Pointer(event) => {
                self.router
                    .pointer(&event, &mut self.engine, &mut self.viewport)
            }
            CloudCommand::Transform(event) => self
                .router
                .transform(&event, &mut self.viewport)
                .into_iter()
                .collect(),
            CloudCommand::Detents(ScrollAction::ZoomTo(index)) => {
                self.viewport.zoom_to_index(index);
                Vec::new()
            }
            CloudCommand::Detents(_) => Vec::new(),
            CloudCommand::Frame { time_ms } => {
                self.engine.tick();
                self.viewport.tick(FRAME_DT);
                self.router.poll(time_ms)
            }
            CloudCommand::Reconfigure(settings) => {
                log::info!("bubble settings changed, item size {}", settings.item_size);
                self.engine.reconfigure(settings.physics, settings.item_size);
                self.viewport.reconfigure(settings.zoom);
                self.router.reconfigure(settings.router);
                Vec::new()
            }
            CloudCommand::Cancel => self.router.cancel(&mut self.engine),
        }
    }

    /// Bubbles in screen space, in a stable order.
    pub fn sprites(&self) -> impl Iterator<Item = BubbleSprite<'_>> {
        let radius = self.engine.node_radius() * self.viewport.scale();
        self.engine.nodes().map(move |(_, node)| BubbleSprite {
            key: &node.key,
            center: self.viewport.content_to_screen(node.position),
            radius,
            dragging: node.dragging,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::router::{OptionsGesture, PointerPhase};

    fn keys(n: usize) -> Vec<ItemKey> {
        (0..n).map(|i| ItemKey::new(format!("app-{i}"))).collect()
    }

    fn cloud(n: usize) -> BubbleCloud {
        let mut cloud = BubbleCloud::new(BubbleSettings::default(), Size::new(400.0, 400.0));
        cloud.handle(CloudCommand::SetItems(keys(n)));
        cloud
    }

    fn run_frames(cloud: &mut BubbleCloud, from_ms: u64, frames: u64) -> Vec<GestureOutcome> {
        (0..frames)
            .flat_map(|i| cloud.handle(CloudCommand::Frame {
                time_ms: from_ms + i * 16,
            }))
            .collect()
    }

    #[test]
    fn test_cloud_comes_to_rest() {
        let mut cloud = cloud(19);
        assert!(cloud.needs_frame());
        run_frames(&mut cloud, 0, 600);
        assert!(!cloud.needs_frame());
        assert_eq!(cloud.sprites().count(), 19);
    }

    #[test]
    fn test_sprites_scale_with_zoom() {
        let mut cloud = cloud(1);
        let sprite = cloud.sprites().next().unwrap();
        assert_eq!(sprite.center, Point::new(200.0, 200.0));
        assert_eq!(sprite.radius, 35.0);

        cloud.handle(CloudCommand::Detents(ScrollAction::ZoomTo(5)));
        run_frames(&mut cloud, 0, 600);
        assert_eq!(cloud.zoom_index(), 5);
        assert_eq!(cloud.sprites().next().unwrap().radius, 35.0 * 2.5);
    }

    #[test]
    fn test_list_actions_are_ignored() {
        let mut cloud = cloud(3);
        assert!(cloud
            .handle(CloudCommand::Detents(ScrollAction::ScrollToItem(2)))
            .is_empty());
        assert_eq!(cloud.zoom_index(), 2);
    }

    #[test]
    fn test_tap_through_commands() {
        let mut cloud = cloud(1);
        let at = Point::new(200.0, 200.0);
        for (phase, t) in [(PointerPhase::Down, 0), (PointerPhase::Up, 50)] {
            let out = cloud.handle(CloudCommand::Pointer(PointerEvent::new(0, phase, at, t)));
            if phase == PointerPhase::Up {
                assert_eq!(out, vec![GestureOutcome::Primary(ItemKey::from("app-0"))]);
            }
        }
    }

    #[test]
    fn test_deferred_tap_released_by_frames() {
        let mut cloud = BubbleCloud::new(
            BubbleSettings {
                router: RouterConfig {
                    options_gesture: OptionsGesture::DoubleTap,
                    ..RouterConfig::default()
                },
                ..BubbleSettings::default()
            },
            Size::new(400.0, 400.0),
        );
        cloud.handle(CloudCommand::SetItems(keys(1)));
        let at = Point::new(200.0, 200.0);
        cloud.handle(CloudCommand::Pointer(PointerEvent::down(at, 0)));
        assert!(cloud
            .handle(CloudCommand::Pointer(PointerEvent::up(at, 40)))
            .is_empty());
        assert!(cloud.needs_frame());
        let out = run_frames(&mut cloud, 48, 30);
        assert_eq!(out, vec![GestureOutcome::Primary(ItemKey::from("app-0"))]);
    }

    #[test]
    fn test_cancelled_drag_lets_the_cloud_rest() {
        let mut cloud = cloud(3);
        run_frames(&mut cloud, 0, 600);
        let at = cloud.sprites().next().unwrap().center;
        let key = ItemKey::from("app-0");
        cloud.handle(CloudCommand::Pointer(PointerEvent::down(at, 10_000)));
        cloud.handle(CloudCommand::Pointer(PointerEvent::moved(
            at + Point::new(30.0, 0.0),
            10_010,
        )));
        assert_eq!(cloud.sprites().filter(|s| s.dragging).count(), 1);

        assert_eq!(
            cloud.handle(CloudCommand::Cancel),
            vec![GestureOutcome::DragEnded(key.clone())]
        );
        run_frames(&mut cloud, 10_100, 2000);
        assert!(!cloud.needs_frame());
        assert_eq!(cloud.sprites().filter(|s| s.dragging).count(), 0);

        let at = cloud.sprites().next().unwrap().center;
        assert!(cloud
            .handle(CloudCommand::Pointer(PointerEvent::down(at, 50_000)))
            .is_empty());
        assert_eq!(
            cloud.handle(CloudCommand::Pointer(PointerEvent::up(at, 50_040))),
            vec![GestureOutcome::Primary(key)]
        );
    }

    #[test]
    fn test_resize_recenters_without_moving_homes() {
        let mut cloud = cloud(7);
        run_frames(&mut cloud, 0, 600);
        cloud.handle(CloudCommand::Resize(Size::new(600.0, 400.0)));
        let mut with_new = keys(7);
        with_new.push(ItemKey::from("late"));
        cloud.handle(CloudCommand::SetItems(with_new));
        assert_eq!(cloud.len(), 8);
        let id = cloud.engine.id_of(&ItemKey::from("app-0")).unwrap();
        assert_eq!(cloud.engine.node(id).unwrap().home(), Point::new(200.0, 200.0));
    }

    #[test]
    fn test_reconfigure_changes_item_size() {
        let mut cloud = cloud(2);
        cloud.handle(CloudCommand::Reconfigure(BubbleSettings {
            item_size: 50.0,
            ..BubbleSettings::default()
        }));
        assert!(cloud.sprites().all(|s| s.radius == 25.0));
    }
}
