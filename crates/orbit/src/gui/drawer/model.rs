use crate::apps::AppEntry;
use crate::config::{Config, DrawerStyle};
use crown::FRAME_DT;
use crown::bezel::{BezelEvent, VirtualBezel};
use crown::cloud::{BubbleCloud, BubbleSprite, CloudCommand};
use crown::geom::{Point, Size};
use crown::item::ItemKey;
use crown::list::ListScroll;
use crown::mapper::{DetentMapper, Feedback, MapTarget};
use crown::router::{
    GestureOutcome, OptionsGesture, PointerEvent, PointerId, PointerPhase, PressChange,
    PressTracker, RouterConfig, TransformEvent,
};
use crown::spring::{SpringSpec, SpringValue};
use std::collections::HashSet;

const RING_FADE: SpringSpec = SpringSpec {
    damping_ratio: 1.0,
    stiffness: 300.0,
    velocity_threshold: 0.001,
    position_threshold: 0.001,
};

/// What the drawer asks its host to do.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawerAction {
    Launch(ItemKey),
    Options(ItemKey),
    Feedback(Feedback),
}

impl DrawerAction {
    fn from_outcome(outcome: GestureOutcome) -> Option<Self> {
        match outcome {
            GestureOutcome::Primary(key) => Some(Self::Launch(key)),
            GestureOutcome::Secondary(key) => Some(Self::Options(key)),
            other => {
                log::debug!("bubble gesture {:?}", other);
                None
            }
        }
    }
}

#[derive(Debug)]
struct ListPress {
    pointer: PointerId,
    press: PressTracker,
    last_y: f64,
}

/// One list row as laid out this frame.
#[derive(Debug, Clone, PartialEq)]
pub struct RowLayout<'a> {
    pub index: usize,
    pub entry: &'a AppEntry,
    pub center: Point,
    pub scale: f64,
    pub alpha: f64,
}

/// Everything the drawer window shows and reacts to. Owned by the GTK thread.
#[derive(Debug)]
pub struct DrawerState {
    style: DrawerStyle,
    /// Everything the item source offered, hidden entries included.
    source: Vec<AppEntry>,
    hidden: HashSet<ItemKey>,
    entries: Vec<AppEntry>,
    size: Size,
    bezel: VirtualBezel,
    /// Pointer whose down the bezel accepted; the surface never sees it.
    bezel_pointer: Option<PointerId>,
    ring: SpringValue,
    mapper: DetentMapper,
    touch: RouterConfig,
    list: ListScroll,
    list_press: Option<ListPress>,
    list_pending_tap: Option<(usize, u64)>,
    cloud: BubbleCloud,
}

impl DrawerState {
    pub fn new(config: &Config, size: Size) -> Self {
        let bubble = config.bubble_settings();
        Self {
            style: config.drawer.style,
            source: Vec::new(),
            hidden: HashSet::new(),
            entries: Vec::new(),
            size,
            bezel: VirtualBezel::new(config.bezel.clone(), size),
            bezel_pointer: None,
            ring: SpringValue::new(0.0, RING_FADE),
            mapper: DetentMapper::new(config.scroll.clone()),
            touch: bubble.router.clone(),
            list: ListScroll::new(config.drawer.row_height, 0),
            list_press: None,
            list_pending_tap: None,
            cloud: BubbleCloud::new(bubble, size),
        }
    }

    pub fn style(&self) -> DrawerStyle {
        self.style
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn entries(&self) -> &[AppEntry] {
        &self.entries
    }

    pub fn entry(&self, key: &ItemKey) -> Option<&AppEntry> {
        self.entries.iter().find(|e| &e.key == key)
    }

    /// Opacity of the bezel ring indicator.
    pub fn ring_alpha(&self) -> f64 {
        self.ring.value().clamp(0.0, 1.0)
    }

    pub fn bezel_captured(&self) -> bool {
        self.bezel.is_captured()
    }

    pub fn bezel_inner_radius(&self) -> f64 {
        self.bezel.geometry().activation_radius
    }

    pub fn list(&self) -> &ListScroll {
        &self.list
    }

    pub fn sprites(&self) -> impl Iterator<Item = BubbleSprite<'_>> {
        self.cloud.sprites()
    }

    pub fn set_entries(&mut self, entries: Vec<AppEntry>) {
        self.source = entries;
        self.refresh_entries();
    }

    fn refresh_entries(&mut self) {
        self.entries = self
            .source
            .iter()
            .filter(|e| !self.hidden.contains(&e.key))
            .cloned()
            .collect();
        let keys: Vec<ItemKey> = self.entries.iter().map(|e| e.key.clone()).collect();
        self.list.set_item_count(keys.len());
        self.cloud.handle(CloudCommand::SetItems(keys));
        self.list_pending_tap = None;
    }

    pub fn is_hidden(&self, key: &ItemKey) -> bool {
        self.hidden.contains(key)
    }

    /// Hides `key` if it is shown, shows it again otherwise. Returns whether
    /// it is hidden now.
    pub fn toggle_hidden(&mut self, key: &ItemKey) -> bool {
        let hidden = if self.hidden.remove(key) {
            false
        } else {
            self.hidden.insert(key.clone())
        };
        log::info!("{} {}", if hidden { "hiding" } else { "showing" }, key);
        self.refresh_entries();
        hidden
    }

    pub fn unhide_all(&mut self) {
        if !self.hidden.is_empty() {
            log::info!("showing {} hidden entries", self.hidden.len());
            self.hidden.clear();
            self.refresh_entries();
        }
    }

    pub fn set_style(&mut self, style: DrawerStyle) {
        if style != self.style {
            log::info!("drawer style: {}", style);
            self.style = style;
            self.list_press = None;
            self.list_pending_tap = None;
            self.cloud.handle(CloudCommand::Cancel);
        }
    }

    /// Abandons every press in flight; the window went away under the finger.
    pub fn cancel_gestures(&mut self) {
        if self.bezel.cancel().is_some() {
            self.ring.animate_to(0.0);
        }
        self.bezel_pointer = None;
        self.list_press = None;
        self.list_pending_tap = None;
        self.cloud.handle(CloudCommand::Cancel);
    }

    pub fn resize(&mut self, size: Size) {
        if size == self.size {
            return;
        }
        self.size = size;
        self.bezel.resize(size);
        self.cloud.handle(CloudCommand::Resize(size));
    }

    pub fn reconfigure(&mut self, config: &Config) {
        let bubble = config.bubble_settings();
        self.bezel.reconfigure(config.bezel.clone());
        self.mapper.reconfigure(config.scroll.clone());
        self.touch = bubble.router.clone();
        if self.list.item_extent() != config.drawer.row_height {
            let first = self.list.first_visible_index();
            self.list = ListScroll::new(config.drawer.row_height, self.entries.len());
            self.list.animate_to_item(first);
        }
        self.cloud.handle(CloudCommand::Reconfigure(bubble));
        self.set_style(config.drawer.style);
    }

    fn map_target(&self) -> MapTarget {
        match self.style {
            DrawerStyle::List => MapTarget::List {
                first_visible: self.list.target_index(),
                item_count: self.list.item_count(),
            },
            DrawerStyle::Bubble => self.cloud.map_target(),
        }
    }

    /// Applies detent steps to whichever surface is showing.
    pub fn rotate(&mut self, steps: i32) -> Vec<DrawerAction> {
        let Some(mapped) = self.mapper.map(steps, self.map_target()) else {
            return Vec::new();
        };
        log::debug!("{} detents -> {:?}", steps, mapped.action);
        match self.style {
            DrawerStyle::List => self.list.apply(mapped.action),
            DrawerStyle::Bubble => {
                self.cloud.handle(CloudCommand::Detents(mapped.action));
            }
        }
        vec![DrawerAction::Feedback(mapped.feedback)]
    }

    pub fn pointer(&mut self, event: PointerEvent) -> Vec<DrawerAction> {
        if let Some(bezel_event) = self.bezel.handle(&event) {
            let mut actions = Vec::new();
            match bezel_event {
                BezelEvent::Captured => {
                    self.bezel_pointer = Some(event.pointer);
                    self.ring.animate_to(1.0);
                }
                BezelEvent::Detents(steps) => actions = self.rotate(steps),
                BezelEvent::Released => self.ring.animate_to(0.0),
            }
            if event.phase == PointerPhase::Up {
                self.bezel_pointer = None;
            }
            return actions;
        }

        if self.bezel_pointer == Some(event.pointer) {
            if event.phase == PointerPhase::Up {
                self.bezel_pointer = None;
            }
            return Vec::new();
        }

        match self.style {
            DrawerStyle::List => self.list_pointer(event),
            DrawerStyle::Bubble => self
                .cloud
                .handle(CloudCommand::Pointer(event))
                .into_iter()
                .filter_map(DrawerAction::from_outcome)
                .collect(),
        }
    }

    pub fn transform(&mut self, event: TransformEvent) {
        if self.style == DrawerStyle::Bubble && !self.bezel.is_captured() {
            self.cloud.handle(CloudCommand::Transform(event));
        }
    }

    /// Advances every animation by one frame.
    pub fn frame(&mut self, time_ms: u64) -> Vec<DrawerAction> {
        self.ring.step(FRAME_DT);
        self.list.tick(FRAME_DT);

        let mut actions: Vec<DrawerAction> = self
            .cloud
            .handle(CloudCommand::Frame { time_ms })
            .into_iter()
            .filter_map(DrawerAction::from_outcome)
            .collect();

        let long_press_y = self.list_press.as_mut().and_then(|lp| {
            (lp.press.update(None, time_ms, &self.touch) == Some(PressChange::LongPress))
                .then(|| lp.press.last().y)
        });
        if let Some(y) = long_press_y
            && self.touch.options_gesture == OptionsGesture::LongPress
            && let Some(key) = self.row_key_at(y)
        {
            actions.push(DrawerAction::Options(key));
        }

        if let Some((index, t)) = self.list_pending_tap
            && time_ms.saturating_sub(t) >= self.touch.double_tap_timeout_ms
        {
            self.list_pending_tap = None;
            actions.extend(self.entries.get(index).map(|e| DrawerAction::Launch(e.key.clone())));
        }
        actions
    }

    pub fn needs_frame(&self) -> bool {
        !self.ring.is_settled()
            || !self.list.is_settled()
            || self.list_press.is_some()
            || self.list_pending_tap.is_some()
            || (self.style == DrawerStyle::Bubble && self.cloud.needs_frame())
    }

    /// y of the top edge of row zero when the list is not scrolled.
    fn list_origin(&self) -> f64 {
        self.size.center().y - self.list.item_extent() / 2.0
    }

    fn row_at(&self, y: f64) -> Option<usize> {
        self.list.index_at(y - self.list_origin())
    }

    fn row_key_at(&self, y: f64) -> Option<ItemKey> {
        self.row_at(y)
            .and_then(|i| self.entries.get(i))
            .map(|e| e.key.clone())
    }

    fn list_pointer(&mut self, event: PointerEvent) -> Vec<DrawerAction> {
        let mut actions = Vec::new();
        match event.phase {
            PointerPhase::Down => {
                if self.list_press.is_none() {
                    self.list_press = Some(ListPress {
                        pointer: event.pointer,
                        press: PressTracker::new(event.position, event.time_ms),
                        last_y: event.position.y,
                    });
                }
            }
            PointerPhase::Move => {
                let Some(lp) = self.list_press.as_mut().filter(|lp| lp.pointer == event.pointer)
                else {
                    return actions;
                };
                let change = lp.press.update(Some(event.position), event.time_ms, &self.touch);
                if lp.press.is_dragging() {
                    self.list.scroll_by(lp.last_y - event.position.y);
                }
                lp.last_y = event.position.y;
                if change == Some(PressChange::LongPress)
                    && self.touch.options_gesture == OptionsGesture::LongPress
                    && let Some(key) = self.row_key_at(event.position.y)
                {
                    actions.push(DrawerAction::Options(key));
                }
            }
            PointerPhase::Up => {
                let Some(lp) = self.list_press.take_if(|lp| lp.pointer == event.pointer) else {
                    return actions;
                };
                if lp.press.is_tap()
                    && let Some(index) = self.row_at(event.position.y)
                {
                    self.tap_row(index, event.time_ms, &mut actions);
                }
            }
        }
        actions
    }

    fn tap_row(&mut self, index: usize, now_ms: u64, actions: &mut Vec<DrawerAction>) {
        let Some(key) = self.entries.get(index).map(|e| e.key.clone()) else {
            return;
        };
        match self.touch.options_gesture {
            OptionsGesture::LongPress => actions.push(DrawerAction::Launch(key)),
            OptionsGesture::DoubleTap => match self.list_pending_tap.take() {
                Some((pending, t))
                    if pending == index
                        && now_ms.saturating_sub(t) < self.touch.double_tap_timeout_ms =>
                {
                    actions.push(DrawerAction::Options(key));
                }
                stale => {
                    if let Some(e) = stale.and_then(|(i, _)| self.entries.get(i)) {
                        actions.push(DrawerAction::Launch(e.key.clone()));
                    }
                    self.list_pending_tap = Some((index, now_ms));
                }
            },
        }
    }

    /// Visible rows with their fisheye scale and fade.
    pub fn rows(&self) -> impl Iterator<Item = RowLayout<'_>> {
        let center = self.size.center();
        let extent = self.list.item_extent();
        let offset = self.list.offset();
        let half = center.y.max(1.0);
        self.entries
            .iter()
            .enumerate()
            .filter_map(move |(index, entry)| {
                let y = center.y + index as f64 * extent - offset;
                if y < -extent || y > self.size.height + extent {
                    return None;
                }
                let from_center = ((y - center.y) / half).abs();
                Some(RowLayout {
                    index,
                    entry,
                    center: Point::new(center.x, y),
                    scale: (1.0 - from_center * 0.3).clamp(0.7, 1.0),
                    alpha: (1.0 - from_center * 0.5).clamp(0.4, 1.0),
                })
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::apps::{AppName, ExecCommand};
    use crate::config::DrawerConfig;
    use crown::mapper::{DetentMapping, ScrollMode};

    const SIZE: Size = Size {
        width: 400.0,
        height: 400.0,
    };

    fn entries(n: usize) -> Vec<AppEntry> {
        (0..n)
            .map(|i| AppEntry {
                key: ItemKey::new(format!("app{i}.desktop")),
                name: AppName::new(format!("App {i}")),
                exec: ExecCommand::from("true"),
            })
            .collect()
    }

    fn drawer(config: &Config, n: usize) -> DrawerState {
        let mut d = DrawerState::new(config, SIZE);
        d.set_entries(entries(n));
        d
    }

    fn settle(d: &mut DrawerState) {
        for i in 0..600 {
            d.frame(10_000 + i * 16);
        }
    }

    /// Drags a finger around the bezel by `degrees` of decreasing angle
    /// (counter-clockwise on screen), starting at 3 o'clock.
    fn spin(d: &mut DrawerState, degrees: f64) -> Vec<DrawerAction> {
        let c = SIZE.center();
        let r = 190.0;
        let at = |deg: f64| {
            let a = -deg.to_radians();
            Point::new(c.x + r * a.cos(), c.y + r * a.sin())
        };
        let mut out = d.pointer(PointerEvent::down(at(0.0), 0));
        let steps = (degrees / 5.0) as u64;
        for i in 1..=steps {
            out.extend(d.pointer(PointerEvent::moved(at(i as f64 * 5.0), i)));
        }
        out.extend(d.pointer(PointerEvent::up(at(degrees), steps + 1)));
        out
    }

    fn clicks(actions: &[DrawerAction]) -> u32 {
        actions
            .iter()
            .map(|a| match a {
                DrawerAction::Feedback(f) => f.clicks,
                _ => 0,
            })
            .sum()
    }

    #[test]
    fn test_bezel_spin_scrolls_list() {
        let mut d = drawer(&Config::default(), 30);
        let out = spin(&mut d, 90.0);
        assert_eq!(clicks(&out), 6);
        assert!(!d.bezel_captured());
        settle(&mut d);
        assert_eq!(d.list().first_visible_index(), 6);
    }

    #[test]
    fn test_bezel_spin_zooms_bubbles() {
        let mut config = Config::default();
        config.drawer.style = DrawerStyle::Bubble;
        let mut d = drawer(&config, 5);
        spin(&mut d, 30.0);
        settle(&mut d);
        assert_eq!(d.cloud.zoom_index(), 4);
    }

    #[test]
    fn test_centre_press_reaches_list_not_bezel() {
        let mut d = drawer(&Config::default(), 10);
        let c = SIZE.center();
        d.pointer(PointerEvent::down(c, 0));
        assert!(!d.bezel_captured());
        let out = d.pointer(PointerEvent::up(c, 40));
        assert_eq!(out, vec![DrawerAction::Launch(ItemKey::from("app0.desktop"))]);
    }

    #[test]
    fn test_sticky_release_does_not_leak_to_surface() {
        let mut d = drawer(&Config::default(), 10);
        let c = SIZE.center();
        d.pointer(PointerEvent::down(Point::new(c.x + 190.0, c.y), 0));
        assert!(d.bezel_captured());
        assert!(d.pointer(PointerEvent::moved(Point::new(c.x + 20.0, c.y), 5)).is_empty());
        assert!(!d.bezel_captured());
        assert!(d.pointer(PointerEvent::moved(c, 6)).is_empty());
        assert!(d.pointer(PointerEvent::up(c, 7)).is_empty());
        assert!(d.list_press.is_none());
    }

    #[test]
    fn test_ring_fades_in_and_out() {
        let mut d = drawer(&Config::default(), 3);
        let c = SIZE.center();
        d.pointer(PointerEvent::down(Point::new(c.x + 190.0, c.y), 0));
        settle(&mut d);
        assert_eq!(d.ring_alpha(), 1.0);
        d.pointer(PointerEvent::up(Point::new(c.x + 190.0, c.y), 20_000));
        settle(&mut d);
        assert_eq!(d.ring_alpha(), 0.0);
        assert!(!d.needs_frame());
    }

    #[test]
    fn test_list_drag_scrolls_without_tap() {
        let mut d = drawer(&Config::default(), 20);
        let c = SIZE.center();
        d.pointer(PointerEvent::down(c, 0));
        d.pointer(PointerEvent::moved(Point::new(c.x, c.y - 20.0), 10));
        d.pointer(PointerEvent::moved(Point::new(c.x, c.y - 112.0), 20));
        assert_eq!(d.list().offset(), 112.0);
        assert!(d.pointer(PointerEvent::up(Point::new(c.x, c.y - 112.0), 30)).is_empty());
    }

    #[test]
    fn test_list_long_press_opens_options() {
        let mut d = drawer(&Config::default(), 5);
        let c = SIZE.center();
        d.pointer(PointerEvent::down(Point::new(c.x, c.y + 56.0), 0));
        assert!(d.frame(300).is_empty());
        assert_eq!(
            d.frame(450),
            vec![DrawerAction::Options(ItemKey::from("app1.desktop"))]
        );
        assert!(d.pointer(PointerEvent::up(Point::new(c.x, c.y + 56.0), 500)).is_empty());
    }

    #[test]
    fn test_list_double_tap_mode() {
        let config = Config {
            drawer: DrawerConfig {
                options_gesture: OptionsGesture::DoubleTap,
                ..DrawerConfig::default()
            },
            ..Config::default()
        };
        let mut d = drawer(&config, 5);
        let c = SIZE.center();
        d.pointer(PointerEvent::down(c, 0));
        assert!(d.pointer(PointerEvent::up(c, 30)).is_empty());
        d.pointer(PointerEvent::down(c, 100));
        assert_eq!(
            d.pointer(PointerEvent::up(c, 130)),
            vec![DrawerAction::Options(ItemKey::from("app0.desktop"))]
        );

        d.pointer(PointerEvent::down(c, 1000));
        d.pointer(PointerEvent::up(c, 1030));
        assert_eq!(
            d.frame(1400),
            vec![DrawerAction::Launch(ItemKey::from("app0.desktop"))]
        );
    }

    #[test]
    fn test_empty_list_ignores_rotation() {
        let mut d = drawer(&Config::default(), 0);
        assert!(d.rotate(3).is_empty());
    }

    #[test]
    fn test_pixel_mode_and_invert() {
        let config = Config {
            scroll: DetentMapping {
                scroll_mode: ScrollMode::Pixels,
                invert_direction: true,
                ..DetentMapping::default()
            },
            ..Config::default()
        };
        let mut d = drawer(&config, 20);
        let out = d.rotate(2);
        assert_eq!(clicks(&out), 2);
        assert_eq!(d.list().offset(), 56.0);
    }

    #[test]
    fn test_fisheye_rows() {
        let d = drawer(&Config::default(), 20);
        let rows: Vec<_> = d.rows().collect();
        assert_eq!(rows[0].index, 0);
        assert_eq!(rows[0].scale, 1.0);
        assert_eq!(rows[0].alpha, 1.0);
        let far = rows.iter().find(|r| r.index == 3).unwrap();
        assert!(far.scale < 1.0 && far.scale >= 0.7);
        assert!(far.alpha < 1.0 && far.alpha >= 0.4);
        assert!(rows.iter().all(|r| r.center.y <= SIZE.height + 56.0));
    }

    fn bubble_drawer(n: usize) -> DrawerState {
        let mut config = Config::default();
        config.drawer.style = DrawerStyle::Bubble;
        let mut d = drawer(&config, n);
        settle(&mut d);
        d
    }

    fn bubble_at(d: &DrawerState, key: &ItemKey) -> Point {
        d.sprites().find(|s| s.key == key).unwrap().center
    }

    #[test]
    fn test_style_switch_mid_drag_releases_bubble() {
        let mut d = bubble_drawer(3);
        let key = ItemKey::from("app0.desktop");
        let at = bubble_at(&d, &key);
        d.pointer(PointerEvent::down(at, 30_000));
        d.pointer(PointerEvent::moved(at + Point::new(30.0, 0.0), 30_010));
        assert_eq!(d.sprites().filter(|s| s.dragging).count(), 1);

        d.set_style(DrawerStyle::List);
        assert!(d.pointer(PointerEvent::up(at, 30_020)).is_empty());
        d.set_style(DrawerStyle::Bubble);
        assert_eq!(d.sprites().filter(|s| s.dragging).count(), 0);

        for i in 0..2000 {
            d.frame(40_000 + i * 16);
        }
        assert!(!d.needs_frame());
        let at = bubble_at(&d, &key);
        assert!(d.pointer(PointerEvent::down(at, 90_000)).is_empty());
        assert_eq!(
            d.pointer(PointerEvent::up(at, 90_040)),
            vec![DrawerAction::Launch(key)]
        );
    }

    #[test]
    fn test_cancel_gestures_clears_every_surface() {
        let mut d = bubble_drawer(3);
        let key = ItemKey::from("app0.desktop");
        let at = bubble_at(&d, &key);
        d.pointer(PointerEvent::down(at, 30_000));
        d.pointer(PointerEvent::moved(at + Point::new(30.0, 0.0), 30_010));
        d.cancel_gestures();
        assert_eq!(d.sprites().filter(|s| s.dragging).count(), 0);

        let c = SIZE.center();
        d.pointer(PointerEvent::down(Point::new(c.x + 190.0, c.y), 31_000));
        assert!(d.bezel_captured());
        d.cancel_gestures();
        assert!(!d.bezel_captured());
        assert_eq!(d.bezel_pointer, None);
        settle(&mut d);
        assert_eq!(d.ring_alpha(), 0.0);

        d.set_style(DrawerStyle::List);
        d.pointer(PointerEvent::down(c, 40_000));
        d.cancel_gestures();
        assert!(d.list_press.is_none());
        assert!(d.pointer(PointerEvent::up(c, 40_030)).is_empty());
    }

    #[test]
    fn test_long_press_hides_bubble_and_row() {
        let mut d = bubble_drawer(5);
        let key = ItemKey::from("app1.desktop");
        let at = bubble_at(&d, &key);
        d.pointer(PointerEvent::down(at, 30_000));
        assert!(d.frame(30_300).is_empty());
        assert_eq!(d.frame(30_450), vec![DrawerAction::Options(key.clone())]);

        assert!(d.toggle_hidden(&key));
        assert!(d.pointer(PointerEvent::up(at, 30_500)).is_empty());
        assert_eq!(d.sprites().count(), 4);
        assert!(d.sprites().all(|s| s.key != &key));
        assert!(d.entry(&key).is_none());

        // A rescan of the item source keeps it hidden.
        d.set_entries(entries(5));
        d.set_style(DrawerStyle::List);
        assert_eq!(d.list().item_count(), 4);
        assert!(d.rows().all(|r| r.entry.key != key));

        d.unhide_all();
        assert_eq!(d.list().item_count(), 5);
        assert!(!d.is_hidden(&key));
        assert_eq!(d.sprites().count(), 5);
    }

    #[test]
    fn test_reconfigure_switches_style_and_row_height() {
        let mut d = drawer(&Config::default(), 10);
        let mut config = Config::default();
        config.drawer.style = DrawerStyle::Bubble;
        config.drawer.row_height = 40.0;
        d.reconfigure(&config);
        assert_eq!(d.style(), DrawerStyle::Bubble);
        assert_eq!(d.list().item_extent(), 40.0);
    }
}
