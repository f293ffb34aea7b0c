//! Force layout for the bubble cloud.
//!
//! Every item gets a node seeded on a hex spiral around the surface centre.
//! Each frame, overlapping nodes push each other apart, every node is pulled
//! back toward its home cell, and velocities decay. The simulation goes idle
//! once nothing moves and nothing overlaps, and wakes again when the item set
//! changes or a drag starts or ends.

use crate::FRAME_DT;
use crate::geom::Point;
use crate::hex::index_to_hex;
use crate::item::ItemKey;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct PhysicsConfig {
    pub repulsion_strength: f64,
    pub home_attraction_strength: f64,
    /// Velocity multiplier applied every tick.
    pub damping: f64,
    /// Separation, relative to the item diameter, below which nodes repel.
    pub overlap_factor: f64,
    pub velocity_threshold: f64,
    /// Home offsets shorter than this exert no pull.
    pub home_epsilon: f64,
    /// Hex cell radius, relative to the item diameter.
    pub hex_spacing_factor: f64,
    /// Floor for distances used as a divisor.
    pub min_distance: f64,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            repulsion_strength: 8000.0,
            home_attraction_strength: 0.012,
            damping: 0.92,
            overlap_factor: 1.15,
            velocity_threshold: 0.1,
            home_epsilon: 5.0,
            hex_spacing_factor: 0.58,
            min_distance: 1.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

#[derive(Debug, Clone)]
pub struct BubbleNode {
    pub key: ItemKey,
    pub position: Point,
    pub velocity: Point,
    home: Point,
    pub dragging: bool,
}

impl BubbleNode {
    fn new(key: ItemKey, home: Point) -> Self {
        Self {
            key,
            position: home,
            velocity: Point::ZERO,
            home,
            dragging: false,
        }
    }

    pub fn home(&self) -> Point {
        self.home
    }

    pub fn speed(&self) -> f64 {
        self.velocity.length()
    }
}

/// Outcome of one simulation step.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TickReport {
    pub max_velocity: f64,
    pub overlapping: bool,
}

#[derive(Debug)]
pub struct BubbleEngine {
    config: PhysicsConfig,
    item_size: f64,
    slots: Vec<Option<BubbleNode>>,
    free: Vec<usize>,
    index: HashMap<ItemKey, NodeId>,
    active: bool,
}

impl BubbleEngine {
    pub fn new(config: PhysicsConfig, item_size: f64) -> Self {
        Self {
            config,
            item_size,
            slots: Vec::new(),
            free: Vec::new(),
            index: HashMap::new(),
            active: false,
        }
    }

    /// New force constants apply from the next tick; homes stay where they are.
    pub fn reconfigure(&mut self, config: PhysicsConfig, item_size: f64) {
        self.config = config;
        self.item_size = item_size;
        self.wake();
    }

    pub fn item_size(&self) -> f64 {
        self.item_size
    }

    pub fn node_radius(&self) -> f64 {
        self.item_size / 2.0
    }

    pub fn min_separation(&self) -> f64 {
        self.item_size * self.config.overlap_factor
    }

    pub fn hex_radius(&self) -> f64 {
        self.item_size * self.config.hex_spacing_factor
    }

    pub fn velocity_threshold(&self) -> f64 {
        self.config.velocity_threshold
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn wake(&mut self) {
        self.active = true;
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    pub fn id_of(&self, key: &ItemKey) -> Option<NodeId> {
        self.index.get(key).copied()
    }

    pub fn node(&self, id: NodeId) -> Option<&BubbleNode> {
        self.slots.get(id.0).and_then(Option::as_ref)
    }

    fn node_mut(&mut self, id: NodeId) -> Option<&mut BubbleNode> {
        self.slots.get_mut(id.0).and_then(Option::as_mut)
    }

    /// Live nodes in arena order.
    pub fn nodes(&self) -> impl Iterator<Item = (NodeId, &BubbleNode)> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(i, slot)| slot.as_ref().map(|n| (NodeId(i), n)))
    }

    pub fn any_dragging(&self) -> bool {
        self.nodes().any(|(_, n)| n.dragging)
    }

    /// Brings the node set in line with `keys`. Vanished keys lose their node,
    /// new keys get a node at the hex cell of their position in `keys`.
    /// Existing nodes keep their home.
    pub fn sync_items(&mut self, keys: &[ItemKey], center: Point) {
        let stale: Vec<ItemKey> = self
            .index
            .keys()
            .filter(|k| !keys.contains(k))
            .cloned()
            .collect();
        for key in &stale {
            self.remove(key);
        }

        let hex_radius = self.hex_radius();
        for (i, key) in keys.iter().enumerate() {
            if self.index.contains_key(key) {
                continue;
            }
            let home = center + index_to_hex(i).to_pixel(hex_radius);
            self.insert(BubbleNode::new(key.clone(), home));
        }

        log::debug!(
            "bubble nodes synced: {} live, {} removed",
            self.len(),
            stale.len()
        );
        self.wake();
    }

    fn insert(&mut self, node: BubbleNode) -> NodeId {
        let key = node.key.clone();
        let id = match self.free.pop() {
            Some(slot) => {
                self.slots[slot] = Some(node);
                NodeId(slot)
            }
            None => {
                self.slots.push(Some(node));
                NodeId(self.slots.len() - 1)
            }
        };
        self.index.insert(key, id);
        id
    }

    fn remove(&mut self, key: &ItemKey) -> Option<BubbleNode> {
        let id = self.index.remove(key)?;
        let node = self.slots.get_mut(id.0)?.take();
        self.free.push(id.0);
        node
    }

    /// Nearest node centre within `radius` of `content_point`.
    pub fn hit_test(&self, content_point: Point, radius: f64) -> Option<NodeId> {
        let r2 = radius * radius;
        self.nodes()
            .map(|(id, n)| (id, n.position.distance_squared(content_point)))
            .filter(|&(_, d2)| d2 <= r2)
            .min_by(|a, b| a.1.total_cmp(&b.1).then(a.0.cmp(&b.0)))
            .map(|(id, _)| id)
    }

    pub fn begin_drag(&mut self, id: NodeId) {
        if let Some(node) = self.node_mut(id) {
            node.dragging = true;
            node.velocity = Point::ZERO;
            self.active = true;
        }
    }

    pub fn drag_to(&mut self, id: NodeId, position: Point) {
        if let Some(node) = self.node_mut(id) {
            node.position = position;
            node.velocity = Point::ZERO;
        }
    }

    pub fn end_drag(&mut self, id: NodeId) {
        if let Some(node) = self.node_mut(id) {
            node.dragging = false;
            self.active = true;
        }
    }

    /// Runs one frame of the simulation. Returns `None` while idle.
    pub fn tick(&mut self) -> Option<TickReport> {
        if !self.active && !self.any_dragging() {
            return None;
        }

        let min_sep = self.min_separation();
        let PhysicsConfig {
            repulsion_strength,
            home_attraction_strength,
            damping,
            home_epsilon,
            min_distance,
            ..
        } = self.config;

        let mut report = TickReport::default();

        for i in 0..self.slots.len() {
            let Some(node) = self.slots[i].as_ref() else {
                continue;
            };
            if node.dragging {
                continue;
            }
            let pos = node.position;

            let mut force = Point::ZERO;
            for (j, other) in self.slots.iter().enumerate() {
                let Some(other) = other.as_ref().filter(|_| j != i) else {
                    continue;
                };
                let mut d = pos - other.position;
                if d == Point::ZERO {
                    // Coincident nodes: split them along x by arena order.
                    d.x = if i < j { min_distance } else { -min_distance };
                }
                let dist = d.length().max(min_distance);
                if dist < min_sep {
                    report.overlapping = true;
                    let overlap = min_sep - dist;
                    let magnitude = repulsion_strength * (overlap / min_sep) / dist;
                    force += d.scale(magnitude / dist);
                }
            }

            let Some(node) = self.slots[i].as_mut() else {
                continue;
            };
            let to_home = node.home - node.position;
            if to_home.length() > home_epsilon {
                force += to_home.scale(home_attraction_strength);
            }

            node.velocity = (node.velocity + force.scale(FRAME_DT)).scale(damping);
            report.max_velocity = report.max_velocity.max(node.speed());
            node.position += node.velocity;
        }

        if report.max_velocity < self.config.velocity_threshold
            && !report.overlapping
            && !self.any_dragging()
        {
            log::debug!("bubble simulation at rest");
            self.active = false;
        }
        Some(report)
    }
}
