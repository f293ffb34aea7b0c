use crate::mapper::ScrollAction;
use crate::spring::{SpringSpec, SpringValue};

/// Scroll position of a vertical list of equally sized rows.
#[derive(Debug, Clone)]
pub struct ListScroll {
    item_extent: f64,
    item_count: usize,
    offset: SpringValue,
}

impl ListScroll {
    pub fn new(item_extent: f64, item_count: usize) -> Self {
        Self {
            item_extent: item_extent.max(1.0),
            item_count,
            offset: SpringValue::new(0.0, SpringSpec::no_bouncy_medium()),
        }
    }

    pub fn item_count(&self) -> usize {
        self.item_count
    }

    pub fn item_extent(&self) -> f64 {
        self.item_extent
    }

    /// Current scroll offset in pixels; row `i` starts at `i * extent - offset`.
    pub fn offset(&self) -> f64 {
        self.offset.value()
    }

    fn max_offset(&self) -> f64 {
        self.item_count.saturating_sub(1) as f64 * self.item_extent
    }

    pub fn first_visible_index(&self) -> usize {
        let last = self.item_count.saturating_sub(1);
        let idx = (self.offset.value() / self.item_extent + 0.5).floor().max(0.0) as usize;
        idx.min(last)
    }

    /// Row the list is settling on. Successive detents build on this rather
    /// than on the animated position so that none are lost mid-animation.
    pub fn target_index(&self) -> usize {
        let last = self.item_count.saturating_sub(1);
        let idx = (self.offset.target() / self.item_extent + 0.5).floor().max(0.0) as usize;
        idx.min(last)
    }

    /// Row under a y coordinate measured from the top of the first row.
    pub fn index_at(&self, y: f64) -> Option<usize> {
        let pos = y + self.offset.value();
        if pos < 0.0 {
            return None;
        }
        let idx = (pos / self.item_extent) as usize;
        (idx < self.item_count).then_some(idx)
    }

    pub fn set_item_count(&mut self, count: usize) {
        self.item_count = count;
        let max = self.max_offset();
        if self.offset.target() > max {
            self.offset.animate_to(max);
        }
        if self.offset.value() > max {
            self.offset.snap_to(max);
        }
    }

    pub fn animate_to_item(&mut self, index: usize) {
        if self.item_count == 0 {
            return;
        }
        let index = index.min(self.item_count - 1);
        self.offset.animate_to(index as f64 * self.item_extent);
    }

    pub fn scroll_by(&mut self, pixels: f64) {
        let next = (self.offset.value() + pixels).clamp(0.0, self.max_offset());
        self.offset.snap_to(next);
    }

    /// Applies a list action. Zoom actions belong to the viewport and are ignored.
    pub fn apply(&mut self, action: ScrollAction) {
        match action {
            ScrollAction::ScrollToItem(index) => self.animate_to_item(index),
            ScrollAction::ScrollBy(pixels) => self.scroll_by(pixels),
            ScrollAction::ZoomTo(_) => {}
        }
    }

    pub fn is_settled(&self) -> bool {
        self.offset.is_settled()
    }

    pub fn tick(&mut self, dt: f64) -> bool {
        self.offset.step(dt)
    }
}
