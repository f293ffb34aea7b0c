//! Maps detent steps onto whatever the active surface scrolls: list rows,
//! list pixels or zoom levels.

use serde::{Deserialize, Serialize};
use serde_with::DeserializeFromStr;
use strum::{Display as StrumDisplay, EnumIter, EnumString};

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
#[serde(rename_all = "lowercase")]
pub enum ScrollMode {
    #[default]
    #[strum(serialize = "Items", serialize = "item", serialize = "rows")]
    Items,
    #[strum(serialize = "Pixels", serialize = "px")]
    Pixels,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct DetentMapping {
    pub scroll_mode: ScrollMode,
    pub items_per_detent: usize,
    pub pixels_per_detent: f64,
    pub invert_direction: bool,
    pub haptics: bool,
    pub sound: bool,
}

impl Default for DetentMapping {
    fn default() -> Self {
        Self {
            scroll_mode: ScrollMode::Items,
            items_per_detent: 1,
            pixels_per_detent: 28.0,
            invert_direction: false,
            haptics: true,
            sound: true,
        }
    }
}

/// What the consuming surface currently looks like.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MapTarget {
    List { first_visible: usize, item_count: usize },
    Zoom { index: usize, level_count: usize },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScrollAction {
    /// Animate so this row becomes the first visible one.
    ScrollToItem(usize),
    /// Scroll content immediately by this many pixels.
    ScrollBy(f64),
    /// Animate the zoom to this level index.
    ZoomTo(usize),
}

/// One haptic pulse and one click per detent step, not per batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Feedback {
    pub haptic_pulses: u32,
    pub clicks: u32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mapped {
    pub action: ScrollAction,
    pub feedback: Feedback,
}

#[derive(Debug, Clone, Default)]
pub struct DetentMapper {
    mapping: DetentMapping,
}

impl DetentMapper {
    pub fn new(mapping: DetentMapping) -> Self {
        Self { mapping }
    }

    pub fn mapping(&self) -> &DetentMapping {
        &self.mapping
    }

    pub fn reconfigure(&mut self, mapping: DetentMapping) {
        self.mapping = mapping;
    }

    pub fn feedback(&self, steps: i32) -> Feedback {
        let n = steps.unsigned_abs();
        Feedback {
            haptic_pulses: if self.mapping.haptics { n } else { 0 },
            clicks: if self.mapping.sound { n } else { 0 },
        }
    }

    pub fn map(&self, steps: i32, target: MapTarget) -> Option<Mapped> {
        if steps == 0 {
            return None;
        }
        let s = if self.mapping.invert_direction {
            -steps
        } else {
            steps
        };

        let action = match target {
            MapTarget::List { item_count: 0, .. } => return None,
            MapTarget::List {
                first_visible,
                item_count,
            } => match self.mapping.scroll_mode {
                ScrollMode::Items => {
                    let delta = s as i64 * self.mapping.items_per_detent as i64;
                    let last = item_count as i64 - 1;
                    let target = (first_visible as i64 + delta).clamp(0, last);
                    ScrollAction::ScrollToItem(target as usize)
                }
                ScrollMode::Pixels => {
                    ScrollAction::ScrollBy(-(s as f64) * self.mapping.pixels_per_detent)
                }
            },
            MapTarget::Zoom { level_count: 0, .. } => return None,
            MapTarget::Zoom { index, level_count } => {
                let last = level_count as i64 - 1;
                ScrollAction::ZoomTo((index as i64 + s as i64).clamp(0, last) as usize)
            }
        };

        Some(Mapped {
            action,
            feedback: self.feedback(steps),
        })
    }
}
