pub mod model;
pub mod view;

pub use model::{DrawerAction, DrawerState, RowLayout};
pub use view::draw;

pub const ROW_WIDTH_FACTOR: f64 = 1.2; // row width relative to the screen radius
pub const ROW_FILL: f64 = 0.85; // share of the row extent the pill covers
pub const ROW_FONT_SIZE: f64 = 16.0;
pub const BUBBLE_FONT_FACTOR: f64 = 0.45; // label size relative to bubble radius
pub const RING_WIDTH: f64 = 6.0;
pub const INDICATOR_SPAN: f64 = std::f64::consts::FRAC_PI_3; // arc swept by the scroll indicator track
pub const INDICATOR_INSET: f64 = 10.0;
