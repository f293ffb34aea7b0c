pub mod bezel;
pub mod cloud;
pub mod detent;
pub mod geom;
pub mod hex;
pub mod item;
pub mod list;
pub mod macros;
pub mod mapper;
pub mod physics;
pub mod router;
pub mod spring;
pub mod viewport;

/// Fixed simulation and animation step, one display frame.
pub const FRAME_DT: f64 = 1.0 / 60.0;
