pub mod app;
pub mod drawer;
pub mod theme;
pub mod window;
