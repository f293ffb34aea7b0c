use crate::config::DrawerStyle;

#[derive(Debug, Clone, PartialEq)]
pub enum AppEvent {
    Show,
    Hide,
    /// Detent steps from outside the touch surface: control socket or wheel.
    Rotate(i32),
    SetStyle(DrawerStyle),
    ConfigReload,
    /// Bring back every entry hidden from the drawer.
    UnhideAll,
    /// The desktop entry cache was rescanned.
    EntriesChanged,
}
