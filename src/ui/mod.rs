//! Terminal rendering: layout, themes, and per-panel widgets.

pub mod layout;
pub mod renderer;
pub mod theme;
pub mod widgets;
