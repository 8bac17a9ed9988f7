use crate::app::AppAction;
use egui::Context;

pub mod components;
pub mod theme;
pub mod tokens;

pub use theme::MessageType;

/// A full-window screen hosted by [`crate::app::AppState`].
pub trait ScreenLike {
    /// Re-read whatever the screen shows from its backing models.
    fn refresh(&mut self) {}

    fn ui(&mut self, ctx: &Context) -> AppAction;
}
