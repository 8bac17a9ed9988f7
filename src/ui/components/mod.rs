pub mod clipboard;
pub mod confirmation_dialog;
pub mod icons;
pub mod push_button;
pub mod styled;
pub mod top_panel;

pub use clipboard::{Clipboard, RecordingClipboard, SystemClipboard};
pub use push_button::PushButton;
