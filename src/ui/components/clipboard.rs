use std::sync::{Arc, Mutex};

#[derive(Debug, thiserror::Error)]
pub enum ClipboardError {
    #[error("System clipboard unavailable: {0}")]
    Unavailable(String),
}

/// Destination for the token panel's copy actions.
pub trait Clipboard {
    fn set_text(&mut self, text: &str) -> Result<(), ClipboardError>;
}

/// OS clipboard through `arboard`, falling back to egui's own clipboard
/// output when the platform clipboard cannot be opened (e.g. headless).
pub struct SystemClipboard {
    ctx: egui::Context,
    native: Option<arboard::Clipboard>,
}

impl SystemClipboard {
    pub fn new(ctx: egui::Context) -> Self {
        let native = match arboard::Clipboard::new() {
            Ok(clipboard) => Some(clipboard),
            Err(err) => {
                tracing::warn!(%err, "Native clipboard unavailable, using egui clipboard");
                None
            }
        };
        Self { ctx, native }
    }
}

impl Clipboard for SystemClipboard {
    fn set_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        if let Some(native) = self.native.as_mut() {
            match native.set_text(text.to_string()) {
                Ok(()) => return Ok(()),
                Err(err) => tracing::warn!(%err, "Native clipboard write failed"),
            }
        }
        self.ctx.copy_text(text.to_string());
        Ok(())
    }
}

/// Keeps everything copied; shared so a test can inspect what the panel wrote.
#[derive(Debug, Clone, Default)]
pub struct RecordingClipboard {
    copied: Arc<Mutex<Vec<String>>>,
}

impl RecordingClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn copied(&self) -> Vec<String> {
        self.copied.lock().map(|c| c.clone()).unwrap_or_default()
    }

    pub fn last(&self) -> Option<String> {
        self.copied().pop()
    }
}

impl Clipboard for RecordingClipboard {
    fn set_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        let mut copied = self
            .copied
            .lock()
            .map_err(|_| ClipboardError::Unavailable("recording lock poisoned".to_string()))?;
        copied.push(text.to_string());
        Ok(())
    }
}
