use egui::{Align, Align2, Context, Key, Layout, RichText, Vec2};

use crate::ui::components::styled::StyledButton;
use crate::ui::theme::{CrtColors, Spacing};

/// Outcome of one frame of a [`ConfirmationDialog`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmationDialogResponse {
    /// Still waiting for the user
    None,
    Confirmed,
    /// Cancel button, window close button or Escape
    Canceled,
}

/// Centered question window with a confirm and a cancel button.
///
/// The dialog holds no state between frames. Callers keep it alive by showing
/// it every frame until the response is something other than `None`:
///
/// ```no_run
/// # use crt_token_panel::ui::components::confirmation_dialog::{ConfirmationDialog, ConfirmationDialogResponse};
/// # fn frame(ctx: &egui::Context) {
/// match ConfirmationDialog::new("Remove token", "Remove AAA from the list?")
///     .confirm_text("Remove")
///     .danger_mode(true)
///     .show(ctx)
/// {
///     ConfirmationDialogResponse::Confirmed => { /* remove */ }
///     ConfirmationDialogResponse::Canceled => { /* forget the target */ }
///     ConfirmationDialogResponse::None => {}
/// }
/// # }
/// ```
pub struct ConfirmationDialog {
    title: String,
    message: String,
    confirm_text: String,
    cancel_text: String,
    danger_mode: bool,
}

impl ConfirmationDialog {
    pub fn new(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
            confirm_text: "Confirm".to_string(),
            cancel_text: "Cancel".to_string(),
            danger_mode: false,
        }
    }

    pub fn confirm_text(mut self, text: impl Into<String>) -> Self {
        self.confirm_text = text.into();
        self
    }

    pub fn cancel_text(mut self, text: impl Into<String>) -> Self {
        self.cancel_text = text.into();
        self
    }

    /// Paint the confirm button in the error color
    pub fn danger_mode(mut self, enabled: bool) -> Self {
        self.danger_mode = enabled;
        self
    }

    pub fn show(self, ctx: &Context) -> ConfirmationDialogResponse {
        let mut open = true;
        let mut response = ConfirmationDialogResponse::None;
        let dark_mode = ctx.style().visuals.dark_mode;

        egui::Window::new(&self.title)
            .id(egui::Id::new("confirmation_dialog").with(&self.title))
            .collapsible(false)
            .resizable(false)
            .anchor(Align2::CENTER_CENTER, Vec2::ZERO)
            .open(&mut open)
            .show(ctx, |ui| {
                ui.set_min_width(300.0);
                ui.add_space(Spacing::SM);
                ui.label(RichText::new(&self.message).color(CrtColors::text_primary(dark_mode)));
                ui.add_space(Spacing::MD);

                ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                    let confirm = if self.danger_mode {
                        StyledButton::danger(&self.confirm_text)
                    } else {
                        StyledButton::primary(&self.confirm_text)
                    };
                    if confirm.show(ui).clicked() {
                        response = ConfirmationDialogResponse::Confirmed;
                    }

                    ui.add_space(Spacing::SM);
                    if StyledButton::secondary(&self.cancel_text).show(ui).clicked() {
                        response = ConfirmationDialogResponse::Canceled;
                    }
                });
                ui.add_space(Spacing::SM);
            });

        if response == ConfirmationDialogResponse::None
            && (!open || ctx.input(|i| i.key_pressed(Key::Escape)))
        {
            response = ConfirmationDialogResponse::Canceled;
        }
        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_sets_texts() {
        let dialog = ConfirmationDialog::new("Remove token", "Sure?")
            .confirm_text("Remove")
            .cancel_text("Keep")
            .danger_mode(true);

        assert_eq!(dialog.title, "Remove token");
        assert_eq!(dialog.message, "Sure?");
        assert_eq!(dialog.confirm_text, "Remove");
        assert_eq!(dialog.cancel_text, "Keep");
        assert!(dialog.danger_mode);
    }

    #[test]
    fn untouched_dialog_waits() {
        let ctx = Context::default();
        let mut response = ConfirmationDialogResponse::Confirmed;
        let _ = ctx.run(egui::RawInput::default(), |ctx| {
            response = ConfirmationDialog::new("Title", "Message").show(ctx);
        });
        assert_eq!(response, ConfirmationDialogResponse::None);
    }
}
