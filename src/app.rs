use crate::context::AppContext;
use crate::ui::components::clipboard::{Clipboard, SystemClipboard};
use crate::ui::components::top_panel::add_top_panel;
use crate::ui::theme::apply_theme;
use crate::ui::tokens::token_panel::TokenPanel;
use crate::ui::{MessageType, ScreenLike};
use eframe::{App, egui};
use std::ops::BitOrAssign;
use std::sync::Arc;

pub struct AppState {
    pub token_panel: TokenPanel,
    pub app_context: Arc<AppContext>,
    pub status: Option<(String, MessageType)>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum AppAction {
    None,
    /// Re-read tokens and history from the wallet
    Refresh,
    DisplayMessage(String, MessageType),
    ClearMessage,
}

impl BitOrAssign for AppAction {
    fn bitor_assign(&mut self, rhs: Self) {
        if matches!(rhs, AppAction::None) {
            return;
        }
        *self = rhs;
    }
}

impl AppState {
    pub fn new(ctx: egui::Context, app_context: Arc<AppContext>) -> Self {
        let clipboard = SystemClipboard::new(ctx.clone());
        Self::with_clipboard(ctx, app_context, Box::new(clipboard))
    }

    /// Same as [`AppState::new`] but with the panel copying into `clipboard`.
    pub fn with_clipboard(
        ctx: egui::Context,
        app_context: Arc<AppContext>,
        clipboard: Box<dyn Clipboard>,
    ) -> Self {
        apply_theme(&ctx, app_context.config.theme);

        let mut token_panel = TokenPanel::new(clipboard);
        token_panel.set_model(Arc::clone(&app_context.wallet_model));
        token_panel.set_client_model(app_context.client_model.clone());

        Self {
            token_panel,
            app_context,
            status: None,
        }
    }

    pub fn handle_action(&mut self, action: AppAction) {
        match action {
            AppAction::None => {}
            AppAction::Refresh => {
                self.token_panel.refresh();
                self.status = None;
            }
            AppAction::DisplayMessage(message, message_type) => {
                match message_type {
                    MessageType::Error => tracing::warn!(%message, "Status"),
                    _ => tracing::debug!(%message, "Status"),
                }
                self.status = Some((message, message_type));
            }
            AppAction::ClearMessage => self.status = None,
        }
    }
}

impl App for AppState {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let mut action = add_top_panel(ctx, &self.app_context, self.status.as_ref());
        action |= self.token_panel.ui(ctx);
        self.handle_action(action);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bitor_assign_keeps_last_real_action() {
        let mut action = AppAction::None;
        action |= AppAction::Refresh;
        action |= AppAction::None;
        assert_eq!(action, AppAction::Refresh);

        action |= AppAction::DisplayMessage("done".to_string(), MessageType::Success);
        assert_eq!(
            action,
            AppAction::DisplayMessage("done".to_string(), MessageType::Success)
        );
    }
}
