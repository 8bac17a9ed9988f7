//! The token screen: a list of tracked tokens plus the pages it drives.
//!
//! The panel follows one token at a time, identified by its hash so the
//! choice survives model refreshes. Whenever that row changes, its fields are
//! pushed into the send and receive pages. Model notifications are drained at
//! the start of every frame and dispatched to the `on_*` handlers below.
//!
//! Right clicking a row remembers it as the menu target. The copy and remove
//! actions work on that target and forget it once they are done.

use std::sync::Arc;

use egui::{
    Align, Context, CornerRadius, Frame, Layout, Margin, RichText, ScrollArea, Sense, Stroke, Ui,
    UiBuilder, Vec2, WidgetInfo, WidgetType,
};

use crate::app::AppAction;
use crate::model::token::{TokenItem, TokenRole};
use crate::model::token_item_model::{ModelIndex, TokenItemModel, TokenModelEvent};
use crate::ui::components::clipboard::Clipboard;
use crate::ui::components::confirmation_dialog::{ConfirmationDialog, ConfirmationDialogResponse};
use crate::ui::components::icons::TokenIcons;
use crate::ui::components::push_button::PushButton;
use crate::ui::components::styled::island_central_panel;
use crate::ui::theme::{CrtColors, Shape, Spacing, Typography};
use crate::ui::tokens::add_token_page::AddTokenPage;
use crate::ui::tokens::receive_token_page::ReceiveTokenPage;
use crate::ui::tokens::send_token_page::SendTokenPage;
use crate::ui::tokens::token_transaction_view::TokenTransactionView;
use crate::ui::{MessageType, ScreenLike};
use crate::wallet::{ClientModel, WalletModel};

const ROW_ICON_SIZE: Vec2 = Vec2::splat(24.0);

/// Row a context menu was opened on.
#[derive(Debug, Clone, PartialEq, Eq)]
struct MenuTarget {
    index: ModelIndex,
    hash: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MenuAction {
    CopySender,
    CopyBalance,
    CopyName,
    CopyAddress,
    Remove,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RowAction {
    Select(ModelIndex),
    Send(ModelIndex),
    Receive(ModelIndex),
    ContextMenu(ModelIndex),
    Menu(MenuAction),
    /// A row's context menu is still showing
    MenuOpen,
    AddToken,
}

pub struct TokenPanel {
    model: Option<Arc<WalletModel>>,
    send_page: SendTokenPage,
    receive_page: ReceiveTokenPage,
    add_page: AddTokenPage,
    transaction_view: TokenTransactionView,
    selected_token_hash: Option<String>,
    menu_target: Option<MenuTarget>,
    confirm_removal: bool,
    clipboard: Box<dyn Clipboard>,
    icons: TokenIcons,
}

impl TokenPanel {
    pub fn new(clipboard: Box<dyn Clipboard>) -> Self {
        Self {
            model: None,
            send_page: SendTokenPage::new(),
            receive_page: ReceiveTokenPage::new(),
            add_page: AddTokenPage::new(),
            transaction_view: TokenTransactionView::new(),
            selected_token_hash: None,
            menu_target: None,
            confirm_removal: false,
            clipboard,
            icons: TokenIcons::load(),
        }
    }

    /// Bind the wallet; selects the first token if there is one.
    pub fn set_model(&mut self, model: Arc<WalletModel>) {
        self.add_page.set_model(Arc::clone(&model));
        self.send_page.set_model(Arc::clone(&model));
        self.transaction_view.set_model(Arc::clone(&model));
        self.model = Some(Arc::clone(&model));
        self.selected_token_hash = None;
        self.menu_target = None;
        self.confirm_removal = false;

        if model.has_token_model() {
            // Notifications queued before binding describe rows we never saw
            model.drain_token_events();
            let first = model.with_tokens(|tokens| tokens.index(0)).flatten();
            if first.is_some() {
                self.on_current_token_changed(first);
            }
        }
    }

    pub fn set_client_model(&mut self, client_model: ClientModel) {
        self.send_page.set_client_model(client_model.clone());
        self.add_page.set_client_model(client_model);
    }

    fn with_tokens<R>(&self, f: impl FnOnce(&TokenItemModel) -> R) -> Option<R> {
        self.model.as_ref()?.with_tokens(f)
    }

    fn item_at(&self, index: ModelIndex) -> Option<TokenItem> {
        self.with_tokens(|tokens| tokens.item(index).cloned())
            .flatten()
    }

    pub fn selected_token_hash(&self) -> Option<&str> {
        self.selected_token_hash.as_deref()
    }

    /// Index the context menu was opened on, if it is still pending.
    pub fn menu_target(&self) -> Option<ModelIndex> {
        self.menu_target.as_ref().map(|target| target.index)
    }

    pub fn is_confirming_removal(&self) -> bool {
        self.confirm_removal
    }

    pub fn send_page(&self) -> &SendTokenPage {
        &self.send_page
    }

    pub fn receive_page(&self) -> &ReceiveTokenPage {
        &self.receive_page
    }

    pub fn add_page(&self) -> &AddTokenPage {
        &self.add_page
    }

    pub fn on_current_token_changed(&mut self, index: Option<ModelIndex>) {
        let Some(model) = self.model.as_ref() else {
            return;
        };
        if !model.has_token_model() {
            return;
        }

        match index.and_then(|index| self.item_at(index)) {
            Some(item) => {
                tracing::debug!(hash = %item.hash, symbol = %item.symbol, "Current token changed");
                self.send_page.set_token_data(
                    &item.contract_address,
                    &item.sender,
                    &item.symbol,
                    item.decimals,
                    &item.raw_balance,
                );
                self.receive_page.set_address(&item.sender);
                self.receive_page.set_symbol(&item.symbol);
                self.send_page.set_enabled(true);
                self.receive_page.set_enabled(true);
                self.selected_token_hash = Some(item.hash);
            }
            None => {
                tracing::debug!("No current token");
                self.send_page.set_enabled(false);
                self.receive_page.set_enabled(false);
                self.receive_page.set_address("");
                self.receive_page.set_symbol("");
            }
        }
    }

    /// Refresh the pages if the changed row is the one being followed.
    pub fn on_data_changed(&mut self, top_left: ModelIndex, _bottom_right: ModelIndex) {
        let Some(hash) = self
            .with_tokens(|tokens| tokens.data(top_left, TokenRole::Hash))
            .flatten()
        else {
            return;
        };
        let follows = match &self.selected_token_hash {
            None => true,
            Some(selected) => *selected == hash,
        };
        if follows {
            self.on_current_token_changed(Some(top_left));
        }
    }

    /// The first token ever added becomes the current one. `total` is the row
    /// count right after the insertion, not the count when the event is handled.
    pub fn on_rows_inserted(&mut self, _first: usize, _last: usize, total: usize) {
        if total == 1 {
            let first = self.with_tokens(|tokens| tokens.index(0)).flatten();
            self.on_current_token_changed(first);
        }
    }

    /// Move off a token that no longer exists: to the first remaining row,
    /// or to nothing when the list is empty.
    pub fn on_rows_removed(&mut self, _first: usize, _last: usize) {
        let target_gone = self.menu_target.as_ref().is_some_and(|target| {
            self.with_tokens(|tokens| tokens.index_of_hash(&target.hash))
                .flatten()
                .is_none()
        });
        if target_gone {
            self.menu_target = None;
            self.confirm_removal = false;
        }

        let Some(selected) = self.selected_token_hash.clone() else {
            return;
        };
        let still_there = self
            .with_tokens(|tokens| tokens.index_of_hash(&selected))
            .flatten()
            .is_some();
        if still_there {
            return;
        }

        self.selected_token_hash = None;
        let first = self.with_tokens(|tokens| tokens.index(0)).flatten();
        self.on_current_token_changed(first);
    }

    pub fn process_model_events(&mut self) {
        let Some(model) = self.model.clone() else {
            return;
        };
        for event in model.drain_token_events() {
            match event {
                TokenModelEvent::DataChanged { hash } => {
                    let index = model
                        .with_tokens(|tokens| tokens.index_of_hash(&hash))
                        .flatten();
                    // Gone again before the queue was drained
                    if let Some(index) = index {
                        self.on_data_changed(index, index);
                    }
                }
                TokenModelEvent::RowsInserted { first, last, total } => {
                    self.on_rows_inserted(first, last, total)
                }
                TokenModelEvent::RowsRemoved { first, last, .. } => {
                    self.on_rows_removed(first, last)
                }
            }
        }
    }

    /// Remember `index` as the menu target. Returns whether the menu may open.
    pub fn contextual_menu(&mut self, index: Option<ModelIndex>) -> bool {
        let target = index.and_then(|index| {
            self.with_tokens(|tokens| tokens.data(index, TokenRole::Hash))
                .flatten()
                .map(|hash| MenuTarget { index, hash })
        });
        match target {
            Some(target) => {
                self.menu_target = Some(target);
                true
            }
            None => false,
        }
    }

    /// The menu went away without an action: forget its row, unless the row
    /// is waiting on the removal dialog.
    pub fn context_menu_closed(&mut self) {
        if !self.confirm_removal {
            self.menu_target = None;
        }
    }

    fn copy_target_field(&mut self, role: TokenRole) -> bool {
        let Some(target) = self.menu_target.take() else {
            return false;
        };
        let Some(value) = self
            .with_tokens(|tokens| {
                tokens
                    .index_of_hash(&target.hash)
                    .and_then(|index| tokens.data(index, role))
            })
            .flatten()
        else {
            return false;
        };

        match self.clipboard.set_text(&value) {
            Ok(()) => {
                tracing::debug!(%role, "Copied token field");
                true
            }
            Err(err) => {
                tracing::warn!(%err, %role, "Failed to copy token field");
                false
            }
        }
    }

    pub fn copy_token_address(&mut self) -> bool {
        self.copy_target_field(TokenRole::Address)
    }

    pub fn copy_token_balance(&mut self) -> bool {
        self.copy_target_field(TokenRole::Balance)
    }

    pub fn copy_token_name(&mut self) -> bool {
        self.copy_target_field(TokenRole::Name)
    }

    pub fn copy_sender_address(&mut self) -> bool {
        self.copy_target_field(TokenRole::Sender)
    }

    /// Ask for confirmation before removing the menu target.
    pub fn remove_token(&mut self) -> bool {
        let target_exists = self.menu_target.as_ref().is_some_and(|target| {
            self.with_tokens(|tokens| tokens.index_of_hash(&target.hash))
                .flatten()
                .is_some()
        });
        if !target_exists {
            self.menu_target = None;
            return false;
        }
        self.confirm_removal = true;
        true
    }

    /// Apply the user's answer to the removal question.
    pub fn resolve_remove_token(&mut self, response: ConfirmationDialogResponse) -> AppAction {
        match response {
            ConfirmationDialogResponse::None => AppAction::None,
            ConfirmationDialogResponse::Canceled => {
                self.confirm_removal = false;
                self.menu_target = None;
                AppAction::None
            }
            ConfirmationDialogResponse::Confirmed => {
                self.confirm_removal = false;
                let (Some(target), Some(model)) = (self.menu_target.take(), self.model.clone())
                else {
                    return AppAction::None;
                };

                let action = match model.remove_token_entry(&target.hash) {
                    Ok(true) => {
                        AppAction::DisplayMessage("Token removed".to_string(), MessageType::Success)
                    }
                    Ok(false) => {
                        tracing::debug!(hash = %target.hash, "Token already removed");
                        AppAction::None
                    }
                    Err(err) => {
                        tracing::warn!(%err, hash = %target.hash, "Wallet did not remove token");
                        AppAction::None
                    }
                };
                self.process_model_events();
                action
            }
        }
    }

    pub fn on_send_token(&mut self, index: ModelIndex) {
        self.on_current_token_changed(Some(index));
        self.send_page.show();
    }

    pub fn on_receive_token(&mut self, index: ModelIndex) {
        self.on_current_token_changed(Some(index));
        self.receive_page.show();
    }

    pub fn on_add_token(&mut self) {
        self.add_page.show();
    }

    fn render_token_row(
        &self,
        ui: &mut Ui,
        index: ModelIndex,
        item: &TokenItem,
        actions: &mut Vec<RowAction>,
    ) {
        let dark_mode = ui.ctx().style().visuals.dark_mode;
        let selected = self.selected_token_hash.as_deref() == Some(item.hash.as_str());
        let fill = if selected {
            CrtColors::selected(dark_mode)
        } else {
            CrtColors::surface(dark_mode)
        };

        let row = ui.scope_builder(
            UiBuilder::new()
                .id_salt(("token_row", item.hash.as_str()))
                .sense(Sense::click()),
            |ui| {
                Frame::new()
                    .fill(fill)
                    .stroke(Stroke::new(1.0, CrtColors::border(dark_mode)))
                    .corner_radius(CornerRadius::same(Shape::RADIUS_SM))
                    .inner_margin(Margin::same(8))
                    .show(ui, |ui| {
                        ui.set_width(ui.available_width());
                        ui.horizontal(|ui| {
                            if let Some(icon) = &self.icons.token {
                                let texture = icon.texture(ui.ctx());
                                ui.image((texture.id(), ROW_ICON_SIZE));
                            }
                            ui.vertical(|ui| {
                                ui.label(RichText::new(&item.name).strong());
                                ui.label(
                                    RichText::new(format!(
                                        "{} {}",
                                        item.data(TokenRole::Balance),
                                        item.symbol
                                    ))
                                    .font(Typography::caption())
                                    .color(CrtColors::text_secondary(dark_mode)),
                                );
                            });
                            ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                                let receive =
                                    PushButton::new("Receive").icon(self.icons.receive.as_ref());
                                if ui.add(receive).clicked() {
                                    actions.push(RowAction::Receive(index));
                                }
                                let send = PushButton::new("Send").icon(self.icons.send.as_ref());
                                if ui.add(send).clicked() {
                                    actions.push(RowAction::Send(index));
                                }
                            });
                        });
                    });
            },
        );

        let response = row.response;
        response.widget_info(|| {
            WidgetInfo::labeled(
                WidgetType::Other,
                true,
                format!("{} ({})", item.name, item.symbol),
            )
        });
        if response.clicked() {
            actions.push(RowAction::Select(index));
        }
        if response.secondary_clicked() {
            actions.push(RowAction::ContextMenu(index));
        }
        response.context_menu(|ui| {
            let entries = [
                ("Copy receive address", MenuAction::CopySender),
                ("Copy token balance", MenuAction::CopyBalance),
                ("Copy token name", MenuAction::CopyName),
                ("Copy contract address", MenuAction::CopyAddress),
                ("Remove token", MenuAction::Remove),
            ];
            for (label, menu_action) in entries {
                if ui.button(label).clicked() {
                    actions.push(RowAction::Menu(menu_action));
                    ui.close_menu();
                }
            }
        });
        if response.context_menu_opened() {
            actions.push(RowAction::MenuOpen);
        }
    }

    fn render_token_list(&self, ui: &mut Ui) -> Vec<RowAction> {
        let mut actions = Vec::new();
        let dark_mode = ui.ctx().style().visuals.dark_mode;

        ui.horizontal(|ui| {
            ui.label(RichText::new("Tokens").font(Typography::heading()));
            ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                let add = PushButton::new("Add token")
                    .icon(self.icons.add.as_ref())
                    .icon_size(Vec2::splat(18.0));
                if ui.add(add).clicked() {
                    actions.push(RowAction::AddToken);
                }
            });
        });
        ui.add_space(Spacing::XS);

        let rows: Option<Vec<(ModelIndex, TokenItem)>> = self.with_tokens(|tokens| {
            tokens
                .items()
                .map(|(index, item)| (index, item.clone()))
                .collect()
        });
        let muted = |text: &str| RichText::new(text).color(CrtColors::text_secondary(dark_mode));
        match rows {
            None => {
                ui.label(muted("This wallet does not track tokens"));
            }
            Some(rows) if rows.is_empty() => {
                ui.label(muted("No tokens yet. Use Add token to track one."));
            }
            Some(rows) => {
                ScrollArea::vertical()
                    .id_salt("token_list")
                    .max_height(ui.available_height() * 0.55)
                    .auto_shrink([false, true])
                    .show(ui, |ui| {
                        for (index, item) in &rows {
                            self.render_token_row(ui, *index, item, &mut actions);
                        }
                    });
            }
        }
        actions
    }

    fn apply_row_action(&mut self, row_action: RowAction) -> AppAction {
        let copied = |ok: bool| {
            if ok {
                AppAction::DisplayMessage("Copied to clipboard".to_string(), MessageType::Info)
            } else {
                AppAction::None
            }
        };
        match row_action {
            RowAction::Select(index) => self.on_current_token_changed(Some(index)),
            RowAction::Send(index) => self.on_send_token(index),
            RowAction::Receive(index) => self.on_receive_token(index),
            RowAction::AddToken => self.on_add_token(),
            RowAction::ContextMenu(index) => {
                self.contextual_menu(Some(index));
            }
            RowAction::Menu(MenuAction::CopySender) => return copied(self.copy_sender_address()),
            RowAction::Menu(MenuAction::CopyBalance) => return copied(self.copy_token_balance()),
            RowAction::Menu(MenuAction::CopyName) => return copied(self.copy_token_name()),
            RowAction::Menu(MenuAction::CopyAddress) => return copied(self.copy_token_address()),
            RowAction::Menu(MenuAction::Remove) => {
                self.remove_token();
            }
            RowAction::MenuOpen => {}
        }
        AppAction::None
    }
}

impl ScreenLike for TokenPanel {
    fn refresh(&mut self) {
        if let Some(model) = &self.model {
            if let Err(err) = model.reload_tokens() {
                tracing::warn!(%err, "Failed to reload tokens");
            }
        }
        self.process_model_events();
        if let Err(err) = self.transaction_view.refresh() {
            tracing::warn!(%err, "Failed to reload token transactions");
        }
    }

    fn ui(&mut self, ctx: &Context) -> AppAction {
        self.process_model_events();
        let mut action = AppAction::None;

        let row_actions = island_central_panel(ctx, |ui| {
            let row_actions = self.render_token_list(ui);
            ui.separator();
            self.transaction_view.ui(ui);
            row_actions
        });
        let menu_open = row_actions
            .iter()
            .any(|row_action| matches!(row_action, RowAction::MenuOpen | RowAction::ContextMenu(_)));
        for row_action in row_actions {
            action |= self.apply_row_action(row_action);
        }
        if !menu_open && self.menu_target.is_some() {
            self.context_menu_closed();
        }

        let send_action = self.send_page.ui(ctx);
        if matches!(send_action, AppAction::DisplayMessage(_, MessageType::Success)) {
            if let Err(err) = self.transaction_view.refresh() {
                tracing::warn!(%err, "Failed to reload token transactions");
            }
        }
        action |= send_action;
        action |= self.receive_page.ui(ctx, self.clipboard.as_mut());
        action |= self.add_page.ui(ctx);

        if self.confirm_removal {
            let response = ConfirmationDialog::new(
                "Confirm token remove",
                "The selected token will be removed from the list. Are you sure?",
            )
            .confirm_text("Remove")
            .danger_mode(true)
            .show(ctx);
            action |= self.resolve_remove_token(response);
        }

        let pending = self
            .with_tokens(|tokens| tokens.has_pending_events())
            .unwrap_or(false);
        if pending {
            ctx.request_repaint();
        }
        action
    }
}
