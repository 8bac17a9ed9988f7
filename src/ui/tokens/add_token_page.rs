use std::sync::Arc;

use egui::{Context, Grid};

use crate::app::AppAction;
use crate::model::token::{TokenFormError, TokenItem, parse_decimals};
use crate::ui::MessageType;
use crate::ui::components::styled::{StyledButton, styled_text_edit_singleline};
use crate::ui::theme::{CrtColors, Spacing};
use crate::wallet::{ClientModel, WalletError, WalletModel};

#[derive(Debug, thiserror::Error)]
pub enum AddTokenError {
    #[error(transparent)]
    Form(#[from] TokenFormError),
    #[error("This token is already in the list")]
    AlreadyTracked,
    #[error("No wallet is loaded")]
    NoWallet,
    #[error(transparent)]
    Wallet(#[from] WalletError),
}

#[derive(Default)]
pub struct AddTokenPage {
    open: bool,
    model: Option<Arc<WalletModel>>,
    client_model: Option<ClientModel>,
    pub contract_address: String,
    pub name: String,
    pub symbol: String,
    pub decimals: String,
    pub sender: String,
    error: Option<String>,
}

impl AddTokenPage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_model(&mut self, model: Arc<WalletModel>) {
        self.model = Some(model);
    }

    pub fn set_client_model(&mut self, client_model: ClientModel) {
        self.client_model = Some(client_model);
    }

    pub fn show(&mut self) {
        self.open = true;
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    fn clear(&mut self) {
        self.contract_address.clear();
        self.name.clear();
        self.symbol.clear();
        self.decimals.clear();
        self.sender.clear();
        self.error = None;
    }

    pub fn submit(&mut self) -> Result<TokenItem, AddTokenError> {
        let model = self.model.as_ref().ok_or(AddTokenError::NoWallet)?;
        let decimals = parse_decimals(&self.decimals)?;
        let token = TokenItem::new(
            &self.contract_address,
            &self.sender,
            &self.name,
            &self.symbol,
            decimals,
        )?;

        if !model.add_token_entry(&token)? {
            return Err(AddTokenError::AlreadyTracked);
        }
        self.clear();
        Ok(token)
    }

    pub fn ui(&mut self, ctx: &Context) -> AppAction {
        let mut action = AppAction::None;
        if !self.open {
            return action;
        }

        let dark_mode = ctx.style().visuals.dark_mode;
        let mut open = self.open;
        let mut confirm_clicked = false;
        let mut clear_clicked = false;

        egui::Window::new("Add token")
            .collapsible(false)
            .resizable(false)
            .open(&mut open)
            .show(ctx, |ui| {
                if let Some(client_model) = &self.client_model {
                    ui.label(format!("Network: {}", client_model.network()));
                }
                Grid::new("add_token_form")
                    .num_columns(2)
                    .spacing([12.0, 8.0])
                    .show(ui, |ui| {
                        ui.label("Contract address:");
                        ui.add(styled_text_edit_singleline(&mut self.contract_address, dark_mode));
                        ui.end_row();

                        ui.label("Token name:");
                        ui.add(styled_text_edit_singleline(&mut self.name, dark_mode));
                        ui.end_row();

                        ui.label("Token symbol:");
                        ui.add(styled_text_edit_singleline(&mut self.symbol, dark_mode));
                        ui.end_row();

                        ui.label("Decimals:");
                        ui.add(styled_text_edit_singleline(&mut self.decimals, dark_mode));
                        ui.end_row();

                        ui.label("Token address:");
                        ui.add(styled_text_edit_singleline(&mut self.sender, dark_mode));
                        ui.end_row();
                    });

                if let Some(error) = &self.error {
                    ui.colored_label(CrtColors::error_color(dark_mode), error);
                }

                ui.add_space(Spacing::SM);
                ui.horizontal(|ui| {
                    confirm_clicked = StyledButton::primary("Confirm").show(ui).clicked();
                    clear_clicked = StyledButton::secondary("Clear").show(ui).clicked();
                });
            });
        self.open = open;

        if clear_clicked {
            self.clear();
        }
        if confirm_clicked {
            match self.submit() {
                Ok(token) => {
                    self.open = false;
                    action = AppAction::DisplayMessage(
                        format!("Token {} added", token.symbol),
                        MessageType::Success,
                    );
                }
                Err(err) => {
                    tracing::debug!(%err, "Add token rejected");
                    self.error = Some(err.to_string());
                }
            }
        }
        action
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Network;
    use crate::database::Database;
    use crate::model::token::test_fixtures::*;
    use crate::wallet::LocalTokenWallet;

    fn page() -> (AddTokenPage, Arc<WalletModel>) {
        let db = Database::in_memory().unwrap();
        db.initialize().unwrap();
        let wallet = Arc::new(LocalTokenWallet::new(Arc::new(db), Network::Regtest));
        let model = Arc::new(WalletModel::new(wallet).unwrap());
        let mut page = AddTokenPage::new();
        page.set_model(Arc::clone(&model));
        (page, model)
    }

    fn fill(page: &mut AddTokenPage) {
        page.contract_address = format!("0x{}", CONTRACT_A.to_uppercase());
        page.name = "Crown Gold".to_string();
        page.symbol = "CGLD".to_string();
        page.decimals = "8".to_string();
        page.sender = SENDER.to_string();
    }

    #[test]
    fn adds_normalized_token_and_clears_form() {
        let (mut page, model) = page();
        fill(&mut page);

        let token = page.submit().unwrap();
        assert_eq!(token.contract_address, CONTRACT_A);
        assert!(page.contract_address.is_empty());
        assert_eq!(model.with_tokens(|tokens| tokens.row_count()), Some(1));
    }

    #[test]
    fn duplicate_is_reported() {
        let (mut page, _) = page();
        fill(&mut page);
        page.submit().unwrap();

        fill(&mut page);
        assert!(matches!(page.submit(), Err(AddTokenError::AlreadyTracked)));
    }

    #[test]
    fn invalid_fields_are_rejected_before_the_wallet() {
        let (mut page, model) = page();
        fill(&mut page);
        page.decimals = "eighteen".to_string();
        assert!(matches!(
            page.submit(),
            Err(AddTokenError::Form(TokenFormError::InvalidDecimals))
        ));

        page.decimals = "18".to_string();
        page.contract_address = "1234".to_string();
        assert!(matches!(
            page.submit(),
            Err(AddTokenError::Form(TokenFormError::InvalidContractAddress))
        ));
        assert_eq!(model.with_tokens(|tokens| tokens.is_empty()), Some(true));
    }
}
