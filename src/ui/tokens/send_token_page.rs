use std::cmp::Ordering;
use std::sync::Arc;

use egui::{Context, Grid, RichText};

use crate::app::AppAction;
use crate::model::amount::{
    AmountError, compare_raw_amounts, format_token_amount, is_zero_amount, parse_token_amount,
};
use crate::model::token::{token_hash, validate_sender};
use crate::model::token_transfer::TokenTransfer;
use crate::ui::MessageType;
use crate::ui::components::styled::{StyledButton, styled_text_edit_singleline};
use crate::ui::theme::{CrtColors, Spacing, Typography};
use crate::wallet::{ClientModel, WalletError, WalletModel};

/// Gas prices are entered in whole coins with this many decimals.
const GAS_PRICE_DECIMALS: u8 = 8;

#[derive(Debug, thiserror::Error)]
pub enum SendTokenError {
    #[error("No token is selected")]
    NoToken,
    #[error("No wallet is loaded")]
    NoWallet,
    #[error("Pay to is not a valid address")]
    InvalidPayTo,
    #[error("Invalid amount: {0}")]
    InvalidAmount(#[from] AmountError),
    #[error("Amount must be greater than zero")]
    ZeroAmount,
    #[error("Amount exceeds the token balance")]
    InsufficientBalance,
    #[error("Gas limit must be a positive whole number")]
    InvalidGasLimit,
    #[error("Invalid gas price: {0}")]
    InvalidGasPrice(AmountError),
    #[error(transparent)]
    Wallet(#[from] WalletError),
}

/// Token the page currently sends from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SendTokenData {
    pub address: String,
    pub sender: String,
    pub symbol: String,
    pub decimals: u8,
    pub raw_balance: String,
}

#[derive(Default)]
pub struct SendTokenPage {
    open: bool,
    enabled: bool,
    model: Option<Arc<WalletModel>>,
    client_model: Option<ClientModel>,
    token: Option<SendTokenData>,
    pub pay_to: String,
    pub amount: String,
    pub gas_limit: String,
    pub gas_price: String,
    pub description: String,
    error: Option<String>,
}

impl SendTokenPage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_model(&mut self, model: Arc<WalletModel>) {
        self.model = Some(model);
    }

    pub fn set_client_model(&mut self, client_model: ClientModel) {
        self.gas_limit = client_model.default_gas_limit().to_string();
        self.gas_price = client_model.default_gas_price().to_string();
        self.client_model = Some(client_model);
    }

    pub fn set_token_data(
        &mut self,
        address: &str,
        sender: &str,
        symbol: &str,
        decimals: u8,
        raw_balance: &str,
    ) {
        self.token = Some(SendTokenData {
            address: address.to_string(),
            sender: sender.to_string(),
            symbol: symbol.to_string(),
            decimals,
            raw_balance: raw_balance.to_string(),
        });
    }

    pub fn token(&self) -> Option<&SendTokenData> {
        self.token.as_ref()
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn show(&mut self) {
        self.open = true;
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    fn clear_form(&mut self) {
        self.pay_to.clear();
        self.amount.clear();
        self.description.clear();
        self.error = None;
    }

    /// Validate the form and queue the transfer; returns the queued id.
    pub fn submit(&mut self) -> Result<i64, SendTokenError> {
        let token = self.token.as_ref().ok_or(SendTokenError::NoToken)?;
        let model = self.model.as_ref().ok_or(SendTokenError::NoWallet)?;

        let pay_to = self.pay_to.trim();
        validate_sender(pay_to).map_err(|_| SendTokenError::InvalidPayTo)?;

        let raw_amount = parse_token_amount(&self.amount, token.decimals)?;
        if is_zero_amount(&raw_amount) {
            return Err(SendTokenError::ZeroAmount);
        }
        if compare_raw_amounts(&raw_amount, &token.raw_balance) == Ordering::Greater {
            return Err(SendTokenError::InsufficientBalance);
        }

        let gas_limit = match self.gas_limit.trim().parse::<u64>() {
            Ok(limit) if limit > 0 => limit,
            _ => return Err(SendTokenError::InvalidGasLimit),
        };
        parse_token_amount(&self.gas_price, GAS_PRICE_DECIMALS)
            .map_err(SendTokenError::InvalidGasPrice)?;

        let transfer = TokenTransfer {
            token_hash: token_hash(&token.address, &token.sender),
            pay_to: pay_to.to_string(),
            raw_amount,
            gas_limit,
            gas_price: self.gas_price.trim().to_string(),
            description: self.description.trim().to_string(),
        };
        let id = model.send_token(&transfer)?;
        tracing::debug!(id, symbol = %token.symbol, "Send page submitted transfer");

        self.clear_form();
        Ok(id)
    }

    pub fn ui(&mut self, ctx: &Context) -> AppAction {
        let mut action = AppAction::None;
        if !self.open {
            return action;
        }

        let dark_mode = ctx.style().visuals.dark_mode;
        let mut open = self.open;
        let mut send_clicked = false;

        egui::Window::new("Send token")
            .collapsible(false)
            .resizable(false)
            .open(&mut open)
            .show(ctx, |ui| {
                ui.add_enabled_ui(self.enabled, |ui| {
                    match &self.token {
                        Some(token) => {
                            let balance = format_token_amount(&token.raw_balance, token.decimals)
                                .unwrap_or_else(|_| token.raw_balance.clone());
                            ui.label(
                                RichText::new(format!("{} {}", balance, token.symbol))
                                    .font(Typography::heading()),
                            );
                            ui.label(
                                RichText::new(&token.address)
                                    .font(Typography::monospace())
                                    .color(CrtColors::text_secondary(dark_mode)),
                            );
                        }
                        None => {
                            ui.label("No token selected");
                        }
                    }
                    if let Some(client_model) = &self.client_model {
                        ui.label(
                            RichText::new(format!("Network: {}", client_model.network()))
                                .font(Typography::caption())
                                .color(CrtColors::text_secondary(dark_mode)),
                        );
                    }
                    ui.separator();

                    Grid::new("send_token_form")
                        .num_columns(2)
                        .spacing([12.0, 8.0])
                        .show(ui, |ui| {
                            ui.label("Pay to:");
                            ui.add(styled_text_edit_singleline(&mut self.pay_to, dark_mode));
                            ui.end_row();

                            ui.label("Amount:");
                            ui.add(styled_text_edit_singleline(&mut self.amount, dark_mode));
                            ui.end_row();

                            ui.label("Description:");
                            ui.add(styled_text_edit_singleline(&mut self.description, dark_mode));
                            ui.end_row();

                            ui.label("Gas limit:");
                            ui.add(styled_text_edit_singleline(&mut self.gas_limit, dark_mode));
                            ui.end_row();

                            ui.label("Gas price:");
                            ui.add(styled_text_edit_singleline(&mut self.gas_price, dark_mode));
                            ui.end_row();
                        });

                    if let Some(error) = &self.error {
                        ui.colored_label(CrtColors::error_color(dark_mode), error);
                    }

                    ui.add_space(Spacing::SM);
                    if StyledButton::primary("Confirm send").show(ui).clicked() {
                        send_clicked = true;
                    }
                });
            });
        self.open = open;

        if send_clicked {
            match self.submit() {
                Ok(_) => {
                    self.open = false;
                    action = AppAction::DisplayMessage(
                        "Token transfer queued".to_string(),
                        MessageType::Success,
                    );
                }
                Err(err) => {
                    tracing::debug!(%err, "Send token rejected");
                    self.error = Some(err.to_string());
                    action = AppAction::DisplayMessage(err.to_string(), MessageType::Error);
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

    const PAY_TO: &str = "CRTQeKWfpJd2Lz3a5NRBmzmwy8bfq2vMeWZ8";

    fn page_with_token(raw_balance: &str) -> (SendTokenPage, Arc<WalletModel>) {
        let db = Database::in_memory().unwrap();
        db.initialize().unwrap();
        let wallet = Arc::new(LocalTokenWallet::new(Arc::new(db), Network::Regtest));
        let model = Arc::new(WalletModel::new(wallet).unwrap());
        let item = token(CONTRACT_A, "AAA", raw_balance);
        model.add_token_entry(&item).unwrap();

        let mut page = SendTokenPage::new();
        page.set_model(Arc::clone(&model));
        page.set_client_model(ClientModel::new(Network::Regtest, 250_000, "0.0000004"));
        page.set_token_data(&item.contract_address, &item.sender, "AAA", 8, raw_balance);
        page.set_enabled(true);
        (page, model)
    }

    #[test]
    fn client_model_fills_gas_defaults() {
        let (page, _) = page_with_token("1");
        assert_eq!(page.gas_limit, "250000");
        assert_eq!(page.gas_price, "0.0000004");
    }

    #[test]
    fn valid_transfer_is_queued_and_form_cleared() {
        let (mut page, model) = page_with_token("150000000");
        page.pay_to = PAY_TO.to_string();
        page.amount = "1.25".to_string();
        page.description = "rent".to_string();

        let id = page.submit().unwrap();
        assert!(id > 0);
        assert!(page.pay_to.is_empty() && page.amount.is_empty());

        let history = model.token_transactions().unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].raw_amount, "125000000");
        assert_eq!(history[0].description, "rent");
    }

    #[test]
    fn rejects_bad_input() {
        let (mut page, _) = page_with_token("100000000");
        page.pay_to = PAY_TO.to_string();

        page.amount = "2".to_string();
        assert!(matches!(page.submit(), Err(SendTokenError::InsufficientBalance)));

        page.amount = "0.000".to_string();
        assert!(matches!(page.submit(), Err(SendTokenError::ZeroAmount)));

        page.amount = "0.123456789".to_string();
        assert!(matches!(page.submit(), Err(SendTokenError::InvalidAmount(_))));

        page.amount = "0.5".to_string();
        page.gas_limit = "0".to_string();
        assert!(matches!(page.submit(), Err(SendTokenError::InvalidGasLimit)));

        page.gas_limit = "21000".to_string();
        page.pay_to = "not an address".to_string();
        assert!(matches!(page.submit(), Err(SendTokenError::InvalidPayTo)));
    }

    #[test]
    fn nothing_to_send_without_token() {
        let mut page = SendTokenPage::new();
        assert!(matches!(page.submit(), Err(SendTokenError::NoToken)));
    }
}
