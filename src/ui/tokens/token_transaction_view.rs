use std::sync::Arc;

use egui::{RichText, Ui};
use egui_extras::{Column, TableBuilder};

use crate::model::token_transfer::TokenTransaction;
use crate::ui::theme::{CrtColors, Spacing, Typography};
use crate::wallet::{WalletError, WalletModel};

/// History of transfers queued from the send page, newest first.
#[derive(Default)]
pub struct TokenTransactionView {
    model: Option<Arc<WalletModel>>,
    transactions: Vec<TokenTransaction>,
}

impl TokenTransactionView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_model(&mut self, model: Arc<WalletModel>) {
        self.model = Some(model);
        if let Err(err) = self.refresh() {
            tracing::warn!(%err, "Failed to load token transactions");
        }
    }

    pub fn refresh(&mut self) -> Result<(), WalletError> {
        self.transactions = match &self.model {
            Some(model) => model.token_transactions()?,
            None => Vec::new(),
        };
        Ok(())
    }

    pub fn transactions(&self) -> &[TokenTransaction] {
        &self.transactions
    }

    pub fn ui(&mut self, ui: &mut Ui) {
        let dark_mode = ui.ctx().style().visuals.dark_mode;
        ui.label(RichText::new("Token transactions").font(Typography::heading()));
        ui.add_space(Spacing::XS);

        if self.transactions.is_empty() {
            ui.label(
                RichText::new("No token transactions yet")
                    .color(CrtColors::text_secondary(dark_mode)),
            );
            return;
        }

        TableBuilder::new(ui)
            .striped(true)
            .resizable(true)
            .column(Column::initial(140.0).resizable(true)) // Date
            .column(Column::initial(70.0).resizable(true)) // Token
            .column(Column::initial(260.0).resizable(true)) // Pay to
            .column(Column::initial(120.0).resizable(true)) // Amount
            .column(Column::remainder()) // Description
            .header(20.0, |mut header| {
                for title in ["Date", "Token", "Pay to", "Amount", "Description"] {
                    header.col(|ui| {
                        ui.strong(title);
                    });
                }
            })
            .body(|mut body| {
                for tx in &self.transactions {
                    body.row(18.0, |mut row| {
                        row.col(|ui| {
                            ui.label(tx.created_at.format("%Y-%m-%d %H:%M").to_string());
                        });
                        row.col(|ui| {
                            ui.label(&tx.symbol);
                        });
                        row.col(|ui| {
                            ui.label(RichText::new(&tx.pay_to).font(Typography::monospace()));
                        });
                        row.col(|ui| {
                            ui.label(tx.display_amount());
                        });
                        row.col(|ui| {
                            ui.label(&tx.description);
                        });
                    });
                }
            });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Network;
    use crate::database::Database;
    use crate::model::token::test_fixtures::*;
    use crate::model::token_transfer::TokenTransfer;
    use crate::wallet::LocalTokenWallet;

    #[test]
    fn refresh_picks_up_new_transfers() {
        let db = Database::in_memory().unwrap();
        db.initialize().unwrap();
        let wallet = Arc::new(LocalTokenWallet::new(Arc::new(db), Network::Regtest));
        let model = Arc::new(WalletModel::new(wallet).unwrap());
        let item = token(CONTRACT_A, "AAA", "1000");
        model.add_token_entry(&item).unwrap();

        let mut view = TokenTransactionView::new();
        view.set_model(Arc::clone(&model));
        assert!(view.transactions().is_empty());

        model
            .send_token(&TokenTransfer {
                token_hash: item.hash.clone(),
                pay_to: SENDER.to_string(),
                raw_amount: "10".to_string(),
                gas_limit: 250_000,
                gas_price: "0.0000004".to_string(),
                description: String::new(),
            })
            .unwrap();
        view.refresh().unwrap();
        assert_eq!(view.transactions().len(), 1);
        assert_eq!(view.transactions()[0].symbol, "AAA");
    }
}
