use std::sync::{Arc, RwLock};

use super::{TokenWallet, WalletError, WalletResult};
use crate::model::token::TokenItem;
use crate::model::token_item_model::{TokenItemModel, TokenModelEvent};
use crate::model::token_transfer::{TokenTransaction, TokenTransfer};

/// A wallet handle plus the token list model views bind to.
///
/// Every mutation goes to the wallet first and is then mirrored into the
/// model, which queues the change notifications views pick up.
pub struct WalletModel {
    wallet: Arc<dyn TokenWallet>,
    token_item_model: Option<RwLock<TokenItemModel>>,
}

impl std::fmt::Debug for WalletModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WalletModel")
            .field("has_token_model", &self.token_item_model.is_some())
            .finish()
    }
}

impl WalletModel {
    /// Wrap `wallet` and fill the token model from it.
    pub fn new(wallet: Arc<dyn TokenWallet>) -> WalletResult<Self> {
        let model = Self {
            wallet,
            token_item_model: Some(RwLock::new(TokenItemModel::new())),
        };
        model.reload_tokens()?;
        Ok(model)
    }

    /// A wallet that does not track tokens; token views stay empty.
    pub fn without_tokens(wallet: Arc<dyn TokenWallet>) -> Self {
        Self {
            wallet,
            token_item_model: None,
        }
    }

    pub fn has_token_model(&self) -> bool {
        self.token_item_model.is_some()
    }

    /// Run `f` against the token model. `None` if there is no model.
    pub fn with_tokens<R>(&self, f: impl FnOnce(&TokenItemModel) -> R) -> Option<R> {
        let model = self.token_item_model.as_ref()?;
        match model.read() {
            Ok(guard) => Some(f(&guard)),
            Err(_) => {
                tracing::error!("Token model lock poisoned");
                None
            }
        }
    }

    fn with_tokens_mut<R>(&self, f: impl FnOnce(&mut TokenItemModel) -> R) -> WalletResult<Option<R>> {
        let Some(model) = self.token_item_model.as_ref() else {
            return Ok(None);
        };
        let mut guard = model.write().map_err(|_| WalletError::ModelPoisoned)?;
        Ok(Some(f(&mut guard)))
    }

    /// Notifications queued since the last call.
    pub fn drain_token_events(&self) -> Vec<TokenModelEvent> {
        self.with_tokens_mut(|model| model.drain_events())
            .ok()
            .flatten()
            .unwrap_or_default()
    }

    /// Re-read the wallet's entries into the model.
    pub fn reload_tokens(&self) -> WalletResult<()> {
        if !self.has_token_model() {
            return Ok(());
        }
        let tokens = self.wallet.token_entries()?;
        tracing::debug!(count = tokens.len(), "Reloading token model");
        self.with_tokens_mut(|model| model.set_tokens(tokens))?;
        Ok(())
    }

    pub fn add_token_entry(&self, token: &TokenItem) -> WalletResult<bool> {
        let added = self.wallet.add_token_entry(token)?;
        if added {
            self.with_tokens_mut(|model| model.insert_token(token.clone()))?;
        }
        Ok(added)
    }

    pub fn remove_token_entry(&self, hash: &str) -> WalletResult<bool> {
        let removed = self.wallet.remove_token_entry(hash)?;
        if removed {
            self.with_tokens_mut(|model| model.remove_token(hash))?;
        }
        Ok(removed)
    }

    pub fn set_token_balance(&self, hash: &str, raw_balance: &str) -> WalletResult<()> {
        self.wallet.set_token_balance(hash, raw_balance)?;
        self.with_tokens_mut(|model| model.update_balance(hash, raw_balance))?;
        Ok(())
    }

    pub fn send_token(&self, transfer: &TokenTransfer) -> WalletResult<i64> {
        self.wallet.send_token(transfer)
    }

    pub fn token_transactions(&self) -> WalletResult<Vec<TokenTransaction>> {
        self.wallet.token_transactions()
    }
}
