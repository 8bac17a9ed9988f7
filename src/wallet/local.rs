use std::sync::Arc;

use chrono::Utc;

use super::{TokenWallet, WalletError, WalletResult};
use crate::config::Network;
use crate::database::Database;
use crate::model::token::TokenItem;
use crate::model::token_transfer::{TokenTransaction, TokenTransfer};

/// [`TokenWallet`] backed by the local sqlite store for one network.
#[derive(Debug, Clone)]
pub struct LocalTokenWallet {
    db: Arc<Database>,
    network: Network,
}

impl LocalTokenWallet {
    pub fn new(db: Arc<Database>, network: Network) -> Self {
        Self { db, network }
    }
}

impl TokenWallet for LocalTokenWallet {
    fn token_entries(&self) -> WalletResult<Vec<TokenItem>> {
        Ok(self.db.get_tokens(self.network)?)
    }

    fn add_token_entry(&self, token: &TokenItem) -> WalletResult<bool> {
        let added = self.db.insert_token(token, self.network)?;
        if added {
            tracing::info!(hash = %token.hash, symbol = %token.symbol, "Token entry added");
        }
        Ok(added)
    }

    fn remove_token_entry(&self, hash: &str) -> WalletResult<bool> {
        let removed = self.db.remove_token(hash, self.network)?;
        if removed {
            tracing::info!(%hash, "Token entry removed");
        }
        Ok(removed)
    }

    fn set_token_balance(&self, hash: &str, raw_balance: &str) -> WalletResult<()> {
        if self.db.set_token_balance(hash, raw_balance, self.network)? {
            Ok(())
        } else {
            Err(WalletError::UnknownToken(hash.to_string()))
        }
    }

    fn send_token(&self, transfer: &TokenTransfer) -> WalletResult<i64> {
        let tracked = self
            .token_entries()?
            .iter()
            .any(|token| token.hash == transfer.token_hash);
        if !tracked {
            return Err(WalletError::UnknownToken(transfer.token_hash.clone()));
        }
        let id = self
            .db
            .insert_token_transfer(transfer, Utc::now(), self.network)?;
        tracing::info!(id, token = %transfer.token_hash, pay_to = %transfer.pay_to, "Token transfer queued");
        Ok(id)
    }

    fn token_transactions(&self) -> WalletResult<Vec<TokenTransaction>> {
        Ok(self.db.get_token_transactions(self.network)?)
    }
}
