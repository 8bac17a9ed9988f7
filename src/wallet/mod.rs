//! Wallet handles the token panel talks to.
//!
//! The panel only sees [`TokenWallet`] through [`WalletModel`]; key
//! management and chain access live behind that trait.

mod client_model;
mod local;
mod wallet_model;

pub use client_model::ClientModel;
pub use local::LocalTokenWallet;
pub use wallet_model::WalletModel;

use crate::database::DatabaseError;
use crate::model::token::TokenItem;
use crate::model::token_transfer::{TokenTransaction, TokenTransfer};

#[derive(Debug, thiserror::Error)]
pub enum WalletError {
    #[error("Wallet storage error: {0}")]
    Storage(#[from] DatabaseError),
    #[error("Token {0} is not tracked by this wallet")]
    UnknownToken(String),
    #[error("Token model lock was poisoned")]
    ModelPoisoned,
}

pub type WalletResult<T> = Result<T, WalletError>;

/// Token bookkeeping a wallet exposes, keyed by token hash.
pub trait TokenWallet: Send + Sync {
    fn token_entries(&self) -> WalletResult<Vec<TokenItem>>;

    /// Returns `false` if the token was already tracked.
    fn add_token_entry(&self, token: &TokenItem) -> WalletResult<bool>;

    /// Returns `false` if nothing was tracked under `hash`.
    fn remove_token_entry(&self, hash: &str) -> WalletResult<bool>;

    fn set_token_balance(&self, hash: &str, raw_balance: &str) -> WalletResult<()>;

    /// Queue a transfer; returns its id in the wallet's history.
    fn send_token(&self, transfer: &TokenTransfer) -> WalletResult<i64>;

    fn token_transactions(&self) -> WalletResult<Vec<TokenTransaction>>;
}
