use crate::model::amount::format_token_amount;
use chrono::{DateTime, Utc};

/// A transfer the user asked for on the send page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenTransfer {
    pub token_hash: String,
    pub pay_to: String,
    /// Amount in base units
    pub raw_amount: String,
    pub gas_limit: u64,
    pub gas_price: String,
    pub description: String,
}

/// A recorded transfer, joined with the token it moves.
#[derive(Debug, Clone, PartialEq)]
pub struct TokenTransaction {
    pub id: i64,
    pub token_hash: String,
    pub symbol: String,
    pub decimals: u8,
    pub pay_to: String,
    pub raw_amount: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
}

impl TokenTransaction {
    pub fn display_amount(&self) -> String {
        format_token_amount(&self.raw_amount, self.decimals)
            .unwrap_or_else(|_| self.raw_amount.clone())
    }
}
