use chrono::{DateTime, Utc};
use rusqlite::params;

use super::{Database, DatabaseResult};
use crate::config::Network;
use crate::model::token_transfer::{TokenTransaction, TokenTransfer};

impl Database {
    /// Record a transfer and return its row id.
    pub fn insert_token_transfer(
        &self,
        transfer: &TokenTransfer,
        created_at: DateTime<Utc>,
        network: Network,
    ) -> DatabaseResult<i64> {
        let conn = self.conn()?;
        conn.execute(
            "INSERT INTO token_tx
             (token_hash, pay_to, raw_amount, gas_limit, gas_price, description, network, created_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
            params![
                transfer.token_hash,
                transfer.pay_to,
                transfer.raw_amount,
                transfer.gas_limit as i64,
                transfer.gas_price,
                transfer.description,
                network.as_str(),
                created_at.timestamp()
            ],
        )?;
        Ok(conn.last_insert_rowid())
    }

    /// Transfers of tokens that are still tracked, newest first.
    pub fn get_token_transactions(&self, network: Network) -> DatabaseResult<Vec<TokenTransaction>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            "SELECT tx.id, tx.token_hash, t.symbol, t.decimals, tx.pay_to, tx.raw_amount,
                    tx.description, tx.created_at
             FROM token_tx tx
             JOIN token t ON t.hash = tx.token_hash AND t.network = tx.network
             WHERE tx.network = ?
             ORDER BY tx.created_at DESC, tx.id DESC",
        )?;
        let rows = stmt.query_map(params![network.as_str()], |row| {
            let created_at: i64 = row.get(7)?;
            Ok(TokenTransaction {
                id: row.get(0)?,
                token_hash: row.get(1)?,
                symbol: row.get(2)?,
                decimals: row.get(3)?,
                pay_to: row.get(4)?,
                raw_amount: row.get(5)?,
                description: row.get(6)?,
                created_at: DateTime::from_timestamp(created_at, 0).unwrap_or_default(),
            })
        })?;

        let mut transactions = Vec::new();
        for row in rows {
            transactions.push(row?);
        }
        Ok(transactions)
    }
}
