use rusqlite::params;

use super::{Database, DatabaseResult};
use crate::config::Network;
use crate::model::token::TokenItem;

impl Database {
    /// Insert a tracked token. Returns `false` if the hash is already tracked.
    pub fn insert_token(&self, token: &TokenItem, network: Network) -> DatabaseResult<bool> {
        let inserted = self.execute(
            "INSERT OR IGNORE INTO token
             (hash, contract_address, sender, name, symbol, decimals, raw_balance, network)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
            params![
                token.hash,
                token.contract_address,
                token.sender,
                token.name,
                token.symbol,
                token.decimals,
                token.raw_balance,
                network.as_str()
            ],
        )?;
        Ok(inserted == 1)
    }

    /// All tracked tokens in the order they were added.
    pub fn get_tokens(&self, network: Network) -> DatabaseResult<Vec<TokenItem>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            "SELECT hash, contract_address, sender, name, symbol, decimals, raw_balance
             FROM token
             WHERE network = ?
             ORDER BY rowid",
        )?;
        let rows = stmt.query_map(params![network.as_str()], |row| {
            Ok(TokenItem {
                hash: row.get(0)?,
                contract_address: row.get(1)?,
                sender: row.get(2)?,
                name: row.get(3)?,
                symbol: row.get(4)?,
                decimals: row.get(5)?,
                raw_balance: row.get(6)?,
            })
        })?;

        let mut tokens = Vec::new();
        for row in rows {
            tokens.push(row?);
        }
        Ok(tokens)
    }

    pub fn remove_token(&self, hash: &str, network: Network) -> DatabaseResult<bool> {
        let removed = self.execute(
            "DELETE FROM token WHERE hash = ? AND network = ?",
            params![hash, network.as_str()],
        )?;
        Ok(removed > 0)
    }

    pub fn set_token_balance(
        &self,
        hash: &str,
        raw_balance: &str,
        network: Network,
    ) -> DatabaseResult<bool> {
        let updated = self.execute(
            "UPDATE token SET raw_balance = ? WHERE hash = ? AND network = ?",
            params![raw_balance, hash, network.as_str()],
        )?;
        Ok(updated > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::token::test_fixtures::*;

    fn database() -> Database {
        let db = Database::in_memory().unwrap();
        db.initialize().unwrap();
        db
    }

    #[test]
    fn insert_and_list_in_insertion_order() {
        let db = database();
        let b = token(CONTRACT_B, "BBB", "7");
        let a = token(CONTRACT_A, "AAA", "0");
        assert!(db.insert_token(&b, Network::Mainnet).unwrap());
        assert!(db.insert_token(&a, Network::Mainnet).unwrap());
        assert!(!db.insert_token(&a, Network::Mainnet).unwrap());

        assert_eq!(db.get_tokens(Network::Mainnet).unwrap(), vec![b, a]);
        assert!(db.get_tokens(Network::Testnet).unwrap().is_empty());
    }

    #[test]
    fn remove_is_scoped_to_network() {
        let db = database();
        let a = token(CONTRACT_A, "AAA", "0");
        db.insert_token(&a, Network::Mainnet).unwrap();
        db.insert_token(&a, Network::Testnet).unwrap();

        assert!(db.remove_token(&a.hash, Network::Testnet).unwrap());
        assert!(!db.remove_token(&a.hash, Network::Testnet).unwrap());
        assert_eq!(db.get_tokens(Network::Mainnet).unwrap().len(), 1);
    }

    #[test]
    fn balance_update() {
        let db = database();
        let a = token(CONTRACT_A, "AAA", "0");
        db.insert_token(&a, Network::Mainnet).unwrap();

        assert!(db.set_token_balance(&a.hash, "1234", Network::Mainnet).unwrap());
        assert!(!db.set_token_balance("nope", "1", Network::Mainnet).unwrap());
        assert_eq!(db.get_tokens(Network::Mainnet).unwrap()[0].raw_balance, "1234");
    }
}
