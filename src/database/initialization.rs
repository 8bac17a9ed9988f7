use crate::database::{Database, DatabaseResult};

pub const DB_VERSION: u16 = 1;

impl Database {
    pub fn initialize(&self) -> DatabaseResult<()> {
        let conn = self.conn()?;
        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS token (
                hash TEXT NOT NULL,
                contract_address TEXT NOT NULL,
                sender TEXT NOT NULL,
                name TEXT NOT NULL,
                symbol TEXT NOT NULL,
                decimals INTEGER NOT NULL,
                raw_balance TEXT NOT NULL DEFAULT '0',
                network TEXT NOT NULL,
                PRIMARY KEY (hash, network)
            );
            CREATE TABLE IF NOT EXISTS token_tx (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                token_hash TEXT NOT NULL,
                pay_to TEXT NOT NULL,
                raw_amount TEXT NOT NULL,
                gas_limit INTEGER NOT NULL,
                gas_price TEXT NOT NULL,
                description TEXT NOT NULL,
                network TEXT NOT NULL,
                created_at INTEGER NOT NULL
            );",
        )?;

        let version: u16 = conn.query_row("PRAGMA user_version", [], |row| row.get(0))?;
        if version < DB_VERSION {
            tracing::info!(from = version, to = DB_VERSION, "Upgrading token database");
            conn.execute_batch(&format!("PRAGMA user_version = {}", DB_VERSION))?;
        }
        Ok(())
    }

    pub fn version(&self) -> DatabaseResult<u16> {
        let conn = self.conn()?;
        Ok(conn.query_row("PRAGMA user_version", [], |row| row.get(0))?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initialize_is_idempotent_and_sets_version() {
        let dir = tempfile::tempdir().unwrap();
        let db = Database::new(dir.path().join("tokens.db")).unwrap();
        db.initialize().unwrap();
        db.initialize().unwrap();
        assert_eq!(db.version().unwrap(), DB_VERSION);
    }
}
