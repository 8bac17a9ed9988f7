mod initialization;
mod token_transactions;
mod tokens;

pub use initialization::DB_VERSION;

use rusqlite::{Connection, Params};
use std::path::Path;
use std::sync::{Mutex, MutexGuard};

#[derive(Debug, thiserror::Error)]
pub enum DatabaseError {
    #[error(transparent)]
    Sqlite(#[from] rusqlite::Error),
    #[error("Database connection lock was poisoned")]
    Poisoned,
}

pub type DatabaseResult<T> = Result<T, DatabaseError>;

#[derive(Debug)]
pub struct Database {
    conn: Mutex<Connection>,
}

impl Database {
    pub fn new<P: AsRef<Path>>(path: P) -> DatabaseResult<Self> {
        let conn = Connection::open(path)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    pub fn in_memory() -> DatabaseResult<Self> {
        let conn = Connection::open_in_memory()?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn conn(&self) -> DatabaseResult<MutexGuard<'_, Connection>> {
        self.conn.lock().map_err(|_| DatabaseError::Poisoned)
    }

    fn execute<P: Params>(&self, sql: &str, params: P) -> DatabaseResult<usize> {
        let conn = self.conn()?;
        Ok(conn.execute(sql, params)?)
    }
}
