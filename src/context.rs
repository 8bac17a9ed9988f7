use crate::config::{Config, ConfigError};
use crate::database::{Database, DatabaseError};
use crate::wallet::{ClientModel, LocalTokenWallet, WalletError, WalletModel};
use std::sync::Arc;

#[derive(Debug, thiserror::Error)]
pub enum AppContextError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("Failed to open token database: {0}")]
    Database(#[from] DatabaseError),
    #[error("Failed to load wallet tokens: {0}")]
    Wallet(#[from] WalletError),
}

/// Everything the screens share: settings, storage and the wallet models.
#[derive(Debug)]
pub struct AppContext {
    pub config: Config,
    pub db: Arc<Database>,
    pub wallet_model: Arc<WalletModel>,
    pub client_model: ClientModel,
}

impl AppContext {
    /// Open the database named by `config` and load the wallet from it.
    pub fn new(config: Config) -> Result<Arc<Self>, AppContextError> {
        let path = config.database_path()?;
        tracing::info!(path = %path.display(), network = %config.network, "Opening token database");
        let db = Database::new(&path)?;
        Self::with_database(config, db)
    }

    /// Like [`AppContext::new`] over an already opened database.
    pub fn with_database(config: Config, db: Database) -> Result<Arc<Self>, AppContextError> {
        db.initialize()?;
        let db = Arc::new(db);

        let wallet = Arc::new(LocalTokenWallet::new(Arc::clone(&db), config.network));
        let wallet_model = Arc::new(WalletModel::new(wallet)?);
        let client_model = ClientModel::from_config(&config);

        Ok(Arc::new(Self {
            config,
            db,
            wallet_model,
            client_model,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::token::test_fixtures::*;

    #[test]
    fn file_backed_context_keeps_tokens_between_opens() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config {
            database_file: dir.path().join("tokens.db").display().to_string(),
            ..Config::default()
        };

        let context = AppContext::new(config.clone()).unwrap();
        context
            .wallet_model
            .add_token_entry(&token(CONTRACT_A, "AAA", "5"))
            .unwrap();
        drop(context);

        let reopened = AppContext::new(config).unwrap();
        assert_eq!(
            reopened.wallet_model.with_tokens(|tokens| tokens.row_count()),
            Some(1)
        );
        assert_eq!(reopened.client_model.default_gas_limit(), 250_000);
    }
}
