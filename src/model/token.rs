use crate::model::amount::{AmountError, MAX_TOKEN_DECIMALS, format_token_amount};
use sha2::{Digest, Sha256};
use std::fmt;

/// Length of a hex encoded contract address (20 bytes).
pub const CONTRACT_ADDRESS_LEN: usize = 40;
pub const MAX_SYMBOL_LEN: usize = 16;

/// One tracked token contract for one wallet address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenItem {
    pub hash: String,
    pub contract_address: String,
    pub sender: String,
    pub name: String,
    pub symbol: String,
    pub decimals: u8,
    /// Balance in base units
    pub raw_balance: String,
}

/// Columns a token row exposes to views.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenRole {
    Hash,
    Address,
    Symbol,
    Sender,
    Decimals,
    RawBalance,
    Balance,
    Name,
}

impl fmt::Display for TokenRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TokenRole::Hash => "hash",
            TokenRole::Address => "contract address",
            TokenRole::Symbol => "symbol",
            TokenRole::Sender => "receive address",
            TokenRole::Decimals => "decimals",
            TokenRole::RawBalance => "raw balance",
            TokenRole::Balance => "token balance",
            TokenRole::Name => "token name",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TokenFormError {
    #[error("Contract address must be {} hex characters", CONTRACT_ADDRESS_LEN)]
    InvalidContractAddress,
    #[error("Token name is required")]
    MissingName,
    #[error("Token symbol must be 1 to {} letters or digits", MAX_SYMBOL_LEN)]
    InvalidSymbol,
    #[error("Decimals must be a number between 0 and {}", MAX_TOKEN_DECIMALS)]
    InvalidDecimals,
    #[error("Receive address is required and may only contain letters and digits")]
    InvalidSender,
}

/// Stable row identity: SHA-256 over the contract and the wallet address holding it.
pub fn token_hash(contract_address: &str, sender: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(contract_address.to_ascii_lowercase().as_bytes());
    hasher.update(sender.as_bytes());
    hex::encode(hasher.finalize())
}

pub fn validate_contract_address(address: &str) -> Result<(), TokenFormError> {
    let address = address.trim();
    let address = address.strip_prefix("0x").unwrap_or(address);
    if address.len() == CONTRACT_ADDRESS_LEN && address.chars().all(|c| c.is_ascii_hexdigit()) {
        Ok(())
    } else {
        Err(TokenFormError::InvalidContractAddress)
    }
}

pub fn validate_symbol(symbol: &str) -> Result<(), TokenFormError> {
    let symbol = symbol.trim();
    if !symbol.is_empty()
        && symbol.len() <= MAX_SYMBOL_LEN
        && symbol.chars().all(|c| c.is_ascii_alphanumeric())
    {
        Ok(())
    } else {
        Err(TokenFormError::InvalidSymbol)
    }
}

pub fn validate_sender(sender: &str) -> Result<(), TokenFormError> {
    let sender = sender.trim();
    if !sender.is_empty() && sender.chars().all(|c| c.is_ascii_alphanumeric()) {
        Ok(())
    } else {
        Err(TokenFormError::InvalidSender)
    }
}

pub fn parse_decimals(text: &str) -> Result<u8, TokenFormError> {
    match text.trim().parse::<u8>() {
        Ok(decimals) if decimals <= MAX_TOKEN_DECIMALS => Ok(decimals),
        _ => Err(TokenFormError::InvalidDecimals),
    }
}

impl TokenItem {
    /// Build a validated item with a zero balance.
    pub fn new(
        contract_address: &str,
        sender: &str,
        name: &str,
        symbol: &str,
        decimals: u8,
    ) -> Result<Self, TokenFormError> {
        validate_contract_address(contract_address)?;
        validate_sender(sender)?;
        validate_symbol(symbol)?;
        if name.trim().is_empty() {
            return Err(TokenFormError::MissingName);
        }
        if decimals > MAX_TOKEN_DECIMALS {
            return Err(TokenFormError::InvalidDecimals);
        }

        let contract_address = contract_address.trim();
        let contract_address = contract_address
            .strip_prefix("0x")
            .unwrap_or(contract_address)
            .to_ascii_lowercase();
        let sender = sender.trim().to_string();

        Ok(Self {
            hash: token_hash(&contract_address, &sender),
            contract_address,
            sender,
            name: name.trim().to_string(),
            symbol: symbol.trim().to_string(),
            decimals,
            raw_balance: "0".to_string(),
        })
    }

    pub fn with_raw_balance(mut self, raw_balance: impl Into<String>) -> Self {
        self.raw_balance = raw_balance.into();
        self
    }

    pub fn display_balance(&self) -> Result<String, AmountError> {
        format_token_amount(&self.raw_balance, self.decimals)
    }

    /// Value of one column, formatted for display or the clipboard.
    pub fn data(&self, role: TokenRole) -> String {
        match role {
            TokenRole::Hash => self.hash.clone(),
            TokenRole::Address => self.contract_address.clone(),
            TokenRole::Symbol => self.symbol.clone(),
            TokenRole::Sender => self.sender.clone(),
            TokenRole::Decimals => self.decimals.to_string(),
            TokenRole::RawBalance => self.raw_balance.clone(),
            TokenRole::Balance => self
                .display_balance()
                .unwrap_or_else(|_| self.raw_balance.clone()),
            TokenRole::Name => self.name.clone(),
        }
    }
}

#[cfg(test)]
pub(crate) mod test_fixtures {
    use super::TokenItem;

    pub const CONTRACT_A: &str = "f2033ede578e17fa6231047265010445bca8cf1c";
    pub const CONTRACT_B: &str = "09800417b097c61b9fd26b3ddde4238304a110d5";
    pub const SENDER: &str = "CRTjZ6uBXS9WyCZkS3iDKnfQdmBp6HykNe";

    pub fn token(contract: &str, symbol: &str, raw_balance: &str) -> TokenItem {
        TokenItem::new(contract, SENDER, &format!("{} Token", symbol), symbol, 8)
            .expect("fixture token is valid")
            .with_raw_balance(raw_balance)
    }
}

#[cfg(test)]
mod tests {
    use super::test_fixtures::*;
    use super::*;

    #[test]
    fn hash_depends_on_contract_and_sender() {
        let a = token_hash(CONTRACT_A, SENDER);
        assert_eq!(a.len(), 64);
        assert_eq!(a, token_hash(&CONTRACT_A.to_uppercase(), SENDER));
        assert_ne!(a, token_hash(CONTRACT_B, SENDER));
        assert_ne!(a, token_hash(CONTRACT_A, "CRTother"));
    }

    #[test]
    fn new_normalizes_contract_address() {
        let item = TokenItem::new(
            &format!("0x{}", CONTRACT_A.to_uppercase()),
            SENDER,
            " Crown ",
            "CRW",
            8,
        )
        .unwrap();
        assert_eq!(item.contract_address, CONTRACT_A);
        assert_eq!(item.name, "Crown");
        assert_eq!(item.raw_balance, "0");
        assert_eq!(item.hash, token_hash(CONTRACT_A, SENDER));
    }

    #[test]
    fn new_rejects_invalid_fields() {
        assert_eq!(
            TokenItem::new("abc", SENDER, "n", "S", 8),
            Err(TokenFormError::InvalidContractAddress)
        );
        assert_eq!(
            TokenItem::new(CONTRACT_A, "", "n", "S", 8),
            Err(TokenFormError::InvalidSender)
        );
        assert_eq!(
            TokenItem::new(CONTRACT_A, SENDER, "n", "S-1", 8),
            Err(TokenFormError::InvalidSymbol)
        );
        assert_eq!(
            TokenItem::new(CONTRACT_A, SENDER, "  ", "S", 8),
            Err(TokenFormError::MissingName)
        );
        assert_eq!(
            TokenItem::new(CONTRACT_A, SENDER, "n", "S", 78),
            Err(TokenFormError::InvalidDecimals)
        );
    }

    #[test]
    fn data_by_role() {
        let item = token(CONTRACT_A, "CRW", "250000000");
        assert_eq!(item.data(TokenRole::Balance), "2.5");
        assert_eq!(item.data(TokenRole::RawBalance), "250000000");
        assert_eq!(item.data(TokenRole::Decimals), "8");
        assert_eq!(item.data(TokenRole::Name), "CRW Token");
        assert_eq!(item.data(TokenRole::Sender), SENDER);
        assert_eq!(item.data(TokenRole::Address), CONTRACT_A);
    }

    #[test]
    fn parse_decimals_bounds() {
        assert_eq!(parse_decimals(" 18 "), Ok(18));
        assert_eq!(parse_decimals("77"), Ok(77));
        assert_eq!(parse_decimals("78"), Err(TokenFormError::InvalidDecimals));
        assert_eq!(parse_decimals("x"), Err(TokenFormError::InvalidDecimals));
    }
}
