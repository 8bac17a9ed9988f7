pub mod amount;
pub mod token;
pub mod token_item_model;
pub mod token_transfer;
