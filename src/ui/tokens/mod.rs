pub mod add_token_page;
pub mod receive_token_page;
pub mod send_token_page;
pub mod token_panel;
pub mod token_transaction_view;
