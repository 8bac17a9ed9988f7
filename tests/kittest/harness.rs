use crt_token_panel::app::AppState;
use crt_token_panel::config::{Config, Network};
use crt_token_panel::context::AppContext;
use crt_token_panel::database::Database;
use crt_token_panel::model::token::TokenItem;
use crt_token_panel::ui::components::RecordingClipboard;
use crt_token_panel::ui::theme::ThemeMode;
use egui_kittest::Harness;
use std::sync::Arc;

pub const CONTRACT: &str = "f2033ede578e17fa6231047265010445bca8cf1c";
pub const SENDER: &str = "CRTjZ6uBXS9WyCZkS3iDKnfQdmBp6HykNe";

/// Regtest context over an in-memory database holding `tokens`.
pub fn context_with(tokens: &[TokenItem]) -> Arc<AppContext> {
    let config = Config {
        network: Network::Regtest,
        theme: ThemeMode::Light,
        ..Config::default()
    };
    let db = Database::in_memory().expect("in-memory database");
    let context = AppContext::with_database(config, db).expect("app context");
    for token in tokens {
        context
            .wallet_model
            .add_token_entry(token)
            .expect("token added");
    }
    context
}

pub fn gold_token() -> TokenItem {
    TokenItem::new(CONTRACT, SENDER, "Crown Gold", "CGLD", 8)
        .expect("valid token")
        .with_raw_balance("250000000")
}

/// Harness running the full app; copies land in the returned clipboard.
pub fn app_harness(tokens: &[TokenItem]) -> (Harness<'static, AppState>, RecordingClipboard) {
    let context = context_with(tokens);
    let clipboard = RecordingClipboard::new();
    let app_clipboard = clipboard.clone();

    let mut harness = Harness::builder()
        .with_size(egui::vec2(900.0, 700.0))
        .with_max_steps(100)
        .build_eframe(move |cc| {
            AppState::with_clipboard(cc.egui_ctx.clone(), context, Box::new(app_clipboard))
        });
    // Run one frame to ensure the app initializes
    harness.run();
    (harness, clipboard)
}
