use crt_token_panel::VERSION;
use crt_token_panel::app::AppState;
use crt_token_panel::app_dir::{
    app_user_data_file_path, create_app_user_data_directory_if_not_exists,
};
use crt_token_panel::config::Config;
use crt_token_panel::context::AppContext;
use crt_token_panel::logging::initialize_logger;

fn main() -> eframe::Result<()> {
    let app_data_dir = create_app_user_data_directory_if_not_exists()
        .map_err(|e| eframe::Error::AppCreation(Box::new(e)))?;

    let config = match Config::load() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("Failed to load configuration, using defaults: {}", err);
            Config::default()
        }
    };

    if let Err(err) = initialize_logger(&config.log_filter, &app_data_dir) {
        eprintln!("Failed to initialize logger: {}", err);
    }

    // First start: leave a .env with the defaults for the user to edit
    if let Ok(env_file) = app_user_data_file_path(".env") {
        if !env_file.exists() {
            if let Err(err) = config.save() {
                tracing::warn!(%err, "Failed to write default .env file");
            }
        }
    }

    let native_options = eframe::NativeOptions {
        persist_window: true, // Persist window size and position
        centered: true,       // Center window on startup if not maximized
        persistence_path: Some(app_data_dir.join("app.ron")),
        ..Default::default()
    };

    eframe::run_native(
        &format!("Crowntium Tokens v{}", VERSION),
        native_options,
        Box::new(move |cc| {
            let app_context = AppContext::new(config)?;
            Ok(Box::new(AppState::new(cc.egui_ctx.clone(), app_context)))
        }),
    )
}
