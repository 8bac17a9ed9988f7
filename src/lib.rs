pub mod app;
pub mod app_dir;
pub mod config;
pub mod context;
pub mod database;
pub mod logging;
pub mod model;
pub mod ui;
pub mod wallet;

include!(concat!(env!("OUT_DIR"), "/version.rs"));
