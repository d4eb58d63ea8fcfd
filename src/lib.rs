pub mod app;
pub mod auth;
pub mod classifier;
pub mod config;
pub mod errors;
pub mod gateway;
pub mod handlers;
pub mod journal;
pub mod models;
pub mod state;
pub mod stats;
pub mod storage;
pub mod store;
pub mod ui;
pub mod validate;

pub use app::router;
pub use config::Config;
pub use journal::MoodJournal;
pub use state::AppState;
