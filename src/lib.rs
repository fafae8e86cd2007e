pub mod app;
pub mod config;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod sheets;
pub mod state;
pub mod ui;

pub use app::router;
pub use state::AppState;
