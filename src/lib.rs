pub mod app;
pub mod errors;
pub mod handlers;
pub mod layers;
pub mod llm;
pub mod models;
pub mod score;
pub mod state;
pub mod store;
pub mod ui;

pub use app::router;
pub use state::AppState;
pub use store::{Store, resolve_db_path};
