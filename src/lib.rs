pub mod app;
pub mod config;
pub mod errors;
pub mod handlers;
pub mod ledger;
pub mod models;
pub mod stats;
pub mod storage;
pub mod ui;
pub mod state;

pub use app::router;
pub use config::Config;
pub use ledger::{Ledger, LoadOutcome};
pub use state::AppState;
