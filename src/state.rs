use crate::ledger::Ledger;
use crate::stats::StreakAnchor;
use std::sync::Arc;
use tokio::sync::Mutex;

#[derive(Clone)]
pub struct AppState {
    pub ledger: Arc<Mutex<Ledger>>,
    pub streak_anchor: StreakAnchor,
}

impl AppState {
    pub fn new(ledger: Ledger, streak_anchor: StreakAnchor) -> Self {
        Self {
            ledger: Arc::new(Mutex::new(ledger)),
            streak_anchor,
        }
    }
}
