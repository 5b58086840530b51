use std::sync::{
    Arc,
    atomic::{AtomicU64, Ordering},
};

use tokio::sync::RwLock;

use crate::snapshot::WeatherSnapshot;

/// Handed out by [`SearchSession::begin`]; identifies one search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct SearchTicket(u64);

/// Holds the snapshot of the most recent search.
///
/// Starting a search supersedes every earlier one: a result published with
/// an older ticket is discarded instead of replacing newer data.
#[derive(Debug, Clone, Default)]
pub struct SearchSession {
    latest: Arc<AtomicU64>,
    snapshot: Arc<RwLock<Option<(SearchTicket, WeatherSnapshot)>>>,
}

impl SearchSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin(&self) -> SearchTicket {
        SearchTicket(self.latest.fetch_add(1, Ordering::SeqCst) + 1)
    }

    pub fn is_current(&self, ticket: SearchTicket) -> bool {
        self.latest.load(Ordering::SeqCst) == ticket.0
    }

    /// Store `snapshot` if `ticket` is still the newest search. Returns whether
    /// it was kept.
    pub async fn publish(&self, ticket: SearchTicket, snapshot: WeatherSnapshot) -> bool {
        let mut slot = self.snapshot.write().await;
        if !self.is_current(ticket) {
            tracing::debug!(?ticket, "discarding result of superseded search");
            return false;
        }
        *slot = Some((ticket, snapshot));
        true
    }

    pub async fn current(&self) -> Option<WeatherSnapshot> {
        self.snapshot
            .read()
            .await
            .as_ref()
            .map(|(_, snapshot)| snapshot.clone())
    }
}
