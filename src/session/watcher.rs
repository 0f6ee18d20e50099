//! Session Expiry Watcher
//!
//! A session must never be treated as valid past its expiry, even if the user
//! does nothing. The watcher re-checks the persisted record on a fixed
//! interval and ends the session the first tick after expiry. A session can
//! therefore outlive its expiry by at most one interval; that staleness
//! window is the accepted cost of polling.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use log::{debug, info, warn};
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::AbortHandle;
use tokio::time::{interval, MissedTickBehavior};

use super::{now_ms, SessionEvent, SessionStore};
use crate::domain::TokenClaims;

/// Default re-check interval. 30 seconds is ample granularity for a
/// multi-hour session lifetime.
pub const WATCH_INTERVAL: Duration = Duration::from_secs(30);

/// Cancellation handle for a running watcher
///
/// The caller that started the watch owns the handle and must cancel it when
/// the session ends for any reason (logout, teardown); otherwise the timer
/// task runs forever. Dropping the handle does NOT cancel the watch.
pub struct WatchHandle {
    cancelled: Arc<AtomicBool>,
    abort: AbortHandle,
}

impl WatchHandle {
    /// Stop the watcher. Idempotent: cancelling twice is a no-op.
    pub fn cancel(&self) {
        if !self.cancelled.swap(true, Ordering::SeqCst) {
            debug!("session watch cancelled");
            self.abort.abort();
        }
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}

pub struct SessionWatcher;

impl SessionWatcher {
    /// Start watching the persisted session record.
    ///
    /// Each tick reads the record. An absent record stops the watch silently
    /// (nothing to guard). A record that is past its expiry, or that fails to
    /// parse, ends the session: the record is cleared, one
    /// [`SessionEvent::Expired`] is emitted, and the watch stops. Ticks run
    /// on one task and never overlap.
    pub fn start(
        store: Arc<dyn SessionStore>,
        events: UnboundedSender<SessionEvent>,
        tick: Duration,
    ) -> WatchHandle {
        let cancelled = Arc::new(AtomicBool::new(false));
        let handle = tokio::spawn(async move {
            let mut ticker = interval(tick);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
            // The first tick of a tokio interval fires immediately; consume
            // it so the first real check happens one interval after start.
            ticker.tick().await;

            loop {
                ticker.tick().await;

                let raw = match store.get().await {
                    Ok(Some(raw)) => raw,
                    Ok(None) => {
                        debug!("no session record, stopping watch");
                        return;
                    }
                    Err(e) => {
                        warn!("session store read failed: {}", e);
                        continue;
                    }
                };

                let expired = match TokenClaims::from_record(&raw) {
                    // Fail safe: an unreadable record cannot be verified, so
                    // treat it as expired rather than leave it active.
                    None => {
                        warn!("malformed session record, ending session");
                        true
                    }
                    Some(claims) => claims.is_expired(now_ms()),
                };

                if expired {
                    if let Err(e) = store.clear().await {
                        warn!("failed to clear expired session: {}", e);
                    }
                    info!("session expired");
                    let _ = events.send(SessionEvent::Expired);
                    return;
                }
            }
        });

        WatchHandle {
            cancelled,
            abort: handle.abort_handle(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::MemorySessionStore;
    use tokio::sync::mpsc;
    use tokio::sync::mpsc::error::TryRecvError;

    async fn settle() {
        for _ in 0..10 {
            tokio::task::yield_now().await;
        }
    }

    fn record(expires_at: i64) -> String {
        TokenClaims {
            user_id: 1,
            email: "a@b.c".to_string(),
            expires_at,
        }
        .to_record()
        .unwrap()
    }

    #[tokio::test(start_paused = true)]
    async fn test_expired_session_cleared_on_next_tick() {
        let store = Arc::new(MemorySessionStore::new());
        store.set(&record(now_ms() - 1)).await.unwrap();
        let (tx, mut rx) = mpsc::unbounded_channel();

        let handle = SessionWatcher::start(store.clone(), tx, WATCH_INTERVAL);
        settle().await;
        tokio::time::advance(Duration::from_secs(31)).await;
        settle().await;

        assert_eq!(store.get().await.unwrap(), None);
        assert_eq!(rx.try_recv(), Ok(SessionEvent::Expired));
        // Exactly once: no second event even after more ticks elapse
        tokio::time::advance(Duration::from_secs(120)).await;
        settle().await;
        assert_eq!(rx.try_recv(), Err(TryRecvError::Disconnected));
        handle.cancel();
    }

    #[tokio::test(start_paused = true)]
    async fn test_valid_session_left_alone() {
        let store = Arc::new(MemorySessionStore::new());
        let expires = now_ms() + 60 * 60 * 1000;
        store.set(&record(expires)).await.unwrap();
        let (tx, mut rx) = mpsc::unbounded_channel();

        let handle = SessionWatcher::start(store.clone(), tx, WATCH_INTERVAL);
        // Just short of the expiry: many ticks, no action
        tokio::time::advance(Duration::from_secs(59 * 60)).await;
        settle().await;

        assert!(store.get().await.unwrap().is_some());
        assert_eq!(rx.try_recv(), Err(TryRecvError::Empty));
        handle.cancel();
    }

    #[tokio::test(start_paused = true)]
    async fn test_malformed_record_treated_as_expired() {
        let store = Arc::new(MemorySessionStore::new());
        store.set("{definitely not claims").await.unwrap();
        let (tx, mut rx) = mpsc::unbounded_channel();

        let _handle = SessionWatcher::start(store.clone(), tx, WATCH_INTERVAL);
        settle().await;
        tokio::time::advance(Duration::from_secs(31)).await;
        settle().await;

        assert_eq!(store.get().await.unwrap(), None);
        assert_eq!(rx.try_recv(), Ok(SessionEvent::Expired));
    }

    #[tokio::test(start_paused = true)]
    async fn test_absent_record_stops_watch_silently() {
        let store = Arc::new(MemorySessionStore::new());
        let (tx, mut rx) = mpsc::unbounded_channel();

        let _handle = SessionWatcher::start(store.clone(), tx, WATCH_INTERVAL);
        settle().await;
        tokio::time::advance(Duration::from_secs(31)).await;
        settle().await;

        // Watch task is gone (sender dropped) and no event was emitted
        assert_eq!(rx.try_recv(), Err(TryRecvError::Disconnected));
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_stops_future_ticks() {
        let store = Arc::new(MemorySessionStore::new());
        store.set(&record(now_ms() - 1)).await.unwrap();
        let (tx, mut rx) = mpsc::unbounded_channel();

        let handle = SessionWatcher::start(store.clone(), tx, WATCH_INTERVAL);
        handle.cancel();
        // Idempotent
        handle.cancel();
        assert!(handle.is_cancelled());

        tokio::time::advance(Duration::from_secs(120)).await;
        settle().await;

        // Cancelled before its first tick: the record survives, no event
        assert!(store.get().await.unwrap().is_some());
        assert_eq!(rx.try_recv(), Err(TryRecvError::Disconnected));
    }

    #[tokio::test(start_paused = true)]
    async fn test_session_expiring_mid_watch() {
        let store = Arc::new(MemorySessionStore::new());
        store.set(&record(now_ms() + 60 * 60 * 1000)).await.unwrap();
        let (tx, mut rx) = mpsc::unbounded_channel();

        let _handle = SessionWatcher::start(store.clone(), tx, WATCH_INTERVAL);
        // First tick: still valid
        tokio::time::advance(Duration::from_secs(31)).await;
        settle().await;
        assert!(store.get().await.unwrap().is_some());
        assert_eq!(rx.try_recv(), Err(TryRecvError::Empty));

        // The record expires between ticks
        store.set(&record(now_ms() - 1)).await.unwrap();
        tokio::time::advance(Duration::from_secs(30)).await;
        settle().await;
        assert_eq!(store.get().await.unwrap(), None);
        assert_eq!(rx.try_recv(), Ok(SessionEvent::Expired));
    }
}
