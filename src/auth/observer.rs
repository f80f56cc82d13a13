// src/auth/observer.rs
//! Publish/subscribe for sign-in state changes.
//!
//! Each `subscribe()` gets its own channel. Dropping the `Subscription` (or
//! calling `unsubscribe`) ends that stream; subscribing again starts a new one.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::auth::sessions::AuthUser;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    SignedIn(AuthUser),
    SignedOut(AuthUser),
}

type Subscribers = Arc<Mutex<Vec<(u64, Sender<SessionState>)>>>;

#[derive(Clone, Default)]
pub struct SessionHub {
    subscribers: Subscribers,
    next_id: Arc<AtomicU64>,
}

impl SessionHub {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&self) -> Subscription {
        let (tx, rx) = mpsc::channel();
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        if let Ok(mut subs) = self.subscribers.lock() {
            subs.push((id, tx));
        }
        Subscription {
            id,
            rx,
            subscribers: Arc::clone(&self.subscribers),
        }
    }

    /// Deliver `state` to every live subscriber, pruning closed ones.
    pub fn publish(&self, state: SessionState) {
        let Ok(mut subs) = self.subscribers.lock() else {
            tracing::error!("session hub lock poisoned; dropping {state:?}");
            return;
        };
        subs.retain(|(_, tx)| tx.send(state.clone()).is_ok());
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.lock().map(|s| s.len()).unwrap_or(0)
    }
}

pub struct Subscription {
    id: u64,
    rx: Receiver<SessionState>,
    subscribers: Subscribers,
}

impl Subscription {
    /// Block until the next state change.
    pub fn recv(&self) -> Option<SessionState> {
        self.rx.recv().ok()
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Option<SessionState> {
        match self.rx.recv_timeout(timeout) {
            Ok(state) => Some(state),
            Err(RecvTimeoutError::Timeout | RecvTimeoutError::Disconnected) => None,
        }
    }

    /// Everything already delivered, without blocking.
    pub fn drain(&self) -> Vec<SessionState> {
        self.rx.try_iter().collect()
    }

    pub fn unsubscribe(self) {}
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Ok(mut subs) = self.subscribers.lock() {
            subs.retain(|(id, _)| *id != self.id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user() -> AuthUser {
        AuthUser {
            id: 1,
            email: "admin@example.com".into(),
        }
    }

    #[test]
    fn subscribers_receive_published_states_in_order() {
        let hub = SessionHub::new();
        let sub = hub.subscribe();

        hub.publish(SessionState::SignedIn(user()));
        hub.publish(SessionState::SignedOut(user()));

        assert_eq!(
            sub.drain(),
            vec![SessionState::SignedIn(user()), SessionState::SignedOut(user())]
        );
    }

    #[test]
    fn unsubscribe_stops_delivery_and_resubscribe_restarts() {
        let hub = SessionHub::new();
        let sub = hub.subscribe();
        assert_eq!(hub.subscriber_count(), 1);

        sub.unsubscribe();
        assert_eq!(hub.subscriber_count(), 0);
        hub.publish(SessionState::SignedIn(user()));

        let again = hub.subscribe();
        hub.publish(SessionState::SignedOut(user()));
        assert_eq!(again.drain(), vec![SessionState::SignedOut(user())]);
    }

    #[test]
    fn recv_timeout_without_events_is_none() {
        let hub = SessionHub::new();
        let sub = hub.subscribe();
        assert_eq!(sub.recv_timeout(Duration::from_millis(10)), None);
    }
}
