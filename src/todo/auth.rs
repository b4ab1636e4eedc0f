//! Signed-in identity for the synced todo list.
//!
//! `AuthContext` is passed explicitly to whoever needs it. Interested parties
//! subscribe and receive `AuthEvent`s over a channel; dropping the
//! subscription unregisters it.

use std::sync::mpsc::{channel, Receiver, Sender};
use std::sync::{Arc, Mutex, MutexGuard, Weak};

/// Authenticated user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub user_id: String,
    /// Bearer token for user-scoped requests
    pub access_token: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthEvent {
    SignedIn(Identity),
    SignedOut,
}

#[derive(Default)]
struct AuthState {
    identity: Option<Identity>,
    subscribers: Vec<(u64, Sender<AuthEvent>)>,
    next_subscriber: u64,
}

/// Shared handle to the current identity
#[derive(Clone, Default)]
pub struct AuthContext {
    inner: Arc<Mutex<AuthState>>,
}

impl AuthContext {
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, AuthState> {
        // State stays consistent even if a holder panicked
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn current_identity(&self) -> Option<Identity> {
        self.state().identity.clone()
    }

    pub fn sign_in(&self, identity: Identity) {
        let mut state = self.state();
        state.identity = Some(identity.clone());
        broadcast(&mut state, AuthEvent::SignedIn(identity));
    }

    pub fn sign_out(&self) {
        let mut state = self.state();
        if state.identity.take().is_some() {
            broadcast(&mut state, AuthEvent::SignedOut);
        }
    }

    /// Register for identity changes
    pub fn subscribe(&self) -> AuthSubscription {
        let (tx, rx) = channel();
        let mut state = self.state();
        let id = state.next_subscriber;
        state.next_subscriber += 1;
        state.subscribers.push((id, tx));
        AuthSubscription {
            id,
            events: rx,
            context: Arc::downgrade(&self.inner),
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.state().subscribers.len()
    }
}

fn broadcast(state: &mut AuthState, event: AuthEvent) {
    state
        .subscribers
        .retain(|(_, tx)| tx.send(event.clone()).is_ok());
}

/// Live registration for auth events, released on drop
pub struct AuthSubscription {
    id: u64,
    events: Receiver<AuthEvent>,
    context: Weak<Mutex<AuthState>>,
}

impl AuthSubscription {
    /// Events received since the last call
    pub fn drain(&self) -> Vec<AuthEvent> {
        self.events.try_iter().collect()
    }
}

impl Drop for AuthSubscription {
    fn drop(&mut self) {
        if let Some(inner) = self.context.upgrade() {
            let mut state = inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
            state.subscribers.retain(|(id, _)| *id != self.id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alice() -> Identity {
        Identity {
            user_id: "alice".to_string(),
            access_token: None,
        }
    }

    #[test]
    fn test_sign_in_and_out_reach_subscribers() {
        let auth = AuthContext::new();
        let sub = auth.subscribe();

        auth.sign_in(alice());
        auth.sign_out();

        assert_eq!(sub.drain(), vec![AuthEvent::SignedIn(alice()), AuthEvent::SignedOut]);
        assert_eq!(auth.current_identity(), None);
    }

    #[test]
    fn test_sign_out_when_signed_out_is_silent() {
        let auth = AuthContext::new();
        let sub = auth.subscribe();
        auth.sign_out();
        assert!(sub.drain().is_empty());
    }

    #[test]
    fn test_drop_unregisters() {
        let auth = AuthContext::new();
        let sub = auth.subscribe();
        let _other = auth.subscribe();
        assert_eq!(auth.subscriber_count(), 2);

        drop(sub);
        assert_eq!(auth.subscriber_count(), 1);
    }

    #[test]
    fn test_subscription_outliving_context() {
        let auth = AuthContext::new();
        let sub = auth.subscribe();
        drop(auth);
        assert!(sub.drain().is_empty());
        drop(sub);
    }
}
