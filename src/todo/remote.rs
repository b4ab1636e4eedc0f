use super::auth::{AuthContext, AuthEvent, AuthSubscription, Identity};
use super::{normalize_text, TodoId, TodoItem, TodoStore};
use std::sync::mpsc::{channel, Receiver, Sender};
use std::thread;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BackendError {
    #[error("not signed in")]
    SignedOut,
    #[error("request failed: {0}")]
    Transport(String),
    #[error("backend returned {status}: {body}")]
    Status { status: u16, body: String },
    #[error("unexpected response: {0}")]
    Decode(String),
    #[error("todo worker stopped")]
    WorkerGone,
}

/// User-scoped CRUD storage for todos
pub trait TodoBackend {
    /// All rows for the user, oldest first
    fn fetch(&self, who: &Identity) -> Result<Vec<TodoItem>, BackendError>;
    /// Insert a row and return it as stored
    fn insert(&self, who: &Identity, text: &str) -> Result<TodoItem, BackendError>;
    fn set_completed(&self, who: &Identity, id: TodoId, completed: bool) -> Result<(), BackendError>;
    fn delete(&self, who: &Identity, id: TodoId) -> Result<(), BackendError>;
}

enum Call {
    Fetch,
    Insert(String),
    SetCompleted(TodoId, bool),
    Delete(TodoId),
}

struct Request {
    session: u64,
    identity: Identity,
    call: Call,
}

enum Outcome {
    Fetched(Result<Vec<TodoItem>, BackendError>),
    Inserted(Result<TodoItem, BackendError>),
    Updated(TodoId, bool, Result<(), BackendError>),
    Deleted(TodoId, Result<(), BackendError>),
}

struct Reply {
    session: u64,
    outcome: Outcome,
}

impl Request {
    fn run<B: TodoBackend>(self, backend: &B) -> Reply {
        let who = &self.identity;
        let outcome = match self.call {
            Call::Fetch => Outcome::Fetched(backend.fetch(who)),
            Call::Insert(text) => Outcome::Inserted(backend.insert(who, &text)),
            Call::SetCompleted(id, completed) => {
                Outcome::Updated(id, completed, backend.set_completed(who, id, completed))
            }
            Call::Delete(id) => Outcome::Deleted(id, backend.delete(who, id)),
        };
        Reply {
            session: self.session,
            outcome,
        }
    }
}

/// Serve requests until the store hangs up
fn spawn_worker<B>(backend: B) -> (Sender<Request>, Receiver<Reply>)
where
    B: TodoBackend + Send + 'static,
{
    let (request_tx, request_rx) = channel::<Request>();
    let (reply_tx, reply_rx) = channel();
    thread::spawn(move || {
        for request in request_rx {
            if reply_tx.send(request.run(&backend)).is_err() {
                break;
            }
        }
        tracing::debug!("todo worker stopped");
    });
    (request_tx, reply_rx)
}

/// Todo list mirrored from a backend.
///
/// Backend calls run on a worker thread so a slow server never stalls the
/// frame loop. Local state changes only when a successful reply comes back
/// through `sync()`. Failures are logged and leave the list as it was;
/// nothing is retried. Replies from before a sign-in change are dropped.
pub struct RemoteTodoStore {
    requests: Sender<Request>,
    replies: Receiver<Reply>,
    auth: AuthContext,
    subscription: AuthSubscription,
    items: Vec<TodoItem>,
    /// Bumped on every sign-in and sign-out
    session: u64,
    in_flight: usize,
}

impl RemoteTodoStore {
    /// Starts the worker, subscribes to `auth` for the store's lifetime and
    /// requests the list if someone is already signed in.
    pub fn new<B>(backend: B, auth: AuthContext) -> Self
    where
        B: TodoBackend + Send + 'static,
    {
        let (requests, replies) = spawn_worker(backend);
        let subscription = auth.subscribe();
        let mut store = Self {
            requests,
            replies,
            auth,
            subscription,
            items: Vec::new(),
            session: 0,
            in_flight: 0,
        };
        if let Some(identity) = store.auth.current_identity() {
            store.submit(identity, Call::Fetch);
        }
        store
    }

    /// Whether any request is still waiting for its reply
    pub fn is_busy(&self) -> bool {
        self.in_flight > 0
    }

    fn identity(&self, action: &str) -> Option<Identity> {
        let identity = self.auth.current_identity();
        if identity.is_none() {
            tracing::warn!(action, error = %BackendError::SignedOut, "todo change dropped");
        }
        identity
    }

    fn submit(&mut self, identity: Identity, call: Call) {
        let request = Request {
            session: self.session,
            identity,
            call,
        };
        match self.requests.send(request) {
            Ok(()) => self.in_flight += 1,
            Err(_) => tracing::error!(error = %BackendError::WorkerGone, "todo request dropped"),
        }
    }

    fn apply(&mut self, reply: Reply) {
        self.in_flight = self.in_flight.saturating_sub(1);
        if reply.session != self.session {
            tracing::debug!("stale todo reply ignored");
            return;
        }

        match reply.outcome {
            Outcome::Fetched(Ok(items)) => {
                tracing::debug!(count = items.len(), "todos fetched");
                self.items = items;
            }
            Outcome::Fetched(Err(e)) => tracing::error!(error = %e, "fetching todos failed"),
            Outcome::Inserted(Ok(item)) => self.items.push(item),
            Outcome::Inserted(Err(e)) => tracing::error!(error = %e, "adding todo failed"),
            Outcome::Updated(id, completed, Ok(())) => {
                if let Some(item) = self.items.iter_mut().find(|item| item.id == id) {
                    item.completed = completed;
                }
            }
            Outcome::Updated(id, _, Err(e)) => {
                tracing::error!(id = id.0, error = %e, "updating todo failed")
            }
            Outcome::Deleted(id, Ok(())) => self.items.retain(|item| item.id != id),
            Outcome::Deleted(id, Err(e)) => {
                tracing::error!(id = id.0, error = %e, "deleting todo failed")
            }
        }
    }
}

impl TodoStore for RemoteTodoStore {
    fn items(&self) -> &[TodoItem] {
        &self.items
    }

    fn add(&mut self, text: &str) {
        let Some(text) = normalize_text(text) else {
            return;
        };
        let Some(identity) = self.identity("add") else {
            return;
        };
        self.submit(identity, Call::Insert(text.to_string()));
    }

    fn toggle(&mut self, id: TodoId) {
        let Some(completed) = self
            .items
            .iter()
            .find(|item| item.id == id)
            .map(|item| !item.completed)
        else {
            return;
        };
        let Some(identity) = self.identity("toggle") else {
            return;
        };
        self.submit(identity, Call::SetCompleted(id, completed));
    }

    fn remove(&mut self, id: TodoId) {
        let Some(identity) = self.identity("remove") else {
            return;
        };
        self.submit(identity, Call::Delete(id));
    }

    fn sync(&mut self) {
        for event in self.subscription.drain() {
            self.session += 1;
            match event {
                AuthEvent::SignedIn(identity) => self.submit(identity, Call::Fetch),
                AuthEvent::SignedOut => self.items.clear(),
            }
        }
        while let Ok(reply) = self.replies.try_recv() {
            self.apply(reply);
        }
    }

    fn label(&self) -> &'static str {
        if self.is_busy() {
            "syncing"
        } else {
            "synced"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::sync::{Arc, Mutex};
    use std::time::{Duration, Instant};

    #[derive(Default)]
    struct FakeRows {
        rows: Vec<(String, TodoItem)>,
        next_id: i64,
        failing: bool,
        calls: usize,
    }

    /// In-memory backend keyed by user, shared with the test through an Arc
    #[derive(Clone, Default)]
    struct FakeBackend {
        state: Arc<Mutex<FakeRows>>,
        /// When set, every call waits for a message before answering
        gate: Arc<Mutex<Option<Receiver<()>>>>,
    }

    impl FakeBackend {
        fn check(&self) -> Result<(), BackendError> {
            if let Some(gate) = self.gate.lock().unwrap().as_ref() {
                let _ = gate.recv();
            }
            let mut state = self.state.lock().unwrap();
            state.calls += 1;
            if state.failing {
                Err(BackendError::Transport("offline".to_string()))
            } else {
                Ok(())
            }
        }

        fn seed(&self, user: &str, text: &str) -> TodoItem {
            let mut state = self.state.lock().unwrap();
            state.next_id += 1;
            let item = TodoItem {
                id: TodoId(state.next_id),
                text: text.to_string(),
                completed: false,
            };
            state.rows.push((user.to_string(), item.clone()));
            item
        }

        fn calls(&self) -> usize {
            self.state.lock().unwrap().calls
        }

        fn set_failing(&self, failing: bool) {
            self.state.lock().unwrap().failing = failing;
        }

        /// Hold every call until the returned sender releases it
        fn hold(&self) -> Sender<()> {
            let (tx, rx) = channel();
            *self.gate.lock().unwrap() = Some(rx);
            tx
        }
    }

    impl TodoBackend for FakeBackend {
        fn fetch(&self, who: &Identity) -> Result<Vec<TodoItem>, BackendError> {
            self.check()?;
            Ok(self
                .state
                .lock()
                .unwrap()
                .rows
                .iter()
                .filter(|(user, _)| *user == who.user_id)
                .map(|(_, item)| item.clone())
                .collect())
        }

        fn insert(&self, who: &Identity, text: &str) -> Result<TodoItem, BackendError> {
            self.check()?;
            Ok(self.seed(&who.user_id, text))
        }

        fn set_completed(&self, _who: &Identity, id: TodoId, completed: bool) -> Result<(), BackendError> {
            self.check()?;
            for (_, item) in self.state.lock().unwrap().rows.iter_mut() {
                if item.id == id {
                    item.completed = completed;
                }
            }
            Ok(())
        }

        fn delete(&self, _who: &Identity, id: TodoId) -> Result<(), BackendError> {
            self.check()?;
            self.state.lock().unwrap().rows.retain(|(_, item)| item.id != id);
            Ok(())
        }
    }

    fn identity(user: &str) -> Identity {
        Identity {
            user_id: user.to_string(),
            access_token: Some("token".to_string()),
        }
    }

    fn texts(store: &RemoteTodoStore) -> Vec<String> {
        store.items().iter().map(|i| i.text.clone()).collect()
    }

    /// Sync until every request has been answered
    fn settle(store: &mut RemoteTodoStore) {
        let deadline = Instant::now() + Duration::from_secs(5);
        store.sync();
        while store.is_busy() {
            assert!(Instant::now() < deadline, "worker never replied");
            thread::sleep(Duration::from_millis(1));
            store.sync();
        }
    }

    fn signed_in_store(backend: &FakeBackend, user: &str) -> (RemoteTodoStore, AuthContext) {
        let auth = AuthContext::new();
        auth.sign_in(identity(user));
        let mut store = RemoteTodoStore::new(backend.clone(), auth.clone());
        settle(&mut store);
        (store, auth)
    }

    #[test]
    fn test_signed_in_at_construction_fetches() {
        let backend = FakeBackend::default();
        backend.seed("alice", "read");
        backend.seed("bob", "not mine");

        let (store, _auth) = signed_in_store(&backend, "alice");

        assert_eq!(texts(&store), vec!["read"]);
        assert_eq!(store.label(), "synced");
    }

    #[test]
    fn test_auth_changes_refetch_or_clear() {
        let backend = FakeBackend::default();
        backend.seed("alice", "read");
        let auth = AuthContext::new();
        let mut store = RemoteTodoStore::new(backend.clone(), auth.clone());
        settle(&mut store);
        assert!(store.items().is_empty());

        auth.sign_in(identity("alice"));
        settle(&mut store);
        assert_eq!(texts(&store), vec!["read"]);

        auth.sign_out();
        settle(&mut store);
        assert!(store.items().is_empty());
    }

    #[test]
    fn test_add_applies_after_backend_confirms() {
        let backend = FakeBackend::default();
        let (mut store, _auth) = signed_in_store(&backend, "alice");

        store.add("  water plants ");
        settle(&mut store);

        assert_eq!(texts(&store), vec!["water plants"]);
        assert_eq!(backend.state.lock().unwrap().rows.len(), 1);
    }

    #[test]
    fn test_slow_backend_does_not_block_callers() {
        let backend = FakeBackend::default();
        let (mut store, _auth) = signed_in_store(&backend, "alice");
        let release = backend.hold();

        store.add("water plants");
        store.sync();

        // The call is parked on the worker; nothing changed yet
        assert!(store.items().is_empty());
        assert!(store.is_busy());
        assert_eq!(store.label(), "syncing");

        release.send(()).unwrap();
        settle(&mut store);
        assert_eq!(texts(&store), vec!["water plants"]);
    }

    #[test]
    fn test_failed_calls_leave_state_unchanged() {
        let backend = FakeBackend::default();
        backend.seed("alice", "read");
        let (mut store, _auth) = signed_in_store(&backend, "alice");
        let before = store.items().to_vec();
        let id = before[0].id;

        backend.set_failing(true);
        store.add("new");
        store.toggle(id);
        store.remove(id);
        settle(&mut store);

        assert_eq!(store.items(), before.as_slice());
    }

    #[test]
    fn test_signed_out_mutations_skip_backend() {
        let backend = FakeBackend::default();
        let mut store = RemoteTodoStore::new(backend.clone(), AuthContext::new());

        store.add("anything");
        settle(&mut store);

        assert!(store.items().is_empty());
        assert_eq!(backend.calls(), 0);
    }

    #[test]
    fn test_blank_add_skips_backend() {
        let backend = FakeBackend::default();
        let (mut store, _auth) = signed_in_store(&backend, "alice");
        let calls = backend.calls();

        store.add("   ");
        settle(&mut store);

        assert_eq!(backend.calls(), calls);
    }

    #[test]
    fn test_toggle_and_remove() {
        let backend = FakeBackend::default();
        backend.seed("alice", "a");
        backend.seed("alice", "b");
        let (mut store, _auth) = signed_in_store(&backend, "alice");
        let first = store.items()[0].id;

        store.toggle(first);
        settle(&mut store);
        assert!(store.items()[0].completed);
        assert!(backend.state.lock().unwrap().rows[0].1.completed);

        store.remove(first);
        settle(&mut store);
        assert_eq!(texts(&store), vec!["b"]);
    }

    #[test]
    fn test_toggle_unknown_id_skips_backend() {
        let backend = FakeBackend::default();
        let (mut store, _auth) = signed_in_store(&backend, "alice");
        let calls = backend.calls();

        store.toggle(TodoId(999));
        settle(&mut store);

        assert_eq!(backend.calls(), calls);
    }

    #[test]
    fn test_reply_after_sign_out_is_dropped() {
        let backend = FakeBackend::default();
        let (mut store, auth) = signed_in_store(&backend, "alice");
        let release = backend.hold();

        store.add("late");
        auth.sign_out();
        store.sync();
        release.send(()).unwrap();
        settle(&mut store);

        assert!(store.items().is_empty());
    }

    #[test]
    fn test_store_drop_releases_subscription() {
        let backend = FakeBackend::default();
        let auth = AuthContext::new();
        let store = RemoteTodoStore::new(backend, auth.clone());
        assert_eq!(auth.subscriber_count(), 1);
        drop(store);
        assert_eq!(auth.subscriber_count(), 0);
    }
}
