//! Caller-owned list state for one remote resource.
//!
//! Nothing loads implicitly: the owner calls [`Collection::load`] (or
//! [`Collection::load_cancellable`]) when it wants fresh data. Each load
//! takes a generation number and its response is applied only while that
//! generation is still the newest one issued. Loads issued while another
//! is in flight share its request. Mutations touch local state only after
//! the remote call succeeds.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use auditdesk_core::types::DbId;
use futures::future::{BoxFuture, FutureExt, Shared};
use tokio::sync::Mutex;
use tokio_util::sync::CancellationToken;

use crate::error::ClientError;
use crate::resource::{Keyed, ResourceBackend};

type SharedLoad<T> = Shared<BoxFuture<'static, Result<Vec<T>, ClientError>>>;

struct InFlight<T> {
    generation: u64,
    load: SharedLoad<T>,
}

struct State<T> {
    items: Vec<T>,
    loaded: bool,
    last_error: Option<ClientError>,
}

pub struct Collection<B: ResourceBackend> {
    backend: Arc<B>,
    state: Mutex<State<B::Item>>,
    in_flight: Mutex<Option<InFlight<B::Item>>>,
    generation: AtomicU64,
}

impl<B: ResourceBackend> Collection<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend: Arc::new(backend),
            state: Mutex::new(State {
                items: Vec::new(),
                loaded: false,
                last_error: None,
            }),
            in_flight: Mutex::new(None),
            generation: AtomicU64::new(0),
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Snapshot of the current items, newest first.
    pub async fn items(&self) -> Vec<B::Item> {
        self.state.lock().await.items.clone()
    }

    pub async fn get(&self, id: DbId) -> Option<B::Item> {
        self.state
            .lock()
            .await
            .items
            .iter()
            .find(|item| item.key() == id)
            .cloned()
    }

    /// Error from the most recent failed load or mutation, cleared on success.
    pub async fn last_error(&self) -> Option<ClientError> {
        self.state.lock().await.last_error.clone()
    }

    /// True once any load has been applied.
    pub async fn is_loaded(&self) -> bool {
        self.state.lock().await.loaded
    }

    pub async fn is_loading(&self) -> bool {
        self.in_flight.lock().await.is_some()
    }

    /// Fetch all rows, joining a load already in flight.
    ///
    /// Returns the collection's items after the load settles. If a newer
    /// load or a mutation superseded this one, its response is dropped and
    /// the newer items are returned instead.
    pub async fn load(&self) -> Result<Vec<B::Item>, ClientError> {
        let (generation, load) = self.join_or_start(false).await;
        let result = load.await;
        self.complete(generation, result).await
    }

    /// Fetch all rows with a new request even if one is in flight.
    pub async fn reload(&self) -> Result<Vec<B::Item>, ClientError> {
        let (generation, load) = self.join_or_start(true).await;
        let result = load.await;
        self.complete(generation, result).await
    }

    /// [`load`](Self::load) that gives up when `token` is cancelled.
    ///
    /// A cancelled load leaves items and `last_error` untouched.
    pub async fn load_cancellable(
        &self,
        token: &CancellationToken,
    ) -> Result<Vec<B::Item>, ClientError> {
        if token.is_cancelled() {
            return Err(ClientError::Cancelled);
        }

        let (generation, load) = self.join_or_start(false).await;
        tokio::select! {
            biased;
            () = token.cancelled() => {
                self.abandon(generation).await;
                tracing::debug!(generation, "Load cancelled");
                Err(ClientError::Cancelled)
            }
            result = load => self.complete(generation, result).await,
        }
    }

    /// Create remotely, then insert the returned row at the front.
    pub async fn create(&self, input: &B::Create) -> Result<B::Item, ClientError> {
        let result = self.backend.create(input).await;
        self.settle(result, |items, created| upsert_front(items, created.clone()))
            .await
    }

    /// Update remotely, then replace the local row with the returned one.
    pub async fn update(&self, id: DbId, input: &B::Update) -> Result<B::Item, ClientError> {
        let result = self.backend.update(id, input).await;
        self.settle(result, |items, updated| {
            if let Some(slot) = items.iter_mut().find(|i| i.key() == updated.key()) {
                *slot = updated.clone();
            }
        })
        .await
    }

    /// Delete remotely, then drop the local row.
    pub async fn delete(&self, id: DbId) -> Result<(), ClientError> {
        let result = self.backend.delete(id).await;
        self.settle(result, |items, _| items.retain(|i| i.key() != id))
            .await
    }

    // ---- private helpers ----

    async fn join_or_start(&self, force: bool) -> (u64, SharedLoad<B::Item>) {
        let mut in_flight = self.in_flight.lock().await;
        if !force {
            if let Some(current) = in_flight.as_ref() {
                tracing::debug!(generation = current.generation, "Joining in-flight load");
                return (current.generation, current.load.clone());
            }
        }

        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let backend = Arc::clone(&self.backend);
        let load = async move { backend.fetch_all().await }.boxed().shared();
        *in_flight = Some(InFlight {
            generation,
            load: load.clone(),
        });
        tracing::debug!(generation, "Load started");
        (generation, load)
    }

    async fn complete(
        &self,
        generation: u64,
        result: Result<Vec<B::Item>, ClientError>,
    ) -> Result<Vec<B::Item>, ClientError> {
        self.abandon(generation).await;

        let mut state = self.state.lock().await;
        if generation != self.generation.load(Ordering::SeqCst) {
            tracing::debug!(generation, ok = result.is_ok(), "Discarding stale load response");
            return Ok(state.items.clone());
        }

        match result {
            Ok(items) => {
                tracing::debug!(generation, count = items.len(), "Load applied");
                state.items = items;
                state.loaded = true;
                state.last_error = None;
                Ok(state.items.clone())
            }
            Err(err) => {
                tracing::warn!(generation, error = %err, "Load failed");
                state.last_error = Some(err.clone());
                Err(err)
            }
        }
    }

    /// Forget the in-flight load if it is still `generation`.
    async fn abandon(&self, generation: u64) {
        let mut in_flight = self.in_flight.lock().await;
        if in_flight.as_ref().is_some_and(|f| f.generation == generation) {
            *in_flight = None;
        }
    }

    /// Apply a successful mutation, or record its error.
    ///
    /// The state lock is held while the generation moves on, so a load that
    /// started before the mutation can no longer overwrite its effect.
    async fn settle<R>(
        &self,
        result: Result<R, ClientError>,
        apply: impl FnOnce(&mut Vec<B::Item>, &R),
    ) -> Result<R, ClientError> {
        let mut state = self.state.lock().await;
        match result {
            Ok(value) => {
                {
                    let mut in_flight = self.in_flight.lock().await;
                    self.generation.fetch_add(1, Ordering::SeqCst);
                    *in_flight = None;
                }
                apply(&mut state.items, &value);
                state.last_error = None;
                Ok(value)
            }
            Err(err) => {
                tracing::warn!(error = %err, "Mutation failed");
                state.last_error = Some(err.clone());
                Err(err)
            }
        }
    }
}

fn upsert_front<T: Keyed>(items: &mut Vec<T>, item: T) {
    items.retain(|i| i.key() != item.key());
    items.insert(0, item);
}
