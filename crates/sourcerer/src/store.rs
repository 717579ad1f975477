//! Holds the current scope state and fans new values out to subscribers.

use std::sync::{Arc, RwLock};

use futures::{future, Stream, StreamExt};
use tokio::sync::broadcast;
use tokio_stream::wrappers::BroadcastStream;

use crate::{actions::SourcererAction, model::SourcererState, reducer::reduce};

const SUBSCRIBER_BUFFER: usize = 64;

#[derive(Clone)]
pub struct SourcererStore {
    state: Arc<RwLock<Arc<SourcererState>>>,
    updates: broadcast::Sender<Arc<SourcererState>>,
}

impl SourcererStore {
    pub fn new(initial: SourcererState) -> Self {
        let (updates, _) = broadcast::channel(SUBSCRIBER_BUFFER);
        Self {
            state: Arc::new(RwLock::new(Arc::new(initial))),
            updates,
        }
    }

    pub fn state(&self) -> Arc<SourcererState> {
        match self.state.read() {
            Ok(guard) => Arc::clone(&*guard),
            Err(poisoned) => Arc::clone(&*poisoned.into_inner()),
        }
    }

    /// Runs the reducer and publishes the new value. The write lock is held
    /// across reduce, swap and send so subscribers observe states in the
    /// same order they were stored.
    pub fn dispatch(&self, action: SourcererAction) -> Arc<SourcererState> {
        let action_name = action.name();
        let mut guard = match self.state.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        let next = Arc::new(reduce(&guard, action));
        *guard = Arc::clone(&next);
        // Never blocks. No receivers is fine; the value is still stored.
        let _ = self.updates.send(Arc::clone(&next));
        drop(guard);

        tracing::debug!(
            action = action_name,
            subscribers = self.updates.receiver_count(),
            "dispatched sourcerer action"
        );
        next
    }

    pub fn dispatch_all(
        &self,
        actions: impl IntoIterator<Item = SourcererAction>,
    ) -> Arc<SourcererState> {
        let mut last = self.state();
        for action in actions {
            last = self.dispatch(action);
        }
        last
    }

    pub fn subscribe(&self) -> broadcast::Receiver<Arc<SourcererState>> {
        self.updates.subscribe()
    }

    /// Stream of states published after this call. Lagged receivers skip the
    /// values they missed.
    pub fn updates(&self) -> impl Stream<Item = Arc<SourcererState>> {
        BroadcastStream::new(self.updates.subscribe()).filter_map(|item| match item {
            Ok(state) => future::ready(Some(state)),
            Err(err) => {
                tracing::warn!("sourcerer subscriber lagged: {err}");
                future::ready(None)
            }
        })
    }
}
