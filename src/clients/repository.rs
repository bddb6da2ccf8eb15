use axum::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

use crate::models::{ClientId, ClientRecord};

/// Id-keyed storage for registered clients
///
/// Ids handed out by `next_id` are unique, start at 1 and are never reused.
#[async_trait]
pub trait ClientStore: Send + Sync {
    /// Reserve the next client id
    async fn next_id(&self) -> ClientId;

    /// Store a record under `id`
    async fn put(&self, id: ClientId, record: ClientRecord);

    /// Find a record by id
    async fn get(&self, id: ClientId) -> Option<ClientRecord>;
}

struct StoreState {
    clients: HashMap<ClientId, ClientRecord>,
    next_id: ClientId,
}

/// Volatile in-process store
///
/// The record map and the id counter sit behind one lock, so id assignment is
/// serialized with writes.
pub struct InMemoryClientStore {
    state: RwLock<StoreState>,
}

impl InMemoryClientStore {
    pub fn new() -> Self {
        Self::starting_at(1)
    }

    /// Create a store whose first assigned id is `first_id`
    pub fn starting_at(first_id: ClientId) -> Self {
        Self {
            state: RwLock::new(StoreState {
                clients: HashMap::new(),
                next_id: first_id,
            }),
        }
    }
}

impl Default for InMemoryClientStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ClientStore for InMemoryClientStore {
    async fn next_id(&self) -> ClientId {
        let mut state = self.state.write().await;
        let id = state.next_id;
        state.next_id += 1;
        id
    }

    async fn put(&self, id: ClientId, record: ClientRecord) {
        let mut state = self.state.write().await;
        state.clients.insert(id, record);
    }

    async fn get(&self, id: ClientId) -> Option<ClientRecord> {
        self.state.read().await.clients.get(&id).cloned()
    }
}
