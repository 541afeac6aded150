//! Single-record hook.

use std::sync::Arc;

use tokio::sync::RwLock;
use user_directory_common::User;

use super::HookState;
use crate::api::UserApi;

/// Tracks one user by id. With no id the record is cleared and nothing is fetched.
pub struct UseUser {
    api: Arc<dyn UserApi>,
    id: RwLock<Option<i64>>,
    state: RwLock<HookState<Option<User>>>,
}

impl UseUser {
    pub fn new(api: Arc<dyn UserApi>, id: Option<i64>) -> Self {
        Self {
            api,
            id: RwLock::new(id),
            state: RwLock::new(HookState::default()),
        }
    }

    pub async fn mount(&self) {
        self.fetch().await;
    }

    /// Switch to another id. Fetches again only when it changed.
    pub async fn set_id(&self, id: Option<i64>) -> bool {
        {
            let mut current = self.id.write().await;
            if *current == id {
                return false;
            }
            *current = id;
        }
        self.fetch().await;
        true
    }

    pub async fn refetch(&self) {
        self.fetch().await;
    }

    pub async fn state(&self) -> HookState<Option<User>> {
        self.state.read().await.clone()
    }

    async fn fetch(&self) {
        let Some(id) = *self.id.read().await else {
            self.state.write().await.data = None;
            return;
        };

        self.state.write().await.begin();
        let result = self.api.get_user(id).await;

        let mut state = self.state.write().await;
        match result {
            Ok(user) => {
                state.data = Some(user);
                state.loading = false;
            }
            Err(e) => {
                tracing::warn!(id, "Failed to load user: {}", e);
                state.fail(&e, "Failed to load user");
            }
        }
    }
}
