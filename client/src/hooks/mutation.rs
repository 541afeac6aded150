//! Create/update/delete hook.

use std::future::Future;
use std::sync::Arc;

use tokio::sync::RwLock;
use user_directory_common::{NewUser, User, UserPatch};

use super::HookState;
use crate::api::UserApi;
use crate::error::Result;

/// Imperative mutations. Each call returns the resulting record, or `None`
/// on failure with the reason left in `error`.
pub struct UseUserMutation {
    api: Arc<dyn UserApi>,
    state: RwLock<HookState<Option<User>>>,
}

impl UseUserMutation {
    pub fn new(api: Arc<dyn UserApi>) -> Self {
        Self {
            api,
            state: RwLock::new(HookState::default()),
        }
    }

    pub async fn create(&self, new_user: NewUser) -> Option<User> {
        self.run("Failed to create user", self.api.create_user(&new_user))
            .await
    }

    pub async fn update(&self, id: i64, patch: UserPatch) -> Option<User> {
        self.run("Failed to update user", self.api.update_user(id, &patch))
            .await
    }

    pub async fn delete(&self, id: i64) -> Option<User> {
        self.run("Failed to delete user", self.api.delete_user(id))
            .await
    }

    pub async fn state(&self) -> HookState<Option<User>> {
        self.state.read().await.clone()
    }

    async fn run(&self, fallback: &str, call: impl Future<Output = Result<User>>) -> Option<User> {
        self.state.write().await.begin();
        let result = call.await;

        let mut state = self.state.write().await;
        match result {
            Ok(user) => {
                state.data = Some(user.clone());
                state.loading = false;
                Some(user)
            }
            Err(e) => {
                tracing::warn!("{}: {}", fallback, e);
                state.fail(&e, fallback);
                None
            }
        }
    }
}
