//! List hook.

use std::sync::Arc;

use tokio::sync::RwLock;
use user_directory_common::{ListUsersParams, Pagination, User, DEFAULT_LIMIT, DEFAULT_PAGE};

use super::HookState;
use crate::api::UserApi;

/// Data held by [`UseUsers`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UsersPage {
    pub users: Vec<User>,
    pub pagination: Pagination,
}

/// Keeps one page of the user list in sync with its parameters.
///
/// Starts in the loading state; call [`UseUsers::mount`] for the first fetch.
pub struct UseUsers {
    api: Arc<dyn UserApi>,
    params: RwLock<ListUsersParams>,
    state: RwLock<HookState<UsersPage>>,
}

impl UseUsers {
    pub fn new(api: Arc<dyn UserApi>, params: ListUsersParams) -> Self {
        Self {
            api,
            params: RwLock::new(params),
            state: RwLock::new(HookState::new(UsersPage::default(), true)),
        }
    }

    /// Issue the initial fetch.
    pub async fn mount(&self) {
        self.fetch().await;
    }

    /// Replace the parameters. Fetches again only when they changed.
    pub async fn set_params(&self, params: ListUsersParams) -> bool {
        {
            let mut current = self.params.write().await;
            if *current == params {
                return false;
            }
            *current = params;
        }
        self.fetch().await;
        true
    }

    /// Fetch again with the current parameters.
    pub async fn refetch(&self) {
        self.fetch().await;
    }

    pub async fn params(&self) -> ListUsersParams {
        self.params.read().await.clone()
    }

    pub async fn state(&self) -> HookState<UsersPage> {
        self.state.read().await.clone()
    }

    async fn fetch(&self) {
        let params = with_defaults(self.params.read().await.clone());
        self.state.write().await.begin();

        let result = self.api.list_users(&params).await;

        let mut state = self.state.write().await;
        match result {
            Ok(response) => {
                state.data = UsersPage {
                    users: response.data,
                    pagination: response.pagination,
                };
                state.loading = false;
            }
            Err(e) => {
                tracing::warn!("Failed to load users: {}", e);
                state.fail(&e, "Failed to load users");
            }
        }
    }
}

fn with_defaults(params: ListUsersParams) -> ListUsersParams {
    let page = params.page.filter(|p| *p > 0).unwrap_or(DEFAULT_PAGE as u32);
    let limit = params.limit.filter(|l| *l > 0).unwrap_or(DEFAULT_LIMIT as u32);
    ListUsersParams {
        page: Some(page),
        limit: Some(limit),
        ..params
    }
}
