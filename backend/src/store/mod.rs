//! User storage abstraction.
//!
//! This module defines the `UserStore` trait that hides where user records
//! live behind a common interface. Only an in-memory implementation exists;
//! the service talks to the trait so another backend can be swapped in.

mod memory;

pub use memory::InMemoryUserStore;

use async_trait::async_trait;
use user_directory_common::{User, UserPatch};

/// Errors reported by a store.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    #[error("User {0} not found")]
    NotFound(i64),

    #[error("Email {0} is already in use")]
    EmailTaken(String),

    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Validated fields of a record about to be created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUserRecord {
    pub name: String,
    pub email: String,
    pub role: String,
    pub avatar: Option<String>,
}

/// Filter applied by `UserStore::list`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserFilter {
    /// Case-insensitive substring matched against name or email.
    pub search: Option<String>,
    /// Exact role match.
    pub role: Option<String>,
}

impl UserFilter {
    pub fn new(search: Option<String>, role: Option<String>) -> Self {
        Self {
            search: search
                .filter(|s| !s.is_empty())
                .map(|s| s.to_lowercase()),
            role: role.filter(|r| !r.is_empty()),
        }
    }

    pub fn matches(&self, user: &User) -> bool {
        if let Some(ref needle) = self.search {
            let hit = user.name.to_lowercase().contains(needle.as_str())
                || user.email.to_lowercase().contains(needle.as_str());
            if !hit {
                return false;
            }
        }
        match self.role {
            Some(ref role) => user.role == *role,
            None => true,
        }
    }
}

/// Owner of the user collection.
///
/// Uniqueness checks and the write they guard must happen atomically inside
/// the implementation; callers never see a partially applied mutation.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// All records matching `filter`, in insertion order.
    async fn list(&self, filter: &UserFilter) -> StoreResult<Vec<User>>;

    async fn get(&self, id: i64) -> StoreResult<User>;

    /// Assign an id, stamp timestamps and append.
    async fn insert(&self, record: NewUserRecord) -> StoreResult<User>;

    /// Merge the non-empty fields of `patch` and refresh `updated_at`.
    async fn update(&self, id: i64, patch: &UserPatch) -> StoreResult<User>;

    /// Remove a record and return its last snapshot.
    async fn remove(&self, id: i64) -> StoreResult<User>;

    async fn count(&self) -> StoreResult<usize>;
}
