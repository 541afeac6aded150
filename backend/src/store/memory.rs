//! In-memory user store.

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use tokio::sync::RwLock;
use user_directory_common::{User, UserPatch};

use super::{NewUserRecord, StoreError, StoreResult, UserFilter, UserStore};

/// Process-local collection of users. Contents are lost on restart.
///
/// All mutations take the write lock for the whole check-then-write sequence,
/// so email uniqueness holds even when requests are handled in parallel.
#[derive(Debug, Default)]
pub struct InMemoryUserStore {
    users: RwLock<Vec<User>>,
}

impl InMemoryUserStore {
    /// Create an empty store. The first record gets id 1.
    pub fn new() -> Self {
        Self {
            users: RwLock::new(Vec::new()),
        }
    }

    /// Create a store pre-populated with the sample users.
    pub fn with_seed_data() -> Self {
        Self {
            users: RwLock::new(seed_users()),
        }
    }

    /// Create a store holding exactly `users`.
    pub fn with_users(users: Vec<User>) -> Self {
        Self {
            users: RwLock::new(users),
        }
    }
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn list(&self, filter: &UserFilter) -> StoreResult<Vec<User>> {
        let users = self.users.read().await;
        Ok(users.iter().filter(|u| filter.matches(u)).cloned().collect())
    }

    async fn get(&self, id: i64) -> StoreResult<User> {
        let users = self.users.read().await;
        users
            .iter()
            .find(|u| u.id == id)
            .cloned()
            .ok_or(StoreError::NotFound(id))
    }

    async fn insert(&self, record: NewUserRecord) -> StoreResult<User> {
        let mut users = self.users.write().await;

        if users.iter().any(|u| u.email == record.email) {
            return Err(StoreError::EmailTaken(record.email));
        }

        let id = users.iter().map(|u| u.id).max().map_or(1, |max| max + 1);
        let now = Utc::now();
        let user = User {
            id,
            name: record.name,
            email: record.email,
            role: record.role,
            avatar: record.avatar,
            created_at: now,
            updated_at: now,
        };
        users.push(user.clone());
        Ok(user)
    }

    async fn update(&self, id: i64, patch: &UserPatch) -> StoreResult<User> {
        let mut users = self.users.write().await;

        let index = users
            .iter()
            .position(|u| u.id == id)
            .ok_or(StoreError::NotFound(id))?;

        if let Some(email) = patch.email() {
            if email != users[index].email && users.iter().any(|u| u.id != id && u.email == email) {
                return Err(StoreError::EmailTaken(email.to_string()));
            }
        }

        let user = &mut users[index];
        if let Some(name) = patch.name() {
            user.name = name.to_string();
        }
        if let Some(email) = patch.email() {
            user.email = email.to_string();
        }
        if let Some(role) = patch.role() {
            user.role = role.to_string();
        }
        user.updated_at = touch(user.updated_at);
        Ok(user.clone())
    }

    async fn remove(&self, id: i64) -> StoreResult<User> {
        let mut users = self.users.write().await;
        let index = users
            .iter()
            .position(|u| u.id == id)
            .ok_or(StoreError::NotFound(id))?;
        Ok(users.remove(index))
    }

    async fn count(&self) -> StoreResult<usize> {
        Ok(self.users.read().await.len())
    }
}

/// Current time, never earlier than `previous`.
fn touch(previous: DateTime<Utc>) -> DateTime<Utc> {
    Utc::now().max(previous)
}

fn seed_timestamp(day: u32, hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, day, hour, 0, 0)
        .single()
        .unwrap_or_else(Utc::now)
}

fn seed_users() -> Vec<User> {
    let seeds = [
        (1, "Nguyễn Văn A", "nguyenvana@email.com", "Admin", "4F46E5", "A", 15, 8),
        (2, "Trần Thị B", "tranthib@email.com", "User", "059669", "B", 16, 9),
        (3, "Lê Văn C", "levanc@email.com", "Moderator", "DC2626", "C", 17, 10),
        (4, "Phạm Thị D", "phamthid@email.com", "User", "7C3AED", "D", 18, 11),
    ];

    seeds
        .into_iter()
        .map(|(id, name, email, role, color, initial, day, hour)| {
            let ts = seed_timestamp(day, hour);
            User {
                id,
                name: name.to_string(),
                email: email.to_string(),
                role: role.to_string(),
                avatar: Some(format!(
                    "https://via.placeholder.com/100x100/{}/FFFFFF?text={}",
                    color, initial
                )),
                created_at: ts,
                updated_at: ts,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(name: &str, email: &str) -> NewUserRecord {
        NewUserRecord {
            name: name.to_string(),
            email: email.to_string(),
            role: "User".to_string(),
            avatar: None,
        }
    }

    #[tokio::test]
    async fn test_first_id_on_empty_store_is_one() {
        let store = InMemoryUserStore::new();
        let user = store.insert(record("Ann", "ann@x.com")).await.unwrap();
        assert_eq!(user.id, 1);
        let user = store.insert(record("Bob", "bob@x.com")).await.unwrap();
        assert_eq!(user.id, 2);
    }

    #[tokio::test]
    async fn test_id_is_max_plus_one() {
        let store = InMemoryUserStore::with_seed_data();
        store.remove(2).await.unwrap();
        let user = store.insert(record("Eve", "eve@x.com")).await.unwrap();
        assert_eq!(user.id, 5);

        store.remove(5).await.unwrap();
        store.remove(4).await.unwrap();
        let user = store.insert(record("Fay", "fay@x.com")).await.unwrap();
        assert_eq!(user.id, 4);
    }

    #[tokio::test]
    async fn test_duplicate_email_rejected() {
        let store = InMemoryUserStore::with_seed_data();
        let err = store
            .insert(record("Copy", "tranthib@email.com"))
            .await
            .unwrap_err();
        assert_eq!(err, StoreError::EmailTaken("tranthib@email.com".to_string()));
        assert_eq!(store.count().await.unwrap(), 4);
    }

    #[tokio::test]
    async fn test_email_comparison_is_exact() {
        let store = InMemoryUserStore::with_seed_data();
        let user = store
            .insert(record("Upper", "TRANTHIB@email.com"))
            .await
            .unwrap();
        assert_eq!(user.id, 5);
    }

    #[tokio::test]
    async fn test_update_merges_supplied_fields() {
        let store = InMemoryUserStore::with_seed_data();
        let before = store.get(3).await.unwrap();
        let patch = UserPatch {
            role: Some("Admin".to_string()),
            name: Some(String::new()),
            ..Default::default()
        };
        let after = store.update(3, &patch).await.unwrap();
        assert_eq!(after.role, "Admin");
        assert_eq!(after.name, before.name);
        assert_eq!(after.email, before.email);
        assert_eq!(after.created_at, before.created_at);
        assert!(after.updated_at >= before.updated_at);
    }

    #[tokio::test]
    async fn test_update_keeping_own_email_is_allowed() {
        let store = InMemoryUserStore::with_seed_data();
        let patch = UserPatch {
            email: Some("levanc@email.com".to_string()),
            ..Default::default()
        };
        assert!(store.update(3, &patch).await.is_ok());
    }

    #[tokio::test]
    async fn test_update_email_collision() {
        let store = InMemoryUserStore::with_seed_data();
        let patch = UserPatch {
            email: Some("nguyenvana@email.com".to_string()),
            name: Some("Renamed".to_string()),
            ..Default::default()
        };
        let err = store.update(3, &patch).await.unwrap_err();
        assert!(matches!(err, StoreError::EmailTaken(_)));
        assert_ne!(store.get(3).await.unwrap().name, "Renamed");
    }

    #[tokio::test]
    async fn test_update_missing_user() {
        let store = InMemoryUserStore::new();
        let err = store.update(42, &UserPatch::default()).await.unwrap_err();
        assert_eq!(err, StoreError::NotFound(42));
    }

    #[tokio::test]
    async fn test_remove_returns_snapshot_and_missing_leaves_collection() {
        let store = InMemoryUserStore::with_seed_data();
        let removed = store.remove(1).await.unwrap();
        assert_eq!(removed.email, "nguyenvana@email.com");
        assert_eq!(store.remove(1).await.unwrap_err(), StoreError::NotFound(1));
        assert_eq!(store.count().await.unwrap(), 3);
    }

    #[tokio::test]
    async fn test_list_preserves_insertion_order() {
        let store = InMemoryUserStore::with_seed_data();
        let ids: Vec<i64> = store
            .list(&UserFilter::default())
            .await
            .unwrap()
            .iter()
            .map(|u| u.id)
            .collect();
        assert_eq!(ids, vec![1, 2, 3, 4]);
    }

    #[tokio::test]
    async fn test_concurrent_inserts_keep_email_unique() {
        let store = std::sync::Arc::new(InMemoryUserStore::new());
        let mut handles = Vec::new();
        for i in 0..16 {
            let store = store.clone();
            handles.push(tokio::spawn(async move {
                store
                    .insert(record(&format!("User {}", i), "same@x.com"))
                    .await
            }));
        }

        let mut created = 0;
        for handle in handles {
            if handle.await.unwrap().is_ok() {
                created += 1;
            }
        }
        assert_eq!(created, 1);
        assert_eq!(store.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_concurrent_updates_keep_email_unique() {
        let store = std::sync::Arc::new(InMemoryUserStore::new());
        store.insert(record("Ann", "ann@x.com")).await.unwrap();
        store.insert(record("Bob", "bob@x.com")).await.unwrap();

        let mut handles = Vec::new();
        for i in 0..16 {
            let store = store.clone();
            let id = 1 + i % 2;
            handles.push(tokio::spawn(async move {
                let patch = UserPatch {
                    email: Some("taken@x.com".to_string()),
                    ..Default::default()
                };
                (id, store.update(id, &patch).await)
            }));
        }

        let mut winners = Vec::new();
        for handle in handles {
            match handle.await.unwrap() {
                (id, Ok(_)) => winners.push(id),
                (_, Err(err)) => assert!(matches!(err, StoreError::EmailTaken(_))),
            }
        }
        assert!(!winners.is_empty());
        assert!(winners.iter().all(|id| *id == winners[0]));

        let holders = store
            .list(&UserFilter::default())
            .await
            .unwrap()
            .into_iter()
            .filter(|u| u.email == "taken@x.com")
            .count();
        assert_eq!(holders, 1);
    }
}
