use std::sync::Arc;

use chrono::{DateTime, Utc};
use user_directory_common::User;

use crate::config::{Config, CorsConfig, LoggingConfig, SeedConfig, ServerConfig};
use crate::store::InMemoryUserStore;
use crate::AppState;

pub fn test_config() -> Config {
    Config {
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
        },
        logging: LoggingConfig {
            level: "debug".to_string(),
            format: "text".to_string(),
        },
        cors: CorsConfig {
            origins: "*".to_string(),
        },
        seed: SeedConfig { enabled: true },
    }
}

/// State over the seeded sample users.
pub fn create_test_state() -> Arc<AppState> {
    Arc::new(AppState::in_memory(test_config()))
}

/// State over exactly `users`.
pub fn create_state_with_users(users: Vec<User>) -> Arc<AppState> {
    Arc::new(AppState::new(
        test_config(),
        Arc::new(InMemoryUserStore::with_users(users)),
    ))
}

pub fn test_user(id: i64, name: &str, email: &str, role: &str) -> User {
    let ts: DateTime<Utc> = DateTime::from_timestamp(1_705_305_600, 0).unwrap_or_default();
    User {
        id,
        name: name.to_string(),
        email: email.to_string(),
        role: role.to_string(),
        avatar: None,
        created_at: ts,
        updated_at: ts,
    }
}
