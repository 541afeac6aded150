//! User Directory client.
//!
//! `UsersClient` speaks the REST surface of the backend; the hooks in
//! [`hooks`] wrap it with `{data, loading, error}` state for UI code.

pub mod api;
pub mod config;
pub mod error;
pub mod hooks;

pub use api::{UserApi, UsersClient};
pub use config::ClientConfig;
pub use error::{ClientError, Result};
pub use hooks::{HookState, UseUser, UseUserMutation, UseUsers, UsersPage};
