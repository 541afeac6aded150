//! Stateful data hooks.
//!
//! Each hook owns a `{data, loading, error}` snapshot and exposes imperative
//! triggers. Hooks never return errors to the caller: failures land in
//! `error`. Calls are neither de-duplicated nor cancelled, so when two calls
//! overlap the one that finishes last decides the state.

mod mutation;
mod user;
mod users;

pub use mutation::UseUserMutation;
pub use user::UseUser;
pub use users::{UseUsers, UsersPage};

use crate::error::ClientError;

/// Point-in-time view of a hook.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HookState<T> {
    pub data: T,
    pub loading: bool,
    pub error: Option<String>,
}

impl<T> HookState<T> {
    pub fn new(data: T, loading: bool) -> Self {
        Self {
            data,
            loading,
            error: None,
        }
    }

    /// Mark a call as started: loading, previous error cleared.
    fn begin(&mut self) {
        self.loading = true;
        self.error = None;
    }

    /// Record a failed call, keeping the previous data.
    fn fail(&mut self, err: &ClientError, fallback: &str) {
        self.loading = false;
        self.error = Some(describe(err, fallback));
    }
}

/// Message shown for a failed call.
fn describe(err: &ClientError, fallback: &str) -> String {
    let message = err.to_string();
    if message.trim().is_empty() {
        fallback.to_string()
    } else {
        message
    }
}
