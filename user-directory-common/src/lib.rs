//! User Directory Common Types
//!
//! Shared types used by both the backend service and the client hooks.

pub mod envelope;
pub mod pagination;
pub mod user;

pub use envelope::{ApiResponse, PaginatedResponse};
pub use pagination::{ListUsersParams, Pagination, DEFAULT_LIMIT, DEFAULT_PAGE};
pub use user::{NewUser, User, UserPatch};
