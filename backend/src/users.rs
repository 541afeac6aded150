//! User listing and mutation rules on top of a `UserStore`.

use std::sync::Arc;

use serde::Deserialize;
use user_directory_common::{
    NewUser, PaginatedResponse, Pagination, User, UserPatch, DEFAULT_LIMIT, DEFAULT_PAGE,
};

use crate::error::{Error, Result};
use crate::store::{NewUserRecord, UserFilter, UserStore};

/// Raw list query as it arrives on the URL. Numbers are parsed leniently.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListQuery {
    pub page: Option<String>,
    pub limit: Option<String>,
    pub search: Option<String>,
    pub role: Option<String>,
}

impl ListQuery {
    pub fn page(&self) -> i64 {
        parse_or(self.page.as_deref(), DEFAULT_PAGE)
    }

    pub fn limit(&self) -> i64 {
        parse_or(self.limit.as_deref(), DEFAULT_LIMIT)
    }
}

fn parse_or(raw: Option<&str>, default: i64) -> i64 {
    raw.and_then(leading_integer).unwrap_or(default)
}

/// Optional sign plus the leading run of digits, so `"2.5"` is 2 and `"3abc"` is 3.
/// `None` when no digits lead the value or it does not fit in an `i64`.
fn leading_integer(raw: &str) -> Option<i64> {
    let raw = raw.trim_start();
    let (sign, rest) = match raw.as_bytes().first() {
        Some(b'-') => ("-", &raw[1..]),
        Some(b'+') => ("", &raw[1..]),
        _ => ("", raw),
    };
    let digits = rest.len() - rest.trim_start_matches(|c: char| c.is_ascii_digit()).len();
    if digits == 0 {
        return None;
    }
    format!("{}{}", sign, &rest[..digits]).parse().ok()
}

/// Parse a path segment as a user id.
pub fn parse_id(raw: &str) -> Result<i64> {
    raw.trim()
        .parse()
        .map_err(|_| Error::InvalidArgument("Invalid user id".to_string()))
}

/// Placeholder avatar derived from the first letter of the name.
pub fn avatar_url(name: &str) -> String {
    let initial: String = name
        .trim()
        .chars()
        .next()
        .map(|c| c.to_uppercase().collect())
        .unwrap_or_default();
    format!(
        "https://via.placeholder.com/100x100/6366F1/FFFFFF?text={}",
        initial
    )
}

/// Query/mutation service for user records.
#[derive(Clone)]
pub struct UserService {
    store: Arc<dyn UserStore>,
}

impl UserService {
    pub fn new(store: Arc<dyn UserStore>) -> Self {
        Self { store }
    }

    /// Filter, then paginate. Out-of-range pages yield an empty slice.
    pub async fn list(&self, query: &ListQuery) -> Result<PaginatedResponse<User>> {
        let filter = UserFilter::new(query.search.clone(), query.role.clone());
        let matching = self.store.list(&filter).await?;

        let pagination = Pagination::new(query.page(), query.limit(), matching.len() as u64);
        let page = pagination.slice(&matching).to_vec();

        tracing::debug!(
            total = pagination.total,
            returned = page.len(),
            "Listed users"
        );
        Ok(PaginatedResponse::new(page, pagination))
    }

    pub async fn get(&self, id: i64) -> Result<User> {
        Ok(self.store.get(id).await?)
    }

    pub async fn create(&self, new_user: NewUser) -> Result<User> {
        let (Some(name), Some(email), Some(role)) = (
            required(new_user.name),
            required(new_user.email),
            required(new_user.role),
        ) else {
            return Err(Error::Validation(
                "Name, email and role are required".to_string(),
            ));
        };

        let avatar = Some(avatar_url(&name));
        let user = self
            .store
            .insert(NewUserRecord {
                name,
                email,
                role,
                avatar,
            })
            .await?;

        tracing::info!(id = user.id, email = %user.email, "User created");
        Ok(user)
    }

    pub async fn update(&self, id: i64, patch: UserPatch) -> Result<User> {
        let user = self.store.update(id, &patch).await?;
        tracing::info!(id = user.id, "User updated");
        Ok(user)
    }

    pub async fn delete(&self, id: i64) -> Result<User> {
        let user = self.store.remove(id).await?;
        tracing::info!(id = user.id, email = %user.email, "User deleted");
        Ok(user)
    }

    pub async fn count(&self) -> Result<usize> {
        Ok(self.store.count().await?)
    }
}

fn required(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
