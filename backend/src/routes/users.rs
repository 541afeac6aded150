//! User CRUD endpoints.
//!
//! - `GET /users` - filtered, paginated list
//! - `POST /users` - create
//! - `GET /users/:id` - fetch one
//! - `PUT /users/:id` - partial update
//! - `DELETE /users/:id` - remove

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use user_directory_common::{ApiResponse, NewUser, PaginatedResponse, User, UserPatch};

use crate::error::{Error, Result};
use crate::users::{parse_id, ListQuery};
use crate::AppState;

/// GET /users - List users with search, role filter and pagination
async fn list_users(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListQuery>,
) -> Result<Json<PaginatedResponse<User>>> {
    Ok(Json(state.users.list(&query).await?))
}

/// GET /users/:id - Fetch a single user
async fn get_user(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<User>>> {
    let id = parse_id(&id)?;
    let user = state.users.get(id).await?;
    Ok(Json(ApiResponse::ok(user)))
}

/// POST /users - Create a user
async fn create_user(
    State(state): State<Arc<AppState>>,
    body: std::result::Result<Json<NewUser>, JsonRejection>,
) -> Result<(StatusCode, Json<ApiResponse<User>>)> {
    let Json(new_user) = body.map_err(invalid_body)?;
    let user = state.users.create(new_user).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok_with_message(user, "User created successfully")),
    ))
}

/// PUT /users/:id - Update the supplied fields of a user
async fn update_user(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    body: std::result::Result<Json<UserPatch>, JsonRejection>,
) -> Result<Json<ApiResponse<User>>> {
    let id = parse_id(&id)?;
    let Json(patch) = body.map_err(invalid_body)?;
    let user = state.users.update(id, patch).await?;
    Ok(Json(ApiResponse::ok_with_message(user, "User updated successfully")))
}

/// DELETE /users/:id - Remove a user, returning its last snapshot
async fn delete_user(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<User>>> {
    let id = parse_id(&id)?;
    let user = state.users.delete(id).await?;
    Ok(Json(ApiResponse::ok_with_message(user, "User deleted successfully")))
}

fn invalid_body(rejection: JsonRejection) -> Error {
    Error::Validation(format!("Invalid request body: {}", rejection.body_text()))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/users", get(list_users).post(create_user))
        .route(
            "/users/:id",
            get(get_user).put(update_user).delete(delete_user),
        )
}
