//! User CRUD handlers
//!
//! Handlers follow the thin-layer pattern: they parse inputs, delegate to
//! the user service, and shape responses. All business logic is in the
//! service layer.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::{StatusCode, header},
    response::IntoResponse,
};
use chrono::NaiveDate;
use serde::Deserialize;

use crate::{
    error::Result,
    models::users::{User, UserRequest},
    state::AppState,
};

const DEFAULT_PAGE_SIZE: i64 = 10;

/// Query parameters for `GET /users`.
#[derive(Debug, Deserialize)]
pub struct ListUsersParams {
    /// Zero-based page index, defaults to 0.
    pub page: Option<i64>,
    /// Page size, defaults to 10.
    pub size: Option<i64>,
    /// Inclusive lower bound on birth date (`yyyy-MM-dd`).
    pub from: Option<NaiveDate>,
    /// Inclusive upper bound on birth date (`yyyy-MM-dd`).
    pub to: Option<NaiveDate>,
}

/// POST /users
///
/// Creates a user and answers `201 Created` with a `Location` header
/// pointing at the new resource.
///
/// # HTTP Status Codes
/// - `201 CREATED`: User created successfully
/// - `400 BAD_REQUEST`: Validation or constraint error
pub async fn create_user(
    State(state): State<AppState>,
    Json(request): Json<UserRequest>,
) -> Result<impl IntoResponse> {
    let user = state.users.create_user(request).await?;
    let location = format!("/users/{}", user.id);

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(user),
    ))
}

/// GET /users/{id}
///
/// # HTTP Status Codes
/// - `200 OK`: User found
/// - `404 NOT_FOUND`: No user with this id
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<User>> {
    let user = state.users.find_by_id(id).await?;
    Ok(Json(user))
}

/// PUT /users/{id}
///
/// Full replace: absent request fields overwrite stored values with null.
///
/// # HTTP Status Codes
/// - `200 OK`: User updated
/// - `400 BAD_REQUEST`: Validation or constraint error
/// - `404 NOT_FOUND`: No user with this id
pub async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(request): Json<UserRequest>,
) -> Result<Json<User>> {
    let user = state.users.update_user(id, request).await?;
    Ok(Json(user))
}

/// PATCH /users/{id}
///
/// Partial update: only fields present in the request are overwritten.
///
/// # HTTP Status Codes
/// - `200 OK`: User updated
/// - `400 BAD_REQUEST`: Validation or constraint error
/// - `404 NOT_FOUND`: No user with this id
pub async fn partial_update_user(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(request): Json<UserRequest>,
) -> Result<Json<User>> {
    let user = state.users.partial_update_user(id, request).await?;
    Ok(Json(user))
}

/// DELETE /users/{id}
///
/// # HTTP Status Codes
/// - `204 NO_CONTENT`: User deleted
/// - `404 NOT_FOUND`: No user with this id
pub async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode> {
    state.users.delete_user_by_id(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /users?page&size&from&to
///
/// Lists a page of users in id order, optionally filtered to birth dates
/// within `[from, to]`.
///
/// # HTTP Status Codes
/// - `200 OK`: Page returned (possibly empty)
/// - `400 BAD_REQUEST`: Invalid date range
pub async fn list_users(
    State(state): State<AppState>,
    Query(params): Query<ListUsersParams>,
) -> Result<Json<Vec<User>>> {
    let page = params.page.unwrap_or(0).max(0);
    let size = params.size.unwrap_or(DEFAULT_PAGE_SIZE).max(0);
    // Saturate: an absurd page index yields an empty page, not an overflow
    let offset = page.saturating_mul(size);

    let users = state
        .users
        .list_users(offset, size, params.from, params.to)
        .await?;

    Ok(Json(users))
}
