//! Storage port for the `users` table.
//!
//! The service layer only sees the [`UserStore`] trait; the concrete
//! backend is injected at construction time. `PgUserStore` is the
//! production implementation, `InMemoryUserStore` backs the test suite.

pub mod memory;
pub mod postgres;

pub use memory::InMemoryUserStore;
pub use postgres::PgUserStore;

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::error::Result;
use crate::models::users::{NewUser, User};

/// Persistence contract for the `User` table.
///
/// Implementations must surface unique-email and missing-required-column
/// failures as `Error::Constraint`, carrying the backend's diagnostic
/// message. Lookups never treat "not found" as an error: `get_by_id`
/// returns `None` and `exists_by_id` returns `false`.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Persists a new record and returns it with the assigned id.
    async fn insert(&self, user: NewUser) -> Result<User>;

    /// Returns the record or `None`.
    async fn get_by_id(&self, id: i64) -> Result<Option<User>>;

    /// Returns whether a record with the given id exists.
    async fn exists_by_id(&self, id: i64) -> Result<bool>;

    /// Overwrites every column of an existing record. Fails with
    /// `Error::NotFound` if the id is absent and `Error::Constraint` when
    /// a required column would be written as null.
    async fn update(&self, id: i64, user: NewUser) -> Result<User>;

    /// Deletes a record. Callers are expected to check existence first;
    /// deleting an absent id is a no-op.
    async fn delete_by_id(&self, id: i64) -> Result<()>;

    /// Lists a page of users in id order.
    async fn list_page(&self, offset: i64, limit: i64) -> Result<Vec<User>>;

    /// Lists a page of users with `from <= birth_date <= to`, id order.
    async fn list_page_by_birth_date_between(
        &self,
        offset: i64,
        limit: i64,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<User>>;
}
