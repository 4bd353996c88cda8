//! In-memory implementation of the user storage port.
//!
//! Enforces the same constraints the Postgres schema does (unique email,
//! NOT NULL required columns) so the service layer behaves identically in
//! tests and database-free runs.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::error::{Error, Result};
use crate::models::users::{NewUser, User};
use crate::storage::UserStore;

#[derive(Default)]
struct Inner {
    next_id: i64,
    rows: Vec<User>,
}

/// Mutex-guarded user store with sequential id assignment.
#[derive(Clone, Default)]
pub struct InMemoryUserStore {
    inner: Arc<Mutex<Inner>>,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Inner>> {
        self.inner
            .lock()
            .map_err(|_| Error::Internal("User store lock poisoned".to_string()))
    }
}

/// Materializes a row, rejecting missing required columns the way the
/// NOT NULL schema would.
fn materialize(id: i64, user: NewUser) -> Result<User> {
    let required = |value: Option<String>, column: &str| {
        value.ok_or_else(|| {
            Error::Constraint(format!(
                "null value in column \"{}\" violates not-null constraint",
                column
            ))
        })
    };

    let birth_date = user.birth_date.ok_or_else(|| {
        Error::Constraint(
            "null value in column \"birth_date\" violates not-null constraint".to_string(),
        )
    })?;

    Ok(User {
        id,
        email: required(user.email, "email")?,
        first_name: required(user.first_name, "first_name")?,
        last_name: required(user.last_name, "last_name")?,
        birth_date,
        address: user.address,
        phone: user.phone,
    })
}

fn check_unique_email(rows: &[User], email: &str, exclude_id: Option<i64>) -> Result<()> {
    let taken = rows
        .iter()
        .any(|row| row.email == email && Some(row.id) != exclude_id);
    if taken {
        return Err(Error::Constraint(
            "duplicate key value violates unique constraint \"users_email_key\"".to_string(),
        ));
    }
    Ok(())
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn insert(&self, user: NewUser) -> Result<User> {
        let mut inner = self.lock()?;

        inner.next_id += 1;
        let row = materialize(inner.next_id, user)?;
        check_unique_email(&inner.rows, &row.email, None)?;

        inner.rows.push(row.clone());
        Ok(row)
    }

    async fn get_by_id(&self, id: i64) -> Result<Option<User>> {
        let inner = self.lock()?;
        Ok(inner.rows.iter().find(|row| row.id == id).cloned())
    }

    async fn exists_by_id(&self, id: i64) -> Result<bool> {
        let inner = self.lock()?;
        Ok(inner.rows.iter().any(|row| row.id == id))
    }

    async fn update(&self, id: i64, user: NewUser) -> Result<User> {
        let mut inner = self.lock()?;

        let row = materialize(id, user)?;
        check_unique_email(&inner.rows, &row.email, Some(id))?;

        let existing = inner
            .rows
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| Error::NotFound(format!("User with id {} not found", id)))?;
        *existing = row.clone();

        Ok(row)
    }

    async fn delete_by_id(&self, id: i64) -> Result<()> {
        let mut inner = self.lock()?;
        inner.rows.retain(|row| row.id != id);
        Ok(())
    }

    async fn list_page(&self, offset: i64, limit: i64) -> Result<Vec<User>> {
        let inner = self.lock()?;

        let mut users: Vec<User> = inner.rows.clone();
        users.sort_by_key(|row| row.id);

        Ok(users
            .into_iter()
            .skip(offset.max(0) as usize)
            .take(limit.max(0) as usize)
            .collect())
    }

    async fn list_page_by_birth_date_between(
        &self,
        offset: i64,
        limit: i64,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<User>> {
        let inner = self.lock()?;

        let mut users: Vec<User> = inner
            .rows
            .iter()
            .filter(|row| row.birth_date >= from && row.birth_date <= to)
            .cloned()
            .collect();
        users.sort_by_key(|row| row.id);

        Ok(users
            .into_iter()
            .skip(offset.max(0) as usize)
            .take(limit.max(0) as usize)
            .collect())
    }
}
