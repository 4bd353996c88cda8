//! PostgreSQL implementation of the user storage port.

use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::error::ErrorKind;

use crate::database::DbPool;
use crate::error::{Error, Result};
use crate::models::users::{NewUser, User};
use crate::storage::UserStore;

/// User store backed by the `users` table.
#[derive(Clone)]
pub struct PgUserStore {
    pool: DbPool,
}

impl PgUserStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// Maps integrity errors (unique email, null required column) to the
/// constraint error kind, keeping the driver's diagnostic message.
fn map_constraint_error(e: sqlx::Error) -> Error {
    if let sqlx::Error::Database(db) = &e {
        match db.kind() {
            ErrorKind::UniqueViolation
            | ErrorKind::NotNullViolation
            | ErrorKind::CheckViolation => {
                return Error::Constraint(db.message().to_string());
            }
            _ => {}
        }
    }
    Error::Sqlx(e)
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn insert(&self, user: NewUser) -> Result<User> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (email, first_name, last_name, birth_date, address, phone)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, email, first_name, last_name, birth_date, address, phone
            "#,
        )
        .bind(user.email)
        .bind(user.first_name)
        .bind(user.last_name)
        .bind(user.birth_date)
        .bind(user.address)
        .bind(user.phone)
        .fetch_one(&self.pool)
        .await
        .map_err(map_constraint_error)?;

        Ok(user)
    }

    async fn get_by_id(&self, id: i64) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, email, first_name, last_name, birth_date, address, phone
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(Error::Sqlx)?;

        Ok(user)
    }

    async fn exists_by_id(&self, id: i64) -> Result<bool> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM users WHERE id = $1)",
        )
        .bind(id)
        .fetch_one(&self.pool)
        .await
        .map_err(Error::Sqlx)?;

        Ok(exists)
    }

    async fn update(&self, id: i64, user: NewUser) -> Result<User> {
        let updated = sqlx::query_as::<_, User>(
            r#"
            UPDATE users
            SET email = $1, first_name = $2, last_name = $3, birth_date = $4, address = $5, phone = $6
            WHERE id = $7
            RETURNING id, email, first_name, last_name, birth_date, address, phone
            "#,
        )
        .bind(user.email)
        .bind(user.first_name)
        .bind(user.last_name)
        .bind(user.birth_date)
        .bind(user.address)
        .bind(user.phone)
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_constraint_error)?;

        updated.ok_or_else(|| Error::NotFound(format!("User with id {} not found", id)))
    }

    async fn delete_by_id(&self, id: i64) -> Result<()> {
        sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(Error::Sqlx)?;

        Ok(())
    }

    async fn list_page(&self, offset: i64, limit: i64) -> Result<Vec<User>> {
        let users = sqlx::query_as::<_, User>(
            r#"
            SELECT id, email, first_name, last_name, birth_date, address, phone
            FROM users
            ORDER BY id
            OFFSET $1 LIMIT $2
            "#,
        )
        .bind(offset)
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(Error::Sqlx)?;

        Ok(users)
    }

    async fn list_page_by_birth_date_between(
        &self,
        offset: i64,
        limit: i64,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<User>> {
        let users = sqlx::query_as::<_, User>(
            r#"
            SELECT id, email, first_name, last_name, birth_date, address, phone
            FROM users
            WHERE birth_date BETWEEN $1 AND $2
            ORDER BY id
            OFFSET $3 LIMIT $4
            "#,
        )
        .bind(from)
        .bind(to)
        .bind(offset)
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(Error::Sqlx)?;

        Ok(users)
    }
}
