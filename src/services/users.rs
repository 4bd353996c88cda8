//! User business logic: creation rules, full/partial update semantics,
//! date-range listing.

use std::sync::Arc;

use chrono::{Months, NaiveDate, Utc};

use crate::error::{Error, Result};
use crate::models::users::{NewUser, User, UserRequest};
use crate::storage::UserStore;
use crate::validation::validate_user_request;

/// Service over the injected storage port.
#[derive(Clone)]
pub struct UserService {
    store: Arc<dyn UserStore>,
    min_age: u32,
}

impl UserService {
    /// Builds the service from a storage backend and the configured
    /// minimum age (`user.min_age`).
    pub fn new(store: Arc<dyn UserStore>, min_age: u32) -> Self {
        Self { store, min_age }
    }

    /// Creates a user. Fails with a validation error if the birth date is
    /// missing or the user would be younger than the configured minimum
    /// age; constraint violations (duplicate email, missing required
    /// fields) propagate from storage unchanged.
    pub async fn create_user(&self, request: UserRequest) -> Result<User> {
        validate_user_request(&request)?;

        let birth_date = request
            .birth_date
            .ok_or_else(|| Error::Validation("Birth date is required".to_string()))?;

        if birth_date > self.min_age_cutoff()? {
            return Err(Error::Validation(format!(
                "User should be at least {} years old",
                self.min_age
            )));
        }

        let user = self.store.insert(NewUser::from(request)).await?;
        tracing::info!(user_id = user.id, "user created");

        Ok(user)
    }

    /// Fetches a user by id, failing with `NotFound` if absent.
    pub async fn find_by_id(&self, id: i64) -> Result<User> {
        self.store
            .get_by_id(id)
            .await?
            .ok_or_else(|| Error::NotFound(format!("User with id {} not found", id)))
    }

    /// Full replace: every field of the stored record is overwritten from
    /// the request, including fields the request leaves absent (those are
    /// written as null and rejected by storage when the column is
    /// required).
    pub async fn update_user(&self, id: i64, request: UserRequest) -> Result<User> {
        validate_user_request(&request)?;

        // Loaded only for the NotFound check; the write overwrites it all.
        self.find_by_id(id).await?;

        self.store.update(id, NewUser::from(request)).await
    }

    /// Partial update: only fields present in the request overwrite the
    /// stored record, the rest keep their prior values.
    pub async fn partial_update_user(&self, id: i64, request: UserRequest) -> Result<User> {
        validate_user_request(&request)?;

        let existing = self.find_by_id(id).await?;

        let mut merged = existing.to_new_user();
        if request.email.is_some() {
            merged.email = request.email;
        }
        if request.first_name.is_some() {
            merged.first_name = request.first_name;
        }
        if request.last_name.is_some() {
            merged.last_name = request.last_name;
        }
        if request.birth_date.is_some() {
            merged.birth_date = request.birth_date;
        }
        if request.address.is_some() {
            merged.address = request.address;
        }
        if request.phone.is_some() {
            merged.phone = request.phone;
        }

        self.store.update(id, merged).await
    }

    /// Deletes a user, failing with `NotFound` if the id is absent.
    pub async fn delete_user_by_id(&self, id: i64) -> Result<()> {
        if !self.store.exists_by_id(id).await? {
            return Err(Error::NotFound(format!("User with id {} not found", id)));
        }

        self.store.delete_by_id(id).await?;
        tracing::info!(user_id = id, "user deleted");

        Ok(())
    }

    /// Lists a page of users. Without a date range the page is
    /// unfiltered; with both bounds present the range must satisfy
    /// `from <= to` and the page is filtered to birth dates within it,
    /// inclusive.
    pub async fn list_users(
        &self,
        offset: i64,
        limit: i64,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    ) -> Result<Vec<User>> {
        let (Some(from), Some(to)) = (from, to) else {
            return self.store.list_page(offset, limit).await;
        };

        if from > to {
            return Err(Error::Validation("Invalid date range".to_string()));
        }

        self.store
            .list_page_by_birth_date_between(offset, limit, from, to)
            .await
    }

    /// Latest birth date that still satisfies the minimum-age rule.
    fn min_age_cutoff(&self) -> Result<NaiveDate> {
        Utc::now()
            .date_naive()
            .checked_sub_months(Months::new(self.min_age * 12))
            .ok_or_else(|| Error::Internal("Minimum age out of range".to_string()))
    }
}
