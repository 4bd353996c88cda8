mod common;

use std::sync::Arc;

use chrono::{Days, Months, NaiveDate, Utc};
use user_api::{
    error::Error,
    models::users::UserRequest,
    services::UserService,
    storage::{InMemoryUserStore, UserStore},
};

use common::{TEST_MIN_AGE, generate_test_email};

fn service() -> UserService {
    UserService::new(Arc::new(InMemoryUserStore::new()), TEST_MIN_AGE)
}

fn valid_request() -> UserRequest {
    UserRequest {
        email: Some(generate_test_email()),
        first_name: Some("John".to_string()),
        last_name: Some("Doe".to_string()),
        birth_date: NaiveDate::from_ymd_opt(1990, 1, 1),
        address: Some("123 Street".to_string()),
        phone: Some("1234567890".to_string()),
    }
}

/// Latest birth date that still satisfies the configured minimum age.
fn min_age_boundary() -> NaiveDate {
    Utc::now()
        .date_naive()
        .checked_sub_months(Months::new(TEST_MIN_AGE * 12))
        .unwrap()
}

#[tokio::test]
async fn test_create_user_success_echoes_fields() {
    let service = service();
    let request = valid_request();
    let email = request.email.clone().unwrap();

    let user = service.create_user(request).await.expect("create should succeed");

    assert!(user.id > 0, "User should get a server-assigned id");
    assert_eq!(user.email, email);
    assert_eq!(user.first_name, "John");
    assert_eq!(user.last_name, "Doe");
    assert_eq!(user.birth_date, NaiveDate::from_ymd_opt(1990, 1, 1).unwrap());
    assert_eq!(user.address.as_deref(), Some("123 Street"));
    assert_eq!(user.phone.as_deref(), Some("1234567890"));

    // Round-trip: fetching by the returned id yields the same record
    let fetched = service.find_by_id(user.id).await.unwrap();
    assert_eq!(fetched, user);
}

#[tokio::test]
async fn test_create_user_underage_fails() {
    let service = service();

    let mut request = valid_request();
    // One day past the boundary, so the user is just under the minimum age
    request.birth_date = min_age_boundary().checked_add_days(Days::new(1));

    let result = service.create_user(request).await;
    match result {
        Err(Error::Validation(msg)) => {
            assert_eq!(msg, format!("User should be at least {} years old", TEST_MIN_AGE));
        }
        other => panic!("Expected validation error, got {:?}", other.map(|u| u.id)),
    }
}

#[tokio::test]
async fn test_create_user_exactly_min_age_succeeds() {
    let service = service();

    let mut request = valid_request();
    request.birth_date = Some(min_age_boundary());

    assert!(service.create_user(request).await.is_ok());
}

#[tokio::test]
async fn test_create_user_missing_birth_date_fails() {
    let service = service();

    let mut request = valid_request();
    request.birth_date = None;

    assert!(matches!(
        service.create_user(request).await,
        Err(Error::Validation(_))
    ));
}

#[tokio::test]
async fn test_create_user_duplicate_email_is_constraint_violation() {
    let service = service();
    let request = valid_request();

    service.create_user(request.clone()).await.unwrap();

    match service.create_user(request).await {
        Err(Error::Constraint(msg)) => {
            assert!(msg.contains("unique"), "Message should come from the storage diagnostic");
        }
        other => panic!("Expected constraint violation, got {:?}", other.map(|u| u.id)),
    }
}

#[tokio::test]
async fn test_create_user_invalid_email_fails() {
    let service = service();

    let mut request = valid_request();
    request.email = Some("not-an-email".to_string());

    assert!(matches!(
        service.create_user(request).await,
        Err(Error::Validation(_))
    ));
}

#[tokio::test]
async fn test_find_by_id_not_found() {
    let service = service();

    match service.find_by_id(999).await {
        Err(Error::NotFound(msg)) => assert_eq!(msg, "User with id 999 not found"),
        other => panic!("Expected not found, got {:?}", other.map(|u| u.id)),
    }
}

#[tokio::test]
async fn test_update_user_full_replace() {
    let service = service();
    let user = service.create_user(valid_request()).await.unwrap();

    let update = UserRequest {
        email: Some(generate_test_email()),
        first_name: Some("UpdatedFirstName".to_string()),
        last_name: Some("UpdatedLastName".to_string()),
        birth_date: NaiveDate::from_ymd_opt(1992, 1, 1),
        // Absent optional fields are written as null on full update
        address: None,
        phone: None,
    };
    let expected_email = update.email.clone().unwrap();

    let updated = service.update_user(user.id, update).await.unwrap();

    assert_eq!(updated.id, user.id);
    assert_eq!(updated.email, expected_email);
    assert_eq!(updated.first_name, "UpdatedFirstName");
    assert_eq!(updated.last_name, "UpdatedLastName");
    assert_eq!(updated.birth_date, NaiveDate::from_ymd_opt(1992, 1, 1).unwrap());
    assert_eq!(updated.address, None, "Full update should null absent optional fields");
    assert_eq!(updated.phone, None, "Full update should null absent optional fields");
}

#[tokio::test]
async fn test_update_user_missing_required_field_is_constraint_violation() {
    let service = service();
    let user = service.create_user(valid_request()).await.unwrap();

    let mut update = valid_request();
    update.first_name = None;

    assert!(matches!(
        service.update_user(user.id, update).await,
        Err(Error::Constraint(_))
    ));
}

#[tokio::test]
async fn test_update_user_not_found() {
    let service = service();

    assert!(matches!(
        service.update_user(999, valid_request()).await,
        Err(Error::NotFound(_))
    ));
}

#[tokio::test]
async fn test_partial_update_single_field() {
    let service = service();
    let user = service.create_user(valid_request()).await.unwrap();

    let patch = UserRequest {
        email: Some("new@x.com".to_string()),
        ..Default::default()
    };

    let updated = service.partial_update_user(user.id, patch).await.unwrap();

    assert_eq!(updated.email, "new@x.com");
    assert_eq!(updated.first_name, user.first_name, "Untouched fields keep prior values");
    assert_eq!(updated.last_name, user.last_name);
    assert_eq!(updated.birth_date, user.birth_date);
    assert_eq!(updated.address, user.address);
    assert_eq!(updated.phone, user.phone);
}

#[tokio::test]
async fn test_partial_update_empty_request_changes_nothing() {
    let service = service();
    let user = service.create_user(valid_request()).await.unwrap();

    let updated = service
        .partial_update_user(user.id, UserRequest::default())
        .await
        .unwrap();

    assert_eq!(updated, user);
}

#[tokio::test]
async fn test_partial_update_not_found() {
    let service = service();

    assert!(matches!(
        service.partial_update_user(2, UserRequest::default()).await,
        Err(Error::NotFound(_))
    ));
}

#[tokio::test]
async fn test_delete_user() {
    let service = service();
    let user = service.create_user(valid_request()).await.unwrap();

    service.delete_user_by_id(user.id).await.unwrap();

    assert!(matches!(
        service.find_by_id(user.id).await,
        Err(Error::NotFound(_))
    ));
}

#[tokio::test]
async fn test_delete_user_not_found() {
    let service = service();

    assert!(matches!(
        service.delete_user_by_id(2).await,
        Err(Error::NotFound(_))
    ));
}

#[tokio::test]
async fn test_list_users_unfiltered_pages_in_id_order() {
    let store = Arc::new(InMemoryUserStore::new());
    let service = UserService::new(store, TEST_MIN_AGE);

    for _ in 0..5 {
        service.create_user(valid_request()).await.unwrap();
    }

    let first_page = service.list_users(0, 3, None, None).await.unwrap();
    assert_eq!(first_page.len(), 3);
    assert!(first_page.windows(2).all(|w| w[0].id < w[1].id));

    let second_page = service.list_users(3, 3, None, None).await.unwrap();
    assert_eq!(second_page.len(), 2);
    assert!(second_page[0].id > first_page[2].id);
}

#[tokio::test]
async fn test_list_users_filters_birth_dates_inclusive() {
    let service = service();

    let mut request = valid_request();
    request.birth_date = NaiveDate::from_ymd_opt(1985, 6, 15);
    let inside = service.create_user(request).await.unwrap();

    let mut request = valid_request();
    request.birth_date = NaiveDate::from_ymd_opt(1990, 1, 1);
    let boundary = service.create_user(request).await.unwrap();

    let mut request = valid_request();
    request.birth_date = NaiveDate::from_ymd_opt(1995, 3, 3);
    let outside = service.create_user(request).await.unwrap();

    let from = NaiveDate::from_ymd_opt(1985, 1, 1).unwrap();
    let to = NaiveDate::from_ymd_opt(1990, 1, 1).unwrap();
    let users = service.list_users(0, 10, Some(from), Some(to)).await.unwrap();

    let ids: Vec<i64> = users.iter().map(|u| u.id).collect();
    assert!(ids.contains(&inside.id));
    assert!(ids.contains(&boundary.id), "Range bounds are inclusive");
    assert!(!ids.contains(&outside.id));
}

#[tokio::test]
async fn test_list_users_historical_range_is_valid() {
    // A range entirely in the past is the normal case for birth dates
    let service = service();
    service.create_user(valid_request()).await.unwrap();

    let from = NaiveDate::from_ymd_opt(1990, 1, 1).unwrap();
    let to = NaiveDate::from_ymd_opt(2000, 1, 1).unwrap();

    let users = service.list_users(0, 10, Some(from), Some(to)).await.unwrap();
    assert_eq!(users.len(), 1);
}

#[tokio::test]
async fn test_list_users_inverted_range_fails() {
    let service = service();

    let from = NaiveDate::from_ymd_opt(2000, 1, 1).unwrap();
    let to = NaiveDate::from_ymd_opt(1990, 1, 1).unwrap();

    match service.list_users(0, 10, Some(from), Some(to)).await {
        Err(Error::Validation(msg)) => assert_eq!(msg, "Invalid date range"),
        other => panic!("Expected validation error, got {:?}", other.map(|u| u.len())),
    }
}

#[tokio::test]
async fn test_list_users_single_bound_is_unfiltered() {
    let service = service();
    service.create_user(valid_request()).await.unwrap();

    let from = NaiveDate::from_ymd_opt(3000, 1, 1).unwrap();

    // With only one bound present the listing falls back to unfiltered
    let users = service.list_users(0, 10, Some(from), None).await.unwrap();
    assert_eq!(users.len(), 1);
}

#[tokio::test]
async fn test_store_delete_is_noop_for_absent_id() {
    let store = InMemoryUserStore::new();
    assert!(store.delete_by_id(42).await.is_ok());
}
