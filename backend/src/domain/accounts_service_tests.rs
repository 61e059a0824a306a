//! Tests for the account service.

use std::sync::Arc;

use rstest::{fixture, rstest};
use serde_json::json;

use super::*;
use crate::domain::ErrorCode;
use crate::domain::ports::{MockUserRepository, StoredCredentials, UserPersistenceError};

#[fixture]
fn ada() -> User {
    User::try_from_parts(1, "ada_l", "ada@example.com", false).expect("valid user")
}

fn make_service(repo: MockUserRepository) -> AccountService<MockUserRepository> {
    AccountService::new(Arc::new(repo))
}

fn sign_up_request(username: &str, email: &str, password: &str) -> SignUpRequest {
    SignUpRequest {
        username: username.to_owned(),
        email: email.to_owned(),
        password: password.to_owned(),
    }
}

fn expect_no_clashes(repo: &mut MockUserRepository) {
    repo.expect_find_by_username().returning(|_| Ok(None));
    repo.expect_find_by_email().returning(|_| Ok(None));
}

#[rstest]
#[tokio::test]
async fn sign_up_hashes_password_and_creates_account(ada: User) {
    let mut repo = MockUserRepository::new();
    expect_no_clashes(&mut repo);
    let created = ada.clone();
    repo.expect_create_account()
        .withf(|account: &NewAccount| {
            account.username.as_ref() == "ada_l"
                && account.password_hash.starts_with("$argon2")
                && verify_password(&account.password_hash, "correct horse")
        })
        .times(1)
        .return_once(move |_| Ok(created));

    let user = make_service(repo)
        .sign_up(sign_up_request("ada_l", "ada@example.com", "correct horse"))
        .await
        .expect("sign-up succeeds");

    assert_eq!(user, ada);
}

#[rstest]
#[tokio::test]
async fn sign_up_reports_every_invalid_field() {
    let mut repo = MockUserRepository::new();
    repo.expect_find_by_username().times(0);
    repo.expect_find_by_email().times(0);
    repo.expect_create_account().times(0);

    let error = make_service(repo)
        .sign_up(sign_up_request("x", "not-an-email", "short"))
        .await
        .expect_err("validation fails");

    assert_eq!(error.code(), ErrorCode::InvalidRequest);
    let fields = error.details().and_then(|d| d["errors"].as_object()).expect("field map");
    assert_eq!(fields.len(), 3);
    assert!(fields.contains_key("username"));
    assert!(fields.contains_key("email"));
    assert!(fields.contains_key("password"));
}

#[rstest]
#[tokio::test]
async fn sign_up_reports_taken_username_and_email_together(ada: User) {
    let mut repo = MockUserRepository::new();
    let by_name = ada.clone();
    repo.expect_find_by_username()
        .return_once(move |_| Ok(Some(by_name)));
    repo.expect_find_by_email()
        .return_once(move |_| Ok(Some(ada)));
    repo.expect_create_account().times(0);

    let error = make_service(repo)
        .sign_up(sign_up_request("ada_l", "ADA@example.com", "correct horse"))
        .await
        .expect_err("clash");

    assert_eq!(
        error.details(),
        Some(&json!({
            "errors": {
                "email": { "message": "email is already in use" },
                "username": { "message": "username is already in use" },
            }
        }))
    );
}

#[rstest]
#[tokio::test]
async fn sign_up_maps_racing_duplicate_to_field_error() {
    let mut repo = MockUserRepository::new();
    expect_no_clashes(&mut repo);
    repo.expect_create_account()
        .return_once(|_| Err(UserPersistenceError::duplicate_email()));

    let error = make_service(repo)
        .sign_up(sign_up_request("ada_l", "ada@example.com", "correct horse"))
        .await
        .expect_err("duplicate");

    assert_eq!(error.code(), ErrorCode::InvalidRequest);
    assert!(error.details().is_some_and(|d| d["errors"].get("email").is_some()));
}

#[rstest]
#[case("correct horse", true)]
#[case("wrong horse", false)]
#[tokio::test]
async fn sign_in_verifies_the_stored_hash(
    ada: User,
    #[case] attempt: &str,
    #[case] should_succeed: bool,
) {
    let password = Password::new("correct horse").expect("valid password");
    let stored = StoredCredentials {
        user: ada.clone(),
        password_hash: hash_password(&password).expect("hash"),
    };
    let mut repo = MockUserRepository::new();
    repo.expect_find_credentials()
        .withf(|email: &str| email == "ada@example.com")
        .return_once(move |_| Ok(Some(stored)));

    let credentials =
        LoginCredentials::try_from_parts("ada@example.com", attempt).expect("credentials");
    let result = make_service(repo).sign_in(&credentials).await;

    match (should_succeed, result) {
        (true, Ok(user)) => assert_eq!(user, ada),
        (false, Err(err)) => {
            assert_eq!(err.code(), ErrorCode::Unauthorized);
            assert_eq!(err.message(), "invalid credentials");
        }
        (true, Err(err)) => panic!("expected success, got error: {err:?}"),
        (false, Ok(user)) => panic!("expected failure, got user {}", user.id()),
    }
}

#[rstest]
#[tokio::test]
async fn sign_in_rejects_unknown_email() {
    let mut repo = MockUserRepository::new();
    repo.expect_find_credentials().return_once(|_| Ok(None));

    let credentials =
        LoginCredentials::try_from_parts("ghost@example.com", "whatever1").expect("credentials");
    let error = make_service(repo)
        .sign_in(&credentials)
        .await
        .expect_err("unknown email");

    assert_eq!(error.code(), ErrorCode::Unauthorized);
}

#[rstest]
#[tokio::test]
async fn update_account_keeps_admin_flag_and_ignores_own_values(ada: User) {
    let mut repo = MockUserRepository::new();
    let current = ada.clone();
    repo.expect_find_by_id()
        .return_once(move |_| Ok(Some(current)));
    let same_name = ada.clone();
    repo.expect_find_by_username()
        .return_once(move |_| Ok(Some(same_name)));
    repo.expect_find_by_email().return_once(|_| Ok(None));
    repo.expect_update()
        .withf(|id, changes: &UserChanges| {
            id.as_i64() == 1 && !changes.is_admin && changes.email.as_ref() == "new@example.com"
        })
        .return_once(|_, _| {
            Ok(Some(
                User::try_from_parts(1, "ada_l", "new@example.com", false).expect("user"),
            ))
        });

    let user_id = ada.id();
    let updated = make_service(repo)
        .update_account(
            user_id,
            UpdateAccountRequest {
                username: "ada_l".to_owned(),
                email: "new@example.com".to_owned(),
            },
        )
        .await
        .expect("update succeeds");

    assert_eq!(updated.email().as_ref(), "new@example.com");
}

#[rstest]
#[case(true, None)]
#[case(false, Some(ErrorCode::NotFound))]
#[tokio::test]
async fn delete_account_reports_missing_users(
    #[case] existed: bool,
    #[case] expected: Option<ErrorCode>,
) {
    let mut repo = MockUserRepository::new();
    repo.expect_delete_account()
        .times(1)
        .return_once(move |_| Ok(existed));

    let result = make_service(repo)
        .delete_account(UserId::new(5).expect("id"))
        .await;

    assert_eq!(result.err().map(|err| err.code()), expected);
}

#[rstest]
#[tokio::test]
async fn current_user_is_not_found_after_deletion() {
    let mut repo = MockUserRepository::new();
    repo.expect_find_by_id().return_once(|_| Ok(None));

    let error = make_service(repo)
        .current_user(UserId::new(5).expect("id"))
        .await
        .expect_err("missing");

    assert_eq!(error.code(), ErrorCode::NotFound);
}

#[rstest]
#[tokio::test]
async fn connection_failures_are_service_unavailable() {
    let mut repo = MockUserRepository::new();
    repo.expect_find_by_id()
        .return_once(|_| Err(UserPersistenceError::connection("pool timed out")));

    let error = make_service(repo)
        .current_user(UserId::new(5).expect("id"))
        .await
        .expect_err("unavailable");

    assert_eq!(error.code(), ErrorCode::ServiceUnavailable);
}
