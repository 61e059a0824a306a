//! Tests for the domain user model.

use super::*;
use rstest::{fixture, rstest};
use serde_json::json;

#[fixture]
fn ada() -> User {
    User::try_from_parts(7, "ada_l", "Ada@Example.com", false).expect("valid user")
}

#[rstest]
#[case(0)]
#[case(-3)]
fn user_id_rejects_non_positive(#[case] raw: i64) {
    assert_eq!(UserId::new(raw), Err(UserValidationError::InvalidId));
}

#[rstest]
#[case("", UserValidationError::EmptyUsername)]
#[case("ab", UserValidationError::UsernameTooShort { min: USERNAME_MIN })]
#[case("a_very_long_username", UserValidationError::UsernameTooLong { max: USERNAME_MAX })]
#[case("bad name", UserValidationError::UsernameInvalidCharacters)]
#[case("dollar$", UserValidationError::UsernameInvalidCharacters)]
fn username_rejects_invalid_values(#[case] raw: &str, #[case] expected: UserValidationError) {
    assert_eq!(Username::new(raw), Err(expected));
}

#[rstest]
#[case("abc")]
#[case("snake_case-name")]
#[case("User2024")]
fn username_accepts_valid_values(#[case] raw: &str) {
    let username = Username::new(raw).expect("valid username");
    assert_eq!(username.as_ref(), raw);
}

#[rstest]
#[case("   ", UserValidationError::EmptyEmail)]
#[case("no-at-sign", UserValidationError::EmailInvalid)]
#[case("user@nodot", UserValidationError::EmailInvalid)]
#[case("two words@example.com", UserValidationError::EmailInvalid)]
fn email_rejects_invalid_values(#[case] raw: &str, #[case] expected: UserValidationError) {
    assert_eq!(Email::new(raw), Err(expected));
}

#[rstest]
fn email_rejects_overlong_addresses() {
    let raw = format!("{}@example.com", "a".repeat(EMAIL_MAX));
    assert_eq!(
        Email::new(raw),
        Err(UserValidationError::EmailTooLong { max: EMAIL_MAX })
    );
}

#[rstest]
fn email_trims_and_normalises_case() {
    let email = Email::new("  Ada@Example.COM ").expect("valid email");
    assert_eq!(email.as_ref(), "Ada@Example.COM");
    assert_eq!(email.normalized(), "ada@example.com");
}

#[rstest]
#[case(UserValidationError::InvalidId, "id")]
#[case(UserValidationError::UsernameInvalidCharacters, "username")]
#[case(UserValidationError::EmailInvalid, "email")]
fn validation_errors_name_their_field(#[case] error: UserValidationError, #[case] field: &str) {
    assert_eq!(error.field(), field);
}

#[rstest]
fn serialises_camel_case(ada: User) {
    let value = serde_json::to_value(&ada).expect("serialise user");
    assert_eq!(
        value,
        json!({ "id": 7, "username": "ada_l", "email": "Ada@Example.com", "isAdmin": false })
    );
}

#[rstest]
fn deserialisation_validates_fields() {
    let payload = json!({ "id": 7, "username": "x", "email": "ada@example.com", "isAdmin": true });
    let result: Result<User, _> = serde_json::from_value(payload);
    assert!(result.is_err());
}

#[rstest]
fn deserialisation_accepts_snake_case_alias(ada: User) {
    let payload = json!({ "id": 7, "username": "ada_l", "email": "Ada@Example.com", "is_admin": false });
    let user: User = serde_json::from_value(payload).expect("valid payload");
    assert_eq!(user, ada);
}
