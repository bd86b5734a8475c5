//! Request validation.
//!
//! Every check runs; failures are collected into one
//! [`ApiError::Validation`] instead of stopping at the first.

use social_graph_core::{NewUser, UserId};

use crate::error::ApiError;
use crate::types::{ConnectionRequest, CreateUserRequest, DegreeQuery, FieldError};

const USER_ID_MIN: usize = 3;
const USER_ID_MAX: usize = 50;
const DISPLAY_NAME_MAX: usize = 100;

/// Accumulates field errors.
#[derive(Debug, Default)]
pub struct Validator {
    errors: Vec<FieldError>,
}

impl Validator {
    /// Creates an empty validator.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a failure for `field`.
    pub fn fail(&mut self, field: &str, message: impl Into<String>) {
        self.errors.push(FieldError {
            field: field.to_string(),
            message: message.into(),
        });
    }

    /// Checks a required user id: ASCII alphanumeric, 3 to 50 characters.
    /// `missing` is the message used when the value is absent.
    pub fn user_id(&mut self, field: &str, value: Option<&str>, missing: &str) -> Option<UserId> {
        let Some(value) = value else {
            self.fail(field, missing);
            return None;
        };

        let before = self.errors.len();
        if !value.chars().all(|c| c.is_ascii_alphanumeric()) {
            self.fail(
                field,
                format!("{field} must contain only alphanumeric characters"),
            );
        }
        let len = value.chars().count();
        if len < USER_ID_MIN {
            self.fail(
                field,
                format!("{field} must be at least {USER_ID_MIN} characters long"),
            );
        } else if len > USER_ID_MAX {
            self.fail(
                field,
                format!("{field} must not exceed {USER_ID_MAX} characters"),
            );
        }

        (self.errors.len() == before).then(|| UserId::from(value))
    }

    /// Checks a required display name: 1 to 100 characters.
    pub fn display_name(&mut self, value: Option<&str>) -> Option<String> {
        match value {
            None => {
                self.fail("display_name", "display_name is required");
                None
            }
            Some("") => {
                self.fail("display_name", "display_name cannot be empty");
                None
            }
            Some(v) if v.chars().count() > DISPLAY_NAME_MAX => {
                self.fail(
                    "display_name",
                    format!("display_name must not exceed {DISPLAY_NAME_MAX} characters"),
                );
                None
            }
            Some(v) => Some(v.to_string()),
        }
    }

    /// Checks an optional email address.
    pub fn email(&mut self, value: Option<&str>) -> Option<String> {
        let value = value?;
        if looks_like_email(value) {
            Some(value.to_string())
        } else {
            self.fail("email", "Please provide a valid email address");
            None
        }
    }

    /// Returns `Ok(())` when nothing failed.
    ///
    /// # Errors
    ///
    /// `ApiError::Validation` with every recorded failure.
    pub fn finish(self) -> Result<(), ApiError> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(ApiError::Validation(self.errors))
        }
    }
}

/// `local@domain.tld` with no whitespace, a non-empty local part, and a
/// dotted domain whose labels are non-empty and whose last label has at
/// least two characters.
fn looks_like_email(value: &str) -> bool {
    if value.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    let labels: Vec<&str> = domain.split('.').collect();
    labels.len() >= 2
        && labels.iter().all(|l| !l.is_empty())
        && labels.last().is_some_and(|tld| tld.len() >= 2)
}

/// Validates a user registration request.
///
/// # Errors
///
/// `ApiError::Validation` listing every invalid field.
pub fn validate_create_user(request: &CreateUserRequest) -> Result<NewUser, ApiError> {
    let mut v = Validator::new();
    let id = v.user_id(
        "user_str_id",
        request.user_str_id.as_deref(),
        "user_str_id is required",
    );
    let display_name = v.display_name(request.display_name.as_deref());
    let email = v.email(request.email.as_deref());
    v.finish()?;

    match (id, display_name) {
        (Some(id), Some(name)) => {
            let user = NewUser::new(id, &name);
            Ok(match email {
                Some(email) => user.with_email(&email),
                None => user,
            })
        }
        _ => Err(ApiError::invalid("body", "Invalid user")),
    }
}

/// Validates a connection body: both ids valid and different.
///
/// # Errors
///
/// `ApiError::Validation` listing every invalid field.
pub fn validate_connection(request: &ConnectionRequest) -> Result<(UserId, UserId), ApiError> {
    let mut v = Validator::new();
    let a = v.user_id(
        "user1_str_id",
        request.user1_str_id.as_deref(),
        "user1_str_id is required",
    );
    let b = v.user_id(
        "user2_str_id",
        request.user2_str_id.as_deref(),
        "user2_str_id is required",
    );
    if let (Some(a), Some(b)) = (&a, &b) {
        if a == b {
            v.fail("user2_str_id", "Users cannot connect to themselves");
        }
    }
    v.finish()?;

    a.zip(b)
        .ok_or_else(|| ApiError::invalid("body", "Invalid connection"))
}

/// Validates the degree query parameters.
///
/// # Errors
///
/// `ApiError::Validation` listing every invalid parameter.
pub fn validate_degree_query(query: &DegreeQuery) -> Result<(UserId, UserId), ApiError> {
    let mut v = Validator::new();
    let from = v.user_id(
        "from_user_str_id",
        query.from_user_str_id.as_deref(),
        "from_user_str_id query parameter is required",
    );
    let to = v.user_id(
        "to_user_str_id",
        query.to_user_str_id.as_deref(),
        "to_user_str_id query parameter is required",
    );
    v.finish()?;

    from.zip(to)
        .ok_or_else(|| ApiError::invalid("query", "Invalid degree query"))
}

/// Validates a `user_str_id` path parameter.
///
/// # Errors
///
/// `ApiError::Validation` if the id is malformed.
pub fn validate_user_param(user_str_id: &str) -> Result<UserId, ApiError> {
    let mut v = Validator::new();
    let id = v.user_id("user_str_id", Some(user_str_id), "user_str_id is required");
    v.finish()?;
    id.ok_or_else(|| ApiError::invalid("user_str_id", "Invalid user_str_id"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn details(err: ApiError) -> Vec<FieldError> {
        match err {
            ApiError::Validation(details) => details,
            ApiError::Core(e) => panic!("expected validation error, got {e}"),
        }
    }

    fn user_request(id: Option<&str>, name: Option<&str>, email: Option<&str>) -> CreateUserRequest {
        CreateUserRequest {
            user_str_id: id.map(String::from),
            display_name: name.map(String::from),
            email: email.map(String::from),
        }
    }

    #[test]
    fn test_valid_user() {
        let user = validate_create_user(&user_request(
            Some("alice1"),
            Some("Alice"),
            Some("alice@example.com"),
        ))
        .unwrap();
        assert_eq!(user.user_str_id.as_str(), "alice1");
        assert_eq!(user.email.as_deref(), Some("alice@example.com"));
    }

    #[test]
    fn test_user_failures_are_collected() {
        let err = validate_create_user(&user_request(Some("a_"), Some(""), Some("nope")))
            .unwrap_err();
        let fields: Vec<String> = details(err).into_iter().map(|d| d.field).collect();
        // Non-alphanumeric and too short both reported for the id.
        assert_eq!(
            fields,
            vec!["user_str_id", "user_str_id", "display_name", "email"]
        );
    }

    #[test]
    fn test_missing_fields() {
        let err = validate_create_user(&CreateUserRequest::default()).unwrap_err();
        let messages: Vec<String> = details(err).into_iter().map(|d| d.message).collect();
        assert_eq!(
            messages,
            vec!["user_str_id is required", "display_name is required"]
        );
    }

    #[test]
    fn test_user_id_length_bounds() {
        assert!(validate_user_param("abc").is_ok());
        assert!(validate_user_param(&"a".repeat(50)).is_ok());
        let err = validate_user_param(&"a".repeat(51)).unwrap_err();
        assert_eq!(
            details(err)[0].message,
            "user_str_id must not exceed 50 characters"
        );
    }

    #[test]
    fn test_display_name_too_long() {
        let long = "x".repeat(101);
        let err = validate_create_user(&user_request(Some("alice"), Some(&long), None))
            .unwrap_err();
        assert_eq!(details(err)[0].field, "display_name");
    }

    #[test]
    fn test_email_shapes() {
        assert!(looks_like_email("a@b.co"));
        assert!(looks_like_email("first.last@mail.example.org"));
        assert!(!looks_like_email("a@b"));
        assert!(!looks_like_email("@b.com"));
        assert!(!looks_like_email("a@b.c"));
        assert!(!looks_like_email("a b@c.com"));
        assert!(!looks_like_email("a@@b.com"));
        assert!(!looks_like_email("a@b..com"));
    }

    #[test]
    fn test_connection_same_ids_rejected() {
        let err = validate_connection(&ConnectionRequest {
            user1_str_id: Some("alice".into()),
            user2_str_id: Some("alice".into()),
        })
        .unwrap_err();
        assert_eq!(
            details(err)[0].message,
            "Users cannot connect to themselves"
        );
    }

    #[test]
    fn test_connection_valid() {
        let (a, b) = validate_connection(&ConnectionRequest {
            user1_str_id: Some("bob".into()),
            user2_str_id: Some("alice".into()),
        })
        .unwrap();
        assert_eq!((a.as_str(), b.as_str()), ("bob", "alice"));
    }

    #[test]
    fn test_degree_query_missing_params() {
        let err = validate_degree_query(&DegreeQuery::default()).unwrap_err();
        let messages: Vec<String> = details(err).into_iter().map(|d| d.message).collect();
        assert_eq!(
            messages,
            vec![
                "from_user_str_id query parameter is required",
                "to_user_str_id query parameter is required"
            ]
        );
    }
}
