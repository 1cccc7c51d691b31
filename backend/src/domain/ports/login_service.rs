//! Driving port for the login use-case.
//!
//! Authentication is an external collaborator; the HTTP adapter only needs a
//! user id to put in the session. Tests and local runs use the fixture roster
//! below.

use async_trait::async_trait;

use crate::domain::{Error, LoginCredentials, UserId};

/// Domain use-case port for authentication.
#[async_trait]
pub trait LoginService: Send + Sync {
    /// Validate credentials and return the authenticated user id.
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<UserId, Error>;
}

/// Development accounts as `(username, password, user id)`.
const FIXTURE_ACCOUNTS: [(&str, &str, &str); 2] = [
    ("admin", "password", "123e4567-e89b-12d3-a456-426614174000"),
    ("guest", "password", "0b5f2a4e-7c1d-4e8a-9f3b-6d2c1a0e9b77"),
];

/// Fixed-roster authenticator for development and tests.
///
/// Two accounts exist so ownership boundaries can be exercised locally.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureLoginService;

#[async_trait]
impl LoginService for FixtureLoginService {
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<UserId, Error> {
        let account = FIXTURE_ACCOUNTS.iter().find(|(username, password, _)| {
            *username == credentials.username() && *password == credentials.password()
        });
        match account {
            Some((_, _, id)) => UserId::new(id)
                .map_err(|err| Error::internal(format!("invalid fixture user id: {err}"))),
            None => Err(Error::unauthorized("invalid credentials")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use rstest::rstest;

    #[rstest]
    #[case("admin", "password", Some("123e4567-e89b-12d3-a456-426614174000"))]
    #[case("guest", "password", Some("0b5f2a4e-7c1d-4e8a-9f3b-6d2c1a0e9b77"))]
    #[case("admin", "wrong", None)]
    #[case("nobody", "password", None)]
    #[tokio::test]
    async fn fixture_roster_authenticates_known_accounts(
        #[case] username: &str,
        #[case] password: &str,
        #[case] expected: Option<&str>,
    ) {
        let creds =
            LoginCredentials::try_from_parts(username, password).expect("credentials shape");
        let result = FixtureLoginService.authenticate(&creds).await;
        match (expected, result) {
            (Some(id), Ok(user)) => assert_eq!(user.to_string(), id),
            (None, Err(err)) => assert_eq!(err.code(), ErrorCode::Unauthorized),
            (expected, other) => panic!("expected {expected:?}, got {other:?}"),
        }
    }
}
