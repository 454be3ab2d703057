//! Tests for HTTP Basic authentication through the router.
//!
//! Verifies that the authentication extractor rejects missing and wrong
//! credentials before any handler runs and admits roster users.

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
};
use base64::{engine::general_purpose::STANDARD, Engine};
use kontowart::router;
use kontowart_test_utils::prelude::*;
use tower::util::ServiceExt;

use crate::test_utils::{TestSetupExt, TEST_FRIEND_PASSWORD};

fn basic(username: &str, password: &str) -> String {
    format!("Basic {}", STANDARD.encode(format!("{}:{}", username, password)))
}

/// Tests a request without an Authorization header.
///
/// Expected: 401 Unauthorized
#[tokio::test]
async fn fails_without_credentials() -> Result<(), TestError> {
    let test = TestBuilder::new().with_entry_tables().build().await?;
    let app = router::routes().with_state(test.app_state());

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/entries")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    Ok(())
}

/// Tests a request with a wrong password.
///
/// Expected: 401 Unauthorized
#[tokio::test]
async fn fails_with_wrong_password() -> Result<(), TestError> {
    let test = TestBuilder::new().with_entry_tables().build().await?;
    let app = router::routes().with_state(test.app_state());

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/entries")
                .header(
                    header::AUTHORIZATION,
                    basic(constant::TEST_FRIEND_USERNAME, "wrong"),
                )
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    Ok(())
}

/// Tests a request with valid roster credentials.
///
/// Expected: 200 OK
#[tokio::test]
async fn succeeds_with_roster_credentials() -> Result<(), TestError> {
    let test = TestBuilder::new().with_entry_tables().build().await?;
    let app = router::routes().with_state(test.app_state());

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/entries")
                .header(
                    header::AUTHORIZATION,
                    basic(constant::TEST_FRIEND_USERNAME, TEST_FRIEND_PASSWORD),
                )
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    Ok(())
}
