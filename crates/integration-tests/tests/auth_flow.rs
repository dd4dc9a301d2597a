//! Integration tests for registration, login, and logout.

#![allow(clippy::unwrap_used)]

use axum::http::StatusCode;
use byteshelf_integration_tests::{TestApp, body_json, location};

#[tokio::test]
async fn test_register_then_login_and_logout() {
    let mut app = TestApp::new().await;

    let resp = app
        .post_form(
            "/register",
            &[
                ("username", "jdoe"),
                ("email", "jdoe@example.com"),
                ("password", "hunter2hunter2"),
                ("confirm_password", "hunter2hunter2"),
                ("first_name", "Jane"),
                ("last_name", "Doe"),
            ],
        )
        .await;
    assert!(resp.status().is_redirection());
    assert_eq!(location(&resp), "/login?success=account_created");

    let resp = app
        .post_form(
            "/login",
            &[("email", "jdoe@example.com"), ("password", "hunter2hunter2")],
        )
        .await;
    assert!(resp.status().is_redirection());
    assert_eq!(location(&resp), "/");

    // Every page carries the login state
    let resp = app.get("/").await;
    let body = body_json(resp).await;
    assert_eq!(body["meta"]["user"]["username"], "jdoe");

    // Logged in, but not an admin
    let resp = app.get("/admin").await;
    assert!(resp.status().is_redirection());
    assert_eq!(location(&resp), "/?error=forbidden");

    let resp = app.get("/logout").await;
    assert!(resp.status().is_redirection());
    assert_eq!(location(&resp), "/");

    // Session is gone: the admin gate treats us as anonymous again
    let resp = app.get("/admin").await;
    assert!(resp.status().is_redirection());
    assert_eq!(location(&resp), "/login");
}

#[tokio::test]
async fn test_duplicate_email_rejected() {
    let mut app = TestApp::new().await;

    let fields = [
        ("username", "first"),
        ("email", "taken@example.com"),
        ("password", "password one"),
        ("confirm_password", "password one"),
    ];
    let resp = app.post_form("/register", &fields).await;
    assert_eq!(location(&resp), "/login?success=account_created");

    // Same email, different username
    let resp = app
        .post_form(
            "/register",
            &[
                ("username", "second"),
                ("email", "taken@example.com"),
                ("password", "password two"),
                ("confirm_password", "password two"),
            ],
        )
        .await;
    assert_eq!(location(&resp), "/register?error=exists");

    // Same username, different email
    let resp = app
        .post_form(
            "/register",
            &[
                ("username", "first"),
                ("email", "other@example.com"),
                ("password", "password three"),
                ("confirm_password", "password three"),
            ],
        )
        .await;
    assert_eq!(location(&resp), "/register?error=exists");
}

#[tokio::test]
async fn test_register_rejects_password_mismatch() {
    let mut app = TestApp::new().await;

    let resp = app
        .post_form(
            "/register",
            &[
                ("username", "typo"),
                ("email", "typo@example.com"),
                ("password", "one password"),
                ("confirm_password", "another password"),
            ],
        )
        .await;
    assert_eq!(location(&resp), "/register?error=password_mismatch");
}

#[tokio::test]
async fn test_register_rejects_bad_input() {
    let mut app = TestApp::new().await;

    let resp = app
        .post_form(
            "/register",
            &[
                ("username", "nobody"),
                ("email", "not-an-email"),
                ("password", "whatever"),
                ("confirm_password", "whatever"),
            ],
        )
        .await;
    assert_eq!(location(&resp), "/register?error=invalid_email");

    let resp = app
        .post_form(
            "/register",
            &[
                ("username", "   "),
                ("email", "ok@example.com"),
                ("password", "whatever"),
                ("confirm_password", "whatever"),
            ],
        )
        .await;
    assert_eq!(location(&resp), "/register?error=invalid_username");
}

#[tokio::test]
async fn test_login_rejects_wrong_credentials() {
    let mut app = TestApp::new().await;
    app.login_as_user("jdoe", "jdoe@example.com", "right password")
        .await;
    app.drop_cookies();

    let resp = app
        .post_form(
            "/login",
            &[("email", "jdoe@example.com"), ("password", "wrong password")],
        )
        .await;
    assert_eq!(location(&resp), "/login?error=invalid_credentials");

    // Unknown email gets the same flash, not a different one
    let resp = app
        .post_form(
            "/login",
            &[("email", "ghost@example.com"), ("password", "anything")],
        )
        .await;
    assert_eq!(location(&resp), "/login?error=invalid_credentials");
}

#[tokio::test]
async fn test_admin_login_lands_on_dashboard() {
    let mut app = TestApp::new().await;
    app.drop_cookies();

    let email = byteshelf_core::Email::parse("root@example.com").unwrap();
    let hash = byteshelf_storefront::services::auth::hash_password("top secret").unwrap();
    byteshelf_storefront::db::users::UserRepository::new(app.pool())
        .create(&byteshelf_storefront::models::user::NewUser {
            username: "root".to_owned(),
            email,
            password_hash: hash,
            first_name: None,
            last_name: None,
            is_admin: true,
        })
        .await
        .unwrap();

    let resp = app
        .post_form(
            "/login",
            &[("email", "root@example.com"), ("password", "top secret")],
        )
        .await;
    assert_eq!(location(&resp), "/admin");

    let resp = app.get("/admin").await;
    assert_eq!(resp.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_login_page_echoes_flash_messages() {
    let mut app = TestApp::new().await;

    let resp = app.get("/login?error=invalid_credentials").await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body = body_json(resp).await;
    assert_eq!(body["error"], "invalid_credentials");
    assert_eq!(body["success"], serde_json::Value::Null);
    assert_eq!(body["meta"]["user"], serde_json::Value::Null);
}

#[tokio::test]
async fn test_logout_while_logged_out_is_harmless() {
    let mut app = TestApp::new().await;

    let resp = app.get("/logout").await;
    assert!(resp.status().is_redirection());
    assert_eq!(location(&resp), "/");
}
