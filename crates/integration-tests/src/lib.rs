//! Integration test harness for Byteshelf.
//!
//! Builds the full application router against an in-memory `SQLite`
//! database and drives it with in-process requests, so tests cover the
//! real middleware stack (sessions included) without a running server.
//!
//! # Example
//!
//! ```rust,ignore
//! let mut app = TestApp::new().await;
//! let resp = app.get("/products").await;
//! assert_eq!(resp.status(), StatusCode::OK);
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

use axum::Router;
use axum::body::Body;
use axum::http::{Request, Response, header};
use secrecy::SecretString;
use serde_json::Value;
use sqlx::SqlitePool;
use sqlx::sqlite::SqlitePoolOptions;
use tower::ServiceExt;

use byteshelf_core::Email;
use byteshelf_storefront::config::StoreConfig;
use byteshelf_storefront::db;
use byteshelf_storefront::db::users::UserRepository;
use byteshelf_storefront::middleware;
use byteshelf_storefront::models::user::{NewUser, User};
use byteshelf_storefront::services::auth::hash_password;
use byteshelf_storefront::state::AppState;

/// The application under test, with a cookie jar of one.
pub struct TestApp {
    router: Router,
    pool: SqlitePool,
    cookie: Option<String>,
}

impl TestApp {
    /// Build the application against a fresh in-memory database.
    ///
    /// # Panics
    ///
    /// Panics if the database or router cannot be set up.
    pub async fn new() -> Self {
        // One connection, or each pooled connection would get its own
        // private in-memory database
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .expect("Failed to create in-memory pool");

        db::run_migrations(&pool)
            .await
            .expect("Failed to run migrations");

        let store = middleware::create_session_store(&pool)
            .await
            .expect("Failed to create session store");
        let session_layer = middleware::create_session_layer(store);

        let config = StoreConfig {
            database_url: SecretString::from("sqlite::memory:"),
            host: std::net::IpAddr::V4(std::net::Ipv4Addr::LOCALHOST),
            port: 0,
            admin_email: "admin@example.com".to_owned(),
            admin_password: SecretString::from("admin123"),
        };

        let state = AppState::new(config, pool.clone());
        let router = byteshelf_storefront::app(state, session_layer);

        Self {
            router,
            pool,
            cookie: None,
        }
    }

    /// The database pool, for direct fixture setup.
    #[must_use]
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Forget the session cookie, simulating a fresh browser.
    pub fn drop_cookies(&mut self) {
        self.cookie = None;
    }

    /// Send a GET request, carrying the stored session cookie.
    ///
    /// # Panics
    ///
    /// Panics if the request cannot be built or dispatched.
    pub async fn get(&mut self, path: &str) -> Response<Body> {
        let mut builder = Request::builder().method("GET").uri(path);
        if let Some(cookie) = &self.cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        let request = builder
            .body(Body::empty())
            .expect("Failed to build request");

        self.dispatch(request).await
    }

    /// Send a POST with form-encoded fields, carrying the session cookie.
    ///
    /// # Panics
    ///
    /// Panics if the request cannot be built or dispatched.
    pub async fn post_form(&mut self, path: &str, fields: &[(&str, &str)]) -> Response<Body> {
        let body = serde_urlencoded::to_string(fields).expect("Failed to encode form");

        let mut builder = Request::builder()
            .method("POST")
            .uri(path)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
        if let Some(cookie) = &self.cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        let request = builder
            .body(Body::from(body))
            .expect("Failed to build request");

        self.dispatch(request).await
    }

    /// Register and log in a regular user, returning the account.
    ///
    /// # Panics
    ///
    /// Panics if registration or login does not succeed.
    pub async fn login_as_user(&mut self, username: &str, email: &str, password: &str) -> User {
        let resp = self
            .post_form(
                "/register",
                &[
                    ("username", username),
                    ("email", email),
                    ("password", password),
                    ("confirm_password", password),
                ],
            )
            .await;
        assert!(resp.status().is_redirection(), "registration failed");

        let resp = self
            .post_form("/login", &[("email", email), ("password", password)])
            .await;
        assert!(resp.status().is_redirection(), "login failed");

        let parsed = Email::parse(email).expect("invalid test email");
        UserRepository::new(&self.pool)
            .get_by_email(&parsed)
            .await
            .expect("user lookup failed")
            .expect("registered user missing")
    }

    /// Create an admin account directly and log in as it.
    ///
    /// # Panics
    ///
    /// Panics if account creation or login fails.
    pub async fn login_as_admin(&mut self) -> User {
        let email = Email::parse("admin@example.com").expect("invalid admin email");
        let password_hash = hash_password("admin123").expect("hashing failed");

        let user = UserRepository::new(&self.pool)
            .create(&NewUser {
                username: "admin".to_owned(),
                email,
                password_hash,
                first_name: None,
                last_name: None,
                is_admin: true,
            })
            .await
            .expect("admin creation failed");

        let resp = self
            .post_form(
                "/login",
                &[("email", "admin@example.com"), ("password", "admin123")],
            )
            .await;
        assert!(resp.status().is_redirection(), "admin login failed");

        user
    }

    async fn dispatch(&mut self, request: Request<Body>) -> Response<Body> {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Request failed");

        // Carry the session cookie forward like a browser would
        if let Some(set_cookie) = response.headers().get(header::SET_COOKIE)
            && let Ok(value) = set_cookie.to_str()
            && let Some(pair) = value.split(';').next()
        {
            self.cookie = Some(pair.to_owned());
        }

        response
    }
}

/// Read a response body as JSON.
///
/// # Panics
///
/// Panics if the body is not valid JSON.
pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read body");
    serde_json::from_slice(&bytes).expect("Body is not valid JSON")
}

/// The `Location` header of a redirect response.
///
/// # Panics
///
/// Panics if the header is missing or not UTF-8.
pub fn location(response: &Response<Body>) -> &str {
    response
        .headers()
        .get(header::LOCATION)
        .expect("Missing Location header")
        .to_str()
        .expect("Location header is not UTF-8")
}
