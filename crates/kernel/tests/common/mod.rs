#![allow(clippy::unwrap_used, clippy::expect_used)]
//! Common test utilities for integration tests.
//!
//! Tests drive the REAL kernel router and state, backed by the in-memory
//! content store so no database is needed.

#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, header};
use axum::response::Response;
use http_body_util::BodyExt;
use tower::ServiceExt;

use coursegrid_kernel::listing::CriteriaHookRegistry;
use coursegrid_kernel::security::LISTING_ACTION;
use coursegrid_kernel::store::MemoryContentStore;
use coursegrid_kernel::{AppState, Config, app};
use coursegrid_sdk::NONCE_HEADER;
use coursegrid_test_utils::{TestCourse, seed};

/// Admin token used by privileged requests.
pub const ADMIN_TOKEN: &str = "test-admin-token";

/// Test application wrapper using the real routes and state.
pub struct TestApp {
    router: Router,
    pub state: AppState,
}

impl TestApp {
    /// App over the given courses with production settings.
    pub fn new(courses: &[TestCourse]) -> Self {
        Self::with_config(courses, test_config())
    }

    /// App over the given courses with custom configuration.
    pub fn with_config(courses: &[TestCourse], config: Config) -> Self {
        Self::with_hooks(courses, config, CriteriaHookRegistry::new())
    }

    /// App with criteria hooks registered.
    pub fn with_hooks(courses: &[TestCourse], config: Config, hooks: CriteriaHookRegistry) -> Self {
        let store = MemoryContentStore::from_value(seed(courses)).expect("valid seed");
        let state = AppState::with_store(config, Arc::new(store), hooks).expect("state");
        Self {
            router: app(state.clone()),
            state,
        }
    }

    /// A currently valid listing nonce.
    pub fn nonce(&self) -> String {
        self.state.nonces().issue(LISTING_ACTION)
    }

    /// Send a request through the router.
    pub async fn request(&self, request: Request<Body>) -> Response {
        self.router
            .clone()
            .oneshot(request)
            .await
            .expect("Failed to send request")
    }

    /// GET a listing URI with a valid nonce.
    pub async fn list(&self, uri: &str) -> Response {
        let request = Request::get(uri)
            .header(NONCE_HEADER, self.nonce())
            .body(Body::empty())
            .unwrap();
        self.request(request).await
    }

    /// GET a listing URI with a valid nonce and the admin bearer token.
    pub async fn list_as_admin(&self, uri: &str) -> Response {
        let request = Request::get(uri)
            .header(NONCE_HEADER, self.nonce())
            .header(header::AUTHORIZATION, format!("Bearer {ADMIN_TOKEN}"))
            .body(Body::empty())
            .unwrap();
        self.request(request).await
    }

    /// GET without any extra headers.
    pub async fn get(&self, uri: &str) -> Response {
        self.request(Request::get(uri).body(Body::empty()).unwrap())
            .await
    }
}

/// Production-like configuration with a fixed nonce secret.
pub fn test_config() -> Config {
    Config {
        site_url: "https://learn.example".to_string(),
        nonce_secret: Some("integration-secret".to_string()),
        admin_token: Some(ADMIN_TOKEN.to_string()),
        ..Config::default()
    }
}

/// Read a response body as a string.
pub async fn body_string(response: Response) -> String {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("Failed to read body")
        .to_bytes();
    String::from_utf8(bytes.to_vec()).expect("utf-8 body")
}

/// Read a response body as JSON.
pub async fn body_json(response: Response) -> serde_json::Value {
    serde_json::from_str(&body_string(response).await).expect("JSON body")
}
