//! Shared helpers for the HTTP integration tests
#![allow(dead_code)]

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Method, Request, StatusCode, header},
};
use garden_api::{AppState, create_router};
use garden_auth::{Identity, JwtConfig, JwtService, SecretHasher};
use garden_common::config::Environment;
use garden_common::models::{Role, User};
use garden_common::store::{MemoryStore, UserStore};
use serde_json::{Value, json};
use tower::ServiceExt;

pub const TEST_SECRET: &str = "test-secret";
pub const PASSWORD: &str = "hunter22";

pub struct TestApp {
    pub router: Router,
    pub state: AppState,
    pub store: MemoryStore,
}

pub fn cheap_hasher() -> SecretHasher {
    SecretHasher::with_params(8, 1, 1).unwrap()
}

pub fn jwt_service() -> JwtService {
    JwtService::new(JwtConfig::new(TEST_SECRET, 3600))
}

pub fn test_app() -> TestApp {
    let store = MemoryStore::new();
    let state = AppState::in_memory(
        store.clone(),
        jwt_service(),
        cheap_hasher(),
        Environment::Development,
    );

    TestApp {
        router: create_router(state.clone()),
        state,
        store,
    }
}

impl TestApp {
    /// Send a request and return the status with the decoded body
    ///
    /// Non-JSON bodies come back as a JSON string, empty bodies as null.
    pub async fn send(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }

        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        self.send_raw(request).await
    }

    pub async fn send_raw(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();

        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes)
                .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
        };

        (status, body)
    }

    pub async fn get(&self, uri: &str, token: &str) -> (StatusCode, Value) {
        self.send(Method::GET, uri, Some(token), None).await
    }

    pub async fn post(&self, uri: &str, token: Option<&str>, body: Value) -> (StatusCode, Value) {
        self.send(Method::POST, uri, token, Some(body)).await
    }

    pub async fn put(&self, uri: &str, token: &str, body: Value) -> (StatusCode, Value) {
        self.send(Method::PUT, uri, Some(token), Some(body)).await
    }

    pub async fn delete(&self, uri: &str, token: &str) -> (StatusCode, Value) {
        self.send(Method::DELETE, uri, Some(token), None).await
    }

    /// Register through the API and return the issued token
    pub async fn register(&self, username: &str) -> String {
        let (status, body) = self
            .post(
                "/api/auth/register",
                None,
                json!({
                    "username": username,
                    "email": format!("{}@example.com", username),
                    "password": PASSWORD
                }),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "register failed: {}", body);
        body["token"].as_str().unwrap().to_string()
    }

    /// Id of the user behind a token
    pub async fn user_id(&self, token: &str) -> String {
        let (status, body) = self.get("/api/auth/me", token).await;
        assert_eq!(status, StatusCode::OK);
        body["id"].as_str().unwrap().to_string()
    }

    /// Insert an admin directly into the store, the way operators provision one
    pub async fn seed_admin(&self, username: &str) -> String {
        let hash = self.state.hasher.hash(PASSWORD).unwrap();
        let mut admin = User::new(
            username.to_string(),
            format!("{}@example.com", username),
            hash,
        );
        admin.role = Role::Admin;
        UserStore::save(&self.store, &admin).await.unwrap();

        self.state
            .jwt_service
            .generate_token(&Identity::new(admin.id, admin.role))
            .unwrap()
    }

    /// Create a plant and return its JSON record
    pub async fn create_plant(&self, token: &str, name: &str) -> Value {
        let (status, body) = self
            .post(
                "/api/plants",
                Some(token),
                json!({
                    "name": name,
                    "species": "Ficus lyrata",
                    "imageUrl": "https://images.example.com/plant.png"
                }),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "create plant failed: {}", body);
        body
    }
}
