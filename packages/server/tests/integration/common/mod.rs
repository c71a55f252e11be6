use std::net::SocketAddr;
use std::sync::Arc;

use ::common::StorageConfig;
use ::common::storage::memory::MemoryObjectStore;
use reqwest::Client;
use serde_json::Value;

use menu_server::config::{
    AppConfig, AuthConfig, CorsConfig, DatabaseConfig, MenuConfig, ServerConfig,
};
use menu_server::repository::InMemoryMenuRepository;
use menu_server::state::AppState;
use menu_server::utils::jwt;

pub const JWT_SECRET: &str = "test-secret-for-integration-tests";
pub const IMAGE_BASE_URL: &str = "https://test-bucket.s3.amazonaws.com";

pub mod routes {
    pub const MENUS: &str = "/menus";
    pub const IMAGES: &str = "/images";
    pub const PRESIGN: &str = "/images/presigned-url";
    pub const OPENAPI: &str = "/api-docs/openapi.json";

    pub fn menu(id: &str) -> String {
        format!("/menus/{id}")
    }

    pub fn items(menu_id: &str) -> String {
        format!("/menus/{menu_id}/items")
    }

    pub fn item(menu_id: &str, item_id: &str) -> String {
        format!("/menus/{menu_id}/items/{item_id}")
    }

    pub fn categories(menu_id: &str) -> String {
        format!("/menus/{menu_id}/categories")
    }

    pub fn category(menu_id: &str, name: &str) -> String {
        format!("/menus/{menu_id}/categories/{name}")
    }

    pub fn category_order(menu_id: &str) -> String {
        format!("/menus/{menu_id}/category-order")
    }

    pub fn public_menu(id: &str) -> String {
        format!("/public/menus/{id}")
    }

    pub fn image(key: &str) -> String {
        format!("/images/{key}")
    }
}

/// A running test server backed by in-memory storage.
pub struct TestApp {
    pub addr: SocketAddr,
    pub client: Client,
    /// Objects "uploaded" by tests appear here.
    pub store: Arc<MemoryObjectStore>,
}

/// Parsed HTTP response for test assertions.
pub struct TestResponse {
    pub status: u16,
    /// Raw response body as text.
    pub text: String,
    /// Parsed JSON body, or `Null` if the response is not valid JSON.
    pub body: Value,
}

impl TestResponse {
    async fn from_response(res: reqwest::Response) -> Self {
        let status = res.status().as_u16();
        let text = res.text().await.expect("Failed to read response body");
        let body = serde_json::from_str(&text).unwrap_or(Value::Null);
        Self { status, text, body }
    }
}

fn test_config(hide_unavailable: bool) -> AppConfig {
    AppConfig {
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
            cors: CorsConfig {
                allow_origins: vec!["*".to_string()],
                max_age: 3600,
            },
        },
        database: DatabaseConfig {
            url: "postgres://unused".to_string(),
        },
        auth: AuthConfig {
            jwt_secret: JWT_SECRET.to_string(),
        },
        storage: StorageConfig {
            public_base_url: Some(IMAGE_BASE_URL.to_string()),
            ..StorageConfig::for_bucket("test-bucket")
        },
        menus: MenuConfig {
            public_hide_unavailable: hide_unavailable,
        },
    }
}

impl TestApp {
    pub async fn spawn() -> Self {
        Self::spawn_with(false).await
    }

    /// Spawn with `menus.public_hide_unavailable` set.
    pub async fn spawn_hiding_unavailable() -> Self {
        Self::spawn_with(true).await
    }

    async fn spawn_with(hide_unavailable: bool) -> Self {
        let store = Arc::new(MemoryObjectStore::new(IMAGE_BASE_URL));
        let state = AppState::new(
            test_config(hide_unavailable),
            Arc::new(InMemoryMenuRepository::new()),
            store.clone(),
        );
        let app = menu_server::build_router(state);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind to random port");
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            addr,
            client: Client::new(),
            store,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    /// Mint a token for `customer_id`, as the identity provider would.
    pub fn token_for(&self, customer_id: &str) -> String {
        jwt::sign(customer_id, JWT_SECRET, chrono::Duration::hours(1))
            .expect("Failed to sign test token")
    }

    pub async fn post_with_token(&self, path: &str, body: &Value, token: &str) -> TestResponse {
        let res = self
            .client
            .post(self.url(path))
            .header("Authorization", format!("Bearer {token}"))
            .json(body)
            .send()
            .await
            .expect("Failed to send POST request");

        TestResponse::from_response(res).await
    }

    pub async fn post_without_token(&self, path: &str, body: &Value) -> TestResponse {
        let res = self
            .client
            .post(self.url(path))
            .json(body)
            .send()
            .await
            .expect("Failed to send POST request");

        TestResponse::from_response(res).await
    }

    /// POST a raw, possibly malformed JSON body.
    pub async fn post_raw_with_token(&self, path: &str, body: &str, token: &str) -> TestResponse {
        let res = self
            .client
            .post(self.url(path))
            .header("Authorization", format!("Bearer {token}"))
            .header("Content-Type", "application/json")
            .body(body.to_string())
            .send()
            .await
            .expect("Failed to send POST request");

        TestResponse::from_response(res).await
    }

    pub async fn get_with_token(&self, path: &str, token: &str) -> TestResponse {
        let res = self
            .client
            .get(self.url(path))
            .header("Authorization", format!("Bearer {token}"))
            .send()
            .await
            .expect("Failed to send GET request");

        TestResponse::from_response(res).await
    }

    pub async fn get_without_token(&self, path: &str) -> TestResponse {
        let res = self
            .client
            .get(self.url(path))
            .send()
            .await
            .expect("Failed to send GET request");

        TestResponse::from_response(res).await
    }

    pub async fn put_with_token(&self, path: &str, body: &Value, token: &str) -> TestResponse {
        let res = self
            .client
            .put(self.url(path))
            .header("Authorization", format!("Bearer {token}"))
            .json(body)
            .send()
            .await
            .expect("Failed to send PUT request");

        TestResponse::from_response(res).await
    }

    pub async fn delete_with_token(&self, path: &str, token: &str) -> TestResponse {
        let res = self
            .client
            .delete(self.url(path))
            .header("Authorization", format!("Bearer {token}"))
            .send()
            .await
            .expect("Failed to send DELETE request");

        TestResponse::from_response(res).await
    }

    /// Create a menu and return its ID.
    pub async fn create_menu(&self, token: &str, display_name: &str) -> String {
        let res = self
            .post_with_token(
                routes::MENUS,
                &serde_json::json!({ "displayName": display_name }),
                token,
            )
            .await;
        assert_eq!(res.status, 201, "Create menu failed: {}", res.text);
        res.body["id"].as_str().unwrap().to_string()
    }

    /// Add an item and return the new item's ID.
    pub async fn add_item(&self, token: &str, menu_id: &str, name: &str, category: &str) -> String {
        let res = self
            .post_with_token(
                &routes::items(menu_id),
                &serde_json::json!({
                    "name": name,
                    "price": "9.99",
                    "category": category,
                }),
                token,
            )
            .await;
        assert_eq!(res.status, 201, "Add item failed: {}", res.text);
        res.body["items"]
            .as_array()
            .unwrap()
            .iter()
            .find(|item| item["name"] == name)
            .and_then(|item| item["id"].as_str())
            .unwrap()
            .to_string()
    }
}
