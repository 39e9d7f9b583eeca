use anyhow::Result;
use async_trait::async_trait;
use autodose_backend::config::AppConfig;
use autodose_backend::entities::{photos, user_roles, videos};
use autodose_backend::infrastructure::database;
use autodose_backend::services::content::ContentService;
use autodose_backend::services::engagement::EngagementService;
use autodose_backend::services::profile::ProfileService;
use autodose_backend::services::storage::ObjectStorage;
use autodose_backend::{create_app, AppState};
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use sea_orm::ActiveValue::Set;
use sea_orm::{ActiveModelTrait, Database, DatabaseConnection};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use tower::ServiceExt;

/// In-memory stand-in for the object store. Keys are (bucket, key).
pub struct MockStorage {
    pub objects: Mutex<HashMap<(String, String), Vec<u8>>>,
    pub fail_removes: AtomicBool,
}

impl MockStorage {
    pub fn new() -> Self {
        Self {
            objects: Mutex::new(HashMap::new()),
            fail_removes: AtomicBool::new(false),
        }
    }

    pub fn object_count(&self) -> usize {
        self.objects.lock().unwrap().len()
    }

    pub fn has_object(&self, bucket: &str, key: &str) -> bool {
        self.objects
            .lock()
            .unwrap()
            .contains_key(&(bucket.to_string(), key.to_string()))
    }
}

#[async_trait]
impl ObjectStorage for MockStorage {
    async fn upload(&self, bucket: &str, key: &str, data: Vec<u8>) -> Result<()> {
        self.objects
            .lock()
            .unwrap()
            .insert((bucket.to_string(), key.to_string()), data);
        Ok(())
    }

    async fn remove(&self, bucket: &str, key: &str) -> Result<()> {
        if self.fail_removes.load(Ordering::SeqCst) {
            return Err(anyhow::anyhow!("simulated blob delete failure"));
        }
        self.objects
            .lock()
            .unwrap()
            .remove(&(bucket.to_string(), key.to_string()));
        Ok(())
    }

    async fn exists(&self, bucket: &str, key: &str) -> Result<bool> {
        Ok(self.has_object(bucket, key))
    }

    fn public_url(&self, bucket: &str, key: &str) -> String {
        format!("http://storage.test/{}/{}", bucket, key)
    }
}

pub struct TestApp {
    pub app: Router,
    pub db: DatabaseConnection,
    pub storage: Arc<MockStorage>,
}

pub async fn spawn_app() -> TestApp {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    database::run_migrations(&db).await.unwrap();

    let storage = Arc::new(MockStorage::new());
    let config = AppConfig::default();

    let content = Arc::new(ContentService::new(
        db.clone(),
        storage.clone(),
        config.clone(),
    ));
    let engagement = Arc::new(EngagementService::new(db.clone()));
    let profiles = Arc::new(ProfileService::new(db.clone()));

    let state = AppState {
        db: db.clone(),
        storage: storage.clone(),
        content,
        engagement,
        profiles,
        config,
    };

    TestApp {
        app: create_app(state),
        db,
        storage,
    }
}

pub async fn body_json(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

pub async fn post_json(app: &Router, uri: &str, token: Option<&str>, body: Value) -> axum::response::Response {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json");
    if let Some(token) = token {
        builder = builder.header("Authorization", format!("Bearer {}", token));
    }
    let request = builder.body(Body::from(body.to_string())).unwrap();
    app.clone().oneshot(request).await.unwrap()
}

pub async fn put_json(app: &Router, uri: &str, token: Option<&str>, body: Value) -> axum::response::Response {
    let mut builder = Request::builder()
        .method("PUT")
        .uri(uri)
        .header("content-type", "application/json");
    if let Some(token) = token {
        builder = builder.header("Authorization", format!("Bearer {}", token));
    }
    let request = builder.body(Body::from(body.to_string())).unwrap();
    app.clone().oneshot(request).await.unwrap()
}

pub async fn get(app: &Router, uri: &str, token: Option<&str>) -> axum::response::Response {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(token) = token {
        builder = builder.header("Authorization", format!("Bearer {}", token));
    }
    let request = builder.body(Body::empty()).unwrap();
    app.clone().oneshot(request).await.unwrap()
}

pub async fn delete(app: &Router, uri: &str, token: Option<&str>) -> axum::response::Response {
    let mut builder = Request::builder().method("DELETE").uri(uri);
    if let Some(token) = token {
        builder = builder.header("Authorization", format!("Bearer {}", token));
    }
    let request = builder.body(Body::empty()).unwrap();
    app.clone().oneshot(request).await.unwrap()
}

/// Registers an account, logs in and resolves the user id via the session
/// endpoint. Returns (user_id, token).
pub async fn register_and_login(app: &Router, email: &str) -> (String, String) {
    let response = post_json(
        app,
        "/auth/register",
        None,
        serde_json::json!({ "email": email, "password": "hunter2hunter2" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = post_json(
        app,
        "/auth/login",
        None,
        serde_json::json!({ "email": email, "password": "hunter2hunter2" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let token = body_json(response).await["token"].as_str().unwrap().to_string();

    let response = get(app, "/auth/session", Some(&token)).await;
    assert_eq!(response.status(), StatusCode::OK);
    let user_id = body_json(response).await["user_id"]
        .as_str()
        .unwrap()
        .to_string();

    (user_id, token)
}

pub async fn grant_admin(db: &DatabaseConnection, user_id: &str) {
    let role = user_roles::ActiveModel {
        id: Set(uuid::Uuid::new_v4().to_string()),
        user_id: Set(user_id.to_string()),
        role: Set("admin".to_string()),
    };
    role.insert(db).await.unwrap();
}

/// Inserts a photo row directly, for tests that only need something to
/// attach comments to.
pub async fn seed_photo(db: &DatabaseConnection, id: &str, user_id: &str) {
    let photo = photos::ActiveModel {
        id: Set(id.to_string()),
        user_id: Set(user_id.to_string()),
        title: Set("seeded".to_string()),
        category: Set("General".to_string()),
        file_path: Set(format!("{}/seed.jpg", user_id)),
        storage_url: Set(format!("http://storage.test/photos/{}/seed.jpg", user_id)),
        created_at: Set(chrono::Utc::now()),
    };
    photo.insert(db).await.unwrap();
}

pub async fn seed_video(db: &DatabaseConnection, id: &str, user_id: &str) {
    let video = videos::ActiveModel {
        id: Set(id.to_string()),
        user_id: Set(user_id.to_string()),
        title: Set("seeded".to_string()),
        category: Set("General".to_string()),
        file_path: Set(format!("{}/seed.mp4", user_id)),
        storage_url: Set(format!("http://storage.test/videos/{}/seed.mp4", user_id)),
        thumbnail_url: Set(None),
        created_at: Set(chrono::Utc::now()),
    };
    video.insert(db).await.unwrap();
}

const BOUNDARY: &str = "test-boundary-7MA4YWxkTrZu0gW";

pub struct MultipartBuilder {
    body: Vec<u8>,
}

impl MultipartBuilder {
    pub fn new() -> Self {
        Self { body: Vec::new() }
    }

    pub fn text(mut self, name: &str, value: &str) -> Self {
        self.body.extend_from_slice(
            format!(
                "--{}\r\nContent-Disposition: form-data; name=\"{}\"\r\n\r\n{}\r\n",
                BOUNDARY, name, value
            )
            .as_bytes(),
        );
        self
    }

    pub fn file(mut self, name: &str, filename: &str, data: &[u8]) -> Self {
        self.body.extend_from_slice(
            format!(
                "--{}\r\nContent-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\nContent-Type: application/octet-stream\r\n\r\n",
                BOUNDARY, name, filename
            )
            .as_bytes(),
        );
        self.body.extend_from_slice(data);
        self.body.extend_from_slice(b"\r\n");
        self
    }

    pub fn build(mut self) -> (Vec<u8>, String) {
        self.body
            .extend_from_slice(format!("--{}--\r\n", BOUNDARY).as_bytes());
        (
            self.body,
            format!("multipart/form-data; boundary={}", BOUNDARY),
        )
    }
}

pub async fn post_multipart(
    app: &Router,
    uri: &str,
    token: &str,
    builder: MultipartBuilder,
) -> axum::response::Response {
    let (body, content_type) = builder.build();
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", content_type)
        .header("Authorization", format!("Bearer {}", token))
        .body(Body::from(body))
        .unwrap();
    app.clone().oneshot(request).await.unwrap()
}
