use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use reqwest::Client;
use reqwest::redirect::Policy;
use serde_json::{Value, json};

use contentcraft_server::config::{
    AppConfig, AuthConfig, CorsConfig, DatabaseConfig, MediaConfig, ServerConfig,
};
use contentcraft_server::media::{
    DeleteOutcome, FileUpload, HostedAsset, ImageHost, UploadOutcome, UrlOptions,
};
use contentcraft_server::state::AppState;
use contentcraft_server::store::MemoryStore;


pub const SESSION_COOKIE: &str = "contentcraft_session";
pub const MAX_UPLOAD_BYTES: usize = 1024;

pub mod routes {
    pub const REGISTER: &str = "/api/v1/auth/register";
    pub const LOGIN: &str = "/api/v1/auth/login";
    pub const LOGOUT: &str = "/api/v1/auth/logout";
    pub const ME: &str = "/api/v1/auth/me";
    pub const BLOGS: &str = "/api/v1/blogs";
    pub const BLOG_SEARCH: &str = "/api/v1/blogs/search";
    pub const MEDIA: &str = "/api/v1/media";
    pub const USAGE: &str = "/api/v1/usage";
    pub const USAGE_STATS: &str = "/api/v1/usage/stats";
    pub const HEALTH: &str = "/api/v1/health";
    pub const DIAGNOSTICS: &str = "/api/v1/diagnostics";

    pub fn blog(id: &str) -> String {
        format!("/api/v1/blogs/{id}")
    }

    pub fn blog_publish(id: &str) -> String {
        format!("/api/v1/blogs/{id}/publish")
    }

    pub fn blog_export(id: &str) -> String {
        format!("/api/v1/blogs/{id}/export")
    }

    pub fn media_item(id: &str) -> String {
        format!("/api/v1/media/{id}")
    }

    pub fn validate(schema: &str) -> String {
        format!("/api/v1/validate/{schema}")
    }
}

/// Image host double that accepts every upload unless told otherwise.
#[derive(Default)]
pub struct StubImageHost {
    pub reject_uploads: bool,
    pub destroyed: Mutex<Vec<String>>,
}

#[async_trait]
impl ImageHost for StubImageHost {
    async fn upload(&self, file: FileUpload, folder: &str) -> UploadOutcome {
        if self.reject_uploads {
            return UploadOutcome::Failed {
                error: "Invalid image file".into(),
            };
        }
        let public_id = format!("{folder}/{}", file.filename);
        UploadOutcome::Uploaded(HostedAsset {
            url: format!("https://res.example.com/{public_id}"),
            public_id,
            width: 1200,
            height: 630,
            format: "png".into(),
            bytes: file.data.len() as u64,
        })
    }

    async fn destroy(&self, public_id: &str) -> DeleteOutcome {
        self.destroyed.lock().unwrap().push(public_id.to_string());
        DeleteOutcome { success: true }
    }

    fn optimized_url(&self, public_id: &str, options: &UrlOptions) -> String {
        format!(
            "https://res.example.com/w_{},h_{}/{public_id}",
            options.width, options.height
        )
    }
}

pub fn test_config() -> AppConfig {
    AppConfig {
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
            cors: CorsConfig {
                allow_origins: vec![],
                max_age: 3600,
            },
        },
        database: DatabaseConfig {
            url: "postgres://unused".to_string(),
        },
        auth: AuthConfig {
            jwt_secret: "test-secret-for-integration-tests".to_string(),
            token_ttl_days: 7,
            session_cookie: SESSION_COOKIE.to_string(),
        },
        media: MediaConfig {
            cloud_name: "demo".to_string(),
            api_key: "key".to_string(),
            api_secret: "secret".to_string(),
            folder: "contentcraft".to_string(),
            api_base: "https://api.cloudinary.com/v1_1".to_string(),
            delivery_base: "https://res.cloudinary.com".to_string(),
            max_upload_bytes: MAX_UPLOAD_BYTES,
        },
    }
}

/// A running test server.
pub struct TestApp {
    pub addr: SocketAddr,
    pub client: Client,
    pub store: Arc<MemoryStore>,
    pub images: Arc<StubImageHost>,
}

/// Parsed HTTP response for test assertions.
pub struct TestResponse {
    pub status: u16,
    /// `Location` header of redirects.
    pub location: Option<String>,
    /// `Set-Cookie` headers, verbatim.
    pub cookies: Vec<String>,
    /// Raw response body as text.
    pub text: String,
    /// Parsed JSON body, or `Null` if the response is not valid JSON.
    pub body: Value,
}

impl TestApp {
    pub async fn spawn() -> Self {
        Self::spawn_with(StubImageHost::default()).await
    }

    pub async fn spawn_with(images: StubImageHost) -> Self {
        let store = Arc::new(MemoryStore::new());
        let images = Arc::new(images);

        let state = AppState {
            store: store.clone(),
            images: images.clone(),
            config: Arc::new(test_config()),
        };

        let app = contentcraft_server::build_router(state);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind to random port");
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        let client = Client::builder()
            .redirect(Policy::none())
            .build()
            .expect("Failed to build HTTP client");

        Self {
            addr,
            client,
            store,
            images,
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
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

    pub async fn post_with_cookie(&self, path: &str, body: &Value, token: &str) -> TestResponse {
        let res = self
            .client
            .post(self.url(path))
            .header("Cookie", format!("{SESSION_COOKIE}={token}"))
            .json(body)
            .send()
            .await
            .expect("Failed to send POST request");

        TestResponse::from_response(res).await
    }

    pub async fn post_raw(&self, path: &str, body: &str) -> TestResponse {
        let res = self
            .client
            .post(self.url(path))
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

    pub async fn get_with_cookie(&self, path: &str, token: &str) -> TestResponse {
        let res = self
            .client
            .get(self.url(path))
            .header("Cookie", format!("{SESSION_COOKIE}={token}"))
            .send()
            .await
            .expect("Failed to send GET request");

        TestResponse::from_response(res).await
    }

    pub async fn patch_with_token(&self, path: &str, body: &Value, token: &str) -> TestResponse {
        let res = self
            .client
            .patch(self.url(path))
            .header("Authorization", format!("Bearer {token}"))
            .json(body)
            .send()
            .await
            .expect("Failed to send PATCH request");

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

    /// Post a multipart upload form with a file part plus text `fields`.
    pub async fn upload_with_token(
        &self,
        file_name: &str,
        file_bytes: Vec<u8>,
        fields: &[(&str, &str)],
        token: &str,
    ) -> TestResponse {
        let part = reqwest::multipart::Part::bytes(file_bytes)
            .file_name(file_name.to_string())
            .mime_str("image/png")
            .expect("Failed to set MIME type");
        let mut form = reqwest::multipart::Form::new().part("file", part);
        for (name, value) in fields {
            form = form.text(name.to_string(), value.to_string());
        }

        let res = self
            .client
            .post(self.url(routes::MEDIA))
            .header("Authorization", format!("Bearer {token}"))
            .multipart(form)
            .send()
            .await
            .expect("Failed to send multipart upload request");

        TestResponse::from_response(res).await
    }

    /// Register a user and log in, returning the auth token.
    pub async fn create_authenticated_user(&self, email: &str, password: &str) -> String {
        let reg = self
            .post_without_token(
                routes::REGISTER,
                &json!({"name": "Test User", "email": email, "password": password}),
            )
            .await;
        assert_eq!(reg.status, 201, "Registration failed: {}", reg.text);

        let res = self
            .post_without_token(
                routes::LOGIN,
                &json!({"email": email, "password": password}),
            )
            .await;
        assert_eq!(res.status, 200, "Login failed: {}", res.text);

        res.body["data"]["token"]
            .as_str()
            .expect("Login response should contain a token")
            .to_string()
    }

    /// Create a blog via the API and return its `id`.
    pub async fn create_blog(&self, token: &str, title: &str) -> String {
        let res = self
            .post_with_token(
                routes::BLOGS,
                &json!({
                    "title": title,
                    "topic": "A topic long enough to pass validation",
                    "tone": "professional",
                    "style": "informative",
                    "length": "medium",
                }),
                token,
            )
            .await;
        assert_eq!(res.status, 201, "create_blog failed: {}", res.text);
        res.id()
    }
}

impl TestResponse {
    pub async fn from_response(res: reqwest::Response) -> Self {
        let status = res.status().as_u16();
        let location = res
            .headers()
            .get("location")
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned);
        let cookies = res
            .headers()
            .get_all("set-cookie")
            .iter()
            .filter_map(|v| v.to_str().ok())
            .map(str::to_owned)
            .collect();
        let text = res.text().await.unwrap_or_default();
        let body = serde_json::from_str(&text).unwrap_or(Value::Null);
        Self {
            status,
            location,
            cookies,
            text,
            body,
        }
    }

    pub fn id(&self) -> String {
        self.body["data"]["id"]
            .as_str()
            .expect("response body should contain 'data.id'")
            .to_string()
    }
}
