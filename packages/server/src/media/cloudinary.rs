use std::collections::BTreeMap;

use async_trait::async_trait;
use base64::{Engine as _, engine::general_purpose::STANDARD};
use chrono::Utc;
use serde::Deserialize;
use sha2::{Digest, Sha256};
use tracing::{debug, error, warn};

use super::{DeleteOutcome, FileUpload, HostedAsset, ImageHost, UploadOutcome, UrlOptions};
use crate::config::MediaConfig;

/// Eager transformation applied to every upload: automatic quality and
/// format, then a 1200x630 fill crop for hero images.
const UPLOAD_TRANSFORMATION: &str = "q_auto,f_auto/c_fill,h_630,w_1200";

/// [`ImageHost`] backed by the Cloudinary upload API.
pub struct CloudinaryClient {
    client: reqwest::Client,
    cloud_name: String,
    api_key: String,
    api_secret: String,
    api_base: String,
    delivery_base: String,
}

#[derive(Deserialize)]
struct UploadResponse {
    secure_url: String,
    public_id: String,
    #[serde(default)]
    width: u32,
    #[serde(default)]
    height: u32,
    #[serde(default)]
    format: String,
    #[serde(default)]
    bytes: u64,
}

#[derive(Deserialize)]
struct DestroyResponse {
    result: String,
}

#[derive(Deserialize)]
struct ApiErrorResponse {
    error: ApiErrorDetail,
}

#[derive(Deserialize)]
struct ApiErrorDetail {
    message: String,
}

impl CloudinaryClient {
    pub fn new(config: &MediaConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            cloud_name: config.cloud_name.clone(),
            api_key: config.api_key.clone(),
            api_secret: config.api_secret.clone(),
            api_base: config.api_base.trim_end_matches('/').to_string(),
            delivery_base: config.delivery_base.trim_end_matches('/').to_string(),
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}/{}", self.api_base, self.cloud_name, path)
    }

    /// Build the signed form for an API call from its signable parameters.
    fn signed_form(&self, params: BTreeMap<&'static str, String>) -> Vec<(&'static str, String)> {
        let signature = sign_params(&params, &self.api_secret);
        let mut form: Vec<(&'static str, String)> = params.into_iter().collect();
        form.push(("api_key", self.api_key.clone()));
        form.push(("signature_algorithm", "sha256".into()));
        form.push(("signature", signature));
        form
    }

    async fn post_form(
        &self,
        path: &str,
        form: &[(&'static str, String)],
    ) -> Result<reqwest::Response, String> {
        let response = self
            .client
            .post(self.endpoint(path))
            .form(form)
            .send()
            .await
            .map_err(|e| e.to_string())?;

        if response.status().is_success() {
            return Ok(response);
        }

        let status = response.status();
        let message = match response.json::<ApiErrorResponse>().await {
            Ok(body) => body.error.message,
            Err(_) => format!("Image host responded with {status}"),
        };
        Err(message)
    }
}

/// Cloudinary request signature: SHA-256 hex of the sorted `key=value`
/// pairs joined by `&`, followed directly by the API secret.
fn sign_params(params: &BTreeMap<&'static str, String>, secret: &str) -> String {
    let joined = params
        .iter()
        .map(|(k, v)| format!("{k}={v}"))
        .collect::<Vec<_>>()
        .join("&");

    let mut hasher = Sha256::new();
    hasher.update(joined.as_bytes());
    hasher.update(secret.as_bytes());
    hex::encode(hasher.finalize())
}

fn data_uri(file: &FileUpload) -> String {
    format!("data:{};base64,{}", file.content_type, STANDARD.encode(&file.data))
}

#[async_trait]
impl ImageHost for CloudinaryClient {
    async fn upload(&self, file: FileUpload, folder: &str) -> UploadOutcome {
        let params = BTreeMap::from([
            ("folder", folder.to_string()),
            ("timestamp", Utc::now().timestamp().to_string()),
            ("transformation", UPLOAD_TRANSFORMATION.to_string()),
        ]);
        let mut form = self.signed_form(params);
        form.push(("file", data_uri(&file)));

        debug!(filename = %file.filename, size = file.data.len(), "Uploading to image host");

        let response = match self.post_form("auto/upload", &form).await {
            Ok(response) => response,
            Err(error) => {
                error!(filename = %file.filename, "Image upload failed: {}", error);
                return UploadOutcome::Failed { error };
            }
        };

        match response.json::<UploadResponse>().await {
            Ok(body) => UploadOutcome::Uploaded(HostedAsset {
                url: body.secure_url,
                public_id: body.public_id,
                width: body.width,
                height: body.height,
                format: body.format,
                bytes: body.bytes,
            }),
            Err(e) => {
                error!("Unreadable upload response: {}", e);
                UploadOutcome::Failed {
                    error: e.to_string(),
                }
            }
        }
    }

    async fn destroy(&self, public_id: &str) -> DeleteOutcome {
        let params = BTreeMap::from([
            ("public_id", public_id.to_string()),
            ("timestamp", Utc::now().timestamp().to_string()),
        ]);
        let form = self.signed_form(params);

        let response = match self.post_form("image/destroy", &form).await {
            Ok(response) => response,
            Err(error) => {
                error!(public_id, "Image delete failed: {}", error);
                return DeleteOutcome { success: false };
            }
        };

        match response.json::<DestroyResponse>().await {
            Ok(body) if body.result == "ok" => DeleteOutcome { success: true },
            Ok(body) => {
                warn!(public_id, result = %body.result, "Image host did not delete asset");
                DeleteOutcome { success: false }
            }
            Err(e) => {
                error!(public_id, "Unreadable delete response: {}", e);
                DeleteOutcome { success: false }
            }
        }
    }

    fn optimized_url(&self, public_id: &str, options: &UrlOptions) -> String {
        format!(
            "{}/{}/image/upload/c_fill,f_{},h_{},q_{},w_{}/{}",
            self.delivery_base,
            self.cloud_name,
            options.format,
            options.height,
            options.quality,
            options.width,
            public_id
        )
    }
}
