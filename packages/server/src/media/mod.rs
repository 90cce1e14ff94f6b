//! Hosted image storage.

mod cloudinary;

use async_trait::async_trait;

pub use cloudinary::CloudinaryClient;

/// A file received from a client, ready to be pushed to the image host.
#[derive(Debug, Clone)]
pub struct FileUpload {
    pub filename: String,
    pub content_type: String,
    pub data: Vec<u8>,
}

/// An asset stored on the image host.
#[derive(Debug, Clone, PartialEq)]
pub struct HostedAsset {
    pub url: String,
    pub public_id: String,
    pub width: u32,
    pub height: u32,
    pub format: String,
    pub bytes: u64,
}

#[derive(Debug, Clone, PartialEq)]
pub enum UploadOutcome {
    Uploaded(HostedAsset),
    Failed { error: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeleteOutcome {
    pub success: bool,
}

/// Delivery parameters for [`ImageHost::optimized_url`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlOptions {
    pub width: u32,
    pub height: u32,
    pub quality: String,
    pub format: String,
}

impl Default for UrlOptions {
    fn default() -> Self {
        Self {
            width: 800,
            height: 400,
            quality: "auto".into(),
            format: "auto".into(),
        }
    }
}

/// Image hosting service.
///
/// Transport and API failures are reported through the outcome values and
/// never as errors.
#[async_trait]
pub trait ImageHost: Send + Sync {
    async fn upload(&self, file: FileUpload, folder: &str) -> UploadOutcome;

    async fn destroy(&self, public_id: &str) -> DeleteOutcome;

    fn optimized_url(&self, public_id: &str, options: &UrlOptions) -> String;
}
