use std::sync::Arc;

use crate::config::AppConfig;
use crate::media::ImageHost;
use crate::store::ContentStore;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn ContentStore>,
    pub images: Arc<dyn ImageHost>,
    pub config: Arc<AppConfig>,
}
