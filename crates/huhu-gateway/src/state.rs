use std::sync::Arc;
use std::time::Duration;

use huhu_core::Repository;

pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Clone)]
pub struct AppState {
    repository: Arc<dyn Repository>,
    admin_api_key: Arc<str>,
    request_timeout: Duration,
}

impl AppState {
    pub fn new(repository: Arc<dyn Repository>, admin_api_key: impl Into<Arc<str>>) -> Self {
        Self {
            repository,
            admin_api_key: admin_api_key.into(),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }

    /// Bounds how long a single request may run before it is answered with `408`.
    pub fn with_request_timeout(mut self, request_timeout: Duration) -> Self {
        self.request_timeout = request_timeout;
        self
    }

    pub fn repository(&self) -> &dyn Repository {
        self.repository.as_ref()
    }

    pub fn admin_api_key(&self) -> &str {
        &self.admin_api_key
    }

    pub fn request_timeout(&self) -> Duration {
        self.request_timeout
    }
}
