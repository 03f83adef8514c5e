use crate::domain::model::{FlattenedPath, KeySeparator, LegPolicy};
use crate::utils::error::{FetchError, RouteError};
use async_trait::async_trait;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://maps.googleapis.com/maps/api/directions";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

pub trait ConfigProvider: Send + Sync {
    fn api_key(&self) -> &str;

    fn base_url(&self) -> &str {
        DEFAULT_BASE_URL
    }

    fn timeout(&self) -> Duration {
        DEFAULT_TIMEOUT
    }

    fn key_separator(&self) -> KeySeparator {
        KeySeparator::default()
    }

    fn leg_policy(&self) -> LegPolicy {
        LegPolicy::default()
    }
}

/// Retrieves a response body for a fully built request URL.
#[async_trait]
pub trait Fetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> std::result::Result<String, FetchError>;
}

/// The rendering side of the handoff. Only ever called from the consumer task.
pub trait MapSurface {
    fn draw_route(&mut self, path: &FlattenedPath);

    fn set_distance_label(&mut self, label: &str);

    /// Called when a request produced no route; the previous drawing stays.
    fn route_unavailable(&mut self, _error: &RouteError) {}
}
