use crate::core::{Coordinate, KeySeparator, RouteRequest};
use crate::domain::ports::DEFAULT_BASE_URL;

const OUTPUT_FORMAT: &str = "json";

/// Builds directions request URLs for one provider endpoint.
#[derive(Debug, Clone)]
pub struct DirectionsUrl {
    base_url: String,
    key_separator: KeySeparator,
}

impl Default for DirectionsUrl {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL, KeySeparator::default())
    }
}

impl DirectionsUrl {
    pub fn new(base_url: &str, key_separator: KeySeparator) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            key_separator,
        }
    }

    pub fn build(&self, request: &RouteRequest, api_key: &str) -> String {
        let key: String = url::form_urlencoded::byte_serialize(api_key.as_bytes()).collect();
        format!(
            "{}/{}?units={}&origin={}&destination={}&sensor=false&mode={}{}key={}",
            self.base_url,
            OUTPUT_FORMAT,
            request.units.as_str(),
            request.origin,
            request.destination,
            request.travel_mode.as_str(),
            self.key_separator.as_str(),
            key,
        )
    }
}

/// URL for a driving route against the default provider endpoint.
pub fn build_directions_url(origin: Coordinate, destination: Coordinate, api_key: &str) -> String {
    DirectionsUrl::default().build(&RouteRequest::new(origin, destination), api_key)
}
