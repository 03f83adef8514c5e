use crate::core::url_builder::DirectionsUrl;
use crate::core::{decoder, flattener};
use crate::core::{ConfigProvider, Coordinate, Fetcher, FlattenedPath, RouteRequest};
use crate::utils::error::{Result, RouteError};

/// URL building, fetch, decode and flatten behind one call.
pub struct RouteService<F: Fetcher, C: ConfigProvider> {
    fetcher: F,
    config: C,
    urls: DirectionsUrl,
}

impl<F: Fetcher, C: ConfigProvider> RouteService<F, C> {
    pub fn new(fetcher: F, config: C) -> Self {
        let urls = DirectionsUrl::new(config.base_url(), config.key_separator());
        Self {
            fetcher,
            config,
            urls,
        }
    }

    #[tracing::instrument(skip(self))]
    pub async fn fetch_route(
        &self,
        origin: Coordinate,
        destination: Coordinate,
    ) -> Result<FlattenedPath> {
        let url = self
            .urls
            .build(&RouteRequest::new(origin, destination), self.config.api_key());

        let body = self.fetcher.fetch(&url).await?;
        if body.trim().is_empty() {
            return Err(RouteError::EmptyBody);
        }

        let route = decoder::decode(&body)?;
        tracing::debug!(
            "Decoded {} legs, {} steps",
            route.legs.len(),
            route.legs.iter().map(|leg| leg.steps.len()).sum::<usize>()
        );

        let path = flattener::flatten_with(route, self.config.leg_policy());
        tracing::debug!(
            "Flattened route into {} points ({:?})",
            path.points.len(),
            path.distance_label
        );
        Ok(path)
    }

    /// Like [`fetch_route`](Self::fetch_route) but every failure becomes `None`.
    pub async fn get_route(
        &self,
        origin: Coordinate,
        destination: Coordinate,
    ) -> Option<FlattenedPath> {
        match self.fetch_route(origin, destination).await {
            Ok(path) => Some(path),
            Err(e) => {
                tracing::warn!("No route from {} to {}: {}", origin, destination, e);
                None
            }
        }
    }
}
