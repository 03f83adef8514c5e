pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::{cli::ConsoleSurface, CliConfig};

pub use config::toml_config::TomlConfig;
pub use crate::core::{
    dispatcher::{render_updates, RouteDispatcher, RouteUpdate, RouteUpdates},
    route_service::RouteService,
    transport::HttpFetcher,
    url_builder::build_directions_url,
    Coordinate, FlattenedPath,
};
pub use utils::error::{DecodeError, FetchError, Result, RouteError};
