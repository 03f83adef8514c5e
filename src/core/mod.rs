pub mod decoder;
pub mod dispatcher;
pub mod flattener;
pub mod polyline;
pub mod route_service;
pub mod transport;
pub mod url_builder;

pub use crate::domain::model::{
    Coordinate, Distance, FlattenedPath, KeySeparator, Leg, LegPolicy, RawRoute, RouteRequest,
    Step, TravelMode, Units,
};
pub use crate::domain::ports::{ConfigProvider, Fetcher, MapSurface};
pub use crate::utils::error::Result;
