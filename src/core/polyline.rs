//! Compact polyline codec (the provider's 1e-5 delta encoding).
//!
//! The `polyline` crate works in `x = longitude, y = latitude` order; this
//! module is the only place that swaps axes.

use crate::core::Coordinate;
use geo_types::Coord;

pub const PRECISION: u32 = 5;

pub fn decode(encoded: &str) -> std::result::Result<Vec<Coordinate>, String> {
    let line = ::polyline::decode_polyline(encoded, PRECISION).map_err(|e| e.to_string())?;
    Ok(line
        .0
        .into_iter()
        .map(|c| Coordinate::new(c.y, c.x))
        .collect())
}

pub fn encode(points: &[Coordinate]) -> std::result::Result<String, String> {
    ::polyline::encode_coordinates(
        points.iter().map(|p| Coord {
            x: p.longitude,
            y: p.latitude,
        }),
        PRECISION,
    )
    .map_err(|e| e.to_string())
}
