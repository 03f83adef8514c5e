use crate::core::{FlattenedPath, MapSurface};
use crate::utils::error::RouteError;
use std::io::Write;

/// Terminal stand-in for the map: writes each drawn route to a sink.
#[derive(Debug)]
pub struct ConsoleSurface<W: Write> {
    out: W,
    json: bool,
    last_error: Option<String>,
}

impl ConsoleSurface<std::io::Stdout> {
    pub fn stdout(json: bool) -> Self {
        Self::new(std::io::stdout(), json)
    }
}

impl<W: Write> ConsoleSurface<W> {
    pub fn new(out: W, json: bool) -> Self {
        Self {
            out,
            json,
            last_error: None,
        }
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn emit(&mut self, line: &str) {
        if let Err(e) = writeln!(self.out, "{}", line) {
            tracing::warn!("Failed to write route output: {}", e);
        }
    }
}

impl<W: Write> MapSurface for ConsoleSurface<W> {
    fn draw_route(&mut self, path: &FlattenedPath) {
        self.last_error = None;
        if self.json {
            match serde_json::to_string_pretty(path) {
                Ok(json) => self.emit(&json),
                Err(e) => tracing::warn!("Failed to serialize route: {}", e),
            }
            return;
        }

        self.emit(&format!("Route with {} points", path.points.len()));
        if let (Some(first), Some(last)) = (path.points.first(), path.points.last()) {
            self.emit(&format!("  from {}", first));
            self.emit(&format!("  to   {}", last));
        }
    }

    fn set_distance_label(&mut self, label: &str) {
        if self.json {
            return;
        }
        if label.is_empty() {
            self.emit("Distance: unknown");
        } else {
            self.emit(&format!("Distance: {}", label));
        }
    }

    fn route_unavailable(&mut self, error: &RouteError) {
        self.last_error = Some(error.user_friendly_message());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Coordinate;
    use crate::utils::error::FetchError;

    fn path() -> FlattenedPath {
        FlattenedPath {
            points: vec![Coordinate::new(38.5, -120.2), Coordinate::new(43.252, -126.453)],
            distance_label: "5 mi".to_string(),
        }
    }

    #[test]
    fn test_text_output() {
        let mut surface = ConsoleSurface::new(Vec::new(), false);
        surface.draw_route(&path());
        surface.set_distance_label("5 mi");

        let output = String::from_utf8(surface.into_inner()).unwrap();
        assert_eq!(
            output,
            "Route with 2 points\n  from 38.5,-120.2\n  to   43.252,-126.453\nDistance: 5 mi\n"
        );
    }

    #[test]
    fn test_json_output() {
        let mut surface = ConsoleSurface::new(Vec::new(), true);
        surface.draw_route(&path());
        surface.set_distance_label("5 mi");

        let output = String::from_utf8(surface.into_inner()).unwrap();
        let parsed: FlattenedPath = serde_json::from_str(&output).unwrap();
        assert_eq!(parsed, path());
    }

    #[test]
    fn test_unavailable_route_is_remembered() {
        let mut surface = ConsoleSurface::new(Vec::new(), false);
        surface.route_unavailable(&RouteError::from(FetchError::Timeout));

        assert!(surface.last_error().unwrap().contains("too long"));
        assert!(surface.into_inner().is_empty());
    }
}
