//! Directions response decoding.
//!
//! The body is walked as a `serde_json::Value` rather than derived structs so
//! that every failure names the exact JSON path that was missing or wrong.

use crate::core::polyline;
use crate::core::{Coordinate, Distance, Leg, RawRoute, Step};
use crate::utils::error::DecodeError;
use serde_json::{Map, Value};

type DecodeResult<T> = std::result::Result<T, DecodeError>;

const STATUS_OK: &str = "OK";
const STATUS_ZERO_RESULTS: &str = "ZERO_RESULTS";

pub fn decode(body: &str) -> DecodeResult<RawRoute> {
    let root: Value =
        serde_json::from_str(body).map_err(|e| DecodeError::MalformedJson(e.to_string()))?;
    let root = as_object(&root, "$")?;

    let status = optional_str(root, "status", "status")?;
    if let Some(status) = status {
        if status != STATUS_OK && status != STATUS_ZERO_RESULTS {
            let message = optional_str(root, "error_message", "error_message")?.unwrap_or_default();
            return Err(DecodeError::ProviderStatus {
                status: status.to_string(),
                message: message.to_string(),
            });
        }
    }

    let routes = as_array(required(root, "routes", "routes")?, "routes")?;
    let Some(first) = routes.first() else {
        tracing::debug!("Response contains no routes (status {:?})", status);
        return Ok(RawRoute {
            status: status.map(str::to_string),
            ..RawRoute::default()
        });
    };

    if routes.len() > 1 {
        tracing::debug!("Response has {} routes, using the first", routes.len());
    }

    let route = as_object(first, "routes[0]")?;
    let legs_path = "routes[0].legs";
    let legs = as_array(required(route, "legs", legs_path)?, legs_path)?
        .iter()
        .enumerate()
        .map(|(i, leg)| decode_leg(leg, &format!("{}[{}]", legs_path, i)))
        .collect::<DecodeResult<Vec<_>>>()?;

    Ok(RawRoute {
        status: status.map(str::to_string),
        summary: optional_str(route, "summary", "routes[0].summary")?.map(str::to_string),
        legs,
    })
}

fn decode_leg(value: &Value, path: &str) -> DecodeResult<Leg> {
    let leg = as_object(value, path)?;

    let steps_path = format!("{}.steps", path);
    let steps = as_array(required(leg, "steps", &steps_path)?, &steps_path)?
        .iter()
        .enumerate()
        .map(|(i, step)| decode_step(step, &format!("{}[{}]", steps_path, i)))
        .collect::<DecodeResult<Vec<_>>>()?;

    Ok(Leg {
        distance: optional_distance(leg, "distance", path)?,
        duration: optional_distance(leg, "duration", path)?,
        start_address: optional_str(leg, "start_address", &format!("{}.start_address", path))?
            .map(str::to_string),
        end_address: optional_str(leg, "end_address", &format!("{}.end_address", path))?
            .map(str::to_string),
        steps,
    })
}

fn decode_step(value: &Value, path: &str) -> DecodeResult<Step> {
    let step = as_object(value, path)?;

    let distance_path = format!("{}.distance", path);
    let distance = decode_distance(required(step, "distance", &distance_path)?, &distance_path)?;

    let start_path = format!("{}.start_location", path);
    let end_path = format!("{}.end_location", path);
    let start_location = decode_location(required(step, "start_location", &start_path)?, &start_path)?;
    let end_location = decode_location(required(step, "end_location", &end_path)?, &end_path)?;

    let points = match step.get("polyline") {
        None | Some(Value::Null) => None,
        Some(polyline) => decode_step_polyline(polyline, &format!("{}.polyline", path))?,
    };
    if points.is_none() {
        tracing::warn!("{} has no polyline, contributing no points", path);
    }

    Ok(Step {
        start_location,
        end_location,
        distance,
        duration: optional_distance(step, "duration", path)?,
        instructions: optional_str(step, "html_instructions", &format!("{}.html_instructions", path))?
            .map(str::to_string),
        points,
    })
}

/// `None` when the encoded string itself is absent or null.
fn decode_step_polyline(value: &Value, path: &str) -> DecodeResult<Option<Vec<Coordinate>>> {
    let polyline = as_object(value, path)?;
    let points_path = format!("{}.points", path);
    let Some(encoded) = optional_str(polyline, "points", &points_path)? else {
        return Ok(None);
    };
    polyline::decode(encoded)
        .map(Some)
        .map_err(|reason| DecodeError::InvalidPolyline {
            path: points_path,
            reason,
        })
}

fn decode_distance(value: &Value, path: &str) -> DecodeResult<Distance> {
    let distance = as_object(value, path)?;
    let text_path = format!("{}.text", path);
    let value_path = format!("{}.value", path);
    let text = as_str(required(distance, "text", &text_path)?, &text_path)?;
    let value = as_i64(required(distance, "value", &value_path)?, &value_path)?;
    Ok(Distance {
        text: text.to_string(),
        value,
    })
}

fn optional_distance(
    object: &Map<String, Value>,
    key: &str,
    parent: &str,
) -> DecodeResult<Option<Distance>> {
    match object.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(value) => decode_distance(value, &format!("{}.{}", parent, key)).map(Some),
    }
}

fn decode_location(value: &Value, path: &str) -> DecodeResult<Coordinate> {
    let location = as_object(value, path)?;
    let lat_path = format!("{}.lat", path);
    let lng_path = format!("{}.lng", path);
    Ok(Coordinate::new(
        as_f64(required(location, "lat", &lat_path)?, &lat_path)?,
        as_f64(required(location, "lng", &lng_path)?, &lng_path)?,
    ))
}

fn required<'a>(object: &'a Map<String, Value>, key: &str, path: &str) -> DecodeResult<&'a Value> {
    match object.get(key) {
        None | Some(Value::Null) => Err(DecodeError::MissingField(path.to_string())),
        Some(value) => Ok(value),
    }
}

fn optional_str<'a>(
    object: &'a Map<String, Value>,
    key: &str,
    path: &str,
) -> DecodeResult<Option<&'a str>> {
    match object.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(value) => as_str(value, path).map(Some),
    }
}

fn as_object<'a>(value: &'a Value, path: &str) -> DecodeResult<&'a Map<String, Value>> {
    value.as_object().ok_or_else(|| mismatch(path, "object"))
}

fn as_array<'a>(value: &'a Value, path: &str) -> DecodeResult<&'a Vec<Value>> {
    value.as_array().ok_or_else(|| mismatch(path, "array"))
}

fn as_str<'a>(value: &'a Value, path: &str) -> DecodeResult<&'a str> {
    value.as_str().ok_or_else(|| mismatch(path, "string"))
}

fn as_i64(value: &Value, path: &str) -> DecodeResult<i64> {
    value.as_i64().ok_or_else(|| mismatch(path, "integer"))
}

fn as_f64(value: &Value, path: &str) -> DecodeResult<f64> {
    value.as_f64().ok_or_else(|| mismatch(path, "number"))
}

fn mismatch(path: &str, expected: &'static str) -> DecodeError {
    DecodeError::TypeMismatch {
        path: path.to_string(),
        expected,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn step(text: &str, points: Option<&str>) -> Value {
        let mut step = json!({
            "distance": { "text": text, "value": 8047 },
            "duration": { "text": "6 mins", "value": 360 },
            "start_location": { "lat": 38.5, "lng": -120.2 },
            "end_location": { "lat": 43.252, "lng": -126.453 },
            "html_instructions": "Head <b>north</b>",
            "travel_mode": "DRIVING"
        });
        if let Some(points) = points {
            step["polyline"] = json!({ "points": points });
        }
        step
    }

    fn response(legs: Vec<Value>) -> String {
        json!({
            "status": "OK",
            "routes": [{ "summary": "I-5 N", "legs": legs }]
        })
        .to_string()
    }

    #[test]
    fn test_decode_zero_routes() {
        let route = decode(r#"{"status":"ZERO_RESULTS","routes":[]}"#).unwrap();
        assert!(route.legs.is_empty());
        assert_eq!(route.status.as_deref(), Some("ZERO_RESULTS"));
    }

    #[test]
    fn test_decode_full_step() {
        let body = response(vec![json!({
            "distance": { "text": "5 mi", "value": 8047 },
            "start_address": "Sacramento, CA",
            "end_address": "Eugene, OR",
            "steps": [step("5 mi", Some("_p~iF~ps|U_ulLnnqC_mqNvxq`@"))]
        })]);

        let route = decode(&body).unwrap();
        assert_eq!(route.summary.as_deref(), Some("I-5 N"));
        assert_eq!(route.legs.len(), 1);

        let leg = &route.legs[0];
        assert_eq!(leg.start_address.as_deref(), Some("Sacramento, CA"));
        assert_eq!(leg.distance.as_ref().unwrap().value, 8047);

        let step = &leg.steps[0];
        assert_eq!(step.distance.text, "5 mi");
        assert_eq!(step.duration.as_ref().unwrap().value, 360);
        assert_eq!(step.start_location, Coordinate::new(38.5, -120.2));
        assert_eq!(step.instructions.as_deref(), Some("Head <b>north</b>"));
        assert_eq!(step.points.as_ref().unwrap().len(), 3);
    }

    #[test]
    fn test_decode_preserves_order() {
        let body = response(vec![
            json!({ "steps": [step("1 mi", Some("")), step("2 mi", Some(""))] }),
            json!({ "steps": [step("3 mi", Some(""))] }),
        ]);

        let route = decode(&body).unwrap();
        let texts: Vec<_> = route
            .legs
            .iter()
            .flat_map(|leg| leg.steps.iter().map(|s| s.distance.text.as_str()))
            .collect();
        assert_eq!(texts, vec!["1 mi", "2 mi", "3 mi"]);
    }

    #[test]
    fn test_missing_polyline_does_not_abort_siblings() {
        let body = response(vec![json!({
            "steps": [step("1 mi", None), step("2 mi", Some("_p~iF~ps|U"))]
        })]);

        let route = decode(&body).unwrap();
        let steps = &route.legs[0].steps;
        assert_eq!(steps.len(), 2);
        assert!(steps[0].points.is_none());
        assert_eq!(steps[1].points.as_ref().unwrap().len(), 1);
    }

    #[test]
    fn test_polyline_without_points_does_not_abort_siblings() {
        let mut empty = step("1 mi", None);
        empty["polyline"] = json!({});
        let mut null_points = step("2 mi", None);
        null_points["polyline"] = json!({ "points": null });
        let body = response(vec![json!({
            "steps": [empty, null_points, step("3 mi", Some("_p~iF~ps|U"))]
        })]);

        let route = decode(&body).unwrap();
        let steps = &route.legs[0].steps;
        assert_eq!(steps.len(), 3);
        assert!(steps[0].points.is_none());
        assert!(steps[1].points.is_none());
        assert_eq!(steps[2].points.as_ref().unwrap().len(), 1);
    }

    #[test]
    fn test_non_string_points_is_type_mismatch() {
        let mut bad = step("1 mi", None);
        bad["polyline"] = json!({ "points": 42 });
        let body = response(vec![json!({ "steps": [bad] })]);

        assert!(matches!(
            decode(&body).unwrap_err(),
            DecodeError::TypeMismatch { ref path, .. }
                if path == "routes[0].legs[0].steps[0].polyline.points"
        ));
    }

    #[test]
    fn test_malformed_json() {
        let err = decode(r#"{"routes": [{"legs": ["#).unwrap_err();
        assert!(matches!(err, DecodeError::MalformedJson(_)));
    }

    #[test]
    fn test_missing_routes() {
        assert_eq!(
            decode(r#"{"status":"OK"}"#).unwrap_err(),
            DecodeError::MissingField("routes".to_string())
        );
    }

    #[test]
    fn test_missing_step_distance_reports_path() {
        let mut bad = step("1 mi", Some(""));
        bad.as_object_mut().unwrap().remove("distance");
        let body = response(vec![json!({ "steps": [step("1 mi", Some("")), bad] })]);

        assert_eq!(
            decode(&body).unwrap_err(),
            DecodeError::MissingField("routes[0].legs[0].steps[1].distance".to_string())
        );
    }

    #[test]
    fn test_type_mismatch_reports_path() {
        let mut bad = step("1 mi", Some(""));
        bad["distance"]["value"] = json!("eight thousand");
        let body = response(vec![json!({ "steps": [bad] })]);

        assert_eq!(
            decode(&body).unwrap_err(),
            DecodeError::TypeMismatch {
                path: "routes[0].legs[0].steps[0].distance.value".to_string(),
                expected: "integer",
            }
        );

        let body = r#"{"routes": {"legs": []}}"#;
        assert!(matches!(
            decode(body).unwrap_err(),
            DecodeError::TypeMismatch { expected: "array", .. }
        ));
    }

    #[test]
    fn test_polyline_of_wrong_type() {
        let mut bad = step("1 mi", None);
        bad["polyline"] = json!({ "points": 42 });
        let body = response(vec![json!({ "steps": [bad] })]);

        assert_eq!(
            decode(&body).unwrap_err(),
            DecodeError::TypeMismatch {
                path: "routes[0].legs[0].steps[0].polyline.points".to_string(),
                expected: "string",
            }
        );
    }

    #[test]
    fn test_provider_status_error() {
        let body = r#"{
            "status": "REQUEST_DENIED",
            "error_message": "The provided API key is invalid.",
            "routes": []
        }"#;

        assert_eq!(
            decode(body).unwrap_err(),
            DecodeError::ProviderStatus {
                status: "REQUEST_DENIED".to_string(),
                message: "The provided API key is invalid.".to_string(),
            }
        );
    }
}
