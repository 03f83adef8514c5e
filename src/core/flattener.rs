use crate::core::{FlattenedPath, LegPolicy, RawRoute};

pub fn flatten(route: RawRoute) -> FlattenedPath {
    flatten_with(route, LegPolicy::default())
}

/// Concatenates step polylines in wire order.
///
/// The distance label is the text of the last step whose distance text is
/// non-empty; it is copied, never summed.
pub fn flatten_with(route: RawRoute, policy: LegPolicy) -> FlattenedPath {
    let mut points = Vec::new();
    let mut distance_label = String::new();

    for leg in route.legs {
        if policy == LegPolicy::RestartPerLeg {
            points = Vec::new();
        }

        for step in leg.steps {
            if let Some(step_points) = step.points {
                points.extend(step_points);
            }
            if !step.distance.text.is_empty() {
                distance_label = step.distance.text;
            }
        }
    }

    FlattenedPath {
        points,
        distance_label,
    }
}
