//! Geofence evaluation on the ground plane.

use crate::vector::Vector3;

/// Added to every edge-slope denominator so horizontal edges never divide by zero.
pub const EDGE_EPSILON: f64 = 1e-7;

/// Check if a point is inside a polygon, ignoring z on both.
///
/// Uses ray casting: a horizontal ray from `point` towards +x crosses the
/// boundary an odd number of times when the point is inside. Self-intersecting
/// polygons get the plain parity result.
pub fn is_inside(point: Vector3, polygon: &[Vector3]) -> bool {
    let n = polygon.len();
    if n == 0 {
        return false;
    }

    let mut inside = false;
    let mut j = n - 1;
    for i in 0..n {
        let (xi, yi) = (polygon[i].x, polygon[i].y);
        let (xj, yj) = (polygon[j].x, polygon[j].y);

        if ((yi > point.y) != (yj > point.y))
            && (point.x < (xj - xi) * (point.y - yi) / (yj - yi + EDGE_EPSILON) + xi)
        {
            inside = !inside;
        }
        j = i;
    }

    inside
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(cx: f64, cy: f64, half: f64) -> Vec<Vector3> {
        vec![
            Vector3::new(cx - half, cy - half, 0.0),
            Vector3::new(cx + half, cy - half, 0.0),
            Vector3::new(cx + half, cy + half, 0.0),
            Vector3::new(cx - half, cy + half, 0.0),
        ]
    }

    #[test]
    fn test_origin_inside_centered_square() {
        assert!(is_inside(Vector3::ZERO, &square(0.0, 0.0, 10.0)));
    }

    #[test]
    fn test_origin_outside_translated_square() {
        assert!(!is_inside(Vector3::ZERO, &square(100.0, 100.0, 10.0)));
    }

    #[test]
    fn test_z_is_ignored() {
        let mut zone = square(0.0, 0.0, 10.0);
        zone[0].z = 500.0;
        assert!(is_inside(Vector3::new(1.0, 1.0, -300.0), &zone));
    }

    #[test]
    fn test_concave_polygon_notch_is_outside() {
        // U shape opening upwards; the notch spans x in [-2, 2], y above 0.
        let u = vec![
            Vector3::new(-6.0, -6.0, 0.0),
            Vector3::new(6.0, -6.0, 0.0),
            Vector3::new(6.0, 6.0, 0.0),
            Vector3::new(2.0, 6.0, 0.0),
            Vector3::new(2.0, 0.0, 0.0),
            Vector3::new(-2.0, 0.0, 0.0),
            Vector3::new(-2.0, 6.0, 0.0),
            Vector3::new(-6.0, 6.0, 0.0),
        ];
        assert!(!is_inside(Vector3::new(0.0, 3.0, 0.0), &u));
        assert!(is_inside(Vector3::new(4.0, 3.0, 0.0), &u));
        assert!(is_inside(Vector3::new(0.0, -3.0, 0.0), &u));
    }

    #[test]
    fn test_point_on_bottom_edge_counts_as_inside() {
        // Ray runs along the bottom edge; only the right edge is crossed.
        let zone = square(0.0, 0.0, 10.0);
        assert!(is_inside(Vector3::new(0.0, -10.0, 0.0), &zone));
        assert!(is_inside(Vector3::new(0.0, -9.999, 0.0), &zone));
        assert!(!is_inside(Vector3::new(0.0, -10.001, 0.0), &zone));
    }

    #[test]
    fn test_empty_polygon_contains_nothing() {
        assert!(!is_inside(Vector3::ZERO, &[]));
    }
}
