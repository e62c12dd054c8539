use super::{Point2, Vector2, TOLERANCE};

/// 2D cross product (z component of `a × b`).
///
/// Positive when `b` lies counter-clockwise of `a`.
#[must_use]
pub fn cross_2d(a: &Vector2, b: &Vector2) -> f64 {
    a.x * b.y - a.y * b.x
}

/// Computes the signed area of a polygon (shoelace formula).
///
/// Positive for counter-clockwise, negative for clockwise.
#[must_use]
pub fn signed_area_2d(points: &[Point2]) -> f64 {
    let n = points.len();
    if n < 3 {
        return 0.0;
    }
    let mut sum = 0.0;
    for i in 0..n {
        let j = (i + 1) % n;
        sum += points[i].x * points[j].y - points[j].x * points[i].y;
    }
    sum * 0.5
}

/// Unsigned polygon area.
#[must_use]
pub fn polygon_area(points: &[Point2]) -> f64 {
    signed_area_2d(points).abs()
}

/// Area-weighted centroid of a simple polygon.
///
/// Falls back to the vertex average when the polygon has (near) zero area.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn polygon_centroid(points: &[Point2]) -> Point2 {
    let n = points.len();
    if n == 0 {
        return Point2::origin();
    }

    let mut twice_area = 0.0;
    let mut cx = 0.0;
    let mut cy = 0.0;
    for i in 0..n {
        let j = (i + 1) % n;
        let cross = points[i].x * points[j].y - points[j].x * points[i].y;
        twice_area += cross;
        cx += (points[i].x + points[j].x) * cross;
        cy += (points[i].y + points[j].y) * cross;
    }

    if twice_area.abs() > TOLERANCE {
        let factor = 1.0 / (3.0 * twice_area);
        return Point2::new(cx * factor, cy * factor);
    }

    let sum = points
        .iter()
        .fold(Vector2::zeros(), |acc, p| acc + p.coords);
    Point2::from(sum / n as f64)
}
