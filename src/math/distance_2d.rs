use super::{Point2, TOLERANCE};
use crate::error::GeometryError;

/// Returns the minimum distance from `p` to the segment `a`→`b`.
#[must_use]
pub fn point_to_segment_dist(p: &Point2, a: &Point2, b: &Point2) -> f64 {
    let d = b - a;
    let len_sq = d.norm_squared();

    if len_sq < TOLERANCE * TOLERANCE {
        // Degenerate segment (zero length).
        return (p - a).norm();
    }

    // Project onto the infinite line, clamp to [0, 1].
    let t = ((p - a).dot(&d) / len_sq).clamp(0.0, 1.0);
    let closest = *a + d * t;
    (p - closest).norm()
}

/// Orthogonally projects `p` onto the segment `a`→`b`.
///
/// Returns the clamped parameter `t` in `[0, 1]` and the foot point.
///
/// # Errors
///
/// Returns `GeometryError::ZeroLengthSegment` if `a` and `b` coincide.
pub fn project_onto_segment(
    p: &Point2,
    a: &Point2,
    b: &Point2,
) -> Result<(f64, Point2), GeometryError> {
    let d = b - a;
    let len_sq = d.norm_squared();
    if len_sq < TOLERANCE * TOLERANCE {
        return Err(GeometryError::ZeroLengthSegment);
    }
    let t = ((p - a).dot(&d) / len_sq).clamp(0.0, 1.0);
    Ok((t, *a + d * t))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    const TOL: f64 = 1e-10;

    fn pt(x: f64, y: f64) -> Point2 {
        Point2::new(x, y)
    }

    #[test]
    fn segment_dist_perpendicular_projection() {
        // (1, 1) to (0,0)→(2,0): closest at (1,0).
        let d = point_to_segment_dist(&pt(1.0, 1.0), &pt(0.0, 0.0), &pt(2.0, 0.0));
        assert!((d - 1.0).abs() < TOL, "d={d}");
    }

    #[test]
    fn segment_dist_endpoint_closest() {
        let d = point_to_segment_dist(&pt(-1.0, 0.0), &pt(0.0, 0.0), &pt(2.0, 0.0));
        assert!((d - 1.0).abs() < TOL, "d={d}");
    }

    #[test]
    fn segment_dist_on_segment() {
        let d = point_to_segment_dist(&pt(1.0, 0.0), &pt(0.0, 0.0), &pt(2.0, 0.0));
        assert!(d.abs() < TOL, "d={d}");
    }

    #[test]
    fn segment_dist_degenerate() {
        let d = point_to_segment_dist(&pt(3.0, 4.0), &pt(0.0, 0.0), &pt(0.0, 0.0));
        assert!((d - 5.0).abs() < TOL, "d={d}");
    }

    #[test]
    fn projection_inside() {
        let (t, foot) =
            project_onto_segment(&pt(25.0, 7.0), &pt(0.0, 0.0), &pt(100.0, 0.0)).unwrap();
        assert!((t - 0.25).abs() < TOL);
        assert!((foot.x - 25.0).abs() < TOL);
        assert!(foot.y.abs() < TOL);
    }

    #[test]
    fn projection_clamps_to_endpoints() {
        let (t, foot) =
            project_onto_segment(&pt(150.0, 0.0), &pt(0.0, 0.0), &pt(100.0, 0.0)).unwrap();
        assert!((t - 1.0).abs() < TOL);
        assert!((foot.x - 100.0).abs() < TOL);
    }

    #[test]
    fn projection_zero_length() {
        assert!(project_onto_segment(&pt(1.0, 1.0), &pt(0.0, 0.0), &pt(0.0, 0.0)).is_err());
    }
}
