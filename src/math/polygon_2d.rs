use super::Point2;

/// Computes the signed area of a closed polygon (shoelace formula).
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

/// Returns the largest distance between consecutive vertices of a closed
/// polygon, including the closing edge.
#[must_use]
pub fn max_edge_length(points: &[Point2]) -> f64 {
    let n = points.len();
    if n < 2 {
        return 0.0;
    }
    (0..n)
        .map(|i| (points[(i + 1) % n] - points[i]).norm())
        .fold(0.0, f64::max)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unit_square_ccw() {
        let pts = [
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 0.0),
            Point2::new(1.0, 1.0),
            Point2::new(0.0, 1.0),
        ];
        assert!((signed_area_2d(&pts) - 1.0).abs() < 1e-12);
        assert!((max_edge_length(&pts) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn reversed_square_is_negative() {
        let pts = [
            Point2::new(0.0, 1.0),
            Point2::new(1.0, 1.0),
            Point2::new(1.0, 0.0),
            Point2::new(0.0, 0.0),
        ];
        assert!((signed_area_2d(&pts) + 1.0).abs() < 1e-12);
    }

    #[test]
    fn degenerate_inputs() {
        assert!(signed_area_2d(&[Point2::origin()]).abs() < 1e-12);
        assert!(max_edge_length(&[]).abs() < 1e-12);
    }
}
