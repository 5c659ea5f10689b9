//! Planar geometry primitives
//!
//! Points are `glam::DVec2`; polygons are plain vertex slices. Everything here is
//! free of allocation except the functions that produce a new polygon.

use glam::DVec2;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Result, VoronoiError};

/// A 2D coordinate, used both as a generator and as a polygon vertex
pub type Point = DVec2;

/// An ordered vertex ring describing a cell boundary (closing edge implied)
pub type Polygon = Vec<Point>;

/// Relative tolerance for treating consecutive edges as collinear
const CONVEXITY_EPSILON: f64 = 1e-9;

/// The bounding rectangle `[0, width] x [0, height]`
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub width: f64,
    pub height: f64,
}

impl Bounds {
    /// Create a bounding rectangle anchored at the origin
    ///
    /// # Errors
    ///
    /// Returns `InvalidBounds` if either side is non-positive or non-finite.
    pub fn new(width: f64, height: f64) -> Result<Self> {
        if !(width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0) {
            return Err(VoronoiError::InvalidBounds { width, height });
        }
        Ok(Self { width, height })
    }

    #[inline]
    pub fn area(&self) -> f64 {
        self.width * self.height
    }

    #[inline]
    pub fn diagonal(&self) -> f64 {
        self.width.hypot(self.height)
    }

    /// Rectangle corners in counter-clockwise order (y up)
    pub fn corners(&self) -> Polygon {
        vec![
            DVec2::new(0.0, 0.0),
            DVec2::new(self.width, 0.0),
            DVec2::new(self.width, self.height),
            DVec2::new(0.0, self.height),
        ]
    }

    #[inline]
    pub fn contains(&self, p: Point) -> bool {
        p.x >= 0.0 && p.x <= self.width && p.y >= 0.0 && p.y <= self.height
    }
}

/// Signed shoelace area; positive for counter-clockwise rings
pub fn signed_area(polygon: &[Point]) -> f64 {
    let n = polygon.len();
    if n < 3 {
        return 0.0;
    }
    let mut twice_area = 0.0;
    for i in 0..n {
        let a = polygon[i];
        let b = polygon[(i + 1) % n];
        twice_area += a.perp_dot(b);
    }
    twice_area * 0.5
}

/// Area-weighted centroid of a polygon
///
/// Returns `None` for rings with zero area, where the centroid is undefined.
pub fn polygon_centroid(polygon: &[Point]) -> Option<Point> {
    let n = polygon.len();
    if n < 3 {
        return None;
    }

    let mut sum = DVec2::ZERO;
    let mut twice_area = 0.0;
    let mut prev = polygon[n - 1];
    for &curr in polygon {
        let cross = prev.perp_dot(curr);
        twice_area += cross;
        sum += (prev + curr) * cross;
        prev = curr;
    }

    if twice_area == 0.0 || !twice_area.is_finite() {
        return None;
    }
    Some(sum / (3.0 * twice_area))
}

/// Distance from `p` to the segment `v`-`w` (clamped projection)
pub fn distance_to_segment(p: Point, v: Point, w: Point) -> f64 {
    let edge = w - v;
    let length_sq = edge.length_squared();
    if length_sq == 0.0 {
        return p.distance(v);
    }
    let t = ((p - v).dot(edge) / length_sq).clamp(0.0, 1.0);
    p.distance(v + edge * t)
}

/// Re-order vertices by polar angle around `center` (ascending `atan2`)
pub fn sort_by_angle(center: Point, points: &[Point]) -> Polygon {
    let mut keyed: Vec<(f64, Point)> = points
        .iter()
        .map(|&p| {
            let d = p - center;
            (d.y.atan2(d.x), p)
        })
        .collect();
    keyed.sort_by(|a, b| a.0.total_cmp(&b.0));
    keyed.into_iter().map(|(_, p)| p).collect()
}

/// Whether the ring turns consistently in one direction
///
/// Nearly collinear vertex triples are ignored, so merged clip vertices do not
/// make an otherwise convex cell fail the check.
pub fn is_convex(polygon: &[Point]) -> bool {
    let n = polygon.len();
    if n < 3 {
        return false;
    }

    let (min, max) = polygon
        .iter()
        .fold((polygon[0], polygon[0]), |(lo, hi), &p| (lo.min(p), hi.max(p)));
    let tolerance = CONVEXITY_EPSILON * (max - min).length_squared();

    let mut sign = 0.0;
    for i in 0..n {
        let a = polygon[i];
        let b = polygon[(i + 1) % n];
        let c = polygon[(i + 2) % n];
        let cross = (b - a).perp_dot(c - b);
        if cross.abs() <= tolerance {
            continue;
        }
        if sign == 0.0 {
            sign = cross.signum();
        } else if cross.signum() != sign {
            return false;
        }
    }
    sign != 0.0
}

/// Point membership for a convex ring of either winding (boundary counts as inside)
pub fn convex_contains(polygon: &[Point], p: Point) -> bool {
    let n = polygon.len();
    if n < 3 {
        return false;
    }
    let orientation = signed_area(polygon).signum();
    (0..n).all(|i| {
        let a = polygon[i];
        let b = polygon[(i + 1) % n];
        (b - a).perp_dot(p - a) * orientation >= 0.0
    })
}

/// Clip a ring to the half-plane `(x - origin) . normal <= 0` (Sutherland-Hodgman step)
pub fn clip_half_plane(polygon: &[Point], origin: Point, normal: DVec2) -> Polygon {
    let n = polygon.len();
    let mut clipped = Vec::with_capacity(n + 1);
    for i in 0..n {
        let current = polygon[i];
        let next = polygon[(i + 1) % n];
        let dc = (current - origin).dot(normal);
        let dn = (next - origin).dot(normal);

        if dc <= 0.0 {
            clipped.push(current);
        }
        if (dc < 0.0 && dn > 0.0) || (dc > 0.0 && dn < 0.0) {
            clipped.push(current.lerp(next, dc / (dc - dn)));
        }
    }
    clipped
}

/// Drop vertices closer than `epsilon` to their predecessor, including across the seam
pub fn merge_close_vertices(polygon: Polygon, epsilon: f64) -> Polygon {
    let epsilon_sq = epsilon * epsilon;
    let mut merged: Polygon = Vec::with_capacity(polygon.len());
    for p in polygon {
        match merged.last() {
            Some(&last) if last.distance_squared(p) <= epsilon_sq => {}
            _ => merged.push(p),
        }
    }
    while merged.len() > 1 && merged[0].distance_squared(merged[merged.len() - 1]) <= epsilon_sq {
        merged.pop();
    }
    merged
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_square() -> Polygon {
        vec![
            DVec2::new(0.0, 0.0),
            DVec2::new(1.0, 0.0),
            DVec2::new(1.0, 1.0),
            DVec2::new(0.0, 1.0),
        ]
    }

    #[test]
    fn test_bounds_validation() {
        assert!(Bounds::new(1.0, 2.0).is_ok());
        assert!(Bounds::new(0.0, 2.0).is_err());
        assert!(Bounds::new(1.0, -2.0).is_err());
        assert!(Bounds::new(f64::NAN, 1.0).is_err());
        assert!(Bounds::new(f64::INFINITY, 1.0).is_err());
    }

    #[test]
    fn test_bounds_corners_ccw() {
        let bounds = Bounds::new(3.0, 2.0).unwrap();
        let corners = bounds.corners();
        assert!((signed_area(&corners) - 6.0).abs() < 1e-12);
        assert!(bounds.contains(DVec2::new(3.0, 2.0)));
        assert!(!bounds.contains(DVec2::new(3.1, 1.0)));
    }

    #[test]
    fn test_signed_area_winding() {
        let square = unit_square();
        assert!((signed_area(&square) - 1.0).abs() < 1e-12);

        let reversed: Polygon = square.into_iter().rev().collect();
        assert!((signed_area(&reversed) + 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_centroid_square_and_triangle() {
        let c = polygon_centroid(&unit_square()).unwrap();
        assert!((c - DVec2::new(0.5, 0.5)).length() < 1e-12);

        let triangle = vec![DVec2::new(0.0, 0.0), DVec2::new(3.0, 0.0), DVec2::new(0.0, 3.0)];
        let c = polygon_centroid(&triangle).unwrap();
        assert!((c - DVec2::new(1.0, 1.0)).length() < 1e-12);
    }

    #[test]
    fn test_centroid_degenerate() {
        let line = vec![DVec2::new(0.0, 0.0), DVec2::new(1.0, 1.0), DVec2::new(2.0, 2.0)];
        assert!(polygon_centroid(&line).is_none());
        assert!(polygon_centroid(&[]).is_none());
    }

    #[test]
    fn test_distance_to_segment() {
        let v = DVec2::new(0.0, 0.0);
        let w = DVec2::new(2.0, 0.0);

        // Projection inside the segment
        assert!((distance_to_segment(DVec2::new(1.0, 1.0), v, w) - 1.0).abs() < 1e-12);
        // Clamped to an endpoint
        assert!((distance_to_segment(DVec2::new(3.0, 4.0), v, w) - 17.0_f64.sqrt()).abs() < 1e-12);
        // Zero-length segment
        assert!((distance_to_segment(DVec2::new(3.0, 4.0), v, v) - 5.0).abs() < 1e-12);
    }

    #[test]
    fn test_sort_by_angle_restores_ring() {
        let scrambled = vec![
            DVec2::new(1.0, 1.0),
            DVec2::new(0.0, 0.0),
            DVec2::new(0.0, 1.0),
            DVec2::new(1.0, 0.0),
        ];
        let sorted = sort_by_angle(DVec2::new(0.5, 0.5), &scrambled);
        assert!((signed_area(&sorted) - 1.0).abs() < 1e-12);
        assert_eq!(sorted[0], DVec2::new(0.0, 0.0));
    }

    #[test]
    fn test_is_convex() {
        assert!(is_convex(&unit_square()));

        let arrow = vec![
            DVec2::new(0.0, 0.0),
            DVec2::new(2.0, 1.0),
            DVec2::new(0.0, 2.0),
            DVec2::new(0.5, 1.0),
        ];
        assert!(!is_convex(&arrow));

        // A collinear midpoint does not break convexity
        let with_midpoint = vec![
            DVec2::new(0.0, 0.0),
            DVec2::new(0.5, 0.0),
            DVec2::new(1.0, 0.0),
            DVec2::new(1.0, 1.0),
            DVec2::new(0.0, 1.0),
        ];
        assert!(is_convex(&with_midpoint));
    }

    #[test]
    fn test_convex_contains() {
        let square = unit_square();
        assert!(convex_contains(&square, DVec2::new(0.5, 0.5)));
        assert!(convex_contains(&square, DVec2::new(1.0, 0.5)));
        assert!(!convex_contains(&square, DVec2::new(1.5, 0.5)));

        let reversed: Polygon = square.into_iter().rev().collect();
        assert!(convex_contains(&reversed, DVec2::new(0.25, 0.75)));
    }

    #[test]
    fn test_clip_half_plane() {
        // Keep x <= 0.5
        let clipped = clip_half_plane(&unit_square(), DVec2::new(0.5, 0.0), DVec2::X);
        assert_eq!(clipped.len(), 4);
        assert!((signed_area(&clipped) - 0.5).abs() < 1e-12);

        // Plane that misses the square entirely keeps nothing
        let empty = clip_half_plane(&unit_square(), DVec2::new(-1.0, 0.0), DVec2::X);
        assert!(empty.is_empty());
    }

    #[test]
    fn test_merge_close_vertices() {
        let ring = vec![
            DVec2::new(0.0, 0.0),
            DVec2::new(1.0, 0.0),
            DVec2::new(1.0, 1e-15),
            DVec2::new(1.0, 1.0),
            DVec2::new(0.0, 1.0),
            DVec2::new(0.0, 1e-15),
        ];
        let merged = merge_close_vertices(ring, 1e-12);
        assert_eq!(merged.len(), 4);
    }
}
