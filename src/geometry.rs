use glam::Vec2;

use crate::api::GeometryApi;
use crate::types::*;

/// Distance within which a point counts as lying on a polygon edge.
pub const BOUNDARY_TOLERANCE: f32 = 1e-3;

/// Geometry primitives shared by the detector and the tile shapes.
pub struct Geometry;

impl GeometryApi for Geometry {
    fn clip_segment_to_rect(p0: Vec2, p1: Vec2, rect: Rect) -> Option<(RelPoint, RelPoint)> {
        // Liang-Barsky: p_i / q_i per half-plane (left, right, bottom, top)
        let d = p1 - p0;
        if d == Vec2::ZERO {
            return None;
        }
        let p = [-d.x, d.x, -d.y, d.y];
        let q = [
            p0.x - rect.min.x,
            rect.max.x - p0.x,
            p0.y - rect.min.y,
            rect.max.y - p0.y,
        ];

        // Entry/exit parameters, already restricted to the segment
        let mut u1 = 0.0f32;
        let mut u2 = 1.0f32;
        for i in 0..4 {
            if p[i] == 0.0 {
                // Parallel to this boundary: outside, or running along it
                if q[i] <= 0.0 {
                    return None;
                }
            } else {
                let t = q[i] / p[i];
                if p[i] < 0.0 {
                    if t > u1 {
                        u1 = t;
                    }
                } else if t < u2 {
                    u2 = t;
                }
            }
        }

        // Disjoint, or touching in a single point
        if u1 >= u2 {
            return None;
        }

        let enter = p0 + d * u1;
        let exit = p0 + d * u2;
        Some((rect.relative(enter), rect.relative(exit)))
    }

    fn point_in_polygon(point: Vec2, polygon: &[Vec2]) -> bool {
        // Ray cast to the left, half-open [min_y, max_y) so shared vertices count once
        let n = polygon.len();
        if n < 3 {
            return false;
        }
        let mut inside = false;
        let mut j = n - 1;
        for i in 0..n {
            let a = polygon[j];
            let b = polygon[i];
            let (lo, hi) = if a.y < b.y { (a.y, b.y) } else { (b.y, a.y) };
            if point.y >= lo && point.y < hi {
                let x = a.x + (point.y - a.y) * (b.x - a.x) / (b.y - a.y);
                if x < point.x {
                    inside = !inside;
                }
            }
            j = i;
        }
        inside
    }

    fn point_on_boundary(point: Vec2, polygon: &[Vec2]) -> bool {
        let n = polygon.len();
        if n == 0 {
            return false;
        }
        let mut j = n - 1;
        for i in 0..n {
            let a = polygon[j];
            let ab = polygon[i] - a;
            let len2 = ab.length_squared();
            let t = if len2 > 0.0 { ((point - a).dot(ab) / len2).clamp(0.0, 1.0) } else { 0.0 };
            if (point - (a + ab * t)).length_squared() <= BOUNDARY_TOLERANCE * BOUNDARY_TOLERANCE {
                return true;
            }
            j = i;
        }
        false
    }

    fn bounding_box(points: &[Vec2]) -> Rect {
        let Some(&first) = points.first() else {
            return Rect::ZERO;
        };
        let (min, max) = points
            .iter()
            .fold((first, first), |(min, max), &p| (min.min(p), max.max(p)));
        Rect { min, max }
    }
}
