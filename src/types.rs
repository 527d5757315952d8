use glam::Vec2;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::shape::TileShape;

/// Integer address of one tile in the infinite tiling.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TileCoord {
    pub x: i32,
    pub y: i32,
}

impl TileCoord {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// True for rows that are shifted by half a pitch in interleaved layouts.
    #[inline]
    pub fn is_odd_row(self) -> bool {
        self.y.rem_euclid(2) == 1
    }
}

impl From<(i32, i32)> for TileCoord {
    fn from((x, y): (i32, i32)) -> Self {
        Self { x, y }
    }
}

// Row-major: rows first, then columns.
impl Ord for TileCoord {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.y.cmp(&other.y).then(self.x.cmp(&other.x))
    }
}

impl PartialOrd for TileCoord {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl std::fmt::Display for TileCoord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{{x: {}, y: {}}}", self.x, self.y)
    }
}

/// Axis-aligned rectangle in world coordinates (y grows upwards).
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Rect {
    pub min: Vec2,
    pub max: Vec2,
}

impl Rect {
    pub const ZERO: Rect = Rect { min: Vec2::ZERO, max: Vec2::ZERO };

    /// Build from two arbitrary corners.
    pub fn from_corners(a: Vec2, b: Vec2) -> Self {
        Self { min: a.min(b), max: a.max(b) }
    }

    /// Build from the bottom-left origin and a (non-negative) size.
    pub fn from_origin_size(origin: Vec2, size: Vec2) -> Self {
        Self { min: origin, max: origin + size }
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.max.y - self.min.y
    }

    #[inline]
    pub fn size(&self) -> Vec2 {
        self.max - self.min
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }

    /// Inclusive containment test.
    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }

    /// True if `other` lies completely inside `self` (edges may touch).
    pub fn contains_rect(&self, other: &Rect) -> bool {
        self.contains(other.min) && self.contains(other.max)
    }

    /// Express an absolute point as fractions of this rect, clamped to `[0,1]`.
    pub fn relative(&self, p: Vec2) -> RelPoint {
        let size = self.size();
        let fx = if size.x > 0.0 { (p.x - self.min.x) / size.x } else { 0.0 };
        let fy = if size.y > 0.0 { (p.y - self.min.y) / size.y } else { 0.0 };
        RelPoint::clamped(fx, fy)
    }
}

/// Point inside a tile frame expressed as fractions of that frame.
///
/// `x == 0` is the left edge, `x == 1` the right edge,
/// `y == 0` the bottom edge and `y == 1` the top edge.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RelPoint {
    pub x: f32,
    pub y: f32,
}

impl RelPoint {
    /// Returns `None` when either component leaves `[0,1]`.
    pub fn new(x: f32, y: f32) -> Option<Self> {
        let inside = (0.0..=1.0).contains(&x) && (0.0..=1.0).contains(&y);
        inside.then_some(Self { x, y })
    }

    pub fn clamped(x: f32, y: f32) -> Self {
        Self { x: x.clamp(0.0, 1.0), y: y.clamp(0.0, 1.0) }
    }
}

/// Construction-time configuration of a contact grid.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GridConfig {
    /// Tile geometry shared by every tile of the grid. Clamped on use.
    pub shape: TileShape,
    /// Record per-phase timing for the last detection (adds small overhead).
    #[cfg_attr(feature = "serde", serde(default))]
    pub enable_timing: bool,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self { shape: TileShape::default(), enable_timing: false }
    }
}

impl GridConfig {
    pub fn new(shape: TileShape) -> Self {
        Self { shape, ..Default::default() }
    }
}

/// Counters for the last `detect`/`apply` call.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct DetectStats {
    /// Vertices left after removing consecutive duplicates.
    pub vertices: usize,
    /// Candidate tiles tested against an edge (counts repeats across edges).
    pub border_candidates: usize,
    /// Candidate tiles whose center was tested against the polygon.
    pub interior_candidates: usize,
    /// Distinct tiles found in contact.
    pub contacted: usize,
    /// Contacted tiles that were already stored and went through the callback.
    pub resolved: usize,
    /// Contacted tiles created fresh and inserted.
    pub inserted: usize,
    /// Contacted tiles dropped because inserting was not allowed.
    pub skipped: usize,
}

/// Timing breakdown for the last detection.
#[derive(Copy, Clone, Debug, Default)]
pub struct DetectTiming {
    pub total_ms: f64,
    pub border_ms: f64,
    pub interior_ms: f64,
    /// Time spent inside index lookups and the caller's callback.
    pub resolve_ms: f64,
}
