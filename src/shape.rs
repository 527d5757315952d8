use ahash::AHashSet;
use glam::Vec2;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::api::{GeometryApi, TileLayoutApi};
use crate::geometry::Geometry;
use crate::types::*;

/// Default tile width and height in world units.
pub const DEFAULT_TILE_SIZE: f32 = 20.0;
/// Default length of a hexagon's top and bottom sides.
pub const DEFAULT_HORIZONTAL_LENGTH: f32 = 10.0;

/// Tile geometry of a grid. Every tile of one grid shares one shape value.
///
/// Interleaved variants (`RotatedSquare`, `Hexagon`) advance half a tile
/// height per row and shift odd rows by half a column pitch. `Triangle`
/// alternates apex-up and apex-down cells every half width.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum TileShape {
    /// Axis-aligned rectangles.
    Square { width: f32, height: f32 },
    /// Diamonds inscribed in their frame.
    RotatedSquare { width: f32, height: f32 },
    /// Isosceles triangles, apex up iff `x + y` is even.
    Triangle { width: f32, height: f32 },
    /// Flat-topped hexagons; `horizontal_length` is the top/bottom side.
    Hexagon { width: f32, height: f32, horizontal_length: f32 },
}

impl Default for TileShape {
    fn default() -> Self {
        TileShape::square(DEFAULT_TILE_SIZE, DEFAULT_TILE_SIZE)
    }
}

#[inline]
fn at_least_one(v: f32) -> f32 {
    // f32::max returns the non-NaN operand
    v.max(1.0)
}

#[inline]
fn cell(c: f32, pitch: f32) -> i32 {
    (c / pitch).floor() as i32
}

impl TileShape {
    pub fn square(width: f32, height: f32) -> Self {
        TileShape::Square { width, height }.clamped()
    }

    pub fn rotated_square(width: f32, height: f32) -> Self {
        TileShape::RotatedSquare { width, height }.clamped()
    }

    pub fn triangle(width: f32, height: f32) -> Self {
        TileShape::Triangle { width, height }.clamped()
    }

    pub fn hexagon(width: f32, height: f32, horizontal_length: f32) -> Self {
        TileShape::Hexagon { width, height, horizontal_length }.clamped()
    }

    /// Copy with sizes forced into their valid ranges:
    /// `width, height >= 1` and, for hexagons, `1 <= horizontal_length <= width`.
    pub fn clamped(self) -> Self {
        match self {
            TileShape::Square { width, height } => TileShape::Square {
                width: at_least_one(width),
                height: at_least_one(height),
            },
            TileShape::RotatedSquare { width, height } => TileShape::RotatedSquare {
                width: at_least_one(width),
                height: at_least_one(height),
            },
            TileShape::Triangle { width, height } => TileShape::Triangle {
                width: at_least_one(width),
                height: at_least_one(height),
            },
            TileShape::Hexagon { width, height, horizontal_length } => {
                let width = at_least_one(width);
                TileShape::Hexagon {
                    width,
                    height: at_least_one(height),
                    horizontal_length: at_least_one(horizontal_length).min(width),
                }
            }
        }
    }

    pub fn width(&self) -> f32 {
        match *self {
            TileShape::Square { width, .. }
            | TileShape::RotatedSquare { width, .. }
            | TileShape::Triangle { width, .. }
            | TileShape::Hexagon { width, .. } => width,
        }
    }

    pub fn height(&self) -> f32 {
        match *self {
            TileShape::Square { height, .. }
            | TileShape::RotatedSquare { height, .. }
            | TileShape::Triangle { height, .. }
            | TileShape::Hexagon { height, .. } => height,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            TileShape::Square { .. } => "square",
            TileShape::RotatedSquare { .. } => "rotated-square",
            TileShape::Triangle { .. } => "triangle",
            TileShape::Hexagon { .. } => "hexagon",
        }
    }

    /// Triangle orientation at `coord`. Only meaningful for `Triangle`.
    #[inline]
    pub fn apex_up(coord: TileCoord) -> bool {
        // x + y even <=> x and y share parity
        (coord.x ^ coord.y) & 1 == 0
    }

    /// The one tile whose shape contains `p`.
    ///
    /// A point on a shared edge or corner belongs to several tiles; the first
    /// one (in `TileCoord` order) that the half-open point-in-polygon rule
    /// accepts wins, and failing that the first one whose boundary passes
    /// through `p`. Squares are resolved by flooring alone.
    pub fn tile_containing(&self, p: Vec2) -> Option<TileCoord> {
        if let TileShape::Square { width, height } = *self {
            return Some(TileCoord::new(cell(p.x, width), cell(p.y, height)));
        }
        // Widen by a unit so tiles merely touching `p` are candidates too
        let reach = Rect { min: p - Vec2::ONE, max: p + Vec2::ONE };
        let mut candidates: Vec<TileCoord> = self.tiles_overlapping(reach).into_iter().collect();
        candidates.sort();
        let polygons: Vec<(TileCoord, Vec<Vec2>)> =
            candidates.into_iter().map(|c| (c, self.vertices(c))).collect();
        polygons
            .iter()
            .find(|(_, poly)| Geometry::point_in_polygon(p, poly))
            .or_else(|| polygons.iter().find(|(_, poly)| Geometry::point_on_boundary(p, poly)))
            .map(|(c, _)| *c)
    }

    /// Horizontal distance from the frame edge to the hexagon's top side.
    fn hexagon_inset(width: f32, horizontal_length: f32) -> f32 {
        (width - horizontal_length) * 0.5
    }

    /// Even and odd rows of an interleaved layout overlapping `rect`.
    /// `x_range` maps the row-shifted `(min.x, max.x)` to an inclusive column range.
    fn interleaved_rows(
        rect: Rect,
        height: f32,
        shift_x: f32,
        x_range: impl Fn(f32, f32) -> (i32, i32),
        out: &mut AHashSet<TileCoord>,
    ) {
        // Even rows start at k*h, odd rows at k*h + h/2
        for (row_shift_x, row_shift_y, parity) in [(0.0, 0.0, 0), (shift_x, height * 0.5, 1)] {
            let (x0, x1) = x_range(rect.min.x - row_shift_x, rect.max.x - row_shift_x);
            let k0 = cell(rect.min.y - row_shift_y, height);
            let k1 = cell(rect.max.y - row_shift_y, height);
            for k in k0..=k1 {
                let y = 2 * k + parity;
                for x in x0..=x1 {
                    out.insert(TileCoord::new(x, y));
                }
            }
        }
    }
}

impl TileLayoutApi for TileShape {
    fn frame(&self, coord: TileCoord) -> Rect {
        let (x, y) = (coord.x as f32, coord.y as f32);
        let odd = coord.is_odd_row();
        let origin = match *self {
            TileShape::Square { width, height } => Vec2::new(x * width, y * height),
            TileShape::RotatedSquare { width, height } => {
                let shift = if odd { width * 0.5 } else { 0.0 };
                Vec2::new(x * width + shift, y * height * 0.5)
            }
            TileShape::Triangle { width, height } => Vec2::new(x * width * 0.5, y * height),
            TileShape::Hexagon { width, height, horizontal_length } => {
                let pitch = width + horizontal_length;
                let shift = if odd { pitch * 0.5 } else { 0.0 };
                Vec2::new(x * pitch + shift, y * height * 0.5)
            }
        };
        Rect::from_origin_size(origin, Vec2::new(self.width(), self.height()))
    }

    fn vertices(&self, coord: TileCoord) -> Vec<Vec2> {
        let f = self.frame(coord);
        let (min, max) = (f.min, f.max);
        let mid = f.center();
        match *self {
            TileShape::Square { .. } => vec![
                min,
                Vec2::new(min.x, max.y),
                max,
                Vec2::new(max.x, min.y),
            ],
            TileShape::RotatedSquare { .. } => vec![
                Vec2::new(min.x, mid.y),
                Vec2::new(mid.x, max.y),
                Vec2::new(max.x, mid.y),
                Vec2::new(mid.x, min.y),
            ],
            TileShape::Triangle { .. } => {
                if Self::apex_up(coord) {
                    vec![min, Vec2::new(mid.x, max.y), Vec2::new(max.x, min.y)]
                } else {
                    vec![Vec2::new(min.x, max.y), max, Vec2::new(mid.x, min.y)]
                }
            }
            TileShape::Hexagon { width, horizontal_length, .. } => {
                let inset = Self::hexagon_inset(width, horizontal_length);
                vec![
                    Vec2::new(min.x, mid.y),
                    Vec2::new(min.x + inset, max.y),
                    Vec2::new(max.x - inset, max.y),
                    Vec2::new(max.x, mid.y),
                    Vec2::new(max.x - inset, min.y),
                    Vec2::new(min.x + inset, min.y),
                ]
            }
        }
    }

    fn intersects_relative_segment(&self, coord: TileCoord, a: RelPoint, b: RelPoint) -> bool {
        // A segment misses the shape when both ends sit in the same cut-off corner
        let both = |outside: &dyn Fn(RelPoint) -> bool| outside(a) && outside(b);
        match *self {
            TileShape::Square { .. } => true,
            TileShape::RotatedSquare { .. } => {
                let bottom_left = |p: RelPoint| p.x < 0.5 && p.y < 0.5 && p.y < 0.5 - p.x;
                let top_left = |p: RelPoint| p.x < 0.5 && p.y > 0.5 && 1.0 - p.y < 0.5 - p.x;
                let bottom_right = |p: RelPoint| p.x > 0.5 && p.y < 0.5 && p.y < p.x - 0.5;
                let top_right = |p: RelPoint| p.x > 0.5 && p.y > 0.5 && 1.0 - p.y < p.x - 0.5;
                !(both(&bottom_left) || both(&top_left) || both(&bottom_right) || both(&top_right))
            }
            TileShape::Triangle { .. } => {
                if Self::apex_up(coord) {
                    let top_left = |p: RelPoint| p.x < 0.5 && p.y > 2.0 * p.x;
                    let top_right = |p: RelPoint| p.x > 0.5 && p.y > 2.0 * (1.0 - p.x);
                    !(both(&top_left) || both(&top_right))
                } else {
                    let bottom_left = |p: RelPoint| p.x < 0.5 && 1.0 - p.y > 2.0 * p.x;
                    let bottom_right = |p: RelPoint| p.x > 0.5 && 1.0 - p.y > 2.0 * (1.0 - p.x);
                    !(both(&bottom_left) || both(&bottom_right))
                }
            }
            TileShape::Hexagon { width, horizontal_length, .. } => {
                let rel = Self::hexagon_inset(width, horizontal_length) / width;
                if rel <= 0.0 {
                    return true;
                }
                // Map each corner box to the unit square, then test its cut line
                let left = |p: RelPoint| p.x / rel;
                let right = |p: RelPoint| (p.x - (1.0 - rel)) / rel;
                let lower = |p: RelPoint| 2.0 * p.y;
                let upper = |p: RelPoint| 2.0 * (p.y - 0.5);

                let bottom_left =
                    |p: RelPoint| p.x < rel && p.y < 0.5 && lower(p) < 1.0 - left(p);
                let top_left = |p: RelPoint| p.x < rel && p.y > 0.5 && upper(p) > left(p);
                let bottom_right =
                    |p: RelPoint| p.x > 1.0 - rel && p.y < 0.5 && lower(p) < right(p);
                let top_right =
                    |p: RelPoint| p.x > 1.0 - rel && p.y > 0.5 && 1.0 - upper(p) < right(p);
                !(both(&bottom_left) || both(&top_left) || both(&bottom_right) || both(&top_right))
            }
        }
    }

    fn tiles_overlapping(&self, rect: Rect) -> AHashSet<TileCoord> {
        let mut out = AHashSet::new();
        match *self {
            TileShape::Square { width, height } => {
                let (x0, x1) = (cell(rect.min.x, width), cell(rect.max.x, width));
                let (y0, y1) = (cell(rect.min.y, height), cell(rect.max.y, height));
                for y in y0..=y1 {
                    for x in x0..=x1 {
                        out.insert(TileCoord::new(x, y));
                    }
                }
            }
            TileShape::Triangle { width, height } => {
                // Columns advance by half a width; a frame spans two columns
                let half = width * 0.5;
                let (x0, x1) = (cell(rect.min.x, half) - 1, cell(rect.max.x, half));
                let (y0, y1) = (cell(rect.min.y, height), cell(rect.max.y, height));
                for y in y0..=y1 {
                    for x in x0..=x1 {
                        out.insert(TileCoord::new(x, y));
                    }
                }
            }
            TileShape::RotatedSquare { width, height } => {
                Self::interleaved_rows(
                    rect,
                    height,
                    width * 0.5,
                    |min_x, max_x| (cell(min_x, width), cell(max_x, width)),
                    &mut out,
                );
            }
            TileShape::Hexagon { width, height, horizontal_length } => {
                // Columns of one row leave gaps of `horizontal_length` between frames,
                // so the first column is the one whose right edge passes min_x.
                let pitch = width + horizontal_length;
                Self::interleaved_rows(
                    rect,
                    height,
                    pitch * 0.5,
                    |min_x, max_x| (cell(min_x - width, pitch) + 1, cell(max_x, pitch)),
                    &mut out,
                );
            }
        }
        out
    }
}
