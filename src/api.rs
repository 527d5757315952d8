use ahash::AHashSet;
use glam::Vec2;

use crate::tile::Tile;
use crate::types::*;

/// Public API contract for the polygon-to-tile contact grid.
///
/// `C` is the caller's content payload, `K` the contact payload.
pub trait ContactGridApi<C, K> {
    /// Construct an empty grid with the given configuration.
    fn new(cfg: GridConfig) -> Self
    where
        Self: Sized;

    // --- Detection ---------------------------------------------------------

    /// Find every tile overlapped by `path` and hand each one to `on_contact`
    /// exactly once.
    ///
    /// Open paths only contact tiles crossed by their segments; closed paths
    /// also contact tiles whose center lies inside the polygon. A segment
    /// running exactly along a tile edge touches neither neighbour, so an open
    /// path laid on a grid line contacts nothing. A single point contacts the
    /// one tile containing it. Tiles that are not stored yet are created only
    /// when `allow_insert` is set, otherwise they are skipped without a callback.
    fn detect<F>(&mut self, path: &[Vec2], closed: bool, allow_insert: bool, on_contact: F)
    where
        F: FnMut(&mut Tile<C, K>);

    /// Coordinates `detect` would contact, without touching the index.
    fn contacts(&self, path: &[Vec2], closed: bool) -> Vec<TileCoord>;

    /// Resolve an explicit list of coordinates the way `detect` resolves
    /// contacts. Repeated coordinates are resolved once.
    fn apply<F>(&mut self, coords: &[TileCoord], allow_insert: bool, on_contact: F)
    where
        F: FnMut(&mut Tile<C, K>);

    // --- Eviction ----------------------------------------------------------

    /// Drop every stored tile matching `predicate`.
    fn remove_where<P>(&mut self, predicate: P)
    where
        P: FnMut(&Tile<C, K>) -> bool;

    /// Number of stored tiles.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Batch hooks around the tiles one `detect`/`apply` call resolves.
///
/// Nothing is called for a call that resolves no tile. Otherwise
/// `begin_contacts` runs once before the first tile, `contact_resolved` once
/// per tile right after `on_contact` ran on it, and `end_contacts` once after
/// the last one.
pub trait ContactObserver<C, K> {
    fn begin_contacts(&mut self) {}

    fn contact_resolved(&mut self, tile: &Tile<C, K>);

    fn end_contacts(&mut self) {}
}

/// Per-shape layout and geometry. Implemented by `TileShape`.
pub trait TileLayoutApi {
    /// Axis-aligned bounding frame of the tile at `coord`.
    fn frame(&self, coord: TileCoord) -> Rect;

    /// Boundary of the tile at `coord`, in frame coordinates.
    fn vertices(&self, coord: TileCoord) -> Vec<Vec2>;

    /// Whether the segment `a`-`b` (both relative to the tile's frame) crosses
    /// the tile's actual shape rather than only its frame.
    fn intersects_relative_segment(&self, coord: TileCoord, a: RelPoint, b: RelPoint) -> bool;

    /// Every coordinate whose frame may overlap `rect`.
    fn tiles_overlapping(&self, rect: Rect) -> AHashSet<TileCoord>;

    /// Midpoint of the tile's frame.
    fn center(&self, coord: TileCoord) -> Vec2 {
        self.frame(coord).center()
    }
}

/// Pure geometry primitives used by the detector.
pub trait GeometryApi {
    fn clip_segment_to_rect(p0: Vec2, p1: Vec2, rect: Rect) -> Option<(RelPoint, RelPoint)>;
    fn point_in_polygon(point: Vec2, polygon: &[Vec2]) -> bool;
    /// True when `point` lies on an edge of `polygon` (within a small tolerance).
    fn point_on_boundary(point: Vec2, polygon: &[Vec2]) -> bool;
    fn bounding_box(points: &[Vec2]) -> Rect;
}
