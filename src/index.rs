use ahash::AHashMap;

use crate::api::TileLayoutApi;
use crate::shape::TileShape;
use crate::tile::Tile;
use crate::types::*;

/// Sparse tile storage: at most one tile per coordinate, one shape per index.
///
/// Tiles are created lazily and stay until removed or evicted. Iteration
/// order is unspecified.
#[derive(Clone, Debug)]
pub struct TileIndex<C, K> {
    shape: TileShape,
    tiles: AHashMap<TileCoord, Tile<C, K>>,
}

impl<C, K> TileIndex<C, K> {
    /// Empty index. The shape is clamped into its valid range and then fixed
    /// for the lifetime of the index.
    pub fn new(shape: TileShape) -> Self {
        Self::with_capacity(shape, 0)
    }

    pub fn with_capacity(shape: TileShape, capacity: usize) -> Self {
        let clamped = shape.clamped();
        if clamped != shape {
            log::warn!("tile shape {:?} out of range, clamped to {:?}", shape, clamped);
        }
        Self { shape: clamped, tiles: AHashMap::with_capacity(capacity) }
    }

    #[inline]
    pub fn shape(&self) -> TileShape {
        self.shape
    }

    /// Fresh empty tile at `coord` for this index's shape (not inserted).
    pub fn make_tile(&self, coord: TileCoord) -> Tile<C, K> {
        Tile::new(coord, self.shape)
    }

    /// Store `tile`, replacing and returning any tile at the same coordinate.
    pub fn insert(&mut self, mut tile: Tile<C, K>) -> Option<Tile<C, K>> {
        if tile.shape() != self.shape {
            tile.restamp(self.shape);
        }
        self.tiles.insert(tile.coord(), tile)
    }

    /// Tile at `coord`, inserting an empty one first if needed.
    pub fn insert_at(&mut self, coord: TileCoord) -> &mut Tile<C, K> {
        let shape = self.shape;
        self.tiles.entry(coord).or_insert_with(|| Tile::new(coord, shape))
    }

    pub fn remove(&mut self, coord: TileCoord) -> Option<Tile<C, K>> {
        self.tiles.remove(&coord)
    }

    pub fn get(&self, coord: TileCoord) -> Option<&Tile<C, K>> {
        self.tiles.get(&coord)
    }

    pub fn get_mut(&mut self, coord: TileCoord) -> Option<&mut Tile<C, K>> {
        self.tiles.get_mut(&coord)
    }

    pub fn contains(&self, coord: TileCoord) -> bool {
        self.tiles.contains_key(&coord)
    }

    /// Evict every tile matching `predicate`. O(n).
    pub fn remove_where<P>(&mut self, mut predicate: P)
    where
        P: FnMut(&Tile<C, K>) -> bool,
    {
        let before = self.tiles.len();
        self.tiles.retain(|_, tile| !predicate(tile));
        let evicted = before - self.tiles.len();
        if evicted > 0 {
            log::debug!("evicted {} tiles, {} remain", evicted, self.tiles.len());
        }
    }

    pub fn clear(&mut self) {
        self.tiles.clear();
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Tile<C, K>> + '_ {
        self.tiles.values()
    }

    /// Remove and yield every stored tile.
    pub fn drain(&mut self) -> impl Iterator<Item = Tile<C, K>> + '_ {
        self.tiles.drain().map(|(_, tile)| tile)
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Tile<C, K>> + '_ {
        self.tiles.values_mut()
    }

    /// Stored tiles whose frame may overlap `rect`.
    pub fn query_rect(&self, rect: Rect) -> Vec<&Tile<C, K>> {
        let candidates = self.shape.tiles_overlapping(rect);
        // Walk whichever side is smaller
        if candidates.len() <= self.tiles.len() {
            candidates.iter().filter_map(|c| self.tiles.get(c)).collect()
        } else {
            self.tiles.values().filter(|t| candidates.contains(&t.coord())).collect()
        }
    }
}

impl<C, K> Extend<Tile<C, K>> for TileIndex<C, K> {
    fn extend<I: IntoIterator<Item = Tile<C, K>>>(&mut self, iter: I) {
        for tile in iter {
            self.insert(tile);
        }
    }
}
