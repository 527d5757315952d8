use glam::Vec2;

use crate::api::TileLayoutApi;
use crate::shape::TileShape;
use crate::types::*;

/// One cell of the tiling plus the caller's payloads.
///
/// Geometry (`frame`, `vertices`, `center`) is derived on demand from the
/// coordinate and the shape of the grid that owns the tile.
#[derive(Clone, Debug, PartialEq)]
pub struct Tile<C, K> {
    coord: TileCoord,
    shape: TileShape,
    /// What occupies the tile (e.g. a material).
    pub content: Option<C>,
    /// Who is touching the tile (e.g. an entity).
    pub contact: Option<K>,
}

impl<C, K> Tile<C, K> {
    /// Empty tile at `coord`.
    pub fn new(coord: TileCoord, shape: TileShape) -> Self {
        Self { coord, shape, content: None, contact: None }
    }

    pub fn with_content(mut self, content: C) -> Self {
        self.content = Some(content);
        self
    }

    pub fn with_contact(mut self, contact: K) -> Self {
        self.contact = Some(contact);
        self
    }

    #[inline]
    pub fn coord(&self) -> TileCoord {
        self.coord
    }

    #[inline]
    pub fn x(&self) -> i32 {
        self.coord.x
    }

    #[inline]
    pub fn y(&self) -> i32 {
        self.coord.y
    }

    #[inline]
    pub fn shape(&self) -> TileShape {
        self.shape
    }

    pub fn frame(&self) -> Rect {
        self.shape.frame(self.coord)
    }

    pub fn vertices(&self) -> Vec<Vec2> {
        self.shape.vertices(self.coord)
    }

    pub fn center(&self) -> Vec2 {
        self.shape.center(self.coord)
    }

    /// True when neither payload slot is set.
    pub fn is_vacant(&self) -> bool {
        self.content.is_none() && self.contact.is_none()
    }

    pub(crate) fn restamp(&mut self, shape: TileShape) {
        self.shape = shape;
    }
}

impl<C, K> std::fmt::Display for Tile<C, K> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Tile{} ({})", self.coord, self.shape.name())
    }
}
