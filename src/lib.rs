//! tilecontact: polygon-to-tile contact detection over an infinite, lazily populated tiling

pub mod types;
pub mod api;
pub mod geometry;
pub mod shape;
pub mod tile;
pub mod index;
pub mod grid;

pub use crate::types::*;
pub use crate::api::*;
pub use crate::geometry::Geometry;
pub use crate::shape::TileShape;
pub use crate::tile::Tile;
pub use crate::index::TileIndex;
pub use crate::grid::{BoxedObserver, ContactGrid};
