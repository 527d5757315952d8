use ahash::AHashSet;
use glam::Vec2;

use std::time::Instant;

use crate::api::{ContactGridApi, ContactObserver, GeometryApi, TileLayoutApi};
use crate::geometry::Geometry;
use crate::index::TileIndex;
use crate::shape::TileShape;
use crate::tile::Tile;
use crate::types::*;

/// Observer owned by a grid.
pub type BoxedObserver<C, K> = Box<dyn ContactObserver<C, K> + Send + Sync>;

/// Polygon-to-tile contact grid over a lazily populated `TileIndex`.
pub struct ContactGrid<C, K> {
    cfg: GridConfig,
    index: TileIndex<C, K>,
    observer: Option<BoxedObserver<C, K>>,

    // Bookkeeping for the last detect/apply
    last_stats: DetectStats,
    last_timing: Option<DetectTiming>,
}

/// Outcome counters of the resolution step.
#[derive(Default)]
struct Resolved {
    resolved: usize,
    inserted: usize,
    skipped: usize,
    // Observer saw `begin_contacts` for this call
    begun: bool,
}

impl<C, K> ContactGridApi<C, K> for ContactGrid<C, K> {
    fn new(cfg: GridConfig) -> Self {
        let index = TileIndex::new(cfg.shape);
        Self {
            cfg: GridConfig { shape: index.shape(), ..cfg },
            index,
            observer: None,
            last_stats: DetectStats::default(),
            last_timing: None,
        }
    }

    fn detect<F>(&mut self, path: &[Vec2], closed: bool, allow_insert: bool, mut on_contact: F)
    where
        F: FnMut(&mut Tile<C, K>),
    {
        let timed = self.cfg.enable_timing;
        let t_all = if timed { Some(Instant::now()) } else { None };
        let shape = self.index.shape();
        let index = &mut self.index;
        let observer = &mut self.observer;
        let mut stats = DetectStats::default();
        let mut outcome = Resolved::default();
        let mut resolve_ms = 0.0f64;

        let (border_ms, interior_ms) = Self::scan(shape, path, closed, &mut stats, timed, |coord| {
            let t0 = if timed { Some(Instant::now()) } else { None };
            Self::resolve(index, observer, coord, allow_insert, &mut on_contact, &mut outcome);
            if let Some(t0) = t0 {
                resolve_ms += t0.elapsed().as_secs_f64() * 1000.0;
            }
        });

        self.end_batch(&outcome);
        stats.resolved = outcome.resolved;
        stats.inserted = outcome.inserted;
        stats.skipped = outcome.skipped;
        self.last_stats = stats;
        self.last_timing = t_all.map(|t| DetectTiming {
            total_ms: t.elapsed().as_secs_f64() * 1000.0,
            border_ms,
            interior_ms,
            resolve_ms,
        });
        log::debug!(
            "detect: {} vertices, closed={}, {} contacted ({} resolved, {} inserted, {} skipped), {} tiles stored",
            stats.vertices,
            closed,
            stats.contacted,
            stats.resolved,
            stats.inserted,
            stats.skipped,
            self.index.len()
        );
    }

    fn contacts(&self, path: &[Vec2], closed: bool) -> Vec<TileCoord> {
        let mut out = Vec::new();
        let mut stats = DetectStats::default();
        Self::scan(self.index.shape(), path, closed, &mut stats, false, |coord| out.push(coord));
        out
    }

    fn apply<F>(&mut self, coords: &[TileCoord], allow_insert: bool, mut on_contact: F)
    where
        F: FnMut(&mut Tile<C, K>),
    {
        let t_all = if self.cfg.enable_timing { Some(Instant::now()) } else { None };
        let mut seen = AHashSet::with_capacity(coords.len());
        let mut outcome = Resolved::default();
        for &coord in coords {
            if seen.insert(coord) {
                Self::resolve(&mut self.index, &mut self.observer, coord, allow_insert, &mut on_contact, &mut outcome);
            }
        }
        self.end_batch(&outcome);
        self.last_stats = DetectStats {
            contacted: seen.len(),
            resolved: outcome.resolved,
            inserted: outcome.inserted,
            skipped: outcome.skipped,
            ..Default::default()
        };
        self.last_timing = t_all.map(|t| {
            let ms = t.elapsed().as_secs_f64() * 1000.0;
            DetectTiming { total_ms: ms, resolve_ms: ms, ..Default::default() }
        });
    }

    fn remove_where<P>(&mut self, predicate: P)
    where
        P: FnMut(&Tile<C, K>) -> bool,
    {
        self.index.remove_where(predicate);
    }

    fn len(&self) -> usize {
        self.index.len()
    }
}

impl<C, K> ContactGrid<C, K> {
    /// Strip consecutive duplicates; for closed paths also the closing duplicate.
    fn normalize(path: &[Vec2], closed: bool) -> Vec<Vec2> {
        let mut pts: Vec<Vec2> = Vec::with_capacity(path.len());
        for &p in path {
            if pts.last() != Some(&p) {
                pts.push(p);
            }
        }
        if closed {
            while pts.len() > 1 && pts.first() == pts.last() {
                pts.pop();
            }
        }
        pts
    }

    /// Two-phase scan. Calls `visit` once per contacted coordinate, border
    /// tiles as soon as they are found, interior tiles afterwards.
    /// Returns the (border, interior) phase durations in ms when `timed`.
    fn scan<V>(
        shape: TileShape,
        path: &[Vec2],
        closed: bool,
        stats: &mut DetectStats,
        timed: bool,
        mut visit: V,
    ) -> (f64, f64)
    where
        V: FnMut(TileCoord),
    {
        let pts = Self::normalize(path, closed);
        stats.vertices = pts.len();
        let mut contacted: AHashSet<TileCoord> = AHashSet::new();

        match pts.len() {
            0 => return (0.0, 0.0),
            1 => {
                // A lone point contacts the one tile whose shape contains it
                if let Some(coord) = shape.tile_containing(pts[0]) {
                    log::trace!("point contact {}", coord);
                    stats.contacted = 1;
                    visit(coord);
                }
                return (0.0, 0.0);
            }
            _ => {}
        }

        let polygon = closed && pts.len() >= 3;
        let n = pts.len();
        let edge_count = if polygon { n } else { n - 1 };

        // --- Border phase --------------------------------------------------
        let t_border = if timed { Some(Instant::now()) } else { None };
        for i in 0..edge_count {
            let a = pts[i];
            let b = pts[(i + 1) % n];
            for coord in shape.tiles_overlapping(Rect::from_corners(a, b)) {
                stats.border_candidates += 1;
                if contacted.contains(&coord) {
                    continue;
                }
                let Some((ra, rb)) = Geometry::clip_segment_to_rect(a, b, shape.frame(coord)) else {
                    continue;
                };
                if shape.intersects_relative_segment(coord, ra, rb) {
                    log::trace!("border contact {}", coord);
                    contacted.insert(coord);
                    visit(coord);
                }
            }
        }
        let border_ms = t_border.map(|t| t.elapsed().as_secs_f64() * 1000.0).unwrap_or(0.0);

        // --- Interior phase ------------------------------------------------
        let mut interior_ms = 0.0;
        if polygon {
            let t_interior = if timed { Some(Instant::now()) } else { None };
            let bounds = Geometry::bounding_box(&pts);
            for coord in shape.tiles_overlapping(bounds) {
                if contacted.contains(&coord) {
                    continue;
                }
                stats.interior_candidates += 1;
                if Geometry::point_in_polygon(shape.center(coord), &pts) {
                    log::trace!("interior contact {}", coord);
                    contacted.insert(coord);
                    visit(coord);
                }
            }
            interior_ms = t_interior.map(|t| t.elapsed().as_secs_f64() * 1000.0).unwrap_or(0.0);
        }

        stats.contacted = contacted.len();
        (border_ms, interior_ms)
    }

    /// Hand one contacted tile to the callback: stored tiles always, new
    /// tiles only when inserting is allowed.
    fn resolve<F>(
        index: &mut TileIndex<C, K>,
        observer: &mut Option<BoxedObserver<C, K>>,
        coord: TileCoord,
        allow_insert: bool,
        on_contact: &mut F,
        outcome: &mut Resolved,
    ) where
        F: FnMut(&mut Tile<C, K>),
    {
        if let Some(tile) = index.get_mut(coord) {
            on_contact(&mut *tile);
            outcome.resolved += 1;
            Self::notify(observer, outcome, tile);
        } else if allow_insert {
            let mut tile = index.make_tile(coord);
            on_contact(&mut tile);
            outcome.inserted += 1;
            Self::notify(observer, outcome, &tile);
            index.insert(tile);
        } else {
            outcome.skipped += 1;
        }
    }

    fn notify(observer: &mut Option<BoxedObserver<C, K>>, outcome: &mut Resolved, tile: &Tile<C, K>) {
        let Some(obs) = observer.as_deref_mut() else {
            return;
        };
        if !outcome.begun {
            obs.begin_contacts();
            outcome.begun = true;
        }
        obs.contact_resolved(tile);
    }

    fn end_batch(&mut self, outcome: &Resolved) {
        if !outcome.begun {
            return;
        }
        if let Some(obs) = self.observer.as_deref_mut() {
            obs.end_contacts();
        }
    }

    /// Grid backed by an existing index (its shape wins over `cfg.shape`).
    pub fn with_index(cfg: GridConfig, index: TileIndex<C, K>) -> Self {
        Self {
            cfg: GridConfig { shape: index.shape(), ..cfg },
            index,
            observer: None,
            last_stats: DetectStats::default(),
            last_timing: None,
        }
    }

    /// Configuration in effect. `cfg().shape` always equals `shape()`.
    pub fn cfg(&self) -> &GridConfig {
        &self.cfg
    }

    pub fn set_enable_timing(&mut self, enable: bool) {
        self.cfg.enable_timing = enable;
        if !enable {
            self.last_timing = None;
        }
    }

    /// Install `observer`, returning the one it replaces. It is told about
    /// every tile resolved by `detect`/`apply`, bracketed by begin/end calls.
    pub fn set_observer<O>(&mut self, observer: O) -> Option<BoxedObserver<C, K>>
    where
        O: ContactObserver<C, K> + Send + Sync + 'static,
    {
        self.observer.replace(Box::new(observer))
    }

    pub fn take_observer(&mut self) -> Option<BoxedObserver<C, K>> {
        self.observer.take()
    }

    #[inline]
    pub fn shape(&self) -> TileShape {
        self.index.shape()
    }

    pub fn index(&self) -> &TileIndex<C, K> {
        &self.index
    }

    pub fn index_mut(&mut self) -> &mut TileIndex<C, K> {
        &mut self.index
    }

    pub fn into_index(self) -> TileIndex<C, K> {
        self.index
    }

    pub fn get(&self, coord: TileCoord) -> Option<&Tile<C, K>> {
        self.index.get(coord)
    }

    /// Counters for the last `detect`/`apply`.
    pub fn last_stats(&self) -> DetectStats {
        self.last_stats
    }

    /// Timing breakdown for the last `detect`/`apply` (if enabled).
    pub fn timing(&self) -> Option<DetectTiming> {
        self.last_timing
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    type Grid = ContactGrid<&'static str, u32>;

    fn square_grid() -> Grid {
        ContactGrid::new(GridConfig::new(TileShape::square(20.0, 20.0)))
    }

    fn v(x: f32, y: f32) -> Vec2 {
        Vec2::new(x, y)
    }

    fn square_100() -> Vec<Vec2> {
        vec![v(0.0, 0.0), v(100.0, 0.0), v(100.0, 100.0), v(0.0, 100.0)]
    }

    fn sorted(mut coords: Vec<TileCoord>) -> Vec<TileCoord> {
        coords.sort();
        coords
    }

    fn snapshot(grid: &Grid) -> Vec<(TileCoord, Option<&'static str>, Option<u32>)> {
        let mut out: Vec<_> = grid.index().iter().map(|t| (t.coord(), t.content, t.contact)).collect();
        out.sort_by_key(|e| e.0);
        out
    }

    #[test]
    fn test_closed_square_contacts_25_tiles() {
        let mut grid = square_grid();
        let mut seen = Vec::new();
        grid.detect(&square_100(), true, true, |tile| seen.push(tile.coord()));
        let expected: Vec<_> = (0..5).flat_map(|y| (0..5).map(move |x| TileCoord::new(x, y))).collect();
        assert_eq!(sorted(seen), expected);
        assert_eq!(grid.len(), 25);
        let stats = grid.last_stats();
        assert_eq!(stats.contacted, 25);
        assert_eq!(stats.inserted, 25);
        assert_eq!(stats.resolved, 0);
    }

    #[test]
    fn test_closing_duplicate_vertex_is_ignored() {
        let mut grid = square_grid();
        let mut path = square_100();
        path.push(v(0.0, 0.0));
        path.insert(1, v(0.0, 0.0));
        grid.detect(&path, true, true, |_| {});
        assert_eq!(grid.len(), 25);
        assert_eq!(grid.last_stats().vertices, 4);
    }

    #[test]
    fn test_detect_is_idempotent_for_noop_callback() {
        let mut grid = square_grid();
        let poly = [v(-13.0, 4.0), v(57.0, -21.0), v(88.0, 63.0), v(12.0, 71.0)];
        grid.detect(&poly, true, true, |tile| {
            tile.content = Some("dirt");
            tile.contact = Some(tile.x() as u32);
        });
        let first = snapshot(&grid);
        grid.detect(&poly, true, true, |_| {});
        assert_eq!(snapshot(&grid), first);
        assert_eq!(grid.last_stats().inserted, 0);
        assert_eq!(grid.last_stats().resolved, first.len());
    }

    #[test]
    fn test_without_insert_empty_index_stays_empty() {
        let mut grid = square_grid();
        let mut calls = 0;
        grid.detect(&square_100(), true, false, |_| calls += 1);
        assert_eq!(calls, 0);
        assert_eq!(grid.len(), 0);
        assert_eq!(grid.last_stats().skipped, 25);
    }

    #[test]
    fn test_without_insert_updates_existing_tiles_only() {
        let mut grid = square_grid();
        grid.index_mut().insert_at(TileCoord::new(2, 2)).content = Some("gold");
        grid.index_mut().insert_at(TileCoord::new(9, 9)).content = Some("coal");
        let mut seen = Vec::new();
        grid.detect(&square_100(), true, false, |tile| {
            seen.push(tile.coord());
            tile.contact = Some(1);
        });
        assert_eq!(seen, vec![TileCoord::new(2, 2)]);
        assert_eq!(grid.len(), 2);
        assert_eq!(grid.get(TileCoord::new(2, 2)).unwrap().contact, Some(1));
        assert_eq!(grid.get(TileCoord::new(2, 2)).unwrap().content, Some("gold"));
        assert_eq!(grid.get(TileCoord::new(9, 9)).unwrap().contact, None);
    }

    #[test]
    fn test_closed_triangle_reports_centroid_tile_open_path_does_not() {
        let tri = [v(0.0, 0.0), v(200.0, 0.0), v(100.0, 200.0)];
        let centroid = TileCoord::new(5, 3);
        let grid = square_grid();

        let closed = grid.contacts(&tri, true);
        assert!(closed.contains(&centroid));

        let open = grid.contacts(&tri, false);
        assert!(!open.is_empty());
        assert!(!open.contains(&centroid));
        assert!(open.len() < closed.len());
    }

    #[test]
    fn test_each_tile_reported_once() {
        let mut grid = square_grid();
        // Zig-zag path crossing the same tiles several times
        let path = [v(1.0, 1.0), v(39.0, 39.0), v(1.0, 39.0), v(39.0, 1.0), v(1.0, 1.0)];
        let mut seen = Vec::new();
        grid.detect(&path, false, true, |tile| seen.push(tile.coord()));
        let unique: AHashSet<_> = seen.iter().copied().collect();
        assert_eq!(unique.len(), seen.len());
        assert_eq!(sorted(seen), vec![
            TileCoord::new(0, 0),
            TileCoord::new(1, 0),
            TileCoord::new(0, 1),
            TileCoord::new(1, 1),
        ]);
    }

    #[test]
    fn test_degenerate_inputs() {
        let mut grid = square_grid();
        let mut calls = 0;
        grid.detect(&[], true, true, |_| calls += 1);
        assert_eq!(calls, 0);

        // Repeated single point contacts the tile under it
        grid.detect(&[v(-5.0, 30.0), v(-5.0, 30.0), v(-5.0, 30.0)], true, true, |_| calls += 1);
        assert_eq!(calls, 1);
        assert!(grid.get(TileCoord::new(-1, 1)).is_some());

        // Two distinct points on a closed path behave like one segment
        let seg = [v(5.0, 5.0), v(45.0, 5.0)];
        assert_eq!(sorted(grid.contacts(&seg, true)), sorted(grid.contacts(&seg, false)));
        assert_eq!(grid.contacts(&seg, true).len(), 3);
    }

    #[test]
    fn test_open_path_along_grid_line_contacts_nothing() {
        let grid = square_grid();
        assert!(grid.contacts(&[v(0.0, 20.0), v(100.0, 20.0)], false).is_empty());
    }

    #[test]
    fn test_negative_world_coordinates() {
        let grid = square_grid();
        let tiles = grid.contacts(&[v(-25.0, -25.0), v(-21.0, -21.0)], false);
        assert_eq!(tiles, vec![TileCoord::new(-2, -2)]);
    }

    #[test]
    fn test_remove_where_eviction() {
        let mut grid = square_grid();
        for y in -5..=5 {
            grid.index_mut().insert_at(TileCoord::new(0, y));
        }
        grid.remove_where(|tile| tile.y() > 0);
        assert_eq!(grid.len(), 6);
        assert!(grid.index().iter().all(|t| t.y() <= 0));
    }

    #[test]
    fn test_contacts_then_apply_matches_detect() {
        let poly = [v(3.0, 3.0), v(77.0, 12.0), v(41.0, 66.0)];
        let mut a = square_grid();
        a.detect(&poly, true, true, |tile| tile.content = Some("x"));

        let mut b = square_grid();
        let coords = b.contacts(&poly, true);
        assert!(b.is_empty());
        let mut doubled = coords.clone();
        doubled.extend(coords.iter().copied());
        b.apply(&doubled, true, |tile| tile.content = Some("x"));

        assert_eq!(snapshot(&a), snapshot(&b));
        assert_eq!(b.last_stats().contacted, coords.len());
        assert_eq!(b.last_stats().inserted, coords.len());
    }

    #[test]
    fn test_rotated_square_point_contact() {
        let grid: Grid = ContactGrid::new(GridConfig::new(TileShape::rotated_square(20.0, 20.0)));
        assert_eq!(grid.contacts(&[v(10.0, 10.0)], false), vec![TileCoord::new(0, 0)]);
        // Between the diamonds of row 0 lies a diamond of row 1
        assert_eq!(grid.contacts(&[v(20.0, 19.0)], false), vec![TileCoord::new(0, 1)]);
    }

    #[test]
    fn test_point_on_tile_edge_contacts_one_tile() {
        let mut grid = square_grid();
        assert_eq!(grid.contacts(&[v(0.0, 0.0)], false), vec![TileCoord::new(0, 0)]);
        assert_eq!(grid.contacts(&[v(20.0, 5.0)], false), vec![TileCoord::new(1, 0)]);
        assert_eq!(grid.contacts(&[v(25.0, 5.0)], false), vec![TileCoord::new(1, 0)]);

        let mut calls = 0;
        grid.detect(&[v(40.0, 40.0)], false, true, |_| calls += 1);
        assert_eq!(calls, 1);
        assert_eq!(grid.len(), 1);
        assert!(grid.get(TileCoord::new(2, 2)).is_some());
    }

    #[test]
    fn test_point_on_diamond_vertex_contacts_one_tile() {
        let grid: Grid = ContactGrid::new(GridConfig::new(TileShape::rotated_square(20.0, 20.0)));
        let tiles = grid.contacts(&[v(10.0, 20.0)], false);
        assert_eq!(tiles.len(), 1);
        assert!(grid.shape().vertices(tiles[0]).contains(&v(10.0, 20.0)));
    }

    #[test]
    fn test_hexagon_small_polygon_stays_in_one_tile() {
        let grid: Grid = ContactGrid::new(GridConfig::new(TileShape::hexagon(20.0, 20.0, 10.0)));
        let poly = [v(8.0, 8.0), v(12.0, 8.0), v(12.0, 12.0), v(8.0, 12.0)];
        assert_eq!(grid.contacts(&poly, true), vec![TileCoord::new(0, 0)]);
    }

    #[test]
    fn test_hexagon_corner_segment_goes_to_neighbour() {
        let grid: Grid = ContactGrid::new(GridConfig::new(TileShape::hexagon(20.0, 20.0, 10.0)));
        // Inside the frame of (0,0) but outside its hexagon
        let tiles = grid.contacts(&[v(0.5, 1.0), v(1.5, 0.5)], false);
        assert_eq!(tiles, vec![TileCoord::new(-1, -1)]);
    }

    #[test]
    fn test_triangle_corner_segment_goes_to_neighbour() {
        let grid: Grid = ContactGrid::new(GridConfig::new(TileShape::triangle(20.0, 20.0)));
        let tiles = grid.contacts(&[v(1.0, 18.0), v(2.0, 19.0)], false);
        assert_eq!(tiles, vec![TileCoord::new(-1, 0)]);
    }

    #[test]
    fn test_interleaved_polygon_contacts_cover_centers_inside() {
        let poly = [v(-35.0, -20.0), v(70.0, -10.0), v(55.0, 60.0), v(-10.0, 45.0)];
        for shape in [
            TileShape::rotated_square(20.0, 20.0),
            TileShape::triangle(20.0, 20.0),
            TileShape::hexagon(20.0, 20.0, 10.0),
        ] {
            let grid: Grid = ContactGrid::new(GridConfig::new(shape));
            let found: AHashSet<_> = grid.contacts(&poly, true).into_iter().collect();
            for coord in shape.tiles_overlapping(Geometry::bounding_box(&poly)) {
                if Geometry::point_in_polygon(shape.center(coord), &poly) {
                    assert!(found.contains(&coord), "{} missed {}", shape.name(), coord);
                }
            }
        }
    }

    #[test]
    fn test_timing_recorded_when_enabled() {
        let mut grid: Grid = ContactGrid::new(GridConfig { enable_timing: true, ..Default::default() });
        assert!(grid.timing().is_none());
        grid.detect(&square_100(), true, true, |_| {});
        let timing = grid.timing().unwrap();
        assert!(timing.total_ms >= 0.0);
        assert!(timing.total_ms + 1e-9 >= timing.border_ms);
    }

    #[test]
    fn test_new_clamps_configured_shape() {
        let grid: Grid = ContactGrid::new(GridConfig::new(TileShape::Hexagon {
            width: 10.0,
            height: 0.5,
            horizontal_length: 40.0,
        }));
        assert_eq!(grid.cfg().shape, TileShape::Hexagon { width: 10.0, height: 1.0, horizontal_length: 10.0 });
        assert_eq!(grid.shape(), grid.cfg().shape);
    }

    struct Recorder(Arc<Mutex<Vec<String>>>);

    impl ContactObserver<&'static str, u32> for Recorder {
        fn begin_contacts(&mut self) {
            self.0.lock().unwrap().push("begin".to_string());
        }

        fn contact_resolved(&mut self, tile: &Tile<&'static str, u32>) {
            self.0.lock().unwrap().push(format!("{} {:?}", tile.coord(), tile.content));
        }

        fn end_contacts(&mut self) {
            self.0.lock().unwrap().push("end".to_string());
        }
    }

    #[test]
    fn test_observer_brackets_each_call() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut grid = square_grid();
        assert!(grid.set_observer(Recorder(log.clone())).is_none());

        grid.detect(&square_100(), true, true, |tile| tile.content = Some("dug"));
        {
            let entries = log.lock().unwrap();
            assert_eq!(entries.len(), 27);
            assert_eq!(entries.first().map(String::as_str), Some("begin"));
            assert_eq!(entries.last().map(String::as_str), Some("end"));
            assert_eq!(entries.iter().filter(|e| *e == "begin").count(), 1);
            assert_eq!(entries.iter().filter(|e| *e == "end").count(), 1);
            // The callback has already run when the observer sees a tile
            assert!(entries[1..26].iter().all(|e| e.ends_with("Some(\"dug\")")));
        }

        // Nothing resolved: no begin/end either
        log.lock().unwrap().clear();
        grid.detect(&[v(505.0, 510.0), v(545.0, 510.0)], false, false, |_| {});
        assert_eq!(grid.last_stats().skipped, 3);
        assert!(log.lock().unwrap().is_empty());

        grid.apply(&[TileCoord::new(0, 0), TileCoord::new(0, 0), TileCoord::new(7, 7)], false, |_| {});
        assert_eq!(*log.lock().unwrap(), vec![
            "begin".to_string(),
            "{x: 0, y: 0} Some(\"dug\")".to_string(),
            "end".to_string(),
        ]);

        assert!(grid.take_observer().is_some());
        log.lock().unwrap().clear();
        grid.detect(&square_100(), true, true, |_| {});
        assert!(log.lock().unwrap().is_empty());
    }

    #[test]
    fn test_disabling_timing_clears_last_timing() {
        let mut grid = square_grid();
        grid.set_enable_timing(true);
        grid.detect(&square_100(), true, true, |_| {});
        assert!(grid.timing().is_some());
        grid.set_enable_timing(false);
        assert!(!grid.cfg().enable_timing);
        assert!(grid.timing().is_none());
        grid.detect(&square_100(), true, true, |_| {});
        assert!(grid.timing().is_none());
    }
}
