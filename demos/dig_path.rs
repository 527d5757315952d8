use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use glam::Vec2;
use tilecontact::*;

#[derive(Copy, Clone, Debug, PartialEq)]
enum Material {
    Dirt,
    Rock,
}

const PLAYER: u32 = 1;

/// Counts the dirt under the drill during one dig and banks it once the dig ends.
struct Haul {
    pending: usize,
    banked: Arc<AtomicUsize>,
}

impl ContactObserver<Material, u32> for Haul {
    fn begin_contacts(&mut self) {
        self.pending = 0;
    }

    fn contact_resolved(&mut self, tile: &Tile<Material, u32>) {
        if tile.content == Some(Material::Dirt) {
            self.pending += 1;
        }
    }

    fn end_contacts(&mut self) {
        self.banked.fetch_add(self.pending, Ordering::Relaxed);
    }
}

fn outline(center: Vec2, half: f32) -> [Vec2; 4] {
    [
        center + Vec2::new(-half, -half),
        center + Vec2::new(half, -half),
        center + Vec2::new(half, half),
        center + Vec2::new(-half, half),
    ]
}

fn main() {
    env_logger::init();

    let mut grid: ContactGrid<Material, u32> = ContactGrid::new(GridConfig {
        shape: TileShape::hexagon(16.0, 16.0, 8.0),
        enable_timing: true,
    });

    // A slab of rock the drill cannot break, placed across its way down
    let rock = [
        Vec2::new(-60.0, -420.0),
        Vec2::new(90.0, -400.0),
        Vec2::new(70.0, -380.0),
        Vec2::new(-50.0, -390.0),
    ];
    grid.detect(&rock, true, true, |tile| tile.content = Some(Material::Rock));
    println!("rock placed: {} tiles", grid.len());

    let swept = Arc::new(AtomicUsize::new(0));
    grid.set_observer(Haul { pending: 0, banked: swept.clone() });

    let view_height = 240.0;
    let mut pos = Vec2::new(0.0, 0.0);
    let mut dug = 0usize;
    let mut blocked = 0usize;
    let mut trail: Vec<Vec2> = vec![pos];

    for tick in 0..600 {
        let step = Vec2::new((tick as f32 * 0.05).sin() * 2.0, -1.5);
        pos += step;
        trail.push(pos);

        grid.detect(&outline(pos, 6.0), true, true, |tile| {
            if tile.contact.is_some() {
                return;
            }
            match tile.content {
                Some(Material::Rock) => blocked += 1,
                _ => {
                    tile.content = Some(Material::Dirt);
                    tile.contact = Some(PLAYER);
                    dug += 1;
                }
            }
        });

        // Keep only the last few footprint steps as an open path
        if trail.len() > 8 {
            trail.remove(0);
        }
        let touched = grid.contacts(&trail, false).len();

        // Forget everything scrolled out above the camera
        let camera_top = pos.y + view_height * 0.5;
        grid.remove_where(|tile| tile.center().y > camera_top);

        if tick % 100 == 0 {
            let s = grid.last_stats();
            let t = grid.timing().unwrap_or_default();
            println!(
                "tick={} pos=({:.1},{:.1}) stored={} dug={} blocked={} trail_tiles={} swept={} last: contacted={} inserted={} total={:.3}ms border={:.3}ms interior={:.3}ms",
                tick, pos.x, pos.y, grid.len(), dug, blocked, touched, swept.load(Ordering::Relaxed), s.contacted, s.inserted, t.total_ms, t.border_ms, t.interior_ms
            );
        }
    }
}
