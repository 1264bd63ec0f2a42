//! Safari zone map data.
//!
//! One handcrafted 28x22 area: a tree ring around open grass, tall-grass
//! patches where encounters happen, a pond with a bridge, and paths
//! connecting the clearings.

use super::{TileKind, TileMap};

pub const SAFARI_ZONE_WIDTH: usize = 28;
pub const SAFARI_ZONE_HEIGHT: usize = 22;

pub fn generate_safari_zone() -> TileMap {
    let w = SAFARI_ZONE_WIDTH;
    let h = SAFARI_ZONE_HEIGHT;
    let mut tiles = vec![TileKind::Grass; w * h];

    let fill_rect =
        |tiles: &mut Vec<TileKind>, col0: usize, row0: usize, rw: usize, rh: usize, kind: TileKind| {
            for dr in 0..rh {
                for dc in 0..rw {
                    let cc = col0 + dc;
                    let rr = row0 + dr;
                    if cc < w && rr < h {
                        tiles[rr * w + cc] = kind;
                    }
                }
            }
        };

    // Tree ring sealing the zone
    fill_rect(&mut tiles, 0, 0, w, 1, TileKind::Tree);
    fill_rect(&mut tiles, 0, h - 1, w, 1, TileKind::Tree);
    fill_rect(&mut tiles, 0, 0, 1, h, TileKind::Tree);
    fill_rect(&mut tiles, w - 1, 0, 1, h, TileKind::Tree);

    // Entrance clearing with the warden's fence (top-left quadrant)
    fill_rect(&mut tiles, 4, 3, 9, 2, TileKind::Path);
    fill_rect(&mut tiles, 4, 5, 2, 6, TileKind::Path);
    fill_rect(&mut tiles, 2, 2, 2, 1, TileKind::Fence);
    fill_rect(&mut tiles, 13, 2, 3, 1, TileKind::Fence);

    // Tall grass fields: one near the entrance, two deeper in
    fill_rect(&mut tiles, 8, 6, 6, 4, TileKind::TallGrass);
    fill_rect(&mut tiles, 3, 13, 7, 5, TileKind::TallGrass);
    fill_rect(&mut tiles, 20, 14, 6, 6, TileKind::TallGrass);

    // Pond (right side) ringed with sand, crossed by a bridge
    fill_rect(&mut tiles, 16, 7, 9, 6, TileKind::Sand);
    fill_rect(&mut tiles, 17, 8, 7, 4, TileKind::Water);
    fill_rect(&mut tiles, 20, 8, 1, 4, TileKind::WaterBridge);

    // Path from the entrance down toward the southern fields
    fill_rect(&mut tiles, 4, 11, 10, 2, TileKind::Path);
    fill_rect(&mut tiles, 12, 13, 2, 6, TileKind::Path);

    // Scattered boulders in the open grass
    for &(col, row) in &[(15usize, 4usize), (6, 19), (18, 18), (25, 5), (10, 18)] {
        tiles[row * w + col] = TileKind::Boulder;
    }

    // Tree clumps breaking up the interior
    fill_rect(&mut tiles, 16, 2, 2, 3, TileKind::Tree);
    fill_rect(&mut tiles, 2, 8, 2, 2, TileKind::Tree);
    fill_rect(&mut tiles, 24, 10, 3, 2, TileKind::Tree);

    // Keep the start tile clear regardless of layout edits above
    tiles[6 * w + 8] = TileKind::Grass;

    TileMap::new(w, h, tiles)
}
