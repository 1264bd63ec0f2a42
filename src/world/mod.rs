//! World domain plugin for Pokemon Safari.
//!
//! Responsible for:
//! - Holding the safari zone tile grid and answering walkability and
//!   encounter-eligibility queries
//! - Spawning the tile sprites once the overworld is entered
//!
//! The grid is the single authority on terrain. Everything else asks it
//! through `TileMap::tile_at`, which returns a safe default for coordinates
//! outside the map.

use bevy::prelude::*;

use crate::shared::*;

pub mod maps;

use maps::generate_safari_zone;

// ═══════════════════════════════════════════════════════════════════════
// PLUGIN
// ═══════════════════════════════════════════════════════════════════════

pub struct WorldPlugin;

impl Plugin for WorldPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<TileMap>()
            .init_resource::<TileSheet>()
            // The overworld is re-entered after every battle; tiles are
            // spawned only the first time.
            .add_systems(OnEnter(GameState::Overworld), spawn_map_tiles);
    }
}

// ═══════════════════════════════════════════════════════════════════════
// TILES
// ═══════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TileKind {
    Grass,
    TallGrass,
    Tree,
    Path,
    Sand,
    Boulder,
    Water,
    Fence,
    WaterBridge,
}

impl TileKind {
    /// Cell index in the tile sheet. The sheet is 3 columns wide, so the
    /// drawn cell is `(id % 3, id / 3)`.
    pub fn visual_id(self) -> usize {
        match self {
            TileKind::Grass => 0,
            TileKind::TallGrass => 1,
            TileKind::Tree => 2,
            TileKind::Path => 3,
            TileKind::Sand => 4,
            TileKind::Boulder => 5,
            TileKind::Water => 6,
            TileKind::Fence => 7,
            TileKind::WaterBridge => 8,
        }
    }

    pub fn walkable(self) -> bool {
        !matches!(
            self,
            TileKind::Tree | TileKind::Boulder | TileKind::Water | TileKind::Fence
        )
    }

    /// Only tall grass hides wild creatures.
    pub fn encounter_eligible(self) -> bool {
        matches!(self, TileKind::TallGrass)
    }

    pub fn descriptor(self) -> TileDescriptor {
        TileDescriptor {
            visual_id: self.visual_id(),
            walkable: self.walkable(),
            encounter_eligible: self.encounter_eligible(),
        }
    }
}

/// Immutable per-tile answer to the two questions movement and encounters
/// ask. `Copy`, never mutated after the map is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileDescriptor {
    pub visual_id: usize,
    pub walkable: bool,
    pub encounter_eligible: bool,
}

/// What `tile_at` hands back for coordinates outside the map: drawn as a
/// tree, never walkable, never an encounter.
pub const OUT_OF_BOUNDS_TILE: TileDescriptor = TileDescriptor {
    visual_id: 2,
    walkable: false,
    encounter_eligible: false,
};

/// Column and row in the 3-column tile sheet for a visual id.
pub fn sheet_cell(visual_id: usize) -> (usize, usize) {
    (visual_id % 3, visual_id / 3)
}

// ═══════════════════════════════════════════════════════════════════════
// RESOURCES
// ═══════════════════════════════════════════════════════════════════════

/// The loaded safari zone grid. Row-major, row 0 at the top.
#[derive(Resource, Debug, Clone)]
pub struct TileMap {
    pub width: usize,
    pub height: usize,
    tiles: Vec<TileKind>,
}

impl Default for TileMap {
    fn default() -> Self {
        generate_safari_zone()
    }
}

impl TileMap {
    pub fn new(width: usize, height: usize, tiles: Vec<TileKind>) -> Self {
        debug_assert_eq!(tiles.len(), width * height);
        Self {
            width,
            height,
            tiles,
        }
    }

    /// Descriptor for the tile at (row, col). Out-of-range coordinates get
    /// the safe default instead of an error.
    pub fn tile_at(&self, row: i32, col: i32) -> TileDescriptor {
        self.kind_at(row, col)
            .map(TileKind::descriptor)
            .unwrap_or(OUT_OF_BOUNDS_TILE)
    }

    pub fn kind_at(&self, row: i32, col: i32) -> Option<TileKind> {
        if row < 0 || col < 0 || row >= self.height as i32 || col >= self.width as i32 {
            None
        } else {
            Some(self.tiles[row as usize * self.width + col as usize])
        }
    }

    pub fn is_walkable(&self, pos: GridPosition) -> bool {
        self.tile_at(pos.row, pos.col).walkable
    }
}

/// Tile sheet handles, loaded lazily the first time tiles are spawned.
#[derive(Resource, Default)]
pub struct TileSheet {
    pub image: Handle<Image>,
    pub layout: Handle<TextureAtlasLayout>,
}

// ═══════════════════════════════════════════════════════════════════════
// COMPONENTS
// ═══════════════════════════════════════════════════════════════════════

/// Marker component for tile sprite entities.
#[derive(Component, Debug)]
pub struct MapTile;

// ═══════════════════════════════════════════════════════════════════════
// SPAWNING
// ═══════════════════════════════════════════════════════════════════════

/// World translation of a grid cell's center. Rows grow southward, so the
/// y axis is negated.
pub fn grid_to_world(row: i32, col: i32) -> Vec3 {
    Vec3::new(col as f32 * TILE_SIZE, -(row as f32) * TILE_SIZE, 0.0)
}

/// Spawn one sprite per tile. The atlas layout is a 3-column grid, so the
/// atlas index is the visual id itself.
fn spawn_map_tiles(
    mut commands: Commands,
    map: Res<TileMap>,
    mut sheet: ResMut<TileSheet>,
    asset_server: Res<AssetServer>,
    mut layouts: ResMut<Assets<TextureAtlasLayout>>,
    existing: Query<Entity, With<MapTile>>,
) {
    if !existing.is_empty() {
        return;
    }

    if sheet.image == Handle::default() {
        sheet.image = asset_server.load("sprites/tile_sprites.png");
        sheet.layout = layouts.add(TextureAtlasLayout::from_grid(
            UVec2::splat(32),
            3,
            3,
            None,
            None,
        ));
    }

    for row in 0..map.height as i32 {
        for col in 0..map.width as i32 {
            let descriptor = map.tile_at(row, col);
            commands.spawn((
                Sprite {
                    image: sheet.image.clone(),
                    texture_atlas: Some(TextureAtlas {
                        layout: sheet.layout.clone(),
                        index: descriptor.visual_id,
                    }),
                    custom_size: Some(Vec2::splat(TILE_SIZE)),
                    ..default()
                },
                Transform::from_translation(grid_to_world(row, col)),
                MapTile,
            ));
        }
    }

    info!("Spawned {}x{} safari zone", map.width, map.height);
}
