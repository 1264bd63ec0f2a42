//! Camera and trainer sprite sync.
//!
//! The trainer sits at the center of the 11x9 viewport, so the camera and
//! the sprite share one world translation. During a walk that translation
//! interpolates from the still-uncommitted position toward the target tile
//! by the animation fraction; everything else on screen stays put, which
//! reads as the map scrolling under the player.

use bevy::prelude::*;

use crate::shared::*;
use crate::world::grid_to_world;

use super::walk::{sprite_index, walk_sprite_column};
use super::PlayerSprite;

/// World-space point the viewport is centered on this frame.
pub fn render_translation(overworld: &OverworldState, pos: GridPosition) -> Vec3 {
    let from = grid_to_world(pos.row, pos.col);
    match overworld.walk {
        Some(walk) => {
            let target = pos.shifted(walk.facing);
            from.lerp(grid_to_world(target.row, target.col), walk.fraction())
        }
        None => from,
    }
}

pub fn sync_camera(
    overworld: Res<OverworldState>,
    player: Res<PlayerState>,
    mut query: Query<&mut Transform, With<Camera2d>>,
) {
    let Ok(mut transform) = query.get_single_mut() else {
        return;
    };
    let target = render_translation(&overworld, player.position);
    transform.translation.x = target.x;
    transform.translation.y = target.y;
}

pub fn update_player_sprite(
    overworld: Res<OverworldState>,
    player: Res<PlayerState>,
    mut query: Query<(&mut Transform, &mut Sprite), With<PlayerSprite>>,
) {
    let Ok((mut transform, mut sprite)) = query.get_single_mut() else {
        return;
    };

    let target = render_translation(&overworld, player.position);
    transform.translation.x = target.x;
    transform.translation.y = target.y;

    let frames = overworld.walk.map_or(0, |walk| walk.frames);
    if let Some(atlas) = &mut sprite.texture_atlas {
        atlas.index = sprite_index(overworld.facing, walk_sprite_column(frames));
    }
}
