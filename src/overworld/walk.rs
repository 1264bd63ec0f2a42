//! Walk animation: one tile per animation, 20 frames, commit at the end.
//!
//! While a `WalkAnimation` exists the logical player position has NOT
//! moved. Position, camera, and step budget all change together in the
//! single commit frame, so observers never see them disagree.

use bevy::prelude::*;

use crate::data::PokemonRegistry;
use crate::shared::*;
use crate::world::TileMap;

use super::encounter::roll_wild_encounter;

/// Sprite sheet column for a walk frame count: idle feet, left foot for
/// the first half of the stride, right foot for the second.
pub fn walk_sprite_column(frames: u32) -> usize {
    match frames {
        0 => 0,
        1..=10 => 1,
        _ => 2,
    }
}

/// Atlas index in the 3-column trainer sheet.
pub fn sprite_index(facing: Facing, column: usize) -> usize {
    facing.sprite_row() * 3 + column
}

/// Advances the active walk by one frame and commits it on the last one.
///
/// Commit order is fixed: position, then camera, then step budget, then
/// the encounter roll. An encounter preempts the end-of-steps check; the
/// budget is re-checked when walking resumes after the battle.
pub fn advance_walk_animation(
    mut overworld: ResMut<OverworldState>,
    mut player: ResMut<PlayerState>,
    map: Res<TileMap>,
    registry: Res<PokemonRegistry>,
    mut rng: ResMut<SafariRng>,
    mut pending: ResMut<PendingEncounter>,
    mut fade_out: EventWriter<FadeOutRequest>,
) {
    let Some(mut walk) = overworld.walk else {
        return;
    };

    walk.frames += 1;
    if walk.frames < WALK_FRAMES {
        overworld.walk = Some(walk);
        return;
    }

    // Commit frame.
    player.position = player.position.shifted(walk.facing);
    overworld.camera = CameraOffset::for_position(player.position);
    player.spend_step();
    overworld.walk = None;

    let tile = map.tile_at(player.position.row, player.position.col);
    if let Some(pokemon) = roll_wild_encounter(&mut rng, &registry, tile) {
        info!("A wild {} appeared!", pokemon.name);
        pending.0 = Some(pokemon);
        overworld.mode = OverworldMode::Transitioning;
        fade_out.send(FadeOutRequest {
            to: SceneTarget::Battle,
        });
    } else if player.steps_remaining == 0 {
        info!("Out of steps, the safari is over");
        overworld.mode = OverworldMode::Transitioning;
        fade_out.send(FadeOutRequest {
            to: SceneTarget::GameOver,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stride_phases_switch_at_the_half_and_end() {
        assert_eq!(walk_sprite_column(0), 0);
        assert_eq!(walk_sprite_column(1), 1);
        assert_eq!(walk_sprite_column(10), 1);
        assert_eq!(walk_sprite_column(11), 2);
        assert_eq!(walk_sprite_column(20), 2);
    }

    #[test]
    fn sprite_index_uses_three_columns_per_facing() {
        assert_eq!(sprite_index(Facing::North, 0), 0);
        assert_eq!(sprite_index(Facing::West, 1), 4);
        assert_eq!(sprite_index(Facing::South, 2), 8);
        assert_eq!(sprite_index(Facing::East, 0), 9);
    }

    #[test]
    fn fraction_reaches_exactly_one_at_the_last_frame() {
        let mut walk = WalkAnimation::start(Facing::North, CameraOffset { row: 0, col: 0 });
        assert_eq!(walk.fraction(), 0.0);
        walk.frames = WALK_FRAMES / 2;
        assert_eq!(walk.fraction(), 0.5);
        walk.frames = WALK_FRAMES;
        assert_eq!(walk.fraction(), 1.0);
    }
}
