//! Shared components, resources, events, and states for Pokemon Safari.
//!
//! This is the type contract. Every domain plugin imports from here.
//! No domain imports from any other domain directly.

use bevy::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};

// ═══════════════════════════════════════════════════════════════════════
// GAME STATE — top-level state machine
// ═══════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, States, Default)]
pub enum GameState {
    #[default]
    Loading,
    Overworld,
    Battle,
    Collection,
    GameOver,
}

// ═══════════════════════════════════════════════════════════════════════
// GRID GEOMETRY
// ═══════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Facing {
    North,
    South,
    East,
    West,
}

impl Default for Facing {
    fn default() -> Self {
        Facing::South
    }
}

impl Facing {
    /// Grid delta as (row, col). Rows grow southward.
    pub fn delta(self) -> (i32, i32) {
        match self {
            Facing::North => (-1, 0),
            Facing::South => (1, 0),
            Facing::East => (0, 1),
            Facing::West => (0, -1),
        }
    }

    /// Row in the trainer sprite sheet (3 columns per row).
    pub fn sprite_row(self) -> usize {
        match self {
            Facing::North => 0,
            Facing::West => 1,
            Facing::South => 2,
            Facing::East => 3,
        }
    }
}

/// Discrete location on the tile grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridPosition {
    pub row: i32,
    pub col: i32,
}

impl GridPosition {
    pub fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    pub fn shifted(self, facing: Facing) -> Self {
        let (dr, dc) = facing.delta();
        Self {
            row: self.row + dr,
            col: self.col + dc,
        }
    }
}

/// Top-left grid coordinate of the visible window.
///
/// Invariant: `camera = player_position - (PLAYER_ROW_OFFSET, PLAYER_COL_OFFSET)`,
/// recomputed whenever the player's position commits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CameraOffset {
    pub row: i32,
    pub col: i32,
}

impl CameraOffset {
    pub fn for_position(pos: GridPosition) -> Self {
        Self {
            row: pos.row - PLAYER_ROW_OFFSET,
            col: pos.col - PLAYER_COL_OFFSET,
        }
    }

    pub fn shifted(self, facing: Facing) -> Self {
        let (dr, dc) = facing.delta();
        Self {
            row: self.row + dr,
            col: self.col + dc,
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════
// POKEMON
// ═══════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rarity {
    Common,
    Uncommon,
    Rare,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Pokemon {
    pub name: String,
    pub max_hp: u32,
    /// Chance in [0,100) that a thrown safari ball catches it.
    pub catch_percent: u32,
    /// Chance in [0,100) that it flees after a failed throw.
    pub flee_percent: u32,
    /// Turn cap: the battle ends after this many throws.
    pub max_duration: u32,
    pub rarity: Rarity,
}

// ═══════════════════════════════════════════════════════════════════════
// PLAYER
// ═══════════════════════════════════════════════════════════════════════

/// The player for one safari session. Position and steps are mutated only
/// by the overworld orchestrator when a walk animation commits.
#[derive(Resource, Debug, Clone)]
pub struct PlayerState {
    pub steps_remaining: u32,
    pub safari_balls: u32,
    pub position: GridPosition,
    /// Capture order is preserved for the collection screen.
    pub caught: Vec<Pokemon>,
}

impl Default for PlayerState {
    fn default() -> Self {
        Self {
            steps_remaining: INITIAL_STEPS_REMAINING,
            safari_balls: INITIAL_NUM_SAFARI_BALLS,
            position: PLAYER_START,
            caught: Vec::new(),
        }
    }
}

impl PlayerState {
    /// Decrement the step budget, clamped at zero.
    pub fn spend_step(&mut self) {
        self.steps_remaining = self.steps_remaining.saturating_sub(1);
    }

    /// Decrement the ball count, clamped at zero.
    pub fn spend_ball(&mut self) {
        self.safari_balls = self.safari_balls.saturating_sub(1);
    }
}

// ═══════════════════════════════════════════════════════════════════════
// OVERWORLD STATE — owned scene state, not ambient fields
// ═══════════════════════════════════════════════════════════════════════

/// Which intent-handling and rendering path is active. Exactly one at a
/// time; only the overworld orchestrator switches it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OverworldMode {
    #[default]
    Walking,
    MenuOpen,
    Transitioning,
}

/// Transient progress of the single active walk animation. Destroyed on
/// commit; at most one exists at a time.
#[derive(Debug, Clone, Copy)]
pub struct WalkAnimation {
    pub facing: Facing,
    /// Elapsed frame count, 1-based once stepping starts.
    pub frames: u32,
    /// Camera offset captured at animation start. Rendering uses this
    /// snapshot for the whole animation; the logical camera commits at the
    /// end together with the player position.
    pub camera_snapshot: CameraOffset,
}

impl WalkAnimation {
    pub fn start(facing: Facing, camera: CameraOffset) -> Self {
        Self {
            facing,
            frames: 0,
            camera_snapshot: camera,
        }
    }

    /// Fraction of a tile travelled, in [0, 1]. Derived from the frame
    /// counter so 20 frames land on exactly 1.0.
    pub fn fraction(&self) -> f32 {
        (self.frames as f32 * WALK_FRAME_STEP).min(1.0)
    }
}

#[derive(Resource, Debug, Clone)]
pub struct OverworldState {
    pub mode: OverworldMode,
    pub facing: Facing,
    pub camera: CameraOffset,
    pub walk: Option<WalkAnimation>,
}

impl Default for OverworldState {
    fn default() -> Self {
        Self {
            mode: OverworldMode::Walking,
            facing: Facing::South,
            camera: CameraOffset::for_position(PLAYER_START),
            walk: None,
        }
    }
}

impl OverworldState {
    /// True while an animation must run to completion uninterrupted.
    pub fn input_locked(&self) -> bool {
        self.walk.is_some() || self.mode == OverworldMode::Transitioning
    }
}

// ═══════════════════════════════════════════════════════════════════════
// INPUT — hardware keys become discrete intents exactly once per press
// ═══════════════════════════════════════════════════════════════════════

#[derive(Resource, Debug, Clone)]
pub struct KeyBindings {
    pub move_up: KeyCode,
    pub move_down: KeyCode,
    pub move_left: KeyCode,
    pub move_right: KeyCode,
    pub confirm: KeyCode,
    pub menu_toggle: KeyCode,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            move_up: KeyCode::KeyW,
            move_down: KeyCode::KeyS,
            move_left: KeyCode::KeyA,
            move_right: KeyCode::KeyD,
            confirm: KeyCode::Space,
            menu_toggle: KeyCode::Enter,
        }
    }
}

/// Which intent set the mapper produces this frame.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputContext {
    #[default]
    Disabled,
    Walking,
    Menu,
}

/// Discrete intents for the current frame. Reset every `PreUpdate`.
#[derive(Resource, Debug, Clone, Default)]
pub struct PlayerIntent {
    pub move_dir: Option<Facing>,
    pub menu_toggle: bool,
    pub ui_up: bool,
    pub ui_down: bool,
    pub ui_confirm: bool,
    pub ui_cancel: bool,
}

// ═══════════════════════════════════════════════════════════════════════
// RANDOMNESS — injected so encounter and battle logic is testable
// ═══════════════════════════════════════════════════════════════════════

/// Single random source for encounter, rarity, and battle rolls. Boxed so
/// tests can substitute a `StepRng` or a seeded `StdRng`.
#[derive(Resource)]
pub struct SafariRng(pub Box<dyn RngCore + Send + Sync>);

impl Default for SafariRng {
    fn default() -> Self {
        Self(Box::new(StdRng::from_entropy()))
    }
}

impl SafariRng {
    /// Uniform draw in [0, 100).
    pub fn percent_roll(&mut self) -> u32 {
        self.0.gen_range(0..100)
    }
}

// ═══════════════════════════════════════════════════════════════════════
// SCENE HANDOFF — cross-domain communication
// ═══════════════════════════════════════════════════════════════════════

/// Where a completed fade-out hands control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneTarget {
    Battle,
    Collection,
    GameOver,
}

/// Which overworld mode a completed fade-in resumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResumeMode {
    Walking,
    MenuOpen,
}

/// Ask the transition controller to fade the screen to black, then switch
/// to the target scene.
#[derive(Event, Debug, Clone)]
pub struct FadeOutRequest {
    pub to: SceneTarget,
}

/// Ask the transition controller to fade in from black. `resume` is set
/// when the overworld should re-enable a mode once the screen is clear.
#[derive(Event, Debug, Clone)]
pub struct FadeInRequest {
    pub resume: Option<ResumeMode>,
}

/// Fired by the transition controller when a fade-in reaches full
/// brightness.
#[derive(Event, Debug, Clone)]
pub struct FadeClearedEvent {
    pub resume: Option<ResumeMode>,
}

/// Which scene the overworld is being re-entered from, so it can pick the
/// right fade-in path (battle resumes walking, collection resumes the menu).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneOrigin {
    Battle,
    Collection,
}

#[derive(Resource, Debug, Clone, Copy, Default)]
pub struct ReturnContext {
    pub from: Option<SceneOrigin>,
}

/// The creature the next battle is constructed with. Set by the encounter
/// resolver right before the fade-out to Battle.
#[derive(Resource, Debug, Clone, Default)]
pub struct PendingEncounter(pub Option<Pokemon>);

// ═══════════════════════════════════════════════════════════════════════
// CONSTANTS
// ═══════════════════════════════════════════════════════════════════════

pub const TILE_SIZE: f32 = 64.0;

/// Fixed visible window, in tiles.
pub const VIEW_COLS: i32 = 11;
pub const VIEW_ROWS: i32 = 9;

/// The player rests at this offset inside the viewport.
pub const PLAYER_COL_OFFSET: i32 = 5;
pub const PLAYER_ROW_OFFSET: i32 = 4;

pub const SCREEN_WIDTH: f32 = VIEW_COLS as f32 * TILE_SIZE;
pub const SCREEN_HEIGHT: f32 = VIEW_ROWS as f32 * TILE_SIZE;

/// Tile fraction advanced per frame while walking; 20 frames per tile.
pub const WALK_FRAME_STEP: f32 = 0.05;
pub const WALK_FRAMES: u32 = 20;

/// Brightness change per frame while fading; 25 frames per full half.
pub const FADE_STEP: f32 = 0.04;
pub const FADE_STEPS: u32 = 25;

pub const DEFAULT_BRIGHTNESS: f32 = 0.0;
pub const BLACK_SCREEN_BRIGHTNESS: f32 = -1.0;

/// Chance in [0,100) that stepping onto eligible ground starts an encounter.
pub const WILD_ENCOUNTER_CHANCE: u32 = 15;

/// Cumulative rarity thresholds over a [0,100) roll.
pub const UNCOMMON_THRESHOLD: u32 = 70;
pub const RARE_THRESHOLD: u32 = 95;

pub const INITIAL_STEPS_REMAINING: u32 = 500;
pub const INITIAL_NUM_SAFARI_BALLS: u32 = 30;

pub const PLAYER_START: GridPosition = GridPosition { row: 6, col: 8 };

/// Menu selector arrow oscillation: triangular wave in [0, MENU_ARROW_MAX].
pub const MENU_ARROW_STEP: f32 = 0.4;
pub const MENU_ARROW_MAX: f32 = 10.0;
