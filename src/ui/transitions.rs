//! Screen fades between scenes.
//!
//! Brightness walks from 0.0 to -1.0 in fixed per-frame steps, shown as a
//! black overlay whose alpha is the negated brightness. The step counter
//! is the state; brightness is derived from it, so a full half always takes
//! exactly FADE_STEPS frames and lands exactly on black or clear.
//!
//! A completed fade-out switches GameState to the requested scene. A
//! completed fade-in fires `FadeClearedEvent` so the overworld can resume
//! the right mode.

use bevy::prelude::*;

use crate::shared::*;

/// Marker for the screen fade overlay.
#[derive(Component)]
pub struct ScreenFadeOverlay;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FadeDirection {
    Out,
    In,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FadeProgress {
    Idle,
    Running,
    OutComplete,
    InComplete,
}

/// Resource that drives fade out/in.
#[derive(Resource, Debug, Clone, Default)]
pub struct ScreenFade {
    /// 0 = clear, FADE_STEPS = black.
    pub steps: u32,
    pub direction: Option<FadeDirection>,
    /// Scene to switch to once fully black.
    pub handoff: Option<SceneTarget>,
    /// Mode to resume once fully clear.
    pub resume: Option<ResumeMode>,
}

impl ScreenFade {
    pub fn begin_out(&mut self, to: SceneTarget) {
        self.steps = 0;
        self.direction = Some(FadeDirection::Out);
        self.handoff = Some(to);
        self.resume = None;
    }

    pub fn begin_in(&mut self, resume: Option<ResumeMode>) {
        self.steps = FADE_STEPS;
        self.direction = Some(FadeDirection::In);
        self.handoff = None;
        self.resume = resume;
    }

    /// One frame of progress.
    pub fn tick(&mut self) -> FadeProgress {
        match self.direction {
            None => FadeProgress::Idle,
            Some(FadeDirection::Out) => {
                self.steps += 1;
                if self.steps >= FADE_STEPS {
                    self.steps = FADE_STEPS;
                    self.direction = None;
                    FadeProgress::OutComplete
                } else {
                    FadeProgress::Running
                }
            }
            Some(FadeDirection::In) => {
                self.steps = self.steps.saturating_sub(1);
                if self.steps == 0 {
                    self.direction = None;
                    FadeProgress::InComplete
                } else {
                    FadeProgress::Running
                }
            }
        }
    }

    /// 0.0 at rest, -1.0 at full black.
    pub fn brightness(&self) -> f32 {
        if self.steps >= FADE_STEPS {
            BLACK_SCREEN_BRIGHTNESS
        } else {
            DEFAULT_BRIGHTNESS - self.steps as f32 * FADE_STEP
        }
    }

    pub fn overlay_alpha(&self) -> f32 {
        -self.brightness()
    }

    pub fn active(&self) -> bool {
        self.direction.is_some()
    }
}

/// Spawn the fade overlay (always present, transparent at rest).
pub fn spawn_fade_overlay(mut commands: Commands) {
    commands.spawn((
        ScreenFadeOverlay,
        Node {
            width: Val::Percent(100.0),
            height: Val::Percent(100.0),
            position_type: PositionType::Absolute,
            ..default()
        },
        BackgroundColor(Color::srgba(0.0, 0.0, 0.0, 0.0)),
        GlobalZIndex(100),
    ));
}

/// Translate fade requests into fade state. Requests while a fade is
/// already running restart it; the orchestrator's Transitioning mode makes
/// that unreachable in practice.
pub fn handle_fade_requests(
    mut out_requests: EventReader<FadeOutRequest>,
    mut in_requests: EventReader<FadeInRequest>,
    mut fade: ResMut<ScreenFade>,
) {
    for request in out_requests.read() {
        fade.begin_out(request.to);
    }
    for request in in_requests.read() {
        fade.begin_in(request.resume);
    }
}

/// Advance the running fade one step and apply the overlay color.
pub fn update_fade(
    mut fade: ResMut<ScreenFade>,
    mut next_state: ResMut<NextState<GameState>>,
    mut cleared: EventWriter<FadeClearedEvent>,
    mut query: Query<&mut BackgroundColor, With<ScreenFadeOverlay>>,
) {
    if !fade.active() {
        return;
    }

    match fade.tick() {
        FadeProgress::OutComplete => {
            if let Some(target) = fade.handoff.take() {
                next_state.set(match target {
                    SceneTarget::Battle => GameState::Battle,
                    SceneTarget::Collection => GameState::Collection,
                    SceneTarget::GameOver => GameState::GameOver,
                });
            }
        }
        FadeProgress::InComplete => {
            let resume = fade.resume.take();
            cleared.send(FadeClearedEvent { resume });
        }
        FadeProgress::Running | FadeProgress::Idle => {}
    }

    let alpha = fade.overlay_alpha();
    for mut bg in &mut query {
        *bg = BackgroundColor(Color::srgba(0.0, 0.0, 0.0, alpha));
    }
}
