//! Animation clip selection and playback.
//!
//! Clips follow the states the movement core publishes; the controller only
//! advances frames and reports when a one-shot clip is done.

use bevy::ecs::message::{Message, MessageReader, MessageWriter};
use bevy::prelude::*;

use crate::movement::{
    DirectionChangedEvent, Facing, Player, PlayerBody, PlayerState, PlayerStateChangedEvent,
};

/// Animation clips for the player character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AnimationClip {
    #[default]
    Idle,
    Run,
    Jump,
    DoubleJump,
    WallSlide,
    Die,
}

impl AnimationClip {
    /// Wall jumps reuse the jump clip.
    pub fn for_state(state: PlayerState) -> Self {
        match state {
            PlayerState::Idle => AnimationClip::Idle,
            PlayerState::Run => AnimationClip::Run,
            PlayerState::Jump | PlayerState::WallJump => AnimationClip::Jump,
            PlayerState::AirJump => AnimationClip::DoubleJump,
            PlayerState::WallSlide => AnimationClip::WallSlide,
            PlayerState::Die => AnimationClip::Die,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            AnimationClip::Idle => "idle",
            AnimationClip::Run => "run",
            AnimationClip::Jump => "jump",
            AnimationClip::DoubleJump => "double_jump",
            AnimationClip::WallSlide => "wall_slide",
            AnimationClip::Die => "die",
        }
    }

    pub fn looping(self) -> bool {
        matches!(
            self,
            AnimationClip::Idle | AnimationClip::Run | AnimationClip::WallSlide
        )
    }

    pub fn frame_count(self) -> u32 {
        match self {
            AnimationClip::Idle => 4,
            AnimationClip::Run => 6,
            AnimationClip::Jump => 2,
            AnimationClip::DoubleJump => 4,
            AnimationClip::WallSlide => 2,
            AnimationClip::Die => 6,
        }
    }

    /// Placeholder tint until the character sheet exists.
    pub fn tint(self) -> Color {
        match self {
            AnimationClip::Idle => Color::srgb(0.3, 0.6, 0.9),
            AnimationClip::Run => Color::srgb(0.3, 0.8, 0.9),
            AnimationClip::Jump => Color::srgb(0.5, 0.5, 1.0),
            AnimationClip::DoubleJump => Color::srgb(0.8, 0.5, 1.0),
            AnimationClip::WallSlide => Color::srgb(0.9, 0.7, 0.3),
            AnimationClip::Die => Color::srgb(0.9, 0.2, 0.2),
        }
    }
}

#[derive(Component, Debug)]
pub struct AnimationController {
    pub clip: AnimationClip,
    pub previous_clip: AnimationClip,
    /// 0-based
    pub current_frame: u32,
    pub frame_timer: f32,
    /// Seconds per frame
    pub frame_duration: f32,
    pub finished: bool,
}

impl Default for AnimationController {
    fn default() -> Self {
        Self {
            clip: AnimationClip::Idle,
            previous_clip: AnimationClip::Idle,
            current_frame: 0,
            frame_timer: 0.0,
            frame_duration: 0.125,
            finished: false,
        }
    }
}

impl AnimationController {
    /// Switch clips, restarting playback. Returns false if `clip` is already playing.
    pub fn set_clip(&mut self, clip: AnimationClip) -> bool {
        if self.clip == clip {
            return false;
        }
        self.previous_clip = self.clip;
        self.clip = clip;
        self.current_frame = 0;
        self.frame_timer = 0.0;
        self.finished = false;
        true
    }

    /// Advance by `dt` seconds. Returns true on the tick a one-shot clip ends.
    pub fn tick(&mut self, dt: f32) -> bool {
        if self.finished || self.frame_duration <= 0.0 {
            return false;
        }

        self.frame_timer += dt;
        while self.frame_timer >= self.frame_duration {
            self.frame_timer -= self.frame_duration;
            self.current_frame += 1;

            if self.current_frame >= self.clip.frame_count() {
                if self.clip.looping() {
                    self.current_frame = 0;
                } else {
                    self.current_frame = self.clip.frame_count() - 1;
                    self.finished = true;
                    return true;
                }
            }
        }
        false
    }

    /// Sprite key for the current frame, e.g. `player_run_3`.
    pub fn sprite_key(&self) -> String {
        format!("player_{}_{}", self.clip.name(), self.current_frame + 1)
    }
}

/// A one-shot clip reached its last frame.
#[derive(Debug)]
pub struct AnimationFinished {
    pub entity: Entity,
    pub clip: AnimationClip,
}

impl Message for AnimationFinished {}

pub(crate) fn attach_animation(
    mut commands: Commands,
    mut players: Query<(Entity, &mut Sprite), (With<Player>, Without<AnimationController>)>,
) {
    for (entity, mut sprite) in &mut players {
        let controller = AnimationController::default();
        sprite.color = controller.clip.tint();
        commands.entity(entity).insert(controller);
    }
}

pub(crate) fn apply_state_changes(
    mut changes: MessageReader<PlayerStateChangedEvent>,
    mut players: Query<(&mut AnimationController, &mut Sprite), With<Player>>,
) {
    for change in changes.read() {
        let Ok((mut controller, mut sprite)) = players.get_mut(change.player) else {
            continue;
        };
        let clip = AnimationClip::for_state(change.state);
        if controller.set_clip(clip) {
            let alpha = sprite.color.alpha();
            sprite.color = clip.tint().with_alpha(alpha);
            debug!(
                "Animation: {} -> {}",
                controller.previous_clip.name(),
                clip.name()
            );
        }
    }
}

pub(crate) fn apply_facing(
    mut changes: MessageReader<DirectionChangedEvent>,
    mut sprites: Query<&mut Sprite, With<Player>>,
) {
    for change in changes.read() {
        if let Ok(mut sprite) = sprites.get_mut(change.player) {
            sprite.flip_x = change.facing == Facing::Left;
        }
    }
}

pub(crate) fn apply_death_fade(mut players: Query<(&PlayerBody, &mut Sprite), With<Player>>) {
    for (body, mut sprite) in &mut players {
        if sprite.color.alpha() != body.fade_alpha {
            sprite.color.set_alpha(body.fade_alpha);
        }
    }
}

pub(crate) fn update_animation_frames(
    time: Res<Time>,
    mut query: Query<(Entity, &mut AnimationController)>,
    mut finished: MessageWriter<AnimationFinished>,
) {
    for (entity, mut controller) in &mut query {
        if controller.tick(time.delta_secs()) {
            finished.write(AnimationFinished {
                entity,
                clip: controller.clip,
            });
        }
    }
}
