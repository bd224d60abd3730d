//! Sprites module: presentation glue for the player sprite.
//!
//! This module handles:
//! - Animation clip selection from published player states
//! - Sprite flip on direction changes
//! - Death fade

pub mod animation;

use bevy::prelude::*;

pub use animation::{AnimationClip, AnimationController, AnimationFinished};

use animation::{
    apply_death_fade, apply_facing, apply_state_changes, attach_animation,
    update_animation_frames,
};

pub struct SpritesPlugin;

impl Plugin for SpritesPlugin {
    fn build(&self, app: &mut App) {
        app.add_message::<AnimationFinished>().add_systems(
            Update,
            (
                attach_animation,
                apply_state_changes,
                apply_facing,
                apply_death_fade,
                update_animation_frames,
            )
                .chain(),
        );
    }
}
