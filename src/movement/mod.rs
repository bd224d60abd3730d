//! Movement domain: kinematic player body, jump state machine, ray-sampled
//! collision and timed respawn, plus the systems that drive them at a fixed rate.

mod bootstrap;
mod clock;
pub mod collision;
mod components;
mod controller;
mod events;
mod jump;
mod motor;
mod publish;
mod resources;
mod respawn;
mod systems;
#[cfg(test)]
mod tests;
mod validation;

pub use bootstrap::PlayerSpawnPoint;
pub use clock::{SimClock, Stamp};
pub use collision::{CollisionMask, RectMask};
pub use components::{
    Contacts, Facing, GameLayer, GraceStamps, MovementMode, Player, PlayerBody, PlayerState,
    RespawnCountdown,
};
pub use controller::StepInput;
pub use events::{
    AirJumpEvent, CheckpointReachedEvent, DeathEffectEvent, DeathSignalEvent,
    DirectionChangedEvent, JumpEvent, LandedEvent, MovementEvent, MovementEvents,
    PlayerStateChangedEvent, WallSlideEvent,
};
pub use resources::{MovementInput, MovementTuning};
pub use systems::SpatialQueryMask;
pub use validation::{TuningError, validate_tuning};

use bevy::prelude::*;

use crate::movement::bootstrap::bootstrap_player;
use crate::movement::systems::{
    commit_player_motion, handle_checkpoint_updates, handle_death_signals, publish_movement_events,
    read_input, simulate_players,
};

/// Everything that runs once per fixed step for the player, in order.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub struct MovementStep;

pub struct MovementPlugin;

impl Plugin for MovementPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<MovementTuning>()
            .init_resource::<MovementInput>()
            .init_resource::<PlayerSpawnPoint>()
            .add_message::<PlayerStateChangedEvent>()
            .add_message::<DirectionChangedEvent>()
            .add_message::<JumpEvent>()
            .add_message::<AirJumpEvent>()
            .add_message::<WallSlideEvent>()
            .add_message::<LandedEvent>()
            .add_message::<DeathEffectEvent>()
            .add_message::<DeathSignalEvent>()
            .add_message::<CheckpointReachedEvent>()
            .add_systems(PostStartup, bootstrap_player)
            .add_systems(Update, read_input)
            .add_systems(
                FixedUpdate,
                (
                    handle_checkpoint_updates,
                    handle_death_signals,
                    simulate_players,
                    commit_player_motion,
                    publish_movement_events,
                )
                    .chain()
                    .in_set(MovementStep),
            );
    }
}
