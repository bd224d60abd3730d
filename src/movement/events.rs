//! Movement domain: the per-step event outbox and the messages it fans out to.

use bevy::ecs::message::Message;
use bevy::prelude::*;

use crate::movement::components::{Facing, PlayerState};

/// Discrete notifications produced by one simulation step, in the order the
/// motor, jump state machine and collision resolver determined them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MovementEvent {
    StateChanged(PlayerState),
    DirectionChanged(Facing),
    Jumped(Facing),
    AirJumped,
    WallSlid(Facing),
    Landed,
    DeathEffect(Facing),
}

/// Typed outbox drained by the surrounding loop after every step.
#[derive(Component, Debug, Default)]
pub struct MovementEvents {
    queue: Vec<MovementEvent>,
}

impl MovementEvents {
    pub fn push(&mut self, event: MovementEvent) {
        self.queue.push(event);
    }

    pub fn drain(&mut self) -> impl Iterator<Item = MovementEvent> + '_ {
        self.queue.drain(..)
    }

    pub fn as_slice(&self) -> &[MovementEvent] {
        &self.queue
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn clear(&mut self) {
        self.queue.clear();
    }
}

// -----------------------------------------------------------------------------
// Outbound
// -----------------------------------------------------------------------------

/// Edge-triggered state transition
#[derive(Debug)]
pub struct PlayerStateChangedEvent {
    pub player: Entity,
    pub state: PlayerState,
}

impl Message for PlayerStateChangedEvent {}

#[derive(Debug)]
pub struct DirectionChangedEvent {
    pub player: Entity,
    pub facing: Facing,
}

impl Message for DirectionChangedEvent {}

/// Ground or wall jump. Carries the facing (ground) or launch direction (wall).
#[derive(Debug)]
pub struct JumpEvent {
    pub player: Entity,
    pub direction: Facing,
}

impl Message for JumpEvent {}

#[derive(Debug)]
pub struct AirJumpEvent {
    pub player: Entity,
}

impl Message for AirJumpEvent {}

#[derive(Debug)]
pub struct WallSlideEvent {
    pub player: Entity,
    pub direction: Facing,
}

impl Message for WallSlideEvent {}

#[derive(Debug)]
pub struct LandedEvent {
    pub player: Entity,
}

impl Message for LandedEvent {}

#[derive(Debug)]
pub struct DeathEffectEvent {
    pub player: Entity,
    pub direction: Facing,
}

impl Message for DeathEffectEvent {}

// -----------------------------------------------------------------------------
// Inbound
// -----------------------------------------------------------------------------

/// Kill the player. Ignored while a respawn is already pending.
#[derive(Debug)]
pub struct DeathSignalEvent {
    pub player: Entity,
}

impl Message for DeathSignalEvent {}

/// A checkpoint was reached. `ground_point` is where the checkpoint meets
/// the floor; the body is lifted by its half height on respawn.
#[derive(Debug)]
pub struct CheckpointReachedEvent {
    pub ground_point: Vec2,
}

impl Message for CheckpointReachedEvent {}
