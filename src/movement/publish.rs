//! Edge-triggered publication of the animation-facing player state.

use bevy::prelude::*;

use crate::movement::components::{PlayerBody, PlayerState};
use crate::movement::events::{MovementEvent, MovementEvents};
use crate::movement::resources::MovementTuning;

/// States an AirJump publication holds off until its hold window ends.
fn held_by_air_jump(state: PlayerState) -> bool {
    matches!(
        state,
        PlayerState::Idle | PlayerState::Run | PlayerState::Jump
    )
}

/// Publish `state` once per transition. Returns whether it was published.
pub fn publish_state(
    body: &mut PlayerBody,
    tuning: &MovementTuning,
    state: PlayerState,
    events: &mut MovementEvents,
) -> bool {
    if body.state == state {
        return false;
    }

    if held_by_air_jump(state)
        && body.state == PlayerState::AirJump
        && body
            .clock
            .within(body.stamps.air_jump_published, tuning.air_jump_hold)
    {
        return false;
    }

    debug!("Player state: {:?} -> {:?}", body.state, state);
    body.state = state;
    if state == PlayerState::AirJump {
        body.stamps.air_jump_published = Some(body.clock.now());
    }
    events.push(MovementEvent::StateChanged(state));
    true
}

/// Pick the state implied by the finished step. `moved_x` is the clipped
/// horizontal displacement, so running into a wall reads as idle.
pub fn settle_state(
    body: &mut PlayerBody,
    tuning: &MovementTuning,
    moved_x: f32,
    events: &mut MovementEvents,
) {
    let state = if body.contacts.ground {
        if moved_x == 0.0 {
            PlayerState::Idle
        } else {
            PlayerState::Run
        }
    } else if body.wall_sliding() {
        PlayerState::WallSlide
    } else if body.jumping() || body.wall_jumping() || body.falling() {
        PlayerState::Jump
    } else {
        return;
    };

    publish_state(body, tuning, state, events);
}
