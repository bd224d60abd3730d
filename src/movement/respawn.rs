//! Respawn controller: death freeze, timed respawn, checkpoint updates.

use bevy::prelude::*;

use crate::movement::components::{
    Contacts, GraceStamps, MovementMode, PlayerBody, PlayerState, RespawnCountdown,
};
use crate::movement::events::{MovementEvent, MovementEvents};
use crate::movement::publish::publish_state;
use crate::movement::resources::MovementTuning;

/// Kill the body. A signal while a respawn is already pending is a no-op and
/// does not restart the countdown. Returns whether the signal was taken.
pub fn trigger_death(
    body: &mut PlayerBody,
    tuning: &MovementTuning,
    events: &mut MovementEvents,
) -> bool {
    if body.is_dead() {
        debug!("Death signal ignored: respawn already pending");
        return false;
    }

    publish_state(body, tuning, PlayerState::Die, events);
    events.push(MovementEvent::DeathEffect(body.facing));

    body.velocity = Vec2::ZERO;
    body.jump_velocity = Vec2::ZERO;
    body.motion = Vec2::ZERO;
    body.pending = Vec2::ZERO;
    body.respawn = Some(RespawnCountdown {
        remaining: tuning.respawn_delay,
    });
    body.fade_alpha = 1.0;
    body.mode = MovementMode::Dead;

    info!(
        "Player died at ({:.2}, {:.2}), respawning in {:.2}s",
        body.position.x, body.position.y, tuning.respawn_delay
    );
    true
}

/// Advance a pending respawn by `dt`. Input is not read while dead.
pub fn tick(body: &mut PlayerBody, tuning: &MovementTuning, dt: f32, events: &mut MovementEvents) {
    let Some(countdown) = body.respawn.as_mut() else {
        return;
    };

    countdown.remaining -= dt;
    body.fade_alpha = (body.fade_alpha - tuning.fade_speed * dt).max(0.0);

    if countdown.remaining <= 0.0 {
        complete(body, tuning, events);
    }
}

fn complete(body: &mut PlayerBody, tuning: &MovementTuning, events: &mut MovementEvents) {
    body.respawn = None;
    body.position = body.respawn_position;
    body.velocity = Vec2::ZERO;
    body.jump_velocity = Vec2::ZERO;
    body.motion = Vec2::ZERO;
    body.pending = Vec2::ZERO;
    body.contacts = Contacts::default();
    body.mode = MovementMode::Airborne;
    body.stamps = GraceStamps::default();
    body.air_jumps_remaining = tuning.max_air_jumps;
    body.wall_jumps_remaining = tuning.max_wall_jumps;
    body.fade_alpha = 1.0;

    publish_state(body, tuning, PlayerState::Idle, events);
    info!(
        "Player respawned at ({:.2}, {:.2})",
        body.position.x, body.position.y
    );
}

/// Move the respawn point to a checkpoint's ground point, lifted by the
/// body's half height. Safe at any time, including during the respawn delay.
pub fn update_checkpoint(body: &mut PlayerBody, ground_point: Vec2) {
    body.respawn_position = ground_point + Vec2::new(0.0, body.half_extents.y);
    info!(
        "Checkpoint updated: respawn at ({:.2}, {:.2})",
        body.respawn_position.x, body.respawn_position.y
    );
}
