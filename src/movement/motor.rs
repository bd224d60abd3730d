//! Kinematic motor: horizontal ramp, fresh per-step gravity, facing.

use crate::movement::components::{Facing, PlayerBody};
use crate::movement::events::{MovementEvent, MovementEvents};
use crate::movement::resources::MovementTuning;

/// Move `current` toward `target` by at most `max_delta`, never overshooting.
pub fn move_towards(current: f32, target: f32, max_delta: f32) -> f32 {
    if (target - current).abs() <= max_delta {
        target
    } else {
        current + (target - current).signum() * max_delta
    }
}

/// Compute the baseline velocity for this step from input and last step's contacts.
pub fn drive(body: &mut PlayerBody, tuning: &MovementTuning, horizontal: f32, dt: f32) {
    let desired = horizontal * tuning.max_speed;
    let rate = if body.contacts.ground || body.contacts.wall {
        tuning.max_acceleration
    } else {
        tuning.max_air_acceleration
    };

    body.velocity.x = move_towards(body.velocity.x, desired, rate * dt);
    body.velocity.y = if body.contacts.ground {
        0.0
    } else {
        tuning.gravity
    };
}

/// Flip facing when the combined horizontal motion points the other way.
pub fn update_facing(body: &mut PlayerBody, events: &mut MovementEvents) {
    let flipped = match body.facing {
        Facing::Left if body.motion.x > 0.0 => Some(Facing::Right),
        Facing::Right if body.motion.x < 0.0 => Some(Facing::Left),
        _ => None,
    };

    if let Some(facing) = flipped {
        body.facing = facing;
        events.push(MovementEvent::DirectionChanged(facing));
    }
}

/// Layer the jump impulse on top of the baseline velocity.
pub fn combine(body: &mut PlayerBody) {
    body.motion = body.velocity + body.jump_velocity;
}

/// Clamp horizontal speed after the jump impulse has been layered on.
pub fn clamp_horizontal(body: &mut PlayerBody, tuning: &MovementTuning) {
    body.motion.x = body.motion.x.clamp(-tuning.max_speed, tuning.max_speed);
}

/// Terminal-fall clamp: the combined vertical velocity never falls faster than
/// gravity, and the impulse is spent once it would.
pub fn clamp_fall(body: &mut PlayerBody, tuning: &MovementTuning) {
    if body.motion.y < tuning.gravity {
        body.motion.y = tuning.gravity;
        body.jump_velocity.y = 0.0;
    }
}
