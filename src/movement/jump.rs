//! Jump state machine: buffering, eligibility, impulses, decay, wall slide.

use bevy::prelude::*;

use crate::movement::components::{MovementMode, PlayerBody, PlayerState};
use crate::movement::events::{MovementEvent, MovementEvents};
use crate::movement::publish::publish_state;
use crate::movement::resources::MovementTuning;

/// Which jump fired for a buffered press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JumpKind {
    Ground,
    Air,
    Wall,
}

/// Remember a press for `jump_input_leeway` seconds.
pub fn buffer_input(body: &mut PlayerBody, pressed: bool) {
    if pressed {
        body.stamps.jump_input = Some(body.clock.now());
    }
}

pub fn jump_buffered(body: &PlayerBody, tuning: &MovementTuning) -> bool {
    body.clock
        .within(body.stamps.jump_input, tuning.jump_input_leeway)
}

pub fn jump_ready(body: &PlayerBody, tuning: &MovementTuning) -> bool {
    body.clock
        .elapsed_since(body.stamps.jump, tuning.min_time_between_jumps)
}

pub fn can_air_jump(body: &PlayerBody, tuning: &MovementTuning) -> bool {
    body.air_jumps_remaining > 0 && jump_ready(body, tuning) && body.in_air(tuning)
}

pub fn can_wall_jump(body: &PlayerBody, tuning: &MovementTuning) -> bool {
    let has_wall_jump = tuning.unlimited_wall_jumps || body.wall_jumps_remaining > 0;
    has_wall_jump
        && jump_ready(body, tuning)
        && body.effectively_on_wall(tuning)
        && !body.effectively_grounded(tuning)
}

/// Fire at most one jump for a pending press: ground, then air, then wall.
///
/// A press made this very step counts even with a zero-length buffer.
pub fn resolve(
    body: &mut PlayerBody,
    tuning: &MovementTuning,
    pressed_this_step: bool,
    events: &mut MovementEvents,
) -> Option<JumpKind> {
    if !pressed_this_step && !jump_buffered(body, tuning) {
        return None;
    }

    if body.effectively_grounded(tuning) {
        ground_jump(body, tuning, events);
        Some(JumpKind::Ground)
    } else if can_air_jump(body, tuning) {
        air_jump(body, tuning, events);
        Some(JumpKind::Air)
    } else if can_wall_jump(body, tuning) {
        wall_jump(body, tuning, events);
        Some(JumpKind::Wall)
    } else {
        None
    }
}

fn apply_jump_impulse(body: &mut PlayerBody, tuning: &MovementTuning) {
    body.stamps.jump = Some(body.clock.now());
    body.stamps.jump_input = None;
    body.jump_velocity = Vec2::new(0.0, tuning.jump_force);
}

fn ground_jump(body: &mut PlayerBody, tuning: &MovementTuning, events: &mut MovementEvents) {
    apply_jump_impulse(body, tuning);
    // One walk-off grants one coyote jump.
    body.stamps.left_ground = None;
    events.push(MovementEvent::Jumped(body.facing));
    debug!(
        "Ground jump: on_ground={}, air_jumps_remaining={}",
        body.contacts.ground, body.air_jumps_remaining
    );
}

fn air_jump(body: &mut PlayerBody, tuning: &MovementTuning, events: &mut MovementEvents) {
    publish_state(body, tuning, PlayerState::AirJump, events);
    body.air_jumps_remaining -= 1;
    apply_jump_impulse(body, tuning);
    events.push(MovementEvent::AirJumped);
    debug!(
        "Air jump: air_jumps_remaining now {}",
        body.air_jumps_remaining
    );
}

fn wall_jump(body: &mut PlayerBody, tuning: &MovementTuning, events: &mut MovementEvents) {
    publish_state(body, tuning, PlayerState::WallJump, events);

    let direction = body.jump_direction;
    body.stamps.jump = Some(body.clock.now());
    body.stamps.jump_input = None;
    body.stamps.left_wall = None;
    body.velocity = Vec2::ZERO;
    body.jump_velocity = Vec2::new(
        tuning.wall_jump_force_x * direction.sign(),
        tuning.wall_jump_force_y,
    );
    body.contacts.wall = false;
    body.mode = MovementMode::Airborne;

    if !tuning.unlimited_wall_jumps {
        body.wall_jumps_remaining = body.wall_jumps_remaining.saturating_sub(1);
    }

    events.push(MovementEvent::Jumped(direction));
    debug!(
        "Wall jump: direction={:?}, wall_jumps_remaining={}",
        direction, body.wall_jumps_remaining
    );
}

/// Decay the impulse. Vertical decay may overshoot below zero; the
/// terminal-fall clamp spends the remainder. Horizontal decay stops at zero
/// and only runs while the impulse points along the locked jump direction.
pub fn decay(body: &mut PlayerBody, tuning: &MovementTuning, dt: f32) {
    if body.jump_velocity.y > 0.0 {
        body.jump_velocity.y -= tuning.vertical_jump_resistance * dt;
    }

    let x = body.jump_velocity.x;
    if x == 0.0 {
        return;
    }

    let step = tuning.horizontal_jump_resistance * dt;
    body.jump_velocity.x = if x.signum() == body.jump_direction.sign() {
        if x > 0.0 {
            (x - step).max(0.0)
        } else {
            (x + step).min(0.0)
        }
    } else {
        0.0
    };
}

/// Override the combined vertical motion while falling along a wall.
///
/// Inside the start grace window the body holds still on the wall; after it,
/// it slides at `wall_slide_speed`. Right after a slide ends the stop grace
/// window holds it still too.
pub fn apply_wall_slide(body: &mut PlayerBody, tuning: &MovementTuning) {
    if !body.falling() {
        return;
    }

    if body.wall_sliding() {
        if !body.wall_jumping() {
            body.jump_velocity.y = 0.0;
        }
        let grabbing = body
            .clock
            .within(body.stamps.wall_slide_start, tuning.wall_slide_start_leeway);
        body.motion.y = if grabbing {
            0.0
        } else {
            -tuning.wall_slide_speed
        };
    } else if body
        .clock
        .within(body.stamps.wall_slide_stop, tuning.wall_slide_stop_leeway)
    {
        body.motion.y = 0.0;
    }
}
