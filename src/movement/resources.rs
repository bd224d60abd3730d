//! Movement domain: tuning and input resources.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Resource, Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct MovementTuning {
    // Motor
    pub max_speed: f32,
    /// Horizontal speed change per second while grounded or on a wall
    pub max_acceleration: f32,
    pub max_air_acceleration: f32,
    /// Per-step fall velocity, negative. Re-applied every step, not integrated.
    pub gravity: f32,

    // Jump input
    /// How long a jump press stays buffered
    pub jump_input_leeway: f32,
    /// Coyote time after leaving the ground or a wall
    pub jump_off_platform_leeway: f32,
    pub min_time_between_jumps: f32,

    // Jump
    pub jump_force: f32,
    pub vertical_jump_resistance: f32,
    /// Maximum air jumps (0 = no double jump, 1 = double jump, ...)
    pub max_air_jumps: u8,
    /// How long an AirJump publication holds off Idle/Run/Jump
    pub air_jump_hold: f32,

    // Wall jump
    pub wall_jump_force_x: f32,
    pub wall_jump_force_y: f32,
    pub horizontal_jump_resistance: f32,
    pub unlimited_wall_jumps: bool,
    pub max_wall_jumps: u8,

    // Wall slide
    pub wall_slide_speed: f32,
    pub wall_slide_start_leeway: f32,
    pub wall_slide_stop_leeway: f32,

    // Collision
    pub vertical_rays: u32,
    pub horizontal_rays: u32,
    /// Inset of the outermost rays from the box corners
    pub raycast_offset: f32,
    /// Extra ray length so a body resting exactly on a surface keeps touching it
    pub ray_skin: f32,
    pub half_width: f32,
    pub half_height: f32,

    // Respawn
    pub respawn_delay: f32,
    pub fade_speed: f32,
}

impl Default for MovementTuning {
    fn default() -> Self {
        Self {
            max_speed: 12.0,
            max_acceleration: 400.0,
            max_air_acceleration: 400.0,
            gravity: -20.0,
            jump_input_leeway: 0.1,
            jump_off_platform_leeway: 0.1,
            min_time_between_jumps: 0.2,
            jump_force: 40.0,
            vertical_jump_resistance: 100.0,
            max_air_jumps: 1,
            air_jump_hold: 0.3,
            wall_jump_force_x: 5.0,
            wall_jump_force_y: 40.0,
            horizontal_jump_resistance: 12.0,
            unlimited_wall_jumps: false,
            max_wall_jumps: 2,
            wall_slide_speed: 10.0,
            wall_slide_start_leeway: 0.08,
            wall_slide_stop_leeway: 0.09,
            vertical_rays: 3,
            horizontal_rays: 5,
            raycast_offset: 0.05,
            ray_skin: 0.01,
            half_width: 0.5,
            half_height: 1.0,
            respawn_delay: 1.0,
            fade_speed: 0.8,
        }
    }
}

impl MovementTuning {
    pub fn half_extents(&self) -> Vec2 {
        Vec2::new(self.half_width, self.half_height)
    }
}

/// The two logical signals the core reads each step.
#[derive(Resource, Debug, Default, Clone, Copy)]
pub struct MovementInput {
    /// Horizontal axis in [-1, 1]
    pub horizontal: f32,
    /// Latched until the next simulation step consumes it
    pub jump_just_pressed: bool,
}
