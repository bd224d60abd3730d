//! Core domain: camera and simulation rate.

mod systems;

use bevy::prelude::*;

use crate::core::systems::{follow_player, setup_camera};

/// Fixed simulation rate, in steps per second.
pub const SIMULATION_HZ: f64 = 64.0;

/// World units per screen pixel.
pub const CAMERA_SCALE: f32 = 1.0 / 40.0;

pub struct CorePlugin;

impl Plugin for CorePlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(Time::<Fixed>::from_hz(SIMULATION_HZ))
            .add_systems(Startup, setup_camera)
            .add_systems(Update, follow_player);
    }
}
