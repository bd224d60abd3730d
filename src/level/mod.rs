//! Level domain: tile layout, collision geometry and trigger zones.

mod grid;
mod systems;
mod triggers;

pub use grid::{LevelError, LevelGrid, Tile};
pub use systems::Solid;
pub use triggers::{CheckpointZone, HazardZone, KillPlane, is_lethal, overlaps};

use bevy::prelude::*;

use crate::level::systems::spawn_level;
use crate::level::triggers::{
    detect_checkpoints, detect_hazards, rearm_checkpoints, update_checkpoint_visuals,
};
use crate::movement::{MovementStep, RectMask};

pub struct LevelPlugin;

impl Plugin for LevelPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<RectMask>()
            .init_resource::<KillPlane>()
            .add_systems(Startup, spawn_level)
            .add_systems(
                FixedUpdate,
                (detect_hazards, detect_checkpoints, rearm_checkpoints)
                    .chain()
                    .after(MovementStep),
            )
            .add_systems(Update, update_checkpoint_visuals);
    }
}
