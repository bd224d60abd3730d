//! Content domain: data-driven movement tuning and level layout.

mod data;
mod loader;

pub use data::{LevelLayout, MovementConfigFile, SCHEMA_VERSION};
pub use loader::{
    ContentLoadError, LEVEL_FILE, MOVEMENT_FILE, load_level_layout, load_movement_tuning,
    parse_level_layout, parse_movement_config,
};

use bevy::prelude::*;

use crate::content::loader::load_content;

pub struct ContentPlugin;

impl Plugin for ContentPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<LevelLayout>()
            .add_systems(PreStartup, load_content);
    }
}
