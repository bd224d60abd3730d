//! Loader for RON content files at startup.

use bevy::prelude::*;
use ron::Options;
use std::fs;
use std::path::Path;

use super::data::*;
use crate::movement::{MovementTuning, validate_tuning};

pub const MOVEMENT_FILE: &str = "movement.ron";
pub const LEVEL_FILE: &str = "level.ron";

/// Error type for content loading failures.
#[derive(Debug)]
pub struct ContentLoadError {
    pub file: String,
    pub message: String,
}

impl std::fmt::Display for ContentLoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Failed to load {}: {}", self.file, self.message)
    }
}

impl std::error::Error for ContentLoadError {}

/// Create RON options with extensions enabled for more flexible parsing.
fn ron_options() -> Options {
    Options::default().with_default_extension(ron::extensions::Extensions::IMPLICIT_SOME)
}

fn read_file(path: &Path) -> Result<String, ContentLoadError> {
    fs::read_to_string(path).map_err(|e| ContentLoadError {
        file: path.display().to_string(),
        message: format!("IO error: {}", e),
    })
}

fn parse<T>(file: &str, contents: &str) -> Result<T, ContentLoadError>
where
    T: for<'de> serde::Deserialize<'de>,
{
    ron_options()
        .from_str(contents)
        .map_err(|e| ContentLoadError {
            file: file.to_string(),
            message: format!("Parse error: {}", e),
        })
}

fn check_schema(file: &str, found: u32) -> Result<(), ContentLoadError> {
    if found == SCHEMA_VERSION {
        Ok(())
    } else {
        Err(ContentLoadError {
            file: file.to_string(),
            message: format!(
                "unsupported schema_version {} (expected {})",
                found, SCHEMA_VERSION
            ),
        })
    }
}

/// Parse and validate a movement config. Every out-of-range field is
/// reported, not just the first.
pub fn parse_movement_config(
    file: &str,
    contents: &str,
) -> Result<MovementTuning, Vec<ContentLoadError>> {
    let config: MovementConfigFile = parse(file, contents).map_err(|e| vec![e])?;
    check_schema(file, config.schema_version).map_err(|e| vec![e])?;

    let errors: Vec<ContentLoadError> = validate_tuning(&config.tuning)
        .into_iter()
        .map(|e| ContentLoadError {
            file: file.to_string(),
            message: e.to_string(),
        })
        .collect();

    if errors.is_empty() {
        Ok(config.tuning)
    } else {
        Err(errors)
    }
}

/// Parse a level layout. Tile-level problems are reported by the level
/// builder, which knows the glyph set.
pub fn parse_level_layout(file: &str, contents: &str) -> Result<LevelLayout, ContentLoadError> {
    let layout: LevelLayout = parse(file, contents)?;
    check_schema(file, layout.schema_version)?;
    Ok(layout)
}

/// Load `movement.ron` from `base_path`.
pub fn load_movement_tuning(base_path: &Path) -> Result<MovementTuning, Vec<ContentLoadError>> {
    let path = base_path.join(MOVEMENT_FILE);
    let contents = read_file(&path).map_err(|e| vec![e])?;
    parse_movement_config(&path.display().to_string(), &contents)
}

/// Load `level.ron` from `base_path`.
pub fn load_level_layout(base_path: &Path) -> Result<LevelLayout, ContentLoadError> {
    let path = base_path.join(LEVEL_FILE);
    let contents = read_file(&path)?;
    parse_level_layout(&path.display().to_string(), &contents)
}

/// Startup system: insert the tuning and layout resources, falling back to
/// the built-in defaults when a file is missing or rejected.
pub(crate) fn load_content(mut commands: Commands) {
    let base_path = Path::new("assets/data");

    let tuning = match load_movement_tuning(base_path) {
        Ok(tuning) => {
            info!(
                "Loaded movement tuning: max_speed={}, jump_force={}, air_jumps={}, wall_jumps={}",
                tuning.max_speed, tuning.jump_force, tuning.max_air_jumps, tuning.max_wall_jumps
            );
            tuning
        }
        Err(errors) => {
            for e in &errors {
                error!("{}", e);
            }
            warn!("Using default movement tuning");
            MovementTuning::default()
        }
    };

    let layout = match load_level_layout(base_path) {
        Ok(layout) => {
            info!(
                "Loaded level layout: {} rows, tile_size={}",
                layout.rows.len(),
                layout.tile_size
            );
            layout
        }
        Err(e) => {
            error!("{}", e);
            warn!("Using built-in level layout");
            LevelLayout::default()
        }
    };

    commands.insert_resource(tuning);
    commands.insert_resource(layout);
}
