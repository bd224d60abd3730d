//! Data definitions for RON content files.
//!
//! These structs mirror the structure in assets/data/*.ron. Both files carry
//! a `schema_version` so older layouts are rejected instead of misread.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::movement::MovementTuning;

/// Schema version this build reads.
pub const SCHEMA_VERSION: u32 = 1;

// ============================================================================
// Movement tuning (movement.ron)
// ============================================================================

/// Missing tuning fields keep their defaults.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MovementConfigFile {
    pub schema_version: u32,
    #[serde(default)]
    pub tuning: MovementTuning,
}

// ============================================================================
// Level layout (level.ron)
// ============================================================================

/// Tile rows, top row first.
///
/// | glyph | meaning |
/// |---|---|
/// | `#` | solid |
/// | `^` | hazard |
/// | `C` | checkpoint |
/// | `S` | player spawn (exactly one) |
/// | `.` or space | empty |
#[derive(Resource, Debug, Clone, Deserialize, Serialize)]
pub struct LevelLayout {
    pub schema_version: u32,
    /// World units per tile edge
    pub tile_size: f32,
    pub rows: Vec<String>,
    /// Falling below this height kills the player
    #[serde(default)]
    pub kill_plane_y: Option<f32>,
}

impl Default for LevelLayout {
    fn default() -> Self {
        let rows = [
            "#..............................#",
            "#..............................#",
            "#..............................#",
            "#......................###.....#",
            "#..............................#",
            "#.................###..........#",
            "#..........#...................#",
            "#..........#..........C........#",
            "#....###...#.......#######.....#",
            "#..........#...................#",
            "#.S........#......^^...........#",
            "#######################...######",
        ];
        Self {
            schema_version: SCHEMA_VERSION,
            tile_size: 1.0,
            rows: rows.iter().map(|row| row.to_string()).collect(),
            kill_plane_y: Some(-10.0),
        }
    }
}
