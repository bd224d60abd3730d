//! Tile layout parsing into world-space solids and trigger zones.

use bevy::math::bounding::Aabb2d;
use bevy::prelude::*;

use crate::content::LevelLayout;
use crate::movement::RectMask;

/// Kill plane depth, in tiles below the level, when the layout names none.
const DEFAULT_KILL_PLANE_TILES: f32 = 5.0;

#[derive(Debug, Clone, PartialEq)]
pub enum LevelError {
    Empty,
    InvalidTileSize(f32),
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },
    UnknownGlyph {
        row: usize,
        column: usize,
        glyph: char,
    },
    MissingSpawn,
    MultipleSpawns(usize),
}

impl std::fmt::Display for LevelError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LevelError::Empty => write!(f, "level has no rows"),
            LevelError::InvalidTileSize(size) => {
                write!(f, "tile_size must be a finite value > 0, got {}", size)
            }
            LevelError::RaggedRow {
                row,
                expected,
                found,
            } => write!(
                f,
                "row {} has {} tiles, expected {}",
                row, found, expected
            ),
            LevelError::UnknownGlyph { row, column, glyph } => {
                write!(f, "unknown glyph '{}' at row {}, column {}", glyph, row, column)
            }
            LevelError::MissingSpawn => write!(f, "level has no spawn tile 'S'"),
            LevelError::MultipleSpawns(count) => {
                write!(f, "level has {} spawn tiles, expected exactly one", count)
            }
        }
    }
}

impl std::error::Error for LevelError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tile {
    Empty,
    Solid,
    Hazard,
    Checkpoint,
    Spawn,
}

impl Tile {
    pub fn from_glyph(glyph: char) -> Option<Self> {
        match glyph {
            '.' | ' ' => Some(Tile::Empty),
            '#' => Some(Tile::Solid),
            '^' => Some(Tile::Hazard),
            'C' => Some(Tile::Checkpoint),
            'S' => Some(Tile::Spawn),
            _ => None,
        }
    }
}

/// A parsed level in world space. The bottom-left tile corner sits at the origin.
#[derive(Debug, Clone)]
pub struct LevelGrid {
    pub tile_size: f32,
    /// Solid tiles, merged into one box per horizontal run
    pub solids: Vec<Aabb2d>,
    pub hazards: Vec<Aabb2d>,
    /// Checkpoint zones, two tiles tall so the probe reaches the floor below
    pub checkpoints: Vec<Aabb2d>,
    /// Bottom center of the spawn tile
    pub spawn_ground: Vec2,
    pub kill_plane_y: f32,
}

impl LevelGrid {
    /// Parse `layout`, reporting every problem found rather than the first.
    pub fn from_layout(layout: &LevelLayout) -> Result<Self, Vec<LevelError>> {
        let mut errors = Vec::new();
        let tile_size = layout.tile_size;

        if !(tile_size.is_finite() && tile_size > 0.0) {
            errors.push(LevelError::InvalidTileSize(tile_size));
        }
        let Some(first) = layout.rows.first() else {
            errors.push(LevelError::Empty);
            return Err(errors);
        };

        let width = first.chars().count();
        let height = layout.rows.len();
        let mut grid = LevelGrid {
            tile_size,
            solids: Vec::new(),
            hazards: Vec::new(),
            checkpoints: Vec::new(),
            spawn_ground: Vec2::ZERO,
            kill_plane_y: layout
                .kill_plane_y
                .unwrap_or(-DEFAULT_KILL_PLANE_TILES * tile_size),
        };
        let mut spawns = Vec::new();

        for (row, line) in layout.rows.iter().enumerate() {
            let found = line.chars().count();
            if found != width {
                errors.push(LevelError::RaggedRow {
                    row,
                    expected: width,
                    found,
                });
            }

            let from_bottom = (height - 1 - row) as f32;
            let mut run_start: Option<usize> = None;

            for (column, glyph) in line.chars().enumerate() {
                let Some(tile) = Tile::from_glyph(glyph) else {
                    errors.push(LevelError::UnknownGlyph { row, column, glyph });
                    continue;
                };
                let corner = Vec2::new(column as f32, from_bottom) * tile_size;

                if tile == Tile::Solid {
                    run_start.get_or_insert(column);
                } else if let Some(start) = run_start.take() {
                    grid.solids
                        .push(run_bounds(start, column, from_bottom, tile_size));
                }

                match tile {
                    Tile::Hazard => grid.hazards.push(Aabb2d {
                        min: corner,
                        max: corner + Vec2::splat(tile_size),
                    }),
                    Tile::Checkpoint => grid.checkpoints.push(Aabb2d {
                        min: corner,
                        max: corner + Vec2::new(tile_size, 2.0 * tile_size),
                    }),
                    Tile::Spawn => spawns.push(corner + Vec2::new(0.5 * tile_size, 0.0)),
                    Tile::Empty | Tile::Solid => {}
                }
            }

            if let Some(start) = run_start {
                grid.solids
                    .push(run_bounds(start, found, from_bottom, tile_size));
            }
        }

        match spawns.as_slice() {
            [spawn] => grid.spawn_ground = *spawn,
            [] => errors.push(LevelError::MissingSpawn),
            many => errors.push(LevelError::MultipleSpawns(many.len())),
        }

        if errors.is_empty() {
            Ok(grid)
        } else {
            Err(errors)
        }
    }

    /// Ray-castable mask over the solid tiles.
    pub fn mask(&self) -> RectMask {
        RectMask::new(self.solids.clone())
    }
}

/// Box covering solid columns `start..end` of one row.
fn run_bounds(start: usize, end: usize, from_bottom: f32, tile_size: f32) -> Aabb2d {
    Aabb2d {
        min: Vec2::new(start as f32, from_bottom) * tile_size,
        max: Vec2::new(end as f32, from_bottom + 1.0) * tile_size,
    }
}
