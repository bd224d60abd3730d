//! Movement domain: the player body, its states, and physics layers.

use avian2d::prelude::*;
use bevy::math::bounding::Aabb2d;
use bevy::prelude::*;

use crate::movement::clock::{SimClock, Stamp};
use crate::movement::resources::MovementTuning;
use crate::movement::validation::{TuningError, validate_tuning};

/// Physics layers for collision filtering
#[derive(PhysicsLayer, Clone, Copy, Debug, Default)]
pub enum GameLayer {
    /// Level solids the player's rays collide with
    #[default]
    Ground,
    /// What level colliders report contacts against. The player is
    /// ray-sampled and carries no collider of its own.
    Player,
    /// Checkpoints and hazards, never block movement
    Sensor,
}

#[derive(Component, Debug)]
pub struct Player;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Facing {
    #[default]
    Right,
    Left,
}

impl Facing {
    pub fn sign(self) -> f32 {
        match self {
            Facing::Right => 1.0,
            Facing::Left => -1.0,
        }
    }

    pub fn opposite(self) -> Self {
        match self {
            Facing::Right => Facing::Left,
            Facing::Left => Facing::Right,
        }
    }

    /// Direction a horizontal input presses toward, if any.
    pub fn from_axis(axis: f32) -> Option<Self> {
        match axis.round() as i32 {
            1 => Some(Facing::Right),
            -1 => Some(Facing::Left),
            _ => None,
        }
    }
}

/// Animation-facing state, published edge-triggered to collaborators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PlayerState {
    #[default]
    Idle,
    Run,
    Jump,
    AirJump,
    WallJump,
    WallSlide,
    Die,
}

/// How the body is moving right now, independent of what was published.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MovementMode {
    Grounded,
    #[default]
    Airborne,
    WallContact,
    WallSliding,
    Dead,
}

/// Raw contact sensors refreshed by the collision resolver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Contacts {
    pub ground: bool,
    pub wall: bool,
}

/// Recorded instants for the grace windows. `None` means "never happened".
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct GraceStamps {
    pub jump_input: Option<Stamp>,
    pub jump: Option<Stamp>,
    pub left_ground: Option<Stamp>,
    pub left_wall: Option<Stamp>,
    pub wall_slide_start: Option<Stamp>,
    pub wall_slide_stop: Option<Stamp>,
    pub air_jump_published: Option<Stamp>,
}

/// Pending respawn after a death signal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RespawnCountdown {
    pub remaining: f32,
}

/// Owns all simulation state for one player.
#[derive(Component, Debug, Clone)]
pub struct PlayerBody {
    /// Box center in world space
    pub position: Vec2,
    pub half_extents: Vec2,
    pub velocity: Vec2,
    /// Decaying impulse layered on top of `velocity`
    pub jump_velocity: Vec2,
    /// Velocity actually applied last step: baseline plus impulse, after clamps
    pub motion: Vec2,
    pub facing: Facing,
    /// Locked at wall contact, gates horizontal impulse decay
    pub jump_direction: Facing,
    pub air_jumps_remaining: u8,
    pub wall_jumps_remaining: u8,
    pub contacts: Contacts,
    pub mode: MovementMode,
    pub stamps: GraceStamps,
    pub clock: SimClock,
    /// Last published state, only used to suppress duplicates
    pub state: PlayerState,
    pub respawn_position: Vec2,
    pub respawn: Option<RespawnCountdown>,
    pub fade_alpha: f32,
    /// Displacement accumulated this step, applied by [`PlayerBody::commit`]
    pub pending: Vec2,
}

impl PlayerBody {
    /// Create a body at `spawn`, which also becomes the first respawn point.
    pub fn spawn(spawn: Vec2, tuning: &MovementTuning) -> Result<Self, Vec<TuningError>> {
        let errors = validate_tuning(tuning);
        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(Self {
            position: spawn,
            half_extents: tuning.half_extents(),
            velocity: Vec2::ZERO,
            jump_velocity: Vec2::ZERO,
            motion: Vec2::ZERO,
            facing: Facing::Right,
            jump_direction: Facing::Right,
            air_jumps_remaining: tuning.max_air_jumps,
            wall_jumps_remaining: tuning.max_wall_jumps,
            contacts: Contacts::default(),
            mode: MovementMode::Airborne,
            stamps: GraceStamps::default(),
            clock: SimClock::default(),
            state: PlayerState::Idle,
            respawn_position: spawn,
            respawn: None,
            fade_alpha: 1.0,
            pending: Vec2::ZERO,
        })
    }

    pub fn bounds(&self) -> Aabb2d {
        Aabb2d::new(self.position, self.half_extents)
    }

    pub fn is_dead(&self) -> bool {
        self.respawn.is_some()
    }

    pub fn on_ground(&self) -> bool {
        self.contacts.ground
    }

    pub fn on_wall(&self) -> bool {
        self.contacts.wall
    }

    pub fn wall_sliding(&self) -> bool {
        self.mode == MovementMode::WallSliding
    }

    /// An impulse is active on either axis.
    pub fn jumping(&self) -> bool {
        self.jump_velocity != Vec2::ZERO
    }

    pub fn falling(&self) -> bool {
        self.motion.y < 0.0
    }

    /// Horizontal impulse active while off the ground.
    pub fn wall_jumping(&self) -> bool {
        self.jump_velocity.x != 0.0 && !self.contacts.ground
    }

    /// Ground contact, or coyote time after leaving it.
    pub fn effectively_grounded(&self, tuning: &MovementTuning) -> bool {
        self.contacts.ground
            || self
                .clock
                .within(self.stamps.left_ground, tuning.jump_off_platform_leeway)
    }

    /// Wall contact, or coyote time after leaving it.
    pub fn effectively_on_wall(&self, tuning: &MovementTuning) -> bool {
        self.contacts.wall
            || self
                .clock
                .within(self.stamps.left_wall, tuning.jump_off_platform_leeway)
    }

    pub fn in_air(&self, tuning: &MovementTuning) -> bool {
        !self.effectively_grounded(tuning) && !self.effectively_on_wall(tuning)
    }

    /// Refresh the movement mode from the contact sensors. Sliding survives
    /// as long as the resolver left it engaged.
    pub(crate) fn refresh_mode(&mut self) {
        if self.is_dead() {
            self.mode = MovementMode::Dead;
            return;
        }
        self.mode = match (self.contacts.ground, self.contacts.wall, self.mode) {
            (true, _, _) => MovementMode::Grounded,
            (false, true, MovementMode::WallSliding) => MovementMode::WallSliding,
            (false, true, _) => MovementMode::WallContact,
            (false, false, _) => MovementMode::Airborne,
        };
    }

    /// Apply the displacement accumulated by the last step.
    pub fn commit(&mut self) -> Vec2 {
        self.position += self.pending;
        self.pending = Vec2::ZERO;
        self.position
    }
}
