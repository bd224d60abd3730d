//! Checkpoint and hazard zones, and the systems that watch the player.

use bevy::ecs::message::{MessageReader, MessageWriter};
use bevy::math::bounding::{Aabb2d, BoundingVolume};
use bevy::prelude::*;

use crate::movement::{
    CheckpointReachedEvent, CollisionMask, DeathSignalEvent, Player, PlayerBody, RectMask,
};

/// Strict overlap: boxes that only share a face do not count.
pub fn overlaps(a: &Aabb2d, b: &Aabb2d) -> bool {
    a.min.x < b.max.x && b.min.x < a.max.x && a.min.y < b.max.y && b.min.y < a.max.y
}

#[derive(Component, Debug, Clone)]
pub struct CheckpointZone {
    pub bounds: Aabb2d,
    pub active: bool,
    /// Where this zone last published a checkpoint
    pub ground_point: Option<Vec2>,
}

impl CheckpointZone {
    pub fn new(bounds: Aabb2d) -> Self {
        Self {
            bounds,
            active: true,
            ground_point: None,
        }
    }

    /// Cast down from the zone center, as far as the zone is tall.
    pub fn probe<M: CollisionMask + ?Sized>(&self, mask: &M) -> Option<Vec2> {
        let center = self.bounds.center();
        let length = self.bounds.half_size().y * 2.0;
        mask.cast_ray(center, Dir2::NEG_Y, length)
            .map(|distance| center - Vec2::new(0.0, distance))
    }

    /// Fire once when `player` enters the zone. Returns the ground point to publish.
    pub fn try_fire<M: CollisionMask + ?Sized>(
        &mut self,
        player: &Aabb2d,
        mask: &M,
    ) -> Option<Vec2> {
        if !self.active || !overlaps(&self.bounds, player) {
            return None;
        }

        self.active = false;
        let Some(point) = self.probe(mask) else {
            warn!(
                "Checkpoint at ({:.2}, {:.2}) has no ground below it",
                self.bounds.center().x,
                self.bounds.center().y
            );
            return None;
        };
        self.ground_point = Some(point);
        Some(point)
    }

    /// Any checkpoint update re-arms every zone except the one that published it.
    pub fn on_checkpoint(&mut self, ground_point: Vec2) {
        self.active = self.ground_point != Some(ground_point);
    }
}

#[derive(Component, Debug, Clone)]
pub struct HazardZone {
    pub bounds: Aabb2d,
}

/// Falling below this height kills the player.
#[derive(Resource, Debug, Clone, Copy)]
pub struct KillPlane(pub f32);

impl Default for KillPlane {
    fn default() -> Self {
        Self(f32::NEG_INFINITY)
    }
}

/// True if the body touches a hazard or has fallen out of the level.
pub fn is_lethal<'a>(
    body: &Aabb2d,
    hazards: impl IntoIterator<Item = &'a Aabb2d>,
    kill_plane: f32,
) -> bool {
    body.center().y < kill_plane || hazards.into_iter().any(|hazard| overlaps(body, hazard))
}

pub(crate) fn detect_hazards(
    kill_plane: Res<KillPlane>,
    hazards: Query<&HazardZone>,
    players: Query<(Entity, &PlayerBody), With<Player>>,
    mut deaths: MessageWriter<DeathSignalEvent>,
) {
    for (player, body) in &players {
        if body.is_dead() {
            continue;
        }
        if is_lethal(
            &body.bounds(),
            hazards.iter().map(|zone| &zone.bounds),
            kill_plane.0,
        ) {
            deaths.write(DeathSignalEvent { player });
        }
    }
}

pub(crate) fn detect_checkpoints(
    mask: Res<RectMask>,
    mut zones: Query<&mut CheckpointZone>,
    players: Query<&PlayerBody, With<Player>>,
    mut reached: MessageWriter<CheckpointReachedEvent>,
) {
    for body in &players {
        if body.is_dead() {
            continue;
        }
        let bounds = body.bounds();
        for mut zone in &mut zones {
            if let Some(ground_point) = zone.try_fire(&bounds, &*mask) {
                reached.write(CheckpointReachedEvent { ground_point });
            }
        }
    }
}

pub(crate) fn rearm_checkpoints(
    mut reached: MessageReader<CheckpointReachedEvent>,
    mut zones: Query<&mut CheckpointZone>,
) {
    for event in reached.read() {
        for mut zone in &mut zones {
            zone.on_checkpoint(event.ground_point);
        }
    }
}

pub(crate) fn update_checkpoint_visuals(
    mut zones: Query<(&CheckpointZone, &mut Sprite), Changed<CheckpointZone>>,
) {
    for (zone, mut sprite) in &mut zones {
        sprite.color = if zone.active {
            Color::srgba(0.9, 0.8, 0.3, 0.6)
        } else {
            Color::srgba(0.4, 0.9, 0.5, 0.6)
        };
    }
}
