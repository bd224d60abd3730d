//! Movement domain: fixed-step simulation against the physics world.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::movement::collision::CollisionMask;
use crate::movement::{
    GameLayer, MovementEvents, MovementInput, MovementTuning, Player, PlayerBody, StepInput,
};

/// Level mask backed by avian's spatial query, hitting only `GameLayer::Ground`.
pub struct SpatialQueryMask<'q, 'w, 's> {
    query: &'q SpatialQuery<'w, 's>,
    filter: SpatialQueryFilter,
}

impl<'q, 'w, 's> SpatialQueryMask<'q, 'w, 's> {
    pub fn new(query: &'q SpatialQuery<'w, 's>) -> Self {
        Self {
            query,
            filter: SpatialQueryFilter::from_mask(GameLayer::Ground),
        }
    }
}

impl CollisionMask for SpatialQueryMask<'_, '_, '_> {
    fn cast_ray(&self, origin: Vec2, direction: Dir2, max_distance: f32) -> Option<f32> {
        self.query
            .cast_ray(origin, direction, max_distance, true, &self.filter)
            .map(|hit| hit.distance)
    }
}

pub(crate) fn simulate_players(
    time: Res<Time>,
    spatial_query: SpatialQuery,
    tuning: Res<MovementTuning>,
    mut input: ResMut<MovementInput>,
    mut query: Query<(&mut PlayerBody, &mut MovementEvents), With<Player>>,
) {
    let mask = SpatialQueryMask::new(&spatial_query);
    let step = StepInput {
        horizontal: input.horizontal,
        jump_pressed: input.jump_just_pressed,
        dt: time.delta_secs(),
    };

    for (mut body, mut events) in &mut query {
        body.step(&tuning, step, &mask, &mut events);
    }

    input.jump_just_pressed = false;
}

/// Apply the displacement accumulated by this step's simulation.
pub(crate) fn commit_player_motion(
    mut query: Query<(&mut PlayerBody, &mut Transform), With<Player>>,
) {
    for (mut body, mut transform) in &mut query {
        let position = body.commit();
        transform.translation.x = position.x;
        transform.translation.y = position.y;
    }
}
