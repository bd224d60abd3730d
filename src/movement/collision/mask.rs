//! Ray-castable collision masks.

use bevy::math::bounding::{Aabb2d, RayCast2d};
use bevy::prelude::*;

/// "Does a ray from `origin` along `direction` hit the level within
/// `max_distance`?" Returns the hit distance.
pub trait CollisionMask {
    fn cast_ray(&self, origin: Vec2, direction: Dir2, max_distance: f32) -> Option<f32>;
}

impl<M: CollisionMask + ?Sized> CollisionMask for &M {
    fn cast_ray(&self, origin: Vec2, direction: Dir2, max_distance: f32) -> Option<f32> {
        (**self).cast_ray(origin, direction, max_distance)
    }
}

/// A missing mask never hits, so the body passes through.
impl<M: CollisionMask> CollisionMask for Option<M> {
    fn cast_ray(&self, origin: Vec2, direction: Dir2, max_distance: f32) -> Option<f32> {
        self.as_ref()
            .and_then(|mask| mask.cast_ray(origin, direction, max_distance))
    }
}

/// Axis-aligned solids in world space.
#[derive(Resource, Debug, Clone, Default)]
pub struct RectMask {
    solids: Vec<Aabb2d>,
}

impl RectMask {
    pub fn new(solids: Vec<Aabb2d>) -> Self {
        Self { solids }
    }

    /// True if `bounds` overlaps a solid by more than `tolerance` on both axes.
    /// Touching faces do not count.
    pub fn penetrates(&self, bounds: &Aabb2d, tolerance: f32) -> bool {
        self.solids.iter().any(|solid| {
            let overlap_x = bounds.max.x.min(solid.max.x) - bounds.min.x.max(solid.min.x);
            let overlap_y = bounds.max.y.min(solid.max.y) - bounds.min.y.max(solid.min.y);
            overlap_x > tolerance && overlap_y > tolerance
        })
    }
}

impl CollisionMask for RectMask {
    fn cast_ray(&self, origin: Vec2, direction: Dir2, max_distance: f32) -> Option<f32> {
        let ray = RayCast2d::new(origin, direction, max_distance);
        self.solids
            .iter()
            .filter_map(|solid| ray.aabb_intersection_at(solid))
            .min_by(|a, b| a.total_cmp(b))
    }
}
