//! Axis-separated multi-ray collision resolution.
//!
//! Each step the body's box casts fans of parallel rays from its center
//! lines: one fan toward the facing side (walls), then one fan either down
//! (ground) or up (ceiling). A hit snaps the box edge onto the surface and
//! cancels the displacement on that axis.

use bevy::math::bounding::{Aabb2d, BoundingVolume};
use bevy::prelude::*;

use super::mask::CollisionMask;
use crate::movement::components::{Facing, MovementMode, PlayerBody};
use crate::movement::events::{MovementEvent, MovementEvents};
use crate::movement::resources::MovementTuning;

/// Evenly spaced ray origins from `start` to `end`, both inclusive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayFan {
    pub start: Vec2,
    pub end: Vec2,
    pub count: u32,
}

impl RayFan {
    pub fn origins(&self) -> impl Iterator<Item = Vec2> + '_ {
        (0..self.count).map(move |i| {
            if self.count == 1 {
                self.start.lerp(self.end, 0.5)
            } else {
                self.start.lerp(self.end, i as f32 / (self.count - 1) as f32)
            }
        })
    }
}

/// First ray, in cast order, that hit the mask.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SweepHit {
    pub origin: Vec2,
    pub distance: f32,
}

/// Cast every ray of `fan` until one hits. Later rays are not consulted.
///
/// A ray whose origin already lies inside a solid reports no hit, so an
/// overlapping neighbor never snaps the box by a whole extent.
pub fn sweep<M: CollisionMask + ?Sized>(
    mask: &M,
    fan: &RayFan,
    direction: Dir2,
    length: f32,
) -> Option<SweepHit> {
    fan.origins().find_map(|origin| {
        mask.cast_ray(origin, direction, length)
            .filter(|distance| *distance > 0.0)
            .map(|distance| SweepHit { origin, distance })
    })
}

/// Outcome of resolving one step's displacement.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Resolution {
    /// Tentative displacement with blocked axes zeroed
    pub displacement: Vec2,
    /// Snap that puts the box edge onto the surfaces that were hit
    pub correction: Vec2,
}

impl Resolution {
    pub fn total(&self) -> Vec2 {
        self.displacement + self.correction
    }
}

/// Clip `displacement` against `mask` and refresh the body's contact sensors.
///
/// Wall rays start from the box as it was at the start of the step. Ground
/// and ceiling rays start from the box shifted by the horizontal move the
/// wall check accepted. Nothing here moves the body.
pub fn resolve<M: CollisionMask + ?Sized>(
    body: &mut PlayerBody,
    tuning: &MovementTuning,
    horizontal_input: f32,
    displacement: Vec2,
    mask: &M,
    events: &mut MovementEvents,
) -> Resolution {
    let bounds = body.bounds();
    let mut resolution = Resolution {
        displacement,
        correction: Vec2::ZERO,
    };

    let moving_horizontally = displacement.x != 0.0;
    let moving_down = displacement.y < 0.0;
    let moving_up = displacement.y > 0.0;
    let moving_on_ground = displacement.y == 0.0 && moving_horizontally;

    if moving_horizontally || !body.contacts.ground {
        wall_check(body, tuning, horizontal_input, &bounds, mask, &mut resolution, events);
    }

    let shift = Vec2::new(resolution.displacement.x + resolution.correction.x, 0.0);
    let moved = Aabb2d {
        min: bounds.min + shift,
        max: bounds.max + shift,
    };

    if moving_down || moving_on_ground {
        ground_check(body, tuning, &moved, mask, &mut resolution, events);
    } else if moving_up {
        ceiling_check(body, tuning, &moved, mask, &mut resolution);
    }

    resolution
}

fn vertical_fan(bounds: &Aabb2d, tuning: &MovementTuning) -> RayFan {
    let center = bounds.center();
    RayFan {
        start: Vec2::new(bounds.min.x + tuning.raycast_offset, center.y),
        end: Vec2::new(bounds.max.x - tuning.raycast_offset, center.y),
        count: tuning.vertical_rays,
    }
}

fn horizontal_fan(bounds: &Aabb2d, tuning: &MovementTuning) -> RayFan {
    let center = bounds.center();
    RayFan {
        start: Vec2::new(center.x, bounds.min.y + tuning.raycast_offset),
        end: Vec2::new(center.x, bounds.max.y - tuning.raycast_offset),
        count: tuning.horizontal_rays,
    }
}

/// Walls are only detected on the side the body faces.
fn wall_check<M: CollisionMask + ?Sized>(
    body: &mut PlayerBody,
    tuning: &MovementTuning,
    horizontal_input: f32,
    bounds: &Aabb2d,
    mask: &M,
    resolution: &mut Resolution,
    events: &mut MovementEvents,
) {
    let now = body.clock.now();
    let facing = body.facing;
    let extent = bounds.half_size().x;
    let direction = match facing {
        Facing::Right => Dir2::X,
        Facing::Left => Dir2::NEG_X,
    };
    let length = extent + resolution.displacement.x.abs() + tuning.ray_skin;
    let pressing = Facing::from_axis(horizontal_input);

    let Some(hit) = sweep(mask, &horizontal_fan(bounds, tuning), direction, length) else {
        if body.contacts.wall {
            // Contact flicker inside the start grace window keeps the slide.
            let pressing_into_wall = pressing == Some(body.jump_direction.opposite());
            if body.wall_sliding()
                && pressing_into_wall
                && body
                    .clock
                    .within(body.stamps.wall_slide_start, tuning.wall_slide_start_leeway)
            {
                return;
            }

            body.stamps.left_wall = Some(now);
            body.jump_direction = facing;
            if body.wall_sliding() {
                body.stamps.wall_slide_stop = Some(now);
                body.mode = MovementMode::Airborne;
                debug!("Wall slide ended: left wall");
            }
        }
        body.contacts.wall = false;
        return;
    };

    resolution.correction.x = facing.sign() * (hit.distance - extent);
    resolution.displacement.x = 0.0;
    body.jump_velocity.x = 0.0;
    body.jump_direction = facing.opposite();

    if pressing == Some(facing) && !body.contacts.ground {
        if !body.wall_sliding() {
            let just_stopped = body
                .clock
                .within(body.stamps.wall_slide_stop, tuning.wall_slide_stop_leeway);
            if !just_stopped {
                body.stamps.wall_slide_start = Some(now);
                body.mode = MovementMode::WallSliding;
                debug!("Wall slide engaged: facing={:?}", facing);
            }
        }

        let sliding_down = body.motion.y < 0.0
            && !body
                .clock
                .within(body.stamps.wall_slide_start, tuning.wall_slide_start_leeway);
        if body.wall_sliding() && sliding_down {
            events.push(MovementEvent::WallSlid(facing));
        }
    } else if body.wall_sliding() {
        body.stamps.wall_slide_stop = Some(now);
        body.mode = MovementMode::WallContact;
        debug!("Wall slide ended: input released");
    }

    body.contacts.wall = !body.contacts.ground;
}

fn ground_check<M: CollisionMask + ?Sized>(
    body: &mut PlayerBody,
    tuning: &MovementTuning,
    bounds: &Aabb2d,
    mask: &M,
    resolution: &mut Resolution,
    events: &mut MovementEvents,
) {
    let extent = bounds.half_size().y;
    let length = extent + resolution.displacement.y.abs() + tuning.ray_skin;

    let Some(hit) = sweep(mask, &vertical_fan(bounds, tuning), Dir2::NEG_Y, length) else {
        if body.contacts.ground {
            body.stamps.left_ground = Some(body.clock.now());
            debug!(
                "Left ground: air_jumps_remaining={}",
                body.air_jumps_remaining
            );
        }
        body.contacts.ground = false;
        return;
    };

    resolution.correction.y = -(hit.distance - extent);
    resolution.displacement.y = 0.0;

    body.air_jumps_remaining = tuning.max_air_jumps;
    body.wall_jumps_remaining = tuning.max_wall_jumps;
    body.jump_velocity = Vec2::ZERO;

    if !body.contacts.ground {
        events.push(MovementEvent::Landed);
        debug!(
            "Landed: air_jumps_remaining={}, wall_jumps_remaining={}",
            body.air_jumps_remaining, body.wall_jumps_remaining
        );
    }
    body.contacts.ground = true;
    body.mode = MovementMode::Grounded;
}

fn ceiling_check<M: CollisionMask + ?Sized>(
    body: &mut PlayerBody,
    tuning: &MovementTuning,
    bounds: &Aabb2d,
    mask: &M,
    resolution: &mut Resolution,
) {
    body.contacts.ground = false;

    let extent = bounds.half_size().y;
    let length = extent + resolution.displacement.y.abs() + tuning.ray_skin;

    if let Some(hit) = sweep(mask, &vertical_fan(bounds, tuning), Dir2::Y, length) {
        resolution.correction.y = hit.distance - extent;
        resolution.displacement.y = 0.0;
        body.jump_velocity = Vec2::ZERO;
        debug!("Bumped ceiling at distance {:.3}", hit.distance);
    }
}
