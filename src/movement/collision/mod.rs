//! Collision resolver: ray sampling against an opaque level mask.

mod mask;
mod resolver;

pub use mask::{CollisionMask, RectMask};
pub use resolver::{RayFan, Resolution, SweepHit, resolve, sweep};
