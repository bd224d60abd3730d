//! Core domain: camera setup and follow.

use bevy::prelude::*;

use crate::core::CAMERA_SCALE;
use crate::movement::Player;

/// Fraction of the remaining distance the camera closes per second.
const FOLLOW_RATE: f32 = 6.0;

pub(crate) fn setup_camera(mut commands: Commands) {
    commands.spawn((
        Camera2d,
        Projection::Orthographic(OrthographicProjection {
            scale: CAMERA_SCALE,
            ..OrthographicProjection::default_2d()
        }),
        Transform::from_xyz(16.0, 6.0, 0.0),
    ));
}

pub(crate) fn follow_player(
    time: Res<Time>,
    players: Query<&Transform, (With<Player>, Without<Camera2d>)>,
    mut cameras: Query<&mut Transform, With<Camera2d>>,
) {
    let Some(target) = players.iter().next() else {
        return;
    };
    for mut camera in &mut cameras {
        let next = follow_step(
            camera.translation.truncate(),
            target.translation.truncate(),
            time.delta_secs(),
        );
        camera.translation.x = next.x;
        camera.translation.y = next.y;
    }
}

/// Exponential approach toward `target`; never overshoots.
pub(crate) fn follow_step(current: Vec2, target: Vec2, dt: f32) -> Vec2 {
    let t = (1.0 - (-FOLLOW_RATE * dt).exp()).clamp(0.0, 1.0);
    current.lerp(target, t)
}
