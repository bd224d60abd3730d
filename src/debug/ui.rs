//! Debug domain: overlay widgets and text.

use bevy::prelude::*;

use crate::movement::PlayerBody;

/// Marker for the movement info overlay
#[derive(Component, Debug)]
pub struct DebugInfoOverlay;

/// Marker for status message text
#[derive(Component, Debug)]
pub struct DebugStatusMessage;

pub(crate) fn spawn_debug_info_overlay(commands: &mut Commands) {
    commands.spawn((
        DebugInfoOverlay,
        Text::new("Loading..."),
        TextFont {
            font_size: 12.0,
            ..default()
        },
        TextColor(Color::srgb(0.8, 0.9, 0.8)),
        Node {
            position_type: PositionType::Absolute,
            left: Val::Px(20.0),
            bottom: Val::Px(20.0),
            padding: UiRect::all(Val::Px(8.0)),
            ..default()
        },
        BackgroundColor(Color::srgba(0.0, 0.0, 0.0, 0.7)),
        ZIndex(500),
    ));
}

pub(crate) fn spawn_status_message(commands: &mut Commands) {
    commands.spawn((
        DebugStatusMessage,
        Text::new(""),
        TextFont {
            font_size: 14.0,
            ..default()
        },
        TextColor(Color::srgb(0.9, 0.7, 0.3)),
        Node {
            position_type: PositionType::Absolute,
            right: Val::Px(20.0),
            top: Val::Px(20.0),
            ..default()
        },
        ZIndex(501),
    ));
}

/// Overlay text for one body.
pub(crate) fn body_info(body: &PlayerBody) -> String {
    format!(
        "Pos: ({:.2}, {:.2})\nVel: ({:.2}, {:.2})\nJump: ({:.2}, {:.2})\nState: {:?}\nMode: {:?}\nGround: {} Wall: {}\nAir jumps: {} Wall jumps: {}\nFacing: {:?}",
        body.position.x,
        body.position.y,
        body.velocity.x,
        body.velocity.y,
        body.jump_velocity.x,
        body.jump_velocity.y,
        body.state,
        body.mode,
        body.contacts.ground,
        body.contacts.wall,
        body.air_jumps_remaining,
        body.wall_jumps_remaining,
        body.facing
    )
}
