//! Debug domain: hotkeys and overlay refresh.

use bevy::ecs::message::MessageWriter;
use bevy::prelude::*;

use crate::debug::state::DebugState;
use crate::debug::ui::{
    DebugInfoOverlay, DebugStatusMessage, body_info, spawn_debug_info_overlay,
    spawn_status_message,
};
use crate::movement::{CheckpointReachedEvent, DeathSignalEvent, Player, PlayerBody};

/// Toggle the info overlay with F1 or backtick
pub(crate) fn toggle_info_overlay(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut debug_state: ResMut<DebugState>,
) {
    if keyboard.just_pressed(KeyCode::F1) || keyboard.just_pressed(KeyCode::Backquote) {
        debug_state.show_info = !debug_state.show_info;
        let msg = if debug_state.show_info {
            "Debug Info ON"
        } else {
            "Debug Info OFF"
        };
        debug_state.set_message(msg, 2.0);
        info!("[DEBUG] {}", msg);
    }
}

/// Handle keyboard shortcuts for debug actions
pub(crate) fn handle_debug_hotkeys(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut debug_state: ResMut<DebugState>,
    players: Query<(Entity, &PlayerBody), With<Player>>,
    mut deaths: MessageWriter<DeathSignalEvent>,
    mut checkpoints: MessageWriter<CheckpointReachedEvent>,
) {
    let ctrl = keyboard.pressed(KeyCode::ControlLeft) || keyboard.pressed(KeyCode::ControlRight);
    if !ctrl {
        return;
    }

    // Ctrl+K: Kill the player
    if keyboard.just_pressed(KeyCode::KeyK) {
        for (player, _) in &players {
            deaths.write(DeathSignalEvent { player });
        }
        debug_state.set_message("Death signal sent", 2.0);
        info!("[DEBUG] Death signal sent");
    }

    // Ctrl+C: Checkpoint at the player's feet
    if keyboard.just_pressed(KeyCode::KeyC) {
        if let Some((_, body)) = players.iter().next() {
            let ground_point = body.position - Vec2::new(0.0, body.half_extents.y);
            checkpoints.write(CheckpointReachedEvent { ground_point });
            debug_state.set_message(
                format!("Checkpoint: ({:.2}, {:.2})", ground_point.x, ground_point.y),
                2.0,
            );
            info!("[DEBUG] Checkpoint set at {:?}", ground_point);
        }
    }
}

pub(crate) fn update_status_message(
    mut commands: Commands,
    time: Res<Time>,
    mut debug_state: ResMut<DebugState>,
    mut text_query: Query<&mut Text, With<DebugStatusMessage>>,
) {
    debug_state.tick_message(time.delta_secs());

    let Ok(mut text) = text_query.single_mut() else {
        spawn_status_message(&mut commands);
        return;
    };
    let message = debug_state
        .status_message
        .as_ref()
        .map(|(message, _)| message.as_str())
        .unwrap_or_default();
    if text.as_str() != message {
        **text = message.to_string();
    }
}

/// Update the info overlay with the current player body
pub(crate) fn update_debug_info_overlay(
    mut commands: Commands,
    debug_state: Res<DebugState>,
    players: Query<&PlayerBody, With<Player>>,
    mut overlay_query: Query<&mut Text, With<DebugInfoOverlay>>,
    existing_overlay: Query<Entity, With<DebugInfoOverlay>>,
) {
    if !debug_state.show_info {
        for entity in &existing_overlay {
            commands.entity(entity).despawn();
        }
        return;
    }

    if existing_overlay.is_empty() {
        spawn_debug_info_overlay(&mut commands);
        return;
    }

    if let (Some(body), Ok(mut text)) = (players.iter().next(), overlay_query.single_mut()) {
        **text = body_info(body);
    }
}
