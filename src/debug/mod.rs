//! Debug tooling for fast iteration on movement feel.
//!
//! Features:
//! - F1 toggles an overlay with the player body's live state
//! - Ctrl+K sends a death signal
//! - Ctrl+C sets a checkpoint at the player's feet

mod state;
mod systems;
mod ui;

use bevy::prelude::*;

pub use state::DebugState;
pub use ui::{DebugInfoOverlay, DebugStatusMessage};

use crate::debug::systems::{
    handle_debug_hotkeys, toggle_info_overlay, update_debug_info_overlay, update_status_message,
};

pub struct DebugPlugin;

impl Plugin for DebugPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<DebugState>().add_systems(
            Update,
            (
                toggle_info_overlay,
                handle_debug_hotkeys,
                update_status_message,
                update_debug_info_overlay,
            )
                .chain(),
        );
    }
}

#[cfg(test)]
mod tests {
    use bevy::prelude::*;

    use super::DebugState;
    use super::ui::body_info;
    use crate::movement::{MovementTuning, PlayerBody};

    #[test]
    fn test_status_message_expires() {
        let mut state = DebugState::default();
        state.set_message("hello", 0.5);

        state.tick_message(0.25);
        assert!(state.status_message.is_some());
        state.tick_message(0.25);
        assert!(state.status_message.is_none());
    }

    #[test]
    fn test_body_info_lists_counters() {
        let tuning = MovementTuning::default();
        let body = PlayerBody::spawn(Vec2::new(2.5, 2.0), &tuning).unwrap();
        let text = body_info(&body);

        assert!(text.starts_with("Pos: (2.50, 2.00)"));
        assert!(text.contains("Air jumps: 1 Wall jumps: 2"));
        assert!(text.contains("State: Idle"));
    }
}
