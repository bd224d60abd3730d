//! Movement domain: inbound death and checkpoint signals.

use bevy::ecs::message::MessageReader;
use bevy::prelude::*;

use crate::movement::{
    CheckpointReachedEvent, DeathSignalEvent, MovementEvents, MovementTuning, Player, PlayerBody,
};

pub(crate) fn handle_checkpoint_updates(
    mut reached: MessageReader<CheckpointReachedEvent>,
    mut query: Query<&mut PlayerBody, With<Player>>,
) {
    for event in reached.read() {
        for mut body in &mut query {
            body.set_checkpoint(event.ground_point);
        }
    }
}

pub(crate) fn handle_death_signals(
    mut signals: MessageReader<DeathSignalEvent>,
    tuning: Res<MovementTuning>,
    mut query: Query<(&mut PlayerBody, &mut MovementEvents), With<Player>>,
) {
    for signal in signals.read() {
        let Ok((mut body, mut events)) = query.get_mut(signal.player) else {
            warn!("Death signal for unknown player {:?}", signal.player);
            continue;
        };
        body.kill(&tuning, &mut events);
    }
}
