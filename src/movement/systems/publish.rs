//! Movement domain: fan the per-step outbox out to typed messages.

use bevy::ecs::message::MessageWriter;
use bevy::prelude::*;

use crate::movement::{
    AirJumpEvent, DeathEffectEvent, DirectionChangedEvent, JumpEvent, LandedEvent, MovementEvent,
    MovementEvents, Player, PlayerStateChangedEvent, WallSlideEvent,
};

#[allow(clippy::too_many_arguments)]
pub(crate) fn publish_movement_events(
    mut query: Query<(Entity, &mut MovementEvents), With<Player>>,
    mut state_changed: MessageWriter<PlayerStateChangedEvent>,
    mut direction_changed: MessageWriter<DirectionChangedEvent>,
    mut jumped: MessageWriter<JumpEvent>,
    mut air_jumped: MessageWriter<AirJumpEvent>,
    mut wall_slid: MessageWriter<WallSlideEvent>,
    mut landed: MessageWriter<LandedEvent>,
    mut death_effect: MessageWriter<DeathEffectEvent>,
) {
    for (player, mut events) in &mut query {
        for event in events.drain() {
            match event {
                MovementEvent::StateChanged(state) => {
                    state_changed.write(PlayerStateChangedEvent { player, state });
                }
                MovementEvent::DirectionChanged(facing) => {
                    direction_changed.write(DirectionChangedEvent { player, facing });
                }
                MovementEvent::Jumped(direction) => {
                    jumped.write(JumpEvent { player, direction });
                }
                MovementEvent::AirJumped => {
                    air_jumped.write(AirJumpEvent { player });
                }
                MovementEvent::WallSlid(direction) => {
                    wall_slid.write(WallSlideEvent { player, direction });
                }
                MovementEvent::Landed => {
                    landed.write(LandedEvent { player });
                }
                MovementEvent::DeathEffect(direction) => {
                    death_effect.write(DeathEffectEvent { player, direction });
                }
            }
        }
    }
}
