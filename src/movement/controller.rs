//! One simulation step: motor, jump state machine, collision, state publish.

use bevy::prelude::*;

use crate::movement::collision::{CollisionMask, Resolution, resolve};
use crate::movement::components::PlayerBody;
use crate::movement::events::MovementEvents;
use crate::movement::resources::MovementTuning;
use crate::movement::{jump, motor, publish, respawn};

/// Signals sampled once per step.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct StepInput {
    /// Horizontal axis, clamped to [-1, 1]
    pub horizontal: f32,
    /// Jump went down since the previous step
    pub jump_pressed: bool,
    pub dt: f32,
}

impl PlayerBody {
    /// Run one step. The resulting displacement is left in `pending` until
    /// [`PlayerBody::commit`], so `position` still reads the pre-step value.
    pub fn step<M: CollisionMask + ?Sized>(
        &mut self,
        tuning: &MovementTuning,
        input: StepInput,
        mask: &M,
        events: &mut MovementEvents,
    ) {
        let dt = input.dt;
        if !dt.is_finite() || dt <= 0.0 {
            return;
        }

        self.clock.advance(dt);
        self.pending = Vec2::ZERO;

        if self.is_dead() {
            respawn::tick(self, tuning, dt, events);
            return;
        }

        let horizontal = if input.horizontal.is_finite() {
            input.horizontal.clamp(-1.0, 1.0)
        } else {
            0.0
        };

        motor::drive(self, tuning, horizontal, dt);

        jump::decay(self, tuning, dt);
        jump::buffer_input(self, input.jump_pressed);
        jump::resolve(self, tuning, input.jump_pressed, events);

        motor::combine(self);
        motor::clamp_fall(self, tuning);
        jump::apply_wall_slide(self, tuning);
        motor::clamp_horizontal(self, tuning);
        motor::update_facing(self, events);

        let displacement = self.motion * dt;
        let resolution = if displacement != Vec2::ZERO {
            resolve(self, tuning, horizontal, displacement, mask, events)
        } else {
            Resolution::default()
        };

        self.pending = resolution.total();
        self.refresh_mode();
        publish::settle_state(self, tuning, resolution.displacement.x, events);
    }

    /// Step then commit, for hosts without a separate late phase.
    pub fn advance<M: CollisionMask + ?Sized>(
        &mut self,
        tuning: &MovementTuning,
        input: StepInput,
        mask: &M,
        events: &mut MovementEvents,
    ) -> Vec2 {
        self.step(tuning, input, mask, events);
        self.commit()
    }

    /// Death signal from a hazard or the host.
    pub fn kill(&mut self, tuning: &MovementTuning, events: &mut MovementEvents) -> bool {
        respawn::trigger_death(self, tuning, events)
    }

    /// Checkpoint event from the level.
    pub fn set_checkpoint(&mut self, ground_point: Vec2) {
        respawn::update_checkpoint(self, ground_point);
    }
}
