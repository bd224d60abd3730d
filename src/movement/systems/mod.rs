//! Movement domain: system modules driving the player body each fixed step.

pub(crate) mod input;
pub(crate) mod publish;
pub(crate) mod signals;
pub(crate) mod simulate;

pub(crate) use input::read_input;
pub(crate) use publish::publish_movement_events;
pub(crate) use signals::{handle_checkpoint_updates, handle_death_signals};
pub(crate) use simulate::{commit_player_motion, simulate_players};

pub use simulate::SpatialQueryMask;
