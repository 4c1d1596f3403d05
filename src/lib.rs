//! Rocket Shooter simulation core.
//!
//! A fixed-timestep arcade shooter: the ship, asteroids, bullets, power-ups,
//! a tiered boss and particle explosions, advanced one tick at a time by
//! [`compute::tick`].  Rendering, input polling and audio are left to the
//! caller; the core hands back a [`snapshot::Frame`] and a list of
//! [`entities::GameEvent`]s each tick.

pub mod clock;
pub mod collision;
pub mod combat;
pub mod compute;
pub mod config;
pub mod constants;
pub mod entities;
pub mod error;
pub mod geometry;
pub mod highscore;
pub mod input;
pub mod motion;
pub mod snapshot;
pub mod spawner;
pub mod timers;

pub use config::{GameConfig, ShipKind};
pub use error::{GameError, HighScoreError};
