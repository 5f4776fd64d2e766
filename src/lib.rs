//! Endless-runner simulation: pure per-frame state transitions plus the
//! boundaries (input, persistence, randomness) the front-end plugs into.

pub mod boss;
pub mod collision;
pub mod compute;
pub mod config;
pub mod entities;
pub mod generator;
pub mod input;
pub mod particles;
pub mod persistence;
pub mod random;
pub mod ufo;
