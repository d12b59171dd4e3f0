//! Simulation core for Dapper Dasher.
//!
//! Everything here is window- and GPU-free: the binary feeds a [`world::World`]
//! one [`world::FrameInput`] and one frame delta per tick, then renders whatever
//! state the world ends up in.

pub mod animation;
pub mod collision;
pub mod config;
pub mod input;
pub mod kinematics;
pub mod parallax;
pub mod time;
pub mod world;

#[cfg(test)]
mod replay;
