//! life_invaders — a Game-of-Life colony invades, the player shoots it down.
//!
//! The library is renderer-agnostic: `grid` owns the automaton, `compute`
//! drives a session, and the binary only polls input and draws.

pub mod compute;
pub mod config;
pub mod entities;
pub mod error;
pub mod grid;
pub mod input;
pub mod patterns;
pub mod starfield;
