//! Timed text players. Each is a [`Step`](crate::core::time::Step) machine.

pub mod counter;
pub mod terminal;
pub mod typewriter;
