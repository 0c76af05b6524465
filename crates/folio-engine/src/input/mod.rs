pub mod keys;
pub mod queue;
pub mod transition;
