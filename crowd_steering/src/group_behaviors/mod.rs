//! Behaviours reacting to several other entities at once.
//!
//! Neighbours and obstacles are borrowed for the duration of a single call and
//! must not be mutated meanwhile. The steered agent may appear in its own
//! neighbour slice; it is skipped by `agent_id`.

pub mod collision_avoidance;
pub mod obstacle_avoidance;
pub mod separation;
