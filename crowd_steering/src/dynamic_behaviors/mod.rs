//! Behaviours for the dynamic model: they return accelerations that
//! [`Kinematic::update`](crate::Kinematic::update) integrates against the
//! agent's current velocity and rotation.
//!
//! Several behaviours reuse another one's computation with a substituted
//! target (pursuit seeks a predicted point, facing aligns to a computed
//! angle). Those shared steps are plain functions and methods rather than
//! nested behaviour objects.

pub mod align;
pub mod dynamic_arrive;
pub mod dynamic_seek;
pub mod dynamic_wander;
pub mod face;
pub mod pursue;
pub mod velocity_matching;
