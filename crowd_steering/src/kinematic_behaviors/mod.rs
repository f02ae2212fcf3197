//! Behaviours for the kinematic model.
//!
//! These produce velocities that the agent adopts directly, and they turn the
//! agent to face its direction of travel as a side effect. Kinematic
//! behaviours own orientation; the dynamic behaviours never touch it.

pub mod kinematic_arrive;
pub mod kinematic_seek;
pub mod kinematic_wander;
