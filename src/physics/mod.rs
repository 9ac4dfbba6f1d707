//! Collision primitives shared by the player body and block targeting.
pub mod collision;

pub use collision::{Aabb, Ray};
