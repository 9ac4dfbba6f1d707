pub mod input;
pub mod physics;
pub mod targeting;

// Re-export commonly used types
pub use input::{ControlState, LookDelta, LookFilter};
pub use physics::PlayerBody;
pub use targeting::RaycastHit;
