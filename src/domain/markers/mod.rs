//! Trade-plan markers and the placement state machine.

pub mod placement;
pub mod value_objects;

pub use placement::*;
pub use value_objects::*;
