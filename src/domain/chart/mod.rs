//! Chart aggregate: viewport, coordinate mapping and zone geometry.

pub mod coordinates;
pub mod entities;
pub mod value_objects;
pub mod zones;

pub use coordinates::*;
pub use entities::*;
pub use value_objects::*;
pub use zones::*;
