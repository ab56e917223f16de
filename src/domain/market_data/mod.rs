//! Market data aggregate: candles, their value objects and where they come from.

pub mod entities;
pub mod repositories;
pub mod sample;
pub mod value_objects;

pub use entities::*;
pub use repositories::{IndexPicker, MarketDataRepository};
pub use sample::{sample_candles, sample_series};
pub use value_objects::*;
