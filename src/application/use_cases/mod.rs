pub mod load_history;

pub use load_history::{DataOrigin, LoadHistoryUseCase, LoadedHistory};
