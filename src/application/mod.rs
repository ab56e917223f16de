pub mod chart_session;
pub mod use_cases;

pub use chart_session::ChartSession;
pub use use_cases::*;
