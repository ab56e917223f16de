//! Browser and network adapters: Binance REST, canvas rendering, console logging.

pub mod http;
pub mod rendering;
pub mod services;
