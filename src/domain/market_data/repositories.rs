use crate::domain::errors::InfrastructureError;
use crate::domain::market_data::{Candle, Symbol, TimeInterval};

/// Source of exchange market data
#[allow(async_fn_in_trait)]
pub trait MarketDataRepository {
    /// Pairs currently tradable on spot against `quote_asset`
    async fn tradable_symbols(&self, quote_asset: &str) -> Result<Vec<Symbol>, InfrastructureError>;

    /// Historical candles starting at `start_time_ms`, oldest first
    async fn historical_candles(
        &self,
        symbol: &Symbol,
        interval: TimeInterval,
        start_time_ms: u64,
        limit: u32,
    ) -> Result<Vec<Candle>, InfrastructureError>;
}

/// Uniform choice of one index out of `len` (`len > 0`).
pub trait IndexPicker {
    fn pick(&mut self, len: usize) -> usize;
}
