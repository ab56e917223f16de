use crate::config::BinanceConfig;
use crate::domain::{
    errors::InfrastructureError,
    logging::LogComponent,
    market_data::{CandleSeries, IndexPicker, MarketDataRepository, Symbol, TimeInterval, sample_series},
};
use crate::{log_info, log_warn};
use derive_more::Display;

/// Where a loaded history came from
#[derive(Debug, Clone, PartialEq, Display)]
pub enum DataOrigin {
    #[display(fmt = "sample data")]
    Sample,
    #[display(fmt = "{} {}", symbol, interval)]
    Live { symbol: Symbol, interval: TimeInterval },
}

#[derive(Debug, Clone, PartialEq)]
pub struct LoadedHistory {
    pub series: CandleSeries,
    pub origin: DataOrigin,
}

impl LoadedHistory {
    pub fn sample() -> Self {
        Self { series: sample_series(), origin: DataOrigin::Sample }
    }
}

/// Use case: history for a random tradable pair and interval, falling back
/// to the bundled sample on any failure.
pub struct LoadHistoryUseCase<R, P> {
    repository: R,
    picker: P,
    config: BinanceConfig,
}

impl<R, P> LoadHistoryUseCase<R, P>
where
    R: MarketDataRepository,
    P: IndexPicker,
{
    pub fn new(repository: R, picker: P, config: BinanceConfig) -> Self {
        Self { repository, picker, config }
    }

    /// Never fails: errors are logged and answered with the sample series.
    pub async fn execute(&mut self, now_ms: u64) -> LoadedHistory {
        match self.try_live(now_ms).await {
            Ok(history) => history,
            Err(e) => {
                log_warn!(LogComponent::Application("LoadHistory"), "live data unavailable ({}), using sample", e);
                LoadedHistory::sample()
            }
        }
    }

    pub async fn try_live(&mut self, now_ms: u64) -> Result<LoadedHistory, InfrastructureError> {
        let symbols = self.repository.tradable_symbols(&self.config.quote_asset).await?;
        if symbols.is_empty() {
            return Err(InfrastructureError::EmptyResult("tradable symbols"));
        }
        let symbol = symbols
            .get(self.picker.pick(symbols.len()))
            .cloned()
            .ok_or(InfrastructureError::EmptyResult("tradable symbols"))?;

        let interval = self
            .config
            .intervals
            .get(self.picker.pick(self.config.intervals.len()))
            .copied()
            .ok_or(InfrastructureError::EmptyResult("intervals"))?;

        let lookback_ms = self.config.lookback_candles.saturating_mul(interval.duration_ms());
        let start_time_ms = now_ms.saturating_sub(lookback_ms);

        let candles = self
            .repository
            .historical_candles(&symbol, interval, start_time_ms, self.config.klines_limit)
            .await?;
        if candles.is_empty() {
            return Err(InfrastructureError::EmptyResult("klines"));
        }

        let series = CandleSeries::new(candles)?;
        log_info!(
            LogComponent::Application("LoadHistory"),
            "{} candles of {} {}",
            series.len(),
            symbol,
            interval
        );
        Ok(LoadedHistory { series, origin: DataOrigin::Live { symbol, interval } })
    }
}
