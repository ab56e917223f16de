//! Runtime configuration.
//!
//! Every field has a default, so a page may pass a partial JSON document (or
//! none at all).

use crate::domain::errors::AppError;
use crate::domain::logging::LogLevel;
use crate::domain::market_data::TimeInterval;
use crate::domain::markers::RiskReward;
use serde::Deserialize;
use std::str::FromStr;

/// Id of the optional `<script type="application/json">` element holding config.
pub const CONFIG_ELEMENT_ID: &str = "trade-zones-config";

/// Binance REST settings for the live data source
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct BinanceConfig {
    pub base_url: String,
    pub quote_asset: String,
    pub intervals: Vec<TimeInterval>,
    /// How many intervals back the history request starts
    pub lookback_candles: u64,
    /// Candles per klines request (exchange maximum is 1000)
    pub klines_limit: u32,
}

impl Default for BinanceConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.binance.com/api/v3".to_string(),
            quote_asset: "USDT".to_string(),
            intervals: vec![
                TimeInterval::OneMinute,
                TimeInterval::FiveMinutes,
                TimeInterval::FifteenMinutes,
                TimeInterval::OneHour,
                TimeInterval::FourHours,
                TimeInterval::OneDay,
            ],
            lookback_candles: 3000,
            klines_limit: 1000,
        }
    }
}

/// Fallback pixel size, used until the container reports its own.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ChartSizeConfig {
    pub width: u32,
    pub height: u32,
}

impl Default for ChartSizeConfig {
    fn default() -> Self {
        Self { width: 800, height: 500 }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    pub binance: BinanceConfig,
    pub chart: ChartSizeConfig,
    pub risk_reward: f64,
    pub log_level: String,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            binance: BinanceConfig::default(),
            chart: ChartSizeConfig::default(),
            risk_reward: 1.0,
            log_level: "debug".to_string(),
        }
    }
}

impl ChartConfig {
    pub fn from_json(json: &str) -> Result<Self, AppError> {
        let config: Self = serde_json::from_str(json).map_err(|e| AppError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), AppError> {
        self.risk_reward()?;
        self.log_level()?;
        if self.binance.intervals.is_empty() {
            return Err(AppError::Config("binance.intervals must not be empty".to_string()));
        }
        if self.binance.klines_limit == 0 || self.binance.klines_limit > 1000 {
            return Err(AppError::Config(format!(
                "binance.klines_limit must be within 1..=1000, got {}",
                self.binance.klines_limit
            )));
        }
        Ok(())
    }

    pub fn risk_reward(&self) -> Result<RiskReward, AppError> {
        Ok(RiskReward::new(self.risk_reward)?)
    }

    pub fn log_level(&self) -> Result<LogLevel, AppError> {
        LogLevel::from_str(&self.log_level)
            .map_err(|_| AppError::Config(format!("unknown log level '{}'", self.log_level)))
    }
}
