use super::HttpUtils;
use crate::config::BinanceConfig;
use crate::domain::errors::InfrastructureError;
use crate::domain::logging::LogComponent;
use crate::domain::market_data::{
    Candle, MarketDataRepository, TimeInterval,
    value_objects::{Ohlc, Price, Symbol, Timestamp},
};
use crate::{log_debug, log_info};
use gloo_net::http::Request;
use serde::Deserialize;

/// One row of `/klines`: `[openTime, open, high, low, close, volume, ...]`
#[derive(Debug, Deserialize)]
struct BinanceHistoricalKline(
    u64,
    String,
    String,
    String,
    String,
    serde::de::IgnoredAny,
    serde::de::IgnoredAny,
    serde::de::IgnoredAny,
    serde::de::IgnoredAny,
    serde::de::IgnoredAny,
    serde::de::IgnoredAny,
    serde::de::IgnoredAny,
);

#[derive(Debug, Deserialize)]
struct ExchangeInfo {
    symbols: Vec<SymbolInfo>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SymbolInfo {
    symbol: String,
    status: String,
    quote_asset: String,
    #[serde(default)]
    is_spot_trading_allowed: bool,
}

impl SymbolInfo {
    fn is_tradable_against(&self, quote_asset: &str) -> bool {
        self.status == "TRADING" && self.quote_asset == quote_asset && self.is_spot_trading_allowed
    }
}

/// REST client for the public Binance spot API
#[derive(Debug, Clone)]
pub struct BinanceRestClient {
    base_url: String,
}

impl Default for BinanceRestClient {
    fn default() -> Self {
        Self::from_config(&BinanceConfig::default())
    }
}

impl BinanceRestClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self { base_url: base_url.into().trim_end_matches('/').to_string() }
    }

    pub fn from_config(config: &BinanceConfig) -> Self {
        Self::new(config.base_url.clone())
    }

    pub fn exchange_info_url(&self) -> String {
        format!("{}/exchangeInfo", self.base_url)
    }

    pub fn klines_url(&self, symbol: &Symbol, interval: TimeInterval, start_time_ms: u64, limit: u32) -> String {
        HttpUtils::build_url_with_params(
            &format!("{}/klines", self.base_url),
            &[
                ("symbol", symbol.value().to_string()),
                ("interval", interval.to_binance_str().to_string()),
                ("startTime", start_time_ms.to_string()),
                ("limit", limit.to_string()),
            ],
        )
    }

    async fn get_text(&self, url: &str) -> Result<String, InfrastructureError> {
        log_debug!(LogComponent::Infrastructure("BinanceAPI"), "GET {}", url);

        let response = Request::get(url)
            .send()
            .await
            .map_err(|e| InfrastructureError::Network(format!("{e:?}")))?;

        if !HttpUtils::is_success_status(response.status()) {
            return Err(InfrastructureError::Http { status: response.status() });
        }

        response.text().await.map_err(|e| InfrastructureError::Network(format!("{e:?}")))
    }
}

/// Symbols tradable on spot against `quote_asset`, in exchange order.
pub fn parse_exchange_info(body: &str, quote_asset: &str) -> Result<Vec<Symbol>, InfrastructureError> {
    let info: ExchangeInfo = serde_json::from_str(body)?;
    Ok(info
        .symbols
        .iter()
        .filter(|s| s.is_tradable_against(quote_asset))
        .map(|s| Symbol::from(s.symbol.as_str()))
        .collect())
}

/// Kline rows to candles: open time ms → s, OHLC strings → f64.
pub fn parse_klines(body: &str) -> Result<Vec<Candle>, InfrastructureError> {
    let klines: Vec<BinanceHistoricalKline> = serde_json::from_str(body)?;

    let parse = |field: &str, value: &str| {
        value
            .parse::<f64>()
            .map_err(|e| InfrastructureError::Parse(format!("invalid {field} price '{value}': {e}")))
    };

    klines
        .into_iter()
        .map(|kline| {
            let ohlc = Ohlc::new(
                Price::new(parse("open", &kline.1)?),
                Price::new(parse("high", &kline.2)?),
                Price::new(parse("low", &kline.3)?),
                Price::new(parse("close", &kline.4)?),
            );
            Ok(Candle::new(Timestamp::from_millis(kline.0), ohlc))
        })
        .collect()
}

impl MarketDataRepository for BinanceRestClient {
    async fn tradable_symbols(&self, quote_asset: &str) -> Result<Vec<Symbol>, InfrastructureError> {
        let body = self.get_text(&self.exchange_info_url()).await?;
        let symbols = parse_exchange_info(&body, quote_asset)?;
        log_info!(
            LogComponent::Infrastructure("BinanceAPI"),
            "{} pairs tradable against {}",
            symbols.len(),
            quote_asset
        );
        Ok(symbols)
    }

    async fn historical_candles(
        &self,
        symbol: &Symbol,
        interval: TimeInterval,
        start_time_ms: u64,
        limit: u32,
    ) -> Result<Vec<Candle>, InfrastructureError> {
        let body = self.get_text(&self.klines_url(symbol, interval, start_time_ms, limit)).await?;
        let candles = parse_klines(&body)?;
        log_info!(
            LogComponent::Infrastructure("BinanceAPI"),
            "loaded {} candles for {}-{}",
            candles.len(),
            symbol,
            interval
        );
        Ok(candles)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn klines_url_carries_all_parameters() {
        let client = BinanceRestClient::new("https://api.binance.com/api/v3/");
        let url = client.klines_url(&Symbol::from("ethusdt"), TimeInterval::FourHours, 12345, 1000);
        assert_eq!(
            url,
            "https://api.binance.com/api/v3/klines?symbol=ETHUSDT&interval=4h&startTime=12345&limit=1000"
        );
        assert_eq!(client.exchange_info_url(), "https://api.binance.com/api/v3/exchangeInfo");
    }
}
