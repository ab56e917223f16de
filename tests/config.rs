use trade_zones_wasm::config::ChartConfig;
use trade_zones_wasm::domain::errors::AppError;
use trade_zones_wasm::domain::logging::LogLevel;
use trade_zones_wasm::domain::market_data::TimeInterval;

#[test]
fn defaults_match_public_binance_setup() {
    let config = ChartConfig::default();
    assert_eq!(config.binance.base_url, "https://api.binance.com/api/v3");
    assert_eq!(config.binance.quote_asset, "USDT");
    assert_eq!(config.binance.intervals.len(), 6);
    assert_eq!(config.binance.lookback_candles, 3000);
    assert_eq!(config.binance.klines_limit, 1000);
    assert_eq!((config.chart.width, config.chart.height), (800, 500));
    assert_eq!(config.risk_reward().unwrap().value(), 1.0);
    assert_eq!(config.log_level().unwrap(), LogLevel::Debug);
    assert!(config.validate().is_ok());
}

#[test]
fn partial_json_keeps_other_defaults() {
    let config = ChartConfig::from_json(
        r#"{ "binance": { "quote_asset": "BTC", "intervals": ["1h", "1d"] }, "log_level": "warn" }"#,
    )
    .unwrap();
    assert_eq!(config.binance.quote_asset, "BTC");
    assert_eq!(config.binance.intervals, vec![TimeInterval::OneHour, TimeInterval::OneDay]);
    assert_eq!(config.binance.klines_limit, 1000);
    assert_eq!(config.log_level().unwrap(), LogLevel::Warn);
    assert_eq!(config.risk_reward, 1.0);
}

#[test]
fn empty_document_is_all_defaults() {
    assert_eq!(ChartConfig::from_json("{}").unwrap(), ChartConfig::default());
}

#[test]
fn invalid_values_are_rejected() {
    for json in [
        r#"{ "risk_reward": 0 }"#,
        r#"{ "risk_reward": -1.5 }"#,
        r#"{ "log_level": "chatty" }"#,
        r#"{ "binance": { "intervals": [] } }"#,
        r#"{ "binance": { "klines_limit": 5000 } }"#,
        r#"{ "binance": { "intervals": ["2m"] } }"#,
        "not json",
    ] {
        assert!(ChartConfig::from_json(json).is_err(), "accepted {json}");
    }
}

#[test]
fn bad_ratio_surfaces_as_domain_error() {
    let config = ChartConfig { risk_reward: 0.0, ..ChartConfig::default() };
    assert!(matches!(config.risk_reward(), Err(AppError::Domain(_))));
}
