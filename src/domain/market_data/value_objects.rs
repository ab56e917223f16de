use derive_more::{Constructor, Deref, Display, From, Into};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use strum::{AsRefStr, EnumIter, EnumString};

/// Value Object - price
#[derive(Debug, Clone, Copy, PartialEq, Default, From, Into, Deref, Constructor, Display, Serialize, Deserialize)]
#[display(fmt = "{:.2}", _0)]
pub struct Price(f64);

impl Price {
    pub fn value(&self) -> f64 {
        self.0
    }
}

impl PartialOrd for Price {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.0.partial_cmp(&other.0)
    }
}

/// Value Object - unix time in seconds
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, From, Into, Deref, Constructor, Serialize, Deserialize,
)]
pub struct Timestamp(u64);

impl Timestamp {
    pub fn value(&self) -> u64 {
        self.0
    }

    /// Exchange open times come in milliseconds.
    pub fn from_millis(millis: u64) -> Self {
        Self(millis / 1000)
    }
}

/// Value Object - OHLC prices of one candle
#[derive(Debug, Clone, Copy, PartialEq, Constructor, Serialize, Deserialize)]
pub struct Ohlc {
    pub open: Price,
    pub high: Price,
    pub low: Price,
    pub close: Price,
}

impl Ohlc {
    pub fn is_valid(&self) -> bool {
        let values = [self.open, self.high, self.low, self.close];
        values.iter().all(|p| p.value().is_finite())
            && self.high >= self.open
            && self.high >= self.close
            && self.high >= self.low
            && self.low <= self.open
            && self.low <= self.close
    }
}

/// Value Object - trading pair
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deref, Display, Serialize, Deserialize)]
#[display(fmt = "{}", _0)]
pub struct Symbol(String);

impl Symbol {
    pub fn value(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Symbol {
    fn from(value: &str) -> Self {
        Self(value.to_uppercase())
    }
}

/// Value Object - candle granularity, spelled the way Binance spells it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, EnumString, AsRefStr, Serialize, Deserialize)]
pub enum TimeInterval {
    #[strum(serialize = "1m")]
    #[serde(rename = "1m")]
    #[display(fmt = "1m")]
    OneMinute,

    #[strum(serialize = "5m")]
    #[serde(rename = "5m")]
    #[display(fmt = "5m")]
    FiveMinutes,

    #[strum(serialize = "15m")]
    #[serde(rename = "15m")]
    #[display(fmt = "15m")]
    FifteenMinutes,

    #[strum(serialize = "1h")]
    #[serde(rename = "1h")]
    #[display(fmt = "1h")]
    OneHour,

    #[strum(serialize = "4h")]
    #[serde(rename = "4h")]
    #[display(fmt = "4h")]
    FourHours,

    #[strum(serialize = "1d")]
    #[serde(rename = "1d")]
    #[display(fmt = "1d")]
    OneDay,
}

impl TimeInterval {
    pub fn to_binance_str(&self) -> &str {
        self.as_ref()
    }

    pub fn duration_ms(&self) -> u64 {
        match self {
            Self::OneMinute => 60 * 1000,
            Self::FiveMinutes => 5 * 60 * 1000,
            Self::FifteenMinutes => 15 * 60 * 1000,
            Self::OneHour => 60 * 60 * 1000,
            Self::FourHours => 4 * 60 * 60 * 1000,
            Self::OneDay => 24 * 60 * 60 * 1000,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;
    use strum::IntoEnumIterator;

    #[test]
    fn interval_strings_round_trip() {
        for interval in TimeInterval::iter() {
            assert_eq!(TimeInterval::from_str(interval.to_binance_str()).unwrap(), interval);
        }
        assert_eq!(TimeInterval::FourHours.duration_ms(), 14_400_000);
    }

    #[test]
    fn timestamp_drops_milliseconds() {
        assert_eq!(Timestamp::from_millis(1_701_388_800_999).value(), 1_701_388_800);
    }

    #[test]
    fn ohlc_rejects_high_below_close() {
        let bad = Ohlc::new(Price::new(10.0), Price::new(9.0), Price::new(8.0), Price::new(9.5));
        assert!(!bad.is_valid());
        let good = Ohlc::new(Price::new(80.0), Price::new(85.0), Price::new(78.0), Price::new(82.0));
        assert!(good.is_valid());
    }
}
