pub use super::value_objects::{Ohlc, Price, Timestamp};
use crate::domain::errors::{DomainError, DomainResult};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Domain entity - Candle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Candle {
    pub time: Timestamp,
    pub ohlc: Ohlc,
}

impl Candle {
    pub fn new(time: Timestamp, ohlc: Ohlc) -> Self {
        Self { time, ohlc }
    }

    pub fn is_bullish(&self) -> bool {
        self.ohlc.close >= self.ohlc.open
    }
}

/// Ordered, immutable candle history.
///
/// Time is strictly increasing. The sequence is never edited in place; a
/// reload builds a new series. Clones share the underlying slice.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CandleSeries {
    candles: Arc<[Candle]>,
}

impl CandleSeries {
    pub fn new(candles: Vec<Candle>) -> DomainResult<Self> {
        for (index, candle) in candles.iter().enumerate() {
            if !candle.ohlc.is_valid() {
                return Err(DomainError::InvalidCandle { index });
            }
            if index > 0 && candle.time <= candles[index - 1].time {
                return Err(DomainError::UnorderedCandles { index });
            }
        }
        Ok(Self { candles: candles.into() })
    }

    pub fn candles(&self) -> &[Candle] {
        &self.candles
    }

    pub fn len(&self) -> usize {
        self.candles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candles.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Candle> {
        self.candles.get(index)
    }

    /// Bar index of a candle with exactly this open time.
    pub fn index_of(&self, time: Timestamp) -> Option<usize> {
        self.candles.binary_search_by(|c| c.time.cmp(&time)).ok()
    }

    /// Lowest low and highest high over the whole series
    pub fn price_range(&self) -> Option<(Price, Price)> {
        let first = self.candles.first()?;
        let (mut min_price, mut max_price) = (first.ohlc.low, first.ohlc.high);
        for candle in self.candles.iter() {
            if candle.ohlc.low < min_price {
                min_price = candle.ohlc.low;
            }
            if candle.ohlc.high > max_price {
                max_price = candle.ohlc.high;
            }
        }
        Some((min_price, max_price))
    }
}
