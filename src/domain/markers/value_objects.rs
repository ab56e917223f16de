use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::market_data::{Price, Timestamp};
use derive_more::{Constructor, Display};
use strum::{AsRefStr, EnumIter};

/// A (price, time) pair picked on the chart.
#[derive(Debug, Clone, Copy, PartialEq, Constructor)]
pub struct PricePoint {
    pub price: Price,
    pub time: Timestamp,
}

/// The three levels of a trade plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, AsRefStr)]
pub enum MarkerKind {
    #[display(fmt = "SL")]
    #[strum(serialize = "SL")]
    StopLoss,
    #[display(fmt = "EP")]
    #[strum(serialize = "EP")]
    Entry,
    #[display(fmt = "TP")]
    #[strum(serialize = "TP")]
    TakeProfit,
}

/// Reward distance over risk distance.
#[derive(Debug, Clone, Copy, PartialEq, Display)]
#[display(fmt = "1:{}", _0)]
pub struct RiskReward(f64);

impl Default for RiskReward {
    fn default() -> Self {
        Self(1.0)
    }
}

impl RiskReward {
    pub fn new(ratio: f64) -> DomainResult<Self> {
        if !ratio.is_finite() || ratio <= 0.0 {
            return Err(DomainError::InvalidRiskReward(ratio));
        }
        Ok(Self(ratio))
    }

    pub fn value(&self) -> f64 {
        self.0
    }

    /// `sl + (tp - sl) / (R + 1)`
    pub fn entry_between(&self, stop_loss: Price, take_profit: Price) -> Price {
        let sl = stop_loss.value();
        Price::new(sl + (take_profit.value() - sl) / (self.0 + 1.0))
    }

    /// Inverse of [`entry_between`](Self::entry_between) for a fixed stop-loss.
    pub fn take_profit_for(&self, stop_loss: Price, entry: Price) -> Price {
        let sl = stop_loss.value();
        Price::new(sl + (entry.value() - sl) * (self.0 + 1.0))
    }
}

/// Stop-loss, entry and take-profit of one placement.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarkerSet {
    pub stop_loss: PricePoint,
    pub entry: PricePoint,
    pub take_profit: PricePoint,
}

impl MarkerSet {
    /// Entry is derived; it takes the stop-loss time.
    pub fn from_points(stop_loss: PricePoint, take_profit: PricePoint, ratio: RiskReward) -> Self {
        let entry = PricePoint::new(ratio.entry_between(stop_loss.price, take_profit.price), stop_loss.time);
        Self { stop_loss, entry, take_profit }
    }

    pub fn level(&self, kind: MarkerKind) -> &PricePoint {
        match kind {
            MarkerKind::StopLoss => &self.stop_loss,
            MarkerKind::Entry => &self.entry,
            MarkerKind::TakeProfit => &self.take_profit,
        }
    }

    /// Long when the target sits above the stop.
    pub fn is_long(&self) -> bool {
        self.take_profit.price >= self.stop_loss.price
    }

    pub fn risk(&self) -> f64 {
        (self.entry.price.value() - self.stop_loss.price.value()).abs()
    }

    pub fn reward(&self) -> f64 {
        (self.take_profit.price.value() - self.entry.price.value()).abs()
    }
}
