//! Two-click stop-loss / take-profit placement.
//!
//! ```text
//! Idle --click(SL)--> AwaitingSecondPoint --click(TP)--> Complete
//!   ^                                                       |
//!   +---------------------------- reset --------------------+
//! ```
//!
//! A complete set is locked: plain clicks are refused until `reset`, or until
//! a level is armed with [`MarkerPlacement::arm`] and assigned directly.

use super::value_objects::{MarkerKind, MarkerSet, PricePoint, RiskReward};
use crate::domain::chart::ScreenPos;
use crate::domain::errors::MappingError;
use crate::domain::logging::LogComponent;
use crate::{log_debug, log_warn};

#[derive(Debug, Clone, PartialEq, Default)]
pub enum PlacementState {
    #[default]
    Idle,
    AwaitingSecondPoint {
        stop_loss: PricePoint,
        /// Where the first click landed, in pixels.
        anchor: ScreenPos,
    },
    Complete(MarkerSet),
}

#[derive(Debug, Clone, PartialEq)]
pub enum PlacementOutcome {
    Started(PricePoint),
    Completed(MarkerSet),
    /// A complete set was edited through an armed level.
    Updated(MarkerSet),
    Rejected(RejectReason),
}

#[derive(Debug, Clone, PartialEq)]
pub enum RejectReason {
    OutOfRange(MappingError),
    AlreadyComplete,
    MissingPrerequisite(MarkerKind),
}

#[derive(Debug, Clone, Default)]
pub struct MarkerPlacement {
    state: PlacementState,
    ratio: RiskReward,
    armed: Option<MarkerKind>,
}

impl MarkerPlacement {
    pub fn new(ratio: RiskReward) -> Self {
        Self { state: PlacementState::Idle, ratio, armed: None }
    }

    pub fn state(&self) -> &PlacementState {
        &self.state
    }

    pub fn ratio(&self) -> RiskReward {
        self.ratio
    }

    pub fn armed(&self) -> Option<MarkerKind> {
        self.armed
    }

    pub fn markers(&self) -> Option<&MarkerSet> {
        match &self.state {
            PlacementState::Complete(set) => Some(set),
            _ => None,
        }
    }

    /// Next qualifying click assigns `kind` directly.
    pub fn arm(&mut self, kind: MarkerKind) {
        log_debug!(LogComponent::Domain("Markers"), "{} armed", kind);
        self.armed = Some(kind);
    }

    pub fn disarm(&mut self) {
        self.armed = None;
    }

    pub fn reset(&mut self) {
        self.state = PlacementState::Idle;
        self.armed = None;
    }

    /// Feed one click, already mapped to domain values (or refused by the mapper).
    pub fn click(&mut self, mapped: Result<PricePoint, MappingError>, anchor: ScreenPos) -> PlacementOutcome {
        let point = match mapped {
            Ok(point) => point,
            Err(error) => {
                log_warn!(LogComponent::Domain("Markers"), "click dropped: {}", error);
                return PlacementOutcome::Rejected(RejectReason::OutOfRange(error));
            }
        };

        if let Some(kind) = self.armed.take() {
            return self.assign(kind, point, anchor);
        }

        match &self.state {
            PlacementState::Idle => self.start(point, anchor),
            PlacementState::AwaitingSecondPoint { stop_loss, .. } => {
                let set = MarkerSet::from_points(*stop_loss, point, self.ratio);
                self.state = PlacementState::Complete(set);
                log_debug!(
                    LogComponent::Domain("Markers"),
                    "placement complete: SL {} EP {} TP {}",
                    set.stop_loss.price,
                    set.entry.price,
                    set.take_profit.price
                );
                PlacementOutcome::Completed(set)
            }
            PlacementState::Complete(_) => {
                log_debug!(LogComponent::Domain("Markers"), "placement locked, reset first");
                PlacementOutcome::Rejected(RejectReason::AlreadyComplete)
            }
        }
    }

    /// Set one level directly.
    pub fn assign(&mut self, kind: MarkerKind, point: PricePoint, anchor: ScreenPos) -> PlacementOutcome {
        let ratio = self.ratio;
        match (kind, &self.state) {
            (MarkerKind::StopLoss, PlacementState::Complete(set)) => {
                let updated = MarkerSet::from_points(point, set.take_profit, ratio);
                self.state = PlacementState::Complete(updated);
                PlacementOutcome::Updated(updated)
            }
            (MarkerKind::StopLoss, _) => self.start(point, anchor),
            (MarkerKind::TakeProfit, PlacementState::Complete(set)) => {
                let updated = MarkerSet::from_points(set.stop_loss, point, ratio);
                self.state = PlacementState::Complete(updated);
                PlacementOutcome::Updated(updated)
            }
            (MarkerKind::TakeProfit, PlacementState::AwaitingSecondPoint { stop_loss, .. }) => {
                let set = MarkerSet::from_points(*stop_loss, point, ratio);
                self.state = PlacementState::Complete(set);
                PlacementOutcome::Completed(set)
            }
            (MarkerKind::Entry, PlacementState::Complete(set)) => {
                let take_profit =
                    PricePoint::new(ratio.take_profit_for(set.stop_loss.price, point.price), set.take_profit.time);
                let updated = MarkerSet { stop_loss: set.stop_loss, entry: point, take_profit };
                self.state = PlacementState::Complete(updated);
                PlacementOutcome::Updated(updated)
            }
            (kind, _) => {
                log_warn!(LogComponent::Domain("Markers"), "{} needs an existing placement", kind);
                PlacementOutcome::Rejected(RejectReason::MissingPrerequisite(kind))
            }
        }
    }

    /// The set a click at `pointer` would complete. Never changes state.
    pub fn preview(&self, pointer: &PricePoint) -> Option<MarkerSet> {
        match &self.state {
            PlacementState::AwaitingSecondPoint { stop_loss, .. } => {
                Some(MarkerSet::from_points(*stop_loss, *pointer, self.ratio))
            }
            _ => None,
        }
    }

    fn start(&mut self, stop_loss: PricePoint, anchor: ScreenPos) -> PlacementOutcome {
        self.state = PlacementState::AwaitingSecondPoint { stop_loss, anchor };
        log_debug!(LogComponent::Domain("Markers"), "stop-loss at {}", stop_loss.price);
        PlacementOutcome::Started(stop_loss)
    }
}
