use quickcheck_macros::quickcheck;
use trade_zones_wasm::domain::chart::ScreenPos;
use trade_zones_wasm::domain::errors::MappingError;
use trade_zones_wasm::domain::market_data::{Price, Timestamp};
use trade_zones_wasm::domain::markers::{
    MarkerKind, MarkerPlacement, MarkerSet, PlacementOutcome, PlacementState, PricePoint, RejectReason, RiskReward,
};

fn point(price: f64, time: u64) -> PricePoint {
    PricePoint::new(Price::new(price), Timestamp::new(time))
}

const ANCHOR: ScreenPos = ScreenPos::new(10.0, 10.0);

fn complete(sl: f64, tp: f64) -> MarkerPlacement {
    let mut placement = MarkerPlacement::default();
    placement.click(Ok(point(sl, 100)), ANCHOR);
    placement.click(Ok(point(tp, 200)), ANCHOR);
    placement
}

#[quickcheck]
fn entry_is_midpoint_with_unit_ratio(sl: f64, tp: f64) -> bool {
    if !(sl.is_finite() && tp.is_finite()) || sl.abs() > 1e6 || tp.abs() > 1e6 {
        return true;
    }
    let set = MarkerSet::from_points(point(sl, 1), point(tp, 2), RiskReward::default());
    let expected = (sl + tp) / 2.0;
    (set.entry.price.value() - expected).abs() <= 1e-9 * expected.abs().max(1.0)
}

#[quickcheck]
fn risk_to_reward_follows_ratio(sl: u16, distance: u16, ratio: u8) -> bool {
    let ratio = RiskReward::new(ratio as f64 + 1.0).unwrap();
    let sl = sl as f64;
    let tp = sl + distance as f64 + 1.0;
    let set = MarkerSet::from_points(point(sl, 1), point(tp, 2), ratio);
    (set.reward() - set.risk() * ratio.value()).abs() < 1e-6
}

#[quickcheck]
fn preview_never_changes_state(price: f64) -> bool {
    let mut placement = MarkerPlacement::default();
    placement.click(Ok(point(80.0, 100)), ANCHOR);
    let before = placement.state().clone();
    let preview = placement.preview(&point(price, 200));
    preview.is_some() && *placement.state() == before
}

#[test]
fn two_clicks_complete_a_placement() {
    let mut placement = MarkerPlacement::default();
    assert_eq!(placement.click(Ok(point(80.0, 100)), ANCHOR), PlacementOutcome::Started(point(80.0, 100)));
    assert!(matches!(
        placement.state(),
        PlacementState::AwaitingSecondPoint { stop_loss, .. } if stop_loss.price == Price::new(80.0)
    ));

    let PlacementOutcome::Completed(set) = placement.click(Ok(point(100.0, 200)), ANCHOR) else {
        panic!("second click should complete");
    };
    assert_eq!(set.stop_loss.price, Price::new(80.0));
    assert_eq!(set.entry.price, Price::new(90.0));
    assert_eq!(set.take_profit.price, Price::new(100.0));
    assert_eq!(set.entry.time, set.stop_loss.time);
    assert!(set.is_long());
    assert_eq!(placement.markers(), Some(&set));
}

#[test]
fn short_placement_keeps_levels_ordered_downward() {
    let placement = complete(100.0, 70.0);
    let set = placement.markers().unwrap();
    assert!(!set.is_long());
    assert_eq!(set.entry.price, Price::new(85.0));
}

#[test]
fn idle_has_no_preview() {
    assert_eq!(MarkerPlacement::default().preview(&point(1.0, 1)), None);
    assert_eq!(complete(1.0, 2.0).preview(&point(1.0, 1)), None);
}

#[test]
fn completed_placement_is_locked() {
    let mut placement = complete(80.0, 100.0);
    let before = *placement.markers().unwrap();
    assert_eq!(
        placement.click(Ok(point(50.0, 300)), ANCHOR),
        PlacementOutcome::Rejected(RejectReason::AlreadyComplete)
    );
    assert_eq!(placement.markers(), Some(&before));

    placement.reset();
    assert_eq!(placement.state(), &PlacementState::Idle);
    assert!(matches!(placement.click(Ok(point(50.0, 300)), ANCHOR), PlacementOutcome::Started(_)));
}

#[test]
fn out_of_range_click_changes_nothing() {
    let mut placement = MarkerPlacement::default();
    let error = MappingError::OutsideTimeRange { x: -3.0 };
    assert_eq!(placement.click(Err(error), ANCHOR), PlacementOutcome::Rejected(RejectReason::OutOfRange(error)));
    assert_eq!(placement.state(), &PlacementState::Idle);

    placement.click(Ok(point(80.0, 100)), ANCHOR);
    let awaiting = placement.state().clone();
    placement.click(Err(MappingError::NoData), ANCHOR);
    assert_eq!(placement.state(), &awaiting);
}

#[test]
fn armed_stop_loss_replaces_and_rederives_entry() {
    let mut placement = complete(80.0, 100.0);
    placement.arm(MarkerKind::StopLoss);
    let PlacementOutcome::Updated(set) = placement.click(Ok(point(60.0, 150)), ANCHOR) else {
        panic!("armed SL should update");
    };
    assert_eq!(set.stop_loss.price, Price::new(60.0));
    assert_eq!(set.entry.price, Price::new(80.0));
    assert_eq!(set.take_profit.price, Price::new(100.0));
    assert_eq!(placement.armed(), None);
}

#[test]
fn armed_take_profit_replaces_and_rederives_entry() {
    let mut placement = complete(80.0, 100.0);
    placement.arm(MarkerKind::TakeProfit);
    let PlacementOutcome::Updated(set) = placement.click(Ok(point(120.0, 250)), ANCHOR) else {
        panic!("armed TP should update");
    };
    assert_eq!(set.entry.price, Price::new(100.0));
    assert_eq!(set.take_profit.time, Timestamp::new(250));
}

#[test]
fn armed_entry_rederives_take_profit() {
    let mut placement = complete(80.0, 100.0);
    placement.arm(MarkerKind::Entry);
    let PlacementOutcome::Updated(set) = placement.click(Ok(point(85.0, 150)), ANCHOR) else {
        panic!("armed EP should update");
    };
    assert_eq!(set.stop_loss.price, Price::new(80.0));
    assert_eq!(set.entry.price, Price::new(85.0));
    assert_eq!(set.take_profit.price, Price::new(90.0));
}

#[test]
fn armed_levels_without_prerequisites_are_no_ops() {
    let mut placement = MarkerPlacement::default();
    placement.arm(MarkerKind::Entry);
    assert_eq!(
        placement.click(Ok(point(85.0, 150)), ANCHOR),
        PlacementOutcome::Rejected(RejectReason::MissingPrerequisite(MarkerKind::Entry))
    );
    placement.arm(MarkerKind::TakeProfit);
    assert_eq!(
        placement.click(Ok(point(85.0, 150)), ANCHOR),
        PlacementOutcome::Rejected(RejectReason::MissingPrerequisite(MarkerKind::TakeProfit))
    );
    assert_eq!(placement.state(), &PlacementState::Idle);
}

#[test]
fn armed_take_profit_completes_a_pending_placement() {
    let mut placement = MarkerPlacement::default();
    placement.click(Ok(point(80.0, 100)), ANCHOR);
    placement.arm(MarkerKind::TakeProfit);
    assert!(matches!(placement.click(Ok(point(100.0, 200)), ANCHOR), PlacementOutcome::Completed(_)));
}

#[test]
fn armed_stop_loss_restarts_a_pending_placement() {
    let mut placement = MarkerPlacement::default();
    placement.click(Ok(point(80.0, 100)), ANCHOR);
    placement.arm(MarkerKind::StopLoss);
    assert_eq!(placement.click(Ok(point(70.0, 120)), ANCHOR), PlacementOutcome::Started(point(70.0, 120)));
}

#[test]
fn ratio_must_be_positive() {
    assert!(RiskReward::new(0.0).is_err());
    assert!(RiskReward::new(-2.0).is_err());
    assert!(RiskReward::new(f64::NAN).is_err());
    assert_eq!(RiskReward::new(2.0).unwrap().to_string(), "1:2");
}

#[test]
fn custom_ratio_shifts_entry_toward_stop() {
    let mut placement = MarkerPlacement::new(RiskReward::new(3.0).unwrap());
    placement.click(Ok(point(80.0, 100)), ANCHOR);
    let PlacementOutcome::Completed(set) = placement.click(Ok(point(120.0, 200)), ANCHOR) else {
        panic!("should complete");
    };
    assert_eq!(set.entry.price, Price::new(90.0));
}
