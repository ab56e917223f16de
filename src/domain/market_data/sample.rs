use super::entities::{Candle, CandleSeries};
use super::value_objects::{Ohlc, Price, Timestamp};

/// Daily bars used when nothing live is available: (open time, open, high, low, close).
const SAMPLE_BARS: [(u64, f64, f64, f64, f64); 20] = [
    (1701388800, 80.0, 85.0, 78.0, 82.0),    // 2023-12-01
    (1701475200, 82.0, 87.0, 81.0, 85.0),    // 2023-12-02
    (1701561600, 85.0, 88.0, 83.0, 87.0),    // 2023-12-03
    (1701648000, 87.0, 90.0, 85.0, 88.0),    // 2023-12-04
    (1701734400, 88.0, 92.0, 87.0, 90.0),    // 2023-12-05
    (1701820800, 90.0, 95.0, 88.0, 93.0),    // 2023-12-06
    (1701907200, 93.0, 96.0, 91.0, 94.0),    // 2023-12-07
    (1701993600, 94.0, 98.0, 92.0, 95.0),    // 2023-12-08
    (1702080000, 95.0, 100.0, 94.0, 98.0),   // 2023-12-09
    (1702166400, 98.0, 102.0, 96.0, 100.0),  // 2023-12-10
    (1704067200, 100.0, 105.0, 98.0, 103.0), // 2024-01-01
    (1704153600, 103.0, 107.0, 101.0, 102.0), // 2024-01-02
    (1704240000, 102.0, 108.0, 100.0, 107.0), // 2024-01-03
    (1704326400, 107.0, 110.0, 105.0, 106.0), // 2024-01-04
    (1704412800, 106.0, 112.0, 104.0, 109.0), // 2024-01-05
    (1704499200, 109.0, 115.0, 107.0, 111.0), // 2024-01-06
    (1704585600, 111.0, 116.0, 110.0, 113.0), // 2024-01-07
    (1704672000, 113.0, 117.0, 111.0, 115.0), // 2024-01-08
    (1704758400, 115.0, 120.0, 114.0, 119.0), // 2024-01-09
    (1704844800, 119.0, 125.0, 118.0, 121.0), // 2024-01-10
];

pub fn sample_candles() -> Vec<Candle> {
    SAMPLE_BARS
        .iter()
        .map(|&(time, open, high, low, close)| {
            Candle::new(
                Timestamp::new(time),
                Ohlc::new(Price::new(open), Price::new(high), Price::new(low), Price::new(close)),
            )
        })
        .collect()
}

/// The deterministic fallback series.
pub fn sample_series() -> CandleSeries {
    // The table above is ordered and consistent, so validation cannot fail;
    // an empty series is still a safe answer if it ever does.
    CandleSeries::new(sample_candles()).unwrap_or_default()
}
