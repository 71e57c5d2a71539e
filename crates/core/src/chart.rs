use crate::domain::analysis::ChartData;
use rand::Rng;
use serde_json::Value;

pub const PRICE_HISTORY_KEY: &str = "price_history";
pub const PRICE_HISTORY_LEN: usize = 90;
pub const PRICE_BASELINE: f64 = 100.0;

/// Cumulative sum of `PRICE_HISTORY_LEN` uniform [0, 1) steps, offset by `PRICE_BASELINE`.
pub fn price_history<R: Rng + ?Sized>(rng: &mut R) -> Vec<f64> {
    let mut total = 0.0;
    (0..PRICE_HISTORY_LEN)
        .map(|_| {
            total += rng.gen::<f64>();
            total + PRICE_BASELINE
        })
        .collect()
}

pub fn generate_chart_data<R: Rng + ?Sized>(rng: &mut R) -> ChartData {
    let mut data = ChartData::new();
    data.insert(
        PRICE_HISTORY_KEY.to_string(),
        Value::from(price_history(rng)),
    );
    data
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn history_is_non_decreasing_above_baseline() {
        let mut rng = StdRng::seed_from_u64(3);
        let prices = price_history(&mut rng);
        assert_eq!(prices.len(), PRICE_HISTORY_LEN);
        assert!(prices.iter().all(|p| *p >= PRICE_BASELINE));
        assert!(prices.windows(2).all(|w| w[0] <= w[1]));
        // 90 steps below 1.0 each.
        assert!(prices[PRICE_HISTORY_LEN - 1] < PRICE_BASELINE + PRICE_HISTORY_LEN as f64);
    }

    #[test]
    fn chart_data_holds_only_price_history() {
        let mut rng = StdRng::seed_from_u64(11);
        let data = generate_chart_data(&mut rng);
        assert_eq!(data.len(), 1);
        let series = data[PRICE_HISTORY_KEY].as_array().unwrap();
        assert_eq!(series.len(), PRICE_HISTORY_LEN);
        assert!(series.iter().all(|v| v.as_f64().is_some()));
    }
}
