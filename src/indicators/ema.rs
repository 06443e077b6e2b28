// =============================================================================
// Moving averages
// =============================================================================
//
// SMA — arithmetic mean of a trailing window.
//
// EMA — recursive average that weights recent values more heavily:
//   multiplier = 2 / (period + 1)
//   EMA_0      = value_0
//   EMA_t      = value_t * multiplier + EMA_{t-1} * (1 - multiplier)
//
// The EMA is seeded with the first value rather than an SMA so that it is
// defined for series shorter than `period` (the MACD signal line needs a value
// as soon as a single MACD point exists).
// =============================================================================

/// Mean of the last `period` values, `None` when the slice is too short.
pub fn sma(values: &[f64], period: usize) -> Option<f64> {
    if period == 0 || values.len() < period {
        return None;
    }
    let window = &values[values.len() - period..];
    Some(window.iter().sum::<f64>() / period as f64)
}

/// EMA series with one output per input value.
///
/// Returns an empty `Vec` for empty input or `period == 0`. Stops producing
/// values at the first non-finite intermediate result.
pub fn calculate_ema(values: &[f64], period: usize) -> Vec<f64> {
    let Some((&first, rest)) = values.split_first() else {
        return Vec::new();
    };
    if period == 0 || !first.is_finite() {
        return Vec::new();
    }

    let multiplier = 2.0 / (period + 1) as f64;

    let mut result = Vec::with_capacity(values.len());
    result.push(first);

    let mut prev = first;
    for &value in rest {
        let ema = value * multiplier + prev * (1.0 - multiplier);
        if !ema.is_finite() {
            break;
        }
        result.push(ema);
        prev = ema;
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sma_window() {
        assert_eq!(sma(&[1.0, 2.0, 3.0, 4.0], 2), Some(3.5));
        assert_eq!(sma(&[1.0, 2.0], 3), None);
        assert_eq!(sma(&[1.0], 0), None);
    }

    #[test]
    fn ema_empty_input() {
        assert!(calculate_ema(&[], 9).is_empty());
        assert!(calculate_ema(&[1.0], 0).is_empty());
    }

    #[test]
    fn ema_seeded_with_first_value() {
        let ema = calculate_ema(&[5.0], 9);
        assert_eq!(ema, vec![5.0]);
    }

    #[test]
    fn ema_known_values() {
        // period 3 => multiplier 0.5
        let ema = calculate_ema(&[2.0, 4.0, 8.0], 3);
        assert_eq!(ema.len(), 3);
        assert!((ema[1] - 3.0).abs() < 1e-12);
        assert!((ema[2] - 5.5).abs() < 1e-12);
    }

    #[test]
    fn ema_stops_at_nan() {
        let ema = calculate_ema(&[1.0, 2.0, f64::NAN, 4.0], 3);
        assert_eq!(ema.len(), 2);
    }

    #[test]
    fn ema_constant_series_stays_constant() {
        let ema = calculate_ema(&[7.0; 20], 9);
        assert!(ema.iter().all(|v| (v - 7.0).abs() < 1e-12));
    }
}
