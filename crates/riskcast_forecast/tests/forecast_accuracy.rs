//! Forecast accuracy and error-path tests.

use approx::assert_abs_diff_eq;
use proptest::prelude::*;
use riskcast_forecast::{forecast, model_metrics, ForecastError, LinearTrend, TrendForecaster};

#[test]
fn test_perfect_linear_round_trip() {
    let history = [1.0, 2.0, 3.0, 4.0, 5.0];

    let out = forecast(&history, 3).unwrap();
    for (got, want) in out.iter().zip([6.0, 7.0, 8.0]) {
        assert_abs_diff_eq!(*got, want, epsilon = 1e-9);
    }

    let metrics = model_metrics(&history).unwrap();
    assert_abs_diff_eq!(metrics.r_squared, 1.0, epsilon = 1e-12);
    assert_abs_diff_eq!(metrics.trend, 1.0, epsilon = 1e-12);
    assert_abs_diff_eq!(metrics.intercept, 1.0, epsilon = 1e-12);
}

#[test]
fn test_short_series_rejected() {
    for history in [&[5.0][..], &[][..]] {
        assert_eq!(
            forecast(history, 3),
            Err(ForecastError::InsufficientData {
                required: 2,
                actual: history.len()
            })
        );
    }
}

#[test]
fn test_demo_revenue_history() {
    // x̄ = 2, ȳ = 16_900, Σ dx·dy = 24_700, Σ dx² = 10: slope is 2_470.
    let history = [12_000.0, 14_500.0, 16_800.0, 19_200.0, 22_000.0];
    let forecaster = TrendForecaster::new();

    let out = forecaster.forecast(&history, 5).unwrap();
    assert_eq!(out.len(), 5);
    for pair in out.windows(2) {
        assert_abs_diff_eq!(pair[1] - pair[0], 2_470.0, epsilon = 1e-6);
    }

    let metrics = forecaster.model_metrics(&history).unwrap();
    assert!(metrics.r_squared > 0.99);
    assert_abs_diff_eq!(metrics.trend, 2_470.0, epsilon = 1e-9);
}

#[test]
fn test_forecast_matches_metrics_line() {
    let history = [3.0, 1.0, 4.0, 1.0, 5.0, 9.0, 2.0, 6.0];
    let metrics = model_metrics(&history).unwrap();
    let out = forecast(&history, 4).unwrap();

    for (k, value) in out.iter().enumerate() {
        let x = (history.len() + k) as f64;
        assert_abs_diff_eq!(*value, metrics.intercept + metrics.trend * x, epsilon = 1e-9);
    }
    assert!(metrics.r_squared <= 1.0);
    assert!(metrics.mse >= 0.0);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Exact lines are recovered for any slope and intercept.
    #[test]
    fn prop_recovers_exact_line(
        intercept in -1.0e4f64..1.0e4,
        slope in -1.0e3f64..1.0e3,
        n in 2usize..40,
        periods in 0usize..10,
    ) {
        let history: Vec<f64> = (0..n).map(|i| intercept + slope * i as f64).collect();
        let trend = LinearTrend::fit(&history).unwrap();

        let tol = 1e-6 * (1.0 + intercept.abs() + slope.abs() * n as f64);
        prop_assert!((trend.slope() - slope).abs() < tol);
        prop_assert!((trend.intercept() - intercept).abs() < tol);

        let out = forecast(&history, periods).unwrap();
        prop_assert_eq!(out.len(), periods);
    }

    /// Residuals of a least-squares fit sum to zero and R² never exceeds 1.
    #[test]
    fn prop_residuals_balance(history in prop::collection::vec(-1.0e3f64..1.0e3, 2..50)) {
        let trend = LinearTrend::fit(&history).unwrap();
        let residual_sum: f64 = history
            .iter()
            .zip(trend.fitted_values())
            .map(|(y, f)| y - f)
            .sum();
        prop_assert!(residual_sum.abs() < 1e-6 * history.len() as f64 * 1.0e3);

        let metrics = model_metrics(&history).unwrap();
        prop_assert!(metrics.r_squared <= 1.0 + 1e-12);
    }
}
