//! Output records and rendering.
//!
//! The simulation result and the optional revenue forecast only meet here.

use riskcast_forecast::ModelMetrics;
use riskcast_sim::SimulationResult;
use serde::Serialize;
use std::fmt::Write;

use crate::Result;

/// Output format for command results
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Pretty-printed JSON on stdout
    #[default]
    Json,
    /// Console summary table
    Table,
}

/// Simulation result merged with the optional revenue forecast.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationReport {
    #[serde(flatten)]
    pub result: SimulationResult,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub revenues_forecast: Option<Vec<f64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub forecast_metrics: Option<ModelMetrics>,
    /// Seed that reproduces this run.
    pub seed: u64,
}

/// Standalone forecast output.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastReport {
    pub forecast: Vec<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metrics: Option<ModelMetrics>,
}

impl SimulationReport {
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Headline statistics as a boxed console table.
    pub fn render_table(&self) -> String {
        let r = &self.result;
        let mut rows = vec![
            ("Trials", r.num_trials().to_string()),
            ("Mean NPV", format!("{:.2}", r.mean_npv)),
            ("Median NPV", format!("{:.2}", r.median_npv)),
            ("Std Dev", format!("{:.2}", r.std_dev)),
            ("Min NPV", format!("{:.2}", r.min_npv)),
            ("Max NPV", format!("{:.2}", r.max_npv)),
            ("P(loss)", format!("{:.2}%", r.prob_loss * 100.0)),
            (
                "Interval",
                format!(
                    "[{:.2}, {:.2}]",
                    r.confidence_interval[0], r.confidence_interval[1]
                ),
            ),
            ("Confidence", r.recommendation.confidence.as_str().to_string()),
            ("Seed", self.seed.to_string()),
        ];
        if let Some(forecast) = &self.revenues_forecast {
            rows.push(("Revenue trend", format_series(forecast)));
        }
        if let Some(metrics) = &self.forecast_metrics {
            rows.push(("Trend R²", format!("{:.4}", metrics.r_squared)));
        }

        let mut out = boxed_table(("Metric", "Value"), &rows);
        let _ = writeln!(out, "{}", r.recommendation.text);
        out
    }
}

impl ForecastReport {
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn render_table(&self) -> String {
        let mut rows: Vec<(String, String)> = self
            .forecast
            .iter()
            .enumerate()
            .map(|(k, v)| (format!("t+{}", k + 1), format!("{:.2}", v)))
            .collect();
        if let Some(m) = &self.metrics {
            rows.push(("R²".to_string(), format!("{:.4}", m.r_squared)));
            rows.push(("MSE".to_string(), format!("{:.4}", m.mse)));
            rows.push(("Trend".to_string(), format!("{:.4}", m.trend)));
            rows.push(("Intercept".to_string(), format!("{:.4}", m.intercept)));
        }
        boxed_table(("Period", "Value"), &rows)
    }
}

fn format_series(values: &[f64]) -> String {
    let parts: Vec<String> = values.iter().map(|v| format!("{:.0}", v)).collect();
    parts.join(", ")
}

fn boxed_table<K: AsRef<str>>(header: (&str, &str), rows: &[(K, String)]) -> String {
    let key_width = rows
        .iter()
        .map(|(k, _)| k.as_ref().chars().count())
        .chain(std::iter::once(header.0.len()))
        .max()
        .unwrap_or(0);
    let value_width = rows
        .iter()
        .map(|(_, v)| v.chars().count())
        .chain(std::iter::once(header.1.len()))
        .max()
        .unwrap_or(0);

    let rule = |left: &str, mid: &str, right: &str| {
        format!(
            "{}{}{}{}{}",
            left,
            "─".repeat(key_width + 2),
            mid,
            "─".repeat(value_width + 2),
            right
        )
    };

    let mut out = String::new();
    let _ = writeln!(out, "{}", rule("┌", "┬", "┐"));
    let _ = writeln!(
        out,
        "│ {:<kw$} │ {:<vw$} │",
        header.0,
        header.1,
        kw = key_width,
        vw = value_width
    );
    let _ = writeln!(out, "{}", rule("├", "┼", "┤"));
    for (key, value) in rows {
        let _ = writeln!(
            out,
            "│ {:<kw$} │ {:>vw$} │",
            key.as_ref(),
            value,
            kw = key_width,
            vw = value_width
        );
    }
    let _ = writeln!(out, "{}", rule("└", "┴", "┘"));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use riskcast_sim::{SimulationEngine, SimulationParameters, ValueRange};

    fn small_result() -> SimulationResult {
        let params = SimulationParameters {
            initial_investment: 1_000.0,
            duration: 2,
            revenue_range: ValueRange::new(800.0, 900.0),
            cost_range: ValueRange::new(100.0, 200.0),
            discount_rate: 0.05,
            num_simulations: 50,
        };
        let engine = SimulationEngine::default();
        let mut rng = riskcast_sim::SimRng::from_seed(3);
        engine.run_with_rng(&params, &mut rng).unwrap()
    }

    #[test]
    fn test_json_keys_are_camel_case() {
        let report = SimulationReport {
            result: small_result(),
            revenues_forecast: Some(vec![1.0, 2.0]),
            forecast_metrics: None,
            seed: 3,
        };
        let value: serde_json::Value = serde_json::from_str(&report.to_json().unwrap()).unwrap();

        for key in [
            "npvResults",
            "meanNpv",
            "medianNpv",
            "stdDev",
            "minNpv",
            "maxNpv",
            "probLoss",
            "confidenceInterval",
            "histogramData",
            "cumulativeData",
            "sampleCashFlows",
            "recommendation",
            "revenuesForecast",
            "seed",
        ] {
            assert!(value.get(key).is_some(), "missing key {}", key);
        }
        assert!(value.get("forecastMetrics").is_none());
        assert!(value["histogramData"][0].get("x").is_some());
        assert!(value["recommendation"].get("color").is_some());
    }

    #[test]
    fn test_forecast_omitted_when_absent() {
        let report = SimulationReport {
            result: small_result(),
            revenues_forecast: None,
            forecast_metrics: None,
            seed: 3,
        };
        let json = report.to_json().unwrap();
        assert!(!json.contains("revenuesForecast"));
    }

    #[test]
    fn test_table_contains_headline_rows() {
        let report = SimulationReport {
            result: small_result(),
            revenues_forecast: Some(vec![100.0, 200.0]),
            forecast_metrics: None,
            seed: 42,
        };
        let table = report.render_table();
        assert!(table.starts_with('┌'));
        assert!(table.contains("Mean NPV"));
        assert!(table.contains("100, 200"));
        assert!(table.contains("42"));
    }

    #[test]
    fn test_forecast_table_rows() {
        let report = ForecastReport {
            forecast: vec![6.0, 7.0],
            metrics: None,
        };
        let table = report.render_table();
        assert!(table.contains("t+1"));
        assert!(table.contains("7.00"));
    }
}
