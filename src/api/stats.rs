//! Score statistics over repeated benchmark measurements.

use std::fmt;

use crate::api::benchmark::TrialResult;

/// Two-tailed 95% Student-t critical values, indexed by sample count.
#[rustfmt::skip]
const T_TABLE: [f64; 97] = [
    f64::NAN, f64::NAN, 12.71,
    4.30, 3.18, 2.78, 2.57, 2.45, 2.36, 2.31, 2.26, 2.23, 2.20, 2.18, 2.16,
    2.14, 2.13, 2.12, 2.11, 2.10, 2.09, 2.09, 2.08, 2.07, 2.07, 2.06, 2.06,
    2.06, 2.05, 2.05, 2.05, 2.04, 2.04, 2.04, 2.03, 2.03, 2.03, 2.03, 2.03,
    2.02, 2.02, 2.02, 2.02, 2.02, 2.02, 2.02, 2.01, 2.01, 2.01, 2.01, 2.01,
    2.01, 2.01, 2.01, 2.01, 2.00, 2.00, 2.00, 2.00, 2.00, 2.00, 2.00, 2.00,
    2.00, 2.00, 2.00, 2.00, 2.00, 2.00, 2.00, 1.99, 1.99, 1.99, 1.99, 1.99,
    1.99, 1.99, 1.99, 1.99, 1.99, 1.99, 1.99, 1.99, 1.99, 1.99, 1.99, 1.99,
    1.99, 1.99, 1.99, 1.99, 1.99, 1.99, 1.99, 1.99, 1.99, 1.99,
];

pub fn mean(scores: &[f64]) -> f64 {
    scores.iter().sum::<f64>() / scores.len() as f64
}

pub fn best(scores: &[f64]) -> f64 {
    scores.iter().copied().fold(f64::NEG_INFINITY, f64::max)
}

/// Sample standard deviation (n - 1 denominator).
pub fn standard_deviation(scores: &[f64], mean: f64) -> f64 {
    let delta_squared_sum: f64 = scores.iter().map(|s| (s - mean) * (s - mean)).sum();
    (delta_squared_sum / (scores.len() - 1) as f64).sqrt()
}

/// Critical value for `n` samples. NaN below two samples.
pub fn t_distribution(n: usize) -> f64 {
    if n >= 474 {
        1.96
    } else if n >= 160 {
        1.97
    } else if n >= T_TABLE.len() {
        1.98
    } else {
        T_TABLE[n]
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BenchmarkSummary {
    pub runs: usize,
    pub mean: f64,
    pub best: f64,
    pub standard_deviation: f64,
    /// Half-width of the 95% confidence interval, as a percentage of the mean.
    pub error_percent: f64,
}

impl BenchmarkSummary {
    /// Summarize a non-empty set of scores.
    pub fn from_scores(scores: &[f64]) -> Option<Self> {
        if scores.is_empty() {
            return None;
        }

        let runs = scores.len();
        let mean = mean(scores);
        let best = best(scores);

        if runs == 1 {
            return Some(Self {
                runs,
                mean,
                best,
                standard_deviation: 0.0,
                error_percent: 0.0,
            });
        }

        let standard_deviation = standard_deviation(scores, mean);
        let standard_error = standard_deviation / (runs as f64).sqrt();
        let error_percent = if mean == 0.0 {
            0.0
        } else {
            t_distribution(runs) * standard_error / mean * 100.0
        };

        Some(Self {
            runs,
            mean,
            best,
            standard_deviation,
            error_percent,
        })
    }
}

impl fmt::Display for BenchmarkSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:.2} ({:.2}±{:.1}%)",
            self.best, self.mean, self.error_percent
        )
    }
}

/// Summary over each trial's average milliseconds.
pub fn summarize_trials(trials: &[TrialResult]) -> Option<BenchmarkSummary> {
    let scores: Vec<f64> = trials.iter().map(|t| t.average_ms).collect();
    BenchmarkSummary::from_scores(&scores)
}
