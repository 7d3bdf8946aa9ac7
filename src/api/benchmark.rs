use std::fmt;

use anyhow::{bail, Result};

use crate::api::prime::nth_prime;
use crate::api::sink::{init_benchmark_logging, LogSink, MetricSink};
use crate::api::stats::summarize_trials;
use crate::api::timer::{measure_for, Stopwatch};
use crate::timed;

/// Status returned to the host after a completed benchmark run.
pub const STATUS_OK: i64 = 1;

pub const WARMUP_ORDINAL: u32 = 100;
pub const WARMUP_MILLIS: u64 = 100;

/// One timed block of repeated Nth-prime calls.
#[derive(Debug, Clone, PartialEq)]
pub struct TrialResult {
    pub ordinal: u32,
    /// Value from the last repetition.
    pub prime: u64,
    pub repetitions: u32,
    pub average_ms: f64,
}

impl fmt::Display for TrialResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}th prime number:(ms)\t{}\t{} x\t {:.6}",
            self.ordinal, self.prime, self.repetitions, self.average_ms
        )
    }
}

/// Inputs of a benchmark run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrimeBenchConfig {
    /// Base ordinal; scaled trials use `nth * 1`, `nth * 2`, ...
    pub nth: u32,
    /// Number of scaled trials, and repetitions within every trial.
    pub count: u32,
    /// Ordinal of the extra trial run after the scaled ones.
    pub nth_no: u32,
}

impl Default for PrimeBenchConfig {
    fn default() -> Self {
        Self {
            nth: 1_000,
            count: 10,
            nth_no: 200_000,
        }
    }
}

impl PrimeBenchConfig {
    /// Build a config from the raw integers the host passes across the bridge.
    pub fn from_raw(nth: i32, count: i32, nth_no: i32) -> Result<Self> {
        Ok(Self {
            nth: positive("nth", nth)?,
            count: positive("count", count)?,
            nth_no: positive("nth_no", nth_no)?,
        })
    }
}

fn positive(name: &str, value: i32) -> Result<u32> {
    if value < 1 {
        bail!("{} must be at least 1, got {}", name, value);
    }
    Ok(value as u32)
}

/// Spin on a small ordinal for at least [`WARMUP_MILLIS`]. Results are discarded.
#[hotpath::measure]
pub fn warmup() {
    measure_for(
        || {
            std::hint::black_box(nth_prime(std::hint::black_box(WARMUP_ORDINAL)));
        },
        WARMUP_MILLIS,
    );
}

fn run_trial(ordinal: u32, repetitions: u32) -> TrialResult {
    let watch = Stopwatch::start();

    let mut prime = 0;
    for _ in 0..repetitions {
        prime = nth_prime(std::hint::black_box(ordinal));
    }

    let elapsed = watch.elapsed_millis();
    TrialResult {
        ordinal,
        prime,
        repetitions,
        average_ms: elapsed as f64 / repetitions as f64,
    }
}

/// Ordinal of the `step`-th scaled trial. Wraps on overflow like the C `int` it replaces.
pub fn scaled_ordinal(nth: u32, step: u32) -> u32 {
    nth.wrapping_mul(step)
}

/// Warm up, run `count` scaled trials and one trial at `nth_no`, recording
/// each to `sink` as it finishes.
#[hotpath::measure]
pub fn run_prime_benchmark<S: MetricSink>(config: &PrimeBenchConfig, sink: &mut S) -> Vec<TrialResult> {
    warmup();

    let mut trials = Vec::new();

    for j in 0..config.count {
        let trial = run_trial(scaled_ordinal(config.nth, j + 1), config.count);
        sink.record(&trial);
        trials.push(trial);
    }

    let trial = run_trial(config.nth_no, config.count);
    sink.record(&trial);
    trials.push(trial);

    trials
}

/// Run the full prime benchmark and log one line per trial.
#[flutter_rust_bridge::frb]
pub fn performance_prime(nth: i32, count: i32, nth_no: i32) -> Result<i64> {
    init_benchmark_logging();
    let config = PrimeBenchConfig::from_raw(nth, count, nth_no)?;
    timed!("performance_prime", {
        run_prime_benchmark(&config, &mut LogSink);
    });
    Ok(STATUS_OK)
}

#[flutter_rust_bridge::frb]
pub fn get_nth_prime(nth: i32) -> Result<i64> {
    let nth = positive("nth", nth)?;
    Ok(nth_prime(nth) as i64)
}

/// Run the benchmark and summarize the scaled trials as `best (mean±error%)`.
#[flutter_rust_bridge::frb]
pub fn prime_benchmark_summary(nth: i32, count: i32, nth_no: i32) -> Result<String> {
    init_benchmark_logging();
    let config = PrimeBenchConfig::from_raw(nth, count, nth_no)?;
    timed!("prime_benchmark_summary", {
        let trials = run_prime_benchmark(&config, &mut LogSink);
        let scaled = &trials[..config.count as usize];
        match summarize_trials(scaled) {
            Some(summary) => Ok(summary.to_string()),
            None => bail!("No trials to summarize"),
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use regex::Regex;
    use test_log::test;

    #[test]
    fn test_warmup_takes_at_least_100ms() {
        let watch = Stopwatch::start();
        warmup();
        assert!(watch.elapsed_millis() >= WARMUP_MILLIS);
    }

    #[test]
    fn test_driver_records_count_plus_one_lines() {
        for count in [1, 3] {
            let config = PrimeBenchConfig {
                nth: 5,
                count,
                nth_no: 10,
            };
            let mut sink: Vec<TrialResult> = Vec::new();
            let trials = run_prime_benchmark(&config, &mut sink);
            assert_eq!(sink.len(), count as usize + 1);
            assert_eq!(trials, sink);
        }
    }

    #[test]
    fn test_driver_scales_ordinals() {
        let config = PrimeBenchConfig {
            nth: 5,
            count: 3,
            nth_no: 10,
        };
        let mut sink: Vec<TrialResult> = Vec::new();
        run_prime_benchmark(&config, &mut sink);

        let observed: Vec<(u32, u64, u32)> = sink
            .iter()
            .map(|t| (t.ordinal, t.prime, t.repetitions))
            .collect();
        assert_eq!(
            observed,
            vec![(5, 11, 3), (10, 29, 3), (15, 47, 3), (10, 29, 3)]
        );
        assert!(sink.iter().all(|t| t.average_ms >= 0.0));
    }

    #[test]
    fn test_scaled_ordinal_wraps() {
        assert_eq!(scaled_ordinal(5, 3), 15);
        assert_eq!(scaled_ordinal(u32::MAX, 2), u32::MAX - 1);
        assert_eq!(scaled_ordinal(1 << 31, 2), 0);
    }

    #[test]
    fn test_trial_line_format() {
        let trial = TrialResult {
            ordinal: 1000,
            prime: 7919,
            repetitions: 10,
            average_ms: 1.5,
        };
        let line = trial.to_string();
        assert_eq!(line, "1000th prime number:(ms)\t7919\t10 x\t 1.500000");

        let pattern = Regex::new(r"^\d+th prime number:\(ms\)\t\d+\t\d+ x\t \d+\.\d{6}$").unwrap();
        assert!(pattern.is_match(&line));
    }

    #[test]
    fn test_config_rejects_non_positive_values() {
        assert!(PrimeBenchConfig::from_raw(0, 1, 1).is_err());
        assert!(PrimeBenchConfig::from_raw(1, -3, 1).is_err());
        assert!(PrimeBenchConfig::from_raw(1, 1, 0).is_err());
        assert_eq!(
            PrimeBenchConfig::from_raw(2, 3, 4).unwrap(),
            PrimeBenchConfig {
                nth: 2,
                count: 3,
                nth_no: 4
            }
        );
    }

    #[test]
    fn test_default_config() {
        let config = PrimeBenchConfig::default();
        assert_eq!(config.nth, 1_000);
        assert_eq!(config.count, 10);
        assert_eq!(config.nth_no, 200_000);
    }

    #[test]
    fn test_performance_prime_returns_status() {
        assert_eq!(performance_prime(10, 2, 20).unwrap(), STATUS_OK);
        assert!(performance_prime(-1, 2, 20).is_err());
    }

    #[test]
    fn test_get_nth_prime() {
        assert_eq!(get_nth_prime(10).unwrap(), 29);
        assert!(get_nth_prime(0).is_err());
    }

    #[test]
    fn test_prime_benchmark_summary_format() {
        let summary = prime_benchmark_summary(10, 2, 20).unwrap();
        let pattern = Regex::new(r"^\d+\.\d{2} \(\d+\.\d{2}±\d+\.\d%\)$").unwrap();
        assert!(pattern.is_match(&summary), "unexpected summary: {summary}");
    }
}
