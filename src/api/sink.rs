use std::sync::Once;

use crate::api::benchmark::TrialResult;

/// Tag attached to every benchmark line in the platform log.
pub const BENCHMARK_TAG: &str = "[benchmark] Rust";

/// Destination for per-trial metric lines.
pub trait MetricSink {
    fn record(&mut self, trial: &TrialResult);
}

/// Writes trial lines through the `log` facade under [`BENCHMARK_TAG`].
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

impl MetricSink for LogSink {
    fn record(&mut self, trial: &TrialResult) {
        log::info!(target: BENCHMARK_TAG, "{trial}");
    }
}

impl MetricSink for Vec<TrialResult> {
    fn record(&mut self, trial: &TrialResult) {
        self.push(trial.clone());
    }
}

static LOGGER_INIT: Once = Once::new();

/// Install the platform logger. Runs on bridge init and at the start of every
/// benchmark entry point; a logger the host already installed is kept.
#[flutter_rust_bridge::frb(init)]
pub fn init_benchmark_logging() {
    LOGGER_INIT.call_once(install_logger);
}

#[cfg(target_os = "android")]
fn install_logger() {
    android_logger::init_once(
        android_logger::Config::default()
            .with_max_level(log::LevelFilter::Info)
            .with_tag(BENCHMARK_TAG),
    );
}

#[cfg(not(target_os = "android"))]
fn install_logger() {
    // Another logger may already be installed by the host or a test harness.
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .try_init();
}
