use std::time::{Instant, SystemTime, UNIX_EPOCH};

/// Wall-clock milliseconds since the Unix epoch.
///
/// Measurements inside the crate use [`Stopwatch`]; this is exported so the
/// host can stamp benchmark runs with the same clock the native side reads.
#[flutter_rust_bridge::frb(sync)]
pub fn current_time_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

/// Monotonic stopwatch reporting whole milliseconds.
#[derive(Debug, Clone, Copy)]
pub struct Stopwatch {
    start: Instant,
}

impl Stopwatch {
    pub fn start() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    pub fn elapsed_millis(&self) -> u64 {
        self.start.elapsed().as_millis() as u64
    }
}

/// Run `f` until at least `minimum_ms` have elapsed and return the average
/// microseconds per run. `f` always runs at least once.
pub fn measure_for<F: FnMut()>(mut f: F, minimum_ms: u64) -> f64 {
    let watch = Stopwatch::start();

    let mut runs = 0u64;
    let mut elapsed;
    loop {
        f();
        runs += 1;
        elapsed = watch.elapsed_millis();
        if elapsed >= minimum_ms {
            break;
        }
    }

    1000.0 * elapsed as f64 / runs as f64
}
