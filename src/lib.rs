pub mod api;

#[macro_export]
macro_rules! timed {
    ($name:expr, $body:expr) => {{
        let start = std::time::Instant::now();
        let result = $body;
        let elapsed = start.elapsed().as_millis();
        if elapsed > 10 {
            log::debug!("Rust: {} took {}ms", $name, elapsed);
        }
        result
    }};
}
