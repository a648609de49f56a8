//! Timing helpers for the "Calculation times" report.

use std::time::{Duration, Instant};

/// Run `f` and return its result with the elapsed wall time.
pub fn perf_counter<T, F>(f: F) -> (T, Duration)
where
    F: FnOnce() -> T,
{
    let start = Instant::now();
    let value = f();
    (value, start.elapsed())
}

/// One aligned report line, seconds above one second and milliseconds below.
///
/// ```rust
/// use std::time::Duration;
/// use cascii_profile::timing::format_timing;
///
/// assert_eq!(
///     format_timing("age calculation", Duration::from_micros(1500)),
///     "   age calculation:       1.5000 ms"
/// );
/// ```
pub fn format_timing(label: &str, elapsed: Duration) -> String {
    let seconds = elapsed.as_secs_f64();
    let value = if seconds > 1.0 {
        format!("{seconds:.4} s ")
    } else {
        format!("{:.4} ms", seconds * 1000.0)
    };
    format!("{:<23}{:>12}", format!("   {label}:"), value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seconds_format() {
        assert_eq!(
            format_timing("fetch", Duration::from_millis(2500)),
            "   fetch:                 2.5000 s "
        );
    }

    #[test]
    fn long_labels_are_not_truncated() {
        let line = format_timing("a very long label for timing", Duration::ZERO);
        assert!(line.starts_with("   a very long label for timing:"));
        assert!(line.ends_with("0.0000 ms"));
    }

    #[test]
    fn perf_counter_returns_value() {
        let (value, elapsed) = perf_counter(|| 2 + 2);
        assert_eq!(value, 4);
        assert!(elapsed < Duration::from_secs(1));
    }
}
