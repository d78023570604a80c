//! Common utilities and helpers

use std::time::Duration;

pub mod logging;
pub mod path;

/// Elapsed time for log lines: `850ms`, `12.4s`, `3m07s`, `1h02m03s`
pub fn format_duration(duration: Duration) -> String {
    let secs = duration.as_secs();
    match secs {
        0 => format!("{}ms", duration.subsec_millis()),
        1..=59 => format!("{:.1}s", duration.as_secs_f64()),
        60..=3599 => format!("{}m{:02}s", secs / 60, secs % 60),
        _ => format!("{}h{:02}m{:02}s", secs / 3600, (secs % 3600) / 60, secs % 60),
    }
}
