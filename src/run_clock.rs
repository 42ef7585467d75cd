use std::{
    fmt::Display,
    time::{Duration, Instant},
};

/// Wall clock for a processing run, started once at program startup and
/// handed to whatever reports progress.
#[derive(Debug, Clone, Copy)]
pub struct RunClock {
    start_time: Instant,
}

impl Default for RunClock {
    fn default() -> Self {
        Self::new()
    }
}

impl RunClock {
    pub fn new() -> Self {
        Self {
            start_time: Instant::now(),
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }

    /// Log a progress message followed by the whole seconds elapsed
    pub fn update<S: Display>(&self, message: S) {
        info!("{}", message);
        info!("{} sec. elapsed", self.elapsed().as_secs());
    }

    pub fn elapsed_str(&self) -> String {
        format_duration(self.elapsed())
    }
}

/// Format a duration as e.g. `1d2h3m4.500s`, leaving out leading zero units
pub fn format_duration(d: Duration) -> String {
    let mut t = d.as_secs_f64();
    let mut s = String::new();
    if t > 24.0 * 3600.0 {
        let days = (t / (24.0 * 3600.0)).floor() as u32;
        s.push_str(format!("{}d", days).as_str());
        t -= (days as f64) * 24.0 * 3600.0;
    }
    if t > 3600.0 {
        let hours = (t / 3600.0).floor() as u32;
        s.push_str(format!("{}h", hours).as_str());
        t -= (hours as f64) * 3600.0;
    }
    if t > 60.0 {
        let mins = (t / 60.0).floor() as u32;
        s.push_str(format!("{}m", mins).as_str());
        t -= (mins as f64) * 60.0;
    }
    s.push_str(format!("{:.3}s", t).as_str());
    s
}
