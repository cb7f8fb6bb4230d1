use std::time::{Duration, Instant};

/// One timed section.
#[derive(Debug, Clone)]
pub struct Lap {
    pub name: String,
    pub elapsed: Duration,
}

/// Accumulates named laps.
///
/// Each lap measures from the previous `lap` call (or from construction /
/// `reset`), so sections are back to back and their sum is the total.
#[derive(Debug, Clone)]
pub struct Stopwatch {
    started: Instant,
    last: Instant,
    laps: Vec<Lap>,
}

impl Stopwatch {
    pub fn new() -> Self {
        let now = Instant::now();
        Self { started: now, last: now, laps: Vec::new() }
    }

    /// Drops recorded laps and restarts the baseline.
    pub fn reset(&mut self) {
        let now = Instant::now();
        self.started = now;
        self.last = now;
        self.laps.clear();
    }

    /// Closes the current section under `name` and returns its duration.
    pub fn lap(&mut self, name: &str) -> Duration {
        let now = Instant::now();
        let elapsed = now.saturating_duration_since(self.last);
        self.last = now;
        self.laps.push(Lap { name: name.to_owned(), elapsed });
        elapsed
    }

    #[inline]
    pub fn laps(&self) -> &[Lap] {
        &self.laps
    }

    /// Time since construction or the last `reset`.
    pub fn total(&self) -> Duration {
        self.started.elapsed()
    }

    /// Emits one debug line per lap plus the total.
    pub fn log_summary(&self, context: &str) {
        for lap in &self.laps {
            log::debug!("{context}: {} took {:.3} ms", lap.name, lap.elapsed.as_secs_f64() * 1e3);
        }
        log::debug!("{context}: total {:.3} ms", self.total().as_secs_f64() * 1e3);
    }
}

impl Default for Stopwatch {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn laps_are_recorded_in_order() {
        let mut sw = Stopwatch::new();
        sw.lap("a");
        sw.lap("b");
        let names: Vec<_> = sw.laps().iter().map(|l| l.name.as_str()).collect();
        assert_eq!(names, ["a", "b"]);
        let sum: Duration = sw.laps().iter().map(|l| l.elapsed).sum();
        assert!(sum <= sw.total());
    }

    #[test]
    fn reset_clears_laps() {
        let mut sw = Stopwatch::new();
        sw.lap("a");
        sw.reset();
        assert!(sw.laps().is_empty());
    }
}
