//! Count/total progress tracking for long scans.

use std::time::{Duration, Instant};

/// Tracks how far a scan over a known number of items has got and decides
/// when the next progress line is due.
#[derive(Debug)]
pub struct Progress {
    count: u64,
    total: u64,
    started: Instant,
    last_report: Option<Instant>,
    interval: Duration,
}

impl Progress {
    pub fn new(total: u64, interval: Duration) -> Self {
        Self {
            count: 0,
            total,
            started: Instant::now(),
            last_report: None,
            interval,
        }
    }

    /// Record one processed item.
    ///
    /// Returns `true` when a progress line should be emitted: on the first
    /// item, on the last item, and otherwise at most once per interval.
    pub fn tick(&mut self) -> bool {
        self.count += 1;
        let now = Instant::now();
        let due = match self.last_report {
            None => true,
            Some(last) => now.duration_since(last) >= self.interval,
        };
        if due || self.count >= self.total {
            self.last_report = Some(now);
            return true;
        }
        false
    }

    pub fn count(&self) -> u64 {
        self.count
    }

    pub fn total(&self) -> u64 {
        self.total
    }

    /// Completion percentage rounded to two decimals. An empty scan is complete.
    pub fn percent(&self) -> f64 {
        if self.total == 0 {
            return 100.0;
        }
        (10_000.0 * self.count as f64 / self.total as f64).round() / 100.0
    }

    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percent_rounding() {
        let mut p = Progress::new(3, Duration::from_secs(3600));
        p.tick();
        assert_eq!(p.percent(), 33.33);
        p.tick();
        assert_eq!(p.percent(), 66.67);
        p.tick();
        assert_eq!(p.percent(), 100.0);
    }

    #[test]
    fn test_empty_scan_is_complete() {
        assert_eq!(Progress::new(0, Duration::ZERO).percent(), 100.0);
    }

    #[test]
    fn test_tick_reports_first_and_last() {
        let mut p = Progress::new(4, Duration::from_secs(3600));
        assert!(p.tick());
        assert!(!p.tick());
        assert!(!p.tick());
        assert!(p.tick());
        assert_eq!(p.count(), 4);
    }

    #[test]
    fn test_zero_interval_reports_every_tick() {
        let mut p = Progress::new(10, Duration::ZERO);
        assert!((0..10).all(|_| p.tick()));
    }
}
