// src/shared/clock.rs
use std::time::Instant;

use chrono::{DateTime, Timelike, Utc};

/// Timestamp format exposed to API clients and stored in metadata maps.
pub const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M";

pub fn datetime_now() -> String {
    Utc::now().format(DATETIME_FORMAT).to_string()
}

/// Clock of the control loops. Simulated time advances `speedup` times faster
/// than wall-clock time, so a 24 h capacity schedule can be replayed in
/// minutes. A speedup of 1.0 is plain wall-clock time.
#[derive(Debug, Clone)]
pub struct SimulatedClock {
    speedup: f64,
    started_wall: DateTime<Utc>,
    started_real: Instant,
}

impl SimulatedClock {
    pub fn new(speedup: f64) -> Self {
        Self {
            speedup: if speedup > 0.0 { speedup } else { 1.0 },
            started_wall: Utc::now(),
            started_real: Instant::now(),
        }
    }

    pub fn now(&self) -> DateTime<Utc> {
        let elapsed = self.started_real.elapsed().mul_f64(self.speedup);
        self.started_wall
            + chrono::Duration::from_std(elapsed).unwrap_or_else(|_| chrono::Duration::zero())
    }

    pub fn now_string(&self) -> String {
        self.now().format(DATETIME_FORMAT).to_string()
    }

    /// Simulated hour of day, the key into the capacity event table.
    pub fn hour(&self) -> u8 {
        self.now().hour() as u8
    }

    /// Real sleep between two loop ticks so that `checks_per_hour` ticks
    /// happen per simulated hour.
    pub fn tick_interval(&self, checks_per_hour: u32) -> std::time::Duration {
        let simulated_seconds = 3600.0 / checks_per_hour.max(1) as f64;
        std::time::Duration::from_secs_f64(simulated_seconds / self.speedup)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn datetime_now_matches_the_wire_format() {
        let now = datetime_now();
        // "2013-02-11 22:37"
        assert_eq!(now.len(), 16);
        assert_eq!(&now[4..5], "-");
        assert_eq!(&now[10..11], " ");
    }

    #[test]
    fn tick_interval_scales_with_speedup() {
        let clock = SimulatedClock::new(12.0);
        // 12 checks per simulated hour at 12x speedup: one real tick every 25 s.
        assert_eq!(clock.tick_interval(12).as_secs(), 25);
    }

    #[test]
    fn zero_speedup_falls_back_to_realtime() {
        let clock = SimulatedClock::new(0.0);
        assert_eq!(clock.tick_interval(1).as_secs(), 3600);
    }
}
