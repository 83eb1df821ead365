// src/infrastructure/clock.rs
//
// Injectable time source, so trackers that stamp records with "now" can be
// driven deterministically.

use chrono::{DateTime, Utc};

pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;

    fn now_epoch_millis(&self) -> i64 {
        self.now().timestamp_millis()
    }
}

/// Wall clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}


#[cfg(test)]
mod tests {
    use super::testing::SteppingClock;
    use super::*;

    #[test]
    fn test_stepping_clock_moves_forward() {
        let clock = SteppingClock::new();
        let first = clock.now();
        let second = clock.now();
        assert!(second > first);
        assert_eq!(second.timestamp_millis() - first.timestamp_millis(), 1_000);
    }

    #[test]
    fn test_system_clock_epoch_millis_is_current() {
        let before = Utc::now().timestamp_millis();
        let millis = SystemClock.now_epoch_millis();
        assert!(millis >= before);
    }
}
