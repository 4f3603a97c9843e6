use chrono::{DateTime, Duration, Utc};

/// Time source for verification expiry.
pub trait Clock: Send + Sync + 'static {
    fn now(&self) -> DateTime<Utc>;

    /// The instant `minutes` from now.
    fn minutes_from_now(&self, minutes: i64) -> DateTime<Utc> {
        self.now() + Duration::minutes(minutes)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minutes_from_now() {
        let clock = SystemClock;
        let before = Utc::now();
        let expiry = clock.minutes_from_now(15);
        let after = Utc::now();

        assert!(expiry >= before + Duration::minutes(15));
        assert!(expiry <= after + Duration::minutes(15));
    }
}
