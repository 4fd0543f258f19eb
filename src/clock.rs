use chrono::{DateTime, Local, Timelike, Utc};

/// Wall-clock source for discovery timestamps and time-gated rewards.
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;

    /// Hour of day (0..=23) in the visitor's local time zone.
    fn local_hour(&self) -> u32;
}

/// Reads the browser's `Date` (via chrono's `wasmbind`) or the OS clock natively.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }

    fn local_hour(&self) -> u32 {
        Local::now().hour()
    }
}

impl<C: Clock + ?Sized> Clock for Box<C> {
    fn now(&self) -> DateTime<Utc> {
        (**self).now()
    }

    fn local_hour(&self) -> u32 {
        (**self).local_hour()
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use std::cell::Cell;

    /// Manually advanced clock for deterministic timestamps.
    pub struct FixedClock {
        now: Cell<DateTime<Utc>>,
        hour: u32,
    }

    impl FixedClock {
        pub fn at(rfc3339: &str) -> Self {
            let now = DateTime::parse_from_rfc3339(rfc3339)
                .expect("valid timestamp")
                .with_timezone(&Utc);
            Self {
                now: Cell::new(now),
                hour: now.hour(),
            }
        }

        pub fn advance_secs(&self, secs: i64) {
            self.now.set(self.now.get() + chrono::Duration::seconds(secs));
        }
    }

    impl Clock for FixedClock {
        fn now(&self) -> DateTime<Utc> {
            self.now.get()
        }

        fn local_hour(&self) -> u32 {
            self.hour
        }
    }
}
