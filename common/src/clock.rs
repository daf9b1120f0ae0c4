//! Time source abstraction.
//!
//! Services that need "now" (for example to substitute the current instant
//! for an unparsable timestamp) take a [`Clock`] rather than calling
//! [`SystemTime::now`] directly, so tests can pin time to a known instant.

use std::ops::Add;
use std::sync::RwLock;
use std::time::{Duration, SystemTime};

/// A source of the current wall-clock time.
pub trait Clock: Send + Sync {
    fn now(&self) -> SystemTime;
}

/// The real system clock.
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> SystemTime {
        SystemTime::now()
    }
}

/// A clock pinned to a fixed instant, adjustable from tests.
#[derive(Debug)]
pub struct FixedClock {
    now: RwLock<SystemTime>,
}

impl Clock for FixedClock {
    fn now(&self) -> SystemTime {
        *self.now.read().unwrap()
    }
}

impl FixedClock {
    pub fn at(time: SystemTime) -> Self {
        Self {
            now: RwLock::new(time),
        }
    }

    pub fn advance(&self, duration: Duration) {
        let mut now = self.now.write().unwrap();
        *now = now.add(duration);
    }

    pub fn set(&self, time: SystemTime) {
        *self.now.write().unwrap() = time;
    }
}
