//! Monotonic milliseconds for poll gating.
//!
//! Times are `u32` like `millis()` on most boards. That wraps after ~49 days, so always compare with [`elapsed_since`].

#[cfg(feature = "std")]
use std::time::Instant;

pub trait Clock {
    fn now_ms(&self) -> u32;
}

/// wraparound-safe `now - then`
#[inline]
pub fn elapsed_since(now_ms: u32, then_ms: u32) -> u32 {
    now_ms.wrapping_sub(then_ms)
}

/// milliseconds since this clock was created
#[cfg(feature = "std")]
pub struct StdClock {
    start: Instant,
}

#[cfg(feature = "std")]
impl Default for StdClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(feature = "std")]
impl StdClock {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }
}

#[cfg(feature = "std")]
impl Clock for StdClock {
    fn now_ms(&self) -> u32 {
        // truncating is the point. callers only ever look at differences
        self.start.elapsed().as_millis() as u32
    }
}

/// milliseconds since boot from the embassy time driver
#[cfg(feature = "embassy")]
#[derive(Default)]
pub struct EmbassyClock;

#[cfg(feature = "embassy")]
impl Clock for EmbassyClock {
    fn now_ms(&self) -> u32 {
        embassy_time::Instant::now().as_millis() as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_elapsed_since() {
        assert_eq!(elapsed_since(1_500, 1_000), 500);
        assert_eq!(elapsed_since(1_000, 1_000), 0);
    }

    #[test]
    fn test_elapsed_since_wraps() {
        let then = u32::MAX - 99;
        let now = 400;

        assert_eq!(elapsed_since(now, then), 500);
    }

    #[cfg(feature = "std")]
    #[test]
    fn test_std_clock_is_monotonic() {
        let clock = StdClock::new();

        let a = clock.now_ms();
        std::thread::sleep(std::time::Duration::from_millis(5));
        let b = clock.now_ms();

        assert!(elapsed_since(b, a) >= 5);
    }
}
