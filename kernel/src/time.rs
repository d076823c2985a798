// Copyright (c) 2025 vivo Mobile Communication Co., Ltd.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//       http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Monotonic tick clock consumed by the timed wait paths. Conversions from
//! wall-clock durations round sub-tick remainders up, so a timed wait never
//! returns before the requested interval.

use crate::config::TICKS_PER_SECOND;
use core::{ops, time::Duration};

crate::static_assert!(TICKS_PER_SECOND > 0);

const NANOS_PER_SECOND: u128 = 1_000_000_000;

/// Span of time measured in system ticks.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TickDuration {
    ticks: u64,
}

impl TickDuration {
    pub const ZERO: Self = Self { ticks: 0 };

    pub const fn from_ticks(ticks: u64) -> Self {
        Self { ticks }
    }

    pub const fn as_ticks(self) -> u64 {
        self.ticks
    }

    /// Converts a wall-clock duration, rounding up.
    pub const fn from_duration_ceil(duration: Duration) -> Self {
        let nanos = duration.as_nanos();
        let ticks = (nanos * TICKS_PER_SECOND as u128 + (NANOS_PER_SECOND - 1)) / NANOS_PER_SECOND;
        if ticks > u64::MAX as u128 {
            return Self { ticks: u64::MAX };
        }
        Self {
            ticks: ticks as u64,
        }
    }

    pub const fn from_millis(ms: u64) -> Self {
        Self::from_duration_ceil(Duration::from_millis(ms))
    }

    pub const fn as_duration(self) -> Duration {
        let nanos = self.ticks as u128 * NANOS_PER_SECOND / TICKS_PER_SECOND as u128;
        Duration::from_nanos(if nanos > u64::MAX as u128 {
            u64::MAX
        } else {
            nanos as u64
        })
    }
}

impl From<Duration> for TickDuration {
    fn from(duration: Duration) -> Self {
        Self::from_duration_ceil(duration)
    }
}

impl ops::Add for TickDuration {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self {
            ticks: self.ticks.saturating_add(rhs.ticks),
        }
    }
}

impl ops::Sub for TickDuration {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self {
            ticks: self.ticks.saturating_sub(rhs.ticks),
        }
    }
}

/// Point in time on the tick clock.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TickInstant {
    ticks: u64,
}

impl TickInstant {
    pub const fn from_ticks(ticks: u64) -> Self {
        Self { ticks }
    }

    pub const fn as_ticks(self) -> u64 {
        self.ticks
    }
}

impl ops::Add<TickDuration> for TickInstant {
    type Output = Self;

    fn add(self, rhs: TickDuration) -> Self {
        Self {
            ticks: self.ticks.saturating_add(rhs.as_ticks()),
        }
    }
}

impl ops::Sub for TickInstant {
    type Output = TickDuration;

    fn sub(self, rhs: Self) -> TickDuration {
        TickDuration::from_ticks(self.ticks.saturating_sub(rhs.ticks))
    }
}

/// The system's monotonic timekeeping source.
pub struct TickClock;

impl TickClock {
    pub fn now() -> TickInstant {
        TickInstant::from_ticks(current_ticks())
    }
}

cfg_if::cfg_if! {
    if #[cfg(target_os = "none")] {
        use core::sync::atomic::{AtomicU64, Ordering};

        static TICKS: AtomicU64 = AtomicU64::new(0);

        /// Called from the systick interrupt.
        pub fn handle_tick_increment() {
            TICKS.fetch_add(1, Ordering::Release);
        }

        fn current_ticks() -> u64 {
            TICKS.load(Ordering::Acquire)
        }
    } else {
        fn current_ticks() -> u64 {
            let elapsed = crate::arch::monotonic_now();
            (elapsed.as_nanos() * TICKS_PER_SECOND as u128 / NANOS_PER_SECOND) as u64
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ceil_conversion_rounds_up() {
        // 1 ms tick: 1500 us must become 2 ticks, never 1.
        let d = TickDuration::from_duration_ceil(Duration::from_micros(1500));
        assert_eq!(d.as_ticks(), 2);
        let exact = TickDuration::from_duration_ceil(Duration::from_millis(3));
        assert_eq!(exact.as_ticks(), 3);
        assert_eq!(TickDuration::from_duration_ceil(Duration::ZERO).as_ticks(), 0);
        // sub-tick durations still wait at least one tick
        let tiny = TickDuration::from_duration_ceil(Duration::from_nanos(1));
        assert_eq!(tiny.as_ticks(), 1);
    }

    #[test]
    fn test_instant_arithmetic() {
        let base = TickInstant::from_ticks(10);
        let later = base + TickDuration::from_ticks(5);
        assert_eq!(later.as_ticks(), 15);
        assert_eq!((later - base).as_ticks(), 5);
        // instants never go negative
        assert_eq!((base - later).as_ticks(), 0);
        assert!(later > base);
    }

    #[test]
    fn test_clock_is_monotonic() {
        let a = TickClock::now();
        let b = TickClock::now();
        assert!(b >= a);
    }
}
