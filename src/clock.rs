//! Wall-clock tick alignment and the decorative animation phase.
//!
//! Ticks land on absolute 5-second boundaries of the wall clock
//! (`:00`, `:05`, `:10`, ...), independent of when the process started.
//! Work done during a tick shortens the following sleep instead of pushing
//! later ticks back, so the cadence does not drift.

use std::time::Duration;

use chrono::{DateTime, Local, TimeZone, Timelike};

/// Length of one tick in seconds.
pub const TICK_PERIOD_SECS: f64 = 5.0;

/// Sleeps shorter than this are replaced by a full period, so a tick that
/// finishes right on a boundary does not render twice in quick succession.
pub const MIN_SLEEP_SECS: f64 = 0.1;

/// Number of distinct animation phases in one minute.
pub const PHASE_COUNT: u8 = 12;

/// Seconds to sleep from `now` (seconds since the epoch) until the next
/// tick boundary.
pub fn sleep_for(now: f64) -> f64 {
    let remaining = TICK_PERIOD_SECS - now.rem_euclid(TICK_PERIOD_SECS);
    if remaining < MIN_SLEEP_SECS {
        TICK_PERIOD_SECS
    } else {
        remaining
    }
}

/// [`sleep_for`] for a wall-clock instant.
pub fn sleep_until_next_tick<Tz: TimeZone>(now: &DateTime<Tz>) -> Duration {
    Duration::from_secs_f64(sleep_for(epoch_seconds(now)))
}

/// Seconds since the epoch with microsecond precision.
pub fn epoch_seconds<Tz: TimeZone>(t: &DateTime<Tz>) -> f64 {
    t.timestamp_micros() as f64 / 1_000_000.0
}

/// Index into a 12-step cycle, advancing every 5 seconds of the minute.
///
/// Derived from the wall-clock second alone, so the phase shown after a
/// gap is the same one an uninterrupted board would show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AnimationPhase(u8);

impl AnimationPhase {
    /// Phase for a second-of-minute (values past 59 wrap).
    pub fn from_second(second: u32) -> Self {
        Self(((second % 60) / 5) as u8 % PHASE_COUNT)
    }

    pub fn at<Tz: TimeZone>(t: &DateTime<Tz>) -> Self {
        Self::from_second(t.second())
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// One pass of the collect, build, render cycle.
///
/// The loop threads ticks through [`Tick::advance`]; nothing else about
/// the schedule is kept between passes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tick {
    /// Number of ticks before this one since start-up.
    pub index: u64,
    /// When this tick began.
    pub started: DateTime<Local>,
    pub phase: AnimationPhase,
}

impl Tick {
    pub fn first(now: DateTime<Local>) -> Self {
        Self {
            index: 0,
            started: now,
            phase: AnimationPhase::at(&now),
        }
    }

    /// The tick that follows `self`, starting at `now`.
    pub fn advance(self, now: DateTime<Local>) -> Self {
        Self {
            index: self.index + 1,
            started: now,
            phase: AnimationPhase::at(&now),
        }
    }
}
