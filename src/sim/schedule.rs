//! Timers for the independently clocked producers
//!
//! Every periodic process (master tick, jitter, both displacement timers) and
//! every delayed one-shot (teleport flag clear, restart) lives in one
//! [`Scheduler`] on the simulation clock. The owner pops due timers in time
//! order, so all producers mutate the shared state serially.

use rand::Rng;

use crate::{RandomPeriod, Tuning};

/// Timer identity; declaration order breaks ties between equal due times
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TimerKind {
    /// One-shot: end of the terminal delay
    Restart,
    /// One-shot: drop the teleport transition flag
    TeleportSettle,
    /// Recurring, randomized: first displacement timer
    DisplaceA,
    /// Recurring, randomized: second displacement timer
    DisplaceB,
    /// Recurring, fixed: positional noise
    Jitter,
    /// Recurring, fixed: proximity + duration re-check
    MasterTick,
}

/// How a timer re-arms after firing
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Period {
    Fixed(f64),
    /// Re-drawn on every firing
    Random(RandomPeriod),
    Once,
}

impl Period {
    /// Next interval, or None for one-shots
    pub fn draw<R: Rng>(&self, rng: &mut R) -> Option<f64> {
        match *self {
            Period::Fixed(ms) => Some(ms),
            Period::Random(range) => Some(rng.random_range(range.min_ms..=range.max_ms)),
            Period::Once => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Timer {
    pub kind: TimerKind,
    pub period: Period,
    pub due_ms: f64,
    /// Times this timer has fired since it was armed
    pub fired: u64,
}

#[derive(Debug, Clone, Default)]
pub struct Scheduler {
    timers: Vec<Timer>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace all timers with the four recurring session producers
    pub fn arm_session<R: Rng>(&mut self, tuning: &Tuning, now_ms: f64, rng: &mut R) {
        self.clear();
        self.every(TimerKind::DisplaceA, Period::Random(tuning.displace_a), now_ms, rng);
        self.every(TimerKind::DisplaceB, Period::Random(tuning.displace_b), now_ms, rng);
        self.every(TimerKind::Jitter, Period::Fixed(tuning.jitter_period_ms), now_ms, rng);
        self.every(TimerKind::MasterTick, Period::Fixed(tuning.master_tick_ms), now_ms, rng);
    }

    /// Arm a recurring timer; first firing one period from `now_ms`
    pub fn every<R: Rng>(&mut self, kind: TimerKind, period: Period, now_ms: f64, rng: &mut R) {
        let Some(interval) = period.draw(rng) else {
            log::warn!("{:?} armed as recurring with a one-shot period", kind);
            return;
        };
        self.insert(Timer {
            kind,
            period,
            due_ms: now_ms + interval,
            fired: 0,
        });
    }

    /// Arm (or re-arm) a one-shot timer
    pub fn once(&mut self, kind: TimerKind, due_ms: f64) {
        self.insert(Timer {
            kind,
            period: Period::Once,
            due_ms,
            fired: 0,
        });
    }

    fn insert(&mut self, timer: Timer) {
        self.cancel(timer.kind);
        self.timers.push(timer);
    }

    pub fn cancel(&mut self, kind: TimerKind) {
        self.timers.retain(|t| t.kind != kind);
    }

    pub fn clear(&mut self) {
        self.timers.clear();
    }

    pub fn is_armed(&self, kind: TimerKind) -> bool {
        self.timers.iter().any(|t| t.kind == kind)
    }

    pub fn get(&self, kind: TimerKind) -> Option<&Timer> {
        self.timers.iter().find(|t| t.kind == kind)
    }

    pub fn len(&self) -> usize {
        self.timers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timers.is_empty()
    }

    /// Fire the earliest timer due at or before `until_ms`
    ///
    /// Returns its kind and due time. Recurring timers re-arm at
    /// `due + period`; one-shots are removed.
    pub fn pop_due<R: Rng>(&mut self, until_ms: f64, rng: &mut R) -> Option<(TimerKind, f64)> {
        let index = self
            .timers
            .iter()
            .enumerate()
            .filter(|(_, t)| t.due_ms <= until_ms)
            .min_by(|(_, a), (_, b)| {
                a.due_ms
                    .partial_cmp(&b.due_ms)
                    .unwrap_or(std::cmp::Ordering::Equal)
                    .then(a.kind.cmp(&b.kind))
            })
            .map(|(i, _)| i)?;

        let timer = &mut self.timers[index];
        let fired = (timer.kind, timer.due_ms);
        match timer.period.draw(rng) {
            Some(interval) => {
                timer.due_ms += interval;
                timer.fired += 1;
            }
            None => {
                self.timers.swap_remove(index);
            }
        }
        Some(fired)
    }
}
