//! Health-check policy and state tracking.
//!
//! Mirrors container health semantics: failures during the start period are
//! not counted, a success always makes the service healthy, and `retries`
//! consecutive failures make it unhealthy.

use std::fmt;
use std::time::{Duration, Instant};

use crate::config::{HEALTH_INTERVAL, HEALTH_RETRIES, HEALTH_START_PERIOD, HEALTH_TIMEOUT};

/// Probe timing and failure tolerance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HealthPolicy {
    pub interval: Duration,
    pub timeout: Duration,
    pub retries: u32,
    pub start_period: Duration,
}

impl Default for HealthPolicy {
    fn default() -> Self {
        Self {
            interval: HEALTH_INTERVAL,
            timeout: HEALTH_TIMEOUT,
            retries: HEALTH_RETRIES,
            start_period: HEALTH_START_PERIOD,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HealthState {
    Starting,
    Healthy,
    Unhealthy,
}

impl fmt::Display for HealthState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            HealthState::Starting => "starting",
            HealthState::Healthy => "healthy",
            HealthState::Unhealthy => "unhealthy",
        };
        f.write_str(s)
    }
}

/// A change of health state caused by one probe result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub from: HealthState,
    pub to: HealthState,
}

/// Folds probe results into a health state.
#[derive(Debug, Clone)]
pub struct HealthTracker {
    policy: HealthPolicy,
    started: Instant,
    state: HealthState,
    failure_streak: u32,
}

impl HealthTracker {
    pub fn new(policy: HealthPolicy, started: Instant) -> Self {
        Self {
            policy,
            started,
            state: HealthState::Starting,
            failure_streak: 0,
        }
    }

    pub fn state(&self) -> HealthState {
        self.state
    }

    pub fn failure_streak(&self) -> u32 {
        self.failure_streak
    }

    pub fn policy(&self) -> &HealthPolicy {
        &self.policy
    }

    fn in_start_period(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.started) < self.policy.start_period
    }

    /// Records one probe result observed at `now`.
    ///
    /// Returns the transition if the state changed.
    pub fn record(&mut self, success: bool, now: Instant) -> Option<Transition> {
        let from = self.state;

        if success {
            self.failure_streak = 0;
            self.state = HealthState::Healthy;
        } else if self.state == HealthState::Starting && self.in_start_period(now) {
            // Grace period: the service has never been healthy yet
        } else {
            self.failure_streak = self.failure_streak.saturating_add(1);
            if self.failure_streak >= self.policy.retries {
                self.state = HealthState::Unhealthy;
            }
        }

        (from != self.state).then_some(Transition {
            from,
            to: self.state,
        })
    }
}
