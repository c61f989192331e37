// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Wall clock abstraction for freshness bookkeeping.
//!
//! Every `last_fetched_at` stamp and every TTL check goes through a
//! [`ClockSource`], so tests can pin time instead of sleeping.

use chrono::{DateTime, Utc};
use std::sync::Arc;

/// Trait for getting the current wall clock time.
///
/// This allows injecting a mock clock for testing.
pub trait ClockSource: Send + Sync {
    /// Returns the current instant in UTC.
    fn now(&self) -> DateTime<Utc>;
}

/// System clock implementation using [`Utc::now`].
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl ClockSource for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

impl<C: ClockSource + ?Sized> ClockSource for &C {
    fn now(&self) -> DateTime<Utc> {
        (**self).now()
    }
}

impl<C: ClockSource + ?Sized> ClockSource for Arc<C> {
    fn now(&self) -> DateTime<Utc> {
        (**self).now()
    }
}

/// Shared handle to the system clock, the default for every component.
pub fn system() -> Arc<dyn ClockSource> {
    Arc::new(SystemClock)
}
