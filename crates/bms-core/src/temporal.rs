//! # Temporal Types — UTC Timestamps and Injectable Clocks
//!
//! Defines `Timestamp`, a UTC-only timestamp truncated to seconds
//! precision, and the [`Clock`] trait that every service in the workspace
//! reads time through.
//!
//! ## Design
//!
//! Session expiry, application dates and maturity schedules are all derived
//! by comparing timestamps. Services never call `Utc::now()` directly; they
//! hold a [`Clock`] so tests can pin or advance time with [`FixedClock`]
//! and exercise expiry boundaries to the second.
//!
//! Non-UTC inputs are **rejected at parse** — there is no silent timezone
//! conversion that could shift an expiry or a maturity date across a day
//! boundary.

use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

use chrono::{DateTime, Months, Timelike, Utc};
use serde::{Deserialize, Serialize};

use crate::error::BmsError;

/// A UTC-only timestamp, truncated to seconds precision.
///
/// This type guarantees that all timestamps in the system are in UTC
/// with no sub-second components, so serialized records always render
/// as `YYYY-MM-DDTHH:MM:SSZ`.
///
/// # Construction
///
/// - [`Timestamp::now()`] — current UTC time, truncated.
/// - [`Timestamp::from_utc()`] — from a `DateTime<Utc>`, truncating sub-seconds.
/// - [`Timestamp::parse()`] — from an ISO8601 string, rejecting non-UTC offsets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// The Unix epoch, `1970-01-01T00:00:00Z`.
    pub const UNIX_EPOCH: Timestamp = Timestamp(DateTime::UNIX_EPOCH);

    /// Create a timestamp from the current UTC time, truncated to seconds.
    pub fn now() -> Self {
        let now = Utc::now();
        Self(truncate_to_seconds(now))
    }

    /// Create a timestamp from a `chrono::DateTime<Utc>`, truncating sub-seconds.
    pub fn from_utc(dt: DateTime<Utc>) -> Self {
        Self(truncate_to_seconds(dt))
    }

    /// Parse a timestamp from an RFC 3339 / ISO8601 string.
    ///
    /// **Rejects non-UTC inputs.** Only timestamps with the `Z` suffix are
    /// accepted. Timestamps with explicit offsets like `+00:00`, `+05:30`,
    /// or `-04:00` are rejected — even `+00:00` which is semantically
    /// equivalent to `Z`.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The string is not valid RFC 3339.
    /// - The string uses a non-Z timezone offset.
    pub fn parse(s: &str) -> Result<Self, BmsError> {
        if !s.ends_with('Z') {
            return Err(BmsError::Temporal(format!(
                "Timestamp must use Z suffix (UTC only), got: {s:?}"
            )));
        }

        let dt = DateTime::parse_from_rfc3339(s)
            .map_err(|e| BmsError::Temporal(format!(
                "Invalid RFC 3339 timestamp {s:?}: {e}"
            )))?;

        Ok(Self(truncate_to_seconds(dt.with_timezone(&Utc))))
    }

    /// Create a timestamp from a Unix epoch timestamp (seconds).
    pub fn from_epoch_secs(secs: i64) -> Result<Self, BmsError> {
        let dt = DateTime::from_timestamp(secs, 0)
            .ok_or_else(|| BmsError::Temporal(format!(
                "Invalid Unix timestamp: {secs}"
            )))?;
        Ok(Self(dt))
    }

    /// Add a whole number of hours, returning `None` on overflow.
    ///
    /// Used for session expiry arithmetic, where the time-to-live is
    /// expressed in hours.
    pub fn checked_add_hours(&self, hours: i64) -> Option<Self> {
        let secs = hours.checked_mul(3600)?;
        let delta = chrono::Duration::try_seconds(secs)?;
        self.0.checked_add_signed(delta).map(Self)
    }

    /// Add a whole number of calendar months, returning `None` on overflow.
    ///
    /// Day-of-month is clamped to the target month's length, so
    /// `2026-01-31` plus one month is `2026-02-28`. Used for loan
    /// maturity scheduling.
    pub fn checked_add_months(&self, months: u32) -> Option<Self> {
        self.0.checked_add_months(Months::new(months)).map(Self)
    }

    /// Access the inner `DateTime<Utc>`.
    pub fn as_datetime(&self) -> &DateTime<Utc> {
        &self.0
    }

    /// Returns the Unix epoch timestamp in seconds.
    pub fn epoch_secs(&self) -> i64 {
        self.0.timestamp()
    }

    /// Render as ISO8601 with Z suffix (e.g., `2026-01-15T12:00:00Z`).
    pub fn to_iso8601(&self) -> String {
        self.0.format("%Y-%m-%dT%H:%M:%SZ").to_string()
    }
}

impl std::fmt::Display for Timestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_iso8601())
    }
}

/// Truncate a `DateTime<Utc>` to seconds precision (discard nanoseconds).
fn truncate_to_seconds(dt: DateTime<Utc>) -> DateTime<Utc> {
    dt.with_nanosecond(0).unwrap_or(dt)
}

// ---- clocks ----

/// Source of the current time.
///
/// Every service that stamps or compares instants takes a `Clock` at
/// construction instead of reading the system clock inline. Production
/// code uses [`SystemClock`]; tests use [`FixedClock`].
pub trait Clock: Send + Sync {
    /// The current instant, truncated to seconds.
    fn now(&self) -> Timestamp;
}

impl<C: Clock + ?Sized> Clock for Arc<C> {
    fn now(&self) -> Timestamp {
        (**self).now()
    }
}

/// A [`Clock`] backed by the operating system's wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        Timestamp::now()
    }
}

/// A [`Clock`] pinned to an explicit instant, adjustable at runtime.
///
/// Shared across threads via interior mutability, so a test can hold an
/// `Arc<FixedClock>`, hand clones to the services under test, and move
/// time forward between assertions.
#[derive(Debug)]
pub struct FixedClock {
    epoch_secs: AtomicI64,
}

impl FixedClock {
    /// Create a clock pinned to the given instant.
    pub fn at(ts: Timestamp) -> Self {
        Self {
            epoch_secs: AtomicI64::new(ts.epoch_secs()),
        }
    }

    /// Re-pin the clock to a new instant.
    pub fn set(&self, ts: Timestamp) {
        self.epoch_secs.store(ts.epoch_secs(), Ordering::SeqCst);
    }

    /// Move the clock forward (or backward, with a negative delta) by seconds.
    pub fn advance_secs(&self, secs: i64) {
        self.epoch_secs.fetch_add(secs, Ordering::SeqCst);
    }

    /// Move the clock forward by whole hours.
    pub fn advance_hours(&self, hours: i64) {
        self.advance_secs(hours * 3600);
    }
}

impl Clock for FixedClock {
    fn now(&self) -> Timestamp {
        Timestamp::from_epoch_secs(self.epoch_secs.load(Ordering::SeqCst))
            .unwrap_or(Timestamp::UNIX_EPOCH)
    }
}
