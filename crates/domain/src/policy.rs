// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use time::{Duration, OffsetDateTime};

/// Business policy for claim behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClaimPolicy {
    /// Whether a staff member whose claim was rejected may immediately
    /// claim the same alert again.
    pub allow_reclaim_after_reject: bool,
}

impl Default for ClaimPolicy {
    fn default() -> Self {
        Self {
            allow_reclaim_after_reject: true,
        }
    }
}

/// Configuration for the expiry sweep.
///
/// An open alert is considered expired once `now` passes the shift
/// start plus the grace period.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExpiryPolicy {
    /// How long after the shift start an unclaimed alert stays open.
    grace: Duration,
}

impl ExpiryPolicy {
    /// Creates a new `ExpiryPolicy` from a grace period in minutes.
    ///
    /// # Arguments
    ///
    /// * `minutes` - The grace period in minutes (must be non-negative)
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidGraceMinutes` if `minutes` is negative.
    pub const fn from_minutes(minutes: i64) -> Result<Self, DomainError> {
        if minutes < 0 {
            return Err(DomainError::InvalidGraceMinutes { minutes });
        }
        Ok(Self {
            grace: Duration::minutes(minutes),
        })
    }

    /// Returns the grace period.
    #[must_use]
    pub const fn grace(&self) -> Duration {
        self.grace
    }

    /// Computes the expiry deadline for a shift starting at `start`.
    ///
    /// An open alert whose deadline has passed is eligible for the
    /// expiry sweep.
    #[must_use]
    pub fn deadline(&self, start: OffsetDateTime) -> OffsetDateTime {
        start + self.grace
    }
}
