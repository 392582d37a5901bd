// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The eligibility filter.
//!
//! A pure, deterministic mapping from `(alert, profile)` to an
//! eligibility decision. Staff location and activity can change between
//! calls, so callers must re-evaluate on every listing rather than
//! caching decisions.

use crate::distribution::Distribution;
use crate::types::{BookingAlert, StaffProfile};

/// Why a staff member may (or may not) see an alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EligibilityReason {
    /// The alert is broadcast to all active staff.
    Broadcast,
    /// The staff member is named directly in the target set.
    TargetedDirect,
    /// The staff member's location area is in the target set.
    TargetedLocationMatch,
    /// The staff member may not see this alert.
    NotEligible,
}

impl EligibilityReason {
    /// Returns whether this reason grants visibility.
    #[must_use]
    pub const fn is_eligible(&self) -> bool {
        !matches!(self, Self::NotEligible)
    }

    /// Returns the reason code for display and logging.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Broadcast => "broadcast",
            Self::TargetedDirect => "targeted-direct",
            Self::TargetedLocationMatch => "targeted-location-match",
            Self::NotEligible => "not-eligible",
        }
    }
}

impl std::fmt::Display for EligibilityReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Determines whether a staff member may see and claim an alert.
///
/// Inactive accounts are never eligible, regardless of distribution.
/// No side effects; the same inputs always produce the same decision.
///
/// # Arguments
///
/// * `alert` - The alert being evaluated
/// * `profile` - The staff member's directory profile
#[must_use]
pub fn evaluate_eligibility(alert: &BookingAlert, profile: &StaffProfile) -> EligibilityReason {
    if !profile.is_active {
        return EligibilityReason::NotEligible;
    }

    match &alert.distribution {
        Distribution::BroadcastAll => EligibilityReason::Broadcast,
        Distribution::TargetedStaff { staff_ids } => {
            if staff_ids.contains(&profile.staff_id) {
                EligibilityReason::TargetedDirect
            } else {
                EligibilityReason::NotEligible
            }
        }
        Distribution::TargetedLocations { area_ids } => match &profile.location_area {
            Some(area) if area_ids.contains(area) => EligibilityReason::TargetedLocationMatch,
            _ => EligibilityReason::NotEligible,
        },
    }
}
