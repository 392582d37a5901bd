// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Alert distribution modes.
//!
//! Distribution is a sum type with exactly one active variant, which
//! rules out contradictory targeting data (e.g. a broadcast flag set
//! alongside a staff list).

use crate::error::DomainError;
use crate::types::{AreaId, StaffId};
use serde::{Deserialize, Serialize};

/// Who may see and claim a booking alert.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Distribution {
    /// Visible to every active staff member.
    BroadcastAll,
    /// Visible only to the named staff members.
    TargetedStaff {
        /// The staff identifiers this alert targets.
        staff_ids: Vec<StaffId>,
    },
    /// Visible only to staff assigned to one of the named location areas.
    TargetedLocations {
        /// The area identifiers this alert targets.
        area_ids: Vec<AreaId>,
    },
}

impl Distribution {
    /// Validates that the distribution is well-formed.
    ///
    /// Targeted variants must name at least one identifier and must not
    /// name the same identifier twice.
    ///
    /// # Errors
    ///
    /// Returns `EmptyTargetStaff`, `EmptyTargetLocations`, or
    /// `DuplicateTarget` for malformed target sets.
    pub fn validate(&self) -> Result<(), DomainError> {
        match self {
            Self::BroadcastAll => Ok(()),
            Self::TargetedStaff { staff_ids } => {
                if staff_ids.is_empty() {
                    return Err(DomainError::EmptyTargetStaff);
                }
                check_unique(staff_ids.iter().map(StaffId::value))
            }
            Self::TargetedLocations { area_ids } => {
                if area_ids.is_empty() {
                    return Err(DomainError::EmptyTargetLocations);
                }
                check_unique(area_ids.iter().map(AreaId::value))
            }
        }
    }

    /// Returns the mode name for display and logging.
    #[must_use]
    pub const fn mode(&self) -> &'static str {
        match self {
            Self::BroadcastAll => "broadcast_all",
            Self::TargetedStaff { .. } => "targeted_staff",
            Self::TargetedLocations { .. } => "targeted_locations",
        }
    }
}

/// Checks that no identifier appears twice in a target set.
fn check_unique<'a>(values: impl Iterator<Item = &'a str>) -> Result<(), DomainError> {
    let mut seen: Vec<&str> = Vec::new();
    for value in values {
        if seen.contains(&value) {
            return Err(DomainError::DuplicateTarget {
                target: value.to_string(),
            });
        }
        seen.push(value);
    }
    Ok(())
}
