// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::distribution::Distribution;
use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use time::OffsetDateTime;

/// Represents the lifecycle status of a booking alert.
///
/// `Open` is the initial status. `Confirmed`, `Rejected`, `Expired`, and
/// `Cancelled` are terminal. The reject command reopens an alert rather
/// than parking it in `Rejected`; the variant remains part of the status
/// vocabulary so stored records never fail to load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum AlertStatus {
    /// Unclaimed and visible to eligible staff.
    #[default]
    Open,
    /// Claimed by a staff member, awaiting manager confirmation.
    PendingConfirmation,
    /// Claim confirmed by a manager. Terminal.
    Confirmed,
    /// Reserved terminal status; see the module documentation.
    Rejected,
    /// Start time passed without a claim. Terminal.
    Expired,
    /// Withdrawn by its creator or an admin. Terminal.
    Cancelled,
}

impl FromStr for AlertStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Open" => Ok(Self::Open),
            "PendingConfirmation" => Ok(Self::PendingConfirmation),
            "Confirmed" => Ok(Self::Confirmed),
            "Rejected" => Ok(Self::Rejected),
            "Expired" => Ok(Self::Expired),
            "Cancelled" => Ok(Self::Cancelled),
            _ => Err(DomainError::InvalidStatus(s.to_string())),
        }
    }
}

impl std::fmt::Display for AlertStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl AlertStatus {
    /// Converts this status to its string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Open => "Open",
            Self::PendingConfirmation => "PendingConfirmation",
            Self::Confirmed => "Confirmed",
            Self::Rejected => "Rejected",
            Self::Expired => "Expired",
            Self::Cancelled => "Cancelled",
        }
    }

    /// Checks if a transition from this status to another is valid.
    ///
    /// Valid transitions are:
    /// - `Open` → `PendingConfirmation` (claim)
    /// - `Open` → `Cancelled` (cancel)
    /// - `Open` → `Expired` (expiry sweep)
    /// - `PendingConfirmation` → `Confirmed` (confirm)
    /// - `PendingConfirmation` → `Open` (reject)
    /// - `PendingConfirmation` → `Cancelled` (cancel)
    #[must_use]
    pub const fn can_transition_to(&self, target: Self) -> bool {
        matches!(
            (self, target),
            (Self::Open, Self::PendingConfirmation)
                | (Self::Open, Self::Cancelled)
                | (Self::Open, Self::Expired)
                | (Self::PendingConfirmation, Self::Confirmed)
                | (Self::PendingConfirmation, Self::Open)
                | (Self::PendingConfirmation, Self::Cancelled)
        )
    }

    /// Returns whether this status accepts no further transitions.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(
            self,
            Self::Confirmed | Self::Rejected | Self::Expired | Self::Cancelled
        )
    }
}

/// Represents a staff member's identifier.
///
/// Staff identifiers are opaque strings supplied by the staff directory.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StaffId {
    /// The identifier value.
    value: String,
}

impl StaffId {
    /// Creates a new `StaffId`.
    ///
    /// Leading and trailing whitespace is trimmed.
    ///
    /// # Arguments
    ///
    /// * `value` - The identifier value
    #[must_use]
    pub fn new(value: &str) -> Self {
        Self {
            value: value.trim().to_string(),
        }
    }

    /// Returns the identifier value.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }
}

impl std::fmt::Display for StaffId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.value)
    }
}

/// Represents a location-area identifier.
///
/// Area identifiers are normalized to uppercase to ensure case-insensitive
/// matching between staff assignments and alert targeting.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AreaId {
    /// The area identifier value.
    value: String,
}

impl AreaId {
    /// Creates a new `AreaId`.
    ///
    /// # Arguments
    ///
    /// * `value` - The area identifier (will be normalized to uppercase)
    #[must_use]
    pub fn new(value: &str) -> Self {
        Self {
            value: value.trim().to_uppercase(),
        }
    }

    /// Returns the area identifier value.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }
}

impl std::fmt::Display for AreaId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.value)
    }
}

/// Represents the service a booking alert covers.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ServiceId {
    /// The service identifier value.
    value: String,
}

impl ServiceId {
    /// Creates a new `ServiceId`.
    ///
    /// # Arguments
    ///
    /// * `value` - The service identifier value
    #[must_use]
    pub fn new(value: &str) -> Self {
        Self {
            value: value.trim().to_string(),
        }
    }

    /// Returns the service identifier value.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }
}

/// The time window of the shift an alert needs covered.
///
/// Construction enforces the `start < end` invariant; a `ShiftWindow`
/// that exists is always well-formed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftWindow {
    /// When the shift starts.
    start: OffsetDateTime,
    /// When the shift ends.
    end: OffsetDateTime,
}

impl ShiftWindow {
    /// Creates a new `ShiftWindow`.
    ///
    /// # Arguments
    ///
    /// * `start` - When the shift starts
    /// * `end` - When the shift ends
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidShiftWindow` if `start >= end`.
    pub fn new(start: OffsetDateTime, end: OffsetDateTime) -> Result<Self, DomainError> {
        if start >= end {
            return Err(DomainError::InvalidShiftWindow {
                start: start.to_string(),
                end: end.to_string(),
            });
        }
        Ok(Self { start, end })
    }

    /// Returns when the shift starts.
    #[must_use]
    pub const fn start(&self) -> OffsetDateTime {
        self.start
    }

    /// Returns when the shift ends.
    #[must_use]
    pub const fn end(&self) -> OffsetDateTime {
        self.end
    }
}

/// A capability granted to an actor by the authorization layer.
///
/// Capabilities gate coordinator commands; the coordinator only checks
/// membership and never authenticates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Capability {
    /// May confirm and reject claims.
    Manager,
    /// May do everything a manager may, plus cancel any alert.
    Admin,
}

impl Capability {
    /// Parses a capability from a string.
    ///
    /// # Errors
    ///
    /// Returns an error if the string does not match a known capability.
    pub fn parse(s: &str) -> Result<Self, DomainError> {
        match s.to_lowercase().as_str() {
            "manager" => Ok(Self::Manager),
            "admin" => Ok(Self::Admin),
            _ => Err(DomainError::InvalidCapability(s.to_string())),
        }
    }

    /// Returns the string representation of this capability.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Manager => "manager",
            Self::Admin => "admin",
        }
    }
}

/// Reference data about a staff member, supplied by the staff directory.
///
/// The coordinator treats profiles as read-only; activity and location
/// can change between calls, which is why eligibility is recomputed on
/// every listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaffProfile {
    /// The staff member's identifier.
    pub staff_id: StaffId,
    /// The staff member's display name (informational).
    pub display_name: String,
    /// Whether the account is active. Inactive staff are never eligible.
    pub is_active: bool,
    /// The location area this staff member is assigned to, if any.
    pub location_area: Option<AreaId>,
    /// Capabilities granted to this staff member.
    pub capabilities: Vec<Capability>,
}

impl StaffProfile {
    /// Creates a new `StaffProfile`.
    ///
    /// # Arguments
    ///
    /// * `staff_id` - The staff member's identifier
    /// * `display_name` - The staff member's display name
    /// * `is_active` - Whether the account is active
    /// * `location_area` - The assigned location area, if any
    /// * `capabilities` - Capabilities granted to this staff member
    #[must_use]
    pub const fn new(
        staff_id: StaffId,
        display_name: String,
        is_active: bool,
        location_area: Option<AreaId>,
        capabilities: Vec<Capability>,
    ) -> Self {
        Self {
            staff_id,
            display_name,
            is_active,
            location_area,
            capabilities,
        }
    }

    /// Checks whether this staff member holds the given capability.
    #[must_use]
    pub fn has_capability(&self, capability: Capability) -> bool {
        self.capabilities.contains(&capability)
    }
}

/// Represents an unfilled booking that needs staff coverage.
///
/// Alerts are created `Open` at version 0 and mutated only through the
/// claim coordinator via the store's compare-and-swap. The `version`
/// counter increases by exactly 1 per committed transition and totally
/// orders transitions on one alert.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingAlert {
    /// Canonical identifier assigned by the store at creation.
    /// `None` indicates the alert has not been persisted yet.
    pub alert_id: Option<i64>,
    /// Short human-readable description of the shift.
    pub title: String,
    /// The service this shift covers.
    pub service_id: ServiceId,
    /// The shift's time window.
    pub window: ShiftWindow,
    /// Who may see and claim this alert. Exactly one variant is active.
    pub distribution: Distribution,
    /// The current lifecycle status.
    pub status: AlertStatus,
    /// The staff member holding the claim, if any.
    pub claimed_by: Option<StaffId>,
    /// When the current claim was made; set atomically with `claimed_by`.
    pub claimed_at: Option<OffsetDateTime>,
    /// Staff whose claims on this alert were rejected, in order.
    /// Consulted by the reclaim policy.
    pub rejected_claimants: Vec<StaffId>,
    /// The actor who created this alert. Immutable.
    pub created_by: String,
    /// When this alert was created. Immutable.
    pub created_at: OffsetDateTime,
    /// Optimistic-concurrency version counter.
    pub version: i64,
}

impl BookingAlert {
    /// Creates a new unpersisted alert in the `Open` status at version 0.
    ///
    /// # Arguments
    ///
    /// * `title` - Short description of the shift
    /// * `service_id` - The service this shift covers
    /// * `window` - The shift's time window
    /// * `distribution` - Who may see and claim this alert
    /// * `created_by` - The creating actor's identifier
    /// * `created_at` - The creation timestamp
    ///
    /// # Errors
    ///
    /// Returns an error if the title is empty or the distribution is
    /// malformed. The shift window is validated at its own construction.
    pub fn new(
        title: String,
        service_id: ServiceId,
        window: ShiftWindow,
        distribution: Distribution,
        created_by: String,
        created_at: OffsetDateTime,
    ) -> Result<Self, DomainError> {
        if title.trim().is_empty() {
            return Err(DomainError::InvalidTitle(String::from(
                "Title must not be empty",
            )));
        }
        if service_id.value().is_empty() {
            return Err(DomainError::InvalidServiceId(String::from(
                "Service identifier must not be empty",
            )));
        }
        distribution.validate()?;

        Ok(Self {
            alert_id: None,
            title,
            service_id,
            window,
            distribution,
            status: AlertStatus::Open,
            claimed_by: None,
            claimed_at: None,
            rejected_claimants: Vec::new(),
            created_by,
            created_at,
            version: 0,
        })
    }

    /// Validates the claim consistency invariant.
    ///
    /// # Invariant
    ///
    /// `status == Open` ⟺ `claimed_by` is absent, and `claimed_by` and
    /// `claimed_at` are present or absent together.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::ClaimStateInconsistent` if the invariant
    /// does not hold.
    pub fn validate_claim_consistency(&self) -> Result<(), DomainError> {
        let has_claimant: bool = self.claimed_by.is_some();
        let inconsistent: bool = match self.status {
            AlertStatus::Open | AlertStatus::Expired => has_claimant,
            AlertStatus::PendingConfirmation | AlertStatus::Confirmed => !has_claimant,
            // Cancelled alerts may or may not have held a claim; the
            // cancel command clears it, so a claimant here is stale data.
            AlertStatus::Rejected | AlertStatus::Cancelled => has_claimant,
        } || (self.claimed_by.is_some() != self.claimed_at.is_some());
        if inconsistent {
            return Err(DomainError::ClaimStateInconsistent {
                status: self.status.as_str().to_string(),
                has_claimant,
            });
        }
        Ok(())
    }

    /// Returns whether this alert is open for claims.
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.status == AlertStatus::Open
    }

    /// Produces a compact snapshot string for audit purposes.
    #[must_use]
    pub fn snapshot(&self) -> String {
        format!(
            "status={},version={},claimed_by={}",
            self.status,
            self.version,
            self.claimed_by
                .as_ref()
                .map_or("-", StaffId::value)
        )
    }
}
