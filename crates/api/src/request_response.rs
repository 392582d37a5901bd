// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Request and response types for the API boundary.
//!
//! Requests carry raw strings and are translated into domain types at
//! the boundary; views carry RFC 3339 timestamps and status strings so
//! domain types never leak onto the wire.

use serde::{Deserialize, Serialize};
use shift_alert_audit::AuditEvent;
use shift_alert_domain::{AreaId, BookingAlert, Distribution, StaffId, StaffProfile};
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

use crate::error::ApiError;

/// Wire representation of an alert's distribution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DistributionPayload {
    /// The distribution mode: `broadcast_all`, `targeted_staff`, or
    /// `targeted_locations`.
    pub mode: String,
    /// Target staff identifiers; required for `targeted_staff`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub staff_ids: Option<Vec<String>>,
    /// Target area identifiers; required for `targeted_locations`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub area_ids: Option<Vec<String>>,
}

impl DistributionPayload {
    /// Translates this payload into the domain distribution.
    ///
    /// # Errors
    ///
    /// Returns an error if the mode is unknown or the required target
    /// list is missing.
    pub fn into_domain(self) -> Result<Distribution, ApiError> {
        match self.mode.as_str() {
            "broadcast_all" => Ok(Distribution::BroadcastAll),
            "targeted_staff" => {
                let staff_ids: Vec<String> = self.staff_ids.ok_or_else(|| {
                    ApiError::InvalidInput {
                        field: String::from("distribution.staff_ids"),
                        message: String::from("targeted_staff distribution requires staff_ids"),
                    }
                })?;
                Ok(Distribution::TargetedStaff {
                    staff_ids: staff_ids.iter().map(|s| StaffId::new(s)).collect(),
                })
            }
            "targeted_locations" => {
                let area_ids: Vec<String> = self.area_ids.ok_or_else(|| {
                    ApiError::InvalidInput {
                        field: String::from("distribution.area_ids"),
                        message: String::from(
                            "targeted_locations distribution requires area_ids",
                        ),
                    }
                })?;
                Ok(Distribution::TargetedLocations {
                    area_ids: area_ids.iter().map(|a| AreaId::new(a)).collect(),
                })
            }
            other => Err(ApiError::InvalidInput {
                field: String::from("distribution.mode"),
                message: format!("Unknown distribution mode: '{other}'"),
            }),
        }
    }

    /// Builds the wire payload from a domain distribution.
    #[must_use]
    pub fn from_domain(distribution: &Distribution) -> Self {
        match distribution {
            Distribution::BroadcastAll => Self {
                mode: String::from("broadcast_all"),
                staff_ids: None,
                area_ids: None,
            },
            Distribution::TargetedStaff { staff_ids } => Self {
                mode: String::from("targeted_staff"),
                staff_ids: Some(
                    staff_ids
                        .iter()
                        .map(|s| s.value().to_string())
                        .collect(),
                ),
                area_ids: None,
            },
            Distribution::TargetedLocations { area_ids } => Self {
                mode: String::from("targeted_locations"),
                staff_ids: None,
                area_ids: Some(area_ids.iter().map(|a| a.value().to_string()).collect()),
            },
        }
    }
}

/// Request to create a new booking alert.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateAlertRequest {
    /// Short human-readable description of the shift.
    pub title: String,
    /// The service the shift covers.
    pub service_id: String,
    /// When the shift starts (RFC 3339).
    pub window_start: String,
    /// When the shift ends (RFC 3339).
    pub window_end: String,
    /// Who may see and claim this alert.
    pub distribution: DistributionPayload,
    /// The acting user's identifier.
    pub actor_id: String,
    /// The acting user's role.
    pub actor_role: String,
    /// Correlation identifier for this request.
    pub cause_id: String,
    /// Why this alert was created.
    pub cause_description: String,
}

/// Request to claim an open alert.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClaimAlertRequest {
    /// The claiming staff member.
    pub staff_id: String,
    /// The acting user's identifier.
    pub actor_id: String,
    /// The acting user's role.
    pub actor_role: String,
    /// Correlation identifier for this request.
    pub cause_id: String,
    /// Why the claim was made.
    pub cause_description: String,
}

/// Request to confirm a pending claim.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfirmClaimRequest {
    /// The acting user's identifier.
    pub actor_id: String,
    /// The acting user's role.
    pub actor_role: String,
    /// Correlation identifier for this request.
    pub cause_id: String,
    /// Why the claim was confirmed.
    pub cause_description: String,
}

/// Request to reject a pending claim, reopening the alert.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RejectClaimRequest {
    /// Why the claim was rejected; recorded in the audit event.
    pub reason: String,
    /// The acting user's identifier.
    pub actor_id: String,
    /// The acting user's role.
    pub actor_role: String,
    /// Correlation identifier for this request.
    pub cause_id: String,
    /// Why the claim was rejected (request-level cause).
    pub cause_description: String,
}

/// Request to cancel an alert.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CancelAlertRequest {
    /// The acting user's identifier.
    pub actor_id: String,
    /// The acting user's role.
    pub actor_role: String,
    /// Correlation identifier for this request.
    pub cause_id: String,
    /// Why the alert was cancelled.
    pub cause_description: String,
}

/// Request to run the expiry sweep.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SweepRequest {
    /// The acting user's identifier.
    pub actor_id: String,
    /// The acting user's role.
    pub actor_role: String,
    /// Correlation identifier for this request.
    pub cause_id: String,
    /// Why the sweep was triggered.
    pub cause_description: String,
}

/// Request to create or update a staff profile.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpsertStaffRequest {
    /// The staff member's identifier.
    pub staff_id: String,
    /// The staff member's display name.
    pub display_name: String,
    /// Whether the account is active.
    pub is_active: bool,
    /// The assigned location area, if any.
    pub location_area: Option<String>,
    /// Capability strings granted to this staff member.
    pub capabilities: Vec<String>,
    /// The acting user's identifier.
    pub actor_id: String,
    /// The acting user's role.
    pub actor_role: String,
}

/// Wire representation of a booking alert.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlertView {
    /// The alert's identifier.
    pub alert_id: i64,
    /// Short human-readable description of the shift.
    pub title: String,
    /// The service the shift covers.
    pub service_id: String,
    /// When the shift starts (RFC 3339).
    pub window_start: String,
    /// When the shift ends (RFC 3339).
    pub window_end: String,
    /// Who may see and claim this alert.
    pub distribution: DistributionPayload,
    /// The current lifecycle status.
    pub status: String,
    /// The staff member holding the claim, if any.
    pub claimed_by: Option<String>,
    /// When the current claim was made (RFC 3339), if any.
    pub claimed_at: Option<String>,
    /// The actor who created this alert.
    pub created_by: String,
    /// When this alert was created (RFC 3339).
    pub created_at: String,
    /// The optimistic-concurrency version.
    pub version: i64,
}

impl AlertView {
    /// Builds the wire view of a persisted alert.
    ///
    /// # Errors
    ///
    /// Returns an error if the alert has no identifier or a timestamp
    /// cannot be formatted.
    pub fn from_alert(alert: &BookingAlert) -> Result<Self, ApiError> {
        let alert_id: i64 = alert.alert_id.ok_or_else(|| ApiError::Internal {
            message: String::from("Alert view requested for an unpersisted alert"),
        })?;
        Ok(Self {
            alert_id,
            title: alert.title.clone(),
            service_id: alert.service_id.value().to_string(),
            window_start: format_timestamp(alert.window.start())?,
            window_end: format_timestamp(alert.window.end())?,
            distribution: DistributionPayload::from_domain(&alert.distribution),
            status: alert.status.as_str().to_string(),
            claimed_by: alert.claimed_by.as_ref().map(|s| s.value().to_string()),
            claimed_at: alert.claimed_at.map(format_timestamp).transpose()?,
            created_by: alert.created_by.clone(),
            created_at: format_timestamp(alert.created_at)?,
            version: alert.version,
        })
    }
}

/// Wire representation of a staff profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaffProfileView {
    /// The staff member's identifier.
    pub staff_id: String,
    /// The staff member's display name.
    pub display_name: String,
    /// Whether the account is active.
    pub is_active: bool,
    /// The assigned location area, if any.
    pub location_area: Option<String>,
    /// Capabilities granted to this staff member.
    pub capabilities: Vec<String>,
}

impl StaffProfileView {
    /// Builds the wire view of a staff profile.
    #[must_use]
    pub fn from_profile(profile: &StaffProfile) -> Self {
        Self {
            staff_id: profile.staff_id.value().to_string(),
            display_name: profile.display_name.clone(),
            is_active: profile.is_active,
            location_area: profile
                .location_area
                .as_ref()
                .map(|a| a.value().to_string()),
            capabilities: profile
                .capabilities
                .iter()
                .map(|c| c.as_str().to_string())
                .collect(),
        }
    }
}

/// Wire representation of an audit event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditEventView {
    /// The event's identifier.
    pub event_id: Option<i64>,
    /// The alert this event is scoped to.
    pub alert_id: Option<i64>,
    /// The acting user's identifier.
    pub actor_id: String,
    /// The acting user's type.
    pub actor_type: String,
    /// Correlation identifier for the originating request.
    pub cause_id: String,
    /// Why the action was performed.
    pub cause_description: String,
    /// The action name.
    pub action: String,
    /// Action details, if any.
    pub details: Option<String>,
    /// Compact snapshot of the alert before the transition.
    pub before: String,
    /// Compact snapshot of the alert after the transition.
    pub after: String,
}

impl AuditEventView {
    /// Builds the wire view of an audit event.
    #[must_use]
    pub fn from_event(event: &AuditEvent) -> Self {
        Self {
            event_id: event.event_id,
            alert_id: event.alert_id,
            actor_id: event.actor.id.clone(),
            actor_type: event.actor.actor_type.clone(),
            cause_id: event.cause.id.clone(),
            cause_description: event.cause.description.clone(),
            action: event.action.name.clone(),
            details: event.action.details.clone(),
            before: event.before.data.clone(),
            after: event.after.data.clone(),
        }
    }
}

/// Response to an expiry sweep.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SweepResponse {
    /// Alerts the sweep retired.
    pub expired_alert_ids: Vec<i64>,
    /// Open alerts the sweep examined.
    pub examined: usize,
}

/// Parses an RFC 3339 timestamp from a request field.
///
/// # Arguments
///
/// * `field` - The field name, for error reporting
/// * `value` - The timestamp string
///
/// # Errors
///
/// Returns an error if the string is not valid RFC 3339.
pub fn parse_timestamp(field: &str, value: &str) -> Result<OffsetDateTime, ApiError> {
    OffsetDateTime::parse(value, &Rfc3339).map_err(|e| ApiError::InvalidInput {
        field: field.to_string(),
        message: format!("Failed to parse timestamp '{value}': {e}"),
    })
}

/// Formats a timestamp as RFC 3339 for the wire.
fn format_timestamp(value: OffsetDateTime) -> Result<String, ApiError> {
    value.format(&Rfc3339).map_err(|e| ApiError::Internal {
        message: format!("Failed to format timestamp: {e}"),
    })
}
