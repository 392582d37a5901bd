// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use shift_alert_domain::{AlertStatus, DomainError};

/// Errors that can occur during alert transitions.
///
/// Every guard violation is typed and leaves the alert untouched;
/// transitions are all-or-nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// A domain rule was violated.
    DomainViolation(DomainError),
    /// The requested command does not apply to the alert's current status.
    /// Always non-retryable.
    InvalidTransition {
        /// The alert's status when the command arrived.
        from: AlertStatus,
        /// The audit action name of the rejected command.
        command: String,
    },
    /// The staff member may not see or claim this alert.
    NotEligible {
        /// The staff member who attempted the claim.
        staff_id: String,
        /// The eligibility reason code.
        reason: String,
    },
    /// The staff member's earlier claim on this alert was rejected and
    /// the claim policy forbids re-claiming.
    ReclaimBarred {
        /// The staff member whose re-claim was barred.
        staff_id: String,
    },
    /// The actor lacks the capability the command requires.
    Unauthorized {
        /// The audit action name of the rejected command.
        action: String,
        /// The capability that would have permitted it.
        required: String,
    },
    /// The expiry deadline has not passed yet.
    ExpiryNotDue {
        /// The deadline after which expiry becomes valid (ISO 8601).
        deadline: String,
    },
}

impl std::fmt::Display for CoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DomainViolation(err) => write!(f, "Domain violation: {err}"),
            Self::InvalidTransition { from, command } => {
                write!(f, "Cannot apply {command} to an alert in status {from}")
            }
            Self::NotEligible { staff_id, reason } => {
                write!(f, "Staff '{staff_id}' is not eligible for this alert: {reason}")
            }
            Self::ReclaimBarred { staff_id } => {
                write!(
                    f,
                    "Staff '{staff_id}' was rejected on this alert and may not re-claim it"
                )
            }
            Self::Unauthorized { action, required } => {
                write!(f, "Unauthorized: '{action}' requires {required}")
            }
            Self::ExpiryNotDue { deadline } => {
                write!(f, "Alert is not expired until {deadline}")
            }
        }
    }
}

impl std::error::Error for CoreError {}

impl From<DomainError> for CoreError {
    fn from(err: DomainError) -> Self {
        Self::DomainViolation(err)
    }
}
