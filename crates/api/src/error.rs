// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the API layer.

use shift_alert::CoreError;
use shift_alert_domain::DomainError;
use shift_alert_persistence::PersistenceError;

/// Authorization errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// The request carried no actor identifier.
    MissingActor,
    /// The request carried an unknown role string.
    UnknownRole {
        /// The role string that failed to parse.
        role: String,
    },
    /// Authorization failed.
    Unauthorized {
        /// The action that was attempted.
        action: String,
        /// The role required for this action.
        required_role: String,
    },
}

impl std::fmt::Display for AuthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingActor => write!(f, "Request carried no actor identifier"),
            Self::UnknownRole { role } => write!(f, "Unknown role: '{role}'"),
            Self::Unauthorized {
                action,
                required_role,
            } => {
                write!(f, "Unauthorized: '{action}' requires {required_role} role")
            }
        }
    }
}

impl std::error::Error for AuthError {}

/// API-level errors.
///
/// These are distinct from domain/core errors and represent the API
/// contract. Each variant maps to exactly one HTTP status at the
/// server boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Authorization failed - the actor does not have permission.
    Unauthorized {
        /// The action that was attempted.
        action: String,
        /// The role or capability required for this action.
        required: String,
    },
    /// The staff member may not see or claim the alert.
    NotEligible {
        /// The staff member who attempted the action.
        staff_id: String,
        /// The eligibility reason code.
        reason: String,
    },
    /// Invalid input was provided.
    InvalidInput {
        /// The field that was invalid.
        field: String,
        /// A human-readable description of the error.
        message: String,
    },
    /// A requested resource was not found.
    ResourceNotFound {
        /// The type of resource that was not found.
        resource_type: String,
        /// A human-readable description of what was not found.
        message: String,
    },
    /// The alert already holds a claim; the attempted claim lost.
    AlreadyClaimed {
        /// The alert that was contested.
        alert_id: i64,
        /// The staff member holding the claim, if known.
        claimed_by: Option<String>,
    },
    /// A concurrent writer committed first; the caller's read is stale.
    Conflict {
        /// The alert that was contested.
        alert_id: i64,
        /// The version currently stored.
        stored_version: i64,
    },
    /// The requested transition does not apply to the alert's status.
    InvalidTransition {
        /// The alert's status when the command arrived.
        from: String,
        /// The rejected command.
        command: String,
    },
    /// An internal error occurred.
    Internal {
        /// A description of the internal error.
        message: String,
    },
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unauthorized { action, required } => {
                write!(f, "Unauthorized: '{action}' requires {required}")
            }
            Self::NotEligible { staff_id, reason } => {
                write!(f, "Staff '{staff_id}' is not eligible: {reason}")
            }
            Self::InvalidInput { field, message } => {
                write!(f, "Invalid input for field '{field}': {message}")
            }
            Self::ResourceNotFound {
                resource_type,
                message,
            } => {
                write!(f, "{resource_type} not found: {message}")
            }
            Self::AlreadyClaimed {
                alert_id,
                claimed_by,
            } => match claimed_by {
                Some(staff) => {
                    write!(f, "Alert {alert_id} is already claimed by '{staff}'")
                }
                None => write!(f, "Alert {alert_id} is already claimed"),
            },
            Self::Conflict {
                alert_id,
                stored_version,
            } => {
                write!(
                    f,
                    "Alert {alert_id} was modified concurrently: stored version is {stored_version}"
                )
            }
            Self::InvalidTransition { from, command } => {
                write!(f, "Cannot apply {command} to an alert in status {from}")
            }
            Self::Internal { message } => {
                write!(f, "Internal error: {message}")
            }
        }
    }
}

impl std::error::Error for ApiError {}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::MissingActor => Self::InvalidInput {
                field: String::from("actor_id"),
                message: String::from("Actor identifier must not be empty"),
            },
            AuthError::UnknownRole { role } => Self::InvalidInput {
                field: String::from("actor_role"),
                message: format!("Unknown role: '{role}'"),
            },
            AuthError::Unauthorized {
                action,
                required_role,
            } => Self::Unauthorized {
                action,
                required: format!("{required_role} role"),
            },
        }
    }
}

/// Translates a domain error into an API error.
///
/// This translation is explicit and ensures domain errors are not leaked directly.
#[must_use]
pub fn translate_domain_error(err: DomainError) -> ApiError {
    match err {
        DomainError::InvalidTitle(msg) => ApiError::InvalidInput {
            field: String::from("title"),
            message: msg,
        },
        DomainError::InvalidServiceId(msg) => ApiError::InvalidInput {
            field: String::from("service_id"),
            message: msg,
        },
        DomainError::InvalidStaffId(msg) => ApiError::InvalidInput {
            field: String::from("staff_id"),
            message: msg,
        },
        DomainError::InvalidAreaId(msg) => ApiError::InvalidInput {
            field: String::from("area_id"),
            message: msg,
        },
        DomainError::InvalidShiftWindow { start, end } => ApiError::InvalidInput {
            field: String::from("window"),
            message: format!("Shift window start must be before its end: start={start}, end={end}"),
        },
        DomainError::EmptyTargetStaff => ApiError::InvalidInput {
            field: String::from("distribution"),
            message: String::from("Targeted-staff distribution requires at least one staff identifier"),
        },
        DomainError::EmptyTargetLocations => ApiError::InvalidInput {
            field: String::from("distribution"),
            message: String::from(
                "Targeted-locations distribution requires at least one area identifier",
            ),
        },
        DomainError::DuplicateTarget { target } => ApiError::InvalidInput {
            field: String::from("distribution"),
            message: format!("Target set contains '{target}' more than once"),
        },
        DomainError::InvalidStatus(s) => ApiError::InvalidInput {
            field: String::from("status"),
            message: format!("Unknown alert status: {s}"),
        },
        DomainError::InvalidCapability(s) => ApiError::InvalidInput {
            field: String::from("capabilities"),
            message: format!("Unknown capability: {s}"),
        },
        DomainError::InvalidGraceMinutes { minutes } => ApiError::InvalidInput {
            field: String::from("grace_minutes"),
            message: format!("Invalid expiry grace period: {minutes} minutes. Must be non-negative"),
        },
        DomainError::ClaimStateInconsistent { .. } => ApiError::Internal {
            message: err.to_string(),
        },
    }
}

/// Translates a core error into an API error.
///
/// This translation is explicit and ensures core errors are not leaked directly.
#[must_use]
pub fn translate_core_error(err: CoreError) -> ApiError {
    match err {
        CoreError::DomainViolation(domain_err) => translate_domain_error(domain_err),
        CoreError::InvalidTransition { from, command } => ApiError::InvalidTransition {
            from: from.as_str().to_string(),
            command,
        },
        CoreError::NotEligible { staff_id, reason } => ApiError::NotEligible { staff_id, reason },
        CoreError::ReclaimBarred { staff_id } => ApiError::NotEligible {
            staff_id,
            reason: String::from("earlier claim on this alert was rejected"),
        },
        CoreError::Unauthorized { action, required } => ApiError::Unauthorized { action, required },
        CoreError::ExpiryNotDue { deadline } => ApiError::InvalidInput {
            field: String::from("now"),
            message: format!("Alert is not expired until {deadline}"),
        },
    }
}

/// Translates a persistence error into an API error.
///
/// `Conflict` is translated per call site (a claim race reports
/// `AlreadyClaimed`; other races report `Conflict`), so this function
/// covers the remaining variants.
#[must_use]
pub fn translate_persistence_error(err: PersistenceError) -> ApiError {
    match err {
        PersistenceError::AlertNotFound(id) => ApiError::ResourceNotFound {
            resource_type: String::from("Alert"),
            message: format!("Alert {id} does not exist"),
        },
        PersistenceError::StaffNotFound(id) => ApiError::ResourceNotFound {
            resource_type: String::from("Staff profile"),
            message: format!("Staff profile '{id}' does not exist"),
        },
        PersistenceError::Conflict { current } => ApiError::Conflict {
            alert_id: current.alert_id.unwrap_or(-1),
            stored_version: current.version,
        },
        PersistenceError::DatabaseError(_)
        | PersistenceError::DatabaseConnectionFailed(_)
        | PersistenceError::InitializationError(_)
        | PersistenceError::SerializationError(_) => ApiError::Internal {
            message: err.to_string(),
        },
    }
}
