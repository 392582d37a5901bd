// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

/// Errors that can occur during domain validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Alert title is empty or invalid.
    InvalidTitle(String),
    /// Service identifier is empty or invalid.
    InvalidServiceId(String),
    /// Staff identifier is empty or invalid.
    InvalidStaffId(String),
    /// Location area identifier is empty or invalid.
    InvalidAreaId(String),
    /// Shift window start is not strictly before its end.
    InvalidShiftWindow {
        /// The offending start time (ISO 8601).
        start: String,
        /// The offending end time (ISO 8601).
        end: String,
    },
    /// A targeted-staff distribution was given no staff identifiers.
    EmptyTargetStaff,
    /// A targeted-locations distribution was given no area identifiers.
    EmptyTargetLocations,
    /// A target set contains the same identifier more than once.
    DuplicateTarget {
        /// The duplicated identifier.
        target: String,
    },
    /// Alert status string is not recognized.
    InvalidStatus(String),
    /// Capability string is not recognized.
    InvalidCapability(String),
    /// Expiry grace period must be non-negative.
    InvalidGraceMinutes {
        /// The invalid minute count.
        minutes: i64,
    },
    /// An alert record violates the claim consistency invariant:
    /// `status == Open` must hold exactly when `claimed_by` is absent.
    ClaimStateInconsistent {
        /// The status found on the record.
        status: String,
        /// Whether a claimant was present on the record.
        has_claimant: bool,
    },
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidTitle(msg) => write!(f, "Invalid title: {msg}"),
            Self::InvalidServiceId(msg) => write!(f, "Invalid service identifier: {msg}"),
            Self::InvalidStaffId(msg) => write!(f, "Invalid staff identifier: {msg}"),
            Self::InvalidAreaId(msg) => write!(f, "Invalid area identifier: {msg}"),
            Self::InvalidShiftWindow { start, end } => {
                write!(
                    f,
                    "Shift window start must be before its end: start={start}, end={end}"
                )
            }
            Self::EmptyTargetStaff => {
                write!(f, "Targeted-staff distribution requires at least one staff identifier")
            }
            Self::EmptyTargetLocations => {
                write!(
                    f,
                    "Targeted-locations distribution requires at least one area identifier"
                )
            }
            Self::DuplicateTarget { target } => {
                write!(f, "Target set contains '{target}' more than once")
            }
            Self::InvalidStatus(s) => write!(f, "Unknown alert status: {s}"),
            Self::InvalidCapability(s) => write!(f, "Unknown capability: {s}"),
            Self::InvalidGraceMinutes { minutes } => {
                write!(
                    f,
                    "Invalid expiry grace period: {minutes} minutes. Must be non-negative"
                )
            }
            Self::ClaimStateInconsistent {
                status,
                has_claimant,
            } => {
                write!(
                    f,
                    "Alert record is inconsistent: status={status}, claimant present={has_claimant}"
                )
            }
        }
    }
}

impl std::error::Error for DomainError {}
