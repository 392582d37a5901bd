// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use shift_alert_domain::StaffId;

/// A command represents user or system intent as data only.
///
/// Commands are the only way to request alert transitions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// A staff member attempts to claim an open alert.
    Claim {
        /// The claiming staff member.
        staff_id: StaffId,
    },
    /// A manager confirms the pending claim.
    Confirm,
    /// A manager rejects the pending claim, reopening the alert.
    Reject {
        /// Why the claim was rejected; recorded in the audit event.
        reason: String,
    },
    /// The creator or an admin withdraws the alert.
    Cancel,
    /// The expiry sweep retires an open alert whose start has passed.
    Expire,
}

impl Command {
    /// Returns the audit action name for this command.
    #[must_use]
    pub const fn action_name(&self) -> &'static str {
        match self {
            Self::Claim { .. } => "ClaimAlert",
            Self::Confirm => "ConfirmClaim",
            Self::Reject { .. } => "RejectClaim",
            Self::Cancel => "CancelAlert",
            Self::Expire => "ExpireAlert",
        }
    }
}
