// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::command::Command;
use crate::error::CoreError;
use shift_alert_audit::{Action, Actor, AuditEvent, Cause, StateSnapshot};
use shift_alert_domain::{
    AlertStatus, BookingAlert, Capability, ClaimPolicy, EligibilityReason, ExpiryPolicy, StaffId,
    StaffProfile, evaluate_eligibility,
};
use time::OffsetDateTime;
use time::format_description::well_known::Iso8601;

/// Read-only context a transition is evaluated against.
///
/// The coordinator never performs I/O; callers gather the claimant's
/// directory profile and the actor's capability set up front.
#[derive(Debug, Clone)]
pub struct TransitionContext<'a> {
    /// Directory profile of the claiming staff member. Required for
    /// `Claim`; ignored by every other command.
    pub claimant_profile: Option<&'a StaffProfile>,
    /// Capabilities of the acting user, supplied by the authorization
    /// layer. The coordinator only checks membership.
    pub actor_capabilities: &'a [Capability],
    /// Business policy for claim behavior.
    pub claim_policy: ClaimPolicy,
    /// Configuration for the expiry sweep.
    pub expiry_policy: ExpiryPolicy,
    /// The current time, injected for testability.
    pub now: OffsetDateTime,
}

/// The result of a successful transition evaluation.
///
/// `new_alert` carries the incremented version the store will commit;
/// nothing is persisted until the caller hands it to the store's
/// compare-and-swap keyed on the pre-transition version.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionResult {
    /// The alert after the transition, version already incremented.
    pub new_alert: BookingAlert,
    /// The audit event recording this transition.
    pub audit_event: AuditEvent,
}

/// Applies a command to an alert, producing the mutated alert and its
/// audit event.
///
/// This is the claim coordinator's state machine. It is pure: guard
/// violations return a typed error and the input alert is never
/// modified. Durability and the concurrency contract live in the store;
/// a caller must commit the result with `compare_and_swap` against the
/// pre-transition version, and treat a swap failure as losing the race.
///
/// # Arguments
///
/// * `alert` - The current alert record (immutable)
/// * `command` - The command to apply
/// * `actor` - The actor performing this action
/// * `cause` - The cause or reason for this action
/// * `ctx` - Profile, capabilities, policies, and the current time
///
/// # Errors
///
/// Returns an error if:
/// - The command does not apply to the alert's current status
/// - The claiming staff member is not eligible or is barred by policy
/// - The actor lacks the required capability
/// - The expiry deadline has not passed
pub fn apply(
    alert: &BookingAlert,
    command: Command,
    actor: &Actor,
    cause: Cause,
    ctx: &TransitionContext<'_>,
) -> Result<TransitionResult, CoreError> {
    match command {
        Command::Claim { staff_id } => apply_claim(alert, staff_id, actor, cause, ctx),
        Command::Confirm => apply_confirm(alert, actor, cause, ctx),
        Command::Reject { reason } => apply_reject(alert, reason, actor, cause, ctx),
        Command::Cancel => apply_cancel(alert, actor, cause, ctx),
        Command::Expire => apply_expire(alert, actor, cause, ctx),
    }
}

/// Claim: `Open` → `PendingConfirmation`.
fn apply_claim(
    alert: &BookingAlert,
    staff_id: StaffId,
    actor: &Actor,
    cause: Cause,
    ctx: &TransitionContext<'_>,
) -> Result<TransitionResult, CoreError> {
    if alert.status != AlertStatus::Open {
        return Err(CoreError::InvalidTransition {
            from: alert.status,
            command: String::from("ClaimAlert"),
        });
    }

    let Some(profile) = ctx.claimant_profile else {
        return Err(CoreError::NotEligible {
            staff_id: staff_id.value().to_string(),
            reason: String::from("staff profile unavailable"),
        });
    };
    if profile.staff_id != staff_id {
        return Err(CoreError::NotEligible {
            staff_id: staff_id.value().to_string(),
            reason: String::from("staff profile does not match claimant"),
        });
    }

    let reason: EligibilityReason = evaluate_eligibility(alert, profile);
    if !reason.is_eligible() {
        return Err(CoreError::NotEligible {
            staff_id: staff_id.value().to_string(),
            reason: reason.as_str().to_string(),
        });
    }

    if !ctx.claim_policy.allow_reclaim_after_reject && alert.rejected_claimants.contains(&staff_id)
    {
        return Err(CoreError::ReclaimBarred {
            staff_id: staff_id.value().to_string(),
        });
    }

    let before: StateSnapshot = StateSnapshot::new(alert.snapshot());

    let mut new_alert: BookingAlert = alert.clone();
    new_alert.status = AlertStatus::PendingConfirmation;
    new_alert.claimed_by = Some(staff_id.clone());
    new_alert.claimed_at = Some(ctx.now);
    new_alert.version = alert.version + 1;

    let after: StateSnapshot = StateSnapshot::new(new_alert.snapshot());
    let action: Action = Action::new(
        String::from("ClaimAlert"),
        Some(format!(
            "Staff '{}' claimed alert '{}' ({})",
            staff_id.value(),
            new_alert.title,
            reason
        )),
    );
    let audit_event: AuditEvent = AuditEvent::new(
        actor.clone(),
        cause,
        action,
        before,
        after,
        alert.alert_id,
    );

    Ok(TransitionResult {
        new_alert,
        audit_event,
    })
}

/// Confirm: `PendingConfirmation` → `Confirmed`. Manager or admin only.
fn apply_confirm(
    alert: &BookingAlert,
    actor: &Actor,
    cause: Cause,
    ctx: &TransitionContext<'_>,
) -> Result<TransitionResult, CoreError> {
    require_manager(ctx, "ConfirmClaim")?;

    if alert.status != AlertStatus::PendingConfirmation {
        return Err(CoreError::InvalidTransition {
            from: alert.status,
            command: String::from("ConfirmClaim"),
        });
    }

    let before: StateSnapshot = StateSnapshot::new(alert.snapshot());

    let mut new_alert: BookingAlert = alert.clone();
    new_alert.status = AlertStatus::Confirmed;
    new_alert.version = alert.version + 1;

    let after: StateSnapshot = StateSnapshot::new(new_alert.snapshot());
    let action: Action = Action::new(
        String::from("ConfirmClaim"),
        Some(format!(
            "Confirmed claim by '{}' on alert '{}'",
            new_alert
                .claimed_by
                .as_ref()
                .map_or("-", StaffId::value),
            new_alert.title
        )),
    );
    let audit_event: AuditEvent = AuditEvent::new(
        actor.clone(),
        cause,
        action,
        before,
        after,
        alert.alert_id,
    );

    Ok(TransitionResult {
        new_alert,
        audit_event,
    })
}

/// Reject: `PendingConfirmation` → `Open`. Manager or admin only.
///
/// The rejected claimant is remembered on the record so the reclaim
/// policy can bar them later; the reason goes into the audit event.
fn apply_reject(
    alert: &BookingAlert,
    reason: String,
    actor: &Actor,
    cause: Cause,
    ctx: &TransitionContext<'_>,
) -> Result<TransitionResult, CoreError> {
    require_manager(ctx, "RejectClaim")?;

    if alert.status != AlertStatus::PendingConfirmation {
        return Err(CoreError::InvalidTransition {
            from: alert.status,
            command: String::from("RejectClaim"),
        });
    }

    let before: StateSnapshot = StateSnapshot::new(alert.snapshot());
    let rejected: Option<StaffId> = alert.claimed_by.clone();

    let mut new_alert: BookingAlert = alert.clone();
    new_alert.status = AlertStatus::Open;
    new_alert.claimed_by = None;
    new_alert.claimed_at = None;
    if let Some(staff) = rejected.clone() {
        new_alert.rejected_claimants.push(staff);
    }
    new_alert.version = alert.version + 1;

    let after: StateSnapshot = StateSnapshot::new(new_alert.snapshot());
    let action: Action = Action::new(
        String::from("RejectClaim"),
        Some(format!(
            "Rejected claim by '{}' on alert '{}'. Reason: {reason}",
            rejected.as_ref().map_or("-", StaffId::value),
            new_alert.title
        )),
    );
    let audit_event: AuditEvent = AuditEvent::new(
        actor.clone(),
        cause,
        action,
        before,
        after,
        alert.alert_id,
    );

    Ok(TransitionResult {
        new_alert,
        audit_event,
    })
}

/// Cancel: `Open` or `PendingConfirmation` → `Cancelled`.
///
/// Permitted to the alert's creator or any actor with the admin
/// capability.
fn apply_cancel(
    alert: &BookingAlert,
    actor: &Actor,
    cause: Cause,
    ctx: &TransitionContext<'_>,
) -> Result<TransitionResult, CoreError> {
    let is_creator: bool = actor.id == alert.created_by;
    let is_admin: bool = ctx.actor_capabilities.contains(&Capability::Admin);
    if !is_creator && !is_admin {
        return Err(CoreError::Unauthorized {
            action: String::from("CancelAlert"),
            required: String::from("creator or admin capability"),
        });
    }

    if !matches!(
        alert.status,
        AlertStatus::Open | AlertStatus::PendingConfirmation
    ) {
        return Err(CoreError::InvalidTransition {
            from: alert.status,
            command: String::from("CancelAlert"),
        });
    }

    let before: StateSnapshot = StateSnapshot::new(alert.snapshot());

    let mut new_alert: BookingAlert = alert.clone();
    new_alert.status = AlertStatus::Cancelled;
    new_alert.claimed_by = None;
    new_alert.claimed_at = None;
    new_alert.version = alert.version + 1;

    let after: StateSnapshot = StateSnapshot::new(new_alert.snapshot());
    let action: Action = Action::new(
        String::from("CancelAlert"),
        Some(format!("Cancelled alert '{}'", new_alert.title)),
    );
    let audit_event: AuditEvent = AuditEvent::new(
        actor.clone(),
        cause,
        action,
        before,
        after,
        alert.alert_id,
    );

    Ok(TransitionResult {
        new_alert,
        audit_event,
    })
}

/// Expire: `Open` → `Expired`, once the grace deadline has passed.
fn apply_expire(
    alert: &BookingAlert,
    actor: &Actor,
    cause: Cause,
    ctx: &TransitionContext<'_>,
) -> Result<TransitionResult, CoreError> {
    if alert.status != AlertStatus::Open {
        return Err(CoreError::InvalidTransition {
            from: alert.status,
            command: String::from("ExpireAlert"),
        });
    }

    let deadline: OffsetDateTime = ctx.expiry_policy.deadline(alert.window.start());
    if ctx.now <= deadline {
        return Err(CoreError::ExpiryNotDue {
            deadline: deadline
                .format(&Iso8601::DEFAULT)
                .unwrap_or_else(|_| deadline.to_string()),
        });
    }

    let before: StateSnapshot = StateSnapshot::new(alert.snapshot());

    let mut new_alert: BookingAlert = alert.clone();
    new_alert.status = AlertStatus::Expired;
    new_alert.version = alert.version + 1;

    let after: StateSnapshot = StateSnapshot::new(new_alert.snapshot());
    let action: Action = Action::new(
        String::from("ExpireAlert"),
        Some(format!(
            "Expired unclaimed alert '{}' past its grace deadline",
            new_alert.title
        )),
    );
    let audit_event: AuditEvent = AuditEvent::new(
        actor.clone(),
        cause,
        action,
        before,
        after,
        alert.alert_id,
    );

    Ok(TransitionResult {
        new_alert,
        audit_event,
    })
}

/// Checks for the manager or admin capability.
fn require_manager(ctx: &TransitionContext<'_>, action: &str) -> Result<(), CoreError> {
    let allowed: bool = ctx.actor_capabilities.contains(&Capability::Manager)
        || ctx.actor_capabilities.contains(&Capability::Admin);
    if allowed {
        Ok(())
    } else {
        Err(CoreError::Unauthorized {
            action: action.to_string(),
            required: String::from("manager or admin capability"),
        })
    }
}
