// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API handler functions for alert lifecycle and read-only operations.
//!
//! Every handler follows the same shape: authorize, translate the
//! request into domain types, evaluate the transition through the
//! claim coordinator, and commit it with the store's compare-and-swap.
//! Handlers translate every lower-layer error into an [`ApiError`].

use shift_alert::{Command, CoreError, TransitionContext, TransitionResult, apply};
use shift_alert_audit::{Action, Actor, AuditEvent, Cause, StateSnapshot};
use shift_alert_domain::{
    AlertStatus, AreaId, BookingAlert, Capability, ClaimPolicy, ExpiryPolicy, ServiceId,
    ShiftWindow, StaffId, StaffProfile,
};
use shift_alert_persistence::{PersistenceError, SqliteAlertStore};
use time::OffsetDateTime;
use tracing::{debug, info};

use crate::auth::{AuthenticatedActor, AuthorizationService};
use crate::error::{
    ApiError, translate_core_error, translate_domain_error, translate_persistence_error,
};
use crate::notify::{AlertEvent, NotificationDispatcher, dispatch_or_warn};
use crate::request_response::{
    AlertView, AuditEventView, CancelAlertRequest, ClaimAlertRequest, ConfirmClaimRequest,
    CreateAlertRequest, RejectClaimRequest, StaffProfileView, SweepRequest, SweepResponse,
    UpsertStaffRequest, parse_timestamp,
};

/// Business policies the handlers evaluate transitions against.
#[derive(Debug, Clone, Copy)]
pub struct Policies {
    /// Claim behavior policy.
    pub claim: ClaimPolicy,
    /// Expiry sweep configuration.
    pub expiry: ExpiryPolicy,
}

/// Creates a new booking alert.
///
/// This function:
/// - Verifies the actor is authorized (Manager role required)
/// - Translates the request into a validated domain alert
/// - Persists the alert with its creation audit event
/// - Fans out an `Opened` notification
///
/// # Arguments
///
/// * `store` - The alert store
/// * `dispatcher` - The notification dispatcher
/// * `request` - The creation request
///
/// # Errors
///
/// Returns an error if the actor is not authorized, a field fails
/// validation, or the write fails.
pub fn create_alert(
    store: &mut SqliteAlertStore,
    dispatcher: &dyn NotificationDispatcher,
    request: CreateAlertRequest,
) -> Result<AlertView, ApiError> {
    let authenticated: AuthenticatedActor =
        AuthenticatedActor::from_request(&request.actor_id, &request.actor_role)?;
    AuthorizationService::authorize_create_alert(&authenticated)?;

    let window: ShiftWindow = ShiftWindow::new(
        parse_timestamp("window_start", &request.window_start)?,
        parse_timestamp("window_end", &request.window_end)?,
    )
    .map_err(translate_domain_error)?;

    let alert: BookingAlert = BookingAlert::new(
        request.title,
        ServiceId::new(&request.service_id),
        window,
        request.distribution.into_domain()?,
        authenticated.id.clone(),
        OffsetDateTime::now_utc(),
    )
    .map_err(translate_domain_error)?;

    let actor: Actor = authenticated.to_audit_actor();
    let cause: Cause = Cause::new(request.cause_id, request.cause_description);
    let audit_event: AuditEvent = AuditEvent::new(
        actor,
        cause,
        Action::new(
            String::from("CreateAlert"),
            Some(format!("Created alert '{}'", alert.title)),
        ),
        StateSnapshot::new(String::from("absent")),
        StateSnapshot::new(alert.snapshot()),
        None,
    );

    let persisted: BookingAlert = store
        .create_alert(&alert, &audit_event)
        .map_err(translate_persistence_error)?;
    let view: AlertView = AlertView::from_alert(&persisted)?;
    info!(alert_id = view.alert_id, "Created booking alert");

    dispatch_or_warn(
        dispatcher,
        &AlertEvent::Opened {
            alert_id: view.alert_id,
            title: view.title.clone(),
        },
    );
    Ok(view)
}

/// Lists the open alerts visible to a staff member.
///
/// The same eligibility rules gate listing and claiming, so every
/// alert returned here is claimable by this staff member (barring a
/// concurrent claim).
///
/// # Arguments
///
/// * `store` - The alert store
/// * `staff_id` - The staff member's identifier
///
/// # Errors
///
/// Returns an error if the staff profile does not exist or the query
/// fails.
pub fn list_open_alerts_for(
    store: &SqliteAlertStore,
    staff_id: &str,
) -> Result<Vec<AlertView>, ApiError> {
    let profile: StaffProfile = store
        .get_staff_profile(&StaffId::new(staff_id))
        .map_err(translate_persistence_error)?;
    let alerts: Vec<BookingAlert> = store
        .list_open_alerts_visible_to(&profile)
        .map_err(translate_persistence_error)?;
    alerts.iter().map(AlertView::from_alert).collect()
}

/// Retrieves a single alert.
///
/// # Arguments
///
/// * `store` - The alert store
/// * `alert_id` - The alert to retrieve
///
/// # Errors
///
/// Returns an error if the alert does not exist.
pub fn get_alert(store: &SqliteAlertStore, alert_id: i64) -> Result<AlertView, ApiError> {
    let alert: BookingAlert = store
        .get_alert(alert_id)
        .map_err(translate_persistence_error)?;
    AlertView::from_alert(&alert)
}

/// Claims an open alert for a staff member.
///
/// A claim that loses the race (the alert is pending or the version
/// moved underneath us) reports `AlreadyClaimed` with the winning
/// claimant; the caller re-reads and moves on.
///
/// # Arguments
///
/// * `store` - The alert store
/// * `dispatcher` - The notification dispatcher
/// * `alert_id` - The alert to claim
/// * `request` - The claim request
/// * `policies` - Claim and expiry policies
///
/// # Errors
///
/// Returns an error if the staff member is not eligible, the alert is
/// already claimed or terminal, or the write fails.
pub fn claim_alert(
    store: &mut SqliteAlertStore,
    dispatcher: &dyn NotificationDispatcher,
    alert_id: i64,
    request: ClaimAlertRequest,
    policies: Policies,
) -> Result<AlertView, ApiError> {
    let authenticated: AuthenticatedActor =
        AuthenticatedActor::from_request(&request.actor_id, &request.actor_role)?;
    let staff_id: StaffId = StaffId::new(&request.staff_id);

    let alert: BookingAlert = store
        .get_alert(alert_id)
        .map_err(translate_persistence_error)?;
    let profile: StaffProfile = store
        .get_staff_profile(&staff_id)
        .map_err(translate_persistence_error)?;

    let capabilities: Vec<Capability> = authenticated.role.capabilities();
    let ctx: TransitionContext<'_> = TransitionContext {
        claimant_profile: Some(&profile),
        actor_capabilities: &capabilities,
        claim_policy: policies.claim,
        expiry_policy: policies.expiry,
        now: OffsetDateTime::now_utc(),
    };
    let cause: Cause = Cause::new(request.cause_id, request.cause_description);

    let transition: TransitionResult = apply(
        &alert,
        Command::Claim {
            staff_id: staff_id.clone(),
        },
        &authenticated.to_audit_actor(),
        cause,
        &ctx,
    )
    .map_err(|e| match e {
        // A pending alert is not an invalid request; it means someone
        // else holds the claim.
        CoreError::InvalidTransition {
            from: AlertStatus::PendingConfirmation,
            ..
        } => ApiError::AlreadyClaimed {
            alert_id,
            claimed_by: alert.claimed_by.as_ref().map(|s| s.value().to_string()),
        },
        other => translate_core_error(other),
    })?;

    let committed: BookingAlert = store
        .compare_and_swap(alert.version, &transition)
        .map_err(|e| match e {
            PersistenceError::Conflict { current } if current.claimed_by.is_some() => {
                ApiError::AlreadyClaimed {
                    alert_id,
                    claimed_by: current.claimed_by.as_ref().map(|s| s.value().to_string()),
                }
            }
            other => translate_persistence_error(other),
        })?;

    info!(alert_id, staff_id = staff_id.value(), "Claimed alert");
    dispatch_or_warn(
        dispatcher,
        &AlertEvent::Claimed {
            alert_id,
            staff_id: staff_id.value().to_string(),
        },
    );
    AlertView::from_alert(&committed)
}

/// Confirms a pending claim.
///
/// # Arguments
///
/// * `store` - The alert store
/// * `dispatcher` - The notification dispatcher
/// * `alert_id` - The alert whose claim to confirm
/// * `request` - The confirmation request
/// * `policies` - Claim and expiry policies
///
/// # Errors
///
/// Returns an error if the actor lacks the manager capability, the
/// alert holds no pending claim, or a concurrent write won.
pub fn confirm_claim(
    store: &mut SqliteAlertStore,
    dispatcher: &dyn NotificationDispatcher,
    alert_id: i64,
    request: ConfirmClaimRequest,
    policies: Policies,
) -> Result<AlertView, ApiError> {
    let committed: BookingAlert = apply_manager_command(
        store,
        alert_id,
        &request.actor_id,
        &request.actor_role,
        Command::Confirm,
        Cause::new(request.cause_id, request.cause_description),
        policies,
    )?;

    if let Some(staff) = committed.claimed_by.as_ref() {
        dispatch_or_warn(
            dispatcher,
            &AlertEvent::Confirmed {
                alert_id,
                staff_id: staff.value().to_string(),
            },
        );
    }
    AlertView::from_alert(&committed)
}

/// Rejects a pending claim, reopening the alert.
///
/// # Arguments
///
/// * `store` - The alert store
/// * `dispatcher` - The notification dispatcher
/// * `alert_id` - The alert whose claim to reject
/// * `request` - The rejection request
/// * `policies` - Claim and expiry policies
///
/// # Errors
///
/// Returns an error if the actor lacks the manager capability, the
/// alert holds no pending claim, or a concurrent write won.
pub fn reject_claim(
    store: &mut SqliteAlertStore,
    dispatcher: &dyn NotificationDispatcher,
    alert_id: i64,
    request: RejectClaimRequest,
    policies: Policies,
) -> Result<AlertView, ApiError> {
    if request.reason.trim().is_empty() {
        return Err(ApiError::InvalidInput {
            field: String::from("reason"),
            message: String::from("Rejection reason must not be empty"),
        });
    }

    let committed: BookingAlert = apply_manager_command(
        store,
        alert_id,
        &request.actor_id,
        &request.actor_role,
        Command::Reject {
            reason: request.reason,
        },
        Cause::new(request.cause_id, request.cause_description),
        policies,
    )?;

    dispatch_or_warn(dispatcher, &AlertEvent::Reopened { alert_id });
    AlertView::from_alert(&committed)
}

/// Cancels an alert.
///
/// # Arguments
///
/// * `store` - The alert store
/// * `dispatcher` - The notification dispatcher
/// * `alert_id` - The alert to cancel
/// * `request` - The cancellation request
/// * `policies` - Claim and expiry policies
///
/// # Errors
///
/// Returns an error if the actor is neither the creator nor an admin,
/// the alert is terminal, or a concurrent write won.
pub fn cancel_alert(
    store: &mut SqliteAlertStore,
    dispatcher: &dyn NotificationDispatcher,
    alert_id: i64,
    request: CancelAlertRequest,
    policies: Policies,
) -> Result<AlertView, ApiError> {
    let committed: BookingAlert = apply_manager_command(
        store,
        alert_id,
        &request.actor_id,
        &request.actor_role,
        Command::Cancel,
        Cause::new(request.cause_id, request.cause_description),
        policies,
    )?;

    dispatch_or_warn(dispatcher, &AlertEvent::Cancelled { alert_id });
    AlertView::from_alert(&committed)
}

/// Runs the expiry sweep over all open alerts.
///
/// Each open alert whose grace deadline has passed is retired through
/// its own transition and compare-and-swap; an alert claimed while the
/// sweep runs simply loses its turn and is skipped.
///
/// # Arguments
///
/// * `store` - The alert store
/// * `dispatcher` - The notification dispatcher
/// * `request` - The sweep request
/// * `policies` - Claim and expiry policies
///
/// # Errors
///
/// Returns an error if the actor is not authorized or listing fails.
pub fn sweep_expired(
    store: &mut SqliteAlertStore,
    dispatcher: &dyn NotificationDispatcher,
    request: SweepRequest,
    policies: Policies,
) -> Result<SweepResponse, ApiError> {
    let authenticated: AuthenticatedActor =
        AuthenticatedActor::from_request(&request.actor_id, &request.actor_role)?;
    AuthorizationService::authorize_sweep(&authenticated)?;

    let now: OffsetDateTime = OffsetDateTime::now_utc();
    let capabilities: Vec<Capability> = authenticated.role.capabilities();
    let actor: Actor = authenticated.to_audit_actor();
    let open: Vec<BookingAlert> = store
        .list_open_alerts()
        .map_err(translate_persistence_error)?;
    let examined: usize = open.len();

    let mut expired_alert_ids: Vec<i64> = Vec::new();
    for alert in open {
        if now <= policies.expiry.deadline(alert.window.start()) {
            continue;
        }
        let Some(alert_id) = alert.alert_id else {
            continue;
        };

        let ctx: TransitionContext<'_> = TransitionContext {
            claimant_profile: None,
            actor_capabilities: &capabilities,
            claim_policy: policies.claim,
            expiry_policy: policies.expiry,
            now,
        };
        let cause: Cause = Cause::new(
            request.cause_id.clone(),
            request.cause_description.clone(),
        );
        let transition: TransitionResult =
            match apply(&alert, Command::Expire, &actor, cause, &ctx) {
                Ok(transition) => transition,
                Err(e) => {
                    debug!(alert_id, error = %e, "Sweep skipped alert");
                    continue;
                }
            };

        match store.compare_and_swap(alert.version, &transition) {
            Ok(_) => {
                expired_alert_ids.push(alert_id);
                dispatch_or_warn(dispatcher, &AlertEvent::Expired { alert_id });
            }
            // Claimed (or otherwise moved) while the sweep ran.
            Err(PersistenceError::Conflict { .. }) => {
                debug!(alert_id, "Sweep lost race, skipping alert");
            }
            Err(e) => return Err(translate_persistence_error(e)),
        }
    }

    info!(
        examined,
        expired = expired_alert_ids.len(),
        "Completed expiry sweep"
    );
    Ok(SweepResponse {
        expired_alert_ids,
        examined,
    })
}

/// Creates or updates a staff profile.
///
/// # Arguments
///
/// * `store` - The alert store
/// * `request` - The upsert request
///
/// # Errors
///
/// Returns an error if the actor is not an admin or a field fails
/// validation.
pub fn upsert_staff_profile(
    store: &mut SqliteAlertStore,
    request: UpsertStaffRequest,
) -> Result<StaffProfileView, ApiError> {
    let authenticated: AuthenticatedActor =
        AuthenticatedActor::from_request(&request.actor_id, &request.actor_role)?;
    AuthorizationService::authorize_manage_staff(&authenticated)?;

    if request.staff_id.trim().is_empty() {
        return Err(ApiError::InvalidInput {
            field: String::from("staff_id"),
            message: String::from("Staff identifier must not be empty"),
        });
    }
    if request.display_name.trim().is_empty() {
        return Err(ApiError::InvalidInput {
            field: String::from("display_name"),
            message: String::from("Display name must not be empty"),
        });
    }

    let capabilities: Vec<Capability> = request
        .capabilities
        .iter()
        .map(|c| Capability::parse(c).map_err(translate_domain_error))
        .collect::<Result<Vec<Capability>, ApiError>>()?;

    let profile: StaffProfile = StaffProfile::new(
        StaffId::new(&request.staff_id),
        request.display_name,
        request.is_active,
        request.location_area.as_deref().map(AreaId::new),
        capabilities,
    );
    store
        .upsert_staff_profile(&profile)
        .map_err(translate_persistence_error)?;
    info!(staff_id = profile.staff_id.value(), "Upserted staff profile");

    Ok(StaffProfileView::from_profile(&profile))
}

/// Retrieves a staff profile.
///
/// # Arguments
///
/// * `store` - The alert store
/// * `staff_id` - The staff member's identifier
///
/// # Errors
///
/// Returns an error if the profile does not exist.
pub fn get_staff_profile(
    store: &SqliteAlertStore,
    staff_id: &str,
) -> Result<StaffProfileView, ApiError> {
    let profile: StaffProfile = store
        .get_staff_profile(&StaffId::new(staff_id))
        .map_err(translate_persistence_error)?;
    Ok(StaffProfileView::from_profile(&profile))
}

/// Retrieves an alert's audit timeline, oldest first.
///
/// # Arguments
///
/// * `store` - The alert store
/// * `alert_id` - The alert whose timeline to retrieve
///
/// # Errors
///
/// Returns an error if the alert does not exist.
pub fn get_audit_timeline(
    store: &SqliteAlertStore,
    alert_id: i64,
) -> Result<Vec<AuditEventView>, ApiError> {
    let events = store
        .get_audit_timeline(alert_id)
        .map_err(translate_persistence_error)?;
    Ok(events.iter().map(AuditEventView::from_event).collect())
}

/// Reads an alert, applies a non-claim command, and commits it.
///
/// Shared by confirm, reject, and cancel; claim has its own path
/// because its conflicts report differently.
fn apply_manager_command(
    store: &mut SqliteAlertStore,
    alert_id: i64,
    actor_id: &str,
    actor_role: &str,
    command: Command,
    cause: Cause,
    policies: Policies,
) -> Result<BookingAlert, ApiError> {
    let authenticated: AuthenticatedActor = AuthenticatedActor::from_request(actor_id, actor_role)?;
    let alert: BookingAlert = store
        .get_alert(alert_id)
        .map_err(translate_persistence_error)?;

    let capabilities: Vec<Capability> = authenticated.role.capabilities();
    let ctx: TransitionContext<'_> = TransitionContext {
        claimant_profile: None,
        actor_capabilities: &capabilities,
        claim_policy: policies.claim,
        expiry_policy: policies.expiry,
        now: OffsetDateTime::now_utc(),
    };

    let transition: TransitionResult = apply(
        &alert,
        command,
        &authenticated.to_audit_actor(),
        cause,
        &ctx,
    )
    .map_err(translate_core_error)?;

    store
        .compare_and_swap(alert.version, &transition)
        .map_err(translate_persistence_error)
}
