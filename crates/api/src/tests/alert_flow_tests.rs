// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::ApiError;
use crate::handlers;
use crate::request_response::{
    AlertView, AuditEventView, CreateAlertRequest, DistributionPayload, SweepResponse,
};
use crate::tests::helpers::{
    DISPATCHER, cancel_request, claim_request, confirm_request, create_alert, create_request,
    default_policies, reject_request, seeded_store, stale_create_request, sweep_request,
};
use shift_alert_persistence::SqliteAlertStore;

#[test]
fn test_create_alert_returns_open_view() {
    let mut store: SqliteAlertStore = seeded_store();

    let view: AlertView = create_alert(&mut store);

    assert_eq!(view.status, "Open");
    assert_eq!(view.version, 0);
    assert_eq!(view.created_by, "mgr-100");
    assert!(view.claimed_by.is_none());
}

#[test]
fn test_create_alert_with_empty_title_is_invalid() {
    let mut store: SqliteAlertStore = seeded_store();
    let mut request: CreateAlertRequest = create_request();
    request.title = String::from("  ");

    let result: Result<AlertView, ApiError> =
        handlers::create_alert(&mut store, &DISPATCHER, request);

    assert!(matches!(
        result.unwrap_err(),
        ApiError::InvalidInput { field, .. } if field == "title"
    ));
}

#[test]
fn test_create_alert_with_bad_timestamp_is_invalid() {
    let mut store: SqliteAlertStore = seeded_store();
    let mut request: CreateAlertRequest = create_request();
    request.window_start = String::from("tomorrow-ish");

    let result: Result<AlertView, ApiError> =
        handlers::create_alert(&mut store, &DISPATCHER, request);

    assert!(matches!(
        result.unwrap_err(),
        ApiError::InvalidInput { field, .. } if field == "window_start"
    ));
}

#[test]
fn test_create_alert_with_inverted_window_is_invalid() {
    let mut store: SqliteAlertStore = seeded_store();
    let mut request: CreateAlertRequest = create_request();
    request.window_start = String::from("2099-03-01T16:00:00Z");
    request.window_end = String::from("2099-03-01T08:00:00Z");

    let result: Result<AlertView, ApiError> =
        handlers::create_alert(&mut store, &DISPATCHER, request);

    assert!(matches!(
        result.unwrap_err(),
        ApiError::InvalidInput { field, .. } if field == "window"
    ));
}

#[test]
fn test_create_targeted_alert_without_targets_is_invalid() {
    let mut store: SqliteAlertStore = seeded_store();
    let mut request: CreateAlertRequest = create_request();
    request.distribution = DistributionPayload {
        mode: String::from("targeted_staff"),
        staff_ids: None,
        area_ids: None,
    };

    let result: Result<AlertView, ApiError> =
        handlers::create_alert(&mut store, &DISPATCHER, request);

    assert!(matches!(result.unwrap_err(), ApiError::InvalidInput { .. }));
}

#[test]
fn test_list_open_alerts_for_staff() {
    let mut store: SqliteAlertStore = seeded_store();
    let view: AlertView = create_alert(&mut store);

    let listed: Vec<AlertView> = handlers::list_open_alerts_for(&store, "staff-1").unwrap();

    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].alert_id, view.alert_id);
}

#[test]
fn test_list_open_alerts_for_unknown_staff_is_not_found() {
    let store: SqliteAlertStore = seeded_store();

    let result: Result<Vec<AlertView>, ApiError> =
        handlers::list_open_alerts_for(&store, "nobody");

    assert!(matches!(
        result.unwrap_err(),
        ApiError::ResourceNotFound { .. }
    ));
}

#[test]
fn test_claim_transitions_alert_to_pending() {
    let mut store: SqliteAlertStore = seeded_store();
    let view: AlertView = create_alert(&mut store);

    let claimed: AlertView = handlers::claim_alert(
        &mut store,
        &DISPATCHER,
        view.alert_id,
        claim_request("staff-1"),
        default_policies(),
    )
    .unwrap();

    assert_eq!(claimed.status, "PendingConfirmation");
    assert_eq!(claimed.claimed_by.as_deref(), Some("staff-1"));
    assert!(claimed.claimed_at.is_some());
    assert_eq!(claimed.version, 1);
}

#[test]
fn test_second_claim_reports_already_claimed() {
    let mut store: SqliteAlertStore = seeded_store();
    let view: AlertView = create_alert(&mut store);

    handlers::claim_alert(
        &mut store,
        &DISPATCHER,
        view.alert_id,
        claim_request("staff-1"),
        default_policies(),
    )
    .unwrap();
    let result: Result<AlertView, ApiError> = handlers::claim_alert(
        &mut store,
        &DISPATCHER,
        view.alert_id,
        claim_request("staff-2"),
        default_policies(),
    );

    assert_eq!(
        result.unwrap_err(),
        ApiError::AlreadyClaimed {
            alert_id: view.alert_id,
            claimed_by: Some(String::from("staff-1")),
        }
    );
}

#[test]
fn test_claim_unknown_alert_is_not_found() {
    let mut store: SqliteAlertStore = seeded_store();

    let result: Result<AlertView, ApiError> = handlers::claim_alert(
        &mut store,
        &DISPATCHER,
        999,
        claim_request("staff-1"),
        default_policies(),
    );

    assert!(matches!(
        result.unwrap_err(),
        ApiError::ResourceNotFound { .. }
    ));
}

#[test]
fn test_confirm_transitions_alert_to_confirmed() {
    let mut store: SqliteAlertStore = seeded_store();
    let view: AlertView = create_alert(&mut store);
    handlers::claim_alert(
        &mut store,
        &DISPATCHER,
        view.alert_id,
        claim_request("staff-1"),
        default_policies(),
    )
    .unwrap();

    let confirmed: AlertView = handlers::confirm_claim(
        &mut store,
        &DISPATCHER,
        view.alert_id,
        confirm_request(),
        default_policies(),
    )
    .unwrap();

    assert_eq!(confirmed.status, "Confirmed");
    assert_eq!(confirmed.claimed_by.as_deref(), Some("staff-1"));
    assert_eq!(confirmed.version, 2);
}

#[test]
fn test_confirm_open_alert_is_invalid_transition() {
    let mut store: SqliteAlertStore = seeded_store();
    let view: AlertView = create_alert(&mut store);

    let result: Result<AlertView, ApiError> = handlers::confirm_claim(
        &mut store,
        &DISPATCHER,
        view.alert_id,
        confirm_request(),
        default_policies(),
    );

    assert_eq!(
        result.unwrap_err(),
        ApiError::InvalidTransition {
            from: String::from("Open"),
            command: String::from("ConfirmClaim"),
        }
    );
}

#[test]
fn test_reject_reopens_alert_for_other_staff() {
    let mut store: SqliteAlertStore = seeded_store();
    let view: AlertView = create_alert(&mut store);
    handlers::claim_alert(
        &mut store,
        &DISPATCHER,
        view.alert_id,
        claim_request("staff-1"),
        default_policies(),
    )
    .unwrap();

    let reopened: AlertView = handlers::reject_claim(
        &mut store,
        &DISPATCHER,
        view.alert_id,
        reject_request("Needs senior cover"),
        default_policies(),
    )
    .unwrap();
    assert_eq!(reopened.status, "Open");
    assert!(reopened.claimed_by.is_none());

    let reclaimed: AlertView = handlers::claim_alert(
        &mut store,
        &DISPATCHER,
        view.alert_id,
        claim_request("staff-2"),
        default_policies(),
    )
    .unwrap();
    assert_eq!(reclaimed.claimed_by.as_deref(), Some("staff-2"));
    assert_eq!(reclaimed.version, 3);
}

#[test]
fn test_reject_requires_a_reason() {
    let mut store: SqliteAlertStore = seeded_store();
    let view: AlertView = create_alert(&mut store);
    handlers::claim_alert(
        &mut store,
        &DISPATCHER,
        view.alert_id,
        claim_request("staff-1"),
        default_policies(),
    )
    .unwrap();

    let result: Result<AlertView, ApiError> = handlers::reject_claim(
        &mut store,
        &DISPATCHER,
        view.alert_id,
        reject_request("   "),
        default_policies(),
    );

    assert!(matches!(
        result.unwrap_err(),
        ApiError::InvalidInput { field, .. } if field == "reason"
    ));
}

#[test]
fn test_cancel_by_creator_succeeds() {
    let mut store: SqliteAlertStore = seeded_store();
    let view: AlertView = create_alert(&mut store);

    let cancelled: AlertView = handlers::cancel_alert(
        &mut store,
        &DISPATCHER,
        view.alert_id,
        cancel_request(),
        default_policies(),
    )
    .unwrap();

    assert_eq!(cancelled.status, "Cancelled");
}

#[test]
fn test_cancel_confirmed_alert_is_invalid_transition() {
    let mut store: SqliteAlertStore = seeded_store();
    let view: AlertView = create_alert(&mut store);
    handlers::claim_alert(
        &mut store,
        &DISPATCHER,
        view.alert_id,
        claim_request("staff-1"),
        default_policies(),
    )
    .unwrap();
    handlers::confirm_claim(
        &mut store,
        &DISPATCHER,
        view.alert_id,
        confirm_request(),
        default_policies(),
    )
    .unwrap();

    let result: Result<AlertView, ApiError> = handlers::cancel_alert(
        &mut store,
        &DISPATCHER,
        view.alert_id,
        cancel_request(),
        default_policies(),
    );

    assert!(matches!(
        result.unwrap_err(),
        ApiError::InvalidTransition { .. }
    ));
}

#[test]
fn test_sweep_expires_only_stale_alerts() {
    let mut store: SqliteAlertStore = seeded_store();
    let fresh: AlertView = create_alert(&mut store);
    let stale: AlertView =
        handlers::create_alert(&mut store, &DISPATCHER, stale_create_request()).unwrap();

    let response: SweepResponse = handlers::sweep_expired(
        &mut store,
        &DISPATCHER,
        sweep_request(),
        default_policies(),
    )
    .unwrap();

    assert_eq!(response.examined, 2);
    assert_eq!(response.expired_alert_ids, vec![stale.alert_id]);
    assert_eq!(
        handlers::get_alert(&store, stale.alert_id).unwrap().status,
        "Expired"
    );
    assert_eq!(
        handlers::get_alert(&store, fresh.alert_id).unwrap().status,
        "Open"
    );
}

#[test]
fn test_second_sweep_finds_nothing_to_expire() {
    let mut store: SqliteAlertStore = seeded_store();
    let stale: AlertView =
        handlers::create_alert(&mut store, &DISPATCHER, stale_create_request()).unwrap();

    let first: SweepResponse = handlers::sweep_expired(
        &mut store,
        &DISPATCHER,
        sweep_request(),
        default_policies(),
    )
    .unwrap();
    assert_eq!(first.expired_alert_ids, vec![stale.alert_id]);

    // The expired alert is no longer open, so a repeat sweep is a no-op.
    let second: SweepResponse = handlers::sweep_expired(
        &mut store,
        &DISPATCHER,
        sweep_request(),
        default_policies(),
    )
    .unwrap();

    assert!(second.expired_alert_ids.is_empty());
    assert_eq!(second.examined, 0);
    assert_eq!(
        handlers::get_alert(&store, stale.alert_id).unwrap().version,
        1
    );
}

#[test]
fn test_sweep_skips_claimed_alerts() {
    let mut store: SqliteAlertStore = seeded_store();
    let stale: AlertView =
        handlers::create_alert(&mut store, &DISPATCHER, stale_create_request()).unwrap();
    handlers::claim_alert(
        &mut store,
        &DISPATCHER,
        stale.alert_id,
        claim_request("staff-1"),
        default_policies(),
    )
    .unwrap();

    let response: SweepResponse = handlers::sweep_expired(
        &mut store,
        &DISPATCHER,
        sweep_request(),
        default_policies(),
    )
    .unwrap();

    assert!(response.expired_alert_ids.is_empty());
    assert_eq!(
        handlers::get_alert(&store, stale.alert_id).unwrap().status,
        "PendingConfirmation"
    );
}

#[test]
fn test_audit_timeline_records_full_history() {
    let mut store: SqliteAlertStore = seeded_store();
    let view: AlertView = create_alert(&mut store);
    handlers::claim_alert(
        &mut store,
        &DISPATCHER,
        view.alert_id,
        claim_request("staff-1"),
        default_policies(),
    )
    .unwrap();
    handlers::reject_claim(
        &mut store,
        &DISPATCHER,
        view.alert_id,
        reject_request("Unavailable"),
        default_policies(),
    )
    .unwrap();
    handlers::claim_alert(
        &mut store,
        &DISPATCHER,
        view.alert_id,
        claim_request("staff-2"),
        default_policies(),
    )
    .unwrap();
    handlers::confirm_claim(
        &mut store,
        &DISPATCHER,
        view.alert_id,
        confirm_request(),
        default_policies(),
    )
    .unwrap();

    let timeline: Vec<AuditEventView> =
        handlers::get_audit_timeline(&store, view.alert_id).unwrap();

    let actions: Vec<&str> = timeline.iter().map(|e| e.action.as_str()).collect();
    assert_eq!(
        actions,
        vec![
            "CreateAlert",
            "ClaimAlert",
            "RejectClaim",
            "ClaimAlert",
            "ConfirmClaim"
        ]
    );
}

#[test]
fn test_audit_timeline_for_unknown_alert_is_not_found() {
    let store: SqliteAlertStore = seeded_store();

    let result: Result<Vec<AuditEventView>, ApiError> =
        handlers::get_audit_timeline(&store, 404);

    assert!(matches!(
        result.unwrap_err(),
        ApiError::ResourceNotFound { .. }
    ));
}
