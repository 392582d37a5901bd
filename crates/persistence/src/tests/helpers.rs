// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::SqliteAlertStore;
use shift_alert::{Command, TransitionContext, TransitionResult, apply};
use shift_alert_audit::{Action, Actor, AuditEvent, Cause, StateSnapshot};
use shift_alert_domain::{
    AreaId, BookingAlert, ClaimPolicy, Distribution, ExpiryPolicy, ServiceId, ShiftWindow,
    StaffId, StaffProfile,
};
use time::macros::datetime;

pub fn create_test_actor() -> Actor {
    Actor::new(String::from("mgr-100"), String::from("manager"))
}

pub fn create_test_cause() -> Cause {
    Cause::new(String::from("req-200"), String::from("Manager request"))
}

pub fn unpersisted_alert() -> BookingAlert {
    BookingAlert::new(
        String::from("Weekend cover"),
        ServiceId::new("ward-desk"),
        ShiftWindow::new(
            datetime!(2026-03-07 08:00 UTC),
            datetime!(2026-03-07 16:00 UTC),
        )
        .unwrap(),
        Distribution::BroadcastAll,
        String::from("mgr-100"),
        datetime!(2026-03-01 09:00 UTC),
    )
    .unwrap()
}

pub fn creation_event(alert: &BookingAlert) -> AuditEvent {
    AuditEvent::new(
        create_test_actor(),
        create_test_cause(),
        Action::new(
            String::from("CreateAlert"),
            Some(format!("Created alert '{}'", alert.title)),
        ),
        StateSnapshot::new(String::from("absent")),
        StateSnapshot::new(alert.snapshot()),
        None,
    )
}

/// Creates and persists a fresh open alert, returning it with its
/// assigned identifier.
pub fn persist_open_alert(store: &mut SqliteAlertStore) -> BookingAlert {
    let alert: BookingAlert = unpersisted_alert();
    store.create_alert(&alert, &creation_event(&alert)).unwrap()
}

pub fn active_profile(staff_id: &str) -> StaffProfile {
    StaffProfile::new(
        StaffId::new(staff_id),
        String::from("Jordan Reyes"),
        true,
        Some(AreaId::new("ward-3")),
        Vec::new(),
    )
}

/// Evaluates a claim transition against the given alert without
/// committing it.
pub fn claim_transition(alert: &BookingAlert, staff_id: &str) -> TransitionResult {
    let profile: StaffProfile = active_profile(staff_id);
    let ctx: TransitionContext<'_> = TransitionContext {
        claimant_profile: Some(&profile),
        actor_capabilities: &[],
        claim_policy: ClaimPolicy::default(),
        expiry_policy: ExpiryPolicy::from_minutes(30).unwrap(),
        now: datetime!(2026-03-05 10:00 UTC),
    };
    apply(
        alert,
        Command::Claim {
            staff_id: StaffId::new(staff_id),
        },
        &create_test_actor(),
        create_test_cause(),
        &ctx,
    )
    .unwrap()
}
