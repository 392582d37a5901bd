// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::TransitionContext;
use shift_alert_audit::{Actor, Cause};
use shift_alert_domain::{
    AreaId, BookingAlert, Capability, ClaimPolicy, Distribution, ExpiryPolicy, ServiceId,
    ShiftWindow, StaffId, StaffProfile,
};
use time::OffsetDateTime;
use time::macros::datetime;

pub fn create_test_actor() -> Actor {
    Actor::new(String::from("mgr-100"), String::from("manager"))
}

pub fn create_test_cause() -> Cause {
    Cause::new(String::from("req-200"), String::from("Manager request"))
}

pub fn test_window() -> ShiftWindow {
    ShiftWindow::new(
        datetime!(2026-03-01 08:00 UTC),
        datetime!(2026-03-01 16:00 UTC),
    )
    .unwrap()
}

pub fn test_now() -> OffsetDateTime {
    datetime!(2026-02-25 10:00 UTC)
}

pub fn broadcast_alert() -> BookingAlert {
    let mut alert: BookingAlert = BookingAlert::new(
        String::from("Night shift cover"),
        ServiceId::new("icu"),
        test_window(),
        Distribution::BroadcastAll,
        String::from("mgr-100"),
        datetime!(2026-02-20 09:00 UTC),
    )
    .unwrap();
    alert.alert_id = Some(1);
    alert
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

pub fn test_context<'a>(
    claimant_profile: Option<&'a StaffProfile>,
    actor_capabilities: &'a [Capability],
    now: OffsetDateTime,
) -> TransitionContext<'a> {
    TransitionContext {
        claimant_profile,
        actor_capabilities,
        claim_policy: ClaimPolicy::default(),
        expiry_policy: ExpiryPolicy::from_minutes(30).unwrap(),
        now,
    }
}
