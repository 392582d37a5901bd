// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::handlers::{self, Policies};
use crate::notify::TracingDispatcher;
use crate::request_response::{
    AlertView, CancelAlertRequest, ClaimAlertRequest, ConfirmClaimRequest, CreateAlertRequest,
    DistributionPayload, RejectClaimRequest, SweepRequest, UpsertStaffRequest,
};
use shift_alert_domain::{AreaId, Capability, ClaimPolicy, ExpiryPolicy, StaffId, StaffProfile};
use shift_alert_persistence::SqliteAlertStore;

pub const DISPATCHER: TracingDispatcher = TracingDispatcher;

/// A store seeded with two active staff members in ward 3.
pub fn seeded_store() -> SqliteAlertStore {
    let mut store: SqliteAlertStore = SqliteAlertStore::new_in_memory().unwrap();
    for staff_id in ["staff-1", "staff-2"] {
        let profile: StaffProfile = StaffProfile::new(
            StaffId::new(staff_id),
            String::from("Jordan Reyes"),
            true,
            Some(AreaId::new("ward-3")),
            Vec::new(),
        );
        store.upsert_staff_profile(&profile).unwrap();
    }
    store
}

pub fn default_policies() -> Policies {
    Policies {
        claim: ClaimPolicy::default(),
        expiry: ExpiryPolicy::from_minutes(30).unwrap(),
    }
}

pub fn broadcast_payload() -> DistributionPayload {
    DistributionPayload {
        mode: String::from("broadcast_all"),
        staff_ids: None,
        area_ids: None,
    }
}

/// A creation request for a shift far in the future, so the sweep
/// never touches it.
pub fn create_request() -> CreateAlertRequest {
    CreateAlertRequest {
        title: String::from("Night shift cover"),
        service_id: String::from("icu"),
        window_start: String::from("2099-03-01T08:00:00Z"),
        window_end: String::from("2099-03-01T16:00:00Z"),
        distribution: broadcast_payload(),
        actor_id: String::from("mgr-100"),
        actor_role: String::from("manager"),
        cause_id: String::from("req-1"),
        cause_description: String::from("Roster gap"),
    }
}

/// A creation request whose shift started long ago; its grace deadline
/// has already passed.
pub fn stale_create_request() -> CreateAlertRequest {
    let mut request: CreateAlertRequest = create_request();
    request.window_start = String::from("2020-03-01T08:00:00Z");
    request.window_end = String::from("2020-03-01T16:00:00Z");
    request
}

pub fn claim_request(staff_id: &str) -> ClaimAlertRequest {
    ClaimAlertRequest {
        staff_id: staff_id.to_string(),
        actor_id: staff_id.to_string(),
        actor_role: String::from("staff"),
        cause_id: String::from("req-2"),
        cause_description: String::from("Claim request"),
    }
}

pub fn confirm_request() -> ConfirmClaimRequest {
    ConfirmClaimRequest {
        actor_id: String::from("mgr-100"),
        actor_role: String::from("manager"),
        cause_id: String::from("req-3"),
        cause_description: String::from("Confirming claim"),
    }
}

pub fn reject_request(reason: &str) -> RejectClaimRequest {
    RejectClaimRequest {
        reason: reason.to_string(),
        actor_id: String::from("mgr-100"),
        actor_role: String::from("manager"),
        cause_id: String::from("req-4"),
        cause_description: String::from("Rejecting claim"),
    }
}

pub fn cancel_request() -> CancelAlertRequest {
    CancelAlertRequest {
        actor_id: String::from("mgr-100"),
        actor_role: String::from("manager"),
        cause_id: String::from("req-5"),
        cause_description: String::from("Shift no longer needed"),
    }
}

pub fn sweep_request() -> SweepRequest {
    SweepRequest {
        actor_id: String::from("mgr-100"),
        actor_role: String::from("manager"),
        cause_id: String::from("req-6"),
        cause_description: String::from("Scheduled sweep"),
    }
}

pub fn upsert_staff_request(staff_id: &str) -> UpsertStaffRequest {
    UpsertStaffRequest {
        staff_id: staff_id.to_string(),
        display_name: String::from("Sam Okafor"),
        is_active: true,
        location_area: Some(String::from("ward-5")),
        capabilities: vec![Capability::Manager.as_str().to_string()],
        actor_id: String::from("admin-1"),
        actor_role: String::from("admin"),
    }
}

/// Creates an alert through the API and returns its view.
pub fn create_alert(store: &mut SqliteAlertStore) -> AlertView {
    handlers::create_alert(store, &DISPATCHER, create_request()).unwrap()
}
