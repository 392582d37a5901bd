// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use serde::{Deserialize, Serialize};

/// Serializable representation of an Actor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActorData {
    pub id: String,
    pub actor_type: String,
}

/// Serializable representation of a Cause.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CauseData {
    pub id: String,
    pub description: String,
}

/// Serializable representation of an Action.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionData {
    pub name: String,
    pub details: Option<String>,
}

/// Serializable representation of a `StateSnapshot`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StateSnapshotData {
    pub data: String,
}

/// Type alias for a booking alert row from `SQLite`.
///
/// Columns: `alert_id`, `title`, `service_id`, `window_start`,
/// `window_end`, `distribution_json`, `status`, `claimed_by`,
/// `claimed_at`, `rejected_claimants_json`, `created_by`,
/// `created_at`, `version`.
pub type AlertRow = (
    i64,
    String,
    String,
    String,
    String,
    String,
    String,
    Option<String>,
    Option<String>,
    String,
    String,
    String,
    i64,
);

/// Type alias for an audit event row from `SQLite`.
///
/// Columns: `event_id`, `alert_id`, `actor_json`, `cause_json`,
/// `action_json`, `before_snapshot_json`, `after_snapshot_json`.
pub type AuditEventRow = (i64, Option<i64>, String, String, String, String, String);

/// Type alias for a staff profile row from `SQLite`.
///
/// Columns: `staff_id`, `display_name`, `is_active`, `location_area`,
/// `capabilities_json`.
pub type StaffProfileRow = (String, String, bool, Option<String>, String);
