// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use rusqlite::{Connection, Result as SqliteResult, Transaction, params};
use shift_alert::TransitionResult;
use shift_alert_audit::{Action, Actor, AuditEvent, Cause, StateSnapshot};
use shift_alert_domain::{
    AlertStatus, AreaId, BookingAlert, Capability, Distribution, ServiceId, ShiftWindow, StaffId,
    StaffProfile, evaluate_eligibility,
};
use std::path::Path;
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;
use tracing::{debug, info};

use crate::data_models::{
    ActionData, ActorData, AlertRow, AuditEventRow, CauseData, StaffProfileRow, StateSnapshotData,
};
use crate::error::PersistenceError;
use crate::schema;

/// SQLite-backed store for booking alerts, staff profiles, and the
/// audit log.
///
/// All alert mutations after creation go through [`compare_and_swap`],
/// which commits the transition and its audit event in one transaction
/// keyed on the expected version.
///
/// [`compare_and_swap`]: SqliteAlertStore::compare_and_swap
pub struct SqliteAlertStore {
    conn: Connection,
}

impl SqliteAlertStore {
    /// Creates a new store with an in-memory `SQLite` database.
    ///
    /// Each call receives its own private database, so tests are
    /// isolated without external infrastructure.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be initialized.
    pub fn new_in_memory() -> Result<Self, PersistenceError> {
        let conn: Connection = Connection::open_in_memory()
            .map_err(|e| PersistenceError::DatabaseConnectionFailed(e.to_string()))?;
        schema::initialize_schema(&conn)?;
        schema::verify_foreign_key_enforcement(&conn)?;
        Ok(Self { conn })
    }

    /// Creates a new store backed by a `SQLite` database file.
    ///
    /// # Arguments
    ///
    /// * `path` - The path to the `SQLite` database file
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or initialized.
    pub fn new_with_file<P: AsRef<Path>>(path: P) -> Result<Self, PersistenceError> {
        let conn: Connection = Connection::open(path)
            .map_err(|e| PersistenceError::DatabaseConnectionFailed(e.to_string()))?;
        // WAL mode for better read concurrency on file databases
        conn.pragma_update(None, "journal_mode", "WAL")?;
        schema::initialize_schema(&conn)?;
        schema::verify_foreign_key_enforcement(&conn)?;
        Ok(Self { conn })
    }

    /// Persists a new alert and its creation audit event atomically.
    ///
    /// # Arguments
    ///
    /// * `alert` - The alert to persist; must not carry an `alert_id` yet
    /// * `audit_event` - The creation audit event
    ///
    /// # Returns
    ///
    /// The alert with its assigned `alert_id`.
    ///
    /// # Errors
    ///
    /// Returns an error if the alert is already persisted or the insert
    /// fails.
    pub fn create_alert(
        &mut self,
        alert: &BookingAlert,
        audit_event: &AuditEvent,
    ) -> Result<BookingAlert, PersistenceError> {
        if alert.alert_id.is_some() {
            return Err(PersistenceError::DatabaseError(String::from(
                "Alert is already persisted",
            )));
        }

        let tx: Transaction<'_> = self.conn.transaction()?;

        tx.execute(
            "INSERT INTO booking_alerts (
                title, service_id, window_start, window_end, distribution_json,
                status, claimed_by, claimed_at, rejected_claimants_json,
                created_by, created_at, version
             ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)",
            params![
                alert.title,
                alert.service_id.value(),
                format_timestamp(alert.window.start())?,
                format_timestamp(alert.window.end())?,
                serde_json::to_string(&alert.distribution)?,
                alert.status.as_str(),
                alert.claimed_by.as_ref().map(|s| s.value().to_string()),
                alert
                    .claimed_at
                    .map(format_timestamp)
                    .transpose()?,
                serde_json::to_string(&alert.rejected_claimants)?,
                alert.created_by,
                format_timestamp(alert.created_at)?,
                alert.version,
            ],
        )?;
        let alert_id: i64 = tx.last_insert_rowid();

        insert_audit_event(&tx, audit_event, Some(alert_id))?;

        tx.commit()?;
        info!(alert_id, "Persisted new booking alert");

        let mut persisted: BookingAlert = alert.clone();
        persisted.alert_id = Some(alert_id);
        Ok(persisted)
    }

    /// Retrieves an alert by ID.
    ///
    /// # Arguments
    ///
    /// * `alert_id` - The alert ID to retrieve
    ///
    /// # Errors
    ///
    /// Returns `AlertNotFound` if no alert exists with the given ID.
    pub fn get_alert(&self, alert_id: i64) -> Result<BookingAlert, PersistenceError> {
        let row_result: SqliteResult<AlertRow> = self.conn.query_row(
            "SELECT alert_id, title, service_id, window_start, window_end,
                    distribution_json, status, claimed_by, claimed_at,
                    rejected_claimants_json, created_by, created_at, version
             FROM booking_alerts
             WHERE alert_id = ?1",
            params![alert_id],
            map_alert_row,
        );

        match row_result {
            Ok(row) => alert_from_row(row),
            Err(rusqlite::Error::QueryReturnedNoRows) => {
                Err(PersistenceError::AlertNotFound(alert_id))
            }
            Err(e) => Err(PersistenceError::DatabaseError(e.to_string())),
        }
    }

    /// Commits a transition atomically with a compare-and-swap on the
    /// alert's version.
    ///
    /// The update only applies if the stored version still equals
    /// `expected_version`; the committed row carries exactly
    /// `expected_version + 1`. The transition's audit event is written
    /// in the same transaction, so the log and the record can never
    /// disagree.
    ///
    /// # Arguments
    ///
    /// * `expected_version` - The version the caller read before
    ///   evaluating the transition
    /// * `result` - The transition result to commit
    ///
    /// # Returns
    ///
    /// The alert as committed.
    ///
    /// # Errors
    ///
    /// Returns `Conflict` carrying the current record if another writer
    /// got there first, or `AlertNotFound` if the alert no longer
    /// exists.
    pub fn compare_and_swap(
        &mut self,
        expected_version: i64,
        result: &TransitionResult,
    ) -> Result<BookingAlert, PersistenceError> {
        let alert: &BookingAlert = &result.new_alert;
        let Some(alert_id) = alert.alert_id else {
            return Err(PersistenceError::DatabaseError(String::from(
                "Cannot swap an alert that has never been persisted",
            )));
        };

        let tx: Transaction<'_> = self.conn.transaction()?;

        let rows_changed: usize = tx.execute(
            "UPDATE booking_alerts
             SET status = ?1,
                 claimed_by = ?2,
                 claimed_at = ?3,
                 rejected_claimants_json = ?4,
                 version = ?5
             WHERE alert_id = ?6 AND version = ?7",
            params![
                alert.status.as_str(),
                alert.claimed_by.as_ref().map(|s| s.value().to_string()),
                alert
                    .claimed_at
                    .map(format_timestamp)
                    .transpose()?,
                serde_json::to_string(&alert.rejected_claimants)?,
                expected_version + 1,
                alert_id,
                expected_version,
            ],
        )?;

        if rows_changed == 0 {
            // Lost the race (or the alert vanished). The transaction
            // wrote nothing, so dropping it is a clean rollback.
            drop(tx);
            let current: BookingAlert = self.get_alert(alert_id)?;
            debug!(
                alert_id,
                expected_version,
                stored_version = current.version,
                "Compare-and-swap conflict"
            );
            return Err(PersistenceError::Conflict {
                current: Box::new(current),
            });
        }

        let event_id: i64 = insert_audit_event(&tx, &result.audit_event, Some(alert_id))?;
        tx.commit()?;
        info!(alert_id, event_id, new_version = expected_version + 1, "Committed transition");

        let mut committed: BookingAlert = alert.clone();
        committed.version = expected_version + 1;
        Ok(committed)
    }

    /// Lists all alerts currently in the `Open` status, ordered by
    /// shift start ascending.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_open_alerts(&self) -> Result<Vec<BookingAlert>, PersistenceError> {
        let mut stmt = self.conn.prepare(
            "SELECT alert_id, title, service_id, window_start, window_end,
                    distribution_json, status, claimed_by, claimed_at,
                    rejected_claimants_json, created_by, created_at, version
             FROM booking_alerts
             WHERE status = 'Open'
             ORDER BY window_start, alert_id",
        )?;
        let rows = stmt.query_map([], map_alert_row)?;

        let mut alerts: Vec<BookingAlert> = Vec::new();
        for row in rows {
            alerts.push(alert_from_row(row?)?);
        }
        Ok(alerts)
    }

    /// Lists the open alerts the given staff member may see and claim.
    ///
    /// Eligibility is evaluated in one place for both listing and
    /// claiming, so a staff member can never see an alert they cannot
    /// claim.
    ///
    /// # Arguments
    ///
    /// * `profile` - The staff member's directory profile
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_open_alerts_visible_to(
        &self,
        profile: &StaffProfile,
    ) -> Result<Vec<BookingAlert>, PersistenceError> {
        let open: Vec<BookingAlert> = self.list_open_alerts()?;
        Ok(open
            .into_iter()
            .filter(|alert| evaluate_eligibility(alert, profile).is_eligible())
            .collect())
    }

    /// Inserts or replaces a staff profile.
    ///
    /// # Arguments
    ///
    /// * `profile` - The profile to persist
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    pub fn upsert_staff_profile(
        &mut self,
        profile: &StaffProfile,
    ) -> Result<(), PersistenceError> {
        self.conn.execute(
            "INSERT INTO staff_profiles (
                staff_id, display_name, is_active, location_area, capabilities_json
             ) VALUES (?1, ?2, ?3, ?4, ?5)
             ON CONFLICT(staff_id) DO UPDATE SET
                display_name = excluded.display_name,
                is_active = excluded.is_active,
                location_area = excluded.location_area,
                capabilities_json = excluded.capabilities_json",
            params![
                profile.staff_id.value(),
                profile.display_name,
                profile.is_active,
                profile
                    .location_area
                    .as_ref()
                    .map(|a| a.value().to_string()),
                serde_json::to_string(&profile.capabilities)?,
            ],
        )?;
        debug!(staff_id = profile.staff_id.value(), "Upserted staff profile");
        Ok(())
    }

    /// Retrieves a staff profile by identifier.
    ///
    /// # Arguments
    ///
    /// * `staff_id` - The staff member's identifier
    ///
    /// # Errors
    ///
    /// Returns `StaffNotFound` if no profile exists.
    pub fn get_staff_profile(&self, staff_id: &StaffId) -> Result<StaffProfile, PersistenceError> {
        let row_result: SqliteResult<StaffProfileRow> = self.conn.query_row(
            "SELECT staff_id, display_name, is_active, location_area, capabilities_json
             FROM staff_profiles
             WHERE staff_id = ?1",
            params![staff_id.value()],
            |row| {
                Ok((
                    row.get(0)?,
                    row.get(1)?,
                    row.get(2)?,
                    row.get(3)?,
                    row.get(4)?,
                ))
            },
        );

        match row_result {
            Ok((id, display_name, is_active, location_area, capabilities_json)) => {
                let capabilities: Vec<Capability> = serde_json::from_str(&capabilities_json)?;
                Ok(StaffProfile::new(
                    StaffId::new(&id),
                    display_name,
                    is_active,
                    location_area.as_deref().map(AreaId::new),
                    capabilities,
                ))
            }
            Err(rusqlite::Error::QueryReturnedNoRows) => {
                Err(PersistenceError::StaffNotFound(staff_id.value().to_string()))
            }
            Err(e) => Err(PersistenceError::DatabaseError(e.to_string())),
        }
    }

    /// Retrieves the full audit timeline for an alert, oldest first.
    ///
    /// # Arguments
    ///
    /// * `alert_id` - The alert whose timeline to retrieve
    ///
    /// # Errors
    ///
    /// Returns `AlertNotFound` if the alert does not exist.
    pub fn get_audit_timeline(&self, alert_id: i64) -> Result<Vec<AuditEvent>, PersistenceError> {
        // Ensure the alert exists so an empty timeline is distinguishable
        // from an unknown alert.
        self.get_alert(alert_id)?;

        let mut stmt = self.conn.prepare(
            "SELECT event_id, alert_id, actor_json, cause_json, action_json,
                    before_snapshot_json, after_snapshot_json
             FROM alert_audit_events
             WHERE alert_id = ?1
             ORDER BY event_id",
        )?;
        let rows = stmt.query_map(params![alert_id], |row| {
            Ok((
                row.get(0)?,
                row.get(1)?,
                row.get(2)?,
                row.get(3)?,
                row.get(4)?,
                row.get(5)?,
                row.get(6)?,
            ))
        })?;

        let mut events: Vec<AuditEvent> = Vec::new();
        for row in rows {
            events.push(audit_event_from_row(row?)?);
        }
        Ok(events)
    }
}

/// Inserts an audit event, returning its assigned event ID.
fn insert_audit_event(
    tx: &Transaction<'_>,
    event: &AuditEvent,
    alert_id: Option<i64>,
) -> Result<i64, PersistenceError> {
    let actor_json: String = serde_json::to_string(&ActorData {
        id: event.actor.id.clone(),
        actor_type: event.actor.actor_type.clone(),
    })?;
    let cause_json: String = serde_json::to_string(&CauseData {
        id: event.cause.id.clone(),
        description: event.cause.description.clone(),
    })?;
    let action_json: String = serde_json::to_string(&ActionData {
        name: event.action.name.clone(),
        details: event.action.details.clone(),
    })?;
    let before_json: String = serde_json::to_string(&StateSnapshotData {
        data: event.before.data.clone(),
    })?;
    let after_json: String = serde_json::to_string(&StateSnapshotData {
        data: event.after.data.clone(),
    })?;

    tx.execute(
        "INSERT INTO alert_audit_events (
            alert_id, actor_json, cause_json, action_json,
            before_snapshot_json, after_snapshot_json
         ) VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            alert_id,
            actor_json,
            cause_json,
            action_json,
            before_json,
            after_json,
        ],
    )?;
    Ok(tx.last_insert_rowid())
}

/// Maps a `booking_alerts` row to its tuple form.
fn map_alert_row(row: &rusqlite::Row<'_>) -> SqliteResult<AlertRow> {
    Ok((
        row.get(0)?,
        row.get(1)?,
        row.get(2)?,
        row.get(3)?,
        row.get(4)?,
        row.get(5)?,
        row.get(6)?,
        row.get(7)?,
        row.get(8)?,
        row.get(9)?,
        row.get(10)?,
        row.get(11)?,
        row.get(12)?,
    ))
}

/// Reconstructs a `BookingAlert` from its row tuple.
fn alert_from_row(row: AlertRow) -> Result<BookingAlert, PersistenceError> {
    let (
        alert_id,
        title,
        service_id,
        window_start,
        window_end,
        distribution_json,
        status,
        claimed_by,
        claimed_at,
        rejected_claimants_json,
        created_by,
        created_at,
        version,
    ) = row;

    let window: ShiftWindow =
        ShiftWindow::new(parse_timestamp(&window_start)?, parse_timestamp(&window_end)?)
            .map_err(|e| PersistenceError::SerializationError(e.to_string()))?;
    let distribution: Distribution = serde_json::from_str(&distribution_json)?;
    let status: AlertStatus = status
        .parse()
        .map_err(|e: shift_alert_domain::DomainError| {
            PersistenceError::SerializationError(e.to_string())
        })?;
    let rejected_claimants: Vec<StaffId> = serde_json::from_str(&rejected_claimants_json)?;

    Ok(BookingAlert {
        alert_id: Some(alert_id),
        title,
        service_id: ServiceId::new(&service_id),
        window,
        distribution,
        status,
        claimed_by: claimed_by.as_deref().map(StaffId::new),
        claimed_at: claimed_at.as_deref().map(parse_timestamp).transpose()?,
        rejected_claimants,
        created_by,
        created_at: parse_timestamp(&created_at)?,
        version,
    })
}

/// Reconstructs an `AuditEvent` from its row tuple.
fn audit_event_from_row(row: AuditEventRow) -> Result<AuditEvent, PersistenceError> {
    let (event_id, alert_id, actor_json, cause_json, action_json, before_json, after_json) = row;

    let actor_data: ActorData = serde_json::from_str(&actor_json)?;
    let cause_data: CauseData = serde_json::from_str(&cause_json)?;
    let action_data: ActionData = serde_json::from_str(&action_json)?;
    let before_data: StateSnapshotData = serde_json::from_str(&before_json)?;
    let after_data: StateSnapshotData = serde_json::from_str(&after_json)?;

    Ok(AuditEvent::with_id(
        event_id,
        Actor::new(actor_data.id, actor_data.actor_type),
        Cause::new(cause_data.id, cause_data.description),
        Action::new(action_data.name, action_data.details),
        StateSnapshot::new(before_data.data),
        StateSnapshot::new(after_data.data),
        alert_id,
    ))
}

/// Formats a timestamp for storage as RFC 3339 text.
fn format_timestamp(value: OffsetDateTime) -> Result<String, PersistenceError> {
    value
        .format(&Rfc3339)
        .map_err(|e| PersistenceError::SerializationError(e.to_string()))
}

/// Parses an RFC 3339 timestamp from storage.
fn parse_timestamp(value: &str) -> Result<OffsetDateTime, PersistenceError> {
    OffsetDateTime::parse(value, &Rfc3339)
        .map_err(|e| PersistenceError::SerializationError(e.to_string()))
}
