// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use rusqlite::Connection;
use tracing::info;

use crate::error::PersistenceError;

/// Initializes the database schema.
///
/// # Arguments
///
/// * `conn` - The database connection to initialize
///
/// # Errors
///
/// Returns an error if schema creation fails.
pub fn initialize_schema(conn: &Connection) -> Result<(), PersistenceError> {
    info!("Initializing database schema");

    // Enable foreign key enforcement
    conn.execute("PRAGMA foreign_keys = ON", [])?;

    conn.execute_batch(
        "
        -- Staff directory
        CREATE TABLE IF NOT EXISTS staff_profiles (
            staff_id TEXT PRIMARY KEY NOT NULL,
            display_name TEXT NOT NULL,
            is_active INTEGER NOT NULL DEFAULT 1 CHECK(is_active IN (0, 1)),
            location_area TEXT,
            capabilities_json TEXT NOT NULL DEFAULT '[]'
        );

        -- Booking alerts. The version column carries the optimistic
        -- concurrency counter; every committed transition must bump it
        -- by exactly one via the compare-and-swap.
        CREATE TABLE IF NOT EXISTS booking_alerts (
            alert_id INTEGER PRIMARY KEY AUTOINCREMENT,
            title TEXT NOT NULL,
            service_id TEXT NOT NULL,
            window_start TEXT NOT NULL,
            window_end TEXT NOT NULL,
            distribution_json TEXT NOT NULL,
            status TEXT NOT NULL CHECK(status IN (
                'Open', 'PendingConfirmation', 'Confirmed',
                'Rejected', 'Expired', 'Cancelled'
            )),
            claimed_by TEXT,
            claimed_at TEXT,
            rejected_claimants_json TEXT NOT NULL DEFAULT '[]',
            created_by TEXT NOT NULL,
            created_at TEXT NOT NULL,
            version INTEGER NOT NULL DEFAULT 0 CHECK(version >= 0)
        );

        CREATE INDEX IF NOT EXISTS idx_booking_alerts_status
            ON booking_alerts(status);

        -- Audit log
        CREATE TABLE IF NOT EXISTS alert_audit_events (
            event_id INTEGER PRIMARY KEY AUTOINCREMENT,
            alert_id INTEGER,
            actor_json TEXT NOT NULL,
            cause_json TEXT NOT NULL,
            action_json TEXT NOT NULL,
            before_snapshot_json TEXT NOT NULL,
            after_snapshot_json TEXT NOT NULL,
            created_at DATETIME DEFAULT CURRENT_TIMESTAMP,
            FOREIGN KEY(alert_id) REFERENCES booking_alerts(alert_id)
        );

        CREATE INDEX IF NOT EXISTS idx_alert_audit_events_alert
            ON alert_audit_events(alert_id, event_id);
        ",
    )?;

    Ok(())
}

/// Verifies that foreign key enforcement is enabled.
///
/// # Arguments
///
/// * `conn` - The database connection to check
///
/// # Errors
///
/// Returns an error if foreign key enforcement is not enabled.
pub fn verify_foreign_key_enforcement(conn: &Connection) -> Result<(), PersistenceError> {
    let foreign_keys_enabled: i32 =
        conn.query_row("PRAGMA foreign_keys", [], |row| row.get(0))?;

    if foreign_keys_enabled == 0 {
        return Err(PersistenceError::InitializationError(String::from(
            "Foreign key enforcement is not enabled",
        )));
    }

    info!("SQLite foreign key enforcement is enabled");
    Ok(())
}
