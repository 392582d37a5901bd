// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Notification fan-out for alert lifecycle changes.
//!
//! Dispatch is fire-and-forget: a failed notification is logged and
//! never fails the operation that produced it. The committed record
//! and its audit event are the source of truth, not the notification.

use thiserror::Error;
use tracing::{info, warn};

/// A lifecycle change worth telling staff about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AlertEvent {
    /// A new alert is open for claims.
    Opened {
        /// The alert's identifier.
        alert_id: i64,
        /// The alert's title.
        title: String,
    },
    /// A staff member claimed the alert.
    Claimed {
        /// The alert's identifier.
        alert_id: i64,
        /// The claiming staff member.
        staff_id: String,
    },
    /// A manager confirmed the claim.
    Confirmed {
        /// The alert's identifier.
        alert_id: i64,
        /// The confirmed staff member.
        staff_id: String,
    },
    /// A claim was rejected and the alert reopened.
    Reopened {
        /// The alert's identifier.
        alert_id: i64,
    },
    /// The alert was cancelled.
    Cancelled {
        /// The alert's identifier.
        alert_id: i64,
    },
    /// The expiry sweep retired the alert.
    Expired {
        /// The alert's identifier.
        alert_id: i64,
    },
}

impl AlertEvent {
    /// Returns a short name for this event, for logging.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Opened { .. } => "opened",
            Self::Claimed { .. } => "claimed",
            Self::Confirmed { .. } => "confirmed",
            Self::Reopened { .. } => "reopened",
            Self::Cancelled { .. } => "cancelled",
            Self::Expired { .. } => "expired",
        }
    }
}

/// Errors a dispatcher may report.
#[derive(Debug, Error)]
pub enum NotifyError {
    /// The downstream channel rejected or dropped the notification.
    #[error("Notification channel failed: {0}")]
    ChannelFailed(String),
}

/// Delivers alert lifecycle events to staff-facing channels.
///
/// Implementations must not block the calling operation; anything slow
/// belongs behind a queue inside the dispatcher.
pub trait NotificationDispatcher: Send + Sync {
    /// Delivers one event.
    ///
    /// # Errors
    ///
    /// Returns an error if delivery fails. Callers treat failures as
    /// non-fatal.
    fn dispatch(&self, event: &AlertEvent) -> Result<(), NotifyError>;
}

/// Dispatcher that records events in the structured log.
///
/// The default dispatcher; real channels (push, email) plug in behind
/// the same trait.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingDispatcher;

impl NotificationDispatcher for TracingDispatcher {
    fn dispatch(&self, event: &AlertEvent) -> Result<(), NotifyError> {
        info!(event = event.name(), ?event, "Alert notification");
        Ok(())
    }
}

/// Dispatches an event, logging a warning on failure.
///
/// The operation that produced the event has already committed; its
/// outcome never depends on delivery.
pub fn dispatch_or_warn(dispatcher: &dyn NotificationDispatcher, event: &AlertEvent) {
    if let Err(e) = dispatcher.dispatch(event) {
        warn!(event = event.name(), error = %e, "Notification dispatch failed");
    }
}
