// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Authorization types and services.

use shift_alert_audit::Actor;
use shift_alert_domain::Capability;

use crate::error::AuthError;

/// Actor roles for authorization.
///
/// Roles are asserted by the caller and determine the capability set
/// passed to the claim coordinator. Authentication itself lives outside
/// this system.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// Staff role: may see and claim alerts they are eligible for.
    Staff,
    /// Manager role: may create alerts and confirm or reject claims.
    Manager,
    /// Admin role: manager authority plus staff directory management
    /// and cancellation of any alert.
    Admin,
}

impl Role {
    /// Parses a role from its request string.
    ///
    /// # Arguments
    ///
    /// * `s` - The role string (`staff`, `manager`, or `admin`)
    ///
    /// # Errors
    ///
    /// Returns an error if the string names no known role.
    pub fn parse(s: &str) -> Result<Self, AuthError> {
        match s.to_lowercase().as_str() {
            "staff" => Ok(Self::Staff),
            "manager" => Ok(Self::Manager),
            "admin" => Ok(Self::Admin),
            _ => Err(AuthError::UnknownRole {
                role: s.to_string(),
            }),
        }
    }

    /// Returns the capabilities this role grants.
    #[must_use]
    pub fn capabilities(&self) -> Vec<Capability> {
        match self {
            Self::Staff => Vec::new(),
            Self::Manager => vec![Capability::Manager],
            Self::Admin => vec![Capability::Manager, Capability::Admin],
        }
    }

    /// Returns the audit actor type string for this role.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Staff => "staff",
            Self::Manager => "manager",
            Self::Admin => "admin",
        }
    }
}

/// An authenticated actor with an associated role.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedActor {
    /// The unique identifier for this actor.
    pub id: String,
    /// The role assigned to this actor.
    pub role: Role,
}

impl AuthenticatedActor {
    /// Creates a new authenticated actor.
    ///
    /// # Arguments
    ///
    /// * `id` - The unique identifier for this actor
    /// * `role` - The role assigned to this actor
    #[must_use]
    pub const fn new(id: String, role: Role) -> Self {
        Self { id, role }
    }

    /// Builds an authenticated actor from raw request fields.
    ///
    /// # Arguments
    ///
    /// * `actor_id` - The actor's identifier
    /// * `actor_role` - The actor's role string
    ///
    /// # Errors
    ///
    /// Returns an error if the identifier is empty or the role is
    /// unknown.
    pub fn from_request(actor_id: &str, actor_role: &str) -> Result<Self, AuthError> {
        if actor_id.trim().is_empty() {
            return Err(AuthError::MissingActor);
        }
        let role: Role = Role::parse(actor_role)?;
        Ok(Self::new(actor_id.trim().to_string(), role))
    }

    /// Converts this authenticated actor into an audit Actor.
    ///
    /// This is used when recording audit events to attribute actions
    /// to the acting user.
    #[must_use]
    pub fn to_audit_actor(&self) -> Actor {
        Actor::new(self.id.clone(), self.role.as_str().to_string())
    }
}

/// Authorization service for enforcing role-based access control.
///
/// Capability checks inside a transition (confirm, reject, cancel) are
/// enforced by the claim coordinator; this service gates the operations
/// that never reach it.
pub struct AuthorizationService;

impl AuthorizationService {
    /// Checks if an actor is authorized to create an alert.
    ///
    /// Only Manager and Admin actors may create alerts.
    ///
    /// # Arguments
    ///
    /// * `actor` - The authenticated actor to check
    ///
    /// # Errors
    ///
    /// Returns an error if the actor is not authorized.
    pub fn authorize_create_alert(actor: &AuthenticatedActor) -> Result<(), AuthError> {
        match actor.role {
            Role::Manager | Role::Admin => Ok(()),
            Role::Staff => Err(AuthError::Unauthorized {
                action: String::from("CreateAlert"),
                required_role: String::from("manager"),
            }),
        }
    }

    /// Checks if an actor is authorized to manage staff profiles.
    ///
    /// Only Admin actors may create or update staff profiles.
    ///
    /// # Arguments
    ///
    /// * `actor` - The authenticated actor to check
    ///
    /// # Errors
    ///
    /// Returns an error if the actor is not authorized.
    pub fn authorize_manage_staff(actor: &AuthenticatedActor) -> Result<(), AuthError> {
        match actor.role {
            Role::Admin => Ok(()),
            Role::Staff | Role::Manager => Err(AuthError::Unauthorized {
                action: String::from("ManageStaff"),
                required_role: String::from("admin"),
            }),
        }
    }

    /// Checks if an actor is authorized to run the expiry sweep.
    ///
    /// Only Manager and Admin actors may trigger a sweep.
    ///
    /// # Arguments
    ///
    /// * `actor` - The authenticated actor to check
    ///
    /// # Errors
    ///
    /// Returns an error if the actor is not authorized.
    pub fn authorize_sweep(actor: &AuthenticatedActor) -> Result<(), AuthError> {
        match actor.role {
            Role::Manager | Role::Admin => Ok(()),
            Role::Staff => Err(AuthError::Unauthorized {
                action: String::from("SweepExpired"),
                required_role: String::from("manager"),
            }),
        }
    }
}
