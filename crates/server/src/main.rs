// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]
#![allow(clippy::multiple_crate_versions)]

use axum::{
    Json, Router,
    extract::{Path, Query, State as AxumState},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use clap::Parser;
use serde::{Deserialize, Serialize};
use shift_alert_api::{ApiError, NotificationDispatcher, Policies, TracingDispatcher, handlers};
use shift_alert_api::request_response::{
    AlertView, AuditEventView, CancelAlertRequest, ClaimAlertRequest, ConfirmClaimRequest,
    CreateAlertRequest, RejectClaimRequest, StaffProfileView, SweepRequest, SweepResponse,
    UpsertStaffRequest,
};
use shift_alert_domain::{ClaimPolicy, ExpiryPolicy};
use shift_alert_persistence::SqliteAlertStore;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{error, info};

/// Shift Alert Server - HTTP server for the Shift Alert system
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the `SQLite` database file. If not provided, uses in-memory database.
    #[arg(short, long)]
    database: Option<String>,

    /// Port to bind the server to
    #[arg(short, long, default_value_t = 3000)]
    port: u16,

    /// Minutes after the shift start before an unclaimed alert expires
    #[arg(long, default_value_t = 30)]
    grace_minutes: i64,

    /// Bar staff from re-claiming an alert after their claim was rejected
    #[arg(long)]
    deny_reclaim_after_reject: bool,
}

/// Application state shared across handlers.
///
/// The store is wrapped in a Mutex to allow safe concurrent access;
/// the compare-and-swap inside the store settles claim races.
#[derive(Clone)]
struct AppState {
    /// The alert store.
    store: Arc<Mutex<SqliteAlertStore>>,
    /// The notification dispatcher for lifecycle events.
    dispatcher: Arc<dyn NotificationDispatcher>,
    /// Claim and expiry policies, fixed at startup.
    policies: Policies,
}

/// Query parameters for listing open alerts.
#[derive(Debug, Deserialize)]
struct OpenAlertsQuery {
    /// The staff member the listing is scoped to.
    staff_id: String,
}

/// Query parameters for the audit timeline.
#[derive(Debug, Deserialize)]
struct AuditTimelineQuery {
    /// The alert whose timeline to fetch.
    alert_id: i64,
}

/// Error response type.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ErrorResponse {
    /// Error indicator.
    error: bool,
    /// Error message.
    message: String,
}

/// HTTP error wrapper that implements `IntoResponse`.
struct HttpError {
    /// The HTTP status code.
    status: StatusCode,
    /// The error message.
    message: String,
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let body: Json<ErrorResponse> = Json(ErrorResponse {
            error: true,
            message: self.message,
        });
        (self.status, body).into_response()
    }
}

impl From<ApiError> for HttpError {
    fn from(err: ApiError) -> Self {
        let status: StatusCode = match &err {
            ApiError::InvalidInput { .. } => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized { .. } | ApiError::NotEligible { .. } => StatusCode::FORBIDDEN,
            ApiError::ResourceNotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::AlreadyClaimed { .. } | ApiError::Conflict { .. } => StatusCode::CONFLICT,
            ApiError::InvalidTransition { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Internal { .. } => {
                error!(error = %err, "Internal error");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        Self {
            status,
            message: err.to_string(),
        }
    }
}

/// Handler for POST `/alerts` endpoint.
///
/// Creates a new booking alert.
async fn handle_create_alert(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<CreateAlertRequest>,
) -> Result<Json<AlertView>, HttpError> {
    info!(
        actor_id = %req.actor_id,
        title = %req.title,
        "Handling create_alert request"
    );

    let mut store = app_state.store.lock().await;
    let view: AlertView =
        handlers::create_alert(&mut store, app_state.dispatcher.as_ref(), req)?;
    drop(store);

    Ok(Json(view))
}

/// Handler for GET `/alerts/open` endpoint.
///
/// Lists the open alerts visible to a staff member.
async fn handle_list_open_alerts(
    AxumState(app_state): AxumState<AppState>,
    Query(query): Query<OpenAlertsQuery>,
) -> Result<Json<Vec<AlertView>>, HttpError> {
    info!(staff_id = %query.staff_id, "Handling list_open_alerts request");

    let store = app_state.store.lock().await;
    let views: Vec<AlertView> = handlers::list_open_alerts_for(&store, &query.staff_id)?;
    drop(store);

    Ok(Json(views))
}

/// Handler for GET `/alerts/{alert_id}` endpoint.
///
/// Retrieves a single alert.
async fn handle_get_alert(
    AxumState(app_state): AxumState<AppState>,
    Path(alert_id): Path<i64>,
) -> Result<Json<AlertView>, HttpError> {
    info!(alert_id, "Handling get_alert request");

    let store = app_state.store.lock().await;
    let view: AlertView = handlers::get_alert(&store, alert_id)?;
    drop(store);

    Ok(Json(view))
}

/// Handler for POST `/alerts/{alert_id}/claim` endpoint.
///
/// Claims an open alert for a staff member.
async fn handle_claim_alert(
    AxumState(app_state): AxumState<AppState>,
    Path(alert_id): Path<i64>,
    Json(req): Json<ClaimAlertRequest>,
) -> Result<Json<AlertView>, HttpError> {
    info!(
        alert_id,
        staff_id = %req.staff_id,
        "Handling claim_alert request"
    );

    let mut store = app_state.store.lock().await;
    let view: AlertView = handlers::claim_alert(
        &mut store,
        app_state.dispatcher.as_ref(),
        alert_id,
        req,
        app_state.policies,
    )?;
    drop(store);

    Ok(Json(view))
}

/// Handler for POST `/alerts/{alert_id}/confirm` endpoint.
///
/// Confirms a pending claim.
async fn handle_confirm_claim(
    AxumState(app_state): AxumState<AppState>,
    Path(alert_id): Path<i64>,
    Json(req): Json<ConfirmClaimRequest>,
) -> Result<Json<AlertView>, HttpError> {
    info!(
        alert_id,
        actor_id = %req.actor_id,
        "Handling confirm_claim request"
    );

    let mut store = app_state.store.lock().await;
    let view: AlertView = handlers::confirm_claim(
        &mut store,
        app_state.dispatcher.as_ref(),
        alert_id,
        req,
        app_state.policies,
    )?;
    drop(store);

    Ok(Json(view))
}

/// Handler for POST `/alerts/{alert_id}/reject` endpoint.
///
/// Rejects a pending claim, reopening the alert.
async fn handle_reject_claim(
    AxumState(app_state): AxumState<AppState>,
    Path(alert_id): Path<i64>,
    Json(req): Json<RejectClaimRequest>,
) -> Result<Json<AlertView>, HttpError> {
    info!(
        alert_id,
        actor_id = %req.actor_id,
        "Handling reject_claim request"
    );

    let mut store = app_state.store.lock().await;
    let view: AlertView = handlers::reject_claim(
        &mut store,
        app_state.dispatcher.as_ref(),
        alert_id,
        req,
        app_state.policies,
    )?;
    drop(store);

    Ok(Json(view))
}

/// Handler for POST `/alerts/{alert_id}/cancel` endpoint.
///
/// Cancels an alert.
async fn handle_cancel_alert(
    AxumState(app_state): AxumState<AppState>,
    Path(alert_id): Path<i64>,
    Json(req): Json<CancelAlertRequest>,
) -> Result<Json<AlertView>, HttpError> {
    info!(
        alert_id,
        actor_id = %req.actor_id,
        "Handling cancel_alert request"
    );

    let mut store = app_state.store.lock().await;
    let view: AlertView = handlers::cancel_alert(
        &mut store,
        app_state.dispatcher.as_ref(),
        alert_id,
        req,
        app_state.policies,
    )?;
    drop(store);

    Ok(Json(view))
}

/// Handler for POST `/alerts/sweep` endpoint.
///
/// Runs the expiry sweep over all open alerts.
async fn handle_sweep_expired(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<SweepRequest>,
) -> Result<Json<SweepResponse>, HttpError> {
    info!(actor_id = %req.actor_id, "Handling sweep_expired request");

    let mut store = app_state.store.lock().await;
    let response: SweepResponse = handlers::sweep_expired(
        &mut store,
        app_state.dispatcher.as_ref(),
        req,
        app_state.policies,
    )?;
    drop(store);

    Ok(Json(response))
}

/// Handler for POST `/staff` endpoint.
///
/// Creates or updates a staff profile.
async fn handle_upsert_staff_profile(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<UpsertStaffRequest>,
) -> Result<Json<StaffProfileView>, HttpError> {
    info!(
        staff_id = %req.staff_id,
        actor_id = %req.actor_id,
        "Handling upsert_staff_profile request"
    );

    let mut store = app_state.store.lock().await;
    let view: StaffProfileView = handlers::upsert_staff_profile(&mut store, req)?;
    drop(store);

    Ok(Json(view))
}

/// Handler for GET `/staff/{staff_id}` endpoint.
///
/// Retrieves a staff profile.
async fn handle_get_staff_profile(
    AxumState(app_state): AxumState<AppState>,
    Path(staff_id): Path<String>,
) -> Result<Json<StaffProfileView>, HttpError> {
    info!(staff_id = %staff_id, "Handling get_staff_profile request");

    let store = app_state.store.lock().await;
    let view: StaffProfileView = handlers::get_staff_profile(&store, &staff_id)?;
    drop(store);

    Ok(Json(view))
}

/// Handler for GET `/audit/timeline` endpoint.
///
/// Returns the ordered audit event timeline for a given alert.
async fn handle_get_audit_timeline(
    AxumState(app_state): AxumState<AppState>,
    Query(query): Query<AuditTimelineQuery>,
) -> Result<Json<Vec<AuditEventView>>, HttpError> {
    info!(alert_id = query.alert_id, "Handling get_audit_timeline request");

    let store = app_state.store.lock().await;
    let views: Vec<AuditEventView> = handlers::get_audit_timeline(&store, query.alert_id)?;
    drop(store);

    Ok(Json(views))
}

/// Builds the application router with all endpoints.
fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route("/alerts", post(handle_create_alert))
        .route("/alerts/open", get(handle_list_open_alerts))
        .route("/alerts/sweep", post(handle_sweep_expired))
        .route("/alerts/{alert_id}", get(handle_get_alert))
        .route("/alerts/{alert_id}/claim", post(handle_claim_alert))
        .route("/alerts/{alert_id}/confirm", post(handle_confirm_claim))
        .route("/alerts/{alert_id}/reject", post(handle_reject_claim))
        .route("/alerts/{alert_id}/cancel", post(handle_cancel_alert))
        .route("/staff", post(handle_upsert_staff_profile))
        .route("/staff/{staff_id}", get(handle_get_staff_profile))
        .route("/audit/timeline", get(handle_get_audit_timeline))
        .with_state(app_state)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command-line arguments
    let args: Args = Args::parse();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Initializing Shift Alert Server");

    // Initialize the store (in-memory or file-based based on CLI argument)
    let store: SqliteAlertStore = if let Some(db_path) = &args.database {
        info!("Using file-based database at: {}", db_path);
        SqliteAlertStore::new_with_file(db_path)?
    } else {
        info!("Using in-memory database");
        SqliteAlertStore::new_in_memory()?
    };

    let policies: Policies = Policies {
        claim: ClaimPolicy {
            allow_reclaim_after_reject: !args.deny_reclaim_after_reject,
        },
        expiry: ExpiryPolicy::from_minutes(args.grace_minutes)?,
    };

    let app_state: AppState = AppState {
        store: Arc::new(Mutex::new(store)),
        dispatcher: Arc::new(TracingDispatcher),
        policies,
    };

    // Build router
    let app: Router = build_router(app_state);

    // Bind to address
    let addr: std::net::SocketAddr = format!("127.0.0.1:{}", args.port).parse()?;
    info!("Server listening on {}", addr);

    // Run server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{Request, Response as HttpResponse, StatusCode as HttpStatusCode},
    };
    use futures::future::join_all;
    use shift_alert_api::request_response::DistributionPayload;
    use shift_alert_domain::{AreaId, StaffId, StaffProfile};
    use tower::ServiceExt;

    /// Helper to create test app state with an in-memory store seeded
    /// with five active staff members in ward 3.
    fn create_test_app_state() -> AppState {
        let mut store: SqliteAlertStore =
            SqliteAlertStore::new_in_memory().expect("Failed to create in-memory store");
        for n in 1..=5 {
            let profile: StaffProfile = StaffProfile::new(
                StaffId::new(&format!("staff-{n}")),
                format!("Test Staff {n}"),
                true,
                Some(AreaId::new("ward-3")),
                Vec::new(),
            );
            store
                .upsert_staff_profile(&profile)
                .expect("Failed to seed staff profile");
        }
        AppState {
            store: Arc::new(Mutex::new(store)),
            dispatcher: Arc::new(TracingDispatcher),
            policies: Policies {
                claim: ClaimPolicy::default(),
                expiry: ExpiryPolicy::from_minutes(30).expect("Valid grace period"),
            },
        }
    }

    /// Helper to create a test alert creation request. The shift is far
    /// in the future, so the sweep never touches it.
    fn create_test_alert_request(actor_id: &str, role: &str) -> CreateAlertRequest {
        CreateAlertRequest {
            title: String::from("Night shift cover"),
            service_id: String::from("icu"),
            window_start: String::from("2099-03-01T08:00:00Z"),
            window_end: String::from("2099-03-01T16:00:00Z"),
            distribution: DistributionPayload {
                mode: String::from("broadcast_all"),
                staff_ids: None,
                area_ids: None,
            },
            actor_id: actor_id.to_string(),
            actor_role: role.to_string(),
            cause_id: String::from("test-cause"),
            cause_description: String::from("Test alert creation"),
        }
    }

    /// Helper to create a test claim request.
    fn create_test_claim_request(staff_id: &str) -> ClaimAlertRequest {
        ClaimAlertRequest {
            staff_id: staff_id.to_string(),
            actor_id: staff_id.to_string(),
            actor_role: String::from("staff"),
            cause_id: String::from("test-cause"),
            cause_description: String::from("Test claim"),
        }
    }

    /// Sends a POST request with a JSON body and returns the response.
    async fn post_json<T: Serialize>(
        app: Router,
        uri: &str,
        body: &T,
    ) -> HttpResponse<Body> {
        app.oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header("content-type", "application/json")
                .body(Body::from(serde_json::to_string(body).unwrap()))
                .unwrap(),
        )
        .await
        .unwrap()
    }

    /// Sends a GET request and returns the response.
    async fn get_uri(app: Router, uri: &str) -> HttpResponse<Body> {
        app.oneshot(
            Request::builder()
                .method("GET")
                .uri(uri)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap()
    }

    /// Deserializes a response body.
    async fn body_of<T: serde::de::DeserializeOwned>(response: HttpResponse<Body>) -> T {
        let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&body_bytes).unwrap()
    }

    /// Creates an alert through the router and returns its view.
    async fn create_alert(app: &Router) -> AlertView {
        let response = post_json(
            app.clone(),
            "/alerts",
            &create_test_alert_request("mgr-100", "manager"),
        )
        .await;
        assert_eq!(response.status(), HttpStatusCode::OK);
        body_of(response).await
    }

    #[tokio::test]
    async fn test_create_and_get_alert() {
        let app: Router = build_router(create_test_app_state());

        let view: AlertView = create_alert(&app).await;
        assert_eq!(view.status, "Open");
        assert_eq!(view.version, 0);
        assert_eq!(view.created_by, "mgr-100");

        let response = get_uri(app, &format!("/alerts/{}", view.alert_id)).await;
        assert_eq!(response.status(), HttpStatusCode::OK);
        let fetched: AlertView = body_of(response).await;
        assert_eq!(fetched, view);
    }

    #[tokio::test]
    async fn test_staff_cannot_create_alert() {
        let app: Router = build_router(create_test_app_state());

        let response = post_json(
            app,
            "/alerts",
            &create_test_alert_request("staff-1", "staff"),
        )
        .await;

        assert_eq!(response.status(), HttpStatusCode::FORBIDDEN);
        let error: ErrorResponse = body_of(response).await;
        assert!(error.error);
        assert!(error.message.contains("Unauthorized"));
    }

    #[tokio::test]
    async fn test_claim_then_second_claim_conflicts() {
        let app: Router = build_router(create_test_app_state());
        let view: AlertView = create_alert(&app).await;

        let response = post_json(
            app.clone(),
            &format!("/alerts/{}/claim", view.alert_id),
            &create_test_claim_request("staff-1"),
        )
        .await;
        assert_eq!(response.status(), HttpStatusCode::OK);
        let claimed: AlertView = body_of(response).await;
        assert_eq!(claimed.status, "PendingConfirmation");
        assert_eq!(claimed.claimed_by.as_deref(), Some("staff-1"));
        assert_eq!(claimed.version, 1);

        let response = post_json(
            app,
            &format!("/alerts/{}/claim", view.alert_id),
            &create_test_claim_request("staff-2"),
        )
        .await;
        assert_eq!(response.status(), HttpStatusCode::CONFLICT);
        let error: ErrorResponse = body_of(response).await;
        assert!(error.message.contains("already claimed by 'staff-1'"));
    }

    #[tokio::test]
    async fn test_confirm_without_pending_claim_is_unprocessable() {
        let app: Router = build_router(create_test_app_state());
        let view: AlertView = create_alert(&app).await;

        let request: ConfirmClaimRequest = ConfirmClaimRequest {
            actor_id: String::from("mgr-100"),
            actor_role: String::from("manager"),
            cause_id: String::from("test-cause"),
            cause_description: String::from("Test confirmation"),
        };
        let response = post_json(
            app,
            &format!("/alerts/{}/confirm", view.alert_id),
            &request,
        )
        .await;

        assert_eq!(response.status(), HttpStatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn test_unknown_alert_is_not_found() {
        let app: Router = build_router(create_test_app_state());

        let response = get_uri(app, "/alerts/42").await;

        assert_eq!(response.status(), HttpStatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_list_open_alerts_for_staff() {
        let app: Router = build_router(create_test_app_state());
        let view: AlertView = create_alert(&app).await;

        let response = get_uri(app.clone(), "/alerts/open?staff_id=staff-1").await;
        assert_eq!(response.status(), HttpStatusCode::OK);
        let open: Vec<AlertView> = body_of(response).await;
        assert_eq!(open.len(), 1);
        assert_eq!(open[0].alert_id, view.alert_id);

        // Claiming removes the alert from the open listing.
        post_json(
            app.clone(),
            &format!("/alerts/{}/claim", view.alert_id),
            &create_test_claim_request("staff-1"),
        )
        .await;
        let response = get_uri(app, "/alerts/open?staff_id=staff-2").await;
        let open: Vec<AlertView> = body_of(response).await;
        assert!(open.is_empty());
    }

    #[tokio::test]
    async fn test_sweep_expires_only_stale_alerts() {
        let app: Router = build_router(create_test_app_state());

        let fresh: AlertView = create_alert(&app).await;
        let mut stale_request: CreateAlertRequest =
            create_test_alert_request("mgr-100", "manager");
        stale_request.window_start = String::from("2020-03-01T08:00:00Z");
        stale_request.window_end = String::from("2020-03-01T16:00:00Z");
        let response = post_json(app.clone(), "/alerts", &stale_request).await;
        let stale: AlertView = body_of(response).await;

        let sweep: SweepRequest = SweepRequest {
            actor_id: String::from("mgr-100"),
            actor_role: String::from("manager"),
            cause_id: String::from("test-cause"),
            cause_description: String::from("Test sweep"),
        };
        let response = post_json(app.clone(), "/alerts/sweep", &sweep).await;
        assert_eq!(response.status(), HttpStatusCode::OK);
        let result: SweepResponse = body_of(response).await;
        assert_eq!(result.expired_alert_ids, vec![stale.alert_id]);
        assert_eq!(result.examined, 2);

        let expired: AlertView =
            body_of(get_uri(app.clone(), &format!("/alerts/{}", stale.alert_id)).await).await;
        assert_eq!(expired.status, "Expired");
        let untouched: AlertView =
            body_of(get_uri(app, &format!("/alerts/{}", fresh.alert_id)).await).await;
        assert_eq!(untouched.status, "Open");
    }

    #[tokio::test]
    async fn test_upsert_and_get_staff_profile() {
        let app: Router = build_router(create_test_app_state());

        let request: UpsertStaffRequest = UpsertStaffRequest {
            staff_id: String::from("staff-9"),
            display_name: String::from("Sam Okafor"),
            is_active: true,
            location_area: Some(String::from("ward-5")),
            capabilities: vec![String::from("manager")],
            actor_id: String::from("admin-1"),
            actor_role: String::from("admin"),
        };
        let response = post_json(app.clone(), "/staff", &request).await;
        assert_eq!(response.status(), HttpStatusCode::OK);
        let view: StaffProfileView = body_of(response).await;
        assert_eq!(view.staff_id, "staff-9");

        let response = get_uri(app, "/staff/staff-9").await;
        assert_eq!(response.status(), HttpStatusCode::OK);
        let fetched: StaffProfileView = body_of(response).await;
        assert_eq!(fetched, view);
    }

    #[tokio::test]
    async fn test_audit_timeline_records_lifecycle() {
        let app: Router = build_router(create_test_app_state());
        let view: AlertView = create_alert(&app).await;

        post_json(
            app.clone(),
            &format!("/alerts/{}/claim", view.alert_id),
            &create_test_claim_request("staff-1"),
        )
        .await;

        let response = get_uri(
            app,
            &format!("/audit/timeline?alert_id={}", view.alert_id),
        )
        .await;
        assert_eq!(response.status(), HttpStatusCode::OK);
        let events: Vec<AuditEventView> = body_of(response).await;
        let actions: Vec<&str> = events.iter().map(|e| e.action.as_str()).collect();
        assert_eq!(actions, vec!["CreateAlert", "ClaimAlert"]);
    }

    #[tokio::test]
    async fn test_concurrent_claims_have_one_winner() {
        let app: Router = build_router(create_test_app_state());
        let view: AlertView = create_alert(&app).await;

        let claims = (1..=5).map(|n| {
            let app: Router = app.clone();
            let uri: String = format!("/alerts/{}/claim", view.alert_id);
            let request: ClaimAlertRequest = create_test_claim_request(&format!("staff-{n}"));
            async move { post_json(app, &uri, &request).await }
        });
        let responses: Vec<HttpResponse<Body>> = join_all(claims).await;

        let winners: usize = responses
            .iter()
            .filter(|r| r.status() == HttpStatusCode::OK)
            .count();
        let losers: usize = responses
            .iter()
            .filter(|r| r.status() == HttpStatusCode::CONFLICT)
            .count();
        assert_eq!(winners, 1);
        assert_eq!(losers, 4);

        let settled: AlertView =
            body_of(get_uri(app, &format!("/alerts/{}", view.alert_id)).await).await;
        assert_eq!(settled.status, "PendingConfirmation");
        assert_eq!(settled.version, 1);
    }
}
