// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]
#![allow(clippy::multiple_crate_versions)]

mod views;

use axum::{
    Json, Router,
    extract::{Path, Query, State as AxumState},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use clap::Parser;
use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{error, info, warn};
use views::{
    DEFAULT_RECENT_LIMIT, ErrorResponse, MAX_RECENT_LIMIT, MembersResponse, RecentIncidentsResponse,
    RecentQuery, ReportSearchResponse, SearchQuery,
};
use vvf_log::{Event, OperatorId, Reply, ReplyKind, SystemClock, WizardEngine};
use vvf_log_domain::{DomainError, Member, ReportNumber, parse_report_number, parse_year};
use vvf_log_persistence::{IncidentSummary, Persistence, PersistenceError, YearStatistics};

/// Fire-brigade incident log server: drives the entry and edit wizards
/// over HTTP.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the `SQLite` database file. If not provided, uses in-memory database.
    #[arg(short, long)]
    database: Option<String>,

    /// Address to bind the server to
    #[arg(short, long, default_value = "127.0.0.1")]
    bind: IpAddr,

    /// Port to bind the server to
    #[arg(short, long, default_value_t = 3000)]
    port: u16,

    /// Seed a starter roster and fleet if the roster is empty
    #[arg(long)]
    seed_demo: bool,
}

type Engine = WizardEngine<Persistence, SystemClock>;

/// Application state shared across handlers.
///
/// The engine owns both the sessions and the store, so a single lock
/// serializes every wizard step and every read.
#[derive(Clone)]
struct AppState {
    engine: Arc<Mutex<Engine>>,
}

impl AppState {
    fn new(persistence: Persistence) -> Self {
        Self {
            engine: Arc::new(Mutex::new(WizardEngine::new(persistence, SystemClock))),
        }
    }
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

impl From<DomainError> for HttpError {
    fn from(err: DomainError) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: err.to_string(),
        }
    }
}

impl From<PersistenceError> for HttpError {
    fn from(err: PersistenceError) -> Self {
        error!(error = %err, "Persistence error");
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: format!("Persistence error: {err}"),
        }
    }
}

/// Handler for POST `/operators/{operator_id}/events`.
///
/// Feeds one operator event to the wizard engine and returns its reply.
/// Wizard-level failures are part of the reply, never an HTTP error.
async fn handle_operator_event(
    AxumState(app_state): AxumState<AppState>,
    Path(operator_id): Path<i64>,
    Json(event): Json<Event>,
) -> Json<Reply> {
    let operator: OperatorId = OperatorId::new(operator_id);
    info!(operator = %operator, event = ?event, "Handling operator event");

    let mut engine = app_state.engine.lock().await;
    let reply: Reply = engine.handle(operator, event);
    drop(engine);

    if reply.kind == ReplyKind::Aborted {
        warn!(operator = %operator, text = %reply.text, "Wizard aborted");
    }
    Json(reply)
}

/// Handler for GET `/incidents/recent`.
async fn handle_recent_incidents(
    AxumState(app_state): AxumState<AppState>,
    Query(query): Query<RecentQuery>,
) -> Result<Json<RecentIncidentsResponse>, HttpError> {
    let limit: usize = query.limit.unwrap_or(DEFAULT_RECENT_LIMIT);
    if limit == 0 || limit > MAX_RECENT_LIMIT {
        return Err(HttpError {
            status: StatusCode::BAD_REQUEST,
            message: format!("limit must be between 1 and {MAX_RECENT_LIMIT}"),
        });
    }
    info!(limit, "Handling recent incidents request");

    let mut engine = app_state.engine.lock().await;
    let incidents: Vec<IncidentSummary> = engine.backend_mut().recent_summaries(limit)?;
    drop(engine);

    Ok(Json(RecentIncidentsResponse { incidents }))
}

/// Handler for GET `/incidents/search`.
///
/// Lists every leg of one report in one year.
async fn handle_search_report(
    AxumState(app_state): AxumState<AppState>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<ReportSearchResponse>, HttpError> {
    let year: i32 = parse_year(&query.year)?;
    let report_number: ReportNumber = parse_report_number(&query.report)?;
    info!(year, report = %report_number, "Handling report search");

    let mut engine = app_state.engine.lock().await;
    let legs: Vec<IncidentSummary> = engine
        .backend_mut()
        .incidents_for_report(year, &report_number)?;
    drop(engine);

    Ok(Json(ReportSearchResponse {
        year,
        report_number: report_number.to_string(),
        legs,
    }))
}

/// Handler for GET `/statistics/{year}`.
async fn handle_statistics(
    AxumState(app_state): AxumState<AppState>,
    Path(year): Path<String>,
) -> Result<Json<YearStatistics>, HttpError> {
    let year: i32 = parse_year(&year)?;
    info!(year, "Handling statistics request");

    let mut engine = app_state.engine.lock().await;
    let statistics: YearStatistics = engine.backend_mut().statistics_for_year(year)?;
    drop(engine);

    Ok(Json(statistics))
}

/// Handler for GET `/members`.
async fn handle_list_members(
    AxumState(app_state): AxumState<AppState>,
) -> Result<Json<MembersResponse>, HttpError> {
    info!("Handling list_members request");

    let mut engine = app_state.engine.lock().await;
    let members: Vec<Member> = engine.backend_mut().list_members()?;
    drop(engine);

    Ok(Json(MembersResponse { members }))
}

/// Builds the application router with all endpoints.
fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route(
            "/operators/{operator_id}/events",
            post(handle_operator_event),
        )
        .route("/incidents/recent", get(handle_recent_incidents))
        .route("/incidents/search", get(handle_search_report))
        .route("/statistics/{year}", get(handle_statistics))
        .route("/members", get(handle_list_members))
        .with_state(app_state)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Initializing incident log server");

    let mut persistence: Persistence = if let Some(db_path) = &args.database {
        info!("Using file-based database at: {}", db_path);
        Persistence::new_with_file(db_path)?
    } else {
        info!("Using in-memory database");
        Persistence::new_in_memory()?
    };

    if args.seed_demo && persistence.seed_demo_data()? {
        info!("Seeded demo roster and fleet");
    }

    let app: Router = build_router(AppState::new(persistence));

    let addr: SocketAddr = SocketAddr::new(args.bind, args.port);
    info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
