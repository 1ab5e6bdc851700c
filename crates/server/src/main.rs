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

mod live;

use axum::{
    Json, Router,
    extract::{FromRef, Path, Query, State as AxumState},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use clap::Parser;
use live::{ChangeFeed, live_events_handler};
use pointage::{AttendanceService, DailySummary, MileageReport, MissionBoard, MonthlyTable};
use pointage_api::{
    ApiError, AttendanceRangeResponse, AttendanceStatusResponse, CreateMissionRequest,
    DayResponse, MileageQuery, MonthlyQuery, PersonRequest, PersonnelListResponse, RangeQuery,
    SetStatusRequest, UpdateMissionRequest, VocabularyResponse, WriteResponse, complete_mission,
    create_mission, create_personnel, delete_mission, delete_personnel, get_attendance,
    get_attendance_range, get_day, get_mission, get_personnel, get_summary, list_missions,
    list_personnel, mileage_report, mileage_report_csv, monthly_report, monthly_table_csv,
    reactivate_day, reactivate_mission, set_status, update_mission, update_personnel,
    validate_day, vocabulary,
};
use pointage_domain::{FlatDailyRate, HoursTable, Mission, MissionVocabulary, Person};
use pointage_persistence::Persistence;
use serde::{Deserialize, Serialize};
use std::{path::PathBuf, sync::Arc};
use tokio::sync::Mutex;
use tracing::{error, info};

/// Pointage Server - HTTP server for personnel attendance
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the `SQLite` database file. If not provided, uses in-memory database.
    #[arg(short, long)]
    database: Option<String>,

    /// Port to bind the server to
    #[arg(short, long, default_value_t = 3000)]
    port: u16,

    /// Address to bind the server to
    #[arg(short, long, default_value = "127.0.0.1")]
    bind: String,

    /// Log filter used when `RUST_LOG` is not set
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Hours credited per person for each mission day
    #[arg(long, default_value_t = FlatDailyRate::DEFAULT_HOURS)]
    hours_per_mission_day: u32,

    /// JSON file mapping mission names to their allowed descriptions
    #[arg(long)]
    vocabulary: Option<PathBuf>,
}

/// Application state shared across handlers.
#[derive(Clone)]
struct AppState {
    /// The attendance service, which owns the store and the cached roster.
    service: Arc<Mutex<AttendanceService<Persistence>>>,
    /// Hours credited per status in the monthly report.
    hours_table: HoursTable,
    /// Fan-out for live change notifications.
    live_events: Arc<ChangeFeed>,
}

impl AppState {
    fn new(service: AttendanceService<Persistence>, hours_table: HoursTable) -> Self {
        Self {
            service: Arc::new(Mutex::new(service)),
            hours_table,
            live_events: Arc::new(ChangeFeed::new()),
        }
    }

    /// Announces a committed write to live clients.
    fn publish(&self, response: &WriteResponse) {
        self.live_events.publish(response.change.clone());
    }
}

impl FromRef<AppState> for Arc<ChangeFeed> {
    fn from_ref(state: &AppState) -> Self {
        Arc::clone(&state.live_events)
    }
}

/// Report output format.
#[derive(Debug, Deserialize)]
struct FormatQuery {
    /// `json` (default) or `csv`.
    #[serde(default)]
    format: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ReportFormat {
    Json,
    Csv,
}

impl FormatQuery {
    fn parse(&self) -> Result<ReportFormat, HttpError> {
        match self.format.as_deref() {
            None | Some("json") => Ok(ReportFormat::Json),
            Some("csv") => Ok(ReportFormat::Csv),
            Some(other) => Err(HttpError {
                status: StatusCode::BAD_REQUEST,
                message: format!("Invalid format: '{other}'. Must be 'json' or 'csv'"),
            }),
        }
    }
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct HealthResponse {
    status: String,
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
        let status: StatusCode = match err {
            ApiError::DomainRuleViolation { .. } | ApiError::InvalidInput { .. } => {
                StatusCode::BAD_REQUEST
            }
            ApiError::ResourceNotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::Conflict { .. } => StatusCode::CONFLICT,
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

fn csv_response(body: String) -> Response {
    (
        [(header::CONTENT_TYPE, "text/csv; charset=utf-8")],
        body,
    )
        .into_response()
}

/// Handler for GET `/health` endpoint.
async fn handle_health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: String::from("ok"),
    })
}

/// Handler for GET `/personnel` endpoint.
async fn handle_list_personnel(
    AxumState(app_state): AxumState<AppState>,
) -> Json<PersonnelListResponse> {
    let service = app_state.service.lock().await;
    let response: PersonnelListResponse = list_personnel(service.roster());
    drop(service);
    Json(response)
}

/// Handler for GET `/personnel/{id}` endpoint.
async fn handle_get_personnel(
    AxumState(app_state): AxumState<AppState>,
    Path(personnel_id): Path<String>,
) -> Result<Json<Person>, HttpError> {
    let service = app_state.service.lock().await;
    let person: Person = get_personnel(service.roster(), &personnel_id)?;
    drop(service);
    Ok(Json(person))
}

/// Handler for POST `/personnel` endpoint.
async fn handle_create_personnel(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<PersonRequest>,
) -> Result<Json<WriteResponse>, HttpError> {
    info!(matricule = %req.matricule, "Handling create_personnel request");

    let mut service = app_state.service.lock().await;
    let response: WriteResponse = create_personnel(&mut *service, req)?;
    drop(service);

    app_state.publish(&response);
    Ok(Json(response))
}

/// Handler for PUT `/personnel/{id}` endpoint.
async fn handle_update_personnel(
    AxumState(app_state): AxumState<AppState>,
    Path(personnel_id): Path<String>,
    Json(req): Json<PersonRequest>,
) -> Result<Json<WriteResponse>, HttpError> {
    info!(personnel_id = %personnel_id, "Handling update_personnel request");

    let mut service = app_state.service.lock().await;
    let response: WriteResponse = update_personnel(&mut *service, &personnel_id, req)?;
    drop(service);

    app_state.publish(&response);
    Ok(Json(response))
}

/// Handler for DELETE `/personnel/{id}` endpoint.
///
/// Removes the person with their attendance records and mission memberships.
async fn handle_delete_personnel(
    AxumState(app_state): AxumState<AppState>,
    Path(personnel_id): Path<String>,
) -> Result<Json<WriteResponse>, HttpError> {
    info!(personnel_id = %personnel_id, "Handling delete_personnel request");

    let mut service = app_state.service.lock().await;
    let response: WriteResponse = delete_personnel(&mut *service, &personnel_id)?;
    drop(service);

    app_state.publish(&response);
    Ok(Json(response))
}

/// Handler for POST `/attendance` endpoint.
///
/// Sets a single day, or a whole permission span.
async fn handle_set_status(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<SetStatusRequest>,
) -> Result<Json<WriteResponse>, HttpError> {
    info!(
        personnel_id = %req.personnel_id,
        date = %req.date,
        status = %req.status,
        "Handling set_status request"
    );

    let mut service = app_state.service.lock().await;
    let response: WriteResponse = set_status(&mut *service, &req)?;
    drop(service);

    app_state.publish(&response);
    Ok(Json(response))
}

/// Handler for GET `/attendance/{personnel_id}/{date}` endpoint.
async fn handle_get_attendance(
    AxumState(app_state): AxumState<AppState>,
    Path((personnel_id, date)): Path<(String, String)>,
) -> Result<Json<AttendanceStatusResponse>, HttpError> {
    let service = app_state.service.lock().await;
    let response: AttendanceStatusResponse =
        get_attendance(service.roster(), &personnel_id, &date)?;
    drop(service);
    Ok(Json(response))
}

/// Handler for GET `/attendance/{personnel_id}` endpoint.
async fn handle_get_attendance_range(
    AxumState(app_state): AxumState<AppState>,
    Path(personnel_id): Path<String>,
    Query(query): Query<RangeQuery>,
) -> Result<Json<AttendanceRangeResponse>, HttpError> {
    let service = app_state.service.lock().await;
    let response: AttendanceRangeResponse =
        get_attendance_range(service.roster(), &personnel_id, &query)?;
    drop(service);
    Ok(Json(response))
}

/// Handler for GET `/missions` endpoint.
///
/// Splits missions into upcoming and past relative to the service clock.
async fn handle_list_missions(AxumState(app_state): AxumState<AppState>) -> Json<MissionBoard> {
    let service = app_state.service.lock().await;
    let board: MissionBoard = list_missions(service.roster(), service.today());
    drop(service);
    Json(board)
}

/// Handler for GET `/missions/{id}` endpoint.
async fn handle_get_mission(
    AxumState(app_state): AxumState<AppState>,
    Path(mission_id): Path<String>,
) -> Result<Json<Mission>, HttpError> {
    let service = app_state.service.lock().await;
    let mission: Mission = get_mission(service.roster(), &mission_id)?;
    drop(service);
    Ok(Json(mission))
}

/// Handler for POST `/missions` endpoint.
async fn handle_create_mission(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<CreateMissionRequest>,
) -> Result<Json<WriteResponse>, HttpError> {
    info!(
        name = %req.name,
        start_date = %req.start_date,
        personnel = req.personnel_ids.len(),
        "Handling create_mission request"
    );

    let mut service = app_state.service.lock().await;
    let response: WriteResponse = create_mission(&mut *service, req)?;
    drop(service);

    app_state.publish(&response);
    Ok(Json(response))
}

/// Handler for PUT `/missions/{id}` endpoint.
async fn handle_update_mission(
    AxumState(app_state): AxumState<AppState>,
    Path(mission_id): Path<String>,
    Json(req): Json<UpdateMissionRequest>,
) -> Result<Json<WriteResponse>, HttpError> {
    info!(mission_id = %mission_id, "Handling update_mission request");

    let mut service = app_state.service.lock().await;
    let response: WriteResponse = update_mission(&mut *service, &mission_id, req)?;
    drop(service);

    app_state.publish(&response);
    Ok(Json(response))
}

/// Handler for POST `/missions/{id}/complete` endpoint.
async fn handle_complete_mission(
    AxumState(app_state): AxumState<AppState>,
    Path(mission_id): Path<String>,
) -> Result<Json<WriteResponse>, HttpError> {
    info!(mission_id = %mission_id, "Handling complete_mission request");

    let mut service = app_state.service.lock().await;
    let response: WriteResponse = complete_mission(&mut *service, &mission_id)?;
    drop(service);

    app_state.publish(&response);
    Ok(Json(response))
}

/// Handler for POST `/missions/{id}/reactivate` endpoint.
async fn handle_reactivate_mission(
    AxumState(app_state): AxumState<AppState>,
    Path(mission_id): Path<String>,
) -> Result<Json<WriteResponse>, HttpError> {
    info!(mission_id = %mission_id, "Handling reactivate_mission request");

    let mut service = app_state.service.lock().await;
    let response: WriteResponse = reactivate_mission(&mut *service, &mission_id)?;
    drop(service);

    app_state.publish(&response);
    Ok(Json(response))
}

/// Handler for DELETE `/missions/{id}` endpoint.
///
/// Members' tagged days go back to present.
async fn handle_delete_mission(
    AxumState(app_state): AxumState<AppState>,
    Path(mission_id): Path<String>,
) -> Result<Json<WriteResponse>, HttpError> {
    info!(mission_id = %mission_id, "Handling delete_mission request");

    let mut service = app_state.service.lock().await;
    let response: WriteResponse = delete_mission(&mut *service, &mission_id)?;
    drop(service);

    app_state.publish(&response);
    Ok(Json(response))
}

/// Handler for GET `/days/{date}` endpoint.
async fn handle_get_day(
    AxumState(app_state): AxumState<AppState>,
    Path(date): Path<String>,
) -> Result<Json<DayResponse>, HttpError> {
    let service = app_state.service.lock().await;
    let response: DayResponse = get_day(service.roster(), &date)?;
    drop(service);
    Ok(Json(response))
}

/// Handler for POST `/days/{date}/validate` endpoint.
///
/// Freezes every person's effective status for the day.
async fn handle_validate_day(
    AxumState(app_state): AxumState<AppState>,
    Path(date): Path<String>,
) -> Result<Json<WriteResponse>, HttpError> {
    info!(date = %date, "Handling validate_day request");

    let mut service = app_state.service.lock().await;
    let response: WriteResponse = validate_day(&mut *service, &date)?;
    drop(service);

    app_state.publish(&response);
    Ok(Json(response))
}

/// Handler for POST `/days/{date}/reactivate` endpoint.
async fn handle_reactivate_day(
    AxumState(app_state): AxumState<AppState>,
    Path(date): Path<String>,
) -> Result<Json<WriteResponse>, HttpError> {
    info!(date = %date, "Handling reactivate_day request");

    let mut service = app_state.service.lock().await;
    let response: WriteResponse = reactivate_day(&mut *service, &date)?;
    drop(service);

    app_state.publish(&response);
    Ok(Json(response))
}

/// Handler for GET `/summary/{date}` endpoint.
async fn handle_get_summary(
    AxumState(app_state): AxumState<AppState>,
    Path(date): Path<String>,
) -> Result<Json<DailySummary>, HttpError> {
    let service = app_state.service.lock().await;
    let summary: DailySummary = get_summary(service.roster(), &date)?;
    drop(service);
    Ok(Json(summary))
}

/// Handler for GET `/reports/monthly` endpoint.
async fn handle_monthly_report(
    AxumState(app_state): AxumState<AppState>,
    Query(query): Query<MonthlyQuery>,
    Query(format): Query<FormatQuery>,
) -> Result<Response, HttpError> {
    let format: ReportFormat = format.parse()?;

    let service = app_state.service.lock().await;
    let table: MonthlyTable = monthly_report(service.roster(), &query, &app_state.hours_table)?;
    drop(service);

    info!(month = %query.month, rows = table.rows.len(), "Built monthly report");

    match format {
        ReportFormat::Json => Ok(Json(table).into_response()),
        ReportFormat::Csv => Ok(csv_response(monthly_table_csv(&table)?)),
    }
}

/// Handler for GET `/reports/mileage` endpoint.
async fn handle_mileage_report(
    AxumState(app_state): AxumState<AppState>,
    Query(query): Query<MileageQuery>,
    Query(format): Query<FormatQuery>,
) -> Result<Response, HttpError> {
    let format: ReportFormat = format.parse()?;

    let service = app_state.service.lock().await;
    let report: MileageReport = mileage_report(service.roster(), &query)?;
    drop(service);

    match format {
        ReportFormat::Json => Ok(Json(report).into_response()),
        ReportFormat::Csv => Ok(csv_response(mileage_report_csv(&report)?)),
    }
}

/// Handler for GET `/vocabulary` endpoint.
async fn handle_vocabulary(AxumState(app_state): AxumState<AppState>) -> Json<VocabularyResponse> {
    let service = app_state.service.lock().await;
    let response: VocabularyResponse = vocabulary(service.vocabulary());
    drop(service);
    Json(response)
}

/// Builds the application router with all endpoints.
fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route("/health", get(handle_health))
        .route(
            "/personnel",
            get(handle_list_personnel).post(handle_create_personnel),
        )
        .route(
            "/personnel/{id}",
            get(handle_get_personnel)
                .put(handle_update_personnel)
                .delete(handle_delete_personnel),
        )
        .route("/attendance", post(handle_set_status))
        .route(
            "/attendance/{personnel_id}",
            get(handle_get_attendance_range),
        )
        .route(
            "/attendance/{personnel_id}/{date}",
            get(handle_get_attendance),
        )
        .route(
            "/missions",
            get(handle_list_missions).post(handle_create_mission),
        )
        .route(
            "/missions/{id}",
            get(handle_get_mission)
                .put(handle_update_mission)
                .delete(handle_delete_mission),
        )
        .route("/missions/{id}/complete", post(handle_complete_mission))
        .route("/missions/{id}/reactivate", post(handle_reactivate_mission))
        .route("/days/{date}", get(handle_get_day))
        .route("/days/{date}/validate", post(handle_validate_day))
        .route("/days/{date}/reactivate", post(handle_reactivate_day))
        .route("/summary/{date}", get(handle_get_summary))
        .route("/reports/monthly", get(handle_monthly_report))
        .route("/reports/mileage", get(handle_mileage_report))
        .route("/vocabulary", get(handle_vocabulary))
        .route("/live", get(live_events_handler))
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
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&args.log_level)),
        )
        .init();

    info!("Initializing Pointage Server");

    // Initialize persistence (in-memory or file-based based on CLI argument)
    let persistence: Persistence = if let Some(db_path) = &args.database {
        info!("Using file-based database at: {}", db_path);
        Persistence::new_with_file(db_path)?
    } else {
        info!("Using in-memory database");
        Persistence::new_in_memory()?
    };

    let mission_vocabulary: MissionVocabulary = if let Some(path) = &args.vocabulary {
        info!(path = %path.display(), "Loading mission vocabulary");
        MissionVocabulary::from_json_file(path)?
    } else {
        MissionVocabulary::default()
    };

    let hours_table: HoursTable = HoursTable {
        mission: args.hours_per_mission_day,
        ..HoursTable::default()
    };
    let service: AttendanceService<Persistence> = AttendanceService::new(
        persistence,
        mission_vocabulary,
        Box::new(FlatDailyRate::new(args.hours_per_mission_day)),
    )?;

    let app_state: AppState = AppState::new(service, hours_table);

    // Build router
    let app: Router = build_router(app_state);

    // Bind to address
    let addr: std::net::SocketAddr = format!("{}:{}", args.bind, args.port).parse()?;
    info!("Server listening on {}", addr);

    // Run server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
