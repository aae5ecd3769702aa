#![cfg(feature = "web")]

use axum::{
    Json, Router,
    body::{Body, Bytes},
    extract::{Path, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex, MutexGuard};
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;

use crate::analytics::{AnalysisRequest, run_analysis};
use crate::config::ChartConfig;
use crate::dataset::Dataset;
use crate::error::StudioError;
use crate::service::Studio;

pub struct AppState {
    studio: Mutex<Studio>,
}

impl AppState {
    pub fn new(studio: Studio) -> Self {
        AppState {
            studio: Mutex::new(studio),
        }
    }

    // A handler that panicked mid-request leaves the store as it was before
    // the failing call, so a poisoned lock is still usable.
    fn studio(&self) -> MutexGuard<'_, Studio> {
        self.studio.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[derive(Deserialize)]
struct ChartPayload {
    name: String,
    config: ChartConfig,
}

#[derive(Deserialize)]
struct AnalyzePayload {
    dataset: Dataset,
    request: AnalysisRequest,
}

#[derive(Serialize)]
struct StatusResponse {
    status: String,
    message: Option<String>,
}

/// Error body `{status: "error", message}` with a status code per error kind
pub struct ApiError(StudioError);

impl From<StudioError> for ApiError {
    fn from(e: StudioError) -> Self {
        ApiError(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            StudioError::NotFound(_) => StatusCode::NOT_FOUND,
            StudioError::Conflict(_) => StatusCode::CONFLICT,
            StudioError::InvalidInput(_)
            | StudioError::Validation(_)
            | StudioError::Json(_)
            | StudioError::Unsupported(_) => StatusCode::BAD_REQUEST,
            StudioError::Io(_)
            | StudioError::Storage(_)
            | StudioError::Render(_)
            | StudioError::Export(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        if status.is_server_error() {
            log::error!("request failed: {}", self.0);
        }
        let body = StatusResponse {
            status: "error".to_string(),
            message: Some(self.0.to_string()),
        };
        (status, Json(body)).into_response()
    }
}

type ApiResult<T> = Result<T, ApiError>;

/// Runs CPU-bound work off the async workers, without the studio lock
async fn blocking<T, F>(work: F) -> ApiResult<T>
where
    T: Send + 'static,
    F: FnOnce() -> crate::error::Result<T> + Send + 'static,
{
    let joined = tokio::task::spawn_blocking(work)
        .await
        .map_err(|e| StudioError::Io(std::io::Error::other(e)))?;
    Ok(joined?)
}

/// Builds the router over shared studio state
pub fn router(state: Arc<AppState>) -> Router {
    let api = Router::new()
        .route("/api/chart-types", get(chart_types))
        .route("/api/charts", get(list_charts).post(create_chart))
        .route("/api/charts/import", post(import_chart))
        .route(
            "/api/charts/:id",
            get(get_chart).put(update_chart).delete(delete_chart),
        )
        .route("/api/charts/:id/options", get(saved_chart_options))
        .route("/api/charts/:id/export", get(export_chart))
        .route("/api/options", post(build_options))
        .route("/api/preview", post(preview))
        .route("/api/analyze", post(analyze))
        .route("/api/datasets/csv", post(import_csv));

    #[cfg(feature = "xlsx")]
    let api = api.route("/api/datasets/xlsx", post(export_xlsx));

    api.nest_service("/static", ServeDir::new("static"))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

pub async fn run(studio: Studio) -> Result<(), Box<dyn std::error::Error>> {
    let bind_addr = studio.settings().bind_addr.clone();
    let app_state = Arc::new(AppState::new(studio));
    let app = router(app_state);

    let listener = TcpListener::bind(&bind_addr).await?;
    log::info!("listening on http://{}", bind_addr);
    axum::serve(listener, app).await?;

    Ok(())
}

async fn chart_types(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(state.studio().chart_types())
}

async fn list_charts(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(state.studio().list_charts().to_vec())
}

async fn create_chart(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<ChartPayload>,
) -> ApiResult<impl IntoResponse> {
    let chart = state
        .studio()
        .create_chart(&payload.name, payload.config)?;
    Ok((StatusCode::CREATED, Json(chart)))
}

async fn get_chart(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<impl IntoResponse> {
    let chart = state.studio().get_chart(&id)?.clone();
    Ok(Json(chart))
}

async fn update_chart(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Json(payload): Json<ChartPayload>,
) -> ApiResult<impl IntoResponse> {
    let chart = state
        .studio()
        .update_chart(&id, &payload.name, payload.config)?;
    Ok(Json(chart))
}

async fn delete_chart(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<impl IntoResponse> {
    state.studio().delete_chart(&id)?;
    Ok(Json(StatusResponse {
        status: "ok".to_string(),
        message: None,
    }))
}

async fn saved_chart_options(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<impl IntoResponse> {
    Ok(Json(state.studio().build_options_for(&id)?))
}

async fn export_chart(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<impl IntoResponse> {
    let json = state.studio().export_chart(&id)?;
    Ok(([(header::CONTENT_TYPE, "application/json")], json))
}

async fn import_chart(State(state): State<Arc<AppState>>, body: String) -> ApiResult<impl IntoResponse> {
    let chart = state.studio().import_chart(&body)?;
    Ok((StatusCode::CREATED, Json(chart)))
}

async fn build_options(
    State(state): State<Arc<AppState>>,
    Json(config): Json<ChartConfig>,
) -> ApiResult<impl IntoResponse> {
    Ok(Json(state.studio().build_options(&config)?))
}

async fn preview(
    State(state): State<Arc<AppState>>,
    Json(config): Json<ChartConfig>,
) -> ApiResult<Response> {
    let options = state.studio().preview_options();
    let png = blocking(move || crate::preview::render_preview(&config, &options)).await?;
    Ok(Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, "image/png")
        .body(Body::from(Bytes::from(png)))
        .map_err(|e| StudioError::Render(e.to_string()))?)
}

async fn analyze(Json(payload): Json<AnalyzePayload>) -> ApiResult<impl IntoResponse> {
    let output = blocking(move || run_analysis(&payload.dataset, &payload.request)).await?;
    Ok(Json(output))
}

async fn import_csv(State(state): State<Arc<AppState>>, body: String) -> ApiResult<impl IntoResponse> {
    Ok(Json(state.studio().import_csv(&body)?))
}

#[cfg(feature = "xlsx")]
async fn export_xlsx(Json(dataset): Json<Dataset>) -> ApiResult<Response> {
    let buffer = crate::export::dataset_to_xlsx(&dataset)?;
    Ok(Response::builder()
        .status(StatusCode::OK)
        .header(
            header::CONTENT_TYPE,
            "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
        )
        .header(header::CONTENT_DISPOSITION, "attachment; filename=\"data.xlsx\"")
        .body(Body::from(buffer))
        .map_err(|e| StudioError::Render(e.to_string()))?)
}
