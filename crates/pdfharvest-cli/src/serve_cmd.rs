//! HTTP endpoint: `POST /parse_pdf` and `GET /health`.
//!
//! Uploads are parsed in memory on a blocking worker. Images of each
//! request go into their own subdirectory of the image directory, named
//! after the upload and a request counter.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use axum::{
    Router,
    extract::{DefaultBodyLimit, Multipart, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
};
use pdfharvest::{DirectorySink, ExtractOptions, Harvester, Pdf, PdfError, Report};

/// Largest accepted upload.
pub const MAX_UPLOAD_BYTES: usize = 64 * 1024 * 1024;

#[derive(Clone)]
pub struct AppState {
    image_dir: Arc<PathBuf>,
    options: ExtractOptions,
    requests: Arc<AtomicUsize>,
}

impl AppState {
    /// Uploads never produce page text files and are capped at
    /// [`MAX_UPLOAD_BYTES`].
    pub fn new(image_dir: PathBuf, options: ExtractOptions) -> Self {
        let options = ExtractOptions {
            write_text_files: false,
            max_input_bytes: Some(MAX_UPLOAD_BYTES),
            ..options
        };
        Self {
            image_dir: Arc::new(image_dir),
            options,
            requests: Arc::new(AtomicUsize::new(0)),
        }
    }
}

#[derive(Debug)]
pub struct AppError(StatusCode, String);

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        (self.0, Json(serde_json::json!({"error": self.1}))).into_response()
    }
}

impl From<PdfError> for AppError {
    fn from(err: PdfError) -> Self {
        let status = match err {
            PdfError::IoError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            PdfError::ResourceLimitExceeded { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            _ => StatusCode::UNPROCESSABLE_ENTITY,
        };
        AppError(status, err.to_string())
    }
}

fn bad_request(msg: impl Into<String>) -> AppError {
    AppError(StatusCode::BAD_REQUEST, msg.into())
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/parse_pdf", post(parse_pdf_handler))
        .route("/health", get(health_handler))
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .with_state(state)
}

pub fn run(bind: &str, image_dir: &Path, options: ExtractOptions) -> Result<(), i32> {
    let runtime = tokio::runtime::Runtime::new().map_err(|e| {
        eprintln!("Error: failed to start async runtime: {e}");
        1
    })?;
    runtime.block_on(serve(bind, AppState::new(image_dir.to_path_buf(), options)))
}

async fn serve(bind: &str, state: AppState) -> Result<(), i32> {
    std::fs::create_dir_all(state.image_dir.as_path()).map_err(|e| {
        eprintln!(
            "Error: failed to create image directory {}: {e}",
            state.image_dir.display()
        );
        1
    })?;

    let listener = tokio::net::TcpListener::bind(bind).await.map_err(|e| {
        eprintln!("Error: failed to bind to {bind}: {e}");
        1
    })?;
    let addr = listener.local_addr().map_err(|e| {
        eprintln!("Error: {e}");
        1
    })?;
    eprintln!("Listening on http://{addr}");
    tracing::info!(%addr, image_dir = %state.image_dir.display(), "server started");

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| {
            eprintln!("Error: server error: {e}");
            1
        })
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "could not listen for ctrl-c");
        std::future::pending::<()>().await;
    }
}

// GET /health
async fn health_handler() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

// POST /parse_pdf
async fn parse_pdf_handler(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<serde_json::Value>, AppError> {
    let mut upload = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| bad_request(format!("invalid multipart body: {e}")))?
    {
        if field.name() != Some("file") {
            continue;
        }
        let file_name = field.file_name().unwrap_or_default().to_string();
        let bytes = field
            .bytes()
            .await
            .map_err(|e| bad_request(format!("failed to read upload: {e}")))?;
        upload = Some((file_name, bytes));
        break;
    }

    let (file_name, bytes) = upload.ok_or_else(|| bad_request("No file part in the request"))?;
    if file_name.is_empty() {
        return Err(bad_request("No file selected for uploading"));
    }

    let request_id = state.requests.fetch_add(1, Ordering::Relaxed);
    tracing::info!(file = %file_name, bytes = bytes.len(), request_id, "parsing upload");

    let report =
        tokio::task::spawn_blocking(move || parse_upload(&state, &file_name, &bytes, request_id))
            .await
            .map_err(|e| {
                AppError(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    format!("worker failed: {e}"),
                )
            })??;
    Ok(Json(report.to_json()))
}

/// Harvest an uploaded document, writing its images under the request's
/// own subdirectory.
pub fn parse_upload(
    state: &AppState,
    file_name: &str,
    bytes: &[u8],
    request_id: usize,
) -> Result<Report, AppError> {
    let pdf = Pdf::open(bytes, Some(state.options.clone()))?;

    let dir = state.image_dir.join(request_dir_name(file_name, request_id));
    let sink = DirectorySink::new(&dir).map_err(|e| {
        AppError(
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("failed to create {}: {e}", dir.display()),
        )
    })?;

    let result = Harvester::new(&pdf).with_sink(&sink).harvest()?;
    if !result.is_clean() {
        tracing::warn!(
            file = %file_name,
            warnings = result.warnings.len(),
            "upload harvested with warnings"
        );
    }
    Ok(Report::new(file_name, file_name, &result.value, pdf.metadata()))
}

/// `<sanitized stem>-<request id>`.
fn request_dir_name(file_name: &str, request_id: usize) -> String {
    let stem = Path::new(file_name)
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let safe: String = stem
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();
    format!("{safe}-{request_id}")
}
