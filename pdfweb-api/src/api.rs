use crate::config::ServerConfig;
use crate::error::{AppError, LocalizedError};
use crate::form::UploadForm;
use axum::{
    extract::{DefaultBodyLimit, Json, Multipart, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use pdfweb::merge::DEFAULT_MERGED_NAME;
use pdfweb::package::{content_disposition, pdf_filename, PDF_MEDIA_TYPE};
use pdfweb::{
    merge_uploads, package, ComposeOptions, Composer, OfficeConverter, OfficeError, Package,
    UploadedImage, UploadedPdf,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

/// Shared handler state
#[derive(Clone)]
pub struct AppState {
    pub composer: Arc<Composer>,
    pub office: Arc<OfficeConverter>,
}

impl AppState {
    pub fn from_config(config: &ServerConfig) -> Self {
        Self {
            composer: Arc::new(Composer::new(config.pipeline.clone())),
            office: Arc::new(OfficeConverter::new(config.soffice.clone())),
        }
    }
}

/// Summary of a merge, sent in the `X-Merge-Info` header
#[derive(Debug, Serialize, Deserialize)]
pub struct MergeInfo {
    pub files_merged: usize,
    pub pages: usize,
    pub skipped: usize,
}

/// Build the application router with default configuration
pub fn app() -> Router {
    app_with_config(&ServerConfig::default())
}

/// Build the application router with all routes configured
pub fn app_with_config(config: &ServerConfig) -> Router {
    Router::new()
        .route("/api/images-to-pdf", post(images_to_pdf))
        .route("/api/merge-pdf", post(merge_pdf))
        .route("/api/word-to-pdf", post(word_to_pdf))
        .route("/api/health", get(health_check))
        .route("/healthz", get(healthz))
        .with_state(AppState::from_config(config))
        .layer(DefaultBodyLimit::max(config.body_limit))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

/// Convert uploaded images into one PDF, or a zip of single-page PDFs
pub async fn images_to_pdf(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Response, LocalizedError> {
    let mut form = UploadForm::read(multipart).await?;
    let lang = form.lang();

    let options = ComposeOptions {
        order: form.order(),
        per_file: form.flag("per_file"),
        layout: form.layout(state.composer.config()),
        compress: form.flag("compress"),
    };
    let outfile = form.outfile().to_string();
    let images: Vec<UploadedImage> = form
        .take_files("images")
        .into_iter()
        .map(|part| UploadedImage::new(part.filename, part.content_type, part.data))
        .collect();

    info!(
        images = images.len(),
        ?options,
        lang = lang.code(),
        "Converting images to PDF"
    );

    let composer = state.composer.clone();
    let download = tokio::task::spawn_blocking(move || {
        let composition = composer.compose(images, &options)?;
        package(composition, &outfile)
    })
    .await
    .map_err(|e| AppError::from(e).localized(lang))?
    .map_err(|e| AppError::from(e).localized(lang))?;

    Ok(attachment(download))
}

/// Merge uploaded PDFs, skipping files that cannot be read
pub async fn merge_pdf(multipart: Multipart) -> Result<Response, LocalizedError> {
    let mut form = UploadForm::read(multipart).await?;
    let lang = form.lang();
    let order = form.order();
    let filename = pdf_filename(form.outfile(), DEFAULT_MERGED_NAME);
    let files: Vec<UploadedPdf> = form
        .take_files("files")
        .into_iter()
        .map(|part| UploadedPdf::new(part.filename, part.content_type, part.data))
        .collect();

    info!(files = files.len(), ?order, "Merging PDFs");

    let outcome = tokio::task::spawn_blocking(move || merge_uploads(files, order))
        .await
        .map_err(|e| AppError::from(e).localized(lang))?
        .map_err(|e| AppError::from(e).localized(lang))?;

    let merge_info = MergeInfo {
        files_merged: outcome.files_merged,
        pages: outcome.pages,
        skipped: outcome.skipped.len(),
    };
    let merge_info = serde_json::to_string(&merge_info)
        .map_err(|e| AppError::Task(e.to_string()).localized(lang))?;

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, PDF_MEDIA_TYPE.to_string()),
            (header::CONTENT_DISPOSITION, content_disposition(&filename)),
            (header::HeaderName::from_static("x-merge-info"), merge_info),
        ],
        outcome.data,
    )
        .into_response())
}

/// Convert an uploaded Word/ODT/RTF document to PDF with LibreOffice
pub async fn word_to_pdf(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Response, LocalizedError> {
    let mut form = UploadForm::read(multipart).await?;
    let lang = form.lang();
    let outfile = form.outfile().to_string();

    let Some(file) = form.take_files("file").into_iter().next() else {
        return Err(AppError::Office(OfficeError::UnsupportedFile {
            filename: String::new(),
        })
        .localized(lang));
    };
    if !OfficeConverter::is_supported(&file.filename) {
        return Err(AppError::Office(OfficeError::UnsupportedFile {
            filename: file.filename,
        })
        .localized(lang));
    }

    info!(filename = %file.filename, "Converting document to PDF");

    let office = state.office.clone();
    let converted =
        tokio::task::spawn_blocking(move || office.convert(&file.filename, &file.data))
            .await
            .map_err(|e| AppError::from(e).localized(lang))?
            .map_err(|e| AppError::from(e).localized(lang))?;

    let filename = pdf_filename(&outfile, &converted.default_filename());
    Ok(attachment(Package::pdf(filename, converted.data)))
}

/// Health check endpoint for monitoring and load balancing
pub async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "service": "pdfweb API",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// Plain liveness check
pub async fn healthz() -> &'static str {
    "ok"
}

fn attachment(download: Package) -> Response {
    (
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, download.media_type.to_string()),
            (header::CONTENT_DISPOSITION, download.content_disposition()),
        ],
        download.data,
    )
        .into_response()
}

