//! HTTP surface over the record generator.

use crate::config::ServerConfig;
use crate::errors::{ApiError, ServerError};
use anyhow::Result;
use axum::body::Body;
use axum::extract::{Query, State};
use axum::http::{header, HeaderValue, Method, Request, StatusCode};
use axum::middleware::{from_fn_with_state, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use fakeroll_datagen::{
    to_csv_string, GenerationRequest, RawRequest, Record, RecordGenerator, RequestError,
    RequestLimits,
};
use serde::Deserialize;
use serde_json::json;
use std::num::NonZeroU32;
use std::sync::Arc;

/// Most pages one export may cover.
pub const MAX_EXPORT_PAGES: u32 = 100;

#[derive(Clone)]
pub struct AppState {
    generator: RecordGenerator,
    limits: RequestLimits,
    cors_allowed_origins: Arc<Vec<String>>,
}

impl AppState {
    pub fn new(generator: RecordGenerator, config: &ServerConfig) -> Self {
        Self {
            generator,
            limits: config.request_limits(),
            cors_allowed_origins: Arc::new(config.cors_allowed_origins.clone()),
        }
    }

    /// State with the locale catalog the config points at.
    pub fn from_config(config: &ServerConfig) -> Result<Self> {
        let generator = RecordGenerator::new(config.locale_catalog()?);
        Ok(Self::new(generator, config))
    }

    fn allows_origin(&self, origin: &str) -> bool {
        self.cors_allowed_origins.iter().any(|o| o == origin)
    }
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/data", get(get_data))
        .route("/api/export", get(export_csv))
        .layer(from_fn_with_state(state.clone(), cors_middleware))
        .with_state(state)
}

/// Bind `config.listen_addr` and serve until the process stops.
pub async fn serve(config: ServerConfig) -> Result<()> {
    let state = AppState::from_config(&config)?;
    let app = build_router(state);

    let addr = config.listen_addr;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|source| ServerError::BindError { addr, source })?;

    tracing::info!(%addr, "fakeroll HTTP server listening");
    axum::serve(listener, app).await?;
    Ok(())
}

async fn health() -> impl IntoResponse {
    (StatusCode::OK, Json(json!({ "status": "ok" })))
}

async fn get_data(
    State(state): State<AppState>,
    Query(raw): Query<RawRequest>,
) -> Result<Json<Vec<Record>>, ApiError> {
    let request = GenerationRequest::parse(&raw, &state.limits)?;
    let records = state.generator.generate_page(&request);

    tracing::info!(
        region = %request.region,
        page = request.page_number.get(),
        errors_per_record = %request.errors_per_record,
        records = records.len(),
        "served page"
    );
    Ok(Json(records))
}

#[derive(Debug, Deserialize)]
struct ExportParams {
    pages: Option<String>,
}

/// Parse an export page count in `1..=MAX_EXPORT_PAGES`; absent means 1.
pub fn parse_pages(value: Option<&str>) -> Result<NonZeroU32, RequestError> {
    const NAME: &str = "pages";

    let Some(value) = value else {
        return Ok(NonZeroU32::MIN);
    };
    let value = value.trim();
    let pages: u32 = value
        .parse()
        .map_err(|_| RequestError::not_a_number(NAME, value))?;
    if pages > MAX_EXPORT_PAGES {
        return Err(RequestError::out_of_range(
            NAME,
            format!("must be at most {MAX_EXPORT_PAGES}"),
        ));
    }
    NonZeroU32::new(pages).ok_or_else(|| RequestError::out_of_range(NAME, "must be at least 1"))
}

/// CSV of pages `1..=pages` for the given region, seed and error rate.
/// `pageNumber` is ignored.
async fn export_csv(
    State(state): State<AppState>,
    Query(mut raw): Query<RawRequest>,
    Query(params): Query<ExportParams>,
) -> Result<Response, ApiError> {
    raw.page_number.get_or_insert_with(|| "1".to_string());
    let request = GenerationRequest::parse(&raw, &state.limits)?;
    let pages = parse_pages(params.pages.as_deref())?;

    let records = state.generator.generate_pages(&request, pages);
    let body = to_csv_string(&records)?;

    tracing::info!(
        region = %request.region,
        pages = pages.get(),
        records = records.len(),
        "served CSV export"
    );
    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8"),
            (header::CONTENT_DISPOSITION, "attachment; filename=\"data.csv\""),
        ],
        body,
    )
        .into_response())
}

async fn cors_middleware(State(state): State<AppState>, req: Request<Body>, next: Next) -> Response {
    let origin = req
        .headers()
        .get(header::ORIGIN)
        .and_then(|v| v.to_str().ok())
        .filter(|o| state.allows_origin(o))
        .and_then(|o| HeaderValue::from_str(o).ok());

    let mut resp = if req.method() == Method::OPTIONS {
        StatusCode::NO_CONTENT.into_response()
    } else {
        next.run(req).await
    };

    if let Some(origin) = origin {
        let headers = resp.headers_mut();
        headers.insert(header::ACCESS_CONTROL_ALLOW_ORIGIN, origin);
        headers.insert(
            header::ACCESS_CONTROL_ALLOW_METHODS,
            HeaderValue::from_static("GET,OPTIONS"),
        );
        headers.insert(
            header::ACCESS_CONTROL_ALLOW_HEADERS,
            HeaderValue::from_static("content-type"),
        );
        headers.insert(header::VARY, HeaderValue::from_static("origin"));
    }
    resp
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_pages() {
        assert_eq!(parse_pages(None).unwrap().get(), 1);
        assert_eq!(parse_pages(Some("5")).unwrap().get(), 5);
        assert!(parse_pages(Some("0")).is_err());
        assert!(parse_pages(Some("101")).is_err());
        assert!(parse_pages(Some("many")).is_err());
    }
}
