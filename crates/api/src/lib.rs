pub mod error;

use anyhow::Context;
use axum::{
    extract::{rejection::JsonRejection, State},
    http::HeaderValue,
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

use holistica_core::config::CorsSettings;
use holistica_core::domain::analysis::{AnalysisRequest, AnalysisResponse};
use holistica_core::pipeline::MockPipeline;

use crate::error::ApiError;

pub const ROOT_MESSAGE: &str = "Holistica Quant 后端服务器正在运行。请向 POST /analyze 发送分析请求。";

#[derive(Debug, Clone)]
pub struct AppState {
    pub pipeline: MockPipeline,
}

pub fn create_router(state: AppState, cors: Option<CorsLayer>) -> Router {
    let router = Router::new()
        .route("/", get(read_root))
        .route("/healthz", get(healthz))
        .route("/analyze", post(analyze))
        .with_state(state)
        .layer(TraceLayer::new_for_http());

    match cors {
        Some(cors) => router.layer(cors),
        None => router,
    }
}

/// Builds the cross-origin layer, or `None` when the allow-list is empty.
///
/// A `*` entry allows every origin, which is only accepted without credentials.
///
/// Any method and header is allowed. With credentials on, the requested method and headers are
/// mirrored back, since browsers refuse a literal `*` on credentialed responses.
pub fn cors_layer(settings: &CorsSettings) -> anyhow::Result<Option<CorsLayer>> {
    if !settings.is_enabled() {
        return Ok(None);
    }

    let allow_origin = if settings.allow_origins.iter().any(|o| o == "*") {
        anyhow::ensure!(
            !settings.allow_credentials,
            "CORS_ALLOW_ORIGINS=* cannot be combined with CORS_ALLOW_CREDENTIALS=true; \
             list the allowed origins explicitly"
        );
        AllowOrigin::any()
    } else {
        let origins = settings
            .allow_origins
            .iter()
            .map(|o| {
                HeaderValue::from_str(o).with_context(|| format!("invalid CORS origin: {o}"))
            })
            .collect::<anyhow::Result<Vec<_>>>()?;
        AllowOrigin::list(origins)
    };

    let layer = CorsLayer::new().allow_origin(allow_origin);
    let layer = if settings.allow_credentials {
        layer
            .allow_credentials(true)
            .allow_methods(AllowMethods::mirror_request())
            .allow_headers(AllowHeaders::mirror_request())
    } else {
        layer
            .allow_methods(AllowMethods::any())
            .allow_headers(AllowHeaders::any())
    };

    Ok(Some(layer))
}

#[derive(Debug, Serialize)]
struct RootMessage {
    message: &'static str,
}

async fn read_root() -> Json<RootMessage> {
    Json(RootMessage {
        message: ROOT_MESSAGE,
    })
}

async fn healthz() -> &'static str {
    "ok"
}

async fn analyze(
    State(state): State<AppState>,
    body: Result<Json<AnalysisRequest>, JsonRejection>,
) -> Result<Json<AnalysisResponse>, ApiError> {
    let Json(req) = body.map_err(|rejection| {
        tracing::warn!(error = %rejection, "rejected analyze request body");
        ApiError::from(rejection)
    })?;

    Ok(Json(state.pipeline.analyze(&req.query).await))
}
