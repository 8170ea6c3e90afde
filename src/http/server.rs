//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with the single `GET /` handler
//! - Wire up middleware (tracing, timeout, request ID)
//! - Build the shared outbound HTTP client
//! - Serve until the shutdown signal fires

use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    routing::get,
    Json, Router,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower::ServiceBuilder;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use crate::config::MapperConfig;
use crate::document::RoutingDocument;
use crate::error::MapperError;
use crate::http::request;
use crate::http::upstream::SourceClient;
use crate::mapper::Mapper;
use crate::observability::metrics;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub source: Arc<SourceClient>,
    pub mapper: Arc<Mapper>,
}

/// HTTP server for the mapper.
pub struct HttpServer {
    router: Router,
}

impl HttpServer {
    /// Create a new HTTP server with the given (validated) configuration.
    pub fn new(config: MapperConfig) -> Result<Self, MapperError> {
        let base_endpoint = config
            .upstream
            .base_endpoint
            .clone()
            .ok_or_else(|| MapperError::Config("base endpoint is missing".to_string()))?;

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.upstream.request_timeout_secs))
            .build()
            .map_err(MapperError::Client)?;

        let source = Arc::new(SourceClient::new(http.clone(), &base_endpoint));
        let mapper = Arc::new(Mapper::from_config(&config, http, &base_endpoint));

        tracing::info!(
            source = %source.url(),
            rules = ?mapper.pipeline().rule_names(),
            address_resolution = mapper.resolves_addresses(),
            "Mapper configured"
        );

        let router = Self::build_router(&config, AppState { source, mapper });
        Ok(Self { router })
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(config: &MapperConfig, state: AppState) -> Router {
        Router::new()
            .route("/", get(map_handler))
            .with_state(state)
            .layer(TimeoutLayer::with_status_code(
                StatusCode::GATEWAY_TIMEOUT,
                Duration::from_secs(config.listener.request_timeout_secs),
            ))
            .layer(
                ServiceBuilder::new()
                    .layer(request::set_request_id_layer())
                    .layer(TraceLayer::new_for_http())
                    .layer(request::propagate_request_id_layer()),
            )
    }

    /// Run the server on `listener` until `shutdown` fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Fetch the source document, map it, and return the result.
async fn map_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<RoutingDocument>, MapperError> {
    let start = Instant::now();
    let request_id = request::request_id(&headers).to_string();

    let result = match state.source.fetch().await {
        Ok(doc) => state.mapper.map(doc).await,
        Err(e) => Err(e),
    };

    match result {
        Ok(doc) => {
            tracing::info!(
                request_id = %request_id,
                routers = doc.http.routers.len(),
                services = doc.http.services.len(),
                elapsed_ms = start.elapsed().as_millis() as u64,
                "Served mapped document"
            );
            metrics::record_request(200, start);
            Ok(Json(doc))
        }
        Err(e) => {
            tracing::error!(
                request_id = %request_id,
                error = %e,
                error_type = e.error_type(),
                "Mapping failed"
            );
            metrics::record_request(e.status_code().as_u16(), start);
            Err(e)
        }
    }
}
