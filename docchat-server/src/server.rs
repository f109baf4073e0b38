use anyhow::{Context, anyhow};
use axum::{
    Extension, Router,
    extract::DefaultBodyLimit,
    http::{HeaderValue, Method, StatusCode, header},
    middleware,
    response::IntoResponse,
    routing::get,
    serve,
};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use shared::config::server::{Config, LogFormat};
use std::{
    path::PathBuf,
    sync::{Arc, OnceLock},
};
use tokio::net::TcpListener;
use tower_http::{
    cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer},
    services::{ServeDir, ServeFile},
};
use tracing::{error, info, level_filters::LevelFilter, warn};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt;

use crate::{
    app_state::AppState,
    middleware::request_context::{self, RequestIdState},
    routes,
    services::{AssistantRuntime, AssistantService},
    tracer,
};

static PROMETHEUS_HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

/// Handle of the process-wide Prometheus recorder, installed on first use.
pub fn metrics_handle() -> PrometheusHandle {
    PROMETHEUS_HANDLE
        .get_or_init(|| {
            let recorder = PrometheusBuilder::new().build_recorder();
            let handle = recorder.handle();
            if metrics::set_global_recorder(recorder).is_err() {
                warn!("a metrics recorder was already installed; /metrics will be empty");
            }
            handle
        })
        .clone()
}

async fn metrics_endpoint(Extension(handle): Extension<PrometheusHandle>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(
            header::CONTENT_TYPE,
            HeaderValue::from_static("text/plain; version=0.0.4"),
        )],
        handle.render(),
    )
}

/// Initializes the tracing subscriber for logging using the provided configuration.
///
/// Returns the configured default level. A subscriber installed earlier is
/// left in place.
pub fn initialize_tracing(config: &Config) -> String {
    let env_filter = build_env_filter(config);

    let fmt_builder = fmt::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_level(true)
        .with_thread_ids(false)
        .with_thread_names(false);

    let installed = if matches!(config.logging.format, LogFormat::Json) {
        fmt_builder.json().with_ansi(false).try_init()
    } else {
        fmt_builder.with_ansi(true).try_init()
    };
    if installed.is_err() {
        warn!("tracing subscriber already installed");
    }

    config.logging.level.clone()
}

fn build_env_filter(config: &Config) -> EnvFilter {
    let default_level = config
        .logging
        .level
        .parse::<LevelFilter>()
        .unwrap_or(LevelFilter::INFO);

    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::builder()
            .with_default_directive(default_level.into())
            .from_env_lossy()
    })
}

/// Creates the CORS layer; an empty origin list allows any origin.
pub fn create_cors_layer(config: &Config) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods(AllowMethods::list([Method::GET, Method::POST, Method::OPTIONS]))
        .allow_headers(AllowHeaders::any());

    if config.server.allowed_origins.is_empty() {
        cors.allow_origin(AllowOrigin::any())
    } else {
        let origins = config
            .server
            .allowed_origins
            .iter()
            .filter_map(|origin| HeaderValue::from_str(origin).ok())
            .collect::<Vec<_>>();
        cors.allow_origin(AllowOrigin::list(origins))
    }
}

/// Serves the compiled web client; unknown paths get the SPA index.
pub fn create_static_service<S>(static_dir: PathBuf, spa_index: PathBuf) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    Router::new().fallback_service(
        ServeDir::new(static_dir)
            .append_index_html_on_directories(true)
            .fallback(ServeFile::new(spa_index)),
    )
}

/// Creates the main application router with all middleware and routes.
pub fn create_app_router(state: Arc<AppState>, metrics_handle: PrometheusHandle) -> Router {
    let config = Arc::clone(&state.config);
    let static_files_service =
        create_static_service(config.web.static_dir.clone(), config.web.spa_index.clone());
    let request_id_state = RequestIdState::from_config(&config);

    Router::new()
        .merge(routes::chat::create_router_chat())
        .merge(routes::health::create_health_router())
        .route("/metrics", get(metrics_endpoint))
        .merge(static_files_service)
        .layer(DefaultBodyLimit::max(config.uploads.max_body_bytes))
        .layer(Extension(metrics_handle))
        .layer(create_cors_layer(&config))
        .layer(tracer::create_trace_layer())
        .layer(middleware::from_fn_with_state(
            request_id_state,
            request_context::assign_request_id,
        ))
        .with_state(state)
}

/// Resolves when Ctrl+C is received.
pub async fn create_shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        error!(error = %err, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutting down...");
}

/// Starts the server with the resolved configuration and serves until Ctrl+C.
///
/// # Errors
/// Returns an error when the configuration is invalid, the upload directory
/// or assistant cannot be prepared, or the listener fails.
pub async fn run(config: Config) -> anyhow::Result<()> {
    initialize_tracing(&config);
    info!("Starting server...");

    config
        .validate()
        .map_err(|errors| anyhow!("invalid configuration: {}", errors.join("; ")))?;

    let metrics_handle = metrics_handle();
    let config = Arc::new(config);

    let assistant: Arc<dyn AssistantRuntime> =
        Arc::new(AssistantService::new(config.llm.clone()).context("failed to build assistant")?);
    let state = Arc::new(AppState::new(Arc::clone(&config), assistant));
    state
        .uploads
        .ensure_directory()
        .await
        .with_context(|| format!("failed to create {}", config.uploads.directory.display()))?;

    let app = create_app_router(state, metrics_handle);

    let addr = config.bind_address();
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!("Listening on {}", addr);

    serve(listener, app)
        .with_graceful_shutdown(create_shutdown_signal())
        .await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::AssistantError;
    use async_trait::async_trait;
    use axum::body::{Body, to_bytes};
    use axum::http::Request;
    use serde_json::Value;
    use std::{
        io::{self, Write},
        sync::Mutex,
    };
    use tempfile::TempDir;
    use tower::ServiceExt;
    use tracing::Subscriber;
    use tracing_subscriber::fmt::MakeWriter;

    #[derive(Clone)]
    struct BufferMakeWriter {
        buffer: Arc<Mutex<Vec<u8>>>,
    }

    struct BufferWriter {
        buffer: Arc<Mutex<Vec<u8>>>,
    }

    impl<'a> MakeWriter<'a> for BufferMakeWriter {
        type Writer = BufferWriter;

        fn make_writer(&'a self) -> Self::Writer {
            BufferWriter {
                buffer: Arc::clone(&self.buffer),
            }
        }
    }

    impl Write for BufferWriter {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.buffer.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn subscriber_with_writer<W>(config: &Config, writer: W) -> Box<dyn Subscriber + Send + Sync>
    where
        W: for<'writer> MakeWriter<'writer> + Send + Sync + 'static,
    {
        let env_filter = super::build_env_filter(config);
        let builder = fmt::fmt()
            .with_env_filter(env_filter)
            .with_target(false)
            .with_level(true)
            .with_thread_ids(false)
            .with_thread_names(false)
            .with_writer(writer);

        if matches!(config.logging.format, LogFormat::Json) {
            Box::new(builder.json().with_ansi(false).finish())
        } else {
            Box::new(builder.with_ansi(false).finish())
        }
    }

    fn first_line(config: &Config) -> String {
        let buffer = Arc::new(Mutex::new(Vec::new()));
        let subscriber = subscriber_with_writer(
            config,
            BufferMakeWriter {
                buffer: Arc::clone(&buffer),
            },
        );
        let dispatch = tracing::dispatcher::Dispatch::new(subscriber);
        tracing::dispatcher::with_default(&dispatch, || {
            info!(event = "log_test", "log entry");
        });
        let contents = String::from_utf8(buffer.lock().unwrap().clone()).unwrap();
        contents
            .lines()
            .find(|line| !line.trim().is_empty())
            .unwrap()
            .to_string()
    }

    #[test]
    fn initialize_tracing_returns_configured_level() {
        let config = Config::with_defaults();
        assert_eq!(initialize_tracing(&config), config.logging.level);
        // A second call must not panic.
        assert_eq!(initialize_tracing(&config), config.logging.level);
    }

    #[test]
    fn json_log_format_produces_json_output() {
        let mut config = Config::with_defaults();
        config.logging.format = LogFormat::Json;

        let value: Value = serde_json::from_str(&first_line(&config)).unwrap();
        assert_eq!(value["fields"]["message"], "log entry");
        assert_eq!(value["fields"]["event"], "log_test");
    }

    #[test]
    fn text_log_format_emits_plain_events() {
        let config = Config::with_defaults();
        let line = first_line(&config);
        assert!(serde_json::from_str::<Value>(&line).is_err());
        assert!(line.contains("log entry"));
    }

    struct SilentAssistant;

    #[async_trait]
    impl AssistantRuntime for SilentAssistant {
        async fn chat(&self, _prompt: &str, _thread_id: &str) -> Result<String, AssistantError> {
            Err(AssistantError::EmptyAnswer)
        }
    }

    fn app_with_static(dir: &TempDir) -> Router {
        std::fs::write(dir.path().join("index.html"), "<html>docchat</html>").unwrap();
        std::fs::write(dir.path().join("app.js"), "console.log(1)").unwrap();

        let mut config = Config::with_defaults();
        config.web.static_dir = dir.path().to_path_buf();
        config.web.spa_index = dir.path().join("index.html");
        config.uploads.directory = dir.path().join("uploads");
        let state = Arc::new(AppState::new(Arc::new(config), Arc::new(SilentAssistant)));
        create_app_router(state, super::metrics_handle())
    }

    async fn get_body(app: Router, uri: &str) -> (StatusCode, String) {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn metrics_endpoint_returns_prometheus_payload() {
        let dir = TempDir::new().unwrap();
        let app = app_with_static(&dir);

        let (status, _) = get_body(app.clone(), "/healthz").await;
        assert_eq!(status, StatusCode::OK);

        let response = app
            .oneshot(Request::builder().uri("/metrics").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).unwrap(),
            "text/plain; version=0.0.4"
        );
    }

    #[tokio::test]
    async fn static_assets_and_spa_fallback() {
        let dir = TempDir::new().unwrap();
        let app = app_with_static(&dir);

        let (status, body) = get_body(app.clone(), "/app.js").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "console.log(1)");

        let (status, body) = get_body(app, "/some/client/route").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "<html>docchat</html>");
    }

    #[tokio::test]
    async fn responses_carry_request_id() {
        let dir = TempDir::new().unwrap();
        let response = app_with_static(&dir)
            .oneshot(Request::builder().uri("/healthz").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert!(response.headers().contains_key("x-request-id"));
    }

    #[tokio::test]
    async fn cors_echoes_configured_origin() {
        let mut config = Config::with_defaults();
        config.server.allowed_origins = vec!["http://localhost:8081".into()];
        let app: Router = Router::new()
            .route("/healthz", get(|| async { "ok" }))
            .layer(create_cors_layer(&config));

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/healthz")
                    .header(header::ORIGIN, "http://localhost:8081")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(
            response
                .headers()
                .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
                .unwrap(),
            "http://localhost:8081"
        );
    }
}
