//! HTTP server implementation

use axum::{middleware::from_fn, routing::get, Router};
use std::net::SocketAddr;
use tower_http::cors::CorsLayer;
use tracing::info;

use super::handlers::{delete_key, get_key, list_keys, put_key, AppState};
use super::middleware::{log_requests, security_headers};
use crate::config::Config;

/// Build the application router
///
/// Key routes are mounted under `config.api_path` when one is configured.
pub fn build_router(config: &Config, kv: AppState) -> Router {
    let routes = Router::new()
        .route("/", get(list_keys))
        .route("/:key", get(get_key).put(put_key).delete(delete_key));

    // axum does not allow nesting at the root, and a nested "/" only matches
    // the bare prefix, so the trailing-slash listing is registered explicitly
    let app = if config.api_path.is_empty() {
        routes
    } else {
        Router::new()
            .nest(&config.api_path, routes)
            .route(&format!("{}/", config.api_path), get(list_keys))
    };
    let mut app = app.with_state(kv);

    for layer in security_headers() {
        app = app.layer(layer);
    }

    app.layer(CorsLayer::permissive()).layer(from_fn(log_requests))
}

/// Run the web server until a shutdown signal arrives
pub async fn run_web_server(config: &Config, kv: AppState) -> anyhow::Result<()> {
    let addr = config.bind_addr()?;
    let app = build_router(config, kv);

    // Start the server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Key-value API available at http://{}{}/", addr, config.api_path);

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    info!("Server stopped");
    Ok(())
}

/// Resolve on Ctrl-C or, on Unix, SIGTERM
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutting down server...");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::KvStore;
    use axum::{
        body::{to_bytes, Body},
        http::{header, Method, Request, StatusCode},
    };
    use std::sync::Arc;
    use tower::ServiceExt;

    fn config_with_prefix(api_path: &str) -> Config {
        Config {
            api_path: api_path.to_string(),
            ..Config::default()
        }
    }

    #[tokio::test]
    async fn test_prefixed_routes() {
        let app = build_router(&config_with_prefix("/kv"), Arc::new(KvStore::new()));

        let put = Request::builder()
            .method(Method::PUT)
            .uri("/kv/key1")
            .body(Body::from("value1"))
            .unwrap();
        let response = app.clone().oneshot(put).await.unwrap();
        assert_eq!(response.status(), StatusCode::ACCEPTED);

        let get = Request::builder().uri("/kv/key1").body(Body::empty()).unwrap();
        let response = app.clone().oneshot(get).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        for uri in ["/kv", "/kv/"] {
            let list = Request::builder().uri(uri).body(Body::empty()).unwrap();
            let response = app.clone().oneshot(list).await.unwrap();
            assert_eq!(response.status(), StatusCode::OK, "listing at {}", uri);

            let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
            let keys: Vec<String> = serde_json::from_slice(&bytes).unwrap();
            assert_eq!(keys, vec!["key1".to_string()]);
        }

        let outside = Request::builder().uri("/key1").body(Body::empty()).unwrap();
        let response = app.oneshot(outside).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_security_headers() {
        let app = build_router(&Config::default(), Arc::new(KvStore::new()));

        let request = Request::builder().uri("/").body(Body::empty()).unwrap();
        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let headers = response.headers();
        assert_eq!(headers[header::X_CONTENT_TYPE_OPTIONS], "nosniff");
        assert_eq!(headers[header::REFERRER_POLICY], "no-referrer");
        assert_eq!(headers[header::STRICT_TRANSPORT_SECURITY], "max-age=31536000");
        assert!(headers.contains_key(header::CONTENT_SECURITY_POLICY));
        assert!(headers.contains_key("permissions-policy"));
    }

    #[tokio::test]
    async fn test_headers_on_errors() {
        let app = build_router(&Config::default(), Arc::new(KvStore::new()));

        let request = Request::builder().uri("/missing").body(Body::empty()).unwrap();
        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(response.headers()[header::X_CONTENT_TYPE_OPTIONS], "nosniff");
    }
}
