use super::shutdown::ShutdownCoordinator;
use crate::errors::handlers::{method_not_allowed, not_found};
use crate::http::{
    MakeRequestUuid, create_cors_layer, create_permissive_cors_layer, parse_origins,
    request_id, security_headers, trace_layer,
};
use axum::{Router, middleware};
use core_config::server::ServerConfig;
use std::future::{Future, IntoFuture};
use std::io;
use tower_http::compression::CompressionLayer;
use tower_http::request_id::{PropagateRequestIdLayer, SetRequestIdLayer};
use tracing::{info, warn};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Combines API routes with documentation and cross-cutting middleware.
///
/// - Swagger UI at `/swagger-ui`, spec at `/api-docs/openapi.json`
/// - `x-request-id` set (UUID v4 when absent), traced and echoed back
/// - security headers, CORS and response compression
/// - JSON 404/405 fallbacks
///
/// `cors_allowed_origins` is a comma separated origin list. `None` allows
/// any origin.
///
/// # Errors
/// Returns `InvalidInput` if an origin is not a valid header value or the
/// list is empty.
///
/// # Example
/// ```ignore
/// use axum::Router;
/// use utoipa::OpenApi;
/// use axum_helpers::server::create_router;
///
/// #[derive(OpenApi)]
/// #[openapi(paths(/* your paths */))]
/// struct ApiDoc;
///
/// let api_routes = Router::new().nest("/users", users_router);
/// let router = create_router::<ApiDoc>(api_routes, None)?;
/// ```
pub fn create_router<T>(apis: Router, cors_allowed_origins: Option<&str>) -> io::Result<Router>
where
    T: OpenApi + 'static,
{
    let cors_layer = match cors_allowed_origins {
        Some(raw) => {
            let origins = parse_origins(raw).map_err(|e| {
                io::Error::new(
                    io::ErrorKind::InvalidInput,
                    format!("Invalid CORS_ALLOWED_ORIGIN value: {}", e),
                )
            })?;

            if origins.is_empty() {
                return Err(io::Error::new(
                    io::ErrorKind::InvalidInput,
                    "CORS_ALLOWED_ORIGIN cannot be empty",
                ));
            }

            info!("CORS configured with allowed origins: {}", raw);
            create_cors_layer(origins)
        }
        None => {
            info!("CORS_ALLOWED_ORIGIN not set, allowing any origin");
            create_permissive_cors_layer()
        }
    };

    let router = Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", T::openapi()))
        .merge(apis)
        .fallback(not_found)
        .method_not_allowed_fallback(method_not_allowed)
        .layer(CompressionLayer::new())
        .layer(cors_layer)
        .layer(middleware::from_fn(security_headers))
        .layer(PropagateRequestIdLayer::new(request_id::header()))
        .layer(trace_layer())
        // Outermost, so the trace span and the propagated header see the generated id.
        .layer(SetRequestIdLayer::new(request_id::header(), MakeRequestUuid));

    Ok(router)
}

/// Serve `router` until SIGINT/SIGTERM, then drain and clean up.
///
/// After the signal, in-flight requests get up to
/// `server_config.shutdown_timeout` to finish. `cleanup` (closing pools and
/// the like) runs once serving stops, under the same timeout.
pub async fn create_production_app<F>(
    router: Router,
    server_config: &ServerConfig,
    cleanup: F,
) -> io::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let shutdown_timeout = server_config.shutdown_timeout;
    let coordinator = ShutdownCoordinator::new();

    let listener = tokio::net::TcpListener::bind(server_config.address()).await?;
    info!("Server starting on {}", listener.local_addr()?);

    let signal_handle = coordinator.clone();
    tokio::spawn(async move { signal_handle.wait_for_signal().await });

    let graceful = coordinator.clone();
    let server = axum::serve(listener, router.into_make_service())
        .with_graceful_shutdown(async move { graceful.wait().await })
        .into_future();
    tokio::pin!(server);

    let serve_result = tokio::select! {
        result = &mut server => result,
        _ = async {
            coordinator.wait().await;
            tokio::time::sleep(shutdown_timeout).await;
        } => {
            warn!(
                "In-flight requests did not finish within {:?}, forcing shutdown",
                shutdown_timeout
            );
            Ok(())
        }
    };

    if let Err(e) = &serve_result {
        tracing::error!("Server encountered an error: {:?}", e);
    }

    info!("Starting cleanup tasks (timeout: {:?})", shutdown_timeout);
    match tokio::time::timeout(shutdown_timeout, cleanup).await {
        Ok(()) => info!("Cleanup completed successfully"),
        Err(_) => warn!(
            "Cleanup exceeded timeout of {:?}, forcing shutdown",
            shutdown_timeout
        ),
    }

    serve_result
}
