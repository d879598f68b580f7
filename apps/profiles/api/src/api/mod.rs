use axum::Router;
use axum::routing::get;
use axum_helpers::server::{create_router, health_router};
use std::io;

use crate::openapi::ApiDoc;
use crate::state::AppState;

pub mod health;
pub mod users;

/// API routes without docs or middleware.
pub fn routes(state: &AppState) -> Router {
    Router::new().nest("/users", users::router(state))
}

/// `/ready`, with state applied so it merges into the stateless API router.
pub fn ready_router(state: AppState) -> Router {
    Router::new()
        .route("/ready", get(health::ready_handler))
        .with_state(state)
}

/// The complete application: users API, `/`, `/health` and `/ready`, all
/// behind the shared middleware, plus docs.
pub fn app(state: AppState) -> io::Result<Router> {
    let cors_allowed_origins = state.config.cors_allowed_origins.clone();

    let apis = routes(&state)
        .merge(health_router(state.config.app))
        .merge(ready_router(state));

    create_router::<ApiDoc>(apis, cors_allowed_origins.as_deref())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Config, Environment};
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use core_config::{app_info, server::ServerConfig};
    use database::common::RetryConfig;
    use database::postgres::PostgresConfig;
    use http_body_util::BodyExt;
    use sea_orm::{DatabaseBackend, MockDatabase, Value};
    use std::collections::BTreeMap;
    use tower::ServiceExt;

    fn state(db: MockDatabase) -> AppState {
        AppState {
            config: Config {
                app: app_info!(),
                database: PostgresConfig::new("postgres://localhost/test"),
                server: ServerConfig::default(),
                environment: Environment::Development,
                cors_allowed_origins: None,
                retry: RetryConfig::new(),
            },
            db: db.into_connection(),
        }
    }

    fn select_one() -> MockDatabase {
        MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[BTreeMap::from([("?column?", Value::Int(Some(1)))])]])
    }

    async fn get(app: Router, uri: &str) -> (StatusCode, axum::http::HeaderMap, serde_json::Value) {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, headers, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_ready_when_database_answers() {
        let app = app(state(select_one())).unwrap();

        let (status, _, body) = get(app, "/ready").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ready");
        assert_eq!(body["database"], "connected");
    }

    #[tokio::test]
    async fn test_not_ready_when_database_fails() {
        let app = app(state(MockDatabase::new(DatabaseBackend::Postgres))).unwrap();

        let (status, _, body) = get(app, "/ready").await;

        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body["status"], "not ready");
        assert_eq!(body["database"], "disconnected");
    }

    #[tokio::test]
    async fn test_health_endpoints_carry_request_id_and_security_headers() {
        for (uri, db) in [
            ("/", MockDatabase::new(DatabaseBackend::Postgres)),
            ("/health", MockDatabase::new(DatabaseBackend::Postgres)),
            ("/ready", select_one()),
            ("/ready", MockDatabase::new(DatabaseBackend::Postgres)),
        ] {
            let app = app(state(db)).unwrap();

            let (_, headers, _) = get(app, uri).await;

            assert!(headers.contains_key("x-request-id"), "{} has no x-request-id", uri);
            assert_eq!(headers.get("x-frame-options").unwrap(), "DENY", "{}", uri);
        }
    }

    #[tokio::test]
    async fn test_ready_echoes_incoming_request_id() {
        let app = app(state(select_one())).unwrap();

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/ready")
                    .header("x-request-id", "ready-check-42")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers().get("x-request-id").unwrap(), "ready-check-42");
    }

    #[tokio::test]
    async fn test_health_reports_package() {
        let app = app(state(MockDatabase::new(DatabaseBackend::Postgres))).unwrap();

        let (status, _, body) = get(app, "/health").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
        assert_eq!(body["name"], "profiles_api");
    }

    #[tokio::test]
    async fn test_users_mounted_with_request_id() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<BTreeMap<&str, Value>>::new()]);
        let app = app(state(db)).unwrap();

        let (status, headers, body) = get(app, "/users").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, serde_json::json!([]));
        assert!(headers.contains_key("x-request-id"));
    }

    #[tokio::test]
    async fn test_openapi_documents_users_routes() {
        let app = app(state(MockDatabase::new(DatabaseBackend::Postgres))).unwrap();

        let (status, _, doc) = get(app, "/api-docs/openapi.json").await;

        assert_eq!(status, StatusCode::OK);
        assert!(doc["paths"]["/users"].is_object());
        assert!(doc["paths"]["/users/{id}"].is_object());
        assert!(doc["paths"]["/ready"].is_object());
    }
}
