use utoipa::OpenApi;

/// OpenAPI document served at `/api-docs/openapi.json`
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Profiles API",
        description = "Create, read, update, delete and list user profiles"
    ),
    paths(crate::api::health::ready_handler),
    nest((path = "/users", api = domain_users::ApiDoc)),
    tags((name = "health", description = "Liveness and readiness checks"))
)]
pub struct ApiDoc;
