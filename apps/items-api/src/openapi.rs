//! OpenAPI documentation configuration

use utoipa::OpenApi;

use crate::api::ping::PingResponse;

/// Combined OpenAPI documentation for Items API
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Items API",
        version = "0.1.0",
        description = "Create, list, update and delete priced items",
        license(name = "MIT")
    ),
    servers(
        (url = "http://localhost:8080", description = "Local development server")
    ),
    paths(crate::api::ping::ping),
    components(schemas(PingResponse)),
    nest(
        (path = "/items", api = domain_items::ApiDoc)
    ),
    tags(
        (name = "Ping", description = "Connectivity check"),
        (name = "Items", description = "Item catalogue")
    )
)]
pub struct ApiDoc;
