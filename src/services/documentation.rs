use utoipa::OpenApi;

#[derive(OpenApi)]
/// Aggregated OpenAPI specification for the debate rooms backend.
#[openapi(
    paths(
        crate::routes::health::healthcheck,
        crate::routes::rooms::list_active_rooms,
        crate::routes::rotation::rotate_from_pool,
        crate::routes::rotation::rotate_generated,
    ),
    components(
        schemas(
            crate::dto::health::HealthResponse,
            crate::dto::room::RoomSummary,
            crate::dto::rotation::RotationResponse,
            crate::dto::rotation::TopicSummary,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "rooms", description = "Read-only debate room listings"),
        (name = "rotation", description = "Daily topic rotation triggers"),
    )
)]
pub struct ApiDoc;
