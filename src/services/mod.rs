/// OpenAPI documentation generation.
pub mod documentation;
/// Health check service.
pub mod health_service;
/// Read-only projections over the room collection.
pub mod room_service;
/// Daily topic rotation engine.
pub mod rotation_service;
