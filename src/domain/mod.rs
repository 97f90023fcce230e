//! Domain layer: entities, errors, and ports.

/// Domain entities.
pub mod entities;
/// Domain error types.
pub mod errors;
/// Port definitions consumed by the application layer.
pub mod ports;
