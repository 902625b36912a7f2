// Service exports
pub mod postgres;

pub use postgres::PostgresClient;

use chrono::NaiveDate;
use thiserror::Error;

use crate::models::{EventServices, Offering, Requirement};

/// Errors that can occur in the storage layer
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("migration error: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),

    #[error("invalid input: {0}")]
    InvalidInput(String),
}

/// Read-only storage capabilities the recommendation engine consumes.
///
/// The engine never writes: every method is a synchronous-in-spirit read
/// that either completes or fails. Production uses [`PostgresClient`]; tests
/// implement the trait over in-memory fixtures.
#[allow(async_fn_in_trait)]
pub trait Catalog {
    /// The event's date and its ordered service lines, or `None` when the
    /// event or its service list cannot be resolved.
    async fn event_services(&self, event_id: i64) -> Result<Option<EventServices>, CatalogError>;

    /// The category-specific requirement row attached to one service line,
    /// or `None` when no row exists.
    async fn requirement(
        &self,
        event_service_id: i64,
        category: &str,
    ) -> Result<Option<Requirement>, CatalogError>;

    /// All approved offerings in a category. The returned order defines the
    /// ranking tie-break precedence and must be stable across calls.
    async fn approved_offerings(&self, category: &str) -> Result<Vec<Offering>, CatalogError>;

    /// Whether an offering already has a booking on the given date.
    async fn has_booking_conflict(
        &self,
        offering_id: i64,
        date: NaiveDate,
    ) -> Result<bool, CatalogError>;
}
