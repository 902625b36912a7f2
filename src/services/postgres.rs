use std::time::Duration;

use chrono::NaiveDate;
use serde_json::Value;
use sqlx::postgres::PgPoolOptions;
use sqlx::{PgPool, Row};

use crate::models::{EventServices, FieldMap, Offering, Requirement, ServiceLine};
use crate::services::{Catalog, CatalogError};

/// Core event row plus its promoted price/seats, for the summary endpoint.
#[derive(Debug, Clone)]
pub struct EventHeader {
    pub event_type: String,
    pub location: Option<String>,
    pub price: Option<f64>,
    pub seats: Option<i32>,
    pub privacy: Option<String>,
}

/// PostgreSQL-backed catalog
///
/// Owns the connection pool and every query against the event/vendor
/// schema. Requirement rows live in one table per category
/// (`venue_selection_data`, `catering_cuisine_data`, ...), so they are read
/// as JSON field maps rather than typed rows.
pub struct PostgresClient {
    pool: PgPool,
}

impl PostgresClient {
    /// Create a new PostgreSQL client from a connection string
    pub async fn new(
        database_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> Result<Self, CatalogError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .min_connections(min_connections)
            .acquire_timeout(Duration::from_secs(5))
            .idle_timeout(Duration::from_secs(600))
            .test_before_acquire(true)
            .connect(database_url)
            .await?;

        // Run migrations on startup
        sqlx::migrate!("./migrations").run(&pool).await?;

        Ok(Self { pool })
    }

    /// Create a new PostgreSQL client from settings
    pub async fn from_settings(
        url: &str,
        max_connections: Option<u32>,
        min_connections: Option<u32>,
    ) -> Result<Self, CatalogError> {
        tracing::info!("Connecting to PostgreSQL");

        Self::new(
            url,
            max_connections.unwrap_or(10),
            min_connections.unwrap_or(1),
        )
        .await
    }

    /// Health check for the database connection
    pub async fn health_check(&self) -> Result<bool, CatalogError> {
        sqlx::query("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map(|_| true)
            .map_err(Into::into)
    }

    /// Event header for the requirement summary endpoint
    pub async fn event_header(&self, event_id: i64) -> Result<Option<EventHeader>, CatalogError> {
        let query = r#"
            SELECT e.event_type, e.event_location, ep.price, ep.seats, e.privacy
            FROM events e
            LEFT JOIN event_promotion_data ep ON ep.event_id = e.id
            WHERE e.id = $1
        "#;

        let row = sqlx::query(query)
            .bind(event_id)
            .fetch_optional(&self.pool)
            .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        Ok(Some(EventHeader {
            event_type: row.try_get("event_type")?,
            location: row.try_get("event_location")?,
            price: row.try_get("price")?,
            seats: row.try_get("seats")?,
            privacy: row.try_get("privacy")?,
        }))
    }

    /// Every approved offering across categories, for the vendor listing
    /// endpoint.
    pub async fn all_approved_offerings(&self) -> Result<Vec<Offering>, CatalogError> {
        let query = r#"
            SELECT vs.id, vs.name, s.name AS category, vs.description, vs.price,
                   vs.city, vs.address, vs.images,
                   COALESCE(
                       json_object_agg(sa.attribute_name, sa.attribute_value)
                           FILTER (WHERE sa.attribute_name IS NOT NULL),
                       '{}'::json
                   ) AS attributes
            FROM vendor_service vs
            JOIN services s ON s.id = vs.service_id
            LEFT JOIN service_attributes sa ON sa.vservice_id = vs.id
            WHERE vs.status_id = (SELECT id FROM status WHERE status_title = 'Approved')
            GROUP BY vs.id, s.name
            ORDER BY vs.id
        "#;

        let rows = sqlx::query(query).fetch_all(&self.pool).await?;

        let offerings = rows
            .iter()
            .map(offering_from_row)
            .collect::<Result<Vec<_>, _>>()?;

        tracing::debug!("Fetched {} approved offerings", offerings.len());

        Ok(offerings)
    }

    /// Requirement table name for a category, e.g. "Catering & Cuisine" ->
    /// `catering_cuisine_data`. Category names come from the services table,
    /// but the name is interpolated into SQL, so reject anything that is not
    /// a plain identifier.
    fn requirement_table(category: &str) -> Result<String, CatalogError> {
        let table = format!(
            "{}_data",
            category.to_lowercase().replace(" & ", "_").replace(' ', "_")
        );

        let valid = !table.starts_with(|c: char| c.is_ascii_digit())
            && table
                .chars()
                .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_');
        if valid {
            Ok(table)
        } else {
            Err(CatalogError::InvalidInput(format!(
                "category {:?} does not map to a requirement table",
                category
            )))
        }
    }
}

/// Build an [`Offering`] from one aggregated vendor row.
fn offering_from_row(row: &sqlx::postgres::PgRow) -> Result<Offering, CatalogError> {
    let images: Value = row.try_get("images")?;
    let attributes: Value = row.try_get("attributes")?;

    Ok(Offering {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        category: row.try_get("category")?,
        description: row.try_get("description")?,
        price: row.try_get("price")?,
        city: row.try_get("city")?,
        address: row.try_get("address")?,
        images: serde_json::from_value(images).unwrap_or_default(),
        attributes: serde_json::from_value(attributes).unwrap_or_default(),
    })
}

impl Catalog for PostgresClient {
    async fn event_services(&self, event_id: i64) -> Result<Option<EventServices>, CatalogError> {
        let query = r#"
            SELECT e.event_date, s.name AS category, es.id AS service_line_id
            FROM events e
            JOIN event_services es ON es.event_id = e.id
            JOIN services s ON s.id = es.service_id
            WHERE e.id = $1
            ORDER BY es.id
        "#;

        let rows = sqlx::query(query)
            .bind(event_id)
            .fetch_all(&self.pool)
            .await?;

        let Some(first) = rows.first() else {
            return Ok(None);
        };

        let event_date: NaiveDate = first.try_get("event_date")?;
        let lines = rows
            .iter()
            .map(|row| {
                Ok(ServiceLine {
                    id: row.try_get("service_line_id")?,
                    category: row.try_get("category")?,
                })
            })
            .collect::<Result<Vec<_>, CatalogError>>()?;

        Ok(Some(EventServices { event_date, lines }))
    }

    async fn requirement(
        &self,
        event_service_id: i64,
        category: &str,
    ) -> Result<Option<Requirement>, CatalogError> {
        let table = Self::requirement_table(category)?;
        let query = format!(
            "SELECT row_to_json(t)::jsonb AS fields FROM {} t WHERE t.event_service_id = $1",
            table
        );

        let row = match sqlx::query(&query)
            .bind(event_service_id)
            .fetch_optional(&self.pool)
            .await
        {
            Ok(row) => row,
            // 42P01: undefined table. A category without a requirement table
            // degrades to "no requirement data" instead of failing the event.
            Err(sqlx::Error::Database(e)) if e.code().as_deref() == Some("42P01") => {
                tracing::warn!("No requirement table {} for category {}", table, category);
                return Ok(None);
            }
            Err(e) => return Err(e.into()),
        };

        let Some(row) = row else {
            return Ok(None);
        };

        let fields: Value = row.try_get("fields")?;
        let fields: FieldMap = serde_json::from_value(fields).unwrap_or_default();

        Ok(Some(Requirement::new(category, fields)))
    }

    async fn approved_offerings(&self, category: &str) -> Result<Vec<Offering>, CatalogError> {
        // attribute_value is cast to text so every attribute arrives as a
        // JSON string; the normalizer and capacity parser strip the quoting.
        let query = r#"
            SELECT vs.id, vs.name, s.name AS category, vs.description, vs.price,
                   vs.city, vs.address, vs.images,
                   COALESCE(
                       json_object_agg(sa.attribute_name, sa.attribute_value::text)
                           FILTER (WHERE sa.attribute_name IS NOT NULL),
                       '{}'::json
                   ) AS attributes
            FROM vendor_service vs
            JOIN services s ON s.id = vs.service_id
            LEFT JOIN service_attributes sa ON sa.vservice_id = vs.id
            WHERE s.name = $1
              AND vs.status_id = (SELECT id FROM status WHERE status_title = 'Approved')
            GROUP BY vs.id, s.name
            ORDER BY vs.id
        "#;

        let rows = sqlx::query(query)
            .bind(category)
            .fetch_all(&self.pool)
            .await?;

        let offerings = rows
            .iter()
            .map(offering_from_row)
            .collect::<Result<Vec<_>, _>>()?;

        tracing::debug!("{}: {} approved candidates", category, offerings.len());

        Ok(offerings)
    }

    async fn has_booking_conflict(
        &self,
        offering_id: i64,
        date: NaiveDate,
    ) -> Result<bool, CatalogError> {
        let query = r#"
            SELECT EXISTS(
                SELECT 1 FROM booking
                WHERE vservice_id = $1
                  AND booking_date::date = $2
            ) AS conflicted
        "#;

        let row = sqlx::query(query)
            .bind(offering_id)
            .bind(date)
            .fetch_one(&self.pool)
            .await?;

        Ok(row.try_get("conflicted")?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_requirement_table_names() {
        assert_eq!(
            PostgresClient::requirement_table("Venue Selection").unwrap(),
            "venue_selection_data"
        );
        assert_eq!(
            PostgresClient::requirement_table("Catering & Cuisine").unwrap(),
            "catering_cuisine_data"
        );
        assert_eq!(
            PostgresClient::requirement_table("Invitations & Announcements").unwrap(),
            "invitations_announcements_data"
        );
    }

    #[test]
    fn test_requirement_table_rejects_non_identifiers() {
        assert!(PostgresClient::requirement_table("services; drop table events").is_err());
        assert!(PostgresClient::requirement_table("Café Catering").is_err());
    }
}
