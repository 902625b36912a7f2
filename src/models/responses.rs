use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::models::domain::FieldMap;

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}

/// One approved offering as listed by the vendor catalog endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VendorListing {
    pub id: i64,
    pub name: String,
    pub service_type: String,
    pub description: Option<String>,
    pub price: f64,
    pub location: String,
    pub images: Vec<String>,
    pub attributes: FieldMap,
}

/// Requirement summary for one event, keyed by service category
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventSummaryResponse {
    pub event_type: String,
    pub location: Option<String>,
    pub budget: Option<f64>,
    pub attendees: Option<i32>,
    pub privacy: Option<String>,
    pub requirements: BTreeMap<String, FieldMap>,
}
