// Model exports
pub mod domain;
pub mod responses;

pub use domain::{
    Capacity, EventServices, FieldMap, Offering, Recommendation, Requirement, ServiceLine,
};
pub use responses::{ErrorResponse, EventSummaryResponse, HealthResponse, VendorListing};
