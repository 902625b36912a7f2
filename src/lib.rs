//! Planora Reco - vendor recommendation service for the Planora event
//! planning platform
//!
//! For each service category attached to an event, the engine converts the
//! event's requirement record and every approved vendor offering into
//! normalized text, scores them by TF-IDF cosine similarity, drops
//! candidates that fail the budget, capacity, or booking-availability
//! rules, and returns the top-ranked shortlist per category.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use crate::core::{normalize_record, similarity_to_query, RecommendError, Recommender};
pub use crate::models::{Capacity, Offering, Recommendation, Requirement};
