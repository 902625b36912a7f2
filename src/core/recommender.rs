use std::collections::BTreeMap;

use chrono::NaiveDate;
use thiserror::Error;

use crate::core::{feasibility, profile, similarity, text};
use crate::models::Recommendation;
use crate::services::{Catalog, CatalogError};

/// Default number of recommendations returned per service category
pub const DEFAULT_TOP_K: usize = 5;

/// Errors crossing the engine boundary.
///
/// Everything else degrades to an empty per-service list: a missing
/// requirement row, an empty candidate set, unscorable text, malformed
/// budget or capacity values, and unknown categories all recover locally.
#[derive(Debug, Error)]
pub enum RecommendError {
    #[error("event {0} not found")]
    EventNotFound(i64),

    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

/// Recommendation engine - runs the ranking pipeline once per service line
///
/// # Pipeline stages
/// 1. Category profile resolution (generic fallback for unknown categories)
/// 2. Requirement and candidate retrieval
/// 3. Text normalization into one query string and a corpus
/// 4. TF-IDF / cosine similarity scoring
/// 5. Feasibility filtering (budget, capacity, booking conflicts)
/// 6. Ranking and truncation
#[derive(Debug, Clone)]
pub struct Recommender {
    top_k: usize,
}

impl Recommender {
    pub fn new(top_k: usize) -> Self {
        Self { top_k }
    }

    pub fn with_default_limit() -> Self {
        Self {
            top_k: DEFAULT_TOP_K,
        }
    }

    /// Rank feasible vendors for every service line of an event.
    ///
    /// Service lines are mutually independent; each one rebuilds its own
    /// vector space from the candidates fetched for this call. Only failure
    /// to resolve the event itself aborts the request - the caller receives
    /// either the full mapping or that single error, never a partial mix.
    pub async fn recommend<C: Catalog>(
        &self,
        catalog: &C,
        event_id: i64,
    ) -> Result<BTreeMap<String, Vec<Recommendation>>, RecommendError> {
        let event = catalog
            .event_services(event_id)
            .await?
            .ok_or(RecommendError::EventNotFound(event_id))?;

        tracing::info!(
            "Ranking vendors for event {} across {} service lines",
            event_id,
            event.lines.len()
        );

        let mut results = BTreeMap::new();
        for line in &event.lines {
            let recommendations = self
                .recommend_for_service(catalog, line.id, &line.category, event.event_date)
                .await?;
            results.insert(line.category.clone(), recommendations);
        }

        Ok(results)
    }

    async fn recommend_for_service<C: Catalog>(
        &self,
        catalog: &C,
        event_service_id: i64,
        category: &str,
        event_date: NaiveDate,
    ) -> Result<Vec<Recommendation>, RecommendError> {
        let profile = profile::profile_for(category);

        let requirement = match catalog.requirement(event_service_id, category).await? {
            Some(requirement) => requirement,
            None => {
                tracing::debug!("No requirement data for {}, returning empty list", category);
                return Ok(Vec::new());
            }
        };

        let candidates = catalog.approved_offerings(category).await?;
        if candidates.is_empty() {
            tracing::debug!("No approved offerings in {}", category);
            return Ok(Vec::new());
        }

        let query = text::normalize_record(&requirement.fields, profile.descriptive_fields);
        let corpus: Vec<String> = candidates
            .iter()
            .map(|offering| {
                text::normalize_record(&offering.text_fields(), profile.descriptive_fields)
            })
            .collect();

        // No tokens on either side leaves similarity undefined; skip scoring
        // instead of normalizing a zero vector.
        if query.is_empty() && corpus.iter().all(|document| document.is_empty()) {
            tracing::debug!("No descriptive text anywhere in {}, skipping", category);
            return Ok(Vec::new());
        }

        let scores = similarity::similarity_to_query(&query, &corpus);

        let budget = feasibility::budget_limit(&requirement.fields, profile.budget_field);
        let required = feasibility::required_capacity(&requirement.fields, profile.capacity_field);

        // Conflict lookups stay in candidate order: ties in the final
        // ranking break by first-seen sequence.
        let mut survivors: Vec<Recommendation> = Vec::new();
        for (offering, score) in candidates.iter().zip(&scores) {
            let capacity =
                feasibility::resolve_capacity(&offering.attributes, profile.vendor_capacity_attr);
            let conflict = catalog
                .has_booking_conflict(offering.id, event_date)
                .await?;

            if feasibility::is_feasible(offering.price, budget, capacity, required, conflict) {
                survivors.push(Recommendation {
                    vendor_id: offering.id,
                    name: offering.name.clone(),
                    price: offering.price,
                    capacity,
                    location: offering.location(),
                    images: offering.images.clone(),
                    attributes: offering.attributes.clone(),
                    similarity_score: *score,
                });
            }
        }

        // Stable sort keeps first-seen order on equal scores
        survivors.sort_by(|a, b| {
            b.similarity_score
                .partial_cmp(&a.similarity_score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        survivors.truncate(self.top_k);

        tracing::debug!(
            "{}: {} of {} candidates feasible",
            category,
            survivors.len(),
            candidates.len()
        );

        Ok(survivors)
    }
}

impl Default for Recommender {
    fn default() -> Self {
        Self::with_default_limit()
    }
}
