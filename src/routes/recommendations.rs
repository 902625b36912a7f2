use actix_web::{web, HttpResponse, Responder};

use crate::core::RecommendError;
use crate::models::{ErrorResponse, HealthResponse};
use crate::routes::AppState;

/// Configure recommendation routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health_check)).route(
        "/events/{event_id}/recommendations",
        web::get().to(get_recommendations),
    );
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let db_healthy = state.postgres.health_check().await.unwrap_or(false);

    let status = if db_healthy { "healthy" } else { "degraded" };

    HttpResponse::Ok().json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// Ranked vendor shortlist per service category
///
/// GET /api/events/{event_id}/recommendations
///
/// Returns a mapping of category name to at most five recommendations,
/// sorted by similarity score descending. Categories without feasible
/// vendors map to empty lists; an unknown event is a 404.
async fn get_recommendations(
    state: web::Data<AppState>,
    path: web::Path<i64>,
) -> impl Responder {
    let event_id = path.into_inner();

    tracing::info!("Recommendation request for event {}", event_id);

    match state
        .recommender
        .recommend(state.postgres.as_ref(), event_id)
        .await
    {
        Ok(recommendations) => {
            tracing::info!(
                "Returning recommendations for event {} ({} categories)",
                event_id,
                recommendations.len()
            );
            HttpResponse::Ok().json(recommendations)
        }
        Err(RecommendError::EventNotFound(_)) => HttpResponse::NotFound().json(ErrorResponse {
            error: "Event not found".to_string(),
            message: format!("No services found for event {}", event_id),
            status_code: 404,
        }),
        Err(e) => {
            tracing::error!("Recommendation failed for event {}: {}", event_id, e);
            HttpResponse::InternalServerError().json(ErrorResponse {
                error: "Recommendation failed".to_string(),
                message: e.to_string(),
                status_code: 500,
            })
        }
    }
}
