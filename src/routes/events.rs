use std::collections::BTreeMap;

use actix_web::{web, HttpResponse, Responder};

use crate::models::{ErrorResponse, EventSummaryResponse};
use crate::routes::AppState;
use crate::services::Catalog;

/// Configure event routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/events/{event_id}", web::get().to(get_event_summary));
}

/// Requirement summary for one event
///
/// GET /api/events/{event_id}
///
/// Returns the event header (type, location, promoted price/seats, privacy)
/// plus the raw requirement row for every service line, keyed by category.
async fn get_event_summary(state: web::Data<AppState>, path: web::Path<i64>) -> impl Responder {
    let event_id = path.into_inner();

    let header = match state.postgres.event_header(event_id).await {
        Ok(Some(header)) => header,
        Ok(None) => {
            return HttpResponse::NotFound().json(ErrorResponse {
                error: "Event not found".to_string(),
                message: format!("No event with id {}", event_id),
                status_code: 404,
            });
        }
        Err(e) => {
            tracing::error!("Failed to fetch event {}: {}", event_id, e);
            return HttpResponse::InternalServerError().json(ErrorResponse {
                error: "Failed to fetch event".to_string(),
                message: e.to_string(),
                status_code: 500,
            });
        }
    };

    let mut requirements = BTreeMap::new();
    match state.postgres.event_services(event_id).await {
        Ok(Some(event)) => {
            for line in &event.lines {
                match state.postgres.requirement(line.id, &line.category).await {
                    Ok(Some(requirement)) => {
                        let mut fields = requirement.fields;
                        // Row bookkeeping columns are not requirement data
                        fields.remove("id");
                        fields.remove("event_service_id");
                        requirements.insert(line.category.clone(), fields);
                    }
                    Ok(None) => {}
                    Err(e) => {
                        tracing::warn!(
                            "Skipping requirement for {} on event {}: {}",
                            line.category,
                            event_id,
                            e
                        );
                    }
                }
            }
        }
        Ok(None) => {}
        Err(e) => {
            tracing::error!("Failed to fetch service lines for event {}: {}", event_id, e);
            return HttpResponse::InternalServerError().json(ErrorResponse {
                error: "Failed to fetch event services".to_string(),
                message: e.to_string(),
                status_code: 500,
            });
        }
    }

    HttpResponse::Ok().json(EventSummaryResponse {
        event_type: header.event_type,
        location: header.location,
        budget: header.price,
        attendees: header.seats,
        privacy: header.privacy,
        requirements,
    })
}
