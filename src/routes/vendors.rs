use actix_web::{web, HttpResponse, Responder};

use crate::models::{ErrorResponse, VendorListing};
use crate::routes::AppState;

/// Configure vendor routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/vendors/services", web::get().to(list_vendor_services));
}

/// Every approved vendor offering across categories
///
/// GET /api/vendors/services
async fn list_vendor_services(state: web::Data<AppState>) -> impl Responder {
    match state.postgres.all_approved_offerings().await {
        Ok(offerings) => {
            let listings: Vec<VendorListing> = offerings
                .into_iter()
                .map(|offering| {
                    let location = offering.location();
                    VendorListing {
                        id: offering.id,
                        name: offering.name,
                        service_type: offering.category,
                        description: offering.description,
                        price: offering.price,
                        location,
                        images: offering.images,
                        attributes: offering.attributes,
                    }
                })
                .collect();

            HttpResponse::Ok().json(listings)
        }
        Err(e) => {
            tracing::error!("Failed to list vendor services: {}", e);
            HttpResponse::InternalServerError().json(ErrorResponse {
                error: "Failed to list vendor services".to_string(),
                message: e.to_string(),
                status_code: 500,
            })
        }
    }
}
