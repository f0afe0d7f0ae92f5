use actix_web::{web, HttpResponse, Responder, ResponseError};
use crate::database::MongoDB;
use crate::middleware::auth::AuthUser;
use crate::models::{InteractRequest, InteractResponse};
use crate::services::interaction_service;

#[utoipa::path(
    post,
    path = "/api/video/{id}/interact",
    tag = "Engagement",
    params(("id" = String, Path, description = "Video id")),
    request_body = InteractRequest,
    responses(
        (status = 200, description = "Counters updated", body = InteractResponse),
        (status = 400, description = "Unknown actionType"),
        (status = 404, description = "Video not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn interact(
    user: web::ReqData<AuthUser>,
    db: web::Data<MongoDB>,
    path: web::Path<String>,
    request: web::Json<InteractRequest>,
) -> impl Responder {
    let video_id = path.into_inner();
    log::info!(
        "👍 POST /api/video/{}/interact - {} by {}",
        video_id,
        request.action_type,
        user.id
    );

    match interaction_service::interact(&db, &user.id, &video_id, &request).await {
        Ok(response) => HttpResponse::Ok().json(response),
        Err(e) => {
            log::warn!("❌ Interaction failed: {}", e);
            e.error_response()
        }
    }
}
