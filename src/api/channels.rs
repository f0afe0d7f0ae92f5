use actix_web::{web, HttpResponse, Responder, ResponseError};
use crate::database::MongoDB;
use crate::middleware::auth::AuthUser;
use crate::models::{ChannelResponse, CreateChannelRequest};
use crate::services::channel_service;

#[utoipa::path(
    post,
    path = "/api/channel",
    tag = "Channels",
    request_body = CreateChannelRequest,
    responses(
        (status = 201, description = "Channel created", body = ChannelResponse),
        (status = 409, description = "Caller already owns a channel, or handle taken")
    ),
    security(("bearer_auth" = []))
)]
pub async fn create_channel(
    user: web::ReqData<AuthUser>,
    db: web::Data<MongoDB>,
    request: web::Json<CreateChannelRequest>,
) -> impl Responder {
    log::info!(
        "📺 POST /api/channel - handle: {} for user {}",
        request.handle,
        user.id
    );

    match channel_service::create_channel(&db, &user.id, &request).await {
        Ok(channel) => {
            log::info!("✅ Channel created: {}", channel.handle);
            HttpResponse::Created().json(serde_json::json!({
                "success": true,
                "channel": channel
            }))
        }
        Err(e) => {
            log::warn!("❌ Channel creation failed: {}", e);
            e.error_response()
        }
    }
}

#[utoipa::path(
    get,
    path = "/api/channel/{handle}",
    tag = "Channels",
    params(("handle" = String, Path, description = "Unique channel handle")),
    responses(
        (status = 200, description = "Channel found", body = ChannelResponse),
        (status = 404, description = "No channel with this handle")
    )
)]
pub async fn get_channel(db: web::Data<MongoDB>, path: web::Path<String>) -> impl Responder {
    let handle = path.into_inner();
    log::info!("📺 GET /api/channel/{}", handle);

    match channel_service::get_channel_by_handle(&db, &handle).await {
        Ok(channel) => HttpResponse::Ok().json(serde_json::json!({
            "success": true,
            "channel": channel
        })),
        Err(e) => e.error_response(),
    }
}
