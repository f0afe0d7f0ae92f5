use actix_web::{web, HttpResponse, Responder, ResponseError};
use crate::database::MongoDB;
use crate::middleware::auth::AuthUser;
use crate::models::{CreateVideoRequest, UpdateVideoRequest, VideoResponse};
use crate::services::video_service;

#[utoipa::path(
    get,
    path = "/api/videos",
    tag = "Videos",
    responses(
        (status = 200, description = "Full video collection", body = [VideoResponse])
    )
)]
pub async fn list_videos(db: web::Data<MongoDB>) -> impl Responder {
    log::info!("🎬 GET /api/videos");

    match video_service::list_videos(&db).await {
        Ok(videos) => HttpResponse::Ok().json(serde_json::json!({
            "success": true,
            "total": videos.len(),
            "videos": videos
        })),
        Err(e) => {
            log::error!("❌ Failed to list videos: {}", e);
            e.error_response()
        }
    }
}

#[utoipa::path(
    get,
    path = "/api/video/{id}",
    tag = "Videos",
    params(("id" = String, Path, description = "Video id")),
    responses(
        (status = 200, description = "Video found", body = VideoResponse),
        (status = 400, description = "Malformed video id"),
        (status = 404, description = "Video not found")
    )
)]
pub async fn get_video(db: web::Data<MongoDB>, path: web::Path<String>) -> impl Responder {
    let video_id = path.into_inner();
    log::info!("🎬 GET /api/video/{}", video_id);

    match video_service::get_video(&db, &video_id).await {
        Ok(video) => HttpResponse::Ok().json(serde_json::json!({
            "success": true,
            "video": video
        })),
        Err(e) => e.error_response(),
    }
}

#[utoipa::path(
    post,
    path = "/api/video",
    tag = "Videos",
    request_body = CreateVideoRequest,
    responses(
        (status = 201, description = "Video created", body = VideoResponse),
        (status = 400, description = "Missing required fields")
    ),
    security(("bearer_auth" = []))
)]
pub async fn create_video(
    user: web::ReqData<AuthUser>,
    db: web::Data<MongoDB>,
    request: web::Json<CreateVideoRequest>,
) -> impl Responder {
    log::info!("🎬 POST /api/video - '{}' by {}", request.title, user.id);

    match video_service::create_video(&db, &user.id, &request).await {
        Ok(video) => {
            log::info!("✅ Video created: {}", video.id);
            HttpResponse::Created().json(serde_json::json!({
                "success": true,
                "video": video
            }))
        }
        Err(e) => {
            log::warn!("❌ Video creation failed: {}", e);
            e.error_response()
        }
    }
}

#[utoipa::path(
    post,
    path = "/api/video/{id}/edit",
    tag = "Videos",
    params(("id" = String, Path, description = "Video id")),
    request_body = UpdateVideoRequest,
    responses(
        (status = 200, description = "Video updated", body = VideoResponse),
        (status = 403, description = "Caller is not the uploader"),
        (status = 404, description = "Video not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn update_video(
    user: web::ReqData<AuthUser>,
    db: web::Data<MongoDB>,
    path: web::Path<String>,
    request: web::Json<UpdateVideoRequest>,
) -> impl Responder {
    let video_id = path.into_inner();
    log::info!("🎬 POST /api/video/{}/edit by {}", video_id, user.id);

    match video_service::update_video(&db, &user.id, &video_id, &request).await {
        Ok(video) => {
            log::info!("✅ Video updated: {}", video.id);
            HttpResponse::Ok().json(serde_json::json!({
                "success": true,
                "video": video
            }))
        }
        Err(e) => {
            log::warn!("❌ Video update failed: {}", e);
            e.error_response()
        }
    }
}

#[utoipa::path(
    delete,
    path = "/api/video/{id}",
    tag = "Videos",
    params(("id" = String, Path, description = "Video id")),
    responses(
        (status = 200, description = "Video deleted"),
        (status = 403, description = "Caller is not the uploader"),
        (status = 404, description = "Video not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn delete_video(
    user: web::ReqData<AuthUser>,
    db: web::Data<MongoDB>,
    path: web::Path<String>,
) -> impl Responder {
    let video_id = path.into_inner();
    log::info!("🗑️ DELETE /api/video/{} by {}", video_id, user.id);

    match video_service::delete_video(&db, &user.id, &video_id).await {
        Ok(()) => {
            log::info!("✅ Video deleted: {}", video_id);
            HttpResponse::Ok().json(serde_json::json!({
                "success": true,
                "message": "Video deleted successfully"
            }))
        }
        Err(e) => {
            log::warn!("❌ Video deletion failed: {}", e);
            e.error_response()
        }
    }
}
