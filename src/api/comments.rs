use actix_web::{web, HttpResponse, Responder, ResponseError};
use crate::database::MongoDB;
use crate::middleware::auth::AuthUser;
use crate::models::{AddCommentRequest, CommentResponse, DeleteCommentRequest, EditCommentRequest};
use crate::services::comment_service;

#[utoipa::path(
    post,
    path = "/api/video/{id}/comment",
    tag = "Comments",
    params(("id" = String, Path, description = "Video id")),
    request_body = AddCommentRequest,
    responses(
        (status = 200, description = "Comment appended", body = CommentResponse),
        (status = 404, description = "Video not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn add_comment(
    user: web::ReqData<AuthUser>,
    db: web::Data<MongoDB>,
    path: web::Path<String>,
    request: web::Json<AddCommentRequest>,
) -> impl Responder {
    let video_id = path.into_inner();
    log::info!("💬 POST /api/video/{}/comment by {}", video_id, user.id);

    match comment_service::add_comment(&db, &user.id, &video_id, &request).await {
        Ok(comment) => {
            log::info!("✅ Comment added: {}", comment.id);
            HttpResponse::Ok().json(serde_json::json!({
                "success": true,
                "comment": comment
            }))
        }
        Err(e) => {
            log::warn!("❌ Comment add failed: {}", e);
            e.error_response()
        }
    }
}

#[utoipa::path(
    post,
    path = "/api/video/{id}/comment/edit",
    tag = "Comments",
    params(("id" = String, Path, description = "Video id")),
    request_body = EditCommentRequest,
    responses(
        (status = 200, description = "Comment rewritten in place"),
        (status = 404, description = "Video or comment not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn edit_comment(
    user: web::ReqData<AuthUser>,
    db: web::Data<MongoDB>,
    path: web::Path<String>,
    request: web::Json<EditCommentRequest>,
) -> impl Responder {
    let video_id = path.into_inner();
    log::info!(
        "💬 POST /api/video/{}/comment/edit - comment {} by {}",
        video_id,
        request.comment_id,
        user.id
    );

    match comment_service::edit_comment(&db, &video_id, &request.comment_id, &request.text).await {
        Ok(()) => HttpResponse::Ok().json(serde_json::json!({
            "success": true,
            "message": "Comment updated successfully"
        })),
        Err(e) => {
            log::warn!("❌ Comment edit failed: {}", e);
            e.error_response()
        }
    }
}

#[utoipa::path(
    delete,
    path = "/api/video/{id}/comment",
    tag = "Comments",
    params(("id" = String, Path, description = "Video id")),
    request_body = DeleteCommentRequest,
    responses(
        (status = 200, description = "Comment removed (no-op when already absent)"),
        (status = 404, description = "Video not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn delete_comment(
    user: web::ReqData<AuthUser>,
    db: web::Data<MongoDB>,
    path: web::Path<String>,
    request: web::Json<DeleteCommentRequest>,
) -> impl Responder {
    let video_id = path.into_inner();
    log::info!(
        "🗑️ DELETE /api/video/{}/comment - comment {} by {}",
        video_id,
        request.comment_id,
        user.id
    );

    match comment_service::delete_comment(&db, &video_id, &request.comment_id).await {
        Ok(()) => HttpResponse::Ok().json(serde_json::json!({
            "success": true,
            "message": "Comment removed"
        })),
        Err(e) => {
            log::warn!("❌ Comment deletion failed: {}", e);
            e.error_response()
        }
    }
}
