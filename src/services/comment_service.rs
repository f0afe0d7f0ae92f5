use crate::database::MongoDB;
use crate::models::{AddCommentRequest, Comment, CommentResponse, Video};
use crate::services::video_service::parse_video_id;
use crate::utils::error::AppError;
use mongodb::bson::{doc, oid::ObjectId, to_bson, DateTime as BsonDateTime};

fn parse_comment_id(id: &str) -> Result<ObjectId, AppError> {
    ObjectId::parse_str(id).map_err(|_| AppError::InvalidRequest("Invalid comment id".to_string()))
}

fn parse_user_id(id: &str) -> Result<ObjectId, AppError> {
    ObjectId::parse_str(id).map_err(|_| AppError::InvalidRequest("Invalid user id".to_string()))
}

/// Append a comment to the video's embedded array and return it.
pub async fn add_comment(
    db: &MongoDB,
    user_id: &str,
    video_id: &str,
    request: &AddCommentRequest,
) -> Result<CommentResponse, AppError> {
    let text = request.text.trim();
    if text.is_empty() {
        return Err(AppError::InvalidRequest("Comment text is required".to_string()));
    }

    let video_oid = parse_video_id(video_id)?;
    let user_oid = parse_user_id(user_id)?;

    let comment = Comment {
        id: ObjectId::new(),
        user_id: user_oid,
        text: text.to_string(),
        timestamp: BsonDateTime::now(),
    };
    let comment_bson =
        to_bson(&comment).map_err(|e| AppError::Internal(format!("Failed to encode comment: {}", e)))?;

    let collection = db.collection::<Video>("videos");
    let result = collection
        .update_one(
            doc! { "_id": video_oid },
            doc! { "$push": { "comments": comment_bson } },
        )
        .await
        .map_err(|e| AppError::DatabaseError(e.to_string()))?;

    if result.matched_count == 0 {
        return Err(AppError::NotFound("Video not found".to_string()));
    }

    Ok(CommentResponse::from(comment))
}

/// Rewrite one comment's text and timestamp in place. The positional `$`
/// operator keeps the write atomic per document, so concurrent edits to
/// other comments on the same video are unaffected.
pub async fn edit_comment(
    db: &MongoDB,
    video_id: &str,
    comment_id: &str,
    text: &str,
) -> Result<(), AppError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(AppError::InvalidRequest("Comment text is required".to_string()));
    }

    let video_oid = parse_video_id(video_id)?;
    let comment_oid = parse_comment_id(comment_id)?;

    let collection = db.collection::<Video>("videos");
    let result = collection
        .update_one(
            doc! { "_id": video_oid, "comments._id": comment_oid },
            doc! { "$set": {
                "comments.$.text": text,
                "comments.$.timestamp": BsonDateTime::now(),
            }},
        )
        .await
        .map_err(|e| AppError::DatabaseError(e.to_string()))?;

    if result.matched_count == 0 {
        return Err(AppError::NotFound("Video or comment not found".to_string()));
    }

    Ok(())
}

/// Pull the matching comment out of the embedded array. A commentId with no
/// match is accepted silently: the pull is a no-op and the call succeeds.
pub async fn delete_comment(
    db: &MongoDB,
    video_id: &str,
    comment_id: &str,
) -> Result<(), AppError> {
    let video_oid = parse_video_id(video_id)?;
    let comment_oid = parse_comment_id(comment_id)?;

    let collection = db.collection::<Video>("videos");
    let result = collection
        .update_one(
            doc! { "_id": video_oid },
            doc! { "$pull": { "comments": { "_id": comment_oid } } },
        )
        .await
        .map_err(|e| AppError::DatabaseError(e.to_string()))?;

    if result.matched_count == 0 {
        return Err(AppError::NotFound("Video not found".to_string()));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_comment_id_rejects_malformed_input() {
        assert!(matches!(
            parse_comment_id("nope").unwrap_err(),
            AppError::InvalidRequest(_)
        ));
        assert!(parse_comment_id("507f1f77bcf86cd799439011").is_ok());
    }
}
