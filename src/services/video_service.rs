use crate::database::MongoDB;
use crate::models::{
    CreateVideoRequest, UpdateVideoRequest, Video, VideoResponse, DEFAULT_VIDEO_CATEGORY,
    DEFAULT_VIDEO_DESCRIPTION,
};
use crate::utils::error::AppError;
use futures::stream::StreamExt;
use mongodb::bson::{doc, oid::ObjectId, DateTime as BsonDateTime, Document};
use mongodb::options::ReturnDocument;

pub fn parse_video_id(id: &str) -> Result<ObjectId, AppError> {
    ObjectId::parse_str(id).map_err(|_| AppError::InvalidRequest("Invalid video id".to_string()))
}

/// Public read of the full collection. No pagination, no server-side
/// filtering; the client narrows the feed locally.
pub async fn list_videos(db: &MongoDB) -> Result<Vec<VideoResponse>, AppError> {
    let collection = db.collection::<Video>("videos");
    let mut cursor = collection
        .find(doc! {})
        .await
        .map_err(|e| AppError::DatabaseError(e.to_string()))?;

    let mut videos = Vec::new();
    while let Some(result) = cursor.next().await {
        match result {
            Ok(video) => videos.push(VideoResponse::from(video)),
            Err(e) => {
                log::warn!("⚠️ Skipping undecodable video document: {}", e);
            }
        }
    }

    Ok(videos)
}

/// Fetch one video. Counts the view: each fetch bumps the `views` counter
/// atomically and returns the post-increment document.
pub async fn get_video(db: &MongoDB, id: &str) -> Result<VideoResponse, AppError> {
    let object_id = parse_video_id(id)?;

    let collection = db.collection::<Video>("videos");
    let video = collection
        .find_one_and_update(doc! { "_id": object_id }, doc! { "$inc": { "views": 1 } })
        .return_document(ReturnDocument::After)
        .await
        .map_err(|e| AppError::DatabaseError(e.to_string()))?
        .ok_or_else(|| AppError::NotFound("Video not found".to_string()))?;

    Ok(VideoResponse::from(video))
}

/// Upload a new video; the authenticated caller becomes the uploader.
pub async fn create_video(
    db: &MongoDB,
    uploader_id: &str,
    request: &CreateVideoRequest,
) -> Result<VideoResponse, AppError> {
    if request.title.trim().is_empty()
        || request.video_url.trim().is_empty()
        || request.thumbnail_url.trim().is_empty()
        || request.channel_id.trim().is_empty()
    {
        return Err(AppError::InvalidRequest(
            "Title, video URL, thumbnail URL and channel id are required".to_string(),
        ));
    }

    let uploader = ObjectId::parse_str(uploader_id)
        .map_err(|_| AppError::InvalidRequest("Invalid user id".to_string()))?;

    let now = BsonDateTime::now();
    let mut video = Video {
        id: None,
        title: request.title.trim().to_string(),
        description: request
            .description
            .clone()
            .unwrap_or_else(|| DEFAULT_VIDEO_DESCRIPTION.to_string()),
        video_url: request.video_url.clone(),
        thumbnail_url: request.thumbnail_url.clone(),
        uploader,
        channel_id: request.channel_id.clone(),
        views: 0,
        likes: 0,
        dislikes: 0,
        category: request
            .category
            .clone()
            .unwrap_or_else(|| DEFAULT_VIDEO_CATEGORY.to_string()),
        comments: vec![],
        created_at: now,
        updated_at: now,
    };

    let collection = db.collection::<Video>("videos");
    let result = collection
        .insert_one(&video)
        .await
        .map_err(|e| AppError::DatabaseError(e.to_string()))?;

    video.id = result.inserted_id.as_object_id();
    Ok(VideoResponse::from(video))
}

/// Fetch a video and require the caller to be its uploader. Shared by the
/// mutating operations: 404 when absent, 403 when owned by someone else.
async fn fetch_owned_video(
    db: &MongoDB,
    user_id: &str,
    object_id: ObjectId,
) -> Result<Video, AppError> {
    let collection = db.collection::<Video>("videos");
    let video = collection
        .find_one(doc! { "_id": object_id })
        .await
        .map_err(|e| AppError::DatabaseError(e.to_string()))?
        .ok_or_else(|| AppError::NotFound("Video not found".to_string()))?;

    if video.uploader.to_hex() != user_id {
        return Err(AppError::Forbidden(
            "Only the uploader can modify this video".to_string(),
        ));
    }

    Ok(video)
}

/// Translate the provided subset of mutable fields into a `$set` document.
fn build_update_doc(request: &UpdateVideoRequest) -> Document {
    let mut set = doc! { "updatedAt": BsonDateTime::now() };

    if let Some(title) = &request.title {
        set.insert("title", title.trim());
    }
    if let Some(description) = &request.description {
        set.insert("description", description);
    }
    if let Some(video_url) = &request.video_url {
        set.insert("videoUrl", video_url);
    }
    if let Some(thumbnail_url) = &request.thumbnail_url {
        set.insert("thumbnailUrl", thumbnail_url);
    }
    if let Some(category) = &request.category {
        set.insert("category", category);
    }

    set
}

/// Replace any subset of the mutable fields. Uploader-only.
pub async fn update_video(
    db: &MongoDB,
    user_id: &str,
    id: &str,
    request: &UpdateVideoRequest,
) -> Result<VideoResponse, AppError> {
    let object_id = parse_video_id(id)?;
    fetch_owned_video(db, user_id, object_id).await?;

    let collection = db.collection::<Video>("videos");
    let updated = collection
        .find_one_and_update(
            doc! { "_id": object_id },
            doc! { "$set": build_update_doc(request) },
        )
        .return_document(ReturnDocument::After)
        .await
        .map_err(|e| AppError::DatabaseError(e.to_string()))?
        .ok_or_else(|| AppError::NotFound("Video not found".to_string()))?;

    Ok(VideoResponse::from(updated))
}

/// Remove a video. Uploader-only.
pub async fn delete_video(db: &MongoDB, user_id: &str, id: &str) -> Result<(), AppError> {
    let object_id = parse_video_id(id)?;
    fetch_owned_video(db, user_id, object_id).await?;

    let collection = db.collection::<Video>("videos");
    collection
        .delete_one(doc! { "_id": object_id })
        .await
        .map_err(|e| AppError::DatabaseError(e.to_string()))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_video_id_rejects_malformed_input() {
        let err = parse_video_id("not-an-object-id").unwrap_err();
        assert!(matches!(err, AppError::InvalidRequest(_)));

        assert!(parse_video_id("507f1f77bcf86cd799439011").is_ok());
    }

    #[test]
    fn test_update_doc_contains_only_provided_fields() {
        let request = UpdateVideoRequest {
            title: Some("New title".to_string()),
            category: Some("Music".to_string()),
            ..Default::default()
        };

        let set = build_update_doc(&request);
        assert_eq!(set.get_str("title").unwrap(), "New title");
        assert_eq!(set.get_str("category").unwrap(), "Music");
        assert!(set.get("description").is_none());
        assert!(set.get("videoUrl").is_none());
        assert!(set.get("updatedAt").is_some());
    }
}
