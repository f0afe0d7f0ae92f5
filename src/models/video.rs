use mongodb::bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};

pub const DEFAULT_VIDEO_DESCRIPTION: &str = "No description provided.";
pub const DEFAULT_VIDEO_CATEGORY: &str = "General";

/// Video document stored in the `videos` collection.
///
/// Comments live inside the document as an ordered array, so fetching a
/// video returns its full discussion in one read. Edits and deletes rewrite
/// the array in place via positional `$set` / `$pull`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Video {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub title: String,
    pub description: String,
    /// Link to the actual video file on an external service.
    pub video_url: String,
    pub thumbnail_url: String,
    /// The user who created the video; the only principal allowed to edit
    /// or delete it.
    pub uploader: ObjectId,
    pub channel_id: String,
    #[serde(default)]
    pub views: i64,
    #[serde(default)]
    pub likes: i64,
    #[serde(default)]
    pub dislikes: i64,
    pub category: String,
    #[serde(default)]
    pub comments: Vec<Comment>,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

/// Comment embedded in a video document. The `_id` is generated on append
/// and is what edit/delete match against.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub user_id: ObjectId,
    pub text: String,
    pub timestamp: DateTime,
}

/// Request to upload a new video.
#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateVideoRequest {
    pub title: String,
    pub video_url: String,
    pub thumbnail_url: String,
    pub channel_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

/// Request to update a subset of a video's mutable fields.
#[derive(Debug, Default, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateVideoRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct AddCommentRequest {
    pub text: String,
}

#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EditCommentRequest {
    pub comment_id: String,
    pub text: String,
}

/// DELETE /api/video/{id}/comment carries the comment id in the body.
#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeleteCommentRequest {
    pub comment_id: String,
}

/// Comment as rendered on the wire.
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CommentResponse {
    pub id: String,
    pub user_id: String,
    pub text: String,
    /// Milliseconds since the Unix epoch.
    pub timestamp: i64,
}

impl From<Comment> for CommentResponse {
    fn from(comment: Comment) -> Self {
        CommentResponse {
            id: comment.id.to_hex(),
            user_id: comment.user_id.to_hex(),
            text: comment.text,
            timestamp: comment.timestamp.timestamp_millis(),
        }
    }
}

/// Video as rendered on the wire, with its full comment list.
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VideoResponse {
    pub id: String,
    pub title: String,
    pub description: String,
    pub video_url: String,
    pub thumbnail_url: String,
    pub uploader: String,
    pub channel_id: String,
    pub views: i64,
    pub likes: i64,
    pub dislikes: i64,
    pub category: String,
    pub comments: Vec<CommentResponse>,
    pub created_at: i64,
    pub updated_at: i64,
}

impl From<Video> for VideoResponse {
    fn from(video: Video) -> Self {
        VideoResponse {
            id: video.id.map(|id| id.to_hex()).unwrap_or_default(),
            title: video.title,
            description: video.description,
            video_url: video.video_url,
            thumbnail_url: video.thumbnail_url,
            uploader: video.uploader.to_hex(),
            channel_id: video.channel_id,
            views: video.views,
            likes: video.likes,
            dislikes: video.dislikes,
            category: video.category,
            comments: video.comments.into_iter().map(CommentResponse::from).collect(),
            created_at: video.created_at.timestamp_millis(),
            updated_at: video.updated_at.timestamp_millis(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_video_response_wire_field_names() {
        let video = Video {
            id: Some(ObjectId::new()),
            title: "T".to_string(),
            description: DEFAULT_VIDEO_DESCRIPTION.to_string(),
            video_url: "u".to_string(),
            thumbnail_url: "t".to_string(),
            uploader: ObjectId::new(),
            channel_id: "c".to_string(),
            views: 0,
            likes: 0,
            dislikes: 0,
            category: DEFAULT_VIDEO_CATEGORY.to_string(),
            comments: vec![],
            created_at: DateTime::now(),
            updated_at: DateTime::now(),
        };

        let value = serde_json::to_value(VideoResponse::from(video)).unwrap();
        for key in ["videoUrl", "thumbnailUrl", "channelId", "createdAt", "updatedAt"] {
            assert!(value.get(key).is_some(), "missing wire field {}", key);
        }
        assert!(value.get("video_url").is_none());
    }

    #[test]
    fn test_comment_response_conversion() {
        let comment = Comment {
            id: ObjectId::new(),
            user_id: ObjectId::new(),
            text: "hi".to_string(),
            timestamp: DateTime::now(),
        };

        let response = CommentResponse::from(comment.clone());
        assert_eq!(response.id, comment.id.to_hex());
        assert_eq!(response.user_id, comment.user_id.to_hex());
        assert_eq!(response.timestamp, comment.timestamp.timestamp_millis());
    }

    #[test]
    fn test_update_request_accepts_partial_body() {
        let request: UpdateVideoRequest = serde_json::from_str(r#"{"title":"New"}"#).unwrap();
        assert_eq!(request.title.as_deref(), Some("New"));
        assert!(request.description.is_none());
        assert!(request.video_url.is_none());
    }
}
