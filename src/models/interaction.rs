use mongodb::bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};

/// Per-user-per-video engagement state, stored in the `interactions`
/// collection with a unique (userId, videoId) index. The video's like and
/// dislike counters are derived from transitions of this state, which makes
/// repeated calls idempotent toggles instead of unbounded increments.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Interaction {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub user_id: ObjectId,
    pub video_id: ObjectId,
    pub state: InteractionState,
    pub updated_at: DateTime,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum InteractionState {
    Liked,
    Disliked,
    /// A previously recorded reaction was toggled off.
    Cleared,
}

/// Request body for POST /api/video/{id}/interact.
#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InteractRequest {
    /// "like" or "dislike"; anything else is rejected with 400.
    pub action_type: String,
}

/// Updated counters plus the caller's resulting state.
#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct InteractResponse {
    pub success: bool,
    pub state: InteractionState,
    pub likes: i64,
    pub dislikes: i64,
}
