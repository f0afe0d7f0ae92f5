use crate::database::MongoDB;
use crate::models::{InteractRequest, InteractResponse, Interaction, InteractionState, Video};
use crate::services::video_service::parse_video_id;
use crate::utils::error::AppError;
use mongodb::bson::{doc, oid::ObjectId, to_bson, DateTime as BsonDateTime};
use mongodb::options::ReturnDocument;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InteractionKind {
    Like,
    Dislike,
}

impl InteractionKind {
    pub fn parse(action_type: &str) -> Result<Self, AppError> {
        match action_type {
            "like" => Ok(InteractionKind::Like),
            "dislike" => Ok(InteractionKind::Dislike),
            other => Err(AppError::InvalidRequest(format!(
                "Unknown actionType '{}': expected 'like' or 'dislike'",
                other
            ))),
        }
    }
}

/// State machine for one (user, video) pair. Returns the next state plus the
/// (likes, dislikes) counter deltas. Repeating an action toggles it off; the
/// opposite action switches sides in one step.
pub fn apply_action(
    prev: InteractionState,
    action: InteractionKind,
) -> (InteractionState, i64, i64) {
    use InteractionState::*;

    match (prev, action) {
        (Liked, InteractionKind::Like) => (Cleared, -1, 0),
        (Disliked, InteractionKind::Like) => (Liked, 1, -1),
        (Cleared, InteractionKind::Like) => (Liked, 1, 0),
        (Disliked, InteractionKind::Dislike) => (Cleared, 0, -1),
        (Liked, InteractionKind::Dislike) => (Disliked, -1, 1),
        (Cleared, InteractionKind::Dislike) => (Disliked, 0, 1),
    }
}

/// Record a like/dislike for the caller and apply the counter deltas to the
/// video in one atomic `$inc`. The per-pair state doc (unique index on
/// userId+videoId) is what makes repeated calls idempotent toggles.
pub async fn interact(
    db: &MongoDB,
    user_id: &str,
    video_id: &str,
    request: &InteractRequest,
) -> Result<InteractResponse, AppError> {
    let kind = InteractionKind::parse(request.action_type.trim())?;
    let video_oid = parse_video_id(video_id)?;
    let user_oid = ObjectId::parse_str(user_id)
        .map_err(|_| AppError::InvalidRequest("Invalid user id".to_string()))?;

    let videos = db.collection::<Video>("videos");
    videos
        .find_one(doc! { "_id": video_oid })
        .await
        .map_err(|e| AppError::DatabaseError(e.to_string()))?
        .ok_or_else(|| AppError::NotFound("Video not found".to_string()))?;

    let interactions = db.collection::<Interaction>("interactions");
    let prev = interactions
        .find_one(doc! { "userId": user_oid, "videoId": video_oid })
        .await
        .map_err(|e| AppError::DatabaseError(e.to_string()))?
        .map(|interaction| interaction.state)
        .unwrap_or(InteractionState::Cleared);

    let (next, like_delta, dislike_delta) = apply_action(prev, kind);
    let state_bson =
        to_bson(&next).map_err(|e| AppError::Internal(format!("Failed to encode state: {}", e)))?;

    interactions
        .update_one(
            doc! { "userId": user_oid, "videoId": video_oid },
            doc! { "$set": { "state": state_bson, "updatedAt": BsonDateTime::now() } },
        )
        .upsert(true)
        .await
        .map_err(|e| AppError::DatabaseError(e.to_string()))?;

    let updated = videos
        .find_one_and_update(
            doc! { "_id": video_oid },
            doc! { "$inc": { "likes": like_delta, "dislikes": dislike_delta } },
        )
        .return_document(ReturnDocument::After)
        .await
        .map_err(|e| AppError::DatabaseError(e.to_string()))?
        .ok_or_else(|| AppError::NotFound("Video not found".to_string()))?;

    Ok(InteractResponse {
        success: true,
        state: next,
        likes: updated.likes,
        dislikes: updated.dislikes,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use InteractionState::*;

    #[test]
    fn test_parse_action_type() {
        assert_eq!(InteractionKind::parse("like").unwrap(), InteractionKind::Like);
        assert_eq!(
            InteractionKind::parse("dislike").unwrap(),
            InteractionKind::Dislike
        );
        assert!(matches!(
            InteractionKind::parse("boost").unwrap_err(),
            AppError::InvalidRequest(_)
        ));
    }

    #[test]
    fn test_first_like_increments() {
        assert_eq!(apply_action(Cleared, InteractionKind::Like), (Liked, 1, 0));
    }

    #[test]
    fn test_repeated_like_toggles_off() {
        assert_eq!(apply_action(Liked, InteractionKind::Like), (Cleared, -1, 0));
    }

    #[test]
    fn test_like_then_dislike_switches_sides() {
        assert_eq!(
            apply_action(Liked, InteractionKind::Dislike),
            (Disliked, -1, 1)
        );
        assert_eq!(
            apply_action(Disliked, InteractionKind::Like),
            (Liked, 1, -1)
        );
    }

    #[test]
    fn test_double_like_nets_zero() {
        let (state, first_likes, _) = apply_action(Cleared, InteractionKind::Like);
        let (state, second_likes, _) = apply_action(state, InteractionKind::Like);

        assert_eq!(state, Cleared);
        assert_eq!(first_likes + second_likes, 0);
    }
}
