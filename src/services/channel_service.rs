use crate::database::MongoDB;
use crate::models::{
    Channel, ChannelResponse, CreateChannelRequest, DEFAULT_CHANNEL_BANNER,
    DEFAULT_CHANNEL_DESCRIPTION,
};
use crate::utils::error::{is_duplicate_key, AppError};
use mongodb::bson::{doc, oid::ObjectId, DateTime as BsonDateTime};

/// Build the channel document for a new owner, applying schema defaults.
fn new_channel(owner: ObjectId, request: &CreateChannelRequest) -> Channel {
    let now = BsonDateTime::now();
    Channel {
        id: None,
        channel_name: request.channel_name.trim().to_string(),
        handle: request.handle.trim().to_string(),
        owner,
        description: request
            .description
            .clone()
            .unwrap_or_else(|| DEFAULT_CHANNEL_DESCRIPTION.to_string()),
        subscribers: 0,
        channel_banner: request
            .channel_banner
            .clone()
            .unwrap_or_else(|| DEFAULT_CHANNEL_BANNER.to_string()),
        created_at: now,
        updated_at: now,
    }
}

/// Create the caller's channel. One-shot: a single conditional insert, with
/// both uniqueness rules (one channel per owner, globally unique handle)
/// enforced by the unique indexes rather than a check-then-insert read.
pub async fn create_channel(
    db: &MongoDB,
    user_id: &str,
    request: &CreateChannelRequest,
) -> Result<ChannelResponse, AppError> {
    if request.channel_name.trim().is_empty() || request.handle.trim().is_empty() {
        return Err(AppError::InvalidRequest(
            "Channel name and handle are required".to_string(),
        ));
    }

    let owner = ObjectId::parse_str(user_id)
        .map_err(|_| AppError::InvalidRequest("Invalid user id".to_string()))?;

    let mut channel = new_channel(owner, request);

    let collection = db.collection::<Channel>("channels");
    let result = collection.insert_one(&channel).await.map_err(|e| {
        if is_duplicate_key(&e) {
            // The violated index name tells the two 409 cases apart.
            if e.to_string().contains("handle") {
                AppError::Conflict("This handle is already taken".to_string())
            } else {
                AppError::Conflict("You already own a channel".to_string())
            }
        } else {
            AppError::DatabaseError(e.to_string())
        }
    })?;

    channel.id = result.inserted_id.as_object_id();
    Ok(ChannelResponse::from(channel))
}

/// Public read of a channel by its unique handle.
pub async fn get_channel_by_handle(db: &MongoDB, handle: &str) -> Result<ChannelResponse, AppError> {
    let collection = db.collection::<Channel>("channels");
    let channel = collection
        .find_one(doc! { "handle": handle })
        .await
        .map_err(|e| AppError::DatabaseError(e.to_string()))?
        .ok_or_else(|| AppError::NotFound("Channel not found".to_string()))?;

    Ok(ChannelResponse::from(channel))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_channel_applies_defaults() {
        let request = CreateChannelRequest {
            channel_name: "  Karan Codes  ".to_string(),
            handle: "@karancodes".to_string(),
            description: None,
            channel_banner: None,
        };

        let channel = new_channel(ObjectId::new(), &request);
        assert_eq!(channel.channel_name, "Karan Codes");
        assert_eq!(channel.description, DEFAULT_CHANNEL_DESCRIPTION);
        assert_eq!(channel.channel_banner, DEFAULT_CHANNEL_BANNER);
        assert_eq!(channel.subscribers, 0);
    }

    #[test]
    fn test_new_channel_keeps_provided_description() {
        let request = CreateChannelRequest {
            channel_name: "Karan Codes".to_string(),
            handle: "@karancodes".to_string(),
            description: Some("All about Rust".to_string()),
            channel_banner: None,
        };

        let channel = new_channel(ObjectId::new(), &request);
        assert_eq!(channel.description, "All about Rust");
    }
}
