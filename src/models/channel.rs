use mongodb::bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};

pub const DEFAULT_CHANNEL_DESCRIPTION: &str = "Welcome to my channel!";
pub const DEFAULT_CHANNEL_BANNER: &str = "https://example.com/default/banner.png";

/// Channel document stored in the `channels` collection.
///
/// `handle` and `owner` both carry unique indexes: a handle is globally
/// unique and a user owns at most one channel.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Channel {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub channel_name: String,
    /// Unique human-readable identifier, e.g. "@karancodes".
    pub handle: String,
    pub owner: ObjectId,
    pub description: String,
    pub subscribers: i64,
    pub channel_banner: String,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

/// Request to create the caller's channel.
#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateChannelRequest {
    pub channel_name: String,
    pub handle: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channel_banner: Option<String>,
}

/// Channel as rendered on the wire.
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ChannelResponse {
    pub id: String,
    pub channel_name: String,
    pub handle: String,
    pub owner: String,
    pub description: String,
    pub subscribers: i64,
    pub channel_banner: String,
    /// Milliseconds since the Unix epoch.
    pub created_at: i64,
    pub updated_at: i64,
}

impl From<Channel> for ChannelResponse {
    fn from(channel: Channel) -> Self {
        ChannelResponse {
            id: channel.id.map(|id| id.to_hex()).unwrap_or_default(),
            channel_name: channel.channel_name,
            handle: channel.handle,
            owner: channel.owner.to_hex(),
            description: channel.description,
            subscribers: channel.subscribers,
            channel_banner: channel.channel_banner,
            created_at: channel.created_at.timestamp_millis(),
            updated_at: channel.updated_at.timestamp_millis(),
        }
    }
}
