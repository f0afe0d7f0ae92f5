//! Typed HTTP client for the tube-service API: the browser client's
//! per-view data-fetching hooks collapsed into one reqwest-backed client.
//! Failures surface as plain string messages; nothing is retried.

use crate::models::{
    ChannelResponse, CommentResponse, CreateChannelRequest, CreateVideoRequest, InteractResponse,
    UpdateVideoRequest, UserInfo, VideoResponse,
};
use crate::services::auth_service::AuthResponse;
use serde::de::DeserializeOwned;
use serde::Deserialize;

/// Server error body, `{"success": false, "error": msg}`.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct UserEnvelope {
    user: UserInfo,
}

#[derive(Debug, Deserialize)]
struct ChannelEnvelope {
    channel: ChannelResponse,
}

#[derive(Debug, Deserialize)]
struct VideoEnvelope {
    video: VideoResponse,
}

#[derive(Debug, Deserialize)]
struct VideoListEnvelope {
    videos: Vec<VideoResponse>,
}

#[derive(Debug, Deserialize)]
struct CommentEnvelope {
    comment: CommentResponse,
}

#[derive(Debug, Deserialize)]
pub struct StatusResponse {
    pub success: bool,
    pub message: Option<String>,
}

pub struct ApiClient {
    base_url: String,
    http: reqwest::Client,
    token: Option<String>,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        ApiClient {
            base_url: base_url.into(),
            http: reqwest::Client::new(),
            token: None,
        }
    }

    /// Adopt a token rehydrated from a stored session.
    pub fn set_token(&mut self, token: Option<String>) {
        self.token = token;
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn bearer(&self) -> Result<String, String> {
        self.token
            .as_ref()
            .map(|token| format!("Bearer {}", token))
            .ok_or_else(|| "Not logged in".to_string())
    }

    /// Unwrap a response: parse the body on success, surface the server's
    /// error message otherwise.
    async fn check<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, String> {
        let status = response.status();

        if status.is_success() {
            response
                .json::<T>()
                .await
                .map_err(|e| format!("Failed to parse response: {}", e))
        } else {
            let message = response
                .json::<ErrorBody>()
                .await
                .ok()
                .and_then(|body| body.error)
                .unwrap_or_else(|| format!("Request failed with status {}", status));
            Err(message)
        }
    }

    // ==================== AUTH ====================

    pub async fn register(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<UserInfo, String> {
        let response = self
            .http
            .post(self.url("/api/register"))
            .json(&serde_json::json!({
                "username": username,
                "email": email,
                "password": password,
            }))
            .send()
            .await
            .map_err(|e| format!("Request failed: {}", e))?;

        Self::check::<UserEnvelope>(response)
            .await
            .map(|envelope| envelope.user)
    }

    /// Login and keep the issued token for subsequent protected calls.
    pub async fn login(&mut self, email: &str, password: &str) -> Result<AuthResponse, String> {
        let response = self
            .http
            .post(self.url("/api/login"))
            .json(&serde_json::json!({ "email": email, "password": password }))
            .send()
            .await
            .map_err(|e| format!("Request failed: {}", e))?;

        let auth = Self::check::<AuthResponse>(response).await?;
        self.token = Some(auth.token.clone());
        Ok(auth)
    }

    // ==================== CHANNELS ====================

    pub async fn create_channel(
        &self,
        request: &CreateChannelRequest,
    ) -> Result<ChannelResponse, String> {
        let response = self
            .http
            .post(self.url("/api/channel"))
            .header("Authorization", self.bearer()?)
            .json(request)
            .send()
            .await
            .map_err(|e| format!("Request failed: {}", e))?;

        Self::check::<ChannelEnvelope>(response)
            .await
            .map(|envelope| envelope.channel)
    }

    pub async fn get_channel(&self, handle: &str) -> Result<ChannelResponse, String> {
        let response = self
            .http
            .get(self.url(&format!("/api/channel/{}", handle)))
            .send()
            .await
            .map_err(|e| format!("Request failed: {}", e))?;

        Self::check::<ChannelEnvelope>(response)
            .await
            .map(|envelope| envelope.channel)
    }

    // ==================== VIDEOS ====================

    pub async fn list_videos(&self) -> Result<Vec<VideoResponse>, String> {
        let response = self
            .http
            .get(self.url("/api/videos"))
            .send()
            .await
            .map_err(|e| format!("Request failed: {}", e))?;

        Self::check::<VideoListEnvelope>(response)
            .await
            .map(|envelope| envelope.videos)
    }

    pub async fn get_video(&self, video_id: &str) -> Result<VideoResponse, String> {
        let response = self
            .http
            .get(self.url(&format!("/api/video/{}", video_id)))
            .send()
            .await
            .map_err(|e| format!("Request failed: {}", e))?;

        Self::check::<VideoEnvelope>(response)
            .await
            .map(|envelope| envelope.video)
    }

    pub async fn create_video(
        &self,
        request: &CreateVideoRequest,
    ) -> Result<VideoResponse, String> {
        let response = self
            .http
            .post(self.url("/api/video"))
            .header("Authorization", self.bearer()?)
            .json(request)
            .send()
            .await
            .map_err(|e| format!("Request failed: {}", e))?;

        Self::check::<VideoEnvelope>(response)
            .await
            .map(|envelope| envelope.video)
    }

    pub async fn update_video(
        &self,
        video_id: &str,
        request: &UpdateVideoRequest,
    ) -> Result<VideoResponse, String> {
        let response = self
            .http
            .post(self.url(&format!("/api/video/{}/edit", video_id)))
            .header("Authorization", self.bearer()?)
            .json(request)
            .send()
            .await
            .map_err(|e| format!("Request failed: {}", e))?;

        Self::check::<VideoEnvelope>(response)
            .await
            .map(|envelope| envelope.video)
    }

    pub async fn delete_video(&self, video_id: &str) -> Result<(), String> {
        let response = self
            .http
            .delete(self.url(&format!("/api/video/{}", video_id)))
            .header("Authorization", self.bearer()?)
            .send()
            .await
            .map_err(|e| format!("Request failed: {}", e))?;

        Self::check::<StatusResponse>(response).await.map(|_| ())
    }

    // ==================== COMMENTS ====================

    pub async fn add_comment(&self, video_id: &str, text: &str) -> Result<CommentResponse, String> {
        let response = self
            .http
            .post(self.url(&format!("/api/video/{}/comment", video_id)))
            .header("Authorization", self.bearer()?)
            .json(&serde_json::json!({ "text": text }))
            .send()
            .await
            .map_err(|e| format!("Request failed: {}", e))?;

        Self::check::<CommentEnvelope>(response)
            .await
            .map(|envelope| envelope.comment)
    }

    pub async fn edit_comment(
        &self,
        video_id: &str,
        comment_id: &str,
        text: &str,
    ) -> Result<(), String> {
        let response = self
            .http
            .post(self.url(&format!("/api/video/{}/comment/edit", video_id)))
            .header("Authorization", self.bearer()?)
            .json(&serde_json::json!({ "commentId": comment_id, "text": text }))
            .send()
            .await
            .map_err(|e| format!("Request failed: {}", e))?;

        Self::check::<StatusResponse>(response).await.map(|_| ())
    }

    pub async fn delete_comment(&self, video_id: &str, comment_id: &str) -> Result<(), String> {
        let response = self
            .http
            .delete(self.url(&format!("/api/video/{}/comment", video_id)))
            .header("Authorization", self.bearer()?)
            .json(&serde_json::json!({ "commentId": comment_id }))
            .send()
            .await
            .map_err(|e| format!("Request failed: {}", e))?;

        Self::check::<StatusResponse>(response).await.map(|_| ())
    }

    // ==================== ENGAGEMENT ====================

    pub async fn interact(
        &self,
        video_id: &str,
        action_type: &str,
    ) -> Result<InteractResponse, String> {
        let response = self
            .http
            .post(self.url(&format!("/api/video/{}/interact", video_id)))
            .header("Authorization", self.bearer()?)
            .json(&serde_json::json!({ "actionType": action_type }))
            .send()
            .await
            .map_err(|e| format!("Request failed: {}", e))?;

        Self::check::<InteractResponse>(response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_protected_calls_require_a_token() {
        let client = ApiClient::new("http://127.0.0.1:8080");
        assert_eq!(client.bearer().unwrap_err(), "Not logged in");

        let mut client = client;
        client.set_token(Some("tok".to_string()));
        assert_eq!(client.bearer().unwrap(), "Bearer tok");
    }

    /// End-to-end flow: register, login, upload, comment, fetch.
    #[tokio::test]
    #[ignore] // Requires the server and MongoDB to be running
    async fn test_register_login_upload_comment_flow() {
        let base =
            std::env::var("TUBE_API_URL").unwrap_or_else(|_| "http://127.0.0.1:8080".to_string());
        let mut client = ApiClient::new(base);

        // Unique email per run so the register 409 path stays out of the way
        let email = format!("alice+{}@example.com", chrono::Utc::now().timestamp_millis());

        let registered = client.register("alice", &email, "pw").await.expect("register");
        assert_eq!(registered.username, "alice");

        let auth = client.login(&email, "pw").await.expect("login");
        assert!(!auth.token.is_empty());

        let video = client
            .create_video(&CreateVideoRequest {
                title: "T".to_string(),
                video_url: "u".to_string(),
                thumbnail_url: "t".to_string(),
                channel_id: "c".to_string(),
                description: None,
                category: None,
            })
            .await
            .expect("create video");
        assert_eq!(video.uploader, auth.user.id);

        let comment = client.add_comment(&video.id, "hi").await.expect("add comment");
        assert_eq!(comment.text, "hi");

        let fetched = client.get_video(&video.id).await.expect("fetch video");
        assert_eq!(fetched.comments.len(), 1);
        assert_eq!(fetched.comments[0].text, "hi");
    }
}
