//! Client-side global state: the browser client's store slices mapped to
//! explicit structs, with the session persisted to a JSON file the way the
//! browser persists it to localStorage.

use crate::models::VideoResponse;
use base64::Engine;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// General UI state: sidebar visibility, search box, category chips. The
/// search and category live here because the inputs sit in the header while
/// the filtering happens in the feed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppState {
    pub is_menu_open: bool,
    pub search_query: String,
    pub selected_category: String,
}

impl Default for AppState {
    fn default() -> Self {
        AppState {
            is_menu_open: true,
            search_query: String::new(),
            selected_category: "All".to_string(),
        }
    }
}

impl AppState {
    pub fn toggle_menu(&mut self) {
        self.is_menu_open = !self.is_menu_open;
    }

    /// Explicit close: the watch page collapses the sidebar on entry.
    pub fn close_menu(&mut self) {
        self.is_menu_open = false;
    }

    pub fn set_search_query(&mut self, query: impl Into<String>) {
        self.search_query = query.into();
    }

    pub fn set_category(&mut self, category: impl Into<String>) {
        self.selected_category = category.into();
    }
}

/// Authentication state, persisted across restarts as `{token, username,
/// userId}` plus the derived logged-in flag.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSession {
    pub is_logged_in: bool,
    pub username: Option<String>,
    pub token: Option<String>,
    pub user_id: Option<String>,
}

impl UserSession {
    pub fn login(
        &mut self,
        token: impl Into<String>,
        username: impl Into<String>,
        user_id: impl Into<String>,
    ) {
        self.is_logged_in = true;
        self.token = Some(token.into());
        self.username = Some(username.into());
        self.user_id = Some(user_id.into());
    }

    pub fn logout(&mut self) {
        *self = UserSession::default();
    }

    /// Rehydrate from the session file. A missing or unreadable file, or a
    /// token whose payload is already expired, yields a logged-out session;
    /// the server would answer 403 for that token anyway.
    pub fn load(path: &Path) -> Self {
        let raw = match fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(_) => return UserSession::default(),
        };

        match serde_json::from_str::<UserSession>(&raw) {
            Ok(session)
                if session
                    .token
                    .as_deref()
                    .map_or(false, |token| !token_is_expired(token)) =>
            {
                session
            }
            _ => UserSession::default(),
        }
    }

    pub fn save(&self, path: &Path) -> Result<(), String> {
        let raw = serde_json::to_string_pretty(self)
            .map_err(|e| format!("Failed to serialize session: {}", e))?;
        fs::write(path, raw).map_err(|e| format!("Failed to write session file: {}", e))
    }
}

/// Check the `exp` claim by decoding the JWT payload locally. No signature
/// verification happens here: the server stays the authority, this only
/// avoids presenting a token that is certain to be rejected.
pub fn token_is_expired(token: &str) -> bool {
    let parts: Vec<&str> = token.split('.').collect();
    if parts.len() != 3 {
        return true;
    }

    let payload_bytes = match base64::engine::general_purpose::URL_SAFE_NO_PAD.decode(parts[1]) {
        Ok(bytes) => bytes,
        Err(_) => return true,
    };

    let payload: serde_json::Value = match serde_json::from_slice(&payload_bytes) {
        Ok(value) => value,
        Err(_) => return true,
    };

    match payload["exp"].as_i64() {
        Some(exp) => exp <= chrono::Utc::now().timestamp(),
        None => true,
    }
}

/// Client-side feed filter: case-insensitive substring match on the title
/// plus category equality, with "All" passing everything. The server always
/// returns the full collection.
pub fn filter_feed<'a>(
    videos: &'a [VideoResponse],
    search_query: &str,
    category: &str,
) -> Vec<&'a VideoResponse> {
    let needle = search_query.trim().to_lowercase();

    videos
        .iter()
        .filter(|video| needle.is_empty() || video.title.to_lowercase().contains(&needle))
        .filter(|video| category == "All" || video.category == category)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_token(exp: i64) -> String {
        let encode = |bytes: &[u8]| base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(bytes);
        let header = encode(br#"{"alg":"HS256","typ":"JWT"}"#);
        let payload = encode(
            format!(r#"{{"id":"507f1f77bcf86cd799439011","iat":0,"exp":{}}}"#, exp).as_bytes(),
        );
        format!("{}.{}.sig", header, payload)
    }

    fn make_video(title: &str, category: &str) -> VideoResponse {
        VideoResponse {
            id: "v".to_string(),
            title: title.to_string(),
            description: String::new(),
            video_url: "u".to_string(),
            thumbnail_url: "t".to_string(),
            uploader: "a".to_string(),
            channel_id: "c".to_string(),
            views: 0,
            likes: 0,
            dislikes: 0,
            category: category.to_string(),
            comments: vec![],
            created_at: 0,
            updated_at: 0,
        }
    }

    #[test]
    fn test_menu_toggles() {
        let mut state = AppState::default();
        assert!(state.is_menu_open);

        state.toggle_menu();
        assert!(!state.is_menu_open);

        state.toggle_menu();
        state.close_menu();
        assert!(!state.is_menu_open);
    }

    #[test]
    fn test_login_logout() {
        let mut session = UserSession::default();
        assert!(!session.is_logged_in);

        session.login("tok", "alice", "507f1f77bcf86cd799439011");
        assert!(session.is_logged_in);
        assert_eq!(session.username.as_deref(), Some("alice"));

        session.logout();
        assert!(!session.is_logged_in);
        assert!(session.token.is_none());
        assert!(session.user_id.is_none());
    }

    #[test]
    fn test_session_round_trips_through_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");

        let mut session = UserSession::default();
        let fresh = make_token(chrono::Utc::now().timestamp() + 3600);
        session.login(fresh.clone(), "alice", "507f1f77bcf86cd799439011");
        session.save(&path).unwrap();

        let loaded = UserSession::load(&path);
        assert!(loaded.is_logged_in);
        assert_eq!(loaded.token.as_deref(), Some(fresh.as_str()));
        assert_eq!(loaded.username.as_deref(), Some("alice"));
    }

    #[test]
    fn test_expired_session_discarded_on_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");

        let mut session = UserSession::default();
        session.login(make_token(1), "alice", "507f1f77bcf86cd799439011");
        session.save(&path).unwrap();

        let loaded = UserSession::load(&path);
        assert!(!loaded.is_logged_in);
        assert!(loaded.token.is_none());
    }

    #[test]
    fn test_missing_session_file_yields_default() {
        let dir = tempfile::tempdir().unwrap();
        let loaded = UserSession::load(&dir.path().join("absent.json"));
        assert!(!loaded.is_logged_in);
    }

    #[test]
    fn test_token_expiry_check() {
        assert!(!token_is_expired(&make_token(
            chrono::Utc::now().timestamp() + 3600
        )));
        assert!(token_is_expired(&make_token(1)));
        assert!(token_is_expired("not-a-jwt"));
    }

    #[test]
    fn test_filter_feed_substring_is_case_insensitive() {
        let videos = vec![
            make_video("Rust Borrow Checker Deep Dive", "Tech"),
            make_video("Lofi Beats", "Music"),
        ];

        let hits = filter_feed(&videos, "rust", "All");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].title, "Rust Borrow Checker Deep Dive");
    }

    #[test]
    fn test_filter_feed_category_all_passes_everything() {
        let videos = vec![
            make_video("A", "Tech"),
            make_video("B", "Music"),
            make_video("C", "Gaming"),
        ];

        assert_eq!(filter_feed(&videos, "", "All").len(), 3);
        assert_eq!(filter_feed(&videos, "", "Music").len(), 1);
    }
}
