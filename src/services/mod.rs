pub mod auth_service;
pub mod channel_service;
pub mod comment_service;
pub mod interaction_service;
pub mod video_service;
