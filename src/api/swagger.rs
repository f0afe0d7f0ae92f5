use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Tube Service API",
        version = "1.0.0",
        description = "Video-sharing backend. \n\n**Authentication:** mutating endpoints require a JWT Bearer token issued by /api/login.\n\n**Features:**\n- Email/password accounts\n- One channel per user with a unique handle\n- Video upload, edit and delete (uploader-only)\n- Embedded per-video comment threads\n- Idempotent like/dislike toggles"
    ),
    paths(
        // Auth
        crate::api::auth::register,
        crate::api::auth::login,

        // Health
        crate::api::health::health_check,

        // Channels
        crate::api::channels::create_channel,
        crate::api::channels::get_channel,

        // Videos
        crate::api::videos::list_videos,
        crate::api::videos::get_video,
        crate::api::videos::create_video,
        crate::api::videos::update_video,
        crate::api::videos::delete_video,

        // Comments
        crate::api::comments::add_comment,
        crate::api::comments::edit_comment,
        crate::api::comments::delete_comment,

        // Engagement
        crate::api::interactions::interact,
    ),
    components(
        schemas(
            // Auth
            crate::services::auth_service::RegisterRequest,
            crate::services::auth_service::LoginRequest,
            crate::services::auth_service::RegisterResponse,
            crate::services::auth_service::AuthResponse,
            crate::models::UserInfo,

            // Channels
            crate::models::CreateChannelRequest,
            crate::models::ChannelResponse,

            // Videos
            crate::models::CreateVideoRequest,
            crate::models::UpdateVideoRequest,
            crate::models::VideoResponse,

            // Comments
            crate::models::AddCommentRequest,
            crate::models::EditCommentRequest,
            crate::models::DeleteCommentRequest,
            crate::models::CommentResponse,

            // Engagement
            crate::models::InteractRequest,
            crate::models::InteractResponse,
            crate::models::InteractionState,

            // Health
            crate::api::health::HealthResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Auth", description = "Registration and login. Login issues the bearer token protected routes require."),
        (name = "Channels", description = "One channel per user, addressed by its unique handle."),
        (name = "Videos", description = "Video CRUD. Edits and deletes are restricted to the uploader."),
        (name = "Comments", description = "Comments embedded in each video document, edited in place by id."),
        (name = "Engagement", description = "Per-user like/dislike toggles with derived counters."),
        (name = "Health", description = "Liveness probe.")
    )
)]
pub struct ApiDoc;
