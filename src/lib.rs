pub mod api;
pub mod config;
pub mod entities;
pub mod infrastructure;
pub mod services;
pub mod utils;

use crate::config::AppConfig;
use crate::services::content::ContentService;
use crate::services::engagement::EngagementService;
use crate::services::profile::ProfileService;
use crate::services::storage::ObjectStorage;
use axum::{
    middleware::from_fn_with_state,
    routing::{get, post},
    Router,
};
use sea_orm::DatabaseConnection;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[derive(OpenApi)]
#[openapi(
    paths(
        api::handlers::auth::register,
        api::handlers::auth::login,
        api::handlers::auth::session,
        api::handlers::auth::update_password,
        api::handlers::auth::delete_account,
        api::handlers::photos::list_photos,
        api::handlers::photos::upload_photo,
        api::handlers::photos::delete_photo,
        api::handlers::videos::list_videos,
        api::handlers::videos::upload_video,
        api::handlers::videos::delete_video,
        api::handlers::slideshow::list_slideshow,
        api::handlers::slideshow::upload_slideshow_photo,
        api::handlers::slideshow::delete_slideshow_photo,
        api::handlers::comments::list_comments,
        api::handlers::comments::create_comment,
        api::handlers::comments::delete_comment,
        api::handlers::profiles::get_profile,
        api::handlers::profiles::update_profile,
        api::handlers::profiles::upload_avatar,
        api::handlers::stats::engagement_stats,
        api::handlers::health::health_check,
    ),
    components(
        schemas(
            api::handlers::auth::AuthRequest,
            api::handlers::auth::AuthResponse,
            api::handlers::auth::SessionResponse,
            api::handlers::auth::UpdatePasswordRequest,
            api::handlers::comments::CreateCommentRequest,
            api::handlers::profiles::ProfileResponse,
            api::handlers::profiles::UpdateProfileRequest,
            api::handlers::profiles::AvatarResponse,
            api::handlers::health::HealthResponse,
            services::engagement::CommentAuthor,
            services::engagement::CommentWithAuthor,
            services::stats::EngagementStats,
        )
    ),
    tags(
        (name = "auth", description = "Session endpoints"),
        (name = "content", description = "Photo, video and slideshow galleries"),
        (name = "engagement", description = "Comments"),
        (name = "profiles", description = "User profiles"),
        (name = "admin", description = "Dashboard endpoints"),
        (name = "system", description = "Health")
    )
)]
pub struct ApiDoc;

#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub storage: Arc<dyn ObjectStorage>,
    pub content: Arc<ContentService>,
    pub engagement: Arc<EngagementService>,
    pub profiles: Arc<ProfileService>,
    pub config: AppConfig,
}

pub fn create_app(state: AppState) -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .route("/health", get(api::handlers::health::health_check))
        .route("/auth/register", post(api::handlers::auth::register))
        .route("/auth/login", post(api::handlers::auth::login))
        .route(
            "/auth/session",
            get(api::handlers::auth::session).layer(from_fn_with_state(
                state.clone(),
                api::middleware::auth::auth_middleware,
            )),
        )
        .route(
            "/auth/password",
            axum::routing::put(api::handlers::auth::update_password).layer(
                from_fn_with_state(state.clone(), api::middleware::auth::auth_middleware),
            ),
        )
        .route(
            "/auth/account",
            axum::routing::delete(api::handlers::auth::delete_account).layer(
                from_fn_with_state(state.clone(), api::middleware::auth::auth_middleware),
            ),
        )
        // Gallery reads are public; mutations go through the session gate
        .route("/photos", get(api::handlers::photos::list_photos))
        .route(
            "/photos",
            post(api::handlers::photos::upload_photo).layer(from_fn_with_state(
                state.clone(),
                api::middleware::auth::auth_middleware,
            )),
        )
        .route(
            "/photos/:id",
            axum::routing::delete(api::handlers::photos::delete_photo).layer(from_fn_with_state(
                state.clone(),
                api::middleware::auth::auth_middleware,
            )),
        )
        .route("/videos", get(api::handlers::videos::list_videos))
        .route(
            "/videos",
            post(api::handlers::videos::upload_video).layer(from_fn_with_state(
                state.clone(),
                api::middleware::auth::auth_middleware,
            )),
        )
        .route(
            "/videos/:id",
            axum::routing::delete(api::handlers::videos::delete_video).layer(from_fn_with_state(
                state.clone(),
                api::middleware::auth::auth_middleware,
            )),
        )
        .route("/slideshow", get(api::handlers::slideshow::list_slideshow))
        .route(
            "/slideshow",
            post(api::handlers::slideshow::upload_slideshow_photo).layer(from_fn_with_state(
                state.clone(),
                api::middleware::auth::auth_middleware,
            )),
        )
        .route(
            "/slideshow/:id",
            axum::routing::delete(api::handlers::slideshow::delete_slideshow_photo).layer(
                from_fn_with_state(state.clone(), api::middleware::auth::auth_middleware),
            ),
        )
        .route("/comments", get(api::handlers::comments::list_comments))
        .route(
            "/comments",
            post(api::handlers::comments::create_comment).layer(from_fn_with_state(
                state.clone(),
                api::middleware::auth::auth_middleware,
            )),
        )
        .route(
            "/comments/:id",
            axum::routing::delete(api::handlers::comments::delete_comment).layer(
                from_fn_with_state(state.clone(), api::middleware::auth::auth_middleware),
            ),
        )
        .route(
            "/profiles/me",
            get(api::handlers::profiles::get_profile)
                .put(api::handlers::profiles::update_profile)
                .layer(from_fn_with_state(
                    state.clone(),
                    api::middleware::auth::auth_middleware,
                )),
        )
        .route(
            "/profiles/me/avatar",
            post(api::handlers::profiles::upload_avatar).layer(from_fn_with_state(
                state.clone(),
                api::middleware::auth::auth_middleware,
            )),
        )
        .route(
            "/admin/stats",
            get(api::handlers::stats::engagement_stats).layer(from_fn_with_state(
                state.clone(),
                api::middleware::auth::auth_middleware,
            )),
        )
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any)
                .expose_headers(Any),
        )
        .layer(axum::extract::DefaultBodyLimit::max(
            state.config.max_upload_size + 10 * 1024 * 1024, // multipart overhead
        ))
        .with_state(state)
}
