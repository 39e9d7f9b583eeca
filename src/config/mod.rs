use std::env;

/// Runtime configuration for the content API
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Maximum upload size in bytes (default: 256 MB)
    pub max_upload_size: usize,

    /// Object-storage bucket for photos, avatars and slideshow blobs
    pub photos_bucket: String,

    /// Object-storage bucket for videos and their thumbnails
    pub videos_bucket: String,

    /// Base URL the storage endpoint serves public objects from,
    /// e.g. "http://127.0.0.1:9000". Public URLs are
    /// "{public_base_url}/{bucket}/{key}".
    pub public_base_url: String,

    /// JWT signing secret (required in production)
    pub jwt_secret: String,

    /// Session lifetime in hours (default: 24)
    pub session_ttl_hours: i64,

    /// Allowed CORS origins (comma separated)
    pub allowed_origins: Vec<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            max_upload_size: 256 * 1024 * 1024, // 256 MB
            photos_bucket: "photos".to_string(),
            videos_bucket: "videos".to_string(),
            public_base_url: "http://127.0.0.1:9000".to_string(),
            jwt_secret: "secret".to_string(),
            session_ttl_hours: 24,
            allowed_origins: vec![
                "http://localhost:3000".to_string(),
                "http://localhost:5173".to_string(), // Vite default
                "http://127.0.0.1:3000".to_string(),
            ],
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let default = Self::default();

        Self {
            max_upload_size: env::var("MAX_UPLOAD_SIZE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(default.max_upload_size),

            photos_bucket: env::var("PHOTOS_BUCKET").unwrap_or(default.photos_bucket),

            videos_bucket: env::var("VIDEOS_BUCKET").unwrap_or(default.videos_bucket),

            public_base_url: env::var("PUBLIC_BASE_URL")
                .map(|v| v.trim_end_matches('/').to_string())
                .unwrap_or(default.public_base_url),

            jwt_secret: env::var("JWT_SECRET").unwrap_or_else(|_| "secret".to_string()),

            session_ttl_hours: env::var("SESSION_TTL_HOURS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(default.session_ttl_hours),

            allowed_origins: env::var("ALLOWED_ORIGINS")
                .ok()
                .map(|v| v.split(',').map(|s| s.trim().to_string()).collect())
                .unwrap_or(default.allowed_origins),
        }
    }

    /// Create config for production (JWT secret must be set)
    pub fn production() -> Self {
        Self {
            jwt_secret: env::var("JWT_SECRET").expect("CRITICAL: JWT_SECRET must be set"),
            ..Self::from_env()
        }
    }
}
