/// Server configuration loaded from environment variables.
///
/// All fields have sensible defaults suitable for local development.
/// In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Object storage backend selection.
    pub storage: StorageConfig,
    /// Vimeo API access token.
    pub vimeo_access_token: String,
}

/// Which object store backs thumbnails and attachments.
#[derive(Debug, Clone)]
pub enum StorageConfig {
    /// Blobs under a local directory, served from `/objects`.
    Local { root: String, base_url: String },
    /// S3-compatible bucket.
    S3 { bucket: String },
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                          |
    /// |------------------------|----------------------------------|
    /// | `HOST`                 | `0.0.0.0`                        |
    /// | `PORT`                 | `3000`                           |
    /// | `CORS_ORIGINS`         | `http://localhost:3001`          |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                             |
    /// | `STORAGE_BACKEND`      | `local`                          |
    /// | `STORAGE_LOCAL_ROOT`   | `storage/objects`                |
    /// | `STORAGE_PUBLIC_URL`   | `http://localhost:3000/objects`  |
    /// | `STORAGE_S3_BUCKET`    | (required when backend is `s3`)  |
    /// | `VIMEO_ACCESS_TOKEN`   | empty (relay endpoints will 502) |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:3001".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let storage = match std::env::var("STORAGE_BACKEND").as_deref() {
            Ok("s3") => StorageConfig::S3 {
                bucket: std::env::var("STORAGE_S3_BUCKET")
                    .expect("STORAGE_S3_BUCKET must be set when STORAGE_BACKEND=s3"),
            },
            _ => StorageConfig::Local {
                root: std::env::var("STORAGE_LOCAL_ROOT")
                    .unwrap_or_else(|_| "storage/objects".into()),
                base_url: std::env::var("STORAGE_PUBLIC_URL")
                    .unwrap_or_else(|_| "http://localhost:3000/objects".into()),
            },
        };

        let vimeo_access_token = std::env::var("VIMEO_ACCESS_TOKEN").unwrap_or_default();

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            storage,
            vimeo_access_token,
        }
    }
}
