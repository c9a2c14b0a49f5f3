/// Backend origin resolution. The diary backend serves both the `/api`
/// routes and uploaded media files from one origin.
pub const DEFAULT_API_URL: &str = "http://localhost:8000";

#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub base_url: String,
}

impl ClientConfig {
    /// Read `SEMDIARY_API_URL` (populated from the environment or a `.env`
    /// file loaded in `run()`), falling back to the local dev backend.
    pub fn from_env() -> Self {
        let base_url = std::env::var("SEMDIARY_API_URL")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn with_base_url(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }
}
