//! Service configuration loaded from environment variables

use anyhow::Result;
use std::env;

/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Port the HTTP server binds to
    pub port: u16,
    /// Secret used to sign and verify bearer tokens
    pub jwt_secret: String,
    /// Token lifetime in seconds; 0 disables expiry
    pub jwt_token_expiry: u64,
    /// Allowed CORS origins; empty allows any origin
    pub cors_origins: Vec<String>,
    /// Directory uploaded images are written to
    pub upload_dir: String,
}

impl AppConfig {
    /// Create a new AppConfig from environment variables
    ///
    /// # Environment Variables
    /// - `JWT_SECRET`: signing secret for bearer tokens (required)
    /// - `JWT_TOKEN_EXPIRY`: token lifetime in seconds, 0 = never expires
    ///   (default: 604800)
    /// - `PORT`: server port (default: 5555)
    /// - `CORS_ORIGINS`: comma separated list of allowed origins (default: any)
    /// - `UPLOAD_DIR`: directory for uploaded images (default: uploads)
    pub fn from_env() -> Result<Self> {
        let jwt_secret = env::var("JWT_SECRET")
            .map_err(|_| anyhow::anyhow!("JWT_SECRET environment variable not set"))?;

        let jwt_token_expiry = env::var("JWT_TOKEN_EXPIRY")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(604_800);

        let port = env::var("PORT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(5555);

        let cors_origins = env::var("CORS_ORIGINS")
            .map(|s| {
                s.split(',')
                    .map(|o| o.trim().to_string())
                    .filter(|o| !o.is_empty())
                    .collect()
            })
            .unwrap_or_default();

        let upload_dir = env::var("UPLOAD_DIR").unwrap_or_else(|_| "uploads".to_string());

        Ok(AppConfig {
            port,
            jwt_secret,
            jwt_token_expiry,
            cors_origins,
            upload_dir,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_config_defaults() {
        unsafe {
            std::env::set_var("JWT_SECRET", "test-secret");
            std::env::remove_var("JWT_TOKEN_EXPIRY");
            std::env::remove_var("PORT");
            std::env::remove_var("CORS_ORIGINS");
            std::env::remove_var("UPLOAD_DIR");
        }

        let config = AppConfig::from_env().unwrap();
        assert_eq!(config.port, 5555);
        assert_eq!(config.jwt_token_expiry, 604_800);
        assert!(config.cors_origins.is_empty());
        assert_eq!(config.upload_dir, "uploads");

        unsafe {
            std::env::remove_var("JWT_SECRET");
        }
    }

    #[test]
    #[serial]
    fn test_config_missing_secret() {
        unsafe {
            std::env::remove_var("JWT_SECRET");
        }

        assert!(AppConfig::from_env().is_err());
    }

    #[test]
    #[serial]
    fn test_config_cors_origins_parsing() {
        unsafe {
            std::env::set_var("JWT_SECRET", "test-secret");
            std::env::set_var(
                "CORS_ORIGINS",
                "http://localhost:3000, https://stillstrava.example.com",
            );
        }

        let config = AppConfig::from_env().unwrap();
        assert_eq!(
            config.cors_origins,
            vec![
                "http://localhost:3000".to_string(),
                "https://stillstrava.example.com".to_string()
            ]
        );

        unsafe {
            std::env::remove_var("JWT_SECRET");
            std::env::remove_var("CORS_ORIGINS");
        }
    }
}
